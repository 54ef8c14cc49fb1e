use super::record::RowParser;
use super::{ContentRecord, RawRow};
use crate::error::{CatalogError, CatalogResult};
use std::collections::{BTreeMap, HashMap};

/// The immutable record store. Built once from raw rows, read-only for the
/// rest of the process; every derived view (counts, search results,
/// recommendations) is an ephemeral value owned by the caller.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<ContentRecord>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Parses every raw row into a [`ContentRecord`]. The whole load fails on
    /// the first malformed row or duplicate id, leaving no partial store.
    pub fn build(rows: Vec<RawRow>) -> CatalogResult<Catalog> {
        let parser = RowParser::new();
        let mut records: Vec<ContentRecord> = Vec::with_capacity(rows.len());
        let mut by_id: HashMap<String, usize> = HashMap::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            let record = parser.parse(row, i + 1)?;
            if by_id.contains_key(&record.id) {
                return Err(CatalogError::DuplicateRecord { id: record.id });
            }
            by_id.insert(record.id.clone(), records.len());
            records.push(record);
        }

        Ok(Catalog { records, by_id })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ContentRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentRecord> {
        self.records.iter()
    }

    /// Matching records in insertion order. The predicate is a pure function
    /// of one record.
    pub fn filter<P>(&self, predicate: P) -> Vec<&ContentRecord>
    where
        P: Fn(&ContentRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Groups records by the keys `key_fn` yields. A record contributes to
    /// one group per yielded key, so a multi-valued field (genres, countries,
    /// cast) fans out into every one of its groups; a record yielding no keys
    /// lands in no group. Insertion order is preserved within each group.
    pub fn group_by<K, F>(&self, key_fn: F) -> BTreeMap<K, Vec<&ContentRecord>>
    where
        K: Ord,
        F: Fn(&ContentRecord) -> Vec<K>,
    {
        let mut groups: BTreeMap<K, Vec<&ContentRecord>> = BTreeMap::new();
        for record in &self.records {
            for key in key_fn(record) {
                groups.entry(key).or_default().push(record);
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentType;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_rows() -> Vec<RawRow> {
        vec![
            row(&[
                ("show_id", "s1"),
                ("type", "Movie"),
                ("title", "Alpha"),
                ("release_year", "2020"),
                ("listed_in", "Drama"),
            ]),
            row(&[
                ("show_id", "s2"),
                ("type", "TV Show"),
                ("title", "Beta"),
                ("release_year", "2020"),
                ("listed_in", "Drama, Comedy"),
            ]),
            row(&[
                ("show_id", "s3"),
                ("type", "Movie"),
                ("title", "Gamma"),
                ("release_year", "2021"),
            ]),
        ]
    }

    #[test]
    fn builds_in_insertion_order() {
        let catalog = Catalog::build(sample_rows()).unwrap();
        assert_eq!(catalog.len(), 3);
        let ids: Vec<&str> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3"]);
        assert_eq!(catalog.get("s2").unwrap().title, "Beta");
        assert!(catalog.get("s4").is_none());
    }

    #[test]
    fn empty_row_sequence_builds_empty_store() {
        let catalog = Catalog::build(vec![]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn duplicate_id_aborts_load() {
        let mut rows = sample_rows();
        rows.push(row(&[
            ("show_id", "s1"),
            ("type", "Movie"),
            ("title", "Alpha Again"),
            ("release_year", "2022"),
        ]));
        let err = Catalog::build(rows).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRecord { id } if id == "s1"));
    }

    #[test]
    fn malformed_row_aborts_load() {
        let mut rows = sample_rows();
        rows[1].remove("release_year");
        let err = Catalog::build(rows).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MalformedRecord { row: 2, field: "release_year", .. }
        ));
    }

    #[test]
    fn filter_preserves_insertion_order() {
        let catalog = Catalog::build(sample_rows()).unwrap();
        let movies = catalog.filter(|r| r.content_type == ContentType::Movie);
        let ids: Vec<&str> = movies.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3"]);
    }

    #[test]
    fn group_by_fans_out_multi_valued_keys() {
        let catalog = Catalog::build(sample_rows()).unwrap();
        let groups = catalog.group_by(|r| r.genres.clone());
        assert_eq!(groups.get("Drama").map(Vec::len), Some(2));
        assert_eq!(groups.get("Comedy").map(Vec::len), Some(1));
        // s3 has no genres and lands in no group; fan-out sum still covers
        // every genre occurrence.
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, 3);
    }
}

//! Category counts over the catalog.
//!
//! Every function here is pure and recomputed on demand. Keys derived from an
//! absent optional field land in the [`UNKNOWN`] bucket rather than being
//! dropped, so the buckets of each breakdown always add up to the full record
//! count. Multi-valued fields (countries, genres, cast) fan out: a record
//! with three genres counts once in each of its three genre buckets.

use crate::catalog::{Catalog, ContentRecord, ContentType};
use chrono::Datelike;
use std::collections::BTreeMap;

/// Bucket for keys derived from an absent optional field.
pub const UNKNOWN: &str = "Unknown";

fn labels_or_unknown(values: &[String]) -> Vec<String> {
    if values.is_empty() {
        vec![UNKNOWN.to_owned()]
    } else {
        values.to_vec()
    }
}

fn counts_of<K: Ord>(groups: BTreeMap<K, Vec<&ContentRecord>>) -> BTreeMap<K, usize> {
    groups.into_iter().map(|(k, g)| (k, g.len())).collect()
}

/// Movie/TV-show split. Values always sum to the record count.
pub fn count_by_type(catalog: &Catalog) -> BTreeMap<ContentType, usize> {
    counts_of(catalog.group_by(|r| vec![r.content_type]))
}

/// Titles per country, fanned out over each listed country.
pub fn count_by_country(catalog: &Catalog) -> BTreeMap<String, usize> {
    counts_of(catalog.group_by(|r| labels_or_unknown(&r.countries)))
}

/// Titles per release year. Sparse: years with no titles are absent, and the
/// map iterates in ascending year order.
pub fn count_by_year(catalog: &Catalog) -> BTreeMap<u16, usize> {
    counts_of(catalog.group_by(|r| vec![r.release_year]))
}

/// Titles per rating code.
pub fn count_by_rating(catalog: &Catalog) -> BTreeMap<String, usize> {
    counts_of(catalog.group_by(|r| {
        vec![r.rating.clone().unwrap_or_else(|| UNKNOWN.to_owned())]
    }))
}

/// Titles per genre, fanned out over each listed genre.
pub fn count_by_genre(catalog: &Catalog) -> BTreeMap<String, usize> {
    counts_of(catalog.group_by(|r| labels_or_unknown(&r.genres)))
}

/// Titles per director. A "A, B" credit counts for both directors.
pub fn count_by_director(catalog: &Catalog) -> BTreeMap<String, usize> {
    counts_of(catalog.group_by(|r| match &r.director {
        None => vec![UNKNOWN.to_owned()],
        Some(credit) => credit
            .split(',')
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect(),
    }))
}

/// Titles per cast member, fanned out over the full cast list.
pub fn count_by_cast_member(catalog: &Catalog) -> BTreeMap<String, usize> {
    counts_of(catalog.group_by(|r| labels_or_unknown(&r.cast)))
}

/// Titles per calendar year they were added to the platform. Records without
/// a `date_added` keep the completeness invariant through the `None` bucket.
pub fn count_by_year_added(catalog: &Catalog) -> BTreeMap<Option<i32>, usize> {
    counts_of(catalog.group_by(|r| vec![r.date_added.map(|d| d.year())]))
}

/// Co-occurrence counts of unordered genre pairs within a single record.
pub fn genre_pair_counts(catalog: &Catalog) -> BTreeMap<(String, String), usize> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for record in catalog.iter() {
        let mut genres: Vec<&String> = record.genres.iter().collect();
        genres.sort();
        genres.dedup();
        for i in 0..genres.len() {
            for j in (i + 1)..genres.len() {
                *counts
                    .entry((genres[i].clone(), genres[j].clone()))
                    .or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Ranks a count map by descending count; ties break by ascending key.
pub fn ranked<K: Ord + Clone>(counts: &BTreeMap<K, usize>) -> Vec<(K, usize)> {
    let mut out: Vec<(K, usize)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    // Stable sort keeps the map's ascending key order among equal counts.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

//! Ad-hoc substring search over the record store.
//!
//! Search does not score or rank; results come back in store insertion
//! order. Ranking only exists in the recommender, and only as hard
//! filtering.

use crate::catalog::{Catalog, ContentRecord};
use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

/// Textual fields a query can be matched against.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SearchField {
    Title,
    Cast,
    Director,
    Genres,
    Description,
}

fn field_text(record: &ContentRecord, field: SearchField) -> Option<String> {
    match field {
        SearchField::Title => Some(record.title.clone()),
        SearchField::Director => record.director.clone(),
        SearchField::Description => record.description.clone(),
        SearchField::Cast if record.cast.is_empty() => None,
        SearchField::Cast => Some(record.cast.join(", ")),
        SearchField::Genres if record.genres.is_empty() => None,
        SearchField::Genres => Some(record.genres.join(", ")),
    }
}

/// Case-insensitive substring search across the selected fields. The fields'
/// text is joined with a separator (multi-valued fields join their elements
/// with ", " first) and a record matches if the query occurs anywhere in the
/// result. Matches come back in store insertion order.
///
/// An empty (or whitespace-only) query and an empty field set both fail with
/// [`CatalogError::InvalidQuery`].
pub fn search<'a>(
    catalog: &'a Catalog,
    query: &str,
    fields: &[SearchField],
) -> CatalogResult<Vec<&'a ContentRecord>> {
    let query = query.trim();
    if query.is_empty() || fields.is_empty() {
        return Err(CatalogError::InvalidQuery);
    }
    let needle = query.to_lowercase();

    Ok(catalog.filter(|record| {
        let haystack: Vec<String> = fields
            .iter()
            .filter_map(|&field| field_text(record, field))
            .collect();
        haystack.join("\n").to_lowercase().contains(&needle)
    }))
}

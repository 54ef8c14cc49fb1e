use crate::catalog::{Catalog, ContentType};
use crate::error::{CatalogError, CatalogResult};
use serde::Serialize;

/// Summary statistics over the durations of one content type, in that type's
/// native unit (minutes for movies, seasons for TV shows).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationStats {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub median: f64,
}

/// Computes duration statistics over the cohort of the given content type.
/// Records without a duration are left out of the numbers; if the cohort is
/// empty, or no record in it carries a duration, there is nothing to
/// summarize and the call fails with [`CatalogError::EmptyCohort`].
pub fn duration_stats(catalog: &Catalog, content_type: ContentType) -> CatalogResult<DurationStats> {
    let cohort = catalog.filter(|r| r.content_type == content_type);
    let mut values: Vec<u32> = cohort
        .iter()
        .filter_map(|r| r.duration.map(|d| d.value()))
        .collect();

    if values.is_empty() {
        return Err(CatalogError::EmptyCohort { content_type });
    }

    values.sort_unstable();
    let n = values.len();
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    let median = if n % 2 == 1 {
        f64::from(values[n / 2])
    } else {
        f64::from(values[n / 2 - 1] + values[n / 2]) / 2.0
    };

    Ok(DurationStats {
        min: values[0],
        max: values[n - 1],
        mean: sum as f64 / n as f64,
        median,
    })
}

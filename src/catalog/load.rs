use super::rows::parse_delimited;
use super::{Catalog, ContentType, RawRow};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Reads the data file at `path` and builds the catalog from it. A `.json`
/// file is expected to hold an array of row objects; anything else is read as
/// comma-delimited text with a header row.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;

    let rows: Vec<RawRow> = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {} as a row array", path.display()))?
    } else {
        parse_delimited(&text)
            .with_context(|| format!("Failed to parse {} as delimited text", path.display()))?
    };

    info!("Read {} rows from {}", rows.len(), path.display());
    let catalog = Catalog::build(rows).context("Could not build catalog")?;

    let movies = catalog
        .iter()
        .filter(|r| r.content_type == ContentType::Movie)
        .count();
    info!(
        "Catalog has:\n{} titles\n{} movies\n{} tv shows",
        catalog.len(),
        movies,
        catalog.len() - movies
    );
    Ok(catalog)
}

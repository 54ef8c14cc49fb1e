//! Cross-tabulations: counts keyed by a (row, column) pair, rebuildable into
//! a pivot table with missing cells implicitly zero.

use super::aggregate::UNKNOWN;
use crate::catalog::{Catalog, ContentType};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct CrossTab<R, C>
where
    R: Ord + Clone,
    C: Ord + Clone,
{
    cells: BTreeMap<(R, C), usize>,
}

impl<R, C> CrossTab<R, C>
where
    R: Ord + Clone,
    C: Ord + Clone,
{
    pub fn new() -> CrossTab<R, C> {
        CrossTab {
            cells: BTreeMap::new(),
        }
    }

    fn add(&mut self, row: R, col: C) {
        *self.cells.entry((row, col)).or_insert(0) += 1;
    }

    /// Cell count; absent cells are zero.
    pub fn get(&self, row: &R, col: &C) -> usize {
        self.cells
            .get(&(row.clone(), col.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub fn rows(&self) -> BTreeSet<R> {
        self.cells.keys().map(|(r, _)| r.clone()).collect()
    }

    pub fn cols(&self) -> BTreeSet<C> {
        self.cells.keys().map(|(_, c)| c.clone()).collect()
    }

    pub fn total(&self) -> usize {
        self.cells.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<R, C> Default for CrossTab<R, C>
where
    R: Ord + Clone,
    C: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Movie/TV-show counts per release year.
pub fn type_by_year(catalog: &Catalog) -> CrossTab<u16, ContentType> {
    let mut tab = CrossTab::new();
    for record in catalog.iter() {
        tab.add(record.release_year, record.content_type);
    }
    tab
}

/// Rating counts per release year; unrated titles column under "Unknown".
pub fn rating_by_year(catalog: &Catalog) -> CrossTab<u16, String> {
    let mut tab = CrossTab::new();
    for record in catalog.iter() {
        let rating = record.rating.clone().unwrap_or_else(|| UNKNOWN.to_owned());
        tab.add(record.release_year, rating);
    }
    tab
}

/// Genre counts per release year, fanned out over each listed genre.
pub fn genre_trend(catalog: &Catalog) -> CrossTab<u16, String> {
    let mut tab = CrossTab::new();
    for record in catalog.iter() {
        for genre in &record.genres {
            tab.add(record.release_year, genre.clone());
        }
    }
    tab
}

/// Movie/TV-show counts per country, fanned out over each listed country.
pub fn type_by_country(catalog: &Catalog) -> CrossTab<String, ContentType> {
    let mut tab = CrossTab::new();
    for record in catalog.iter() {
        for country in &record.countries {
            tab.add(country.clone(), record.content_type);
        }
        if record.countries.is_empty() {
            tab.add(UNKNOWN.to_owned(), record.content_type);
        }
    }
    tab
}

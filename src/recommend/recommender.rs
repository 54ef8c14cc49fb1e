//! Preference-based recommendations.
//!
//! This is a filter-and-truncate recommender: every supplied criterion must
//! hold (logical AND), omitted criteria impose nothing, and matches come
//! back in store insertion order cut off at the requested limit. There is no
//! similarity scoring.

use crate::catalog::{Catalog, ContentRecord, ContentType};
use crate::error::{CatalogError, CatalogResult};
use std::collections::HashMap;

/// Maps rating codes to a numeric rank so preferences can bound them. Codes
/// the scale does not know about have no rank.
#[derive(Debug, Clone, Default)]
pub struct RatingScale {
    ranks: HashMap<String, u8>,
}

impl RatingScale {
    pub fn new<I>(ranks: I) -> RatingScale
    where
        I: IntoIterator<Item = (String, u8)>,
    {
        RatingScale {
            ranks: ranks.into_iter().collect(),
        }
    }

    pub fn rank(&self, code: &str) -> Option<u8> {
        self.ranks.get(code).copied()
    }

    /// The common US film and TV advisory ladder, tiered by target audience:
    /// 0 all ages, 1 older kids, 2 parental guidance, 3 teens, 4 mature.
    pub fn us_tv_film() -> RatingScale {
        let tiers: &[(&str, u8)] = &[
            ("G", 0),
            ("TV-Y", 0),
            ("TV-G", 0),
            ("TV-Y7", 1),
            ("TV-Y7-FV", 1),
            ("PG", 2),
            ("TV-PG", 2),
            ("PG-13", 3),
            ("TV-14", 3),
            ("R", 4),
            ("NC-17", 4),
            ("TV-MA", 4),
        ];
        RatingScale::new(tiers.iter().map(|&(code, rank)| (code.to_owned(), rank)))
    }
}

/// User preference criteria. Every present criterion must hold for a record
/// to match.
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    /// Exact content type match.
    pub content_type: Option<ContentType>,
    /// Matches if the genre appears anywhere in the record's genre list,
    /// compared case-insensitively.
    pub genre: Option<String>,
    /// Inclusive lower bound on the rating rank. Ignored without a scale.
    pub min_rating: Option<u8>,
    /// Inclusive upper bound on the rating rank. Ignored without a scale.
    pub max_rating: Option<u8>,
    /// Numeric interpretation of rating codes for the bounds above. When a
    /// bound is supplied, records whose code the scale cannot rank (or with
    /// no rating at all) do not match.
    pub rating_scale: Option<RatingScale>,
}

impl Preferences {
    pub fn matches(&self, record: &ContentRecord) -> bool {
        if let Some(content_type) = self.content_type {
            if record.content_type != content_type {
                return false;
            }
        }
        if let Some(genre) = &self.genre {
            if !record.genres.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
                return false;
            }
        }
        if let Some(scale) = &self.rating_scale {
            if self.min_rating.is_some() || self.max_rating.is_some() {
                let rank = record.rating.as_deref().and_then(|code| scale.rank(code));
                let Some(rank) = rank else {
                    return false;
                };
                if self.min_rating.is_some_and(|min| rank < min) {
                    return false;
                }
                if self.max_rating.is_some_and(|max| rank > max) {
                    return false;
                }
            }
        }
        true
    }
}

/// Records matching every supplied preference, in store insertion order,
/// truncated to `limit`. Zero matches is an empty result, not an error;
/// `limit == 0` fails with [`CatalogError::InvalidArgument`].
pub fn recommend<'a>(
    catalog: &'a Catalog,
    preferences: &Preferences,
    limit: usize,
) -> CatalogResult<Vec<&'a ContentRecord>> {
    if limit == 0 {
        return Err(CatalogError::InvalidArgument {
            reason: "recommendation limit must be positive".to_owned(),
        });
    }
    let mut matches = catalog.filter(|record| preferences.matches(record));
    matches.truncate(limit);
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawRow;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_catalog() -> Catalog {
        Catalog::build(vec![
            row(&[
                ("show_id", "s1"),
                ("type", "Movie"),
                ("title", "Alpha"),
                ("release_year", "2020"),
                ("listed_in", "Drama"),
                ("rating", "PG"),
            ]),
            row(&[
                ("show_id", "s2"),
                ("type", "TV Show"),
                ("title", "Beta"),
                ("release_year", "2020"),
                ("listed_in", "Drama, Comedy"),
                ("rating", "TV-MA"),
            ]),
            row(&[
                ("show_id", "s3"),
                ("type", "Movie"),
                ("title", "Gamma"),
                ("release_year", "2021"),
                ("listed_in", "Comedy"),
            ]),
        ])
        .unwrap()
    }

    fn ids(results: &[&ContentRecord]) -> Vec<String> {
        results.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn type_filter_truncates_in_store_order() {
        let catalog = sample_catalog();
        let prefs = Preferences {
            content_type: Some(ContentType::Movie),
            ..Preferences::default()
        };
        let results = recommend(&catalog, &prefs, 1).unwrap();
        assert_eq!(ids(&results), vec!["s1"]);
    }

    #[test]
    fn genre_matches_anywhere_in_genre_list() {
        let catalog = sample_catalog();
        let prefs = Preferences {
            genre: Some("comedy".to_owned()),
            ..Preferences::default()
        };
        let results = recommend(&catalog, &prefs, 5).unwrap();
        assert_eq!(ids(&results), vec!["s2", "s3"]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let catalog = sample_catalog();
        let prefs = Preferences {
            content_type: Some(ContentType::TvShow),
            genre: Some("Comedy".to_owned()),
            ..Preferences::default()
        };
        let results = recommend(&catalog, &prefs, 5).unwrap();
        assert_eq!(ids(&results), vec!["s2"]);
    }

    #[test]
    fn rating_bounds_apply_through_the_scale() {
        let catalog = sample_catalog();
        let prefs = Preferences {
            max_rating: Some(3),
            rating_scale: Some(RatingScale::us_tv_film()),
            ..Preferences::default()
        };
        let results = recommend(&catalog, &prefs, 5).unwrap();
        // s2 is TV-MA (tier 4); s3 has no rating and fails the bound too.
        assert_eq!(ids(&results), vec!["s1"]);
    }

    #[test]
    fn rating_bounds_without_scale_are_ignored() {
        let catalog = sample_catalog();
        let prefs = Preferences {
            min_rating: Some(4),
            ..Preferences::default()
        };
        let results = recommend(&catalog, &prefs, 5).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn no_criteria_matches_everything() {
        let catalog = sample_catalog();
        let results = recommend(&catalog, &Preferences::default(), 10).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn result_is_subset_of_manual_filter_and_bounded_by_limit() {
        let catalog = sample_catalog();
        let prefs = Preferences {
            genre: Some("Drama".to_owned()),
            ..Preferences::default()
        };
        let results = recommend(&catalog, &prefs, 1).unwrap();
        assert!(results.len() <= 1);
        let manual = catalog.filter(|r| prefs.matches(r));
        for record in &results {
            assert!(manual.iter().any(|m| m.id == record.id));
        }
    }

    #[test]
    fn zero_matches_is_empty_not_error() {
        let catalog = sample_catalog();
        let prefs = Preferences {
            genre: Some("Horror".to_owned()),
            ..Preferences::default()
        };
        let results = recommend(&catalog, &prefs, 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn zero_limit_fails() {
        let catalog = sample_catalog();
        let err = recommend(&catalog, &Preferences::default(), 0).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument { .. }));
    }

    #[test]
    fn unknown_code_has_no_rank() {
        let scale = RatingScale::us_tv_film();
        assert_eq!(scale.rank("TV-MA"), Some(4));
        assert_eq!(scale.rank("UR"), None);
    }
}

mod aggregate;
mod crosstab;
mod duration;
mod keywords;

pub use aggregate::{
    count_by_cast_member, count_by_country, count_by_director, count_by_genre, count_by_rating,
    count_by_type, count_by_year, count_by_year_added, genre_pair_counts, ranked, UNKNOWN,
};
pub use crosstab::{genre_trend, rating_by_year, type_by_country, type_by_year, CrossTab};
pub use duration::{duration_stats, DurationStats};
pub use keywords::keyword_counts;

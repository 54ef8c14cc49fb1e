mod recommender;

pub use recommender::{recommend, Preferences, RatingScale};

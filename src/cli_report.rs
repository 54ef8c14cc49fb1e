//! One-shot report binary: loads the catalog and prints every analysis once.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flixboard::catalog::{load_catalog, Catalog, ContentType};
use flixboard::config::FileConfig;
use flixboard::render;
use flixboard::stats;

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s).canonicalize()?;
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the catalog data file (.csv or .json).
    #[clap(value_parser = parse_path)]
    pub data_path: Option<PathBuf>,

    /// Path to an optional TOML config file.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// How many entries ranked tables show.
    #[clap(long)]
    pub top_n: Option<usize>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let config = match &cli_args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let default_level = config
        .logging_level
        .as_deref()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let data_path = cli_args
        .data_path
        .clone()
        .or_else(|| config.data_path.as_ref().map(PathBuf::from))
        .context("No data file specified on the command line or in the config file.")?;
    let top_n = cli_args.top_n.or(config.top_n).unwrap_or(10);

    let catalog = load_catalog(&data_path)?;
    print_report(&catalog, top_n);
    Ok(())
}

fn print_report(catalog: &Catalog, top_n: usize) {
    println!(
        "{}",
        render::count_table("Titles by content type:", &stats::count_by_type(catalog))
    );
    println!(
        "{}",
        render::top_table(
            "Top countries by content count:",
            &stats::ranked(&stats::count_by_country(catalog)),
            top_n
        )
    );
    println!(
        "{}",
        render::count_table("Titles by release year:", &stats::count_by_year(catalog))
    );
    println!(
        "{}",
        render::count_table("Titles by rating:", &stats::count_by_rating(catalog))
    );
    println!(
        "{}",
        render::top_table(
            "Top genres:",
            &stats::ranked(&stats::count_by_genre(catalog)),
            top_n
        )
    );

    let added: Vec<(String, usize)> = stats::count_by_year_added(catalog)
        .into_iter()
        .map(|(year, count)| {
            let label = match year {
                Some(year) => year.to_string(),
                None => stats::UNKNOWN.to_owned(),
            };
            (label, count)
        })
        .collect();
    let added_map: std::collections::BTreeMap<String, usize> = added.into_iter().collect();
    println!(
        "{}",
        render::count_table("Titles added per year:", &added_map)
    );

    println!(
        "{}",
        render::top_table(
            "Top directors:",
            &stats::ranked(&stats::count_by_director(catalog)),
            top_n
        )
    );
    println!(
        "{}",
        render::top_table(
            "Top cast members:",
            &stats::ranked(&stats::count_by_cast_member(catalog)),
            top_n
        )
    );

    for (content_type, unit) in [(ContentType::Movie, "min"), (ContentType::TvShow, "seasons")] {
        match stats::duration_stats(catalog, content_type) {
            Ok(duration) => println!(
                "{}",
                render::duration_summary(&content_type.to_string(), unit, &duration)
            ),
            Err(err) => println!("{err}"),
        }
    }
    println!();

    println!(
        "{}",
        render::pivot_table(
            "Content types by release year:",
            &stats::type_by_year(catalog)
        )
    );
    println!(
        "{}",
        render::pivot_table("Ratings by release year:", &stats::rating_by_year(catalog))
    );
    println!(
        "{}",
        render::pivot_table(
            "Content types by country:",
            &stats::type_by_country(catalog)
        )
    );

    let top_genres: Vec<String> = stats::ranked(&stats::count_by_genre(catalog))
        .into_iter()
        .take(5)
        .map(|(genre, _)| genre)
        .collect();
    println!(
        "{}",
        render::pivot_table_with_cols(
            "Top genre trends by release year:",
            &stats::genre_trend(catalog),
            &top_genres
        )
    );

    println!(
        "{}",
        render::top_table(
            "Top keywords in descriptions:",
            &stats::ranked(&stats::keyword_counts(catalog, 4)),
            top_n
        )
    );

    let pairs: Vec<(String, usize)> = stats::ranked(&stats::genre_pair_counts(catalog))
        .into_iter()
        .map(|((a, b), count)| (format!("{a} & {b}"), count))
        .collect();
    println!(
        "{}",
        render::top_table("Top genre combinations:", &pairs, top_n)
    );
}

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flixboard::catalog::{load_catalog, Catalog, ContentType};
use flixboard::config::FileConfig;
use flixboard::recommend::{recommend, Preferences, RatingScale};
use flixboard::render;
use flixboard::search::{search, SearchField};
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

    /// How many recommendations to return.
    #[clap(long)]
    pub recommend_limit: Option<usize>,
}

fn init_tracing(default_level: Option<&str>) {
    let default = default_level
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let config = match &cli_args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    init_tracing(config.logging_level.as_deref());

    let data_path = cli_args
        .data_path
        .clone()
        .or_else(|| config.data_path.as_ref().map(PathBuf::from))
        .context("No data file specified on the command line or in the config file.")?;
    let top_n = cli_args.top_n.or(config.top_n).unwrap_or(10);
    let recommend_limit = cli_args
        .recommend_limit
        .or(config.recommend_limit)
        .unwrap_or(5);

    let catalog = load_catalog(&data_path)?;
    run_dashboard(&catalog, top_n, recommend_limit)
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_owned())
}

fn run_dashboard(catalog: &Catalog, top_n: usize, recommend_limit: usize) -> Result<()> {
    println!(
        "Welcome to the catalog dashboard, {} titles loaded.",
        catalog.len()
    );

    loop {
        println!();
        println!("Choose an option to explore:");
        println!("1. Overview");
        println!("2. Content types");
        println!("3. Countries");
        println!("4. Genres");
        println!("5. Ratings");
        println!("6. Durations");
        println!("7. Trends over time");
        println!("8. Search");
        println!("9. Recommendations");
        println!("0. Exit");

        let choice = prompt("Enter your choice (0-9): ")?;
        println!();
        match choice.as_str() {
            "1" => show_overview(catalog),
            "2" => print!(
                "{}",
                render::count_table("Titles by content type:", &stats::count_by_type(catalog))
            ),
            "3" => print!(
                "{}",
                render::top_table(
                    "Top countries by content count:",
                    &stats::ranked(&stats::count_by_country(catalog)),
                    top_n
                )
            ),
            "4" => show_genres(catalog, top_n),
            "5" => print!(
                "{}",
                render::count_table("Titles by rating:", &stats::count_by_rating(catalog))
            ),
            "6" => show_durations(catalog),
            "7" => show_trends(catalog),
            "8" => search_flow(catalog)?,
            "9" => recommend_flow(catalog, recommend_limit)?,
            "0" => {
                println!("Thanks for browsing the catalog, goodbye!");
                return Ok(());
            }
            _ => println!("Invalid choice. Please enter a number between 0 and 9."),
        }
    }
}

fn show_overview(catalog: &Catalog) {
    let types = stats::count_by_type(catalog);
    let movies = types.get(&ContentType::Movie).copied().unwrap_or(0);
    let tv_shows = types.get(&ContentType::TvShow).copied().unwrap_or(0);
    println!(
        "{} titles ({movies} movies, {tv_shows} tv shows)",
        catalog.len()
    );

    let years = stats::count_by_year(catalog);
    if let (Some(first), Some(last)) = (years.keys().next(), years.keys().last()) {
        println!("Release years {first} to {last}");
    }
    println!(
        "{} genres across {} countries",
        stats::count_by_genre(catalog).len(),
        stats::count_by_country(catalog).len()
    );
}

fn show_genres(catalog: &Catalog, top_n: usize) {
    print!(
        "{}",
        render::top_table(
            "Top genres:",
            &stats::ranked(&stats::count_by_genre(catalog)),
            top_n
        )
    );
    println!();

    let pairs = stats::genre_pair_counts(catalog);
    let ranked: Vec<(String, usize)> = stats::ranked(&pairs)
        .into_iter()
        .map(|((a, b), count)| (format!("{a} & {b}"), count))
        .collect();
    print!("{}", render::top_table("Top genre combinations:", &ranked, top_n));
}

fn show_durations(catalog: &Catalog) {
    for (content_type, unit) in [(ContentType::Movie, "min"), (ContentType::TvShow, "seasons")] {
        match stats::duration_stats(catalog, content_type) {
            Ok(stats) => println!(
                "{}",
                render::duration_summary(&content_type.to_string(), unit, &stats)
            ),
            Err(err) => println!("{err}"),
        }
    }
}

fn show_trends(catalog: &Catalog) {
    print!(
        "{}",
        render::pivot_table(
            "Content types by release year:",
            &stats::type_by_year(catalog)
        )
    );
    println!();
    print!(
        "{}",
        render::pivot_table("Ratings by release year:", &stats::rating_by_year(catalog))
    );
    println!();

    let top_genres: Vec<String> = stats::ranked(&stats::count_by_genre(catalog))
        .into_iter()
        .take(5)
        .map(|(genre, _)| genre)
        .collect();
    print!(
        "{}",
        render::pivot_table_with_cols(
            "Top genre trends by release year:",
            &stats::genre_trend(catalog),
            &top_genres
        )
    );
}

fn search_flow(catalog: &Catalog) -> Result<()> {
    const FIELDS: &[SearchField] = &[
        SearchField::Title,
        SearchField::Cast,
        SearchField::Director,
        SearchField::Description,
    ];
    const MAX_SHOWN: usize = 10;

    let query = prompt("Enter a title, actor, director, or keyword to search for: ")?;
    match search(catalog, &query, FIELDS) {
        Err(err) => println!("{err}"),
        Ok(results) if results.is_empty() => {
            println!("No results found for \"{query}\". Try a different search term.")
        }
        Ok(results) => {
            println!("Found {} results for \"{query}\":", results.len());
            for (i, record) in results.iter().take(MAX_SHOWN).enumerate() {
                println!();
                println!("{}", render::record_block(i + 1, record));
            }
            if results.len() > MAX_SHOWN {
                println!();
                println!("... and {} more results", results.len() - MAX_SHOWN);
            }
        }
    }
    Ok(())
}

fn rating_bound(scale: &RatingScale, label: &str) -> Result<Option<u8>> {
    let code = prompt(label)?;
    if code.is_empty() {
        return Ok(None);
    }
    let rank = scale.rank(&code.to_uppercase());
    if rank.is_none() {
        println!("Unrecognized rating \"{code}\", ignoring it.");
    }
    Ok(rank)
}

fn recommend_flow(catalog: &Catalog, limit: usize) -> Result<()> {
    println!("What type of content are you interested in?");
    println!("1. Movies");
    println!("2. TV Shows");
    println!("3. Both");
    let content_type = match prompt("Enter your choice (1-3): ")?.as_str() {
        "1" => Some(ContentType::Movie),
        "2" => Some(ContentType::TvShow),
        "3" => None,
        _ => {
            println!("Invalid choice. Showing both types.");
            None
        }
    };

    let genre = prompt("Enter a genre you're interested in (or press Enter to skip): ")?;
    let genre = (!genre.is_empty()).then_some(genre);

    let scale = RatingScale::us_tv_film();
    let min_rating = rating_bound(&scale, "Mildest rating to include (e.g. PG, or press Enter to skip): ")?;
    let max_rating = rating_bound(&scale, "Strongest rating to include (e.g. TV-MA, or press Enter to skip): ")?;

    let preferences = Preferences {
        content_type,
        genre,
        min_rating,
        max_rating,
        rating_scale: (min_rating.is_some() || max_rating.is_some()).then_some(scale),
    };

    match recommend(catalog, &preferences, limit) {
        Err(err) => println!("{err}"),
        Ok(results) if results.is_empty() => {
            println!("Sorry, no content matches your preferences. Try different criteria.")
        }
        Ok(results) => {
            println!("Found {} recommendations:", results.len());
            for (i, record) in results.iter().enumerate() {
                println!();
                println!("{}", render::record_block(i + 1, record));
            }
        }
    }
    Ok(())
}

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{TrainedModel, parse_minimal_movies, parse_rich_movies};
use pipeline::{DEFAULT_MAX_FEATURES, MinimalTags, RichTags, Trainer};
use recommender::{
    DEFAULT_COUNT, Enricher, OfflineEnricher, RecommendationSet, Recommender, TmdbEnricher,
};
use server::Config;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tmdb_client::{MovieDetails, TmdbClient};
use tracing::info;

/// Movie Recs - content-based movie recommender
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Train and query a content-based movie recommender", long_about = None)]
struct Cli {
    /// Directory holding movie_list.bin and similarity.bin
    #[arg(short, long, default_value = ".", global = true)]
    model_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TagMode {
    /// Title and overview only
    Minimal,
    /// Overview, genres, keywords, top cast and directors
    Rich,
}

#[derive(Subcommand)]
enum Commands {
    /// Build tags, vectorize and write the similarity artifacts
    Train {
        /// Movies CSV
        #[arg(long)]
        movies: PathBuf,

        /// Credits CSV (required for rich mode)
        #[arg(long)]
        credits: Option<PathBuf>,

        /// Tag-building strategy
        #[arg(long, value_enum, default_value = "rich")]
        mode: TagMode,

        /// Vocabulary cap for the vectorizer
        #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
        max_features: usize,
    },

    /// Recommend movies similar to a title
    Recommend {
        /// Title to match (case-insensitive substring)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Look candidates up in the movie database and skip those without a poster
        #[arg(long)]
        enrich: bool,
    },

    /// Search the trained movie table by title
    Search {
        /// Title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Maximum number of titles to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Train {
            movies,
            credits,
            mode,
            max_features,
        } => handle_train(&cli.model_dir, &movies, credits.as_deref(), mode, max_features)?,
        Commands::Recommend {
            title,
            count,
            enrich,
        } => handle_recommend(&cli.model_dir, &title, count, enrich).await?,
        Commands::Search { title, limit } => handle_search(&cli.model_dir, &title, limit)?,
    }

    Ok(())
}

fn load_model(model_dir: &Path) -> Result<Arc<TrainedModel>> {
    let start = Instant::now();
    let model = TrainedModel::load(model_dir).with_context(|| {
        format!(
            "Failed to load model from {}; run `movie-recs train` first",
            model_dir.display()
        )
    })?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        model.movies().len(),
        start.elapsed()
    );
    Ok(Arc::new(model))
}

/// Handle the 'train' command
fn handle_train(
    model_dir: &Path,
    movies: &Path,
    credits: Option<&Path>,
    mode: TagMode,
    max_features: usize,
) -> Result<()> {
    let start = Instant::now();
    info!("Training from {}", movies.display());

    let (rows, trainer) = match mode {
        TagMode::Minimal => {
            let rows = parse_minimal_movies(movies).context("Failed to read movies table")?;
            (rows, Trainer::new(MinimalTags))
        }
        TagMode::Rich => {
            let Some(credits) = credits else {
                bail!("--credits is required with --mode rich");
            };
            let rows = parse_rich_movies(movies, credits)
                .context("Failed to read movies and credits tables")?;
            (rows, Trainer::new(RichTags::new()))
        }
    };
    println!("{} Read {} source rows", "✓".green(), rows.len());

    let model = trainer
        .with_max_features(max_features)
        .train(rows)
        .context("Training failed")?;
    model
        .save(model_dir)
        .with_context(|| format!("Failed to write artifacts to {}", model_dir.display()))?;

    println!(
        "{} Trained {} movies in {:?}; artifacts written to {}",
        "✓".green(),
        model.movies().len(),
        start.elapsed(),
        model_dir.display()
    );
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(model_dir: &Path, title: &str, count: usize, enrich: bool) -> Result<()> {
    let model = load_model(model_dir)?;

    if enrich {
        let config = Config::from_env().context("Movie database is not configured")?;
        let client = TmdbClient::new(config.api_key()?, config.tmdb_api_url.clone());
        let recommender = Recommender::new(model, TmdbEnricher::new(Arc::new(client)));
        let set = run_query(&recommender, title, count).await?;
        print_recommendations(&set, describe_details);
    } else {
        let recommender = Recommender::new(model, OfflineEnricher);
        let set = run_query(&recommender, title, count).await?;
        print_recommendations(&set, |_| None);
    }
    Ok(())
}

async fn run_query<E: Enricher>(
    recommender: &Recommender<E>,
    title: &str,
    count: usize,
) -> Result<RecommendationSet<E::Payload>> {
    Ok(recommender.recommend(title, count).await?)
}

fn describe_details(details: &MovieDetails) -> Option<String> {
    let year = details
        .release_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .unwrap_or("????");
    let mut line = format!(
        "{} | rating {:.1} ({} votes)",
        year, details.vote_average, details.vote_count
    );
    if let Some(trailer) = &details.trailer_url {
        line.push_str(&format!(" | {}", trailer));
    }
    Some(line)
}

/// Helper function to format and print recommendations
fn print_recommendations<P>(set: &RecommendationSet<P>, describe: impl Fn(&P) -> Option<String>) {
    println!(
        "{}",
        format!("Movies similar to \"{}\":", set.resolved_title).bold().blue()
    );
    if set.recommendations.is_empty() {
        println!("  (no recommendations)");
    }
    for (rank, rec) in set.recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.3}",
            (rank + 1).to_string().green(),
            rec.title,
            rec.score
        );
        if let Some(line) = describe(&rec.payload) {
            println!("   {}", line);
        }
    }
}

/// Handle the 'search' command
fn handle_search(model_dir: &Path, title: &str, limit: usize) -> Result<()> {
    let model = load_model(model_dir)?;

    let matches = model.movies().search_titles(title, limit);
    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for movie_title in matches {
        println!("{} {}", "•".cyan(), movie_title);
    }
    Ok(())
}

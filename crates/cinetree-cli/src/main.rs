//! cinetree - TMDB catalog browser CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use cinetree_api::views::{Genre, Timezone};
use cinetree_api::{
    HasId, HasName, HttpTransport, MediaSummary, ResultPage, Session, SessionRegistry,
    TreeBacked, TvSummary,
};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use url::Url;

use crate::config::{AppConfig, TmdbConfig, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// TMDB API key (default: config file, then `TMDB_API_KEY`).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List TV series.
    Tv(TvCommand),
    /// Search the catalog.
    Search(SearchCommand),
    /// Show movie details.
    Movie(DetailsArgs),
    /// Show TV series details.
    Series(DetailsArgs),
    /// List genres.
    Genres(GenresCommand),
    /// Show the remote configuration.
    Configuration(ConfigurationArgs),
    /// Write TMDB settings to the config file.
    Init(InitArgs),
}

/// Arguments for the `tv` subcommand.
#[derive(clap::Args)]
struct TvCommand {
    /// TV listing to fetch.
    #[command(subcommand)]
    command: TvSubcommands,
}

/// Available TV listings.
#[derive(Subcommand)]
enum TvSubcommands {
    /// Popular series.
    Popular(PageArgs),
    /// Top rated series.
    TopRated(PageArgs),
    /// Series with an episode airing today.
    AiringToday(PageArgs),
    /// Series airing within the next seven days.
    OnTheAir(PageArgs),
}

/// Paging options shared by listing subcommands.
#[derive(clap::Args)]
struct PageArgs {
    /// Response language (default: config file).
    #[arg(long)]
    language: Option<String>,
    /// Page number (0 lets the service choose).
    #[arg(long, default_value_t = 0)]
    page: i32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchCommand {
    /// Search target.
    #[command(subcommand)]
    command: SearchSubcommands,
}

/// Available search targets.
#[derive(Subcommand)]
enum SearchSubcommands {
    /// Search movies.
    Movie(SearchArgs),
    /// Search TV series.
    Tv(SearchArgs),
    /// Search movies, series and people.
    Multi(SearchArgs),
}

/// Arguments for the `search` subcommands.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Fight Club").
    #[arg(long, required = true)]
    query: String,
    /// Paging options.
    #[command(flatten)]
    paging: PageArgs,
}

/// Arguments for the `movie` and `series` subcommands.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB ID.
    id: i64,
    /// Response language (default: config file).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `genres` subcommand.
#[derive(clap::Args)]
struct GenresCommand {
    /// Genre list to fetch.
    #[command(subcommand)]
    command: GenresSubcommands,
    /// Response language (default: config file).
    #[arg(long, global = true)]
    language: Option<String>,
}

/// Available genre lists.
#[derive(Subcommand)]
enum GenresSubcommands {
    /// Movie genres.
    Movie,
    /// TV genres.
    Tv,
}

/// Arguments for the `configuration` subcommand.
#[derive(clap::Args)]
struct ConfigurationArgs {
    /// Dump the whole merged tree.
    #[arg(long)]
    tree: bool,
}

/// Arguments for the `init` subcommand.
#[derive(clap::Args)]
struct InitArgs {
    /// Default response language to store.
    #[arg(long)]
    language: Option<String>,
    /// Service root to store.
    #[arg(long)]
    base_url: Option<Url>,
}

/// Loads the config file selected by `--dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir.map(PathBuf::as_path))?;
    tracing::debug!(path = %path.display(), "loading config");
    AppConfig::load(&path)
}

/// Builds a registry from the config and returns the session for the resolved key.
///
/// # Errors
///
/// Returns an error if no API key is available or the session bootstrap fails.
#[instrument(skip_all)]
fn open_session(tmdb: &TmdbConfig, api_key: Option<&str>) -> Result<Arc<Session>> {
    let transport = HttpTransport::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB transport")?;

    let mut builder = SessionRegistry::builder().transport(Arc::new(transport));
    if let Some(base_url) = &tmdb.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid tmdb.base_url in config: {base_url}"))?;
        builder = builder.base_url(url);
    }
    let registry = builder.build().context("failed to build session registry")?;

    registry
        .instance(&tmdb.resolve_api_key(api_key))
        .context("failed to open TMDB session")
}

/// Logs a page header.
fn log_page_header<T>(page: &ResultPage<T>) -> Result<()> {
    tracing::info!(
        "Page {}/{} ({} results)",
        page.page()?,
        page.total_pages()?,
        page.total_results()?
    );
    Ok(())
}

/// Replaces an empty value with `-`.
fn or_dash(value: String) -> String {
    if value.is_empty() {
        String::from("-")
    } else {
        value
    }
}

/// Logs a TV listing.
///
/// # Errors
///
/// Returns an error if a result entry has malformed fields.
fn log_tv_page(page: &ResultPage<TvSummary>) -> Result<()> {
    log_page_header(page)?;
    tracing::info!("ID\tName\t\t\tCountry\tFirstAirDate");
    for show in page.items() {
        tracing::info!(
            "{}\t{}\t\t{}\t{}",
            show.id()?,
            show.name()?,
            or_dash(show.origin_country()?.join(",")),
            or_dash(show.first_air_date()?),
        );
    }
    Ok(())
}

/// Logs a movie or multi search listing.
///
/// # Errors
///
/// Returns an error if a result entry has malformed fields.
fn log_media_page(page: &ResultPage<MediaSummary>) -> Result<()> {
    log_page_header(page)?;
    tracing::info!("ID\tType\tTitle\t\t\tReleaseDate");
    for item in page.items() {
        tracing::info!(
            "{}\t{}\t{}\t\t{}",
            item.id()?,
            item.media_type()?,
            or_dash(item.title()?),
            or_dash(item.release_date()?),
        );
    }
    Ok(())
}

/// Runs a `tv` subcommand.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or the request fails.
#[instrument(skip_all)]
fn run_tv(cmd: &TvSubcommands, tmdb: &TmdbConfig, api_key: Option<&str>) -> Result<()> {
    let session = open_session(tmdb, api_key)?;
    let tv = session.tv();

    let (name, args) = match cmd {
        TvSubcommands::Popular(args) => ("popular", args),
        TvSubcommands::TopRated(args) => ("top_rated", args),
        TvSubcommands::AiringToday(args) => ("airing_today", args),
        TvSubcommands::OnTheAir(args) => ("on_the_air", args),
    };
    let language = tmdb.resolve_language(args.language.as_deref());

    let page = match cmd {
        TvSubcommands::Popular(_) => tv.popular(&language, args.page),
        TvSubcommands::TopRated(_) => tv.top_rated(&language, args.page),
        TvSubcommands::AiringToday(_) => tv.airing_today(&language, args.page),
        TvSubcommands::OnTheAir(_) => tv.on_the_air(&language, args.page),
    }
    .with_context(|| format!("TMDB tv/{name} request failed"))?;

    log_tv_page(&page)
}

/// Runs a `search` subcommand.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or the request fails.
#[instrument(skip_all)]
fn run_search(cmd: &SearchSubcommands, tmdb: &TmdbConfig, api_key: Option<&str>) -> Result<()> {
    let session = open_session(tmdb, api_key)?;
    let search = session.search();

    match cmd {
        SearchSubcommands::Movie(args) => {
            let language = tmdb.resolve_language(args.paging.language.as_deref());
            let page = search
                .movie(&args.query, &language, args.paging.page)
                .context("TMDB search/movie request failed")?;
            log_media_page(&page)
        }
        SearchSubcommands::Tv(args) => {
            let language = tmdb.resolve_language(args.paging.language.as_deref());
            let page = search
                .tv(&args.query, &language, args.paging.page)
                .context("TMDB search/tv request failed")?;
            log_tv_page(&page)
        }
        SearchSubcommands::Multi(args) => {
            let language = tmdb.resolve_language(args.paging.language.as_deref());
            let page = search
                .multi(&args.query, &language, args.paging.page)
                .context("TMDB search/multi request failed")?;
            log_media_page(&page)
        }
    }
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or the request fails.
#[instrument(skip_all)]
fn run_movie(args: &DetailsArgs, tmdb: &TmdbConfig, api_key: Option<&str>) -> Result<()> {
    let session = open_session(tmdb, api_key)?;
    let language = tmdb.resolve_language(args.language.as_deref());

    let Some(movie) = session
        .get()
        .movie(args.id, &language)
        .context("TMDB movie details request failed")?
    else {
        tracing::info!("No movie with ID {}", args.id);
        return Ok(());
    };

    tracing::info!("ID: {}", movie.id()?);
    tracing::info!("Title: {}", movie.title()?);
    tracing::info!("Original Title: {}", movie.original_title()?);
    tracing::info!("Release Date: {}", or_dash(movie.release_date()?));
    tracing::info!("Status: {}", or_dash(movie.status()?));
    tracing::info!("Runtime: {}min", movie.runtime()?);
    tracing::info!("Genres: {}", or_dash(join_names(&movie.genres()?)?));
    tracing::info!("Overview: {}", or_dash(movie.overview()?));

    Ok(())
}

/// Runs the `series` subcommand.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or the request fails.
#[instrument(skip_all)]
fn run_series(args: &DetailsArgs, tmdb: &TmdbConfig, api_key: Option<&str>) -> Result<()> {
    let session = open_session(tmdb, api_key)?;
    let language = tmdb.resolve_language(args.language.as_deref());

    let Some(series) = session
        .get()
        .tv(args.id, &language)
        .context("TMDB tv details request failed")?
    else {
        tracing::info!("No series with ID {}", args.id);
        return Ok(());
    };

    tracing::info!("ID: {}", series.id()?);
    tracing::info!("Name: {}", series.name()?);
    tracing::info!("Original Name: {}", series.original_name()?);
    tracing::info!("First Air Date: {}", or_dash(series.first_air_date()?));
    tracing::info!("Status: {}", or_dash(series.status()?));
    tracing::info!("Seasons: {}", series.number_of_seasons()?);
    tracing::info!("Episodes: {}", series.number_of_episodes()?);
    let networks: Vec<String> = series
        .networks()?
        .iter()
        .map(HasName::name)
        .collect::<cinetree_api::Result<_>>()?;
    tracing::info!("Networks: {}", or_dash(networks.join(", ")));
    tracing::info!("---");
    for season in series.seasons()? {
        tracing::info!(
            "  Season {}: {} episodes (air_date: {})",
            season.season_number()?,
            season.episode_count()?,
            or_dash(season.air_date()?),
        );
    }

    Ok(())
}

/// Joins genre names with `, `.
fn join_names(genres: &[Genre]) -> Result<String> {
    let names: Vec<String> = genres
        .iter()
        .map(HasName::name)
        .collect::<cinetree_api::Result<_>>()?;
    Ok(names.join(", "))
}

/// Runs a `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or the request fails.
#[instrument(skip_all)]
fn run_genres(cmd: &GenresCommand, tmdb: &TmdbConfig, api_key: Option<&str>) -> Result<()> {
    let session = open_session(tmdb, api_key)?;
    let language = tmdb.resolve_language(cmd.language.as_deref());

    let genres = match cmd.command {
        GenresSubcommands::Movie => session.get().movie_genres(&language),
        GenresSubcommands::Tv => session.get().tv_genres(&language),
    }
    .context("TMDB genre list request failed")?;

    tracing::info!("ID\tName");
    for genre in &genres {
        tracing::info!("{}\t{}", genre.id()?, genre.name()?);
    }

    Ok(())
}

/// Runs the `configuration` subcommand.
///
/// # Errors
///
/// Returns an error if the session cannot be opened.
#[instrument(skip_all)]
fn run_configuration(
    args: &ConfigurationArgs,
    tmdb: &TmdbConfig,
    api_key: Option<&str>,
) -> Result<()> {
    let session = open_session(tmdb, api_key)?;
    let configuration = session.configuration();

    if args.tree {
        tracing::info!("\n{}", configuration.view().render());
        return Ok(());
    }

    tracing::info!("Image Base URL: {}", configuration.secure_image_base_url()?);
    tracing::info!("Poster Sizes: {}", configuration.poster_sizes()?.join(", "));
    tracing::info!("Backdrop Sizes: {}", configuration.backdrop_sizes()?.join(", "));
    tracing::info!("Change Keys: {}", configuration.change_keys()?.len());
    let timezones: Vec<Timezone> = configuration.timezones()?;
    tracing::info!("Timezones: {} countries", timezones.len());

    Ok(())
}

/// Runs the `init` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
#[instrument(skip_all)]
fn run_init(args: &InitArgs, dir: Option<&PathBuf>, api_key: Option<&str>) -> Result<()> {
    let path = resolve_config_path(dir.map(PathBuf::as_path))?;
    let mut config = AppConfig::load(&path)?;

    if let Some(key) = api_key {
        config.tmdb.api_key = String::from(key);
    }
    if let Some(language) = &args.language {
        config.tmdb.language.clone_from(language);
    }
    if let Some(base_url) = &args.base_url {
        config.tmdb.base_url = Some(String::from(base_url.as_str()));
    }

    config.save(&path)?;
    tracing::info!("Wrote {}", path.display());

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let api_key = cli.api_key.as_deref();
    let config = load_config(cli.dir.as_ref())?;
    let tmdb = &config.tmdb;
    match &cli.command {
        Commands::Tv(cmd) => run_tv(&cmd.command, tmdb, api_key),
        Commands::Search(cmd) => run_search(&cmd.command, tmdb, api_key),
        Commands::Movie(args) => run_movie(args, tmdb, api_key),
        Commands::Series(args) => run_series(args, tmdb, api_key),
        Commands::Genres(cmd) => run_genres(cmd, tmdb, api_key),
        Commands::Configuration(args) => run_configuration(args, tmdb, api_key),
        Commands::Init(args) => run_init(args, cli.dir.as_ref(), api_key),
    }
}

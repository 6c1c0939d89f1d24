//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use webchunker_core::{ProgressReporter, chunk_file, chunk_url};
use webchunker_shared::{
    AppConfig, BoundaryRule, ChunkResult, ChunkerError, ExtractConfig, FetchConfig, init_config,
    load_config, load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// webchunker: turn a web page into heading-anchored content chunks.
#[derive(Parser)]
#[command(
    name = "webchunker",
    version,
    about = "Split a web page into titled, leveled content chunks and print them as JSON.",
    long_about = None,
    args_conflicts_with_subcommands = true,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to load instead of ~/.webchunker/webchunker.toml.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub chunk: ChunkArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Arguments of the default chunking command.
#[derive(Args, Debug, Default)]
pub(crate) struct ChunkArgs {
    /// URL of the page to chunk.
    #[arg(conflicts_with = "html")]
    pub url: Option<String>,

    /// Chunk a saved HTML file instead of fetching a URL.
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Section boundary rule: rank or next-heading.
    #[arg(long, value_name = "RULE")]
    pub boundary: Option<BoundaryRule>,

    /// Fold sections with identical titles into the first one
    /// (`=false` turns off a config file setting).
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub merge_duplicate_titles: Option<bool>,

    /// Emit level-0 "Navigation" and "Footer Links" sections.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub include_navigation: Option<bool>,

    /// One content item per list entry instead of one per list.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub split_list_items: Option<bool>,

    /// Include the heading analysis in the output.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub debug_headings: Option<bool>,

    /// Minimum length a section content item must exceed.
    #[arg(long, value_name = "N")]
    pub section_min_len: Option<usize>,

    /// Fetch timeout in seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// User-Agent header sent with the request.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Print JSON on one line instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

impl ChunkArgs {
    /// Fetch settings: config file values overridden by flags.
    pub fn fetch_config(&self, app: &AppConfig) -> FetchConfig {
        let mut config = FetchConfig::from(app);
        if let Some(secs) = self.timeout {
            config.timeout_secs = secs;
        }
        if let Some(ua) = &self.user_agent {
            config.user_agent = ua.clone();
        }
        config
    }

    /// Extraction settings: config file values overridden by flags.
    pub fn extract_config(&self, app: &AppConfig) -> ExtractConfig {
        let mut config = ExtractConfig::from(app);
        if let Some(boundary) = self.boundary {
            config.boundary = boundary;
        }
        if let Some(min_len) = self.section_min_len {
            config.section_min_len = min_len;
        }
        if let Some(merge) = self.merge_duplicate_titles {
            config.merge_duplicate_titles = merge;
        }
        if let Some(nav) = self.include_navigation {
            config.include_navigation = nav;
        }
        if let Some(split) = self.split_list_items {
            config.split_list_items = split;
        }
        if let Some(debug) = self.debug_headings {
            config.debug_headings = debug;
        }
        config
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout is
/// reserved for the JSON result.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "webchunker=warn",
        1 => "webchunker=info",
        2 => "webchunker=debug",
        _ => "webchunker=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()),
        },
        None => cmd_chunk(&cli.chunk, cli.config.as_deref()).await,
    }
}

/// Load the config file named on the command line, or the default one.
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

async fn cmd_chunk(args: &ChunkArgs, config_path: Option<&Path>) -> Result<()> {
    let app = resolve_config(config_path)?;
    let extract = args.extract_config(&app);
    let progress = CliProgress::new();

    let result = match (&args.html, &args.url) {
        (Some(path), _) => {
            info!(path = %path.display(), boundary = %extract.boundary, "chunking file");
            chunk_file(path, &extract, &progress)
        }
        (None, Some(url)) => {
            let fetch = args.fetch_config(&app);
            info!(url, boundary = %extract.boundary, timeout_secs = fetch.timeout_secs, "chunking page");
            chunk_url(url, &fetch, &extract, &progress).await
        }
        (None, None) => Err(ChunkerError::MissingUrl),
    };
    progress.clear();

    let result = result?;
    println!("{}", render(&result, args.compact)?);
    Ok(())
}

/// Serialize the result as JSON.
fn render(result: &ChunkResult, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    Ok(json)
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner on stderr.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn clear(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, result: &ChunkResult) {
        self.spinner.set_message(format!(
            "{} sections, {} items",
            result.big_chunks.len(),
            result.item_count()
        ));
    }
}

use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, search, show};
use std::path::PathBuf;
use watchbox_models::KindFilter;

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "watchbox")]
#[command(about = "Watchbox - Search the movie catalog and keep a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Also write logs to this file (rotated daily)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search, detail and watchlist session
    #[command(long_about = "Start an interactive session: search the catalog, narrow results by type and year range, open titles for details and build a watchlist for the session.")]
    Browse {
        /// Run this search right away
        query: Option<String>,
    },
    /// Search the catalog once and print the results
    Search {
        /// Title text to search for
        query: String,

        /// Restrict to one type: any, movie, series, episode
        #[arg(long = "type", value_name = "TYPE", value_parser = parse_kind)]
        kind: Option<KindFilter>,

        /// Earliest release year to keep
        #[arg(long)]
        from: Option<i32>,

        /// Latest release year to keep
        #[arg(long)]
        to: Option<i32>,

        /// Number of catalog pages to fetch
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Show full details for one title by its identifier
    Show {
        /// Catalog identifier, e.g. tt0133093
        id: String,
    },
    /// Inspect or edit configuration and credentials
    #[command(long_about = "Manage configuration and credentials for Watchbox. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },

    /// Store the catalog API key in the credentials file
    #[command(long_about = "Store the OMDb API key in the credentials file. The OMDB_API_KEY environment variable still takes precedence when set.")]
    ApiKey {
        /// API key (if not provided, will prompt)
        key: Option<String>,
    },
}

fn parse_kind(value: &str) -> Result<KindFilter, String> {
    value.parse::<KindFilter>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Interactive prompts get drowned out by info logs
    let default_level = match cli.command {
        Commands::Browse { .. } => "warn",
        _ => "info",
    };
    logging::init_logging(cli.verbose, cli.quiet, default_level, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Browse { query } => browse::run_browse(query, &output).await,
        Commands::Search { query, kind, from, to, pages } => {
            search::run_search(query, kind, from, to, pages, &output).await
        }
        Commands::Show { id } => show::run_show(id, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
    }
}

use std::io::IsTerminal;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "moodboard", version, about = "Turn a Spotify playlist into a moodboard")]
struct Cli {
    /// Path to a moodboard.json config file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to Spotify in the browser
    Login {
        /// Only open the browser; finish with `moodboard callback`
        #[arg(long)]
        no_wait: bool,

        /// How long to wait for the redirect, in milliseconds
        #[arg(long, env = "MOODBOARD_CALLBACK_TIMEOUT_MS")]
        timeout: Option<u64>,
    },

    /// Complete a login from the URL Spotify redirected the browser to
    Callback {
        /// The full redirected URL, including `?code=` or `?error=`
        url: String,
    },

    /// Show whether a usable Spotify session exists
    Status {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the current access token
    Token,

    /// Forget the stored session
    Logout,

    /// Build a moodboard from a playlist link, URI or id
    Board {
        /// Playlist link, `spotify:playlist:` URI or id
        playlist: String,

        /// Number of tracks to fetch
        #[arg(long, default_value_t = moodboard::api::DEFAULT_TRACK_LIMIT)]
        limit: u32,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("MOODBOARD_LOG_LEVEL")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = matches!(
        cli.command,
        Commands::Status { json: true } | Commands::Board { json: true, .. }
    );

    if let Err(e) = run(cli).await {
        moodboard::cli::output::print_error(&e, json_mode);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), moodboard::MoodboardError> {
    let mut config = moodboard::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Login { no_wait, timeout } => {
            if let Some(ms) = timeout {
                config.callback_timeout_ms = ms;
            }
            moodboard::cli::auth::run_login(config, no_wait).await
        }
        Commands::Callback { url } => moodboard::cli::auth::run_callback(config, &url).await,
        Commands::Status { json } => {
            moodboard::cli::auth::run_status(config, json, std::io::stdout().is_terminal())
        }
        Commands::Token => moodboard::cli::auth::run_token(config),
        Commands::Logout => moodboard::cli::auth::run_logout(config),
        Commands::Board {
            playlist,
            limit,
            json,
        } => moodboard::cli::board::run_board(config, &playlist, limit, json).await,
    }
}

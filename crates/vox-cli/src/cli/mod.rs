//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vox_core::api::ApiClient;
use vox_core::config::{self, Config};

mod commands;

#[derive(Parser)]
#[command(name = "vox")]
#[command(version)]
#[command(about = "Terminal client for the Vox polling service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Create an account and store the session
    Register {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Drop the stored session
    Logout,

    /// Browse and manage polls
    Polls {
        #[command(subcommand)]
        command: PollCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum PollCommands {
    /// Lists all polls
    List,
    /// Shows a poll with its current results
    Show {
        /// The ID of the poll to show
        #[arg(value_name = "POLL_ID")]
        id: i64,
    },
    /// Creates a poll
    Create {
        /// Poll title
        #[arg(short, long)]
        title: String,

        /// Poll description
        #[arg(short, long, default_value = "")]
        description: String,

        /// End date, passed to the backend as-is (e.g. 2026-09-01T12:00)
        #[arg(short, long, value_name = "DATE")]
        end_date: String,

        /// An option (repeat for each; at least two required)
        #[arg(short, long = "option", value_name = "TEXT")]
        options: Vec<String>,
    },
    /// Casts a vote for one option of a poll
    Vote {
        #[arg(value_name = "POLL_ID")]
        poll_id: i64,
        #[arg(value_name = "OPTION_ID")]
        option_id: i64,
    },
    /// Shows per-option vote counts for a poll
    Results {
        #[arg(value_name = "POLL_ID")]
        poll_id: i64,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Show the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the screen, so its logs go to a file; plain commands log
    // to stderr. The appender guard must outlive the event loop.
    let _guard = init_logging(cli.command.is_none())?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

/// Initializes tracing. Filter comes from VOX_LOG (default `warn`).
fn init_logging(interactive: bool) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::try_from_env("VOX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    if interactive {
        let logs_dir = config::paths::logs_dir();
        std::fs::create_dir_all(&logs_dir)
            .with_context(|| format!("create log directory {}", logs_dir.display()))?;
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(&logs_dir, "vox.log"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(None)
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let home = config::paths::vox_home();
    let client = ApiClient::new(&config, &home).context("create API client")?;

    // default to the interactive browser
    let Some(command) = cli.command else {
        return vox_tui::run(client);
    };

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(&client, &username, &password).await
        }
        Commands::Register { username, password } => {
            commands::auth::register(&client, &username, &password).await
        }
        Commands::Logout => commands::auth::logout(&client),

        Commands::Polls { command } => match command {
            PollCommands::List => commands::polls::list(&client).await,
            PollCommands::Show { id } => commands::polls::show(&client, id).await,
            PollCommands::Create {
                title,
                description,
                end_date,
                options,
            } => commands::polls::create(&client, title, description, end_date, options).await,
            PollCommands::Vote { poll_id, option_id } => {
                commands::polls::vote(&client, poll_id, option_id).await
            }
            PollCommands::Results { poll_id } => commands::polls::results(&client, poll_id).await,
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(&config),
        },
    }
}

//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use wren_core::config::Config;
use wren_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "wren")]
#[command(version = "0.1")]
#[command(about = "Terminal client for a Y microblog server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the server base URL from config
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive client (default when no command is given)
    Ui,

    /// Log in and store the bearer token
    Login {
        #[arg(value_name = "USERNAME")]
        username: String,

        /// Password (prompted on stdin if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out (clear the stored token)
    Logout,

    /// Register a new account (does not log in)
    Register {
        #[arg(value_name = "USERNAME")]
        username: String,

        #[arg(short, long)]
        email: String,

        /// Password (prompted on stdin if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Show the identity and role behind the stored token
    Whoami,

    /// List the latest posts
    Posts {
        /// Only show posts by this author
        #[arg(long, value_name = "USERNAME")]
        author: Option<String>,
    },

    /// Publish a post
    Post {
        /// Message text
        #[arg(short, long)]
        message: String,

        /// Hashtag to attach (repeatable, leading '#' optional)
        #[arg(short = 't', long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },

    /// Delete a post by id (moderators and admins)
    Delete {
        #[arg(value_name = "POST_ID")]
        id: u64,
    },

    /// Delete the logged-in account
    DeleteAccount {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }

    // The interactive client logs to a file; everything else to stderr.
    let Some(command) = cli.command else {
        return run_ui(&config).await;
    };

    match command {
        Commands::Ui => run_ui(&config).await,
        Commands::Login { username, password } => {
            logging::init_cli();
            commands::auth::login(&config, &username, password.as_deref()).await
        }
        Commands::Logout => {
            logging::init_cli();
            commands::auth::logout()
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            logging::init_cli();
            commands::auth::register(&config, &username, &email, password.as_deref()).await
        }
        Commands::Whoami => {
            logging::init_cli();
            commands::auth::whoami(&config).await
        }
        Commands::Posts { author } => {
            logging::init_cli();
            commands::posts::list(&config, author.as_deref()).await
        }
        Commands::Post { message, tags } => {
            logging::init_cli();
            commands::posts::publish(&config, &message, &tags).await
        }
        Commands::Delete { id } => {
            logging::init_cli();
            commands::posts::delete(&config, id).await
        }
        Commands::DeleteAccount { yes } => {
            logging::init_cli();
            commands::account::delete(&config, yes).await
        }
        Commands::Config { command } => {
            logging::init_cli();
            match command {
                ConfigCommands::Path => commands::config::path(),
                ConfigCommands::Init => commands::config::init(),
            }
        }
    }
}

async fn run_ui(config: &Config) -> Result<()> {
    // File logging; keep the guard alive until the TUI exits so buffered
    // lines are flushed.
    let _guard = match logging::init_tui() {
        Ok((guard, path)) => {
            tracing::info!("logging to {}", path.display());
            Some(guard)
        }
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    wren_tui::run(config).await
}

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use remote_command_server::cli::{
    open_store, run_initdb, run_project_create, run_project_list, run_token_create,
};
use remote_command_server::config::ServerConfig;
use remote_command_server::server::{AppState, create_deploy_router, create_router};

#[derive(Parser)]
#[command(name = "remote-command-server")]
#[command(about = "Run registered shell commands over HTTP", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new database with all tables but no entries in FILENAME
    Initdb {
        /// Database file to create. It must not exist yet.
        filename: PathBuf,
    },

    /// Create a new project in the database
    Project {
        /// Shell command to run
        #[arg(long, short = 'c')]
        command: String,

        /// Database file. This must be a SQLite 3 file with all required tables.
        #[arg(long, visible_alias = "db", env = "REMOTE_COMMAND_DATABASE")]
        database: PathBuf,

        /// Directory in which to run the command. It must exist; relative paths are
        /// made absolute and symlinks are resolved.
        #[arg(long, short = 'd')]
        directory: PathBuf,

        /// Project name
        #[arg(long, short = 'n')]
        name: String,
    },

    /// List the projects in the database
    Projects {
        /// Database file
        #[arg(long, visible_alias = "db", env = "REMOTE_COMMAND_DATABASE")]
        database: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new token for a project and print it
    Token {
        /// Database file
        #[arg(long, visible_alias = "db", env = "REMOTE_COMMAND_DATABASE")]
        database: PathBuf,

        /// Project name. The project must exist in the database already.
        #[arg(long, short = 'p')]
        project: String,
    },

    /// Start the run server
    Serve {
        /// Database file
        #[arg(long, visible_alias = "db", env = "REMOTE_COMMAND_DATABASE")]
        database: PathBuf,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "8080")]
        port: u16,

        /// Kill commands running longer than this many seconds (0 or unset: no limit)
        #[arg(long)]
        command_timeout: Option<u64>,
    },

    /// Start the deployment trigger server
    DeployServer {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "8081")]
        port: u16,
    },
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let store = open_store(&config.database)?;
    info!("Using database {}", config.database.display());

    match config.command_timeout {
        Some(timeout) => info!("Commands are killed after {}s", timeout.as_secs()),
        None => info!("Commands run without a timeout"),
    }

    let state = Arc::new(AppState::new(Arc::new(store), config.command_timeout));
    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn serve_deploy(config: ServerConfig) -> anyhow::Result<()> {
    let app = create_deploy_router();
    let addr = config.socket_addr()?;

    info!("Starting deployment server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("remote_command_server=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Initdb { filename } => run_initdb(filename)?,
        Commands::Project {
            command,
            database,
            directory,
            name,
        } => run_project_create(database, name, directory, command)?,
        Commands::Projects { database, json } => run_project_list(database, json)?,
        Commands::Token { database, project } => run_token_create(database, project)?,
        Commands::Serve {
            database,
            host,
            port,
            command_timeout,
        } => {
            let config = ServerConfig {
                host,
                port,
                database,
                command_timeout: command_timeout
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs),
            };
            serve(config).await?;
        }
        Commands::DeployServer { host, port } => {
            let config = ServerConfig {
                host,
                port,
                ..ServerConfig::default()
            };
            serve_deploy(config).await?;
        }
    }

    Ok(())
}

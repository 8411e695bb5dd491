//! CLI entry point for sumi

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sumi")]
#[command(version)]
#[command(about = "A small markdown blog engine", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category for the new post
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Export the static site
    #[command(alias = "b")]
    Build,

    /// Serve the blog with server-rendered pages
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List site content (posts, categories)
    List {
        /// Type of content to list
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Remove the output directory
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "sumi=debug,info"
    } else {
        "sumi=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            sumi::commands::init::init_site(&target_dir)?;
            println!("Initialized new blog in {:?}", target_dir);
        }

        Commands::New { title, category } => {
            let site = sumi::Site::new(&base_dir)?;
            sumi::commands::new::run(&site, &title, category.as_deref())?;
        }

        Commands::Build => {
            let site = sumi::Site::new(&base_dir)?;
            site.build()?;
            println!("Built successfully!");
        }

        Commands::Serve { port, ip } => {
            let site = sumi::Site::new(&base_dir)?;
            sumi::server::start(&site, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let site = sumi::Site::new(&base_dir)?;
            sumi::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = sumi::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}

//! CLI entry point for blog-reader

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_reader::commands;
use blog_reader::Reader;

#[derive(Parser)]
#[command(name = "blog-reader")]
#[command(version)]
#[command(about = "Read, search, and serve front-matter blog posts", long_about = None)]
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
    /// Create a config file and a posts directory
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Author name
        #[arg(short, long, default_value = "")]
        author: String,

        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// One-line description
        #[arg(long, default_value = "")]
        description: String,

        /// File name (defaults to the slugified title)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List posts, optionally filtered by a search query
    #[command(alias = "ls")]
    List {
        /// Case-insensitive search over title, description, author, and tags
        #[arg(default_value = "")]
        query: String,

        /// Also print tag counts
        #[arg(long)]
        tags: bool,

        /// Read posts from a prebuilt manifest file
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Render one post to HTML
    Show {
        /// Post identifier, e.g. `hello-world` or `2024/notes`
        path: String,

        /// Print a full HTML page rather than just the body
        #[arg(long)]
        page: bool,

        /// Read posts from a prebuilt manifest file
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Scan the posts directory and write a JSON manifest
    Manifest {
        /// Output file
        #[arg(short, long, default_value = "manifest.json")]
        output: PathBuf,
    },

    /// Start the reader server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the config value)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the config value)
        #[arg(short, long)]
        ip: Option<String>,

        /// Reload posts and connected browsers when files change
        #[arg(short, long)]
        watch: bool,

        /// Read posts from a prebuilt manifest file
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_reader=debug,info"
    } else {
        "blog_reader=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let open = |manifest: Option<PathBuf>| -> Result<Reader> {
        let reader = Reader::new(&base_dir)?;
        Ok(match manifest {
            Some(file) => reader.with_manifest_file(file),
            None => reader,
        })
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized blog-reader site in {:?}", target_dir);
        }

        Commands::New {
            title,
            author,
            tags,
            description,
            path,
        } => {
            let reader = open(None)?;
            tracing::info!("Creating new post with title: {}", title);
            let post = commands::new::NewPost {
                title: &title,
                author: &author,
                tags: &tags,
                description: &description,
                path: path.as_deref(),
            };
            commands::new::create_post(&reader, &post)?;
        }

        Commands::List {
            query,
            tags,
            manifest,
        } => {
            let reader = open(manifest)?;
            commands::list::run(&reader, &query, tags).await?;
        }

        Commands::Show {
            path,
            page,
            manifest,
        } => {
            let reader = open(manifest)?;
            commands::show::run(&reader, &path, page).await?;
        }

        Commands::Manifest { output } => {
            let reader = open(None)?;
            let output = if output.is_absolute() {
                output
            } else {
                base_dir.join(output)
            };
            let manifest = commands::manifest::run(&reader, &output)?;
            println!("Wrote {} posts to {:?}", manifest.len(), output);
        }

        Commands::Serve {
            port,
            ip,
            watch,
            manifest,
        } => {
            let reader = open(manifest)?;
            let ip = ip.unwrap_or_else(|| reader.config.server.ip.clone());
            let port = port.unwrap_or(reader.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog_reader::server::start(&reader, &ip, port, watch).await?;
        }
    }

    Ok(())
}

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vibe_movies::{
    api::{create_router, AppState},
    output, Config, Recommender,
};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about = "Describe a vibe, get a few movies to watch", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recommend movies for a vibe given as arguments or on stdin
    Recommend(RecommendArgs),
    /// Serve recommendations over HTTP on the local machine
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
struct RecommendArgs {
    /// Free-text description of the mood you are in
    vibe: Vec<String>,

    /// Number of movies to show (defaults to RESULT_LIMIT)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to bind (defaults to HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (defaults to PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env()?;

    match cli.command {
        Commands::Recommend(args) => handle_recommend(&config, args).await,
        Commands::Serve(args) => handle_serve(&config, args).await,
    }
}

/// Logs go to stderr so stdout only carries the movie list
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "vibe_movies=warn",
        1 => "vibe_movies=info,tower_http=info",
        _ => "vibe_movies=debug,tower_http=debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

// --- Command Handlers ---

async fn handle_recommend(config: &Config, args: RecommendArgs) -> Result<()> {
    let recommender = Recommender::from_config(config)?;

    let vibe = if args.vibe.is_empty() {
        read_vibe_from_stdin()?
    } else {
        args.vibe.join(" ")
    };

    let recommendations = recommender.recommend(&vibe, args.limit).await?;

    let rendered = if args.json {
        output::render_json(&recommendations)?
    } else {
        output::render_text(&recommendations)
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered.trim_end())?;
    Ok(())
}

fn read_vibe_from_stdin() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("What are you in the mood for? ");
        io::stderr().flush()?;
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("Failed to read vibe from stdin")?;

    if line.trim().is_empty() {
        bail!("No vibe given. Pass it as arguments or on stdin.");
    }
    Ok(line)
}

async fn handle_serve(config: &Config, args: ServeArgs) -> Result<()> {
    let recommender = Recommender::from_config(config)?;
    let app = create_router(AppState::new(recommender));

    let host = args.host.unwrap_or_else(|| config.host.clone());
    let port = args.port.unwrap_or(config.port);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(addr = %addr, "Server listening");
    eprintln!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

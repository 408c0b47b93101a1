use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sparcli::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Forget the stored Spotify token
    Logout,

    /// List the artists you follow
    Followed(ListOptions),

    /// List the artists appearing in your playlists
    PlaylistArtists(ListOptions),

    /// List playlist artists you don't follow yet
    Reconcile(ReconcileOptions),

    /// Follow one or more artists
    Follow(ArtistIds),

    /// Unfollow one or more artists
    Unfollow(ArtistIds),

    /// Hide artists from the reconcile list
    Hide(HideOptions),

    /// Show previously hidden artists again
    Unhide(ArtistIds),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ListOptions {
    /// Only show artists whose name contains this text
    #[clap(long)]
    pub search: Option<String>,

    /// Sort by name instead of Spotify's order
    #[clap(long)]
    pub sort: bool,

    /// Print JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ReconcileOptions {
    /// Print JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistIds {
    /// Spotify artist ids
    #[clap(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct HideOptions {
    /// Spotify artist ids
    #[clap(required_unless_present = "clear")]
    pub ids: Vec<String>,

    /// Empty the hidden list first
    #[clap(long)]
    pub clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Logout => cli::logout().await,
        Command::Followed(opt) => cli::followed(opt.search, opt.sort, opt.json).await,
        Command::PlaylistArtists(opt) => {
            cli::playlist_artists(opt.search, opt.sort, opt.json).await
        }
        Command::Reconcile(opt) => cli::reconcile(opt.json).await,
        Command::Follow(opt) => cli::follow(opt.ids).await,
        Command::Unfollow(opt) => cli::unfollow(opt.ids).await,
        Command::Hide(opt) => cli::hide(opt.ids, opt.clear).await,
        Command::Unhide(opt) => cli::unhide(opt.ids).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use qobuzfav::{cli, config, error};

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
    /// Start the web app
    Serve(ServeOptions),

    /// Search playlists or list the tracks of one
    Playlists(PlaylistsOptions),

    /// Add all tracks of the given playlists to favorites
    Import(ImportOptions),

    /// List, preview or delete favorites
    Favorites(FavoritesOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Open the web app in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Search playlists or list the tracks of one",
    args_conflicts_with_subcommands = true // disallow mixing --search with subcommands
)]
pub struct PlaylistsOptions {
    /// Search term
    #[clap(long)]
    pub search: Option<String>,

    /// Maximum number of playlists to show
    #[clap(long, default_value_t = 20)]
    pub limit: usize,

    /// List playlists owned by you first
    #[clap(long)]
    pub mine_first: bool,

    #[command(subcommand)]
    pub command: Option<PlaylistsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsSubcommand {
    /// List the tracks of a playlist
    Tracks(PlaylistTracksOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistTracksOpts {
    /// Qobuz playlist id
    pub playlist_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOptions {
    /// Qobuz playlist ids
    #[clap(required = true, num_args = 1..)]
    pub playlist_ids: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "List, preview or delete favorites",
    args_conflicts_with_subcommands = true // disallow mixing listing flags with subcommands
)]
pub struct FavoritesOptions {
    /// Only list favorites whose title, artist or album contains this text
    #[clap(long)]
    pub search: Option<String>,

    #[clap(long, default_value_t = 50)]
    pub limit: usize,

    #[clap(long, default_value_t = 0)]
    pub offset: usize,

    #[command(subcommand)]
    pub command: Option<FavoritesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FavoritesSubcommand {
    /// Count the favorites matching a query and show a few of them
    Preview(PreviewOpts),

    /// Delete all favorites or the ones matching a query
    Delete(DeleteOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewOpts {
    #[clap(long)]
    pub query: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteOpts {
    /// Delete the favorites matching this text
    #[clap(long, conflicts_with = "all", required_unless_present = "all")]
    pub query: Option<String>,

    /// Delete every favorite
    #[clap(long)]
    pub all: bool,

    /// Actually delete instead of previewing
    #[clap(long)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match &cli.command {
        Command::Serve(_) => init_tracing("qobuzfav=info,tower_http=info"),
        _ => init_tracing("qobuzfav=error"),
    }

    match cli.command {
        Command::Serve(opt) => cli::serve(opt.open).await,

        Command::Playlists(opt) => match opt.command {
            Some(PlaylistsSubcommand::Tracks(t)) => cli::playlist_tracks(t.playlist_id).await,
            None => match opt.search {
                Some(term) => cli::search_playlists(term, opt.limit, opt.mine_first).await,
                None => error!("Provide --search TERM or the `tracks` subcommand"),
            },
        },

        Command::Import(opt) => cli::import(opt.playlist_ids).await,

        Command::Favorites(opt) => match opt.command {
            Some(FavoritesSubcommand::Preview(p)) => cli::preview(p.query).await,
            Some(FavoritesSubcommand::Delete(d)) => cli::delete(d.query, d.all, d.yes).await,
            None => cli::list_favorites(opt.search, opt.limit, opt.offset).await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

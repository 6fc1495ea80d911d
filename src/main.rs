use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use discosync::{cli, config, warning};

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
    /// Run the HTTP sync server
    Serve,

    /// Create a playlist with every track of an artist, oldest first
    Create(CreateOptions),

    /// Add the tracks of an artist that a playlist is missing
    Augment(AugmentOptions),

    /// List your playlists
    Playlists(PlaylistsOptions),

    /// Manage the artist catalog cache
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TokenOption {
    /// Spotify access token
    #[clap(long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    pub token: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateOptions {
    /// Artist URL, URI or id
    #[clap(long)]
    pub artist: String,

    /// Name of the new playlist
    #[clap(long)]
    pub name: String,

    #[clap(flatten)]
    pub auth: TokenOption,
}

#[derive(Parser, Debug, Clone)]
pub struct AugmentOptions {
    /// Artist URL, URI or id
    #[clap(long)]
    pub artist: String,

    /// Id of the playlist to complete
    #[clap(long)]
    pub playlist: String,

    #[clap(flatten)]
    pub auth: TokenOption,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Only show playlists whose name contains this text
    #[clap(long)]
    pub search: Option<String>,

    #[clap(flatten)]
    pub auth: TokenOption,
}

#[derive(Parser, Debug, Clone)]
pub struct CacheOptions {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheSubcommand {
    /// Drop the cached catalog of an artist
    Clear(CacheClearOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct CacheClearOpts {
    /// Artist URL, URI or id
    #[clap(long)]
    pub artist: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("No .env loaded, using the environment only. {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve().await,
        Command::Create(opt) => cli::create(&opt.artist, &opt.name, &opt.auth.token).await,
        Command::Augment(opt) => cli::augment(&opt.artist, &opt.playlist, &opt.auth.token).await,
        Command::Playlists(opt) => cli::playlists(&opt.auth.token, opt.search).await,
        Command::Cache(opt) => match opt.command {
            CacheSubcommand::Clear(c) => cli::clear_cache(&c.artist).await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::sync::Mutex;

use collagefm::{
    cli, config, error,
    types::{ItemKind, Period, PkceToken, Template},
    utils,
};

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
    #[clap(about = "Render a listening chart as an album-art collage")]
    Collage(CollageOptions),

    #[clap(about = "Show a Last.fm profile card")]
    Profile(ProfileOptions),

    #[clap(about = "Show recently scrobbled tracks")]
    Recent(RecentOptions),

    #[clap(about = "Compare the taste of two users")]
    Compare(CompareOptions),

    #[clap(about = "Export a top-tracks chart as a Spotify playlist")]
    Playlist(PlaylistOptions),

    #[clap(about = "Authenticate with Spotify (needed for playlist export)")]
    Auth,

    #[clap(about = "Show or clear recently used usernames")]
    History(HistoryOptions),

    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CollageOptions {
    /// Last.fm username; defaults to the last one used
    username: Option<String>,

    #[clap(long, default_value = "albums", value_parser = utils::parse_kind)]
    kind: ItemKind,

    #[clap(long, default_value = "overall", value_parser = utils::parse_period)]
    period: Period,

    /// Grid side length (2-8)
    #[clap(long, default_value_t = 3, conflicts_with_all = ["width", "height"])]
    size: u32,

    /// Grid width in cells (2-8); use with --height for non-square grids
    #[clap(long, requires = "height")]
    width: Option<u32>,

    /// Grid height in cells (2-8)
    #[clap(long, requires = "width")]
    height: Option<u32>,

    #[clap(long, default_value = "classic", value_parser = utils::parse_template)]
    template: Template,

    /// Skip the text overlay; cells carry artwork only
    #[clap(long)]
    no_text: bool,

    /// Skip Spotify artwork enrichment; use only the art Last.fm delivers
    #[clap(long)]
    no_enrich: bool,

    /// Output file; defaults to a timestamped name in the current directory
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ProfileOptions {
    username: String,

    /// Period for the top-artist and top-track tables
    #[clap(long, default_value = "overall", value_parser = utils::parse_period)]
    period: Period,
}

#[derive(Parser, Debug, Clone)]
pub struct RecentOptions {
    username: String,

    #[clap(long, default_value_t = 10)]
    limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompareOptions {
    first: String,
    second: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Last.fm username; defaults to the last one used
    username: Option<String>,

    #[clap(long, default_value = "overall", value_parser = utils::parse_period)]
    period: Period,

    #[clap(long, default_value_t = 25)]
    limit: u32,

    /// Playlist name; defaults to one derived from username and period
    #[clap(long)]
    name: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct HistoryOptions {
    #[clap(long)]
    clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Collage(opt) => {
            cli::collage(cli::CollageRequest {
                username: opt.username,
                kind: opt.kind,
                period: opt.period,
                width: opt.width.unwrap_or(opt.size),
                height: opt.height.unwrap_or(opt.size),
                template: opt.template,
                show_text: !opt.no_text,
                enrich: !opt.no_enrich,
                output: opt.output,
            })
            .await
        }
        Command::Profile(opt) => cli::profile(opt.username, opt.period).await,
        Command::Recent(opt) => cli::recent(opt.username, opt.limit).await,
        Command::Compare(opt) => cli::compare(opt.first, opt.second).await,
        Command::Playlist(opt) => {
            cli::playlist(opt.username, opt.period, opt.limit, opt.name).await
        }
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::History(opt) => cli::history(opt.clear).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

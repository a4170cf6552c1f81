use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlistcli::{
    cli, config, error,
    types::{NewTrack, TrackUpdate},
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
    /// Create an account and log in
    Register(CredentialsOptions),

    /// Log in to an existing account
    Login(CredentialsOptions),

    /// End the current session
    Logout,

    /// Show who is logged in
    Whoami,

    /// List your playlists
    Playlists,

    /// Manage a single playlist
    Playlist(PlaylistOptions),

    /// Manage tracks inside a playlist
    Track(TrackOptions),

    /// Search TheAudioDB by artist and title (falls back to albums)
    Search(SearchOptions),

    /// Show an artist's top tracks from TheAudioDB
    Top(TopOptions),

    /// Open a view by path: /home, /playlists/<id>, /login or /register
    Open(OpenOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct OpenOptions {
    pub path: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CredentialsOptions {
    #[clap(long)]
    pub email: String,
    #[clap(long)]
    pub password: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[command(subcommand)]
    pub command: PlaylistSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// Create a playlist
    Create { name: String },
    /// Rename a playlist
    Rename { id: String, name: String },
    /// Delete a playlist
    Delete { id: String },
    /// Show a playlist and its tracks
    Show { id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    #[command(subcommand)]
    pub command: TrackSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TrackSubcommand {
    /// Add a track to a playlist
    Add {
        playlist: String,
        #[clap(flatten)]
        fields: TrackFields,
    },
    /// Change fields of a track
    Update {
        playlist: String,
        track: String,
        #[clap(flatten)]
        fields: TrackFieldUpdates,
    },
    /// Remove a track from a playlist
    Remove { playlist: String, track: String },
}

#[derive(Parser, Debug, Clone)]
pub struct TrackFields {
    #[clap(long)]
    pub name: String,
    #[clap(long, default_value = "")]
    pub artist: String,
    #[clap(long, default_value = "")]
    pub genre: String,
    #[clap(long)]
    pub year: Option<i32>,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackFieldUpdates {
    #[clap(long)]
    pub name: Option<String>,
    #[clap(long)]
    pub artist: Option<String>,
    #[clap(long)]
    pub genre: Option<String>,
    #[clap(long)]
    pub year: Option<i32>,
}

#[derive(Parser, Debug, Clone)]
pub struct CommitOptions {
    /// Playlist to add the picked result to
    #[clap(long, requires = "pick")]
    pub add_to: Option<String>,

    /// 1-based index of the result to add
    #[clap(long, requires = "add_to")]
    pub pick: Option<usize>,
}

impl CommitOptions {
    fn into_commit(self) -> Option<(String, usize)> {
        self.add_to.zip(self.pick)
    }
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    #[clap(long)]
    pub artist: String,
    #[clap(long)]
    pub title: String,
    #[clap(flatten)]
    pub commit: CommitOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    #[clap(long)]
    pub artist: String,
    #[clap(flatten)]
    pub commit: CommitOptions,
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
        Command::Register(opt) => cli::register(opt.email, opt.password).await,
        Command::Login(opt) => cli::login(opt.email, opt.password).await,
        Command::Logout => cli::logout().await,
        Command::Whoami => cli::whoami().await,
        Command::Playlists => cli::list_playlists().await,
        Command::Open(opt) => cli::open(opt.path).await,

        Command::Playlist(opt) => match opt.command {
            PlaylistSubcommand::Create { name } => cli::create_playlist(name).await,
            PlaylistSubcommand::Rename { id, name } => cli::rename_playlist(id, name).await,
            PlaylistSubcommand::Delete { id } => cli::delete_playlist(id).await,
            PlaylistSubcommand::Show { id } => cli::show_playlist(id).await,
        },

        Command::Track(opt) => match opt.command {
            TrackSubcommand::Add { playlist, fields } => {
                let track = NewTrack {
                    name: fields.name,
                    artist: fields.artist,
                    genre: fields.genre,
                    year: fields.year,
                };
                cli::add_track(playlist, track).await
            }
            TrackSubcommand::Update {
                playlist,
                track,
                fields,
            } => {
                let update = TrackUpdate {
                    name: fields.name,
                    artist: fields.artist,
                    genre: fields.genre,
                    year: fields.year,
                };
                cli::update_track(playlist, track, update).await
            }
            TrackSubcommand::Remove { playlist, track } => {
                cli::remove_track(playlist, track).await
            }
        },

        Command::Search(opt) => {
            cli::search(opt.artist, opt.title, opt.commit.into_commit()).await
        }
        Command::Top(opt) => cli::top(opt.artist, opt.commit.into_commit()).await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use studymeter_anki::DEFAULT_PROFILE;

#[derive(Parser)]
#[command(name = "studymeter")]
#[command(version)]
#[command(about = "Anki progress badges and immersion watch time")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Update the vocabulary and streak badges in a Markdown file
    Badges(BadgesArgs),

    /// Total the duration of the videos listed in a CSV file
    Watchtime(WatchtimeArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct BadgesArgs {
    /// Path to collection.anki2 (auto-discovers if omitted)
    #[arg(short, long)]
    pub collection: Option<PathBuf>,

    /// Anki profile searched during discovery
    #[arg(long, env = "STUDYMETER_PROFILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Deck whose cards (sub-decks included) are counted
    #[arg(short, long, env = "STUDYMETER_DECK", default_value = "Mandarin: Vocabulary")]
    pub deck: String,

    /// Markdown file holding the badges
    #[arg(short, long, env = "STUDYMETER_README", default_value = "README.md")]
    pub readme: PathBuf,

    /// Cut days at UTC midnight instead of local midnight
    #[arg(long)]
    pub utc: bool,

    /// Compute the badges without writing the file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct WatchtimeArgs {
    /// CSV file with a URL column
    #[arg(default_value = "youtube_urls.csv")]
    pub csv: PathBuf,

    /// Where durations come from
    #[arg(long, value_enum, default_value_t = Provider::YtDlp)]
    pub provider: Provider,

    /// yt-dlp executable
    #[arg(long, env = "STUDYMETER_YT_DLP", default_value = "yt-dlp")]
    pub yt_dlp: PathBuf,

    /// HTTP timeout in seconds for the watch-page provider
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// Run yt-dlp for each video
    YtDlp,
    /// Read the duration from the public watch page
    WatchPage,
}

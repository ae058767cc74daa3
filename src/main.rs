use anyhow::{bail, Result};
use clap::Parser;

use netease_lyrics::client::NeteaseClient;
use netease_lyrics::config::{Config, DEFAULT_ACCEPT_THRESHOLD};
use netease_lyrics::models::{LyricRecord, TrackQuery};
use netease_lyrics::pipeline::{fetch_lyrics, Outcome};

#[derive(Parser)]
#[command(name = "netease-lyrics")]
#[command(about = "Look up song lyrics on Netease Cloud Music by title and artist")]
struct Args {
    /// Song title as tagged in the local file
    title: String,

    /// Artist as tagged in the local file (may include a CV annotation)
    #[arg(default_value = "")]
    artist: String,

    /// Keep parenthesized qualifiers like "(Remix)" as matchable words
    /// instead of stripping the whole group
    #[arg(long)]
    keep_parentheticals: bool,

    /// Score a candidate must strictly exceed to be accepted
    #[arg(long, default_value_t = DEFAULT_ACCEPT_THRESHOLD)]
    threshold: f64,

    /// Candidates requested per search pass
    #[arg(long, default_value_t = 15)]
    limit: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 12)]
    timeout: u64,

    /// Log per-candidate scores
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut clog = colog::default_builder();
    clog.filter(
        None,
        if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        },
    );
    clog.init();

    let config = Config {
        strip_parentheticals: !args.keep_parentheticals,
        accept_threshold: args.threshold,
        search_limit: args.limit,
        timeout_secs: args.timeout,
    };
    let client = NeteaseClient::new(&config)?;
    let query = TrackQuery::new(args.title, args.artist);

    let mut records: Vec<LyricRecord> = Vec::new();
    let outcome = fetch_lyrics(&client, &query, &mut records, &config).await;

    for record in &records {
        println!("=== {} ===", record.source);
        if !record.album.is_empty() {
            println!("album: {}", record.album);
        }
        println!("{}", record.lyric_text);
        println!();
    }

    match outcome {
        Outcome::Added(_) => Ok(()),
        Outcome::EmptyQuery => bail!("title is empty after normalization"),
        Outcome::NoMatch => bail!("no confident match in the catalog"),
        Outcome::NoLyric => bail!("matched a song but it has no lyric text"),
        Outcome::Failed => bail!("lookup failed, see log output"),
    }
}

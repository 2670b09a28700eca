use std::process;

use clap::{ArgAction, Parser};
use linkedbst::demo::{self, Config};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Times word lookups in a list against a binary search tree before and after rebalancing
#[derive(Parser, Debug)]
#[command(name = "word-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,

    #[command(flatten)]
    config: Config,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    match demo::run(&cli.config) {
        Ok(report) => print!("{}", report),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// `RUST_LOG` wins over the `-d` flags when set.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("logging initialised");
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(
        long,
        env = "GITHUB_EVENT_PATH",
        help = "Path to the JSON payload of the triggering comment event."
    )]
    pub event: PathBuf,

    #[arg(short, long, help = "Optional YAML configuration file.")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output for debugging.")]
    pub verbose: bool,
}

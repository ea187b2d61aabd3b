use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "helpsplice", version, about = "Replaces the help text block of README.md with captured help output")]
pub struct Cli {
    #[arg(help = "File containing the help text to place inside the README block")]
    pub help_file: PathBuf,
}

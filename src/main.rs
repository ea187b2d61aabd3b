use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use helpsplice::{cli::Cli, update_readme, README_PATH};
use std::process;

fn run(args: Cli) -> Result<()> {
    update_readme(&args.help_file)
        .with_context(|| format!("Failed to update {README_PATH} from {}", args.help_file.display()))
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Cli::parse();
    if let Err(err) = run(args) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

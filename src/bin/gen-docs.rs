use anyhow::{Context, Result};
use clap::CommandFactory;
use env_logger::Env;
use helpsplice::{cli::Cli, update_document, Fence, README_PATH};
use std::{path::Path, process};

fn run() -> Result<()> {
    let help = Cli::command().render_long_help().to_string();
    let help = if help.ends_with('\n') { help } else { format!("{help}\n") };

    update_document(Path::new(README_PATH), &help, &Fence::default())
        .with_context(|| format!("Failed to write CLI docs to {README_PATH}"))
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

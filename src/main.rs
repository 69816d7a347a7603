use anyhow::Result;
use clap::Parser;

mod catalog;
mod config;
mod engine;
mod errors;
mod models;
mod prompt;
mod rates;
mod reports;
mod traits;
mod writer;

use config::{Args, ReportConfig};
use prompt::{FixedAuthor, StdinPrompt};
use traits::{AuthorSource, LineWrite};

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = ReportConfig::try_from(&args)?;
    let writer = writer::StdOutLineWriter::new();

    match args.author {
        Some(author) => run(writer, FixedAuthor(author), config),
        None => run(writer, StdinPrompt, config),
    }
}

fn run(writer: impl LineWrite, author: impl AuthorSource, config: ReportConfig) -> Result<()> {
    let mut engine = engine::Engine::new(writer, author, config);

    engine.run()?;

    Ok(())
}

//! CLI entry point for floorplan generation and annotation

use clap::Parser;
use floorgen::io::cli::{BatchProcessor, Cli};

fn main() -> floorgen::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the default level
    let level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let mut processor = BatchProcessor::new(cli);
    processor.process()
}

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert a .bib file into a single YAML file
#[derive(Parser, Debug)]
#[command(name = "bib2yaml")]
#[command(about = "Convert a .bib file into a single YAML file", long_about = None)]
struct Args {
    /// The .bib file to parse
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// The output YAML file name
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let written = bib2yaml::convert_file(&args.input, &args.output).with_context(|| {
        format!(
            "Failed to convert {} into {}",
            args.input.display(),
            args.output.display()
        )
    })?;

    tracing::info!(entries = written, output = %args.output.display(), "conversion finished");
    Ok(())
}

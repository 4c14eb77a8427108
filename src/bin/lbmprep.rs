use std::path::PathBuf;

use clap::Parser;

/// Prepare LBM simulation setup data from a JSON configuration file.
#[derive(Parser, Debug)]
#[command(name = "lbmprep", version)]
struct Cli {
    /// Path to the simulation configuration file.
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.config.is_file() {
        eprintln!(
            "error: configuration file '{}' not found",
            cli.config.display()
        );
        return Ok(());
    }

    let out_path = lbmprep::prepare_simulation(&cli.config)?;
    eprintln!("wrote {}", out_path.display());
    Ok(())
}

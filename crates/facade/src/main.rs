use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use topc_privacy::{render_distribution, render_svg, Cli, LaplaceTailBound, OutputFormat};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.resolve()?;
    let scores = config.load_scores()?;
    let name = config.display_name();
    info!(dataset = %name, items = scores.len(), "dataset ready");

    let dist = config
        .analysis()
        .run(&scores, &LaplaceTailBound)
        .with_context(|| format!("failed computing SER distribution on {name}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => render_distribution(&dist, &name, &mut out)?,
        OutputFormat::Svg => out.write_all(render_svg(&dist, &name)?.as_bytes())?,
    }
    out.flush()?;
    Ok(())
}

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use appiconset_renderer::{
    AlphaPolicy, FsSink, IconPipeline, IconTable, PipelineConfig, naming,
};

#[derive(Parser, Debug)]
#[command(
    name = "appiconset",
    version,
    about = "Render a vector icon into a complete app icon set"
)]
struct Cli {
    /// Vector icon source (SVG or SVGZ).
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Asset catalog directory to write into.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Vector image composited on top of every icon.
    #[arg(long, value_name = "FILE")]
    overlay: Option<PathBuf>,

    /// Icon set name; images go to <DIR>/<NAME>.appiconset.
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Alpha channel handling [default: strip].
    #[arg(long, value_enum)]
    alpha: Option<AlphaPolicy>,

    /// Value of the manifest `author` field [default: xcode].
    #[arg(long)]
    author: Option<String>,

    /// JSON run configuration. Flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON variant table replacing the built-in one.
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,

    /// Print the filenames and pixel sizes the table produces, then exit.
    #[arg(long)]
    print_table: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appiconset_renderer=info,appiconset=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let table = match &cli.table {
        Some(path) => IconTable::load(path)
            .with_context(|| format!("load icon table '{}'", path.display()))?,
        None => IconTable::standard(),
    };

    if cli.print_table {
        print_table(&table);
        return Ok(());
    }

    let config = build_config(&cli)?;
    info!(
        source = %config.source.display(),
        output = %config.icon_set_dir().display(),
        alpha = ?config.alpha,
        "rendering icon set"
    );

    let report = IconPipeline::new(&table, &config)
        .run(&mut FsSink)
        .context("render icon set")?;

    for failure in &report.failures {
        eprintln!("failed {}: {}", failure.filename, failure.error);
    }
    if !report.is_complete() {
        anyhow::bail!(
            "{} of {} icons could not be written",
            report.failures.len(),
            report.attempted()
        );
    }

    eprintln!(
        "wrote {} icons to {}",
        report.written.len(),
        config.icon_set_dir().display()
    );
    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut config = match (&cli.config, &cli.source, &cli.output) {
        (Some(path), _, _) => PipelineConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        (None, Some(source), Some(output)) => PipelineConfig::new(source, output),
        (None, None, _) => anyhow::bail!("missing SOURCE (or --config)"),
        (None, _, None) => anyhow::bail!("missing --output (or --config)"),
    };

    if let Some(source) = &cli.source {
        config.source = source.clone();
    }
    if let Some(output) = &cli.output {
        config.output_root = output.clone();
    }
    if let Some(overlay) = &cli.overlay {
        config.overlay = Some(overlay.clone());
    }
    if let Some(name) = &cli.name {
        config.asset_name = name.clone();
    }
    if let Some(alpha) = cli.alpha {
        config.alpha = alpha;
    }
    if let Some(author) = &cli.author {
        config.author = author.clone();
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn print_table(table: &IconTable) {
    for (variant, scale) in table.units() {
        let px = variant.pixel_size(scale);
        println!("{:<56} {px}x{px}", naming::filename(variant, scale));
    }
    println!("{} images", table.unit_count());
}

//! Command line entry point for stampscope.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use log::info;
use stampscope::{
    config::Config,
    derive_features,
    loader::{self, LoadOptions},
    logger,
    report::{self, OutputFormat},
    ui::TerminalChart,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    Table,
    Csv,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(v: OutputFormatArg) -> Self {
        match v {
            OutputFormatArg::Table => OutputFormat::Table,
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Derive calendar features (day, month, year, hour, weekday, quarter) from timestamps
#[derive(Debug, Parser)]
#[command(name = "stampscope", version, about)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["example_synthetic", "file", "generate_config"])
))]
struct Cli {
    /// Generate synthetic timestamps and print their calendar features
    #[arg(long = "example_synthetic", visible_alias = "example-synthetic")]
    example_synthetic: bool,

    /// Load timestamps from a one-column CSV file, print their features and chart one of them
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Write a default configuration file (default: XDG config dir) and exit
    #[arg(long, value_name = "PATH")]
    generate_config: Option<Option<PathBuf>>,

    /// Feature column to chart in file mode (default: weekday)
    #[arg(long, requires = "file")]
    category: Option<String>,

    /// Chart kind: line, bar, barh, kde, density, area, hist, box, pie, scatter, hexbin
    #[arg(long, requires = "file")]
    kind: Option<String>,

    /// Print the feature table without charting it
    #[arg(long, requires = "file")]
    no_plot: bool,

    /// Output format of the feature table
    #[arg(long, value_enum)]
    format: Option<OutputFormatArg>,

    /// Configuration file (default: ./stampscope.toml, then the XDG config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug messages to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn run_synthetic(config: &Config, format: OutputFormat) -> Result<()> {
    let synthetic = &config.synthetic;
    let raw = loader::load_synthetic(&synthetic.start, synthetic.periods, &synthetic.step)
        .context("Synthetic example failed")?;
    let features = derive_features(&raw)?;
    report::print_table(&features, format)?;
    Ok(())
}

fn run_file(path: &Path, cli: &Cli, config: &Config, format: OutputFormat) -> Result<()> {
    let options = LoadOptions::from(&config.input);
    let raw = loader::load_from_file(path, &options)
        .with_context(|| format!("Failed to load timestamps from {}", path.display()))?;
    let features = derive_features(&raw).with_context(|| format!("Failed to process {}", path.display()))?;
    report::print_table(&features, format)?;

    if cli.no_plot {
        return Ok(());
    }

    let category = cli.category.as_deref().unwrap_or(&config.display.plot_category);
    let kind = cli
        .kind
        .clone()
        .unwrap_or_else(|| config.display.plot_kind.to_string());
    report::plot(&features, category, &kind, &mut TerminalChart)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(target) = &cli.generate_config {
        let path = match target {
            Some(path) => path.clone(),
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    logger::init(&config.logging, cli.verbose)?;

    let format = cli.format.map(OutputFormat::from).unwrap_or(config.display.format);

    if cli.example_synthetic {
        info!("Running synthetic example");
        run_synthetic(&config, format)
    } else if let Some(path) = &cli.file {
        info!("Running file pipeline on {}", path.display());
        run_file(path, &cli, &config, format)
    } else {
        Ok(())
    }
}

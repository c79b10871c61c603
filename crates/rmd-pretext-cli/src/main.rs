use anyhow::{Context, Result, bail};
use clap::Parser;
use rmd_pretext_config::Config;
use rmd_pretext_engine::{
    ConvertOptions, Diagnostics, attach_outputs, convert_file, load_outputs, write_document,
};
use std::path::{Path, PathBuf};
use std::process;

/// Convert R Markdown book chapters into PreTeXt XML
#[derive(Parser, Debug)]
#[command(name = "rmd-pretext")]
#[command(about = "Convert R Markdown book chapters into PreTeXt XML", long_about = None)]
struct Cli {
    /// Configuration file (default: ./rmd-pretext.toml, then ~/.config/rmd-pretext/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// (code, output) pairs to attach after programs
    #[arg(long, value_name = "FILE")]
    outputs: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Source .Rmd file; omit both paths to run the configured jobs
    input: Option<PathBuf>,

    /// Destination .ptx file
    output: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Single { input: PathBuf, output: PathBuf },
    Batch,
}

impl Cli {
    fn mode(&self) -> Result<Mode> {
        match (&self.input, &self.output) {
            (Some(input), Some(output)) => Ok(Mode::Single {
                input: input.clone(),
                output: output.clone(),
            }),
            (None, None) => Ok(Mode::Batch),
            _ => bail!("Give both INPUT and OUTPUT, or neither to run the configured jobs"),
        }
    }

    fn load_config(&self) -> Result<Option<Config>> {
        let config = match &self.config {
            Some(path) => Config::load_from_path(path)?
                .with_context(|| format!("Config file not found: {}", path.display()))
                .map(Some)?,
            None => Config::load()?,
        };
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mode = cli.mode()?;
    let config = cli.load_config()?;

    match mode {
        Mode::Single { input, output } => {
            let options = config.map(|c| c.options).unwrap_or_default();
            let diagnostics = convert_one(&input, &output, cli.outputs.as_deref(), &options)?;
            report(&input, &diagnostics);
        }
        Mode::Batch => {
            let Some(config) = config else {
                bail!(
                    "No configuration found; pass INPUT and OUTPUT or create {}",
                    Config::LOCAL_FILE
                );
            };
            if config.jobs.is_empty() {
                log::warn!("Configuration has no jobs");
            }
            for job in &config.jobs {
                let options = job.convert_options(&config.options);
                let outputs = job.outputs.as_deref().or(cli.outputs.as_deref());
                let diagnostics = convert_one(&job.input, &job.output, outputs, &options)?;
                report(&job.input, &diagnostics);
            }
            log::info!("Converted {} chapter(s)", config.jobs.len());
        }
    }
    Ok(())
}

/// Converts one file, attaches captured outputs when given, and writes the
/// result.
fn convert_one(
    input: &Path,
    output: &Path,
    outputs: Option<&Path>,
    options: &ConvertOptions,
) -> Result<Diagnostics> {
    let mut conversion = convert_file(input, options)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    if let Some(path) = outputs {
        let pairs = load_outputs(path)
            .with_context(|| format!("Failed to load outputs for {}", input.display()))?;
        let enrich = attach_outputs(&mut conversion.document, &pairs);
        log::info!(
            "{}: attached {} output(s), {} already present",
            input.display(),
            enrich.attached,
            enrich.skipped_existing
        );
    }

    write_document(output, &conversion.to_pretext())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Wrote {}", output.display());
    Ok(conversion.diagnostics)
}

fn report(input: &Path, diagnostics: &Diagnostics) {
    if diagnostics.is_clean() {
        println!("{}: ok", input.display());
    } else {
        println!("{}: {diagnostics}", input.display());
    }
}

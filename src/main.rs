use asset_squeeze::{config, output, process};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that plan or write images.
#[derive(clap::Args, Clone)]
struct SizeArgs {
    /// Maximum output width in pixels (overrides the config file)
    #[arg(long)]
    max_width: Option<u32>,
}

#[derive(Parser)]
#[command(name = "asset-squeeze")]
#[command(about = "Convert image assets into resized, optimized JPEG files")]
#[command(long_about = "\
Convert image assets into resized, optimized JPEG files

Each input is decoded, flattened onto white if it has transparency,
downscaled if wider than the maximum width, and written as JPEG next to
the source with a .jpg extension:

  assets/personas/celia.png  →  assets/personas/celia.jpg

Missing or unreadable inputs are reported and skipped; the rest of the
batch still runs.

Defaults: max width 1920px, quality 85.
Run 'asset-squeeze gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file with max_width / quality (optional)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase diagnostic output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress images to JPEG and report the savings
    Compress {
        #[command(flatten)]
        size: SizeArgs,

        /// JPEG quality 1-100 (overrides the config file)
        #[arg(long)]
        quality: Option<u32>,

        /// Output path (only with a single input; default: input with .jpg)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Write the batch report as JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Images to compress, in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Show what compress would produce, without writing anything
    Check {
        #[command(flatten)]
        size: SizeArgs,

        /// Images to inspect
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compress {
            size,
            quality,
            output: output_path,
            report,
            inputs,
        } => {
            ensure_single_input_for_output(output_path.as_deref(), &inputs)?;
            let settings = config::load_config(cli.config.as_deref())?
                .with_overrides(size.max_width, quality)?;
            tracing::debug!(?settings, "resolved config");

            output::print_banner();
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::process(
                &inputs,
                output_path.as_deref(),
                &settings.options(),
                Some(tx),
            );
            printer.join().map_err(|_| "progress printer panicked")?;
            output::print_summary(&result);

            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&report_path, json)?;
                println!("Report: {}", report_path.display());
            }
        }
        Command::Check { size, inputs } => {
            let settings =
                config::load_config(cli.config.as_deref())?.with_overrides(size.max_width, None)?;
            let results = process::check(&inputs, &settings.options());
            output::print_check_output(&results);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `--output` names one file, so it only makes sense for a single input.
fn ensure_single_input_for_output(
    output: Option<&Path>,
    inputs: &[PathBuf],
) -> Result<(), &'static str> {
    if output.is_some() && inputs.len() != 1 {
        return Err("--output can only be used with a single input");
    }
    Ok(())
}

/// Route `tracing` events to stderr.
///
/// `RUST_LOG` wins when set; otherwise `-v` flags pick the level, defaulting
/// to warnings only so the console report stays readable.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("asset_squeeze={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

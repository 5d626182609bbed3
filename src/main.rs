use clap::{Parser, Subcommand};
use phogg::imaging::{OutputFormat, Quality};
use phogg::{config, generate, output, process};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "phogg")]
#[command(about = "A photo gallery site generator")]
#[command(long_about = "\
A photo gallery site generator

Reads a flat directory of JPEG photos and writes a static gallery: every
photo resized to 1920, 1280, 640 and 320 pixels wide, plus an index.html.

Source layout:

  photos/
  ├── dawn.jpg          # Any file with JPEG content is a photo
  ├── dawn.txt          # Optional sidecar: line 1 title, line 2 description
  └── mountains.jpg

Output layout:

  site/
  ├── index.html
  ├── style.css
  └── img/
      ├── 1920/dawn.jpeg
      ├── 1280/dawn.jpeg
      ├── 640/dawn.jpeg
      └── 320/dawn.jpeg

Run 'phogg gen-config' to print a documented site.toml.")]
#[command(version = version_string())]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    /// Source directory with your photos
    #[arg(long, short, value_name = "DIRECTORY", required = true)]
    source: Option<PathBuf>,

    /// Destination directory for the generated site (will be created)
    #[arg(long, short, value_name = "DIRECTORY", required = true)]
    destination: Option<PathBuf>,

    /// Remove the destination directory first if it exists
    #[arg(long, short)]
    force: bool,

    /// Site configuration file [default: site.toml]
    #[arg(long, short, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output image format
    #[arg(long, short, value_enum, ignore_case = true, default_value_t = OutputFormat::Jpeg)]
    output_format: OutputFormat,

    /// Output image compression quality (0-100)
    #[arg(
        long,
        short = 'q',
        default_value_t = 80,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    output_quality: u8,

    /// Show debug logging (overridden by RUST_LOG)
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(Command::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return ExitCode::SUCCESS;
    }

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => {
            println!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            println!("Aborted");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(source), Some(destination)) = (cli.source, cli.destination) else {
        return Err("--source and --destination are required".into());
    };

    let explicit_config = cli.config.is_some();
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
    let site_config = config::load_config(&config_path, explicit_config)?;
    init_thread_pool(&site_config.processing);

    output::print_destination(&destination, cli.force);
    process::prepare_destination(&destination, cli.force)?;

    let process_config = process::ProcessConfig {
        format: cli.output_format,
        quality: Quality::new(cli.output_quality.into()),
    };
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = process::process(&source, &destination, &process_config, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    let result = result?;
    output::print_statistics(&result.stats);

    let summary = generate::generate(&result.photos, &site_config, &destination)?;
    output::print_generate_output(&summary);

    Ok(())
}

/// Diagnostics go to stderr; stdout carries the progress output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "phogg=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

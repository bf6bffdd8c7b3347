use std::path::PathBuf;

use clap::Parser;
use gcview::{LogFormat, RenderOutcome, RunOptions};

#[derive(Parser)]
#[command(name = "gcview", about = "Java GC log viewer — heap and pause charts")]
struct Cli {
    /// Path to the GC log file.
    log_file: PathBuf,

    /// GC log format.
    #[arg(long, value_enum, default_value_t = LogFormat::Unified)]
    format: LogFormat,

    /// Output HTML file name [default: gc_analysis.html].
    #[arg(long)]
    output: Option<PathBuf>,

    /// Additional configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to stderr (filter with RUST_LOG).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("gcview debug logging enabled");
    }

    let options = RunOptions {
        output: cli.output,
        config: cli.config,
        ..RunOptions::new(cli.log_file, cli.format)
    };

    match gcview::run(&options)? {
        RenderOutcome::Written(path) => println!("Saving plot to {}", path.display()),
        RenderOutcome::NoData => println!(
            "No GC data found in the log file with format '{}'.",
            options.format
        ),
    }
    Ok(())
}

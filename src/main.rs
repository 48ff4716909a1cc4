use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use interfacer::{Config, Interfacer, diagnostics};

#[derive(Parser)]
#[command(name = "interfacer", version, about = "List the methods a Go interface requires")]
struct Cli {
    /// Interface reference, e.g. io.ReadWriter
    reference: String,

    /// Config file (defaults to ./interfacer.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the method list as JSON
    #[arg(long)]
    json: bool,

    /// Log resolution steps and show skipped files
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "interfacer=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            diagnostics::render_error("", "", &err);
            std::process::exit(1);
        }
    };

    let (result, skipped) = Interfacer::from_config(&config).functions_with_diagnostics(&cli.reference);
    if cli.verbose {
        for file in &skipped {
            file.render();
        }
    }

    let funcs = match result {
        Ok(funcs) => funcs,
        Err(err) => {
            diagnostics::render_error("", "", &err);
            std::process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&funcs) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    } else {
        for func in &funcs {
            println!("{func}");
        }
    }
}

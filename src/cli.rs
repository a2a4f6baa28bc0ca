use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use crate::error::Result;
use crate::input::InputSource;
use crate::services::{DiagnosisReport, DiagnosisService};

#[derive(Parser)]
#[command(name = "heartbeat")]
#[command(version)]
#[command(about = "ECG heartbeat classification (CNN) with a web UI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory
    #[arg(short, long, default_value = "config", env = "HEARTBEAT_CONFIG_DIR")]
    pub config: PathBuf,

    /// Model artifact, overrides `model.path`
    #[arg(short, long, global = true)]
    pub model: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the web UI and JSON API (default)
    Serve {
        /// Bind address, overrides `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Listen port, overrides `server.port`
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Classify one heartbeat and exit
    Classify {
        #[command(flatten)]
        input: ClassifyInput,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load the model and print its shape
    Inspect,
}

/// Exactly one input source for `classify`
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ClassifyInput {
    /// CSV file with 187 values, no header
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// 187 comma/tab/newline separated values
    #[arg(long)]
    pub text: Option<String>,
    /// Read pasted values from standard input
    #[arg(long)]
    pub stdin: bool,
}

/// Run `classify`. Returns whether a diagnosis was produced.
pub fn classify(service: &DiagnosisService, input: &ClassifyInput, json: bool) -> Result<bool> {
    let (source, result) = if let Some(path) = &input.csv {
        let bytes = std::fs::read(path)?;
        (InputSource::Csv, service.diagnose_csv(&bytes))
    } else if let Some(text) = &input.text {
        (InputSource::Text, service.diagnose_text(text))
    } else {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        (InputSource::Text, service.diagnose_text(&text))
    };

    let report = service.report(source, &result);
    print_report(&report, json)?;
    Ok(report.is_diagnosed())
}

fn print_report(report: &DiagnosisReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    match report {
        DiagnosisReport::Diagnosed { .. } => {
            for line in report.lines() {
                println!("\x1b[32m{line}\x1b[0m");
            }
        }
        DiagnosisReport::Rejected { message } => {
            eprintln!("\x1b[31m✗ {message}\x1b[0m");
        }
    }
    Ok(())
}

/// Run `inspect`.
pub fn inspect(service: &DiagnosisService, model_path: &std::path::Path) {
    let classifier = service.classifier();
    println!("model:        {}", model_path.display());
    println!("backend:      {}", classifier.backend());
    println!("input shape:  {:?}", classifier.input_shape());
    println!("output dim:   {}", classifier.output_dim());
    println!("output kind:  {:?}", classifier.output_kind());
}

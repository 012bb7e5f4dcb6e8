//! `diabetes-gbdt` command-line entry point.
//!
//! - `serve`: load the artifacts once and answer HTTP requests
//! - `score`: score JSON-lines records from a file or stdin

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use diabetes_gbdt::{Prediction, RawInput, RiskModel, run_with_threads, server};

// ========================================================================================
//                         COMMAND-LINE INTERFACE DEFINITION
// ========================================================================================

#[derive(Parser, Debug)]
#[command(
    name = "diabetes-gbdt",
    version,
    about = "Diabetes risk scoring with a pretrained XGBoost ensemble."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the prediction form and the `/predict` endpoint.
    Serve(ServeArgs),
    /// Score JSON-lines records and print one JSON result per line.
    Score(ScoreArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Directory holding the model, scaler, encoder and means files.
    #[arg(long, env = "ARTIFACTS_DIR", default_value = ".")]
    artifacts: PathBuf,

    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Directory holding the model, scaler, encoder and means files.
    #[arg(long, env = "ARTIFACTS_DIR", default_value = ".")]
    artifacts: PathBuf,

    /// JSON-lines input; reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Worker threads: 0 = all cores, 1 = sequential.
    #[arg(long, default_value_t = 0)]
    threads: usize,
}

/// One line of `score` output.
#[derive(Serialize)]
#[serde(untagged)]
enum ScoreLine {
    Scored {
        line: usize,
        result: &'static str,
        #[serde(flatten)]
        prediction: Prediction,
    },
    Failed {
        line: usize,
        error: String,
    },
}

// ========================================================================================
//                                  MAIN
// ========================================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Serve(args) => serve(args),
        Command::Score(args) => score(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_model(dir: &Path) -> anyhow::Result<RiskModel> {
    RiskModel::load_dir(dir)
        .with_context(|| format!("failed to load artifacts from {}", dir.display()))
}

fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let model = Arc::new(load_model(&args.artifacts)?);
    let addr = SocketAddr::new(args.host, args.port);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime
        .block_on(server::serve(addr, model))
        .with_context(|| format!("server on {addr} failed"))
}

fn score(args: ScoreArgs) -> anyhow::Result<()> {
    let model = load_model(&args.artifacts)?;

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    // (line number, parsed record or parse error)
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str::<Value>(&line)
            .map_err(|e| e.to_string())
            .and_then(|value| RawInput::from_json(&value).map_err(|e| e.to_string()));
        records.push((idx + 1, record));
    }

    let inputs: Vec<RawInput> = records
        .iter()
        .filter_map(|(_, record)| record.as_ref().ok().cloned())
        .collect();
    let mut scored = run_with_threads(args.threads, |parallelism| {
        model.predict_batch(&inputs, parallelism)
    })
    .context("failed to build thread pool")?
    .into_iter();

    let mut out = BufWriter::new(io::stdout().lock());
    let (mut n_scored, mut n_failed) = (0usize, 0usize);
    for (line, record) in records {
        let outcome = match record {
            Ok(_) => scored
                .next()
                .context("fewer predictions than records")?
                .map_err(|e| e.to_string()),
            Err(e) => Err(e),
        };
        let row = match outcome {
            Ok(prediction) => {
                n_scored += 1;
                ScoreLine::Scored {
                    line,
                    result: prediction.class.label(),
                    prediction,
                }
            }
            Err(error) => {
                n_failed += 1;
                warn!(line, %error, "record not scored");
                ScoreLine::Failed { line, error }
            }
        };
        serde_json::to_writer(&mut out, &row)?;
        writeln!(out)?;
    }
    out.flush()?;

    info!(n_scored, n_failed, "scoring complete");
    Ok(())
}

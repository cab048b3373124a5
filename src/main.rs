//! `loghttp`: send one request and print its transcript.
//!
//! ```text
//! loghttp -X POST -H 'Content-Type: application/json' -d '{"a":1}' http://localhost:8080/items
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Method, Request};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loghttp::config::{load_config, LogConfig};
use loghttp::{Body, Client};

#[derive(Parser)]
#[command(name = "loghttp")]
#[command(about = "Send an HTTP request and print the request/response transcript", long_about = None)]
struct Cli {
    /// Request method.
    #[arg(short = 'X', long, default_value = "GET")]
    method: String,

    /// Extra header, `Name: value`. May be repeated.
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Request body.
    #[arg(short, long)]
    data: Option<String>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target URL.
    url: String,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr so they never mix with the transcript.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loghttp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "request failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LogConfig::from_env(),
    };

    tracing::debug!(
        enabled = config.enabled,
        output = ?config.output,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let method = Method::from_bytes(cli.method.to_ascii_uppercase().as_bytes())?;
    let body = cli.data.map(Body::from).unwrap_or_default();

    let mut request = Request::builder().method(method).uri(cli.url.as_str());
    for header in &cli.headers {
        let (name, value) = parse_header(header)?;
        request = request.header(name, value);
    }
    let request = request.body(body)?;

    let client = Client::with_config(&config)?;
    let response = client.execute(request)?;

    // Drain the replayed body the way a real consumer would.
    let (parts, body) = response.into_parts();
    let len = body.into_bytes()?.len();
    tracing::info!(status = %parts.status, bytes = len, "Request complete");

    Ok(())
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), Box<dyn std::error::Error>> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("header must be `Name: value`, got {:?}", raw))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes())?;
    let value = HeaderValue::from_str(value.trim())?;
    Ok((name, value))
}

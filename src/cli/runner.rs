use std::fs;
use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use kinofetch::{KinopoiskClient, SessionParams, SessionReport, Settings};

use super::args::CliArgs;
use super::errors::AppError;

/// Defaults, then the config file, then flags and environment.
fn resolve_settings(args: &CliArgs) -> Result<Settings, AppError> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_json_file(path).map_err(|source| AppError::ConfigFile {
            path: path.clone(),
            source,
        })?,
        None => Settings::default(),
    };

    let client = &mut settings.client;
    if let Some(key) = &args.api_key {
        client.api_key = key.clone();
    }
    if let Some(url) = &args.base_url {
        client.base_url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        client.timeout_secs = timeout;
    }

    let session = &mut settings.session;
    if let Some(limit) = args.limit {
        session.search_limit = limit;
    }
    if let Some(dir) = &args.output_dir {
        session.output_dir = dir.clone();
    }

    if settings.client.api_key.trim().is_empty() {
        return Err(AppError::MissingApiKey);
    }
    settings.validate()?;
    Ok(settings)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_with<R: BufRead, W: Write>(
    args: &CliArgs,
    client: &KinopoiskClient,
    params: &SessionParams,
    input: &mut R,
    out: &mut W,
) -> Result<SessionReport, AppError> {
    let report = if args.queries.is_empty() {
        writeln!(out, "Kinopoisk lookup").map_err(kinofetch::Error::from)?;
        writeln!(out, "{}", "=".repeat(50)).map_err(kinofetch::Error::from)?;
        kinofetch::run_session(client, input, out, params)?
    } else {
        info!("Batch mode: {} queries", args.queries.len());
        kinofetch::run_queries(client, &args.queries, input, out, params)?
    };
    Ok(report)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    let Settings { client, session } = resolve_settings(&args)?;
    fs::create_dir_all(&session.output_dir).map_err(|source| AppError::OutputDir {
        path: session.output_dir.clone(),
        source,
    })?;

    info!("Using catalog at {}", client.base_url);
    info!("Output directory: {:?}", session.output_dir);

    let catalog = KinopoiskClient::new(&client);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    let report = run_with(&args, &catalog, &session, &mut input, &mut out)?;

    info!("Processed: {}", report.processed);
    info!("Cancelled: {}", report.cancelled);
    info!("Failed: {}", report.failed);
    Ok(())
}

//! couchspec CLI - Generate an OpenAPI document for a CouchDB server

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use couchspec::writer::{self, OutputFormat};
use couchspec::{Credentials, ProbeClient, SpecError};
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "couchspec")]
#[command(version, about = "Generate OpenAPI spec for CouchDB", long_about = None)]
struct Cli {
    /// CouchDB server URL
    #[arg(long, env = "COUCHDB_URL", default_value = "http://localhost:5984")]
    url: String,

    /// CouchDB username (ignored unless --password is also given)
    #[arg(short, long, env = "COUCHDB_USER")]
    username: Option<String>,

    /// CouchDB password (ignored unless --username is also given)
    #[arg(short, long, env = "COUCHDB_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Output filename
    #[arg(short, long, value_name = "PATH", default_value = "couchdb-openapi.json")]
    output: PathBuf,

    /// Output format: json or yaml
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// OpenAPI version tag written into the document
    #[arg(long, value_name = "TAG", default_value = couchspec::DEFAULT_OPENAPI_VERSION)]
    openapi_version: String,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output logs as JSON
    #[arg(long)]
    log_json: bool,
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    // RUST_LOG wins over -v
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,couchspec=info".to_string(),
            2 => "info,couchspec=debug".to_string(),
            _ => "debug,couchspec=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn fail(message: String) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

fn report(err: SpecError) -> ! {
    match err {
        SpecError::Connectivity(e) => fail(format!("Error connecting to CouchDB: {e}")),
        SpecError::Catalog(e) => fail(format!("Invalid API catalog: {e}")),
        SpecError::Persistence(e) => fail(format!("Error saving file: {e}")),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);
    debug!(url = %cli.url, format = %cli.format, output = %cli.output.display(), "Parsed arguments");

    let timeout = (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout));
    let client = match ProbeClient::builder(&cli.url)
        .credentials(Credentials::from_parts(cli.username, cli.password))
        .timeout(timeout)
        .build()
    {
        Ok(client) => client,
        Err(e) => report(e.into()),
    };

    if !cli.dry_run {
        println!("Generating OpenAPI specification for CouchDB...");
    }

    let document = match couchspec::generate(&client, &cli.openapi_version).await {
        Ok(document) => document,
        Err(e) => report(e),
    };

    if cli.dry_run {
        let format = if cli.format == OutputFormat::Yaml && !writer::yaml_encoder_available() {
            eprintln!("YAML encoder not available. Falling back to JSON format.");
            OutputFormat::Json
        } else {
            cli.format
        };
        match writer::encode(&document, format) {
            Ok(text) => print!("{text}"),
            Err(e) => report(e.into()),
        }
        return;
    }

    match writer::save(&document, &cli.output, cli.format) {
        Ok(saved) => {
            if saved.fell_back {
                println!("YAML encoder not available. Falling back to JSON format.");
            }
            println!("OpenAPI spec saved to: {}", saved.path.display());
        }
        Err(e) => report(e.into()),
    }
}

use anyhow::Result;
use clap::Parser;
use jcs_fixtures_acquire::{HttpFetcher, Settings};
use std::path::PathBuf;

/// Scrape the JSON-LD toRdf manifest into JCS input/output fixtures.
///
/// With no arguments, fetches the W3C manifest and writes
/// `t<name>.json` files into ../test/fixtures/{input,output}/.
#[derive(Parser)]
#[command(name = "jcs-fixtures")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), " ", env!("BUILD_DATE"), ")"))]
struct Cli {
    /// Base URL the manifest and its resource links resolve against
    #[arg(long, default_value = jcs_fixtures_acquire::BASE_URL)]
    base_url: String,

    /// Manifest page, relative to the base URL
    #[arg(long, default_value = jcs_fixtures_acquire::MANIFEST)]
    manifest: String,

    /// Directory for input fixtures (must exist)
    #[arg(long, default_value = jcs_fixtures_acquire::INPUT_DIR)]
    input_dir: PathBuf,

    /// Directory for expected-output fixtures (must exist)
    #[arg(long, default_value = jcs_fixtures_acquire::OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            base_url: self.base_url.clone(),
            manifest: self.manifest.clone(),
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

fn init_logging(cli: &Cli) {
    // html5ever and selectors are chatty at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z".to_string();

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format))
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let settings = cli.settings();
    tracing::info!(
        base = %settings.base_url,
        input_dir = %settings.input_dir.display(),
        output_dir = %settings.output_dir.display(),
        tests = ?jcs_fixtures_model::JCS_TESTS,
        "Scraping JCS fixtures"
    );

    let fetcher = HttpFetcher::new()?;
    jcs_fixtures_acquire::acquire(&fetcher, &settings).await?;

    Ok(())
}

use clap::Parser;
use page_contrast::Contrast;
use page_contrast::config::{AnalyzerConfig, FetcherConfig};
use page_contrast::report::ReportWriter;
use std::process::ExitCode;

mod args;
use args::{Args, convert_fetcher, convert_mode};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match build_config(args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.pages.len() < 2 {
        ::log::error!("At least two pages are needed for a comparison");
        return ExitCode::FAILURE;
    }

    ::log::info!("Comparing {} pages", config.pages.len());

    let writer = ReportWriter::new(&config.output);
    let start_time = std::time::Instant::now();

    let report = match Contrast::new(Vec::new()).with_config(config).run().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Analysis failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Analysis complete - {} comparisons in {:.2} seconds",
        report.comparisons.len(),
        start_time.elapsed().as_secs_f64()
    );

    match writer.write(&report) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("Failed to write report: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Merges the config file, command-line overrides and environment
fn build_config(args: Args) -> page_contrast::Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    };

    if !args.pages.is_empty() {
        config.pages = args.pages;
    }
    if let Some(mode) = args.mode {
        config.analysis.mode = convert_mode(mode);
    }
    if let Some(fetcher) = args.fetcher {
        config.fetcher = convert_fetcher(fetcher);
    }
    if let Some(dir) = args.output_dir {
        config.output.directory = Some(dir);
    }
    if args.quiet {
        config.output.stdout = false;
    }

    // The API key is only ever taken from the environment here
    if config.analysis.narrative.api_key.is_none() {
        config.analysis.narrative.api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
    }

    // Override the WebDriver URL with an environment variable if provided
    if let FetcherConfig::WebDriver(cfg) = &mut config.fetcher {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                cfg.webdriver_url = webdriver_url;
            }
        }
    }

    config.validate()?;
    Ok(config)
}

use clap::Parser;
use directory_contact_crawler::{
    config::Config, fetch::HttpFetcher, listatelefonica::ListaTelefonicaCrawler,
    navigator::Navigator, CsvWriter,
};
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let config = Config::parse();
    info!("Crawl {} into {}", config.start_url, config.output.display());

    let mut navigator = Navigator::new(
        ListaTelefonicaCrawler,
        HttpFetcher::new()?,
        CsvWriter::new(&config.output),
        &config,
    )?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let result = navigator.run(shutdown).await;
    match result {
        Ok(summary) => {
            info!(
                "Done: {} pages visited, {} fetch errors, {} records written",
                summary.pages_visited, summary.fetch_errors, summary.records_written
            );
            Ok(())
        }
        Err(e) => {
            error!(
                "Crawl stopped: {}, {} records not persisted",
                e,
                navigator.buffer().len()
            );
            Err(e.into())
        }
    }
}

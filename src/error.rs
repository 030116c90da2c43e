#[derive(Debug, thiserror::Error)]
pub enum CrawlerError {
    #[error("Request error")]
    RequestError(#[from] reqwest::Error),
    #[error("Unexpected status {status} for {url}")]
    StatusError {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Invalid url")]
    UrlError(#[from] url::ParseError),
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("CSV error")]
    CsvError(#[from] csv::Error),
    #[error("Failed to persist {pending} buffered records")]
    PersistError {
        pending: usize,
        #[source]
        source: Box<CrawlerError>,
    },
}

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_START_URL: &str = "https://listatelefonica.tk/cidade/jundiai/sp?page=1";

#[derive(Debug, Clone, Parser)]
#[command(about = "Crawl a paginated phone directory into a CSV file")]
pub struct Config {
    /// First listing page to visit.
    #[arg(long, default_value = DEFAULT_START_URL)]
    pub start_url: String,

    /// CSV file records are appended to.
    #[arg(long, default_value = "contacts.csv")]
    pub output: PathBuf,

    /// Flush buffered records on every listing page that is a multiple of this.
    #[arg(long, default_value_t = 5)]
    pub flush_interval: u64,

    /// Last expected listing page. Pagination is not followed past it.
    #[arg(long, default_value_t = 457)]
    pub last_page: u64,

    /// Only URLs on this host are visited.
    #[arg(long, default_value = "listatelefonica.tk")]
    pub allowed_domain: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_url: DEFAULT_START_URL.to_string(),
            output: PathBuf::from("contacts.csv"),
            flush_interval: 5,
            last_page: 457,
            allowed_domain: "listatelefonica.tk".to_string(),
        }
    }
}

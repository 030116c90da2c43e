use scraper::Html;
use url::Url;

pub mod config;
pub mod fetch;
pub mod listatelefonica;
pub mod navigator;

mod buffer;
mod contact;
mod error;
mod extract;
mod text;
mod writer;

pub use buffer::{RecordBuffer, RecordSink};
pub use contact::{ContactRecord, HEADER};
pub use error::CrawlerError;
pub use extract::{extract_fields, ExtractedFields};
pub use writer::CsvWriter;

/// A hyperlink found on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// The "next page" link. Following it advances the crawl.
    Pagination(String),
    Other(String),
}

impl Link {
    pub fn href(&self) -> &str {
        match self {
            Link::Pagination(href) | Link::Other(href) => href,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Listing {
    /// Value of the `page` query parameter of the listing URL.
    pub page: Option<u64>,
    pub links: Vec<Link>,
}

impl Listing {
    pub fn has_next(&self) -> bool {
        self.links.iter().any(|l| matches!(l, Link::Pagination(_)))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Page {
    Listing(Listing),
    Detail(Vec<ContactRecord>),
    /// Looked like a listing but had too little content to trust.
    Discarded,
    Unrecognized,
}

pub trait Crawler {
    fn classify(&self, url: &Url, doc: &Html) -> Page;
}

/// The "visit URL" side of the crawl.
#[async_trait::async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &Url) -> Result<String, CrawlerError>;
}

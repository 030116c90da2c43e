use crate::{
    config::Config, Crawler, CrawlerError, Fetcher, Link, Page, RecordBuffer, RecordSink,
};
use scraper::Html;
use std::{
    collections::{HashSet, VecDeque},
    future::Future,
};
use tracing::{debug, error, info, warn};
use url::Url;

/// Highest listing page number seen so far in this run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor(u64);

impl PageCursor {
    pub fn advance(&mut self, page: u64) {
        self.0 = self.0.max(page);
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Periodic flush schedule: every `interval`-th page, and every page from
/// `last_page` on.
pub fn is_flush_page(page: u64, interval: u64, last_page: u64) -> bool {
    (interval != 0 && page % interval == 0) || page >= last_page
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_visited: u64,
    pub fetch_errors: u64,
    pub records_written: u64,
}

/// Work item of the crawl queue.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Task {
    Visit(Url),
    /// Flush decided by a listing page, run once that page's links are done.
    Flush,
}

pub struct Navigator<C, F, S> {
    crawler: C,
    fetcher: F,
    sink: S,
    start_url: Url,
    flush_interval: u64,
    last_page: u64,
    allowed_domain: String,
    queue: VecDeque<Task>,
    visited: HashSet<Url>,
    buffer: RecordBuffer,
    cursor: PageCursor,
    summary: CrawlSummary,
}

impl<C, F, S> Navigator<C, F, S>
where
    C: Crawler,
    F: Fetcher,
    S: RecordSink,
{
    pub fn new(crawler: C, fetcher: F, sink: S, config: &Config) -> Result<Self, CrawlerError> {
        Ok(Navigator {
            crawler,
            fetcher,
            sink,
            start_url: Url::parse(&config.start_url)?,
            flush_interval: config.flush_interval,
            last_page: config.last_page,
            allowed_domain: config.allowed_domain.clone(),
            queue: VecDeque::new(),
            visited: HashSet::new(),
            buffer: RecordBuffer::new(),
            cursor: PageCursor::default(),
            summary: CrawlSummary::default(),
        })
    }

    pub fn buffer(&self) -> &RecordBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Crawls until nothing is left to visit or `shutdown` resolves, then
    /// flushes whatever is still buffered.
    ///
    /// A flush that fails twice stops the crawl; the unwritten records stay
    /// in [`Navigator::buffer`].
    pub async fn run<Fut>(&mut self, shutdown: Fut) -> Result<CrawlSummary, CrawlerError>
    where
        Fut: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let start = self.start_url.clone();
        if let Some(url) = self.admit(&start, start.as_str()) {
            self.queue.push_back(Task::Visit(url));
        }

        while let Some(task) = self.queue.pop_front() {
            let url = match task {
                Task::Visit(url) => url,
                Task::Flush => {
                    self.flush()?;
                    continue;
                }
            };
            let html = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested, {} queued tasks dropped", self.queue.len() + 1);
                    self.queue.clear();
                    break;
                }
                html = self.fetcher.fetch(&url) => html,
            };

            match html {
                Ok(html) => {
                    self.summary.pages_visited += 1;
                    self.handle(&url, &html)?;
                }
                Err(e) => {
                    self.summary.fetch_errors += 1;
                    warn!("Error in request {}: {}", url, e);
                }
            }
        }

        self.flush()?;
        Ok(self.summary.clone())
    }

    /// Classifies one fetched page and applies its effects.
    ///
    /// A listing page's links go to the front of the queue, followed by its
    /// flush (if due) and then its pagination link, so a flush on page N
    /// holds every record up to page N.
    pub fn handle(&mut self, url: &Url, html: &str) -> Result<(), CrawlerError> {
        let page = {
            let doc = Html::parse_document(html);
            self.crawler.classify(url, &doc)
        };

        match page {
            Page::Listing(listing) => {
                info!("Scraping {}", url);
                let past_last_page = listing.page.map_or(false, |p| p >= self.last_page);
                let has_next = listing.has_next();

                let mut others = Vec::new();
                let mut next = Vec::new();
                for link in &listing.links {
                    match link {
                        Link::Pagination(href) if past_last_page => {
                            debug!("Stop paginating at {}, skip {}", url, href);
                        }
                        Link::Pagination(href) => next.extend(self.admit(url, href)),
                        Link::Other(href) => others.extend(self.admit(url, href)),
                    }
                }

                let on_schedule = match listing.page {
                    Some(page) => {
                        self.cursor.advance(page);
                        is_flush_page(page, self.flush_interval, self.last_page)
                    }
                    None => false,
                };

                let flush = (on_schedule || !has_next).then_some(Task::Flush);
                let tasks = others
                    .into_iter()
                    .map(Task::Visit)
                    .chain(flush)
                    .chain(next.into_iter().map(Task::Visit))
                    .collect::<Vec<_>>();
                for task in tasks.into_iter().rev() {
                    self.queue.push_front(task);
                }
            }
            Page::Detail(records) => {
                for record in records {
                    debug!("Extracted from {}\n{}", url, record);
                    self.buffer.append(record);
                }
            }
            Page::Discarded => debug!("Discard {}: too little content", url),
            Page::Unrecognized => debug!("Nothing to do on {}", url),
        }
        Ok(())
    }

    /// Resolves `href` against `base` and marks it visited. `None` for
    /// foreign, non-http or already seen targets.
    fn admit(&mut self, base: &Url, href: &str) -> Option<Url> {
        let mut url = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skip invalid link {}: {}", href, e);
                return None;
            }
        };
        url.set_fragment(None);

        if !matches!(url.scheme(), "http" | "https")
            || url.host_str() != Some(self.allowed_domain.as_str())
        {
            return None;
        }
        if !self.visited.insert(url.clone()) {
            return None;
        }
        debug!("Schedule {}", url);
        Some(url)
    }

    fn flush(&mut self) -> Result<(), CrawlerError> {
        let written = match self.buffer.drain_and_flush(&self.sink) {
            Ok(written) => written,
            Err(e) => {
                warn!("Flush of {} records failed, retrying: {}", self.buffer.len(), e);
                self.buffer.drain_and_flush(&self.sink).map_err(|e| {
                    error!("Flush failed again, {} records kept in memory", self.buffer.len());
                    CrawlerError::PersistError {
                        pending: self.buffer.len(),
                        source: Box::new(e),
                    }
                })?
            }
        };
        if written > 0 {
            info!("Flushed {} records at page {}", written, self.cursor.get());
            self.summary.records_written += written as u64;
        }
        Ok(())
    }
}

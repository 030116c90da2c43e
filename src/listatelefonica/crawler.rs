use crate::{text::element_text, ContactRecord, Crawler, Link, Listing, Page};
use itertools::Itertools;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A listing `.card-body` with fewer element children is an empty or
/// anti-bot page.
pub const MIN_LISTING_CHILDREN: usize = 16;

/// Hrefs containing this are never followed from a listing page.
pub const DETAIL_PATH_PATTERN: &str = "/sp/detalhes";

const E: &str = "Invalid selector";
lazy_static! {
    static ref CARD: Selector = Selector::parse(".card.mb-3").expect(E);
    static ref CARD_TITLE: Selector = Selector::parse("h1.card-title").expect(E);
    static ref ADDRESS: Selector = Selector::parse("address").expect(E);
    static ref PHONE: Selector = Selector::parse(r#"a[href="javascript:void(0);"]"#).expect(E);
    static ref CARD_BODY: Selector = Selector::parse(".card-body").expect(E);
    static ref NEXT: Selector =
        Selector::parse(r#"div.card-footer > ul > li > a[rel="next"]"#).expect(E);
    static ref A: Selector = Selector::parse("a[href]").expect(E);
}

#[derive(Debug, Default)]
pub struct ListaTelefonicaCrawler;

impl ListaTelefonicaCrawler {
    /// One record per contact card carrying a name.
    pub fn extract_contacts(&self, doc: &Html) -> Vec<ContactRecord> {
        doc.select(&CARD)
            .filter_map(|card| {
                let name = card.select(&CARD_TITLE).next().map(element_text)?;
                if name.is_empty() {
                    return None;
                }
                let address = card
                    .select(&ADDRESS)
                    .next()
                    .map(element_text)
                    .unwrap_or_default();
                let phone_attr = card
                    .select(&PHONE)
                    .next()
                    .and_then(|a| a.value().attr("ng-click"))
                    .unwrap_or_default();
                Some(ContactRecord::from_raw(&name, &address, phone_attr))
            })
            .collect()
    }

    /// `None` when no `.card-body` on the page passes the child count guard.
    pub fn extract_links(&self, doc: &Html) -> Option<Vec<Link>> {
        let bodies = doc
            .select(&CARD_BODY)
            .filter(|body| count_element_children(*body) >= MIN_LISTING_CHILDREN)
            .collect::<Vec<_>>();
        if bodies.is_empty() {
            return None;
        }

        let next = doc
            .select(&NEXT)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .unique()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        let others = bodies
            .iter()
            .flat_map(|body| body.select(&A))
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| {
                !href.is_empty()
                    && !href.contains(DETAIL_PATH_PATTERN)
                    && !next.iter().any(|n| n.as_str() == *href)
            })
            .unique()
            .map(|href| Link::Other(href.to_string()))
            .collect::<Vec<_>>();

        Some(
            next.into_iter()
                .map(Link::Pagination)
                .chain(others)
                .collect(),
        )
    }
}

impl Crawler for ListaTelefonicaCrawler {
    fn classify(&self, url: &Url, doc: &Html) -> Page {
        let contacts = self.extract_contacts(doc);
        if !contacts.is_empty() {
            return Page::Detail(contacts);
        }

        if doc.select(&CARD_BODY).next().is_none() {
            return Page::Unrecognized;
        }

        match self.extract_links(doc) {
            Some(links) => Page::Listing(Listing {
                page: page_number(url),
                links,
            }),
            None => Page::Discarded,
        }
    }
}

pub fn page_number(url: &Url) -> Option<u64> {
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.trim().parse().ok())
}

fn count_element_children(el: ElementRef<'_>) -> usize {
    el.children().filter_map(ElementRef::wrap).count()
}

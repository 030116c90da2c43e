//! Classifier for the `listatelefonica.tk` city directory.
//!
//! Listing pages hold a `.card-body` with one entry per contact plus a
//! `rel="next"` link in the card footer. Detail pages hold a `.card.mb-3`
//! card with the name in `h1.card-title`, the address in `<address>` and the
//! phone number inside the `ng-click` attribute of a `javascript:void(0);`
//! link.

mod crawler;

pub use crawler::{
    page_number, ListaTelefonicaCrawler, DETAIL_PATH_PATTERN, MIN_LISTING_CHILDREN,
};

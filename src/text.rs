use lazy_regex::regex;

/// Collapses every run of whitespace (newlines and indentation included) into
/// a single space and trims both ends.
pub fn collapse_whitespace(s: &str) -> String {
    regex!(r"\s+").replace_all(s.trim(), " ").into_owned()
}

/// Text of all descendants of an element, whitespace collapsed.
pub fn element_text(el: scraper::ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

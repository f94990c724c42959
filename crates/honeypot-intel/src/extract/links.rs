//! Absolute http(s) links.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)https?://[^\s<>"']+"#).unwrap());

/// Extract links, dropping trailing sentence punctuation.
///
/// Duplicates are collapsed case-sensitively: paths and queries are case-sensitive.
pub fn extract_links(text: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut links = Vec::new();
    for m in URL_RE.find_iter(text) {
        let url = trim_trailing_punctuation(m.as_str());
        if !has_host(url) {
            continue;
        }
        if seen.insert(url) {
            links.push(url.to_string());
        }
    }
    links
}

/// Strip sentence punctuation the pattern swallowed at the end of a link.
///
/// Closing brackets are only stripped when they are unbalanced within the
/// link, so `https://en.wikipedia.org/wiki/Foo_(bar)` survives intact.
pub fn trim_trailing_punctuation(url: &str) -> &str {
    let mut end = url.len();
    loop {
        let current = &url[..end];
        let Some(last) = current.chars().last() else {
            break;
        };
        let strip = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '*' | '`' => true,
            ')' => current.matches('(').count() < current.matches(')').count(),
            ']' => current.matches('[').count() < current.matches(']').count(),
            '}' => current.matches('{').count() < current.matches('}').count(),
            _ => false,
        };
        if !strip {
            break;
        }
        end -= last.len_utf8();
    }
    &url[..end]
}

fn has_host(url: &str) -> bool {
    url.split_once("://")
        .map(|(_, rest)| rest.chars().next().is_some_and(|c| c.is_alphanumeric()))
        .unwrap_or(false)
}

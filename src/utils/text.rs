//! Page text helpers for the status scrapers.
//!
//! Pages are flattened to one visible text fragment per line, roughly what a
//! browser's `innerText` gives, and then searched by label.

use regex::Regex;
use scraper::{Html, Node, Selector};

use crate::error::{AppError, Result};

const HIDDEN: [&str; 4] = ["script", "style", "noscript", "template"];

/// Visible text of an HTML document, one trimmed fragment per line.
pub fn page_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let body_sel = Selector::parse("body").map_err(|e| AppError::selector("body", e))?;
    let Some(body) = document.select(&body_sel).next() else {
        return Ok(String::new());
    };

    let mut lines = Vec::new();
    for node in body.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element().map(|e| e.name()))
            .is_some_and(|name| HIDDEN.contains(&name));
        if hidden {
            continue;
        }
        for line in text.lines() {
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
    }
    Ok(lines.join("\n"))
}

/// Text following `label`: the rest of its line if non-empty, else the next
/// non-empty line.
pub fn value_after<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let start = text.find(label)? + label.len();
    let rest = &text[start..];
    let mut lines = rest.split('\n');
    let same_line = lines.next().unwrap_or("").trim();
    if !same_line.is_empty() {
        return Some(same_line);
    }
    lines.map(str::trim).find(|l| !l.is_empty())
}

/// Leading integer of a string, ignoring surrounding whitespace ("10 cm" -> 10).
pub fn leading_int(s: &str) -> Option<i64> {
    let re = Regex::new(r"^\s*(-?\d+)").ok()?;
    re.captures(s)?.get(1)?.as_str().parse().ok()
}

/// Leading decimal number of a string ("9.1℃" -> 9.1).
pub fn leading_float(s: &str) -> Option<f64> {
    let re = Regex::new(r"^\s*(-?\d+(?:\.\d+)?)").ok()?;
    re.captures(s)?.get(1)?.as_str().parse().ok()
}

/// First capture group of `pattern` in `text`, parsed as an integer.
pub fn capture_int(text: &str, pattern: &str) -> Option<u32> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

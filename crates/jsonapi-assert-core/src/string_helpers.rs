//! String case conversion used to derive wire-level member names
//!
//! Declared key names are canonical snake_case. These helpers produce the
//! dashed, titleized and pluralized variants a JSON:API server may emit.
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

use regex::Regex;
use std::sync::OnceLock;

static ACRONYM_BOUNDARY: OnceLock<Regex> = OnceLock::new();
static WORD_BOUNDARY: OnceLock<Regex> = OnceLock::new();

fn acronym_boundary() -> &'static Regex {
    ACRONYM_BOUNDARY.get_or_init(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("static regex"))
}

fn word_boundary() -> &'static Regex {
    WORD_BOUNDARY.get_or_init(|| Regex::new(r"([a-z\d])([A-Z])").expect("static regex"))
}

/// Replace underscores with dashes: `first_name` -> `first-name`
pub fn dasherize(attribute: &str) -> String {
    if !attribute.contains('_') {
        return attribute.to_string();
    }
    attribute.replace('_', "-")
}

/// Convert camelCase, dashed or spaced names to snake_case
pub fn underscore(attribute: &str) -> String {
    let split = acronym_boundary().replace_all(attribute, "${1}_${2}");
    let split = word_boundary().replace_all(&split, "${1}_${2}");
    split
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Capitalize each underscore-delimited word and join with spaces: `first_name` -> `First Name`
pub fn titleize(attribute: &str) -> String {
    attribute
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pluralize a singular resource name with simple English rules
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_ascii_lowercase();
    if lower.ends_with('y') {
        let before_y = lower.chars().rev().nth(1);
        if matches!(before_y, Some(c) if !"aeiou".contains(c)) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| lower.ends_with(suffix)) {
        return format!("{}es", word);
    }

    format!("{}s", word)
}

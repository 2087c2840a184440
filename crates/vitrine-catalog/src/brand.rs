//! Brand resolution over loosely shaped payload rows.
//!
//! Upstream rows carry the brand as a plain string, a relation object, an
//! array, or not at all. Resolution tries the direct fields first, then
//! probes the product text against a dictionary of known brands (collab
//! titles like `Nike x Supreme` credit the left side first), and finally
//! falls back to the leading capitalized tokens of the name.

use serde_json::Value;

use crate::dto::{RawBrandField, RawProduct};

/// Known brand needles over the lowercased product text. Order matters:
/// earlier entries win, and `north face` backs up the articled form.
const KNOWN_BRANDS: &[(&str, &str)] = &[
    ("nike", "Nike"),
    ("adidas", "Adidas"),
    ("reebok", "Reebok"),
    ("new balance", "New Balance"),
    ("converse", "Converse"),
    ("supreme", "Supreme"),
    ("off white", "Off-White"),
    ("off-white", "Off-White"),
    ("yeezy", "Yeezy"),
    ("puma", "Puma"),
    ("chrome hearts", "Chrome Hearts"),
    ("louis vuitton", "Louis Vuitton"),
    ("stone island", "Stone Island"),
    ("asics", "ASICS"),
    ("vans", "Vans"),
    ("balenciaga", "Balenciaga"),
    ("salomon", "Salomon"),
    ("birkenstock", "Birkenstock"),
    ("dr. martens", "Dr. Martens"),
    ("the north face", "The North Face"),
    ("north face", "The North Face"),
    ("new era", "New Era"),
    ("stussy", "Stüssy"),
];

/// Resolves the product's brand, if any shape of it is recoverable.
pub fn resolve_brand(raw: &RawProduct) -> Option<String> {
    if let Some(direct) = direct_brand(raw) {
        return Some(direct);
    }

    let haystack = format!(
        "{} {} {}",
        raw.name.as_deref().unwrap_or_default(),
        raw.title.as_deref().unwrap_or_default(),
        raw.description.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    if let Some((left, right)) = collab_split(&haystack) {
        for (needle, label) in KNOWN_BRANDS {
            if left.contains(needle) {
                return Some((*label).to_string());
            }
        }
        for (needle, label) in KNOWN_BRANDS {
            if right.contains(needle) {
                return Some((*label).to_string());
            }
        }
    }

    for (needle, label) in KNOWN_BRANDS {
        if haystack.contains(needle) {
            return Some((*label).to_string());
        }
    }

    leading_brand_tokens(raw.name.as_deref().unwrap_or_default())
}

fn direct_brand(raw: &RawProduct) -> Option<String> {
    if let Some(text) = raw.brand.as_ref().and_then(brand_field_text) {
        return Some(text.to_string());
    }
    if let Some(name) = non_empty(raw.brand_name.as_deref()) {
        return Some(name.to_string());
    }
    if let Some(text) = raw.brand.as_ref().and_then(brand_field_relation) {
        return Some(text.to_string());
    }
    if let Some(text) = raw.brand_relation.as_ref().and_then(brand_field_relation) {
        return Some(text.to_string());
    }
    if let Some(Value::String(first)) = raw.brands.as_ref().and_then(|rows| rows.first()) {
        if let Some(first) = non_empty(Some(first)) {
            return Some(first.to_string());
        }
    }
    None
}

fn brand_field_text(field: &RawBrandField) -> Option<&str> {
    match field {
        RawBrandField::Text(text) => non_empty(Some(text)),
        _ => None,
    }
}

fn brand_field_relation(field: &RawBrandField) -> Option<&str> {
    match field {
        RawBrandField::Relation(relation) => relation.display_name(),
        _ => None,
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}

/// Splits the text at the first `x`/`×` collab separator.
fn collab_split(haystack: &str) -> Option<(&str, &str)> {
    for (index, ch) in haystack.char_indices() {
        if (ch == 'x' || ch == '\u{d7}') && index > 0 {
            let left = haystack[..index].trim();
            let right = haystack[index + ch.len_utf8()..].trim();
            return Some((left, right));
        }
    }
    None
}

/// First one or two capitalized tokens of the name, Latin or Cyrillic.
///
/// A token stops at the first character outside the word class, so a
/// Cyrillic word after a capital keeps only its initial; that mirrors how
/// the storefront has always derived fallback brands.
fn leading_brand_tokens(name: &str) -> Option<String> {
    let trimmed = name.trim();
    let mut words = trimmed.split_whitespace();
    let first_word = words.next()?;
    let first = capitalized_prefix(first_word)?;
    if first.chars().count() < first_word.chars().count() {
        return Some(first);
    }
    if let Some(second) = words.next().and_then(capitalized_prefix) {
        return Some(format!("{first} {second}"));
    }
    Some(first)
}

fn capitalized_prefix(word: &str) -> Option<String> {
    let mut chars = word.chars();
    let head = chars.next()?;
    if !is_brand_capital(head) {
        return None;
    }
    let mut token = String::new();
    token.push(head);
    for ch in chars {
        if !is_brand_word_char(ch) {
            break;
        }
        token.push(ch);
    }
    Some(token)
}

fn is_brand_capital(ch: char) -> bool {
    ch.is_ascii_uppercase() || ('А'..='Я').contains(&ch) || ch == 'Ё'
}

fn is_brand_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '\'' | '-')
}

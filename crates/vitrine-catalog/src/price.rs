//! Price formatting, discount detection and merchandising badges.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::dto::{self, RawProduct};
use crate::product::Product;

/// Grouping separator used by Russian price formatting.
const GROUP_SEPARATOR: char = '\u{a0}';

/// Badge shown when only a couple of units remain.
pub const LOW_STOCK_BADGE: &str = "Последние 2 шт.";

const FRESH_DAYS: f64 = 30.0;

/// Formats an amount with Russian digit grouping (`12 500`).
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        let remaining = digits.len() - index;
        if index > 0 && remaining % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats an amount with the ruble sign appended.
pub fn format_price_rub(amount: i64) -> String {
    format!("{} ₽", format_price(amount))
}

/// Minimum positive price across the explicit fields and any per-size or
/// per-variant price entries; `0` when the row carries no usable price.
pub fn min_price(raw: &RawProduct) -> i64 {
    let mut best: Option<f64> = None;
    let mut push = |candidate: Option<f64>| {
        if let Some(number) = candidate.filter(|number| *number > 0.0) {
            best = Some(match best {
                Some(current) => current.min(number),
                None => number,
            });
        }
    };

    push(raw.min_price.as_ref().and_then(dto::scalar_f64));
    push(raw.price.as_ref().and_then(dto::scalar_f64));
    push(raw.amount.as_ref().and_then(dto::scalar_f64));

    if let Some(Value::Array(rows)) = &raw.sizes {
        for row in rows {
            push(row.get("price").and_then(dto::scalar_f64));
            push(row.get("amount").and_then(dto::scalar_f64));
            push(
                row.get("value")
                    .and_then(|value| value.get("price"))
                    .and_then(dto::scalar_f64),
            );
        }
    }
    if let Some(Value::Array(rows)) = &raw.variants {
        for row in rows {
            push(row.get("price").and_then(dto::scalar_f64));
            push(row.get("amount").and_then(dto::scalar_f64));
        }
    }

    best.map(|number| number.round() as i64).unwrap_or(0)
}

/// Whether the product belongs in discount pools: a real price drop, or a
/// badge carrying `SALE`.
pub fn is_discounted(product: &Product) -> bool {
    let price_drop = product
        .old_price
        .map_or(false, |old| old > 0 && old > product.price);
    let sale_badge = product
        .badge
        .as_deref()
        .map_or(false, |badge| badge.to_uppercase().contains("SALE"));
    price_drop || sale_badge
}

/// Rounded discount percentage for a real price drop, floored at 1.
pub fn discount_percent(product: &Product) -> Option<u32> {
    let old = product.old_price?;
    if old <= 0 || old <= product.price || product.price == 0 {
        return None;
    }
    let percent = ((1.0 - product.price as f64 / old as f64) * 100.0).round() as i64;
    Some(percent.max(1) as u32)
}

/// Computes the badge stack for a product card.
///
/// Order: the explicit data badge, the discount percentage, `NEW` for
/// flagged or recently created rows, and the low-stock marker.
pub fn compute_badges(product: &Product, now: DateTime<Utc>) -> Vec<String> {
    let mut badges = Vec::new();
    if let Some(badge) = product.badge.as_deref() {
        let trimmed = badge.trim();
        if !trimmed.is_empty() {
            badges.push(trimmed.to_string());
        }
    }
    if let Some(percent) = discount_percent(product) {
        badges.push(format!("-{percent}%"));
    }
    if product.is_new || is_fresh(product, now) {
        badges.push("NEW".to_string());
    }
    if let Some(stock) = product.stock {
        if stock > 0 && stock <= 2 {
            badges.push(LOW_STOCK_BADGE.to_string());
        }
    }
    badges
}

fn is_fresh(product: &Product, now: DateTime<Utc>) -> bool {
    match product.created_at {
        Some(created) => {
            let days = (now - created).num_milliseconds() as f64 / 86_400_000.0;
            days <= FRESH_DAYS
        }
        None => false,
    }
}

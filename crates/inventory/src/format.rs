//! Fixed-width text rendering of items for terminal listings.

use chrono::NaiveDate;

use crate::item::{ExpiryStatus, Item};

const NAME_WIDTH: usize = 16;
const UNIT_WIDTH: usize = 12;

/// Render a quantity rounded to one decimal, dropping a trailing `.0`.
pub fn format_quantity(quantity: f64) -> String {
    let scaled = quantity * 10.0;
    let rounded = if scaled.is_finite() {
        scaled.round() / 10.0
    } else {
        quantity
    };
    // `-0.04` rounds to negative zero.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// One aligned listing line for `item` as of `today`.
pub fn format_row(item: &Item, today: NaiveDate) -> String {
    let days = item.days_until_expired_on(today);
    let status = match ExpiryStatus::from_days(days) {
        ExpiryStatus::Expired => "ITEM HAS EXPIRED      EXPIRED".to_string(),
        ExpiryStatus::ExpiringSoon => format!("expires in {days:>3} days  EXPIRES SOON"),
        ExpiryStatus::Fresh => format!("expires in {days:>3} days"),
    };

    format!(
        "{:<name_w$}  {:>7} {:<unit_w$} {}",
        item.name(),
        format_quantity(item.quantity()),
        item.unit().unwrap_or("-"),
        status,
        name_w = NAME_WIDTH,
        unit_w = UNIT_WIDTH,
    )
}

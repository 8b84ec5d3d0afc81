use chrono::NaiveDate;
use serde::Deserialize;

use pantry_core::{format_date, parse_quantity, PantryResult};
use pantry_inventory::Item;

// -------------------------
// Request DTOs
// -------------------------

/// Numeric fields arrive as text so that bad input surfaces as a
/// `validation_error` rather than a form rejection.
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    pub name: String,
    pub quantity: String,
    pub exp_date: String,
    #[serde(default)]
    pub unit: Option<String>,
}

impl AddItemForm {
    pub fn quantity(&self) -> PantryResult<f64> {
        Ok(parse_quantity(&self.quantity)?)
    }
}

/// Both the query string of `GET /unit` and the body of `POST /unit`.
#[derive(Debug, Deserialize)]
pub struct PendingItemForm {
    pub name: String,
    pub quantity: String,
    pub exp_date: String,
    #[serde(default)]
    pub unit: String,
}

impl PendingItemForm {
    pub fn quantity(&self) -> PantryResult<f64> {
        Ok(parse_quantity(&self.quantity)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct EditItemForm {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub exp_date: String,
}

#[derive(Debug, Deserialize)]
pub struct UseItemForm {
    pub name: String,
    pub amount: String,
}

impl UseItemForm {
    pub fn amount(&self) -> PantryResult<f64> {
        Ok(parse_quantity(&self.amount)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: &Item, today: NaiveDate) -> serde_json::Value {
    serde_json::json!({
        "name": item.name(),
        "quantity": item.quantity(),
        "unit": item.unit(),
        "expiration_date": format_date(item.expiration_date()),
        "days_until_expired": item.days_until_expired_on(today),
        "status": item.expiry_status_on(today).as_str(),
    })
}

pub fn items_to_json<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    today: NaiveDate,
) -> serde_json::Value {
    let items: Vec<_> = items
        .into_iter()
        .map(|item| item_to_json(item, today))
        .collect();
    serde_json::json!({
        "count": items.len(),
        "items": items,
    })
}

use chrono::NaiveDate;

use pantry_core::{checked_quantity, parse_date, today, Entity, ItemKey, PantryResult, ParseError};

use crate::units::UnitRegistry;

/// Items expiring within this many days are flagged as expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 5;

/// Freshness bucket derived from the days left before expiration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Fresh,
}

impl ExpiryStatus {
    /// Classify a `days_until_expired` value (`-1` means already expired).
    pub fn from_days(days: i64) -> Self {
        if days < 0 {
            ExpiryStatus::Expired
        } else if days <= EXPIRING_SOON_DAYS {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Fresh
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::ExpiringSoon => "expiring_soon",
            ExpiryStatus::Fresh => "fresh",
        }
    }
}

/// A single pantry entry.
///
/// The unit may be absent when it was neither supplied nor known to the
/// [`UnitRegistry`]; such an item is not fully specified until
/// [`Item::set_unit`] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    name: String,
    quantity: f64,
    unit: Option<String>,
    expiration_date: NaiveDate,
}

impl Item {
    /// Build an item from user-facing text, parsing `exp_date` as `MM/DD/YYYY`.
    ///
    /// When `unit` is `None` (or blank) the unit is resolved from `units`.
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        exp_date: &str,
        unit: Option<&str>,
        units: &UnitRegistry,
    ) -> Result<Self, ParseError> {
        let expiration_date = parse_date(exp_date)?;
        Ok(Self::with_date(name, quantity, expiration_date, unit, units))
    }

    /// Build an item from an already-parsed expiration date.
    pub fn with_date(
        name: impl Into<String>,
        quantity: f64,
        expiration_date: NaiveDate,
        unit: Option<&str>,
        units: &UnitRegistry,
    ) -> Self {
        let name = name.into();
        let unit = match unit.map(str::trim).filter(|u| !u.is_empty()) {
            Some(explicit) => Some(explicit.to_string()),
            None => units.resolve(&name).map(str::to_string),
        };

        Self {
            name,
            quantity,
            unit,
            expiration_date,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.name)
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }

    /// True once a unit is known.
    pub fn is_fully_specified(&self) -> bool {
        self.unit.is_some()
    }

    /// Days left before expiration, or `-1` once the date has passed.
    ///
    /// Reads the local clock on every call.
    pub fn days_until_expired(&self) -> i64 {
        self.days_until_expired_on(today())
    }

    /// Same as [`Item::days_until_expired`] for a fixed `today`.
    pub fn days_until_expired_on(&self, today: NaiveDate) -> i64 {
        if today > self.expiration_date {
            -1
        } else {
            (self.expiration_date - today).num_days()
        }
    }

    pub fn expiry_status(&self) -> ExpiryStatus {
        self.expiry_status_on(today())
    }

    pub fn expiry_status_on(&self, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::from_days(self.days_until_expired_on(today))
    }

    /// Subtract `amount` from the quantity.
    ///
    /// No lower bound is enforced; recording more usage than is in stock
    /// leaves a negative quantity. A non-finite result is rejected and the
    /// quantity is left unchanged.
    pub fn apply_usage(&mut self, amount: f64) -> Result<(), ParseError> {
        self.quantity = checked_quantity(self.quantity - amount)?;
        if self.quantity < 0.0 {
            tracing::warn!(
                item = %self.name,
                quantity = self.quantity,
                "usage exceeded stock; quantity is negative"
            );
        }
        Ok(())
    }

    /// Set the unit and record it in `units` for future inference.
    pub fn set_unit(&mut self, unit: &str, units: &mut UnitRegistry) -> PantryResult<()> {
        units.set(&self.name, unit)?;
        self.unit = Some(unit.trim().to_string());
        Ok(())
    }

    pub(crate) fn add_quantity(&mut self, amount: f64) -> Result<(), ParseError> {
        self.quantity = checked_quantity(self.quantity + amount)?;
        Ok(())
    }

    pub(crate) fn set_quantity(&mut self, quantity: f64) -> Result<(), ParseError> {
        self.quantity = checked_quantity(quantity)?;
        Ok(())
    }

    pub(crate) fn set_expiration_date(&mut self, date: NaiveDate) {
        self.expiration_date = date;
    }
}

impl Entity for Item {
    type Id = ItemKey;

    fn id(&self) -> ItemKey {
        self.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn item_expiring(date: NaiveDate) -> Item {
        Item::with_date("Yogurt", 1.0, date, Some("cup"), &UnitRegistry::detached())
    }

    #[test]
    fn new_parses_date_and_keeps_explicit_unit() {
        let units = UnitRegistry::detached();
        let item = Item::new("Milk", 1.0, "07/04/2025", Some("gallon"), &units).unwrap();

        assert_eq!(item.name(), "Milk");
        assert_eq!(item.unit(), Some("gallon"));
        assert_eq!(
            item.expiration_date(),
            NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()
        );
    }

    #[test]
    fn new_rejects_bad_date() {
        let err = Item::new("Milk", 1.0, "2025-07-04", None, &UnitRegistry::detached())
            .unwrap_err();
        assert_eq!(err, ParseError::invalid_date("2025-07-04"));
    }

    #[test]
    fn missing_unit_is_resolved_from_registry() {
        let mut units = UnitRegistry::detached();
        units.set("flour", "kg").unwrap();

        let known = Item::new(" FLOUR", 2.0, "01/01/2026", None, &units).unwrap();
        assert_eq!(known.unit(), Some("kg"));

        let blank = Item::new("Flour", 2.0, "01/01/2026", Some("  "), &units).unwrap();
        assert_eq!(blank.unit(), Some("kg"));

        let unknown = Item::new("Saffron", 1.0, "01/01/2026", None, &units).unwrap();
        assert_eq!(unknown.unit(), None);
        assert!(!unknown.is_fully_specified());
    }

    #[test]
    fn days_until_expired_counts_exact_days() {
        let today = fixed_today();
        assert_eq!(item_expiring(today + Duration::days(3)).days_until_expired_on(today), 3);
        assert_eq!(item_expiring(today).days_until_expired_on(today), 0);
        assert_eq!(
            item_expiring(today + Duration::days(400)).days_until_expired_on(today),
            400
        );
    }

    #[test]
    fn days_until_expired_is_sentinel_once_past() {
        let today = fixed_today();
        assert_eq!(item_expiring(today - Duration::days(1)).days_until_expired_on(today), -1);
        assert_eq!(item_expiring(today - Duration::days(90)).days_until_expired_on(today), -1);
    }

    #[test]
    fn days_until_expired_uses_the_current_clock() {
        let item = item_expiring(today() + Duration::days(3));
        assert_eq!(item.days_until_expired(), 3);
    }

    #[test]
    fn expiry_status_buckets() {
        let today = fixed_today();
        assert_eq!(
            item_expiring(today - Duration::days(1)).expiry_status_on(today),
            ExpiryStatus::Expired
        );
        assert_eq!(
            item_expiring(today + Duration::days(EXPIRING_SOON_DAYS)).expiry_status_on(today),
            ExpiryStatus::ExpiringSoon
        );
        assert_eq!(
            item_expiring(today + Duration::days(EXPIRING_SOON_DAYS + 1)).expiry_status_on(today),
            ExpiryStatus::Fresh
        );
    }

    #[test]
    fn apply_usage_allows_negative_stock() {
        let mut item = item_expiring(fixed_today());
        item.apply_usage(0.25).unwrap();
        assert_eq!(item.quantity(), 0.75);
        item.apply_usage(2.0).unwrap();
        assert_eq!(item.quantity(), -1.25);
    }

    #[test]
    fn overflowing_quantity_is_rejected_and_unchanged() {
        let mut item = item_expiring(fixed_today());
        item.set_quantity(-f64::MAX).unwrap();

        let err = item.apply_usage(f64::MAX).unwrap_err();
        assert_eq!(err, ParseError::invalid_quantity("-inf"));
        assert_eq!(item.quantity(), -f64::MAX);

        item.set_quantity(f64::MAX).unwrap();
        assert!(item.add_quantity(f64::MAX).is_err());
        assert_eq!(item.quantity(), f64::MAX);
        assert!(item.set_quantity(f64::INFINITY).is_err());
        assert!(item.set_quantity(f64::NAN).is_err());
        assert_eq!(item.quantity(), f64::MAX);
    }

    #[test]
    fn set_unit_writes_through_to_registry() {
        let mut units = UnitRegistry::detached();
        let mut item = Item::new("Saffron", 1.0, "01/01/2026", None, &units).unwrap();

        item.set_unit(" gram ", &mut units).unwrap();

        assert_eq!(item.unit(), Some("gram"));
        assert_eq!(units.resolve("saffron"), Some("gram"));
    }

    #[test]
    fn entity_id_is_the_normalized_name() {
        let item = Item::with_date(
            "  Brown Sugar",
            1.0,
            fixed_today(),
            Some("lb"),
            &UnitRegistry::detached(),
        );
        assert_eq!(item.id(), ItemKey::new("brown sugar"));
    }
}

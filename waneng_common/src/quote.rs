//! Point-in-time price snapshot produced by the vendor parsers.
//!
//! Both vendors yield the same shape. A `Quote` is built fresh for every
//! request and consumed straight away by the caller.
use serde::Serialize;

/// Market quote for a single security.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    /// Untouched vendor payload, kept for diagnostics.
    pub raw: String,
    /// Security name as reported by the vendor.
    pub name: String,
    /// Last traded price. Always finite.
    pub now: f64,
    /// Vendor-local date as `YYYY-MM-DD`, empty when unknown.
    pub date: String,
    /// Time of day as `HH:MM:SS`, empty when unknown.
    pub time: String,
}

impl Quote {
    /// `date time` when both are known, whichever is present otherwise.
    pub fn stamp(&self) -> String {
        match (self.date.is_empty(), self.time.is_empty()) {
            (false, false) => format!("{} {}", self.date, self.time),
            (false, true) => self.date.clone(),
            (true, false) => self.time.clone(),
            (true, true) => String::new(),
        }
    }
}

/// Parse a vendor price field. Anything that is not a finite number is rejected.
pub fn parse_price(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

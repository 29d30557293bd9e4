use serde::{Deserialize, Serialize};

use super::ServiceKind;

/// Price charged for one unit of each service.
///
/// Every rate is finite and non-negative. Callers that build a table from
/// untrusted input go through [`RateTable::set_rate`] or [`is_valid_rate`]
/// so that invalid values fall back to the previous one instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub regular: f64,
    pub double: f64,
    pub potty: f64,
    pub petsit: f64,
}

impl RateTable {
    pub const DEFAULT: RateTable = RateTable {
        regular: 13.0,
        double: 19.5,
        potty: 6.5,
        petsit: 45.0,
    };

    pub fn get(&self, kind: ServiceKind) -> f64 {
        match kind {
            ServiceKind::Regular => self.regular,
            ServiceKind::Double => self.double,
            ServiceKind::Potty => self.potty,
            ServiceKind::Petsit => self.petsit,
        }
    }

    fn slot(&mut self, kind: ServiceKind) -> &mut f64 {
        match kind {
            ServiceKind::Regular => &mut self.regular,
            ServiceKind::Double => &mut self.double,
            ServiceKind::Potty => &mut self.potty,
            ServiceKind::Petsit => &mut self.petsit,
        }
    }

    /// Replace one rate if `value` is a valid price, otherwise keep the
    /// current one. Returns whether the value was accepted.
    pub fn set_rate(&mut self, kind: ServiceKind, value: f64) -> bool {
        if is_valid_rate(value) {
            *self.slot(kind) = value;
            true
        } else {
            false
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A rate must be a finite, non-negative number.
pub fn is_valid_rate(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

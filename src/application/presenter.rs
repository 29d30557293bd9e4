use serde::Serialize;

use crate::domain::{Ledger, RateTable, ServiceKind, format_money, is_valid_rate, parse_amount};

/// Everything the rendering side needs after a state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    /// One label per service, in [`ServiceKind::ALL`] order.
    pub button_labels: Vec<String>,
    /// Four service lines followed by the misc line.
    pub summary_lines: Vec<String>,
    pub total: String,
    pub undo_available: bool,
}

impl View {
    pub fn build(ledger: &Ledger, rates: &RateTable) -> Self {
        Self {
            button_labels: ServiceKind::ALL
                .iter()
                .map(|&kind| button_label(kind, rates))
                .collect(),
            summary_lines: summary_lines(ledger, rates),
            total: format_money(ledger.total(rates)),
            undo_available: ledger.can_undo(),
        }
    }
}

/// Example: "Regular Walk (+$13.00)"
pub fn button_label(kind: ServiceKind, rates: &RateTable) -> String {
    format!(
        "{} (+{})",
        kind.display_name(),
        format_money(rates.get(kind))
    )
}

pub fn summary_lines(ledger: &Ledger, rates: &RateTable) -> Vec<String> {
    let mut lines: Vec<String> = ServiceKind::ALL
        .iter()
        .map(|&kind| {
            let label = format!("{} ", kind.plural_name());
            format!(
                "{:<14}({}) - subtotal: {}",
                label,
                ledger.count(kind),
                format_money(ledger.subtotal(kind, rates))
            )
        })
        .collect();
    lines.push(format!(
        "{:<14}- subtotal: {}",
        "Misc",
        format_money(ledger.misc_total())
    ));
    lines
}

/// Raw, user-typed rate values. `None` leaves a rate untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateEdits {
    pub regular: Option<String>,
    pub double: Option<String>,
    pub potty: Option<String>,
    pub petsit: Option<String>,
}

impl RateEdits {
    pub fn get(&self, kind: ServiceKind) -> Option<&str> {
        match kind {
            ServiceKind::Regular => self.regular.as_deref(),
            ServiceKind::Double => self.double.as_deref(),
            ServiceKind::Potty => self.potty.as_deref(),
            ServiceKind::Petsit => self.petsit.as_deref(),
        }
    }

    pub fn set(&mut self, kind: ServiceKind, raw: impl Into<String>) {
        let slot = match kind {
            ServiceKind::Regular => &mut self.regular,
            ServiceKind::Double => &mut self.double,
            ServiceKind::Potty => &mut self.potty,
            ServiceKind::Petsit => &mut self.petsit,
        };
        *slot = Some(raw.into());
    }

    pub fn is_empty(&self) -> bool {
        ServiceKind::ALL.iter().all(|&kind| self.get(kind).is_none())
    }
}

/// Apply edits field by field. A field is taken only if it reads as a
/// finite number >= 0; anything else keeps the current rate.
pub fn apply_rate_edits(current: &RateTable, edits: &RateEdits) -> RateTable {
    let mut next = *current;
    for kind in ServiceKind::ALL {
        let Some(raw) = edits.get(kind) else {
            continue;
        };
        match parse_rate_input(raw) {
            Some(value) => {
                next.set_rate(kind, value);
            }
            None => tracing::debug!("Ignoring invalid {} rate {:?}", kind, raw),
        }
    }
    next
}

/// Read one edited rate field. A blank field means a rate of zero; otherwise
/// the text must be a finite, non-negative number.
pub fn parse_rate_input(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        return Some(0.0);
    }
    parse_amount(raw).filter(|&value| is_valid_rate(value))
}

/// Parse a misc charge. Zero and non-numbers are rejected.
pub fn parse_misc_amount(raw: &str) -> Option<f64> {
    parse_amount(raw).filter(|&amount| crate::domain::is_valid_misc_amount(amount))
}

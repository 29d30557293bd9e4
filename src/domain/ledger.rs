use serde::{Deserialize, Serialize};

use super::{RateTable, ServiceKind};

/// One recorded user action, kept so it can be reversed by undo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HistoryEntry {
    Service {
        #[serde(rename = "type")]
        service: ServiceKind,
    },
    Misc {
        amount: f64,
    },
}

/// Completed-service count per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters([u64; 4]);

impl Counters {
    pub fn get(&self, kind: ServiceKind) -> u64 {
        self.0[kind.index()]
    }

    fn increment(&mut self, kind: ServiceKind) {
        self.0[kind.index()] += 1;
    }

    /// Decrement floored at zero.
    fn decrement(&mut self, kind: ServiceKind) {
        let count = &mut self.0[kind.index()];
        *count = count.saturating_sub(1);
    }
}

/// Running tally of completed services and miscellaneous charges.
///
/// Every add-style operation pushes a [`HistoryEntry`]; [`Ledger::undo`]
/// pops the newest one and reverses its effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    counters: Counters,
    misc_total: f64,
    history: Vec<HistoryEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn count(&self, kind: ServiceKind) -> u64 {
        self.counters.get(kind)
    }

    pub fn misc_total(&self) -> f64 {
        self.misc_total
    }

    /// History in call order, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn add_service(&mut self, kind: ServiceKind) {
        self.counters.increment(kind);
        self.history.push(HistoryEntry::Service { service: kind });
    }

    /// Add a miscellaneous charge. Negative amounts lower the running total.
    /// Non-finite and zero amounts are ignored; returns whether the charge
    /// was recorded.
    pub fn add_misc(&mut self, amount: f64) -> bool {
        if !is_valid_misc_amount(amount) {
            return false;
        }
        self.misc_total += amount;
        self.history.push(HistoryEntry::Misc { amount });
        true
    }

    /// Reverse the newest history entry. Counters and the misc total are
    /// both floored at zero, so undoing a misc charge after negative charges
    /// may not restore the exact prior total.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let last = self.history.pop()?;
        match last {
            HistoryEntry::Service { service } => self.counters.decrement(service),
            HistoryEntry::Misc { amount } => {
                self.misc_total = (self.misc_total - amount).max(0.0);
            }
        }
        Some(last)
    }

    /// Clear counters, misc total and history. Rates live elsewhere and are
    /// not affected.
    pub fn reset_all(&mut self) {
        self.counters = Counters::default();
        self.misc_total = 0.0;
        self.history.clear();
    }

    pub fn subtotal(&self, kind: ServiceKind, rates: &RateTable) -> f64 {
        self.counters.get(kind) as f64 * rates.get(kind)
    }

    /// Sum of all service subtotals plus the misc total.
    pub fn total(&self, rates: &RateTable) -> f64 {
        ServiceKind::ALL
            .iter()
            .map(|&kind| self.subtotal(kind, rates))
            .sum::<f64>()
            + self.misc_total
    }
}

/// A misc charge must be finite and non-zero.
pub fn is_valid_misc_amount(amount: f64) -> bool {
    amount.is_finite() && amount != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::new();
        for kind in ServiceKind::ALL {
            assert_eq!(ledger.count(kind), 0);
        }
        assert_eq!(ledger.misc_total(), 0.0);
        assert!(!ledger.can_undo());
        assert_eq!(ledger.total(&RateTable::default()), 0.0);
    }

    #[test]
    fn test_add_service_records_history() {
        let mut ledger = Ledger::new();
        ledger.add_service(ServiceKind::Regular);
        ledger.add_service(ServiceKind::Regular);
        ledger.add_service(ServiceKind::Petsit);

        assert_eq!(ledger.count(ServiceKind::Regular), 2);
        assert_eq!(ledger.count(ServiceKind::Petsit), 1);
        assert_eq!(ledger.history().len(), 3);
        assert_eq!(
            ledger.history()[2],
            HistoryEntry::Service {
                service: ServiceKind::Petsit
            }
        );
    }

    #[test]
    fn test_scenario_total_and_undo() {
        let rates = RateTable::default();
        let mut ledger = Ledger::new();
        ledger.add_service(ServiceKind::Regular);
        ledger.add_service(ServiceKind::Regular);
        assert!(ledger.add_misc(10.0));
        ledger.add_service(ServiceKind::Potty);

        assert_eq!(ledger.count(ServiceKind::Regular), 2);
        assert_eq!(ledger.count(ServiceKind::Double), 0);
        assert_eq!(ledger.count(ServiceKind::Potty), 1);
        assert_eq!(ledger.count(ServiceKind::Petsit), 0);
        assert_close(ledger.misc_total(), 10.0);
        assert_close(ledger.total(&rates), 42.5);

        let undone = ledger.undo();
        assert_eq!(
            undone,
            Some(HistoryEntry::Service {
                service: ServiceKind::Potty
            })
        );
        assert_eq!(ledger.count(ServiceKind::Potty), 0);
        assert_close(ledger.total(&rates), 36.0);
    }

    #[test]
    fn test_add_misc_rejects_zero_and_non_finite() {
        let mut ledger = Ledger::new();
        assert!(ledger.add_misc(5.0));

        assert!(!ledger.add_misc(0.0));
        assert!(!ledger.add_misc(-0.0));
        assert!(!ledger.add_misc(f64::NAN));
        assert!(!ledger.add_misc(f64::INFINITY));
        assert!(!ledger.add_misc(f64::NEG_INFINITY));

        assert_eq!(ledger.history().len(), 1);
        assert_eq!(ledger.misc_total(), 5.0);
    }

    #[test]
    fn test_negative_misc_lowers_total_without_floor() {
        let mut ledger = Ledger::new();
        assert!(ledger.add_misc(-4.0));
        assert_eq!(ledger.misc_total(), -4.0);
        assert_eq!(ledger.history(), &[HistoryEntry::Misc { amount: -4.0 }]);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut ledger = Ledger::new();
        let before = ledger.clone();
        assert_eq!(ledger.undo(), None);
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_equal_number_of_undos_restores_state() {
        let mut ledger = Ledger::new();
        ledger.add_service(ServiceKind::Double);
        assert!(ledger.add_misc(2.5));
        let before = ledger.clone();

        ledger.add_service(ServiceKind::Regular);
        assert!(ledger.add_misc(7.0));
        ledger.add_service(ServiceKind::Potty);
        assert!(ledger.add_misc(-1.5));

        for _ in 0..4 {
            assert!(ledger.undo().is_some());
        }

        assert_eq!(ledger.counters(), before.counters());
        assert_close(ledger.misc_total(), before.misc_total());
        assert_eq!(ledger.history(), before.history());
    }

    #[test]
    fn test_misc_undo_is_floored_at_zero() {
        let mut ledger = Ledger::new();
        assert!(ledger.add_misc(-5.0));
        assert!(ledger.add_misc(3.0));
        assert_eq!(ledger.misc_total(), -2.0);

        // -2 - 3 clamps to 0 rather than landing on -5
        ledger.undo();
        assert_eq!(ledger.misc_total(), 0.0);

        // 0 - (-5) = 5: the clamp makes the reversal inexact
        ledger.undo();
        assert_eq!(ledger.misc_total(), 5.0);
        assert!(!ledger.can_undo());
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut ledger = Ledger::new();
        ledger.add_service(ServiceKind::Regular);
        ledger.add_service(ServiceKind::Petsit);
        assert!(ledger.add_misc(12.0));

        ledger.reset_all();

        assert_eq!(ledger, Ledger::new());
        assert_eq!(ledger.undo(), None);
    }

    #[test]
    fn test_total_is_sum_of_subtotals_plus_misc() {
        let rates = RateTable {
            regular: 10.0,
            double: 15.0,
            potty: 5.0,
            petsit: 40.0,
        };
        let mut ledger = Ledger::new();
        for kind in ServiceKind::ALL {
            ledger.add_service(kind);
        }
        ledger.add_service(ServiceKind::Double);
        assert!(ledger.add_misc(3.0));

        let subtotals: f64 = ServiceKind::ALL
            .iter()
            .map(|&kind| ledger.subtotal(kind, &rates))
            .sum();
        assert_close(ledger.subtotal(ServiceKind::Double, &rates), 30.0);
        assert_close(ledger.total(&rates), subtotals + 3.0);
        assert_close(ledger.total(&rates), 88.0);
    }

    #[test]
    fn test_history_entry_json_shape() {
        let service = serde_json::to_value(HistoryEntry::Service {
            service: ServiceKind::Potty,
        })
        .unwrap();
        assert_eq!(service["kind"], "service");
        assert_eq!(service["type"], "potty");

        let misc = serde_json::to_value(HistoryEntry::Misc { amount: 4.5 }).unwrap();
        assert_eq!(misc["kind"], "misc");
        assert_eq!(misc["amount"], 4.5);
    }
}

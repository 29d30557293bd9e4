use crate::domain::{HistoryEntry, Ledger, RateTable, ServiceKind};
use crate::storage::{KeyValueStore, RateStore};

use super::{AppError, RateEdits, Summary, View, apply_rate_edits};

/// A user-triggered action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddService(ServiceKind),
    AddMisc(f64),
    Undo,
    Reset,
    SaveRates(RateEdits),
    ResetRates,
}

/// What a dispatched action did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Tally or rates changed.
    Changed,
    /// The newest history entry was reversed.
    Undone(HistoryEntry),
    /// Nothing to do: rejected misc amount or undo on empty history.
    Ignored,
}

/// Owns the whole session state: the rate table, the ledger and the store
/// the rates are persisted to. Every change goes through this type.
pub struct Session<S> {
    rates: RateTable,
    ledger: Ledger,
    rate_store: RateStore<S>,
}

impl<S: KeyValueStore> Session<S> {
    /// Start a session with the stored rates and an empty ledger.
    pub fn open(store: S) -> Self {
        let rate_store = RateStore::new(store);
        let rates = rate_store.load();
        Self {
            rates,
            ledger: Ledger::new(),
            rate_store,
        }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        self.rate_store.store()
    }

    pub fn view(&self) -> View {
        View::build(&self.ledger, &self.rates)
    }

    pub fn summary(&self) -> Summary {
        Summary::build(&self.ledger, &self.rates)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, AppError> {
        tracing::debug!("Dispatching {:?}", action);
        match action {
            Action::AddService(kind) => {
                self.add_service(kind);
                Ok(Outcome::Changed)
            }
            Action::AddMisc(amount) => Ok(if self.add_misc(amount) {
                Outcome::Changed
            } else {
                Outcome::Ignored
            }),
            Action::Undo => Ok(self.undo().map_or(Outcome::Ignored, Outcome::Undone)),
            Action::Reset => {
                self.reset_all();
                Ok(Outcome::Changed)
            }
            Action::SaveRates(edits) => {
                self.save_rates(&edits)?;
                Ok(Outcome::Changed)
            }
            Action::ResetRates => {
                self.reset_rates()?;
                Ok(Outcome::Changed)
            }
        }
    }

    pub fn add_service(&mut self, kind: ServiceKind) {
        self.ledger.add_service(kind);
    }

    /// Returns false when the amount was rejected.
    pub fn add_misc(&mut self, amount: f64) -> bool {
        let recorded = self.ledger.add_misc(amount);
        if !recorded {
            tracing::debug!("Rejected misc amount {}", amount);
        }
        recorded
    }

    pub fn undo(&mut self) -> Option<HistoryEntry> {
        self.ledger.undo()
    }

    pub fn reset_all(&mut self) {
        self.ledger.reset_all();
    }

    /// Validate the edits against the current rates, then persist the
    /// resulting table.
    pub fn save_rates(&mut self, edits: &RateEdits) -> Result<RateTable, AppError> {
        let next = apply_rate_edits(&self.rates, edits);
        self.rate_store.save(&next)?;
        self.rates = next;
        Ok(next)
    }

    pub fn reset_rates(&mut self) -> Result<RateTable, AppError> {
        self.rates = self.rate_store.reset_to_defaults()?;
        Ok(self.rates)
    }
}

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::{RateTable, ServiceKind, parse_amount};

use super::KeyValueStore;

/// Storage key of the persisted rate record.
pub const RATES_KEY: &str = "paycalc_rates_v1";

/// Loads and saves the rate table through a [`KeyValueStore`].
pub struct RateStore<S> {
    store: S,
}

impl<S: KeyValueStore> RateStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the persisted rates. Never fails: a missing or unreadable record
    /// yields the defaults, and each invalid field falls back to its own
    /// default while the valid ones are kept.
    pub fn load(&self) -> RateTable {
        let raw = match self.store.get(RATES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No stored rates, using defaults");
                return RateTable::DEFAULT;
            }
            Err(e) => {
                tracing::warn!("Failed to read stored rates, using defaults: {:#}", e);
                return RateTable::DEFAULT;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(record)) => {
                let mut rates = RateTable::DEFAULT;
                for kind in ServiceKind::ALL {
                    let accepted = record
                        .get(kind.as_str())
                        .and_then(stored_number)
                        .is_some_and(|value| rates.set_rate(kind, value));
                    if !accepted {
                        tracing::warn!(
                            "Invalid stored rate for {}, using default {}",
                            kind,
                            RateTable::DEFAULT.get(kind)
                        );
                    }
                }
                rates
            }
            Ok(_) => {
                tracing::warn!("Stored rates are not a JSON object, using defaults");
                RateTable::DEFAULT
            }
            Err(e) => {
                tracing::warn!("Stored rates are not valid JSON, using defaults: {}", e);
                RateTable::DEFAULT
            }
        }
    }

    /// Persist the table as-is, replacing any previous record.
    pub fn save(&mut self, rates: &RateTable) -> Result<()> {
        let json = serde_json::to_string(rates).context("Failed to serialize rates")?;
        self.store
            .set(RATES_KEY, &json)
            .context("Failed to save rates")?;
        tracing::info!("Saved rates");
        Ok(())
    }

    /// Persist and return the built-in defaults.
    pub fn reset_to_defaults(&mut self) -> Result<RateTable> {
        self.save(&RateTable::DEFAULT)?;
        Ok(RateTable::DEFAULT)
    }
}

/// Leniently coerce a stored field to a number: JSON numbers as-is,
/// booleans as 1 and 0, and non-empty strings holding a finite number
/// (whitespace-only reads as 0). `null`, `""`, arrays and objects are
/// rejected.
fn stored_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::domain::{Ledger, RateTable, ServiceKind, format_amount};

/// Serializable snapshot of a session, for export.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub generated_at: DateTime<Utc>,
    pub rates: RateTable,
    pub services: Vec<ServiceLine>,
    pub misc_total: f64,
    pub total: f64,
    pub history_len: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceLine {
    pub service: ServiceKind,
    pub count: u64,
    pub rate: f64,
    pub subtotal: f64,
}

impl Summary {
    pub fn build(ledger: &Ledger, rates: &RateTable) -> Self {
        Self {
            generated_at: Utc::now(),
            rates: *rates,
            services: ServiceKind::ALL
                .iter()
                .map(|&service| ServiceLine {
                    service,
                    count: ledger.count(service),
                    rate: rates.get(service),
                    subtotal: ledger.subtotal(service, rates),
                })
                .collect(),
            misc_total: ledger.misc_total(),
            total: ledger.total(rates),
            history_len: ledger.history().len(),
        }
    }

    /// Pretty-printed JSON.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }

    /// One row per service, then misc and total rows. Amounts are rendered
    /// like the on-screen money, without the dollar sign; count and rate are
    /// blank where they do not apply.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["item", "count", "rate", "subtotal"])?;

        for line in &self.services {
            csv_writer.write_record([
                line.service.as_str().to_string(),
                line.count.to_string(),
                format_amount(line.rate),
                format_amount(line.subtotal),
            ])?;
        }
        csv_writer.write_record([
            "misc".to_string(),
            String::new(),
            String::new(),
            format_amount(self.misc_total),
        ])?;
        csv_writer.write_record([
            "total".to_string(),
            String::new(),
            String::new(),
            format_amount(self.total),
        ])?;

        csv_writer.flush()?;
        Ok(())
    }
}

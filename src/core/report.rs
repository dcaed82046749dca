//! Report generation business logic.
//!
//! Builds the totals view and the order listing from the record store, and audits stored
//! totals against a reprice of their order text. All functions return structured data
//! or plain strings that the bot layer wraps into messages.

use crate::{
    core::{
        catalog::Catalog,
        encoder, money,
        reconcile::{self, TotalsReport},
    },
    errors::Result,
    store::{OrderRecord, RecordStore},
};
use rust_decimal::Decimal;
use std::fmt::Write;
use tracing::{debug, instrument};

/// A stored record whose total disagrees with its order text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalMismatch {
    /// 1-based position in the store
    pub position: usize,
    /// The record as stored
    pub record: OrderRecord,
    /// Price recomputed from the order text
    pub expected: Decimal,
}

/// Generates the totals report, or `None` when no order has been recorded yet.
///
/// # Errors
/// Returns an error if the store exists but cannot be read at all.
#[instrument(skip(store, catalog))]
pub fn generate_totals_report(
    store: &RecordStore,
    catalog: &Catalog,
) -> Result<Option<TotalsReport>> {
    if !store.exists() {
        return Ok(None);
    }

    let orders = store.read_encoded_orders()?;
    debug!("Reconciling {} stored orders", orders.len());
    Ok(Some(reconcile::reconcile(
        orders.iter().map(String::as_str),
        catalog,
    )))
}

/// Lists stored records whose total does not match the current catalog prices.
#[must_use]
pub fn audit_records(records: &[OrderRecord], catalog: &Catalog) -> Vec<TotalMismatch> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| {
            let expected = encoder::reprice(&record.encoded_order, catalog);
            (money::round_money(record.total) != expected).then(|| TotalMismatch {
                position: i + 1,
                record: record.clone(),
                expected,
            })
        })
        .collect()
}

/// One line per catalog item: `Brigadeiro (unidade): 12`.
///
/// # Errors
/// Returns an error only if string formatting fails.
pub fn format_totals(report: &TotalsReport) -> Result<String> {
    let mut text = String::new();
    for row in report.rows() {
        writeln!(&mut text, "{}: **{}**", row.name, row.units)?;
    }
    write!(&mut text, "Total: **{}** units", report.total_units())?;
    Ok(text)
}

/// Summary line for a stored record.
#[must_use]
pub fn format_record_summary(record: &OrderRecord) -> String {
    let mut line = format!(
        "**{}** | {} | {}",
        record.customer_name,
        record.encoded_order,
        money::format_brl(record.total)
    );
    if !record.note.trim().is_empty() {
        line.push_str(" | ");
        line.push_str(record.note.trim());
    }
    line
}

/// Formats records into lines, keeping the output under `max_chars`.
///
/// When records are dropped a final `…and N more` line says how many.
#[must_use]
pub fn format_record_list(records: &[OrderRecord], max_chars: usize) -> String {
    let mut text = String::new();
    for (i, record) in records.iter().enumerate() {
        let line = format!("{}. {}\n", i + 1, format_record_summary(record));
        let footer = format!("…and {} more", records.len() - i);
        let reserved = if i + 1 == records.len() { 0 } else { footer.len() };
        if text.len() + line.len() + reserved > max_chars {
            text.push_str(&footer);
            return text;
        }
        text.push_str(&line);
    }
    text.trim_end().to_string()
}

/// Sum of every stored total.
#[must_use]
pub fn revenue(records: &[OrderRecord]) -> Decimal {
    money::round_money(records.iter().map(|record| record.total).sum())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::order, test_utils::*};

    fn stored(name: &str, orders: &str, cents: i64) -> OrderRecord {
        OrderRecord {
            customer_name: name.to_string(),
            encoded_order: orders.to_string(),
            total: Decimal::new(cents, 2),
            note: String::new(),
        }
    }

    #[test]
    fn test_report_is_none_without_store() -> Result<()> {
        let (_dir, store) = temp_store();
        let catalog = sample_catalog();
        assert!(generate_totals_report(&store, &catalog)?.is_none());
        Ok(())
    }

    #[test]
    fn test_report_after_clearing_missing_store() -> Result<()> {
        let (_dir, store) = temp_store();
        let catalog = sample_catalog();

        store.clear_all()?;
        assert!(generate_totals_report(&store, &catalog)?.is_none());
        Ok(())
    }

    #[test]
    fn test_report_over_submitted_orders() -> Result<()> {
        let (_dir, store) = temp_store();
        let catalog = sample_catalog();

        order::submit_order(&store, &catalog, &order_input("Ana", &[(BRIGADEIRO, 2)], &[]))?;
        order::submit_order(
            &store,
            &catalog,
            &order_input("Bia", &[], &[[BRIGADEIRO, BEM_CASADO, BEM_CASADO, PACOCA]]),
        )?;

        let report = generate_totals_report(&store, &catalog)?.unwrap();
        assert_eq!(report.units(BRIGADEIRO), Some(3));
        assert_eq!(report.units(BEM_CASADO), Some(2));
        assert_eq!(report.units(PACOCA), Some(1));
        assert_eq!(report.units(PALHA_NINHO), Some(0));

        // Reading again gives the same answer.
        assert_eq!(generate_totals_report(&store, &catalog)?, Some(report));
        Ok(())
    }

    #[test]
    fn test_report_ignores_stored_totals() -> Result<()> {
        let (_dir, store) = temp_store();
        let catalog = sample_catalog();
        store.append_record(&stored("Ana", "Brigadeiro (unidade) (x2)", 99_999))?;

        let report = generate_totals_report(&store, &catalog)?;
        assert_eq!(report.and_then(|r| r.units(BRIGADEIRO)), Some(2));
        Ok(())
    }

    #[test]
    fn test_audit_flags_only_mismatches() -> Result<()> {
        let (_dir, store) = temp_store();
        let catalog = sample_catalog();
        let good = order::submit_order(
            &store,
            &catalog,
            &order_input("Ana", &[(BRIGADEIRO, 3)], &[[PACOCA, PACOCA, PACOCA, PACOCA]]),
        )?;
        let bad = stored("Bia", "Salgadinho de queijo (x2)", 500);

        let mismatches = audit_records(&[good, bad.clone()], &catalog);
        assert_eq!(
            mismatches,
            vec![TotalMismatch {
                position: 2,
                record: bad,
                expected: Decimal::new(1000, 2),
            }]
        );
        Ok(())
    }

    #[test]
    fn test_format_totals() -> Result<()> {
        let catalog = sample_catalog();
        let report = reconcile::reconcile(["Docinho de Paçoca (x2)"], &catalog);
        let text = format_totals(&report)?;

        assert!(text.starts_with("Brigadeiro (unidade): **0**\n"));
        assert!(text.contains("Docinho de Paçoca: **2**\n"));
        assert!(text.ends_with("Total: **2** units"));
        Ok(())
    }

    #[test]
    fn test_format_record_summary_with_note() {
        let mut record = stored("Ana", "Brigadeiro (unidade) (x3)", 600);
        assert_eq!(
            format_record_summary(&record),
            "**Ana** | Brigadeiro (unidade) (x3) | R$ 6.00"
        );

        record.note = "entregar na portaria".to_string();
        assert!(format_record_summary(&record).ends_with("| entregar na portaria"));
    }

    #[test]
    fn test_format_record_list_truncates() {
        let records: Vec<OrderRecord> = (0..50)
            .map(|i| stored(&format!("Cliente {i}"), "Brigadeiro (unidade) (x1)", 200))
            .collect();

        let text = format_record_list(&records, 500);
        assert!(text.len() <= 500);
        assert!(text.starts_with("1. **Cliente 0**"));
        assert!(text.contains("more"));
    }

    #[test]
    fn test_format_record_list_fits() {
        let records = vec![stored("Ana", "Brigadeiro (unidade) (x1)", 200)];
        assert_eq!(
            format_record_list(&records, 2000),
            "1. **Ana** | Brigadeiro (unidade) (x1) | R$ 2.00"
        );
    }

    #[test]
    fn test_format_record_list_keeps_a_last_line_that_fits() {
        let records = vec![
            stored("Ana", "Brigadeiro (unidade) (x1)", 200),
            stored("Bia", "Docinho de Paçoca (x2)", 400),
        ];
        let full = format_record_list(&records, usize::MAX);

        // Room for both lines and their newlines, but not for a footer on top.
        assert_eq!(format_record_list(&records, full.len() + 1), full);

        let first_only = format_record_list(&records, full.len());
        assert!(first_only.starts_with("1. **Ana**"));
        assert!(first_only.ends_with("…and 1 more"));
    }

    #[test]
    fn test_revenue() {
        let records = vec![
            stored("Ana", "x", 600),
            stored("Bia", "y", 700),
        ];
        assert_eq!(revenue(&records), Decimal::new(1300, 2));
    }
}

//! CSV exports offered for download.

use crate::{core::reconcile::TotalsReport, errors::Result};
use csv::Writer;

/// File name of the per-item totals download.
pub const TOTALS_FILE_NAME: &str = "totais_doces.csv";
/// File name of the raw order records download.
pub const RECORDS_FILE_NAME: &str = "relatorio_pedidos.csv";

/// Header of the totals export.
pub const TOTALS_HEADERS: [&str; 2] = ["Doce", "Total de unidades pedido"];

/// Serializes a totals report: one row per catalog item, zero counts included.
///
/// # Errors
/// Returns a CSV or I/O error if serialization fails.
pub fn totals_csv(report: &TotalsReport) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(TOTALS_HEADERS)?;
    for row in report.rows() {
        writer.write_record([row.name.as_str(), &row.units.to_string()])?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::reconcile, test_utils::*};

    #[test]
    fn test_totals_csv_layout() -> Result<()> {
        let catalog = sample_catalog();
        let report = reconcile::reconcile(["Brigadeiro (unidade) (x3)"], &catalog);

        let bytes = totals_csv(&report)?;
        let text = String::from_utf8_lossy(&bytes);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Doce,Total de unidades pedido");
        assert_eq!(lines[1], "Brigadeiro (unidade),3");
        assert_eq!(lines[2], "Bem casado (unidade),0");
        assert_eq!(lines.len(), catalog.items().len() + 1);
        Ok(())
    }
}

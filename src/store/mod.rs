//! Flat CSV record store for submitted orders.
//!
//! The file has the columns `Nome`, `Pedidos`, `Total (R$)` and `Observação`. Appending
//! reads every existing row, adds the new one and rewrites the whole file. Existing rows
//! are carried over byte for byte, so a damaged row never blocks a new submission.
//!
//! There is no locking: the store assumes a single writer at a time.

use crate::{
    core::money,
    errors::{Error, Result},
};
use csv::{ByteRecord, ReaderBuilder, StringRecord, Writer, WriterBuilder};
use rust_decimal::Decimal;
use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

/// Column holding the customer name.
pub const COLUMN_NAME: &str = "Nome";
/// Column holding the encoded order text.
pub const COLUMN_ORDERS: &str = "Pedidos";
/// Column holding the two-decimal total.
pub const COLUMN_TOTAL: &str = "Total (R$)";
/// Column holding the free-text note.
pub const COLUMN_NOTE: &str = "Observação";

/// Header row written when the store is created.
pub const HEADERS: [&str; 4] = [COLUMN_NAME, COLUMN_ORDERS, COLUMN_TOTAL, COLUMN_NOTE];

/// One submitted order. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    /// Customer name as typed, trimmed
    pub customer_name: String,
    /// Encoded order text
    pub encoded_order: String,
    /// Total rounded to cents
    pub total: Decimal,
    /// Free-text note, possibly empty
    pub note: String,
}

impl OrderRecord {
    fn to_row(&self) -> [String; 4] {
        [
            self.customer_name.clone(),
            self.encoded_order.clone(),
            money::format_plain(self.total),
            self.note.clone(),
        ]
    }
}

/// Column positions resolved from the header row.
struct Columns {
    name: Option<usize>,
    orders: usize,
    total: Option<usize>,
    note: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == wanted)
        };

        let orders = find(COLUMN_ORDERS).ok_or_else(|| Error::MalformedStore {
            message: format!("missing '{COLUMN_ORDERS}' column"),
        })?;

        Ok(Self {
            name: find(COLUMN_NAME),
            orders,
            total: find(COLUMN_TOTAL),
            note: find(COLUMN_NOTE),
        })
    }
}

/// Handle to the CSV file holding every submitted order.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Creates a handle; the file itself is only created on the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether any order has been recorded since the last wipe.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Appends one record, rewriting the whole file.
    ///
    /// # Errors
    /// Returns an I/O or CSV error if the file cannot be read or written.
    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    pub fn append_record(&self, record: &OrderRecord) -> Result<()> {
        let mut rows = self.read_raw_rows()?;
        if rows.is_empty() {
            debug!("Creating order store with header row");
            rows.push(ByteRecord::from(HEADERS.to_vec()));
        }
        rows.push(ByteRecord::from(record.to_row().to_vec()));

        self.rewrite(|writer| {
            for row in &rows {
                writer.write_byte_record(row)?;
            }
            Ok(())
        })?;

        debug!("Order store now holds {} rows", rows.len() - 1);
        Ok(())
    }

    /// Reads every well-formed record. A missing file yields no records.
    ///
    /// Rows with a missing order text or an unparseable total are skipped with a warning.
    ///
    /// # Errors
    /// Returns `MalformedStore` if the header has no `Pedidos` column, or an I/O error if
    /// the file exists but cannot be opened.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read_all_records(&self) -> Result<Vec<OrderRecord>> {
        let mut records = Vec::new();
        self.for_each_row(|columns, row, line| {
            let Some(encoded_order) = row.get(columns.orders) else {
                warn!("Skipping row {line}: no '{COLUMN_ORDERS}' value");
                return;
            };

            let total = match columns.total.and_then(|i| row.get(i)).map(str::trim) {
                None | Some("") => {
                    warn!("Row {line} has no '{COLUMN_TOTAL}' value, reading it as zero");
                    Decimal::ZERO
                }
                Some(raw) => match Decimal::from_str(raw) {
                    Ok(total) => money::round_money(total),
                    Err(e) => {
                        warn!("Skipping row {line}: invalid total {raw:?}: {e}");
                        return;
                    }
                },
            };

            let field = |index: Option<usize>| {
                index
                    .and_then(|i| row.get(i))
                    .unwrap_or_default()
                    .to_string()
            };

            records.push(OrderRecord {
                customer_name: field(columns.name),
                encoded_order: encoded_order.to_string(),
                total,
                note: field(columns.note),
            });
        })?;
        Ok(records)
    }

    /// Reads only the `Pedidos` column, the one field the totals report trusts.
    ///
    /// # Errors
    /// Same as [`Self::read_all_records`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read_encoded_orders(&self) -> Result<Vec<String>> {
        let mut orders = Vec::new();
        self.for_each_row(|columns, row, line| match row.get(columns.orders) {
            Some(text) => orders.push(text.to_string()),
            None => warn!("Skipping row {line}: no '{COLUMN_ORDERS}' value"),
        })?;
        Ok(orders)
    }

    /// Deletes every record. Clearing a store that does not exist is a no-op.
    ///
    /// # Errors
    /// Returns an I/O error if the file exists but cannot be removed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn clear_all(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("All orders deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No order store to clear");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The raw file contents for download, `None` if nothing has been recorded.
    ///
    /// # Errors
    /// Returns an I/O error if the file exists but cannot be read.
    pub fn raw_bytes(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes a full replacement of the file next to it, then renames it into place.
    ///
    /// The store keeps its previous contents if `write_rows` or the rename fails.
    fn rewrite<F>(&self, write_rows: F) -> Result<()>
    where
        F: FnOnce(&mut Writer<&mut NamedTempFile>) -> Result<()>,
    {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir)?;
        {
            let mut writer = WriterBuilder::new().flexible(true).from_writer(&mut staged);
            write_rows(&mut writer)?;
            writer.flush()?;
        }
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn read_raw_rows(&self) -> Result<Vec<ByteRecord>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        reader
            .byte_records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    fn for_each_row<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&Columns, &StringRecord, u64),
    {
        if !self.exists() {
            debug!("No order store yet");
            return Ok(());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(());
        }
        let columns = Columns::resolve(&headers)?;

        for result in reader.records() {
            match result {
                Ok(row) => {
                    let line = row.position().map_or(0, csv::Position::line);
                    visit(&columns, &row, line);
                }
                Err(e) => warn!("Skipping unreadable order row: {e}"),
            }
        }
        Ok(())
    }
}

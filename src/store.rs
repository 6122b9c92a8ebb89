use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// A single table row: five string cells in column order.
pub type Row = Vec<String>;

/// Number of columns in both tables.
pub const TABLE_WIDTH: usize = 5;

/// Persistent two-dimensional labeled table.
///
/// The sync engine always drives a full clear / append_header / write_block
/// rewrite rather than targeted row updates, which keeps header and data
/// alignment trivial to reason about.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// All rows in order, header included. Empty if the table does not exist.
    async fn read_all(&self, table: &str) -> AppResult<Vec<Row>>;

    /// Remove every row, header included.
    async fn clear(&self, table: &str) -> AppResult<()>;

    /// Append the header row. The table is created if missing.
    async fn append_header(&self, table: &str, headers: &[&str]) -> AppResult<()>;

    /// Write `rows` starting at `start_row` (0 is the header row). The store
    /// rejects a block that does not land directly after the current rows.
    async fn write_block(&self, table: &str, start_row: usize, rows: &[Row]) -> AppResult<()>;
}

/// Table store backed by one CSV file per table under a data directory.
pub struct CsvTableStore {
    data_dir: PathBuf,
}

impl CsvTableStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> AppResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", table))
    }

    fn row_count(&self, table: &str) -> AppResult<usize> {
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(0);
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;
        let mut count = 0;
        for record in reader.records() {
            record?;
            count += 1;
        }
        Ok(count)
    }

    fn append_records(&self, table: &str, rows: &[Row]) -> AppResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.table_path(table))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl TableStore for CsvTableStore {
    async fn read_all(&self, table: &str) -> AppResult<Vec<Row>> {
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Row = record.iter().map(str::to_string).collect();
            // Short rows are tolerated on read and padded to full width.
            row.resize(TABLE_WIDTH, String::new());
            rows.push(row);
        }
        Ok(rows)
    }

    async fn clear(&self, table: &str) -> AppResult<()> {
        File::create(self.table_path(table))?;
        Ok(())
    }

    async fn append_header(&self, table: &str, headers: &[&str]) -> AppResult<()> {
        let header_row: Row = headers.iter().map(|h| h.to_string()).collect();
        self.append_records(table, std::slice::from_ref(&header_row))
    }

    async fn write_block(&self, table: &str, start_row: usize, rows: &[Row]) -> AppResult<()> {
        let current = self.row_count(table)?;
        if start_row != current {
            return Err(AppError::Store(format!(
                "write_block at row {} but table {} has {} rows",
                start_row, table, current
            )));
        }
        self.append_records(table, rows)
    }
}

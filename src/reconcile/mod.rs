pub mod orders;
pub mod refunds;

use crate::store::Row;

/// Column labels shared by the order and refund tables.
pub const TABLE_COLUMNS: &[&str] = &["Order ID", "Order Number", "Email", "Total Price", "Created At"];

/// Identifier cell of a data row.
pub(crate) fn row_id(row: &Row) -> &str {
    row.first().map(String::as_str).unwrap_or("")
}

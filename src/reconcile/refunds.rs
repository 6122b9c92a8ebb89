use std::collections::HashSet;

use crate::reconcile::row_id;
use crate::shopify::models::OrderRecord;
use crate::store::Row;

/// Merge freshly fetched refunds into the persisted refund rows.
///
/// Existing rows are never modified or removed. New refunds are appended in
/// fetch order, skipping identifiers already present; a duplicate within the
/// fetched batch itself is also dropped. Returns the merged rows and how many
/// were appended.
pub fn merge_refunds(existing: Vec<Row>, fetched: &[OrderRecord]) -> (Vec<Row>, usize) {
    let mut seen: HashSet<String> = existing.iter().map(|r| row_id(r).to_string()).collect();

    let mut rows = existing;
    let mut appended = 0;
    for refund in fetched {
        if seen.insert(refund.id.clone()) {
            rows.push(refund.to_row());
            appended += 1;
        }
    }
    (rows, appended)
}

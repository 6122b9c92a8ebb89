use std::collections::HashSet;

use crate::reconcile::row_id;
use crate::shopify::models::OrderRecord;
use crate::store::Row;

/// Outcome of an order merge pass.
#[derive(Debug, Clone)]
pub struct OrderMerge {
    pub rows: Vec<Row>,
    pub purged: usize,
    pub appended: usize,
}

/// Merge freshly fetched orders into the persisted order rows.
///
/// Refunded identifiers win over order presence: every existing row whose
/// identifier is in `refunded_ids` is purged, and no fetched order with a
/// refunded identifier is appended. Retained rows keep their order; new
/// orders are appended in fetch order, deduped against the retained set.
pub fn merge_orders(
    existing: Vec<Row>,
    fetched: &[OrderRecord],
    refunded_ids: &HashSet<String>,
) -> OrderMerge {
    let before = existing.len();
    let mut rows: Vec<Row> = existing
        .into_iter()
        .filter(|r| !refunded_ids.contains(row_id(r)))
        .collect();
    let purged = before - rows.len();

    let mut retained: HashSet<String> = rows.iter().map(|r| row_id(r).to_string()).collect();

    let mut appended = 0;
    for order in fetched {
        if refunded_ids.contains(&order.id) || !retained.insert(order.id.clone()) {
            continue;
        }
        rows.push(order.to_row());
        appended += 1;
    }

    OrderMerge {
        rows,
        purged,
        appended,
    }
}

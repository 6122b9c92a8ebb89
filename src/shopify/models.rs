use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::store::Row;

/// A single order (or refunded order) as returned by the Admin API.
///
/// Only the identifier is required. Every other field may be absent from the
/// payload and becomes an empty table cell when the record is written out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier, normalized to a string at the deserialization edge.
    /// The API sends a JSON number while persisted cells are strings, so all
    /// identifier comparison happens on the string form.
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub order_number: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    /// RFC 3339 timestamp as sent by the API, written through verbatim.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl OrderRecord {
    /// Render the record as a table row, empty cells for missing fields.
    pub fn to_row(&self) -> Row {
        vec![
            self.id.clone(),
            self.order_number.map(|n| n.to_string()).unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            self.total_price.map(|p| p.to_string()).unwrap_or_default(),
            self.created_at.clone().unwrap_or_default(),
        ]
    }
}

/// Top-level response body of `orders.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderRecord>,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Num(u64),
        Str(String),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Num(n) => n.to_string(),
        IdRepr::Str(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_numeric_id_is_normalized_to_string() {
        let record: OrderRecord = serde_json::from_value(json!({
            "id": 450789469,
            "order_number": 1001,
            "email": "bob@example.com",
            "total_price": "199.65",
            "created_at": "2023-07-05T12:00:00-04:00"
        }))
        .unwrap();

        assert_eq!(record.id, "450789469");
        assert_eq!(record.order_number, Some(1001));
        assert_eq!(record.total_price, Some(dec!(199.65)));
    }

    #[test]
    fn test_string_id_passes_through() {
        let record: OrderRecord =
            serde_json::from_value(json!({ "id": "450789469" })).unwrap();
        assert_eq!(record.id, "450789469");
    }

    #[test]
    fn test_missing_fields_become_empty_cells() {
        let record: OrderRecord = serde_json::from_value(json!({ "id": 7 })).unwrap();
        assert_eq!(record.to_row(), vec!["7", "", "", "", ""]);
    }

    #[test]
    fn test_full_record_to_row() {
        let record: OrderRecord = serde_json::from_value(json!({
            "id": 100,
            "order_number": 1002,
            "email": "alice@example.com",
            "total_price": "10.00",
            "created_at": "2023-07-06T09:30:00-04:00"
        }))
        .unwrap();

        assert_eq!(
            record.to_row(),
            vec![
                "100",
                "1002",
                "alice@example.com",
                "10.00",
                "2023-07-06T09:30:00-04:00"
            ]
        );
    }

    #[test]
    fn test_orders_response_envelope() {
        let response: OrdersResponse = serde_json::from_value(json!({
            "orders": [{ "id": 1 }, { "id": 2 }]
        }))
        .unwrap();
        assert_eq!(response.orders.len(), 2);
    }
}

pub mod client;
pub mod models;

pub use client::{OrderSource, ShopifyClient};
pub use models::{OrderRecord, OrdersResponse};

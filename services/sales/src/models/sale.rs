//! Sale model

use serde::{Deserialize, Serialize};

/// A single sale record. `amount` arrives precomputed; no validation beyond
/// the presence of an identifier for mutation is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    /// Empty on creation; assigned by the store
    #[serde(default)]
    pub id: String,
    pub article: String,
    pub price_for_one: f64,
    pub number_of_units: i64,
    pub amount: f64,
    pub date: String,
    pub seller_id: String,
}

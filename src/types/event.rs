use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct PageView {
    pub url: String,
    pub title: Option<String>,
    pub referrer: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct StructuredEvent {
    pub category: String,
    pub action: String,
    pub label: Option<String>,
    pub property: Option<String>,
    pub value: Option<String>,
}

/// A custom event described by free-form JSON.
///
/// `vendor` and `name` describe the event to the caller only, neither is
/// written to the payload.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct UnstructuredEvent {
    pub vendor: String,
    pub name: String,
    pub properties: Value,
}

/// A single line item of an e-commerce transaction.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct EcommerceItem {
    pub order_id: String,
    pub sku: String,
    pub price: String,
    pub quantity: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub currency: Option<String>,
    /// Transaction id to correlate with, generated when absent.
    pub transaction_id: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct EcommerceTransaction {
    pub order_id: String,
    pub total_value: String,
    pub affiliation: Option<String>,
    pub tax_value: Option<String>,
    pub shipping: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
}

//! Wire keys understood by the collector.

/// Event kind discriminator.
pub const EVENT: &str = "e";
/// Event timestamp, epoch milliseconds.
pub const TIMESTAMP: &str = "dtm";
/// Transaction id used to correlate e-commerce events.
pub const TRANSACTION_ID: &str = "tid";
pub const EVENT_VENDOR: &str = "evn";

// Standard name/value pairs
pub const PLATFORM: &str = "p";
pub const TRACKER_VERSION: &str = "tv";
pub const NAMESPACE: &str = "tna";
pub const APP_ID: &str = "aid";

// Page view
pub const PAGE_URL: &str = "url";
pub const PAGE_TITLE: &str = "page";
pub const PAGE_REFERRER: &str = "refr";

// Structured event
pub const SE_CATEGORY: &str = "se_ca";
pub const SE_ACTION: &str = "se_ac";
pub const SE_LABEL: &str = "se_la";
pub const SE_PROPERTY: &str = "se_pr";
pub const SE_VALUE: &str = "se_va";

// Unstructured event payload
pub const UNSTRUCTURED_ENCODED: &str = "ue_px";
pub const UNSTRUCTURED: &str = "ue_pr";

// Context
pub const CONTEXT_ENCODED: &str = "cx";
pub const CONTEXT: &str = "co";

// E-commerce item
pub const TI_ORDER_ID: &str = "ti_id";
pub const TI_SKU: &str = "ti_sk";
pub const TI_NAME: &str = "ti_nm";
pub const TI_CATEGORY: &str = "ti_ca";
pub const TI_PRICE: &str = "ti_pr";
pub const TI_QUANTITY: &str = "ti_qu";
pub const TI_CURRENCY: &str = "ti_cu";

// E-commerce transaction
pub const TR_ORDER_ID: &str = "tr_id";
pub const TR_TOTAL: &str = "tr_tt";
pub const TR_AFFILIATION: &str = "tr_af";
pub const TR_TAX: &str = "tr_tx";
pub const TR_SHIPPING: &str = "tr_sh";
pub const TR_CITY: &str = "tr_ci";
pub const TR_STATE: &str = "tr_st";
pub const TR_COUNTRY: &str = "tr_co";
pub const TR_CURRENCY: &str = "tr_cu";

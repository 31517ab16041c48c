use crate::error::Error;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use event::{
    EcommerceItem, EcommerceTransaction, PageView, StructuredEvent, UnstructuredEvent,
};
pub use map::OrderedMap;

pub mod event;
pub mod keys;
pub mod map;

/// Query-string parameters of a single event.
pub type Parameters = OrderedMap<String>;

/// Named boolean switches read back by the tracking operations.
pub type Configurations = OrderedMap<bool>;

/// Vendor stamped under [`keys::EVENT_VENDOR`] on every event kind except
/// [`EventKind::UnstructuredEvent`].
pub const DEFAULT_VENDOR: &str = "com.snowplowanalytics";

/// Inclusive bounds of a generated transaction id.
pub const TRANSACTION_ID_MIN: u32 = 100_000;
pub const TRANSACTION_ID_MAX: u32 = 999_999;

/// The event discriminator, written under [`keys::EVENT`].
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize,
)]
pub enum EventKind {
    #[display("pv")]
    #[serde(rename = "pv")]
    PageView,
    #[display("se")]
    #[serde(rename = "se")]
    StructuredEvent,
    #[display("ue")]
    #[serde(rename = "ue")]
    UnstructuredEvent,
    #[display("ti")]
    #[serde(rename = "ti")]
    EcommerceItem,
    #[display("tr")]
    #[serde(rename = "tr")]
    EcommerceTransaction,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        Self::PageView,
        Self::StructuredEvent,
        Self::UnstructuredEvent,
        Self::EcommerceItem,
        Self::EcommerceTransaction,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::PageView => "pv",
            Self::StructuredEvent => "se",
            Self::UnstructuredEvent => "ue",
            Self::EcommerceItem => "ti",
            Self::EcommerceTransaction => "tr",
        }
    }

    /// Whether this kind is stamped with [`DEFAULT_VENDOR`].
    pub fn has_vendor(&self) -> bool {
        !matches!(self, Self::UnstructuredEvent)
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == s)
            .ok_or_else(|| Error::UnknownEventKind(s.to_owned()))
    }
}

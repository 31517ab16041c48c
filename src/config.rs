use crate::{error::Error, types::OrderedMap};
use serde::{Deserialize, Serialize};

/// Configuration flag controlling whether embedded JSON is Base64 encoded.
pub const ENCODE_BASE64: &str = "encode_base64";

/// Character set applied to serialized JSON before it is Base64 encoded.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Deserialize, Serialize,
)]
pub enum Charset {
    /// Bytes are encoded exactly as serialized.
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// Strict 7-bit ASCII, non-ASCII payloads are rejected.
    #[serde(rename = "us-ascii", alias = "ascii")]
    UsAscii,
}

impl Charset {
    /// Return the bytes of `s` under this charset, or the byte offset of the
    /// first character it cannot represent.
    pub(crate) fn bytes<'a>(&self, s: &'a str) -> Result<&'a [u8], usize> {
        match self {
            Self::Utf8 => Ok(s.as_bytes()),
            Self::UsAscii => match s.bytes().position(|b| !b.is_ascii()) {
                Some(pos) => Err(pos),
                None => Ok(s.as_bytes()),
            },
        }
    }
}

/// The tracker configuration object.
///
/// Supplies the standard name/value pairs stamped on every event and the
/// initial configuration flags of a [`PayloadMap`](crate::PayloadMap).
/// This can be constructed from a yaml document:
///
/// ```yaml
/// platform: pc
/// namespace: web
/// app-id: shop
/// encode-base64: false
/// flags:
///   beta: true
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Platform the events originate from (`p`).
    pub platform: String,
    /// Tracker version (`tv`).
    #[serde(default = "default_tracker_version")]
    pub tracker_version: String,
    /// Tracker namespace (`tna`).
    pub namespace: String,
    /// Application id (`aid`).
    pub app_id: String,
    /// Whether context and unstructured payloads are Base64 encoded.
    #[serde(default = "default_encode_base64")]
    pub encode_base64: bool,
    /// Character set used for the Base64 step.
    #[serde(default)]
    pub charset: Charset,
    /// Additional boolean configurations, in document order.
    #[serde(default)]
    pub flags: OrderedMap<bool>,
}

impl Config {
    pub fn new<P, N, A>(platform: P, namespace: N, app_id: A) -> Self
    where
        P: Into<String>,
        N: Into<String>,
        A: Into<String>,
    {
        Self {
            platform: platform.into(),
            tracker_version: default_tracker_version(),
            namespace: namespace.into(),
            app_id: app_id.into(),
            encode_base64: default_encode_base64(),
            charset: Charset::default(),
            flags: OrderedMap::new(),
        }
    }

    pub fn from_yaml(s: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(s)?)
    }
}

fn default_tracker_version() -> String {
    format!("rust-{}", env!("CARGO_PKG_VERSION"))
}

const fn default_encode_base64() -> bool {
    true
}

use crate::{
    config::{Charset, Config, ENCODE_BASE64},
    error::Error,
    types::{
        keys, Configurations, EcommerceItem, EcommerceTransaction, EventKind, PageView,
        Parameters, StructuredEvent, UnstructuredEvent, DEFAULT_VENDOR, TRANSACTION_ID_MAX,
        TRANSACTION_ID_MIN,
    },
};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

pub use self::encode::decode_base64;

mod encode;

/// A serialized JSON payload and the key it is written under.
type Embedded = (&'static str, String);

/// Accumulates the parameters and configuration flags of one outbound event.
///
/// All operations mutate the builder in place and hand back `&mut Self` for
/// chaining. Clone it explicitly to get an independent copy.
///
/// A builder is meant to be owned by a single event path, it does no
/// internal locking.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct PayloadMap {
    parameters: Parameters,
    configurations: Configurations,
    charset: Charset,
}

impl PayloadMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(parameters: Parameters, configurations: Configurations) -> Self {
        Self {
            parameters,
            configurations,
            charset: Charset::default(),
        }
    }

    /// Create a builder carrying the standard name/value pairs and
    /// configuration flags of `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        let mut map = Self::new();
        map.set_charset(cfg.charset)
            .add_standard_nv_pairs(
                &cfg.platform,
                &cfg.tracker_version,
                &cfg.namespace,
                &cfg.app_id,
            )
            .add_config(ENCODE_BASE64, cfg.encode_base64);
        for (name, value) in cfg.flags.iter() {
            map.add_config(name, *value);
        }
        map
    }

    pub fn into_parts(self) -> (Parameters, Configurations) {
        (self.parameters, self.configurations)
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn set_charset(&mut self, charset: Charset) -> &mut Self {
        self.charset = charset;
        self
    }

    /// Store a freshly generated transaction id under `tid`.
    pub fn set_transaction_id(&mut self) -> &mut Self {
        let tid = generate_transaction_id();
        debug!(%tid, "Generated transaction id");
        self.add(keys::TRANSACTION_ID, tid)
    }

    /// Store the event timestamp under `dtm`.
    ///
    /// `None` or zero stamps the current time in epoch milliseconds.
    pub fn set_timestamp<T: Into<Option<f64>>>(&mut self, timestamp: T) -> &mut Self {
        let dtm = match timestamp.into() {
            Some(t) if t != 0.0 => encode::timestamp(t),
            _ => chrono::Utc::now().timestamp_millis().to_string(),
        };
        self.add(keys::TIMESTAMP, dtm)
    }

    pub fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.parameters.insert(key, value.into());
        self
    }

    /// Embed an unstructured event payload under `ue_px` (encoded) or `ue_pr`.
    ///
    /// An absent or JSON `null` payload leaves the builder untouched.
    pub fn add_unstructured<T: Serialize + ?Sized>(
        &mut self,
        payload: Option<&T>,
        encode_base64: bool,
    ) -> Result<&mut Self, Error> {
        self.embed_json(
            payload,
            encode_base64,
            keys::UNSTRUCTURED_ENCODED,
            keys::UNSTRUCTURED,
        )
    }

    /// Embed a context payload under `cx` (encoded) or `co`.
    ///
    /// An absent or JSON `null` payload leaves the builder untouched.
    pub fn add_json<T: Serialize + ?Sized>(
        &mut self,
        payload: Option<&T>,
        encode_base64: bool,
    ) -> Result<&mut Self, Error> {
        self.embed_json(
            payload,
            encode_base64,
            keys::CONTEXT_ENCODED,
            keys::CONTEXT,
        )
    }

    pub fn add_standard_nv_pairs(
        &mut self,
        platform: &str,
        tracker_version: &str,
        namespace: &str,
        app_id: &str,
    ) -> &mut Self {
        self.add(keys::PLATFORM, platform)
            .add(keys::TRACKER_VERSION, tracker_version)
            .add(keys::NAMESPACE, namespace)
            .add(keys::APP_ID, app_id)
    }

    pub fn add_config<K: Into<String>>(&mut self, name: K, value: bool) -> &mut Self {
        self.configurations.insert(name, value);
        self
    }

    pub fn track_page_view(
        &mut self,
        page: &PageView,
        context: Option<&Value>,
        timestamp: Option<f64>,
    ) -> Result<&mut Self, Error> {
        let context = self.prepare_context(context)?;
        Ok(self
            .stamp(EventKind::PageView)
            .add(keys::PAGE_URL, page.url.as_str())
            .add_opt(keys::PAGE_TITLE, page.title.as_deref())
            .add_opt(keys::PAGE_REFERRER, page.referrer.as_deref())
            .finish(EventKind::PageView, context, timestamp))
    }

    pub fn track_structured_event(
        &mut self,
        event: &StructuredEvent,
        context: Option<&Value>,
        timestamp: Option<f64>,
    ) -> Result<&mut Self, Error> {
        let context = self.prepare_context(context)?;
        Ok(self
            .stamp(EventKind::StructuredEvent)
            .add(keys::SE_CATEGORY, event.category.as_str())
            .add(keys::SE_ACTION, event.action.as_str())
            .add_opt(keys::SE_LABEL, event.label.as_deref())
            .add_opt(keys::SE_PROPERTY, event.property.as_deref())
            .add_opt(keys::SE_VALUE, event.value.as_deref())
            .finish(EventKind::StructuredEvent, context, timestamp))
    }

    /// Track a custom event. Requires the [`ENCODE_BASE64`] configuration
    /// even when no context is attached.
    pub fn track_unstructured_event(
        &mut self,
        event: &UnstructuredEvent,
        context: Option<&Value>,
        timestamp: Option<f64>,
    ) -> Result<&mut Self, Error> {
        trace!(vendor = %event.vendor, event_name = %event.name, "Unstructured event");
        let encode_base64 = self.config(ENCODE_BASE64)?;
        let properties = self.prepare_json(
            Some(&event.properties),
            encode_base64,
            keys::UNSTRUCTURED_ENCODED,
            keys::UNSTRUCTURED,
        )?;
        let context = self.prepare_context(context)?;
        Ok(self
            .stamp(EventKind::UnstructuredEvent)
            .set_timestamp(timestamp)
            .add_embedded(properties)
            .add_embedded(context))
    }

    /// Track one line item. The item's transaction id is kept when given,
    /// otherwise a new one is generated.
    pub fn track_ecommerce_transaction_item(
        &mut self,
        item: &EcommerceItem,
        context: Option<&Value>,
        timestamp: Option<f64>,
    ) -> Result<&mut Self, Error> {
        let context = self.prepare_context(context)?;
        self.stamp(EventKind::EcommerceItem);
        match item.transaction_id.as_deref() {
            Some(tid) => self.add(keys::TRANSACTION_ID, tid),
            None => self.set_transaction_id(),
        };
        Ok(self
            .add(keys::TI_ORDER_ID, item.order_id.as_str())
            .add(keys::TI_SKU, item.sku.as_str())
            .add_opt(keys::TI_NAME, item.name.as_deref())
            .add_opt(keys::TI_CATEGORY, item.category.as_deref())
            .add(keys::TI_PRICE, item.price.as_str())
            .add(keys::TI_QUANTITY, item.quantity.as_str())
            .add_opt(keys::TI_CURRENCY, item.currency.as_deref())
            .finish(EventKind::EcommerceItem, context, timestamp))
    }

    /// Track a whole transaction. A new transaction id is always generated,
    /// the order id is carried separately under `tr_id`.
    pub fn track_ecommerce_transaction(
        &mut self,
        transaction: &EcommerceTransaction,
        context: Option<&Value>,
        timestamp: Option<f64>,
    ) -> Result<&mut Self, Error> {
        let context = self.prepare_context(context)?;
        Ok(self
            .set_transaction_id()
            .stamp(EventKind::EcommerceTransaction)
            .add(keys::TR_ORDER_ID, transaction.order_id.as_str())
            .add(keys::TR_TOTAL, transaction.total_value.as_str())
            .add_opt(keys::TR_AFFILIATION, transaction.affiliation.as_deref())
            .add_opt(keys::TR_TAX, transaction.tax_value.as_deref())
            .add_opt(keys::TR_SHIPPING, transaction.shipping.as_deref())
            .add_opt(keys::TR_CITY, transaction.city.as_deref())
            .add_opt(keys::TR_STATE, transaction.state.as_deref())
            .add_opt(keys::TR_COUNTRY, transaction.country.as_deref())
            .add_opt(keys::TR_CURRENCY, transaction.currency.as_deref())
            .finish(EventKind::EcommerceTransaction, context, timestamp))
    }

    /// Parameter keys in insertion order.
    pub fn param_keys(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys()
    }

    /// Configuration names in insertion order.
    pub fn config_keys(&self) -> impl Iterator<Item = &str> {
        self.configurations.keys()
    }

    pub fn param(&self, key: &str) -> Result<&str, Error> {
        self.parameters
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::key_not_found(key))
    }

    pub fn config(&self, name: &str) -> Result<bool, Error> {
        self.configurations
            .get(name)
            .copied()
            .ok_or_else(|| Error::missing_config(name))
    }

    pub fn params(&self) -> &Parameters {
        &self.parameters
    }

    pub fn configs(&self) -> &Configurations {
        &self.configurations
    }

    fn stamp(&mut self, kind: EventKind) -> &mut Self {
        debug!(%kind, "Tracking event");
        self.add(keys::EVENT, kind.code())
    }

    /// Set `key` when a value is present, drop it otherwise.
    fn add_opt(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) => self.add(key, v),
            None => {
                self.parameters.remove(key);
                self
            }
        }
    }

    fn finish(
        &mut self,
        kind: EventKind,
        context: Option<Embedded>,
        timestamp: Option<f64>,
    ) -> &mut Self {
        if kind.has_vendor() {
            self.add(keys::EVENT_VENDOR, DEFAULT_VENDOR);
        }
        self.set_timestamp(timestamp).add_embedded(context)
    }

    /// Prepare `context` under the [`ENCODE_BASE64`] configuration. The flag
    /// is only read when a context is present.
    fn prepare_context(&self, context: Option<&Value>) -> Result<Option<Embedded>, Error> {
        match context {
            Some(ctx) => {
                let encode_base64 = self.config(ENCODE_BASE64)?;
                self.prepare_json(
                    Some(ctx),
                    encode_base64,
                    keys::CONTEXT_ENCODED,
                    keys::CONTEXT,
                )
            }
            None => Ok(None),
        }
    }

    /// Serialize and encode `payload` without writing anything.
    fn prepare_json<T: Serialize + ?Sized>(
        &self,
        payload: Option<&T>,
        encode_base64: bool,
        encoded_key: &'static str,
        raw_key: &'static str,
    ) -> Result<Option<Embedded>, Error> {
        let Some(json) = payload.map(encode::to_json).transpose()?.flatten() else {
            return Ok(None);
        };
        let embedded = if encode_base64 {
            (encoded_key, encode::base64(&json, self.charset, encoded_key)?)
        } else {
            (raw_key, json)
        };
        Ok(Some(embedded))
    }

    fn add_embedded(&mut self, embedded: Option<Embedded>) -> &mut Self {
        if let Some((key, value)) = embedded {
            trace!(key, len = value.len(), "Embedded JSON payload");
            self.add(key, value);
        }
        self
    }

    fn embed_json<T: Serialize + ?Sized>(
        &mut self,
        payload: Option<&T>,
        encode_base64: bool,
        encoded_key: &'static str,
        raw_key: &'static str,
    ) -> Result<&mut Self, Error> {
        let embedded = self.prepare_json(payload, encode_base64, encoded_key, raw_key)?;
        Ok(self.add_embedded(embedded))
    }
}

impl fmt::Display for PayloadMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parameters: {}\nConfigurations: {}",
            self.parameters, self.configurations
        )
    }
}

/// A 6-digit decimal correlation token, not globally unique.
pub fn generate_transaction_id() -> String {
    rand::rng()
        .random_range(TRANSACTION_ID_MIN..=TRANSACTION_ID_MAX)
        .to_string()
}

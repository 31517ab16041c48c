use pretty_assertions::assert_eq;
use regex::Regex;
use serde_json::json;
use snowplow_payload::*;
use test_log::test;

fn params(p: &PayloadMap) -> Vec<(&str, &str)> {
    p.params().iter().map(|(k, v)| (k, v.as_str())).collect()
}

fn configured(encode_base64: bool) -> PayloadMap {
    let mut p = PayloadMap::new();
    p.add_config(ENCODE_BASE64, encode_base64);
    p
}

fn tid_pattern() -> Regex {
    Regex::new(r"^[1-9][0-9]{5}$").unwrap()
}

fn page() -> PageView {
    PageView {
        url: "http://x".to_owned(),
        title: Some("T".to_owned()),
        referrer: Some("http://y".to_owned()),
    }
}

fn structured() -> StructuredEvent {
    StructuredEvent {
        category: "shop".to_owned(),
        action: "add-to-basket".to_owned(),
        label: Some("red-hat".to_owned()),
        property: Some("colour".to_owned()),
        value: Some("2".to_owned()),
    }
}

fn unstructured() -> UnstructuredEvent {
    UnstructuredEvent {
        vendor: "com.acme".to_owned(),
        name: "viewed_product".to_owned(),
        properties: json!({"product_id": "ASO01043", "price": 49.95}),
    }
}

fn item(transaction_id: Option<&str>) -> EcommerceItem {
    EcommerceItem {
        order_id: "order-1".to_owned(),
        sku: "ASO01043".to_owned(),
        price: "49.95".to_owned(),
        quantity: "1".to_owned(),
        name: Some("Red hat".to_owned()),
        category: Some("hats".to_owned()),
        currency: Some("GBP".to_owned()),
        transaction_id: transaction_id.map(str::to_owned),
    }
}

fn transaction() -> EcommerceTransaction {
    EcommerceTransaction {
        order_id: "order-1".to_owned(),
        total_value: "54.95".to_owned(),
        affiliation: Some("web".to_owned()),
        tax_value: Some("9.16".to_owned()),
        shipping: Some("5.00".to_owned()),
        city: Some("London".to_owned()),
        state: None,
        country: Some("UK".to_owned()),
        currency: Some("GBP".to_owned()),
    }
}

#[test]
fn page_view() {
    let mut p = PayloadMap::new();
    p.track_page_view(&page(), None, Some(1000.0)).unwrap();

    assert_eq!(
        params(&p),
        vec![
            ("e", "pv"),
            ("url", "http://x"),
            ("page", "T"),
            ("refr", "http://y"),
            ("evn", DEFAULT_VENDOR),
            ("dtm", "1000"),
        ]
    );
}

#[test]
fn page_view_drops_absent_optionals() {
    let mut p = PayloadMap::new();
    p.add("page", "stale");
    let pv = PageView {
        url: "http://x".to_owned(),
        ..Default::default()
    };
    p.track_page_view(&pv, None, Some(1000.0)).unwrap();

    assert!(p.param("page").is_err());
    assert!(p.param("refr").is_err());
    assert_eq!(p.param("url").unwrap(), "http://x");
}

#[test]
fn structured_event_with_raw_context() {
    let ctx = json!({"user": "alice"});
    let mut p = configured(false);
    p.track_structured_event(&structured(), Some(&ctx), Some(2000.0))
        .unwrap();

    assert_eq!(
        params(&p),
        vec![
            ("e", "se"),
            ("se_ca", "shop"),
            ("se_ac", "add-to-basket"),
            ("se_la", "red-hat"),
            ("se_pr", "colour"),
            ("se_va", "2"),
            ("evn", DEFAULT_VENDOR),
            ("dtm", "2000"),
            ("co", r#"{"user":"alice"}"#),
        ]
    );
}

#[test]
fn structured_event_with_encoded_context() {
    let ctx = json!({"user": "alice"});
    let mut p = configured(true);
    p.track_structured_event(&structured(), Some(&ctx), Some(2000.0))
        .unwrap();

    assert!(p.param("co").is_err());
    assert_eq!(
        decode_base64(p.param("cx").unwrap()).unwrap(),
        r#"{"user":"alice"}"#
    );
}

#[test]
fn context_requires_encode_flag() {
    let ctx = json!({"user": "alice"});
    let mut p = PayloadMap::new();

    // No context, no flag needed
    p.track_page_view(&page(), None, Some(1000.0)).unwrap();

    assert!(matches!(
        p.track_page_view(&page(), Some(&ctx), Some(1000.0)),
        Err(Error::MissingConfig(k)) if k == ENCODE_BASE64
    ));
    assert!(p.param("cx").is_err());
    assert!(p.param("co").is_err());
}

#[test]
fn failed_track_leaves_payload_untouched() {
    let ctx = json!({"user": "alice"});
    let mut p = PayloadMap::new();
    p.add("aid", "shop");
    let before = p.clone();

    assert!(matches!(
        p.track_page_view(&page(), Some(&ctx), Some(1000.0)),
        Err(Error::MissingConfig(_))
    ));
    assert_eq!(p, before);

    assert!(matches!(
        p.track_unstructured_event(&unstructured(), None, Some(3000.0)),
        Err(Error::MissingConfig(_))
    ));
    assert_eq!(p, before);
}

#[test]
fn non_ascii_context_fails_tracking() {
    let ctx = json!({"user": "zoë"});
    let mut p = configured(true);
    p.set_charset(Charset::UsAscii);
    let before = p.clone();

    let err = p
        .track_structured_event(&structured(), Some(&ctx), Some(2000.0))
        .unwrap_err();
    assert!(matches!(err, Error::Encoding { key: "cx", position: 11 }));
    assert_eq!(p, before);

    let ev = UnstructuredEvent {
        properties: json!({"name": "café"}),
        ..unstructured()
    };
    assert!(matches!(
        p.track_unstructured_event(&ev, None, Some(3000.0)),
        Err(Error::Encoding { key: "ue_px", .. })
    ));
    assert_eq!(p, before);

    // Same payloads are fine once the charset allows them
    p.set_charset(Charset::Utf8);
    p.track_structured_event(&structured(), Some(&ctx), Some(2000.0))
        .unwrap();
    assert_eq!(decode_base64(p.param("cx").unwrap()).unwrap(), r#"{"user":"zoë"}"#);
}

#[test]
fn unstructured_event() {
    let ev = unstructured();
    let mut p = configured(false);
    p.track_unstructured_event(&ev, None, Some(3000.0)).unwrap();

    let ue_pr = serde_json::to_string(&ev.properties).unwrap();
    assert_eq!(
        params(&p),
        vec![("e", "ue"), ("dtm", "3000"), ("ue_pr", ue_pr.as_str())]
    );
}

#[test]
fn unstructured_event_encoded_with_context() {
    let ev = unstructured();
    let ctx = json!([{"page": "product"}]);
    let mut p = configured(true);
    p.track_unstructured_event(&ev, Some(&ctx), Some(3000.0))
        .unwrap();

    assert_eq!(
        p.param_keys().collect::<Vec<_>>(),
        vec!["e", "dtm", "ue_px", "cx"]
    );
    assert_eq!(
        decode_base64(p.param("ue_px").unwrap()).unwrap(),
        serde_json::to_string(&ev.properties).unwrap()
    );
    assert_eq!(
        decode_base64(p.param("cx").unwrap()).unwrap(),
        r#"[{"page":"product"}]"#
    );
    assert!(p.param("evn").is_err());
}

#[test]
fn unstructured_event_requires_encode_flag() {
    let mut p = PayloadMap::new();
    assert!(matches!(
        p.track_unstructured_event(&unstructured(), None, Some(3000.0)),
        Err(Error::MissingConfig(_))
    ));
}

#[test]
fn transaction_ids() {
    let re = tid_pattern();
    for _ in 0..1000 {
        let tid = generate_transaction_id();
        assert!(re.is_match(&tid), "{tid}");
        let n: u32 = tid.parse().unwrap();
        assert!((TRANSACTION_ID_MIN..=TRANSACTION_ID_MAX).contains(&n));
    }

    let mut p = PayloadMap::new();
    p.set_transaction_id();
    assert!(re.is_match(p.param("tid").unwrap()));
}

#[test]
fn item_keeps_given_transaction_id() {
    let mut p = PayloadMap::new();
    p.track_ecommerce_transaction_item(&item(Some("abc-42")), None, Some(4000.0))
        .unwrap();

    assert_eq!(
        params(&p),
        vec![
            ("e", "ti"),
            ("tid", "abc-42"),
            ("ti_id", "order-1"),
            ("ti_sk", "ASO01043"),
            ("ti_nm", "Red hat"),
            ("ti_ca", "hats"),
            ("ti_pr", "49.95"),
            ("ti_qu", "1"),
            ("ti_cu", "GBP"),
            ("evn", DEFAULT_VENDOR),
            ("dtm", "4000"),
        ]
    );
}

#[test]
fn item_generates_missing_transaction_id() {
    let mut p = PayloadMap::new();
    p.track_ecommerce_transaction_item(&item(None), None, Some(4000.0))
        .unwrap();
    assert!(tid_pattern().is_match(p.param("tid").unwrap()));
}

#[test]
fn transaction_always_regenerates_transaction_id() {
    let mut p = PayloadMap::new();
    p.add("tid", "abc-42");
    p.track_ecommerce_transaction(&transaction(), None, Some(5000.0))
        .unwrap();

    let tid = p.param("tid").unwrap();
    assert!(tid_pattern().is_match(tid));
    assert_eq!(p.param("tr_id").unwrap(), "order-1");

    let rest: Vec<_> = params(&p).into_iter().filter(|(k, _)| *k != "tid").collect();
    assert_eq!(
        rest,
        vec![
            ("e", "tr"),
            ("tr_id", "order-1"),
            ("tr_tt", "54.95"),
            ("tr_af", "web"),
            ("tr_tx", "9.16"),
            ("tr_sh", "5.00"),
            ("tr_ci", "London"),
            ("tr_co", "UK"),
            ("tr_cu", "GBP"),
            ("evn", DEFAULT_VENDOR),
            ("dtm", "5000"),
        ]
    );
}

#[test]
fn discriminators() {
    let mut p = configured(true);
    p.track_page_view(&page(), None, None).unwrap();
    assert_eq!(p.param("e").unwrap(), EventKind::PageView.code());

    p.track_structured_event(&structured(), None, None).unwrap();
    assert_eq!(p.param("e").unwrap(), "se");

    p.track_unstructured_event(&unstructured(), None, None)
        .unwrap();
    assert_eq!(p.param("e").unwrap(), "ue");

    p.track_ecommerce_transaction_item(&item(None), None, None)
        .unwrap();
    assert_eq!(p.param("e").unwrap(), "ti");

    p.track_ecommerce_transaction(&transaction(), None, None)
        .unwrap();
    assert_eq!(p.param("e").unwrap(), "tr");
    assert_eq!(
        p.param("e").unwrap().parse::<EventKind>().unwrap(),
        EventKind::EcommerceTransaction
    );
}

#[test]
fn tracked_on_top_of_config() {
    let mut cfg = Config::new("pc", "web", "shop");
    cfg.encode_base64 = false;
    let ctx = json!({"a": 1});

    let mut p = PayloadMap::from_config(&cfg);
    p.track_page_view(&page(), Some(&ctx), Some(1000.0)).unwrap();

    assert_eq!(
        p.param_keys().collect::<Vec<_>>(),
        vec!["p", "tv", "tna", "aid", "e", "url", "page", "refr", "evn", "dtm", "co"]
    );
    assert_eq!(p.param("co").unwrap(), r#"{"a":1}"#);
}

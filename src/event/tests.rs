use super::*;
use serde_json::json;

const TS: i64 = 1707668400000; // 2024-02-11 16:20:00 UTC

fn event_with(event_type: &str, extra: Value) -> Value {
    let mut event = json!({
        "timestamp": TS.to_string(),
        "event_type": event_type,
        "session_id": "sess-42",
    });
    if let (Some(target), Value::Object(fields)) = (event.as_object_mut(), extra) {
        target.extend(fields);
    }
    event
}

fn valid_fields(kind: EventKind) -> Value {
    match kind {
        EventKind::Home | EventKind::Land => json!({}),
        EventKind::ItemPageView
        | EventKind::AddToCart
        | EventKind::AddToWishlist
        | EventKind::Purchase => json!({"items": [{"id": "sku-1", "price": 9.99}]}),
        EventKind::Search => json!({"search_query": "running shoes"}),
        EventKind::PageView => json!({"page_id": "landing-summer"}),
    }
}

#[test]
fn test_every_kind_passes_with_required_fields() {
    for kind in EventKind::ALL {
        let event = event_with(kind.as_str(), valid_fields(kind));
        let validated = validate(&event).unwrap_or_else(|e| panic!("{}: {}", kind, e));
        assert_eq!(validated.kind(), kind);
        assert_eq!(validated.timestamp_ms(), TS);
    }
}

#[test]
fn test_kind_wire_keys_round_trip() {
    for kind in EventKind::ALL {
        assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.as_str());
    }
    assert!("home".parse::<EventKind>().is_err());
}

#[test]
fn test_kind_serde_uses_wire_keys() {
    for kind in EventKind::ALL {
        assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        let parsed: EventKind = serde_json::from_value(json!(kind.as_str())).unwrap();
        assert_eq!(parsed, kind);
    }
}

#[test]
fn test_null_event_fails() {
    assert_eq!(validate(&Value::Null).unwrap_err(), ValidationError::MissingEvent);
}

#[test]
fn test_non_object_event_fails() {
    assert_eq!(validate(&json!([1, 2])).unwrap_err(), ValidationError::NotAnObject);
    assert_eq!(validate(&json!("HOME")).unwrap_err(), ValidationError::NotAnObject);
}

#[test]
fn test_missing_timestamp_fails_for_every_kind() {
    for kind in EventKind::ALL {
        let mut event = event_with(kind.as_str(), valid_fields(kind));
        event.as_object_mut().unwrap().remove("timestamp");

        match validate(&event).unwrap_err() {
            ValidationError::MissingTimestamp { body } => {
                assert!(body.contains(kind.as_str()));
            }
            other => panic!("Expected MissingTimestamp, got {:?}", other),
        }
    }
}

#[test]
fn test_null_timestamp_is_missing() {
    let event = json!({"timestamp": null, "event_type": "HOME"});
    assert!(matches!(
        validate(&event).unwrap_err(),
        ValidationError::MissingTimestamp { .. }
    ));
}

#[test]
fn test_non_numeric_timestamp_fails_for_every_kind() {
    for kind in EventKind::ALL {
        let mut event = event_with(kind.as_str(), valid_fields(kind));
        event["timestamp"] = json!("not-a-number");

        let err = validate(&event).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
        assert!(
            err.to_string().contains("not-a-number"),
            "message should carry the serialized event: {}",
            err
        );
    }
}

#[test]
fn test_numeric_timestamp_accepted() {
    let event = json!({"timestamp": TS, "event_type": "LAND"});
    let validated = validate(&event).unwrap();
    assert_eq!(validated.event(), &UserEvent::Land);
    assert_eq!(validated.occurred_at().timestamp_millis(), TS);
}

#[test]
fn test_missing_event_type_fails() {
    let event = json!({"timestamp": TS});
    assert_eq!(validate(&event).unwrap_err(), ValidationError::MissingEventType);
}

#[test]
fn test_empty_event_type_is_missing() {
    let event = event_with("", json!({}));
    let err = validate(&event).unwrap_err();
    assert_eq!(err, ValidationError::MissingEventType);
    assert_eq!(err.to_string(), "event_type is required");
}

#[test]
fn test_unknown_event_type_names_the_type() {
    for name in ["CHECKOUT", "home", " ", "ITEM_PAGE_VIEWS"] {
        let event = event_with(name, json!({}));
        let err = validate(&event).unwrap_err();
        assert_eq!(err, ValidationError::UnknownEventType(name.to_string()));
        assert!(err.to_string().contains(&format!("'{}'", name)));
    }
}

#[test]
fn test_non_string_event_type_is_unknown() {
    let event = json!({"timestamp": TS, "event_type": 7});
    assert_eq!(
        validate(&event).unwrap_err(),
        ValidationError::UnknownEventType("7".to_string())
    );
}

#[test]
fn test_product_kinds_require_items() {
    for kind in [
        EventKind::ItemPageView,
        EventKind::AddToCart,
        EventKind::AddToWishlist,
    ] {
        for fields in [json!({}), json!({"items": []}), json!({"items": null}), json!({"items": "sku-1"})] {
            let event = event_with(kind.as_str(), fields);
            assert_eq!(validate(&event).unwrap_err(), ValidationError::MissingItems(kind));
        }
    }
}

#[test]
fn test_purchase_items_message_differs_from_product_family() {
    let purchase = event_with("PURCHASE", json!({"items": []}));
    let pdp = event_with("ITEM_PAGE_VIEW", json!({"items": []}));

    let purchase_err = validate(&purchase).unwrap_err();
    let pdp_err = validate(&pdp).unwrap_err();

    assert_eq!(purchase_err, ValidationError::MissingPurchaseItems);
    assert_ne!(purchase_err.to_string(), pdp_err.to_string());
    assert!(purchase_err.to_string().contains("PURCHASE"));
}

#[test]
fn test_search_requires_query() {
    for fields in [json!({}), json!({"search_query": ""}), json!({"search_query": null})] {
        let event = event_with("SEARCH", fields);
        assert_eq!(validate(&event).unwrap_err(), ValidationError::MissingSearchQuery);
    }

    // Present and non-empty, even if only whitespace
    let event = event_with("SEARCH", json!({"search_query": "   "}));
    assert_eq!(
        validate(&event).unwrap().event(),
        &UserEvent::Search {
            search_query: "   ".to_string()
        }
    );

    let event = event_with("SEARCH", json!({"search_query": "boots"}));
    assert_eq!(
        validate(&event).unwrap().event(),
        &UserEvent::Search {
            search_query: "boots".to_string()
        }
    );
}

#[test]
fn test_page_view_requires_page_id() {
    for fields in [json!({}), json!({"page_id": null}), json!({"page_id": ""})] {
        let event = event_with("PAGE_VIEW", fields);
        assert_eq!(validate(&event).unwrap_err(), ValidationError::MissingPageId);
    }

    let event = event_with("PAGE_VIEW", json!({"page_id": " "}));
    assert_eq!(
        validate(&event).unwrap().event(),
        &UserEvent::PageView {
            page_id: " ".to_string()
        }
    );

    let event = event_with("PAGE_VIEW", json!({"page_id": 1001}));
    assert_eq!(
        validate(&event).unwrap().event(),
        &UserEvent::PageView {
            page_id: "1001".to_string()
        }
    );
}

#[test]
fn test_home_and_land_ignore_type_specific_fields() {
    for name in ["HOME", "LAND"] {
        let event = event_with(name, json!({"items": [], "page_id": ""}));
        assert!(validate(&event).is_ok());
    }
}

#[test]
fn test_validated_record_keeps_unknown_fields() {
    let event = event_with(
        "ADD_TO_CART",
        json!({"items": [{"id": "sku-9", "quantity": 2}], "currency": "EUR", "coupon": null}),
    );
    let validated = validate(&event).unwrap();

    assert_eq!(validated.event().items().map(<[Value]>::len), Some(1));
    let record = validated.into_record();
    assert_eq!(record.get("currency"), Some(&json!("EUR")));
    assert_eq!(record.get("session_id"), Some(&json!("sess-42")));
    // Nulls are left for the sanitizer
    assert_eq!(record.get("coupon"), Some(&Value::Null));
}

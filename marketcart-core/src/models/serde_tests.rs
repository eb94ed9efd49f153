//! Serde tests for the snapshot wire format.
//!
//! The snapshot is read back by app builds that predate this crate, so the
//! field names and shape are checked literally here.

use serde_json::json;

use crate::{CartEntry, CartState, CoreError, ProductInput};

fn sample_state() -> CartState {
    let mut state = CartState::new();
    state.add(ProductInput::new("a", "Apple", "img://a", 1.25)).unwrap();
    state.add(ProductInput::new("b", "Banana", "img://b", 0.5)).unwrap();
    state.add(ProductInput::new("a", "Apple", "img://a", 1.25)).unwrap();
    state
}

// ============================================================================
// CartEntry
// ============================================================================

#[test]
fn test_entry_serializes_image_url_as_camel_case() {
    let entry = CartEntry::from_product(ProductInput::new("a", "Apple", "img://a", 1.25));
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "a",
            "title": "Apple",
            "imageUrl": "img://a",
            "price": 1.25,
            "quantity": 1
        })
    );
}

#[test]
fn test_entry_accepts_snake_case_image_url() {
    let raw = r#"{"id":"a","title":"Apple","image_url":"img://a","price":1.25,"quantity":3}"#;
    let entry: CartEntry = serde_json::from_str(raw).unwrap();
    assert_eq!(entry.image_url, "img://a");
    assert_eq!(entry.quantity, 3);
}

#[test]
fn test_entry_rejects_negative_quantity() {
    let raw = r#"{"id":"a","title":"Apple","imageUrl":"img://a","price":1.25,"quantity":-1}"#;
    assert!(serde_json::from_str::<CartEntry>(raw).is_err());
}

#[test]
fn test_product_input_ignores_quantity() {
    let raw = r#"{"id":"a","title":"Apple","imageUrl":"img://a","price":1.25,"quantity":7}"#;
    let product: ProductInput = serde_json::from_str(raw).unwrap();
    assert_eq!(product, ProductInput::new("a", "Apple", "img://a", 1.25));
}

// ============================================================================
// CartState
// ============================================================================

#[test]
fn test_state_serializes_as_array() {
    let value = serde_json::to_value(sample_state()).unwrap();
    let array = value.as_array().expect("snapshot should be a JSON array");
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["id"], "a");
    assert_eq!(array[0]["quantity"], 2);
    assert_eq!(array[1]["id"], "b");
    assert_eq!(array[1]["quantity"], 1);
}

#[test]
fn test_state_json_roundtrip() {
    let state = sample_state();
    let json = state.to_json().unwrap();
    let parsed = CartState::from_json(&json).unwrap();
    assert_eq!(parsed, state);
}

#[test]
fn test_empty_state_is_empty_array() {
    assert_eq!(CartState::new().to_json().unwrap(), "[]");
    assert!(CartState::from_json("[]").unwrap().is_empty());
}

#[test]
fn test_state_rejects_duplicate_ids() {
    let raw = r#"[
        {"id":"a","title":"Apple","imageUrl":"img://a","price":1.0,"quantity":1},
        {"id":"a","title":"Apple","imageUrl":"img://a","price":1.0,"quantity":2}
    ]"#;
    assert!(matches!(
        CartState::from_json(raw),
        Err(CoreError::Serialization(_))
    ));
}

#[test]
fn test_state_rejects_zero_quantity() {
    let raw = r#"[{"id":"a","title":"Apple","imageUrl":"img://a","price":1.0,"quantity":0}]"#;
    assert!(CartState::from_json(raw).is_err());
}

#[test]
fn test_state_rejects_non_array() {
    assert!(CartState::from_json(r#"{"id":"a"}"#).is_err());
    assert!(CartState::from_json("not json").is_err());
    assert!(CartState::from_json("null").is_err());
}

use serde_json::json;
use vitrine_catalog::dto::RawProduct;
use vitrine_catalog::{ProductMapper, PLACEHOLDER_IMAGE};
use vitrine_core::SchemaVersion;

fn raw(value: serde_json::Value) -> RawProduct {
    serde_json::from_value(value).unwrap()
}

#[test]
fn id_candidates_resolve_in_order() {
    let mapper = ProductMapper::new();
    assert_eq!(mapper.map(&raw(json!({"id": 7}))).unwrap().id, 7);
    assert_eq!(mapper.map(&raw(json!({"productId": 9}))).unwrap().id, 9);
    assert_eq!(mapper.map(&raw(json!({"sku": "12"}))).unwrap().id, 12);
    assert_eq!(
        mapper
            .map(&raw(json!({"id": 7, "productId": 9})))
            .unwrap()
            .id,
        7
    );
}

#[test]
fn unusable_ids_are_rejected() {
    let mapper = ProductMapper::new();

    let err = mapper.map(&raw(json!({"name": "x"}))).unwrap_err();
    assert_eq!(err.info().code, "catalog.missing_id");

    let err = mapper.map(&raw(json!({"id": "abc"}))).unwrap_err();
    assert_eq!(err.info().code, "catalog.bad_id");

    let err = mapper.map(&raw(json!({"id": 0}))).unwrap_err();
    assert_eq!(err.info().code, "catalog.bad_id");
}

#[test]
fn name_falls_back_through_aliases() {
    let mapper = ProductMapper::new();
    let product = mapper
        .map(&raw(json!({"id": 1, "name": "Куртка", "title": "ignored"})))
        .unwrap();
    assert_eq!(product.name, "Куртка");

    let product = mapper
        .map(&raw(json!({"id": 1, "name": "   ", "title": "Бомбер"})))
        .unwrap();
    assert_eq!(product.name, "Бомбер");

    let product = mapper.map(&raw(json!({"id": 5}))).unwrap();
    assert_eq!(product.name, "Товар #5");
}

#[test]
fn price_falls_back_through_aliases() {
    let mapper = ProductMapper::new();
    let product = mapper
        .map(&raw(json!({"id": 1, "price": 100, "minPrice": 50})))
        .unwrap();
    assert_eq!(product.price, 100);

    let product = mapper
        .map(&raw(json!({"id": 1, "minPrice": 50})))
        .unwrap();
    assert_eq!(product.price, 50);

    let product = mapper
        .map(&raw(json!({"id": 1, "amount": "990"})))
        .unwrap();
    assert_eq!(product.price, 990);

    let product = mapper.map(&raw(json!({"id": 1}))).unwrap();
    assert_eq!(product.price, 0);
}

#[test]
fn old_price_is_kept_only_when_positive() {
    let mapper = ProductMapper::new();
    let product = mapper
        .map(&raw(json!({"id": 1, "oldPrice": 5000})))
        .unwrap();
    assert_eq!(product.old_price, Some(5000));

    let product = mapper
        .map(&raw(json!({"id": 1, "originalPrice": 4000})))
        .unwrap();
    assert_eq!(product.old_price, Some(4000));

    let product = mapper.map(&raw(json!({"id": 1, "oldPrice": 0}))).unwrap();
    assert_eq!(product.old_price, None);

    let product = mapper.map(&raw(json!({"id": 1, "oldPrice": -10}))).unwrap();
    assert_eq!(product.old_price, None);
}

#[test]
fn images_merge_aliases_and_deduplicate() {
    let mapper = ProductMapper::new();
    let product = mapper
        .map(&raw(json!({
            "id": 1,
            "images": ["a.jpg", "", "b.jpg"],
            "imageUrl": "a.jpg"
        })))
        .unwrap();
    assert_eq!(product.images, vec!["a.jpg", "b.jpg"]);

    let product = mapper
        .map(&raw(json!({"id": 1, "thumbnail": " t.jpg "})))
        .unwrap();
    assert_eq!(product.images, vec!["t.jpg"]);

    let product = mapper.map(&raw(json!({"id": 1}))).unwrap();
    assert_eq!(product.images, vec![PLACEHOLDER_IMAGE]);
}

#[test]
fn premium_uses_the_first_present_flag() {
    let mapper = ProductMapper::new();
    let product = mapper
        .map(&raw(json!({"id": 1, "premium": false, "isPremium": true})))
        .unwrap();
    assert!(!product.premium);

    let product = mapper
        .map(&raw(json!({"id": 1, "isPremium": true})))
        .unwrap();
    assert!(product.premium);
}

#[test]
fn timestamps_parse_from_rfc3339_and_epoch_millis() {
    let mapper = ProductMapper::new();
    let product = mapper
        .map(&raw(json!({"id": 1, "createdAt": "2024-05-01T10:00:00Z"})))
        .unwrap();
    assert!(product.created_at.is_some());

    let product = mapper
        .map(&raw(json!({"id": 1, "createdAt": 1_714_558_800_000_i64})))
        .unwrap();
    assert!(product.created_at.is_some());

    let product = mapper
        .map(&raw(json!({"id": 1, "createdAt": "soon"})))
        .unwrap();
    assert!(product.created_at.is_none());
}

#[test]
fn descriptive_fields_fall_back_through_aliases() {
    let mapper = ProductMapper::new();
    let product = mapper
        .map(&raw(json!({"id": 1, "sex": "male", "shortDescription": "тёплая"})))
        .unwrap();
    assert_eq!(product.gender.as_deref(), Some("male"));
    assert_eq!(product.description.as_deref(), Some("тёплая"));
}

#[test]
fn payload_accepts_wrapped_and_bare_arrays() {
    let mapper = ProductMapper::new();

    let wrapped = mapper
        .map_payload(&json!({"products": [{"id": 1}, {"id": 2}]}))
        .unwrap();
    assert_eq!(wrapped.products.len(), 2);
    assert_eq!(wrapped.dropped, 0);

    let bare = mapper.map_payload(&json!([{"id": 3}])).unwrap();
    assert_eq!(bare.products.len(), 1);

    let err = mapper.map_payload(&json!({"items": []})).unwrap_err();
    assert_eq!(err.info().code, "catalog.payload_shape");
}

#[test]
fn unmappable_rows_are_dropped_and_counted() {
    let mapper = ProductMapper::new();
    let mapped = mapper
        .map_payload(&json!({"products": [
            {"id": 1, "name": "ok"},
            42,
            {"id": "abc"}
        ]}))
        .unwrap();
    assert_eq!(mapped.products.len(), 1);
    assert_eq!(mapped.dropped, 2);
}

#[test]
fn mapping_is_versioned() {
    let mapper = ProductMapper::new();
    assert_eq!(mapper.schema(), SchemaVersion::new(1, 0, 0));

    let mapped = mapper.map_payload(&json!({"products": []})).unwrap();
    assert_eq!(mapped.schema, ProductMapper::SCHEMA);
    assert!(mapped.products.is_empty());
}

use super::*;
use serde_json::json;

fn page(body: serde_json::Value, kind: ListKind) -> ListPage {
    ListPage::from_response(&body, kind)
}

#[test]
fn data_key_with_top_level_total() {
    let p = page(json!({ "data": [{ "id": 1 }, { "id": 2 }], "total": 12 }), ListKind::Reviews);
    assert_eq!(p.items.len(), 2);
    assert_eq!(p.total, 12);
}

#[test]
fn kind_key_with_meta_total() {
    let p = page(json!({ "favorites": [{ "id": 9 }], "meta": { "total": 4 } }), ListKind::Favorites);
    assert_eq!(p.items, vec![json!({ "id": 9 })]);
    assert_eq!(p.total, 4);
}

#[test]
fn data_key_with_meta_total() {
    let p = page(json!({ "data": [{ "id": 1 }], "meta": { "total": 30, "page": 1 } }), ListKind::Reviews);
    assert_eq!(p.items.len(), 1);
    assert_eq!(p.total, 30);
}

#[test]
fn kind_key_with_top_level_total() {
    let p = page(json!({ "reviews": [{ "id": 1 }, { "id": 2 }, { "id": 3 }], "total": 3 }), ListKind::Reviews);
    assert_eq!(p.items.len(), 3);
    assert_eq!(p.total, 3);
}

#[test]
fn data_wins_over_kind_key() {
    let p = page(json!({ "data": [{ "id": "d" }], "reviews": [{ "id": "r" }] }), ListKind::Reviews);
    assert_eq!(p.items, vec![json!({ "id": "d" })]);
}

#[test]
fn top_level_total_wins_over_meta() {
    let p = page(json!({ "data": [], "total": 5, "meta": { "total": 99 } }), ListKind::Favorites);
    assert_eq!(p.total, 5);
}

#[test]
fn null_entries_fall_through() {
    let p = page(json!({ "data": null, "favorites": [{ "id": 1 }], "total": null, "meta": { "total": 1 } }), ListKind::Favorites);
    assert_eq!(p.items.len(), 1);
    assert_eq!(p.total, 1);
}

#[test]
fn other_kind_key_is_ignored() {
    let p = page(json!({ "reviews": [{ "id": 1 }], "total": 1 }), ListKind::Favorites);
    assert!(p.items.is_empty());
    assert_eq!(p.total, 1);
}

#[test]
fn unknown_shapes_are_empty_pages() {
    for body in [json!({}), json!([]), json!(null), json!("oops"), json!({ "data": { "id": 1 }, "total": "7" })] {
        let p = page(body, ListKind::Reviews);
        assert!(p.items.is_empty());
        assert_eq!(p.total, 0);
    }
}

#[test]
fn items_keys_per_kind() {
    assert_eq!(ListKind::Reviews.items_key(), "reviews");
    assert_eq!(ListKind::Favorites.items_key(), "favorites");
}

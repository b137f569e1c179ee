//! End-to-end translation through the public API: decode a JSON patch,
//! translate it, compare the rendered update document.

use patch_to_mongo::{from_json_patch, translate, TranslateError};
use serde_json::{json, Value};

fn update_for(patch: Value) -> Result<Value, TranslateError> {
    let ops = from_json_patch(&patch)?;
    Ok(translate(&ops)?.to_value())
}

#[test]
fn single_append_pushes_a_bare_value() {
    let update = update_for(json!([
        {"op": "add", "path": "/name/-", "value": "dave"},
    ]))
    .unwrap();
    assert_eq!(update, json!({"$push": {"name": "dave"}}));
}

#[test]
fn add_sets_a_nested_non_array_field() {
    let update = update_for(json!([
        {"op": "add", "path": "/name/nested", "value": "dave"},
    ]))
    .unwrap();
    assert_eq!(update, json!({"$set": {"name.nested": "dave"}}));
}

#[test]
fn escaped_characters_decode_into_field_names() {
    let update = update_for(json!([
        {"op": "replace", "path": "/foo~1bar~0", "value": "dave"},
    ]))
    .unwrap();
    assert_eq!(update, json!({"$set": {"foo/bar~": "dave"}}));
}

#[test]
fn positional_insert_becomes_an_each_run() {
    let update = update_for(json!([
        {"op": "add", "path": "/name/1", "value": "dave"},
    ]))
    .unwrap();
    assert_eq!(
        update,
        json!({"$push": {"name": {"$each": ["dave"], "$position": 1}}})
    );
}

#[test]
fn contiguous_inserts_fold_into_one_run() {
    let update = update_for(json!([
        {"op": "add", "path": "/name/1", "value": "dave"},
        {"op": "add", "path": "/name/2", "value": "bob"},
        {"op": "add", "path": "/name/2", "value": "john"},
    ]))
    .unwrap();
    assert_eq!(
        update,
        json!({"$push": {"name": {"$each": ["dave", "john", "bob"], "$position": 1}}})
    );
}

#[test]
fn repeated_inserts_at_one_position_stack_in_reverse() {
    let update = update_for(json!([
        {"op": "add", "path": "/name/1", "value": "dave"},
        {"op": "add", "path": "/name/1", "value": "bob"},
        {"op": "add", "path": "/name/1", "value": "john"},
    ]))
    .unwrap();
    assert_eq!(
        update,
        json!({"$push": {"name": {"$each": ["john", "bob", "dave"], "$position": 1}}})
    );
}

#[test]
fn multiple_appends_fold_into_each() {
    let update = update_for(json!([
        {"op": "add", "path": "/name/-", "value": "dave"},
        {"op": "add", "path": "/name/-", "value": "bob"},
        {"op": "add", "path": "/name/-", "value": "john"},
    ]))
    .unwrap();
    assert_eq!(
        update,
        json!({"$push": {"name": {"$each": ["dave", "bob", "john"]}}})
    );
}

#[test]
fn null_values_survive_appends() {
    let update = update_for(json!([
        {"op": "add", "path": "/name/-", "value": null},
        {"op": "add", "path": "/name/-", "value": "bob"},
        {"op": "add", "path": "/name/-", "value": null},
    ]))
    .unwrap();
    assert_eq!(
        update,
        json!({"$push": {"name": {"$each": [null, "bob", null]}}})
    );
}

#[test]
fn null_values_survive_positional_inserts() {
    let update = update_for(json!([
        {"op": "add", "path": "/name/1", "value": null},
        {"op": "add", "path": "/name/1", "value": "bob"},
        {"op": "add", "path": "/name/1", "value": null},
    ]))
    .unwrap();
    assert_eq!(
        update,
        json!({"$push": {"name": {"$each": [null, "bob", null], "$position": 1}}})
    );
}

#[test]
fn remove_unsets_the_field() {
    // The stray value member is tolerated and ignored.
    let update = update_for(json!([
        {"op": "remove", "path": "/name", "value": "dave"},
    ]))
    .unwrap();
    assert_eq!(update, json!({"$unset": {"name": 1}}));
}

#[test]
fn replace_sets_the_field() {
    let update = update_for(json!([
        {"op": "replace", "path": "/name", "value": "dave"},
    ]))
    .unwrap();
    assert_eq!(update, json!({"$set": {"name": "dave"}}));
}

#[test]
fn test_op_translates_to_an_empty_update() {
    let update = update_for(json!([
        {"op": "test", "path": "/name", "value": "dave"},
    ]))
    .unwrap();
    assert_eq!(update, json!({}));
}

#[test]
fn zero_index_inserts_at_the_array_front() {
    let update = update_for(json!([
        {"op": "add", "path": "/name/0", "value": "dave"},
    ]))
    .unwrap();
    assert_eq!(
        update,
        json!({"$push": {"name": {"$each": ["dave"], "$position": 0}}})
    );
}

#[test]
fn non_contiguous_positions_are_rejected() {
    let err = update_for(json!([
        {"op": "add", "path": "/name/1", "value": "bob"},
        {"op": "add", "path": "/name/3", "value": "john"},
    ]))
    .unwrap_err();
    assert_eq!(
        err,
        TranslateError::NonContiguousPositions("name".to_string())
    );
}

#[test]
fn mixed_positions_are_rejected_in_both_orders() {
    let err = update_for(json!([
        {"op": "add", "path": "/name/1", "value": "bob"},
        {"op": "add", "path": "/name/-", "value": "john"},
    ]))
    .unwrap_err();
    assert_eq!(err, TranslateError::MixedPositions("name".to_string()));

    let err = update_for(json!([
        {"op": "add", "path": "/name/-", "value": "bob"},
        {"op": "add", "path": "/name/1", "value": "john"},
    ]))
    .unwrap_err();
    assert_eq!(err, TranslateError::MixedPositions("name".to_string()));
}

#[test]
fn move_and_copy_are_rejected_by_name() {
    let err = update_for(json!([
        {"op": "move", "path": "/name", "from": "/old_name"},
    ]))
    .unwrap_err();
    assert_eq!(err, TranslateError::UnsupportedOp("move".to_string()));

    let err = update_for(json!([
        {"op": "copy", "path": "/name", "from": "/old_name"},
    ]))
    .unwrap_err();
    assert_eq!(err, TranslateError::UnsupportedOp("copy".to_string()));
}

#[test]
fn alphanumeric_trailing_tokens_set_instead_of_push() {
    let update = update_for(json!([
        {"op": "add", "path": "/custom/1234asdb", "value": []},
    ]))
    .unwrap();
    assert_eq!(update, json!({"$set": {"custom.1234asdb": []}}));
}

#[test]
fn independent_fields_share_one_document() {
    let update = update_for(json!([
        {"op": "add", "path": "/tags/-", "value": "expired"},
        {"op": "replace", "path": "/owner/name", "value": "dave"},
        {"op": "remove", "path": "/draft"},
        {"op": "add", "path": "/watchers/0", "value": "bob"},
    ]))
    .unwrap();
    assert_eq!(
        update,
        json!({
            "$set": {"owner.name": "dave"},
            "$unset": {"draft": 1},
            "$push": {
                "tags": "expired",
                "watchers": {"$each": ["bob"], "$position": 0},
            },
        })
    );
}

#[test]
fn structured_values_pass_through_unchanged() {
    let update = update_for(json!([
        {"op": "add", "path": "/items/-", "value": {"id": 7, "tags": ["a", null]}},
        {"op": "replace", "path": "/meta", "value": {"rev": 3}},
    ]))
    .unwrap();
    assert_eq!(
        update,
        json!({
            "$set": {"meta": {"rev": 3}},
            "$push": {"items": {"id": 7, "tags": ["a", null]}},
        })
    );
}

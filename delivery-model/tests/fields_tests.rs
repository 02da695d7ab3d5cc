mod common;

use common::{entry_json, entry_link, localization, localized_entry_json};
use delivery_link::LinkResolver;
use delivery_model::FieldsDecoder;
use delivery_types::{DecodeError, Link, Sys};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

// ── Single-locale payloads ───────────────────────────────────────

#[test]
fn single_locale_fields_are_read_directly() {
    let loc = localization();
    let value = entry_json("nyancat", "cat", json!({"name": "Nyan Cat", "lives": 1337}));
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    assert!(!fields.is_localized());
    assert_eq!(fields.decode::<String>("name").unwrap(), "Nyan Cat");
    assert_eq!(fields.decode::<i64>("lives").unwrap(), 1337);
    assert_eq!(fields.decode_optional::<String>("color").unwrap(), None);
}

#[test]
fn keys_list_payload_fields() {
    let loc = localization();
    let value = entry_json("nyancat", "cat", json!({"name": "Nyan", "lives": 9}));
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    let mut keys: Vec<&str> = fields.keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["lives", "name"]);
}

#[test]
fn missing_required_field_reports_its_name() {
    let loc = localization();
    let value = entry_json("nyancat", "cat", json!({}));
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    let err = fields.decode::<String>("name").unwrap_err();
    assert!(matches!(err, DecodeError::MissingLocalizedValue { ref field } if field == "name"));
}

#[test]
fn null_field_is_treated_as_absent() {
    let loc = localization();
    let value = entry_json("nyancat", "cat", json!({"color": null}));
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    assert_eq!(fields.raw("color").unwrap(), None);
    assert!(matches!(
        fields.decode::<String>("color"),
        Err(DecodeError::MissingLocalizedValue { .. })
    ));
}

#[test]
fn wrongly_typed_field_is_structural_error() {
    let loc = localization();
    let value = entry_json("nyancat", "cat", json!({"lives": "many"}));
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    assert!(matches!(
        fields.decode::<i64>("lives"),
        Err(DecodeError::Structural(_))
    ));
}

#[test]
fn missing_fields_object_has_no_values() {
    let loc = localization();
    let mut value = entry_json("nyancat", "cat", json!({}));
    value.as_object_mut().unwrap().remove("fields");
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    assert_eq!(fields.keys().count(), 0);
    assert_eq!(fields.decode_optional::<String>("name").unwrap(), None);
}

#[test]
fn non_object_fields_is_structural_error() {
    let loc = localization();
    let value = entry_json("nyancat", "cat", json!(["name"]));
    let sys = Sys::from_resource(&value).unwrap();

    assert!(matches!(
        FieldsDecoder::new(&value, &sys, &loc),
        Err(DecodeError::Structural(_))
    ));
}

// ── Multi-locale payloads ────────────────────────────────────────

#[test]
fn multi_locale_uses_current_locale() {
    let loc = localization().with_current("de-DE").unwrap();
    let value = localized_entry_json(
        "nyancat",
        "cat",
        json!({"name": {"en-US": "Nyan Cat", "de-DE": "Nyan Katze"}}),
    );
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    assert!(fields.is_localized());
    assert_eq!(fields.decode::<String>("name").unwrap(), "Nyan Katze");
}

#[test]
fn multi_locale_walks_fallback_chain() {
    let loc = localization().with_current("de-DE").unwrap();
    let value = localized_entry_json("nyancat", "cat", json!({"lives": {"en-US": 1337}}));
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    assert_eq!(fields.decode::<i64>("lives").unwrap(), 1337);
}

#[test]
fn multi_locale_without_fallback_is_missing() {
    let loc = localization().with_current("tlh").unwrap();
    let value = localized_entry_json("nyancat", "cat", json!({"name": {"en-US": "Nyan Cat"}}));
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    assert!(matches!(
        fields.decode::<String>("name"),
        Err(DecodeError::MissingLocalizedValue { .. })
    ));
    assert_eq!(fields.decode_optional::<String>("name").unwrap(), None);
}

#[test]
fn multi_locale_null_value_is_absent() {
    let loc = localization();
    let value = localized_entry_json("nyancat", "cat", json!({"name": {"en-US": null}}));
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    assert_eq!(fields.raw("name").unwrap(), None);
}

#[test]
fn multi_locale_field_must_be_object() {
    let loc = localization();
    let value = localized_entry_json("nyancat", "cat", json!({"name": "Nyan Cat"}));
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    assert!(matches!(
        fields.decode::<String>("name"),
        Err(DecodeError::Structural(_))
    ));
}

// ── Links ────────────────────────────────────────────────────────

#[test]
fn link_and_links_decode_references() {
    let loc = localization();
    let value = entry_json(
        "nyancat",
        "cat",
        json!({
            "bestFriend": entry_link("happycat"),
            "friends": [entry_link("garfield"), entry_link("happycat")]
        }),
    );
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();

    assert_eq!(fields.link("bestFriend").unwrap(), Some(Link::entry("happycat")));
    assert_eq!(
        fields.links("friends").unwrap(),
        vec![Link::entry("garfield"), Link::entry("happycat")]
    );
    assert_eq!(fields.link("image").unwrap(), None);
    assert_eq!(fields.links("enemies").unwrap(), Vec::<Link>::new());
}

#[test]
fn resolve_link_registers_only_present_fields() {
    let loc = localization();
    let value = entry_json("nyancat", "cat", json!({"bestFriend": entry_link("happycat")}));
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();
    let mut resolver = LinkResolver::new();
    let calls = Rc::new(RefCell::new(0));

    let sink = Rc::clone(&calls);
    let registered = fields
        .resolve_link("bestFriend", &mut resolver, move |_| *sink.borrow_mut() += 1)
        .unwrap();
    assert!(registered);

    let sink = Rc::clone(&calls);
    let registered = fields
        .resolve_link("image", &mut resolver, move |_| *sink.borrow_mut() += 1)
        .unwrap();
    assert!(!registered);
    assert_eq!(resolver.pending_len(), 1);

    // Nothing runs before churn.
    assert_eq!(*calls.borrow(), 0);
    resolver.churn();
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn resolve_links_registers_one_list() {
    let loc = localization();
    let value = entry_json(
        "nyancat",
        "cat",
        json!({"friends": [entry_link("garfield"), entry_link("happycat")]}),
    );
    let sys = Sys::from_resource(&value).unwrap();
    let fields = FieldsDecoder::new(&value, &sys, &loc).unwrap();
    let mut resolver = LinkResolver::new();

    assert!(fields.resolve_links("friends", &mut resolver, |_| {}).unwrap());
    assert!(!fields.resolve_links("enemies", &mut resolver, |_| {}).unwrap());
    assert_eq!(resolver.pending_len(), 1);
}

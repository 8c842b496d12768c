use minion::{from_str, to_string, Error};

#[test]
fn test_macro_substitutes_value() {
    let doc = from_str(r#"&host: "127.0.0.1", [&host, &host]"#).unwrap();
    assert_eq!(to_string(&doc).unwrap(), r#"["127.0.0.1","127.0.0.1"]"#);
}

#[test]
fn test_macro_references_share_one_node() {
    let doc = from_str("&x: \"v\", [&x, &x, &x]").unwrap();
    // one string node plus the list itself
    assert_eq!(doc.node_count(), 2);
    let ids: Vec<_> = doc.root().as_list().unwrap().map(|v| v.id()).collect();
    assert_eq!(ids[0], ids[1]);
    assert_eq!(ids[1], ids[2]);
}

#[test]
fn test_macro_container_value() {
    let doc = from_str("&defaults: {retries: \"3\"}, [&defaults, &defaults]").unwrap();
    assert_eq!(
        to_string(&doc).unwrap(),
        r#"[{"retries":"3"},{"retries":"3"}]"#
    );
}

#[test]
fn test_macro_as_map_value() {
    let doc = from_str(r#"&p: "8080", {a: &p, b: &p}"#).unwrap();
    let root = doc.root();
    assert_eq!(
        root.get("a").unwrap().id(),
        root.get("b").unwrap().id()
    );
}

#[test]
fn test_macro_definition_can_reference_earlier_macro() {
    let doc = from_str("&a: \"x\", &b: [&a, &a], [&b]").unwrap();
    assert_eq!(to_string(&doc).unwrap(), r#"[["x","x"]]"#);
}

#[test]
fn test_undefined_macro() {
    let err = from_str("[&nope]").unwrap_err();
    assert!(matches!(err, Error::Semantic { .. }));
    assert!(err.to_string().contains("undefined macro name: &nope"));
}

#[test]
fn test_forward_reference_is_undefined() {
    let err = from_str("&b: [&a], &a: \"x\", [&b]").unwrap_err();
    assert!(err.to_string().contains("undefined macro name: &a"));
}

#[test]
fn test_duplicate_macro_name() {
    let err = from_str("&x: \"1\", &x: \"2\", [&x]").unwrap_err();
    assert!(matches!(err, Error::Semantic { .. }));
    assert!(err.to_string().contains("macro name already defined: &x"));
}

#[test]
fn test_unused_macro_is_accepted() {
    let doc = from_str("&unused: [a, b, c], \"ok\"").unwrap();
    assert_eq!(doc.root().as_str(), Some("ok"));
}

#[test]
fn test_macro_definition_requires_colon() {
    let err = from_str("&x \"v\", [&x]").unwrap_err();
    assert!(err.to_string().contains("expecting ':' in macro definition"));
}

#[test]
fn test_macro_definition_requires_value() {
    let err = from_str("&x: , [&x]").unwrap_err();
    assert!(err
        .to_string()
        .contains("in macro definition, expecting a value"));
}

#[test]
fn test_macro_definition_requires_trailing_comma() {
    let err = from_str("&x: \"v\" \"main\"").unwrap_err();
    assert!(err
        .to_string()
        .contains("after macro definition: expecting ','"));
}

#[test]
fn test_definitions_only_no_main_item() {
    let err = from_str("&x: \"v\",").unwrap_err();
    assert!(err.to_string().contains("document contains no main item"));
}

#[test]
fn test_macro_cannot_be_map_key() {
    let err = from_str(r#"{&k: "v"}"#).unwrap_err();
    assert!(err.to_string().contains("expecting a key"));
}

#[test]
fn test_sigil_in_delimited_string_is_literal() {
    let doc = from_str(r#""&x""#).unwrap();
    assert_eq!(doc.root().as_str(), Some("&x"));
}

#[test]
fn test_shared_subtree_survives_deep_copy() {
    let doc = from_str("&x: [\"v\"], [&x, &x]").unwrap();
    let copy = doc.deep_copy(doc.root_id());
    // copies are unshared: two lists of one string each, plus the outer list
    assert_eq!(copy.node_count(), 5);
    assert_eq!(to_string(&copy).unwrap(), r#"[["v"],["v"]]"#);
}

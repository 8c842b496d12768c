use minion::{from_str, minion, to_string, to_string_pretty, DocumentBuilder};

#[test]
fn test_compact_has_no_whitespace() {
    let doc = from_str("{ a : [ x , y ] , b : { } }").unwrap();
    assert_eq!(to_string(&doc).unwrap(), r#"{"a":["x","y"],"b":{}}"#);
}

#[test]
fn test_pretty_shape() {
    let doc = from_str("{a: [x], b: y}").unwrap();
    assert_eq!(
        to_string_pretty(&doc).unwrap(),
        "{\n  \"a\": [\n    \"x\"\n  ],\n  \"b\": \"y\"\n}"
    );
}

#[test]
fn test_dump_parse_preserves_escaped_strings() {
    let doc = minion!(["line\none", "tab\there", "quote\"backslash\\", "\u{01}\u{7F}"]);
    let text = to_string(&doc).unwrap();
    let reparsed = from_str(&text).unwrap();
    let values: Vec<_> = reparsed
        .root()
        .as_list()
        .unwrap()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    assert_eq!(
        values,
        vec!["line\none", "tab\there", "quote\"backslash\\", "\u{01}\u{7F}"]
    );
}

#[test]
fn test_bare_strings_are_quoted_on_output() {
    let doc = from_str("[plain]").unwrap();
    assert_eq!(to_string(&doc).unwrap(), r#"["plain"]"#);
}

#[test]
fn test_pretty_output_reparses_to_same_text() {
    let doc = from_str(r#"{servers: [{host: a, port: "80"}, {host: b}], mode: fast}"#).unwrap();
    let pretty = to_string_pretty(&doc).unwrap();
    let again = from_str(&pretty).unwrap();
    assert_eq!(to_string_pretty(&again).unwrap(), pretty);
}

#[test]
fn test_builder_document_dumps() {
    let mut b = DocumentBuilder::new();
    let host = b.string("localhost");
    let port = b.string("8080");
    let root = b
        .map([("host".to_string(), host), ("port".to_string(), port)])
        .unwrap();
    let doc = b.finish(root);
    assert_eq!(
        to_string(&doc).unwrap(),
        r#"{"host":"localhost","port":"8080"}"#
    );
}

#[test]
fn test_builder_shared_node_dumps_twice() {
    let mut b = DocumentBuilder::new();
    let v = b.string("shared");
    let again = b.share(v);
    let root = b.list([v, again]);
    let doc = b.finish(root);
    assert_eq!(to_string(&doc).unwrap(), r#"["shared","shared"]"#);
}

#[test]
fn test_builder_duplicate_key_rejected() {
    let mut b = DocumentBuilder::new();
    let v1 = b.string("1");
    let v2 = b.string("2");
    assert!(b.map([("k".to_string(), v1), ("k".to_string(), v2)]).is_err());
}

#[test]
fn test_deep_copy_is_independent() {
    let doc = from_str("{a: [x, y]}").unwrap();
    let copy = doc.deep_copy(doc.root().get("a").unwrap().id());
    assert_eq!(to_string(&copy).unwrap(), r#"["x","y"]"#);
    // original unchanged
    assert_eq!(to_string(&doc).unwrap(), r#"{"a":["x","y"]}"#);
}

#[test]
fn test_serde_json_interop() {
    let doc = from_str(r#"{name: "Alice", tags: [admin, dev]}"#).unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    assert_eq!(json, r#"{"name":"Alice","tags":["admin","dev"]}"#);
}

#[test]
fn test_serde_json_interop_subtree() {
    let doc = from_str(r#"{tags: [admin]}"#).unwrap();
    let tags = doc.root().get("tags").unwrap();
    assert_eq!(serde_json::to_string(&tags).unwrap(), r#"["admin"]"#);
}

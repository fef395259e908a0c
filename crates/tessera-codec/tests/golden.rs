use indexmap::IndexMap;
use tessera_codec::{
    decode, decode_slice, decode_str, encode, html_encode, EncodeOptions, Element, ErrorKind,
    JsonSerializable, Node, Object,
};

#[derive(Debug)]
struct Point {
    x: i64,
    y: i64,
}

impl JsonSerializable for Point {
    fn json_serialize(&self) -> Node {
        Node::List(vec![Node::Int(self.x), Node::Int(self.y)])
    }
}

#[derive(Debug)]
struct Nothing;

impl JsonSerializable for Nothing {
    fn json_serialize(&self) -> Node {
        Node::Object(Object::new())
    }
}

fn map(entries: Vec<(&str, Node)>) -> Node {
    Node::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<IndexMap<_, _>>(),
    )
}

#[test]
fn empty_object_encodes_as_braces() {
    let json = encode(&Node::Object(Object::new()), EncodeOptions::default()).unwrap();
    assert_eq!(json, "{}");
    let json = encode(&Node::serializable(Nothing), EncodeOptions::default()).unwrap();
    assert_eq!(json, "{}");
    let json = encode(&Node::List(vec![]), EncodeOptions::default()).unwrap();
    assert_eq!(json, "[]");
}

#[test]
fn nested_graph_is_normalized_before_serialization() {
    let graph = map(vec![
        ("origin", Node::serializable(Point { x: 0, y: -1 })),
        (
            "meta",
            Object::new()
                .with_field("tags", Node::List(vec!["a".into(), "b".into()]))
                .with_field("empty", Object::new())
                .into(),
        ),
        (
            "doc",
            Element::new("doc")
                .with_attribute("lang", "en")
                .with_child(Element::new("title").with_text("Hi"))
                .into(),
        ),
    ]);
    let json = encode(&graph, EncodeOptions::default()).unwrap();
    assert_eq!(
        json,
        r#"{"origin":[0,-1],"meta":{"tags":["a","b"],"empty":{}},"doc":{"@attributes":{"lang":"en"},"title":"Hi"}}"#
    );
}

#[test]
fn non_finite_numbers_fail() {
    for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let err = encode(&Node::List(vec![Node::Float(value)]), EncodeOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InfOrNan);
        assert_eq!(err.code(), 7);
    }
}

#[test]
fn html_encode_leaves_no_markup_characters() {
    let json = html_encode(&Node::from("<b>&'\"</b>")).unwrap();
    let inner = &json[1..json.len() - 1];
    for ch in ['<', '>', '&', '\'', '"'] {
        assert!(!inner.contains(ch), "{ch} survived in {json}");
    }
    assert!(json.is_ascii());
}

#[test]
fn html_encode_escapes_non_ascii() {
    let json = html_encode(&Node::from("café")).unwrap();
    assert_eq!(json, r#""caf\u00e9""#);
}

#[test]
fn decode_null_and_empty_inputs() {
    assert_eq!(decode(&Node::Null, true).unwrap(), Node::Null);
    assert_eq!(decode(&Node::from(""), true).unwrap(), Node::Null);
    assert_eq!(decode_str("", false).unwrap(), Node::Null);
}

#[test]
fn decode_rejects_composite_input() {
    let input = Node::List(vec![Node::Int(1), Node::Int(2), Node::Int(3)]);
    let err = decode(&input, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.message(), "Invalid JSON data.");

    let err = decode(&Node::Object(Object::new()), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn decode_malformed_text_fails() {
    let err = decode(&Node::from("{\"a\":"), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.to_string(), "Syntax error.");
}

#[test]
fn decode_objects_as_mapping_or_record() {
    let text = r#"{"z":1,"a":{"k":null}}"#;
    let as_map = decode_str(text, true).unwrap();
    match &as_map {
        Node::Map(m) => {
            let keys: Vec<_> = m.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["z", "a"]);
        }
        other => panic!("expected mapping, got {other:?}"),
    }
    let as_record = decode_str(text, false).unwrap();
    assert!(matches!(as_record, Node::Object(_)));
    assert!(matches!(as_record.get("a"), Some(Node::Object(_))));
}

#[test]
fn decode_slice_rejects_invalid_utf8() {
    let err = decode_slice(b"\"\xff\"", true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Utf8);
    assert_eq!(decode_slice(b"[1]", true).unwrap(), Node::List(vec![Node::Int(1)]));
}

#[test]
fn decode_lone_surrogate_is_utf8_fault() {
    let err = decode_str(r#""\ud800""#, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Utf8);
}

#[test]
fn unescaped_bits_are_independent() {
    let value = Node::from("/é");
    let slashes_only = EncodeOptions::UNESCAPED_SLASHES;
    assert_eq!(encode(&value, slashes_only).unwrap(), r#""/\u00e9""#);
    let unicode_only = EncodeOptions::UNESCAPED_UNICODE;
    assert_eq!(encode(&value, unicode_only).unwrap(), r#""\/é""#);
}

#[test]
fn unrecognized_option_bits_are_ignored() {
    let opts = EncodeOptions::default() | EncodeOptions::from_bits(1 << 22);
    assert_eq!(encode(&Node::from("a/b"), opts).unwrap(), r#""a/b""#);
}

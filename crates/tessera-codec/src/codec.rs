//! Encode and decode entry points.
//!
//! Both directions report failures only as [`CodecError`]; lower-level
//! serializer errors never reach the caller.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};
use serde_json::Value;

use crate::error::{CodecError, ErrorKind};
use crate::formatter::EscapingFormatter;
use crate::node::Node;
use crate::options::EncodeOptions;
use crate::process::{force_objects, process_data, MAX_DEPTH};

/// Indentation used with [`EncodeOptions::PRETTY_PRINT`].
const PRETTY_INDENT: &[u8] = b"    ";

/// Encodes a value graph as JSON text.
///
/// The graph is normalized with [`process_data`] first, then serialized
/// with the escaping selected by `options`.
///
/// # Example
///
/// ```rust
/// use tessera_codec::{encode, EncodeOptions, Node, Object};
///
/// let user = Object::new().with_field("name", "Zoë").with_field("home", "/u/zoe");
/// let json = encode(&user.into(), EncodeOptions::default())?;
/// assert_eq!(json, r#"{"name":"Zoë","home":"/u/zoe"}"#);
///
/// let empty = encode(&Object::new().into(), EncodeOptions::default())?;
/// assert_eq!(empty, "{}");
/// # Ok::<(), tessera_codec::CodecError>(())
/// ```
///
/// # Errors
///
/// Returns [`CodecError`] when the graph cannot be encoded (see
/// [`process_data`]) or when the serializer fails while formatting, which is
/// reported as [`ErrorKind::Syntax`].
pub fn encode(value: &Node, options: EncodeOptions) -> Result<String, CodecError> {
    let mut data = process_data(value)?;
    if options.contains(EncodeOptions::FORCE_OBJECT) {
        force_objects(&mut data);
    }

    let bytes = if options.contains(EncodeOptions::PRETTY_PRINT) {
        write_with(&data, PrettyFormatter::with_indent(PRETTY_INDENT), options)?
    } else {
        write_with(&data, CompactFormatter, options)?
    };

    String::from_utf8(bytes).map_err(|err| {
        tracing::debug!(error = %err, "encoder produced invalid UTF-8");
        CodecError::new(ErrorKind::Utf8)
    })
}

/// Encodes a value for embedding inside HTML markup.
///
/// `<`, `>`, `&`, `'` and `"` are escaped as `\uXXXX` sequences and non-ASCII
/// characters are unicode-escaped, so the output contains none of those
/// characters literally.
pub fn html_encode(value: &Node) -> Result<String, CodecError> {
    encode(value, EncodeOptions::HTML)
}

fn write_with<F: Formatter>(
    data: &Value,
    inner: F,
    options: EncodeOptions,
) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::with_capacity(128);
    let formatter = EscapingFormatter::new(inner, options);
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer).map_err(|err| {
        tracing::debug!(error = %err, "serializer fault while formatting");
        CodecError::new(ErrorKind::Syntax)
    })?;
    Ok(buf)
}

/// Decodes JSON held in a node.
///
/// - `Null` and the empty string decode to `Null` without error.
/// - Composite inputs (lists, mappings, objects, elements, self-describing
///   values) are rejected with [`ErrorKind::InvalidArgument`].
/// - Other scalars are decoded from their string form.
///
/// JSON objects become [`Node::Map`] when `as_mapping` is set and
/// [`Node::Object`] otherwise.
pub fn decode(json: &Node, as_mapping: bool) -> Result<Node, CodecError> {
    let text: Cow<'_, str> = match json {
        Node::Null => return Ok(Node::Null),
        Node::String(s) => Cow::Borrowed(s.as_str()),
        Node::Bytes(bytes) => return decode_slice(bytes, as_mapping),
        Node::Bool(true) => Cow::Borrowed("1"),
        Node::Bool(false) => Cow::Borrowed(""),
        Node::Int(i) => Cow::Owned(i.to_string()),
        Node::UInt(u) => Cow::Owned(u.to_string()),
        Node::Float(f) => Cow::Owned(f.to_string()),
        Node::List(_)
        | Node::Map(_)
        | Node::Object(_)
        | Node::Element(_)
        | Node::Serializable(_) => {
            tracing::debug!("composite value passed where JSON text was expected");
            return Err(CodecError::new(ErrorKind::InvalidArgument));
        }
    };
    decode_str(&text, as_mapping)
}

/// Decodes JSON text; the empty string decodes to `Null`.
///
/// Input nested deeper than [`MAX_DEPTH`] is rejected with
/// [`ErrorKind::Depth`], the same limit [`encode`] applies.
///
/// # Example
///
/// ```rust
/// use tessera_codec::{decode_str, Node};
///
/// let node = decode_str(r#"{"b": 1, "a": [true]}"#, true)?;
/// assert_eq!(node.get("b"), Some(&Node::Int(1)));
/// assert!(decode_str("", true)?.is_null());
/// # Ok::<(), tessera_codec::CodecError>(())
/// ```
pub fn decode_str(json: &str, as_mapping: bool) -> Result<Node, CodecError> {
    if json.is_empty() {
        return Ok(Node::Null);
    }
    if exceeds_depth(json, MAX_DEPTH) {
        tracing::debug!(limit = MAX_DEPTH, "JSON input nested too deeply");
        return Err(CodecError::new(ErrorKind::Depth));
    }

    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let value = Value::deserialize(&mut de).map_err(classify)?;
    de.end().map_err(classify)?;
    Ok(Node::from_value(value, as_mapping))
}

/// Reports whether brackets outside string literals nest beyond `limit`.
fn exceeds_depth(json: &str, limit: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for &b in json.as_bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}

/// Decodes JSON bytes, rejecting invalid UTF-8 with [`ErrorKind::Utf8`].
pub fn decode_slice(json: &[u8], as_mapping: bool) -> Result<Node, CodecError> {
    let text = std::str::from_utf8(json).map_err(|err| {
        tracing::debug!(valid_up_to = err.valid_up_to(), "JSON input is not UTF-8");
        CodecError::new(ErrorKind::Utf8)
    })?;
    decode_str(text, as_mapping)
}

/// Maps a parser failure onto the codec's fault categories.
fn classify(err: serde_json::Error) -> CodecError {
    let kind = match err.classify() {
        Category::Io => ErrorKind::Unknown,
        Category::Eof => ErrorKind::Syntax,
        Category::Data => ErrorKind::UnsupportedType,
        Category::Syntax => {
            let msg = err.to_string();
            if msg.contains("control character") {
                ErrorKind::CtrlChar
            } else if msg.contains("unicode code point")
                || msg.contains("surrogate")
                || msg.contains("hex escape")
            {
                ErrorKind::Utf8
            } else if msg.contains("expected `,` or `]`") || msg.contains("expected `,` or `}`") {
                ErrorKind::StateMismatch
            } else {
                ErrorKind::Syntax
            }
        }
    };
    tracing::debug!(
        line = err.line(),
        column = err.column(),
        code = kind.code(),
        "JSON decode failed: {}",
        err
    );
    CodecError::new(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Object;

    #[test]
    fn test_default_options_leave_slashes_and_unicode() {
        let json = encode(&Node::from("a/b é"), EncodeOptions::default()).unwrap();
        assert_eq!(json, r#""a/b é""#);
    }

    #[test]
    fn test_empty_options_escape_slashes_and_unicode() {
        let json = encode(&Node::from("a/b é😀"), EncodeOptions::empty()).unwrap();
        assert_eq!(json, r#""a\/b \u00e9\ud83d\ude00""#);
    }

    #[test]
    fn test_html_escapes() {
        let json = html_encode(&Node::from("<b>&'\"</b>")).unwrap();
        assert_eq!(json, r#""\u003Cb\u003E\u0026\u0027\u0022\u003C\/b\u003E""#);
    }

    #[test]
    fn test_keys_are_escaped_too() {
        let obj = Object::new().with_field("<k>", 1);
        let json = html_encode(&obj.into()).unwrap();
        assert_eq!(json, r#"{"\u003Ck\u003E":1}"#);
    }

    #[test]
    fn test_zero_fraction() {
        let value = Node::List(vec![Node::Float(1.0), Node::Float(2.5)]);
        assert_eq!(encode(&value, EncodeOptions::default()).unwrap(), "[1,2.5]");
        let opts = EncodeOptions::default() | EncodeOptions::PRESERVE_ZERO_FRACTION;
        assert_eq!(encode(&value, opts).unwrap(), "[1.0,2.5]");
    }

    #[test]
    fn test_pretty_print_uses_four_spaces() {
        let obj = Object::new().with_field("a", Node::List(vec![Node::Int(1)]));
        let opts = EncodeOptions::default() | EncodeOptions::PRETTY_PRINT;
        assert_eq!(
            encode(&obj.into(), opts).unwrap(),
            "{\n    \"a\": [\n        1\n    ]\n}"
        );
    }

    #[test]
    fn test_force_object_option() {
        let value = Node::List(vec![Node::from("x")]);
        let opts = EncodeOptions::default() | EncodeOptions::FORCE_OBJECT;
        assert_eq!(encode(&value, opts).unwrap(), r#"{"0":"x"}"#);
    }

    #[test]
    fn test_control_characters_still_escaped() {
        let json = encode(&Node::from("a\nb\u{1}"), EncodeOptions::default()).unwrap();
        assert_eq!(json, r#""a\nb\u0001""#);
    }

    #[test]
    fn test_decode_scalar_inputs() {
        assert_eq!(decode(&Node::Int(5), true).unwrap(), Node::Int(5));
        assert_eq!(decode(&Node::Bool(true), true).unwrap(), Node::Int(1));
        assert!(decode(&Node::Bool(false), true).unwrap().is_null());
    }

    #[test]
    fn test_classify_messages() {
        let cases = [
            ("[1}", ErrorKind::StateMismatch),
            ("{\"a\":1]", ErrorKind::StateMismatch),
            ("[1,", ErrorKind::Syntax),
            ("nul", ErrorKind::Syntax),
            ("\"a\u{1}b\"", ErrorKind::CtrlChar),
            ("{'a':1}", ErrorKind::Syntax),
        ];
        for (input, kind) in cases {
            let err = decode_str(input, true).unwrap_err();
            assert_eq!(err.kind(), kind, "input {input:?}");
        }
    }

    /// Runs deeply recursive cases on a thread with room for debug-build frames.
    fn on_large_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        std::thread::Builder::new()
            .stack_size(64 << 20)
            .spawn(f)
            .unwrap()
            .join()
            .unwrap()
    }

    fn nested(levels: usize) -> String {
        format!("{}1{}", "[".repeat(levels), "]".repeat(levels))
    }

    #[test]
    fn test_decode_nesting_limit() {
        on_large_stack(|| {
            let node = decode_str(&nested(MAX_DEPTH), true).unwrap();
            assert!(matches!(node, Node::List(_)));
            let err = decode_str(&nested(MAX_DEPTH + 1), true).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Depth);
        });
    }

    #[test]
    fn test_brackets_inside_strings_do_not_nest() {
        let text = format!(r#"["{}\"{}"]"#, "[".repeat(600), "{".repeat(600));
        assert!(!exceeds_depth(&text, MAX_DEPTH));
        assert!(decode_str(&text, true).is_ok());
    }

    #[test]
    fn test_deep_graph_round_trips() {
        on_large_stack(|| {
            let mut value = Node::Int(1);
            for _ in 0..MAX_DEPTH {
                value = Node::List(vec![value]);
            }
            let json = encode(&value, EncodeOptions::default()).unwrap();
            assert_eq!(decode(&Node::String(json), true).unwrap(), value);
        });
    }

    #[test]
    fn test_negative_zero_keeps_sign() {
        let opts = EncodeOptions::default();
        assert_eq!(encode(&Node::Float(-0.0), opts).unwrap(), "-0");
        assert_eq!(encode(&Node::Float(0.0), opts).unwrap(), "0");
        let opts = opts | EncodeOptions::PRESERVE_ZERO_FRACTION;
        assert_eq!(encode(&Node::Float(-0.0), opts).unwrap(), "-0.0");
    }
}

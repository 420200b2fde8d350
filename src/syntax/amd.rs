//! Reads AMD `define({...})` message modules using Tree-sitter.

use serde_json::{
    Map,
    Value,
};
use tree_sitter::{
    Node,
    Parser,
};

use super::SyntaxError;

/// Name of the AMD module definition function.
const DEFINE_FN: &str = "define";

/// Extracts text content from a tree-sitter node
fn node_text<'a>(node: Node<'_>, source: &'a [u8]) -> Result<&'a str, SyntaxError> {
    node.utf8_text(source).map_err(|_| SyntaxError::ParseFailed)
}

/// Builds an `Unsupported` error pointing at the node
fn unsupported(what: &'static str, node: Node<'_>, source: &[u8]) -> SyntaxError {
    SyntaxError::Unsupported {
        what,
        text: node.utf8_text(source).unwrap_or_default().chars().take(40).collect(),
        line: node.start_position().row + 1,
    }
}

/// Parses a `define({...})` module into the value tree of its object literal.
///
/// Object keys may be identifiers, string literals or numbers. Values may be
/// string literals, `true`/`false` or nested object literals. When `define`
/// receives several arguments (e.g. a dependency array), the last one must be
/// the object literal.
///
/// # Examples
/// ```
/// use nls_bundle::syntax::parse_define_module;
///
/// let value = parse_define_module(r#"define({ root: { "hello": "Hello" }, fr: true });"#).unwrap();
/// assert_eq!(value["root"]["hello"], "Hello");
/// assert_eq!(value["fr"], true);
/// ```
///
/// # Errors
/// Returns `SyntaxError` if:
/// - Language setup fails
/// - The source contains syntax errors
/// - No `define` call with an object literal is found
/// - The object contains anything but static strings, booleans and objects
pub fn parse_define_module(source: &str) -> Result<Value, SyntaxError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_javascript::LANGUAGE.into())?;
    let tree = parser.parse(source, None).ok_or(SyntaxError::ParseFailed)?;
    let root_node = tree.root_node();
    let source_bytes = source.as_bytes();

    if root_node.has_error() {
        let position = find_error_node(root_node).unwrap_or(root_node).start_position();
        return Err(SyntaxError::Malformed { line: position.row + 1, column: position.column + 1 });
    }

    let object = find_define_object(root_node, source_bytes)?.ok_or(SyntaxError::MissingDefine)?;
    object_to_value(object, source_bytes)
}

/// Finds the first error or missing node, depth first
fn find_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().filter(Node::has_error).find_map(find_error_node)
}

/// Finds the object literal passed to a top-level `define(...)` call
fn find_define_object<'tree>(
    program: Node<'tree>,
    source: &[u8],
) -> Result<Option<Node<'tree>>, SyntaxError> {
    let mut cursor = program.walk();
    for statement in program.named_children(&mut cursor) {
        if statement.kind() != "expression_statement" {
            continue;
        }
        let Some(call) = statement.named_child(0) else {
            continue;
        };
        if call.kind() != "call_expression" {
            continue;
        }
        let Some(function) = call.child_by_field_name("function") else {
            continue;
        };
        if function.kind() != "identifier" || node_text(function, source)? != DEFINE_FN {
            continue;
        }
        let Some(arguments) = call.child_by_field_name("arguments") else {
            continue;
        };

        let mut args_cursor = arguments.walk();
        let last_arg =
            arguments.named_children(&mut args_cursor).filter(|arg| arg.kind() != "comment").last();
        return Ok(last_arg.filter(|arg| arg.kind() == "object"));
    }
    Ok(None)
}

/// Converts an object literal into a JSON object
fn object_to_value(node: Node<'_>, source: &[u8]) -> Result<Value, SyntaxError> {
    let mut map = Map::new();
    let mut cursor = node.walk();
    for member in node.named_children(&mut cursor) {
        match member.kind() {
            "comment" => {}
            "pair" => {
                let (key, value) = pair_to_entry(member, source)?;
                map.insert(key, value);
            }
            _ => return Err(unsupported("object member", member, source)),
        }
    }
    Ok(Value::Object(map))
}

fn pair_to_entry(node: Node<'_>, source: &[u8]) -> Result<(String, Value), SyntaxError> {
    let key_node = node.child_by_field_name("key").ok_or(SyntaxError::ParseFailed)?;
    let value_node = node.child_by_field_name("value").ok_or(SyntaxError::ParseFailed)?;

    let key = match key_node.kind() {
        "property_identifier" | "number" => node_text(key_node, source)?.to_string(),
        "string" => string_literal(key_node, source)?,
        _ => return Err(unsupported("property key", key_node, source)),
    };

    let value = match value_node.kind() {
        "string" => Value::String(string_literal(value_node, source)?),
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "object" => object_to_value(value_node, source)?,
        _ => return Err(unsupported("property value", value_node, source)),
    };

    Ok((key, value))
}

/// Decodes a string literal, resolving escape sequences
///
/// A high surrogate escape must be directly followed by a low surrogate
/// escape; the pair decodes to one character.
fn string_literal(node: Node<'_>, source: &[u8]) -> Result<String, SyntaxError> {
    let mut text = String::new();
    let mut pending_high: Option<(u32, Node<'_>)> = None;
    let mut cursor = node.walk();
    for part in node.named_children(&mut cursor) {
        let escape = match part.kind() {
            "string_fragment" => None,
            "escape_sequence" => Some(
                decode_escape(node_text(part, source)?)
                    .ok_or_else(|| unsupported("escape sequence", part, source))?,
            ),
            _ => return Err(unsupported("string content", part, source)),
        };

        if let Some((high, high_node)) = pending_high.take() {
            let Some(Escape::Surrogate(low)) = escape else {
                return Err(unsupported("escape sequence", high_node, source));
            };
            let combined = combine_surrogates(high, low)
                .ok_or_else(|| unsupported("escape sequence", high_node, source))?;
            text.push(combined);
            continue;
        }

        match escape {
            None => text.push_str(node_text(part, source)?),
            Some(Escape::Char(c)) => text.push(c),
            Some(Escape::Text(decoded)) => text.push_str(&decoded),
            Some(Escape::LineContinuation) => {}
            Some(Escape::Surrogate(unit)) if is_high_surrogate(unit) => {
                pending_high = Some((unit, part));
            }
            Some(Escape::Surrogate(_)) => return Err(unsupported("escape sequence", part, source)),
        }
    }

    if let Some((_, high_node)) = pending_high {
        return Err(unsupported("escape sequence", high_node, source));
    }
    Ok(text)
}

/// A decoded escape sequence
#[derive(Debug, Clone, PartialEq, Eq)]
enum Escape {
    /// A single character
    Char(char),
    /// Legacy octal escape that consumed fewer digits than the token holds
    Text(String),
    /// UTF-16 surrogate code unit, only valid as half of a pair
    Surrogate(u32),
    /// Backslash before a line terminator, decodes to nothing
    LineContinuation,
}

/// Whether a UTF-16 code unit opens a surrogate pair
const fn is_high_surrogate(unit: u32) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

/// Joins a high and a low surrogate into the character they encode
fn combine_surrogates(high: u32, low: u32) -> Option<char> {
    if !is_high_surrogate(high) || !matches!(low, 0xDC00..=0xDFFF) {
        return None;
    }
    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}

/// Decodes a single JavaScript escape sequence (including the backslash)
fn decode_escape(sequence: &str) -> Option<Escape> {
    let body = sequence.strip_prefix('\\')?;
    let mut chars = body.chars();
    let decoded = match chars.next()? {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        '0'..='7' => return decode_octal(body),
        'u' => {
            let hex = chars.as_str();
            let hex = hex.strip_prefix('{').and_then(|h| h.strip_suffix('}')).unwrap_or(hex);
            let code = u32::from_str_radix(hex, 16).ok()?;
            if matches!(code, 0xD800..=0xDFFF) {
                return Some(Escape::Surrogate(code));
            }
            char::from_u32(code)?
        }
        'x' => char::from_u32(u32::from_str_radix(chars.as_str(), 16).ok()?)?,
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => return Some(Escape::LineContinuation),
        other => other,
    };
    Some(Escape::Char(decoded))
}

/// Legacy octal escape: at most `\377`, a third digit that would overflow is literal
fn decode_octal(digits: &str) -> Option<Escape> {
    if !digits.bytes().all(|b| matches!(b, b'0'..=b'7')) {
        return None;
    }
    let value = u32::from_str_radix(digits, 8).ok()?;
    if value <= 0o377 {
        return char::from_u32(value).map(Escape::Char);
    }
    let (head, tail) = digits.split_at(2);
    let mut text = String::new();
    text.push(char::from_u32(u32::from_str_radix(head, 8).ok()?)?);
    text.push_str(tail);
    Some(Escape::Text(text))
}

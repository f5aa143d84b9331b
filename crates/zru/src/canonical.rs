//! Signing-string construction for ZRU notifications.
//!
//! The platform signs a notification by sorting its keys, dropping unsigned
//! fields, cleaning each remaining value, concatenating the values with no
//! separator and appending the account's secret key. The output here must
//! match the sender byte for byte.

use std::fmt::Write;

use serde_json::{Number, Value};

use crate::constants::{CLEANED_CHARS, SIGNATURE_IGNORED_FIELDS, UNSIGNED_FIELD_PREFIX};
use crate::payload::RawPayload;

/// Whether `key` takes part in the signature at all (independent of its value).
pub fn is_signed_field(key: &str) -> bool {
    !SIGNATURE_IGNORED_FIELDS.contains(&key) && !key.starts_with(UNSIGNED_FIELD_PREFIX)
}

/// The ordered `(key, cleaned value)` pairs that make up the signing string.
///
/// Keys are sorted by byte order; null values, ignored keys and `_` metadata
/// are skipped.
pub fn signature_material(payload: &RawPayload) -> Vec<(&str, String)> {
    let mut keys: Vec<&str> = payload.keys().collect();
    keys.sort_unstable();

    keys.into_iter()
        .filter(|key| is_signed_field(key))
        .filter_map(|key| match payload.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some((key, clean_value(&value_to_text(value)))),
        })
        .collect()
}

/// Build the full signing string: every signed value followed by `secret`.
pub fn canonicalize(payload: &RawPayload, secret: &str) -> String {
    let mut text = String::new();
    for (_, value) in signature_material(payload) {
        text.push_str(&value);
    }
    text.push_str(secret);
    text
}

/// Replace each of `< > " ' ( ) \` with one space, then trim surrounding whitespace.
pub fn clean_value(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| if CLEANED_CHARS.contains(&c) { ' ' } else { c })
        .collect();
    replaced.trim_matches(is_strippable).to_string()
}

/// Whitespace as the sender strips it: Unicode whitespace plus the
/// information separators U+001C..U+001F.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Text form of a payload value as the platform renders it before signing.
///
/// Strings are verbatim, booleans are `True`/`False` and floats use the
/// shortest round-trip digits (`12.5`, `1e-05`, `1e+16`). Arrays and objects
/// render as `[1, 2]` and `{'k': 'v'}` with nested nulls as `None`.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => {
            let mut out = String::new();
            write_literal(&mut out, other);
            out
        }
    }
}

fn write_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&number_text(n)),
        Value::String(s) => write_quoted(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_literal(out, item);
            }
            out.push(']');
        }
        Value::Object(fields) => {
            out.push('{');
            for (i, (key, item)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(out, key);
                out.push_str(": ");
                write_literal(out, item);
            }
            out.push('}');
        }
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map(float_text).unwrap_or_else(|| n.to_string())
}

/// Shortest round-trip decimal form of a float.
///
/// Magnitudes in `[1e-4, 1e16)` use fixed notation with at least one
/// fractional digit; everything else uses scientific notation with a signed,
/// two-digit minimum exponent.
pub fn float_text(f: f64) -> String {
    // `{:e}` yields the shortest round-trip digits, e.g. `-1.25e-7`.
    let sci = format!("{:e}", f.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let point = exponent.parse::<i32>().unwrap_or(0) + 1;
    let sign = if f.is_sign_negative() { "-" } else { "" };

    if point <= -4 || point > 16 {
        let (head, tail) = digits.split_at(1);
        let exp = point - 1;
        let exp_sign = if exp < 0 { '-' } else { '+' };
        if tail.is_empty() {
            format!("{sign}{head}e{exp_sign}{:02}", exp.abs())
        } else {
            format!("{sign}{head}.{tail}e{exp_sign}{:02}", exp.abs())
        }
    } else if point <= 0 {
        format!("{sign}0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else if point as usize >= digits.len() {
        let zeros = "0".repeat(point as usize - digits.len());
        format!("{sign}{digits}{zeros}.0")
    } else {
        let (int, frac) = digits.split_at(point as usize);
        format!("{sign}{int}.{frac}")
    }
}

/// Quoted string literal: single quotes unless the text contains a single
/// quote and no double quote; backslash, the quote and non-printables escaped.
fn write_quoted(out: &mut String, s: &str) {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_unprintable(c) => {
                let code = c as u32;
                let _ = if code < 0x100 {
                    write!(out, "\\x{code:02x}")
                } else if code < 0x10000 {
                    write!(out, "\\u{code:04x}")
                } else {
                    write!(out, "\\U{code:08x}")
                };
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

fn is_unprintable(c: char) -> bool {
    matches!(
        c as u32,
        0x00..=0x1f
            | 0x7f..=0xa0
            | 0xad
            | 0x1680
            | 0x2000..=0x200f
            | 0x2028..=0x202f
            | 0x205f..=0x2064
            | 0x3000
            | 0xfeff
    )
}

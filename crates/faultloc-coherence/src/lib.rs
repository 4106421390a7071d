//! Structural diff between two language variants of the same address.
//! Natural-language text (`Description`) is expected to differ and is never
//! compared for content; everything else must be identical, so every
//! divergence this module reports is a real corpus defect.

use faultloc_domain::{Divergence, DivergenceKind, Side};
use serde_json::Value;

/// Keys whose values legitimately differ across languages.
const EXCLUDED_KEYS: &[&str] = &["Description"];

/// Compare two documents (as JSON values) structurally. Read-only; symmetric
/// modulo side direction: `compare(a, b)` and `compare(b, a)` report the same
/// findings with `Side` flipped.
pub fn compare(left: &Value, right: &Value) -> Vec<Divergence> {
    let mut out = Vec::new();
    walk("", left, right, &mut out);
    out
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn walk(path: &str, left: &Value, right: &Value, out: &mut Vec<Divergence>) {
    match (left, right) {
        (Value::Object(a), Value::Object(b)) => {
            for (key, lv) in a {
                if EXCLUDED_KEYS.contains(&key.as_str()) {
                    check_emptiness(path, key, lv, b.get(key), out);
                    continue;
                }
                match b.get(key) {
                    Some(rv) => walk(&join(path, key), lv, rv, out),
                    None => out.push(Divergence {
                        path: join(path, key),
                        kind: DivergenceKind::MissingKey,
                        side: Some(Side::Right),
                        detail: format!("key {key:?} is missing"),
                    }),
                }
            }
            for key in b.keys() {
                if EXCLUDED_KEYS.contains(&key.as_str()) || a.contains_key(key) {
                    continue;
                }
                out.push(Divergence {
                    path: join(path, key),
                    kind: DivergenceKind::MissingKey,
                    side: Some(Side::Left),
                    detail: format!("key {key:?} is missing"),
                });
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            if a.len() != b.len() {
                out.push(Divergence {
                    path: path.to_string(),
                    kind: DivergenceKind::LengthMismatch,
                    side: None,
                    detail: format!("{} vs {} elements", a.len(), b.len()),
                });
            }
            report_unaligned_ids(path, a, b, out);
            for (i, (lv, rv)) in a.iter().zip(b.iter()).enumerate() {
                walk(&format!("{path}[{i}]"), lv, rv, out);
            }
        }
        (l, r) if kind_name(l) != kind_name(r) => {
            out.push(Divergence {
                path: path.to_string(),
                kind: DivergenceKind::TypeMismatch,
                side: None,
                detail: format!("{} vs {}", kind_name(l), kind_name(r)),
            });
        }
        (l, r) => {
            if l != r {
                out.push(Divergence {
                    path: path.to_string(),
                    kind: DivergenceKind::ValueMismatch,
                    side: None,
                    detail: format!("{l} vs {r}"),
                });
            }
        }
    }
}

/// `Description` content is never compared, but "empty on one side only" is a
/// structural fact: it means one variant was authored and the other was not.
fn check_emptiness(
    path: &str,
    key: &str,
    left: &Value,
    right: Option<&Value>,
    out: &mut Vec<Divergence>,
) {
    let (Value::String(l), Some(Value::String(r))) = (left, right) else {
        return;
    };
    let (l_empty, r_empty) = (l.trim().is_empty(), r.trim().is_empty());
    if l_empty != r_empty {
        out.push(Divergence {
            path: join(path, key),
            kind: DivergenceKind::EmptinessMismatch,
            side: Some(if l_empty { Side::Left } else { Side::Right }),
            detail: "text is empty on one side only".to_string(),
        });
    }
}

/// When both sequences carry entry ids, ids present on one side only indicate
/// an out-of-band insertion or removal that positional recursion would report
/// as a cascade of value mismatches.
fn report_unaligned_ids(path: &str, a: &[Value], b: &[Value], out: &mut Vec<Divergence>) {
    let ids = |side: &[Value]| -> Option<Vec<i64>> {
        side.iter()
            .map(|v| v.get("Id").and_then(Value::as_i64))
            .collect()
    };
    let (Some(left_ids), Some(right_ids)) = (ids(a), ids(b)) else {
        return;
    };
    for id in &left_ids {
        if !right_ids.contains(id) {
            out.push(Divergence {
                path: path.to_string(),
                kind: DivergenceKind::UnalignedEntry,
                side: Some(Side::Right),
                detail: format!("entry Id={id} has no counterpart"),
            });
        }
    }
    for id in &right_ids {
        if !left_ids.contains(id) {
            out.push(Divergence {
                path: path.to_string(),
                kind: DivergenceKind::UnalignedEntry,
                side: Some(Side::Left),
                detail: format!("entry Id={id} has no counterpart"),
            });
        }
    }
}

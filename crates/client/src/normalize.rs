// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Response envelope normalization.
//!
//! The upstream location API is not consistent about its response shape:
//! some deployments return a raw array, others wrap it in `{data: [...]}`,
//! `{items: [...]}`, or `{body: [...]}`. The shapes are tried in exactly
//! that precedence order; when none match the result is an empty list.
//! Normalization never fails.

use alms_domain::LocationNode;
use serde_json::Value;

/// Envelope keys tried after the raw-array shape, in precedence order.
const ENVELOPE_KEYS: [&str; 3] = ["data", "items", "body"];

/// Extracts location nodes from an upstream response body.
///
/// Rows that are missing a numeric `id` or a string `name` are skipped;
/// extra fields (ancestor foreign keys and the like) are ignored.
#[must_use]
pub fn normalize_nodes(value: &Value) -> Vec<LocationNode> {
    extract_rows(value).map_or_else(Vec::new, |rows| {
        rows.iter().filter_map(parse_node).collect()
    })
}

/// Finds the row array inside the response, trying each accepted shape.
fn extract_rows(value: &Value) -> Option<&Vec<Value>> {
    if let Some(rows) = value.as_array() {
        return Some(rows);
    }
    for key in ENVELOPE_KEYS {
        if let Some(rows) = value.get(key).and_then(Value::as_array) {
            return Some(rows);
        }
    }
    None
}

fn parse_node(row: &Value) -> Option<LocationNode> {
    let id: i64 = row.get("id")?.as_i64()?;
    let name: &str = row.get("name")?.as_str()?;
    Some(LocationNode::new(id, name))
}

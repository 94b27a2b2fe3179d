// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute codec
//!
//! Typed attribute values held by a record and their ISO 10303-21
//! (STEP physical file) text encoding:
//!
//! | Value        | Encoding        |
//! |--------------|-----------------|
//! | `Real`       | `1.5`, `0.`     |
//! | `Integer`    | `3`             |
//! | `Text`       | `'it''s'`       |
//! | `Enumerated` | `.ELEMENT.`     |
//! | `Reference`  | `#42`           |
//! | `Omitted`    | `$`             |
//! | `Derived`    | `*`             |
//! | `List`       | `(#1, #2, #3)`  |

use std::fmt::Write;

use crate::id::EntityId;

/// One typed attribute slot of a record
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Real number
    Real(f64),
    /// Integer (dimension counts)
    Integer(i64),
    /// Text string
    Text(String),
    /// Enumerated symbol, stored without the surrounding dots
    Enumerated(String),
    /// Reference to an already allocated record
    Reference(EntityId),
    /// Attribute intentionally left unset: `$`
    Omitted,
    /// Attribute derived from a supertype: `*`
    Derived,
    /// Ordered aggregate
    List(Vec<AttributeValue>),
}

#[inline]
pub fn real(value: f64) -> AttributeValue {
    AttributeValue::Real(value)
}

#[inline]
pub fn integer(value: i64) -> AttributeValue {
    AttributeValue::Integer(value)
}

#[inline]
pub fn text(value: impl Into<String>) -> AttributeValue {
    AttributeValue::Text(value.into())
}

#[inline]
pub fn enumerated(symbol: impl Into<String>) -> AttributeValue {
    AttributeValue::Enumerated(symbol.into())
}

/// Boolean as the `.T.`/`.F.` enumeration
#[inline]
pub fn boolean(value: bool) -> AttributeValue {
    enumerated(if value { "T" } else { "F" })
}

#[inline]
pub fn reference(id: EntityId) -> AttributeValue {
    AttributeValue::Reference(id)
}

#[inline]
pub fn omitted() -> AttributeValue {
    AttributeValue::Omitted
}

#[inline]
pub fn derived() -> AttributeValue {
    AttributeValue::Derived
}

#[inline]
pub fn list(values: Vec<AttributeValue>) -> AttributeValue {
    AttributeValue::List(values)
}

/// List of references
pub fn reference_list(ids: &[EntityId]) -> AttributeValue {
    AttributeValue::List(ids.iter().copied().map(reference).collect())
}

/// List of reals
pub fn real_list(values: &[f64]) -> AttributeValue {
    AttributeValue::List(values.iter().copied().map(real).collect())
}

/// Text, or `$` when absent
pub fn optional_text(value: Option<&str>) -> AttributeValue {
    value.map_or(AttributeValue::Omitted, text)
}

/// Reference, or `$` when absent
pub fn optional_reference(id: Option<EntityId>) -> AttributeValue {
    id.map_or(AttributeValue::Omitted, reference)
}

impl AttributeValue {
    /// Get as entity reference
    #[inline]
    pub fn as_reference(&self) -> Option<EntityId> {
        match self {
            AttributeValue::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// Get as real
    #[inline]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            AttributeValue::Real(v) => Some(*v),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as list
    #[inline]
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Push every record this value references, depth first
    pub fn collect_references(&self, out: &mut Vec<EntityId>) {
        match self {
            AttributeValue::Reference(id) => out.push(*id),
            AttributeValue::List(items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
            _ => {}
        }
    }

    /// Append the STEP encoding of this value
    pub fn write_step(&self, out: &mut String) {
        match self {
            AttributeValue::Real(v) => write_real(*v, out),
            AttributeValue::Integer(i) => {
                let _ = write!(out, "{}", i);
            }
            AttributeValue::Text(s) => write_text(s, out),
            AttributeValue::Enumerated(symbol) => {
                out.push('.');
                out.push_str(symbol);
                out.push('.');
            }
            AttributeValue::Reference(id) => {
                let _ = write!(out, "{}", id);
            }
            AttributeValue::Omitted => out.push('$'),
            AttributeValue::Derived => out.push('*'),
            AttributeValue::List(items) => {
                out.push('(');
                write_separated(items, out);
                out.push(')');
            }
        }
    }
}

/// Write values separated by `", "`
pub(crate) fn write_separated(values: &[AttributeValue], out: &mut String) {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        value.write_step(out);
    }
}

/// STEP reals always carry a decimal point: `0.`, `5.`, `0.25`.
///
/// Non-finite values have no STEP encoding; encoders reject them before
/// a record is built, so they only reach here through direct codec use
/// and are written as `$`.
pub fn write_real(value: f64, out: &mut String) {
    if !value.is_finite() {
        out.push('$');
        return;
    }
    if value == 0.0 {
        // Also normalizes -0.0
        out.push_str("0.");
        return;
    }
    let start = out.len();
    let _ = write!(out, "{}", value);
    if !out[start..].contains('.') {
        out.push('.');
    }
}

/// Quote and escape a string: `'` and `\` are doubled, anything outside
/// printable ASCII goes into `\X2\...\X0\` UTF-16 groups.
pub fn write_text(value: &str, out: &mut String) {
    out.push('\'');
    let mut wide = false;
    for ch in value.chars() {
        if ch.is_ascii() && !ch.is_ascii_control() {
            if wide {
                out.push_str("\\X0\\");
                wide = false;
            }
            match ch {
                '\'' => out.push_str("''"),
                '\\' => out.push_str("\\\\"),
                _ => out.push(ch),
            }
        } else {
            if !wide {
                out.push_str("\\X2\\");
                wide = true;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                let _ = write!(out, "{:04X}", unit);
            }
        }
    }
    if wide {
        out.push_str("\\X0\\");
    }
    out.push('\'');
}

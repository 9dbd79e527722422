//! Attribute values for contract evaluation.
//!
//! Hashing follows the generated code exactly, so a hash computed here
//! matches the one the emitted `hashCode()` produces for the same values.

use std::fmt;
use std::sync::Arc;

use crate::base::TypeName;
use crate::base::constants::NULL_LITERAL;

/// A runtime value held by an attribute.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    /// Any integral value, including `char`.
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    /// A callback object, compared by identity.
    Callback(u64),
    /// An expression the evaluator cannot interpret, compared by its text.
    Opaque(Arc<str>),
}

impl Value {
    pub fn str(value: impl Into<Arc<str>>) -> Self {
        Value::Str(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "floating point",
            Value::Str(_) => "string",
            Value::Callback(_) => "callback",
            Value::Opaque(_) => "expression",
        }
    }

    /// Interpret a default-value expression.
    ///
    /// Literals (`null`, booleans, numbers with optional suffix, string and
    /// char literals) are evaluated; anything else is kept as opaque text.
    pub fn from_literal(code: &str) -> Self {
        let code = code.trim();
        match code {
            NULL_LITERAL => return Value::Null,
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
        if let Some(inner) = code.strip_prefix('"').and_then(|c| c.strip_suffix('"')) {
            return Value::Str(Arc::from(unescape(inner)));
        }
        if let Some(inner) = code.strip_prefix('\'').and_then(|c| c.strip_suffix('\'')) {
            let unescaped = unescape(inner);
            let mut chars = unescaped.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return Value::Int(i64::from(u32::from(c)));
            }
        }
        if let Some(int) = parse_int(code) {
            return Value::Int(int);
        }
        if let Some(float) = parse_float(code) {
            return Value::Float(float);
        }
        Value::Opaque(Arc::from(code))
    }

    /// Whether a value of this kind can be stored in an attribute of `ty`.
    pub fn fits(&self, ty: &TypeName) -> bool {
        if !ty.is_primitive() {
            return true;
        }
        match (ty.name(), self) {
            ("boolean", Value::Bool(_)) => true,
            ("float" | "double", Value::Float(_) | Value::Int(_)) => true,
            ("byte" | "short" | "int" | "long" | "char", Value::Int(_)) => true,
            (_, Value::Opaque(_)) => true,
            _ => false,
        }
    }

    /// This value's contribution to the generated `hashCode()` for an
    /// attribute declared as `ty`.
    pub fn hash_code(&self, ty: &TypeName) -> i32 {
        let primitive = ty.is_primitive();
        match self {
            Value::Null => 0,
            Value::Bool(b) if primitive => i32::from(*b),
            Value::Bool(b) => {
                if *b {
                    1231
                } else {
                    1237
                }
            }
            Value::Int(v) if is_long(ty) => fold(*v),
            Value::Int(v) if is_float(ty) => float_hash(*v as f32, primitive),
            Value::Int(v) if is_double(ty) => double_hash(*v as f64),
            Value::Int(v) => *v as i32,
            Value::Float(f) if is_float(ty) => float_hash(*f as f32, primitive),
            Value::Float(f) => double_hash(*f),
            Value::Str(s) | Value::Opaque(s) => string_hash(s),
            Value::Callback(id) => fold(*id as i64),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // Float.compare / Double.compare semantics.
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Callback(a), Value::Callback(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str(NULL_LITERAL),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Str(s) | Value::Opaque(s) => f.write_str(s),
            Value::Callback(id) => write!(f, "Callback@{id:x}"),
        }
    }
}

fn is_long(ty: &TypeName) -> bool {
    ty.is_named("long") || ty.is_named("java.lang.Long")
}

fn is_float(ty: &TypeName) -> bool {
    ty.is_named("float") || ty.is_named("java.lang.Float")
}

fn is_double(ty: &TypeName) -> bool {
    ty.is_named("double") || ty.is_named("java.lang.Double")
}

/// `(int) (v ^ (v >>> 32))`
fn fold(v: i64) -> i32 {
    (v ^ ((v as u64) >> 32) as i64) as i32
}

fn float_hash(v: f32, primitive: bool) -> i32 {
    // Primitive fields hash both zeros to 0.
    if primitive && v == 0.0 {
        return 0;
    }
    v.to_bits() as i32
}

fn double_hash(v: f64) -> i32 {
    fold(v.to_bits() as i64)
}

/// `String.hashCode()` over UTF-16 code units.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

fn parse_int(code: &str) -> Option<i64> {
    let digits = code
        .strip_suffix('L')
        .or_else(|| code.strip_suffix('l'))
        .unwrap_or(code);
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    let (negative, digits) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest.to_string()),
        None => (false, digits),
    };
    let magnitude = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.chars().all(|c| c.is_ascii_digit()) && !digits.is_empty() {
        digits.parse().ok()?
    } else {
        return None;
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_float(code: &str) -> Option<f64> {
    let trimmed = code.trim_end_matches(['f', 'F', 'd', 'D']);
    if trimmed.is_empty() || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

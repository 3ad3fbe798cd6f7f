//! Runtime parameter values and the capture scope they are read from.
//!
//! [`Value`] is the concrete payload bound to a query parameter. Values never
//! appear in SQL text; the emitter only ever writes placeholder tokens and
//! hands the values back alongside the compiled string.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A concrete value bound as a query parameter.
///
/// `Null` is an explicit parameter value; it is never coerced into SQL
/// literal `NULL` text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Json(serde_json::Value),
}

impl Value {
    /// Check if this is the explicit null parameter.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert a JSON node into a parameter value.
    ///
    /// Scalars map to their scalar variants; arrays and objects stay wrapped
    /// as [`Value::Json`].
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Json(other.clone()),
        }
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v $(as $cast)?)
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float,
    String => Text,
    Vec<u8> => Bytes,
    Uuid => Uuid,
    DateTime<Utc> => Timestamp,
    NaiveDate => Date,
    serde_json::Value => Json,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// A deferred computation producing a parameter value.
///
/// This is the general-evaluation fallback for hole expressions that are
/// neither literal constants nor captured-variable reads. The closure runs at
/// most once per hole per compile call.
pub struct Thunk(Box<dyn Fn() -> Result<Value, String> + Send + Sync>);

impl Thunk {
    /// Wrap a deferred computation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Result<Value, String> + Send + Sync + 'static,
    {
        Thunk(Box::new(f))
    }

    pub(crate) fn call(&self) -> Result<Value, String> {
        (self.0)()
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Thunk").field(&"<deferred>").finish()
    }
}

/// Named values captured from the template's enclosing scope.
///
/// The front-end records closure-captured variables here so the evaluator can
/// read them directly instead of going through general evaluation.
///
/// # Example
/// ```
/// use sqlweave::CaptureScope;
///
/// let scope = CaptureScope::new().with("min_age", 18i32);
/// assert!(scope.get("min_age").is_some());
/// ```
#[derive(Debug, Default)]
pub struct CaptureScope {
    values: HashMap<String, Value>,
}

impl CaptureScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a captured value (consuming version, for chaining).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Record a captured value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Look up a capture by exact name (which may be a dotted path key).
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Resolve a dotted name path against this scope.
    ///
    /// Fast path: the full dotted path registered as a single key. Otherwise
    /// the base name is looked up and remaining segments are traversed
    /// through JSON object members.
    pub(crate) fn resolve(&self, path: &[String]) -> Result<Value, String> {
        debug_assert!(!path.is_empty());
        let dotted = path.join(".");
        if let Some(v) = self.get(&dotted) {
            return Ok(v.clone());
        }

        let (base, rest) = path.split_first().ok_or("empty capture path")?;
        let mut current = self
            .get(base)
            .ok_or_else(|| format!("unknown capture '{base}'"))?
            .clone();

        for member in rest {
            current = match current {
                Value::Json(serde_json::Value::Object(ref map)) => map
                    .get(member.as_str())
                    .map(Value::from_json)
                    .ok_or_else(|| format!("capture '{base}' has no member '{member}'"))?,
                _ => {
                    return Err(format!(
                        "cannot read member '{member}' of non-object capture '{base}'"
                    ));
                }
            };
        }
        Ok(current)
    }
}

/// Produce the concrete value for a value hole.
///
/// Fast path 1: literal constants are returned directly. Fast path 2: name
/// paths are read straight out of the capture scope. Fallback: deferred
/// computations are invoked. Errors are plain messages; the compiler attaches
/// the offending hole index.
pub(crate) fn evaluate(expr: &crate::classify::HoleExpr, scope: &CaptureScope) -> Result<Value, String> {
    use crate::classify::HoleExpr;

    match expr {
        HoleExpr::Const(v) => Ok(v.clone()),
        HoleExpr::Path(path) => scope.resolve(path),
        HoleExpr::Computed(thunk) => thunk.call(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn option_none_becomes_null() {
        let v: Value = Option::<i64>::None.into();
        assert!(v.is_null());
    }

    #[test]
    fn option_some_unwraps() {
        let v: Value = Some("abc").into();
        assert_eq!(v, Value::Text("abc".to_string()));
    }

    #[test]
    fn resolve_simple_capture() {
        let scope = CaptureScope::new().with("id", 42i64);
        let v = scope.resolve(&["id".to_string()]).unwrap();
        assert_eq!(v, Value::Int(42));
    }

    #[test]
    fn resolve_dotted_key_fast_path() {
        let scope = CaptureScope::new().with("filter.name", "alice");
        let v = scope
            .resolve(&["filter".to_string(), "name".to_string()])
            .unwrap();
        assert_eq!(v, Value::Text("alice".to_string()));
    }

    #[test]
    fn resolve_traverses_json_members() {
        let scope = CaptureScope::new().with("ctx", json!({ "page": { "size": 25 } }));
        let v = scope
            .resolve(&["ctx".to_string(), "page".to_string(), "size".to_string()])
            .unwrap();
        assert_eq!(v, Value::Int(25));
    }

    #[test]
    fn resolve_unknown_capture_fails() {
        let scope = CaptureScope::new();
        let err = scope.resolve(&["missing".to_string()]).unwrap_err();
        assert!(err.contains("unknown capture"));
    }

    #[test]
    fn resolve_member_of_scalar_fails() {
        let scope = CaptureScope::new().with("n", 1i64);
        let err = scope
            .resolve(&["n".to_string(), "field".to_string()])
            .unwrap_err();
        assert!(err.contains("non-object"));
    }

    #[test]
    fn thunk_runs_deferred_computation() {
        let t = Thunk::new(|| Ok(Value::Int(2 + 2)));
        assert_eq!(t.call().unwrap(), Value::Int(4));
    }
}

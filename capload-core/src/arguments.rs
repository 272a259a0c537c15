//! # Arguments
//!
//! Capabilities are late-bound, so their inputs and outputs are dynamically
//! typed [`Value`]s. [`Args`] carries positional and keyword values, and
//! handlers pull typed data back out with serde:
//!
//! ```rust,ignore
//! fn greet(args: Args) -> Result<Value, BoxError> {
//!     let who: String = args.get(0)?;
//!     let shout = args.kwarg_opt::<bool>("shout")?.unwrap_or(false);
//!     let text = format!("hello {who}");
//!     Ok(Value::from(if shout { text.to_uppercase() } else { text }))
//! }
//! ```
//!
//! Extraction failures are [`ArgError`]s; returned from a handler they become
//! the cause of a `CapabilityExecutionError`.

use crate::error::ArgError;
use serde::de::DeserializeOwned;
use serde_json::Map;

/// Dynamically typed value passed to and returned from capabilities.
pub use serde_json::Value;

/// Positional and keyword arguments for a capability invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    keyword: Map<String, Value>,
}

impl Args {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument, replacing an earlier one with the same key.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(key.into(), value.into());
        self
    }

    /// Positional arguments in call order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Keyword arguments.
    pub fn keywords(&self) -> &Map<String, Value> {
        &self.keyword
    }

    /// Number of positional arguments.
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// Returns `true` if there are neither positional nor keyword arguments.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Deserialize the positional argument at `index`.
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T, ArgError> {
        let value = self
            .positional
            .get(index)
            .ok_or(ArgError::MissingPositional(index))?;
        decode(value, || index.to_string())
    }

    /// Deserialize a required keyword argument.
    pub fn kwarg_value<T: DeserializeOwned>(&self, key: &str) -> Result<T, ArgError> {
        self.kwarg_opt(key)?
            .ok_or_else(|| ArgError::MissingKeyword(key.to_string()))
    }

    /// Deserialize an optional keyword argument.
    ///
    /// An explicit `null` counts as absent.
    pub fn kwarg_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ArgError> {
        match self.keyword.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode(value, || key.to_string()).map(Some),
        }
    }
}

fn decode<T: DeserializeOwned>(value: &Value, arg: impl FnOnce() -> String) -> Result<T, ArgError> {
    T::deserialize(value).map_err(|source| ArgError::Invalid { arg: arg(), source })
}

impl From<Vec<Value>> for Args {
    fn from(positional: Vec<Value>) -> Self {
        Self {
            positional,
            keyword: Map::new(),
        }
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Build [`Args`] from positional values and optional `key = value` pairs.
///
/// ```rust,ignore
/// let args = args!["world"; shout = true];
/// let none = args![];
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::new()$(.arg($value))+
    };
    ($($value:expr),* ; $($key:ident = $kw:expr),+ $(,)?) => {
        $crate::Args::new()$(.arg($value))*$(.kwarg(stringify!($key), $kw))+
    };
}

#[cfg(test)]
mod tests {
    use super::{Args, Value};
    use crate::error::ArgError;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_positional_extraction() {
        let args = Args::new().arg("world").arg(3);

        assert_eq!(args.get::<String>(0).unwrap(), "world");
        assert_eq!(args.get::<u8>(1).unwrap(), 3);
        assert!(matches!(args.get::<u8>(2), Err(ArgError::MissingPositional(2))));
    }

    #[test]
    fn test_invalid_type_reports_argument() {
        let args = Args::new().arg("not a number");

        match args.get::<i64>(0) {
            Err(ArgError::Invalid { arg, .. }) => assert_eq!(arg, "0"),
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }

    #[test]
    fn test_keyword_extraction() {
        let point = serde_json::json!({ "x": 1, "y": -2 });
        let args = Args::new().kwarg("at", point).kwarg("label", Value::Null);

        assert_eq!(args.kwarg_value::<Point>("at").unwrap(), Point { x: 1, y: -2 });
        assert_eq!(args.kwarg_opt::<String>("label").unwrap(), None);
        assert!(matches!(
            args.kwarg_value::<String>("label"),
            Err(ArgError::MissingKeyword(key)) if key == "label"
        ));
    }

    #[test]
    fn test_args_macro() {
        let empty = args![];
        assert!(empty.is_empty());

        let args = args!["a", 2; shout = true];
        assert_eq!(args.len(), 2);
        assert!(args.kwarg_value::<bool>("shout").unwrap());

        let kw_only = args![; lang = "en"];
        assert_eq!(kw_only.len(), 0);
        assert_eq!(kw_only.kwarg_value::<String>("lang").unwrap(), "en");
    }
}

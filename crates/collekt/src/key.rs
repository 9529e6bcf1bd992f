//! Key selectors.
//!
//! Several operations (`group_by`, `key_by`, `unique_by`, `sort_by`, the
//! `*_by` aggregations) accept either a property name or a function that
//! computes the key from an element. [`Key`] holds either form.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::value::prop;

/// Resolver closure stored by [`Key::with`].
pub type Resolver<'f> = Box<dyn Fn(&Value) -> Value + 'f>;

/// A property name or a key-resolving function.
///
/// # Example
///
/// ```
/// use collekt::Key;
/// use serde_json::json;
///
/// let by_name: Key = "name".into();
/// let by_len = Key::with(|item| json!(item["name"].as_str().map_or(0, str::len)));
///
/// let item = json!({"name": "abc"});
/// assert_eq!(by_name.resolve(&item), Some(json!("abc")));
/// assert_eq!(by_len.resolve(&item), Some(json!(3)));
/// ```
pub enum Key<'f> {
    /// Look up a property by name.
    Field(String),
    /// Compute the key from the element.
    Resolver(Resolver<'f>),
}

impl<'f> Key<'f> {
    /// Creates a property-name key.
    pub fn field(name: impl Into<String>) -> Self {
        Key::Field(name.into())
    }

    /// Creates a function key.
    pub fn with<F>(resolver: F) -> Self
    where
        F: Fn(&Value) -> Value + 'f,
    {
        Key::Resolver(Box::new(resolver))
    }

    /// Resolves the key for `item`.
    ///
    /// Returns `None` when a `Field` key names a property `item` does not own.
    pub fn resolve(&self, item: &Value) -> Option<Value> {
        match self {
            Key::Field(name) => prop(item, name).map(Cow::into_owned),
            Key::Resolver(resolver) => Some(resolver(item)),
        }
    }

    /// Returns the property name, if this is a `Field` key.
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Key::Field(name) => Some(name),
            Key::Resolver(_) => None,
        }
    }
}

impl fmt::Debug for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Key::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

impl From<&str> for Key<'_> {
    fn from(name: &str) -> Self {
        Key::Field(name.to_string())
    }
}

impl From<String> for Key<'_> {
    fn from(name: String) -> Self {
        Key::Field(name)
    }
}

impl From<&String> for Key<'_> {
    fn from(name: &String) -> Self {
        Key::Field(name.clone())
    }
}

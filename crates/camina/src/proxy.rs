//! Forwarding wrapper around one stored value.
//!
//! Statically, a [`Proxy<T>`] forwards through `Deref`/`DerefMut`, so every
//! method of `T` is callable on the proxy and returns exactly what `T`
//! returns. `Index`, `Display` and equality forward as well, and
//! [`Proxy::call`] forwards single-argument calls.
//!
//! Dynamically, named attribute access goes through [`Attributes`]. The proxy
//! can hold attributes of its own that shadow the wrapped value's; anything
//! it does not hold resolves against the wrapped value.
//!
//! Not forwarded: `Hash`, `Ord`, iteration (use `proxy.iter()` through
//! `Deref`), and calls taking more than one argument (pass a tuple). A
//! wrapped field can be read and replaced but never deleted; that fails with
//! `Unsupported`.

use crate::error::{CaminaError, Result, json_kind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Named, dynamically typed attribute access.
pub trait Attributes {
    /// Current value of `name`, if the attribute exists.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Replace the value of an existing attribute.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<()>;

    /// Remove an attribute.
    fn delete_attribute(&mut self, name: &str) -> Result<()>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// Any serde struct exposes its serialized fields as attributes.
impl<T: Serialize + DeserializeOwned> Attributes for T {
    fn attribute(&self, name: &str) -> Option<Value> {
        match serde_json::to_value(self).ok()? {
            Value::Object(mut fields) => fields.remove(name),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<()> {
        let expected = camina_convert::short_type_name::<T>();
        let mut fields = match serde_json::to_value(&*self) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => return Err(CaminaError::type_mismatch("struct", &other)),
            Err(_) => {
                return Err(CaminaError::Unsupported {
                    operation: format!("set_attribute on unserializable {expected}"),
                });
            }
        };
        if !fields.contains_key(name) {
            return Err(CaminaError::key_not_found(name));
        }
        let found = json_kind(&value);
        fields.insert(name.to_string(), value);
        let updated = serde_json::from_value::<T>(Value::Object(fields)).map_err(|_| {
            CaminaError::TypeMismatch {
                expected: format!("{expected}.{name}"),
                found: found.to_string(),
            }
        })?;
        *self = updated;
        Ok(())
    }

    fn delete_attribute(&mut self, name: &str) -> Result<()> {
        if self.has_attribute(name) {
            return Err(CaminaError::Unsupported {
                operation: format!("delete wrapped field {name}"),
            });
        }
        Err(CaminaError::key_not_found(name))
    }
}

/// Membership test for containers the proxy may wrap.
pub trait Holds<Q: ?Sized> {
    fn holds(&self, item: &Q) -> bool;
}

impl<Q: PartialEq> Holds<Q> for Vec<Q> {
    fn holds(&self, item: &Q) -> bool {
        self.contains(item)
    }
}

impl<Q: PartialEq> Holds<Q> for [Q] {
    fn holds(&self, item: &Q) -> bool {
        self.contains(item)
    }
}

impl<Q: Ord> Holds<Q> for BTreeSet<Q> {
    fn holds(&self, item: &Q) -> bool {
        self.contains(item)
    }
}

impl<Q: Ord, V> Holds<Q> for BTreeMap<Q, V> {
    fn holds(&self, item: &Q) -> bool {
        self.contains_key(item)
    }
}

impl Holds<str> for String {
    fn holds(&self, item: &str) -> bool {
        self.contains(item)
    }
}

/// Transparent wrapper around exactly one value.
pub struct Proxy<T> {
    contents: T,
    locals: BTreeMap<String, Value>,
}

impl<T> Proxy<T> {
    pub fn new(contents: T) -> Self {
        Self {
            contents,
            locals: BTreeMap::new(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.contents
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.contents
    }

    pub fn into_inner(self) -> T {
        self.contents
    }

    /// Attributes held by the proxy itself.
    pub fn locals(&self) -> &BTreeMap<String, Value> {
        &self.locals
    }

    /// Forward a call to the wrapped callable.
    pub fn call<A, R>(&self, args: A) -> R
    where
        T: Fn(A) -> R,
    {
        (self.contents)(args)
    }

    /// Whether the wrapped collection holds `item`.
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool
    where
        T: Holds<Q>,
    {
        self.contents.holds(item)
    }

    /// Whether the wrapped value itself equals `item`.
    pub fn wraps(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        &self.contents == item
    }
}

impl<T: Attributes> Attributes for Proxy<T> {
    /// Proxy-held attributes shadow the wrapped value's.
    fn attribute(&self, name: &str) -> Option<Value> {
        self.locals
            .get(name)
            .cloned()
            .or_else(|| self.contents.attribute(name))
    }

    /// Writes update a proxy-held attribute if one exists, otherwise an
    /// existing wrapped attribute, otherwise create a proxy-held attribute.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<()> {
        if !self.locals.contains_key(name) && self.contents.has_attribute(name) {
            return self.contents.set_attribute(name, value);
        }
        tracing::debug!(attribute = name, "proxy attribute set locally");
        self.locals.insert(name.to_string(), value);
        Ok(())
    }

    fn delete_attribute(&mut self, name: &str) -> Result<()> {
        if self.locals.remove(name).is_some() {
            return Ok(());
        }
        self.contents.delete_attribute(name)
    }
}

impl<T> std::ops::Deref for Proxy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.contents
    }
}

impl<T> std::ops::DerefMut for Proxy<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.contents
    }
}

impl<T: std::ops::Index<I>, I> std::ops::Index<I> for Proxy<T> {
    type Output = T::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.contents[index]
    }
}

impl<T: std::ops::IndexMut<I>, I> std::ops::IndexMut<I> for Proxy<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.contents[index]
    }
}

impl<T: fmt::Display> fmt::Display for Proxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.contents.fmt(f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Proxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("contents", &self.contents)
            .field("locals", &self.locals)
            .finish()
    }
}

impl<T: Clone> Clone for Proxy<T> {
    fn clone(&self) -> Self {
        Self {
            contents: self.contents.clone(),
            locals: self.locals.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Proxy<T> {
    fn eq(&self, other: &Self) -> bool {
        self.contents == other.contents && self.locals == other.locals
    }
}

impl<T> From<T> for Proxy<T> {
    fn from(contents: T) -> Self {
        Self::new(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestClass {
        name: String,
        size: u32,
    }

    impl TestClass {
        fn describe(&self) -> String {
            format!("{} ({})", self.name, self.size)
        }
    }

    fn wrapped() -> TestClass {
        TestClass {
            name: "something".to_string(),
            size: 3,
        }
    }

    #[test]
    fn methods_forward_through_deref() {
        let proxy = Proxy::new(wrapped());
        assert_eq!(proxy.describe(), wrapped().describe());
        assert_eq!(proxy.name, "something");
    }

    #[test]
    fn local_attributes_live_on_the_proxy() {
        let mut proxy = Proxy::new(wrapped());
        proxy.set_attribute("id", json!(4543)).expect("set local");
        assert_eq!(proxy.attribute("name"), Some(json!("something")));
        assert_eq!(proxy.attribute("id"), Some(json!(4543)));
        assert!(proxy.has_attribute("id"));
        assert!(!proxy.inner().has_attribute("id"));
        proxy.delete_attribute("id").expect("delete local");
        assert!(!proxy.has_attribute("id"));
    }

    #[test]
    fn wrapped_attributes_are_written_through() {
        let mut proxy = Proxy::new(wrapped());
        proxy.set_attribute("size", json!(10)).expect("set wrapped");
        assert_eq!(proxy.size, 10);
        assert!(proxy.locals().is_empty());

        let err = proxy
            .set_attribute("size", json!("big"))
            .expect_err("wrong type for wrapped field");
        assert!(matches!(err, CaminaError::TypeMismatch { .. }));
        assert_eq!(proxy.size, 10);
    }

    #[test]
    fn wrapped_fields_cannot_be_deleted() {
        let mut proxy = Proxy::new(wrapped());
        assert!(matches!(
            proxy.delete_attribute("name"),
            Err(CaminaError::Unsupported { .. })
        ));
        assert!(matches!(
            proxy.delete_attribute("ghost"),
            Err(CaminaError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn rewrapped_proxies_resolve_through_both_layers() {
        let mut inner = Proxy::new(wrapped());
        inner.set_attribute("id", json!(1)).expect("set inner local");
        let outer = Proxy::new(inner);
        assert_eq!(outer.attribute("id"), Some(json!(1)));
        assert_eq!(outer.attribute("size"), Some(json!(3)));
        assert_eq!(outer.describe(), wrapped().describe());
    }

    #[test]
    fn index_call_and_contains_forward() {
        let list = Proxy::new(vec![10, 20, 30]);
        assert_eq!(list[1], 20);
        assert!(list.contains(&30));
        assert!(!list.contains(&99));
        assert_eq!(list.len(), 3);

        let text = Proxy::new(String::from("camina"));
        assert!(text.contains("min"));
        assert_eq!(text.to_string(), "camina");

        let double = Proxy::new(|x: i32| x * 2);
        assert_eq!(double.call(21), 42);

        assert!(Proxy::new(5).wraps(&5));
    }
}

//! Key derivation for elements stored in a [`Hybrid`](crate::Hybrid).
//!
//! An element is keyable in exactly one of two ways, chosen statically per
//! type:
//! - by value: the element is itself an ordered, comparable key
//!   ([`keyable_by_value!`](crate::keyable_by_value));
//! - by name: the element exposes a name through
//!   [`Named`](camina_convert::Named)
//!   ([`keyable_by_name!`](crate::keyable_by_name)).

use std::fmt;

/// How a type derives its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// The element is its own key.
    Value,
    /// The element's name is its key.
    Name,
}

/// Capability: an element with a derivable key.
pub trait Keyable {
    type Key: Clone + Ord + fmt::Debug;

    const STRATEGY: KeyStrategy;

    fn derive_key(&self) -> Self::Key;
}

/// Implement [`Keyable`] for types that are their own key.
#[macro_export]
macro_rules! keyable_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Keyable for $ty {
                type Key = $ty;

                const STRATEGY: $crate::KeyStrategy = $crate::KeyStrategy::Value;

                fn derive_key(&self) -> Self::Key {
                    ::std::clone::Clone::clone(self)
                }
            }
        )*
    };
}

/// Implement [`Keyable`] for types keyed by their
/// [`Named`](camina_convert::Named) name (falling back to the snake_cased
/// type name).
#[macro_export]
macro_rules! keyable_by_name {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Keyable for $ty {
                type Key = ::std::string::String;

                const STRATEGY: $crate::KeyStrategy = $crate::KeyStrategy::Name;

                fn derive_key(&self) -> Self::Key {
                    $crate::convert::namify(self)
                }
            }
        )*
    };
}

keyable_by_value!(
    String,
    &'static str,
    char,
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
);

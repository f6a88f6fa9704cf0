//! Name derivation for arbitrary items.
//!
//! `namify` is the default key namer for containers that infer keys. An item
//! names itself through [`Named`]; when it declines, the snake_cased name of
//! its type is used instead.

use regex::Regex;
use std::sync::OnceLock;

/// Capability: an item that may carry its own name.
///
/// The default implementation carries no name, so `impl Named for Foo {}`
/// opts a type into type-name derivation.
pub trait Named {
    fn name(&self) -> Option<&str> {
        None
    }
}

impl Named for str {
    fn name(&self) -> Option<&str> {
        Some(self)
    }
}

impl Named for String {
    fn name(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

impl<T: Named + ?Sized> Named for Box<T> {
    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

/// Returns the name of `item`: its own name if it has one, otherwise the
/// snake_cased name of its type.
pub fn namify<T: Named + ?Sized>(item: &T) -> String {
    match item.name() {
        Some(name) => name.to_string(),
        None => snakify(short_type_name::<T>()),
    }
}

/// Last path segment of `T`'s type name, without references or generics.
///
/// `alloc::vec::Vec<u8>` becomes `Vec`; `&my_crate::Widget` becomes `Widget`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let full = full.trim_start_matches('&').trim_start_matches("mut ");
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

fn acronym_boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym regex must compile"))
}

fn word_boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z\d])([A-Z])").expect("word regex must compile"))
}

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\-]+").expect("separator regex must compile"))
}

/// Converts `CamelCase`, `kebab-case` or spaced text to `snake_case`.
pub fn snakify(item: &str) -> String {
    let spaced = separator_re().replace_all(item.trim(), "_");
    let split = acronym_boundary_re().replace_all(&spaced, "${1}_${2}");
    let split = word_boundary_re().replace_all(&split, "${1}_${2}");
    split.to_lowercase()
}

/// Converts `snake_case` text to `CamelCase`.
pub fn capitalify(item: &str) -> String {
    item.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AnotherClass;
    impl Named for AnotherClass {}

    struct Labeled {
        label: String,
    }

    impl Named for Labeled {
        fn name(&self) -> Option<&str> {
            Some(&self.label)
        }
    }

    #[test]
    fn snakify_handles_camel_and_acronyms() {
        assert_eq!(snakify("AnotherClass"), "another_class");
        assert_eq!(snakify("HTTPServer"), "http_server");
        assert_eq!(snakify("already_snake"), "already_snake");
        assert_eq!(snakify("two words-here"), "two_words_here");
    }

    #[test]
    fn capitalify_inverts_snakify() {
        assert_eq!(capitalify("another_class"), "AnotherClass");
        assert_eq!(capitalify(&snakify("ThirdClass")), "ThirdClass");
    }

    #[test]
    fn namify_prefers_own_name() {
        let item = Labeled {
            label: "something".to_string(),
        };
        assert_eq!(namify(&item), "something");
        assert_eq!(namify("plain"), "plain");
    }

    #[test]
    fn namify_falls_back_to_type_name() {
        assert_eq!(namify(&AnotherClass), "another_class");
        assert_eq!(namify(&&AnotherClass), "another_class");
    }

    #[test]
    fn short_type_name_strips_paths_and_generics() {
        assert_eq!(short_type_name::<Vec<u8>>(), "Vec");
        assert_eq!(short_type_name::<&AnotherClass>(), "AnotherClass");
    }
}

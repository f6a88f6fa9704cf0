//! # Camina
//!
//! Lightweight containers that layer uniform `add` / `delete` / `subset`
//! semantics over the standard collections.
//!
//! ## Containers
//!
//! ```text
//! Bunch                 ← shared add/delete/subset contract
//!   │
//! Dictionary<K, V>      ← mapping, last-write-wins add
//!   ├── Catalog<V>      ← wildcard keys (all/default/none), multi-key lookup
//!   ├── Library<V>      ← keys derived from stored items
//!   └── ChainDictionary<K, V> ← layered lookup over several dictionaries
//!   │
//! Listing<T>            ← ordered sequence
//!   └── Hybrid<T>       ← ordered sequence + keyed view, kept in sync
//!
//! Proxy<T>              ← forwarding wrapper around one value
//! ```
//!
//! Behavior on missing keys, key collisions and duplicate keys is chosen at
//! construction through [`ContainerConfig`]. Every failing call returns a
//! [`CaminaError`] and leaves the container unchanged.
//!
//! Containers are single-owner values with no interior mutability; share
//! them across threads behind your own lock.

pub mod base;
pub mod catalog;
pub mod chain;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod hybrid;
pub mod keyed;
pub mod library;
pub mod listing;
pub mod proxy;

pub use camina_convert as convert;

pub use base::{Bunch, Selection};
pub use catalog::{Catalog, Found};
pub use chain::ChainDictionary;
pub use config::{ContainerConfig, Wildcard, Wildcards};
pub use dictionary::Dictionary;
pub use error::CaminaError;
pub use hybrid::Hybrid;
pub use keyed::{KeyStrategy, Keyable};
pub use library::{Library, Namer};
pub use listing::{Listing, ListingSelector};
pub use proxy::{Attributes, Holds, Proxy};

//! # Camina Convert
//!
//! Stateless conversion helpers used by the `camina` containers and exposed
//! for direct use. Every function maps one input value to another
//! representation and touches no shared state.
//!
//! ## Modules
//!
//! ```text
//! label    ← name derivation (Named, namify, snakify)
//! modify   ← prefix/suffix/substring edits, splitting, uniquify
//! parse    ← str → integer / number / bool / list / path
//! hash     ← stable content digests
//! clock    ← timestamps and timing
//! ```

pub mod clock;
pub mod error;
pub mod hash;
pub mod label;
pub mod modify;
pub mod parse;

pub use clock::{how_soon_is_now, timer};
pub use error::ConvertError;
pub use hash::hashify;
pub use label::{Named, capitalify, namify, short_type_name, snakify};
pub use modify::{
    add_prefix, add_suffix, cleave, deduplicate, drop_prefix, drop_substring, drop_suffix,
    separate, uniquify,
};
pub use parse::{boolify, integerify, listify_str, numify, pathlibify};

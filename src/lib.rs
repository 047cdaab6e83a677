//! An ordered dictionary based on a red-black tree, with pluggable ownership of its keys and
//! values.
//!
//! Each side of a [`Dict`] follows one of three policies, chosen by the [`Flags`] it is created
//! with:
//!
//! - inline integers, ordered numerically and copied by value,
//! - owned byte strings, ordered bytewise and deep-copied,
//! - custom data, ordered, copied and released by caller-supplied [`Ops`].
//!
//! # Examples
//!
//! ```
//! use dictree::{Datum, Dict, Flags};
//!
//! let mut counts = Dict::predefined(Flags::STR_INT).unwrap();
//!
//! for word in "the cat saw the dog".split(' ') {
//!     counts.numeric_upsert(&Datum::str(word), 1, |n| n + 1).unwrap();
//! }
//!
//! let words: Vec<_> = counts.keys().filter_map(Datum::as_str).collect();
//! assert_eq!(words, ["cat", "dog", "saw", "the"]);
//! assert_eq!(counts.search(&Datum::str("the")), Some(&Datum::Int(2)));
//! ```

mod datum;
mod dict;
mod error;
mod flags;
mod node;
mod policy;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;
#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use datum::Datum;
pub use dict::{Dict, Exported, Insertion, Iter, Keys, Upsert, Values};
pub use error::{Error, Result};
pub use flags::{Export, Flags};
pub use policy::Ops;

//! Keys and values as stored by a dictionary.

use std::convert::Infallible;
use std::fmt::{self, Debug};
use std::str;

/// A key or value held by a [`Dict`](crate::Dict).
///
/// Which variant a dictionary accepts on each side is fixed by the [`Flags`](crate::Flags)
/// it was created with: `INT_*` sides hold `Int`, `STR_*` sides hold `Str` and custom sides
/// hold `Custom`.
///
/// The derived ordering ranks variants before contents and compares integers numerically
/// and byte strings lexicographically, which is exactly the order the predefined policies
/// use.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Datum<T = Infallible> {
    /// An inline integer. Never allocates.
    Int(i64),
    /// An owned byte string.
    Str(Box<[u8]>),
    /// A caller-defined payload managed by a custom policy.
    Custom(T),
}

impl<T> Datum<T> {
    /// Creates an owned byte string from anything that can be viewed as bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::Datum;
    ///
    /// let datum: Datum = Datum::str("apple");
    /// assert_eq!(datum.as_str(), Some("apple"));
    /// ```
    pub fn str<S: AsRef<[u8]>>(s: S) -> Self { Datum::Str(s.as_ref().into()) }

    /// Returns the integer, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Datum::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the bytes, if this is a `Str`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match *self {
            Datum::Str(ref bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the bytes for in-place mutation, if this is a `Str`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::Datum;
    ///
    /// let mut datum: Datum = Datum::str("shout");
    /// datum.as_bytes_mut().unwrap().make_ascii_uppercase();
    /// assert_eq!(datum.as_str(), Some("SHOUT"));
    /// ```
    pub fn as_bytes_mut(&mut self) -> Option<&mut [u8]> {
        match *self {
            Datum::Str(ref mut bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the bytes as a string slice, if this is a `Str` holding valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|bytes| str::from_utf8(bytes).ok())
    }

    /// Returns the payload, if this is a `Custom`.
    pub fn as_custom(&self) -> Option<&T> {
        match *self {
            Datum::Custom(ref t) => Some(t),
            _ => None,
        }
    }

    /// Returns the payload for in-place mutation, if this is a `Custom`.
    pub fn as_custom_mut(&mut self) -> Option<&mut T> {
        match *self {
            Datum::Custom(ref mut t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn rank(&self) -> u8 {
        match *self {
            Datum::Int(_) => 0,
            Datum::Str(_) => 1,
            Datum::Custom(_) => 2,
        }
    }
}

impl<T> From<i64> for Datum<T> {
    fn from(n: i64) -> Self { Datum::Int(n) }
}

impl<'a, T> From<&'a str> for Datum<T> {
    fn from(s: &'a str) -> Self { Datum::str(s) }
}

impl<'a, T> From<&'a [u8]> for Datum<T> {
    fn from(s: &'a [u8]) -> Self { Datum::str(s) }
}

impl<T> From<String> for Datum<T> {
    fn from(s: String) -> Self { Datum::Str(s.into_bytes().into_boxed_slice()) }
}

impl<T> Debug for Datum<T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Datum::Int(n) => write!(f, "{}", n),
            Datum::Str(ref bytes) => match str::from_utf8(bytes) {
                Ok(s) => write!(f, "{:?}", s),
                Err(_) => write!(f, "{:?}", bytes),
            },
            Datum::Custom(ref t) => t.fmt(f),
        }
    }
}

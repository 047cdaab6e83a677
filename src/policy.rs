//! Ownership policies: how a dictionary orders, copies and releases its keys and values.

use compare::Compare;
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::rc::Rc;
use super::{Datum, Error, Flags, Result};

type CompareFn<T> = dyn Fn(&T, &T) -> Ordering;
type CloneFn<T> = dyn Fn(&T) -> Option<T>;
type DestroyFn<T> = dyn Fn(T);

/// Caller-supplied operations for the custom sides of a dictionary.
///
/// A custom key side needs all three key operations. A custom value side takes its clone and
/// destroy operations from the value slots, each falling back to the matching key slot when
/// left empty.
///
/// # Examples
///
/// ```
/// use dictree::{Datum, Dict, Ops};
///
/// let ops = Ops::new()
///     .key_compare(|a: &Vec<u32>, b: &Vec<u32>| a.len().cmp(&b.len()).then(a.cmp(b)))
///     .key_clone(|v: &Vec<u32>| Some(v.clone()))
///     .key_destroy(drop);
///
/// let mut dict = Dict::with_ops(ops).unwrap();
/// dict.insert_clone(&Datum::Custom(vec![1, 2]), &Datum::Custom(vec![7])).unwrap();
/// assert_eq!(dict.search(&Datum::Custom(vec![1, 2])), Some(&Datum::Custom(vec![7])));
/// ```
pub struct Ops<T> {
    key_compare: Option<Rc<CompareFn<T>>>,
    key_clone: Option<Rc<CloneFn<T>>>,
    key_destroy: Option<Rc<DestroyFn<T>>>,
    value_clone: Option<Rc<CloneFn<T>>>,
    value_destroy: Option<Rc<DestroyFn<T>>>,
}

impl<T> Ops<T> {
    /// Creates an empty set of operations.
    pub fn new() -> Self {
        Ops { key_compare: None, key_clone: None, key_destroy: None,
              value_clone: None, value_destroy: None }
    }

    /// Sets the key comparison.
    pub fn key_compare<F>(mut self, f: F) -> Self where F: Fn(&T, &T) -> Ordering + 'static {
        self.key_compare = Some(Rc::new(f));
        self
    }

    /// Sets the key clone. Returning `None` reports an allocation failure.
    pub fn key_clone<F>(mut self, f: F) -> Self where F: Fn(&T) -> Option<T> + 'static {
        self.key_clone = Some(Rc::new(f));
        self
    }

    /// Sets the key destructor.
    pub fn key_destroy<F>(mut self, f: F) -> Self where F: Fn(T) + 'static {
        self.key_destroy = Some(Rc::new(f));
        self
    }

    /// Sets the value clone. Returning `None` reports an allocation failure.
    pub fn value_clone<F>(mut self, f: F) -> Self where F: Fn(&T) -> Option<T> + 'static {
        self.value_clone = Some(Rc::new(f));
        self
    }

    /// Sets the value destructor.
    pub fn value_destroy<F>(mut self, f: F) -> Self where F: Fn(T) + 'static {
        self.value_destroy = Some(Rc::new(f));
        self
    }
}

impl<T> Default for Ops<T> {
    fn default() -> Self { Ops::new() }
}

impl<T> Debug for Ops<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Ops")
            .field("key_compare", &self.key_compare.is_some())
            .field("key_clone", &self.key_clone.is_some())
            .field("key_destroy", &self.key_destroy.is_some())
            .field("value_clone", &self.value_clone.is_some())
            .field("value_destroy", &self.value_destroy.is_some())
            .finish()
    }
}

/// The order of a dictionary's keys.
pub(crate) enum Order<T> {
    Numeric,
    Bytewise,
    Custom(Rc<CompareFn<T>>),
}

impl<T> Clone for Order<T> {
    fn clone(&self) -> Self {
        match *self {
            Order::Numeric => Order::Numeric,
            Order::Bytewise => Order::Bytewise,
            Order::Custom(ref f) => Order::Custom(f.clone()),
        }
    }
}

// Data of the wrong shape never matches anything, so it is ranked by variant.
impl<T> Compare<Datum<T>> for Order<T> {
    fn compare(&self, l: &Datum<T>, r: &Datum<T>) -> Ordering {
        match (self, l, r) {
            (&Order::Numeric, &Datum::Int(a), &Datum::Int(b)) => a.cmp(&b),
            (&Order::Bytewise, &Datum::Str(ref a), &Datum::Str(ref b)) => a.cmp(b),
            (&Order::Custom(ref f), &Datum::Custom(ref a), &Datum::Custom(ref b)) => f(a, b),
            _ => l.rank().cmp(&r.rank()),
        }
    }
}

/// How one side of a dictionary holds its data.
pub(crate) enum Ownership<T> {
    Inline,
    Owned,
    Custom { clone: Rc<CloneFn<T>>, destroy: Rc<DestroyFn<T>> },
}

impl<T> Clone for Ownership<T> {
    fn clone(&self) -> Self {
        match *self {
            Ownership::Inline => Ownership::Inline,
            Ownership::Owned => Ownership::Owned,
            Ownership::Custom { ref clone, ref destroy } =>
                Ownership::Custom { clone: clone.clone(), destroy: destroy.clone() },
        }
    }
}

impl<T> Ownership<T> {
    /// Checks if the datum has the shape this side stores.
    pub fn admits(&self, datum: &Datum<T>) -> bool {
        match (self, datum) {
            (&Ownership::Inline, &Datum::Int(_)) |
            (&Ownership::Owned, &Datum::Str(_)) |
            (&Ownership::Custom { .. }, &Datum::Custom(_)) => true,
            _ => false,
        }
    }

    /// Rejects data of the wrong shape.
    pub fn check(&self, datum: &Datum<T>) -> Result<()> {
        if self.admits(datum) { Ok(()) } else { Err(Error::InvalidArgument(self.mismatch())) }
    }

    /// Produces an independently owned copy of the datum.
    pub fn duplicate(&self, datum: &Datum<T>) -> Result<Datum<T>> {
        match (self, datum) {
            (&Ownership::Inline, &Datum::Int(n)) => Ok(Datum::Int(n)),
            (&Ownership::Owned, &Datum::Str(ref bytes)) => {
                let mut copy = Vec::new();
                copy.try_reserve_exact(bytes.len())?;
                copy.extend_from_slice(bytes);
                Ok(Datum::Str(copy.into_boxed_slice()))
            }
            (&Ownership::Custom { ref clone, .. }, &Datum::Custom(ref t)) =>
                clone(t).map(Datum::Custom).ok_or(Error::OutOfMemory),
            _ => Err(Error::InvalidArgument(self.mismatch())),
        }
    }

    /// Releases a datum this side owns.
    pub fn release(&self, datum: Datum<T>) {
        if let (&Ownership::Custom { ref destroy, .. }, Datum::Custom(t)) = (self, datum) {
            destroy(t);
        }
    }

    pub fn is_inline(&self) -> bool {
        match *self {
            Ownership::Inline => true,
            _ => false,
        }
    }

    fn mismatch(&self) -> &'static str {
        match *self {
            Ownership::Inline => "expected an integer",
            Ownership::Owned => "expected an owned string",
            Ownership::Custom { .. } => "expected a custom datum",
        }
    }
}

/// The resolved policy of a dictionary.
pub(crate) struct Policy<T> {
    pub order: Order<T>,
    pub key: Ownership<T>,
    pub value: Ownership<T>,
}

impl<T> Clone for Policy<T> {
    fn clone(&self) -> Self {
        Policy { order: self.order.clone(), key: self.key.clone(), value: self.value.clone() }
    }
}

impl<T> Policy<T> {
    /// Resolves the policy for the given flags, taking custom operations from `ops`.
    pub fn resolve(flags: Flags, ops: Option<Ops<T>>) -> Result<Self> {
        if flags.contains(Flags::INT_KEY | Flags::STR_KEY) {
            return Err(Error::InvalidArgument("keys cannot be both integers and strings"));
        }

        if flags.contains(Flags::INT_VAL | Flags::STR_VAL) {
            return Err(Error::InvalidArgument("values cannot be both integers and strings"));
        }

        let ops = ops.unwrap_or_default();

        let (order, key) = if flags.contains(Flags::INT_KEY) {
            (Order::Numeric, Ownership::Inline)
        } else if flags.contains(Flags::STR_KEY) {
            (Order::Bytewise, Ownership::Owned)
        } else {
            match (&ops.key_compare, &ops.key_clone, &ops.key_destroy) {
                (&Some(ref compare), &Some(ref clone), &Some(ref destroy)) =>
                    (Order::Custom(compare.clone()),
                     Ownership::Custom { clone: clone.clone(), destroy: destroy.clone() }),
                _ => return Err(Error::InvalidArgument("custom keys need compare, clone and destroy")),
            }
        };

        let value = if flags.contains(Flags::INT_VAL) {
            Ownership::Inline
        } else if flags.contains(Flags::STR_VAL) {
            Ownership::Owned
        } else {
            let clone = ops.value_clone.or(ops.key_clone);
            let destroy = ops.value_destroy.or(ops.key_destroy);

            match (clone, destroy) {
                (Some(clone), Some(destroy)) => Ownership::Custom { clone: clone, destroy: destroy },
                _ => return Err(Error::InvalidArgument("custom values need clone and destroy")),
            }
        };

        Ok(Policy { order: order, key: key, value: value })
    }
}

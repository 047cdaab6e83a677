//! An ordered dictionary based on a red-black tree.

use compare::Compare;
use std::convert::Infallible;
use std::fmt::{self, Debug};
use std::mem;
use std::ops::Deref;
use tracing::{debug, trace};
use super::node::{self, Search, Tree};
use super::policy::{Order, Ownership, Policy};
use super::{Datum, Error, Export, Flags, Ops, Result};

/// A key and the value it maps to.
pub(crate) struct Entry<T> {
    pub key: Datum<T>,
    pub value: Datum<T>,
}

/// The outcome of an insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Insertion<K = ()> {
    /// The key was absent and a new entry was created.
    Inserted,
    /// The key was present and only its value was replaced. Carries the key that was passed
    /// in, which the dictionary did not keep.
    Replaced(K),
}

/// The outcome of an upsert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Upsert<R> {
    /// The key was present and the update function returned the given result.
    Updated(R),
    /// The key was absent and was inserted with the default value.
    Inserted,
}

/// A key or value written by [`Dict::export_keys`] or [`Dict::export_values`].
#[derive(Debug, PartialEq)]
pub enum Exported<'a, T: 'a> {
    /// A reference into the dictionary.
    Borrowed(&'a Datum<T>),
    /// A copy made with the dictionary's clone operation, now owned by the caller.
    Owned(Datum<T>),
}

impl<'a, T> Exported<'a, T> {
    /// Takes the copy out, or returns `None` if this is a reference into the dictionary.
    pub fn into_owned(self) -> Option<Datum<T>> {
        match self {
            Exported::Borrowed(_) => None,
            Exported::Owned(datum) => Some(datum),
        }
    }
}

impl<'a, T> Deref for Exported<'a, T> {
    type Target = Datum<T>;

    fn deref(&self) -> &Datum<T> {
        match *self {
            Exported::Borrowed(datum) => datum,
            Exported::Owned(ref datum) => datum,
        }
    }
}

/// An ordered dictionary based on a red-black tree.
///
/// Keys and values are [`Datum`]s. The [`Flags`] a dictionary is created with decide, for keys
/// and values independently, whether they are inline integers, owned strings or custom data
/// managed by caller-supplied [`Ops`]. The dictionary owns every key and value it holds and
/// releases them through its policy when they are replaced, deleted or dropped.
///
/// The dictionary is not thread-safe. Its traversals borrow it, so it cannot be modified while
/// one is running.
pub struct Dict<T = Infallible> {
    tree: Tree<Entry<T>>,
    policy: Policy<T>,
    flags: Flags,
}

impl Dict {
    /// Creates an empty dictionary whose keys and values both use predefined policies.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::{Datum, Dict, Flags};
    ///
    /// let mut dict = Dict::predefined(Flags::INT_INT).unwrap();
    ///
    /// dict.insert(Datum::Int(2), Datum::Int(20)).unwrap();
    /// dict.insert(Datum::Int(1), Datum::Int(10)).unwrap();
    ///
    /// assert_eq!(dict.search(&Datum::Int(1)), Some(&Datum::Int(10)));
    /// assert!(Dict::predefined(Flags::STR_KEY).is_err());
    /// ```
    pub fn predefined(flags: Flags) -> Result<Dict> { Dict::create(flags, None) }
}

impl<T> Dict<T> {
    /// Creates an empty dictionary.
    ///
    /// Sides flagged `INT_*` or `STR_*` use the predefined policies; every other side takes its
    /// operations from `ops`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a side is flagged as both integer and string, or if a custom side
    /// lacks any of its operations.
    pub fn create(flags: Flags, ops: Option<Ops<T>>) -> Result<Self> {
        match Policy::resolve(flags, ops) {
            Ok(policy) => {
                debug!(?flags, "created dictionary");
                Ok(Dict::with_policy(flags, policy))
            }
            Err(err) => {
                debug!(?flags, %err, "rejected dictionary");
                Err(err)
            }
        }
    }

    /// Creates an empty dictionary whose keys and values are both custom.
    pub fn with_ops(ops: Ops<T>) -> Result<Self> { Dict::create(Flags::CUSTOM, Some(ops)) }

    fn with_policy(flags: Flags, policy: Policy<T>) -> Self {
        Dict { tree: Tree::new(), policy: policy, flags: flags }
    }

    /// Returns the flags the dictionary was created with.
    pub fn flags(&self) -> Flags { self.flags }

    /// Checks if the dictionary is empty.
    pub fn is_empty(&self) -> bool { self.tree.is_empty() }

    /// Returns the number of entries in the dictionary.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::{Datum, Dict, Flags};
    ///
    /// let mut dict = Dict::predefined(Flags::STR_STR).unwrap();
    /// assert_eq!(dict.len(), 0);
    ///
    /// dict.insert_clone(&Datum::str("k"), &Datum::str("v")).unwrap();
    /// assert_eq!(dict.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.tree.len() }

    fn locate(&self, key: &Datum<T>) -> Search {
        let order = &self.policy.order;
        self.tree.locate(|entry| order.compare(key, &entry.key))
    }

    /// Stores an entry the dictionary already owns both halves of. On a duplicate key the old
    /// value is released and the passed key is handed back.
    pub(crate) fn insert_owned(&mut self, key: Datum<T>, value: Datum<T>) -> Insertion<Datum<T>> {
        match self.locate(&key) {
            Search::Found(index) => {
                let old = mem::replace(&mut self.tree[index].value, value);
                self.policy.value.release(old);
                trace!(len = self.len(), "replaced value");
                Insertion::Replaced(key)
            }
            Search::Vacant(at) => {
                self.tree.attach(at, Entry { key: key, value: value });
                trace!(len = self.len(), "inserted entry");
                Insertion::Inserted
            }
        }
    }

    /// Inserts an entry, taking ownership of the key and value.
    ///
    /// If the key is already present, its old value is released and replaced, the entry keeps
    /// its existing key, and the key passed in is returned in `Insertion::Replaced`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the key or value does not have the shape its side stores.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::{Datum, Dict, Flags, Insertion};
    ///
    /// let mut dict = Dict::predefined(Flags::STR_INT).unwrap();
    ///
    /// assert_eq!(dict.insert(Datum::str("a"), Datum::Int(1)), Ok(Insertion::Inserted));
    /// assert_eq!(dict.insert(Datum::str("a"), Datum::Int(2)),
    ///            Ok(Insertion::Replaced(Datum::str("a"))));
    ///
    /// assert_eq!(dict.len(), 1);
    /// assert_eq!(dict.search(&Datum::str("a")), Some(&Datum::Int(2)));
    /// ```
    pub fn insert(&mut self, key: Datum<T>, value: Datum<T>) -> Result<Insertion<Datum<T>>> {
        self.policy.key.check(&key)?;
        self.policy.value.check(&value)?;
        Ok(self.insert_owned(key, value))
    }

    /// Inserts copies of the key and value made with the dictionary's clone operations; the
    /// caller keeps the originals.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the key or value does not have the shape its side stores, and
    /// `OutOfMemory` if a clone fails. Nothing is leaked either way.
    pub fn insert_clone(&mut self, key: &Datum<T>, value: &Datum<T>) -> Result<Insertion> {
        let key = self.policy.key.duplicate(key)?;

        let value = match self.policy.value.duplicate(value) {
            Ok(value) => value,
            Err(err) => {
                self.policy.key.release(key);
                return Err(err);
            }
        };

        Ok(match self.insert_owned(key, value) {
            Insertion::Inserted => Insertion::Inserted,
            Insertion::Replaced(key) => {
                self.policy.key.release(key);
                Insertion::Replaced(())
            }
        })
    }

    /// Updates the value of a present key in place, or inserts copies of the key and `default`
    /// if it is absent, in a single descent.
    ///
    /// `update` runs only when the key is present and its result is returned. Changes it makes
    /// before failing in any way of its own are not rolled back.
    ///
    /// # Errors
    ///
    /// When the key is absent: `InvalidArgument` if the key or default does not have the shape
    /// its side stores, and `OutOfMemory` if a clone fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::{Datum, Dict, Flags, Upsert};
    ///
    /// let mut dict = Dict::predefined(Flags::STR_STR).unwrap();
    /// let key = Datum::str("greeting");
    ///
    /// let upcase = |value: &mut Datum| value.as_bytes_mut().map(|b| b.make_ascii_uppercase());
    ///
    /// assert_eq!(dict.upsert(&key, &Datum::str("hello"), upcase), Ok(Upsert::Inserted));
    /// assert_eq!(dict.upsert(&key, &Datum::str("hello"), upcase), Ok(Upsert::Updated(Some(()))));
    /// assert_eq!(dict.search(&key), Some(&Datum::str("HELLO")));
    /// ```
    pub fn upsert<F, R>(&mut self, key: &Datum<T>, default: &Datum<T>, update: F)
        -> Result<Upsert<R>> where F: FnOnce(&mut Datum<T>) -> R {

        match self.locate(key) {
            Search::Found(index) => {
                trace!("upsert updating in place");
                Ok(Upsert::Updated(update(&mut self.tree[index].value)))
            }
            Search::Vacant(at) => {
                let key = self.policy.key.duplicate(key)?;

                let value = match self.policy.value.duplicate(default) {
                    Ok(value) => value,
                    Err(err) => {
                        self.policy.key.release(key);
                        return Err(err);
                    }
                };

                self.tree.attach(at, Entry { key: key, value: value });
                trace!(len = self.len(), "upsert inserted default");
                Ok(Upsert::Inserted)
            }
        }
    }

    /// Replaces the integer value of a present key with `increment(current)`, or inserts a copy
    /// of the key with `default` if it is absent, in a single descent.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the dictionary's values are not inline integers, or if an absent
    /// key does not have the shape keys are stored in. `OutOfMemory` if cloning the key fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::{Datum, Dict, Flags};
    ///
    /// let mut counts = Dict::predefined(Flags::STR_INT).unwrap();
    ///
    /// for word in ["a", "b", "a"] {
    ///     counts.numeric_upsert(&Datum::str(word), 1, |n| n + 1).unwrap();
    /// }
    ///
    /// assert_eq!(counts.search(&Datum::str("a")), Some(&Datum::Int(2)));
    /// assert_eq!(counts.search(&Datum::str("b")), Some(&Datum::Int(1)));
    /// ```
    pub fn numeric_upsert<F>(&mut self, key: &Datum<T>, default: i64, increment: F) -> Result<()>
        where F: FnOnce(i64) -> i64 {

        if !self.policy.value.is_inline() {
            return Err(Error::InvalidArgument("values are not inline integers"));
        }

        match self.locate(key) {
            Search::Found(index) => {
                if let Datum::Int(ref mut n) = self.tree[index].value { *n = increment(*n); }
            }
            Search::Vacant(at) => {
                let key = self.policy.key.duplicate(key)?;
                self.tree.attach(at, Entry { key: key, value: Datum::Int(default) });
            }
        }

        Ok(())
    }

    /// Returns a reference to the value associated with the key, or `None` if the key is
    /// absent.
    pub fn search(&self, key: &Datum<T>) -> Option<&Datum<T>> {
        match self.locate(key) {
            Search::Found(index) => Some(&self.tree[index].value),
            Search::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to the value associated with the key, or `None` if the key
    /// is absent.
    pub fn search_mut(&mut self, key: &Datum<T>) -> Option<&mut Datum<T>> {
        match self.locate(key) {
            Search::Found(index) => Some(&mut self.tree[index].value),
            Search::Vacant(_) => None,
        }
    }

    /// Checks if the dictionary contains the key.
    pub fn contains_key(&self, key: &Datum<T>) -> bool { self.search(key).is_some() }

    /// Removes the entry with the given key, releasing its key and value. Returns `false`,
    /// and changes nothing, if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::{Datum, Dict, Flags};
    ///
    /// let mut dict = Dict::predefined(Flags::INT_STR).unwrap();
    /// dict.insert(Datum::Int(1), Datum::str("one")).unwrap();
    ///
    /// assert!(dict.delete(&Datum::Int(1)));
    /// assert!(!dict.delete(&Datum::Int(1)));
    /// assert!(dict.is_empty());
    /// ```
    pub fn delete(&mut self, key: &Datum<T>) -> bool {
        match self.locate(key) {
            Search::Found(index) => {
                let entry = self.tree.detach(index);
                self.policy.key.release(entry.key);
                self.policy.value.release(entry.value);
                trace!(len = self.len(), "deleted entry");
                true
            }
            Search::Vacant(_) => false,
        }
    }

    /// Writes every key into `buf` in ascending order, returning the number written.
    ///
    /// Copies left in the slots about to be written by an earlier clone export are released
    /// through this dictionary's policy first.
    ///
    /// # Errors
    ///
    /// `InvalidArgument`, without writing anything, if `buf` is shorter than the dictionary.
    /// `OutOfMemory` if a clone fails, after releasing the clones already written and
    /// clearing their slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::{Datum, Dict, Export, Flags};
    ///
    /// let mut dict = Dict::predefined(Flags::STR_INT).unwrap();
    /// dict.insert(Datum::str("b"), Datum::Int(2)).unwrap();
    /// dict.insert(Datum::str("a"), Datum::Int(1)).unwrap();
    ///
    /// let mut buf = vec![None, None];
    /// assert_eq!(dict.export_keys(&mut buf, Export::Borrow), Ok(2));
    /// assert_eq!(buf[0].as_deref(), Some(&Datum::str("a")));
    /// assert_eq!(buf[1].as_deref(), Some(&Datum::str("b")));
    ///
    /// let mut small = vec![None];
    /// assert!(dict.export_keys(&mut small, Export::Borrow).is_err());
    /// assert!(small[0].is_none());
    /// ```
    pub fn export_keys<'a>(&'a self, buf: &mut [Option<Exported<'a, T>>], export: Export)
        -> Result<usize> {

        self.export(buf, export, true)
    }

    /// Writes every value into `buf` in ascending key order, returning the number written.
    ///
    /// Fails like [`export_keys`](#method.export_keys).
    pub fn export_values<'a>(&'a self, buf: &mut [Option<Exported<'a, T>>], export: Export)
        -> Result<usize> {

        self.export(buf, export, false)
    }

    fn export<'a>(&'a self, buf: &mut [Option<Exported<'a, T>>], export: Export, keys: bool)
        -> Result<usize> {

        if buf.len() < self.len() {
            return Err(Error::InvalidArgument("export buffer is smaller than the dictionary"));
        }

        let side = if keys { &self.policy.key } else { &self.policy.value };

        for slot in &mut buf[..self.len()] {
            if let Some(Exported::Owned(stale)) = slot.take() { side.release(stale); }
        }

        for (i, entry) in self.tree.iter().enumerate() {
            let datum = if keys { &entry.key } else { &entry.value };

            buf[i] = Some(match export {
                Export::Borrow => Exported::Borrowed(datum),
                Export::Clone => match side.duplicate(datum) {
                    Ok(copy) => Exported::Owned(copy),
                    Err(err) => {
                        for slot in &mut buf[..i] {
                            if let Some(Exported::Owned(copy)) = slot.take() { side.release(copy); }
                        }
                        return Err(err);
                    }
                },
            });
        }

        Ok(self.len())
    }

    /// Calls `f` with every key and value in ascending key order.
    ///
    /// Whatever `f` returns, the traversal continues to the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::{Datum, Dict, Flags};
    ///
    /// let mut dict = Dict::predefined(Flags::INT_INT).unwrap();
    /// for i in 0..4 { dict.insert(Datum::Int(i), Datum::Int(i * i)).unwrap(); }
    ///
    /// let mut sum = 0;
    /// dict.for_each(|_, value| sum += value.as_int().unwrap());
    /// assert_eq!(sum, 14);
    /// ```
    pub fn for_each<F, R>(&self, mut f: F) where F: FnMut(&Datum<T>, &Datum<T>) -> R {
        for entry in self.tree.iter() {
            let _ = f(&entry.key, &entry.value);
        }
    }

    /// Returns an iterator over the entries in ascending key order.
    pub fn iter(&self) -> Iter<T> { Iter(self.tree.iter()) }

    /// Returns an iterator over the keys in ascending order.
    pub fn keys(&self) -> Keys<T> { Keys(self.tree.iter()) }

    /// Returns an iterator over the values in ascending key order.
    pub fn values(&self) -> Values<T> { Values(self.tree.iter()) }

    /// Returns the entry with the least key, or `None` if the dictionary is empty.
    pub fn first(&self) -> Option<(&Datum<T>, &Datum<T>)> { self.iter().next() }

    /// Returns the entry with the greatest key, or `None` if the dictionary is empty.
    pub fn last(&self) -> Option<(&Datum<T>, &Datum<T>)> { self.iter().next_back() }

    /// Returns a deep copy of the dictionary built with its clone operations, sharing no key or
    /// value with it.
    ///
    /// # Errors
    ///
    /// `OutOfMemory` if any clone fails. Everything copied so far is released first.
    ///
    /// # Examples
    ///
    /// ```
    /// use dictree::{Datum, Dict, Flags};
    ///
    /// let mut dict = Dict::predefined(Flags::STR_STR).unwrap();
    /// dict.insert_clone(&Datum::str("k"), &Datum::str("v")).unwrap();
    ///
    /// let mut copy = dict.try_clone().unwrap();
    /// copy.delete(&Datum::str("k"));
    ///
    /// assert_eq!(dict.len(), 1);
    /// assert!(copy.is_empty());
    /// ```
    pub fn try_clone(&self) -> Result<Self> {
        debug!(len = self.len(), flags = ?self.flags, "cloning dictionary");
        let mut copy = Dict::with_policy(self.flags, self.policy.clone());

        for entry in self.tree.iter() {
            if let Err(err) = copy.insert_clone(&entry.key, &entry.value) {
                debug!(copied = copy.len(), %err, "clone failed, releasing partial copy");
                return Err(err);
            }
        }

        Ok(copy)
    }

    /// Releases every key and value, then the dictionary itself. Dropping the dictionary does
    /// the same.
    pub fn destroy(self) {}
}

impl<T> Drop for Dict<T> {
    fn drop(&mut self) {
        let policy = &self.policy;
        self.tree.drain(|entry| {
            policy.key.release(entry.key);
            policy.value.release(entry.value);
        });
    }
}

/// Predefined dictionaries copy like any other collection: their clone operations can only
/// fail by running out of memory.
impl Clone for Dict {
    fn clone(&self) -> Dict {
        let mut copy = Dict::with_policy(self.flags, self.policy.clone());
        for entry in self.tree.iter() { copy.insert_owned(entry.key.clone(), entry.value.clone()); }
        copy
    }
}

/// An empty dictionary of integers to integers.
impl Default for Dict {
    fn default() -> Dict {
        let policy = Policy { order: Order::Numeric, key: Ownership::Inline, value: Ownership::Inline };
        Dict::with_policy(Flags::INT_INT, policy)
    }
}

impl<T> Debug for Dict<T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for Dict<T> where T: PartialEq {
    fn eq(&self, other: &Dict<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a, T> IntoIterator for &'a Dict<T> {
    type Item = (&'a Datum<T>, &'a Datum<T>);
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

/// An iterator over a dictionary's entries in ascending key order.
///
/// Acquire through [`Dict::iter`] or the `IntoIterator` trait:
///
/// ```
/// use dictree::{Datum, Dict, Flags};
///
/// let mut dict = Dict::predefined(Flags::INT_STR).unwrap();
/// dict.insert(Datum::Int(2), Datum::str("b")).unwrap();
/// dict.insert(Datum::Int(1), Datum::str("a")).unwrap();
///
/// let keys: Vec<i64> = (&dict).into_iter().filter_map(|(k, _)| k.as_int()).collect();
/// assert_eq!(keys, [1, 2]);
/// ```
pub struct Iter<'a, T: 'a>(node::Iter<'a, Entry<T>>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Iter<'a, T> { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a Datum<T>, &'a Datum<T>);
    fn next(&mut self) -> Option<Self::Item> { self.0.next().map(|e| (&e.key, &e.value)) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> { self.0.next_back().map(|e| (&e.key, &e.value)) }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// An iterator over a dictionary's keys in ascending order.
pub struct Keys<'a, T: 'a>(node::Iter<'a, Entry<T>>);

impl<'a, T> Iterator for Keys<'a, T> {
    type Item = &'a Datum<T>;
    fn next(&mut self) -> Option<&'a Datum<T>> { self.0.next().map(|e| &e.key) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Keys<'a, T> {
    fn next_back(&mut self) -> Option<&'a Datum<T>> { self.0.next_back().map(|e| &e.key) }
}

impl<'a, T> ExactSizeIterator for Keys<'a, T> {}

/// An iterator over a dictionary's values in ascending key order.
pub struct Values<'a, T: 'a>(node::Iter<'a, Entry<T>>);

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a Datum<T>;
    fn next(&mut self) -> Option<&'a Datum<T>> { self.0.next().map(|e| &e.value) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Values<'a, T> {
    fn next_back(&mut self) -> Option<&'a Datum<T>> { self.0.next_back().map(|e| &e.value) }
}

impl<'a, T> ExactSizeIterator for Values<'a, T> {}

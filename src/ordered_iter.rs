use ordered_iter::OrderedMapIterator;
use std::convert::Infallible;
use super::dict::Iter;
use super::Datum;

impl<'a> OrderedMapIterator for Iter<'a, Infallible> {
    type Key = &'a Datum;
    type Val = &'a Datum;
}

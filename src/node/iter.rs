use super::{Link, Tree};

/// An in-order walk over a tree's items, following successor and predecessor links.
pub struct Iter<'a, E: 'a> {
    tree: &'a Tree<E>,
    front: Link,
    back: Link,
    size: usize,
}

impl<'a, E> Iter<'a, E> {
    pub fn new(tree: &'a Tree<E>) -> Iter<'a, E> {
        Iter { tree: tree, front: tree.first(), back: tree.last(), size: tree.len() }
    }
}

impl<'a, E> Clone for Iter<'a, E> {
    fn clone(&self) -> Iter<'a, E> {
        Iter { tree: self.tree, front: self.front, back: self.back, size: self.size }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        if self.size == 0 { return None; }
        let index = self.front?;
        self.size -= 1;
        self.front = self.tree.next(index);
        Some(&self.tree[index])
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<'a, E> DoubleEndedIterator for Iter<'a, E> {
    fn next_back(&mut self) -> Option<&'a E> {
        if self.size == 0 { return None; }
        let index = self.back?;
        self.size -= 1;
        self.back = self.tree.prev(index);
        Some(&self.tree[index])
    }
}

impl<'a, E> ExactSizeIterator for Iter<'a, E> {}

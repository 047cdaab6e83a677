//! A red-black tree whose nodes live in an arena and link to each other by index.
//!
//! The tree knows nothing about keys: searches are driven by a closure that compares the
//! probe against a node's item.

mod balance;
mod iter;

#[cfg(test)]
mod test;

use slab::Slab;
use std::cmp::Ordering::{self, *};
use std::ops;

pub use self::iter::Iter;

pub type Link = Option<usize>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
}

impl Dir {
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Where a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Search {
    /// The node holding a matching item.
    Found(usize),
    /// The parent and side a new node must be attached to, or `None` if the tree is empty.
    Vacant(Option<(usize, Dir)>),
}

pub struct Node<E> {
    parent: Link,
    left: Link,
    right: Link,
    color: Color,
    item: E,
}

impl<E> Node<E> {
    fn child(&self, dir: Dir) -> Link {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    fn child_mut(&mut self, dir: Dir) -> &mut Link {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }
}

pub struct Tree<E> {
    nodes: Slab<Node<E>>,
    root: Link,
}

impl<E> Tree<E> {
    pub fn new() -> Self { Tree { nodes: Slab::new(), root: None } }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Descends from the root, steering by `f(item)`, which orders the probe relative to
    /// `item`.
    pub fn locate<F>(&self, mut f: F) -> Search where F: FnMut(&E) -> Ordering {
        let mut link = self.root;
        let mut parent = None;

        while let Some(index) = link {
            let node = &self.nodes[index];
            let dir = match f(&node.item) {
                Equal => return Search::Found(index),
                Less => Dir::Left,
                Greater => Dir::Right,
            };

            parent = Some((index, dir));
            link = node.child(dir);
        }

        Search::Vacant(parent)
    }

    /// Links a new red node at the position a vacant search reported and restores balance.
    /// Returns the new node's index.
    pub fn attach(&mut self, at: Option<(usize, Dir)>, item: E) -> usize {
        let index = self.nodes.insert(Node {
            parent: at.map(|e| e.0),
            left: None,
            right: None,
            color: Color::Red,
            item: item,
        });

        match at {
            None => self.root = Some(index),
            Some((parent, dir)) => *self.nodes[parent].child_mut(dir) = Some(index),
        }

        self.rebalance_insert(index);
        index
    }

    /// Unlinks the node, restores balance and returns its item.
    pub fn detach(&mut self, z: usize) -> E {
        let (z_left, z_right) = (self.nodes[z].left, self.nodes[z].right);
        let mut removed = self.nodes[z].color;
        let x;
        let x_parent;

        match (z_left, z_right) {
            (None, _) => {
                x = z_right;
                x_parent = self.nodes[z].parent;
                self.transplant(z, z_right);
            }
            (_, None) => {
                x = z_left;
                x_parent = self.nodes[z].parent;
                self.transplant(z, z_left);
            }
            (Some(left), Some(right)) => {
                // Substitute the in-order successor.
                let y = self.min_from(right);
                removed = self.nodes[y].color;
                x = self.nodes[y].right;

                if y == right {
                    x_parent = Some(y);
                } else {
                    x_parent = self.nodes[y].parent;
                    self.transplant(y, x);
                    self.nodes[y].right = Some(right);
                    self.nodes[right].parent = Some(y);
                }

                self.transplant(z, Some(y));
                self.nodes[y].left = Some(left);
                self.nodes[left].parent = Some(y);
                self.nodes[y].color = self.nodes[z].color;
            }
        }

        if removed == Color::Black { self.rebalance_remove(x, x_parent); }
        self.nodes.remove(z).item
    }

    /// Replaces the subtree rooted at `u` with the one rooted at `v`.
    fn transplant(&mut self, u: usize, v: Link) {
        let parent = self.nodes[u].parent;

        match parent {
            None => self.root = v,
            Some(p) => if self.nodes[p].left == Some(u) {
                self.nodes[p].left = v;
            } else {
                self.nodes[p].right = v;
            },
        }

        if let Some(v) = v { self.nodes[v].parent = parent; }
    }

    fn min_from(&self, mut index: usize) -> usize {
        while let Some(left) = self.nodes[index].left { index = left; }
        index
    }

    fn max_from(&self, mut index: usize) -> usize {
        while let Some(right) = self.nodes[index].right { index = right; }
        index
    }

    /// Returns the node with the least item.
    pub fn first(&self) -> Link { self.root.map(|root| self.min_from(root)) }

    /// Returns the node with the greatest item.
    pub fn last(&self) -> Link { self.root.map(|root| self.max_from(root)) }

    /// Returns the in-order successor of the node.
    pub fn next(&self, index: usize) -> Link {
        if let Some(right) = self.nodes[index].right { return Some(self.min_from(right)); }

        let mut child = index;
        let mut parent = self.nodes[index].parent;

        while let Some(p) = parent {
            if self.nodes[p].left == Some(child) { break; }
            child = p;
            parent = self.nodes[p].parent;
        }

        parent
    }

    /// Returns the in-order predecessor of the node.
    pub fn prev(&self, index: usize) -> Link {
        if let Some(left) = self.nodes[index].left { return Some(self.max_from(left)); }

        let mut child = index;
        let mut parent = self.nodes[index].parent;

        while let Some(p) = parent {
            if self.nodes[p].right == Some(child) { break; }
            child = p;
            parent = self.nodes[p].parent;
        }

        parent
    }

    pub fn iter(&self) -> Iter<E> { Iter::new(self) }

    /// Removes every node in post-order, handing each item to `f`.
    ///
    /// Child links are cut on the way down and parent links lead back up, so no stack is
    /// needed however deep the tree is.
    pub fn drain<F>(&mut self, mut f: F) where F: FnMut(E) {
        let mut link = self.root.take();

        while let Some(index) = link {
            let node = &mut self.nodes[index];

            if let Some(left) = node.left.take() {
                link = Some(left);
            } else if let Some(right) = node.right.take() {
                link = Some(right);
            } else {
                link = node.parent;
                f(self.nodes.remove(index).item);
            }
        }

        debug_assert!(self.nodes.is_empty());
    }
}

impl<E> Default for Tree<E> {
    fn default() -> Self { Tree::new() }
}

impl<E> ops::Index<usize> for Tree<E> {
    type Output = E;
    fn index(&self, index: usize) -> &E { &self.nodes[index].item }
}

impl<E> ops::IndexMut<usize> for Tree<E> {
    fn index_mut(&mut self, index: usize) -> &mut E { &mut self.nodes[index].item }
}

use super::{Color, Dir, Link, Tree};

// 1. The root is black.
// 2. Children of a red node are black.
// 3. Every path from a node to an empty link passes through the same number of black
//    nodes.
impl<E> Tree<E> {
    fn color(&self, link: Link) -> Color {
        link.map_or(Color::Black, |index| self.nodes[index].color)
    }

    fn side_of(&self, parent: usize, child: Link) -> Dir {
        if self.nodes[parent].left == child { Dir::Left } else { Dir::Right }
    }

    /// Rotates the node towards `dir`, promoting its child on the opposite side.
    fn rotate(&mut self, x: usize, dir: Dir) {
        let opp = dir.opposite();
        let y = match self.nodes[x].child(opp) {
            Some(y) => y,
            None => return,
        };

        let inner = self.nodes[y].child(dir);
        *self.nodes[x].child_mut(opp) = inner;
        if let Some(inner) = inner { self.nodes[inner].parent = Some(x); }

        self.transplant(x, Some(y));
        *self.nodes[y].child_mut(dir) = Some(x);
        self.nodes[x].parent = Some(y);
    }

    pub(super) fn rebalance_insert(&mut self, mut z: usize) {
        loop {
            let p = match self.nodes[z].parent {
                Some(p) if self.nodes[p].color == Color::Red => p,
                _ => break,
            };

            // A red node is never the root, so it has a parent.
            let g = match self.nodes[p].parent {
                Some(g) => g,
                None => break,
            };

            let dir = self.side_of(g, Some(p));
            let uncle = self.nodes[g].child(dir.opposite());

            if self.color(uncle) == Color::Red {
                self.nodes[p].color = Color::Black;
                if let Some(uncle) = uncle { self.nodes[uncle].color = Color::Black; }
                self.nodes[g].color = Color::Red;
                z = g;
                continue;
            }

            // An inner grandchild is first rotated to the outside, taking its parent's place.
            let p = if self.nodes[p].child(dir.opposite()) == Some(z) {
                self.rotate(p, dir);
                z
            } else {
                p
            };

            self.nodes[p].color = Color::Black;
            self.nodes[g].color = Color::Red;
            self.rotate(g, dir.opposite());
            break;
        }

        if let Some(root) = self.root { self.nodes[root].color = Color::Black; }
    }

    pub(super) fn rebalance_remove(&mut self, mut x: Link, mut parent: Link) {
        while x != self.root && self.color(x) == Color::Black {
            let p = match parent {
                Some(p) => p,
                None => break,
            };

            let dir = self.side_of(p, x);
            let opp = dir.opposite();

            // The removed black node leaves a deficit on x's side, so x has a sibling.
            let mut w = match self.nodes[p].child(opp) {
                Some(w) => w,
                None => break,
            };

            if self.nodes[w].color == Color::Red {
                self.nodes[w].color = Color::Black;
                self.nodes[p].color = Color::Red;
                self.rotate(p, dir);
                w = match self.nodes[p].child(opp) {
                    Some(w) => w,
                    None => break,
                };
            }

            let (near, far) = (self.nodes[w].child(dir), self.nodes[w].child(opp));

            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                self.nodes[w].color = Color::Red;
                x = Some(p);
                parent = self.nodes[p].parent;
                continue;
            }

            if self.color(far) == Color::Black {
                if let Some(near) = near { self.nodes[near].color = Color::Black; }
                self.nodes[w].color = Color::Red;
                self.rotate(w, opp);
                w = match self.nodes[p].child(opp) {
                    Some(w) => w,
                    None => break,
                };
            }

            self.nodes[w].color = self.nodes[p].color;
            self.nodes[p].color = Color::Black;
            if let Some(far) = self.nodes[w].child(opp) { self.nodes[far].color = Color::Black; }
            self.rotate(p, dir);
            x = self.root;
            break;
        }

        if let Some(x) = x { self.nodes[x].color = Color::Black; }
    }
}

use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};
use super::{Color, Link, Search, Tree};

/// An operation on a `Tree<u32>` kept in ascending order.
#[derive(Clone, Debug)]
enum Op {
    /// Insert an item unless it is already present.
    Insert(u32),
    /// Remove the item at index `n % tree.len()`.
    Remove(usize),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Op {
        if bool::arbitrary(g) {
            Op::Insert(u32::arbitrary(g) % 512)
        } else {
            Op::Remove(usize::arbitrary(g))
        }
    }
}

impl Op {
    fn exec(self, tree: &mut Tree<u32>) {
        match self {
            Op::Insert(item) => if let Search::Vacant(at) = tree.locate(|e| item.cmp(e)) {
                tree.attach(at, item);
            },
            Op::Remove(n) => if !tree.is_empty() {
                let item = *tree.iter().nth(n % tree.len()).unwrap();
                match tree.locate(|e| item.cmp(e)) {
                    Search::Found(index) => assert_eq!(tree.detach(index), item),
                    Search::Vacant(_) => panic!("{} vanished", item),
                }
            },
        }
    }
}

/// Checks order, parent links, red-black rules and the node count. Returns the black height.
pub fn assert_red_black<E>(tree: &Tree<E>) -> usize where E: Ord {
    fn check<E>(tree: &Tree<E>, link: Link, parent: Link, count: &mut usize) -> usize where E: Ord {
        let index = match link {
            None => return 1,
            Some(index) => index,
        };

        *count += 1;
        let node = &tree.nodes[index];
        assert_eq!(node.parent, parent);

        if let Some(left) = node.left { assert!(tree.nodes[left].item < node.item); }
        if let Some(right) = node.right { assert!(tree.nodes[right].item > node.item); }

        if node.color == Color::Red {
            for child in node.left.into_iter().chain(node.right) {
                assert_eq!(tree.nodes[child].color, Color::Black);
            }
        }

        let left = check(tree, node.left, link, count);
        let right = check(tree, node.right, link, count);
        assert_eq!(left, right);
        left + (node.color == Color::Black) as usize
    }

    if let Some(root) = tree.root { assert_eq!(tree.nodes[root].color, Color::Black); }

    let mut count = 0;
    let height = check(tree, tree.root, None, &mut count);
    assert_eq!(count, tree.len());
    height
}

#[test]
fn test_red_black() {
    fn check(ops: Vec<Op>) -> TestResult {
        let mut tree = Tree::new();
        for op in ops {
            op.exec(&mut tree);
            assert_red_black(&tree);
        }
        TestResult::passed()
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn test_iter_ascends() {
    fn check(items: Vec<u32>) -> bool {
        let mut tree = Tree::new();
        for item in items {
            if let Search::Vacant(at) = tree.locate(|e| item.cmp(e)) { tree.attach(at, item); }
        }

        let forward: Vec<u32> = tree.iter().cloned().collect();
        let mut backward: Vec<u32> = tree.iter().rev().cloned().collect();
        backward.reverse();

        forward.windows(2).all(|w| w[0] < w[1]) && forward == backward &&
            forward.len() == tree.len()
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn test_sequential_height() {
    let mut tree = Tree::new();
    for item in 0..1024u32 {
        if let Search::Vacant(at) = tree.locate(|e| item.cmp(e)) { tree.attach(at, item); }
    }

    // A red-black tree of n nodes has black height at most log2(n + 1) + 1.
    assert!(assert_red_black(&tree) <= 11);

    for item in (0..1024u32).filter(|n| n % 3 == 0) {
        if let Search::Found(index) = tree.locate(|e| item.cmp(e)) { tree.detach(index); }
        assert_red_black(&tree);
    }

    assert_eq!(tree.len(), 1024 - 342);
}

#[test]
fn test_drain_visits_every_item() {
    let mut tree = Tree::new();
    for item in [5u32, 3, 8, 1, 4, 7, 9, 2, 6] {
        if let Search::Vacant(at) = tree.locate(|e| item.cmp(e)) { tree.attach(at, item); }
    }

    let mut drained = vec![];
    tree.drain(|item| drained.push(item));
    drained.sort();

    assert_eq!(drained, (1..10).collect::<Vec<_>>());
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.first(), None);
}

#[test]
fn test_locate_reports_attach_point() {
    let mut tree = Tree::new();
    assert_eq!(tree.locate(|e: &u32| 1.cmp(e)), Search::Vacant(None));

    let root = tree.attach(None, 10u32);
    match tree.locate(|e| 5.cmp(e)) {
        Search::Vacant(Some((parent, dir))) => {
            assert_eq!(parent, root);
            assert_eq!(dir, super::Dir::Left);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(tree.locate(|e| 10.cmp(e)), Search::Found(root));
}

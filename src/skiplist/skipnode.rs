// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

/// A forward link: the arena index of the next node, or `None` for the end of
/// the level.
pub(crate) type Link = Option<usize>;

/// SkipNodes make up the SkipList. Every node lives in the list's arena and is
/// addressed by its index; the list itself holds the head links, so a node
/// always carries a real value.
///
/// The node's level is the length of `forward` and is fixed when the node is
/// created. `forward[0]` is the immediately next node.
#[derive(Clone, Debug)]
pub(crate) struct SkipNode<T> {
    pub(crate) value: T,
    pub(crate) forward: Vec<Link>,
}

impl<T> SkipNode<T> {
    /// Create a new SkipNode reaching `level` levels, with every link unset.
    pub(crate) fn new(value: T, level: usize) -> Self {
        SkipNode {
            value,
            forward: vec![None; level],
        }
    }

    /// How high the node reaches.
    #[inline]
    pub(crate) fn level(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub(crate) fn next(&self) -> Link {
        self.forward[0]
    }
}

#[cfg(test)]
mod tests {
    use super::SkipNode;

    #[test]
    fn test_new_node() {
        let node = SkipNode::new("da", 3);
        assert_eq!(node.level(), 3);
        assert!(node.forward.iter().all(Option::is_none));
        assert_eq!(node.next(), None);
    }
}

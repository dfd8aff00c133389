// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! An always-ordered skiplist set.

use std::{
    cmp,
    fmt,
    iter,
    mem,
    ops::{
        Bound,
        RangeBounds,
    },
};

use tracing::{
    debug,
    instrument,
    trace,
};

use crate::{
    config::{
        Config,
        DEFAULT_MAX_LEVEL,
        DEFAULT_P,
    },
    errs::SkipListError,
    skiplist::{
        cursor::{
            node_at,
            node_at_mut,
            Cursor,
            CursorMut,
            IntoIter,
            Iter,
            Range,
        },
        level_generator::{
            GeometricalLevelGenerator,
            LevelGenerator,
        },
        skipnode::{
            Link,
            SkipNode,
        },
    },
};

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// The skiplist stores elements such that they are always sorted, holding at
/// most one element per distinct value, and provides expected `O(log n)`
/// search, insertion and removal without any rebalancing.
///
/// Nodes live in an arena owned by the list and link to each other by index.
/// The head links are held on the list itself, one per level, so no sentinel
/// value is ever constructed.
///
/// The ordering of `T` must be consistent with its equality: `a == b` must
/// imply neither `a < b` nor `b < a`. Failure to satisfy this results in
/// unspecified (but memory safe) behaviour.
///
/// The list performs no internal synchronization. Sharing it between threads
/// requires an external lock.
pub struct SkipList<T, G = GeometricalLevelGenerator> {
    // arena; `None` slots are on the free list
    nodes: Vec<Option<SkipNode<T>>>,
    free: Vec<usize>,
    // head links, always `max_level` long
    head: Vec<Link>,
    current_level: usize,
    len: usize,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipList<T> {
    /// Create a new skiplist with the default number of 16 levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipList;
    ///
    /// let skiplist: SkipList<i64> = SkipList::new();
    /// assert!(skiplist.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_max_level(DEFAULT_MAX_LEVEL)
    }

    /// Create a new skiplist with `max_level` levels.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero.
    #[inline]
    pub fn with_max_level(max_level: usize) -> Self {
        Self::with_generator(GeometricalLevelGenerator::new(max_level, DEFAULT_P))
    }

    /// Create a new skiplist from a validated [`Config`].
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::{Config, SkipList};
    ///
    /// let config = Config::default().with_max_level(8).with_seed(42);
    /// let skiplist: SkipList<u32> = SkipList::with_config(config).unwrap();
    /// assert_eq!(skiplist.max_level(), 8);
    ///
    /// assert!(SkipList::<u32>::with_config(Config::default().with_max_level(0)).is_err());
    /// ```
    pub fn with_config(config: Config) -> Result<Self, SkipListError> {
        config.validate()?;
        debug!(
            max_level = config.max_level,
            p = config.p,
            seeded = config.seed.is_some(),
            "building skiplist"
        );
        let lg = match config.seed {
            | Some(seed) => GeometricalLevelGenerator::seeded(config.max_level, config.p, seed),
            | None => GeometricalLevelGenerator::new(config.max_level, config.p),
        };
        Ok(Self::with_generator(lg))
    }
}

impl<T, G> SkipList<T, G>
where
    G: LevelGenerator,
{
    /// Create a new skiplist drawing node levels from `level_generator`. The
    /// list has as many levels as the generator's `total()`.
    ///
    /// # Panics
    ///
    /// Panics if the generator reports zero levels.
    pub fn with_generator(level_generator: G) -> Self {
        let total = level_generator.total();
        if total == 0 {
            panic!("max level must be non-zero.");
        }
        SkipList {
            nodes: Vec::new(),
            free: Vec::new(),
            head: vec![None; total],
            current_level: 0,
            len: 0,
            level_generator,
        }
    }

    /// Move every element out into a new list, leaving `self` empty and
    /// usable. The new list continues the level generator's sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipList;
    ///
    /// let mut a: SkipList<_> = (0..10).collect();
    /// let b = a.take();
    /// assert!(a.is_empty());
    /// assert_eq!(b.len(), 10);
    /// ```
    pub fn take(&mut self) -> Self
    where
        G: Clone,
    {
        let empty = Self::with_generator(self.level_generator.clone());
        mem::replace(self, empty)
    }
}

impl<T, G> SkipList<T, G> {
    /// Clears the skiplist, removing all values. Subsequent inserts behave as
    /// on a fresh list.
    #[instrument(level = "trace", skip_all)]
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing skiplist");
        self.nodes.clear();
        self.free.clear();
        self.head.fill(None);
        self.current_level = 0;
        self.len = 0;
    }

    /// Returns the number of elements in the skiplist.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The upper bound on the number of levels a node may have.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.head.len()
    }

    /// The number of levels currently in use. Zero for a fresh or cleared list.
    #[inline]
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// A cursor at the smallest element, or the end cursor if empty.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        self.cursor(self.head[0])
    }

    /// The end cursor.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        self.cursor(None)
    }

    /// A mutable cursor at the smallest element.
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        let first = self.head[0];
        CursorMut::new(&mut self.nodes, first)
    }

    /// Creates an iterator over the entries of the skiplist, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipList;
    ///
    /// let skiplist: SkipList<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(skiplist.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.begin(), self.len)
    }

    /// Returns a reference to the smallest element.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.begin().get()
    }

    /// Returns a reference to the largest element, descending the express
    /// lanes rather than walking the bottom level.
    pub fn last(&self) -> Option<&T> {
        let last = self.walk(|_| true, |_, _| {});
        last.map(|idx| &self.node(idx).value)
    }

    #[inline]
    fn cursor(&self, link: Link) -> Cursor<'_, T> {
        Cursor::new(&self.nodes, link)
    }

    #[inline]
    fn node(&self, idx: usize) -> &SkipNode<T> {
        node_at(&self.nodes, idx)
    }

    #[inline]
    fn node_mut(&mut self, idx: usize) -> &mut SkipNode<T> {
        node_at_mut(&mut self.nodes, idx)
    }

    /// The link leaving `from` (`None` being the head) on `level`.
    #[inline]
    fn forward(&self, from: Link, level: usize) -> Link {
        match from {
            | None => self.head[level],
            | Some(idx) => self.node(idx).forward[level],
        }
    }

    #[inline]
    fn set_forward(&mut self, from: Link, level: usize, to: Link) {
        match from {
            | None => self.head[level] = to,
            | Some(idx) => self.node_mut(idx).forward[level] = to,
        }
    }

    /// The search primitive. Starting at the head on the highest level in use,
    /// move right while `advance` holds for the next value and drop a level
    /// when it does not. `visit` receives, for each level, the last node
    /// reached on it (`None` being the head).
    ///
    /// Returns the last node reached on level 0; its level-0 successor is the
    /// first element for which `advance` fails.
    fn walk<A, V>(&self, advance: A, mut visit: V) -> Link
    where
        A: Fn(&T) -> bool,
        V: FnMut(usize, Link),
    {
        let mut current: Link = None;
        for level in (0..self.current_level).rev() {
            while let Some(next) = self.forward(current, level) {
                if !advance(&self.node(next).value) {
                    break;
                }
                current = Some(next);
            }
            visit(level, current);
        }
        current
    }

    fn alloc(&mut self, node: SkipNode<T>) -> usize {
        match self.free.pop() {
            | Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            },
            | None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            },
        }
    }

    fn release(&mut self, idx: usize) -> SkipNode<T> {
        let node = self.nodes[idx].take().expect("releasing a freed slot");
        self.free.push(idx);
        node
    }
}

impl<T, G> SkipList<T, G>
where
    T: Ord,
    G: LevelGenerator,
{
    /// Insert the element into the skiplist, keeping it sorted.
    ///
    /// Returns a cursor at the element and `true` when it was added. When an
    /// equal element is already present nothing changes: the cursor points at
    /// the existing element and the flag is `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// let (cursor, added) = skiplist.insert(5);
    /// assert!(added);
    /// assert_eq!(cursor.get(), Some(&5));
    ///
    /// let (_, added) = skiplist.insert(5);
    /// assert!(!added);
    /// assert_eq!(skiplist.len(), 1);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, value: T) -> (Cursor<'_, T>, bool) {
        let mut update: Vec<Link> = vec![None; self.max_level()];
        let last = self.walk(|v| *v < value, |level, node| update[level] = node);

        if let Some(existing) = self.forward(last, 0) {
            if self.node(existing).value == value {
                trace!(len = self.len, "duplicate insert ignored");
                return (self.cursor(Some(existing)), false);
            }
        }

        let new_level = self.level_generator.random().clamp(1, self.max_level());
        if new_level > self.current_level {
            // the levels above the old top only have the head before the new
            // node, which `update` already holds as `None`
            trace!(
                from = self.current_level,
                to = new_level,
                "raising current level"
            );
            self.current_level = new_level;
        }

        let idx = self.alloc(SkipNode::new(value, new_level));
        for (level, &prev) in update.iter().enumerate().take(new_level) {
            let next = self.forward(prev, level);
            self.node_mut(idx).forward[level] = next;
            self.set_forward(prev, level, Some(idx));
        }

        self.len += 1;
        trace!(new_level, len = self.len, "inserted");
        (self.cursor(Some(idx)), true)
    }

    /// Removes the element equal to `value`, returning whether it was present.
    #[inline]
    pub fn erase(&mut self, value: &T) -> bool {
        self.remove(value).is_some()
    }

    /// Removes and returns the element equal to `value`, if any. An absent
    /// value leaves the list untouched.
    #[instrument(level = "trace", skip_all)]
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let mut update: Vec<Link> = vec![None; self.max_level()];
        let last = self.walk(|v| v < value, |level, node| update[level] = node);

        let idx = self
            .forward(last, 0)
            .filter(|&idx| self.node(idx).value == *value)?;

        // once a predecessor no longer links to the node, the node does not
        // reach any higher level
        for (level, &prev) in update.iter().enumerate().take(self.current_level) {
            if self.forward(prev, level) != Some(idx) {
                break;
            }
            let next = self.node(idx).forward[level];
            self.set_forward(prev, level, next);
        }

        let node = self.release(idx);

        while self.current_level > 1 && self.head[self.current_level - 1].is_none() {
            self.current_level -= 1;
        }

        self.len -= 1;
        trace!(
            level = node.level(),
            current_level = self.current_level,
            len = self.len,
            "removed"
        );
        Some(node.value)
    }

    /// A cursor at the element equal to `value`, or the end cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipList;
    ///
    /// let skiplist: SkipList<_> = (0..10).collect();
    /// assert_eq!(skiplist.find(&4).get(), Some(&4));
    /// assert_eq!(skiplist.find(&99), skiplist.end());
    /// ```
    pub fn find(&self, value: &T) -> Cursor<'_, T> {
        self.cursor(self.find_link(value))
    }

    /// A mutable cursor at the element equal to `value`, or the end cursor.
    pub fn find_mut(&mut self, value: &T) -> CursorMut<'_, T> {
        let link = self.find_link(value);
        CursorMut::new(&mut self.nodes, link)
    }

    /// Returns a reference to the element equal to `value`.
    #[inline]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.find(value).get()
    }

    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.find_link(value).is_some()
    }

    /// A cursor at the first element `>= value`, or the end cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipList;
    ///
    /// let skiplist: SkipList<_> = [10, 20, 15].into_iter().collect();
    /// assert_eq!(skiplist.lower_bound(&14).get(), Some(&15));
    /// assert_eq!(skiplist.lower_bound(&15).get(), Some(&15));
    /// assert!(skiplist.lower_bound(&21).is_end());
    /// ```
    pub fn lower_bound(&self, value: &T) -> Cursor<'_, T> {
        self.cursor(self.lower_link(value))
    }

    /// A cursor at the first element `> value`, or the end cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipList;
    ///
    /// let skiplist: SkipList<_> = [10, 20, 15].into_iter().collect();
    /// assert_eq!(skiplist.upper_bound(&15).get(), Some(&20));
    /// assert!(skiplist.upper_bound(&20).is_end());
    /// ```
    pub fn upper_bound(&self, value: &T) -> Cursor<'_, T> {
        self.cursor(self.upper_link(value))
    }

    /// Iterate over the elements within `range`, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipList;
    ///
    /// let skiplist: SkipList<_> = (0..10).collect();
    /// assert_eq!(skiplist.range(3..6).copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    /// assert_eq!(skiplist.range(8..).count(), 2);
    /// ```
    pub fn range<R>(&self, range: R) -> Range<'_, T>
    where
        R: RangeBounds<T>,
    {
        let start = match range.start_bound() {
            | Bound::Included(v) => self.lower_link(v),
            | Bound::Excluded(v) => self.upper_link(v),
            | Bound::Unbounded => self.head[0],
        };
        // an inverted range is empty
        let (start, end) = match range.end_bound() {
            | Bound::Included(v) => (
                start.filter(|&idx| self.node(idx).value <= *v),
                self.upper_link(v),
            ),
            | Bound::Excluded(v) => (
                start.filter(|&idx| self.node(idx).value < *v),
                self.lower_link(v),
            ),
            | Bound::Unbounded => (start, None),
        };
        Range::new(&self.nodes, start, end)
    }

    fn find_link(&self, value: &T) -> Link {
        self.lower_link(value)
            .filter(|&idx| self.node(idx).value == *value)
    }

    fn lower_link(&self, value: &T) -> Link {
        let last = self.walk(|v| v < value, |_, _| {});
        self.forward(last, 0)
    }

    fn upper_link(&self, value: &T) -> Link {
        let last = self.walk(|v| v <= value, |_, _| {});
        self.forward(last, 0)
    }

    /// Rebuild `self` as a deep copy of `other`. The level-0 chain is copied
    /// first, keeping every node's level, then each higher level is wired by
    /// running the search primitive against the new structure.
    fn copy_from(&mut self, other: &Self)
    where
        T: Clone,
        G: Clone,
    {
        self.clear();
        self.head = vec![None; other.max_level()];
        self.level_generator = other.level_generator.clone();
        self.nodes.reserve(other.len);

        let mut prev: Link = None;
        for idx in other.links() {
            let src = other.node(idx);
            let copy = self.alloc(SkipNode::new(src.value.clone(), src.level()));
            self.set_forward(prev, 0, Some(copy));
            prev = Some(copy);
        }
        self.len = other.len;

        let mut current = self.head[0];
        while let Some(idx) = current {
            let level = self.node(idx).level();
            if level > 1 {
                let mut update: Vec<Link> = vec![None; self.max_level()];
                let target = &self.node(idx).value;
                self.walk(|v| v < target, |l, node| update[l] = node);

                for (l, &pred) in update.iter().enumerate().take(level).skip(1) {
                    let next = self.forward(pred, l);
                    self.node_mut(idx).forward[l] = next;
                    self.set_forward(pred, l, Some(idx));
                }
            }
            self.current_level = cmp::max(self.current_level, level);
            current = self.node(idx).next();
        }

        debug!(
            len = self.len,
            current_level = self.current_level,
            "rebuilt skiplist copy"
        );
    }
}

impl<T, G> SkipList<T, G> {
    /// Arena indices in level-0 order.
    fn links(&self) -> impl Iterator<Item = usize> + '_ {
        iter::successors(self.head[0], move |&idx| self.node(idx).next())
    }

    /// Checks the integrity of the skiplist.
    #[cfg(test)]
    pub(crate) fn check(&self)
    where
        T: Ord,
    {
        assert_eq!(
            self.nodes.len() - self.free.len(),
            self.len,
            "occupied slots must match len"
        );
        for (level, link) in self.head.iter().enumerate().skip(self.current_level) {
            assert!(link.is_none(), "head link above current level {}", level);
        }

        let bottom: Vec<usize> = self.links().collect();
        assert_eq!(bottom.len(), self.len, "level 0 must hold every element");
        for pair in bottom.windows(2) {
            assert!(
                self.node(pair[0]).value < self.node(pair[1]).value,
                "level 0 must be strictly increasing"
            );
        }

        let mut top = 0;
        for &idx in &bottom {
            let level = self.node(idx).level();
            assert!(level >= 1, "node without levels");
            assert!(level <= self.current_level, "node above current level");
            top = cmp::max(top, level);
        }
        if self.len > 0 {
            assert_eq!(top, self.current_level, "current level must be tight");
        } else {
            assert!(self.current_level <= 1, "empty list keeps at most one level");
        }

        for level in 1..self.current_level {
            let expected: Vec<usize> = bottom
                .iter()
                .copied()
                .filter(|&idx| self.node(idx).level() > level)
                .collect();
            let actual: Vec<usize> =
                iter::successors(self.head[level], |&idx| self.node(idx).forward[level]).collect();
            assert_eq!(
                actual, expected,
                "level {} must be the subsequence of nodes reaching it",
                level
            );
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for SkipList<T> {
    fn default() -> SkipList<T> {
        SkipList::new()
    }
}

impl<T, G> Clone for SkipList<T, G>
where
    T: Ord + Clone,
    G: LevelGenerator + Clone,
{
    fn clone(&self) -> Self {
        let mut list = SkipList::with_generator(self.level_generator.clone());
        list.copy_from(self);
        list
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source);
    }
}

/// Two lists are equal when they hold equal elements in the same order. The
/// level structure plays no part.
impl<A, B, G, H> PartialEq<SkipList<B, H>> for SkipList<A, G>
where
    A: PartialEq<B>,
{
    fn eq(&self, other: &SkipList<B, H>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, G> Eq for SkipList<T, G> where T: Eq {}

impl<T, G> Extend<T> for SkipList<T, G>
where
    T: Ord,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            self.insert(element);
        }
    }
}

impl<T> FromIterator<T> for SkipList<T>
where
    T: Ord,
{
    #[inline]
    fn from_iter<I>(iter: I) -> SkipList<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut skiplist = SkipList::new();
        skiplist.extend(iter);
        skiplist
    }
}

impl<T, G> fmt::Debug for SkipList<T, G>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, G> IntoIterator for SkipList<T, G> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.nodes, self.head[0], self.len)
    }
}

impl<'a, T, G> IntoIterator for &'a SkipList<T, G> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::ops::Bound::{
        self,
        Excluded,
        Included,
        Unbounded,
    };

    use super::SkipList;
    use crate::{
        config::Config,
        errs::SkipListError,
        skiplist::test::ScriptedLevels,
    };

    #[test]
    fn test_insert_and_duplicate() {
        let mut sl = SkipList::new();
        let (cursor, added) = sl.insert(5);
        assert!(added);
        assert_eq!(cursor.get(), Some(&5));

        let (cursor, added) = sl.insert(5);
        assert!(!added);
        assert_eq!(cursor.get(), Some(&5));
        assert_eq!(sl.len(), 1);
        sl.check();
    }

    #[test]
    fn test_duplicate_returns_existing_position() {
        let mut sl = SkipList::new();
        sl.extend([1, 5, 9]);
        let first = sl.find(&5).get().copied();
        let (cursor, added) = sl.insert(5);
        assert!(!added);
        assert_eq!(cursor.get().copied(), first);
        // the cursor continues from the existing element
        assert_eq!(cursor.copied().collect::<Vec<_>>(), vec![5, 9]);
    }

    #[test]
    fn test_duplicate_keeps_original_value() {
        #[derive(Debug, Clone)]
        struct Entry(u32, &'static str);
        impl PartialEq for Entry {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }
        impl Eq for Entry {}
        impl PartialOrd for Entry {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for Entry {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0.cmp(&other.0)
            }
        }

        let mut sl = SkipList::new();
        sl.insert(Entry(1, "first"));
        let (cursor, added) = sl.insert(Entry(1, "second"));
        assert!(!added);
        assert_eq!(cursor.get().unwrap().1, "first");
    }

    #[test]
    fn test_find() {
        let mut sl = SkipList::new();
        sl.extend([5, 10, 15]);

        let it5 = sl.find(&5);
        assert_ne!(it5, sl.end());
        assert_eq!(it5.get(), Some(&5));
        assert_eq!(sl.find(&99), sl.end());
        assert_eq!(sl.find(&7), sl.end());
        assert!(sl.contains(&10));
        assert!(!sl.contains(&11));
        assert_eq!(sl.get(&15), Some(&15));
    }

    #[test]
    fn test_erase() {
        let mut sl = SkipList::new();
        sl.extend([5, 10]);

        assert!(sl.erase(&5));
        assert_eq!(sl.len(), 1);
        assert_eq!(sl.find(&5), sl.end());
        sl.check();

        assert!(!sl.erase(&5));
        assert_eq!(sl.len(), 1);
        sl.check();

        assert!(sl.erase(&10));
        assert!(sl.is_empty());
        assert_eq!(sl.begin(), sl.end());
        sl.check();
    }

    #[test]
    fn test_remove_returns_value() {
        let mut sl: SkipList<_> = (0..100).collect();
        assert_eq!(sl.remove(&42), Some(42));
        assert_eq!(sl.remove(&42), None);
        assert_eq!(sl.len(), 99);
        sl.check();
    }

    #[test]
    fn test_round_trip() {
        let mut sl = SkipList::new();
        sl.extend([10, 20, 15]);
        assert_eq!(sl.iter().copied().collect::<Vec<_>>(), vec![10, 15, 20]);
        assert_eq!(sl.lower_bound(&14).get(), Some(&15));
        assert_eq!(sl.upper_bound(&15).get(), Some(&20));
        assert_eq!(sl.upper_bound(&20), sl.end());

        assert!(sl.erase(&10));
        assert_eq!(sl.len(), 2);
        assert_eq!(sl.find(&10), sl.end());
        sl.check();
    }

    #[test]
    fn test_bounds_edge_cases() {
        let mut sl = SkipList::new();
        sl.extend([10, 20, 30]);

        assert_eq!(sl.lower_bound(&5).get(), Some(&10));
        assert_eq!(sl.lower_bound(&15).get(), Some(&20));
        assert_eq!(sl.lower_bound(&20).get(), Some(&20));
        assert_eq!(sl.lower_bound(&100), sl.end());

        assert_eq!(sl.upper_bound(&5).get(), Some(&10));
        assert_eq!(sl.upper_bound(&10).get(), Some(&20));
        assert_eq!(sl.upper_bound(&20).get(), Some(&30));
        assert_eq!(sl.upper_bound(&30), sl.end());
        assert_eq!(sl.upper_bound(&100), sl.end());
    }

    #[test]
    fn test_bounds_large() {
        let sl: SkipList<u32> = (0..1000).map(|i| i * 2).collect();
        for v in 0..2000 {
            let lower = if v % 2 == 0 { v } else { v + 1 };
            let upper = if v % 2 == 0 { v + 2 } else { v + 1 };
            assert_eq!(sl.lower_bound(&v).get().copied(), Some(lower).filter(|&x| x < 2000));
            assert_eq!(sl.upper_bound(&v).get().copied(), Some(upper).filter(|&x| x < 2000));
        }
    }

    #[test]
    fn test_empty_list() {
        let sl: SkipList<i32> = SkipList::new();
        assert!(sl.is_empty());
        assert_eq!(sl.len(), 0);
        assert_eq!(sl.current_level(), 0);
        assert_eq!(sl.begin(), sl.end());
        assert_eq!(sl.find(&1), sl.end());
        assert_eq!(sl.lower_bound(&1), sl.end());
        assert_eq!(sl.upper_bound(&1), sl.end());
        assert_eq!(sl.first(), None);
        assert_eq!(sl.last(), None);
        sl.check();
    }

    #[test]
    fn test_iterator_traversal() {
        let mut sl = SkipList::new();
        sl.extend([5, 1, 3]);

        let mut it = sl.begin();
        assert_ne!(it, sl.end());
        assert_eq!(it.get(), Some(&1));
        it.move_next();
        assert_eq!(it.get(), Some(&3));
        it.move_next();
        assert_eq!(it.get(), Some(&5));
        it.move_next();
        assert_eq!(it, sl.end());

        // restartable
        assert_eq!(sl.begin().count(), 3);
        assert_eq!(sl.iter().len(), 3);
        assert_eq!((&sl).into_iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_first_last() {
        let sl: SkipList<_> = [7, 3, 9, 1].into_iter().collect();
        assert_eq!(sl.first(), Some(&1));
        assert_eq!(sl.last(), Some(&9));
    }

    #[test]
    fn test_cursor_mut() {
        let mut sl: SkipList<_> = (0..5).map(|i| i * 10).collect();
        {
            let mut cursor = sl.find_mut(&20);
            // bumping by less than the gap keeps the order
            *cursor.get_mut().unwrap() += 5;
            cursor.move_next();
            assert_eq!(cursor.get(), Some(&30));
        }
        assert!(sl.find_mut(&99).is_end());

        let mut cursor = sl.begin_mut();
        while let Some(v) = cursor.get_mut() {
            *v *= 2;
            cursor.move_next();
        }
        assert_eq!(sl.iter().copied().collect::<Vec<_>>(), vec![0, 20, 50, 60, 80]);
        sl.check();
    }

    #[test]
    fn test_clear() {
        let mut sl: SkipList<_> = (0..100).collect();
        sl.clear();
        assert!(sl.is_empty());
        assert_eq!(sl.len(), 0);
        assert_eq!(sl.begin(), sl.end());
        assert_eq!(sl.current_level(), 0);
        sl.check();

        sl.extend([3, 1, 2]);
        assert_eq!(sl.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        sl.check();
    }

    #[test]
    fn test_clone() {
        let mut sl = SkipList::new();
        sl.extend([10, 20]);

        let mut sl2 = sl.clone();
        assert_eq!(sl, sl2);
        sl2.check();

        sl2.insert(30);
        assert_ne!(sl, sl2);
        assert_eq!(sl.len(), 2);
        assert!(!sl.contains(&30));

        sl2.erase(&10);
        assert!(sl.contains(&10));
        sl.check();
    }

    #[test]
    fn test_clone_keeps_levels() {
        let sl: SkipList<_> = (0..1000).collect();
        let copy = sl.clone();
        copy.check();
        assert_eq!(copy.current_level(), sl.current_level());
        for (a, b) in sl.links().zip(copy.links()) {
            assert_eq!(sl.node(a).level(), copy.node(b).level());
        }
    }

    #[test]
    fn test_clone_from() {
        let source: SkipList<_> = (0..500).collect();
        let mut target: SkipList<_> = (1000..1100).collect();
        target.clone_from(&source);
        target.check();
        assert_eq!(target, source);

        target.insert(-1);
        assert!(!source.contains(&-1));
    }

    #[test]
    fn test_clone_sparse_arena() {
        // copies must not depend on arena order or holes
        let mut sl: SkipList<_> = (0..200).rev().collect();
        for i in (0..200).step_by(3) {
            sl.erase(&i);
        }
        let copy = sl.clone();
        copy.check();
        assert_eq!(copy, sl);
    }

    #[test]
    fn test_take() {
        let mut sl = SkipList::new();
        sl.extend([10, 20]);

        let sl2 = sl.take();
        assert!(!sl2.is_empty());
        assert!(sl.is_empty());
        assert_eq!(sl2.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
        sl.check();
        sl2.check();

        // the moved-from list stays usable
        sl.insert(1);
        assert_eq!(sl.len(), 1);
        sl.check();

        let sl3 = std::mem::take(&mut sl);
        assert!(sl.is_empty());
        assert_eq!(sl3.len(), 1);
    }

    #[test]
    fn test_equality_ignores_structure() {
        let a: SkipList<_> = (0..100).collect();
        let b: SkipList<_> = (0..100).rev().collect();
        let mut c = SkipList::with_max_level(1);
        c.extend(0..100);
        assert_eq!(a, b);
        assert_eq!(a, c);

        let d: SkipList<_> = (0..99).collect();
        assert_ne!(a, d);
        let e: SkipList<_> = (1..101).collect();
        assert_ne!(a, e);
    }

    #[test]
    fn test_single_level_list() {
        let mut sl = SkipList::with_max_level(1);
        sl.extend((0..50).rev());
        sl.check();
        assert_eq!(sl.current_level(), 1);
        assert_eq!(sl.iter().copied().collect::<Vec<_>>(), (0..50).collect::<Vec<_>>());
        for i in 0..50 {
            assert!(sl.erase(&i));
            sl.check();
        }
    }

    #[test]
    #[should_panic]
    fn test_zero_levels_panics() {
        let _ = SkipList::<u8>::with_max_level(0);
    }

    #[test]
    fn test_with_config() {
        let sl: SkipList<u8> = SkipList::with_config(Config::default().with_max_level(4)).unwrap();
        assert_eq!(sl.max_level(), 4);

        let err = SkipList::<u8>::with_config(Config::default().with_p(1.5)).unwrap_err();
        assert_eq!(err, SkipListError::InvalidProbability(1.5));
    }

    #[test]
    fn test_seeded_lists_share_shape() {
        let config = Config::default().with_seed(99);
        let mut a = SkipList::with_config(config).unwrap();
        let mut b = SkipList::with_config(config).unwrap();
        a.extend(0..256);
        b.extend(0..256);
        for (x, y) in a.links().zip(b.links()) {
            assert_eq!(a.node(x).level(), b.node(y).level());
        }
    }

    #[test]
    fn test_trailing_levels_collapse_in_one_erase() {
        // 1 and 2 stay low while 3 reaches the top alone
        let mut sl = SkipList::with_generator(ScriptedLevels::new(8, [1, 2, 6]));
        sl.extend([1, 2, 3]);
        sl.check();
        assert_eq!(sl.current_level(), 6);

        assert!(sl.erase(&3));
        assert_eq!(sl.current_level(), 2);
        sl.check();

        assert!(sl.erase(&2));
        assert_eq!(sl.current_level(), 1);
        assert!(sl.erase(&1));
        assert_eq!(sl.current_level(), 1);
        sl.check();
    }

    #[test]
    fn test_erase_middle_of_tall_nodes() {
        let mut sl = SkipList::with_generator(ScriptedLevels::new(4, [4, 3, 4, 2, 4]));
        sl.extend([10, 20, 30, 40, 50]);
        sl.check();
        assert!(sl.erase(&30));
        sl.check();
        assert_eq!(sl.current_level(), 4);
        assert_eq!(sl.iter().copied().collect::<Vec<_>>(), vec![10, 20, 40, 50]);
    }

    #[test]
    fn test_slot_reuse() {
        let mut sl: SkipList<_> = (0..10).collect();
        for i in 0..10 {
            sl.erase(&i);
        }
        sl.extend(10..20);
        assert_eq!(sl.nodes.len(), 10, "freed slots must be reused");
        sl.check();
    }

    #[test]
    fn test_range() {
        let sl: SkipList<u32> = (0..100).collect();
        let collect = |lo: Bound<u32>, hi: Bound<u32>| sl.range((lo, hi)).copied().collect::<Vec<_>>();

        assert_eq!(collect(Included(10), Excluded(13)), vec![10, 11, 12]);
        assert_eq!(collect(Excluded(10), Included(13)), vec![11, 12, 13]);
        assert_eq!(collect(Unbounded, Excluded(2)), vec![0, 1]);
        assert_eq!(collect(Included(98), Unbounded), vec![98, 99]);
        assert_eq!(collect(Unbounded, Unbounded).len(), 100);
        assert!(collect(Included(50), Excluded(50)).is_empty());
        assert!(collect(Included(60), Included(40)).is_empty());
        assert!(collect(Excluded(99), Unbounded).is_empty());
        assert_eq!(sl.range(20..=21).count(), 2);
    }

    #[test]
    fn test_into_iter() {
        let sl: SkipList<_> = [3, 1, 2].into_iter().collect();
        let values: Vec<_> = sl.into_iter().collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_debug() {
        let sl: SkipList<_> = [2, 1].into_iter().collect();
        assert_eq!(format!("{:?}", sl), "{1, 2}");
    }

    #[test]
    fn test_strings() {
        let mut sl = SkipList::new();
        for word in ["pear", "apple", "fig", "apple"] {
            sl.insert(word.to_string());
        }
        assert_eq!(sl.len(), 3);
        assert_eq!(sl.first().map(String::as_str), Some("apple"));
        assert_eq!(
            sl.lower_bound(&"b".to_string()).get().map(String::as_str),
            Some("fig")
        );
    }
}

// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! Positions and iterators over the bottom level of a [`SkipList`].
//!
//! Every type here walks `forward[0]`, so iteration is always in ascending
//! order regardless of how the express lanes are laid out.
//!
//! [`SkipList`]: crate::SkipList

use std::{
    fmt,
    iter::FusedIterator,
    ptr,
};

use crate::skiplist::skipnode::{
    Link,
    SkipNode,
};

#[inline]
pub(crate) fn node_at<T>(nodes: &[Option<SkipNode<T>>], idx: usize) -> &SkipNode<T> {
    nodes[idx].as_ref().expect("link points at a freed slot")
}

#[inline]
pub(crate) fn node_at_mut<T>(nodes: &mut [Option<SkipNode<T>>], idx: usize) -> &mut SkipNode<T> {
    nodes[idx].as_mut().expect("link points at a freed slot")
}

// ///////////////////////////////////////////////
// Cursor
// ///////////////////////////////////////////////

/// A read-only position in a [`crate::SkipList`].
///
/// A cursor either points at an element or is the end cursor. The end cursor
/// is unique: every end cursor of the same list compares equal, and cursors
/// from different lists never do.
///
/// A cursor is also an iterator yielding every element from its position to
/// the end of the list.
pub struct Cursor<'a, T> {
    nodes: &'a [Option<SkipNode<T>>],
    current: Link,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(nodes: &'a [Option<SkipNode<T>>], current: Link) -> Self {
        Cursor { nodes, current }
    }

    /// The element under the cursor, or `None` at the end.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        let nodes = self.nodes;
        self.current.map(|idx| &node_at(nodes, idx).value)
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Advance to the next element. Advancing the end cursor is a no-op.
    #[inline]
    pub fn move_next(&mut self) {
        if let Some(idx) = self.current {
            self.current = node_at(self.nodes, idx).next();
        }
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.current == other.current
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.get() {
            | Some(value) => f.debug_tuple("Cursor").field(value).finish(),
            | None => f.write_str("Cursor(end)"),
        }
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.get()?;
        self.move_next();
        Some(value)
    }
}

impl<T> FusedIterator for Cursor<'_, T> {}

// ///////////////////////////////////////////////
// CursorMut
// ///////////////////////////////////////////////

/// A mutable position in a [`crate::SkipList`].
///
/// The element may be changed in place, but the change must not move it
/// relative to its neighbours in the ordering. Doing so leaves the list
/// unsorted and searches will give unspecified results.
pub struct CursorMut<'a, T> {
    nodes: &'a mut [Option<SkipNode<T>>],
    current: Link,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(nodes: &'a mut [Option<SkipNode<T>>], current: Link) -> Self {
        CursorMut { nodes, current }
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.current.map(|idx| &node_at(self.nodes, idx).value)
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let idx = self.current?;
        Some(&mut node_at_mut(self.nodes, idx).value)
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    #[inline]
    pub fn move_next(&mut self) {
        if let Some(idx) = self.current {
            self.current = node_at(self.nodes, idx).next();
        }
    }

    /// Downgrade into a read-only cursor at the same position.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.nodes, self.current)
    }
}

impl<T> fmt::Debug for CursorMut<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.get() {
            | Some(value) => f.debug_tuple("CursorMut").field(value).finish(),
            | None => f.write_str("CursorMut(end)"),
        }
    }
}

// ///////////////////////////////////////////////
// Iterators
// ///////////////////////////////////////////////

/// Borrowing iterator over the whole list, in order.
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(cursor: Cursor<'a, T>, remaining: usize) -> Self {
        Iter { cursor, remaining }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.cursor.next()?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Borrowing iterator over the elements between two bounds, in order.
pub struct Range<'a, T> {
    cursor: Cursor<'a, T>,
    // first node past the upper bound
    end: Link,
}

impl<'a, T> Range<'a, T> {
    pub(crate) fn new(nodes: &'a [Option<SkipNode<T>>], start: Link, end: Link) -> Self {
        Range {
            cursor: Cursor::new(nodes, start),
            end,
        }
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cursor.current == self.end {
            return None;
        }
        self.cursor.next()
    }
}

impl<T> FusedIterator for Range<'_, T> {}

/// Consuming iterator, yielding the owned elements in order.
pub struct IntoIter<T> {
    nodes: Vec<Option<SkipNode<T>>>,
    current: Link,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(nodes: Vec<Option<SkipNode<T>>>, current: Link, remaining: usize) -> Self {
        IntoIter {
            nodes,
            current,
            remaining,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let idx = self.current?;
        let node = self.nodes[idx].take().expect("link points at a freed slot");
        self.current = node.next();
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

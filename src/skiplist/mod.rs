// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! A skiplist implementation which allows faster searches than a sorted linked
//! list, without the rebalancing a tree needs.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level `n` is `p` times the chance of occupying level `n-1`
//! (with `0 < p < 1`).
//!
//! It is very unlikely that this will need to be changed as the default should
//! suffice, but if need be custom level generators can be implemented.

pub mod cursor;
pub mod level_generator;
pub mod skiplist;
mod skipnode;

pub use cursor::{
    Cursor,
    CursorMut,
    IntoIter,
    Iter,
    Range,
};
pub use level_generator::{
    GeometricalLevelGenerator,
    LevelGenerator,
};
pub use skiplist::SkipList;

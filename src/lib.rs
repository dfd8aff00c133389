#![allow(clippy::module_inception)]

//! An ordered set backed by a [`skip list`].
//!
//! ```
//! use skipset::SkipList;
//!
//! let mut set = SkipList::new();
//! set.insert(10);
//! set.insert(20);
//! set.insert(15);
//!
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![10, 15, 20]);
//! assert_eq!(set.lower_bound(&14).get(), Some(&15));
//! assert!(set.upper_bound(&20).is_end());
//! ```
//!
//! The list is not synchronized; wrap it in a lock to share it between
//! threads.
//!
//! [`skip list`]: https://en.wikipedia.org/wiki/Skip_list

pub mod config;
pub mod errs;

/// A [`skip list`] whose structure is inspired by [`JP-Ellis`]' rust-skiplist.
///
/// [`skip list`]: https://en.wikipedia.org/wiki/Skip_list
/// [`JP-Ellis`]: https://github.com/JP-Ellis/rust-skiplist/
pub mod skiplist;

pub use config::Config;
pub use errs::SkipListError;
pub use skiplist::{
    Cursor,
    CursorMut,
    GeometricalLevelGenerator,
    LevelGenerator,
    SkipList,
};

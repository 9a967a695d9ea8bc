//! This crate provides a bounded doubly-linked list whose nodes form a ring.
//!
//! The [`List`] has no terminal node: the last element links back to the
//! first one, and the list only remembers which node is its *head* (index 0).
//! Inserting or removing at either end takes constant time, while indexed
//! access walks the ring and takes *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use circular_list::{List, ListError};
//!
//! let mut list: List<i32> = List::new();
//! list.add_end(1)?;
//! list.add_end(3)?;
//! list.add_start(0)?;
//! list.add(2, 2)?; // insert 2 so that it becomes index 2
//! assert_eq!(list.to_string(), "[0 <-> 1 <-> 2 <-> 3]");
//!
//! assert_eq!(list.remove(1)?, 1);
//! assert_eq!(list.remove_end()?, 3);
//! assert_eq!(list.to_string(), "[0 <-> 2]");
//!
//! assert_eq!(list.get(-1), Err(ListError::OutOfRange { len: 2 }));
//! # Ok::<(), ListError>(())
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of a list with *n* elements is like the following graph:
//! ```text
//!       ┌──────────────────────────────────────────────────────────────┐
//!       ↓                                                              │
//! ╔═══════════╗           ╔═══════════╗                  ╔═══════════╗ │
//! ║   next    ║ ────────→ ║   next    ║ ───→ ┄┄ ───────→ ║   next    ║ ┘
//! ╟───────────╢           ╟───────────╢  Node 2, 3, ...  ╟───────────╢
//! ║   prev    ║ ←──────── ║   prev    ║ ←─── ┄┄ ←─────── ║   prev    ║ ┐
//! ╟───────────╢           ╟───────────╢                  ╟───────────╢ │
//! ║ payload T ║           ║ payload T ║                  ║ payload T ║ │
//! ╚═══════════╝           ╚═══════════╝                  ╚═══════════╝ │
//!   ↑ Node 0  │               Node 1                       Node n - 1  ↑
//!   │         └────────────────────────────────────────────────────────┘
//! ╔═══════════╗
//! ║   head    ║
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains:
//! - a pointer `head` to the node with index 0, absent when the list is empty;
//! - a length field `len`.
//!
//! Each node is allocated on heap and owns its payload. Following `next` *n*
//! times from any node comes back to that node, and so does following `prev`.
//! `head.prev` is always the last element, so both ends are reachable in
//! constant time.
//!
//! A list never holds more than `CAP` elements, a const generic parameter that
//! defaults to [`DEFAULT_CAPACITY`] (10 000). Insertions into a full list fail
//! with [`ListError::Overflow`] and leave the list untouched:
//!
//! ```
//! use circular_list::{List, ListError};
//!
//! let mut list: List<u8, 2> = List::bounded();
//! list.add_end(1)?;
//! list.add_end(2)?;
//! assert!(list.is_full());
//! assert_eq!(list.add_start(0), Err(ListError::Overflow { capacity: 2 }));
//! assert_eq!(list.len(), 2);
//! # Ok::<(), ListError>(())
//! ```
//!
//! # Iteration
//!
//! [`Iter`], [`IterMut`] and [`IntoIter`] iterate the list like an array: they
//! are double-ended, fused and non-cyclic.
//!
//! ```
//! use circular_list::List;
//!
//! let mut list: List<i32> = vec![1, 2, 3].into_iter().collect();
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![6, 4, 2]);
//! ```
//!
//! # Cursors
//!
//! [`Cursor`] and [`CursorMut`] walk the ring itself, so moving past the last
//! element wraps around to the first one. A cursor carries a position counter
//! next to its node: [`List::begin`] and [`List::end`] both sit on the head,
//! at positions 0 and *n*, and advancing `begin` *n* times makes it equal to
//! `end`. That is what lets a plain loop stop after exactly one lap:
//!
//! ```
//! use circular_list::List;
//!
//! let list: List<char> = "abc".chars().collect();
//! let (mut cursor, end) = (list.begin(), list.end());
//! let mut seen = String::new();
//! while cursor != end {
//!     seen.push(*cursor.get()?);
//!     cursor.move_next()?;
//! }
//! assert_eq!(seen, "abc");
//!
//! // Moving on keeps going around the ring.
//! cursor.move_next()?;
//! assert_eq!(cursor.current(), Some(&'b'));
//! # Ok::<(), circular_list::ListError>(())
//! ```
//!
//! [`CursorMut`] can also edit the list around its position with
//! [`insert_after`] and [`remove`].
//!
//! # Text
//!
//! Lists render as `[v0 <-> v1 <-> ...]` through [`Display`], and load from
//! whitespace-separated values with [`List::load_str`], [`List::read_from`] or
//! [`str::parse`].
//!
//! [`insert_after`]: crate::list::cursor::CursorMut::insert_after
//! [`remove`]: crate::list::cursor::CursorMut::remove
//! [`Display`]: std::fmt::Display

#[doc(inline)]
pub use error::{ListError, ReadError};
#[doc(inline)]
pub use list::cursor::{Cursor, CursorIter, CursorMut};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::{List, DEFAULT_CAPACITY};

pub mod error;
pub mod list;

use crate::error::ListError;
use crate::list::{List, Node, DEFAULT_CAPACITY};
use std::fmt;
use std::fmt::Formatter;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A cursor over a `List`.
///
/// A `Cursor` walks the ring of the list in both directions. Moving past the
/// last element wraps around to the first one and vice versa, so a cursor never
/// runs out of elements unless the list is empty.
///
/// Besides its node, a cursor carries a *position* counter and the length of the
/// list when it was created (its *total*). Every step forward sets it to
/// `position % total + 1`, so a cursor that arrives back on the head going
/// forward sits at `total`, not 0. A step backward sets it to
/// `(position + total - 1) % total`, which is 0 whenever the cursor lands on
/// the head going backward. The logical index of the element under the cursor
/// is `position % total`, see [`Cursor::index`].
///
/// As a consequence, moving back and then forth across the head is not a
/// no-op: `begin()` moved back once and then forward once equals `end()`, not
/// `begin()`. Away from the head the two moves undo each other.
///
/// Two cursors are equal when they reference the same node at the same
/// position. [`List::begin`] and [`List::end`] share the head node, but the
/// former is at position 0 and the latter at position `len`.
///
/// A cursor created on an empty list references no node. Reading or moving it
/// fails with [`ListError::InvalidIteratorState`].
///
/// # Examples
///
/// ```
/// use circular_list::List;
///
/// // Create a list: [A B C]
/// let list: List<char> = "ABC".chars().collect();
///
/// // Create a cursor at start: [|A B C] (position = 0)
/// let mut cursor = list.begin();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C] (position = 1)
/// cursor.move_next()?;
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Move cursor forward, past the end: [|A B C] (position = 3)
/// cursor.seek_forward(2)?;
/// assert_eq!(cursor.current(), Some(&'A'));
/// assert_eq!(cursor, list.end());
///
/// // Move cursor backward, cyclically: [ A B|C] (position = 2)
/// cursor.move_prev()?;
/// assert_eq!(cursor.current(), Some(&'C'));
/// # Ok::<(), circular_list::ListError>(())
/// ```
pub struct Cursor<'a, T: 'a> {
    current: Option<NonNull<Node<T>>>,
    origin: Option<NonNull<Node<T>>>,
    position: usize,
    total: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: 'a> Copy for Cursor<'a, T> {}

/// Compare cursors by their node and position.
///
/// # Examples
/// ```
/// use circular_list::List;
///
/// let list: List<i32> = vec![1, 2, 3].into_iter().collect();
/// let cursor1 = list.begin();
/// let mut cursor2 = cursor1;
/// // The same node, and the same position.
/// assert_eq!(cursor1, cursor2);
///
/// cursor2.move_next()?;
/// assert_ne!(cursor1, cursor2);
///
/// // Back on the head, but one lap later.
/// cursor2.seek_forward(2)?;
/// assert_eq!(cursor1.current(), cursor2.current());
/// assert_ne!(cursor1, cursor2);
/// # Ok::<(), circular_list::ListError>(())
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current && self.position == other.position
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// A cursor over a `List` with editing operations.
///
/// A `CursorMut` moves like a [`Cursor`], and can also insert an element after
/// its node or remove its node. It borrows the list mutably, so no other
/// cursor or reference can observe the list while it is being edited; the
/// cursor itself stays on a live node after every edit.
///
/// # Examples
///
/// ```compile_fail
/// use circular_list::List;
///
/// let mut list: List<i32> = vec![1, 2, 3].into_iter().collect();
/// let mut cursor = list.begin_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a, const CAP: usize = DEFAULT_CAPACITY> {
    current: Option<NonNull<Node<T>>>,
    origin: Option<NonNull<Node<T>>>,
    position: usize,
    total: usize,
    list: &'a mut List<T, CAP>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident $(, $CAP:ident)?) => {
        impl<'a, T: 'a $(, const $CAP: usize)?> $CURSOR<'a, T $(, $CAP)?> {
            /// Returns the position counter of the cursor.
            pub fn position(&self) -> usize {
                self.position
            }

            /// Returns the logical index of the element under the cursor, i.e.
            /// `position % total`.
            pub fn index(&self) -> usize {
                if self.total == 0 {
                    return 0;
                }
                self.position % self.total
            }

            /// Returns the length of the list captured by the cursor.
            pub fn total(&self) -> usize {
                self.total
            }

            /// Returns `true` if the cursor references no node.
            pub fn is_detached(&self) -> bool {
                self.current.is_none()
            }

            /// Returns `true` if the cursor is on the node it was created at.
            pub fn is_at_origin(&self) -> bool {
                self.current == self.origin
            }

            /// Move the cursor to the next node, wrapping around after the last
            /// element.
            ///
            /// This operation should compute in *O*(*1*) time.
            ///
            /// # Errors
            ///
            /// Returns [`ListError::InvalidIteratorState`] if the cursor
            /// references no node.
            pub fn move_next(&mut self) -> Result<(), ListError> {
                let current = self.current.ok_or(ListError::InvalidIteratorState)?;
                // SAFETY: the cursor only references live nodes of the list it borrows.
                self.current = Some(unsafe { current.as_ref().next });
                self.position = self.position % self.total + 1;
                Ok(())
            }

            /// Move the cursor to the previous node, wrapping around before the
            /// first element.
            ///
            /// This operation should compute in *O*(*1*) time.
            ///
            /// # Errors
            ///
            /// Returns [`ListError::InvalidIteratorState`] if the cursor
            /// references no node.
            pub fn move_prev(&mut self) -> Result<(), ListError> {
                let current = self.current.ok_or(ListError::InvalidIteratorState)?;
                // SAFETY: the cursor only references live nodes of the list it borrows.
                self.current = Some(unsafe { current.as_ref().prev });
                self.position = (self.position + self.total - 1) % self.total;
                Ok(())
            }

            /// Move the cursor forward by given steps.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Errors
            ///
            /// Returns [`ListError::InvalidIteratorState`] if the cursor
            /// references no node and `steps > 0`.
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), ListError> {
                (0..steps).try_for_each(|_| self.move_next())
            }

            /// Move the cursor backward by given steps.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Errors
            ///
            /// Returns [`ListError::InvalidIteratorState`] if the cursor
            /// references no node and `steps > 0`.
            pub fn seek_backward(&mut self, steps: usize) -> Result<(), ListError> {
                (0..steps).try_for_each(|_| self.move_prev())
            }
        }
    };
}

impl_cursor!(Cursor);
impl_cursor!(CursorMut, CAP);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(current: Option<NonNull<Node<T>>>, position: usize, total: usize) -> Self {
        Self {
            current,
            origin: current,
            position,
            total,
            _marker: PhantomData,
        }
    }

    /// Provides a reference to the element under the cursor, or `None` if the
    /// cursor references no node.
    pub fn current(&self) -> Option<&'a T> {
        // SAFETY: the node is live for as long as the list is borrowed.
        self.current.map(|node| unsafe { &(*node.as_ptr()).element })
    }

    /// Provides a reference to the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidIteratorState`] if the cursor references no
    /// node.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{List, ListError};
    ///
    /// let list: List<i32> = List::new();
    /// assert_eq!(list.begin().get(), Err(ListError::InvalidIteratorState));
    /// ```
    pub fn get(&self) -> Result<&'a T, ListError> {
        self.current().ok_or(ListError::InvalidIteratorState)
    }

    /// Provides a reference to the element after the cursor, or `None` if the
    /// cursor references no node.
    pub fn peek_next(&self) -> Option<&'a T> {
        // SAFETY: the node and its successor are live for as long as the list is borrowed.
        self.current
            .map(|node| unsafe { &(*node.as_ref().next.as_ptr()).element })
    }

    /// Provides a reference to the element before the cursor, or `None` if the
    /// cursor references no node.
    pub fn peek_prev(&self) -> Option<&'a T> {
        // SAFETY: the node and its predecessor are live for as long as the list is borrowed.
        self.current
            .map(|node| unsafe { &(*node.as_ref().prev.as_ptr()).element })
    }
}

impl<'a, T: 'a, const CAP: usize> CursorMut<'a, T, CAP> {
    pub(crate) fn new(
        list: &'a mut List<T, CAP>,
        current: Option<NonNull<Node<T>>>,
        position: usize,
    ) -> Self {
        let total = list.len();
        Self {
            current,
            origin: current,
            position,
            total,
            list,
        }
    }

    /// Provides a reference to the element under the cursor, or `None` if the
    /// cursor references no node.
    pub fn current(&self) -> Option<&T> {
        // SAFETY: the node is a live node of the borrowed list.
        self.current.map(|node| unsafe { &(*node.as_ptr()).element })
    }

    /// Provides a mutable reference to the element under the cursor, or `None`
    /// if the cursor references no node.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = vec![1, 2, 3].into_iter().collect();
    /// let mut cursor = list.begin_mut();
    /// cursor.move_prev()?;
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(list.to_string(), "[1 <-> 2 <-> 15]");
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        // SAFETY: the node is a live node of the list, which is borrowed mutably.
        self.current
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
    }

    /// Provides a reference to the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidIteratorState`] if the cursor references no
    /// node.
    pub fn get(&self) -> Result<&T, ListError> {
        self.current().ok_or(ListError::InvalidIteratorState)
    }

    /// Provides a mutable reference to the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidIteratorState`] if the cursor references no
    /// node.
    pub fn get_mut(&mut self) -> Result<&mut T, ListError> {
        self.current_mut().ok_or(ListError::InvalidIteratorState)
    }

    /// Provides a read-only cursor at the same place, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor {
            current: self.current,
            origin: self.origin,
            position: self.position,
            total: self.total,
            _marker: PhantomData,
        }
    }

    /// Turns the cursor into a read-only one at the same place.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor {
            current: self.current,
            origin: self.origin,
            position: self.position,
            total: self.total,
            _marker: PhantomData,
        }
    }

    /// Temporarily views the list.
    pub fn view(&self) -> &List<T, CAP> {
        self.list
    }

    /// Inserts `item` right after the node under the cursor. The cursor stays
    /// on its node.
    ///
    /// A cursor that references no node (created on an empty list) appends
    /// `item` at the end of the list instead.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Overflow`] if the list is full.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = vec![1, 2, 3].into_iter().collect();
    /// let mut cursor = list.cursor_mut(2)?;
    /// cursor.insert_after(4)?;
    /// assert_eq!(cursor.current(), Some(&3));
    /// assert_eq!(list.to_string(), "[1 <-> 2 <-> 3 <-> 4]");
    ///
    /// let mut empty: List<i32> = List::new();
    /// empty.begin_mut().insert_after(1)?;
    /// assert_eq!(empty.to_string(), "[1]");
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn insert_after(&mut self, item: T) -> Result<(), ListError> {
        self.list.check_not_full()?;
        match self.current {
            // SAFETY: the cursor references a live node of `self.list`.
            Some(current) => unsafe {
                self.list.attach_after(current, item);
            },
            None => self.list.add_end(item)?,
        }
        let completed_lap = self.total > 0 && self.position == self.total;
        self.total = self.list.len();
        if completed_lap {
            self.position = self.total;
        }
        Ok(())
    }

    /// Removes the node under the cursor and returns its element. The cursor
    /// moves on to the next node, and so does the head of the list if the
    /// removed node was the head.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Underflow`] if the list is empty, and
    /// [`ListError::InvalidArgument`] if the cursor references no node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = vec![1, 2, 3].into_iter().collect();
    /// let mut cursor = list.begin_mut();
    /// assert_eq!(cursor.remove(), Ok(1));
    /// assert_eq!(cursor.current(), Some(&2));
    /// assert_eq!(list.to_string(), "[2 <-> 3]");
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn remove(&mut self) -> Result<T, ListError> {
        if self.list.is_empty() {
            return Err(ListError::Underflow);
        }
        let current = self.current.ok_or(ListError::InvalidArgument)?;
        let old_total = self.total;
        let index = self.index();
        let lap_done = self.position == old_total || index + 1 == old_total;
        // SAFETY: `current` is a live node of `self.list`; its successor is read
        // before it is freed.
        let (next, element) = unsafe {
            let next = current.as_ref().next;
            (next, self.list.detach_node(current))
        };
        self.total = self.list.len();
        if self.total == 0 {
            self.current = None;
            self.position = 0;
        } else {
            self.current = Some(next);
            // Removing the last node of a lap leaves the cursor where `end()` is.
            self.position = if lap_done { self.total } else { index };
        }
        if self.origin == Some(current) {
            self.origin = self.current;
        }
        Ok(element)
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.current())
            .field("position", &self.position)
            .field("total", &self.total)
            .finish()
    }
}

impl<'a, T: fmt::Debug + 'a, const CAP: usize> fmt::Debug for CursorMut<'a, T, CAP> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("current", &self.current())
            .field("position", &self.position)
            .field("total", &self.total)
            .finish()
    }
}

/// A cyclic iterator created from a [`Cursor`].
///
/// It yields the element under the cursor and then moves forward, going around
/// the ring forever. It only returns `None` for an empty list.
///
/// # Examples
///
/// ```
/// use circular_list::List;
///
/// let list: List<i32> = vec![1, 2, 3].into_iter().collect();
/// let lap: Vec<_> = list.begin().into_iter().take(7).copied().collect();
/// assert_eq!(lap, vec![1, 2, 3, 1, 2, 3, 1]);
/// ```
pub struct CursorIter<'a, T: 'a> {
    pub(crate) cursor: Cursor<'a, T>,
}

impl<'a, T: 'a> CursorIter<'a, T> {
    pub fn into_cursor(self) -> Cursor<'a, T> {
        self.cursor
    }

    pub fn peek(&self) -> Option<&'a T> {
        self.cursor.current()
    }
}

impl<'a, T: 'a> From<CursorIter<'a, T>> for Cursor<'a, T> {
    fn from(cursor_iter: CursorIter<'a, T>) -> Self {
        cursor_iter.into_cursor()
    }
}

impl<'a, T: 'a, const CAP: usize> From<CursorMut<'a, T, CAP>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T, CAP>) -> Self {
        cursor.into_cursor()
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send, const CAP: usize> Send for CursorMut<'_, T, CAP> {}

unsafe impl<T: Sync, const CAP: usize> Sync for CursorMut<'_, T, CAP> {}

unsafe impl<T: Sync> Send for CursorIter<'_, T> {}

unsafe impl<T: Sync> Sync for CursorIter<'_, T> {}

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;

use crate::error::ListError;
use crate::list::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;
mod text;

/// The number of elements a [`List`] holds at most unless another `CAP` is
/// given.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// The `List` is a doubly-linked list whose nodes form a ring, holding at most
/// `CAP` elements.
///
/// Inserting and removing at both ends take constant time. In compromise,
/// accessing or mutating elements by index take *O*(*n*) time.
///
/// The `List` contains:
/// - a pointer `head` to the node with index 0, or nothing if the list is empty;
/// - a length field `len`.
///
/// # Naming Conventions
///
/// - `start`/`end`: the first and the last element, as in [`List::add_start`]
///   and [`List::remove_end`];
/// - `head`/`tail`: the nodes holding the first and the last element
///   (`tail` is always `head.prev`).
///
/// # Errors
///
/// Every fallible operation returns a [`ListError`] and leaves the list as it
/// was before the call.
pub struct List<T, const CAP: usize = DEFAULT_CAPACITY> {
    head: Option<NonNull<Node<T>>>,
    /// the length of the list
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

// private methods
impl<T, const CAP: usize> List<T, CAP> {
    pub(crate) fn tail_node(&self) -> Option<NonNull<Node<T>>> {
        // SAFETY: `head.prev` is always valid (either `head` itself, or the last element
        // in the list).
        self.head.map(|head| unsafe { head.as_ref().prev })
    }

    pub(crate) fn check_not_full(&self) -> Result<(), ListError> {
        if self.is_full() {
            return Err(ListError::Overflow { capacity: CAP });
        }
        Ok(())
    }

    fn check_fits(count: usize) -> Result<(), ListError> {
        if count > CAP {
            return Err(ListError::CapacityExceeded {
                requested: count,
                capacity: CAP,
            });
        }
        Ok(())
    }

    /// Convert a caller-supplied index into one in `0..bound`.
    fn checked_index<I: TryInto<usize>>(&self, index: I, bound: usize) -> Result<usize, ListError> {
        match index.try_into() {
            Ok(index) if index < bound => Ok(index),
            _ => Err(ListError::OutOfRange { len: self.len }),
        }
    }

    /// Find the node at `index`, walking from the head in whichever direction
    /// is shorter.
    pub(crate) fn locate<I: TryInto<usize>>(
        &self,
        index: I,
    ) -> Result<NonNull<Node<T>>, ListError> {
        let index = self.checked_index(index, self.len)?;
        let head = self.head.ok_or(ListError::OutOfRange { len: self.len })?;
        // SAFETY: the ring has `len` live nodes, and either walk stays on it.
        unsafe {
            if index <= self.len / 2 {
                Ok(walk(head, index, |node| node.next))
            } else {
                Ok(walk(head, self.len - index, |node| node.prev))
            }
        }
    }

    /// Start a ring of one in an empty list.
    fn attach_first(&mut self, element: T) -> NonNull<Node<T>> {
        debug_assert!(self.head.is_none(), "the list is not empty");
        let node = Node::new_ring(element);
        self.head = Some(node);
        self.len = 1;
        node
    }

    /// Link a new node holding `element` right after `prev`, and return it.
    ///
    /// It is unsafe because it does not check whether `prev` belongs to the list.
    /// It does not check the capacity either.
    ///
    /// If `prev` does not belong to the list, this function call will make the
    /// list ill-formed.
    pub(crate) unsafe fn attach_after(
        &mut self,
        prev: NonNull<Node<T>>,
        element: T,
    ) -> NonNull<Node<T>> {
        let next = prev.as_ref().next;
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        let node = Node::new_ring(element);
        connect(prev, node);
        connect(node, next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
        node
    }

    /// Link a new node after the tail, i.e. right before the head, without
    /// checking the capacity.
    pub(crate) fn link_back(&mut self, element: T) -> NonNull<Node<T>> {
        match self.tail_node() {
            // SAFETY: the tail is a node of this list.
            Some(tail) => unsafe { self.attach_after(tail, element) },
            None => self.attach_first(element),
        }
    }

    /// Unlink `node` from the ring, free it and return its element.
    ///
    /// The head moves on to `node.next` if `node` was the head, or is cleared if
    /// `node` was the only element.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list.
    ///
    /// If the `node` does not belong to the list, this function call will make
    /// the list ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> T {
        let Node {
            next,
            prev,
            element,
        } = *Box::from_raw(node.as_ptr());
        self.len -= 1;
        if self.len == 0 {
            self.head = None;
        } else {
            connect(prev, next);
            if self.head == Some(node) {
                self.head = Some(next);
            }
        }
        element
    }
}

impl<T> List<T> {
    /// Create an empty `List` with the default capacity.
    ///
    /// # Examples
    /// ```
    /// use circular_list::List;
    /// let list: List<u32> = List::new();
    /// assert_eq!(list.capacity(), 10_000);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self::bounded()
    }
}

impl<T, const CAP: usize> List<T, CAP> {
    /// Create an empty `List` holding at most `CAP` elements.
    ///
    /// # Examples
    /// ```
    /// use circular_list::List;
    /// let list: List<u32, 16> = List::bounded();
    /// assert_eq!(list.capacity(), 16);
    /// ```
    #[inline]
    pub const fn bounded() -> Self {
        Self {
            head: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Create a `List` of `count` default values.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::CapacityExceeded`] if `count > CAP`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{List, ListError};
    ///
    /// let list: List<i32> = List::with_len(3)?;
    /// assert_eq!(list.to_string(), "[0 <-> 0 <-> 0]");
    ///
    /// let too_long = List::<i32, 2>::with_len(3);
    /// assert_eq!(
    ///     too_long.unwrap_err(),
    ///     ListError::CapacityExceeded { requested: 3, capacity: 2 }
    /// );
    /// # Ok::<(), ListError>(())
    /// ```
    pub fn with_len(count: usize) -> Result<Self, ListError>
    where
        T: Default,
    {
        Self::check_fits(count)?;
        log::trace!("creating a list of {} default values", count);
        let mut list = Self::bounded();
        (0..count).for_each(|_| {
            list.link_back(T::default());
        });
        Ok(list)
    }

    /// Create a `List` of `count` clones of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::CapacityExceeded`] if `count > CAP`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let list: List<&str> = List::filled(2, "ab")?;
    /// assert_eq!(list.to_string(), "[ab <-> ab]");
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn filled(count: usize, value: T) -> Result<Self, ListError>
    where
        T: Clone,
    {
        Self::check_fits(count)?;
        log::trace!("creating a list of {} copies", count);
        let mut list = Self::bounded();
        (0..count).for_each(|_| {
            list.link_back(value.clone());
        });
        Ok(list)
    }

    /// Create a `List` from the items of `iter`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Overflow`] if `iter` yields more than `CAP` items.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{List, ListError};
    ///
    /// let list = List::<i32, 3>::try_from_iter(1..=3)?;
    /// assert_eq!(list.len(), 3);
    /// let too_many = List::<i32, 3>::try_from_iter(1..=4);
    /// assert_eq!(too_many.unwrap_err(), ListError::Overflow { capacity: 3 });
    /// # Ok::<(), ListError>(())
    /// ```
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, ListError> {
        let mut list = Self::bounded();
        for item in iter {
            list.add_end(item)?;
        }
        Ok(list)
    }

    /// Move all elements out into a new `List`, leaving this one empty.
    ///
    /// No node is allocated or freed.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = vec![10, 20, 30].into_iter().collect();
    /// let moved = list.take();
    /// assert_eq!(moved.len(), 3);
    /// assert!(list.is_empty());
    /// assert!(!list.is_full());
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns `true` if the `List` holds `CAP` elements, so that any further
    /// insertion fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32, 1> = List::bounded();
    /// assert!(!list.is_full());
    /// list.add_end(7)?;
    /// assert!(list.is_full());
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len >= CAP
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the maximum number of elements, `CAP`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Removes all elements from the `List`, one by one from the start.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            log::trace!("clearing {} elements", self.len);
        }
        while self.remove_start().is_ok() {}
    }

    /// Provides a reference to the first element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        // SAFETY: the head is a live node borrowed through `&self`.
        self.head.map(|head| unsafe { &(*head.as_ptr()).element })
    }

    /// Provides a mutable reference to the first element, or `None` if the list
    /// is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: the head is a live node borrowed through `&mut self`.
        self.head.map(|head| unsafe { &mut (*head.as_ptr()).element })
    }

    /// Provides a reference to the last element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.add_end(1)?;
    /// list.add_end(2)?;
    /// assert_eq!(list.back(), Some(&2));
    /// assert_eq!(list.front(), Some(&1));
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        // SAFETY: the tail is a live node borrowed through `&self`.
        self.tail_node().map(|tail| unsafe { &(*tail.as_ptr()).element })
    }

    /// Provides a mutable reference to the last element, or `None` if the list
    /// is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: the tail is a live node borrowed through `&mut self`.
        self.tail_node().map(|tail| unsafe { &mut (*tail.as_ptr()).element })
    }

    /// Adds an element first in the list. The head moves to the new node.
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
    /// let mut list: List<i32> = List::new();
    /// list.add_start(3)?;
    /// list.add_start(2)?;
    /// list.add_start(1)?;
    /// assert_eq!(list.to_string(), "[1 <-> 2 <-> 3]");
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn add_start(&mut self, elt: T) -> Result<(), ListError> {
        self.check_not_full()?;
        // In a ring, the slot before the head is the slot after the tail.
        let node = self.link_back(elt);
        self.head = Some(node);
        Ok(())
    }

    /// Appends an element to the end of the list. The head stays put.
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
    /// let mut list: List<i32> = List::new();
    /// list.add_end(1)?;
    /// list.add_end(2)?;
    /// list.add_end(3)?;
    /// assert_eq!(list.to_string(), "[1 <-> 2 <-> 3]");
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn add_end(&mut self, elt: T) -> Result<(), ListError> {
        self.check_not_full()?;
        self.link_back(elt);
        Ok(())
    }

    /// Inserts an element so that it ends up at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index` is negative or greater than
    /// the length, and [`ListError::Overflow`] if the list is full.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{List, ListError};
    ///
    /// let mut list: List<i32> = vec![1, 3, 4].into_iter().collect();
    /// list.add(2, 1)?;
    /// assert_eq!(list.to_string(), "[1 <-> 2 <-> 3 <-> 4]");
    ///
    /// assert_eq!(list.add(9, 5), Err(ListError::OutOfRange { len: 4 }));
    /// assert_eq!(list.add(9, -1), Err(ListError::OutOfRange { len: 4 }));
    /// # Ok::<(), ListError>(())
    /// ```
    pub fn add<I: TryInto<usize>>(&mut self, elt: T, index: I) -> Result<(), ListError> {
        let index = self.checked_index(index, self.len + 1)?;
        self.check_not_full()?;
        match index {
            0 => self.add_start(elt),
            index if index == self.len => self.add_end(elt),
            index => {
                let next = self.locate(index)?;
                // SAFETY: `next` is a node of this list, and so is `next.prev`.
                unsafe {
                    self.attach_after(next.as_ref().prev, elt);
                }
                Ok(())
            }
        }
    }

    /// Removes the first element and returns it. The head moves to the former
    /// second element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Underflow`] if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{List, ListError};
    ///
    /// let mut list: List<i32> = List::new();
    /// assert_eq!(list.remove_start(), Err(ListError::Underflow));
    ///
    /// list.add_start(1)?;
    /// list.add_start(3)?;
    /// assert_eq!(list.remove_start(), Ok(3));
    /// assert_eq!(list.remove_start(), Ok(1));
    /// assert!(list.is_empty());
    /// # Ok::<(), ListError>(())
    /// ```
    pub fn remove_start(&mut self) -> Result<T, ListError> {
        let head = self.head.ok_or(ListError::Underflow)?;
        // SAFETY: the head is a node of this list.
        Ok(unsafe { self.detach_node(head) })
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Underflow`] if the list is empty.
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
    /// assert_eq!(list.remove_end(), Ok(3));
    /// assert_eq!(list.to_string(), "[1 <-> 2]");
    /// ```
    pub fn remove_end(&mut self) -> Result<T, ListError> {
        let tail = self.tail_node().ok_or(ListError::Underflow)?;
        // SAFETY: the tail is a node of this list.
        Ok(unsafe { self.detach_node(tail) })
    }

    /// Removes the element at `index` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index` is negative or not less
    /// than the length.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = (1..=5).collect();
    /// assert_eq!(list.remove(2), Ok(3));
    /// assert_eq!(list.to_string(), "[1 <-> 2 <-> 4 <-> 5]");
    /// ```
    pub fn remove<I: TryInto<usize>>(&mut self, index: I) -> Result<T, ListError> {
        let node = self.locate(index)?;
        // SAFETY: `node` was just located in this list.
        Ok(unsafe { self.detach_node(node) })
    }

    /// Provides a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index` is negative or not less
    /// than the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{List, ListError};
    ///
    /// let list: List<i32> = vec![1, 2, 3].into_iter().collect();
    /// assert_eq!(list.get(1), Ok(&2));
    /// assert_eq!(list.get(5), Err(ListError::OutOfRange { len: 3 }));
    /// assert_eq!(list.get(-1), Err(ListError::OutOfRange { len: 3 }));
    /// ```
    pub fn get<I: TryInto<usize>>(&self, index: I) -> Result<&T, ListError> {
        let node = self.locate(index)?;
        // SAFETY: `node` is a live node borrowed through `&self`.
        Ok(unsafe { &(*node.as_ptr()).element })
    }

    /// Provides a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index` is negative or not less
    /// than the length.
    pub fn get_mut<I: TryInto<usize>>(&mut self, index: I) -> Result<&mut T, ListError> {
        let node = self.locate(index)?;
        // SAFETY: `node` is a live node borrowed through `&mut self`.
        Ok(unsafe { &mut (*node.as_ptr()).element })
    }

    /// Provides a cursor at the head, with position 0.
    ///
    /// The cursor references no node if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let list: List<i32> = vec![1, 2, 3].into_iter().collect();
    /// let mut cursor = list.begin();
    /// cursor.seek_forward(4)?;
    /// assert_eq!(cursor.get(), Ok(&2));
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.head, 0, self.len)
    }

    /// Provides a cursor at the head, with position `len`, i.e. where
    /// [`List::begin`] arrives after one lap.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let list: List<i32> = vec![1, 2].into_iter().collect();
    /// let mut cursor = list.begin();
    /// assert_ne!(cursor, list.end());
    /// cursor.seek_forward(2)?;
    /// assert_eq!(cursor, list.end());
    ///
    /// let empty: List<i32> = List::new();
    /// assert_eq!(empty.begin(), empty.end());
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.head, self.len, self.len)
    }

    /// Provides a cursor at the element with given index.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index` is negative or not less
    /// than the length.
    pub fn cursor<I: TryInto<usize>>(&self, index: I) -> Result<Cursor<'_, T>, ListError> {
        let index = self.checked_index(index, self.len)?;
        let node = self.locate(index)?;
        Ok(Cursor::new(Some(node), index, self.len))
    }

    /// Provides a cursor with editing operations at the head, with position 0.
    ///
    /// The cursor references no node if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = vec![1, 3, 4].into_iter().collect();
    /// list.begin_mut().insert_after(2)?;
    /// assert_eq!(list.to_string(), "[1 <-> 2 <-> 3 <-> 4]");
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, CAP> {
        let head = self.head;
        CursorMut::new(self, head, 0)
    }

    /// Provides a cursor with editing operations at the element with given
    /// index.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index` is negative or not less
    /// than the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = (1..=5).collect();
    /// let mut cursor = list.cursor_mut(1)?;
    /// assert_eq!(cursor.remove(), Ok(2));
    /// assert_eq!(cursor.current(), Some(&3));
    /// assert_eq!(list.to_string(), "[1 <-> 3 <-> 4 <-> 5]");
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn cursor_mut<I: TryInto<usize>>(
        &mut self,
        index: I,
    ) -> Result<CursorMut<'_, T, CAP>, ListError> {
        let index = self.checked_index(index, self.len)?;
        let node = self.locate(index)?;
        Ok(CursorMut::new(self, Some(node), index))
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = List::new();
    ///
    /// list.add_end(0)?;
    /// list.add_end(1)?;
    /// list.add_end(2)?;
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.head, self.tail_node(), self.len)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = (0..3).collect();
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.head, self.tail_node(), self.len)
    }
}

impl<T, const CAP: usize> Index<usize> for List<T, CAP> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(elt) => elt,
            Err(_) => panic!(
                "index out of range: the len is {} but the index is {}",
                self.len, index
            ),
        }
    }
}

impl<T, const CAP: usize> IndexMut<usize> for List<T, CAP> {
    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Ok(elt) => elt,
            Err(_) => panic!(
                "index out of range: the len is {} but the index is {}",
                len, index
            ),
        }
    }
}

impl<T: Debug, const CAP: usize> Debug for List<T, CAP> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const CAP: usize> Default for List<T, CAP> {
    fn default() -> Self {
        Self::bounded()
    }
}

impl<T> Node<T> {
    /// Allocate a node whose links point to itself, i.e. a ring of one.
    pub(crate) fn new_ring(element: T) -> NonNull<Node<T>> {
        let node = NonNull::from(Box::leak(Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        })));
        // SAFETY: `node` was just leaked from a box, nothing else refers to it.
        unsafe {
            (*node.as_ptr()).next = node;
            (*node.as_ptr()).prev = node;
        }
        node
    }
}

/// Make `next` follow `prev` on the ring.
///
/// It is unsafe because both nodes must be live.
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

/// Follow the link picked by `step` for `steps` times from `start`.
///
/// It is unsafe because every visited node must be live.
unsafe fn walk<T>(
    start: NonNull<Node<T>>,
    steps: usize,
    step: impl Fn(&Node<T>) -> NonNull<Node<T>>,
) -> NonNull<Node<T>> {
    (0..steps).fold(start, |node, _| step(node.as_ref()))
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl<T, const CAP: usize> Drop for List<T, CAP> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send, const CAP: usize> Send for List<T, CAP> {}

unsafe impl<T: Sync, const CAP: usize> Sync for List<T, CAP> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
    fn d<'i, 'a>(x: Cursor<'i, &'static str>) -> Cursor<'i, &'a str> {
        x
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::list::List;
    use crate::ListError;
    use quickcheck_macros::quickcheck;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Check that the nodes of `list` form one closed ring of `len` nodes.
    pub(crate) fn check_links<T, const CAP: usize>(list: &List<T, CAP>) {
        let head = match list.head {
            None => {
                assert_eq!(list.len, 0);
                return;
            }
            Some(head) => head,
        };
        unsafe {
            let mut node = head;
            let mut forward = 0;
            loop {
                let next = node.as_ref().next;
                assert_eq!(next.as_ref().prev, node, "broken prev link");
                node = next;
                forward += 1;
                if node == head || forward > list.len {
                    break;
                }
            }
            assert_eq!(forward, list.len, "the ring is not closed after len steps");

            let mut node = head;
            for _ in 0..list.len {
                node = node.as_ref().prev;
            }
            assert_eq!(node, head);
        }
    }

    fn contents<T: Clone, const CAP: usize>(list: &List<T, CAP>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        assert!(!list.is_full());
        list.add_end(1).unwrap();
        assert!(!list.is_empty());
        assert_eq!(list.remove_end(), Ok(1));
        assert!(list.is_empty());
        check_links(&list);
    }

    #[test]
    fn list_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list: List<_> = List::new();
        list.add_end(DropChecker::new(2, &dropped)).unwrap();
        list.add_end(DropChecker::new(3, &dropped)).unwrap();
        list.add_start(DropChecker::new(1, &dropped)).unwrap();
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_start_and_end() {
        let mut list: List<i32> = List::new();
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.remove_start(), Err(ListError::Underflow));
        assert_eq!(list.remove_end(), Err(ListError::Underflow));

        list.add_start(3).unwrap();
        list.add_start(2).unwrap();
        list.add_start(1).unwrap();
        check_links(&list);
        assert_eq!(contents(&list), vec![1, 2, 3]);
        assert_eq!(list.remove_start(), Ok(1));
        assert_eq!(list.remove_start(), Ok(2));
        assert_eq!(list.remove_start(), Ok(3));
        assert!(list.is_empty());
        check_links(&list);

        list.add_end(1).unwrap();
        list.add_end(2).unwrap();
        list.add_end(3).unwrap();
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.remove_end(), Ok(3));
        assert_eq!(list.remove_end(), Ok(2));
        check_links(&list);
        assert_eq!(list.remove_end(), Ok(1));
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn single_element_ring() {
        let mut list: List<i32> = List::new();
        list.add_start(42).unwrap();
        check_links(&list);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], 42);
        assert_eq!(list.front(), list.back());

        let mut cursor = list.begin();
        cursor.move_next().unwrap();
        assert_eq!(cursor.get(), Ok(&42));

        assert_eq!(list.remove_end(), Ok(42));
        assert!(list.is_empty());
        assert_eq!(list.head, None);
    }

    #[test]
    fn add_with_index() {
        let mut list: List<i32> = vec![1, 3, 4].into_iter().collect();
        list.add(2, 1).unwrap();
        assert_eq!(contents(&list), vec![1, 2, 3, 4]);

        list.add(0, 0).unwrap();
        assert_eq!(list[0], 0);
        list.add(5, 5).unwrap();
        assert_eq!(list[5], 5);
        check_links(&list);
        assert_eq!(contents(&list), vec![0, 1, 2, 3, 4, 5]);

        assert_eq!(list.add(7, 7), Err(ListError::OutOfRange { len: 6 }));
        assert_eq!(list.add(7, -1), Err(ListError::OutOfRange { len: 6 }));
        assert_eq!(list.len(), 6);

        let mut empty: List<i32> = List::new();
        empty.add(1, 0).unwrap();
        assert_eq!(contents(&empty), vec![1]);
    }

    #[test]
    fn remove_with_index() {
        let mut list: List<i32> = (1..=5).collect();
        assert_eq!(list.remove(2), Ok(3));
        assert_eq!(contents(&list), vec![1, 2, 4, 5]);

        assert_eq!(list.remove(0), Ok(1));
        assert_eq!(list[0], 2);
        assert_eq!(list.remove(2), Ok(5));
        assert_eq!(list.len(), 2);
        check_links(&list);

        assert_eq!(list.remove(2), Err(ListError::OutOfRange { len: 2 }));
        assert_eq!(list.remove(-1), Err(ListError::OutOfRange { len: 2 }));
        assert_eq!(contents(&list), vec![2, 4]);

        let mut empty: List<i32> = List::new();
        assert_eq!(empty.remove(0), Err(ListError::OutOfRange { len: 0 }));
    }

    #[test]
    fn index_access() {
        let mut list: List<i32> = (1..=5).collect();
        list[2] = 100;
        assert_eq!(contents(&list), vec![1, 2, 100, 4, 5]);
        *list.get_mut(4).unwrap() += 1;
        assert_eq!(list.get(4), Ok(&6));
        // Both walking directions.
        for i in 0..5 {
            assert_eq!(list.get(i), Ok(&list[i]));
        }

        let list: List<i32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(list.get(5), Err(ListError::OutOfRange { len: 3 }));
        assert_eq!(list.get(-1), Err(ListError::OutOfRange { len: 3 }));
        assert_eq!(list.get(3u8), Err(ListError::OutOfRange { len: 3 }));
        assert_eq!(list.get(2i64), Ok(&3));
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn index_panics_past_the_end() {
        let list: List<i32> = vec![1, 2, 3].into_iter().collect();
        let _value = list[5];
    }

    #[test]
    fn large_list() {
        const N: i32 = 1000;
        let mut list: List<i32> = List::new();
        for i in 0..N {
            list.add_end(i * 2).unwrap();
        }
        assert_eq!(list.len(), N as usize);
        assert_eq!(list[0], 0);
        assert_eq!(list[(N / 2) as usize], N);
        assert_eq!(list[(N - 1) as usize], (N - 1) * 2);
        assert!(list.iter().copied().eq((0..N).map(|i| i * 2)));
    }

    #[test]
    fn sized_construction() {
        let list: List<i32> = List::with_len(4).unwrap();
        assert_eq!(contents(&list), vec![0; 4]);
        check_links(&list);

        let list: List<String> = List::filled(2, "x".to_owned()).unwrap();
        assert_eq!(contents(&list), vec!["x", "x"]);

        let list: List<i32> = List::with_len(0).unwrap();
        assert!(list.is_empty());

        assert_eq!(
            List::<i32>::with_len(10_001).unwrap_err(),
            ListError::CapacityExceeded {
                requested: 10_001,
                capacity: 10_000
            }
        );
        assert!(List::<i32, 3>::filled(4, 1).is_err());
        assert!(List::<i32, 3>::with_len(3).unwrap().is_full());
    }

    #[test]
    fn take_leaves_an_empty_list() {
        let mut list1: List<i32> = (1..=5).collect();
        let list2 = list1.take();
        assert_eq!(list2.len(), 5);
        assert_eq!(list2[0], 1);
        assert_eq!(list2[4], 5);
        assert_eq!(list1.len(), 0);
        assert!(list1.is_empty());
        assert!(!list1.is_full());

        // The moved-from list is still usable.
        list1.add_end(7).unwrap();
        assert_eq!(contents(&list1), vec![7]);
        check_links(&list2);
    }

    #[test]
    fn working_with_max_capacity() {
        let mut list: List<i32> = List::new();
        for i in 0..10_000 {
            list.add_end(i).unwrap();
        }
        assert_eq!(list.len(), 10_000);
        assert!(list.is_full());
        assert_eq!(
            list.add_start(42),
            Err(ListError::Overflow { capacity: 10_000 })
        );
        assert_eq!(
            list.add_end(42),
            Err(ListError::Overflow { capacity: 10_000 })
        );
        assert_eq!(list.add(42, 3), Err(ListError::Overflow { capacity: 10_000 }));
        assert_eq!(list.len(), 10_000);
        assert_eq!(list.front(), Some(&0));

        for _ in 0..5_000 {
            list.remove_start().unwrap();
        }
        assert_eq!(list.len(), 5_000);
        assert!(!list.is_full());
        assert_eq!(list.front(), Some(&5_000));
    }

    #[test]
    fn zero_capacity() {
        let mut list: List<i32, 0> = List::bounded();
        assert!(list.is_empty());
        assert!(list.is_full());
        assert_eq!(list.add_end(1), Err(ListError::Overflow { capacity: 0 }));
        assert!(list.is_empty());
    }

    #[test]
    fn clear_and_reuse() {
        let mut list: List<i32> = (0..10).collect();
        list.clear();
        assert!(list.is_empty());
        check_links(&list);
        list.add_start(1).unwrap();
        assert_eq!(contents(&list), vec![1]);
    }

    #[quickcheck]
    fn add_end_then_index(values: Vec<i32>) -> bool {
        let mut list: List<i32> = List::new();
        for &value in &values {
            list.add_end(value).unwrap();
        }
        check_links(&list);
        list.len() == values.len()
            && values
                .iter()
                .enumerate()
                .all(|(i, value)| list.get(i) == Ok(value))
    }

    /// Apply random operations to a list and to a `VecDeque`, and compare them
    /// after every step.
    #[quickcheck]
    fn matches_vec_deque(ops: Vec<(u8, u8, i16)>) -> bool {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut list: List<i16, 8> = List::bounded();
        let mut model = VecDeque::new();
        for (op, index, value) in ops {
            let index = index as usize % 10;
            let full = model.len() >= 8;
            match op % 6 {
                0 => {
                    let res = list.add_start(value);
                    if full {
                        assert_eq!(res, Err(ListError::Overflow { capacity: 8 }));
                    } else {
                        model.push_front(value);
                    }
                }
                1 => {
                    if list.add_end(value).is_ok() {
                        model.push_back(value);
                    }
                }
                2 => {
                    let res = list.add(value, index);
                    if index > model.len() {
                        assert_eq!(res, Err(ListError::OutOfRange { len: model.len() }));
                    } else if full {
                        assert!(res.is_err());
                    } else {
                        model.insert(index, value);
                    }
                }
                3 => assert_eq!(list.remove_start().ok(), model.pop_front()),
                4 => assert_eq!(list.remove_end().ok(), model.pop_back()),
                _ => assert_eq!(list.remove(index).ok(), model.remove(index)),
            }
            check_links(&list);
            log::debug!("list = {:?}", list);
            assert_eq!(list.len(), model.len());
            assert!(list.iter().eq(model.iter()));
            assert_eq!(list.front(), model.front());
            assert_eq!(list.back(), model.back());
        }
        true
    }
}

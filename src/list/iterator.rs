use crate::list::cursor::{Cursor, CursorIter};
use crate::list::{List, Node, DEFAULT_CAPACITY};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the elements of a `List`.
///
/// It keeps the two outermost nodes `front` and `back` that are not yielded
/// yet, plus the number of elements between them. Unlike a [`Cursor`], it
/// stops after one pass instead of going around the ring.
///
/// Though the `Iter` does not hold a reference from the list,
/// it actually *borrows* (immutably) from the list, so a phantom
/// marker of `&'a Node<T>` is added to protect the list from being
/// written.
///
/// # Examples
///
/// ```compile_fail
/// use circular_list::List;
///
/// let mut list: List<i32> = vec![1, 2, 3].into_iter().collect();
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.add_end(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    front: Option<NonNull<Node<T>>>,
    back: Option<NonNull<Node<T>>>,
    len: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(
        front: Option<NonNull<Node<T>>>,
        back: Option<NonNull<Node<T>>>,
        len: usize,
    ) -> Self {
        Self {
            front,
            back,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self::new(self.front, self.back, self.len)
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*front` and move `front` to its successor, or return `None` if
    /// every element has been yielded.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.front.map(|node| {
            // SAFETY: `len > 0`, so `front` is a live node of the borrowed list.
            let current = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.front = Some(current.next);
            &current.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Return `*back` and move `back` to its predecessor, or return `None` if
    /// every element has been yielded.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.back.map(|node| {
            // SAFETY: `len > 0`, so `back` is a live node of the borrowed list.
            let current = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.back = Some(current.prev);
            &current.element
        })
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// Though the `IterMut` does not hold a reference from the list,
/// it actually *borrows* (mutably) from the list, so a phantom
/// marker of `&'a mut Node<T>` is added to protect the list from
/// being read.
///
/// # Examples
///
/// `List` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use circular_list::List;
///
/// let mut list: List<i32> = vec![1, 2, 3].into_iter().collect();
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    front: Option<NonNull<Node<T>>>,
    back: Option<NonNull<Node<T>>>,
    len: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(
        front: Option<NonNull<Node<T>>>,
        back: Option<NonNull<Node<T>>>,
        len: usize,
    ) -> Self {
        Self {
            front,
            back,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.len).finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.front.map(|node| {
            // SAFETY: `len > 0`, so `front` is a live node of the list, and it is
            // yielded only once.
            let current = unsafe { &mut *node.as_ptr() };
            self.len -= 1;
            self.front = Some(current.next);
            &mut current.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.back.map(|node| {
            // SAFETY: `len > 0`, so `back` is a live node of the list, and it is
            // yielded only once.
            let current = unsafe { &mut *node.as_ptr() };
            self.len -= 1;
            self.back = Some(current.prev);
            &mut current.element
        })
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T, const CAP: usize = DEFAULT_CAPACITY> {
    list: List<T, CAP>,
}

impl<T: fmt::Debug, const CAP: usize> fmt::Debug for IntoIter<T, CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T, const CAP: usize> Iterator for IntoIter<T, CAP> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_start().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T, const CAP: usize> DoubleEndedIterator for IntoIter<T, CAP> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.remove_end().ok()
    }
}

impl<T, const CAP: usize> ExactSizeIterator for IntoIter<T, CAP> {}

impl<T, const CAP: usize> FusedIterator for IntoIter<T, CAP> {}

impl<T, const CAP: usize> IntoIterator for List<T, CAP> {
    type Item = T;
    type IntoIter = IntoIter<T, CAP>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T, const CAP: usize> IntoIterator for &'a List<T, CAP> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const CAP: usize> IntoIterator for &'a mut List<T, CAP> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Collects the items into a list.
///
/// # Panics
///
/// Panics if the iterator yields more than `CAP` items; use
/// [`List::try_from_iter`] to get an error instead.
impl<T, const CAP: usize> FromIterator<T> for List<T, CAP> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::bounded();
        list.extend(iter);
        list
    }
}

/// Appends the items at the end of the list.
///
/// # Panics
///
/// Panics if the list becomes full before the iterator is exhausted.
impl<T, const CAP: usize> Extend<T> for List<T, CAP> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| {
            if let Err(err) = self.add_end(item) {
                panic!("cannot extend the list: {}", err);
            }
        });
    }
}

impl<'a, T: 'a + Copy, const CAP: usize> Extend<&'a T> for List<T, CAP> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<'a, T: 'a> Iterator for CursorIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.current();
        // A detached cursor has nothing to yield, and nowhere to move.
        self.cursor.move_next().ok()?;
        current
    }
}

/// Convert the cursor to an iterator, which is cyclic and not fused.
impl<'a, T: 'a> IntoIterator for Cursor<'a, T> {
    type Item = &'a T;
    type IntoIter = CursorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        CursorIter { cursor: self }
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::fmt::Debug;

    #[test]
    fn test_iter() {
        macro_rules! test_iter {
            ($FN:ident, $ITER:ident $(, $REV:ident)?) => {
                fn $FN<T, I>(input: I, mid: usize)
                where
                    T: Eq + Debug + Clone,
                    I: IntoIterator<Item = T>,
                {
                    #[allow(unused_mut)]
                    let mut vec: Vec<T> = input.into_iter().collect();
                    #[allow(unused_mut)]
                    let mut list: List<T> = vec.iter().cloned().collect();
                    let len = vec.len();
                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )?.enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);

                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )? .take(mid).enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    let mut iter = iter.rev();
                    for (i, item) in vec.$ITER() $( .$REV() )? .skip(mid).rev().enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - mid - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);
                }
            };
        }
        test_iter!(test_iter, iter);
        test_iter!(test_iter_mut, iter_mut);
        test_iter!(test_back_iter, iter, rev);
        test_iter!(test_back_iter_mut, iter_mut, rev);

        fn test_case<T, I>(input: I, mid: usize)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T> + Clone,
        {
            test_iter(input.clone(), mid);
            test_iter_mut(input.clone(), mid);
            test_back_iter(input.clone(), mid);
            test_back_iter_mut(input.clone(), mid);
        }
        test_case(0..10, 10);
        test_case(0..10, 8);
        test_case(0..10, 5);
        test_case(0..10, 2);
        test_case(0..10, 0);
        test_case(0..2, 2);
        test_case(0..2, 1);
        test_case(0..2, 0);
        test_case(0..1, 1);
        test_case(0..1, 0);
        test_case(0..0, 0);
    }

    #[test]
    fn into_iter_from_both_ends() {
        let list: List<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next().as_deref(), Some("a"));
        assert_eq!(iter.next_back().as_deref(), Some("d"));
        assert_eq!(iter.collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn extend_by_reference() {
        let mut list: List<i32> = List::new();
        list.extend(&[1, 2, 3]);
        list.extend(vec![4, 5]);
        assert_eq!(list.iter().sum::<i32>(), 15);
        assert_eq!((&list).into_iter().count(), 5);
        for item in &mut list {
            *item -= 1;
        }
        assert_eq!(list.to_string(), "[0 <-> 1 <-> 2 <-> 3 <-> 4]");
    }

    #[test]
    #[should_panic(expected = "cannot extend the list")]
    fn collect_beyond_capacity() {
        let _list: List<i32, 3> = (0..4).collect();
    }

    #[test]
    fn cursor_iter_never_ends() {
        let list: List<i32> = (1..=3).collect();
        let cycled: Vec<_> = list.end().into_iter().take(8).copied().collect();
        assert_eq!(cycled, vec![1, 2, 3, 1, 2, 3, 1, 2]);

        let empty: List<i32> = List::new();
        assert_eq!(empty.begin().into_iter().next(), None);
    }
}

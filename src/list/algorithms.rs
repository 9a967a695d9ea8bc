use crate::error::ListError;
use crate::list::List;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::Add;

impl<T: PartialEq, const CAP: usize> PartialEq for List<T, CAP> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq, const CAP: usize> Eq for List<T, CAP> {}

impl<T: PartialOrd, const CAP: usize> PartialOrd for List<T, CAP> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord, const CAP: usize> Ord for List<T, CAP> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone, const CAP: usize> Clone for List<T, CAP> {
    fn clone(&self) -> Self {
        let mut list = List::bounded();
        for elt in self {
            list.link_back(elt.clone());
        }
        list
    }

    /// Overwrites `self` with a copy of `other`, reusing the nodes that are
    /// already allocated.
    fn clone_from(&mut self, other: &Self) {
        while let Some(tail) = self.tail_node().filter(|_| self.len() > other.len()) {
            // SAFETY: the tail is a node of this list.
            drop(unsafe { self.detach_node(tail) });
        }
        let reused = self.len();
        for (elt, elt_other) in self.iter_mut().zip(other) {
            elt.clone_from(elt_other);
        }
        for elt_other in other.iter().skip(reused) {
            self.link_back(elt_other.clone());
        }
    }
}

impl<T: Hash, const CAP: usize> Hash for List<T, CAP> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T, const CAP: usize> List<T, CAP> {
    /// Returns `true` if the `List` contains an element equal to the given value.
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
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Returns a new list holding a copy of `self` followed by a copy of
    /// `other`. Neither list is changed.
    ///
    /// This is also available as `&a + &b`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Overflow`] if the two lists together hold more
    /// than `CAP` elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{List, ListError};
    ///
    /// let a: List<i32> = vec![1, 2].into_iter().collect();
    /// let b: List<i32> = vec![3, 4, 5].into_iter().collect();
    /// let c = a.concat(&b)?;
    /// assert_eq!(c.to_string(), "[1 <-> 2 <-> 3 <-> 4 <-> 5]");
    /// assert_eq!(c, (&a + &b)?);
    ///
    /// let small: List<i32, 4> = vec![1, 2, 3].into_iter().collect();
    /// assert_eq!(small.concat(&small), Err(ListError::Overflow { capacity: 4 }));
    /// # Ok::<(), ListError>(())
    /// ```
    pub fn concat(&self, other: &Self) -> Result<Self, ListError>
    where
        T: Clone,
    {
        if self.len() + other.len() > CAP {
            return Err(ListError::Overflow { capacity: CAP });
        }
        let mut list = self.clone();
        for elt in other {
            list.link_back(elt.clone());
        }
        Ok(list)
    }
}

impl<'a, 'b, T: Clone, const CAP: usize> Add<&'b List<T, CAP>> for &'a List<T, CAP> {
    type Output = Result<List<T, CAP>, ListError>;

    fn add(self, other: &'b List<T, CAP>) -> Self::Output {
        self.concat(other)
    }
}

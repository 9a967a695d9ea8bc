use crate::error::{ListError, ReadError};
use crate::list::List;
use log::debug;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

/// Renders the list as `[v0 <-> v1 <-> ... <-> vn-1]`, or `[]` when empty.
///
/// # Examples
///
/// ```
/// use circular_list::List;
///
/// let list: List<i32> = vec![1, 2, 3].into_iter().collect();
/// assert_eq!(list.to_string(), "[1 <-> 2 <-> 3]");
/// assert_eq!(List::<i32>::new().to_string(), "[]");
/// ```
impl<T: fmt::Display, const CAP: usize> fmt::Display for List<T, CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, elt) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" <-> ")?;
            }
            fmt::Display::fmt(elt, f)?;
        }
        f.write_str("]")
    }
}

impl<T: FromStr, const CAP: usize> List<T, CAP> {
    /// Parses whitespace-separated values from `text` and appends them.
    ///
    /// Returns `Ok(false)` if a token failed to parse, in which case the rest
    /// of the input is left alone.
    fn append_tokens(&mut self, text: &str) -> Result<bool, ListError> {
        for token in text.split_whitespace() {
            let value = match token.parse() {
                Ok(value) => value,
                Err(_) => {
                    debug!("stopped reading at {:?} after {} values", token, self.len());
                    return Ok(false);
                }
            };
            if self.is_full() {
                debug!("stopped reading at {:?}: the list is full", token);
                return Err(ListError::Overflow { capacity: CAP });
            }
            self.link_back(value);
        }
        Ok(true)
    }

    /// Replaces the content of the list with the whitespace-separated values
    /// of `text`, and returns the number of values loaded.
    ///
    /// Reading stops quietly at the first token that does not parse as a `T`;
    /// the values before it stay loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Overflow`] if `text` holds more than `CAP` values.
    /// The first `CAP` values stay loaded.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list: List<i32> = vec![7].into_iter().collect();
    /// assert_eq!(list.load_str("10 20\n30 x 40")?, 3);
    /// assert_eq!(list.to_string(), "[10 <-> 20 <-> 30]");
    /// # Ok::<(), circular_list::ListError>(())
    /// ```
    pub fn load_str(&mut self, text: &str) -> Result<usize, ListError> {
        self.clear();
        self.append_tokens(text)?;
        Ok(self.len())
    }

    /// Replaces the content of the list with the whitespace-separated values
    /// read from `reader`, and returns the number of values loaded.
    ///
    /// The reader is consumed line by line, until the end of the stream or
    /// until a token does not parse as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Io`] if reading fails, and [`ReadError::List`]
    /// holding [`ListError::Overflow`] if the stream has more than `CAP`
    /// values. The values read before the error stay loaded.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    /// use std::io::Cursor;
    ///
    /// let mut list: List<u32> = List::new();
    /// let count = list.read_from(Cursor::new("1 2\n3\n\n4"))?;
    /// assert_eq!(count, 4);
    /// assert_eq!(list.back(), Some(&4));
    /// # Ok::<(), circular_list::ReadError>(())
    /// ```
    pub fn read_from<R: BufRead>(&mut self, mut reader: R) -> Result<usize, ReadError> {
        self.clear();
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            if !self.append_tokens(&line)? {
                break;
            }
        }
        Ok(self.len())
    }
}

/// Parses a list from whitespace-separated values.
///
/// # Examples
///
/// ```
/// use circular_list::List;
///
/// let list: List<i32> = "10 20 30 40".parse()?;
/// assert_eq!(list.len(), 4);
/// assert_eq!(list[3], 40);
/// # Ok::<(), circular_list::ListError>(())
/// ```
impl<T: FromStr, const CAP: usize> FromStr for List<T, CAP> {
    type Err = ListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut list = List::bounded();
        list.load_str(s)?;
        Ok(list)
    }
}

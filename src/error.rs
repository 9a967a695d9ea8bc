//! Error types reported by [`List`](crate::List) and its cursors.
use quick_error::quick_error;
use std::io;

quick_error! {
    /// The reason a list operation was rejected.
    ///
    /// An operation that returns a `ListError` has not changed the list.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ListError {
        /// A sized construction asked for more elements than the list can
        /// ever hold.
        CapacityExceeded { requested: usize, capacity: usize } {
            display("cannot create a list of {} elements, the capacity is {}", requested, capacity)
        }
        /// An insertion was attempted on a list that is already full.
        Overflow { capacity: usize } {
            display("list is full ({} elements)", capacity)
        }
        /// A removal was attempted on an empty list.
        Underflow {
            display("list is empty")
        }
        /// An index was negative or beyond the bound of the operation.
        OutOfRange { len: usize } {
            display("index out of range for a list of length {}", len)
        }
        /// A cursor that references no node was passed where a position is
        /// required.
        InvalidArgument {
            display("cursor does not reference an element")
        }
        /// A cursor that references no node was dereferenced or moved.
        InvalidIteratorState {
            display("cursor is not positioned on an element")
        }
    }
}

quick_error! {
    /// An error raised while loading a list from a text stream.
    #[derive(Debug)]
    pub enum ReadError {
        Io(err: io::Error) {
            from()
            cause(err)
            display("I/O error: {}", err)
        }
        List(err: ListError) {
            from()
            cause(err)
            display("{}", err)
        }
    }
}

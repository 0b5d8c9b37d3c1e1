//! Package implement an event counter over a classic red-black tree.
//!
//! Quoting from [Wikipedia][wiki-rb]:
//!
//! > A red–black tree is a kind of self-balancing binary search tree. Each
//! > node stores an extra bit representing "color", used to ensure that
//! > the tree remains balanced during insertions and deletions.
//!
//! Following types are exported by this package:
//!
//! * [RBTree] implements an ephemeral ordered-map, using parent linked
//!   red-black nodes held in an arena and addressed by index.
//! * [EventCounter] implements counter semantics, increase, reduce, count,
//!   on top of `RBTree<i64, i64>`.
//! * [Command] and [Reply] model the line oriented command protocol
//!   understood by the `bbst` binary.
//!
//! Ordered-map for counting events
//! -------------------------------
//!
//! - Each entry correspond to a {Key, Value} pair.
//! - Parametrised over `key-type` and `value-type`.
//! - O(n) bulk load from pre-sorted entries.
//! - Point update, range-sum, successor and predecessor in O(log n).
//! - Invariant verification, for diagnostics and tests.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Bulk loading and querying an [RBTree]:
//!
//! ```
//! use bbst::RBTree;
//!
//! let mut index: RBTree<i64, i64> = RBTree::from_sorted(vec![(1, 1), (2, 1), (3, 1)]).unwrap();
//! assert_eq!(index.verify(), (true, 2));
//!
//! assert_eq!(index.increase(4, 2), 2);
//! assert_eq!(index.range_sum::<i64>(&1, &3), 3);
//! assert_eq!(index.successor(&2), Some((&3, &1)));
//! assert_eq!(index.predecessor(&2), Some((&1, &1)));
//! assert_eq!(index.decrease(&2, 1), 0);
//! assert_eq!(index.get(&2), None);
//! ```
//!
//! [wiki-rb]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(ParseError, msg: format!("bad argument"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(ParseError, "10".parse::<i64>());
// ```
//
// ```ignore
// use crate::Error;
// err_at!(IOError, reader.read_line(&mut line), format!("read failed"));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

pub mod cmd;
mod counter;
pub mod load;
mod node;
mod query;
mod rbtree;
mod verify;

pub use cmd::{Command, Reply};
pub use counter::EventCounter;
pub use rbtree::{Handle, Insert, Iter, RBTree};
pub use verify::Stats;

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    Fatal(String, String),
    InvalidInput(String, String),
    ParseError(String, String),
    IOError(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            InvalidInput(p, msg) => write!(f, "{} InvalidInput: {}", p, msg),
            ParseError(p, msg) => write!(f, "{} ParseError: {}", p, msg),
            IOError(p, msg) => write!(f, "{} IOError: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;

//! Line oriented command protocol for [EventCounter].
//!
//! Each line carries one command, tokens separated by whitespace:
//!
//! ```text
//! increase <id> <n>
//! reduce <id> <n>
//! count <id>
//! inrange <low> <high>
//! next <id>
//! previous <id>
//! verify
//! quit
//! ```
//!
//! [EventCounter]: crate::EventCounter

use std::{fmt, result, str::FromStr};

use crate::{Error, Result};

/// Command, parsed from a single line of input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Increase { id: i64, n: i64 },
    Reduce { id: i64, n: i64 },
    Count { id: i64 },
    InRange { low: i64, high: i64 },
    Next { id: i64 },
    Previous { id: i64 },
    Verify,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    /// Return [Error::InvalidInput] for an unknown command or wrong
    /// number of arguments, [Error::ParseError] for a non-numeric argument.
    fn from_str(line: &str) -> Result<Command> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let cmd = match tokens.as_slice() {
            ["increase", id, n] => Command::Increase {
                id: to_number(id)?,
                n: to_number(n)?,
            },
            ["reduce", id, n] => Command::Reduce {
                id: to_number(id)?,
                n: to_number(n)?,
            },
            ["count", id] => Command::Count { id: to_number(id)? },
            ["inrange", low, high] => Command::InRange {
                low: to_number(low)?,
                high: to_number(high)?,
            },
            ["next", id] => Command::Next { id: to_number(id)? },
            ["previous", id] => Command::Previous { id: to_number(id)? },
            ["verify"] => Command::Verify,
            ["quit"] => Command::Quit,
            _ => err_at!(InvalidInput, msg: "{}", line)?,
        };
        Ok(cmd)
    }
}

fn to_number(token: &str) -> Result<i64> {
    err_at!(ParseError, token.parse::<i64>(), "token {:?}", token)
}

/// Reply to a [Command], its `Display` is the textual response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reply {
    /// Counter value for a single event.
    Count(i64),
    /// Total count over a range of events.
    Sum(i128),
    /// Neighbouring event as (id, count), rendered as `0 0` when missing.
    Event(Option<(i64, i64)>),
    /// Outcome of invariant verification and the tree's depth.
    Verify { ok: bool, depth: usize },
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            Reply::Count(n) => write!(f, "{}", n),
            Reply::Sum(n) => write!(f, "{}", n),
            Reply::Event(Some((id, n))) => write!(f, "{} {}", id, n),
            Reply::Event(None) => write!(f, "0 0"),
            Reply::Verify { ok, depth } => write!(f, "{} {}", ok, depth),
        }
    }
}

#[cfg(test)]
#[path = "cmd_test.rs"]
mod cmd_test;

//! Invocation identifiers.
//!
//! `run` 呼び出しごとに ULID ベースの `RunId` を発行し、tracing の span に載せます。
//! ULID は時刻順にソートできるので、ログ上で呼び出し順を追えます。

use std::fmt;
use ulid::Ulid;

/// Identifier of one pipeline invocation.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(Ulid);

impl RunId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

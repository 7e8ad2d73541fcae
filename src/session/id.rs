use std::fmt;

use time::OffsetDateTime;

/// Session identifier: creation time in Unix milliseconds, kept strictly
/// increasing even when the clock stalls or steps backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionIdSource {
    last: Option<u64>,
}

impl SessionIdSource {
    pub fn next(&mut self, now: OffsetDateTime) -> SessionId {
        let millis = u64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(0);
        let id = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(id);
        SessionId(id)
    }
}

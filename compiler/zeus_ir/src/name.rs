//! Interned identifiers and string bodies.

use std::fmt;

/// Handle to a string owned by the [`StringInterner`](crate::StringInterner).
///
/// The top four bits select one of the interner's shards, the remaining
/// 28 bits index into that shard. Comparing two names compares the
/// strings they stand for.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string, interned up front in shard 0.
    pub const EMPTY: Name = Name(0);

    pub const NUM_SHARDS: usize = 16;
    const SHARD_SHIFT: u32 = 28;
    pub const MAX_LOCAL: u32 = (1 << Self::SHARD_SHIFT) - 1;

    #[inline]
    pub const fn new(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::NUM_SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << Self::SHARD_SHIFT) | local)
    }

    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> Self::SHARD_SHIFT) as usize
    }

    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

//! Hash states behind the value containers and the type id maps.
//!
//! - [`FixedHashState`]: seeded `foldhash`, identical output in every process.
//! - [`NoOpHashState`]: keeps the `u64` it is given, for keys that are
//!   already hashes.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const SEED: u64 = 0x3C5A_91E0_D27B_46F1;

/// The hasher built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// Builds [`FixedHasher`]s from a compile-time seed.
///
/// Value sets and maps are built on it: the same contents inserted in the
/// same order iterate in the same order, which keeps generated programs
/// reproducible between runs.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use cp_utils::hash::FixedHashState;
///
/// assert_eq!(
///     FixedHashState.hash_one("retval"),
///     FixedHashState.hash_one("retval"),
/// );
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        const STATE: FixedState = FixedState::with_seed(SEED);
        STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// Returns the last `u64` written as the hash.
///
/// For [`TypeId`](core::any::TypeId) keys, whose `Hash` impl writes a
/// single `u64` that is already well distributed. Other input is folded
/// in eight byte words.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0_u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.hash = self.hash.rotate_left(29) ^ u64::from_le_bytes(word);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher::default()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use core::hash::{BuildHasher, Hash, Hasher};

    use super::{FixedHashState, NoOpHashState};

    #[test]
    fn fixed_state_is_stable() {
        let first = FixedHashState.hash_one("func_00000001");
        let second = FixedHashState.hash_one("func_00000001");
        assert_eq!(first, second);
        assert_ne!(first, FixedHashState.hash_one("func_00000002"));
    }

    #[test]
    fn no_op_passes_u64_through() {
        let mut hasher = NoOpHashState.build_hasher();
        42_u64.hash(&mut hasher);
        assert_eq!(hasher.finish(), 42);
    }

    #[test]
    fn no_op_folds_bytes() {
        let mut short = NoOpHashState.build_hasher();
        short.write(&[1, 2]);
        assert_eq!(short.finish(), 0x0201);

        let mut long = NoOpHashState.build_hasher();
        long.write(&[1, 0, 0, 0, 0, 0, 0, 0, 3]);
        assert_eq!(long.finish(), 1_u64.rotate_left(29) ^ 3);

        assert_ne!(
            NoOpHashState.hash_one(TypeId::of::<u8>()),
            NoOpHashState.hash_one(TypeId::of::<u16>())
        );
    }
}

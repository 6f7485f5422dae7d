//! Marsaglia's multiply-with-carry generator with a 4096 word lag table.
//!
//! The generator remembers the table and carry it was seeded with, so
//! [`Mwc::reset`] replays the exact same sequence. Transitions consume the
//! state and return the next one; clone first to keep the previous state.

use rand::{RngCore, thread_rng};
use std::fmt;
use tracing::trace;

/// Size of the lag table.
pub const MWC_CYCLE: usize = 4096;
/// Seeded carries must stay below this bound for the multiplier [`MWC_A`].
pub const MWC_C_MAX: u32 = 809_430_660;
/// Multiplier.
pub const MWC_A: u64 = 18782;
const MWC_M: u32 = 0xffff_fffe;

/// State of a multiply-with-carry generator.
#[derive(Clone, PartialEq, Eq)]
pub struct Mwc {
    q: Box<[u32]>,
    carry: u32,
    cursor: usize,
    initial_q: Box<[u32]>,
    initial_carry: u32,
}

impl Mwc {
    /// Seed a generator from the thread local random number generator.
    pub fn new() -> Self {
        let mut rng = thread_rng();
        Self::with_seed(|| rng.next_u32())
    }

    /// Seed a generator from `source`.
    ///
    /// The carry is drawn until it is below [`MWC_C_MAX`], then every slot of
    /// the table is filled. The cursor starts on the last slot, so the first
    /// [`advance`](Self::advance) updates slot 0.
    pub fn with_seed<F>(mut source: F) -> Self
    where
        F: FnMut() -> u32,
    {
        let carry = loop {
            let candidate = source();
            if candidate < MWC_C_MAX {
                break candidate;
            }
            trace!(candidate, "rejected mwc carry seed");
        };
        let q: Box<[u32]> = (0..MWC_CYCLE).map(|_| source()).collect();

        Self {
            initial_q: q.clone(),
            initial_carry: carry,
            q,
            carry,
            cursor: MWC_CYCLE - 1,
        }
    }

    /// Restore the state the generator was seeded with.
    #[must_use]
    pub fn reset(mut self) -> Self {
        self.q.copy_from_slice(&self.initial_q);
        self.carry = self.initial_carry;
        self.cursor = MWC_CYCLE - 1;
        self
    }

    /// The current value. Reading does not move the generator.
    pub fn read(&self) -> u32 {
        self.q[self.cursor]
    }

    /// Step to the next value.
    #[must_use]
    pub fn advance(mut self) -> Self {
        self.step();
        self
    }

    fn step(&mut self) {
        self.cursor = (self.cursor + 1) & (MWC_CYCLE - 1);
        let t = MWC_A * u64::from(self.q[self.cursor]) + u64::from(self.carry);
        self.carry = (t >> 32) as u32;
        let mut x = (t as u32).wrapping_add(self.carry);
        // the addition above wrapped past 2^32
        if x < self.carry {
            x = x.wrapping_add(1);
            self.carry = self.carry.wrapping_add(1);
        }
        self.q[self.cursor] = MWC_M.wrapping_sub(x);
    }
}

impl Default for Mwc {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mwc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mwc")
            .field("carry", &self.carry)
            .field("cursor", &self.cursor)
            .field("current", &self.read())
            .finish_non_exhaustive()
    }
}

/// Draws advance the generator and return the new current value.
impl RngCore for Mwc {
    fn next_u32(&mut self) -> u32 {
        self.step();
        self.read()
    }

    fn next_u64(&mut self) -> u64 {
        let low = self.next_u32();
        let high = self.next_u32();
        (u64::from(high) << 32) | u64::from(low)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A seed source yielding 1, 2, 3, ...
    fn counting() -> impl FnMut() -> u32 {
        let mut next = 0u32;
        move || {
            next += 1;
            next
        }
    }

    #[test]
    fn test_seeding() {
        let mwc = Mwc::with_seed(counting());
        assert_eq!(mwc.carry, 1);
        assert_eq!(mwc.cursor, MWC_CYCLE - 1);
        assert_eq!(mwc.q[0], 2);
        assert_eq!(mwc.read(), MWC_CYCLE as u32 + 1);
    }

    #[test]
    fn test_carry_seed_rejection() {
        let mut draws = vec![7, MWC_C_MAX, u32::MAX].into_iter();
        let mwc = Mwc::with_seed(move || draws.next_back().unwrap_or(9));
        assert_eq!(mwc.carry, 7);
        assert!(mwc.q.iter().all(|&v| v == 9));
    }

    #[test]
    fn test_known_sequence() {
        let mwc = Mwc::with_seed(counting()).advance();
        // t = 18782 * 2 + 1
        assert_eq!(mwc.read(), 0xffff_fffe - 37565);
        assert_eq!(mwc.carry, 0);
        let mwc = mwc.advance();
        assert_eq!(mwc.read(), 0xffff_fffe - 18782 * 3);
    }

    #[test]
    fn test_carry_propagation() {
        let mut mwc = Mwc::with_seed(|| 1);
        mwc.q[0] = u32::MAX;
        mwc.carry = MWC_C_MAX - 1;
        let t = MWC_A * u64::from(u32::MAX) + u64::from(MWC_C_MAX - 1);
        let carry = (t >> 32) as u32;
        let mut x = (t as u32).wrapping_add(carry);
        let mut expected_carry = carry;
        if x < carry {
            x = x.wrapping_add(1);
            expected_carry += 1;
        }
        let mwc = mwc.advance();
        assert_eq!(mwc.carry, expected_carry);
        assert_eq!(mwc.read(), 0xffff_fffe_u32.wrapping_sub(x));
    }

    #[test]
    fn test_read_is_idempotent() {
        let mwc = Mwc::new().reset();
        let value = mwc.read();
        assert_eq!(mwc.read(), value);
        assert_eq!(mwc.read(), value);
    }

    #[test]
    fn test_advance_changes_value() {
        let mwc = Mwc::with_seed(counting()).reset();
        let before = mwc.read();
        let after = mwc.clone().advance();
        assert_ne!(after.read(), before);
        // the original binding did not move
        assert_eq!(mwc.read(), before);
    }

    #[test]
    fn test_reset_replays_sequence() {
        let mwc = Mwc::new();
        let first: Vec<u32> = std::iter::successors(Some(mwc.clone().advance()), |m| {
            Some(m.clone().advance())
        })
        .take(MWC_CYCLE + 10)
        .map(|m| m.read())
        .collect();

        let mut replay = mwc.advance().advance().advance().reset();
        for expected in first {
            replay = replay.advance();
            assert_eq!(replay.read(), expected);
        }
    }

    #[test]
    fn test_rng_core() {
        let mut rng = Mwc::with_seed(counting());
        let stepped = rng.clone().advance();
        assert_eq!(rng.next_u32(), stepped.read());
        assert_eq!(rng, stepped);
    }
}

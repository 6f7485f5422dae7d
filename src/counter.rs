/// A monotonic counter with value semantics.
///
/// Every transition returns a new counter, the receiver is left untouched:
///
/// ```
/// use cuid_me::Counter;
///
/// let counter = Counter::new().init();
/// let next = counter.advance();
/// assert_eq!(counter.read(), 0);
/// assert_eq!(next.read(), 1);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Counter {
    value: u32,
}

impl Counter {
    /// Create a counter at zero.
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Reset the counter to zero.
    #[must_use]
    pub const fn init(self) -> Self {
        Self { value: 0 }
    }

    /// The current value.
    pub const fn read(&self) -> u32 {
        self.value
    }

    /// The next counter, wrapping after `u32::MAX`.
    #[must_use]
    pub const fn advance(self) -> Self {
        Self {
            value: self.value.wrapping_add(1),
        }
    }
}

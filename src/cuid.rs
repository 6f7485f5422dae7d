use crate::base36::{decode, encode_fixed};
use crate::counter::Counter;
use crate::error::Error;
use crate::fingerprint::{FINGERPRINT_LENGTH, Fingerprint};
use crate::mwc::Mwc;
use rand::{RngCore, thread_rng};

/// Number of characters in a cuid.
pub const CUID_LENGTH: usize = 23;
/// Width of the timestamp block.
pub(crate) const TIMESTAMP_LENGTH: usize = 6;
/// Width of the counter and random blocks.
pub(crate) const BLOCK_LENGTH: usize = 4;

const PREFIX: u8 = b'c';
const TIMESTAMP_AT: usize = 1;
const COUNTER_AT: usize = TIMESTAMP_AT + TIMESTAMP_LENGTH;
const FINGERPRINT_AT: usize = COUNTER_AT + BLOCK_LENGTH;
const RANDOM1_AT: usize = FINGERPRINT_AT + FINGERPRINT_LENGTH;
const RANDOM2_AT: usize = RANDOM1_AT + BLOCK_LENGTH;

/// Lay out the blocks of a cuid.
pub(crate) fn render(
    timestamp: &[u8; TIMESTAMP_LENGTH],
    counter: u32,
    fingerprint: &Fingerprint,
    random1: u32,
    random2: u32,
) -> [u8; CUID_LENGTH] {
    let mut value = [0u8; CUID_LENGTH];
    value[0] = PREFIX;
    value[TIMESTAMP_AT..COUNTER_AT].copy_from_slice(timestamp);
    value[COUNTER_AT..FINGERPRINT_AT]
        .copy_from_slice(&encode_fixed::<BLOCK_LENGTH>(u64::from(counter)));
    value[FINGERPRINT_AT..RANDOM1_AT].copy_from_slice(fingerprint.as_bytes());
    value[RANDOM1_AT..RANDOM2_AT]
        .copy_from_slice(&encode_fixed::<BLOCK_LENGTH>(u64::from(random1)));
    value[RANDOM2_AT..].copy_from_slice(&encode_fixed::<BLOCK_LENGTH>(u64::from(random2)));
    value
}

/// Lifecycle of a [`Cuid`] context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Sub-states exist but nothing was rendered yet.
    Created,
    /// Counter and generators are at their start, a value is rendered.
    Initialized,
    /// Stepped at least once since the last initialization.
    Advanced,
}

/// An explicitly threaded cuid generator.
///
/// All transitions consume the context and return the next one, so a clone
/// kept aside is never affected:
///
/// ```
/// use cuid_me::{Cuid, Fingerprint};
///
/// let fingerprint: Fingerprint = "fing".parse().unwrap();
/// let id = Cuid::create(fingerprint).initialize(123456789);
/// assert!(id.read().starts_with("c21i3v90000fing"));
///
/// let id = id.advance(223456789);
/// assert!(id.read().starts_with("c3p1gd10001fing"));
/// ```
#[derive(Debug, Clone)]
pub struct Cuid {
    fingerprint: Fingerprint,
    counter: Counter,
    random1: Mwc,
    random2: Mwc,
    timestamp: [u8; TIMESTAMP_LENGTH],
    value: [u8; CUID_LENGTH],
    phase: Phase,
}

impl Cuid {
    /// Create a context bound to `fingerprint`, seeding both random streams
    /// from the thread local random number generator.
    pub fn create(fingerprint: Fingerprint) -> Self {
        let mut rng = thread_rng();
        Self::create_with_seed(fingerprint, || rng.next_u32())
    }

    /// Create a context bound to `fingerprint`, seeding both random streams
    /// from `source`.
    pub fn create_with_seed<F>(fingerprint: Fingerprint, mut source: F) -> Self
    where
        F: FnMut() -> u32,
    {
        Self {
            fingerprint,
            counter: Counter::new(),
            random1: Mwc::with_seed(&mut source),
            random2: Mwc::with_seed(&mut source),
            timestamp: [0; TIMESTAMP_LENGTH],
            value: [0; CUID_LENGTH],
            phase: Phase::Created,
        }
    }

    /// Rewind the counter and both random streams to their start and render
    /// the first value for `timestamp`.
    #[must_use]
    pub fn initialize(mut self, timestamp: u64) -> Self {
        self.counter = self.counter.init();
        self.random1 = self.random1.reset();
        self.random2 = self.random2.reset();
        self.timestamp = encode_fixed(timestamp);
        self.value = [0; CUID_LENGTH];
        self.phase = Phase::Initialized;
        self.rendered()
    }

    /// Step the counter and both random streams and render the next value
    /// for `timestamp`.
    ///
    /// Advancing a context that was never initialized continues from the
    /// freshly seeded streams.
    #[must_use]
    pub fn advance(mut self, timestamp: u64) -> Self {
        self.counter = self.counter.advance();
        self.random1 = self.random1.advance();
        self.random2 = self.random2.advance();
        self.timestamp = encode_fixed(timestamp);
        self.phase = Phase::Advanced;
        self.rendered()
    }

    /// Copy out the rendered value.
    ///
    /// Before the first initialization this is 23 NUL characters.
    pub fn read(&self) -> String {
        self.value.iter().map(|&b| char::from(b)).collect()
    }

    /// The rendered value as bytes.
    pub fn as_bytes(&self) -> &[u8; CUID_LENGTH] {
        &self.value
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    fn rendered(mut self) -> Self {
        self.value = render(
            &self.timestamp,
            self.counter.read(),
            &self.fingerprint,
            self.random1.read(),
            self.random2.read(),
        );
        self
    }
}

/// The blocks of a cuid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedCuid {
    pub timestamp: u64,
    pub counter: u64,
    pub fingerprint: String,
    pub random1: u64,
    pub random2: u64,
}

impl DecomposedCuid {
    /// Break a cuid up into its blocks.
    ///
    /// Numeric blocks hold the low digits of their values only, a timestamp
    /// beyond six base36 digits comes back clipped.
    pub fn decompose(id: &str) -> Result<Self, Error> {
        let bytes = id.as_bytes();
        if bytes.len() != CUID_LENGTH || !id.is_ascii() {
            return Err(Error::InvalidLength(id.chars().count()));
        }
        if bytes[0] != PREFIX {
            return Err(Error::InvalidPrefix(char::from(bytes[0])));
        }
        Ok(Self {
            timestamp: decode(&id[TIMESTAMP_AT..COUNTER_AT])?,
            counter: decode(&id[COUNTER_AT..FINGERPRINT_AT])?,
            fingerprint: id[FINGERPRINT_AT..RANDOM1_AT].to_owned(),
            random1: decode(&id[RANDOM1_AT..RANDOM2_AT])?,
            random2: decode(&id[RANDOM2_AT..])?,
        })
    }
}

/// Break a cuid up into its blocks.
pub fn decompose(id: &str) -> Result<DecomposedCuid, Error> {
    DecomposedCuid::decompose(id)
}

/// Whether `text` has the shape of a cuid.
pub fn is_cuid(text: &str) -> bool {
    let bytes = text.as_bytes();
    let is_digit = |b: &u8| b.is_ascii_digit() || b.is_ascii_lowercase();
    bytes.len() == CUID_LENGTH
        && bytes[0] == PREFIX
        && bytes[TIMESTAMP_AT..FINGERPRINT_AT].iter().all(is_digit)
        && bytes[FINGERPRINT_AT..RANDOM1_AT]
            .iter()
            .all(u8::is_ascii_graphic)
        && bytes[RANDOM1_AT..].iter().all(is_digit)
}

use crate::base36::encode_fixed;
use crate::builder::Builder;
use crate::cuid::{TIMESTAMP_LENGTH, render};
use crate::error::Error;
use crate::fingerprint::Fingerprint;
use chrono::Utc;
use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicU32, Ordering},
};

/// A source of timestamps, monotonic non-decreasing.
pub type TimestampFn = dyn Fn() -> u64 + Send + Sync;
/// A source of uniformly distributed random numbers.
pub type RandomFn = dyn Fn() -> u32 + Send + Sync;

/// SharedGenerator is shared between Generator clones.
/// This struct is not exposed to the public.
pub(crate) struct SharedGenerator {
    pub(crate) fingerprint: Fingerprint,
    pub(crate) counter: AtomicU32,
    pub(crate) timestamp: Box<TimestampFn>,
    pub(crate) random: Box<RandomFn>,
}

/// Generator produces a new cuid on every call.
/// It is thread-safe and can be cloned to be used in multiple threads, clones
/// share one counter.
pub struct Generator(pub(crate) Arc<SharedGenerator>);

impl Generator {
    /// Create a new Generator with the default configuration.
    /// For custom configuration see [`builder`].
    ///
    /// [`builder`]: struct.Generator.html#method.builder
    pub fn new() -> Result<Self, Error> {
        Builder::new().finalize()
    }

    /// Create a new [`Builder`] to construct a Generator.
    ///
    /// [`Builder`]: struct.Builder.html
    pub fn builder<'a>() -> Builder<'a> {
        Builder::new()
    }

    pub(crate) fn new_inner(shared: Arc<SharedGenerator>) -> Self {
        Self(shared)
    }

    /// Generate the next cuid.
    ///
    /// The counter is incremented before use, the first cuid of a generator
    /// carries counter 1.
    pub fn next_id(&self) -> String {
        let timestamp = (self.0.timestamp)();
        let counter = self.0.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        let random1 = (self.0.random)();
        let random2 = (self.0.random)();
        let value = render(
            &encode_fixed::<TIMESTAMP_LENGTH>(timestamp),
            counter,
            &self.0.fingerprint,
            random1,
            random2,
        );
        value.iter().map(|&b| char::from(b)).collect()
    }

    /// The fingerprint stamped into every cuid of this generator.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.0.fingerprint
    }
}

/// Returns a new `Generator` referencing the same state as `self`.
/// This is used for concurrent use.
impl Clone for Generator {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("fingerprint", &self.0.fingerprint)
            .field("counter", &self.0.counter.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Seconds since the Unix epoch, zero for clocks set before it.
pub(crate) fn current_timestamp() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Returns the process-wide generator, creating it on first use.
fn global_generator() -> Result<&'static Generator, Error> {
    static GENERATOR: OnceLock<Generator> = OnceLock::new();
    if let Some(generator) = GENERATOR.get() {
        return Ok(generator);
    }
    let generator = Generator::new()?;
    Ok(GENERATOR.get_or_init(|| generator))
}

/// Generate a cuid with the process-wide generator.
///
/// The generator is built on first call with the default sources: wall clock
/// seconds, this host's [`fingerprint`](crate::fingerprint()) and the thread
/// local random number generator. Its counter lives as long as the process.
/// Only that first call can fail, when the host name can not be read.
///
/// ```
/// let id = cuid_me::cuid().unwrap();
/// assert_eq!(id.len(), 23);
/// assert!(id.starts_with('c'));
/// ```
pub fn cuid() -> Result<String, Error> {
    Ok(global_generator()?.next_id())
}

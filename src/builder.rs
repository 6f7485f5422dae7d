use crate::error::{BoxDynError, Error};
use crate::fingerprint::{Fingerprint, fingerprint};
use crate::generator::{Generator, RandomFn, SharedGenerator, TimestampFn, current_timestamp};
use rand::{RngCore, thread_rng};
use std::sync::Arc;
use std::sync::atomic::AtomicU32;
use tracing::debug;

/// A builder for building the ['Generator'].
///
/// [`Generator`]: struct.Generator.html
pub struct Builder<'a> {
    timestamp: Option<Box<TimestampFn>>,
    random: Option<Box<RandomFn>>,
    fingerprint: Option<&'a dyn Fn() -> Result<Fingerprint, BoxDynError>>,
    check_fingerprint: Option<&'a dyn Fn(&Fingerprint) -> bool>,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<'a> Builder<'a> {
    /// Construct a new builder for the build of ['Generator'].
    ///
    /// [`Generator`]: struct.Generator.html
    pub fn new() -> Self {
        Self {
            timestamp: None,
            random: None,
            fingerprint: None,
            check_fingerprint: None,
        }
    }

    /// Set the timestamp source.
    /// Defaults to the wall clock in seconds since the Unix epoch.
    pub fn timestamp<F>(mut self, timestamp: F) -> Self
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        self.timestamp = Some(Box::new(timestamp));
        self
    }

    /// Set the random number source of the two random blocks.
    /// Defaults to the thread local random number generator.
    pub fn random<F>(mut self, random: F) -> Self
    where
        F: Fn() -> u32 + Send + Sync + 'static,
    {
        self.random = Some(Box::new(random));
        self
    }

    /// Set the fingerprint.
    /// If the provided closure returns an error, 'finalize' will fail.
    pub fn fingerprint(
        mut self,
        fingerprint: &'a dyn Fn() -> Result<Fingerprint, BoxDynError>,
    ) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    /// Set up a function to check the fingerprint.
    /// If the function returns 'false', 'finalize' will fail.
    pub fn check_fingerprint(mut self, check_fingerprint: &'a dyn Fn(&Fingerprint) -> bool) -> Self {
        self.check_fingerprint = Some(check_fingerprint);
        self
    }

    /// Finish building and create a Generator instance.
    /// This method will return an error if the fingerprint can not be
    /// obtained or fails its check.
    pub fn finalize(self) -> Result<Generator, Error> {
        let fingerprint = if let Some(fingerprint_fn) = self.fingerprint {
            fingerprint_fn().map_err(Error::FingerprintFailed)?
        } else {
            fingerprint()?
        };

        if let Some(check_fingerprint) = self.check_fingerprint {
            if !check_fingerprint(&fingerprint) {
                return Err(Error::CheckFingerprintFailed);
            }
        }

        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Box::new(current_timestamp) as Box<TimestampFn>);
        let random = self
            .random
            .unwrap_or_else(|| Box::new(|| thread_rng().next_u32()) as Box<RandomFn>);

        debug!(%fingerprint, "cuid generator ready");

        let shared = Arc::new(SharedGenerator {
            fingerprint,
            counter: AtomicU32::new(0),
            timestamp,
            random,
        });
        Ok(Generator::new_inner(shared))
    }
}

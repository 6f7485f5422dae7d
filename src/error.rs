// Copyright 2022 houseme
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::error::Error as StdError;
use thiserror::Error;

/// Convenience type alias for errors returned by user supplied sources.
pub type BoxDynError = Box<dyn StdError + 'static + Send + Sync>;

/// The error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("pad width `{0}` exceeds the base36 buffer capacity of {max}", max = crate::base36::MAX_DIGITS)]
    PadWidthTooLarge(u8),
    #[error("could not read the host name: {0}")]
    HostnameFailed(#[source] std::io::Error),
    #[error("fingerprint returned an error: {0}")]
    FingerprintFailed(#[source] BoxDynError),
    #[error("check_fingerprint returned false")]
    CheckFingerprintFailed,
    #[error("invalid fingerprint `{0}`: expected 4 printable ascii characters")]
    InvalidFingerprint(String),
    #[error("empty base36 string")]
    EmptyBase36,
    #[error("invalid base36 digit `{0}`")]
    InvalidBase36Digit(char),
    #[error("base36 value does not fit in 64 bits")]
    Base36Overflow,
    #[error("invalid cuid length {0}, expected {len}", len = crate::cuid::CUID_LENGTH)]
    InvalidLength(usize),
    #[error("invalid cuid prefix `{0}`, expected `c`")]
    InvalidPrefix(char),
}

use crate::base36::encode_fixed;
use crate::error::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// Number of characters in a fingerprint.
pub const FINGERPRINT_LENGTH: usize = 4;

/// A 4 character discriminator of the generating host and process.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LENGTH]);

impl Fingerprint {
    /// Bind the given bytes as a fingerprint.
    ///
    /// Every byte must be a printable ascii character.
    pub fn new(bytes: [u8; FINGERPRINT_LENGTH]) -> Result<Self, Error> {
        if bytes.iter().all(u8::is_ascii_graphic) {
            Ok(Self(bytes))
        } else {
            Err(Error::InvalidFingerprint(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        }
    }

    /// Compute the fingerprint of a host name and a process id.
    ///
    /// The host name is read as little-endian 32-bit words, the last one
    /// zero padded, and their sum makes the first two base36 characters. The
    /// process id makes the last two.
    pub fn from_parts(host: &[u8], pid: u32) -> Self {
        let sum = host.chunks(4).fold(0u64, |sum, chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            sum.wrapping_add(u64::from(u32::from_le_bytes(word)))
        });

        let mut bytes = [0u8; FINGERPRINT_LENGTH];
        bytes[..2].copy_from_slice(&encode_fixed::<2>(sum));
        bytes[2..].copy_from_slice(&encode_fixed::<2>(u64::from(pid)));
        Self(bytes)
    }

    /// Compute the fingerprint of the running process on this host.
    pub fn from_host() -> Result<Self, Error> {
        let host = hostname::get().map_err(Error::HostnameFailed)?;
        let pid = std::process::id();
        let fingerprint = Self::from_parts(host.as_encoded_bytes(), pid);
        debug!(host = ?host, pid, %fingerprint, "computed host fingerprint");
        Ok(fingerprint)
    }

    /// The fingerprint characters.
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LENGTH] {
        &self.0
    }

    /// The fingerprint as a string slice.
    pub fn as_str(&self) -> &str {
        // ascii by construction
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

/// Returns the fingerprint of this process, computing it on first use.
///
/// Every call within one process returns the same value.
pub fn fingerprint() -> Result<Fingerprint, Error> {
    static FINGERPRINT: OnceLock<Fingerprint> = OnceLock::new();
    if let Some(fingerprint) = FINGERPRINT.get() {
        return Ok(*fingerprint);
    }
    let computed = Fingerprint::from_host()?;
    Ok(*FINGERPRINT.get_or_init(|| computed))
}

impl FromStr for Fingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; FINGERPRINT_LENGTH] = s
            .as_bytes()
            .try_into()
            .map_err(|_| Error::InvalidFingerprint(s.to_owned()))?;
        Self::new(bytes)
    }
}

impl TryFrom<&str> for Fingerprint {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fingerprint").field(&self.as_str()).finish()
    }
}

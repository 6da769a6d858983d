//! Seeds for reproducible piece scattering.

use std::{fmt, str::FromStr};

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use sha2::{Digest as _, Sha256};

/// A 32-byte seed for the scatter RNG.
///
/// Seeds print and parse as 64 lowercase hex characters, so a layout
/// reported in a log or bug report can be replayed exactly.
///
/// # Examples
///
/// ```
/// use snapjig_generator::LayoutSeed;
///
/// let seed: LayoutSeed = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff"
///     .parse()
///     .unwrap();
/// assert_eq!(
///     seed.to_string(),
///     "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutSeed {
    bytes: [u8; 32],
}

impl LayoutSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Draws a fresh seed from OS entropy.
    #[must_use]
    pub fn random() -> Self {
        let mut bytes = [0_u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Builds the scatter RNG keyed by this seed.
    ///
    /// The seed bytes are hashed so that the RNG state depends on all
    /// 32 bytes even though the generator's native seed is shorter.
    #[must_use]
    pub fn rng(&self) -> Pcg64Mcg {
        let digest = Sha256::digest(self.bytes);
        let mut key = [0_u8; 16];
        key.copy_from_slice(&digest[..16]);
        Pcg64Mcg::from_seed(key)
    }
}

impl fmt::Display for LayoutSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error parsing a [`LayoutSeed`] from hex.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseLayoutSeedError {
    /// The input is not exactly 64 characters long.
    #[display("seed must be 64 hex characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    /// The input contains a non-hex character.
    #[display("seed contains a non-hex character")]
    InvalidDigit,
}

impl FromStr for LayoutSeed {
    type Err = ParseLayoutSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 {
            return Err(ParseLayoutSeedError::InvalidLength(s.len()));
        }
        let mut bytes = [0_u8; 32];
        for (i, chunk) in s.as_bytes().chunks_exact(2).enumerate() {
            let pair = str::from_utf8(chunk).map_err(|_| ParseLayoutSeedError::InvalidDigit)?;
            bytes[i] =
                u8::from_str_radix(pair, 16).map_err(|_| ParseLayoutSeedError::InvalidDigit)?;
        }
        Ok(Self { bytes })
    }
}

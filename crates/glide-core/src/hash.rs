//! Content-based hashing for geometry deduplication

use crate::Vec3;
use sha2::{Digest, Sha256};
use std::fmt;

/// A SHA-256 based content hash.
///
/// Used to recognise paths with identical geometry so expensive derived data
/// (like arc-length tables) can be built once and shared.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash a control-point sequence together with a sampling resolution.
    ///
    /// Coordinates are hashed by their exact bit patterns, so `0.0` and `-0.0`
    /// hash differently.
    pub fn from_control_points(points: &[Vec3], resolution: usize) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((resolution as u64).to_le_bytes());
        hasher.update((points.len() as u64).to_le_bytes());
        for p in points {
            hasher.update(p.x.to_bits().to_le_bytes());
            hasher.update(p.y.to_bits().to_le_bytes());
            hasher.update(p.z.to_bits().to_le_bytes());
        }
        Self(hasher.finalize().into())
    }

    /// Get the hash as a hex string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

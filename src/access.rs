//! License Gate - Illustrative access check for the report download
//!
//! Not a real auth control: the gate only decides whether the dashboard
//! offers the dossier download. Candidates are compared by SHA-256 digest
//! rather than raw string equality so the check does not short-circuit on
//! the first differing byte.

use sha2::{Digest, Sha256};

/// Key accepted when no `AETHER_LICENSE_KEY` is configured.
pub const DEFAULT_LICENSE_KEY: &str = "admin123";

/// Shown on the dashboard and in the 403 body while the gate is closed.
pub const LOCKED_MESSAGE: &str = "7-PAGE COMPLIANCE REPORT LOCKED. ENTER LICENSE KEY.";

/// Compares candidate keys against one configured key.
#[derive(Debug, Clone)]
pub struct LicenseGate {
    key_digest: [u8; 32],
}

impl LicenseGate {
    pub fn new(key: &str) -> Self {
        Self {
            key_digest: Sha256::digest(key.as_bytes()).into(),
        }
    }

    /// True iff `candidate` matches the configured key exactly.
    pub fn is_authorized(&self, candidate: &str) -> bool {
        let candidate_digest: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();
        candidate_digest == self.key_digest
    }
}

impl Default for LicenseGate {
    fn default() -> Self {
        Self::new(DEFAULT_LICENSE_KEY)
    }
}

//! Password gate for the admin console.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::ports::CoreError;
use crate::settings::Settings;

/// Proof that the admin password was entered.
///
/// Only [`AdminGate::unlock`] can construct one; every mutating service
/// method takes it by reference.
#[derive(Debug, Clone)]
pub struct AdminSession {
    unlocked_at: DateTime<Utc>,
}

impl AdminSession {
    pub const fn unlocked_at(&self) -> DateTime<Utc> {
        self.unlocked_at
    }
}

/// Checks admin passwords against a configured secret.
///
/// Only the SHA-256 digest of the secret is kept. With no secret configured
/// the gate stays locked.
#[derive(Clone, Default)]
pub struct AdminGate {
    digest: Option<[u8; 32]>,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl AdminGate {
    /// Gate for `password`; `None` or an empty string locks it.
    pub fn new(password: Option<&str>) -> Self {
        Self {
            digest: password.filter(|p| !p.is_empty()).map(digest),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.admin_password.as_deref())
    }

    pub const fn is_configured(&self) -> bool {
        self.digest.is_some()
    }

    /// Exchange a password attempt for a session.
    pub fn unlock(&self, attempt: &str) -> Result<AdminSession, CoreError> {
        let Some(expected) = self.digest else {
            warn!("Admin unlock attempted but no admin password is configured");
            return Err(CoreError::Unauthorized(
                "admin password is not configured".to_string(),
            ));
        };

        if digests_match(&expected, &digest(attempt)) {
            info!("Admin console unlocked");
            Ok(AdminSession {
                unlocked_at: Utc::now(),
            })
        } else {
            warn!("Rejected admin password");
            Err(CoreError::Unauthorized("incorrect password".to_string()))
        }
    }
}

fn digest(secret: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(secret.as_bytes()));
    out
}

// Fixed-length comparison that does not stop at the first mismatch.
fn digests_match(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

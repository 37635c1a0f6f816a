//! Passphrase gate in front of the calculator.
//!
//! This is a placeholder, not authentication: the passphrase is compared as
//! plain text, nothing is hashed or rate limited, and the unlocked flag never
//! expires. It only keeps a casual user on a shared machine out.

use crate::store::{KeyValueStore, SESSION_FLAG_KEY};

/// Passphrase used when none is configured.
pub const DEFAULT_PASSPHRASE: &str = "081234567";

const UNLOCKED: &str = "true";

#[derive(Debug, Clone)]
pub struct AccessGate {
  passphrase: String,
}

impl AccessGate {
  pub fn new(passphrase: impl Into<String>) -> Self {
    Self { passphrase: passphrase.into() }
  }

  /// Exact equality, no normalisation.
  pub fn check(&self, attempt: &str) -> bool { attempt == self.passphrase }

  /// Check `attempt` and, if it matches, record the unlocked flag.
  /// Returns whether the gate opened.
  pub async fn unlock<S: KeyValueStore>(
    &self,
    store: &S,
    attempt: &str,
  ) -> Result<bool, S::Error> {
    if !self.check(attempt) {
      return Ok(false);
    }
    store.set(SESSION_FLAG_KEY, UNLOCKED.to_owned()).await?;
    Ok(true)
  }

  pub async fn lock<S: KeyValueStore>(store: &S) -> Result<(), S::Error> {
    store.remove(SESSION_FLAG_KEY).await
  }

  /// Whether the flag is set. An unreadable store counts as locked.
  pub async fn is_unlocked<S: KeyValueStore>(store: &S) -> bool {
    match store.get(SESSION_FLAG_KEY).await {
      Ok(value) => value.as_deref() == Some(UNLOCKED),
      Err(e) => {
        tracing::warn!(error = %e, "could not read session flag; treating as locked");
        false
      }
    }
  }
}

impl Default for AccessGate {
  fn default() -> Self { Self::new(DEFAULT_PASSPHRASE) }
}

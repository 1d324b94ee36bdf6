//! Access code persistence seam
//!
//! The engine never talks to a database directly. Production wires in a
//! store backed by the site's persistence layer; tests and single-kiosk
//! deployments use [`MemoryAccessCodeStore`].

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared::models::{AccessCode, CodeStatus};
use std::collections::HashMap;
use thiserror::Error;

/// Store-level failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert hit an existing token. The service regenerates and retries.
    #[error("code token already exists")]
    Duplicate,

    #[error("backend error: {0}")]
    Backend(String),
}

/// Persistence operations the engine needs for access codes
pub trait AccessCodeStore: Send + Sync {
    /// Insert a new code. Must fail with [`StoreError::Duplicate`] when
    /// the token is already present.
    fn insert(&self, code: AccessCode) -> Result<(), StoreError>;

    /// Fetch a code by its token
    fn get(&self, token: &str) -> Result<Option<AccessCode>, StoreError>;

    /// Persist an updated code record
    fn save(&self, code: AccessCode) -> Result<(), StoreError>;

    /// Bulk-expire active codes whose expiry is before `now`. Returns the
    /// tokens that were transitioned.
    fn mark_expired_before(&self, now: DateTime<Utc>) -> Result<Vec<String>, StoreError>;
}

/// In-memory store keyed by code token
#[derive(Default)]
pub struct MemoryAccessCodeStore {
    codes: RwLock<HashMap<String, AccessCode>>,
}

impl MemoryAccessCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.codes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.read().is_empty()
    }
}

impl AccessCodeStore for MemoryAccessCodeStore {
    fn insert(&self, code: AccessCode) -> Result<(), StoreError> {
        let mut codes = self.codes.write();
        if codes.contains_key(&code.code) {
            return Err(StoreError::Duplicate);
        }
        codes.insert(code.code.clone(), code);
        Ok(())
    }

    fn get(&self, token: &str) -> Result<Option<AccessCode>, StoreError> {
        Ok(self.codes.read().get(token).cloned())
    }

    fn save(&self, code: AccessCode) -> Result<(), StoreError> {
        let mut codes = self.codes.write();
        if !codes.contains_key(&code.code) {
            return Err(StoreError::Backend(format!(
                "cannot save unknown code {}",
                code.code
            )));
        }
        codes.insert(code.code.clone(), code);
        Ok(())
    }

    fn mark_expired_before(&self, now: DateTime<Utc>) -> Result<Vec<String>, StoreError> {
        let mut codes = self.codes.write();
        let mut swept = Vec::new();
        for code in codes.values_mut() {
            if code.status == CodeStatus::Active && code.expires_at < now {
                code.status = CodeStatus::Expired;
                swept.push(code.code.clone());
            }
        }
        Ok(swept)
    }
}

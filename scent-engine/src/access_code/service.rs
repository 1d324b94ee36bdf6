//! Access code service
//!
//! Owns the code state machine. Redemption is a read-modify-write, so a
//! service-level lock serializes it; the store only needs to be
//! internally consistent, not transactional.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use shared::models::{AccessCode, AccessCodeCreate, CodeStatus, RedemptionResult};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::generator::generate_code_token;
use super::storage::{AccessCodeStore, StoreError};
use super::CodeError;
use crate::audit::{AuditAction, AuditEntry, AuditSink, TracingAuditSink};
use crate::config::EngineConfig;

pub struct AccessCodeService<S: AccessCodeStore> {
    store: S,
    config: EngineConfig,
    audit: Arc<dyn AuditSink>,
    // Serializes redeem's check-then-increment across stations
    redeem_lock: Mutex<()>,
}

impl<S: AccessCodeStore> AccessCodeService<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self::with_audit(store, config, Arc::new(TracingAuditSink))
    }

    pub fn with_audit(store: S, config: EngineConfig, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            store,
            config,
            audit,
            redeem_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ==================== Generation ====================

    /// Generate and persist a new access code from a booking payload
    ///
    /// Retries with a fresh token on collision, up to the configured
    /// attempt cap.
    pub fn generate(&self, req: &AccessCodeCreate) -> Result<AccessCode, CodeError> {
        req.validate()
            .map_err(|e| CodeError::Validation(e.to_string()))?;
        let tier = req
            .bottle_tier
            .ok_or_else(|| CodeError::Validation("bottle_tier is required".to_string()))?;

        let now = Utc::now();
        let validity = req
            .validity
            .and_then(|v| v.duration())
            .unwrap_or_else(|| Duration::hours(self.config.default_validity_hours));

        let attempts = self.config.max_generate_attempts.max(1);
        for attempt in 1..=attempts {
            let code = AccessCode {
                id: shared::util::snowflake_id(),
                code: generate_code_token(tier),
                bottle_tier: tier,
                booking_code: req.booking_code.clone(),
                booking_from: req.booking_from.clone(),
                booking_price: req.booking_price,
                created_at: now,
                expires_at: now + validity,
                usage_count: 0,
                max_usage: req.max_usage.unwrap_or(1),
                last_used_at: None,
                status: CodeStatus::Active,
            };

            match self.store.insert(code.clone()) {
                Ok(()) => {
                    info!(code = %code.code, tier = %tier, expires_at = %code.expires_at, "access code generated");
                    self.audit.record(
                        AuditEntry::new(AuditAction::CodeGenerated)
                            .code(&code.code)
                            .tier(tier)
                            .details(serde_json::json!({
                                "max_usage": code.max_usage,
                                "expires_at": code.expires_at,
                                "booking_code": code.booking_code,
                            })),
                    );
                    return Ok(code);
                }
                Err(StoreError::Duplicate) => {
                    warn!(attempt, "code token collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(CodeError::Generation(attempts))
    }

    // ==================== Verification ====================

    /// Check a code without consuming a use
    ///
    /// Recomputes the status from the clock and usage counters; stale
    /// statuses are corrected and persisted as a side effect.
    pub fn verify(&self, token: &str) -> Result<AccessCode, CodeError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AccessCode, CodeError> {
        let mut code = self
            .store
            .get(token)?
            .ok_or_else(|| CodeError::NotFound(token.to_string()))?;

        match code.status {
            CodeStatus::Used => return Err(CodeError::AlreadyUsed),
            CodeStatus::Exhausted => return Err(CodeError::Exhausted),
            CodeStatus::Expired => return Err(CodeError::Expired),
            CodeStatus::Active => {}
        }

        if code.is_expired(now) {
            code.status = CodeStatus::Expired;
            self.store.save(code)?;
            return Err(CodeError::Expired);
        }
        if code.usage_count >= code.max_usage {
            code.status = CodeStatus::Exhausted;
            self.store.save(code)?;
            return Err(CodeError::Exhausted);
        }

        Ok(code)
    }

    // ==================== Redemption ====================

    /// Redeem one use of a code at a bottling station
    pub fn redeem(&self, token: &str) -> Result<RedemptionResult, CodeError> {
        self.redeem_at(token, Utc::now())
    }

    pub fn redeem_at(&self, token: &str, now: DateTime<Utc>) -> Result<RedemptionResult, CodeError> {
        let _guard = self.redeem_lock.lock();

        let mut code = self.verify_at(token, now)?;
        code.usage_count += 1;
        code.last_used_at = Some(now);
        let exhausted = code.usage_count >= code.max_usage;
        if exhausted {
            code.status = CodeStatus::Exhausted;
        }
        self.store.save(code.clone())?;

        info!(
            code = %code.code,
            usage = code.usage_count,
            max = code.max_usage,
            exhausted,
            "access code redeemed"
        );
        self.audit.record(
            AuditEntry::new(AuditAction::CodeRedeemed)
                .code(&code.code)
                .tier(code.bottle_tier)
                .details(serde_json::json!({
                    "usage_count": code.usage_count,
                    "remaining_uses": code.remaining_uses(),
                    "exhausted": exhausted,
                })),
        );

        Ok(RedemptionResult {
            redemption_id: Uuid::new_v4(),
            code: code.code.clone(),
            bottle_tier: code.bottle_tier,
            usage_count: code.usage_count,
            remaining_uses: code.remaining_uses(),
            exhausted,
            redeemed_at: now,
        })
    }

    // ==================== Back office ====================

    /// Force a code into the legacy `used` terminal state
    ///
    /// Back-office action only; `redeem` never sets this state.
    pub fn mark_as_used(&self, token: &str) -> Result<AccessCode, CodeError> {
        let mut code = self
            .store
            .get(token)?
            .ok_or_else(|| CodeError::NotFound(token.to_string()))?;

        if code.status != CodeStatus::Active {
            return Err(CodeError::WrongState(code.status));
        }

        code.status = CodeStatus::Used;
        code.last_used_at = Some(Utc::now());
        self.store.save(code.clone())?;

        info!(code = %code.code, "access code marked as used");
        self.audit.record(
            AuditEntry::new(AuditAction::CodeMarkedUsed)
                .code(&code.code)
                .tier(code.bottle_tier),
        );

        Ok(code)
    }

    /// Bulk-expire active codes past their expiry. Returns the number of
    /// codes transitioned.
    pub fn sweep_expired(&self) -> Result<usize, CodeError> {
        self.sweep_expired_at(Utc::now())
    }

    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> Result<usize, CodeError> {
        let swept = self.store.mark_expired_before(now)?;
        if !swept.is_empty() {
            info!(count = swept.len(), "expired access codes swept");
            self.audit.record(
                AuditEntry::new(AuditAction::CodeExpiredSweep)
                    .details(serde_json::json!({ "count": swept.len(), "codes": swept })),
            );
        }
        Ok(swept.len())
    }
}

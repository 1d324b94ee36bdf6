//! Audit trail for access code operations
//!
//! Every state-changing code operation emits an entry so the back office
//! can reconcile bookings against bottlings. Sinks are pluggable; the
//! default forwards to tracing, tests capture entries in memory.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::models::BottleTier;
use tracing::info;
use uuid::Uuid;

/// Auditable access code actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    CodeGenerated,
    CodeRedeemed,
    CodeExpiredSweep,
    CodeMarkedUsed,
}

impl AuditAction {
    pub const fn name(self) -> &'static str {
        match self {
            Self::CodeGenerated => "code_generated",
            Self::CodeRedeemed => "code_redeemed",
            Self::CodeExpiredSweep => "code_expired_sweep",
            Self::CodeMarkedUsed => "code_marked_used",
        }
    }
}

/// One audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    /// Code token, absent for bulk actions
    pub code: Option<String>,
    pub bottle_tier: Option<BottleTier>,
    /// Action-specific context (usage counts, sweep totals, booking data)
    pub details: serde_json::Value,
}

impl AuditEntry {
    pub fn new(action: AuditAction) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            action,
            code: None,
            bottle_tier: None,
            details: serde_json::Value::Null,
        }
    }

    pub fn code(mut self, token: impl Into<String>) -> Self {
        self.code = Some(token.into());
        self
    }

    pub fn tier(mut self, tier: BottleTier) -> Self {
        self.bottle_tier = Some(tier);
        self
    }

    pub fn details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}

/// Destination for audit entries
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: AuditEntry);
}

/// Default sink: structured log lines via tracing
#[derive(Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, entry: AuditEntry) {
        info!(
            audit_id = %entry.id,
            action = entry.action.name(),
            code = entry.code.as_deref().unwrap_or("-"),
            details = %entry.details,
            "audit"
        );
    }
}

/// Capturing sink for tests
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: RwLock<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().clone()
    }

    pub fn count_of(&self, action: AuditAction) -> usize {
        self.entries.read().iter().filter(|e| e.action == action).count()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: AuditEntry) {
        self.entries.write().push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_captures_entries() {
        let sink = MemoryAuditSink::new();
        sink.record(
            AuditEntry::new(AuditAction::CodeGenerated)
                .code("AAA-BBB-123-030")
                .tier(BottleTier::Ml30),
        );
        sink.record(AuditEntry::new(AuditAction::CodeExpiredSweep));

        assert_eq!(sink.entries().len(), 2);
        assert_eq!(sink.count_of(AuditAction::CodeGenerated), 1);
        let first = &sink.entries()[0];
        assert_eq!(first.code.as_deref(), Some("AAA-BBB-123-030"));
        assert_eq!(first.bottle_tier, Some(BottleTier::Ml30));
    }

    #[test]
    fn test_entry_serializes_action_snake_case() {
        let entry = AuditEntry::new(AuditAction::CodeRedeemed);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"code_redeemed\""));
    }
}

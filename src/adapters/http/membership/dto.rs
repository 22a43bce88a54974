//! HTTP DTOs (Data Transfer Objects) for registry endpoints.
//!
//! These types define the JSON request/response structure of the API.
//! Token amounts are rendered as decimal strings of base units.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{
    QuoteExitFeeResult, RecordEntryResult, RegisterUserResult, SettleExitFeeResult,
};
use crate::domain::foundation::Timestamp;
use crate::domain::membership::{FeeSchedule, MemberRecord};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to register under a parking number.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub parking_number: u64,
}

/// Request to authenticate against a parking number.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateRequest {
    pub parking_number: u64,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Member record as exposed over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    pub account: String,
    pub parking_number: u64,
    pub registered_at: Timestamp,
    pub entry_timestamp: Option<Timestamp>,
    pub last_settled_at: Option<Timestamp>,
}

impl From<MemberRecord> for MemberResponse {
    fn from(record: MemberRecord) -> Self {
        Self {
            account: record.account.to_string(),
            parking_number: record.parking_number.value(),
            registered_at: record.registered_at,
            entry_timestamp: record.entry_timestamp,
            last_settled_at: record.last_settled_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub member: MemberResponse,
    pub fee_paid: String,
    /// Parking number replaced by this registration, if any.
    pub replaced: Option<u64>,
}

impl From<RegisterUserResult> for RegisterResponse {
    fn from(result: RegisterUserResult) -> Self {
        Self {
            fee_paid: result.fee_paid.to_string(),
            replaced: result.event.replaced.map(|n| n.value()),
            member: MemberResponse::from(result.record),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipStatusResponse {
    pub registered: bool,
    pub member: Option<MemberResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub authenticated: bool,
}

/// Registry-wide membership counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipStatsResponse {
    pub registered_members: u64,
}

/// Open entry, as RFC 3339 and as unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryResponse {
    pub entered_at: Option<Timestamp>,
    pub entered_at_unix: Option<i64>,
}

impl From<Option<Timestamp>> for EntryResponse {
    fn from(entered_at: Option<Timestamp>) -> Self {
        Self {
            entered_at,
            entered_at_unix: entered_at.map(|t| t.as_unix_secs()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntryResponse {
    pub entered_at: Timestamp,
    pub entered_at_unix: i64,
    pub previous_entry: Option<Timestamp>,
}

impl From<RecordEntryResult> for RecordEntryResponse {
    fn from(result: RecordEntryResult) -> Self {
        Self {
            entered_at: result.entered_at,
            entered_at_unix: result.entered_at.as_unix_secs(),
            previous_entry: result.previous_entry,
        }
    }
}

/// Exit fee preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeQuoteResponse {
    pub entered_at: Timestamp,
    pub quoted_at: Timestamp,
    pub duration_secs: u64,
    pub billable_secs: u64,
    pub intervals: u64,
    pub fee: String,
}

impl From<QuoteExitFeeResult> for FeeQuoteResponse {
    fn from(result: QuoteExitFeeResult) -> Self {
        Self {
            entered_at: result.entered_at,
            quoted_at: result.quoted_at,
            duration_secs: result.quote.duration_secs,
            billable_secs: result.quote.billable_secs,
            intervals: result.quote.intervals,
            fee: result.quote.fee.to_string(),
        }
    }
}

/// Outcome of an exit fee settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResponse {
    pub entered_at: Timestamp,
    pub settled_at: Timestamp,
    pub duration_secs: u64,
    pub intervals: u64,
    pub fee_paid: String,
    /// False when the entry is retained for further billing.
    pub entry_cleared: bool,
}

impl From<SettleExitFeeResult> for SettlementResponse {
    fn from(result: SettleExitFeeResult) -> Self {
        Self {
            entered_at: result.entered_at,
            settled_at: result.settled_at,
            duration_secs: result.quote.duration_secs,
            intervals: result.quote.intervals,
            fee_paid: result.quote.fee.to_string(),
            entry_cleared: result.record.entry().is_none(),
        }
    }
}

/// Published fee parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeScheduleResponse {
    pub registry_account: String,
    pub membership_fee: String,
    pub grace_period_secs: u64,
    pub interval_secs: u64,
    pub rate_per_interval: String,
}

impl FeeScheduleResponse {
    pub fn new(registry_account: &str, schedule: &FeeSchedule) -> Self {
        Self {
            registry_account: registry_account.to_string(),
            membership_fee: schedule.membership_fee().to_string(),
            grace_period_secs: schedule.grace_period_secs(),
            interval_secs: schedule.interval_secs(),
            rate_per_interval: schedule.rate_per_interval().to_string(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

//! HTTP handlers for registry endpoints.
//!
//! These handlers connect Axum routes to the `MembershipRegistry`.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Json, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::MembershipRegistry;
use crate::domain::foundation::AccountId;
use crate::domain::membership::MembershipError;

use super::dto::{
    AuthenticateRequest, AuthenticateResponse, EntryResponse, ErrorResponse, FeeQuoteResponse,
    FeeScheduleResponse, MemberResponse, MembershipStatsResponse, MembershipStatusResponse,
    RecordEntryResponse, RegisterRequest, RegisterResponse, SettlementResponse,
};

/// Header carrying the caller's account.
pub const ACCOUNT_HEADER: &str = "X-Account-Id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state.
#[derive(Clone)]
pub struct RegistryAppState {
    pub registry: Arc<MembershipRegistry>,
}

impl RegistryAppState {
    pub fn new(registry: Arc<MembershipRegistry>) -> Self {
        Self { registry }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Caller Context
// ════════════════════════════════════════════════════════════════════════════════

/// Account making the request, taken from the `X-Account-Id` header.
///
/// Identity is asserted by whatever sits in front of this service.
#[derive(Debug, Clone)]
pub struct Caller {
    pub account: AccountId,
}

/// Rejection type for Caller extraction.
pub struct CallerRequired;

impl IntoResponse for CallerRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new(
            "AUTHENTICATION_REQUIRED",
            format!("Header {} is required", ACCOUNT_HEADER),
        );
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = CallerRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account = parts
            .headers
            .get(ACCOUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| AccountId::new(s).ok())
            .ok_or(CallerRequired)?;

        Ok(Caller { account })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/membership/me - Caller's membership status
pub async fn get_membership(
    State(state): State<RegistryAppState>,
    caller: Caller,
) -> Result<impl IntoResponse, RegistryApiError> {
    let result = state.registry.member(caller.account).await?;

    Ok(Json(MembershipStatusResponse {
        registered: result.is_registered,
        member: result.member.map(MemberResponse::from),
    }))
}

/// GET /api/membership/stats - Number of registered members
pub async fn get_membership_stats(
    State(state): State<RegistryAppState>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let registered_members = state.registry.member_count().await?;
    Ok(Json(MembershipStatsResponse { registered_members }))
}

/// POST /api/membership/authenticate - Match the stored parking number
pub async fn authenticate(
    State(state): State<RegistryAppState>,
    caller: Caller,
    Json(request): Json<AuthenticateRequest>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let authenticated = state
        .registry
        .authenticate_user(caller.account, request.parking_number)
        .await?;

    Ok(Json(AuthenticateResponse { authenticated }))
}

/// GET /api/parking/entry - Caller's open entry, if any
pub async fn get_entry(
    State(state): State<RegistryAppState>,
    caller: Caller,
) -> Result<impl IntoResponse, RegistryApiError> {
    let entered_at = state.registry.get_entry(caller.account).await?;
    Ok(Json(EntryResponse::from(entered_at)))
}

/// GET /api/parking/exit/quote - Fee if the caller settled now
pub async fn quote_exit_fee(
    State(state): State<RegistryAppState>,
    caller: Caller,
) -> Result<impl IntoResponse, RegistryApiError> {
    let result = state.registry.quote_exit_fee(caller.account).await?;
    Ok(Json(FeeQuoteResponse::from(result)))
}

/// GET /api/parking/fees - Published fee schedule
pub async fn get_fee_schedule(State(state): State<RegistryAppState>) -> impl IntoResponse {
    let registry = &state.registry;
    Json(FeeScheduleResponse::new(
        registry.registry_account().as_str(),
        registry.fee_schedule(),
    ))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/membership/register - Pay the membership fee and register
pub async fn register(
    State(state): State<RegistryAppState>,
    caller: Caller,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, RegistryApiError> {
    let result = state
        .registry
        .register_user(caller.account, request.parking_number)
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse::from(result))))
}

/// POST /api/parking/entry - Record entry at the current time
pub async fn record_entry(
    State(state): State<RegistryAppState>,
    caller: Caller,
) -> Result<impl IntoResponse, RegistryApiError> {
    let result = state.registry.record_entry(caller.account).await?;

    Ok(Json(RecordEntryResponse::from(result)))
}

/// POST /api/parking/exit - Pay the exit fee
pub async fn settle_exit_fee(
    State(state): State<RegistryAppState>,
    caller: Caller,
) -> Result<impl IntoResponse, RegistryApiError> {
    let result = state.registry.settle_exit_fee(caller.account).await?;
    Ok(Json(SettlementResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct RegistryApiError(MembershipError);

impl From<MembershipError> for RegistryApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RegistryApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            MembershipError::AlreadyRegistered(_) => StatusCode::CONFLICT,
            MembershipError::NotRegistered(_) => StatusCode::NOT_FOUND,
            MembershipError::NoActiveEntry(_) => StatusCode::CONFLICT,
            // Ledger outages are retryable; shortfalls need the payer to act.
            MembershipError::PaymentFailed { .. } if self.0.is_retryable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            MembershipError::PaymentFailed { .. } => StatusCode::PAYMENT_REQUIRED,
            MembershipError::FeeOverflow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            MembershipError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            MembershipError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let error_code = self.0.code().to_string();
        let message = self.0.message();
        let body = match &self.0 {
            MembershipError::ValidationFailed { field, .. } => ErrorResponse::with_details(
                error_code,
                message,
                serde_json::json!({ "field": field }),
            ),
            MembershipError::PaymentFailed { kind, .. } => ErrorResponse::with_details(
                error_code,
                message,
                serde_json::json!({ "kind": kind.to_string() }),
            ),
            _ => ErrorResponse::new(error_code, message),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::PaymentFailureKind;

    fn status_of(err: MembershipError) -> StatusCode {
        RegistryApiError::from(err).into_response().status()
    }

    fn alice() -> AccountId {
        AccountId::new("alice").unwrap()
    }

    #[test]
    fn error_statuses() {
        assert_eq!(
            status_of(MembershipError::already_registered(alice())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(MembershipError::not_registered(alice())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(MembershipError::no_active_entry(alice())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(MembershipError::payment_failed(
                PaymentFailureKind::InsufficientAllowance,
                "short"
            )),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            status_of(MembershipError::payment_failed(
                PaymentFailureKind::Other,
                "ledger unreachable"
            )),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(MembershipError::FeeOverflow { intervals: 1 }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(MembershipError::validation("parking_number", "zero")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(MembershipError::infrastructure("down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn caller_is_read_from_header() {
        let request = axum::http::Request::builder()
            .header(ACCOUNT_HEADER, "alice")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let caller = Caller::from_request_parts(&mut parts, &()).await.ok().unwrap();
        assert_eq!(caller.account, alice());
    }

    #[tokio::test]
    async fn blank_caller_is_rejected() {
        let request = axum::http::Request::builder()
            .header(ACCOUNT_HEADER, "   ")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let rejection = Caller::from_request_parts(&mut parts, &()).await.err().unwrap();
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}

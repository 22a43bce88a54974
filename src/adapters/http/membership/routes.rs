//! Axum router configuration for registry endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    authenticate, get_entry, get_fee_schedule, get_membership, get_membership_stats,
    quote_exit_fee, record_entry, register, settle_exit_fee, RegistryAppState,
};

/// Membership routes, mounted at `/api/membership`.
///
/// - `POST /register` - Pay the membership fee and register
/// - `GET /me` - Caller's membership status
/// - `POST /authenticate` - Match the stored parking number
/// - `GET /stats` - Number of registered members
pub fn membership_routes() -> Router<RegistryAppState> {
    Router::new()
        .route("/register", post(register))
        .route("/me", get(get_membership))
        .route("/authenticate", post(authenticate))
        .route("/stats", get(get_membership_stats))
}

/// Parking routes, mounted at `/api/parking`.
///
/// - `POST /entry` / `GET /entry` - Record or read the entry time
/// - `GET /exit/quote` - Preview the exit fee
/// - `POST /exit` - Pay the exit fee
/// - `GET /fees` - Published fee schedule
pub fn parking_routes() -> Router<RegistryAppState> {
    Router::new()
        .route("/entry", post(record_entry).get(get_entry))
        .route("/exit/quote", get(quote_exit_fee))
        .route("/exit", post(settle_exit_fee))
        .route("/fees", get(get_fee_schedule))
}

/// Complete API router with request tracing.
///
/// # Example
///
/// ```ignore
/// let state = RegistryAppState::new(Arc::new(registry));
/// let app = api_router(state);
/// axum::serve(listener, app).await?;
/// ```
pub fn api_router(state: RegistryAppState) -> Router {
    Router::new()
        .nest("/api/membership", membership_routes())
        .nest("/api/parking", parking_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

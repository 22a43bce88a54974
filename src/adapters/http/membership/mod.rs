//! HTTP adapter for registry endpoints.
//!
//! - `POST /api/membership/register` - Register with a parking number
//! - `GET /api/membership/me` - Membership status
//! - `POST /api/membership/authenticate` - Authenticate a parking number
//! - `GET /api/membership/stats` - Registered member count
//! - `POST /api/parking/entry` - Record entry
//! - `GET /api/parking/entry` - Read entry
//! - `GET /api/parking/exit/quote` - Preview the exit fee
//! - `POST /api/parking/exit` - Settle the exit fee
//! - `GET /api/parking/fees` - Fee schedule

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{Caller, RegistryApiError, RegistryAppState, ACCOUNT_HEADER};
pub use routes::{api_router, membership_routes, parking_routes};

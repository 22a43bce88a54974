//! AuthenticateUserHandler - Query handler for parking-number authentication.

use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::AccountId;
use crate::domain::membership::MembershipError;
use crate::ports::MemberRepository;

/// Query whether the caller's stored parking number matches.
#[derive(Debug, Clone)]
pub struct AuthenticateUserQuery {
    pub caller: AccountId,
    pub parking_number: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticateUserResult {
    pub authenticated: bool,
}

/// Handler for authentication.
///
/// A mismatch, an unknown caller or a zero number is `false`, never an error.
pub struct AuthenticateUserHandler {
    repository: Arc<dyn MemberRepository>,
}

impl AuthenticateUserHandler {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: AuthenticateUserQuery,
    ) -> Result<AuthenticateUserResult, MembershipError> {
        let authenticated = self
            .repository
            .find_by_account(&query.caller)
            .await?
            .is_some_and(|record| record.authenticates(query.parking_number));

        debug!(account = %query.caller, authenticated, "Authentication checked");
        Ok(AuthenticateUserResult { authenticated })
    }
}

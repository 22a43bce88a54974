//! CheckUserHandler - Query handler for membership status.

use std::sync::Arc;

use crate::domain::foundation::AccountId;
use crate::domain::membership::{MemberRecord, MembershipError};
use crate::ports::MemberRepository;

/// Query whether the caller is a member.
#[derive(Debug, Clone)]
pub struct CheckUserQuery {
    pub caller: AccountId,
}

/// Membership status of the caller.
#[derive(Debug, Clone)]
pub struct CheckUserResult {
    pub is_registered: bool,
    pub member: Option<MemberRecord>,
}

/// Handler for membership status queries.
pub struct CheckUserHandler {
    repository: Arc<dyn MemberRepository>,
}

impl CheckUserHandler {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: CheckUserQuery) -> Result<CheckUserResult, MembershipError> {
        let member = self.repository.find_by_account(&query.caller).await?;
        Ok(CheckUserResult {
            is_registered: member.as_ref().is_some_and(MemberRecord::is_registered),
            member,
        })
    }
}

//! Fee collection and event publishing shared by the membership handlers.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::foundation::{AccountId, DomainEvent, EventEnvelope, TokenAmount};
use crate::domain::membership::MembershipError;
use crate::ports::{EventPublisher, PaymentToken};

/// Pulls `amount` from `payer` into the registry account.
///
/// A zero amount is not sent to the token at all.
pub(super) async fn collect_fee(
    token: &dyn PaymentToken,
    registry: &AccountId,
    payer: &AccountId,
    amount: TokenAmount,
) -> Result<(), MembershipError> {
    if amount.is_zero() {
        return Ok(());
    }
    token.transfer_from(registry, payer, registry, amount).await?;
    info!(account = %payer, amount = %amount, "Fee collected");
    Ok(())
}

/// Returns a collected fee after the follow-up write failed.
///
/// A failed refund is logged; the caller still gets the original error.
pub(super) async fn refund_fee(
    token: &dyn PaymentToken,
    registry: &AccountId,
    payer: &AccountId,
    amount: TokenAmount,
) {
    if amount.is_zero() {
        return;
    }
    match token.transfer(registry, payer, amount).await {
        Ok(()) => warn!(account = %payer, amount = %amount, "Fee refunded after failed write"),
        Err(e) => error!(
            account = %payer,
            amount = %amount,
            error = %e,
            "Refund failed; fee retained by registry"
        ),
    }
}

/// Publishes an event for an already committed change.
///
/// Failures are logged and swallowed.
pub(super) async fn publish_event<E>(publisher: &dyn EventPublisher, event: &E, account: &AccountId)
where
    E: DomainEvent + Serialize,
{
    let envelope = match EventEnvelope::from_event(event) {
        Ok(envelope) => envelope.with_account(account.as_str()),
        Err(e) => {
            warn!(event_type = event.event_type(), error = %e, "Event serialization failed");
            return;
        }
    };

    if let Err(e) = publisher.publish(envelope).await {
        warn!(event_type = event.event_type(), error = %e, "Event publish failed");
    }
}

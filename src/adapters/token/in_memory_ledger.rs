//! In-memory fee token.
//!
//! An ERC-20 style ledger held in process memory: balances, allowances,
//! an owner-gated mint, approve and transfer-on-behalf. Used for
//! development and tests in place of a real token.
//!
//! # Semantics
//!
//! - Allowance is checked before balance; a failed transfer changes nothing
//! - A zero-amount transfer always succeeds and touches nothing
//! - An allowance of `TokenAmount::MAX` is treated as unlimited and never decremented

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::foundation::{AccountId, TokenAmount};
use crate::ports::{PaymentToken, TokenError};

#[derive(Debug, Default)]
struct Ledger {
    balances: HashMap<AccountId, TokenAmount>,
    allowances: HashMap<(AccountId, AccountId), TokenAmount>,
    total_supply: TokenAmount,
}

impl Ledger {
    fn balance(&self, account: &AccountId) -> TokenAmount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> TokenAmount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or_default()
    }

    /// Moves `amount` between accounts after checking both sides.
    fn move_balance(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        let from_balance = self.balance(from);
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            })?;

        if from == to {
            return Ok(());
        }

        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.insert(from.clone(), remaining);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}

/// In-memory fee token with a single minter.
#[derive(Debug, Clone)]
pub struct InMemoryFeeToken {
    minter: AccountId,
    symbol: String,
    decimals: u8,
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryFeeToken {
    /// Creates an empty ledger. Only `minter` may create supply.
    pub fn new(minter: AccountId, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            minter,
            symbol: symbol.into(),
            decimals,
            ledger: Arc::new(RwLock::new(Ledger::default())),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Whether `caller` holds the mint capability.
    pub fn is_minter(&self, caller: &AccountId) -> bool {
        *caller == self.minter
    }

    /// Creates `amount` new tokens in `to`'s balance.
    ///
    /// # Errors
    ///
    /// - `NotMinter` if `caller` is not the minter
    /// - `Overflow` if the supply or balance would exceed the token range
    pub async fn mint(
        &self,
        caller: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        if !self.is_minter(caller) {
            return Err(TokenError::NotMinter(caller.clone()));
        }

        let mut ledger = self.ledger.write().await;
        let supply = ledger
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = ledger
            .balance(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        ledger.total_supply = supply;
        ledger.balances.insert(to.clone(), balance);
        debug!(to = %to, amount = %amount, symbol = %self.symbol, "Minted tokens");
        Ok(())
    }

    /// Sets the amount `spender` may pull from `owner`, replacing any previous value.
    pub async fn approve(&self, owner: &AccountId, spender: &AccountId, amount: TokenAmount) {
        let mut ledger = self.ledger.write().await;
        ledger
            .allowances
            .insert((owner.clone(), spender.clone()), amount);
        debug!(owner = %owner, spender = %spender, amount = %amount, "Allowance set");
    }

    pub async fn total_supply(&self) -> TokenAmount {
        self.ledger.read().await.total_supply
    }
}

#[async_trait]
impl PaymentToken for InMemoryFeeToken {
    async fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        if amount.is_zero() {
            return Ok(());
        }

        let mut ledger = self.ledger.write().await;
        let allowed = ledger.allowance(from, spender);
        if allowed < amount {
            return Err(TokenError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }

        ledger.move_balance(from, to, amount)?;

        if allowed != TokenAmount::MAX {
            let remaining = allowed.checked_sub(amount).unwrap_or_default();
            ledger
                .allowances
                .insert((from.clone(), spender.clone()), remaining);
        }

        debug!(spender = %spender, from = %from, to = %to, amount = %amount, "transfer_from");
        Ok(())
    }

    async fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        if amount.is_zero() {
            return Ok(());
        }

        self.ledger.write().await.move_balance(from, to, amount)?;
        debug!(from = %from, to = %to, amount = %amount, "transfer");
        Ok(())
    }

    async fn balance_of(&self, account: &AccountId) -> Result<TokenAmount, TokenError> {
        Ok(self.ledger.read().await.balance(account))
    }

    async fn allowance(
        &self,
        owner: &AccountId,
        spender: &AccountId,
    ) -> Result<TokenAmount, TokenError> {
        Ok(self.ledger.read().await.allowance(owner, spender))
    }
}

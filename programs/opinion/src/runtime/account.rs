use crate::error::{LedgerError, OpinionError};
use anchor_lang::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountState {
    // --- Balance ---
    pub balance: u64,                 // Native balance in the smallest unit.
    pub holdings: BTreeMap<u64, u64>, // Asset id -> held amount, one entry per opt-in.

    // --- Participation ---
    pub online: bool,     // Whether the account is registered as an online validator.
    pub first_round: u64, // The round in which the account was first funded.
}

impl AccountState {
    pub fn new(round: u64) -> Self {
        Self {
            first_round: round,
            ..Self::default()
        }
    }

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(OpinionError::ArithmeticOverflow)?;

        Ok(())
    }

    pub fn debit(&mut self, amount: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds)?;

        Ok(())
    }

    pub fn is_opted_in(&self, asset_id: u64) -> bool {
        self.holdings.contains_key(&asset_id)
    }

    /// An empty account carries no balance requirement.
    pub fn is_empty(&self) -> bool {
        self.balance == 0 && self.holdings.is_empty()
    }
}

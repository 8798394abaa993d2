use crate::{constants::*, error::OpinionError, runtime::KeyValueStore};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct OpinionState {
    // --- Lifecycle ---
    pub initialized: bool, // Set exactly once by initialize.
    pub finalized: bool,   // Set exactly once by finalize; terminal.

    // --- Timing ---
    pub start_round: u64, // The round in which the opinion was initialized.
    pub end_round: u64,   // The last round in which signing is accepted. Only ever raised.

    // --- Signature Asset ---
    pub asa_id: u64, // The zero-supply asset whose holders are the signers.
}

impl OpinionState {
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            initialized: store.get_uint(KEY_INITIALIZED).unwrap_or(0) != 0,
            finalized: store.get_uint(KEY_FINALIZED).unwrap_or(0) != 0,
            start_round: store.get_uint(KEY_START_ROUND).unwrap_or(0),
            end_round: store.get_uint(KEY_END_ROUND).unwrap_or(0),
            asa_id: store.get_uint(KEY_ASA_ID).unwrap_or(0),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.put_uint(KEY_INITIALIZED, self.initialized as u64);
        store.put_uint(KEY_FINALIZED, self.finalized as u64);
        store.put_uint(KEY_START_ROUND, self.start_round);
        store.put_uint(KEY_END_ROUND, self.end_round);
        store.put_uint(KEY_ASA_ID, self.asa_id);
    }

    pub fn status(&self, round: u64) -> OpinionStatus {
        if !self.initialized {
            OpinionStatus::Uninitialized
        } else if self.finalized {
            OpinionStatus::Finalized
        } else if round <= self.end_round {
            OpinionStatus::Active
        } else {
            OpinionStatus::Expired
        }
    }

    pub fn require_initialized(&self) -> Result<()> {
        require!(self.initialized, OpinionError::NotInitialized);

        Ok(())
    }

    pub fn require_not_finalized(&self) -> Result<()> {
        require!(!self.finalized, OpinionError::AlreadyFinalized);

        Ok(())
    }
}

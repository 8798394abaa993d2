use crate::{
    error::OpinionError,
    events::*,
    instructions::load_author,
    runtime::CallContext,
    state::*,
    utils::*,
};
use anchor_lang::prelude::*;

pub struct Finalize {
    pub signer: Pubkey,
    pub author: Option<Pubkey>,
    pub state: OpinionState,
    pub round: u64,
}

impl Finalize {
    pub fn load(ctx: &CallContext) -> Result<Self> {
        let state = OpinionState::load(ctx.globals()?);

        Ok(Self {
            signer: ctx.sender,
            author: load_author(ctx, &state)?,
            state,
            round: ctx.round(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.state.require_initialized()?;

        require!(
            self.round > self.state.end_round,
            OpinionError::NotYetExpired
        );

        self.state.require_not_finalized()?;

        Ok(())
    }
}

/// Freezes the Signature Asset, marks the opinion finalized and pays the
/// caller whatever the instance holds above its minimum balance.
pub fn handler(ctx: &mut CallContext) -> Result<()> {
    // validate
    let accounts = Finalize::load(ctx)?;
    accounts.validate()?;

    // drop the manager; the reserve keeps recording the author
    let mut state = accounts.state;
    ctx.inner_asset_config(state.asa_id, None, accounts.author)?;

    // set fields
    state.finalized = true;
    state.save(ctx.globals_mut()?);

    // pay out reward
    let reward = calculate_reward(ctx.app_balance(), ctx.app_min_balance());
    if reward > 0 {
        ctx.inner_payment(accounts.signer, reward)?;
    }

    // emit event
    let app_id = ctx.app_id;
    ctx.emit(OpinionFinalized {
        app_id,
        finalizer: accounts.signer,
        reward,
        round: accounts.round,
    });
    msg!(
        "opinion {} finalized by {}, reward {}",
        app_id,
        accounts.signer,
        reward
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::assert_error;

    fn accounts(round: u64) -> Finalize {
        Finalize {
            signer: Pubkey::new_from_array([8; 32]),
            author: Some(Pubkey::new_from_array([1; 32])),
            state: OpinionState {
                initialized: true,
                end_round: 25_001,
                ..OpinionState::default()
            },
            round,
        }
    }

    #[test]
    fn test_only_after_expiry() {
        assert_error(accounts(25_001).validate(), OpinionError::NotYetExpired);
        accounts(25_002).validate().unwrap();
    }

    #[test]
    fn test_finalize_once() {
        let mut finalized = accounts(25_002);
        finalized.state.finalized = true;

        assert_error(finalized.validate(), OpinionError::AlreadyFinalized);
    }

    #[test]
    fn test_requires_initialization() {
        let mut uninitialized = accounts(25_002);
        uninitialized.state = OpinionState::default();
        uninitialized.author = None;

        assert_error(uninitialized.validate(), OpinionError::NotInitialized);
    }
}

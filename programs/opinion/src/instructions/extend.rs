use crate::{
    error::OpinionError,
    events::*,
    instructions::{is_author, load_author},
    runtime::CallContext,
    state::*,
};
use anchor_lang::prelude::*;

pub struct Extend {
    pub signer: Pubkey,
    pub author: Option<Pubkey>,
    pub state: OpinionState,
    pub round: u64,
}

impl Extend {
    pub fn load(ctx: &CallContext) -> Result<Self> {
        let state = OpinionState::load(ctx.globals()?);

        Ok(Self {
            signer: ctx.sender,
            author: load_author(ctx, &state)?,
            state,
            round: ctx.round(),
        })
    }

    pub fn validate(&self, new_end_round: u64) -> Result<()> {
        self.state.require_initialized()?;

        require!(
            is_author(self.author, self.signer),
            OpinionError::NotAuthor
        );

        self.state.require_not_finalized()?;

        // only an active opinion may be extended; an expired one awaits finalize
        require!(
            self.round <= self.state.end_round,
            OpinionError::SigningClosed
        );

        require_gt!(
            new_end_round,
            self.state.end_round,
            OpinionError::InvalidEndRound
        );

        Ok(())
    }
}

pub fn handler(ctx: &mut CallContext, new_end_round: u64) -> Result<()> {
    // validate
    let accounts = Extend::load(ctx)?;
    accounts.validate(new_end_round)?;

    // set fields
    let mut state = accounts.state;
    let previous_end_round = state.end_round;
    state.end_round = new_end_round;
    state.save(ctx.globals_mut()?);

    // emit event
    let app_id = ctx.app_id;
    ctx.emit(OpinionExtended {
        app_id,
        previous_end_round,
        new_end_round,
    });
    msg!(
        "opinion {} extended: end round {} -> {}",
        app_id,
        previous_end_round,
        new_end_round
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::assert_error;

    fn author() -> Pubkey {
        Pubkey::new_from_array([1; 32])
    }

    fn accounts(signer: Pubkey) -> Extend {
        Extend {
            signer,
            author: Some(author()),
            state: OpinionState {
                initialized: true,
                end_round: 25_001,
                ..OpinionState::default()
            },
            round: 100,
        }
    }

    #[test]
    fn test_strictly_increasing() {
        assert_error(
            accounts(author()).validate(25_000),
            OpinionError::InvalidEndRound,
        );
        assert_error(
            accounts(author()).validate(25_001),
            OpinionError::InvalidEndRound,
        );
        accounts(author()).validate(25_002).unwrap();
    }

    #[test]
    fn test_non_author_rejected() {
        assert_error(
            accounts(Pubkey::new_from_array([5; 32])).validate(30_000),
            OpinionError::NotAuthor,
        );
    }

    #[test]
    fn test_finalized_rejected() {
        let mut finalized = accounts(author());
        finalized.state.finalized = true;

        assert_error(finalized.validate(30_000), OpinionError::AlreadyFinalized);
    }

    #[test]
    fn test_expired_rejected() {
        let mut at_end = accounts(author());
        at_end.round = 25_001;
        at_end.validate(30_000).unwrap();

        let mut expired = accounts(author());
        expired.round = 25_002;

        assert_error(expired.validate(30_000), OpinionError::SigningClosed);
    }
}

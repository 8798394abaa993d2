use crate::{
    constants::*,
    error::OpinionError,
    events::*,
    runtime::{CallContext, Operation},
    state::*,
};
use anchor_lang::prelude::*;

pub struct Sign<'a> {
    pub signer: Pubkey,
    pub state: OpinionState,
    pub round: u64,
    pub group: &'a [Operation],
    pub group_index: usize,
}

impl<'a> Sign<'a> {
    pub fn load(ctx: &CallContext<'a>) -> Result<Self> {
        Ok(Self {
            signer: ctx.sender,
            state: OpinionState::load(ctx.globals()?),
            round: ctx.round(),
            group: ctx.group,
            group_index: ctx.group_index,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.state.require_initialized()?;

        require!(
            self.round <= self.state.end_round,
            OpinionError::SigningClosed
        );

        self.state.require_not_finalized()?;

        // exactly [sign call, zero-amount self transfer of the signature asset]
        require!(
            self.group.len() == SIGN_GROUP_SIZE && self.group_index == 0,
            OpinionError::GroupShapeInvalid
        );

        match &self.group[1] {
            Operation::AssetTransfer {
                sender,
                receiver,
                asset_id,
                amount,
            } => {
                require!(
                    *asset_id == self.state.asa_id,
                    OpinionError::GroupShapeInvalid
                );

                require!(*amount == 0, OpinionError::GroupShapeInvalid);

                require_keys_eq!(*sender, self.signer, OpinionError::GroupShapeInvalid);

                require_keys_eq!(*receiver, self.signer, OpinionError::GroupShapeInvalid);
            }
            _ => return err!(OpinionError::GroupShapeInvalid),
        }

        Ok(())
    }
}

/// Validates the signing bundle. The signature itself is the opt-in that
/// follows this call in the same bundle.
pub fn handler(ctx: &mut CallContext) -> Result<()> {
    // validate
    Sign::load(ctx)?.validate()?;

    // emit event
    let app_id = ctx.app_id;
    let signer = ctx.sender;
    let round = ctx.round();
    ctx.emit(OpinionSigned {
        app_id,
        signer,
        round,
    });

    Ok(())
}

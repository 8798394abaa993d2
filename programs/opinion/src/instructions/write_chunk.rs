use crate::{
    constants::*,
    error::OpinionError,
    events::*,
    instructions::{is_author, load_author},
    runtime::CallContext,
    state::*,
};
use anchor_lang::prelude::*;

pub struct WriteChunk {
    pub signer: Pubkey,
    pub author: Option<Pubkey>,
    pub state: OpinionState,
}

impl WriteChunk {
    pub fn load(ctx: &CallContext) -> Result<Self> {
        let state = OpinionState::load(ctx.globals()?);

        Ok(Self {
            signer: ctx.sender,
            author: load_author(ctx, &state)?,
            state,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.state.require_initialized()?;

        self.state.require_not_finalized()?;

        require!(
            is_author(self.author, self.signer),
            OpinionError::NotAuthor
        );

        Ok(())
    }
}

/// Overwrites `data.len()` bytes of the content box starting at `offset`.
/// The box keeps the size fixed at initialization; out-of-range writes are
/// rejected by the box store.
pub fn handler(ctx: &mut CallContext, offset: u64, data: Vec<u8>) -> Result<()> {
    // validate
    WriteChunk::load(ctx)?.validate()?;

    ctx.box_replace(CONTENT_BOX, offset, &data)?;

    // emit event
    let app_id = ctx.app_id;
    ctx.emit(ContentChunkWritten {
        app_id,
        offset,
        len: data.len() as u64,
    });

    Ok(())
}

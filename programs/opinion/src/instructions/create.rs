use crate::{events::*, runtime::CallContext, state::*};
use anchor_lang::prelude::*;

pub fn handler(ctx: &mut CallContext) -> Result<()> {
    // set fields
    OpinionState::default().save(ctx.globals_mut()?);

    // emit event
    let app_id = ctx.app_id;
    let creator = ctx.sender;
    ctx.emit(OpinionCreated { app_id, creator });

    Ok(())
}

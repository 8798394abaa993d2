use crate::{runtime::CallContext, state::*};
use anchor_lang::prelude::*;

/// Returns the decoded gate declaration, or `None` when none was declared.
pub fn handler(ctx: &mut CallContext) -> Result<()> {
    let config = GateConfig::load(ctx.globals()?, ctx.boxes()?)?;

    ctx.set_return(&config)
}

use crate::{runtime::CallContext, state::*};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct OpinionInfo {
    pub start_round: u64,
    pub end_round: u64,
    pub asa_id: u64,
    pub finalized: bool,
    pub initialized: bool,
}

impl From<&OpinionState> for OpinionInfo {
    fn from(state: &OpinionState) -> Self {
        Self {
            start_round: state.start_round,
            end_round: state.end_round,
            asa_id: state.asa_id,
            finalized: state.finalized,
            initialized: state.initialized,
        }
    }
}

pub fn handler(ctx: &mut CallContext) -> Result<()> {
    let info = OpinionInfo::from(&OpinionState::load(ctx.globals()?));

    ctx.set_return(&info)
}

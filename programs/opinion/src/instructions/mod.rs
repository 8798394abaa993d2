#![allow(ambiguous_glob_reexports)]

pub mod create;
pub mod extend;
pub mod finalize;
pub mod get_gates;
pub mod get_info;
pub mod initialize;
pub mod set_gates;
pub mod sign;
pub mod write_chunk;

pub use create::*;
pub use extend::*;
pub use finalize::*;
pub use get_gates::*;
pub use get_info::*;
pub use initialize::*;
pub use set_gates::*;
pub use sign::*;
pub use write_chunk::*;

use crate::{runtime::CallContext, state::OpinionState};
use anchor_lang::prelude::*;

/// Call surface of an opinion instance.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum OpinionInstruction {
    Initialize(InitializeArgs),
    WriteChunk { offset: u64, data: Vec<u8> },
    SetGates(SetGatesArgs),
    Sign,
    Extend { new_end_round: u64 },
    Finalize,
    GetInfo,
    GetGates,
}

/// The author is the Signature Asset's reserve address. There is none before
/// initialization.
pub(crate) fn load_author(ctx: &CallContext, state: &OpinionState) -> Result<Option<Pubkey>> {
    if !state.initialized {
        return Ok(None);
    }

    Ok(ctx.asset(state.asa_id)?.reserve)
}

/// Whether `signer` is the recorded author.
pub(crate) fn is_author(author: Option<Pubkey>, signer: Pubkey) -> bool {
    author == Some(signer)
}

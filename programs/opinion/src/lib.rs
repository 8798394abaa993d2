#![allow(unexpected_cfgs)]
#![allow(deprecated)]

pub mod constants;
pub mod discovery;
pub mod eligibility;
pub mod error;
pub mod events;
pub mod instructions;
pub mod runtime;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

use runtime::CallContext;

declare_id!("8KzGkJi84VZjbTUNXYV4qzNiDxdhiaFDtADVzDgpE8DZ");

/// Runs once when the ledger creates a new instance.
pub fn process_create(ctx: &mut CallContext) -> Result<()> {
    create::handler(ctx)
}

/// Entry point for every call into an existing instance.
pub fn process_instruction(ctx: &mut CallContext, instruction: OpinionInstruction) -> Result<()> {
    match instruction {
        OpinionInstruction::Initialize(args) => initialize::handler(ctx, args),
        OpinionInstruction::WriteChunk { offset, data } => write_chunk::handler(ctx, offset, data),
        OpinionInstruction::SetGates(args) => set_gates::handler(ctx, args),
        OpinionInstruction::Sign => sign::handler(ctx),
        OpinionInstruction::Extend { new_end_round } => extend::handler(ctx, new_end_round),
        OpinionInstruction::Finalize => finalize::handler(ctx),
        OpinionInstruction::GetInfo => get_info::handler(ctx),
        OpinionInstruction::GetGates => get_gates::handler(ctx),
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use anchor_lang::error::Error;

    fn error_code(error: &Error) -> Option<u32> {
        match error {
            Error::AnchorError(error) => Some(error.error_code_number),
            Error::ProgramError(_) => None,
        }
    }

    #[track_caller]
    pub fn assert_error<T: std::fmt::Debug>(result: anchor_lang::Result<T>, expected: impl Into<Error>) {
        let expected = expected.into();
        let actual = result.expect_err("expected an error");

        assert_eq!(error_code(&actual), error_code(&expected), "{actual:?}");
    }
}

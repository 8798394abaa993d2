use crate::{
    constants::*,
    error::OpinionError,
    events::*,
    instructions::{is_author, load_author},
    runtime::{CallContext, KeyValueStore},
    state::*,
    utils::*,
};
use anchor_lang::prelude::*;

/// Raw gate declaration as submitted. Parameters whose bit is not set are
/// ignored and never stored.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SetGatesArgs {
    pub flags: u64,
    pub balance_min: u64,
    pub balance_max: u64,
    pub min_age: u64,
    pub hold_list: Vec<u8>,
    pub deny_list: Vec<u8>,
    pub identity_root: String,
}

impl SetGatesArgs {
    /// Decodes the bit-field into typed requirements, validating each one.
    pub fn to_config(&self) -> Result<GateConfig> {
        let flags = GateFlags(self.flags);
        require!(!flags.is_empty(), OpinionError::NoGateSelected);
        require!(!flags.has_unknown_bits(), OpinionError::UnknownGateFlag);

        let mut requirements = Vec::new();

        if flags.contains(GATE_MUST_HOLD) {
            requirements.push(GateRequirement::MustHold(decode_ids(&self.hold_list)?));
        }

        if flags.contains(GATE_MUST_NOT_HOLD) {
            requirements.push(GateRequirement::MustNotHold(decode_ids(&self.deny_list)?));
        }

        if flags.contains(GATE_MIN_BALANCE) {
            requirements.push(GateRequirement::MinBalance(self.balance_min));
        }

        if flags.contains(GATE_MAX_BALANCE) {
            requirements.push(GateRequirement::MaxBalance(self.balance_max));
        }

        if flags.contains(GATE_MIN_BALANCE) && flags.contains(GATE_MAX_BALANCE) {
            require!(
                self.balance_min <= self.balance_max,
                OpinionError::GateRangeInvalid
            );
        }

        if flags.contains(GATE_ONLINE) {
            requirements.push(GateRequirement::OnlineValidator);
        }

        if flags.contains(GATE_MIN_AGE) {
            requirements.push(GateRequirement::MinAccountAge(self.min_age));
        }

        if flags.contains(GATE_IDENTITY_SEGMENT) {
            require!(
                !self.identity_root.is_empty()
                    && self.identity_root.len() <= MAX_IDENTITY_ROOT_LEN,
                OpinionError::FieldLengthViolation
            );
            requirements.push(GateRequirement::IdentitySegment(self.identity_root.clone()));
        }

        Ok(GateConfig { requirements })
    }
}

pub struct SetGates {
    pub signer: Pubkey,
    pub author: Option<Pubkey>,
    pub state: OpinionState,
    pub current_flags: GateFlags,
}

impl SetGates {
    pub fn load(ctx: &CallContext) -> Result<Self> {
        let globals = ctx.globals()?;
        let state = OpinionState::load(globals);

        Ok(Self {
            signer: ctx.sender,
            author: load_author(ctx, &state)?,
            current_flags: GateFlags(globals.get_uint(KEY_GATE_FLAGS).unwrap_or(0)),
            state,
        })
    }

    pub fn validate(&self, args: &SetGatesArgs) -> Result<GateConfig> {
        self.state.require_initialized()?;

        require!(
            is_author(self.author, self.signer),
            OpinionError::NotAuthor
        );

        self.state.require_not_finalized()?;

        require!(
            self.current_flags.is_empty(),
            OpinionError::GatesAlreadySet
        );

        args.to_config()
    }
}

pub fn handler(ctx: &mut CallContext, args: SetGatesArgs) -> Result<()> {
    // validate
    let config = SetGates::load(ctx)?.validate(&args)?;
    let flags = config.flags();

    // store each requirement in its slot or box
    for requirement in &config.requirements {
        match requirement {
            GateRequirement::MustHold(ids) => ctx.box_put(HOLD_LIST_BOX, &encode_ids(ids))?,
            GateRequirement::MustNotHold(ids) => ctx.box_put(DENY_LIST_BOX, &encode_ids(ids))?,
            GateRequirement::MinBalance(min) => {
                ctx.globals_mut()?.put_uint(KEY_GATE_BALANCE_MIN, *min)
            }
            GateRequirement::MaxBalance(max) => {
                ctx.globals_mut()?.put_uint(KEY_GATE_BALANCE_MAX, *max)
            }
            GateRequirement::OnlineValidator => {}
            GateRequirement::MinAccountAge(age) => {
                ctx.globals_mut()?.put_uint(KEY_GATE_MIN_AGE, *age)
            }
            GateRequirement::IdentitySegment(root) => {
                ctx.box_put(IDENTITY_ROOT_BOX, root.as_bytes())?
            }
        }
    }
    ctx.globals_mut()?.put_uint(KEY_GATE_FLAGS, flags.bits());

    // emit event
    let app_id = ctx.app_id;
    ctx.emit(GatesDeclared {
        app_id,
        flags: flags.bits(),
    });
    msg!("opinion {} gates declared: {:#09b}", app_id, flags.bits());

    Ok(())
}

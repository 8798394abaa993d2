//! Read-only views an indexer or front-end builds from ledger state. None of
//! these run inside a call.

use crate::{constants::*, error::LedgerError, runtime::Ledger, state::*};
use anchor_lang::prelude::*;

pub fn opinion_state(ledger: &Ledger, app_id: u64) -> Result<OpinionState> {
    let instance = ledger
        .instance(app_id)
        .ok_or(LedgerError::InstanceNotFound)?;

    Ok(OpinionState::load(&instance.globals))
}

pub fn gates(ledger: &Ledger, app_id: u64) -> Result<Option<GateConfig>> {
    let instance = ledger
        .instance(app_id)
        .ok_or(LedgerError::InstanceNotFound)?;

    GateConfig::load(&instance.globals, &instance.boxes)
}

pub fn content(ledger: &Ledger, app_id: u64) -> Option<&[u8]> {
    ledger.read_box(app_id, CONTENT_BOX)
}

/// Holders of the Signature Asset other than the instance itself.
pub fn signers(ledger: &Ledger, app_id: u64) -> Result<Vec<Pubkey>> {
    let state = opinion_state(ledger, app_id)?;
    if !state.initialized {
        return Ok(Vec::new());
    }

    let instance_address = Ledger::instance_address(app_id);

    Ok(ledger
        .asset_holders(state.asa_id)
        .into_iter()
        .filter(|holder| *holder != instance_address)
        .collect())
}

pub fn signature_count(ledger: &Ledger, app_id: u64) -> Result<usize> {
    Ok(signers(ledger, app_id)?.len())
}

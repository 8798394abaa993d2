use anchor_lang::prelude::*;

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpinionCreated {
    pub app_id: u64,
    pub creator: Pubkey,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpinionInitialized {
    pub app_id: u64,
    pub asa_id: u64,
    pub author: Pubkey,
    pub start_round: u64,
    pub end_round: u64,
    pub content_size: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentChunkWritten {
    pub app_id: u64,
    pub offset: u64,
    pub len: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatesDeclared {
    pub app_id: u64,
    pub flags: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpinionSigned {
    pub app_id: u64,
    pub signer: Pubkey,
    pub round: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpinionExtended {
    pub app_id: u64,
    pub previous_end_round: u64,
    pub new_end_round: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpinionFinalized {
    pub app_id: u64,
    pub finalizer: Pubkey,
    pub reward: u64,
    pub round: u64,
}

use anchor_lang::prelude::*;

/// PDA Seeds
#[constant]
pub const INSTANCE_SEED: &str = "opinion";

/// Box names
pub const CONTENT_BOX: &[u8] = b"content";
pub const HOLD_LIST_BOX: &[u8] = b"gate_hold";
pub const DENY_LIST_BOX: &[u8] = b"gate_deny";
pub const IDENTITY_ROOT_BOX: &[u8] = b"gate_identity";

/// Initialization bounds
#[constant]
pub const MIN_FUNDING: u64 = 20_000_000;
#[constant]
pub const MIN_DURATION_ROUNDS: u64 = 25_000;
pub const MAX_TITLE_LEN: usize = 32;
pub const MIN_CONTENT_SIZE: u64 = 1;
pub const MAX_CONTENT_SIZE: u64 = 32_768;
pub const TYPE_TAG_LEN: usize = 32;
pub const MAX_URL_LEN: usize = 96;
pub const MAX_IDENTITY_ROOT_LEN: usize = 64;

/// Signature Asset
pub const SIGNATURE_UNIT_NAME: &str = "OPINION";
pub const MAX_ASSET_NAME_LEN: usize = 32;
pub const MAX_UNIT_NAME_LEN: usize = 8;
pub const MAX_ASSET_URL_LEN: usize = 96;
pub const SIGNATURE_DECIMALS: u32 = 0;
pub const SIGNATURE_TOTAL_SUPPLY: u64 = 0;

/// Signing bundle shape
pub const SIGN_GROUP_SIZE: usize = 2;

/// Packed asset lists
pub const PACKED_ID_WIDTH: usize = 8;

/// Ledger economics
pub const ACCOUNT_MIN_BALANCE: u64 = 100_000;
pub const ASSET_HOLDING_MIN_BALANCE: u64 = 100_000;
pub const BOX_FLAT_MIN_BALANCE: u64 = 2_500;
pub const BOX_BYTE_MIN_BALANCE: u64 = 400;
pub const MAX_BOX_SIZE: u64 = 32_768;
pub const MAX_BOX_NAME_LEN: usize = 64;
pub const MAX_BUNDLE_SIZE: usize = 16;
pub const MAX_CALL_PAYLOAD: usize = 2_048;
pub const MAX_INNER_OPERATIONS: usize = 16;

/// Global state keys
pub const KEY_INITIALIZED: &str = "initialized";
pub const KEY_FINALIZED: &str = "finalized";
pub const KEY_START_ROUND: &str = "start_round";
pub const KEY_END_ROUND: &str = "end_round";
pub const KEY_ASA_ID: &str = "asa_id";
pub const KEY_GATE_FLAGS: &str = "gate_flags";
pub const KEY_GATE_BALANCE_MIN: &str = "gate_bal_min";
pub const KEY_GATE_BALANCE_MAX: &str = "gate_bal_max";
pub const KEY_GATE_MIN_AGE: &str = "gate_min_age";

/// Gate flag bits
pub const GATE_MUST_HOLD: u64 = 1 << 0;
pub const GATE_MUST_NOT_HOLD: u64 = 1 << 1;
pub const GATE_MIN_BALANCE: u64 = 1 << 2;
pub const GATE_MAX_BALANCE: u64 = 1 << 3;
pub const GATE_ONLINE: u64 = 1 << 4;
pub const GATE_MIN_AGE: u64 = 1 << 5;
pub const GATE_IDENTITY_SEGMENT: u64 = 1 << 6;
pub const GATE_ALL_FLAGS: u64 = (1 << 7) - 1;

/// Lifecycle status, derived from stored flags and the current round
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpinionStatus {
    Uninitialized,
    Active,
    Expired,
    Finalized,
}

use crate::{constants::*, error::OpinionError};
use anchor_lang::prelude::*;

/// Packs identifiers as consecutive 64-bit big-endian integers.
pub fn encode_ids(ids: &[u64]) -> Vec<u8> {
    ids.iter().flat_map(|id| id.to_be_bytes()).collect()
}

/// Number of entries in a packed blob. Empty or ragged blobs are rejected.
pub fn packed_len(blob: &[u8]) -> Result<usize> {
    require!(
        !blob.is_empty() && blob.len() % PACKED_ID_WIDTH == 0,
        OpinionError::PackedListMisaligned
    );

    Ok(blob.len() / PACKED_ID_WIDTH)
}

pub fn decode_ids(blob: &[u8]) -> Result<Vec<u64>> {
    packed_len(blob)?;

    Ok(blob
        .chunks_exact(PACKED_ID_WIDTH)
        .map(|chunk| {
            let mut word = [0u8; PACKED_ID_WIDTH];
            word.copy_from_slice(chunk);
            u64::from_be_bytes(word)
        })
        .collect())
}

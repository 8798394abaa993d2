use crate::{constants::*, error::LedgerError};
use anchor_lang::prelude::*;

/// Fungible asset parameters. `manager` may reconfigure the asset; once it is
/// cleared the parameters can never change again.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssetParams {
    pub creator: Pubkey,
    pub name: String,
    pub unit_name: String,
    pub url: String,
    pub metadata_hash: [u8; 32],
    pub total: u64,
    pub decimals: u32,
    pub manager: Option<Pubkey>,
    pub reserve: Option<Pubkey>,
    pub app_id: Option<u64>, // Instance that minted the asset, if any.
}

impl AssetParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.name.len() <= MAX_ASSET_NAME_LEN,
            LedgerError::InvalidAssetParams
        );

        require!(
            self.unit_name.len() <= MAX_UNIT_NAME_LEN,
            LedgerError::InvalidAssetParams
        );

        require!(
            self.url.len() <= MAX_ASSET_URL_LEN,
            LedgerError::InvalidAssetParams
        );

        require!(self.decimals <= 19, LedgerError::InvalidAssetParams);

        Ok(())
    }

    pub fn is_frozen(&self) -> bool {
        self.manager.is_none()
    }
}

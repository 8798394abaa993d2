use crate::{
    constants::*,
    error::OpinionError,
    events::*,
    runtime::{AssetParams, CallContext, Operation},
    state::*,
    utils::*,
};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeArgs {
    pub title: String,
    pub content_size: u64,
    pub duration: u64,
    pub type_tag: Vec<u8>,
    pub url: String,
}

pub struct Initialize {
    pub signer: Pubkey,
    pub creator: Pubkey,
    pub state: OpinionState,
    pub funding: Option<u64>, // Payment to the instance immediately preceding this call.
}

impl Initialize {
    pub fn load(ctx: &CallContext) -> Result<Self> {
        let app_address = ctx.app_address();
        let funding = ctx
            .group_index
            .checked_sub(1)
            .and_then(|index| ctx.group.get(index))
            .and_then(|operation| match operation {
                Operation::Payment {
                    receiver, amount, ..
                } if *receiver == app_address => Some(*amount),
                _ => None,
            });

        Ok(Self {
            signer: ctx.sender,
            creator: ctx.creator()?,
            state: OpinionState::load(ctx.globals()?),
            funding,
        })
    }

    pub fn validate(&self, args: &InitializeArgs) -> Result<()> {
        require!(!self.state.initialized, OpinionError::AlreadyInitialized);

        require_keys_eq!(self.signer, self.creator, OpinionError::NotAuthor);

        let funding = self.funding.ok_or(OpinionError::GroupShapeInvalid)?;
        require!(funding >= MIN_FUNDING, OpinionError::FundingTooLow);

        require!(
            args.duration >= MIN_DURATION_ROUNDS,
            OpinionError::DurationTooShort
        );

        require!(
            args.title.len() <= MAX_TITLE_LEN,
            OpinionError::FieldLengthViolation
        );

        require!(
            (MIN_CONTENT_SIZE..=MAX_CONTENT_SIZE).contains(&args.content_size),
            OpinionError::FieldLengthViolation
        );

        require!(
            args.type_tag.len() == TYPE_TAG_LEN,
            OpinionError::FieldLengthViolation
        );

        require!(
            args.type_tag.iter().any(|byte| *byte != 0),
            OpinionError::FieldLengthViolation
        );

        require!(
            args.url.len() <= MAX_URL_LEN,
            OpinionError::FieldLengthViolation
        );

        Ok(())
    }
}

pub fn handler(ctx: &mut CallContext, args: InitializeArgs) -> Result<()> {
    // validate
    let accounts = Initialize::load(ctx)?;
    accounts.validate(&args)?;

    let app_address = ctx.app_address();
    let start_round = ctx.round();
    let end_round = calculate_end_round(start_round, args.duration)?;

    // allocate content box at its final size
    ctx.box_create(CONTENT_BOX, args.content_size)?;

    // mint the signature asset
    let mut metadata_hash = [0u8; TYPE_TAG_LEN];
    metadata_hash.copy_from_slice(&args.type_tag);
    let asa_id = ctx.inner_asset_create(AssetParams {
        creator: app_address,
        name: args.title,
        unit_name: SIGNATURE_UNIT_NAME.to_string(),
        url: args.url,
        metadata_hash,
        total: SIGNATURE_TOTAL_SUPPLY,
        decimals: SIGNATURE_DECIMALS,
        manager: Some(app_address),
        reserve: Some(accounts.signer),
        app_id: None,
    })?;

    // set fields
    let state = OpinionState {
        initialized: true,
        finalized: false,
        start_round,
        end_round,
        asa_id,
    };
    state.save(ctx.globals_mut()?);

    // emit event
    let app_id = ctx.app_id;
    ctx.emit(OpinionInitialized {
        app_id,
        asa_id,
        author: accounts.signer,
        start_round,
        end_round,
        content_size: args.content_size,
    });
    msg!(
        "opinion {} initialized: asa {}, rounds {}..={}",
        app_id,
        asa_id,
        start_round,
        end_round
    );

    ctx.set_return(&asa_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::assert_error;

    fn author() -> Pubkey {
        Pubkey::new_from_array([1; 32])
    }

    fn accounts(funding: Option<u64>) -> Initialize {
        Initialize {
            signer: author(),
            creator: author(),
            state: OpinionState::default(),
            funding,
        }
    }

    fn args() -> InitializeArgs {
        let mut type_tag = b"Petition".to_vec();
        type_tag.resize(TYPE_TAG_LEN, 0);

        InitializeArgs {
            title: "Climate Action".to_string(),
            content_size: 68,
            duration: MIN_DURATION_ROUNDS,
            type_tag,
            url: String::new(),
        }
    }

    #[test]
    fn test_valid_arguments() {
        accounts(Some(MIN_FUNDING)).validate(&args()).unwrap();
    }

    #[test]
    fn test_funding_threshold() {
        assert_error(
            accounts(Some(MIN_FUNDING - 1)).validate(&args()),
            OpinionError::FundingTooLow,
        );
        assert_error(
            accounts(None).validate(&args()),
            OpinionError::GroupShapeInvalid,
        );
    }

    #[test]
    fn test_duration_threshold() {
        let mut short = args();
        short.duration = MIN_DURATION_ROUNDS - 1;

        assert_error(
            accounts(Some(MIN_FUNDING)).validate(&short),
            OpinionError::DurationTooShort,
        );
    }

    #[test]
    fn test_field_bounds() {
        let funded = accounts(Some(MIN_FUNDING));

        let mut long_title = args();
        long_title.title = "t".repeat(MAX_TITLE_LEN + 1);
        assert_error(funded.validate(&long_title), OpinionError::FieldLengthViolation);

        let mut title_at_limit = args();
        title_at_limit.title = "t".repeat(MAX_TITLE_LEN);
        funded.validate(&title_at_limit).unwrap();

        for size in [0, MAX_CONTENT_SIZE + 1] {
            let mut bad_size = args();
            bad_size.content_size = size;
            assert_error(funded.validate(&bad_size), OpinionError::FieldLengthViolation);
        }

        let mut short_tag = args();
        short_tag.type_tag.truncate(31);
        assert_error(funded.validate(&short_tag), OpinionError::FieldLengthViolation);

        let mut zero_tag = args();
        zero_tag.type_tag = vec![0; TYPE_TAG_LEN];
        assert_error(funded.validate(&zero_tag), OpinionError::FieldLengthViolation);

        let mut long_url = args();
        long_url.url = "u".repeat(MAX_URL_LEN + 1);
        assert_error(funded.validate(&long_url), OpinionError::FieldLengthViolation);
    }

    #[test]
    fn test_already_initialized_checked_first() {
        let mut initialized = accounts(None);
        initialized.state.initialized = true;

        assert_error(
            initialized.validate(&args()),
            OpinionError::AlreadyInitialized,
        );
    }

    #[test]
    fn test_only_creator_may_initialize() {
        let mut stranger = accounts(Some(MIN_FUNDING));
        stranger.signer = Pubkey::new_from_array([2; 32]);

        assert_error(stranger.validate(&args()), OpinionError::NotAuthor);
    }
}

use anchor_lang::prelude::*;

#[error_code]
pub enum OpinionError {
    // Lifecycle Errors (0x1000 - 0x1999)
    #[msg("Opinion has already been initialized")]
    AlreadyInitialized = 0x1000,

    #[msg("Opinion has not been initialized")]
    NotInitialized = 0x1001,

    #[msg("Opinion has already been finalized")]
    AlreadyFinalized = 0x1002,

    #[msg("Opinion has not expired yet")]
    NotYetExpired = 0x1003,

    #[msg("Signing window has closed")]
    SigningClosed = 0x1004,

    #[msg("New end round must be greater than the current end round")]
    InvalidEndRound = 0x1005,

    // Initialization Errors (0x2000 - 0x2999)
    #[msg("Funding payment is below the required minimum")]
    FundingTooLow = 0x2000,

    #[msg("Duration is below the required minimum")]
    DurationTooShort = 0x2001,

    #[msg("Field length is outside the allowed bounds")]
    FieldLengthViolation = 0x2002,

    // Authorization Errors (0x3000 - 0x3999)
    #[msg("Caller is not the opinion author")]
    NotAuthor = 0x3000,

    // Signing Errors (0x4000 - 0x4999)
    #[msg("Signing bundle shape is invalid")]
    GroupShapeInvalid = 0x4000,

    // Gate Errors (0x5000 - 0x5999)
    #[msg("Gates have already been declared")]
    GatesAlreadySet = 0x5000,

    #[msg("At least one gate must be selected")]
    NoGateSelected = 0x5001,

    #[msg("Packed asset list length must be a positive multiple of 8")]
    PackedListMisaligned = 0x5002,

    #[msg("Gate flags contain an unknown bit")]
    UnknownGateFlag = 0x5003,

    #[msg("Minimum balance gate exceeds maximum balance gate")]
    GateRangeInvalid = 0x5004,

    // Arithmetic Errors (0x6000 - 0x6999)
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow = 0x6000,
}

#[error_code]
pub enum LedgerError {
    // Bundle Errors (0x7000 - 0x7099)
    #[msg("Bundle must contain between 1 and 16 operations")]
    InvalidBundleSize = 0x7000,

    #[msg("Call payload exceeds the per-operation limit")]
    PayloadTooLarge = 0x7001,

    #[msg("Too many inner operations issued by one call")]
    TooManyInnerOperations = 0x7002,

    #[msg("Instance does not exist")]
    InstanceNotFound = 0x7003,

    // Balance Errors (0x7100 - 0x7199)
    #[msg("Sender balance is insufficient for this payment")]
    InsufficientFunds = 0x7100,

    #[msg("Account balance is below its minimum required balance")]
    BelowMinimumBalance = 0x7101,

    // Box Errors (0x7200 - 0x7299)
    #[msg("Box does not exist")]
    BoxNotFound = 0x7200,

    #[msg("Box already exists")]
    BoxAlreadyExists = 0x7201,

    #[msg("Box size is outside the allowed bounds")]
    InvalidBoxSize = 0x7202,

    #[msg("Write range falls outside the box")]
    BoxOutOfBounds = 0x7203,

    // Asset Errors (0x7300 - 0x7399)
    #[msg("Asset does not exist")]
    AssetNotFound = 0x7300,

    #[msg("Account has already opted in to this asset")]
    AlreadyOptedIn = 0x7301,

    #[msg("Account has not opted in to this asset")]
    NotOptedIn = 0x7302,

    #[msg("Asset balance is insufficient for this transfer")]
    InsufficientAssetBalance = 0x7303,

    #[msg("Asset has no manager and can no longer be reconfigured")]
    AssetImmutable = 0x7304,

    #[msg("Only the asset manager may reconfigure the asset")]
    NotAssetManager = 0x7305,

    #[msg("Asset parameters are invalid")]
    InvalidAssetParams = 0x7306,

    #[msg("Opt-in to an instance-owned asset must follow that instance's sign call")]
    OptInNotAuthorized = 0x7307,

    // Encoding Errors (0x7400 - 0x7499)
    #[msg("Value could not be encoded")]
    EncodingFailed = 0x7400,
}

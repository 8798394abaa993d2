use crate::{error::LedgerError, instructions::OpinionInstruction};
use anchor_lang::prelude::*;
use anchor_lang::Event;

/// A single ledger operation as submitted by an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Payment {
        sender: Pubkey,
        receiver: Pubkey,
        amount: u64,
    },
    /// A zero-amount transfer from an account to itself is an opt-in.
    AssetTransfer {
        sender: Pubkey,
        receiver: Pubkey,
        asset_id: u64,
        amount: u64,
    },
    AppCreate {
        sender: Pubkey,
    },
    AppCall {
        sender: Pubkey,
        app_id: u64,
        instruction: OpinionInstruction,
    },
}

impl Operation {
    pub fn opt_in(account: Pubkey, asset_id: u64) -> Self {
        Operation::AssetTransfer {
            sender: account,
            receiver: account,
            asset_id,
            amount: 0,
        }
    }

    pub fn call(sender: Pubkey, app_id: u64, instruction: OpinionInstruction) -> Self {
        Operation::AppCall {
            sender,
            app_id,
            instruction,
        }
    }

    pub fn sender(&self) -> Pubkey {
        match self {
            Operation::Payment { sender, .. }
            | Operation::AssetTransfer { sender, .. }
            | Operation::AppCreate { sender }
            | Operation::AppCall { sender, .. } => *sender,
        }
    }
}

/// An ordered group of operations that commits or aborts as one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bundle {
    operations: Vec<Operation>,
}

impl Bundle {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    pub fn single(operation: Operation) -> Self {
        Self::new(vec![operation])
    }

    pub fn with(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Operations an instance issues on its own behalf during a call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InnerOperation {
    AssetCreate {
        asset_id: u64,
    },
    AssetConfig {
        asset_id: u64,
        manager: Option<Pubkey>,
        reserve: Option<Pubkey>,
    },
    Payment {
        receiver: Pubkey,
        amount: u64,
    },
}

/// Outcome of one committed operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Receipt {
    pub created_app: Option<u64>,
    pub created_asset: Option<u64>,
    pub inner_operations: Vec<InnerOperation>,
    pub logs: Vec<Vec<u8>>,
    pub return_data: Option<Vec<u8>>,
}

impl Receipt {
    /// First logged event of type `E`, if any.
    pub fn event<E: Event>(&self) -> Option<E> {
        self.logs.iter().find_map(|log| {
            log.strip_prefix(E::DISCRIMINATOR)
                .and_then(|body| E::try_from_slice(body).ok())
        })
    }

    pub fn decode_return<T: AnchorDeserialize>(&self) -> Result<T> {
        let data = self
            .return_data
            .as_deref()
            .ok_or(LedgerError::EncodingFailed)?;

        T::try_from_slice(data).map_err(|_| error!(LedgerError::EncodingFailed))
    }
}

#![allow(dead_code)]

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use opinion::{constants::*, instructions::*, runtime::*};

pub const AUTHOR_FUNDS: u64 = 100_000_000;
pub const SIGNER_FUNDS: u64 = 1_000_000;

pub fn account(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

pub fn type_tag(label: &str) -> Vec<u8> {
    let mut tag = label.as_bytes().to_vec();
    tag.resize(TYPE_TAG_LEN, 0);
    tag
}

pub fn initialize_args(content_size: u64, duration: u64) -> InitializeArgs {
    InitializeArgs {
        title: "Climate Action".to_string(),
        content_size,
        duration,
        type_tag: type_tag("Petition"),
        url: "https://example.org/climate-action".to_string(),
    }
}

fn error_code(error: &Error) -> Option<u32> {
    match error {
        Error::AnchorError(error) => Some(error.error_code_number),
        Error::ProgramError(_) => None,
    }
}

#[track_caller]
pub fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: impl Into<Error>) {
    let expected = expected.into();
    let actual = result.expect_err("expected an error");

    assert_eq!(error_code(&actual), error_code(&expected), "{actual:?}");
}

pub struct Harness {
    pub ledger: Ledger,
    pub author: Pubkey,
    pub app_id: u64,
    pub asa_id: u64,
}

impl Harness {
    /// A ledger with a funded author and a freshly created, uninitialized
    /// instance.
    pub fn created() -> Self {
        let mut ledger = Ledger::default();
        let author = account(1);
        ledger.fund(author, AUTHOR_FUNDS).unwrap();

        let receipts = ledger
            .submit(&Bundle::single(Operation::AppCreate { sender: author }))
            .unwrap();
        let app_id = receipts[0].created_app.unwrap();

        Self {
            ledger,
            author,
            app_id,
            asa_id: 0,
        }
    }

    /// A created instance initialized with the minimum funding and duration.
    pub fn initialized(content_size: u64) -> Self {
        let mut harness = Self::created();
        let receipts = harness
            .initialize(MIN_FUNDING, initialize_args(content_size, MIN_DURATION_ROUNDS))
            .unwrap();
        harness.asa_id = receipts[1].decode_return::<u64>().unwrap();
        harness
    }

    pub fn instance_address(&self) -> Pubkey {
        Ledger::instance_address(self.app_id)
    }

    pub fn initialize_bundle(&self, funding: u64, args: InitializeArgs) -> Bundle {
        Bundle::new(vec![
            Operation::Payment {
                sender: self.author,
                receiver: self.instance_address(),
                amount: funding,
            },
            Operation::call(self.author, self.app_id, OpinionInstruction::Initialize(args)),
        ])
    }

    pub fn initialize(&mut self, funding: u64, args: InitializeArgs) -> Result<Vec<Receipt>> {
        let bundle = self.initialize_bundle(funding, args);
        self.ledger.submit(&bundle)
    }

    pub fn call(&mut self, sender: Pubkey, instruction: OpinionInstruction) -> Result<Vec<Receipt>> {
        self.ledger
            .submit(&Bundle::single(Operation::call(sender, self.app_id, instruction)))
    }

    pub fn fund(&mut self, account: Pubkey) {
        self.ledger.fund(account, SIGNER_FUNDS).unwrap();
    }

    pub fn sign_bundle(&self, signer: Pubkey) -> Bundle {
        Bundle::new(vec![
            Operation::call(signer, self.app_id, OpinionInstruction::Sign),
            Operation::opt_in(signer, self.asa_id),
        ])
    }

    pub fn sign(&mut self, signer: Pubkey) -> Result<Vec<Receipt>> {
        let bundle = self.sign_bundle(signer);
        self.ledger.submit(&bundle)
    }

    pub fn extend(&mut self, sender: Pubkey, new_end_round: u64) -> Result<Vec<Receipt>> {
        self.call(sender, OpinionInstruction::Extend { new_end_round })
    }

    pub fn write(&mut self, sender: Pubkey, offset: u64, data: &[u8]) -> Result<Vec<Receipt>> {
        self.call(
            sender,
            OpinionInstruction::WriteChunk {
                offset,
                data: data.to_vec(),
            },
        )
    }

    pub fn finalize(&mut self, sender: Pubkey) -> Result<Vec<Receipt>> {
        self.call(sender, OpinionInstruction::Finalize)
    }

    pub fn info(&mut self) -> OpinionInfo {
        let receipts = self.call(account(0xEE), OpinionInstruction::GetInfo).unwrap();
        receipts[0].decode_return().unwrap()
    }

    /// Moves the ledger to the first round after the signing window.
    pub fn expire(&mut self) {
        let end_round = self.info().end_round;
        let round = self.ledger.round();
        self.ledger.advance_rounds(end_round + 1 - round);
    }
}

//! In-process model of the ledger runtime an opinion instance executes on:
//! rounds, balances, assets, per-instance global slots and boxes, and
//! all-or-nothing bundles.

pub mod account;
pub mod asset;
pub mod context;
pub mod operation;
pub mod storage;

pub use account::*;
pub use asset::*;
pub use context::*;
pub use operation::*;
pub use storage::*;

use crate::{constants::*, error::LedgerError, instructions::OpinionInstruction};
use anchor_lang::prelude::*;
use std::collections::BTreeMap;

/// Runtime economics and limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerParams {
    pub account_min_balance: u64,
    pub asset_holding_min_balance: u64,
    pub box_flat_min_balance: u64,
    pub box_byte_min_balance: u64,
    pub max_box_size: u64,
    pub max_bundle_size: usize,
    pub max_call_payload: usize,
    pub max_inner_operations: usize,
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            account_min_balance: ACCOUNT_MIN_BALANCE,
            asset_holding_min_balance: ASSET_HOLDING_MIN_BALANCE,
            box_flat_min_balance: BOX_FLAT_MIN_BALANCE,
            box_byte_min_balance: BOX_BYTE_MIN_BALANCE,
            max_box_size: MAX_BOX_SIZE,
            max_bundle_size: MAX_BUNDLE_SIZE,
            max_call_payload: MAX_CALL_PAYLOAD,
            max_inner_operations: MAX_INNER_OPERATIONS,
        }
    }
}

/// One deployed opinion instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    pub id: u64,
    pub creator: Pubkey,
    pub address: Pubkey,
    pub globals: GlobalStore,
    pub boxes: BoxStore,
}

#[derive(Clone, Debug)]
pub struct Ledger {
    params: LedgerParams,
    round: u64,
    next_id: u64,
    accounts: BTreeMap<Pubkey, AccountState>,
    assets: BTreeMap<u64, AssetParams>,
    instances: BTreeMap<u64, Instance>,
    instance_ids: BTreeMap<Pubkey, u64>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerParams::default())
    }
}

impl Ledger {
    pub fn new(params: LedgerParams) -> Self {
        Self {
            params,
            round: 1,
            next_id: 1_000,
            accounts: BTreeMap::new(),
            assets: BTreeMap::new(),
            instances: BTreeMap::new(),
            instance_ids: BTreeMap::new(),
        }
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn advance_rounds(&mut self, rounds: u64) {
        self.round = self.round.saturating_add(rounds);
    }

    /// Address of the account owned by instance `app_id`.
    pub fn instance_address(app_id: u64) -> Pubkey {
        Pubkey::find_program_address(
            &[INSTANCE_SEED.as_bytes(), &app_id.to_le_bytes()],
            &crate::ID,
        )
        .0
    }

    /// Credits `account` outside of any bundle.
    pub fn fund(&mut self, account: Pubkey, amount: u64) -> Result<()> {
        let round = self.round;
        self.accounts
            .entry(account)
            .or_insert_with(|| AccountState::new(round))
            .credit(amount)
    }

    pub fn set_online(&mut self, account: Pubkey, online: bool) {
        let round = self.round;
        self.accounts
            .entry(account)
            .or_insert_with(|| AccountState::new(round))
            .online = online;
    }

    pub fn account(&self, account: &Pubkey) -> Option<&AccountState> {
        self.accounts.get(account)
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.accounts.get(account).map_or(0, |state| state.balance)
    }

    /// Balance `account` must keep given its holdings and, for instance
    /// accounts, its boxes.
    pub fn min_balance(&self, account: &Pubkey) -> u64 {
        let holdings = self
            .accounts
            .get(account)
            .map_or(0, |state| state.holdings.len() as u64);
        let boxes = self
            .instance_ids
            .get(account)
            .and_then(|id| self.instances.get(id))
            .map_or(0, |instance| {
                instance
                    .boxes
                    .min_balance(self.params.box_flat_min_balance, self.params.box_byte_min_balance)
            });

        self.params
            .account_min_balance
            .saturating_add(holdings.saturating_mul(self.params.asset_holding_min_balance))
            .saturating_add(boxes)
    }

    pub fn asset(&self, asset_id: u64) -> Option<&AssetParams> {
        self.assets.get(&asset_id)
    }

    pub fn instance(&self, app_id: u64) -> Option<&Instance> {
        self.instances.get(&app_id)
    }

    pub(crate) fn instance_mut(&mut self, app_id: u64) -> Option<&mut Instance> {
        self.instances.get_mut(&app_id)
    }

    pub fn read_box(&self, app_id: u64, name: &[u8]) -> Option<&[u8]> {
        self.instances.get(&app_id)?.boxes.get(name)
    }

    /// Every account registered as a holder of `asset_id`, in address order.
    pub fn asset_holders(&self, asset_id: u64) -> Vec<Pubkey> {
        self.accounts
            .iter()
            .filter(|(_, state)| state.is_opted_in(asset_id))
            .map(|(address, _)| *address)
            .collect()
    }

    /// Applies `bundle` on a working copy and commits it only if every
    /// operation succeeds and every account still covers its minimum balance.
    pub fn submit(&mut self, bundle: &Bundle) -> Result<Vec<Receipt>> {
        let operations = bundle.operations();
        require!(
            !operations.is_empty() && operations.len() <= self.params.max_bundle_size,
            LedgerError::InvalidBundleSize
        );

        let mut working = self.clone();
        let mut receipts = Vec::with_capacity(operations.len());
        for index in 0..operations.len() {
            receipts.push(working.apply(operations, index)?);
        }
        working.check_min_balances()?;

        *self = working;

        Ok(receipts)
    }

    /// Applies bundles one after another within the current round. Each
    /// bundle observes every commit ordered before it.
    pub fn submit_batch(&mut self, bundles: &[Bundle]) -> Vec<Result<Vec<Receipt>>> {
        bundles.iter().map(|bundle| self.submit(bundle)).collect()
    }

    fn apply(&mut self, group: &[Operation], index: usize) -> Result<Receipt> {
        let mut receipt = Receipt::default();

        match &group[index] {
            Operation::Payment {
                sender,
                receiver,
                amount,
            } => self.transfer(sender, receiver, *amount)?,
            Operation::AssetTransfer {
                sender,
                receiver,
                asset_id,
                amount,
            } => {
                if sender == receiver && *amount == 0 {
                    self.require_opt_in_authorized(group, index, *asset_id)?;
                    self.opt_in(sender, *asset_id)?;
                } else {
                    self.transfer_asset(sender, receiver, *asset_id, *amount)?;
                }
            }
            Operation::AppCreate { sender } => {
                let app_id = self.allocate_id()?;
                let address = Self::instance_address(app_id);
                self.instances.insert(
                    app_id,
                    Instance {
                        id: app_id,
                        creator: *sender,
                        address,
                        globals: GlobalStore::default(),
                        boxes: BoxStore::default(),
                    },
                );
                self.instance_ids.insert(address, app_id);
                receipt.created_app = Some(app_id);

                let mut ctx = CallContext::new(self, &mut receipt, group, index, app_id, *sender);
                crate::process_create(&mut ctx)?;
            }
            Operation::AppCall {
                sender,
                app_id,
                instruction,
            } => {
                require!(
                    self.instances.contains_key(app_id),
                    LedgerError::InstanceNotFound
                );
                require!(
                    payload_len(instruction)? <= self.params.max_call_payload,
                    LedgerError::PayloadTooLarge
                );

                let mut ctx = CallContext::new(self, &mut receipt, group, index, *app_id, *sender);
                crate::process_instruction(&mut ctx, instruction.clone())?;
            }
        }

        Ok(receipt)
    }

    fn allocate_id(&mut self) -> Result<u64> {
        let id = self.next_id;
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(crate::error::OpinionError::ArithmeticOverflow)?;

        Ok(id)
    }

    fn check_min_balances(&self) -> Result<()> {
        for (address, state) in &self.accounts {
            let has_boxes = self
                .instance_ids
                .get(address)
                .and_then(|id| self.instances.get(id))
                .is_some_and(|instance| !instance.boxes.is_empty());
            if state.is_empty() && !has_boxes {
                continue;
            }

            require!(
                state.balance >= self.min_balance(address),
                LedgerError::BelowMinimumBalance
            );
        }

        Ok(())
    }

    pub(crate) fn transfer(&mut self, sender: &Pubkey, receiver: &Pubkey, amount: u64) -> Result<()> {
        self.accounts
            .get_mut(sender)
            .ok_or(LedgerError::InsufficientFunds)?
            .debit(amount)?;

        let round = self.round;
        self.accounts
            .entry(*receiver)
            .or_insert_with(|| AccountState::new(round))
            .credit(amount)
    }

    /// An asset minted by an instance only accepts opt-ins placed directly
    /// after a `Sign` call from the same account to that instance, which has
    /// already run and validated the bundle by the time the opt-in applies.
    fn require_opt_in_authorized(&self, group: &[Operation], index: usize, asset_id: u64) -> Result<()> {
        let asset = self
            .assets
            .get(&asset_id)
            .ok_or(LedgerError::AssetNotFound)?;
        let Some(owner) = asset.app_id else {
            return Ok(());
        };

        let account = group[index].sender();
        let preceded_by_sign = index
            .checked_sub(1)
            .and_then(|previous| group.get(previous))
            .is_some_and(|operation| {
                matches!(
                    operation,
                    Operation::AppCall {
                        sender,
                        app_id,
                        instruction: OpinionInstruction::Sign,
                    } if *sender == account && *app_id == owner
                )
            });
        require!(preceded_by_sign, LedgerError::OptInNotAuthorized);

        Ok(())
    }

    fn opt_in(&mut self, account: &Pubkey, asset_id: u64) -> Result<()> {
        require!(
            self.assets.contains_key(&asset_id),
            LedgerError::AssetNotFound
        );

        let state = self
            .accounts
            .get_mut(account)
            .ok_or(LedgerError::InsufficientFunds)?;
        require!(!state.is_opted_in(asset_id), LedgerError::AlreadyOptedIn);
        state.holdings.insert(asset_id, 0);

        Ok(())
    }

    fn transfer_asset(
        &mut self,
        sender: &Pubkey,
        receiver: &Pubkey,
        asset_id: u64,
        amount: u64,
    ) -> Result<()> {
        require!(
            self.assets.contains_key(&asset_id),
            LedgerError::AssetNotFound
        );
        require!(
            self.accounts
                .get(receiver)
                .is_some_and(|state| state.is_opted_in(asset_id)),
            LedgerError::NotOptedIn
        );

        let held = self
            .accounts
            .get_mut(sender)
            .and_then(|state| state.holdings.get_mut(&asset_id))
            .ok_or(LedgerError::NotOptedIn)?;
        *held = held
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAssetBalance)?;

        let received = self
            .accounts
            .get_mut(receiver)
            .and_then(|state| state.holdings.get_mut(&asset_id))
            .ok_or(LedgerError::NotOptedIn)?;
        *received = received
            .checked_add(amount)
            .ok_or(crate::error::OpinionError::ArithmeticOverflow)?;

        Ok(())
    }

    pub(crate) fn create_asset(&mut self, params: AssetParams) -> Result<u64> {
        params.validate()?;

        let asset_id = self.allocate_id()?;
        let round = self.round;
        self.accounts
            .entry(params.creator)
            .or_insert_with(|| AccountState::new(round))
            .holdings
            .insert(asset_id, params.total);
        self.assets.insert(asset_id, params);

        Ok(asset_id)
    }

    pub(crate) fn configure_asset(
        &mut self,
        sender: &Pubkey,
        asset_id: u64,
        manager: Option<Pubkey>,
        reserve: Option<Pubkey>,
    ) -> Result<()> {
        let asset = self
            .assets
            .get_mut(&asset_id)
            .ok_or(LedgerError::AssetNotFound)?;

        match asset.manager {
            None => return err!(LedgerError::AssetImmutable),
            Some(current) => require_keys_eq!(current, *sender, LedgerError::NotAssetManager),
        }

        asset.manager = manager;
        asset.reserve = reserve;

        Ok(())
    }
}

fn payload_len(instruction: &OpinionInstruction) -> Result<usize> {
    let mut data = Vec::new();
    instruction
        .serialize(&mut data)
        .map_err(|_| error!(LedgerError::EncodingFailed))?;

    Ok(data.len())
}

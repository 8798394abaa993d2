use super::{AssetParams, BoxStore, GlobalStore, InnerOperation, Instance, Ledger, Operation, Receipt};
use crate::error::LedgerError;
use anchor_lang::prelude::*;
use anchor_lang::Event;

/// Everything an instance may observe or touch while one call executes.
pub struct CallContext<'a> {
    ledger: &'a mut Ledger,
    receipt: &'a mut Receipt,
    pub group: &'a [Operation],
    pub group_index: usize,
    pub app_id: u64,
    pub sender: Pubkey,
}

impl<'a> CallContext<'a> {
    pub(crate) fn new(
        ledger: &'a mut Ledger,
        receipt: &'a mut Receipt,
        group: &'a [Operation],
        group_index: usize,
        app_id: u64,
        sender: Pubkey,
    ) -> Self {
        Self {
            ledger,
            receipt,
            group,
            group_index,
            app_id,
            sender,
        }
    }

    pub fn round(&self) -> u64 {
        self.ledger.round()
    }

    pub fn app_address(&self) -> Pubkey {
        Ledger::instance_address(self.app_id)
    }

    fn instance(&self) -> Result<&Instance> {
        self.ledger
            .instance(self.app_id)
            .ok_or_else(|| error!(LedgerError::InstanceNotFound))
    }

    fn instance_mut(&mut self) -> Result<&mut Instance> {
        self.ledger
            .instance_mut(self.app_id)
            .ok_or_else(|| error!(LedgerError::InstanceNotFound))
    }

    pub fn creator(&self) -> Result<Pubkey> {
        Ok(self.instance()?.creator)
    }

    pub fn globals(&self) -> Result<&GlobalStore> {
        Ok(&self.instance()?.globals)
    }

    pub fn globals_mut(&mut self) -> Result<&mut GlobalStore> {
        Ok(&mut self.instance_mut()?.globals)
    }

    pub fn boxes(&self) -> Result<&BoxStore> {
        Ok(&self.instance()?.boxes)
    }

    pub fn box_create(&mut self, name: &[u8], size: u64) -> Result<()> {
        let max_size = self.ledger.params().max_box_size;
        self.instance_mut()?.boxes.create(name, size, max_size)
    }

    pub fn box_replace(&mut self, name: &[u8], offset: u64, data: &[u8]) -> Result<()> {
        self.instance_mut()?.boxes.replace(name, offset, data)
    }

    /// Creates a box sized exactly to `data` and fills it.
    pub fn box_put(&mut self, name: &[u8], data: &[u8]) -> Result<()> {
        self.box_create(name, data.len() as u64)?;
        self.box_replace(name, 0, data)
    }

    pub fn app_balance(&self) -> u64 {
        self.ledger.balance(&self.app_address())
    }

    pub fn app_min_balance(&self) -> u64 {
        self.ledger.min_balance(&self.app_address())
    }

    pub fn asset(&self, asset_id: u64) -> Result<&AssetParams> {
        self.ledger
            .asset(asset_id)
            .ok_or_else(|| error!(LedgerError::AssetNotFound))
    }

    fn push_inner(&mut self, operation: InnerOperation) -> Result<()> {
        require!(
            self.receipt.inner_operations.len() < self.ledger.params().max_inner_operations,
            LedgerError::TooManyInnerOperations
        );

        self.receipt.inner_operations.push(operation);

        Ok(())
    }

    pub fn inner_asset_create(&mut self, mut params: AssetParams) -> Result<u64> {
        params.creator = self.app_address();
        params.app_id = Some(self.app_id);
        let asset_id = self.ledger.create_asset(params)?;
        self.push_inner(InnerOperation::AssetCreate { asset_id })?;
        self.receipt.created_asset = Some(asset_id);

        Ok(asset_id)
    }

    pub fn inner_asset_config(
        &mut self,
        asset_id: u64,
        manager: Option<Pubkey>,
        reserve: Option<Pubkey>,
    ) -> Result<()> {
        let sender = self.app_address();
        self.ledger
            .configure_asset(&sender, asset_id, manager, reserve)?;
        self.push_inner(InnerOperation::AssetConfig {
            asset_id,
            manager,
            reserve,
        })
    }

    pub fn inner_payment(&mut self, receiver: Pubkey, amount: u64) -> Result<()> {
        let sender = self.app_address();
        self.ledger.transfer(&sender, &receiver, amount)?;
        self.push_inner(InnerOperation::Payment { receiver, amount })
    }

    pub fn emit<E: Event>(&mut self, event: E) {
        self.receipt.logs.push(event.data());
    }

    pub fn set_return<T: AnchorSerialize>(&mut self, value: &T) -> Result<()> {
        let mut data = Vec::new();
        value
            .serialize(&mut data)
            .map_err(|_| error!(LedgerError::EncodingFailed))?;
        self.receipt.return_data = Some(data);

        Ok(())
    }
}

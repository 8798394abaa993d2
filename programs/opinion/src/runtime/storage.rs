use crate::{constants::*, error::LedgerError};
use anchor_lang::prelude::*;
use std::collections::BTreeMap;

/// A single global slot value. The ledger only knows integers and byte strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateValue {
    Uint(u64),
    Bytes(Vec<u8>),
}

/// Keyed scalar storage owned by one instance.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<&StateValue>;

    fn put(&mut self, key: &str, value: StateValue);

    fn get_uint(&self, key: &str) -> Option<u64> {
        match self.get(key) {
            Some(StateValue::Uint(value)) => Some(*value),
            _ => None,
        }
    }

    fn put_uint(&mut self, key: &str, value: u64) {
        self.put(key, StateValue::Uint(value));
    }

    fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        match self.get(key) {
            Some(StateValue::Bytes(value)) => Some(value.as_slice()),
            _ => None,
        }
    }

    fn put_bytes(&mut self, key: &str, value: Vec<u8>) {
        self.put(key, StateValue::Bytes(value));
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalStore {
    values: BTreeMap<String, StateValue>,
}

impl KeyValueStore for GlobalStore {
    fn get(&self, key: &str) -> Option<&StateValue> {
        self.values.get(key)
    }

    fn put(&mut self, key: &str, value: StateValue) {
        self.values.insert(key.to_string(), value);
    }
}

/// Named, fixed-size byte regions. A box is sized once at creation and only
/// ever rewritten in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoxStore {
    boxes: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl BoxStore {
    pub fn create(&mut self, name: &[u8], size: u64, max_size: u64) -> Result<()> {
        require!(
            !name.is_empty() && name.len() <= MAX_BOX_NAME_LEN,
            LedgerError::InvalidBoxSize
        );
        require!(size <= max_size, LedgerError::InvalidBoxSize);
        require!(
            !self.boxes.contains_key(name),
            LedgerError::BoxAlreadyExists
        );

        self.boxes.insert(name.to_vec(), vec![0u8; size as usize]);

        Ok(())
    }

    pub fn replace(&mut self, name: &[u8], offset: u64, data: &[u8]) -> Result<()> {
        let contents = self
            .boxes
            .get_mut(name)
            .ok_or(LedgerError::BoxNotFound)?;

        let end = offset
            .checked_add(data.len() as u64)
            .ok_or(LedgerError::BoxOutOfBounds)?;
        require!(end <= contents.len() as u64, LedgerError::BoxOutOfBounds);

        contents[offset as usize..end as usize].copy_from_slice(data);

        Ok(())
    }

    pub fn get(&self, name: &[u8]) -> Option<&[u8]> {
        self.boxes.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &[u8]) -> bool {
        self.boxes.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Balance that must stay reserved while these boxes exist.
    pub fn min_balance(&self, flat: u64, per_byte: u64) -> u64 {
        self.boxes
            .iter()
            .map(|(name, contents)| {
                let bytes = (name.len() + contents.len()) as u64;
                flat.saturating_add(per_byte.saturating_mul(bytes))
            })
            .fold(0u64, u64::saturating_add)
    }
}

use crate::{
    constants::*,
    error::OpinionError,
    runtime::{BoxStore, KeyValueStore},
    utils::*,
};
use anchor_lang::prelude::*;

/// Raw gate bit-field as stored in the instance's global slot.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateFlags(pub u64);

impl GateFlags {
    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, flag: u64) -> bool {
        self.0 & flag == flag
    }

    pub fn has_unknown_bits(self) -> bool {
        self.0 & !GATE_ALL_FLAGS != 0
    }
}

/// One declared eligibility requirement.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum GateRequirement {
    MustHold(Vec<u64>),
    MustNotHold(Vec<u64>),
    MinBalance(u64),
    MaxBalance(u64),
    OnlineValidator,
    MinAccountAge(u64),
    IdentitySegment(String),
}

impl GateRequirement {
    pub fn flag(&self) -> u64 {
        match self {
            GateRequirement::MustHold(_) => GATE_MUST_HOLD,
            GateRequirement::MustNotHold(_) => GATE_MUST_NOT_HOLD,
            GateRequirement::MinBalance(_) => GATE_MIN_BALANCE,
            GateRequirement::MaxBalance(_) => GATE_MAX_BALANCE,
            GateRequirement::OnlineValidator => GATE_ONLINE,
            GateRequirement::MinAccountAge(_) => GATE_MIN_AGE,
            GateRequirement::IdentitySegment(_) => GATE_IDENTITY_SEGMENT,
        }
    }
}

/// Decoded gate declaration, ordered by flag bit. Declarative only: nothing
/// in the signing path consults it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GateConfig {
    pub requirements: Vec<GateRequirement>,
}

impl GateConfig {
    pub fn flags(&self) -> GateFlags {
        GateFlags(
            self.requirements
                .iter()
                .fold(0, |bits, requirement| bits | requirement.flag()),
        )
    }

    pub fn get(&self, flag: u64) -> Option<&GateRequirement> {
        self.requirements
            .iter()
            .find(|requirement| requirement.flag() == flag)
    }

    /// Reads the declaration back from global slots and gate boxes. Returns
    /// `None` when no gates were ever declared.
    pub fn load(store: &impl KeyValueStore, boxes: &BoxStore) -> Result<Option<Self>> {
        let flags = GateFlags(store.get_uint(KEY_GATE_FLAGS).unwrap_or(0));
        if flags.is_empty() {
            return Ok(None);
        }

        let mut requirements = Vec::new();

        if flags.contains(GATE_MUST_HOLD) {
            let blob = boxes.get(HOLD_LIST_BOX).unwrap_or_default();
            requirements.push(GateRequirement::MustHold(decode_ids(blob)?));
        }

        if flags.contains(GATE_MUST_NOT_HOLD) {
            let blob = boxes.get(DENY_LIST_BOX).unwrap_or_default();
            requirements.push(GateRequirement::MustNotHold(decode_ids(blob)?));
        }

        if flags.contains(GATE_MIN_BALANCE) {
            let min = store.get_uint(KEY_GATE_BALANCE_MIN).unwrap_or(0);
            requirements.push(GateRequirement::MinBalance(min));
        }

        if flags.contains(GATE_MAX_BALANCE) {
            let max = store.get_uint(KEY_GATE_BALANCE_MAX).unwrap_or(0);
            requirements.push(GateRequirement::MaxBalance(max));
        }

        if flags.contains(GATE_ONLINE) {
            requirements.push(GateRequirement::OnlineValidator);
        }

        if flags.contains(GATE_MIN_AGE) {
            let age = store.get_uint(KEY_GATE_MIN_AGE).unwrap_or(0);
            requirements.push(GateRequirement::MinAccountAge(age));
        }

        if flags.contains(GATE_IDENTITY_SEGMENT) {
            let root = boxes.get(IDENTITY_ROOT_BOX).unwrap_or_default();
            let root = String::from_utf8(root.to_vec())
                .map_err(|_| error!(OpinionError::FieldLengthViolation))?;
            requirements.push(GateRequirement::IdentitySegment(root));
        }

        Ok(Some(Self { requirements }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::GlobalStore;

    #[test]
    fn test_flag_bits_match_declared_layout() {
        assert_eq!(GateRequirement::MustHold(vec![]).flag(), 0b000_0001);
        assert_eq!(GateRequirement::MustNotHold(vec![]).flag(), 0b000_0010);
        assert_eq!(GateRequirement::MinBalance(0).flag(), 0b000_0100);
        assert_eq!(GateRequirement::MaxBalance(0).flag(), 0b000_1000);
        assert_eq!(GateRequirement::OnlineValidator.flag(), 0b001_0000);
        assert_eq!(GateRequirement::MinAccountAge(0).flag(), 0b010_0000);
        assert_eq!(
            GateRequirement::IdentitySegment(String::new()).flag(),
            0b100_0000
        );
    }

    #[test]
    fn test_unknown_bits() {
        assert!(!GateFlags(GATE_ALL_FLAGS).has_unknown_bits());
        assert!(GateFlags(1 << 7).has_unknown_bits());
    }

    #[test]
    fn test_load_without_declaration() {
        let config = GateConfig::load(&GlobalStore::default(), &BoxStore::default()).unwrap();

        assert_eq!(config, None);
    }

    #[test]
    fn test_load_scalar_and_list_gates() {
        let mut store = GlobalStore::default();
        let mut boxes = BoxStore::default();
        let deny = encode_ids(&[5, 6]);

        store.put_uint(KEY_GATE_FLAGS, GATE_MUST_NOT_HOLD | GATE_MIN_BALANCE | GATE_ONLINE);
        store.put_uint(KEY_GATE_BALANCE_MIN, 1_000_000);
        boxes.create(DENY_LIST_BOX, deny.len() as u64, MAX_BOX_SIZE).unwrap();
        boxes.replace(DENY_LIST_BOX, 0, &deny).unwrap();

        let config = GateConfig::load(&store, &boxes).unwrap().unwrap();

        assert_eq!(
            config.requirements,
            vec![
                GateRequirement::MustNotHold(vec![5, 6]),
                GateRequirement::MinBalance(1_000_000),
                GateRequirement::OnlineValidator,
            ]
        );
        assert_eq!(
            config.flags(),
            GateFlags(GATE_MUST_NOT_HOLD | GATE_MIN_BALANCE | GATE_ONLINE)
        );
    }
}

//! Off-chain evaluation of declared gates against live account state.
//!
//! The opinion instance only stores gate declarations. Clients run this
//! evaluator before deciding whether to submit a signing bundle; `sign`
//! itself never consults it.

pub mod names;

pub use names::*;

use crate::{runtime::Ledger, state::*};
use anchor_lang::prelude::*;

/// The slice of account state a gate can depend on.
pub trait AccountView {
    fn balance(&self, account: &Pubkey) -> u64;

    fn holds_asset(&self, account: &Pubkey, asset_id: u64) -> bool;

    fn is_online(&self, account: &Pubkey) -> bool;

    fn first_seen_round(&self, account: &Pubkey) -> Option<u64>;
}

impl AccountView for Ledger {
    fn balance(&self, account: &Pubkey) -> u64 {
        Ledger::balance(self, account)
    }

    fn holds_asset(&self, account: &Pubkey, asset_id: u64) -> bool {
        self.account(account)
            .is_some_and(|state| state.is_opted_in(asset_id))
    }

    fn is_online(&self, account: &Pubkey) -> bool {
        self.account(account).is_some_and(|state| state.online)
    }

    fn first_seen_round(&self, account: &Pubkey) -> Option<u64> {
        self.account(account).map(|state| state.first_round)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateViolation {
    MissingAsset(u64),
    ForbiddenAsset(u64),
    BalanceTooLow { required: u64, actual: u64 },
    BalanceTooHigh { allowed: u64, actual: u64 },
    NotOnline,
    AccountTooYoung { required: u64, actual: u64 },
    OutsideIdentitySegment { root: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Eligibility {
    pub violations: Vec<GateViolation>,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        self.violations.is_empty()
    }
}

pub fn evaluate(
    gates: &GateConfig,
    account: &Pubkey,
    view: &impl AccountView,
    names: &impl NameResolver,
    round: u64,
) -> Eligibility {
    let mut violations = Vec::new();

    for requirement in &gates.requirements {
        match requirement {
            GateRequirement::MustHold(ids) => violations.extend(
                ids.iter()
                    .filter(|id| !view.holds_asset(account, **id))
                    .map(|id| GateViolation::MissingAsset(*id)),
            ),
            GateRequirement::MustNotHold(ids) => violations.extend(
                ids.iter()
                    .filter(|id| view.holds_asset(account, **id))
                    .map(|id| GateViolation::ForbiddenAsset(*id)),
            ),
            GateRequirement::MinBalance(required) => {
                let actual = view.balance(account);
                if actual < *required {
                    violations.push(GateViolation::BalanceTooLow {
                        required: *required,
                        actual,
                    });
                }
            }
            GateRequirement::MaxBalance(allowed) => {
                let actual = view.balance(account);
                if actual > *allowed {
                    violations.push(GateViolation::BalanceTooHigh {
                        allowed: *allowed,
                        actual,
                    });
                }
            }
            GateRequirement::OnlineValidator => {
                if !view.is_online(account) {
                    violations.push(GateViolation::NotOnline);
                }
            }
            GateRequirement::MinAccountAge(required) => {
                let actual = view
                    .first_seen_round(account)
                    .map_or(0, |first| round.saturating_sub(first));
                if actual < *required {
                    violations.push(GateViolation::AccountTooYoung {
                        required: *required,
                        actual,
                    });
                }
            }
            GateRequirement::IdentitySegment(root) => {
                let inside = names
                    .resolve(account)
                    .is_some_and(|name| is_segment_of(&name, root));
                if !inside {
                    violations.push(GateViolation::OutsideIdentitySegment { root: root.clone() });
                }
            }
        }
    }

    Eligibility { violations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    #[derive(Default)]
    struct FixedView {
        balances: BTreeMap<Pubkey, u64>,
        holdings: BTreeSet<(Pubkey, u64)>,
        online: BTreeSet<Pubkey>,
        first_seen: BTreeMap<Pubkey, u64>,
    }

    impl AccountView for FixedView {
        fn balance(&self, account: &Pubkey) -> u64 {
            self.balances.get(account).copied().unwrap_or(0)
        }

        fn holds_asset(&self, account: &Pubkey, asset_id: u64) -> bool {
            self.holdings.contains(&(*account, asset_id))
        }

        fn is_online(&self, account: &Pubkey) -> bool {
            self.online.contains(account)
        }

        fn first_seen_round(&self, account: &Pubkey) -> Option<u64> {
            self.first_seen.get(account).copied()
        }
    }

    fn voter() -> Pubkey {
        Pubkey::new_from_array([2; 32])
    }

    #[test]
    fn test_eligible_account() {
        let mut view = FixedView::default();
        view.balances.insert(voter(), 5_000_000);
        view.holdings.insert((voter(), 77));
        view.online.insert(voter());
        view.first_seen.insert(voter(), 100);
        let mut names = NameRegistry::default();
        names.insert(voter(), "bob.dao.algo");

        let gates = GateConfig {
            requirements: vec![
                GateRequirement::MustHold(vec![77]),
                GateRequirement::MustNotHold(vec![78]),
                GateRequirement::MinBalance(1_000_000),
                GateRequirement::MaxBalance(10_000_000),
                GateRequirement::OnlineValidator,
                GateRequirement::MinAccountAge(500),
                GateRequirement::IdentitySegment("dao.algo".to_string()),
            ],
        };

        assert!(evaluate(&gates, &voter(), &view, &names, 600).is_eligible());
    }

    #[test]
    fn test_every_violation_reported() {
        let mut view = FixedView::default();
        view.balances.insert(voter(), 50);
        view.holdings.insert((voter(), 78));
        view.first_seen.insert(voter(), 550);

        let gates = GateConfig {
            requirements: vec![
                GateRequirement::MustHold(vec![77]),
                GateRequirement::MustNotHold(vec![78]),
                GateRequirement::MinBalance(1_000_000),
                GateRequirement::OnlineValidator,
                GateRequirement::MinAccountAge(500),
                GateRequirement::IdentitySegment("dao.algo".to_string()),
            ],
        };

        let eligibility = evaluate(&gates, &voter(), &view, &NameRegistry::default(), 600);

        assert_eq!(
            eligibility.violations,
            vec![
                GateViolation::MissingAsset(77),
                GateViolation::ForbiddenAsset(78),
                GateViolation::BalanceTooLow {
                    required: 1_000_000,
                    actual: 50
                },
                GateViolation::NotOnline,
                GateViolation::AccountTooYoung {
                    required: 500,
                    actual: 50
                },
                GateViolation::OutsideIdentitySegment {
                    root: "dao.algo".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_balance_ceiling() {
        let mut view = FixedView::default();
        view.balances.insert(voter(), 11);
        let gates = GateConfig {
            requirements: vec![GateRequirement::MaxBalance(10)],
        };

        assert_eq!(
            evaluate(&gates, &voter(), &view, &NameRegistry::default(), 1).violations,
            vec![GateViolation::BalanceTooHigh {
                allowed: 10,
                actual: 11
            }]
        );
    }
}

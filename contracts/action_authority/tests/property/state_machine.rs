#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the registry timelock state machine.
//!
//! Invariants tested:
//! - A confirm only succeeds once the delay has elapsed since the proposal
//! - A matching proposal confirms on an empty key once the delay has passed
//! - Without replacement, an active value is only ever swapped after a revoke
//! - The contract enforces the exact delay boundary for any delay and start time

use action_authority::timelock::{apply, Policy, Slot, Transition};
use action_authority::{
    ActionAuthorityContract, ActionAuthorityContractClient, ContractError, Role,
};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env};

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Propose(#[proptest(strategy = "0u8..4")] u8),
    Confirm(#[proptest(strategy = "0u8..4")] u8),
    Cancel,
    Revoke,
    Wait(#[proptest(strategy = "0u64..250")] u64),
}

fn run(ops: &[Op], policy: Policy) -> Result<(), TestCaseError> {
    let mut slot: Slot<u8> = Slot::default();
    let mut now = 1_000u64;

    for op in ops {
        let before = slot.clone();
        let transition = match op {
            Op::Wait(seconds) => {
                now += seconds;
                continue;
            }
            Op::Propose(v) => Transition::Propose(*v),
            Op::Confirm(v) => Transition::Confirm(*v),
            Op::Cancel => Transition::Cancel,
            Op::Revoke => Transition::Revoke,
        };

        match apply(slot.clone(), transition.clone(), now, policy) {
            Ok(next) => {
                if let Transition::Confirm(v) = transition {
                    let (_, proposed_at) = before.pending.clone().unwrap();
                    prop_assert!(now >= proposed_at + policy.delay);
                    prop_assert_eq!(next.active, Some(v));
                    prop_assert!(next.pending.is_none());
                    if !policy.replace_active {
                        prop_assert!(before.active.is_none());
                    }
                }
                if let Transition::Propose(v) = transition {
                    prop_assert_eq!(next.pending.clone(), Some((v, now)));
                    prop_assert_eq!(next.active.clone(), before.active.clone());
                }
                slot = next;
            }
            Err(err) => {
                // A matching, matured proposal on an empty key always confirms.
                if let (Transition::Confirm(v), Some((pending, proposed_at))) =
                    (&transition, &before.pending)
                {
                    let matured = now >= proposed_at + policy.delay;
                    prop_assert!(
                        !(pending == v && matured && before.active.is_none()),
                        "unexpected {:?}",
                        err
                    );
                }
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_strict_registry_invariants(ops in proptest::collection::vec(any::<Op>(), 0..40)) {
        run(&ops, Policy { delay: 100, replace_active: false })?;
    }

    #[test]
    fn prop_replacing_registry_invariants(ops in proptest::collection::vec(any::<Op>(), 0..40)) {
        run(&ops, Policy { delay: 100, replace_active: true })?;
    }

    #[test]
    fn prop_confirm_before_propose_always_fails(value in any::<u8>(), now in any::<u64>()) {
        let result = apply(
            Slot::<u8>::default(),
            Transition::Confirm(value),
            now,
            Policy { delay: 0, replace_active: true },
        );
        prop_assert_eq!(result, Err(ContractError::NoPendingProposal));
    }

    /// The contract rejects a confirm one second early and accepts it exactly on time.
    #[test]
    fn prop_contract_delay_boundary(delay in 1u64..10_000_000, start in 1u64..1_000_000_000) {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(start);

        let contract_id = env.register(ActionAuthorityContract, ());
        let client = ActionAuthorityContractClient::new(&env, &contract_id);
        let owner = Address::generate(&env);
        client.initialize(&owner, &delay);

        let operator = Address::generate(&env);
        client.grant_role(&owner, &Role::ActionProposer, &operator);
        client.grant_role(&owner, &Role::ActionExecutor, &operator);

        let handler = Address::generate(&env);
        let key = client.propose_action(&operator, &handler);

        env.ledger().set_timestamp(start + delay - 1);
        let early = client.try_confirm_action(&operator, &handler);
        prop_assert_eq!(early, Err(Ok(ContractError::DelayNotElapsed)));

        env.ledger().set_timestamp(start + delay);
        client.confirm_action(&operator, &handler);
        prop_assert_eq!(client.resolve_action(&key), handler);
    }
}

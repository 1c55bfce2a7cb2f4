#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for fee accrual.
//!
//! Invariants tested:
//! - Accrual is monotone in elapsed time
//! - Splitting an interval never charges more than charging it at once,
//!   and loses at most one unit to rounding
//! - A year at the maximum rate never exceeds the balance
//! - Charging through the contract twice at the same time never double-charges
//! - Only an approved handler moves a checkpoint

use action_authority::fees::accrued_fee;
use action_authority::{ActionAuthorityContract, ActionAuthorityContractClient, Role};
use common::{MAX_FEE_RATE_BPS, SECONDS_PER_YEAR};
use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env, Symbol};

proptest! {
    #[test]
    fn prop_fee_monotone_in_elapsed(
        balance in 0i128..1_000_000_000_000_000,
        rate in 0u32..=MAX_FEE_RATE_BPS,
        t1 in 0u64..(10 * SECONDS_PER_YEAR),
        extra in 0u64..(10 * SECONDS_PER_YEAR),
    ) {
        let short = accrued_fee(balance, rate, t1).unwrap();
        let long = accrued_fee(balance, rate, t1 + extra).unwrap();
        prop_assert!(short <= long);
    }

    #[test]
    fn prop_split_interval_never_overcharges(
        balance in 0i128..1_000_000_000_000_000,
        rate in 0u32..=MAX_FEE_RATE_BPS,
        t1 in 0u64..SECONDS_PER_YEAR,
        t2 in 0u64..SECONDS_PER_YEAR,
    ) {
        let whole = accrued_fee(balance, rate, t1 + t2).unwrap();
        let split = accrued_fee(balance, rate, t1).unwrap() + accrued_fee(balance, rate, t2).unwrap();
        prop_assert!(split <= whole);
        prop_assert!(whole - split <= 1);
    }

    #[test]
    fn prop_one_year_at_max_rate_bounded_by_balance(balance in 0i128..1_000_000_000_000_000) {
        let fee = accrued_fee(balance, MAX_FEE_RATE_BPS, SECONDS_PER_YEAR).unwrap();
        prop_assert_eq!(fee, balance);
    }

    #[test]
    fn prop_contract_never_double_charges(
        balance in 0i128..1_000_000_000_000,
        rate in 0u32..=1_000u32,
        elapsed in 1u64..(2 * SECONDS_PER_YEAR),
    ) {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(1_000);

        let contract_id = env.register(ActionAuthorityContract, ());
        let client = ActionAuthorityContractClient::new(&env, &contract_id);
        let owner = Address::generate(&env);
        client.initialize(&owner, &0);

        let handler = Address::generate(&env);
        client.grant_role(&owner, &Role::ActionProposer, &owner);
        client.grant_role(&owner, &Role::ActionExecutor, &owner);
        client.propose_action(&owner, &handler);
        client.confirm_action(&owner, &handler);

        let tenant = Address::generate(&env);
        let vault = Address::generate(&env);
        let protocol = Symbol::new(&env, "ProtoX");

        prop_assert_eq!(client.charge_fee(&handler, &tenant, &protocol, &vault, &balance, &rate), 0);

        env.ledger().set_timestamp(1_000 + elapsed);
        let fee = client.charge_fee(&handler, &tenant, &protocol, &vault, &balance, &rate);
        prop_assert_eq!(fee, accrued_fee(balance, rate, elapsed).unwrap());
        prop_assert_eq!(client.charge_fee(&handler, &tenant, &protocol, &vault, &balance, &rate), 0);
    }
}

proptest! {
    #[test]
    fn prop_unapproved_caller_never_moves_checkpoint(
        balance in 0i128..1_000_000_000_000,
        rate in 0u32..=MAX_FEE_RATE_BPS,
        elapsed in 0u64..(2 * SECONDS_PER_YEAR),
    ) {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(1_000 + elapsed);

        let contract_id = env.register(ActionAuthorityContract, ());
        let client = ActionAuthorityContractClient::new(&env, &contract_id);
        client.initialize(&Address::generate(&env), &0);

        let tenant = Address::generate(&env);
        let vault = Address::generate(&env);
        let protocol = Symbol::new(&env, "ProtoX");

        let result = client.try_charge_fee(&tenant, &tenant, &protocol, &vault, &balance, &rate);
        prop_assert!(result.is_err());
        prop_assert_eq!(client.last_charged_at(&tenant, &protocol, &vault), 0);
    }
}

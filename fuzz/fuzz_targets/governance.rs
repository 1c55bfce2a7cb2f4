#![no_main]

use action_authority::{
    ActionAuthorityContract, ActionAuthorityContractClient, Category, Duty, RegistryKey, Role,
};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env, Symbol};

const ACCOUNTS: usize = 4;
const TARGETS: usize = 3;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Grant { caller: u8, role: u8, account: u8 },
    Revoke { caller: u8, role: u8, account: u8 },
    ProposeAction { caller: u8, target: u8 },
    ConfirmAction { caller: u8, target: u8 },
    CancelAction { caller: u8, target: u8 },
    RevokeAction { caller: u8, target: u8 },
    ProposePool { caller: u8, target: u8 },
    ConfirmPool { caller: u8, target: u8 },
    RevokePool { caller: u8, target: u8 },
    Charge { tenant: u8, target: u8, balance: i64, rate_bps: u16 },
    Wait { seconds: u32 },
}

fn role_from(byte: u8) -> Role {
    let categories = [
        Category::Action,
        Category::Pool,
        Category::Fee,
        Category::Transaction,
    ];
    let duties = [Duty::Proposer, Duty::Executor, Duty::Canceler, Duty::Disposer];
    match byte % 18 {
        16 => Role::Owner,
        17 => Role::RoleManager,
        n => Role::for_category(categories[(n / 4) as usize], duties[(n % 4) as usize]),
    }
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let contract_id = env.register(ActionAuthorityContract, ());
    let client = ActionAuthorityContractClient::new(&env, &contract_id);

    let accounts: Vec<Address> = (0..ACCOUNTS).map(|_| Address::generate(&env)).collect();
    let targets: Vec<Address> = (0..TARGETS).map(|_| Address::generate(&env)).collect();
    let protocol = Symbol::new(&env, "ProtoX");
    client.initialize(&accounts[0], &3_600);

    // Charges go through one approved handler, registered before the run.
    let handler = Address::generate(&env);
    client.grant_role(&accounts[0], &Role::ActionProposer, &handler);
    client.grant_role(&accounts[0], &Role::ActionExecutor, &handler);
    client.propose_action(&handler, &handler);
    env.ledger().set_timestamp(1_000 + 3_600);
    client.confirm_action(&handler, &handler);

    let account = |i: u8| &accounts[i as usize % ACCOUNTS];
    let target = |i: u8| &targets[i as usize % TARGETS];

    // Only looking for panics and broken invariants; rejected calls are expected.
    for action in actions {
        match action {
            FuzzAction::Grant { caller, role, account: to } => {
                let _ = client.try_grant_role(account(caller), &role_from(role), account(to));
            }
            FuzzAction::Revoke { caller, role, account: from } => {
                let _ = client.try_revoke_role(account(caller), &role_from(role), account(from));
            }
            FuzzAction::ProposeAction { caller, target: t } => {
                let _ = client.try_propose_action(account(caller), target(t));
            }
            FuzzAction::ConfirmAction { caller, target: t } => {
                let _ = client.try_confirm_action(account(caller), target(t));
            }
            FuzzAction::CancelAction { caller, target: t } => {
                let key = client.action_key(target(t));
                let _ = client.try_cancel_action(account(caller), &key);
            }
            FuzzAction::RevokeAction { caller, target: t } => {
                let key = client.action_key(target(t));
                let _ = client.try_revoke_action(account(caller), &key);
            }
            FuzzAction::ProposePool { caller, target: t } => {
                let _ = client.try_propose_pool(account(caller), &protocol, target(t));
            }
            FuzzAction::ConfirmPool { caller, target: t } => {
                let _ = client.try_confirm_pool(account(caller), &protocol, target(t));
            }
            FuzzAction::RevokePool { caller, target: t } => {
                let key = client.pool_key(target(t));
                let _ = client.try_revoke_pool(account(caller), &protocol, &key);
            }
            FuzzAction::Charge { tenant, target: t, balance, rate_bps } => {
                let _ = client.try_charge_fee(
                    &handler,
                    account(tenant),
                    &protocol,
                    target(t),
                    &i128::from(balance),
                    &u32::from(rate_bps),
                );
            }
            FuzzAction::Wait { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(u64::from(seconds)));
            }
        }

        assert!(client.owner_count() >= 1);
        for t in &targets {
            let key = client.action_key(t);
            let entry = client.get_entry(&RegistryKey::Action(key.clone()));
            if entry.active.is_some() {
                assert_eq!(client.resolve_action(&key), t.clone());
            }
        }
    }
});

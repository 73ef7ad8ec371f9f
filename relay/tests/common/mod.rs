//! Shared cw-multi-test setup for the Quorum Relay integration tests.

#![allow(dead_code)]

use cosmwasm_std::{coins, Addr, Binary, Empty, Uint128};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;
use serde::de::DeserializeOwned;

use quorum_relay::msg::{
    ExecuteMsg, InstantiateMsg, MessageDigestResponse, QueryMsg, ValidatorInit,
};
use quorum_relay::ContractError;

pub const DENOM: &str = "uluna";
pub const LOCAL_DOMAIN: u64 = 1;
pub const REMOTE_DOMAIN: u64 = 56;
pub const INITIAL_BALANCE: u128 = 10_000_000_000;
pub const INITIAL_LIQUIDITY: u128 = 1_000_000;

/// Private keys are 32 copies of these bytes
pub const VALIDATOR_KEYS: [u8; 3] = [7, 8, 9];

/// EVM addresses of the keys above
pub const VALIDATOR_SIGNERS: [&str; 3] = [
    "0x4a62316623ad457f02cdc5d997ded67a383ec569",
    "0x99c851eaa3c3976914d63b822c67e201ec0bfbb8",
    "0x58da990a8f4a3a6ca7cb6315d68a140105917352",
];

/// Key that no validator registered
pub const OUTSIDER_KEY: u8 = 42;

pub fn contract_relay() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        quorum_relay::contract::execute,
        quorum_relay::contract::instantiate,
        quorum_relay::contract::query,
    )
    .with_migrate(quorum_relay::contract::migrate);
    Box::new(contract)
}

pub struct Suite {
    pub app: App,
    pub contract: Addr,
    pub admin: Addr,
    pub collector: Addr,
    pub relayer: Addr,
    pub user: Addr,
    pub validators: Vec<Addr>,
}

/// Three validators with a threshold of two, one relayer, and the remote
/// domain configured with a 1% fee.
pub fn setup() -> Suite {
    setup_with_threshold(2)
}

pub fn setup_with_threshold(required_validations: u32) -> Suite {
    let mut app = App::default();

    let admin = Addr::unchecked("terra1admin");
    let collector = Addr::unchecked("terra1collector");
    let relayer = Addr::unchecked("terra1relayer");
    let user = Addr::unchecked("terra1user");
    let validators: Vec<Addr> = ["terra1val1", "terra1val2", "terra1val3"]
        .iter()
        .map(|v| Addr::unchecked(*v))
        .collect();

    app.init_modules(|router, _, storage| {
        for account in [&admin, &user, &relayer] {
            router
                .bank
                .init_balance(storage, account, coins(INITIAL_BALANCE, DENOM))
                .unwrap();
        }
    });

    let code_id = app.store_code(contract_relay());

    let contract = app
        .instantiate_contract(
            code_id,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                fee_collector: collector.to_string(),
                denom: DENOM.to_string(),
                local_domain_id: LOCAL_DOMAIN,
                validators: validators
                    .iter()
                    .zip(VALIDATOR_SIGNERS)
                    .map(|(identity, signer)| ValidatorInit {
                        identity: identity.to_string(),
                        signer: signer.to_string(),
                    })
                    .collect(),
                required_validations,
                relayers: vec![relayer.to_string()],
            },
            &[],
            "quorum-relay",
            Some(admin.to_string()),
        )
        .unwrap();

    let mut suite = Suite {
        app,
        contract,
        admin,
        collector,
        relayer,
        user,
        validators,
    };

    suite
        .set_chain(REMOTE_DOMAIN, true, 100, 1_000_000, 10_000_000, 100)
        .unwrap();

    let admin = suite.admin.clone();
    suite
        .execute_with_funds(
            &admin,
            &ExecuteMsg::AddLiquidity {
                amount: Uint128::new(INITIAL_LIQUIDITY),
            },
            INITIAL_LIQUIDITY,
        )
        .unwrap();

    suite
}

impl Suite {
    pub fn execute(&mut self, sender: &Addr, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.contract.clone(), msg, &[])
    }

    pub fn execute_with_funds(
        &mut self,
        sender: &Addr,
        msg: &ExecuteMsg,
        amount: u128,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.contract.clone(),
            msg,
            &coins(amount, DENOM),
        )
    }

    pub fn query<T: DeserializeOwned>(&self, msg: &QueryMsg) -> T {
        self.app
            .wrap()
            .query_wasm_smart(self.contract.clone(), msg)
            .unwrap()
    }

    pub fn set_chain(
        &mut self,
        domain_id: u64,
        supported: bool,
        min_amount: u128,
        max_amount: u128,
        daily_limit: u128,
        fee_bps: u64,
    ) -> anyhow::Result<AppResponse> {
        let admin = self.admin.clone();
        self.execute(
            &admin,
            &ExecuteMsg::SetChainConfig {
                domain_id,
                supported,
                min_amount: Uint128::new(min_amount),
                max_amount: Uint128::new(max_amount),
                daily_limit: Uint128::new(daily_limit),
                fee_bps,
            },
        )
    }

    /// Bridge `amount` from the default user to the remote domain
    pub fn bridge(&mut self, amount: u128) -> anyhow::Result<AppResponse> {
        let user = self.user.clone();
        self.bridge_from(&user, amount, REMOTE_DOMAIN)
    }

    pub fn bridge_from(
        &mut self,
        sender: &Addr,
        amount: u128,
        domain_id: u64,
    ) -> anyhow::Result<AppResponse> {
        self.execute_with_funds(
            sender,
            &ExecuteMsg::Bridge {
                recipient: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
                amount: Uint128::new(amount),
                domain_id,
            },
            amount,
        )
    }

    pub fn validate(&mut self, validator: &Addr, request_id: u64) -> anyhow::Result<AppResponse> {
        self.execute(validator, &ExecuteMsg::ValidateBridge { request_id })
    }

    pub fn refund(&mut self, caller: &Addr, request_id: u64) -> anyhow::Result<AppResponse> {
        self.execute(caller, &ExecuteMsg::Refund { request_id })
    }

    pub fn digest(
        &self,
        source_request_id: u64,
        recipient: &Addr,
        amount: u128,
        source_domain_id: u64,
    ) -> [u8; 32] {
        let res: MessageDigestResponse = self.query(&QueryMsg::MessageDigest {
            source_request_id,
            recipient: recipient.to_string(),
            amount: Uint128::new(amount),
            source_domain_id,
        });
        res.digest.as_slice().try_into().unwrap()
    }

    /// Submit an inbound transfer signed by the given keys
    pub fn process_signed(
        &mut self,
        source_request_id: u64,
        recipient: &Addr,
        amount: u128,
        source_domain_id: u64,
        keys: &[u8],
    ) -> anyhow::Result<AppResponse> {
        let digest = self.digest(source_request_id, recipient, amount, source_domain_id);
        let signatures = keys.iter().map(|k| sign(*k, &digest)).collect();
        let relayer = self.relayer.clone();
        self.process_incoming(
            &relayer,
            source_request_id,
            recipient,
            amount,
            source_domain_id,
            signatures,
        )
    }

    pub fn process_incoming(
        &mut self,
        relayer: &Addr,
        source_request_id: u64,
        recipient: &Addr,
        amount: u128,
        source_domain_id: u64,
        signatures: Vec<Binary>,
    ) -> anyhow::Result<AppResponse> {
        self.execute(
            relayer,
            &ExecuteMsg::ProcessIncoming {
                source_request_id,
                recipient: recipient.to_string(),
                amount: Uint128::new(amount),
                source_domain_id,
                signatures,
            },
        )
    }

    pub fn advance(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += seconds / 5;
        });
    }

    pub fn balance(&self, addr: &Addr) -> u128 {
        self.app
            .wrap()
            .query_balance(addr, DENOM)
            .unwrap()
            .amount
            .u128()
    }
}

/// 65-byte `r || s || v` signature over a prehashed digest, `v` in {27, 28}
pub fn sign(key: u8, digest: &[u8; 32]) -> Binary {
    let signing_key = SigningKey::from_slice(&[key; 32]).unwrap();
    let (signature, recovery_id) = signing_key.sign_prehash_recoverable(digest).unwrap();
    let mut bytes = signature.to_bytes().to_vec();
    bytes.push(recovery_id.to_byte() + 27);
    Binary::from(bytes)
}

pub fn attr(res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

pub fn assert_error(res: anyhow::Result<AppResponse>, expected: ContractError) {
    assert_eq!(res.unwrap_err().root_cause().to_string(), expected.to_string());
}

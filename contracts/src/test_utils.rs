//! Unit-testing utilities for the token components.
use std::collections::HashSet;

use alloy_primitives::{address, Address, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::SolEvent;

use crate::host::{CallContext, Host};

/// Block Timestamp - Epoch timestamp: 1st January 2025 `00::00::00`.
pub(crate) const BLOCK_TIMESTAMP: u64 = 1_735_689_600;
/// Viction mainnet chain id.
pub(crate) const CHAIN_ID: u64 = 88;

/// Dummy token address set for tests.
pub(crate) const TOKEN: Address =
    address!("dCE82b5f92C98F27F116F70491a487EFFDb6a2a9");

/// In-memory [`Host`] with a fixed block and a configurable set of contract
/// accounts.
#[derive(Clone, Debug)]
pub(crate) struct MockHost {
    pub(crate) timestamp: u64,
    pub(crate) chain_id: u64,
    pub(crate) contracts: HashSet<Address>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            timestamp: BLOCK_TIMESTAMP,
            chain_id: CHAIN_ID,
            contracts: HashSet::from([TOKEN]),
        }
    }
}

impl Host for MockHost {
    fn block_timestamp(&self) -> u64 {
        self.timestamp
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn has_code(&self, account: Address) -> bool {
        self.contracts.contains(&account)
    }
}

impl MockHost {
    /// Marks `account` as a contract account.
    pub(crate) fn with_contract(mut self, account: Address) -> Self {
        self.contracts.insert(account);
        self
    }

    /// Context of a call from `sender` into [`TOKEN`] without value.
    pub(crate) fn ctx(&self, sender: Address) -> CallContext<'_> {
        self.ctx_at(sender, TOKEN)
    }

    /// Context of a call from `sender` into `contract` without value.
    pub(crate) fn ctx_at(
        &self,
        sender: Address,
        contract: Address,
    ) -> CallContext<'_> {
        CallContext::new(self, sender, contract, U256::ZERO)
    }

    /// Context of a call from `sender` into [`TOKEN`] carrying `value`.
    pub(crate) fn ctx_with_value(
        &self,
        sender: Address,
        value: U256,
    ) -> CallContext<'_> {
        CallContext::new(self, sender, TOKEN, value)
    }
}

/// Asserts that the `expected` event was emitted during the call.
pub(crate) fn emits<E: SolEvent>(ctx: &CallContext<'_>, expected: &E) -> bool {
    let expected = expected.encode_log_data();
    ctx.logs().iter().rev().any(|log| log.data == expected)
}

/// Signs `hash` with `signer`, returning the `(v, r, s)` triple with `v` in
/// `{27, 28}`.
pub(crate) fn sign_hash(
    signer: &PrivateKeySigner,
    hash: B256,
) -> (u8, B256, B256) {
    let signature =
        signer.sign_hash_sync(&hash).expect("should sign a hash");
    let v = 27 + u8::from(signature.v());
    (v, signature.r().into(), signature.s().into())
}

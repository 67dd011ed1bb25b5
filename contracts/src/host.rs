//! Execution environment seen by a contract call.
//!
//! On-chain, a contract reads the caller, the attached value and block data
//! from the VM. Here those are supplied by a [`Host`] implementation and
//! bundled per call into a [`CallContext`], which also collects the effects
//! the call produces outside of the contract's own state: emitted events and
//! native coin payouts.

use alloy_primitives::{Address, Log, U256};
use alloy_sol_types::SolEvent;

/// Chain-level information a contract may query during a call.
pub trait Host {
    /// Gets the Unix timestamp of the block being executed.
    fn block_timestamp(&self) -> u64;

    /// Gets the chain ID of the current chain.
    fn chain_id(&self) -> u64;

    /// Determines if an account has code.
    ///
    /// Note that this is insufficient to determine if an address is an
    /// externally owned account: during deployment a contract account only
    /// gets its code at the very end.
    fn has_code(&self, account: Address) -> bool;
}

/// A native coin payout requested by a contract during a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeTransfer {
    /// Recipient of the payout.
    pub to: Address,
    /// Amount of native coin, in wei.
    pub value: U256,
}

/// Effects of a finished call that the host has to apply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    /// Events emitted by the contract, in emission order.
    pub logs: Vec<Log>,
    /// Native coin leaving the contract, in request order.
    pub transfers: Vec<NativeTransfer>,
    /// Whether a payable entry point took the attached value.
    pub value_accepted: bool,
}

/// Context of a single call into a contract.
pub struct CallContext<'a> {
    host: &'a dyn Host,
    sender: Address,
    contract: Address,
    value: U256,
    effects: Effects,
}

impl<'a> CallContext<'a> {
    /// Creates the context for a call from `sender` into `contract` with
    /// `value` native coin attached.
    #[must_use]
    pub fn new(
        host: &'a dyn Host,
        sender: Address,
        contract: Address,
        value: U256,
    ) -> Self {
        Self { host, sender, contract, value, effects: Effects::default() }
    }

    /// Returns the address of the account that called the contract.
    #[must_use]
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Returns the native coin attached to the call, in wei.
    #[must_use]
    pub fn value(&self) -> U256 {
        self.value
    }

    /// Takes the native coin attached to the call, marking the call as
    /// payable. Hosts reject calls that carry value nobody accepted.
    pub fn accept_value(&mut self) -> U256 {
        self.effects.value_accepted = true;
        self.value
    }

    /// Returns the address of the contract being called.
    #[must_use]
    pub fn contract_address(&self) -> Address {
        self.contract
    }

    /// Returns the timestamp of the block being executed.
    #[must_use]
    pub fn block_timestamp(&self) -> u64 {
        self.host.block_timestamp()
    }

    /// Returns the chain ID of the current chain.
    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.host.chain_id()
    }

    /// Determines if `account` has code.
    #[must_use]
    pub fn has_code(&self, account: Address) -> bool {
        self.host.has_code(account)
    }

    /// Whether the immediate caller is a contract account.
    #[must_use]
    pub fn caller_is_contract(&self) -> bool {
        self.host.has_code(self.sender)
    }

    /// Records `event` as emitted by the called contract.
    pub fn emit<E: SolEvent>(&mut self, event: &E) {
        self.effects
            .logs
            .push(Log { address: self.contract, data: event.encode_log_data() });
    }

    /// Requests a payout of `value` native coin from the contract to `to`.
    pub fn send_value(&mut self, to: Address, value: U256) {
        self.effects.transfers.push(NativeTransfer { to, value });
    }

    /// Events emitted so far during this call.
    #[must_use]
    pub fn logs(&self) -> &[Log] {
        &self.effects.logs
    }

    /// Native coin payouts requested so far during this call.
    #[must_use]
    pub fn transfers(&self) -> &[NativeTransfer] {
        &self.effects.transfers
    }

    /// Consumes the context, returning the effects the host has to apply.
    #[must_use]
    pub fn into_effects(self) -> Effects {
        self.effects
    }
}

impl core::fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CallContext")
            .field("sender", &self.sender)
            .field("contract", &self.contract)
            .field("value", &self.value)
            .field("effects", &self.effects)
            .finish_non_exhaustive()
    }
}

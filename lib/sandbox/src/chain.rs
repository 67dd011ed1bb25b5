//! In-memory chain executing calls into VRC25 token contracts.

use std::{
    collections::{HashMap, HashSet},
    ops::Deref,
};

use alloy_primitives::{address, Address, Log, U256};
use alloy_sol_types::SolEvent;
use vrc25::host::{CallContext, Effects, Host};

use crate::{Account, Error};

/// Viction mainnet chain id.
pub const DEFAULT_CHAIN_ID: u64 = 88;

/// Block Timestamp - Epoch timestamp: 1st January 2025 `00::00::00`.
pub const GENESIS_TIMESTAMP: u64 = 1_735_689_600;

/// Deployer of the accounts returned by [`Chain::create_contract_account`].
const FACTORY: Address = address!("000000000000000000000000000000000000fAC7");

/// A deployed contract: its address and its state.
///
/// Read-only methods of the state are reachable through [`Deref`], mutating
/// calls go through [`Chain::transact`].
#[derive(Clone, Debug)]
pub struct Contract<T> {
    address: Address,
    state: T,
}

impl<T> Contract<T> {
    /// Address the contract was deployed at.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }
}

impl<T> Deref for Contract<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.state
    }
}

/// World state of the sandbox: native balances, code, block data and the
/// event journal.
#[derive(Clone, Debug)]
pub struct Chain {
    chain_id: u64,
    timestamp: u64,
    balances: HashMap<Address, U256>,
    code: HashSet<Address>,
    nonces: HashMap<Address, u64>,
    logs: Vec<Log>,
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(DEFAULT_CHAIN_ID)
    }
}

impl Host for Chain {
    fn block_timestamp(&self) -> u64 {
        self.timestamp
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn has_code(&self, account: Address) -> bool {
        self.code.contains(&account)
    }
}

impl Chain {
    /// Creates an empty chain with id `chain_id` at [`GENESIS_TIMESTAMP`].
    #[must_use]
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            timestamp: GENESIS_TIMESTAMP,
            balances: HashMap::new(),
            code: HashSet::new(),
            nonces: HashMap::new(),
            logs: Vec::new(),
        }
    }

    /// Returns the native balance of `account`.
    #[must_use]
    pub fn native_balance(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Credits `value` native coin to `account` out of thin air.
    pub fn fund(&mut self, account: Address, value: U256) {
        self.credit(account, value);
    }

    /// Creates a random externally owned account holding `funding` native
    /// coin.
    pub fn create_account(&mut self, funding: U256) -> Account {
        let account = Account::random();
        self.fund(account.address(), funding);
        account
    }

    /// Creates an account with code that can act as an intermediating
    /// contract in calls.
    pub fn create_contract_account(&mut self) -> Address {
        let nonce = self.use_nonce(FACTORY);
        let account = FACTORY.create(nonce);
        self.code.insert(account);
        account
    }

    /// Moves block time forward by `seconds`.
    pub fn advance_time(&mut self, seconds: u64) {
        self.timestamp = self.timestamp.saturating_add(seconds);
    }

    /// Events journaled so far, across all contracts.
    #[must_use]
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Whether `event` was emitted by any committed call.
    #[must_use]
    pub fn emitted<E: SolEvent>(&self, event: &E) -> bool {
        let expected = event.encode_log_data();
        self.logs.iter().any(|log| log.data == expected)
    }

    /// Deploys a contract from `deployer`, running `init` as its constructor.
    ///
    /// The contract lands at the `CREATE` address of `deployer` and its
    /// current nonce.
    ///
    /// # Errors
    ///
    /// * [`Error::Reverted`] - If `init` fails. Nothing is deployed.
    pub fn deploy<T, E>(
        &mut self,
        deployer: Address,
        init: impl FnOnce(&mut CallContext<'_>) -> Result<T, E>,
    ) -> Result<Contract<T>, Error<E>> {
        let nonce = self.nonces.get(&deployer).copied().unwrap_or_default();
        let address = deployer.create(nonce);

        let host: &Self = self;
        let mut ctx = CallContext::new(host, deployer, address, U256::ZERO);
        let state = init(&mut ctx).map_err(Error::Reverted)?;
        let effects = ctx.into_effects();

        self.use_nonce(deployer);
        self.code.insert(address);
        self.logs.extend(effects.logs);
        tracing::info!(target: "sandbox", %deployer, contract = %address, "deployed");

        Ok(Contract { address, state })
    }

    /// Executes `f` as a call from `sender` into `contract`, attaching
    /// `value` native coin.
    ///
    /// The call is all-or-nothing: if `f` fails, leaves a non-zero `value`
    /// unaccepted, or the contract requests more native payouts than it
    /// holds, the contract state is restored and no native coin moves.
    /// Otherwise the attached value is moved to the contract, the payouts are
    /// applied and the emitted events journaled.
    ///
    /// Only payable entry points, those calling
    /// [`CallContext::accept_value`], may receive a non-zero `value`.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientFunds`] - If `sender` cannot cover `value`, or
    ///   the contract cannot cover its payouts.
    /// * [`Error::NonPayable`] - If `value` is non-zero and `f` did not accept
    ///   it.
    /// * [`Error::Reverted`] - If `f` fails.
    pub fn transact<T: Clone, R, E>(
        &mut self,
        contract: &mut Contract<T>,
        sender: Address,
        value: U256,
        f: impl FnOnce(&mut T, &mut CallContext<'_>) -> Result<R, E>,
    ) -> Result<R, Error<E>> {
        let balance = self.native_balance(sender);
        if balance < value {
            return Err(Error::InsufficientFunds {
                account: sender,
                balance,
                needed: value,
            });
        }

        let snapshot = contract.state.clone();
        let host: &Self = self;
        let mut ctx = CallContext::new(host, sender, contract.address, value);
        let result = f(&mut contract.state, &mut ctx);
        let effects = ctx.into_effects();

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                contract.state = snapshot;
                tracing::debug!(target: "sandbox", %sender, contract = %contract.address, "call reverted");
                return Err(Error::Reverted(e));
            }
        };

        if !value.is_zero() && !effects.value_accepted {
            contract.state = snapshot;
            tracing::debug!(target: "sandbox", %sender, contract = %contract.address, %value, "value sent to non-payable call");
            return Err(Error::NonPayable { value });
        }

        let available =
            self.native_balance(contract.address).saturating_add(value);
        let payouts = effects
            .transfers
            .iter()
            .fold(U256::ZERO, |acc, t| acc.saturating_add(t.value));
        if payouts > available {
            contract.state = snapshot;
            tracing::warn!(target: "sandbox", contract = %contract.address, %available, %payouts, "payouts exceed contract balance");
            return Err(Error::InsufficientFunds {
                account: contract.address,
                balance: available,
                needed: payouts,
            });
        }

        self.commit(sender, contract.address, value, effects);
        Ok(output)
    }

    /// Runs the read-only `f` against `contract` as seen by `sender`.
    pub fn view<T, R>(
        &self,
        contract: &Contract<T>,
        sender: Address,
        f: impl FnOnce(&T, &CallContext<'_>) -> R,
    ) -> R {
        let ctx = CallContext::new(self, sender, contract.address, U256::ZERO);
        f(&contract.state, &ctx)
    }

    fn commit(
        &mut self,
        sender: Address,
        contract: Address,
        value: U256,
        effects: Effects,
    ) {
        self.debit(sender, value);
        self.credit(contract, value);
        for transfer in &effects.transfers {
            self.debit(contract, transfer.value);
            self.credit(transfer.to, transfer.value);
        }
        tracing::debug!(
            target: "sandbox",
            %sender,
            %contract,
            %value,
            events = effects.logs.len(),
            payouts = effects.transfers.len(),
            "call committed"
        );
        self.logs.extend(effects.logs);
    }

    fn use_nonce(&mut self, account: Address) -> u64 {
        let nonce = self.nonces.entry(account).or_default();
        let current = *nonce;
        *nonce += 1;
        current
    }

    fn credit(&mut self, account: Address, value: U256) {
        let balance = self.balances.entry(account).or_default();
        *balance = balance.saturating_add(value);
    }

    // Callers check the balance first.
    fn debit(&mut self, account: Address, value: U256) {
        let balance = self.balances.entry(account).or_default();
        *balance = balance.saturating_sub(value);
    }
}

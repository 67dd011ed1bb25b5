//! Implementation of the VRC25 token standard.
//!
//! VRC25 is ERC-20 with a built-in issuer fee: `transfer`, `transfer_from`,
//! `approve` and `burn` charge [`Vrc25::estimate_fee`] from the paying
//! account and credit it to the current owner of the token. The fee is waived
//! when the immediate caller is a contract (see [`fee::FeePolicy`]).
//!
//! Every operation validates all of its preconditions before touching state,
//! so a failed call leaves balances, allowances and supply untouched.
//!
//! Allowances spent by [`Vrc25::transfer_from`] cover the fee too: the spender
//! needs an allowance of `value + fee`.
use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolError};

use self::fee::FeePolicy;
use crate::{
    access::{
        ownable,
        ownable_two_step::{self, Ownable2Step},
    },
    host::CallContext,
};

pub mod extensions;
pub mod fee;

sol! {
    /// Emitted when `value` tokens are moved from one account (`from`) to
    /// another (`to`).
    ///
    /// Note that `value` may be zero.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    event Transfer(address indexed from, address indexed to, uint256 value);

    /// Emitted when the allowance of a `spender` for an `owner` is set by a
    /// call to `approve`. `value` is the new allowance.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    event Approval(address indexed owner, address indexed spender, uint256 value);

    /// Emitted when `from` pays a fee of `value` tokens to the token `issuer`
    /// for an operation in favour of `to`.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    event Fee(address indexed from, address indexed to, address indexed issuer, uint256 value);
}

sol! {
    /// Indicates an error related to the current balance of `sender`. Used
    /// in transfers.
    ///
    /// * `sender` - Address whose tokens are being transferred.
    /// * `balance` - Current balance for the interacting account.
    /// * `needed` - Minimum amount required to perform a transfer, fee
    ///   included.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error VRC25InsufficientBalance(address sender, uint256 balance, uint256 needed);

    /// Indicates a failure with the `spender`'s `allowance`. Used in
    /// transfers.
    ///
    /// * `spender` - Address that may be allowed to operate on tokens without
    ///   being their owner.
    /// * `allowance` - Amount of tokens a `spender` is allowed to operate
    ///   with.
    /// * `needed` - Minimum amount required to perform a transfer, fee
    ///   included.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error VRC25InsufficientAllowance(address spender, uint256 allowance, uint256 needed);

    /// Indicates that an operation involved the zero address where an
    /// account is required.
    ///
    /// * `operation` - The rejected operation, e.g. `transfer to`.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error VRC25ZeroAddress(string operation);

    /// Indicates that minting `value` tokens would overflow the total supply.
    ///
    /// * `total_supply` - Current total supply.
    /// * `value` - Amount of tokens to be minted.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error VRC25SupplyOverflow(uint256 total_supply, uint256 value);
}

/// A VRC25 error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Indicates an error related to the current balance of `sender`.
    #[error("VRC25: insuffient balance")]
    InsufficientBalance(VRC25InsufficientBalance),
    /// Indicates a failure with the `spender`'s `allowance`.
    #[error("VRC25: insuffient allowance")]
    InsufficientAllowance(VRC25InsufficientAllowance),
    /// Indicates that an operation involved the zero address.
    #[error("VRC25: {} the zero address", .0.operation)]
    ZeroAddress(VRC25ZeroAddress),
    /// Indicates that minting would overflow the total supply.
    #[error("VRC25: total supply overflow")]
    SupplyOverflow(VRC25SupplyOverflow),
    /// Error type from the ownership component.
    #[error(transparent)]
    Ownable(#[from] ownable::Error),
}

impl Error {
    fn zero_address(operation: &str) -> Self {
        Error::ZeroAddress(VRC25ZeroAddress { operation: operation.to_owned() })
    }
}

impl From<VRC25InsufficientBalance> for Error {
    fn from(value: VRC25InsufficientBalance) -> Self {
        Error::InsufficientBalance(value)
    }
}

impl From<VRC25InsufficientAllowance> for Error {
    fn from(value: VRC25InsufficientAllowance) -> Self {
        Error::InsufficientAllowance(value)
    }
}

impl From<VRC25SupplyOverflow> for Error {
    fn from(value: VRC25SupplyOverflow) -> Self {
        Error::SupplyOverflow(value)
    }
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::InsufficientBalance(e) => e.abi_encode(),
            Error::InsufficientAllowance(e) => e.abi_encode(),
            Error::ZeroAddress(e) => e.abi_encode(),
            Error::SupplyOverflow(e) => e.abi_encode(),
            Error::Ownable(e) => e.into(),
        }
    }
}

/// State of a VRC25 token ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vrc25 {
    /// Maps users to balances.
    balances: HashMap<Address, U256>,
    /// Maps users to a mapping of each spender's allowance.
    allowances: HashMap<Address, HashMap<Address, U256>>,
    /// The total supply of the token.
    total_supply: U256,
    /// Owner of the token, who also receives every fee.
    ownership: Ownable2Step,
    /// Fee charged per operation.
    fee: FeePolicy,
}

impl Vrc25 {
    /// Constructor. The caller of `ctx` becomes the owner.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context of the deployment call.
    /// * `min_fee` - Flat fee charged per operation.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::ZeroAddress`] - If the deployer is the
    ///   [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    pub fn new(ctx: &mut CallContext<'_>, min_fee: U256) -> Result<Self, Error> {
        let deployer = ctx.sender();
        let ownership = Ownable2Step::new(ctx, deployer)?;
        Ok(Self {
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: U256::ZERO,
            ownership,
            fee: FeePolicy::new(min_fee),
        })
    }

    /// Returns the number of tokens in existence.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Returns the number of tokens owned by `account`.
    #[must_use]
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Returns the remaining number of tokens that `spender` will be allowed
    /// to spend on behalf of `owner` through [`Self::transfer_from`]. This is
    /// zero by default.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&owner)
            .and_then(|allowances| allowances.get(&spender))
            .copied()
            .unwrap_or_default()
    }

    /// Returns the configured flat fee.
    #[must_use]
    pub fn min_fee(&self) -> U256 {
        self.fee.min_fee()
    }

    /// Returns the fee the caller of `ctx` would pay to move `value` tokens.
    #[must_use]
    pub fn estimate_fee(&self, ctx: &CallContext<'_>, value: U256) -> U256 {
        self.fee.estimate_fee(ctx, value)
    }

    /// Returns the current owner, who receives the fees.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.ownership.owner()
    }

    /// Returns the account proposed as the next owner, if any.
    #[must_use]
    pub fn pending_owner(&self) -> Address {
        self.ownership.pending_owner()
    }

    /// Checks if the caller of `ctx` is the owner.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::NotOwner`] - If the caller is not the owner.
    pub fn only_owner(&self, ctx: &CallContext<'_>) -> Result<(), Error> {
        Ok(self.ownership.only_owner(ctx)?)
    }

    /// Sets the flat fee. A zero fee disables fee charging.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the token's state.
    /// * `ctx` - Context of the current call.
    /// * `fee` - New flat fee.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::NotOwner`] - If the caller is not the owner.
    pub fn set_fee(
        &mut self,
        ctx: &CallContext<'_>,
        fee: U256,
    ) -> Result<(), Error> {
        self.only_owner(ctx)?;
        self.fee.set_min_fee(fee);
        tracing::info!(target: "vrc25", %fee, "minimum fee updated");
        Ok(())
    }

    /// Moves a `value` amount of tokens from the caller's account to `to`,
    /// charging the caller the fee on top.
    ///
    /// Returns a boolean value indicating whether the operation succeeded.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the token's state.
    /// * `ctx` - Context of the current call.
    /// * `to` - Account to transfer tokens to.
    /// * `value` - Number of tokens to transfer.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `to` is the [`Address::ZERO`].
    /// * [`Error::InsufficientBalance`] - If the caller's balance is below
    ///   `value` plus the fee.
    ///
    /// # Events
    ///
    /// * [`Transfer`] for the value and, if charged, for the fee.
    /// * [`Fee`] if a fee is charged.
    pub fn transfer(
        &mut self,
        ctx: &mut CallContext<'_>,
        to: Address,
        value: U256,
    ) -> Result<bool, Error> {
        let from = ctx.sender();
        let fee = self.estimate_fee(ctx, value);
        self._transfer(ctx, from, to, value, fee)?;
        Ok(true)
    }

    /// Sets a `value` number of tokens as the allowance of `spender` over the
    /// caller's tokens, charging the caller the fee.
    ///
    /// Returns a boolean value indicating whether the operation succeeded.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the token's state.
    /// * `ctx` - Context of the current call.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - Number of tokens the `spender` may spend.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `spender` is the [`Address::ZERO`].
    /// * [`Error::InsufficientBalance`] - If the caller cannot pay the fee.
    ///
    /// # Events
    ///
    /// * [`Approval`].
    /// * [`Transfer`] and [`Fee`] if a fee is charged.
    pub fn approve(
        &mut self,
        ctx: &mut CallContext<'_>,
        spender: Address,
        value: U256,
    ) -> Result<bool, Error> {
        let owner = ctx.sender();
        let fee = self.estimate_fee(ctx, value);
        self._approve(ctx, owner, spender, value, fee)?;
        Ok(true)
    }

    /// Moves a `value` number of tokens from `from` to `to` using the
    /// allowance mechanism. `value` plus the fee is then deducted from the
    /// caller's allowance, and the fee is paid by `from`.
    ///
    /// Returns a boolean value indicating whether the operation succeeded.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the token's state.
    /// * `ctx` - Context of the current call.
    /// * `from` - Account to transfer tokens from.
    /// * `to` - Account to transfer tokens to.
    /// * `value` - Number of tokens to transfer.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `from` or `to` is the [`Address::ZERO`].
    /// * [`Error::InsufficientAllowance`] - If the caller's allowance is below
    ///   `value` plus the fee.
    /// * [`Error::InsufficientBalance`] - If `from` holds less than `value`
    ///   plus the fee.
    ///
    /// # Events
    ///
    /// * [`Approval`] with the remaining allowance.
    /// * [`Transfer`] for the value and, if charged, for the fee.
    /// * [`Fee`] if a fee is charged.
    pub fn transfer_from(
        &mut self,
        ctx: &mut CallContext<'_>,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Error> {
        let spender = ctx.sender();
        let fee = self.estimate_fee(ctx, value);

        if from.is_zero() {
            return Err(Error::zero_address("transfer from"));
        }
        if to.is_zero() {
            return Err(Error::zero_address("transfer to"));
        }
        self.require_allowance(from, spender, value.saturating_add(fee))?;
        let needed = self.debit(from, value, fee)?;
        self.require_balance(from, needed)?;

        self._spend_allowance(ctx, from, spender, needed)?;
        self._transfer(ctx, from, to, value, fee)?;
        Ok(true)
    }

    /// Creates a `value` amount of tokens and assigns them to `to`. Can only
    /// be called by the owner. No fee is charged.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::NotOwner`] - If the caller is not the owner.
    /// * [`Error::ZeroAddress`] - If `to` is the [`Address::ZERO`].
    /// * [`Error::SupplyOverflow`] - If the total supply would overflow.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    pub fn mint(
        &mut self,
        ctx: &mut CallContext<'_>,
        to: Address,
        value: U256,
    ) -> Result<(), Error> {
        self.only_owner(ctx)?;
        self._mint(ctx, to, value)
    }

    /// Destroys a `value` amount of tokens from the caller, charging the fee
    /// on top.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientBalance`] - If the caller's balance is below
    ///   `value` plus the fee.
    ///
    /// # Events
    ///
    /// * [`Transfer`] to [`Address::ZERO`] and, if charged, for the fee.
    /// * [`Fee`] if a fee is charged.
    pub fn burn(
        &mut self,
        ctx: &mut CallContext<'_>,
        value: U256,
    ) -> Result<(), Error> {
        let account = ctx.sender();
        let fee = self.estimate_fee(ctx, value);
        self._burn(ctx, account, value, fee)
    }

    /// Starts a two-step ownership transfer to `new_owner`.
    ///
    /// # Errors
    ///
    /// See [`Ownable2Step::transfer_ownership`].
    pub fn transfer_ownership(
        &mut self,
        ctx: &mut CallContext<'_>,
        new_owner: Address,
    ) -> Result<(), ownable_two_step::Error> {
        self.ownership.transfer_ownership(ctx, new_owner)
    }

    /// Completes a pending ownership transfer. From then on fees go to the
    /// new owner.
    ///
    /// # Errors
    ///
    /// See [`Ownable2Step::accept_ownership`].
    pub fn accept_ownership(
        &mut self,
        ctx: &mut CallContext<'_>,
    ) -> Result<(), ownable_two_step::Error> {
        self.ownership.accept_ownership(ctx)
    }
}

impl Vrc25 {
    /// Moves `value` tokens from `from` to `to` and charges `fee` from
    /// `from`. Both movements happen or neither does.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the token's state.
    /// * `ctx` - Context of the current call.
    /// * `from` - Account to transfer tokens from.
    /// * `to` - Account to transfer tokens to.
    /// * `value` - Number of tokens to transfer.
    /// * `fee` - Fee charged from `from`.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `from` or `to` is the [`Address::ZERO`].
    /// * [`Error::InsufficientBalance`] - If `from` holds less than `value`
    ///   plus `fee`.
    ///
    /// # Events
    ///
    /// * [`Transfer`] for the value and, if charged, for the fee.
    /// * [`Fee`] if a fee is charged.
    pub fn _transfer(
        &mut self,
        ctx: &mut CallContext<'_>,
        from: Address,
        to: Address,
        value: U256,
        fee: U256,
    ) -> Result<(), Error> {
        if from.is_zero() {
            return Err(Error::zero_address("transfer from"));
        }
        if to.is_zero() {
            return Err(Error::zero_address("transfer to"));
        }
        let needed = self.debit(from, value, fee)?;
        self.require_balance(from, needed)?;

        self._update(ctx, from, to, value)?;
        self._charge_fee(ctx, from, to, fee)?;

        tracing::debug!(target: "vrc25", %from, %to, %value, %fee, "transfer");
        Ok(())
    }

    /// Sets `value` as the allowance of `spender` over the `owner`'s tokens
    /// and charges `fee` from `owner`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the token's state.
    /// * `ctx` - Context of the current call.
    /// * `owner` - Account that owns the tokens.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - The number of tokens that `spender` may spend.
    /// * `fee` - Fee charged from `owner`.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `owner` or `spender` is the
    ///   [`Address::ZERO`].
    /// * [`Error::InsufficientBalance`] - If `owner` cannot pay `fee`.
    ///
    /// # Events
    ///
    /// * [`Approval`].
    /// * [`Transfer`] and [`Fee`] if a fee is charged.
    pub fn _approve(
        &mut self,
        ctx: &mut CallContext<'_>,
        owner: Address,
        spender: Address,
        value: U256,
        fee: U256,
    ) -> Result<(), Error> {
        if owner.is_zero() {
            return Err(Error::zero_address("approve from"));
        }
        if spender.is_zero() {
            return Err(Error::zero_address("approve to"));
        }
        self.require_balance(owner, fee)?;

        self.allowances.entry(owner).or_default().insert(spender, value);
        ctx.emit(&Approval { owner, spender, value });

        let contract = ctx.contract_address();
        self._charge_fee(ctx, owner, contract, fee)?;

        tracing::debug!(target: "vrc25", %owner, %spender, %value, %fee, "approve");
        Ok(())
    }

    /// Creates a `value` amount of tokens and assigns them to `account`, by
    /// transferring it from [`Address::ZERO`].
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `account` is the [`Address::ZERO`].
    /// * [`Error::SupplyOverflow`] - If the total supply would overflow.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    pub fn _mint(
        &mut self,
        ctx: &mut CallContext<'_>,
        account: Address,
        value: U256,
    ) -> Result<(), Error> {
        if account.is_zero() {
            return Err(Error::zero_address("mint to"));
        }
        self._update(ctx, Address::ZERO, account, value)
    }

    /// Destroys a `value` amount of tokens from `account`, lowering the total
    /// supply, and charges `fee` from `account`.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `account` is the [`Address::ZERO`].
    /// * [`Error::InsufficientBalance`] - If `account` holds less than
    ///   `value` plus `fee`.
    ///
    /// # Events
    ///
    /// * [`Transfer`] to [`Address::ZERO`] and, if charged, for the fee.
    /// * [`Fee`] if a fee is charged.
    pub fn _burn(
        &mut self,
        ctx: &mut CallContext<'_>,
        account: Address,
        value: U256,
        fee: U256,
    ) -> Result<(), Error> {
        if account.is_zero() {
            return Err(Error::zero_address("burn from"));
        }
        let needed = self.debit(account, value, fee)?;
        self.require_balance(account, needed)?;

        self._update(ctx, account, Address::ZERO, value)?;
        self._charge_fee(ctx, account, Address::ZERO, fee)
    }

    /// Moves `fee` tokens from `from` to the current owner on behalf of an
    /// operation in favour of `to`. Does nothing when `fee` is zero.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientBalance`] - If `from` cannot pay `fee`.
    ///
    /// # Events
    ///
    /// * [`Transfer`] and [`Fee`] if `fee` is not zero.
    pub fn _charge_fee(
        &mut self,
        ctx: &mut CallContext<'_>,
        from: Address,
        to: Address,
        fee: U256,
    ) -> Result<(), Error> {
        if fee.is_zero() {
            return Ok(());
        }
        let issuer = self.owner();
        self._update(ctx, from, issuer, fee)?;
        ctx.emit(&Fee { from, to, issuer, value: fee });
        Ok(())
    }

    /// Transfers a `value` amount of tokens from `from` to `to`, or
    /// alternatively mints (or burns) if `from` (or `to`) is the zero
    /// address.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientBalance`] - If `from` holds less than `value`.
    /// * [`Error::SupplyOverflow`] - If minting would overflow the total
    ///   supply.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    pub fn _update(
        &mut self,
        ctx: &mut CallContext<'_>,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Error> {
        if from.is_zero() {
            let total_supply = self.total_supply.checked_add(value).ok_or(
                VRC25SupplyOverflow { total_supply: self.total_supply, value },
            )?;
            self.total_supply = total_supply;
        } else {
            let from_balance = self.balance_of(from);
            if from_balance < value {
                return Err(VRC25InsufficientBalance {
                    sender: from,
                    balance: from_balance,
                    needed: value,
                }
                .into());
            }
            // Overflow not possible:
            // `value` <= `from_balance` <= `total_supply`.
            self.balances.insert(from, from_balance - value);
        }

        if to.is_zero() {
            // Overflow not possible:
            // `value` <= `from_balance` <= `total_supply`.
            self.total_supply -= value;
        } else {
            // Overflow not possible:
            // `balance_to` + `value` is at most `total_supply`.
            let balance_to = self.balance_of(to);
            self.balances.insert(to, balance_to + value);
        }

        ctx.emit(&Transfer { from, to, value });

        Ok(())
    }

    /// Deducts `needed` from the allowance of `spender` over the `owner`'s
    /// tokens.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientAllowance`] - If the allowance is below
    ///   `needed`.
    ///
    /// # Events
    ///
    /// * [`Approval`] with the remaining allowance.
    fn _spend_allowance(
        &mut self,
        ctx: &mut CallContext<'_>,
        owner: Address,
        spender: Address,
        needed: U256,
    ) -> Result<(), Error> {
        let current_allowance = self.require_allowance(owner, spender, needed)?;

        let value = current_allowance - needed;
        self.allowances.entry(owner).or_default().insert(spender, value);
        ctx.emit(&Approval { owner, spender, value });
        Ok(())
    }

    /// Returns `value + fee`, the amount debited from `account`.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientBalance`] - If the sum overflows, since no
    ///   balance can cover it.
    pub(crate) fn debit(
        &self,
        account: Address,
        value: U256,
        fee: U256,
    ) -> Result<U256, Error> {
        value.checked_add(fee).ok_or_else(|| {
            VRC25InsufficientBalance {
                sender: account,
                balance: self.balance_of(account),
                needed: U256::MAX,
            }
            .into()
        })
    }

    /// Checks that `spender` may spend at least `needed` of `owner`'s tokens
    /// and returns the current allowance.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientAllowance`] - If the allowance is below
    ///   `needed`.
    fn require_allowance(
        &self,
        owner: Address,
        spender: Address,
        needed: U256,
    ) -> Result<U256, Error> {
        let allowance = self.allowance(owner, spender);
        if allowance < needed {
            return Err(VRC25InsufficientAllowance { spender, allowance, needed }
                .into());
        }
        Ok(allowance)
    }

    /// Checks that `account` holds at least `needed` tokens.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientBalance`] - If the balance is below `needed`.
    pub(crate) fn require_balance(
        &self,
        account: Address,
        needed: U256,
    ) -> Result<(), Error> {
        let balance = self.balance_of(account);
        if balance < needed {
            return Err(
                VRC25InsufficientBalance { sender: account, balance, needed }
                    .into(),
            );
        }
        Ok(())
    }
}

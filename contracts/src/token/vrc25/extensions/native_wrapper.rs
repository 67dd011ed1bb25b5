//! Extension of the VRC25 token to wrap the chain's native coin.
//!
//! Users deposit native coin and receive a matching number of tokens, and
//! burn tokens to withdraw the native coin back. The wrapper keeps track of
//! the native coin it holds (its reserve), which never drops below the
//! token's total supply.
//!
//! Whether the deposit and withdrawal legs pay the token fee is a per-token
//! policy, see [`WrapperFees`].

use alloy_primitives::U256;
use alloy_sol_types::sol;
use serde::{Deserialize, Serialize};

use crate::{
    host::CallContext,
    token::vrc25::{self, VRC25InsufficientBalance, VRC25SupplyOverflow, Vrc25},
};

sol! {
    /// Emitted when `dst` deposits `wad` native coin and receives as many
    /// tokens.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    event Deposit(address indexed dst, uint256 wad);

    /// Emitted when `src` burns `wad` tokens and withdraws as much native
    /// coin.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    event Withdrawal(address indexed src, uint256 wad);
}

/// Which wrapper legs pay the token fee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapperFees {
    /// Charge the fee on top of a deposit.
    pub deposit: bool,
    /// Charge the fee on top of a withdrawal.
    pub withdraw: bool,
}

/// State of a [`NativeWrapper`] component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NativeWrapper {
    /// Native coin held on behalf of token holders.
    reserve: U256,
    /// Fee policy of the wrapper legs.
    fees: WrapperFees,
}

impl NativeWrapper {
    /// Creates an empty wrapper using the `fees` policy.
    #[must_use]
    pub const fn new(fees: WrapperFees) -> Self {
        Self { reserve: U256::ZERO, fees }
    }

    /// Returns the native coin held on behalf of token holders.
    #[must_use]
    pub fn reserve(&self) -> U256 {
        self.reserve
    }

    /// Returns the fee policy of the wrapper legs.
    #[must_use]
    pub fn fees(&self) -> WrapperFees {
        self.fees
    }

    /// Wraps the native coin attached to the call, minting as many tokens to
    /// the caller.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the component's state.
    /// * `ctx` - Context of the current call, carrying the deposit.
    /// * `token` - Write access to the [`Vrc25`] ledger.
    ///
    /// # Errors
    ///
    /// * [`vrc25::Error::InsufficientBalance`] - If deposit fees are enabled
    ///   and the caller cannot pay the fee, even with the deposited tokens.
    /// * [`vrc25::Error::SupplyOverflow`] - If the reserve would overflow.
    ///
    /// # Events
    ///
    /// * [`vrc25::Transfer`] for the minted tokens.
    /// * [`vrc25::Transfer`] and [`vrc25::Fee`] if a fee is charged.
    /// * [`Deposit`].
    pub fn deposit(
        &mut self,
        ctx: &mut CallContext<'_>,
        token: &mut Vrc25,
    ) -> Result<(), vrc25::Error> {
        let account = ctx.sender();
        let value = ctx.accept_value();
        let fee = if self.fees.deposit {
            token.estimate_fee(ctx, value)
        } else {
            U256::ZERO
        };

        let reserve = self.reserve.checked_add(value).ok_or(
            VRC25SupplyOverflow { total_supply: token.total_supply(), value },
        )?;

        let available = token.balance_of(account).saturating_add(value);
        if available < fee {
            return Err(VRC25InsufficientBalance {
                sender: account,
                balance: available,
                needed: fee,
            }
            .into());
        }

        token._mint(ctx, account, value)?;
        let contract = ctx.contract_address();
        token._charge_fee(ctx, account, contract, fee)?;
        self.reserve = reserve;

        ctx.emit(&Deposit { dst: account, wad: value });
        tracing::debug!(target: "vrc25::wrapper", %account, %value, %fee, "deposit");
        Ok(())
    }

    /// Handles a plain native transfer to the token. Same as
    /// [`Self::deposit`].
    ///
    /// # Errors
    ///
    /// See [`Self::deposit`].
    pub fn receive(
        &mut self,
        ctx: &mut CallContext<'_>,
        token: &mut Vrc25,
    ) -> Result<(), vrc25::Error> {
        self.deposit(ctx, token)
    }

    /// Burns `amount` tokens of the caller and pays `amount` native coin back
    /// to it.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the component's state.
    /// * `ctx` - Context of the current call.
    /// * `amount` - Number of tokens to unwrap.
    /// * `token` - Write access to the [`Vrc25`] ledger.
    ///
    /// # Errors
    ///
    /// * [`vrc25::Error::InsufficientBalance`] - If the caller holds less than
    ///   `amount` (plus the fee when withdrawal fees are enabled), or the
    ///   reserve cannot cover `amount`.
    ///
    /// # Events
    ///
    /// * [`vrc25::Transfer`] to [`alloy_primitives::Address::ZERO`].
    /// * [`vrc25::Transfer`] and [`vrc25::Fee`] if a fee is charged.
    /// * [`Withdrawal`].
    pub fn withdraw(
        &mut self,
        ctx: &mut CallContext<'_>,
        amount: U256,
        token: &mut Vrc25,
    ) -> Result<(), vrc25::Error> {
        let account = ctx.sender();
        let fee = if self.fees.withdraw {
            token.estimate_fee(ctx, amount)
        } else {
            U256::ZERO
        };

        let needed = token.debit(account, amount, fee)?;
        token.require_balance(account, needed)?;
        if self.reserve < amount {
            tracing::warn!(
                target: "vrc25::wrapper",
                reserve = %self.reserve,
                %amount,
                "wrapper is undercollateralized"
            );
            return Err(VRC25InsufficientBalance {
                sender: ctx.contract_address(),
                balance: self.reserve,
                needed: amount,
            }
            .into());
        }

        token._burn(ctx, account, amount, fee)?;
        self.reserve -= amount;
        ctx.send_value(account, amount);

        ctx.emit(&Withdrawal { src: account, wad: amount });
        tracing::debug!(target: "vrc25::wrapper", %account, %amount, %fee, "withdrawal");
        Ok(())
    }
}

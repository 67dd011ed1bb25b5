//! Fee policy of a VRC25 token.
//!
//! Every value movement initiated by an externally owned account pays a flat
//! fee to the token issuer. Calls coming from a contract account pay nothing,
//! so that protocols integrating the token are not charged for their internal
//! bookkeeping.

use alloy_primitives::U256;

use crate::host::CallContext;

/// State of a [`FeePolicy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeePolicy {
    /// Flat fee charged per operation, in token units.
    min_fee: U256,
}

impl FeePolicy {
    /// Creates a policy charging `min_fee` per operation.
    #[must_use]
    pub const fn new(min_fee: U256) -> Self {
        Self { min_fee }
    }

    /// Returns the configured flat fee.
    #[must_use]
    pub fn min_fee(&self) -> U256 {
        self.min_fee
    }

    /// Replaces the flat fee. A zero fee disables fee charging.
    pub fn set_min_fee(&mut self, min_fee: U256) {
        self.min_fee = min_fee;
    }

    /// Returns the fee owed for moving `value` tokens in the current call.
    ///
    /// The fee is [`Self::min_fee`] when the immediate caller is an externally
    /// owned account and zero when the caller has code.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the policy.
    /// * `ctx` - Context of the current call.
    /// * `value` - Amount of tokens being moved.
    #[must_use]
    pub fn estimate_fee(&self, ctx: &CallContext<'_>, value: U256) -> U256 {
        if ctx.caller_is_contract() {
            U256::ZERO
        } else {
            self.base_fee(value)
        }
    }

    /// Fee owed by an externally owned account for moving `value` tokens.
    ///
    /// The fee is flat, so `value` does not influence it.
    #[must_use]
    pub fn base_fee(&self, _value: U256) -> U256 {
        self.min_fee
    }
}

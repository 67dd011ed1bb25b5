//! Shared infrastructure for the end-to-end scenarios.
//!
//! Every scenario starts from an [`Infrastructure`]: a fresh sandbox chain, a
//! token deployed by `owner`, and two funded user accounts.

use std::fmt::Display;

use alloy_primitives::{uint, Address, U256};
use vrc25::{
    config::TokenConfig,
    host::{CallContext, Host},
    presets::{PermitToken, Vrc25Token},
};
use vrc25_sandbox::{Account, Chain, Contract, Error, PermitSignature};

/// One whole coin, with 18 decimals.
pub const ONE: U256 = uint!(1_000_000_000_000_000_000_U256);

/// Native coin every user account starts with.
pub const DEFAULT_FUNDING: U256 = uint!(100_000_000_000_000_000_000_000_U256);

/// Returns `n` whole coins.
#[must_use]
pub fn coins(n: u64) -> U256 {
    U256::from(n) * ONE
}

/// A deployed token and the accounts interacting with it.
#[derive(Debug)]
pub struct Infrastructure<T> {
    /// The sandbox chain.
    pub chain: Chain,
    /// Deployer and initial owner of the token.
    pub owner: Account,
    /// First user.
    pub alice: Account,
    /// Second user.
    pub bob: Account,
    /// The token under test.
    pub token: Contract<T>,
}

impl<T> Infrastructure<T> {
    /// Deploys a token from a freshly created `owner` with `init`.
    ///
    /// # Errors
    ///
    /// May fail if the token constructor reverts.
    pub fn new<E>(
        config: TokenConfig,
        init: impl FnOnce(&mut CallContext<'_>, TokenConfig) -> Result<T, E>,
    ) -> eyre::Result<Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut chain = Chain::default();
        let owner = chain.create_account(DEFAULT_FUNDING);
        let alice = chain.create_account(DEFAULT_FUNDING);
        let bob = chain.create_account(DEFAULT_FUNDING);
        let token = chain.deploy(owner.address(), |ctx| init(ctx, config))?;
        Ok(Self { chain, owner, alice, bob, token })
    }
}

/// Block timestamp `seconds` from now, as a permit deadline.
#[must_use]
pub fn deadline_in(chain: &Chain, seconds: u64) -> U256 {
    U256::from(chain.block_timestamp() + seconds)
}

/// Fee `token` charges `caller` for an operation moving `value`.
#[must_use]
pub fn fee_for<T: Vrc25Token>(
    chain: &Chain,
    token: &Contract<T>,
    caller: Address,
    value: U256,
) -> U256 {
    chain.view(token, caller, |t, ctx| t.estimate_fee(ctx, value))
}

/// Has `signer` sign a permit letting `spender` spend `value` of its tokens
/// until `deadline`, bound to its current nonce.
#[must_use]
pub fn sign_permit<T: PermitToken>(
    chain: &Chain,
    token: &Contract<T>,
    signer: &Account,
    spender: Address,
    value: U256,
    deadline: U256,
) -> PermitSignature {
    let owner = signer.address();
    let hash = chain.view(token, owner, |t, ctx| {
        t.permit_hash(ctx, owner, spender, value, t.nonces(owner), deadline)
    });
    signer.sign_permit(&hash)
}

/// Revert reason of a failed call, spelled as the deployed contracts do.
#[must_use]
pub fn revert_reason<E: Display>(err: &Error<E>) -> Option<String> {
    match err {
        Error::Reverted(e) => Some(e.to_string()),
        Error::InsufficientFunds { .. } | Error::NonPayable { .. } => None,
    }
}

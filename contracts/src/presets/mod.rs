//! Ready-made tokens assembled from the VRC25 components.
//!
//! Each preset owns a [`Vrc25`] ledger plus the extensions of the contract it
//! mirrors, and exposes their operations through the traits below:
//!
//! * [`Vrc25Token`] - ledger, fee and ownership operations, shared by all.
//! * [`WrappedToken`] - native coin deposit and withdrawal.
//! * [`PermitToken`] - EIP-2612 style permits.
//!
//! Bring the traits into scope to call the operations on a preset.

use alloy_primitives::{Address, B256, U256};

use crate::{
    access::ownable_two_step,
    host::CallContext,
    token::vrc25::{
        self,
        extensions::{
            permit, NativeWrapper, Vrc25Metadata, Vrc25Permit,
        },
        Vrc25,
    },
    utils::cryptography::eip712::IEip712,
};

mod sample_vrc25;
mod wrapped_permit;
mod wtomo;

pub use sample_vrc25::{SampleVrc25, SampleVrc25Domain};
pub use wrapped_permit::{
    WrappedPermitToken, WtomoPermit, WtomoPermitDomain, Wvic, WvicDomain,
};
pub use wtomo::Wtomo;

/// Ledger, fee and ownership operations of a VRC25 token.
pub trait Vrc25Token {
    /// Read access to the ledger.
    fn vrc25(&self) -> &Vrc25;

    /// Write access to the ledger.
    fn vrc25_mut(&mut self) -> &mut Vrc25;

    /// Read access to the token metadata.
    fn metadata(&self) -> &Vrc25Metadata;

    /// Returns the name of the token.
    fn name(&self) -> &str {
        self.metadata().name()
    }

    /// Returns the symbol of the token.
    fn symbol(&self) -> &str {
        self.metadata().symbol()
    }

    /// Returns the number of decimals used for display.
    fn decimals(&self) -> u8 {
        self.metadata().decimals()
    }

    /// See [`Vrc25::total_supply`].
    fn total_supply(&self) -> U256 {
        self.vrc25().total_supply()
    }

    /// See [`Vrc25::balance_of`].
    fn balance_of(&self, account: Address) -> U256 {
        self.vrc25().balance_of(account)
    }

    /// See [`Vrc25::allowance`].
    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.vrc25().allowance(owner, spender)
    }

    /// See [`Vrc25::min_fee`].
    fn min_fee(&self) -> U256 {
        self.vrc25().min_fee()
    }

    /// See [`Vrc25::estimate_fee`].
    fn estimate_fee(&self, ctx: &CallContext<'_>, value: U256) -> U256 {
        self.vrc25().estimate_fee(ctx, value)
    }

    /// See [`Vrc25::owner`].
    fn owner(&self) -> Address {
        self.vrc25().owner()
    }

    /// See [`Vrc25::pending_owner`].
    fn pending_owner(&self) -> Address {
        self.vrc25().pending_owner()
    }

    /// See [`Vrc25::set_fee`].
    ///
    /// # Errors
    ///
    /// See [`Vrc25::set_fee`].
    fn set_fee(
        &mut self,
        ctx: &CallContext<'_>,
        fee: U256,
    ) -> Result<(), vrc25::Error> {
        self.vrc25_mut().set_fee(ctx, fee)
    }

    /// See [`Vrc25::transfer`].
    ///
    /// # Errors
    ///
    /// See [`Vrc25::transfer`].
    fn transfer(
        &mut self,
        ctx: &mut CallContext<'_>,
        to: Address,
        value: U256,
    ) -> Result<bool, vrc25::Error> {
        self.vrc25_mut().transfer(ctx, to, value)
    }

    /// See [`Vrc25::approve`].
    ///
    /// # Errors
    ///
    /// See [`Vrc25::approve`].
    fn approve(
        &mut self,
        ctx: &mut CallContext<'_>,
        spender: Address,
        value: U256,
    ) -> Result<bool, vrc25::Error> {
        self.vrc25_mut().approve(ctx, spender, value)
    }

    /// See [`Vrc25::transfer_from`].
    ///
    /// # Errors
    ///
    /// See [`Vrc25::transfer_from`].
    fn transfer_from(
        &mut self,
        ctx: &mut CallContext<'_>,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, vrc25::Error> {
        self.vrc25_mut().transfer_from(ctx, from, to, value)
    }

    /// See [`Vrc25::burn`].
    ///
    /// # Errors
    ///
    /// See [`Vrc25::burn`].
    fn burn(
        &mut self,
        ctx: &mut CallContext<'_>,
        value: U256,
    ) -> Result<(), vrc25::Error> {
        self.vrc25_mut().burn(ctx, value)
    }

    /// See [`Vrc25::transfer_ownership`].
    ///
    /// # Errors
    ///
    /// See [`Vrc25::transfer_ownership`].
    fn transfer_ownership(
        &mut self,
        ctx: &mut CallContext<'_>,
        new_owner: Address,
    ) -> Result<(), ownable_two_step::Error> {
        self.vrc25_mut().transfer_ownership(ctx, new_owner)
    }

    /// See [`Vrc25::accept_ownership`].
    ///
    /// # Errors
    ///
    /// See [`Vrc25::accept_ownership`].
    fn accept_ownership(
        &mut self,
        ctx: &mut CallContext<'_>,
    ) -> Result<(), ownable_two_step::Error> {
        self.vrc25_mut().accept_ownership(ctx)
    }
}

/// Native coin wrapping operations.
pub trait WrappedToken: Vrc25Token {
    /// Read access to the wrapper.
    fn wrapper(&self) -> &NativeWrapper;

    /// Write access to the wrapper and the ledger it mints into.
    fn wrapper_parts(&mut self) -> (&mut NativeWrapper, &mut Vrc25);

    /// See [`NativeWrapper::reserve`].
    fn reserve(&self) -> U256 {
        self.wrapper().reserve()
    }

    /// See [`NativeWrapper::deposit`].
    ///
    /// # Errors
    ///
    /// See [`NativeWrapper::deposit`].
    fn deposit(&mut self, ctx: &mut CallContext<'_>) -> Result<(), vrc25::Error> {
        let (wrapper, token) = self.wrapper_parts();
        wrapper.deposit(ctx, token)
    }

    /// See [`NativeWrapper::receive`].
    ///
    /// # Errors
    ///
    /// See [`NativeWrapper::receive`].
    fn receive(&mut self, ctx: &mut CallContext<'_>) -> Result<(), vrc25::Error> {
        let (wrapper, token) = self.wrapper_parts();
        wrapper.receive(ctx, token)
    }

    /// See [`NativeWrapper::withdraw`].
    ///
    /// # Errors
    ///
    /// See [`NativeWrapper::withdraw`].
    fn withdraw(
        &mut self,
        ctx: &mut CallContext<'_>,
        amount: U256,
    ) -> Result<(), vrc25::Error> {
        let (wrapper, token) = self.wrapper_parts();
        wrapper.withdraw(ctx, amount, token)
    }
}

/// EIP-2612 style permit operations.
pub trait PermitToken: Vrc25Token {
    /// EIP-712 domain the permits are signed under.
    type Domain: IEip712;

    /// Read access to the permit component.
    fn permits(&self) -> &Vrc25Permit<Self::Domain>;

    /// Write access to the permit component and the ledger it approves on.
    fn permit_parts(&mut self) -> (&mut Vrc25Permit<Self::Domain>, &mut Vrc25);

    /// See [`Vrc25Permit::nonces`].
    fn nonces(&self, owner: Address) -> U256 {
        self.permits().nonces(owner)
    }

    /// See [`Vrc25Permit::domain_separator`].
    fn domain_separator(&self, ctx: &CallContext<'_>) -> B256 {
        self.permits().domain_separator(ctx)
    }

    /// See [`Vrc25Permit::permit_hash`].
    fn permit_hash(
        &self,
        ctx: &CallContext<'_>,
        owner: Address,
        spender: Address,
        value: U256,
        nonce: U256,
        deadline: U256,
    ) -> B256 {
        self.permits().permit_hash(ctx, owner, spender, value, nonce, deadline)
    }

    /// See [`Vrc25Permit::permit`].
    ///
    /// # Errors
    ///
    /// See [`Vrc25Permit::permit`].
    #[allow(clippy::too_many_arguments)]
    fn permit(
        &mut self,
        ctx: &mut CallContext<'_>,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        v: u8,
        r: B256,
        s: B256,
    ) -> Result<(), permit::Error> {
        let (permits, token) = self.permit_parts();
        permits.permit(ctx, owner, spender, value, deadline, v, r, s, token)
    }
}

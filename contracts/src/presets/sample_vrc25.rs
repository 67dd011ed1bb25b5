//! Mintable VRC25 token with permit support.
use alloy_primitives::{Address, U256};

use super::{PermitToken, Vrc25Token};
use crate::{
    config::TokenConfig,
    host::CallContext,
    token::vrc25::{
        self,
        extensions::{Vrc25Metadata, Vrc25Permit},
        Vrc25,
    },
    utils::cryptography::eip712::IEip712,
};

/// EIP-712 domain of [`SampleVrc25`] permits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleVrc25Domain;

impl IEip712 for SampleVrc25Domain {
    const NAME: &'static str = "VRC25";
    const VERSION: &'static str = "1";
}

/// Sample token: the bare ledger plus owner minting and permits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleVrc25 {
    vrc25: Vrc25,
    metadata: Vrc25Metadata,
    permit: Vrc25Permit<SampleVrc25Domain>,
}

impl SampleVrc25 {
    /// Deploys the token with the caller as owner.
    ///
    /// # Errors
    ///
    /// See [`Vrc25::new`].
    pub fn new(
        ctx: &mut CallContext<'_>,
        config: TokenConfig,
    ) -> Result<Self, vrc25::Error> {
        let vrc25 = Vrc25::new(ctx, config.min_fee)?;
        let metadata =
            Vrc25Metadata::new(config.name, config.symbol, config.decimals);
        Ok(Self {
            vrc25,
            metadata,
            permit: Vrc25Permit::new(SampleVrc25Domain),
        })
    }

    /// Mints `value` tokens to `to`. Restricted to the owner.
    ///
    /// # Errors
    ///
    /// See [`Vrc25::mint`].
    pub fn mint(
        &mut self,
        ctx: &mut CallContext<'_>,
        to: Address,
        value: U256,
    ) -> Result<(), vrc25::Error> {
        self.vrc25.mint(ctx, to, value)
    }
}

impl Vrc25Token for SampleVrc25 {
    fn vrc25(&self) -> &Vrc25 {
        &self.vrc25
    }

    fn vrc25_mut(&mut self) -> &mut Vrc25 {
        &mut self.vrc25
    }

    fn metadata(&self) -> &Vrc25Metadata {
        &self.metadata
    }
}

impl PermitToken for SampleVrc25 {
    type Domain = SampleVrc25Domain;

    fn permits(&self) -> &Vrc25Permit<SampleVrc25Domain> {
        &self.permit
    }

    fn permit_parts(
        &mut self,
    ) -> (&mut Vrc25Permit<SampleVrc25Domain>, &mut Vrc25) {
        (&mut self.permit, &mut self.vrc25)
    }
}

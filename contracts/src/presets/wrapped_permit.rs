//! Wrapped native coin tokens that also accept permits.
use super::{PermitToken, Vrc25Token, WrappedToken};
use crate::{
    config::TokenConfig,
    host::CallContext,
    token::vrc25::{
        self,
        extensions::{NativeWrapper, Vrc25Metadata, Vrc25Permit},
        Vrc25,
    },
    utils::cryptography::eip712::IEip712,
};

/// EIP-712 domain of [`WtomoPermit`] permits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WtomoPermitDomain;

impl IEip712 for WtomoPermitDomain {
    const NAME: &'static str = "WTOMOPermit";
    const VERSION: &'static str = "1";
}

/// EIP-712 domain of [`Wvic`] permits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WvicDomain;

impl IEip712 for WvicDomain {
    const NAME: &'static str = "WVIC";
    const VERSION: &'static str = "1";
}

/// Wrapped TOMO with permits.
pub type WtomoPermit = WrappedPermitToken<WtomoPermitDomain>;

/// Wrapped VIC. Deploy it with [`TokenConfig::wvic`] to charge the fee on
/// withdrawals.
pub type Wvic = WrappedPermitToken<WvicDomain>;

/// The ledger plus a native coin wrapper and permits signed under domain
/// `D`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedPermitToken<D> {
    vrc25: Vrc25,
    metadata: Vrc25Metadata,
    wrapper: NativeWrapper,
    permit: Vrc25Permit<D>,
}

impl<D: IEip712 + Default> WrappedPermitToken<D> {
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
        Ok(Self {
            vrc25,
            metadata: Vrc25Metadata::new(
                config.name,
                config.symbol,
                config.decimals,
            ),
            wrapper: NativeWrapper::new(config.wrapper_fees),
            permit: Vrc25Permit::new(D::default()),
        })
    }
}

impl<D> Vrc25Token for WrappedPermitToken<D> {
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

impl<D> WrappedToken for WrappedPermitToken<D> {
    fn wrapper(&self) -> &NativeWrapper {
        &self.wrapper
    }

    fn wrapper_parts(&mut self) -> (&mut NativeWrapper, &mut Vrc25) {
        (&mut self.wrapper, &mut self.vrc25)
    }
}

impl<D: IEip712> PermitToken for WrappedPermitToken<D> {
    type Domain = D;

    fn permits(&self) -> &Vrc25Permit<D> {
        &self.permit
    }

    fn permit_parts(&mut self) -> (&mut Vrc25Permit<D>, &mut Vrc25) {
        (&mut self.permit, &mut self.vrc25)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, uint, Address, U256};

    use super::{WtomoPermit, Wvic};
    use crate::{
        config::TokenConfig,
        presets::{PermitToken, Vrc25Token, WrappedToken},
        test_utils::MockHost,
        token::vrc25,
    };

    const OWNER: Address = address!("0000000000000000000000000000000000000A11");
    const ALICE: Address = address!("A11CEacF9aa32246d767FCCD72e02d6bCbcC375d");

    #[test]
    fn domains_differ_per_preset() {
        let host = MockHost::default();
        let wtomo =
            WtomoPermit::new(&mut host.ctx(OWNER), TokenConfig::wtomo_permit())
                .expect("should deploy");
        let wvic = Wvic::new(&mut host.ctx(OWNER), TokenConfig::wvic())
            .expect("should deploy");

        let ctx = host.ctx(ALICE);
        assert_ne!(wtomo.domain_separator(&ctx), wvic.domain_separator(&ctx));
    }

    #[test]
    fn wvic_deposit_is_free_and_withdraw_pays_fee() {
        let host = MockHost::default();
        let config = TokenConfig::wvic().with_min_fee(uint!(10_U256));
        let mut token =
            Wvic::new(&mut host.ctx(OWNER), config).expect("should deploy");

        token
            .deposit(&mut host.ctx_with_value(ALICE, uint!(1000_U256)))
            .expect("should deposit");
        assert_eq!(uint!(1000_U256), token.balance_of(ALICE));

        let err = token
            .withdraw(&mut host.ctx(ALICE), uint!(1000_U256))
            .expect_err("should not cover the withdrawal fee");
        assert!(matches!(err, vrc25::Error::InsufficientBalance(_)));

        token
            .withdraw(&mut host.ctx(ALICE), uint!(990_U256))
            .expect("should withdraw");
        assert_eq!(U256::ZERO, token.balance_of(ALICE));
        assert_eq!(uint!(10_U256), token.balance_of(OWNER));
        assert_eq!(uint!(10_U256), token.reserve());
        assert_eq!(token.total_supply(), token.reserve());
    }
}

//! Wrapped native coin token.
use super::{Vrc25Token, WrappedToken};
use crate::{
    config::TokenConfig,
    host::CallContext,
    token::vrc25::{
        self,
        extensions::{NativeWrapper, Vrc25Metadata},
        Vrc25,
    },
};

/// Wrapped TOMO: the ledger plus a native coin wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wtomo {
    vrc25: Vrc25,
    metadata: Vrc25Metadata,
    wrapper: NativeWrapper,
}

impl Wtomo {
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
        })
    }
}

impl Vrc25Token for Wtomo {
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

impl WrappedToken for Wtomo {
    fn wrapper(&self) -> &NativeWrapper {
        &self.wrapper
    }

    fn wrapper_parts(&mut self) -> (&mut NativeWrapper, &mut Vrc25) {
        (&mut self.wrapper, &mut self.vrc25)
    }
}

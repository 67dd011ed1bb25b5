//! Permit extension of the VRC25 standard.
//!
//! Allows approvals to be made via signatures, as defined in EIP-2612.
//!
//! Adds the `permit` method, which can be used to change an account's
//! allowance (see [`Vrc25::allowance`]) by presenting a message signed by the
//! account. The account does not need to send a transaction itself. As with
//! [`Vrc25::approve`], the approval fee is charged from the signing account
//! unless the permit is relayed by a contract.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::{sol, SolError, SolType};

use crate::{
    host::CallContext,
    token::vrc25::{self, Vrc25},
    utils::{
        cryptography::{
            ecdsa,
            eip712::{Eip712Domain, IEip712},
        },
        nonces::Nonces,
    },
};

/// keccak256("Permit(address owner,address spender,uint256 value,uint256
/// nonce,uint256 deadline)")
pub const PERMIT_TYPEHASH: [u8; 32] = keccak_const::Keccak256::new()
    .update(b"Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)")
    .finalize();

/// Tuple hashed into the permit struct hash.
pub type StructHashTuple = sol! {
    tuple(bytes32, address, address, uint256, uint256, uint256)
};

sol! {
    /// Indicates an error related to the fact that
    /// permit deadline has expired.
    ///
    /// * `deadline` - Expired deadline of the permit.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error VRC25PermitExpired(uint256 deadline);

    /// Indicates an error related to the issue about mismatched signature.
    ///
    /// * `signer` - Recovered signer, [`Address::ZERO`] if the signature
    ///   could not be recovered.
    /// * `owner` - Account the permit claims to be signed by.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error VRC25InvalidPermit(address signer, address owner);
}

/// A Permit error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Indicates an error related to the fact that
    /// permit deadline has expired.
    #[error("VRC25: Permit expired")]
    PermitExpired(VRC25PermitExpired),
    /// Indicates an error related to the issue about mismatched signature.
    #[error("VRC25: Invalid permit")]
    InvalidPermit(VRC25InvalidPermit),
    /// Error type from the [`Vrc25`] ledger.
    #[error(transparent)]
    Vrc25(#[from] vrc25::Error),
}

impl From<VRC25PermitExpired> for Error {
    fn from(value: VRC25PermitExpired) -> Self {
        Error::PermitExpired(value)
    }
}

impl From<VRC25InvalidPermit> for Error {
    fn from(value: VRC25InvalidPermit) -> Self {
        Error::InvalidPermit(value)
    }
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::PermitExpired(e) => e.abi_encode(),
            Error::InvalidPermit(e) => e.abi_encode(),
            Error::Vrc25(e) => e.into(),
        }
    }
}

/// State of a [`Vrc25Permit`] component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vrc25Permit<E> {
    /// Nonces of the permit signers.
    nonces: Nonces,
    /// EIP-712 domain of the token.
    eip712: E,
}

impl<E: IEip712> Vrc25Permit<E> {
    /// Creates a permit component signing under the `eip712` domain.
    #[must_use]
    pub fn new(eip712: E) -> Self {
        Self { nonces: Nonces::default(), eip712 }
    }

    /// Returns the current nonce for `owner`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the component's state.
    /// * `owner` - The address for which to return the nonce.
    #[must_use]
    pub fn nonces(&self, owner: Address) -> U256 {
        self.nonces.nonces(owner)
    }

    /// Returns the domain separator used in the encoding of the signature for
    /// [`Self::permit`], as defined by EIP-712.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the component's state.
    /// * `ctx` - Context of the current call.
    #[must_use]
    pub fn domain_separator(&self, ctx: &CallContext<'_>) -> B256 {
        self.eip712.domain_separator_v4(ctx)
    }

    /// Returns the ERC-5267 description of the signing domain.
    #[must_use]
    pub fn eip712_domain(&self, ctx: &CallContext<'_>) -> Eip712Domain {
        self.eip712.eip712_domain(ctx)
    }

    /// Returns the EIP-712 digest an `owner` signs to permit `spender` to
    /// spend `value` tokens with the given `nonce` until `deadline`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the component's state.
    /// * `ctx` - Context of the current call.
    /// * `owner` - Account that owns the tokens.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - The number of tokens being permitted.
    /// * `nonce` - Nonce of `owner` the permit is bound to.
    /// * `deadline` - Deadline for the permit action.
    #[must_use]
    pub fn permit_hash(
        &self,
        ctx: &CallContext<'_>,
        owner: Address,
        spender: Address,
        value: U256,
        nonce: U256,
        deadline: U256,
    ) -> B256 {
        let struct_hash = keccak256(StructHashTuple::abi_encode(&(
            B256::from(PERMIT_TYPEHASH),
            owner,
            spender,
            value,
            nonce,
            deadline,
        )));

        self.eip712.hash_typed_data_v4(ctx, struct_hash)
    }

    /// Sets `value` as the allowance of `spender` over `owner`'s tokens,
    /// given `owner`'s signed approval.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the component's state.
    /// * `ctx` - Context of the current call.
    /// * `owner` - Account that owns the tokens.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - The number of tokens being permitted to transfer by
    ///   `spender`.
    /// * `deadline` - Deadline for the permit action.
    /// * `v` - v value from the `owner`'s signature.
    /// * `r` - r value from the `owner`'s signature.
    /// * `s` - s value from the `owner`'s signature.
    /// * `token` - Write access to the [`Vrc25`] ledger.
    ///
    /// # Errors
    ///
    /// * [`Error::PermitExpired`] - If the `deadline` is in the past.
    /// * [`Error::InvalidPermit`] - If the signature is malformed or was not
    ///   produced by `owner` over these arguments and `owner`'s current
    ///   nonce.
    /// * [`vrc25::Error::ZeroAddress`] - If `spender` is the
    ///   [`Address::ZERO`].
    /// * [`vrc25::Error::InsufficientBalance`] - If `owner` cannot pay the
    ///   approval fee.
    ///
    /// # Events
    ///
    /// * [`vrc25::Approval`].
    /// * [`vrc25::Transfer`] and [`vrc25::Fee`] if a fee is charged.
    #[allow(clippy::too_many_arguments)]
    pub fn permit(
        &mut self,
        ctx: &mut CallContext<'_>,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        v: u8,
        r: B256,
        s: B256,
        token: &mut Vrc25,
    ) -> Result<(), Error> {
        if U256::from(ctx.block_timestamp()) > deadline {
            return Err(VRC25PermitExpired { deadline }.into());
        }

        let nonce = self.nonces.nonces(owner);
        let hash = self.permit_hash(ctx, owner, spender, value, nonce, deadline);

        let signer = ecdsa::recover(hash, v, r, s).map_err(|e| {
            tracing::debug!(target: "vrc25::permit", %owner, error = %e, "signature rejected");
            Error::from(VRC25InvalidPermit { signer: Address::ZERO, owner })
        })?;

        if signer != owner {
            return Err(VRC25InvalidPermit { signer, owner }.into());
        }

        let fee = token.estimate_fee(ctx, value);
        token._approve(ctx, owner, spender, value, fee)?;
        self.nonces.use_nonce(owner);

        tracing::debug!(
            target: "vrc25::permit",
            %owner,
            %spender,
            %value,
            %nonce,
            "permit consumed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, uint, Address, B256, U256};
    use alloy_signer_local::PrivateKeySigner;
    use alloy_sol_types::{eip712_domain, sol, SolStruct};

    use super::{Error, Vrc25Permit, VRC25InvalidPermit, VRC25PermitExpired};
    use crate::{
        test_utils::{emits, sign_hash, MockHost, TOKEN},
        token::vrc25::{self, Approval, Fee, Vrc25},
        utils::cryptography::eip712::IEip712,
    };

    sol! {
        struct Permit {
            address owner;
            address spender;
            uint256 value;
            uint256 nonce;
            uint256 deadline;
        }
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    struct TestDomain;

    impl IEip712 for TestDomain {
        const NAME: &'static str = "VRC25";
        const VERSION: &'static str = "1";
    }

    const OWNER: Address = address!("0000000000000000000000000000000000000A11");
    const BOB: Address = address!("B0B0cB49ec2e96DF5F5fFB081acaE66A2cBBc2e2");
    const HELPER: Address = address!("000000000000000000000000000000000000C0DE");

    const MIN_FEE: U256 = uint!(10_U256);
    const VALUE: U256 = uint!(100_U256);

    struct Setup {
        host: MockHost,
        token: Vrc25,
        permit: Vrc25Permit<TestDomain>,
        signer: PrivateKeySigner,
    }

    fn setup(balance: U256) -> Setup {
        let host = MockHost::default().with_contract(HELPER);
        let signer = PrivateKeySigner::random();
        let mut token =
            Vrc25::new(&mut host.ctx(OWNER), MIN_FEE).expect("should deploy");
        token
            .mint(&mut host.ctx(OWNER), signer.address(), balance)
            .expect("should mint");
        Setup { host, token, permit: Vrc25Permit::new(TestDomain), signer }
    }

    fn deadline(host: &MockHost) -> U256 {
        U256::from(host.timestamp + 3600)
    }

    fn sign(
        setup: &Setup,
        spender: Address,
        value: U256,
        deadline: U256,
    ) -> (u8, B256, B256) {
        let owner = setup.signer.address();
        let ctx = setup.host.ctx(BOB);
        let hash = setup.permit.permit_hash(
            &ctx,
            owner,
            spender,
            value,
            setup.permit.nonces(owner),
            deadline,
        );
        sign_hash(&setup.signer, hash)
    }

    #[test]
    fn permit_hash_matches_typed_data_digest() {
        let setup = setup(U256::ZERO);
        let owner = setup.signer.address();
        let deadline = deadline(&setup.host);
        let ctx = setup.host.ctx(BOB);

        let domain = eip712_domain! {
            name: "VRC25",
            version: "1",
            chain_id: setup.host.chain_id,
            verifying_contract: TOKEN,
        };
        let message = Permit {
            owner,
            spender: BOB,
            value: VALUE,
            nonce: U256::ZERO,
            deadline,
        };

        assert_eq!(domain.separator(), setup.permit.domain_separator(&ctx));
        assert_eq!(
            message.eip712_signing_hash(&domain),
            setup.permit.permit_hash(&ctx, owner, BOB, VALUE, U256::ZERO, deadline)
        );
    }

    #[test]
    fn permit_sets_allowance_and_charges_fee() {
        let mut setup = setup(uint!(1000_U256));
        let owner = setup.signer.address();
        let deadline = deadline(&setup.host);
        let (v, r, s) = sign(&setup, BOB, VALUE, deadline);

        let mut ctx = setup.host.ctx(BOB);
        setup
            .permit
            .permit(&mut ctx, owner, BOB, VALUE, deadline, v, r, s, &mut setup.token)
            .expect("should accept a valid permit");

        assert_eq!(VALUE, setup.token.allowance(owner, BOB));
        assert_eq!(U256::ONE, setup.permit.nonces(owner));
        assert_eq!(uint!(990_U256), setup.token.balance_of(owner));
        assert_eq!(MIN_FEE, setup.token.balance_of(OWNER));
        assert!(emits(&ctx, &Approval { owner, spender: BOB, value: VALUE }));
        assert!(emits(
            &ctx,
            &Fee { from: owner, to: TOKEN, issuer: OWNER, value: MIN_FEE }
        ));
    }

    #[test]
    fn permit_relayed_by_contract_is_free() {
        let mut setup = setup(U256::ZERO);
        let owner = setup.signer.address();
        let deadline = deadline(&setup.host);
        let (v, r, s) = sign(&setup, BOB, VALUE, deadline);

        let mut ctx = setup.host.ctx(HELPER);
        setup
            .permit
            .permit(&mut ctx, owner, BOB, VALUE, deadline, v, r, s, &mut setup.token)
            .expect("contract relays without fee");

        assert_eq!(VALUE, setup.token.allowance(owner, BOB));
        assert_eq!(U256::ZERO, setup.token.balance_of(OWNER));
    }

    #[test]
    fn permit_rejects_replay() {
        let mut setup = setup(uint!(1000_U256));
        let owner = setup.signer.address();
        let deadline = deadline(&setup.host);
        let (v, r, s) = sign(&setup, BOB, VALUE, deadline);

        setup
            .permit
            .permit(
                &mut setup.host.ctx(BOB),
                owner,
                BOB,
                VALUE,
                deadline,
                v,
                r,
                s,
                &mut setup.token,
            )
            .expect("first use succeeds");

        let err = setup
            .permit
            .permit(
                &mut setup.host.ctx(BOB),
                owner,
                BOB,
                VALUE,
                deadline,
                v,
                r,
                s,
                &mut setup.token,
            )
            .expect_err("second use fails");

        assert!(matches!(err, Error::InvalidPermit(_)));
        assert_eq!("VRC25: Invalid permit", err.to_string());
        assert_eq!(U256::ONE, setup.permit.nonces(owner));
    }

    #[test]
    fn permit_rejects_expired_deadline() {
        let mut setup = setup(uint!(1000_U256));
        let owner = setup.signer.address();
        let deadline = U256::from(setup.host.timestamp - 1);
        let (v, r, s) = sign(&setup, BOB, VALUE, deadline);

        let err = setup
            .permit
            .permit(
                &mut setup.host.ctx(BOB),
                owner,
                BOB,
                VALUE,
                deadline,
                v,
                r,
                s,
                &mut setup.token,
            )
            .expect_err("deadline has passed");

        assert_eq!(
            Error::PermitExpired(VRC25PermitExpired { deadline }),
            err
        );
        assert_eq!("VRC25: Permit expired", err.to_string());
        assert_eq!(U256::ZERO, setup.permit.nonces(owner));
    }

    #[test]
    fn permit_accepts_deadline_equal_to_now() {
        let mut setup = setup(uint!(1000_U256));
        let owner = setup.signer.address();
        let deadline = U256::from(setup.host.timestamp);
        let (v, r, s) = sign(&setup, BOB, VALUE, deadline);

        let result = setup.permit.permit(
            &mut setup.host.ctx(BOB),
            owner,
            BOB,
            VALUE,
            deadline,
            v,
            r,
            s,
            &mut setup.token,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn permit_rejects_altered_arguments() {
        let mut setup = setup(uint!(1000_U256));
        let owner = setup.signer.address();
        let deadline = deadline(&setup.host);
        let (v, r, s) = sign(&setup, BOB, VALUE, deadline);

        let wrong_spender = setup.permit.permit(
            &mut setup.host.ctx(BOB),
            owner,
            HELPER,
            VALUE,
            deadline,
            v,
            r,
            s,
            &mut setup.token,
        );
        assert!(matches!(
            wrong_spender,
            Err(Error::InvalidPermit(VRC25InvalidPermit { owner: o, .. })) if o == owner
        ));

        let wrong_value = setup.permit.permit(
            &mut setup.host.ctx(BOB),
            owner,
            BOB,
            VALUE + U256::ONE,
            deadline,
            v,
            r,
            s,
            &mut setup.token,
        );
        assert!(matches!(wrong_value, Err(Error::InvalidPermit(_))));
        assert_eq!(U256::ZERO, setup.token.allowance(owner, BOB));
    }

    #[test]
    fn permit_rejects_malformed_signature() {
        let mut setup = setup(uint!(1000_U256));
        let owner = setup.signer.address();
        let deadline = deadline(&setup.host);
        let (v, r, s) = sign(&setup, BOB, VALUE, deadline);

        let err = setup
            .permit
            .permit(
                &mut setup.host.ctx(BOB),
                owner,
                BOB,
                VALUE,
                deadline,
                v - 27,
                r,
                s,
                &mut setup.token,
            )
            .expect_err("v must be 27 or 28");

        assert_eq!(
            Error::InvalidPermit(VRC25InvalidPermit { signer: Address::ZERO, owner }),
            err
        );
    }

    #[test]
    fn permit_to_zero_spender_fails_after_signature_check() {
        let mut setup = setup(uint!(1000_U256));
        let owner = setup.signer.address();
        let deadline = deadline(&setup.host);
        let (v, r, s) = sign(&setup, Address::ZERO, VALUE, deadline);

        let err = setup
            .permit
            .permit(
                &mut setup.host.ctx(BOB),
                owner,
                Address::ZERO,
                VALUE,
                deadline,
                v,
                r,
                s,
                &mut setup.token,
            )
            .expect_err("zero spender is invalid");

        assert!(matches!(err, Error::Vrc25(vrc25::Error::ZeroAddress(_))));
        assert_eq!("VRC25: approve to the zero address", err.to_string());
        assert_eq!(U256::ZERO, setup.permit.nonces(owner));
    }

    #[test]
    fn permit_fails_when_owner_cannot_pay_fee() {
        let mut setup = setup(uint!(5_U256));
        let owner = setup.signer.address();
        let deadline = deadline(&setup.host);
        let (v, r, s) = sign(&setup, BOB, VALUE, deadline);

        let err = setup
            .permit
            .permit(
                &mut setup.host.ctx(BOB),
                owner,
                BOB,
                VALUE,
                deadline,
                v,
                r,
                s,
                &mut setup.token,
            )
            .expect_err("owner cannot pay the fee");

        assert!(matches!(err, Error::Vrc25(vrc25::Error::InsufficientBalance(_))));
        assert_eq!(U256::ZERO, setup.permit.nonces(owner));
        assert_eq!(U256::ZERO, setup.token.allowance(owner, BOB));
    }
}

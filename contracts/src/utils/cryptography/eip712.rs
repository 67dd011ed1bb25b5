//! [EIP-712](https://eips.ethereum.org/EIPS/eip-712) is a standard for hashing
//! and signing typed structured data.
//!
//! The domain separator is recomputed for every call from the current chain id
//! and the contract's address, so signatures cannot be replayed on a fork of
//! the chain or against another deployment.
//!
//! NOTE: This implements the version of the encoding known as "v4", as
//! implemented by the JSON RPC method [`eth_signTypedDataV4`] in `MetaMask`.
//!
//! [`eth_signTypedDataV4`]: https://docs.metamask.io/guide/signing-data.html

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::{sol, SolType};

use crate::host::CallContext;

/// keccak256("EIP712Domain(string name,string version,uint256 chainId,address
/// verifyingContract)")
pub const TYPE_HASH: [u8; 32] = keccak_const::Keccak256::new()
    .update(
        b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
    )
    .finalize();

/// Fields of the domain separator, as reported by ERC-5267: name, version,
/// chain id and verifying contract.
pub const FIELDS: [u8; 1] = [0x0f];

/// Salt for the domain separator.
pub const SALT: [u8; 32] = [0u8; 32];

/// Prefix for ERC-191 version with `0x01`.
pub const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// Tuple for the domain separator.
pub type DomainSeparatorTuple = sol! {
    tuple(bytes32, bytes32, bytes32, uint256, address)
};

/// ERC-5267 description of an EIP-712 domain.
pub type Eip712Domain =
    ([u8; 1], String, String, U256, Address, [u8; 32], Vec<U256>);

/// EIP-712 domain of a token.
pub trait IEip712 {
    /// Immutable name of EIP-712 instance.
    const NAME: &'static str;
    /// Hashed name of EIP-712 instance.
    const HASHED_NAME: [u8; 32] =
        keccak_const::Keccak256::new().update(Self::NAME.as_bytes()).finalize();

    /// Immutable version of EIP-712 instance.
    const VERSION: &'static str;
    /// Hashed version of EIP-712 instance.
    const HASHED_VERSION: [u8; 32] = keccak_const::Keccak256::new()
        .update(Self::VERSION.as_bytes())
        .finalize();

    /// Returns the fields and values that describe the domain separator used by
    /// this contract for EIP-712 signature.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `ctx` - Context of the current call.
    fn eip712_domain(&self, ctx: &CallContext<'_>) -> Eip712Domain {
        (
            FIELDS,
            Self::NAME.to_owned(),
            Self::VERSION.to_owned(),
            U256::from(ctx.chain_id()),
            ctx.contract_address(),
            SALT,
            Vec::new(),
        )
    }

    /// Returns the domain separator for the current chain.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `ctx` - Context of the current call.
    fn domain_separator_v4(&self, ctx: &CallContext<'_>) -> B256 {
        let encoded = DomainSeparatorTuple::abi_encode(&(
            B256::from(TYPE_HASH),
            B256::from(Self::HASHED_NAME),
            B256::from(Self::HASHED_VERSION),
            U256::from(ctx.chain_id()),
            ctx.contract_address(),
        ));

        keccak256(encoded)
    }

    /// Given an already [hashed struct], this function returns the hash of the
    /// fully encoded EIP-712 message for this domain.
    ///
    /// [hashed struct]: https://eips.ethereum.org/EIPS/eip-712#definition-of-hashstruct
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `ctx` - Context of the current call.
    /// * `struct_hash` - Hash of the typed struct.
    fn hash_typed_data_v4(
        &self,
        ctx: &CallContext<'_>,
        struct_hash: B256,
    ) -> B256 {
        let domain_separator = self.domain_separator_v4(ctx);
        to_typed_data_hash(&domain_separator, &struct_hash)
    }
}

/// Returns the keccak256 digest of an EIP-712 typed data (ERC-191 version
/// `0x01`).
///
/// The digest is calculated from a `domain_separator` and a `struct_hash`, by
/// prefixing them with [`TYPED_DATA_PREFIX`] and hashing the result. It
/// corresponds to the hash signed by the [eth_signTypedData] JSON-RPC method as
/// part of EIP-712.
///
/// [eth_signTypedData]: https://eips.ethereum.org/EIPS/eip-712
#[must_use]
pub fn to_typed_data_hash(domain_separator: &B256, struct_hash: &B256) -> B256 {
    let mut preimage = [0u8; 66];
    preimage[..2].copy_from_slice(&TYPED_DATA_PREFIX);
    preimage[2..34].copy_from_slice(domain_separator.as_slice());
    preimage[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(preimage)
}

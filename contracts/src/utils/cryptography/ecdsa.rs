//! Elliptic Curve Digital Signature Algorithm (ECDSA) operations.
//!
//! These functions can be used to verify that a message was signed
//! by the holder of the private keys of a given address.

use alloy_primitives::{uint, Address, Signature, B256, U256};
use alloy_sol_types::{sol, SolError};

/// Upper range for `s` value from the signature.
pub const SIGNATURE_S_UPPER_BOUND: U256 = uint!(
    0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256
);

sol! {
    /// The signature derives the [`Address::ZERO`] or is otherwise not
    /// recoverable.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error ECDSAInvalidSignature();

    /// The signature has an `S` value that is in the upper half order.
    ///
    /// * `s` - Invalid `S` value.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error ECDSAInvalidSignatureS(bytes32 s);
}

/// An error that occurred while recovering a signer.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The signature derives the [`Address::ZERO`].
    #[error("ECDSA: invalid signature")]
    InvalidSignature(ECDSAInvalidSignature),
    /// The signature has an `S` value that is in the upper half order.
    #[error("ECDSA: invalid signature 's' value")]
    InvalidSignatureS(ECDSAInvalidSignatureS),
}

impl From<ECDSAInvalidSignature> for Error {
    fn from(value: ECDSAInvalidSignature) -> Self {
        Error::InvalidSignature(value)
    }
}

impl From<ECDSAInvalidSignatureS> for Error {
    fn from(value: ECDSAInvalidSignatureS) -> Self {
        Error::InvalidSignatureS(value)
    }
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::InvalidSignature(e) => e.abi_encode(),
            Error::InvalidSignatureS(e) => e.abi_encode(),
        }
    }
}

/// Returns the address that signed a hashed message (`hash`).
///
/// # Arguments
///
/// * `hash` - Hash of the message.
/// * `v` - `v` value from the signature.
/// * `r` - `r` value from the signature.
/// * `s` - `s` value from the signature.
///
/// # Errors
///
/// * [`Error::InvalidSignatureS`] - If the `s` value is greater than
///   [`SIGNATURE_S_UPPER_BOUND`].
/// * [`Error::InvalidSignature`] - If `v` is neither 27 nor 28, the signature
///   is not recoverable or the recovered address is [`Address::ZERO`].
pub fn recover(hash: B256, v: u8, r: B256, s: B256) -> Result<Address, Error> {
    check_if_malleable(&s)?;
    _recover(hash, v, r, s)
}

/// Recovers the signer of `hash` from a signature in `(v, r, s)` form.
///
/// Only `v` values of 27 and 28 are accepted, so that every signature has a
/// single valid encoding.
///
/// # Arguments
///
/// * `hash` - Hash of the message.
/// * `v` - `v` value from the signature.
/// * `r` - `r` value from the signature.
/// * `s` - `s` value from the signature.
///
/// # Errors
///
/// * [`Error::InvalidSignature`] - If `v` is out of range, the signature is
///   not recoverable or the recovered address is [`Address::ZERO`].
fn _recover(hash: B256, v: u8, r: B256, s: B256) -> Result<Address, Error> {
    let y_parity = match v {
        27 => false,
        28 => true,
        _ => return Err(ECDSAInvalidSignature {}.into()),
    };

    let signature = Signature::new(
        U256::from_be_slice(r.as_slice()),
        U256::from_be_slice(s.as_slice()),
        y_parity,
    );

    let recovered = signature
        .recover_address_from_prehash(&hash)
        .map_err(|_| Error::from(ECDSAInvalidSignature {}))?;

    if recovered.is_zero() {
        return Err(ECDSAInvalidSignature {}.into());
    }
    Ok(recovered)
}

/// Validates the `s` value of a signature.
///
/// EIP-2 still allows signature malleability for `ecRecover`. This check
/// removes that possibility and makes the signature unique.
///
/// Appendix F in the [Ethereum Yellow paper], defines the valid range for s in
/// (301): 0 < s < secp256k1n ÷ 2 + 1, and for v in (302): v ∈ {27, 28}.
///
/// If your library generates malleable signatures, such as s-values in the
/// upper range, calculate a new s-value with
/// 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141 - s1,
/// and flip v from 27 to 28 or vice versa.
///
/// # Arguments
///
/// * `s` - `s` value from the signature.
///
/// # Errors
///
/// * [`Error::InvalidSignatureS`] - If the `s` value is greater than
///   [`SIGNATURE_S_UPPER_BOUND`].
///
/// [Ethereum Yellow paper]: https://ethereum.github.io/yellowpaper/paper.pdf
fn check_if_malleable(s: &B256) -> Result<(), Error> {
    let s_u256 = U256::from_be_slice(s.as_slice());
    if s_u256 > SIGNATURE_S_UPPER_BOUND {
        return Err(ECDSAInvalidSignatureS { s: *s }.into());
    }
    Ok(())
}

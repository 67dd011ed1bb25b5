use alloy_primitives::{Address, Signature, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

/// Externally owned account backed by a local secp256k1 key.
#[derive(Clone, Debug)]
pub struct Account {
    /// The account's local private key wrapper.
    pub signer: PrivateKeySigner,
}

/// Signature split into the `(v, r, s)` form a permit takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermitSignature {
    /// Recovery id, either 27 or 28.
    pub v: u8,
    /// `r` value of the signature.
    pub r: B256,
    /// `s` value of the signature.
    pub s: B256,
}

impl From<Signature> for PermitSignature {
    fn from(signature: Signature) -> Self {
        Self {
            v: 27 + u8::from(signature.v()),
            r: signature.r().into(),
            s: signature.s().into(),
        }
    }
}

impl Account {
    /// Creates an account with a fresh random key.
    #[must_use]
    pub fn random() -> Self {
        Self { signer: PrivateKeySigner::random() }
    }

    /// Retrieve this account's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign the given hash.
    ///
    /// # Panics
    ///
    /// May fail when the method is not implemented for `Signer`. Should not
    /// happen.
    #[must_use]
    pub fn sign_hash(&self, hash: &B256) -> Signature {
        self.signer.sign_hash_sync(hash).expect("should sign a hash")
    }

    /// Sign the given permit digest, returning it in `(v, r, s)` form.
    ///
    /// # Panics
    ///
    /// See [`Self::sign_hash`].
    #[must_use]
    pub fn sign_permit(&self, hash: &B256) -> PermitSignature {
        self.sign_hash(hash).into()
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::b256;

    use super::Account;

    #[test]
    fn signature_recovers_to_address() {
        let account = Account::random();
        let hash = b256!(
            "a1de988600a42c4b4ab089b619297c17d53cffae5d5120d82d8a92d0bb3b78f2"
        );

        let signature = account.sign_hash(&hash);
        let recovered = signature
            .recover_address_from_prehash(&hash)
            .expect("should recover");
        assert_eq!(account.address(), recovered);

        let permit = account.sign_permit(&hash);
        assert!(permit.v == 27 || permit.v == 28);
    }
}

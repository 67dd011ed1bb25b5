//! Nonce tracking for addresses.
//!
//! Nonces will only increment.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};

/// State of a [`Nonces`] component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Nonces {
    /// Mapping from address to its nonce.
    nonces: HashMap<Address, U256>,
}

impl Nonces {
    /// Returns the unused nonce for the given account.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the component's state.
    /// * `owner` - The address for which to return the nonce.
    #[must_use]
    pub fn nonces(&self, owner: Address) -> U256 {
        self.nonces.get(&owner).copied().unwrap_or_default()
    }

    /// Consumes a nonce for the given `owner`, returning the consumed value.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the component's state.
    /// * `owner` - The address for which to consume the nonce.
    ///
    /// # Panics
    ///
    /// * If the nonce for the given `owner` exceeds [`U256::MAX`].
    pub fn use_nonce(&mut self, owner: Address) -> U256 {
        let nonce = self.nonces(owner);
        let next = nonce
            .checked_add(U256::ONE)
            .expect("nonce should not exceed `U256::MAX`");
        self.nonces.insert(owner, next);
        nonce
    }
}

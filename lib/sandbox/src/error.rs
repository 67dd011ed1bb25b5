use alloy_primitives::{Address, U256};

/// Failure of a call executed on the sandbox chain.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error<E> {
    /// The contract rejected the call. Its state was rolled back.
    #[error("call reverted: {0}")]
    Reverted(E),
    /// An account cannot cover the native coin the call moves.
    #[error("insufficient funds: {account} holds {balance}, needs {needed}")]
    InsufficientFunds {
        /// Account that ran out of native coin.
        account: Address,
        /// Its native balance.
        balance: U256,
        /// Native coin the call required from it.
        needed: U256,
    },
    /// Native coin was attached to a call that does not accept it.
    #[error("non-payable call received {value}")]
    NonPayable {
        /// Native coin attached to the call.
        value: U256,
    },
}

impl<E> Error<E> {
    /// Returns the contract error if the call reverted.
    pub fn reverted(self) -> Option<E> {
        match self {
            Self::Reverted(e) => Some(e),
            Self::InsufficientFunds { .. } | Self::NonPayable { .. } => None,
        }
    }
}

//! Optional metadata of the VRC25 standard.

/// Number of decimals used by default on implementors of [`Vrc25Metadata`].
pub const DEFAULT_DECIMALS: u8 = 18;

/// State of a [`Vrc25Metadata`] component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vrc25Metadata {
    name: String,
    symbol: String,
    decimals: u8,
}

impl Vrc25Metadata {
    /// Creates the metadata of a token.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the token.
    /// * `symbol` - Symbol of the token.
    /// * `decimals` - Number of decimals used for display.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self { name: name.into(), symbol: symbol.into(), decimals }
    }

    /// Returns the name of the token.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the symbol of the token, usually a shorter version of the name.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the number of decimals used to get a user-friendly
    /// representation of values of this token.
    ///
    /// For example, if `decimals` equals `2`, a balance of `505` tokens should
    /// be displayed to a user as `5.05` (`505 / 10 ** 2`).
    ///
    /// NOTE: This information is only used for *display* purposes: in
    /// no way it affects any of the arithmetic of the token, fees included.
    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.decimals
    }
}

impl Default for Vrc25Metadata {
    fn default() -> Self {
        Self::new("", "", DEFAULT_DECIMALS)
    }
}

#[cfg(test)]
mod tests {
    use super::{Vrc25Metadata, DEFAULT_DECIMALS};

    #[test]
    fn reads_metadata() {
        let metadata = Vrc25Metadata::new("Wrapped Viction", "WVIC", 18);
        assert_eq!("Wrapped Viction", metadata.name());
        assert_eq!("WVIC", metadata.symbol());
        assert_eq!(18, metadata.decimals());
    }

    #[test]
    fn default_decimals() {
        assert_eq!(DEFAULT_DECIMALS, Vrc25Metadata::default().decimals());
    }
}

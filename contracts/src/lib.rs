/*!
# VRC25 Token Toolkit

A library for simulating and validating
[VRC25](https://github.com/BuildOnViction/vrc25) tokens off-chain. VRC25 is an
ERC-20 variant where every transfer, approval and permit pays a flat fee to
the token issuer, except when the caller is itself a contract.

The crate offers the same building blocks the on-chain contracts are made of:

* [`token::vrc25::Vrc25`] - the fee-bearing ledger.
* [`token::vrc25::extensions::Vrc25Permit`] - EIP-2612 style permits.
* [`token::vrc25::extensions::NativeWrapper`] - native coin deposit/withdraw.
* [`access::ownable_two_step::Ownable2Step`] - two-step ownership.

and ready-made [`presets`] for the known deployments (`WTOMO`,
`WTOMOPermit`, `WVIC`, `SampleVRC25`).

## Usage

Every operation runs against a [`host::CallContext`], which carries the
caller, the attached native value and access to the chain through the
[`host::Host`] trait.

```ignore
use vrc25::{
    config::TokenConfig,
    host::CallContext,
    presets::{WrappedToken, Wtomo},
};

let mut ctx = CallContext::new(&chain, deployer, token_address, U256::ZERO);
let mut wtomo = Wtomo::new(&mut ctx, TokenConfig::wtomo())?;

let mut ctx = CallContext::new(&chain, alice, token_address, deposit);
wtomo.deposit(&mut ctx)?;
```

The `vrc25-sandbox` crate provides an in-memory chain implementing
[`host::Host`] that executes calls transactionally.
*/

#![allow(clippy::module_name_repetitions)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod access;
pub mod config;
pub mod host;
pub mod presets;
pub mod token;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

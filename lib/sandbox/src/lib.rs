/*!
In-memory chain for exercising VRC25 tokens end to end.

[`Chain`] implements [`vrc25::host::Host`] and plays the part of the VM: it
tracks native balances, which accounts have code, block time and the event
journal, and executes calls into deployed contracts transactionally.

```ignore
use vrc25::{config::TokenConfig, presets::{WrappedToken, Wtomo}};
use vrc25_sandbox::Chain;

let mut chain = Chain::default();
let alice = chain.create_account(uint!(1_000_U256));
let mut wtomo = chain.deploy(deployer, |ctx| Wtomo::new(ctx, TokenConfig::wtomo()))?;

chain.transact(&mut wtomo, alice.address(), uint!(10_U256), |t, ctx| t.deposit(ctx))?;
assert_eq!(uint!(10_U256), wtomo.balance_of(alice.address()));
```
*/

mod account;
mod chain;
mod error;

pub use account::{Account, PermitSignature};
pub use chain::{Chain, Contract, DEFAULT_CHAIN_ID, GENESIS_TIMESTAMP};
pub use error::Error;

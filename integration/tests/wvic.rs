use alloy_primitives::U256;
use eyre::Result;
use integration::{
    coins, deadline_in, fee_for, revert_reason, sign_permit, Infrastructure, ONE,
};
use vrc25::{
    access::ownable::{self, OwnableUnauthorizedAccount},
    config::TokenConfig,
    presets::{PermitToken, Vrc25Token, WrappedToken, Wvic},
    token::vrc25::extensions::native_wrapper::Withdrawal,
};

fn deploy() -> Result<Infrastructure<Wvic>> {
    let mut infra = Infrastructure::new(TokenConfig::wvic(), Wvic::new)?;
    infra.chain.transact(
        &mut infra.token,
        infra.owner.address(),
        U256::ZERO,
        |t, ctx| t.set_fee(ctx, ONE),
    )?;
    Ok(infra)
}

#[test]
fn cannot_set_fee_without_ownership() -> Result<()> {
    let Infrastructure { mut chain, bob, mut token, .. } = deploy()?;

    let err = chain
        .transact(&mut token, bob.address(), U256::ZERO, |t, ctx| {
            t.set_fee(ctx, ONE)
        })
        .expect_err("should reject a non-owner");

    assert_eq!(
        Some("VRC25: caller is not the owner".to_owned()),
        revert_reason(&err)
    );
    assert_eq!(
        Some(vrc25::token::vrc25::Error::Ownable(ownable::Error::NotOwner(
            OwnableUnauthorizedAccount { account: bob.address() }
        ))),
        err.reverted()
    );
    Ok(())
}

#[test]
fn check_ownership() -> Result<()> {
    let Infrastructure { owner, token, .. } = deploy()?;

    assert_eq!(owner.address(), token.owner());
    assert_eq!("WVIC", token.symbol());
    Ok(())
}

#[test]
fn transfers_ownership_in_two_steps() -> Result<()> {
    let Infrastructure { mut chain, owner, bob, mut token, .. } = deploy()?;

    chain.transact(&mut token, owner.address(), U256::ZERO, |t, ctx| {
        t.transfer_ownership(ctx, bob.address())
    })?;
    assert_eq!(owner.address(), token.owner());

    chain.transact(&mut token, bob.address(), U256::ZERO, |t, ctx| {
        t.accept_ownership(ctx)
    })?;
    assert_eq!(bob.address(), token.owner());
    Ok(())
}

#[test]
fn only_the_pending_owner_accepts() -> Result<()> {
    let Infrastructure { mut chain, owner, alice, bob, mut token } = deploy()?;

    chain.transact(&mut token, owner.address(), U256::ZERO, |t, ctx| {
        t.transfer_ownership(ctx, bob.address())
    })?;
    let err = chain
        .transact(&mut token, alice.address(), U256::ZERO, |t, ctx| {
            t.accept_ownership(ctx)
        })
        .expect_err("should reject an account that was not proposed");

    assert_eq!(
        Some("VRC25: caller is not the pending owner".to_owned()),
        revert_reason(&err)
    );
    assert_eq!(owner.address(), token.owner());
    assert_eq!(bob.address(), token.pending_owner());
    Ok(())
}

#[test]
fn cannot_transfer_ownership_without_ownership() -> Result<()> {
    let Infrastructure { mut chain, bob, mut token, .. } = deploy()?;

    let err = chain
        .transact(&mut token, bob.address(), U256::ZERO, |t, ctx| {
            t.transfer_ownership(ctx, bob.address())
        })
        .expect_err("should reject a non-owner");

    assert_eq!(
        Some("VRC25: caller is not the owner".to_owned()),
        revert_reason(&err)
    );
    Ok(())
}

#[test]
fn deposits_with_a_plain_send() -> Result<()> {
    let Infrastructure { mut chain, owner, mut token, .. } = deploy()?;

    chain.transact(&mut token, owner.address(), ONE, |t, ctx| t.receive(ctx))?;

    assert_eq!(ONE, token.balance_of(owner.address()));
    Ok(())
}

#[test]
fn transfers_with_fee() -> Result<()> {
    let Infrastructure { mut chain, alice, bob, mut token, .. } = deploy()?;
    let amount = coins(500);

    chain.transact(&mut token, alice.address(), coins(1000), |t, ctx| {
        t.receive(ctx)
    })?;
    assert_eq!(coins(1000), token.balance_of(alice.address()));
    assert_eq!(U256::ZERO, token.balance_of(bob.address()));

    chain.transact(&mut token, alice.address(), U256::ZERO, |t, ctx| {
        t.transfer(ctx, bob.address(), amount)
    })?;

    assert_eq!(coins(1000) - amount - ONE, token.balance_of(alice.address()));
    assert_eq!(amount, token.balance_of(bob.address()));
    Ok(())
}

#[test]
fn withdraw_pays_fee() -> Result<()> {
    let Infrastructure { mut chain, owner, alice, mut token, .. } = deploy()?;
    let native_before = chain.native_balance(alice.address());

    chain.transact(&mut token, alice.address(), coins(10), |t, ctx| {
        t.deposit(ctx)
    })?;
    let err = chain
        .transact(&mut token, alice.address(), U256::ZERO, |t, ctx| {
            t.withdraw(ctx, coins(10))
        })
        .expect_err("should not cover the withdrawal fee");
    assert_eq!(
        Some("VRC25: insuffient balance".to_owned()),
        revert_reason(&err)
    );

    let amount = coins(9);
    assert_eq!(ONE, fee_for(&chain, &token, alice.address(), amount));
    chain.transact(&mut token, alice.address(), U256::ZERO, |t, ctx| {
        t.withdraw(ctx, amount)
    })?;

    assert_eq!(U256::ZERO, token.balance_of(alice.address()));
    assert_eq!(ONE, token.balance_of(owner.address()));
    assert_eq!(native_before - ONE, chain.native_balance(alice.address()));
    assert_eq!(ONE, token.reserve());
    assert_eq!(token.total_supply(), token.reserve());
    assert!(chain.emitted(&Withdrawal { src: alice.address(), wad: amount }));
    Ok(())
}

#[test]
fn contract_withdraw_pays_no_fee() -> Result<()> {
    let Infrastructure { mut chain, mut token, .. } = deploy()?;
    let helper = chain.create_contract_account();
    chain.fund(helper, coins(10));

    chain.transact(&mut token, helper, coins(10), |t, ctx| t.deposit(ctx))?;
    chain.transact(&mut token, helper, U256::ZERO, |t, ctx| {
        t.withdraw(ctx, coins(10))
    })?;

    assert_eq!(U256::ZERO, token.balance_of(helper));
    assert_eq!(coins(10), chain.native_balance(helper));
    Ok(())
}

#[test]
fn permits_under_its_own_domain() -> Result<()> {
    let Infrastructure { mut chain, owner, alice, bob, mut token } = deploy()?;
    let amount = coins(100);

    chain.transact(&mut token, alice.address(), coins(1000), |t, ctx| {
        t.deposit(ctx)
    })?;
    let deadline = deadline_in(&chain, 3600);
    let sig =
        sign_permit(&chain, &token, &alice, bob.address(), amount, deadline);

    chain.transact(&mut token, bob.address(), U256::ZERO, |t, ctx| {
        t.permit(
            ctx,
            alice.address(),
            bob.address(),
            amount,
            deadline,
            sig.v,
            sig.r,
            sig.s,
        )
    })?;

    assert_eq!(amount, token.allowance(alice.address(), bob.address()));
    assert_eq!(ONE, token.balance_of(owner.address()));

    chain.transact(&mut token, bob.address(), U256::ZERO, |t, ctx| {
        t.transfer_from(ctx, alice.address(), bob.address(), coins(99))
    })?;
    assert_eq!(U256::ZERO, token.allowance(alice.address(), bob.address()));
    assert_eq!(coins(99), token.balance_of(bob.address()));
    Ok(())
}

use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::events;
use crate::storage_types::{DataKey, Error, PersistentKey, Post, PostId};

/// Move a pledge from the contributor into contract escrow.
pub fn collect(env: &Env, from: &Address, amount: i128) {
    transfer(env, from, &env.current_contract_address(), amount);
}

/// Pay escrowed funds out to a creator or contributor.
pub fn pay_out(env: &Env, to: &Address, amount: i128) {
    transfer(env, &env.current_contract_address(), to, amount);
}

fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) {
    let token_address: Address = env.storage().instance().get(&DataKey::Token).unwrap();
    let token_client = token::TokenClient::new(env, &token_address);

    if token_client.try_transfer(from, to, &amount).is_err() {
        panic_with_error!(env, Error::TransferFailed);
    }
}

/// Pay the full collected amount to the creator, then remove the post.
pub fn settle_collected(env: &Env, post: &Post) {
    pay_out(env, &post.creator, post.collected_amount);

    events::emit_funds_collected(
        env,
        events::FundsCollectedEvent {
            post_id: post.id,
            creator: post.creator.clone(),
            amount: post.collected_amount,
        },
    );

    remove_post(env, post.id);
}

/// Refund every contributor still holding a recorded amount, in the order
/// they first pledged, then remove the post. Accounts already paid through
/// `claim_refund` hold a zero and are skipped.
pub fn settle_refunded(env: &Env, post: &mut Post) {
    let contributors = post.contributors.clone();
    for contributor in contributors.iter() {
        let amount = post.clear_contribution(&contributor);
        if amount > 0 {
            pay_out(env, &contributor, amount);

            events::emit_refund_issued(
                env,
                events::RefundIssuedEvent {
                    post_id: post.id,
                    contributor,
                    amount,
                },
            );
        }
    }

    remove_post(env, post.id);
}

/// Delete the post record, contribution map included.
pub fn remove_post(env: &Env, post_id: PostId) {
    env.storage().persistent().remove(&PersistentKey::Post(post_id));

    events::emit_post_removed(env, events::PostRemovedEvent { post_id });
}

use soroban_sdk::{contracttype, Address, Symbol};

use crate::storage_types::PostId;

#[contracttype]
#[derive(Clone)]
pub struct PostCreatedEvent {
    pub post_id: PostId,
    pub creator: Address,
    pub goal_amount: i128,
    pub min_contribution: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct FundsCollectedEvent {
    pub post_id: PostId,
    pub creator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct RefundIssuedEvent {
    pub post_id: PostId,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct PostRemovedEvent {
    pub post_id: PostId,
}

pub fn emit_post_created(env: &soroban_sdk::Env, event: PostCreatedEvent) {
    env.events().publish(
        (Symbol::new(env, "post_created"),),
        event,
    );
}

pub fn emit_funds_collected(env: &soroban_sdk::Env, event: FundsCollectedEvent) {
    env.events().publish(
        (Symbol::new(env, "funds_collected"),),
        event,
    );
}

pub fn emit_refund_issued(env: &soroban_sdk::Env, event: RefundIssuedEvent) {
    env.events().publish(
        (Symbol::new(env, "refund_issued"),),
        event,
    );
}

pub fn emit_post_removed(env: &soroban_sdk::Env, event: PostRemovedEvent) {
    env.events().publish(
        (Symbol::new(env, "post_removed"),),
        event,
    );
}

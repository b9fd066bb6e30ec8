#![no_std]

mod events;
mod settlement;
mod storage_types;


use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, Map, Vec};
use storage_types::{
    DataKey, Error, PersistentKey, Post, PostId, POST_DURATION, TTL_INSTANCE, TTL_PERSISTENT,
};

#[contract]
pub struct Crowdfund;

#[contractimpl]
impl Crowdfund {
    /// Bind the funding token. Must be called once after deployment.
    pub fn initialize(env: Env, token: Address) {
        if env.storage().instance().has(&DataKey::Token) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::PostCount, &0u64);

        extend_instance(&env);
    }

    /// Open a funding post. The deadline is fixed at five days from now.
    pub fn create_post(
        env: Env,
        creator: Address,
        goal_amount: i128,
        min_contribution: i128,
    ) -> PostId {
        creator.require_auth();

        if goal_amount <= 0 || min_contribution <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let count: u64 = env.storage().instance().get(&DataKey::PostCount).unwrap();
        let post_id = count + 1;
        let deadline = env.ledger().timestamp() + POST_DURATION;

        let post = Post {
            id: post_id,
            creator: creator.clone(),
            goal_amount,
            min_contribution,
            deadline,
            collected_amount: 0,
            active: true,
            contributors: Vec::new(&env),
            contributions: Map::new(&env),
        };

        env.storage().persistent().set(&PersistentKey::Post(post_id), &post);
        env.storage().instance().set(&DataKey::PostCount, &post_id);

        extend_persistent(&env, &PersistentKey::Post(post_id));
        extend_instance(&env);

        events::emit_post_created(
            &env,
            events::PostCreatedEvent {
                post_id,
                creator,
                goal_amount,
                min_contribution,
                deadline,
            },
        );

        post_id
    }

    /// Pledge `amount` to a post. The pledge that first brings the total to
    /// the goal settles the post in the same call: the creator is paid the
    /// full collected amount and the post is removed.
    pub fn fund_post(env: Env, post_id: PostId, contributor: Address, amount: i128) {
        contributor.require_auth();

        let mut post = load_post(&env, post_id);

        if !post.active {
            panic_with_error!(&env, Error::PostNotActive);
        }
        if env.ledger().timestamp() > post.deadline {
            panic_with_error!(&env, Error::DeadlinePassed);
        }
        if amount < post.min_contribution {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        settlement::collect(&env, &contributor, amount);
        post.record_contribution(contributor, amount);

        if post.collected_amount >= post.goal_amount {
            post.active = false;
            settlement::settle_collected(&env, &post);
        } else {
            env.storage().persistent().set(&PersistentKey::Post(post_id), &post);
            extend_persistent(&env, &PersistentKey::Post(post_id));
        }
    }

    /// Force settlement once the deadline has passed. Callable by anyone:
    /// pays the creator if the goal was met, otherwise refunds every
    /// contributor still holding a recorded amount, then removes the post.
    pub fn check_deadline(env: Env, post_id: PostId) {
        let mut post = load_post(&env, post_id);

        if !post.active {
            panic_with_error!(&env, Error::PostNotActive);
        }
        if env.ledger().timestamp() < post.deadline {
            panic_with_error!(&env, Error::DeadlineNotReached);
        }

        post.active = false;

        if post.collected_amount >= post.goal_amount {
            settlement::settle_collected(&env, &post);
        } else {
            settlement::settle_refunded(&env, &mut post);
        }
    }

    /// Reclaim an individual pledge after the deadline of a post that
    /// missed its goal. The post stays open for other contributors; a later
    /// `check_deadline` bulk pass skips accounts already paid here.
    pub fn claim_refund(env: Env, post_id: PostId, contributor: Address) {
        contributor.require_auth();

        let mut post = load_post(&env, post_id);

        if !post.active {
            panic_with_error!(&env, Error::PostNotActive);
        }
        if env.ledger().timestamp() < post.deadline {
            panic_with_error!(&env, Error::DeadlineNotReached);
        }
        if post.collected_amount >= post.goal_amount {
            panic_with_error!(&env, Error::GoalAlreadyMet);
        }

        let amount = post.clear_contribution(&contributor);
        if amount == 0 {
            panic_with_error!(&env, Error::NoContribution);
        }

        env.storage().persistent().set(&PersistentKey::Post(post_id), &post);
        extend_persistent(&env, &PersistentKey::Post(post_id));

        settlement::pay_out(&env, &contributor, amount);

        events::emit_refund_issued(
            &env,
            events::RefundIssuedEvent {
                post_id,
                contributor,
                amount,
            },
        );
    }

    /// View functions
    pub fn get_post(env: Env, post_id: PostId) -> Post {
        load_post(&env, post_id)
    }

    /// Ids in creation order. Removed posts leave a zero placeholder so the
    /// sequence always spans `1..=post_count`.
    pub fn get_post_ids(env: Env) -> Vec<PostId> {
        let count: u64 = env.storage().instance().get(&DataKey::PostCount).unwrap_or(0);

        let mut ids = Vec::new(&env);
        for post_id in 1..=count {
            if env.storage().persistent().has(&PersistentKey::Post(post_id)) {
                ids.push_back(post_id);
            } else {
                ids.push_back(0);
            }
        }

        ids
    }

    /// Seconds until the deadline, 0 once it has passed.
    pub fn get_remaining_time(env: Env, post_id: PostId) -> u64 {
        let post = load_post(&env, post_id);
        post.deadline.saturating_sub(env.ledger().timestamp())
    }

    pub fn get_collected_funds(env: Env, post_id: PostId) -> i128 {
        load_post(&env, post_id).collected_amount
    }

    /// Amount recorded for `contributor`, 0 if they never contributed.
    pub fn get_contribution(env: Env, post_id: PostId, contributor: Address) -> i128 {
        load_post(&env, post_id).contribution_of(&contributor)
    }

    pub fn get_post_count(env: Env) -> u64 {
        env.storage().instance().get(&DataKey::PostCount).unwrap_or(0)
    }
}

// Helper functions
fn load_post(env: &Env, post_id: PostId) -> Post {
    env.storage()
        .persistent()
        .get(&PersistentKey::Post(post_id))
        .unwrap_or_else(|| panic_with_error!(env, Error::PostNotFound))
}

fn extend_instance(env: &Env) {
    env.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(env: &Env, key: &PersistentKey) {
    env.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

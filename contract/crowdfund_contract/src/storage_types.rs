use soroban_sdk::{contracterror, contracttype, Address, Map, Vec};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Token,
    PostCount,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Post(PostId),
}

pub type PostId = u64;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    InvalidAmount = 2,
    PostNotFound = 3,
    PostNotActive = 4,
    DeadlineNotReached = 5,
    DeadlinePassed = 6,
    GoalAlreadyMet = 7,
    NoContribution = 8,
    TransferFailed = 9,
}

/// A funding post and its escrowed pledges.
///
/// `collected_amount` always equals the sum of the values in
/// `contributions` while the record exists. `contributors` holds each
/// account exactly once, in the order of its first pledge, so bulk refunds
/// iterate deterministically.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Post {
    pub id: PostId,
    pub creator: Address,
    pub goal_amount: i128,
    pub min_contribution: i128,
    pub deadline: u64,
    pub collected_amount: i128,
    pub active: bool,
    pub contributors: Vec<Address>,
    pub contributions: Map<Address, i128>,
}

impl Post {
    /// Add a pledge. Repeat pledges accumulate; the contributor is appended
    /// to the ordered list only on their first one.
    pub fn record_contribution(&mut self, contributor: Address, amount: i128) {
        let current = self.contributions.get(contributor.clone()).unwrap_or(0);
        if !self.contributors.contains(&contributor) {
            self.contributors.push_back(contributor.clone());
        }
        self.contributions.set(contributor, current + amount);
        self.collected_amount += amount;
    }

    /// Amount recorded for `contributor`, 0 if they never pledged.
    pub fn contribution_of(&self, contributor: &Address) -> i128 {
        self.contributions.get(contributor.clone()).unwrap_or(0)
    }

    /// Zero out a contributor's recorded amount and return it. The
    /// collected total shrinks by the same amount so it keeps matching the
    /// sum of recorded pledges.
    pub fn clear_contribution(&mut self, contributor: &Address) -> i128 {
        let amount = self.contribution_of(contributor);
        if amount > 0 {
            self.contributions.set(contributor.clone(), 0);
            self.collected_amount -= amount;
        }
        amount
    }
}

// Constants
pub const POST_DURATION: u64 = 5 * 86400; // 5 days in seconds
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days

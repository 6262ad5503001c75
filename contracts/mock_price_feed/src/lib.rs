//! Mock Price Feed
//!
//! Deterministic stand-in for a live market feed. Reports a fixed-decimal USD
//! price that the admin can move between reads, which is exactly what a
//! campaign needs to exercise decision-time re-quotes in local environments.

#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};


/// All panic messages used by the mock_price_feed contract.
pub const ERR_ALREADY_INITIALIZED: &str = "already initialized";
pub const ERR_NOT_INITIALIZED: &str = "not initialized";
pub const ERR_UNAUTHORIZED: &str = "unauthorized";
pub const ERR_INVALID_PRICE: &str = "price must be positive";

/// A single reported price point. Field-compatible with the consumer-side
/// `PriceData` the campaign contract decodes.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PriceData {
    /// USD price of one whole token unit, scaled by `decimals`.
    pub price: i128,
    /// Ledger timestamp at which the price was last set.
    pub timestamp: u64,
}

#[contracttype]
pub enum DataKey {
    /// Address allowed to move the price.
    Admin,
    /// Number of decimal places in the reported price.
    Decimals,
    /// Latest reported price point.
    LatestPrice,
}

fn require_admin(e: &Env, caller: &Address) {
    caller.require_auth();
    let stored: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
    if stored != *caller {
        panic!("{}", ERR_UNAUTHORIZED);
    }
}

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    /// One-time initialization. Stores `admin`, the price precision, and the
    /// first reported price.
    pub fn initialize(e: Env, admin: Address, decimals: u32, initial_price: i128) {
        if e.storage().instance().has(&DataKey::Admin) {
            panic!("{}", ERR_ALREADY_INITIALIZED);
        }
        if initial_price <= 0 {
            panic!("{}", ERR_INVALID_PRICE);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Decimals, &decimals);
        e.storage().instance().set(
            &DataKey::LatestPrice,
            &PriceData {
                price: initial_price,
                timestamp: e.ledger().timestamp(),
            },
        );
    }

    /// Move the reported price. Admin only.
    pub fn set_price(e: Env, admin: Address, new_price: i128) {
        require_admin(&e, &admin);
        if new_price <= 0 {
            panic!("{}", ERR_INVALID_PRICE);
        }
        e.storage().instance().set(
            &DataKey::LatestPrice,
            &PriceData {
                price: new_price,
                timestamp: e.ledger().timestamp(),
            },
        );
        e.events()
            .publish((Symbol::new(&e, "price_updated"),), new_price);
    }

    /// Number of decimal places in `latest_price().price`.
    pub fn decimals(e: Env) -> u32 {
        e.storage()
            .instance()
            .get(&DataKey::Decimals)
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED))
    }

    /// Latest reported price point.
    pub fn latest_price(e: Env) -> PriceData {
        e.storage()
            .instance()
            .get(&DataKey::LatestPrice)
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED))
    }
}

//! Threshold Crowdfunding Escrow
//!
//! Funders deposit a Stellar asset during a fixed time window. The campaign
//! carries a USD-denominated minimum contribution and funding target; a price
//! feed converts both into token units at decision time. If the target is met
//! once the window closes, the owner drains the full balance; otherwise each
//! funder reclaims exactly what they put in.
//!
//! ## Key design decisions
//!
//! - **Derived state**: window-open/closed and target-reached are computed
//!   from the ledger timestamp, the current total, and a fresh price read at
//!   call time. No stored flags to fall out of sync.
//! - **One-shot drain**: a successful owner withdrawal zeroes every balance;
//!   a second call fails instead of silently succeeding.
//! - **Checks-Effects-Interactions**: guards and the price conversion run
//!   before any storage write; storage is updated before token transfers.
//! - **Auth-gated mutations**: `require_auth()` on contribute/withdraw/refund;
//!   ownership is a runtime identity comparison.

#![no_std]

mod errors;
pub mod oracle;
mod types;

use errors::*;
use oracle::usd_to_native;
use types::DataKey;

use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Env, Symbol, Vec};

#[cfg(test)]
mod test_helpers;


/// USD amounts (minimum contribution, target) are stored in cents.
pub const USD_DECIMALS: u32 = 2;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn read_owner(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Owner)
        .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED))
}

fn read_price_feed(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::PriceFeed)
        .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED))
}

fn read_token(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Token)
        .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED))
}

fn read_close_at(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::WindowCloseAt)
        .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED))
}

fn read_total_held(e: &Env) -> i128 {
    e.storage().instance().get(&DataKey::TotalHeld).unwrap_or(0)
}

fn read_contribution(e: &Env, funder: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&DataKey::Contribution(funder.clone()))
        .unwrap_or(0)
}

fn read_funders(e: &Env) -> Vec<Address> {
    e.storage()
        .instance()
        .get(&DataKey::Funders)
        .unwrap_or_else(|| Vec::new(e))
}

/// Current token-unit value of the campaign target.
/// Re-queried on every decision so late price swings are reflected.
fn target_in_tokens(e: &Env) -> i128 {
    let feed = read_price_feed(e);
    let target_usd: i128 = e
        .storage()
        .instance()
        .get(&DataKey::TargetUsd)
        .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
    usd_to_native(e, &feed, target_usd, USD_DECIMALS)
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct FundMe;

#[contractimpl]
impl FundMe {
    /// One-time initialization. Opens the funding window at the current
    /// ledger timestamp.
    ///
    /// # Arguments
    /// * `owner`           - Deploying identity; only address allowed to withdraw
    /// * `price_feed`      - Contract satisfying the price feed capability
    /// * `token`           - Stellar asset the campaign escrows
    /// * `window_duration` - Funding window length in seconds, must be positive
    /// * `minimum_usd`     - Minimum per-contribution value, USD cents
    /// * `target_usd`      - Funding goal, USD cents
    ///
    /// Panics if called again after initialization, on a zero duration, on a
    /// non-positive threshold, or if the close timestamp would overflow.
    pub fn initialize(
        e: Env,
        owner: Address,
        price_feed: Address,
        token: Address,
        window_duration: u64,
        minimum_usd: i128,
        target_usd: i128,
    ) {
        if e.storage().instance().has(&DataKey::Owner) {
            panic!("{}", ERR_ALREADY_INITIALIZED);
        }
        owner.require_auth();

        if window_duration == 0 {
            panic!("{}", ERR_INVALID_DURATION);
        }
        if minimum_usd <= 0 || target_usd <= 0 {
            panic!("{}", ERR_INVALID_THRESHOLD);
        }

        let window_open_at = e.ledger().timestamp();
        let window_close_at = window_open_at
            .checked_add(window_duration)
            .expect(ERR_DURATION_OVERFLOW);

        e.storage().instance().set(&DataKey::Owner, &owner);
        e.storage().instance().set(&DataKey::PriceFeed, &price_feed);
        e.storage().instance().set(&DataKey::Token, &token);
        e.storage()
            .instance()
            .set(&DataKey::WindowOpenAt, &window_open_at);
        e.storage()
            .instance()
            .set(&DataKey::WindowDuration, &window_duration);
        e.storage()
            .instance()
            .set(&DataKey::WindowCloseAt, &window_close_at);
        e.storage().instance().set(&DataKey::MinimumUsd, &minimum_usd);
        e.storage().instance().set(&DataKey::TargetUsd, &target_usd);
        e.storage().instance().set(&DataKey::TotalHeld, &0_i128);
    }

    // ── Funding lifecycle ──────────────────────────────────────────────────

    /// Deposit `amount` token units into the campaign.
    ///
    /// Requirements:
    /// - The funding window is still open.
    /// - `amount` is worth at least the USD minimum at the current price.
    /// - Caller has approved the contract to spend `amount`.
    ///
    /// Repeated contributions from the same funder accumulate. All guards,
    /// including the price conversion, run before any state is touched; a
    /// failed conversion leaves the ledger unchanged.
    pub fn contribute(e: Env, contributor: Address, amount: i128) {
        contributor.require_auth();

        let now = e.ledger().timestamp();
        if now >= read_close_at(&e) {
            panic!("{}", ERR_WINDOW_CLOSED);
        }

        let feed = read_price_feed(&e);
        let minimum_usd: i128 = e
            .storage()
            .instance()
            .get(&DataKey::MinimumUsd)
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
        let minimum_tokens = usd_to_native(&e, &feed, minimum_usd, USD_DECIMALS);
        if amount < minimum_tokens {
            panic!("{}", ERR_BELOW_MINIMUM);
        }

        // Pull tokens in first (caller must have approved).
        let token = read_token(&e);
        let contract = e.current_contract_address();
        TokenClient::new(&e, &token).transfer_from(&contract, &contributor, &contract, &amount);

        let balance = read_contribution(&e, &contributor);
        let new_balance = balance
            .checked_add(amount)
            .unwrap_or_else(|| panic!("{}", ERR_BALANCE_OVERFLOW));
        e.storage()
            .persistent()
            .set(&DataKey::Contribution(contributor.clone()), &new_balance);

        if balance == 0 {
            let mut funders = read_funders(&e);
            funders.push_back(contributor);
            e.storage().instance().set(&DataKey::Funders, &funders);
        }

        let total = read_total_held(&e)
            .checked_add(amount)
            .unwrap_or_else(|| panic!("{}", ERR_BALANCE_OVERFLOW));
        e.storage().instance().set(&DataKey::TotalHeld, &total);
    }

    /// Drain the full campaign balance to the owner.
    ///
    /// Requirements, checked in order:
    /// - `caller` is the owner.
    /// - The funding window has closed.
    /// - The campaign still holds funds (the drain is one-shot).
    /// - The total meets the USD target at the current price.
    ///
    /// Zeroes every funder balance before transferring, then emits
    /// `funds_withdrawn` with the drained amount.
    pub fn withdraw_funds(e: Env, caller: Address) {
        caller.require_auth();

        if caller != read_owner(&e) {
            panic!("{}", ERR_NOT_OWNER);
        }

        let now = e.ledger().timestamp();
        if now < read_close_at(&e) {
            panic!("{}", ERR_WINDOW_STILL_OPEN);
        }

        let total = read_total_held(&e);
        if total == 0 {
            panic!("{}", ERR_NOTHING_TO_WITHDRAW);
        }

        if total < target_in_tokens(&e) {
            panic!("{}", ERR_TARGET_NOT_REACHED);
        }

        // CEI: drain the ledger before transferring.
        let funders = read_funders(&e);
        for funder in funders.iter() {
            e.storage()
                .persistent()
                .remove(&DataKey::Contribution(funder));
        }
        e.storage().instance().set(&DataKey::Funders, &Vec::<Address>::new(&e));
        e.storage().instance().set(&DataKey::TotalHeld, &0_i128);

        let token = read_token(&e);
        let contract = e.current_contract_address();
        TokenClient::new(&e, &token).transfer(&contract, &caller, &total);

        e.events()
            .publish((Symbol::new(&e, "funds_withdrawn"),), total);
    }

    /// Return the caller's full contribution after a failed campaign.
    ///
    /// Requirements, checked in order:
    /// - The funding window has closed.
    /// - The total does not meet the USD target at the current price.
    /// - `caller` has an outstanding balance.
    ///
    /// Zeroes the caller's balance before transferring, then emits
    /// `refund` with `(caller, amount)`.
    pub fn refund(e: Env, caller: Address) {
        caller.require_auth();

        let now = e.ledger().timestamp();
        if now < read_close_at(&e) {
            panic!("{}", ERR_WINDOW_STILL_OPEN);
        }

        if read_total_held(&e) >= target_in_tokens(&e) {
            panic!("{}", ERR_TARGET_REACHED);
        }

        let amount = read_contribution(&e, &caller);
        if amount == 0 {
            panic!("{}", ERR_NO_BALANCE);
        }

        // CEI: zero the balance before transferring.
        e.storage()
            .persistent()
            .remove(&DataKey::Contribution(caller.clone()));

        let mut funders = read_funders(&e);
        if let Some(index) = funders.first_index_of(&caller) {
            funders.remove_unchecked(index);
        }
        e.storage().instance().set(&DataKey::Funders, &funders);

        let total = read_total_held(&e)
            .checked_sub(amount)
            .unwrap_or_else(|| panic!("{}", ERR_BALANCE_OVERFLOW));
        e.storage().instance().set(&DataKey::TotalHeld, &total);

        let token = read_token(&e);
        let contract = e.current_contract_address();
        TokenClient::new(&e, &token).transfer(&contract, &caller, &amount);

        e.events()
            .publish((Symbol::new(&e, "refund"), caller), amount);
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Returns the campaign owner.
    pub fn get_owner(e: Env) -> Address {
        read_owner(&e)
    }

    /// Returns the injected price feed address.
    pub fn get_price_feed(e: Env) -> Address {
        read_price_feed(&e)
    }

    /// Returns the escrowed asset address.
    pub fn get_token(e: Env) -> Address {
        read_token(&e)
    }

    /// Returns `funder`'s outstanding contribution, 0 if none.
    pub fn get_contribution(e: Env, funder: Address) -> i128 {
        read_contribution(&e, &funder)
    }

    /// Returns the sum of all outstanding contributions.
    pub fn get_total_held(e: Env) -> i128 {
        read_total_held(&e)
    }

    /// Returns the funders with a non-zero balance.
    pub fn get_funders(e: Env) -> Vec<Address> {
        read_funders(&e)
    }

    /// Returns `true` while contributions are still accepted.
    pub fn is_window_open(e: Env) -> bool {
        e.ledger().timestamp() < read_close_at(&e)
    }

    /// Returns the number of seconds until the window closes.
    /// Returns 0 once it has closed.
    pub fn get_time_remaining(e: Env) -> u64 {
        let close_at = read_close_at(&e);
        let now = e.ledger().timestamp();
        if now >= close_at {
            0_u64
        } else {
            close_at - now
        }
    }

    /// Returns the minimum contribution in token units at the current price.
    pub fn get_minimum_contribution(e: Env) -> i128 {
        let feed = read_price_feed(&e);
        let minimum_usd: i128 = e
            .storage()
            .instance()
            .get(&DataKey::MinimumUsd)
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
        usd_to_native(&e, &feed, minimum_usd, USD_DECIMALS)
    }

    /// Returns the funding target in token units at the current price.
    pub fn get_target_amount(e: Env) -> i128 {
        target_in_tokens(&e)
    }
}

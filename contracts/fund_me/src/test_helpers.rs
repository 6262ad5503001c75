//! Shared test helpers for fund_me tests.

#![cfg(test)]

use crate::{FundMe, FundMeClient};
use mock_price_feed::{MockPriceFeed, MockPriceFeedClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

/// Price feed precision used throughout the tests.
pub const FEED_DECIMALS: u32 = 8;
/// $3,000.00000000 per whole token.
pub const PRICE_3000: i128 = 300_000_000_000;
/// $6,000.00000000 per whole token.
pub const PRICE_6000: i128 = 600_000_000_000;

/// $100 minimum contribution, in cents.
pub const MIN_USD: i128 = 100_00;
/// $1,000 funding target, in cents.
pub const TARGET_USD: i128 = 1_000_00;
/// Funding window in seconds.
pub const WINDOW: u64 = 180;

/// One whole token (7 decimals).
pub const TOKEN: i128 = 10_000_000;
/// $100 at $3,000 per token, floor-divided.
pub const MIN_TOKENS: i128 = 333_333;
/// $1,000 at $3,000 per token, floor-divided.
pub const TARGET_TOKENS: i128 = 3_333_333;

/// Default mint: large enough for all test scenarios.
pub const DEFAULT_MINT: i128 = 1_000 * TOKEN;

/// Mints to a fresh funder and approves the campaign to pull from it.
pub fn add_funder(e: &Env, token_address: &Address, contract_id: &Address) -> Address {
    let funder = Address::generate(e);
    let asset_admin = StellarAssetClient::new(e, token_address);
    asset_admin.set_authorized(&funder, &true);
    asset_admin.mint(&funder, &DEFAULT_MINT);

    let token = TokenClient::new(e, token_address);
    let expiry_ledger = e.ledger().sequence().saturating_add(10_000);
    token.approve(&funder, contract_id, &DEFAULT_MINT, &expiry_ledger);
    funder
}

/// Advances the ledger clock past the funding window.
pub fn close_window(e: &Env) {
    e.ledger().with_mut(|li| li.timestamp += WINDOW + 20);
}

/// Full environment setup: deploys the feed ($3,000, 8 decimals), a Stellar
/// asset, and the campaign ($100 minimum, $1,000 target, 180 s window), and
/// funds one contributor.
///
/// The owner doubles as feed admin and asset admin.
/// Returns `(client, feed, owner, funder, token_address, contract_id)`.
pub fn setup(
    e: &Env,
) -> (
    FundMeClient<'_>,
    MockPriceFeedClient<'_>,
    Address,
    Address,
    Address,
    Address,
) {
    e.mock_all_auths();

    let owner = Address::generate(e);

    let feed_id = e.register(MockPriceFeed, ());
    let feed = MockPriceFeedClient::new(e, &feed_id);
    feed.initialize(&owner, &FEED_DECIMALS, &PRICE_3000);

    let token_address = e
        .register_stellar_asset_contract_v2(owner.clone())
        .address();

    let contract_id = e.register(FundMe, ());
    let client = FundMeClient::new(e, &contract_id);
    let funder = add_funder(e, &token_address, &contract_id);

    client.initialize(
        &owner,
        &feed_id,
        &token_address,
        &WINDOW,
        &MIN_USD,
        &TARGET_USD,
    );

    (client, feed, owner, funder, token_address, contract_id)
}

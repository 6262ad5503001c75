//! Price feed capability and USD → token-unit conversion.
//!
//! The campaign depends on a single read: "current USD price of one token
//! unit, with a fixed number of decimals". Any contract exposing `decimals`
//! and `latest_price` satisfies the capability; the concrete feed (a mock in
//! local environments, a live market feed in production) is injected at
//! initialization and otherwise opaque.

use soroban_sdk::{contractclient, contracttype, Address, Env};

use crate::errors::*;

/// Decimals of the escrowed Stellar asset.
pub const NATIVE_DECIMALS: u32 = 7;

/// A single reported price point.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PriceData {
    /// USD price of one whole token unit, scaled by the feed's decimals.
    pub price: i128,
    /// Ledger timestamp at which the price was last set.
    pub timestamp: u64,
}

#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    /// Number of decimal places in `latest_price().price`.
    fn decimals(env: Env) -> u32;

    /// Latest reported price. No caching beyond what the feed itself does.
    fn latest_price(env: Env) -> PriceData;
}

/// Convert a USD amount (scaled by `usd_decimals`) into token units at the
/// feed's current price.
///
/// `token_amount = usd_amount * 10^NATIVE_DECIMALS / (price * 10^(usd_decimals - feed_decimals))`
///
/// Integer arithmetic throughout; a negative exponent on the divisor is
/// folded into the numerator instead. Every intermediate product is checked
/// and panics rather than wrapping.
///
/// Panics with `ERR_ORACLE_UNAVAILABLE` if the feed call fails or reports a
/// non-positive price, and with `ERR_CONVERSION_OVERFLOW` if any intermediate
/// value exceeds the i128 range.
pub fn usd_to_native(e: &Env, feed: &Address, usd_amount: i128, usd_decimals: u32) -> i128 {
    let client = PriceFeedClient::new(e, feed);

    let feed_decimals = match client.try_decimals() {
        Ok(Ok(d)) => d,
        _ => panic!("{}", ERR_ORACLE_UNAVAILABLE),
    };
    let data = match client.try_latest_price() {
        Ok(Ok(p)) => p,
        _ => panic!("{}", ERR_ORACLE_UNAVAILABLE),
    };
    if data.price <= 0 {
        panic!("{}", ERR_ORACLE_UNAVAILABLE);
    }

    let scaled_usd = usd_amount
        .checked_mul(pow10(NATIVE_DECIMALS))
        .unwrap_or_else(|| panic!("{}", ERR_CONVERSION_OVERFLOW));

    let (numerator, divisor) = if usd_decimals >= feed_decimals {
        let scale = pow10(usd_decimals - feed_decimals);
        let divisor = data
            .price
            .checked_mul(scale)
            .unwrap_or_else(|| panic!("{}", ERR_CONVERSION_OVERFLOW));
        (scaled_usd, divisor)
    } else {
        let scale = pow10(feed_decimals - usd_decimals);
        let numerator = scaled_usd
            .checked_mul(scale)
            .unwrap_or_else(|| panic!("{}", ERR_CONVERSION_OVERFLOW));
        (numerator, data.price)
    };

    numerator / divisor
}

fn pow10(exp: u32) -> i128 {
    10_i128
        .checked_pow(exp)
        .unwrap_or_else(|| panic!("{}", ERR_CONVERSION_OVERFLOW))
}

use soroban_sdk::{contracttype, Address};

// ─── Storage keys ──────────────────────────────────────────────────────────

/// Keys for each logical piece of contract state.
///
/// Campaign-wide configuration and aggregates live in `instance()` storage;
/// per-funder ledger entries live in `persistent()` so the instance footprint
/// stays bounded by the funder list alone.
#[contracttype]
pub enum DataKey {
    /// Deploying identity; sole authority for `withdraw_funds`.
    Owner,
    /// Address of the price feed contract the campaign reads at decision time.
    PriceFeed,
    /// Stellar asset the campaign escrows.
    Token,
    /// Ledger timestamp captured at initialization.
    WindowOpenAt,
    /// Funding window length in seconds.
    WindowDuration,
    /// Pre-computed close: `window_open_at + window_duration`.
    WindowCloseAt,
    /// Minimum per-contribution value in USD cents.
    MinimumUsd,
    /// Campaign funding goal in USD cents.
    TargetUsd,
    /// Sum of all outstanding contributions, in token units.
    TotalHeld,
    /// Funders with a non-zero balance, drained on withdrawal.
    Funders,
    /// Accumulated contribution per funder, in token units.
    Contribution(Address),
}

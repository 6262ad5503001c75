/// All panic messages used by the fund_me contract.
///
/// Using string constants avoids typos in `#[should_panic(expected = "...")]` tests.
pub const ERR_ALREADY_INITIALIZED: &str = "already initialized";
pub const ERR_NOT_INITIALIZED: &str = "not initialized";
pub const ERR_INVALID_DURATION: &str = "window duration must be positive";
pub const ERR_INVALID_THRESHOLD: &str = "usd thresholds must be positive";
pub const ERR_DURATION_OVERFLOW: &str = "window close timestamp would overflow";
pub const ERR_WINDOW_CLOSED: &str = "funding window is closed";
pub const ERR_WINDOW_STILL_OPEN: &str = "funding window is still open";
pub const ERR_BELOW_MINIMUM: &str = "contribution is below the usd minimum";
pub const ERR_NOT_OWNER: &str = "only the campaign owner can withdraw";
pub const ERR_TARGET_NOT_REACHED: &str = "funding target is not reached";
pub const ERR_TARGET_REACHED: &str = "funding target was reached; refunds are disabled";
pub const ERR_NO_BALANCE: &str = "no contribution to refund";
pub const ERR_NOTHING_TO_WITHDRAW: &str = "nothing to withdraw";
pub const ERR_ORACLE_UNAVAILABLE: &str = "price feed is unavailable";
pub const ERR_CONVERSION_OVERFLOW: &str = "overflow in usd conversion";
pub const ERR_BALANCE_OVERFLOW: &str = "ledger balance would overflow";

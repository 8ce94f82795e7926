//! System-wide constants and simulation defaults for UnitBook.

/// Number of orders generated by one default simulation run.
pub const DEFAULT_ORDER_COUNT: usize = 100;

/// Probability that a generated order is a market order (in percent).
pub const DEFAULT_MARKET_ORDER_PERCENT: u32 = 10;

/// Lowest generated limit price, in cents.
pub const DEFAULT_MIN_PRICE_CENTS: i64 = 7_000;

/// Highest generated limit price, in cents (79 dollars + 100 cents).
pub const DEFAULT_MAX_PRICE_CENTS: i64 = 8_000;

/// Generated price granularity, in cents.
pub const DEFAULT_PRICE_TICK_CENTS: i64 = 1;

/// Decimal places used for cent-denominated prices.
pub const PRICE_SCALE: u32 = 2;

/// Default `RUST_LOG` filter for the simulation binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Domain separator for book-root hashing.
pub const BOOK_ROOT_DOMAIN: &[u8] = b"unitbook:book_root:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "UnitBook";

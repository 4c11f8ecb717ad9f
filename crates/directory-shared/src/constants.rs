//! Application-wide constants

pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24 * 7;
pub const MAX_TOKEN_EXPIRY_HOURS: i64 = 24 * 365;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_ADDRESS_API_BASE_URL: &str = "https://turkiyeapi.dev/api/v1";
pub const DEFAULT_ADDRESS_TIMEOUT_SECS: u64 = 10;

pub const BASE_URL: &str                   = "https://solpot.com";
pub const AUTHORITY: &str                  = "solpot.com";

pub const PROFILE_ENDPOINT: &str           = "/api/profile/info";
pub const CLIENT_SEED_ENDPOINT: &str       = "/api/profile/updateClientSeed";
pub const DAILY_CASE_ENDPOINT: &str        = "/api/daily-case/open";
pub const TRANSACTIONS_ENDPOINT: &str      = "/api/profile/transactions";

pub const ACCOUNTS_FILE: &str              = "cookies.txt";
pub const CONFIG_FILE: &str                = "config.json";
pub const REPORT_FILE: &str                = "report.log";

pub const CLIENT_SEED_BYTES: usize         = 32;
pub const CLIENT_SEED_LEN: usize           = CLIENT_SEED_BYTES * 2; // hex chars

pub const TRANSACTIONS_PAGE: u32           = 1;
pub const TRANSACTIONS_LIMIT: u32          = 10;

/// Substring of the daily-case rejection sent when today's case was already opened.
/// There is no error code for this, only the message text.
pub const ONCE_PER_DAY: &str               = "once per day";

pub const TX_TYPE_WITHDRAWAL: &str         = "WITHDRAWAL";
pub const TX_STATUS_SUCCESS: &str          = "SUCCESS";
pub const TX_ACTION_DAILY_REWARD: &str     = "daily-reward";

pub const UNKNOWN_ERROR: &str              = "Unknown error";
pub const NOT_AVAILABLE: &str              = "N/A";
pub const UNKNOWN_SEED: &str               = "unknown";

pub const ONE_SECOND: u64                  = 1;
pub const ONE_MINUTE: u64                  = 60 * ONE_SECOND;
pub const ONE_HOUR: u64                    = 60 * ONE_MINUTE;
pub const SECONDS_PER_DAY: u64             = 24 * ONE_HOUR;

pub const DEFAULT_DELAY_BETWEEN_ACCOUNTS: u64 = 3;
pub const CYCLE_SETTLE_SECONDS: u64        = 3;

pub const REQUEST_TIMEOUT_SECONDS: u64     = 30;

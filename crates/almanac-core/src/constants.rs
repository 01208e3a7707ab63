/// Product name shared across crates
pub const PRODUCT_NAME: &str = "almanac";

pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `PRODID` written into calendars created by this workspace.
pub const DEFAULT_PRODID: &str =
    const_str::concat!("-//", PRODUCT_NAME, "//", PRODUCT_NAME, " ", PRODUCT_VERSION, "//EN");

/// RFC 5545 §3.1 recommended maximum content line length in octets.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 75;

/// Smallest accepted line length: a continuation space plus one 4-octet scalar.
pub const MIN_LINE_LENGTH: usize = 5;

pub const ENV_PREFIX: &str = "ALMANAC";
pub const CONFIG_FILE_NAME: &str = "almanac.toml";

//! Anchor and Shank IDL constants

/// Namespace hashed with the snake_case instruction name for Anchor discriminators
pub const GLOBAL_NAMESPACE: &str = "global";

/// Namespace hashed with the account name for Anchor account discriminators
pub const ACCOUNT_NAMESPACE: &str = "account";

/// Length of an Anchor discriminator in bytes
pub const DISCRIMINATOR_LENGTH: usize = 8;

/// `metadata.origin` value written by Shank
pub const SHANK_ORIGIN: &str = "shank";

/// Length of a decoded program address
pub const PUBKEY_LENGTH: usize = 32;

//! Protocol-level constants.

/// Domain name every engine instance signs under.
pub const DOMAIN_NAME: &str = "AeviaProtocol";

/// Domain version. Bumping it invalidates all outstanding signatures.
pub const DOMAIN_VERSION: &str = "1.0.0";

/// Payload field carrying the sender's SHA-256 digest.
pub const SIGNATURE_FIELD: &str = "signature";

/// Fields never included in the signing string.
pub const SIGNATURE_IGNORED_FIELDS: [&str; 2] = ["fail", "signature"];

/// Fields starting with this prefix are unsigned metadata (`_extra`, `_charge_id`, ...).
pub const UNSIGNED_FIELD_PREFIX: char = '_';

/// Characters replaced by a single space before a value is signed.
pub const CLEANED_CHARS: [char; 7] = ['<', '>', '"', '\'', '(', ')', '\\'];

pub const FIELD_ID: &str = "id";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_SUBSCRIPTION_STATUS: &str = "subscription_status";
pub const FIELD_AUTHORIZATION_STATUS: &str = "authorization_status";
pub const FIELD_SALE_ACTION: &str = "sale_action";
pub const FIELD_SALE_ID: &str = "sale_id";
pub const FIELD_ORDER_ID: &str = "order_id";
pub const FIELD_ACTION: &str = "action";
pub const FIELD_NOTIFICATION_TYPE: &str = "notification_type";

/// Environment variable holding the public API key.
pub const ENV_KEY: &str = "ZRU_KEY";

/// Environment variable holding the shared secret key.
pub const ENV_SECRET_KEY: &str = "ZRU_SECRET_KEY";

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - full access, the only role allowed to delete content
pub const ROLE_ADMIN: &str = "admin";

/// Editor role - can create and update content
pub const ROLE_EDITOR: &str = "editor";

// =============================================================================
// EDITOR
// =============================================================================

/// Interval between editor auto-saves, in seconds
pub const AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Path clients are sent to when the API answers 401
pub const DEFAULT_LOGIN_PATH: &str = "/api/login";

// =============================================================================
// FIELD LIMITS (match the column sizes in migrations/)
// =============================================================================

pub const MAX_NAME_LENGTH: u64 = 255;
pub const MAX_SHORT_DESCRIPTION_LENGTH: u64 = 500;
pub const MAX_URL_LENGTH: u64 = 500;

//! Centralized default constants for the notely system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates should reference these constants instead of defining their
//! own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// CATEGORIES
// =============================================================================

/// Name of the category lazily created for users who have none.
pub const DEFAULT_CATEGORY_NAME: &str = "General";

/// Color (hex) of the lazily created default category.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3b82f6";

// =============================================================================
// AUTH
// =============================================================================

/// Minimum password length enforced before any backend work.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Access token lifetime in minutes.
pub const ACCESS_TOKEN_EXPIRY_MINS: i64 = 15;

/// Refresh token lifetime in days.
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

// =============================================================================
// AI EXPANSION
// =============================================================================

/// Generation model used for note expansion.
pub const EXPAND_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature for note expansion.
pub const EXPAND_TEMPERATURE: f32 = 0.7;

/// Token budget for note expansion responses.
pub const EXPAND_MAX_TOKENS: u32 = 1000;

/// System prompt for the expansion call. Kept fixed so expansions stay
/// consistent across requests.
pub const EXPAND_SYSTEM_PROMPT: &str = "You are a helpful assistant that expands brief notes into well-structured, detailed content. Create approximately 500 words of engaging, informative text based on the user's input. Maintain the original intent and tone while adding relevant details, examples, and context. Only expand the content, do not modify or include the title in your response.";

/// Build the user-role prompt for an expansion request.
pub fn expand_user_prompt(content: &str) -> String {
    format!(
        "Please expand this note into a well-structured essay of about 500 words:\n\n{}",
        content
    )
}

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default rate limit: max requests per period.
pub const RATE_LIMIT_REQUESTS: u64 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Maximum request body size in bytes (1 MiB is generous for note payloads).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

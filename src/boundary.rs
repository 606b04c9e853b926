//! External collaborator seams
//!
//! The core consumes these as pure boundary calls; it owns none of their
//! rules. The surrounding application supplies real implementations backed
//! by its account system and text-moderation policy.

use crate::core::{AccountId, PlayerId, PlayerName};
use crate::error::GotchaError;
use crate::Result;

/// Text moderation collaborator.
pub trait TextSanitizer {
    /// Is the text acceptable at all?
    fn validate(&self, text: &str) -> bool;

    /// Normalize accepted text (trimming, case folding, stripping markup).
    fn sanitize(&self, text: &str) -> String;
}

/// Account system collaborator resolving player↔account linkage.
pub trait IdentityProvider {
    fn account_for(&self, player: PlayerId) -> Option<AccountId>;
}

/// Run a raw display name through the sanitizer, surfacing its rejection as
/// a validation error.
pub fn clean_display_name(sanitizer: &dyn TextSanitizer, raw: &str) -> Result<PlayerName> {
    if !sanitizer.validate(raw) {
        return Err(GotchaError::validation(
            "display name",
            format!("\"{raw}\" was rejected"),
        ));
    }
    let cleaned = sanitizer.sanitize(raw);
    if cleaned.trim().is_empty() {
        return Err(GotchaError::validation(
            "display name",
            "name is empty after sanitization",
        ));
    }
    Ok(PlayerName::new(cleaned))
}

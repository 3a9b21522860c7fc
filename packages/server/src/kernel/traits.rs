// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.

use async_trait::async_trait;

use crate::common::Principal;

// =============================================================================
// Token Store Trait (Infrastructure - admin session tokens)
// =============================================================================

/// Opaque bearer-token store behind the admin gates.
///
/// Callers only ever issue, validate and revoke; whether tokens live in
/// process memory or an external cache, and whether they expire, is up to
/// the implementation.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Issue a fresh token bound to `principal`
    async fn issue(&self, principal: Principal) -> String;

    /// Resolve a token, `None` when unknown or no longer valid
    async fn validate(&self, token: &str) -> Option<Principal>;

    /// Invalidate a token. Unknown tokens are ignored.
    async fn revoke(&self, token: &str);
}

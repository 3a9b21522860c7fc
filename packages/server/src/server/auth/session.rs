use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::Principal;
use crate::kernel::TokenStore;

/// Session token (`admin_` + random UUID)
pub type SessionToken = String;

/// In-memory token store
///
/// Tokens live for the lifetime of the process; restarting the server logs
/// every admin out. There is no expiry and no sharing across instances.
#[derive(Default)]
pub struct InMemoryTokenStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Principal>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

fn generate_token() -> SessionToken {
    format!("admin_{}", Uuid::new_v4().simple())
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn issue(&self, principal: Principal) -> String {
        let token = generate_token();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), principal);
        token
    }

    async fn validate(&self, token: &str) -> Option<Principal> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    async fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }
}

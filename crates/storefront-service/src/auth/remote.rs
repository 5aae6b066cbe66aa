//! 通过 Supabase Auth 接口校验 token

use async_trait::async_trait;
use tracing::instrument;
use vision_shared::error::ExternalError;
use vision_shared::supabase::SupabaseClient;

use super::{AuthUser, Authenticator};

pub struct SupabaseAuthenticator {
    client: SupabaseClient,
}

impl SupabaseAuthenticator {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Authenticator for SupabaseAuthenticator {
    #[instrument(skip_all)]
    async fn authenticate(&self, token: &str) -> Result<Option<AuthUser>, ExternalError> {
        let user = self.client.get_user(token).await?;
        Ok(user.map(|u| AuthUser {
            id: u.id,
            email: u.email,
        }))
    }
}

//! Service facade over [`UserApi`].
//!
//! [`UserService`] is what application code calls. Each method forwards its
//! arguments to the matching [`UserApi`] operation through the call wrapper and
//! returns the resulting [`ApiResult`]; nothing else happens in between.

use std::sync::Arc;

use api_core::{api_call_cancellable, api_call_no_content_cancellable, ApiResult, CancellationToken};
use network::{ClientRegistry, TransportError};
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use crate::{HttpUserApi, UserApi, UserRequest, UserResponse};

/// Page requested by callers that do not ask for a specific one.
pub const DEFAULT_PAGE: u32 = 1;

struct RegistryBinding {
    base_url: String,
    registry: Arc<ClientRegistry>,
}

/// Typed entry point for the users API.
///
/// The underlying [`UserApi`] is bound on first use: the client for the base
/// URL is fetched from the shared [`ClientRegistry`] at that point, not at
/// construction. A base URL the registry rejects surfaces as an
/// [`ApiResult::Exception`] from the first call.
pub struct UserService {
    binding: Option<RegistryBinding>,
    api: OnceCell<Arc<dyn UserApi>>,
    cancel: CancellationToken,
}

impl UserService {
    /// Creates a service for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, registry: Arc<ClientRegistry>) -> Self {
        Self {
            binding: Some(RegistryBinding {
                base_url: base_url.into(),
                registry,
            }),
            api: OnceCell::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Creates a service over an already constructed [`UserApi`].
    pub fn with_api(api: Arc<dyn UserApi>) -> Self {
        Self {
            binding: None,
            api: OnceCell::new_with(Some(api)),
            cancel: CancellationToken::new(),
        }
    }

    /// Aborts in-flight and future calls when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Fetches one user.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_user(&self, user_id: &str) -> ApiResult<UserResponse> {
        api_call_cancellable(&self.cancel, || async move {
            let api = self.api().await?;
            api.get_user(user_id).await
        })
        .await
    }

    /// Fetches one page of users. Pages start at [`DEFAULT_PAGE`].
    #[instrument(level = "debug", skip(self))]
    pub async fn get_users(&self, page: u32) -> ApiResult<Vec<UserResponse>> {
        api_call_cancellable(&self.cancel, || async move {
            let api = self.api().await?;
            api.get_users(page).await
        })
        .await
    }

    /// Creates a user and returns it as stored by the server.
    #[instrument(level = "debug", skip(self, user))]
    pub async fn create_user(&self, user: &UserRequest) -> ApiResult<UserResponse> {
        api_call_cancellable(&self.cancel, || async move {
            let api = self.api().await?;
            api.create_user(user).await
        })
        .await
    }

    /// Deletes a user. Succeeds on any successful status, body or not.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_user(&self, user_id: &str) -> ApiResult<()> {
        api_call_no_content_cancellable(&self.cancel, || async move {
            let api = self.api().await?;
            api.delete_user(user_id).await
        })
        .await
    }

    async fn api(&self) -> Result<Arc<dyn UserApi>, TransportError> {
        let api = self
            .api
            .get_or_try_init(|| async move {
                let binding = self.binding.as_ref().ok_or_else(|| TransportError::InvalidConfig {
                    message: "user service has no API bound".to_string(),
                })?;
                let client = binding.registry.get_client(&binding.base_url)?;
                debug!(
                    base_url = %binding.base_url,
                    client_id = %client.id(),
                    "bound users API"
                );
                Ok::<_, TransportError>(Arc::new(HttpUserApi::new(client)) as Arc<dyn UserApi>)
            })
            .await?;
        Ok(Arc::clone(api))
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field(
                "base_url",
                &self.binding.as_ref().map(|b| b.base_url.as_str()),
            )
            .field("bound", &self.api.initialized())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

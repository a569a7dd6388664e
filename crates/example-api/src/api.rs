//! The users API as a typed port, and its HTTP implementation.
//!
//! [`UserApi`] mirrors the remote endpoints one-to-one and returns raw
//! [`ResponseEnvelope`]s. It is the seam between [`crate::UserService`] and
//! the transport: tests substitute their own implementation.

use std::sync::Arc;

use api_core::ResponseEnvelope;
use async_trait::async_trait;
use network::{HttpClient, TransportError};

use crate::{UserRequest, UserResponse};

const USERS: &str = "users";

/// Remote operations of the users API.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET users/{id}`
    async fn get_user(&self, user_id: &str)
        -> Result<ResponseEnvelope<UserResponse>, TransportError>;

    /// `GET users?page={page}`
    async fn get_users(
        &self,
        page: u32,
    ) -> Result<ResponseEnvelope<Vec<UserResponse>>, TransportError>;

    /// `POST users`
    async fn create_user(
        &self,
        user: &UserRequest,
    ) -> Result<ResponseEnvelope<UserResponse>, TransportError>;

    /// `DELETE users/{id}`
    async fn delete_user(&self, user_id: &str) -> Result<ResponseEnvelope<()>, TransportError>;
}

/// [`UserApi`] over a shared [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    client: Arc<HttpClient>,
}

impl HttpUserApi {
    /// Sends every request through `client`.
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn get_user(
        &self,
        user_id: &str,
    ) -> Result<ResponseEnvelope<UserResponse>, TransportError> {
        self.client.get_json(&[USERS, user_id]).await
    }

    async fn get_users(
        &self,
        page: u32,
    ) -> Result<ResponseEnvelope<Vec<UserResponse>>, TransportError> {
        self.client
            .get_json_with_query(&[USERS], &[("page", page)])
            .await
    }

    async fn create_user(
        &self,
        user: &UserRequest,
    ) -> Result<ResponseEnvelope<UserResponse>, TransportError> {
        self.client.post_json(&[USERS], user).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<ResponseEnvelope<()>, TransportError> {
        self.client.delete(&[USERS, user_id]).await
    }
}

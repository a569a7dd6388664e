//! Typed client for the example users API.
//!
//! [`UserService`] is the facade application code uses; every method returns
//! an [`api_core::ApiResult`]. Underneath, [`UserApi`] describes the remote
//! endpoints and [`HttpUserApi`] implements them over a client obtained from
//! a shared [`network::ClientRegistry`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use api_core::ApiResult;
//! use example_api::UserService;
//! use network::ClientRegistry;
//!
//! # async fn demo() {
//! let registry = Arc::new(ClientRegistry::new());
//! let users = UserService::new("https://api.example.com/", registry);
//!
//! match users.get_user("42").await {
//!     ApiResult::Success(user) => println!("{}", user.name),
//!     ApiResult::Error { code, message } => eprintln!("{code}: {message}"),
//!     ApiResult::Exception(cause) => eprintln!("request failed: {cause}"),
//! }
//! # }
//! ```

pub mod api;
pub mod models;
pub mod service;

pub use api::{HttpUserApi, UserApi};
pub use models::{UserRequest, UserResponse};
pub use service::{UserService, DEFAULT_PAGE};

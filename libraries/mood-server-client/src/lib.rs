//! Mood Player Server Client
//!
//! Client library for the Mood Player backend.
//!
//! # Features
//!
//! - **Authentication**: register, login with e-mail/password, logout, current user
//! - **Social**: user search, friend requests, friend list
//! - **Chat history**: list and insert listen-together chat messages
//! - **Realtime**: presence channels and chat insert subscriptions over websocket
//!
//! Both `MoodServerClient` and `WsRealtime` implement the backend traits from
//! `mood-core`, so the player never sees HTTP or websocket details.
//!
//! # Example
//!
//! ```ignore
//! use mood_core::Backend;
//! use mood_server_client::{MoodServerClient, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MoodServerClient::new(ServerConfig::new("http://localhost:8000"))?;
//!
//!     let session = client.login("aki@example.com", "secret123").await?;
//!     println!("Logged in as {}", session.user.display_name());
//!
//!     for friend in client.friends().await? {
//!         println!("{} <{}>", friend.name, friend.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod chat;
mod client;
mod error;
mod protocol;
mod realtime;
mod social;
mod types;

// Re-export main types
pub use client::MoodServerClient;
pub use error::{Result, ServerClientError};
pub use protocol::{ClientFrame, ServerFrame};
pub use realtime::WsRealtime;
pub use types::{LoginResponse, RegisterResponse, ServerConfig};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use chat::ChatClient;
pub use social::SocialClient;

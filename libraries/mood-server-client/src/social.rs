//! User search and friend management.

use crate::client::{expect_success, read_json, send};
use crate::error::Result;
use crate::types::{FriendRequestBody, Listing};
use mood_core::{FriendRequest, UserSummary};
use reqwest::Client;
use tracing::{debug, info};

/// Social-graph client. Every call is authenticated.
pub struct SocialClient<'a> {
    http: &'a Client,
    base_url: String,
    token: String,
}

impl<'a> SocialClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: String, token: String) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Search users by name or e-mail.
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>> {
        let url = format!("{}/api/users/search", self.base_url);
        debug!(url = %url, query = %query, "Searching users");

        let request = self
            .http
            .get(&url)
            .query(&[("query", query)])
            .bearer_auth(&self.token);
        let users: Listing<UserSummary> = read_json(send(request).await?, "user search").await?;
        Ok(users.into_vec())
    }

    /// Send a friend request.
    pub async fn send_friend_request(&self, to_user_id: &str) -> Result<()> {
        let url = format!("{}/api/friends/request", self.base_url);
        debug!(url = %url, to_user_id = %to_user_id, "Sending friend request");

        let request = self
            .http
            .post(&url)
            .json(&FriendRequestBody { to_user_id })
            .bearer_auth(&self.token);
        expect_success(send(request).await?).await?;

        info!(to_user_id = %to_user_id, "Friend request sent");
        Ok(())
    }

    /// Incoming friend requests.
    pub async fn friend_requests(&self) -> Result<Vec<FriendRequest>> {
        let url = format!("{}/api/friends/requests", self.base_url);
        let request = self.http.get(&url).bearer_auth(&self.token);
        let requests: Listing<FriendRequest> =
            read_json(send(request).await?, "friend requests").await?;
        Ok(requests.into_vec())
    }

    /// Accept an incoming friend request.
    pub async fn accept_friend_request(&self, request_id: &str) -> Result<()> {
        let url = format!("{}/api/friends/accept/{}", self.base_url, request_id);
        let request = self.http.post(&url).bearer_auth(&self.token);
        expect_success(send(request).await?).await?;

        info!(request_id = %request_id, "Friend request accepted");
        Ok(())
    }

    /// Reject an incoming friend request.
    pub async fn reject_friend_request(&self, request_id: &str) -> Result<()> {
        let url = format!("{}/api/friends/reject/{}", self.base_url, request_id);
        let request = self.http.post(&url).bearer_auth(&self.token);
        expect_success(send(request).await?).await?;

        info!(request_id = %request_id, "Friend request rejected");
        Ok(())
    }

    /// Current friends.
    pub async fn friends(&self) -> Result<Vec<UserSummary>> {
        let url = format!("{}/api/friends", self.base_url);
        let request = self.http.get(&url).bearer_auth(&self.token);
        let friends: Listing<UserSummary> = read_json(send(request).await?, "friend list").await?;
        Ok(friends.into_vec())
    }

    /// Remove a friend.
    pub async fn delete_friend(&self, friend_id: &str) -> Result<()> {
        let url = format!("{}/api/friends/{}", self.base_url, friend_id);
        let request = self.http.delete(&url).bearer_auth(&self.token);
        expect_success(send(request).await?).await?;

        info!(friend_id = %friend_id, "Friend removed");
        Ok(())
    }
}

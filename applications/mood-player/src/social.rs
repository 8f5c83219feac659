//! Friends and user search
//!
//! Sits on top of the controller. Requests run on their own tasks and come
//! back as the view events they produced, so a slow backend never holds up
//! playback. Every failure is reported as a toast and goes no further.

use crate::view::ViewEvent;
use mood_core::{Backend, MoodError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A social call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialRequest {
    Search(String),
    Friends,
    Requests,
    SendRequest(String),
    /// Accept, then refresh requests and friends
    Accept(String),
    /// Reject, then refresh requests
    Reject(String),
    /// Remove a friend, then refresh friends
    Remove(String),
}

pub struct Social {
    backend: Arc<dyn Backend>,
    replies_tx: mpsc::UnboundedSender<Vec<ViewEvent>>,
    replies_rx: mpsc::UnboundedReceiver<Vec<ViewEvent>>,
}

impl Social {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            replies_tx,
            replies_rx,
        }
    }

    /// Start a request in the background
    ///
    /// Blank searches are dropped without a call.
    pub fn request(&self, request: SocialRequest) {
        if let SocialRequest::Search(query) = &request {
            if query.trim().is_empty() {
                return;
            }
        }

        debug!(?request, "Social request");
        let backend = Arc::clone(&self.backend);
        let replies = self.replies_tx.clone();
        tokio::spawn(async move {
            let mut events = Vec::new();
            run(backend.as_ref(), request, &mut events).await;
            // Owner gone means the player stopped
            let _ = replies.send(events);
        });
    }

    /// Wait for the events of the next finished request
    ///
    /// Never resolves while nothing is in flight; meant for `select!`.
    pub async fn next_reply(&mut self) -> Vec<ViewEvent> {
        match self.replies_rx.recv().await {
            Some(events) => events,
            // We hold a sender, so the channel never closes
            None => std::future::pending().await,
        }
    }
}

impl std::fmt::Debug for Social {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Social").finish_non_exhaustive()
    }
}

async fn run(backend: &dyn Backend, request: SocialRequest, events: &mut Vec<ViewEvent>) {
    match request {
        SocialRequest::Search(query) => search(backend, query.trim(), events).await,
        SocialRequest::Friends => friends(backend, events).await,
        SocialRequest::Requests => requests(backend, events).await,
        SocialRequest::SendRequest(user_id) => match backend.send_friend_request(&user_id).await {
            Ok(()) => {
                info!(to = %user_id, "Friend request sent");
                events.push(ViewEvent::Toast("友達リクエストを送信しました".to_string()));
            }
            Err(e) => fail(events, "友達リクエストを送信できませんでした", &e),
        },
        SocialRequest::Accept(request_id) => {
            match backend.accept_friend_request(&request_id).await {
                Ok(()) => {
                    info!(request = %request_id, "Friend request accepted");
                    events.push(ViewEvent::Toast("友達になりました".to_string()));
                    requests(backend, events).await;
                    friends(backend, events).await;
                }
                Err(e) => fail(events, "リクエストを承認できませんでした", &e),
            }
        }
        SocialRequest::Reject(request_id) => {
            match backend.reject_friend_request(&request_id).await {
                Ok(()) => {
                    info!(request = %request_id, "Friend request rejected");
                    requests(backend, events).await;
                }
                Err(e) => fail(events, "リクエストを拒否できませんでした", &e),
            }
        }
        SocialRequest::Remove(friend_id) => match backend.delete_friend(&friend_id).await {
            Ok(()) => {
                info!(friend = %friend_id, "Friend removed");
                events.push(ViewEvent::Toast("友達を削除しました".to_string()));
                friends(backend, events).await;
            }
            Err(e) => fail(events, "友達を削除できませんでした", &e),
        },
    }
}

async fn search(backend: &dyn Backend, query: &str, events: &mut Vec<ViewEvent>) {
    match backend.search_users(query).await {
        Ok(users) => {
            info!(query = %query, results = users.len(), "User search");
            events.push(ViewEvent::SearchResults(users));
        }
        Err(e) => fail(events, "ユーザー検索に失敗しました", &e),
    }
}

async fn friends(backend: &dyn Backend, events: &mut Vec<ViewEvent>) {
    match backend.friends().await {
        Ok(friends) => events.push(ViewEvent::Friends(friends)),
        Err(e) => fail(events, "友達リストを取得できませんでした", &e),
    }
}

async fn requests(backend: &dyn Backend, events: &mut Vec<ViewEvent>) {
    match backend.friend_requests().await {
        Ok(requests) => events.push(ViewEvent::FriendRequests(requests)),
        Err(e) => fail(events, "友達リクエストを取得できませんでした", &e),
    }
}

fn fail(events: &mut Vec<ViewEvent>, what: &str, error: &MoodError) {
    warn!(error = %error, "{}", what);
    let reason = match error {
        MoodError::Auth(_) => "ログインしてください".to_string(),
        other => other.to_string(),
    };
    events.push(ViewEvent::Toast(format!("{}：{}", what, reason)));
}

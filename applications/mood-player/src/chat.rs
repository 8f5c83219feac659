//! Listen-together chat panel
//!
//! The panel is tied to the held room. Opening it loads the room history and
//! subscribes to new messages in the background; closing drops the
//! subscription.

use crate::view::{View, ViewEvent};
use mood_core::{Backend, ChatMessage, ChatSubscription, MoodError, NewChatMessage, Realtime};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Who is speaking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatIdentity {
    pub user_id: String,
    pub user_name: String,
}

/// Something the chat panel is waiting for
pub enum ChatEvent {
    /// History and insert subscription for an opened panel
    Loaded {
        generation: u64,
        history: ViewEvent,
        subscription: Option<ChatSubscription>,
    },
    /// A post finished; `Err` carries the toast text
    Sent(Result<(), String>),
    /// Insert from the live subscription; `None` when it ended
    Inserted(Option<ChatMessage>),
}

impl std::fmt::Debug for ChatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatEvent::Loaded {
                generation,
                history,
                subscription,
            } => f
                .debug_struct("Loaded")
                .field("generation", generation)
                .field("history", history)
                .field("subscribed", &subscription.is_some())
                .finish(),
            ChatEvent::Sent(result) => f.debug_tuple("Sent").field(result).finish(),
            ChatEvent::Inserted(message) => f.debug_tuple("Inserted").field(message).finish(),
        }
    }
}

/// Chat panel state
///
/// Backend calls run on their own tasks; their results come back through
/// `next_event` and are discarded when the panel was closed or reopened in
/// the meantime.
pub struct ChatPanel {
    backend: Arc<dyn Backend>,
    realtime: Option<Arc<dyn Realtime>>,
    room_id: Option<String>,
    generation: u64,
    subscription: Option<ChatSubscription>,
    events_tx: mpsc::UnboundedSender<ChatEvent>,
    events_rx: mpsc::UnboundedReceiver<ChatEvent>,
}

impl ChatPanel {
    pub fn new(backend: Arc<dyn Backend>, realtime: Option<Arc<dyn Realtime>>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            realtime,
            room_id: None,
            generation: 0,
            subscription: None,
            events_tx,
            events_rx,
        }
    }

    /// Whether the panel is open
    pub fn is_open(&self) -> bool {
        self.room_id.is_some()
    }

    /// Room the open panel belongs to
    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    /// Open the panel for `room_id`
    ///
    /// The panel shows right away; history and the insert subscription
    /// arrive later as `ChatEvent::Loaded`.
    pub fn open(&mut self, room_id: &str, view: &mut dyn View) {
        self.close_silently();
        self.room_id = Some(room_id.to_string());
        self.generation += 1;
        view.render(ViewEvent::ChatOpened);
        info!(room = %room_id, "Chat opened");

        let generation = self.generation;
        let room_id = room_id.to_string();
        let backend = Arc::clone(&self.backend);
        let realtime = self.realtime.clone();
        let events = self.events_tx.clone();

        tokio::spawn(async move {
            let history = load_history(backend.as_ref(), &room_id).await;
            let subscription = match realtime {
                Some(realtime) => match realtime.subscribe_chat(&room_id).await {
                    Ok(subscription) => Some(subscription),
                    Err(e) => {
                        warn!(room = %room_id, error = %e, "Chat subscription failed");
                        None
                    }
                },
                None => None,
            };
            let _ = events.send(ChatEvent::Loaded {
                generation,
                history,
                subscription,
            });
        });
    }

    /// Close the panel and drop the subscription
    pub fn close(&mut self, view: &mut dyn View) {
        if self.is_open() {
            self.close_silently();
            view.render(ViewEvent::ChatClosed);
        }
    }

    /// Send a message to the open room
    ///
    /// Text is trimmed; empty text or a closed panel sends nothing. Returns
    /// whether a post was started; its outcome arrives as `ChatEvent::Sent`.
    pub fn send(&self, text: &str, identity: &ChatIdentity) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(room_id) = &self.room_id else {
            debug!("Chat message dropped, no room");
            return false;
        };

        let message = NewChatMessage {
            room_id: room_id.clone(),
            user_id: identity.user_id.clone(),
            user_name: identity.user_name.clone(),
            message: text.to_string(),
        };
        let backend = Arc::clone(&self.backend);
        let events = self.events_tx.clone();

        tokio::spawn(async move {
            let result = match backend.post_chat_message(&message).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!(room = %message.room_id, error = %e, "Chat message not sent");
                    Err(format!("メッセージを送信できませんでした：{}", e))
                }
            };
            let _ = events.send(ChatEvent::Sent(result));
        });
        true
    }

    /// Wait for the next chat event
    ///
    /// Pending while nothing is in flight and no subscription is held.
    pub async fn next_event(&mut self) -> ChatEvent {
        let subscription = &mut self.subscription;
        let events = &mut self.events_rx;

        tokio::select! {
            Some(event) = events.recv() => event,
            message = next_insert(subscription) => ChatEvent::Inserted(message),
        }
    }

    /// Apply a chat event to the panel
    pub fn apply(&mut self, event: ChatEvent, view: &mut dyn View) {
        match event {
            ChatEvent::Loaded {
                generation,
                history,
                subscription,
            } => {
                if !self.is_open() || generation != self.generation {
                    debug!(generation, "Chat load for a closed panel ignored");
                    return;
                }
                view.render(history);
                self.subscription = subscription;
            }
            ChatEvent::Sent(Ok(())) => debug!("Chat message sent"),
            ChatEvent::Sent(Err(message)) => view.render(ViewEvent::Toast(message)),
            ChatEvent::Inserted(message) => self.receive(message, view),
        }
    }

    /// Show an inserted message if it belongs to the open room
    pub fn receive(&mut self, message: Option<ChatMessage>, view: &mut dyn View) {
        match message {
            Some(message) if self.room_id.as_deref() == Some(message.room_id.as_str()) => {
                view.render(ViewEvent::ChatMessage(message));
            }
            Some(message) => {
                debug!(room = %message.room_id, "Message for another room ignored");
            }
            None => {
                debug!("Chat subscription ended");
                self.subscription = None;
            }
        }
    }

    fn close_silently(&mut self) {
        self.subscription = None;
        if let Some(room_id) = self.room_id.take() {
            debug!(room = %room_id, "Chat closed");
        }
    }
}

impl std::fmt::Debug for ChatPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatPanel")
            .field("room_id", &self.room_id)
            .field("generation", &self.generation)
            .field("subscribed", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

async fn next_insert(subscription: &mut Option<ChatSubscription>) -> Option<ChatMessage> {
    match subscription {
        Some(subscription) => subscription.next_message().await,
        None => std::future::pending().await,
    }
}

/// Room history sorted by time, or the error entry shown in its place
async fn load_history(backend: &dyn Backend, room_id: &str) -> ViewEvent {
    match backend.chat_messages(room_id).await {
        Ok(mut messages) => {
            messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            debug!(room = %room_id, count = messages.len(), "Chat history loaded");
            ViewEvent::ChatHistory(messages)
        }
        Err(e) => {
            warn!(room = %room_id, error = %e, "Chat history failed to load");
            load_error(&e)
        }
    }
}

fn load_error(error: &MoodError) -> ViewEvent {
    let (title, hint) = if error.is_transport() {
        ("リクエスト失敗", "ネットワークまたはサーバーの状態を確認してください。")
    } else {
        ("読み込み失敗", "チャットのメッセージ API が有効か確認してください。")
    };

    ViewEvent::ChatError {
        title: title.to_string(),
        detail: format!("{}\n{}", error, hint),
    }
}

//! Room membership lifecycle
//!
//! At most one room is held at a time. `join` always releases the previous
//! room first; the presence channel is then established on a background task
//! so playback never waits on the network. Updates come back to the owner as
//! `RoomEvent`s tagged with a generation, and updates from a released room
//! are discarded.

use crate::room_id::{presence_channel, room_id, MIN_CHAT_PARTICIPANTS};
use mood_core::{MoodKey, PresenceMember, Realtime};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

/// Time allowed for the presence channel to subscribe
pub const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_secs(8);

/// Membership status as seen by the controller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoomStatus {
    /// No room held
    #[default]
    Idle,

    /// No realtime backend configured
    Unavailable,

    /// Presence channel being established
    Connecting { room_id: String },

    /// Subscribed; `participants` follows every presence sync
    Joined { room_id: String, participants: usize },

    /// Join failed, timed out or the channel closed; chat stays off for this room
    Failed { room_id: String, reason: String },
}

impl RoomStatus {
    /// Chat is enabled exactly when two or more participants are present
    pub fn chat_enabled(&self) -> bool {
        matches!(self, RoomStatus::Joined { participants, .. } if *participants >= MIN_CHAT_PARTICIPANTS)
    }

    /// Live participant count, 0 unless joined
    pub fn participants(&self) -> usize {
        match self {
            RoomStatus::Joined { participants, .. } => *participants,
            _ => 0,
        }
    }
}

/// Update reported by a background join task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomUpdate {
    /// Channel subscribed
    Joined,

    /// Presence sync with the new participant count
    Participants(usize),

    /// Join error, timeout, or the channel closing after the join
    Failed(String),
}

/// A `RoomUpdate` tagged with the join it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEvent {
    generation: u64,
    pub update: RoomUpdate,
}

/// The currently held room
///
/// Dropping it aborts the join task, which drops the presence subscription
/// and so leaves the channel.
#[derive(Debug)]
struct ActiveRoom {
    room_id: String,
    generation: u64,
    task: JoinHandle<()>,
}

impl Drop for ActiveRoom {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Presence-gated room membership
pub struct RoomMembership {
    realtime: Option<Arc<dyn Realtime>>,
    join_timeout: Duration,
    active: Option<ActiveRoom>,
    status: RoomStatus,
    generation: u64,
    events_tx: mpsc::UnboundedSender<RoomEvent>,
    events_rx: mpsc::UnboundedReceiver<RoomEvent>,
}

impl RoomMembership {
    /// Create a membership manager
    ///
    /// `None` means listen-together is not configured; joins then only
    /// report `RoomStatus::Unavailable`.
    pub fn new(realtime: Option<Arc<dyn Realtime>>) -> Self {
        if realtime.is_none() {
            warn!("Realtime backend not configured, listen-together chat disabled");
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            realtime,
            join_timeout: DEFAULT_JOIN_TIMEOUT,
            active: None,
            status: RoomStatus::Idle,
            generation: 0,
            events_tx,
            events_rx,
        }
    }

    /// Override the join timeout
    #[must_use]
    pub fn with_join_timeout(mut self, join_timeout: Duration) -> Self {
        self.join_timeout = join_timeout;
        self
    }

    /// Current status
    pub fn status(&self) -> &RoomStatus {
        &self.status
    }

    /// Whether chat is currently enabled
    pub fn chat_enabled(&self) -> bool {
        self.status.chat_enabled()
    }

    /// Id of the held room, if any
    pub fn room_id(&self) -> Option<&str> {
        self.active.as_ref().map(|room| room.room_id.as_str())
    }

    /// Join the room for `(mood, track_url)`
    ///
    /// Releases the current room first, then starts establishing the new
    /// channel in the background. Returns the status right after the call.
    pub fn join(&mut self, mood: MoodKey, track_url: &str, member: PresenceMember) -> &RoomStatus {
        self.leave();

        let Some(realtime) = self.realtime.clone() else {
            self.status = RoomStatus::Unavailable;
            return &self.status;
        };

        self.generation += 1;
        let generation = self.generation;
        let id = room_id(mood, track_url);
        let channel = presence_channel(&id);
        let events = self.events_tx.clone();
        let join_timeout = self.join_timeout;

        debug!(room = %id, mood = %mood, "Joining room");

        let task = tokio::spawn(async move {
            let send = |update| {
                // Owner gone means nobody cares about this room anymore
                let _ = events.send(RoomEvent { generation, update });
            };

            let mut subscription =
                match time::timeout(join_timeout, realtime.join_presence(&channel, member)).await {
                    Ok(Ok(subscription)) => subscription,
                    Ok(Err(e)) => {
                        warn!(channel = %channel, error = %e, "Presence join failed");
                        send(RoomUpdate::Failed(e.to_string()));
                        return;
                    }
                    Err(_) => {
                        warn!(channel = %channel, timeout_ms = join_timeout.as_millis() as u64, "Presence join timed out");
                        send(RoomUpdate::Failed("presence join timed out".to_string()));
                        return;
                    }
                };

            send(RoomUpdate::Joined);
            while let Some(count) = subscription.next_count().await {
                send(RoomUpdate::Participants(count));
            }
            // Only reached when the channel closes under us; `leave` aborts the task instead
            warn!(channel = %channel, "Presence channel closed");
            send(RoomUpdate::Failed("presence channel closed".to_string()));
        });

        self.active = Some(ActiveRoom {
            room_id: id.clone(),
            generation,
            task,
        });
        self.status = RoomStatus::Connecting { room_id: id };
        &self.status
    }

    /// Release the held room, if any
    ///
    /// Idempotent. Clears all local state.
    pub fn leave(&mut self) {
        if let Some(room) = self.active.take() {
            debug!(room = %room.room_id, "Leaving room");
        }
        if self.status != RoomStatus::Unavailable {
            self.status = RoomStatus::Idle;
        }
    }

    /// Wait for the next event from a join task
    ///
    /// Never resolves while no task is reporting; meant for `select!`.
    pub async fn next_event(&mut self) -> RoomEvent {
        match self.events_rx.recv().await {
            Some(event) => event,
            // We hold a sender, so the channel never closes
            None => std::future::pending().await,
        }
    }

    /// Apply an event to the status
    ///
    /// Returns the new status when it changed; stale events from released
    /// rooms return `None`.
    pub fn apply(&mut self, event: RoomEvent) -> Option<&RoomStatus> {
        let room = self.active.as_ref().filter(|room| room.generation == event.generation)?;
        let room_id = room.room_id.clone();

        let next = match event.update {
            RoomUpdate::Joined => RoomStatus::Joined {
                room_id,
                participants: self.status.participants(),
            },
            RoomUpdate::Participants(participants) => RoomStatus::Joined {
                room_id,
                participants,
            },
            RoomUpdate::Failed(reason) => {
                self.active = None;
                RoomStatus::Failed { room_id, reason }
            }
        };

        if next == self.status {
            return None;
        }

        let was_enabled = self.status.chat_enabled();
        self.status = next;
        if was_enabled != self.status.chat_enabled() {
            info!(
                participants = self.status.participants(),
                chat_enabled = self.status.chat_enabled(),
                "Room chat availability changed"
            );
        }
        Some(&self.status)
    }
}

impl std::fmt::Debug for RoomMembership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomMembership")
            .field("status", &self.status)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

//! View capability
//!
//! The controller never draws anything itself. Every visible change is
//! emitted as a `ViewEvent`; a front-end renders it (terminal, window, test
//! recorder).

use mood_core::{ChatMessage, FriendRequest, MoodKey, Track, UserProfile, UserSummary};
use mood_playback::{RepeatMode, VolumeIcon};
use mood_rooms::RoomStatus;
use std::time::Duration;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Mood selection
    Pick,
    /// Player for the selected mood
    Player,
    /// Signed-in user's page
    Profile,
}

/// Tabs of the auth dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Signup,
}

/// Everything the controller can ask a front-end to show
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Screen(Screen),

    /// Mood header: tag and copy line
    Mood {
        key: MoodKey,
        tag: &'static str,
        copy: &'static str,
    },

    /// New copy line for the current mood
    CopyLine(&'static str),

    /// Track list of the current mood with the highlighted track
    TrackList {
        tracks: Vec<Track>,
        current: Option<String>,
    },

    /// Track title shown in the player; progress resets to zero
    NowPlaying(Track),

    /// Play/pause indicator and the "is playing" page flag
    Playing(bool),

    Progress {
        position: Duration,
        duration: Option<Duration>,
    },

    Volume {
        percent: u8,
        icon: VolumeIcon,
    },

    Repeat(RepeatMode),

    Shuffle(bool),

    /// Listen-together room state (drives the chat button)
    Room(RoomStatus),

    ChatOpened,
    ChatClosed,
    ChatHistory(Vec<ChatMessage>),
    ChatMessage(ChatMessage),

    /// Error entry inside the chat panel
    ChatError {
        title: String,
        detail: String,
    },

    /// Signed-in user in the header, `None` when signed out
    User(Option<UserProfile>),

    AuthDialog(AuthTab),
    AuthDialogClosed,

    /// Inline error text of an auth form
    AuthError {
        tab: AuthTab,
        message: String,
    },

    Profile(UserProfile),
    SearchResults(Vec<UserSummary>),
    Friends(Vec<UserSummary>),
    FriendRequests(Vec<FriendRequest>),

    /// Page URL after a routing change
    Url(String),

    ShareLink(String),

    /// Transient notice
    Toast(String),
}

/// A front-end
pub trait View: Send {
    fn render(&mut self, event: ViewEvent);
}

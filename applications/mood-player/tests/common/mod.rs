//! Shared fakes for player integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use mood_core::{
    Backend, ChatMessage, ChatSubscription, FriendRequest, MoodError, MoodKey, MoodTable,
    NewChatMessage, PresenceMember, PresenceSubscription, Realtime, RegisterOutcome, Result,
    Session, Track, UserProfile, UserSummary,
};
use mood_player::prefs::Preferences;
use mood_player::{MoodPlayer, PlayerOptions, PlayerServices, View, ViewEvent};
use mood_playback::{AudioElement, AudioEvent, PlaybackError};
use mood_visuals::NullCanvas;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;

pub const TOKEN: &str = "token-aki";

pub fn relax_tracks() -> Vec<Track> {
    vec![
        Track::new("Morning Tea", "https://cdn.example.com/relax/a.mp3"),
        Track::new("Slow Rain", "https://cdn.example.com/relax/b.mp3"),
        Track::new("Window Seat", "https://cdn.example.com/relax/c.mp3"),
    ]
}

pub fn table() -> MoodTable {
    let mut table =
        MoodTable::with_fallback(Track::new("Fallback", "https://cdn.example.com/fallback.mp3"));
    table.set_tracks(MoodKey::Relax, relax_tracks());
    table
}

pub fn aki() -> UserProfile {
    UserProfile {
        id: "user-aki".to_string(),
        email: Some("aki@example.com".to_string()),
        name: Some("Aki".to_string()),
    }
}

// ===== View =====

#[derive(Clone, Default)]
pub struct RecordingView(pub Arc<Mutex<Vec<ViewEvent>>>);

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn toasts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Toast(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, event: &ViewEvent) -> bool {
        self.events().contains(event)
    }
}

impl View for RecordingView {
    fn render(&mut self, event: ViewEvent) {
        self.0.lock().unwrap().push(event);
    }
}

// ===== Audio =====

#[derive(Debug, Default)]
pub struct AudioState {
    pub source: Option<String>,
    pub paused: bool,
    pub position: Duration,
    pub volume: f32,
    pub refuse_play: bool,
    pub loads: usize,
}

pub struct FakeAudio {
    source: Option<String>,
    state: Arc<Mutex<AudioState>>,
}

impl FakeAudio {
    pub fn new() -> (Self, Arc<Mutex<AudioState>>) {
        let state = Arc::new(Mutex::new(AudioState {
            paused: true,
            volume: 1.0,
            ..AudioState::default()
        }));
        (
            Self {
                source: None,
                state: state.clone(),
            },
            state,
        )
    }

    fn state(&self) -> MutexGuard<'_, AudioState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl AudioElement for FakeAudio {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
        let mut state = self.state();
        state.source = Some(url.to_string());
        state.paused = true;
        state.loads += 1;
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    async fn play(&mut self) -> std::result::Result<(), PlaybackError> {
        let mut state = self.state();
        if state.refuse_play {
            return Err(PlaybackError::PlaybackRejected("autoplay blocked".into()));
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.state().paused = true;
    }

    fn is_paused(&self) -> bool {
        self.state().paused
    }

    fn position(&self) -> Duration {
        self.state().position
    }

    fn set_position(&mut self, position: Duration) {
        self.state().position = position;
    }

    fn duration(&self) -> Option<Duration> {
        self.source.as_ref().map(|_| Duration::from_secs(200))
    }

    fn volume(&self) -> f32 {
        self.state().volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.state().volume = volume;
    }
}

// ===== Backend =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoutMode {
    #[default]
    Accept,
    Fail,
    Hang,
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub token: Option<String>,
    pub logout: LogoutMode,
    pub social_down: bool,
    /// Social calls never answer
    pub social_hangs: bool,
    /// Chat history requests never answer
    pub history_hangs: bool,
    pub history: Vec<ChatMessage>,
    pub posted: Vec<NewChatMessage>,
    pub logins: usize,
    pub accepted: Vec<String>,
}

#[derive(Default)]
pub struct FakeBackend(pub Mutex<BackendState>);

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.0.lock().unwrap()
    }

    async fn social(&self) -> Result<()> {
        let (down, hangs) = {
            let state = self.state();
            (state.social_down, state.social_hangs)
        };
        if hangs {
            std::future::pending::<()>().await;
        }
        if down {
            return Err(MoodError::network("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn register(
        &self,
        _email: &str,
        _password: &str,
        _name: Option<&str>,
    ) -> Result<RegisterOutcome> {
        Ok(RegisterOutcome {
            user_id: Some("user-new".to_string()),
            message: None,
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        self.state().logins += 1;
        if email != "aki@example.com" || password != "secret1" {
            return Err(MoodError::auth("メールアドレスまたはパスワードが違います"));
        }
        self.state().token = Some(TOKEN.to_string());
        Ok(Session {
            access_token: TOKEN.to_string(),
            user: aki(),
        })
    }

    async fn logout(&self) -> Result<()> {
        let mode = self.state().logout;
        match mode {
            LogoutMode::Accept => {
                self.state().token = None;
                Ok(())
            }
            LogoutMode::Fail => Err(MoodError::network("connection reset")),
            LogoutMode::Hang => std::future::pending().await,
        }
    }

    async fn set_access_token(&self, token: Option<String>) {
        self.state().token = token;
    }

    async fn current_user(&self) -> Result<Option<UserProfile>> {
        Ok(match self.state().token.as_deref() {
            Some(TOKEN) => Some(aki()),
            _ => None,
        })
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>> {
        self.social().await?;
        Ok(vec![UserSummary {
            id: "user-mio".to_string(),
            name: format!("{} Mio", query),
            email: None,
        }])
    }

    async fn send_friend_request(&self, _to_user_id: &str) -> Result<()> {
        self.social().await
    }

    async fn friend_requests(&self) -> Result<Vec<FriendRequest>> {
        self.social().await?;
        Ok(Vec::new())
    }

    async fn accept_friend_request(&self, request_id: &str) -> Result<()> {
        self.social().await?;
        self.state().accepted.push(request_id.to_string());
        Ok(())
    }

    async fn reject_friend_request(&self, _request_id: &str) -> Result<()> {
        self.social().await
    }

    async fn friends(&self) -> Result<Vec<UserSummary>> {
        self.social().await?;
        Ok(Vec::new())
    }

    async fn delete_friend(&self, _friend_id: &str) -> Result<()> {
        self.social().await
    }

    async fn chat_messages(&self, room_id: &str) -> Result<Vec<ChatMessage>> {
        let hangs = self.state().history_hangs;
        if hangs {
            std::future::pending::<()>().await;
        }
        Ok(self
            .state()
            .history
            .iter()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn post_chat_message(&self, message: &NewChatMessage) -> Result<()> {
        self.state().posted.push(message.clone());
        Ok(())
    }
}

// ===== Realtime =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinMode {
    #[default]
    Accept,
    Reject,
}

#[derive(Default)]
pub struct FakeRealtime {
    pub mode: JoinMode,
    presence: Mutex<Vec<(String, mpsc::UnboundedSender<usize>)>>,
    chats: Mutex<Vec<(String, mpsc::UnboundedSender<ChatMessage>)>>,
}

impl FakeRealtime {
    pub fn new(mode: JoinMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            ..Self::default()
        })
    }

    /// Push a participant count to the most recent presence channel
    pub fn push_count(&self, count: usize) {
        let presence = self.presence.lock().unwrap();
        let (_, tx) = presence.last().unwrap();
        tx.send(count).unwrap();
    }

    /// Push an insert to the most recent chat subscription
    pub fn push_chat(&self, message: ChatMessage) {
        let chats = self.chats.lock().unwrap();
        let (_, tx) = chats.last().unwrap();
        tx.send(message).unwrap();
    }

    /// Close every presence channel from the server side
    pub fn close_presence(&self) {
        self.presence.lock().unwrap().clear();
    }

    pub fn channels(&self) -> Vec<String> {
        self.presence
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }
}

#[async_trait]
impl Realtime for FakeRealtime {
    async fn join_presence(
        &self,
        channel: &str,
        _member: PresenceMember,
    ) -> Result<PresenceSubscription> {
        if self.mode == JoinMode::Reject {
            return Err(MoodError::realtime("channel error"));
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.presence.lock().unwrap().push((channel.to_string(), tx));
        Ok(PresenceSubscription::new(rx, ()))
    }

    async fn subscribe_chat(&self, room_id: &str) -> Result<ChatSubscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.chats.lock().unwrap().push((room_id.to_string(), tx));
        Ok(ChatSubscription::new(rx, ()))
    }
}

// ===== Harness =====

pub struct Harness {
    pub player: MoodPlayer,
    pub view: RecordingView,
    pub audio: Arc<Mutex<AudioState>>,
    pub backend: Arc<FakeBackend>,
    pub realtime: Arc<FakeRealtime>,
    pub audio_tx: mpsc::UnboundedSender<AudioEvent>,
}

pub struct HarnessBuilder {
    initial_url: String,
    prefs: Preferences,
    join_mode: JoinMode,
    realtime: bool,
    backend: Arc<FakeBackend>,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            initial_url: "http://localhost:3000/".to_string(),
            prefs: Preferences::in_memory(),
            join_mode: JoinMode::Accept,
            realtime: true,
            backend: FakeBackend::new(),
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.initial_url = url.to_string();
        self
    }

    pub fn prefs(mut self, prefs: Preferences) -> Self {
        self.prefs = prefs;
        self
    }

    pub fn join_mode(mut self, mode: JoinMode) -> Self {
        self.join_mode = mode;
        self
    }

    pub fn without_realtime(mut self) -> Self {
        self.realtime = false;
        self
    }

    pub fn backend(mut self, backend: Arc<FakeBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn build(self) -> Harness {
        let view = RecordingView::default();
        let (audio, audio_state) = FakeAudio::new();
        let (audio_tx, audio_events) = mpsc::unbounded_channel();
        let realtime = FakeRealtime::new(self.join_mode);

        let services = PlayerServices {
            backend: self.backend.clone(),
            realtime: self
                .realtime
                .then(|| realtime.clone() as Arc<dyn Realtime>),
            audio: Box::new(audio),
            audio_events,
            view: Box::new(view.clone()),
            canvas: Box::new(NullCanvas),
            prefs: self.prefs,
        };
        let options = PlayerOptions {
            initial_url: self.initial_url,
            rng_seed: Some(7),
            ..PlayerOptions::default()
        };

        Harness {
            player: MoodPlayer::new(table(), services, options).unwrap(),
            view,
            audio: audio_state,
            backend: self.backend,
            realtime,
            audio_tx,
        }
    }
}

impl Harness {
    pub fn current_url(&self) -> Option<String> {
        self.player.sequencer().current().map(|t| t.url.clone())
    }

    pub fn audio_paused(&self) -> bool {
        self.audio.lock().unwrap().paused
    }

    pub fn audio_loads(&self) -> usize {
        self.audio.lock().unwrap().loads
    }
}

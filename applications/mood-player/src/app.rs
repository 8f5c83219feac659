//! The Mood Player controller
//!
//! `MoodPlayer` owns all mutable app state and processes its inputs one at a
//! time: user commands, audio element events, room updates, finished catalog
//! loads, chat events and backend replies. Background work (catalog fetches,
//! presence joins, backend calls, websocket readers, the animation loop) only
//! talks to it through channels.

use crate::chat::{ChatEvent, ChatIdentity, ChatPanel};
use crate::error::Result;
use crate::keys::{shortcut_for, Key, ShortcutAction};
use crate::prefs::Preferences;
use crate::router::Router;
use crate::session::{AuthReply, SessionManager};
use crate::social::{Social, SocialRequest};
use crate::view::{AuthTab, Screen, View, ViewEvent};
use mood_catalog::{CatalogLoaded, CatalogLoader};
use mood_core::{
    Backend, MoodKey, MoodTable, PresenceMember, Realtime, Track, UserProfile,
};
use mood_playback::{
    AudioElement, AudioEvent, PickOptions, Sequencer, TrackEnd, Transport, Volume, VolumeIcon,
};
use mood_rooms::{RoomEvent, RoomMembership, RoomStatus, DEFAULT_JOIN_TIMEOUT};
use mood_visuals::{AnimationLoop, Canvas, Viewport};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const RETURNED_TO_PICK: &str = "気分を選ぶ画面に戻りました";
const LINK_COPIED: &str = "リンクをコピーしました";
const SIGNED_IN: &str = "ログインに成功しました";
const SIGNED_UP: &str = "登録に成功しました！メールの確認リンクを確認してください";
const SIGNED_OUT: &str = "ログアウトしました";
const AUDIO_FAILED: &str =
    "オーディオを再生できません。トラックの URL とネットワーク接続を確認してください";

/// User commands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Raw key press; `typing` is true while a text input has focus
    Key { key: Key, typing: bool },
    SelectMood(MoodKey),
    /// Click on the n-th entry of the track list
    PlayTrack(usize),
    TogglePlay,
    /// Next button (fresh copy line, crossfade)
    Next,
    /// Previous button (fresh copy line, crossfade)
    Previous,
    ReturnToPick,
    ToggleShuffle,
    CycleRepeat,
    ToggleMute,
    /// Volume slider, 0 to 100
    SetVolume(u8),
    /// Seek to a fraction of the track
    Seek(f64),
    Share,
    ToggleChat,
    CloseChat,
    SendChat(String),
    OpenAuth(AuthTab),
    CloseAuth,
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
        name: Option<String>,
    },
    SignOut,
    ShowProfile,
    SearchUsers(String),
    Friends,
    FriendRequests,
    SendFriendRequest(String),
    AcceptFriendRequest(String),
    RejectFriendRequest(String),
    DeleteFriend(String),
    Resize(Viewport),
    Quit,
}

/// One input for the controller
#[derive(Debug)]
pub enum Input {
    Command(Command),
    Audio(AudioEvent),
    Room(RoomEvent),
    Catalog(CatalogLoaded),
    /// Chat history, post outcome or live insert
    Chat(ChatEvent),
    /// Finished sign-in or sign-up
    Auth(AuthReply),
    /// View events produced by a finished social request
    Social(Vec<ViewEvent>),
}

/// Controller state that is not owned by a component
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    pub copy_line: Option<&'static str>,
    pub playing: bool,
    /// Catalog loads not finished yet
    pub pending_catalogs: usize,
    /// Mood from the start URL, entered once every catalog is in
    pub initial_mood: Option<MoodKey>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Pick,
            copy_line: None,
            playing: false,
            pending_catalogs: 0,
            initial_mood: None,
        }
    }
}

/// Tunables for a player instance
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    pub initial_url: String,
    pub reduced_motion: bool,
    pub viewport: Viewport,
    pub join_timeout: Duration,
    pub logout_timeout: Duration,
    /// Fixed seed for copy lines, shuffle and anonymous ids
    pub rng_seed: Option<u64>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            initial_url: "http://localhost:3000/".to_string(),
            reduced_motion: false,
            viewport: Viewport::new(120.0, 40.0),
            join_timeout: DEFAULT_JOIN_TIMEOUT,
            logout_timeout: crate::session::LOGOUT_TIMEOUT,
            rng_seed: None,
        }
    }
}

/// Capabilities injected into the controller
pub struct PlayerServices {
    pub backend: Arc<dyn Backend>,
    /// `None` disables listen-together rooms and chat
    pub realtime: Option<Arc<dyn Realtime>>,
    pub audio: Box<dyn AudioElement>,
    pub audio_events: mpsc::UnboundedReceiver<AudioEvent>,
    pub view: Box<dyn View>,
    pub canvas: Box<dyn Canvas>,
    pub prefs: Preferences,
}

/// The controller
pub struct MoodPlayer {
    state: AppState,
    table: MoodTable,
    sequencer: Sequencer,
    transport: Transport,
    rooms: RoomMembership,
    chat: ChatPanel,
    session: SessionManager,
    social: Social,
    prefs: Preferences,
    router: Router,
    view: Box<dyn View>,
    visuals: AnimationLoop,
    rng: StdRng,
    audio_events: mpsc::UnboundedReceiver<AudioEvent>,
    catalog_tx: mpsc::UnboundedSender<CatalogLoaded>,
    catalog_rx: mpsc::UnboundedReceiver<CatalogLoaded>,
}

impl MoodPlayer {
    /// Build a player
    ///
    /// Must be called inside a tokio runtime: the animation loop starts
    /// right away.
    pub fn new(table: MoodTable, services: PlayerServices, options: PlayerOptions) -> Result<Self> {
        let router = Router::new(&options.initial_url)?;
        let rng = options
            .rng_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let visuals = AnimationLoop::spawn(
            table.get(MoodKey::Relax).particles,
            options.viewport,
            options.reduced_motion,
            services.canvas,
        );

        let rooms = RoomMembership::new(services.realtime.clone())
            .with_join_timeout(options.join_timeout);
        let chat = ChatPanel::new(Arc::clone(&services.backend), services.realtime);
        let session = SessionManager::new(Arc::clone(&services.backend))
            .with_logout_timeout(options.logout_timeout);
        let social = Social::new(services.backend);
        let (catalog_tx, catalog_rx) = mpsc::unbounded_channel();

        Ok(Self {
            state: AppState::default(),
            table,
            sequencer: Sequencer::new(),
            transport: Transport::new(services.audio, options.reduced_motion),
            rooms,
            chat,
            session,
            social,
            prefs: services.prefs,
            router,
            view: services.view,
            visuals,
            rng,
            audio_events: services.audio_events,
            catalog_tx,
            catalog_rx,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn table(&self) -> &MoodTable {
        &self.table
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn room_status(&self) -> &RoomStatus {
        self.rooms.status()
    }

    pub fn chat_open(&self) -> bool {
        self.chat.is_open()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// Restore the session and route to the start screen
    ///
    /// With a loader, catalogs load in the background and a mood from the
    /// start URL is entered once all of them are in. Without one the table
    /// is used as is.
    pub async fn start(&mut self, catalog: Option<&CatalogLoader>) {
        self.restore_session().await;

        let volume = self.transport.volume();
        self.render_volume(volume);
        self.view.render(ViewEvent::Repeat(self.sequencer.repeat()));
        self.view.render(ViewEvent::Shuffle(self.sequencer.shuffle()));

        let initial = self.router.mood();
        info!(initial_mood = ?initial, "Player starting");

        match catalog {
            Some(loader) => {
                self.state.pending_catalogs = MoodKey::ALL.len();
                self.state.initial_mood = initial;
                loader.spawn_all(&self.table, self.catalog_tx.clone());
                if initial.is_none() {
                    self.show_screen(Screen::Pick);
                }
            }
            None => match initial {
                Some(mood) => self.select_mood(mood, false).await,
                None => self.show_screen(Screen::Pick),
            },
        }
    }

    /// Process inputs until `Quit` or until the command channel closes
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        loop {
            let input = tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => Input::Command(command),
                    None => break,
                },
                input = self.next_background() => input,
            };

            if !self.dispatch(input).await {
                break;
            }
        }

        self.shutdown();
    }

    /// Wait for the next input produced by background work
    ///
    /// Cancel-safe: nothing is lost when another input wins a `select!`.
    pub async fn next_background(&mut self) -> Input {
        tokio::select! {
            Some(event) = self.audio_events.recv() => Input::Audio(event),
            event = self.rooms.next_event() => Input::Room(event),
            Some(loaded) = self.catalog_rx.recv() => Input::Catalog(loaded),
            event = self.chat.next_event() => Input::Chat(event),
            reply = self.session.next_reply() => Input::Auth(reply),
            events = self.social.next_reply() => Input::Social(events),
        }
    }

    /// Handle one input; `false` means quit
    pub async fn dispatch(&mut self, input: Input) -> bool {
        match input {
            Input::Command(command) => return self.handle(command).await,
            Input::Audio(event) => self.on_audio_event(event).await,
            Input::Room(event) => self.on_room_event(event),
            Input::Catalog(loaded) => self.on_catalog_loaded(loaded).await,
            Input::Chat(event) => self.chat.apply(event, self.view.as_mut()),
            Input::Auth(reply) => self.on_auth_reply(reply),
            Input::Social(events) => {
                for event in events {
                    self.view.render(event);
                }
            }
        }
        true
    }

    /// Wait for one background input and handle it
    pub async fn pump(&mut self) {
        let input = self.next_background().await;
        self.dispatch(input).await;
    }

    /// Handle a user command; `false` means quit
    pub async fn handle(&mut self, command: Command) -> bool {
        debug!(?command, "Command");

        match command {
            Command::Key { key, typing } => match shortcut_for(key, typing) {
                Some(ShortcutAction::ReturnToPick) => self.reset_to_pick(),
                Some(ShortcutAction::TogglePlay) => self.toggle_play().await,
                Some(ShortcutAction::Next) => self.next(true).await,
                Some(ShortcutAction::Previous) => self.previous(false).await,
                None => {}
            },
            Command::SelectMood(mood) => self.select_mood(mood, true).await,
            Command::PlayTrack(index) => self.play_track(index).await,
            Command::TogglePlay => self.toggle_play().await,
            Command::Next => self.next(true).await,
            Command::Previous => self.previous(true).await,
            Command::ReturnToPick => self.reset_to_pick(),
            Command::ToggleShuffle => {
                let shuffle = self.sequencer.toggle_shuffle();
                self.view.render(ViewEvent::Shuffle(shuffle));
            }
            Command::CycleRepeat => {
                let repeat = self.sequencer.cycle_repeat();
                self.view.render(ViewEvent::Repeat(repeat));
            }
            Command::ToggleMute => {
                let volume = self.transport.toggle_mute();
                self.render_volume(volume);
            }
            Command::SetVolume(percent) => {
                self.transport.set_volume(Volume::from_percent(percent));
                let volume = self.transport.volume();
                self.render_volume(volume);
            }
            Command::Seek(fraction) => {
                self.transport.seek_fraction(fraction);
                self.render_progress();
            }
            Command::Share => self.share(),
            Command::ToggleChat => self.toggle_chat(),
            Command::CloseChat => self.chat.close(self.view.as_mut()),
            Command::SendChat(text) => self.send_chat(&text),
            Command::OpenAuth(tab) => self.view.render(ViewEvent::AuthDialog(tab)),
            Command::CloseAuth => self.view.render(ViewEvent::AuthDialogClosed),
            Command::SignIn { email, password } => {
                if let Err(message) = self.session.sign_in(&email, &password) {
                    self.auth_error(AuthTab::Login, message);
                }
            }
            Command::SignUp {
                email,
                password,
                name,
            } => {
                if let Err(message) = self.session.sign_up(&email, &password, name.as_deref()) {
                    self.auth_error(AuthTab::Signup, message);
                }
            }
            Command::SignOut => self.sign_out().await,
            Command::ShowProfile => self.show_profile(),
            Command::SearchUsers(query) => self.social.request(SocialRequest::Search(query)),
            Command::Friends => self.social.request(SocialRequest::Friends),
            Command::FriendRequests => self.social.request(SocialRequest::Requests),
            Command::SendFriendRequest(id) => self.social.request(SocialRequest::SendRequest(id)),
            Command::AcceptFriendRequest(id) => self.social.request(SocialRequest::Accept(id)),
            Command::RejectFriendRequest(id) => self.social.request(SocialRequest::Reject(id)),
            Command::DeleteFriend(id) => self.social.request(SocialRequest::Remove(id)),
            Command::Resize(viewport) => self.visuals.resize(viewport),
            Command::Quit => return false,
        }

        true
    }

    // ===== Moods and tracks =====

    /// Enter a mood: header, background, URL, track list, then the first pick
    pub async fn select_mood(&mut self, key: MoodKey, autoplay: bool) {
        self.state.initial_mood = None;
        self.sequencer.select_mood(key);
        self.prefs.set_last_mood(key);

        let mood = self.table.get(key);
        let (tag, particles, lines) = (mood.tag, mood.particles, mood.copy);
        let copy = lines.choose(&mut self.rng).copied().unwrap_or_default();
        self.state.copy_line = Some(copy);

        info!(mood = %key, autoplay, "Mood selected");

        self.router.set_mood(key);
        self.view.render(ViewEvent::Url(self.router.url().to_string()));
        self.visuals.set_preset(particles);
        self.view.render(ViewEvent::Mood { key, tag, copy });
        self.render_track_list();
        self.show_screen(Screen::Player);

        self.pick_next(PickOptions {
            autoplay,
            fade_in: true,
        })
        .await;
    }

    async fn pick_next(&mut self, options: PickOptions) {
        let Some(track) = self.sequencer.pick_next(&self.table, &mut self.rng) else {
            return;
        };
        self.transition(track, options).await;
    }

    async fn next(&mut self, refresh_copy: bool) {
        if self.sequencer.mood().is_none() {
            return;
        }
        if refresh_copy {
            self.refresh_copy();
        }
        let Some(track) = self.sequencer.advance(&self.table, &mut self.rng) else {
            return;
        };
        self.transition(track, PickOptions::SKIP).await;
    }

    async fn previous(&mut self, refresh_copy: bool) {
        if self.sequencer.mood().is_none() {
            return;
        }
        if refresh_copy {
            self.refresh_copy();
        }
        let Some(track) = self.sequencer.retreat(&self.table) else {
            return;
        };
        self.transition(track, PickOptions::SKIP).await;
    }

    async fn play_track(&mut self, index: usize) {
        let Some(track) = self.sequencer.jump_to(&self.table, index) else {
            debug!(index, "No such track");
            return;
        };
        self.transition(track, PickOptions::ENTRY).await;
    }

    /// Crossfade out when something is playing, then load
    async fn transition(&mut self, track: Track, options: PickOptions) {
        let crossfading = self.transport.will_crossfade(options);
        if crossfading {
            self.transport.fade_out().await;
        }
        self.load_track(track, options, crossfading).await;
    }

    /// Leave the room, swap the source, start playing, join the new room
    async fn load_track(&mut self, track: Track, options: PickOptions, crossfading: bool) {
        self.leave_room();

        self.view.render(ViewEvent::NowPlaying(track.clone()));
        self.view.render(ViewEvent::Progress {
            position: Duration::ZERO,
            duration: None,
        });
        self.set_playing(false);
        self.render_track_list();

        let outcome = self.transport.load(&track, options, crossfading).await;
        self.set_playing(outcome.is_playing());

        self.join_room(&track);
        self.transport.settle().await;
    }

    async fn toggle_play(&mut self) {
        if self.sequencer.current().is_none() {
            return;
        }
        let playing = self.transport.toggle_play().await;
        self.set_playing(playing);
    }

    /// Back to the pick screen: stop, forget mood and track, leave the room
    pub fn reset_to_pick(&mut self) {
        self.state.initial_mood = None;
        self.transport.pause();
        self.set_playing(false);
        self.show_screen(Screen::Pick);

        self.router.clear();
        self.view.render(ViewEvent::Url(self.router.url().to_string()));

        self.sequencer.clear();
        self.state.copy_line = None;
        self.leave_room();

        info!("Returned to mood selection");
        self.toast(RETURNED_TO_PICK);
    }

    fn share(&mut self) {
        let link = self.router.share_link(self.sequencer.mood());
        self.view.render(ViewEvent::ShareLink(link));
        self.toast(LINK_COPIED);
    }

    fn refresh_copy(&mut self) {
        let Some(key) = self.sequencer.mood() else {
            return;
        };
        let lines = self.table.get(key).copy;
        if let Some(copy) = lines.choose(&mut self.rng).copied() {
            self.state.copy_line = Some(copy);
            self.view.render(ViewEvent::CopyLine(copy));
        }
    }

    // ===== Background inputs =====

    async fn on_audio_event(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::TimeUpdate { position, duration } => {
                self.view.render(ViewEvent::Progress { position, duration });
            }
            AudioEvent::Ended => self.on_track_ended().await,
            AudioEvent::Error => {
                warn!(url = ?self.sequencer.current().map(|t| &t.url), "Audio element error");
                self.set_playing(false);
                self.toast(AUDIO_FAILED);
            }
        }
    }

    async fn on_track_ended(&mut self) {
        let end = self.sequencer.end_of_track(&self.table);
        debug!(?end, repeat = ?self.sequencer.repeat(), "Track ended");

        match end {
            TrackEnd::RestartCurrent => {
                let playing = self.transport.restart().await;
                self.set_playing(playing);
            }
            TrackEnd::Advance => {
                self.set_playing(false);
                self.pick_next(PickOptions::ENTRY).await;
            }
            TrackEnd::Stop => self.set_playing(false),
        }
    }

    fn on_room_event(&mut self, event: RoomEvent) {
        let Some(status) = self.rooms.apply(event).cloned() else {
            return;
        };

        if let RoomStatus::Failed { reason, .. } = &status {
            self.chat.close(self.view.as_mut());
            self.toast(&format!("同時リスニングに接続できませんでした：{}", reason));
        }
        self.view.render(ViewEvent::Room(status));
    }

    async fn on_catalog_loaded(&mut self, loaded: CatalogLoaded) {
        let mood = loaded.mood;
        debug!(mood = %mood, tracks = loaded.tracks.len(), "Catalog installed");
        self.table.set_tracks(mood, loaded.tracks);
        self.state.pending_catalogs = self.state.pending_catalogs.saturating_sub(1);

        if self.sequencer.mood() == Some(mood) {
            self.sequencer.reconcile(&self.table);
            self.render_track_list();
        }

        if self.state.pending_catalogs == 0 {
            info!("All catalogs loaded");
            if let Some(initial) = self.state.initial_mood.take() {
                self.select_mood(initial, false).await;
            }
        }
    }

    // ===== Rooms and chat =====

    fn join_room(&mut self, track: &Track) {
        let Some(mood) = self.sequencer.mood() else {
            return;
        };
        let identity = self.chat_identity();
        let member = PresenceMember {
            user_id: identity.user_id,
            user_name: identity.user_name,
            mood: mood.as_str().to_string(),
            track_url: track.url.clone(),
        };

        let status = self.rooms.join(mood, &track.url, member).clone();
        self.view.render(ViewEvent::Room(status));
    }

    fn leave_room(&mut self) {
        self.chat.close(self.view.as_mut());
        self.rooms.leave();
        self.view.render(ViewEvent::Room(self.rooms.status().clone()));
    }

    fn toggle_chat(&mut self) {
        if self.chat.is_open() {
            self.chat.close(self.view.as_mut());
            return;
        }
        if !self.rooms.chat_enabled() {
            debug!(status = ?self.rooms.status(), "Chat needs two listeners");
            return;
        }
        let Some(room_id) = self.rooms.room_id().map(str::to_string) else {
            return;
        };
        self.chat.open(&room_id, self.view.as_mut());
    }

    fn send_chat(&mut self, text: &str) {
        if self.rooms.room_id().is_none() {
            debug!("No room, chat message dropped");
            return;
        }
        let identity = self.chat_identity();
        self.chat.send(text, &identity);
    }

    /// Signed-in identity, else the persisted anonymous one
    fn chat_identity(&mut self) -> ChatIdentity {
        if let Some(user) = self.session.user() {
            return ChatIdentity {
                user_id: user.id.clone(),
                user_name: user.display_name(),
            };
        }
        ChatIdentity {
            user_id: self.prefs.chat_user_id(&mut self.rng),
            user_name: self.prefs.chat_user_name(&mut self.rng),
        }
    }

    // ===== Accounts =====

    async fn restore_session(&mut self) {
        let Some(token) = self.prefs.access_token() else {
            self.view.render(ViewEvent::User(None));
            return;
        };

        match self.session.restore(token).await {
            Ok(Some(user)) => self.view.render(ViewEvent::User(Some(user))),
            Ok(None) => {
                self.prefs.set_access_token(None);
                self.view.render(ViewEvent::User(None));
            }
            Err(_) => self.view.render(ViewEvent::User(None)),
        }
    }

    fn on_auth_reply(&mut self, reply: AuthReply) {
        match reply {
            AuthReply::SignedIn(Ok(session)) => {
                self.session.signed_in(&session);
                self.prefs.set_access_token(Some(&session.access_token));
                self.view.render(ViewEvent::User(Some(session.user)));
                self.view.render(ViewEvent::AuthDialogClosed);
                self.toast(SIGNED_IN);
            }
            AuthReply::SignedIn(Err(message)) => self.auth_error(AuthTab::Login, message),
            AuthReply::SignedUp(Ok(outcome)) => {
                self.view.render(ViewEvent::AuthDialogClosed);
                let message = outcome.message.unwrap_or_else(|| SIGNED_UP.to_string());
                self.toast(&message);
            }
            AuthReply::SignedUp(Err(message)) => self.auth_error(AuthTab::Signup, message),
        }
    }

    fn auth_error(&mut self, tab: AuthTab, message: String) {
        self.view.render(ViewEvent::AuthError { tab, message });
    }

    /// Sign out; local cleanup never waits longer than the logout timeout
    async fn sign_out(&mut self) {
        self.session.sign_out().await;
        self.prefs.set_access_token(None);
        self.view.render(ViewEvent::User(None));
        self.reset_to_pick();
        self.toast(SIGNED_OUT);
    }

    fn show_profile(&mut self) {
        let Some(user) = self.session.user().cloned() else {
            self.view.render(ViewEvent::AuthDialog(AuthTab::Login));
            return;
        };
        self.show_screen(Screen::Profile);
        self.view.render(ViewEvent::Profile(user));
    }

    // ===== Rendering helpers =====

    fn show_screen(&mut self, screen: Screen) {
        self.state.screen = screen;
        self.visuals.set_breathing(screen == Screen::Player);
        self.view.render(ViewEvent::Screen(screen));
    }

    fn set_playing(&mut self, playing: bool) {
        self.state.playing = playing;
        self.view.render(ViewEvent::Playing(playing));
    }

    fn render_track_list(&mut self) {
        let Some(key) = self.sequencer.mood() else {
            return;
        };
        self.view.render(ViewEvent::TrackList {
            tracks: self.table.get(key).tracks.clone(),
            current: self.sequencer.current().map(|t| t.url.clone()),
        });
    }

    fn render_volume(&mut self, volume: f32) {
        self.view.render(ViewEvent::Volume {
            percent: Volume::to_percent(volume),
            icon: VolumeIcon::for_volume(volume),
        });
    }

    fn render_progress(&mut self) {
        self.view.render(ViewEvent::Progress {
            position: self.transport.position(),
            duration: self.transport.duration(),
        });
    }

    fn toast(&mut self, message: &str) {
        self.view.render(ViewEvent::Toast(message.to_string()));
    }

    fn shutdown(&mut self) {
        self.chat.close(self.view.as_mut());
        self.rooms.leave();
        self.transport.pause();
        info!("Player stopped");
    }
}

impl std::fmt::Debug for MoodPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodPlayer")
            .field("state", &self.state)
            .field("sequencer", &self.sequencer)
            .field("transport", &self.transport)
            .field("rooms", &self.rooms)
            .field("chat", &self.chat)
            .finish_non_exhaustive()
    }
}

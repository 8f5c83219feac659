use crate::view::{AuthTab, Screen, View, ViewEvent};
use mood_playback::{format_time, VolumeIcon};
use mood_rooms::RoomStatus;
use std::fmt::Display;
use std::io::Write;
use tracing::debug;

/// Prints view events as text lines
pub struct TerminalView<W: Write + Send> {
    out: W,
    /// Last progress second printed; progress only prints on change
    last_second: Option<u64>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_second: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|()| self.out.flush()) {
            debug!(error = %e, "Terminal write failed");
        }
    }
}

impl<W: Write + Send> View for TerminalView<W> {
    fn render(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Screen(Screen::Pick) => {
                self.line("── 今の気分は？  relax heartbreak hype quiet love fun");
            }
            ViewEvent::Screen(Screen::Player) => {}
            ViewEvent::Screen(Screen::Profile) => self.line("── プロフィール"),
            ViewEvent::Mood { tag, copy, .. } => {
                self.line(format!("── {}", tag));
                self.line(format!("   {}", copy));
            }
            ViewEvent::CopyLine(copy) => self.line(format!("   {}", copy)),
            ViewEvent::TrackList { tracks, current } => {
                for (i, track) in tracks.iter().enumerate() {
                    let marker = if current.as_deref() == Some(track.url.as_str()) {
                        '▶'
                    } else {
                        ' '
                    };
                    self.line(format!(" {} {:>2}. {}", marker, i + 1, track.title));
                }
            }
            ViewEvent::NowPlaying(track) => {
                self.last_second = None;
                self.line(format!("♪ {}", track.title));
            }
            ViewEvent::Playing(playing) => {
                self.line(if playing { "▶ 再生中" } else { "⏸ 一時停止" });
            }
            ViewEvent::Progress { position, duration } => {
                let second = position.as_secs();
                if self.last_second != Some(second) && second % 10 == 0 {
                    self.last_second = Some(second);
                    self.line(format!(
                        "  {} / {}",
                        format_time(Some(position)),
                        format_time(duration)
                    ));
                }
            }
            ViewEvent::Volume { percent, icon } => {
                let icon = match icon {
                    VolumeIcon::Muted => "🔇",
                    VolumeIcon::Low => "🔉",
                    VolumeIcon::High => "🔊",
                };
                self.line(format!("{} {}%", icon, percent));
            }
            ViewEvent::Repeat(mode) => self.line(format!("repeat: {}", mode.label())),
            ViewEvent::Shuffle(on) => self.line(format!("shuffle: {}", if on { "on" } else { "off" })),
            ViewEvent::Room(status) => match status {
                RoomStatus::Idle | RoomStatus::Unavailable => {}
                RoomStatus::Connecting { .. } => self.line("… 同じ曲を聴いている人を探しています"),
                RoomStatus::Joined { participants, .. } => {
                    let chat = if participants >= mood_rooms::MIN_CHAT_PARTICIPANTS {
                        "  (chat で会話できます)"
                    } else {
                        ""
                    };
                    self.line(format!("👥 {}人が聴いています{}", participants, chat));
                }
                RoomStatus::Failed { .. } => {}
            },
            ViewEvent::ChatOpened => self.line("── チャット"),
            ViewEvent::ChatClosed => self.line("── チャットを閉じました"),
            ViewEvent::ChatHistory(messages) => {
                if messages.is_empty() {
                    self.line("  (まだメッセージはありません)");
                }
                for message in messages {
                    self.line(format!(
                        "  [{}] {}: {}",
                        message.time_label(),
                        message.user_name,
                        message.message
                    ));
                }
            }
            ViewEvent::ChatMessage(message) => self.line(format!(
                "  [{}] {}: {}",
                message.time_label(),
                message.user_name,
                message.message
            )),
            ViewEvent::ChatError { title, detail } => {
                self.line(format!("  ⚠ {}", title));
                for line in detail.lines() {
                    self.line(format!("    {}", line));
                }
            }
            ViewEvent::User(Some(user)) => self.line(format!("👤 {}", user.display_name())),
            ViewEvent::User(None) => {}
            ViewEvent::AuthDialog(AuthTab::Login) => {
                self.line("login <email> <password> でログインしてください");
            }
            ViewEvent::AuthDialog(AuthTab::Signup) => {
                self.line("signup <email> <password> [name] で登録してください");
            }
            ViewEvent::AuthDialogClosed => {}
            ViewEvent::AuthError { message, .. } => self.line(format!("✗ {}", message)),
            ViewEvent::Profile(user) => {
                self.line(format!("   名前: {}", user.display_name()));
                if let Some(email) = &user.email {
                    self.line(format!("   メール: {}", email));
                }
                self.line(format!("   ID: {}", user.id));
            }
            ViewEvent::SearchResults(users) => {
                if users.is_empty() {
                    self.line("  ユーザーが見つかりませんでした");
                }
                for user in users {
                    self.line(format!("  {} ({})", user.name, user.id));
                }
            }
            ViewEvent::Friends(friends) => {
                self.line(format!("── 友達 ({})", friends.len()));
                for friend in friends {
                    self.line(format!("  {} ({})", friend.name, friend.id));
                }
            }
            ViewEvent::FriendRequests(requests) => {
                self.line(format!("── 友達リクエスト ({})", requests.len()));
                for request in requests {
                    self.line(format!("  {} from {}", request.id, request.from_user.name));
                }
            }
            ViewEvent::Url(url) => debug!(url = %url, "URL changed"),
            ViewEvent::ShareLink(link) => self.line(format!("🔗 {}", link)),
            ViewEvent::Toast(message) => self.line(format!("» {}", message)),
        }
    }
}

//! Stdin command parser

use crate::app::Command;
use crate::keys::Key;
use crate::view::AuthTab;
use mood_core::MoodKey;
use mood_visuals::Viewport;

/// Usage text printed by `help`
pub const HELP: &str = "\
moods:     relax heartbreak hype quiet love fun
keys:      esc enter space n p left
playback:  play next prev track <n> shuffle repeat mute vol <0-100> seek <0-100>
rooms:     chat close say <text> share
account:   login <email> <password>  signup <email> <password> [name]  logout  me
social:    search <q> friends requests add <id> accept <id> reject <id> unfriend <id>
other:     size <cols> <rows> help quit";

/// Parse one input line
///
/// Returns `None` for blank lines and anything not understood.
pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let key = |key| Some(Command::Key { key, typing: false });

    match word.to_ascii_lowercase().as_str() {
        "" => None,

        "esc" | "escape" => key(Key::Escape),
        "enter" => key(Key::Enter),
        "space" => key(Key::Space),
        "left" => key(Key::ArrowLeft),
        "n" => key(Key::Char('n')),
        "p" => key(Key::Char('p')),

        "play" | "pause" => Some(Command::TogglePlay),
        "next" => Some(Command::Next),
        "prev" | "previous" => Some(Command::Previous),
        "back" => Some(Command::ReturnToPick),
        "track" => {
            let n: usize = args.first()?.parse().ok()?;
            n.checked_sub(1).map(Command::PlayTrack)
        }
        "shuffle" => Some(Command::ToggleShuffle),
        "repeat" => Some(Command::CycleRepeat),
        "mute" => Some(Command::ToggleMute),
        "vol" | "volume" => {
            let percent: u8 = args.first()?.parse().ok()?;
            Some(Command::SetVolume(percent.min(100)))
        }
        "seek" => {
            let percent: f64 = args.first()?.parse().ok()?;
            Some(Command::Seek(percent.clamp(0.0, 100.0) / 100.0))
        }

        "chat" => Some(Command::ToggleChat),
        "close" => Some(Command::CloseChat),
        "say" if !rest.is_empty() => Some(Command::SendChat(rest.to_string())),
        "share" => Some(Command::Share),

        "login" if args.len() == 2 => Some(Command::SignIn {
            email: args[0].to_string(),
            password: args[1].to_string(),
        }),
        "login" => Some(Command::OpenAuth(AuthTab::Login)),
        "signup" if args.len() >= 2 => Some(Command::SignUp {
            email: args[0].to_string(),
            password: args[1].to_string(),
            name: (args.len() > 2).then(|| args[2..].join(" ")),
        }),
        "signup" => Some(Command::OpenAuth(AuthTab::Signup)),
        "logout" => Some(Command::SignOut),
        "me" | "profile" => Some(Command::ShowProfile),

        "search" if !rest.is_empty() => Some(Command::SearchUsers(rest.to_string())),
        "friends" => Some(Command::Friends),
        "requests" => Some(Command::FriendRequests),
        "add" => args.first().map(|id| Command::SendFriendRequest((*id).to_string())),
        "accept" => args.first().map(|id| Command::AcceptFriendRequest((*id).to_string())),
        "reject" => args.first().map(|id| Command::RejectFriendRequest((*id).to_string())),
        "unfriend" => args.first().map(|id| Command::DeleteFriend((*id).to_string())),

        "size" => {
            let cols: f32 = args.first()?.parse().ok()?;
            let rows: f32 = args.get(1)?.parse().ok()?;
            Some(Command::Resize(Viewport::new(cols, rows)))
        }
        "quit" | "exit" | "q" => Some(Command::Quit),

        other => other.parse::<MoodKey>().ok().map(Command::SelectMood),
    }
}

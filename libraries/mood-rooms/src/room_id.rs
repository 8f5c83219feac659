//! Deterministic room naming

use mood_core::MoodKey;

/// Participants needed before chat is enabled
pub const MIN_CHAT_PARTICIPANTS: usize = 2;

/// Opaque room id for a (mood, track) pair
///
/// 32-bit rolling hash (`h * 31 + unit`, wrapping) over the UTF-16 code units
/// of `mood|url`, rendered as `r_` plus the base-36 magnitude.
pub fn room_id(mood: MoodKey, track_url: &str) -> String {
    let key = format!("{}|{}", mood.as_str(), track_url);
    let hash = key.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    });

    format!("r_{}", to_base36(hash.unsigned_abs()))
}

/// Presence channel name of a room
pub fn presence_channel(room_id: &str) -> String {
    format!("room:{room_id}")
}

/// Chat insert channel name of a room
pub fn chat_channel(room_id: &str) -> String {
    format!("chat:{room_id}")
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

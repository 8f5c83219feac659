/// Mood domain types and the single mood configuration table
use super::Track;
use crate::error::MoodError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotional category selecting a track list, theme and particle preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodKey {
    Relax,
    Heartbreak,
    Hype,
    Quiet,
    Love,
    Fun,
}

impl MoodKey {
    /// Every mood, in display order
    pub const ALL: [MoodKey; 6] = [
        MoodKey::Relax,
        MoodKey::Heartbreak,
        MoodKey::Hype,
        MoodKey::Quiet,
        MoodKey::Love,
        MoodKey::Fun,
    ];

    /// Key as used in URLs and persisted preferences
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodKey::Relax => "relax",
            MoodKey::Heartbreak => "heartbreak",
            MoodKey::Hype => "hype",
            MoodKey::Quiet => "quiet",
            MoodKey::Love => "love",
            MoodKey::Fun => "fun",
        }
    }
}

impl fmt::Display for MoodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodKey {
    type Err = MoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| MoodError::UnknownMood(s.to_string()))
    }
}

/// Background particle parameters for a mood
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticlePreset {
    /// Base downward speed (pixels per frame)
    pub speed: f32,
    /// Maximum horizontal drift (pixels per frame)
    pub drift: f32,
    /// Minimum particle radius
    pub size_min: f32,
    /// Maximum particle radius
    pub size_max: f32,
    /// Particle count at full motion
    pub count: usize,
}

/// One row of the mood table
#[derive(Debug, Clone, PartialEq)]
pub struct Mood {
    pub key: MoodKey,
    /// Display tag (emoji + label)
    pub tag: &'static str,
    /// Copy lines, one shown at random per selection
    pub copy: &'static [&'static str],
    pub particles: ParticlePreset,
    /// Catalog file holding this mood's track URLs
    pub catalog_file: &'static str,
    /// Ordered track list; replaced once the catalog finishes loading
    pub tracks: Vec<Track>,
}

impl Mood {
    /// Position of a track (by URL) in this mood's list
    pub fn index_of(&self, url: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.url == url)
    }

    /// Whether the URL belongs to this mood's list
    pub fn contains(&self, url: &str) -> bool {
        self.index_of(url).is_some()
    }
}

struct MoodSpec {
    key: MoodKey,
    tag: &'static str,
    copy: &'static [&'static str],
    particles: ParticlePreset,
    catalog_file: &'static str,
}

const MOOD_SPECS: [MoodSpec; 6] = [
    MoodSpec {
        key: MoodKey::Relax,
        tag: "😌 リラックス",
        copy: &[
            "肩の力を抜いて、まずは深呼吸。",
            "肩を下ろして、今日もお疲れ様。",
            "この曲を、休みが必要なあなたに。",
        ],
        particles: ParticlePreset {
            speed: 0.35,
            drift: 0.25,
            size_min: 1.2,
            size_max: 3.2,
            count: 56,
        },
        catalog_file: "chill.txt",
    },
    MoodSpec {
        key: MoodKey::Heartbreak,
        tag: "💔 失恋",
        copy: &[
            "大丈夫、しばらく悲しんでもいい。",
            "わかるよ、説明しなくていい。",
            "この曲を聴いてから、今日を許すかどうか決めよう。",
        ],
        particles: ParticlePreset {
            speed: 0.55,
            drift: 0.18,
            size_min: 1.0,
            size_max: 2.6,
            count: 70,
        },
        catalog_file: "slow.txt",
    },
    MoodSpec {
        key: MoodKey::Hype,
        tag: "🔥 アガりたい",
        copy: &[
            "音量を上げて。",
            "今日こそ主役だ。",
            "心拍にカウントダウンを任せて：3、2、1。",
        ],
        particles: ParticlePreset {
            speed: 1.25,
            drift: 0.42,
            size_min: 1.4,
            size_max: 4.2,
            count: 92,
        },
        catalog_file: "edm.txt",
    },
    MoodSpec {
        key: MoodKey::Quiet,
        tag: "🌧 静かにしたい",
        copy: &[
            "静かでいい、世界は少しゆっくりでもいい。",
            "この一曲で、少しの間一緒に歩こう。",
            "言葉はいらない、音楽がわかってくれる。",
        ],
        particles: ParticlePreset {
            speed: 0.45,
            drift: 0.14,
            size_min: 1.0,
            size_max: 2.8,
            count: 64,
        },
        catalog_file: "piano.txt",
    },
    MoodSpec {
        key: MoodKey::Love,
        tag: "💗 恋",
        copy: &[
            "あの人のことを考えると、心が少し甘くなる？",
            "好きな人を、いつももう一度見たくなる。",
            "この曲は、小さな告白の練習。",
        ],
        particles: ParticlePreset {
            speed: 0.55,
            drift: 0.24,
            size_min: 1.2,
            size_max: 3.0,
            count: 70,
        },
        catalog_file: "citypop.txt",
    },
    MoodSpec {
        key: MoodKey::Fun,
        tag: "🎉 楽し",
        copy: &[
            "今日はクールをやめて、楽しむことが一番。",
            "好きな人と一緒に笑うと、何より癒される。",
            "この曲は、うなずきながら踊るのにぴったり。",
        ],
        particles: ParticlePreset {
            speed: 0.9,
            drift: 0.36,
            size_min: 1.4,
            size_max: 3.6,
            count: 88,
        },
        catalog_file: "pop.txt",
    },
];

/// All mood configuration in one table
///
/// Every row starts with the fallback track list; catalog loading replaces
/// each list once.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodTable {
    moods: Vec<Mood>,
}

impl MoodTable {
    /// Build the table with every mood holding `[fallback]`
    pub fn with_fallback(fallback: Track) -> Self {
        let moods = MOOD_SPECS
            .iter()
            .map(|spec| Mood {
                key: spec.key,
                tag: spec.tag,
                copy: spec.copy,
                particles: spec.particles,
                catalog_file: spec.catalog_file,
                tracks: vec![fallback.clone()],
            })
            .collect();

        Self { moods }
    }

    /// Row for a mood
    pub fn get(&self, key: MoodKey) -> &Mood {
        // MOOD_SPECS holds one row per key in MoodKey::ALL order
        &self.moods[Self::slot(key)]
    }

    /// Replace a mood's track list
    ///
    /// An empty list is ignored so no mood ever ends up without tracks.
    pub fn set_tracks(&mut self, key: MoodKey, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }
        self.moods[Self::slot(key)].tracks = tracks;
    }

    /// Iterate moods in display order
    pub fn iter(&self) -> impl Iterator<Item = &Mood> {
        self.moods.iter()
    }

    fn slot(key: MoodKey) -> usize {
        MoodKey::ALL
            .iter()
            .position(|k| *k == key)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> Track {
        Track::new("fallback", "https://cdn.example.com/fallback.mp3")
    }

    #[test]
    fn mood_key_round_trips_through_str() {
        for key in MoodKey::ALL {
            assert_eq!(key.as_str().parse::<MoodKey>().unwrap(), key);
        }
        assert!(matches!(
            "sleepy".parse::<MoodKey>(),
            Err(MoodError::UnknownMood(_))
        ));
    }

    #[test]
    fn table_rows_follow_key_order() {
        let table = MoodTable::with_fallback(fallback());
        let keys: Vec<MoodKey> = table.iter().map(|m| m.key).collect();
        assert_eq!(keys, MoodKey::ALL.to_vec());

        for key in MoodKey::ALL {
            assert_eq!(table.get(key).key, key);
        }
    }

    #[test]
    fn catalog_files_match_moods() {
        let table = MoodTable::with_fallback(fallback());
        assert_eq!(table.get(MoodKey::Relax).catalog_file, "chill.txt");
        assert_eq!(table.get(MoodKey::Heartbreak).catalog_file, "slow.txt");
        assert_eq!(table.get(MoodKey::Hype).catalog_file, "edm.txt");
        assert_eq!(table.get(MoodKey::Quiet).catalog_file, "piano.txt");
        assert_eq!(table.get(MoodKey::Love).catalog_file, "citypop.txt");
        assert_eq!(table.get(MoodKey::Fun).catalog_file, "pop.txt");
    }

    #[test]
    fn empty_track_list_is_ignored() {
        let mut table = MoodTable::with_fallback(fallback());
        table.set_tracks(MoodKey::Hype, Vec::new());
        assert_eq!(table.get(MoodKey::Hype).tracks, vec![fallback()]);

        let tracks = vec![
            Track::new("a", "https://cdn.example.com/a.mp3"),
            Track::new("b", "https://cdn.example.com/b.mp3"),
        ];
        table.set_tracks(MoodKey::Hype, tracks.clone());
        assert_eq!(table.get(MoodKey::Hype).tracks, tracks);
        assert_eq!(table.get(MoodKey::Hype).index_of("https://cdn.example.com/b.mp3"), Some(1));
    }

    #[test]
    fn hype_preset_is_the_busiest() {
        let table = MoodTable::with_fallback(fallback());
        let hype = table.get(MoodKey::Hype).particles;
        for mood in table.iter() {
            assert!(mood.particles.count <= hype.count);
            assert!(mood.particles.size_min < mood.particles.size_max);
        }
    }
}

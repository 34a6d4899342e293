use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Track,
    Artist,
    Album,
    Tag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
    Mega,
}

impl ImageSize {
    pub const fn index(self) -> usize {
        match self {
            ImageSize::Small => 0,
            ImageSize::Medium => 1,
            ImageSize::Large => 2,
            ImageSize::ExtraLarge => 3,
            ImageSize::Mega => 4,
        }
    }
}

/// Empty URLs keep their slot so positions line up with [`ImageSize::index`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageSet(Vec<String>);

impl ImageSet {
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Array(entries)) = value else {
            return Self::default();
        };
        Self(entries.iter().map(image_src).collect())
    }

    /// Falls back to the last entry when the slot is missing or empty.
    pub fn get(&self, size: ImageSize) -> Option<&str> {
        let present = |src: &&String| !src.is_empty();
        self.0
            .get(size.index())
            .filter(present)
            .or_else(|| self.0.last().filter(present))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn image_src(entry: &Value) -> String {
    match entry {
        Value::String(src) => src.clone(),
        Value::Object(map) => map
            .get("#text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArtistField {
    Plain(String),
    Object {
        #[serde(default)]
        name: Option<Value>,
        #[serde(rename = "#text", default)]
        text: Option<Value>,
    },
    Other(Value),
}

pub fn artist_name(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match ArtistField::deserialize(value) {
        Ok(ArtistField::Plain(name)) => name,
        Ok(ArtistField::Object { name, text }) => name
            .as_ref()
            .and_then(text_of)
            .or_else(|| text.as_ref().and_then(text_of))
            .unwrap_or_default(),
        Ok(ArtistField::Other(_)) | Err(_) => String::new(),
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// "12 plays" reads as 12.
pub fn parse_count(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => {
            let trimmed = s.trim_start();
            let digits: &str = trimmed
                .find(|c: char| !c.is_ascii_digit())
                .map_or(trimmed, |end| &trimmed[..end]);
            digits.parse().ok()
        }
        _ => None,
    }
}

fn parse_timestamp(value: Option<&Value>) -> Option<i64> {
    let seconds = match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (seconds > 0).then_some(seconds)
}

/// A bare object counts as a one-element list.
pub fn list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(item @ Value::Object(_)) => vec![item],
        _ => Vec::new(),
    }
}

pub fn list_at<'a>(payload: &'a Value, pointer: &str) -> Vec<&'a Value> {
    list(payload.pointer(pointer))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub kind: RecordKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub images: ImageSet,
    pub play_count: Option<u64>,
    pub listeners: Option<u64>,
    /// 1-based position in the list it came from.
    pub rank: usize,
    pub now_playing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl DisplayRecord {
    fn from_value(kind: RecordKind, value: &Value, rank: usize) -> Self {
        let artist = match kind {
            RecordKind::Track | RecordKind::Album => Some(artist_name(value.get("artist"))),
            RecordKind::Artist | RecordKind::Tag => None,
        };
        Self {
            kind,
            name: value.get("name").and_then(text_of).unwrap_or_default(),
            artist,
            images: ImageSet::from_value(value.get("image")),
            play_count: parse_count(value.get("playcount")),
            listeners: parse_count(value.get("listeners")),
            rank,
            now_playing: false,
            url: value.get("url").and_then(text_of),
        }
    }

    pub fn image(&self, size: ImageSize) -> Option<&str> {
        self.images.get(size)
    }
}

fn records(kind: RecordKind, items: &[&Value]) -> Vec<DisplayRecord> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| DisplayRecord::from_value(kind, item, index + 1))
        .collect()
}

pub fn tracks(items: &[&Value]) -> Vec<DisplayRecord> {
    records(RecordKind::Track, items)
}

pub fn artists(items: &[&Value]) -> Vec<DisplayRecord> {
    records(RecordKind::Artist, items)
}

pub fn albums(items: &[&Value]) -> Vec<DisplayRecord> {
    records(RecordKind::Album, items)
}

pub fn tags(items: &[&Value]) -> Vec<DisplayRecord> {
    records(RecordKind::Tag, items)
}

/// Only the first entry may be flagged as now playing.
pub fn recent_tracks(items: &[&Value]) -> Vec<DisplayRecord> {
    let mut result = tracks(items);
    if let (Some(first), Some(raw)) = (result.first_mut(), items.first()) {
        first.now_playing = is_now_playing(raw);
    }
    result
}

fn is_now_playing(track: &Value) -> bool {
    track
        .pointer("/@attr/nowplaying")
        .and_then(Value::as_str)
        .is_some_and(|flag| flag == "true")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum NowPlaying {
    Playing { track: String, artist: String },
    Last { track: String },
}

/// `None` means the indicator keeps whatever it showed before.
pub fn now_playing(recent: &[DisplayRecord]) -> Option<NowPlaying> {
    let first = recent.first()?;
    if first.now_playing {
        Some(NowPlaying::Playing {
            track: first.name.clone(),
            artist: first.artist.clone().unwrap_or_default(),
        })
    } else {
        Some(NowPlaying::Last {
            track: first.name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub real_name: Option<String>,
    pub country: Option<String>,
    pub url: Option<String>,
    pub images: ImageSet,
    pub play_count: u64,
    pub artist_count: u64,
    pub album_count: u64,
    pub track_count: u64,
    pub registered: Option<i64>,
}

impl UserProfile {
    pub fn from_payload(payload: &Value) -> Self {
        let user = payload.get("user").unwrap_or(&Value::Null);
        let field = |name: &str| user.get(name).and_then(text_of);
        let total = |name: &str| parse_count(user.get(name)).unwrap_or(0);

        Self {
            name: field("name").unwrap_or_default(),
            real_name: field("realname"),
            country: field("country").filter(|country| country != "None"),
            url: field("url"),
            images: ImageSet::from_value(user.get("image")),
            play_count: total("playcount"),
            artist_count: total("artist_count"),
            album_count: total("album_count"),
            track_count: total("track_count"),
            registered: parse_timestamp(user.pointer("/registered/unixtime")),
        }
    }

    pub fn avatar(&self) -> Option<&str> {
        self.images.get(ImageSize::Large)
    }
}

use super::normalize::{DisplayRecord, NowPlaying, UserProfile};
use super::section::{Period, SearchKind};
use serde::Serialize;

/// The rendered content of a section, independent of any output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View {
    Dashboard {
        profile: UserProfile,
        recent: Vec<DisplayRecord>,
        top_artists: Vec<DisplayRecord>,
        top_tracks: Vec<DisplayRecord>,
        now_playing: Option<NowPlaying>,
    },
    Profile {
        profile: UserProfile,
    },
    RecentTracks {
        tracks: Vec<DisplayRecord>,
        now_playing: Option<NowPlaying>,
    },
    TopArtists {
        period: Period,
        artists: Vec<DisplayRecord>,
    },
    TopAlbums {
        period: Period,
        albums: Vec<DisplayRecord>,
    },
    TopTracks {
        period: Period,
        tracks: Vec<DisplayRecord>,
    },
    LovedTracks {
        tracks: Vec<DisplayRecord>,
    },
    SearchForm {
        kind: SearchKind,
    },
    ChartArtists {
        artists: Vec<DisplayRecord>,
    },
    ChartTracks {
        tracks: Vec<DisplayRecord>,
    },
    GeoCharts {
        country: String,
        results: Results,
    },
    TopTags {
        tags: Vec<DisplayRecord>,
    },
    TagExplore {
        tag: Option<String>,
        results: Option<Results>,
    },
}

/// Output of a user-triggered query, shown in a section's results region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "results", rename_all = "kebab-case")]
pub enum Results {
    Search {
        kind: SearchKind,
        query: String,
        records: Vec<DisplayRecord>,
    },
    Geo {
        country: String,
        artists: Vec<DisplayRecord>,
        tracks: Vec<DisplayRecord>,
    },
    Tag {
        tag: String,
        artists: Vec<DisplayRecord>,
        tracks: Vec<DisplayRecord>,
    },
}

use super::model::{Results, View};
use super::normalize::{self, UserProfile};
use crate::relay::Endpoint;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

pub const DASHBOARD_LIMIT: u32 = 5;
pub const SECTION_LIMIT: u32 = 50;
pub const SEARCH_LIMIT: u32 = 20;
pub const EXPLORE_LIMIT: u32 = 10;
pub const TOP_TAGS_SHOWN: usize = 50;
pub const DEFAULT_COUNTRY: &str = "United States";

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Dashboard,
    UserInfo,
    RecentTracks,
    TopArtists,
    TopAlbums,
    TopTracks,
    LovedTracks,
    ArtistSearch,
    TrackSearch,
    AlbumSearch,
    ChartArtists,
    ChartTracks,
    GeoCharts,
    TopTags,
    TagExplore,
}

impl Section {
    pub const ALL: [Section; 15] = [
        Section::Dashboard,
        Section::UserInfo,
        Section::RecentTracks,
        Section::TopArtists,
        Section::TopAlbums,
        Section::TopTracks,
        Section::LovedTracks,
        Section::ArtistSearch,
        Section::TrackSearch,
        Section::AlbumSearch,
        Section::ChartArtists,
        Section::ChartTracks,
        Section::GeoCharts,
        Section::TopTags,
        Section::TagExplore,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::UserInfo => "user-info",
            Section::RecentTracks => "recent-tracks",
            Section::TopArtists => "top-artists",
            Section::TopAlbums => "top-albums",
            Section::TopTracks => "top-tracks",
            Section::LovedTracks => "loved-tracks",
            Section::ArtistSearch => "artist-search",
            Section::TrackSearch => "track-search",
            Section::AlbumSearch => "album-search",
            Section::ChartArtists => "chart-artists",
            Section::ChartTracks => "chart-tracks",
            Section::GeoCharts => "geo-charts",
            Section::TopTags => "top-tags",
            Section::TagExplore => "tag-explore",
        }
    }

    /// Unknown identifiers land on the dashboard.
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|section| section.id() == id)
            .unwrap_or_default()
    }

    pub const fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::UserInfo => "User Profile",
            Section::RecentTracks => "Recent Tracks",
            Section::TopArtists => "Top Artists",
            Section::TopAlbums => "Top Albums",
            Section::TopTracks => "Top Tracks",
            Section::LovedTracks => "Loved Tracks",
            Section::ArtistSearch => "Artist Search",
            Section::TrackSearch => "Track Search",
            Section::AlbumSearch => "Album Search",
            Section::ChartArtists => "Chart: Top Artists",
            Section::ChartTracks => "Chart: Top Tracks",
            Section::GeoCharts => "Charts by Country",
            Section::TopTags => "Top Tags",
            Section::TagExplore => "Explore by Tag",
        }
    }

    pub const fn subtitle(self) -> &'static str {
        match self {
            Section::Dashboard => "Your music overview",
            Section::UserInfo => "Your Last.fm profile information",
            Section::RecentTracks => "Your listening history",
            Section::TopArtists => "Your most listened artists",
            Section::TopAlbums => "Your most played albums",
            Section::TopTracks => "Your favorite songs",
            Section::LovedTracks => "Tracks you have loved",
            Section::ArtistSearch => "Search for artists",
            Section::TrackSearch => "Search for tracks",
            Section::AlbumSearch => "Search for albums",
            Section::ChartArtists => "Global top artists",
            Section::ChartTracks => "Global top tracks",
            Section::GeoCharts => "Top music by location",
            Section::TopTags => "Popular music tags and genres",
            Section::TagExplore => "Discover music by genre",
        }
    }

    pub fn plan(self, user: &str, params: &SectionParams) -> Vec<RelayCall> {
        let period = params.period.as_str();
        match self {
            Section::Dashboard => vec![
                RelayCall::new(Endpoint::UserInfo).with("user", user),
                RelayCall::new(Endpoint::UserRecentTracks)
                    .with("user", user)
                    .with("limit", DASHBOARD_LIMIT),
                RelayCall::new(Endpoint::UserTopArtists)
                    .with("user", user)
                    .with("period", Period::SevenDay.as_str())
                    .with("limit", DASHBOARD_LIMIT),
                RelayCall::new(Endpoint::UserTopTracks)
                    .with("user", user)
                    .with("period", Period::SevenDay.as_str())
                    .with("limit", DASHBOARD_LIMIT),
            ],
            Section::UserInfo => vec![RelayCall::new(Endpoint::UserInfo).with("user", user)],
            Section::RecentTracks => vec![
                RelayCall::new(Endpoint::UserRecentTracks)
                    .with("user", user)
                    .with("limit", SECTION_LIMIT),
            ],
            Section::TopArtists => vec![user_top(Endpoint::UserTopArtists, user, period)],
            Section::TopAlbums => vec![user_top(Endpoint::UserTopAlbums, user, period)],
            Section::TopTracks => vec![user_top(Endpoint::UserTopTracks, user, period)],
            Section::LovedTracks => vec![
                RelayCall::new(Endpoint::UserLovedTracks)
                    .with("user", user)
                    .with("limit", SECTION_LIMIT),
            ],
            Section::ArtistSearch | Section::TrackSearch | Section::AlbumSearch => Vec::new(),
            Section::ChartArtists => {
                vec![RelayCall::new(Endpoint::ChartTopArtists).with("limit", SECTION_LIMIT)]
            }
            Section::ChartTracks => {
                vec![RelayCall::new(Endpoint::ChartTopTracks).with("limit", SECTION_LIMIT)]
            }
            Section::GeoCharts => Query::Geo(params.country().to_string()).plan(),
            Section::TopTags => vec![RelayCall::new(Endpoint::TagTop)],
            Section::TagExplore => match &params.tag {
                Some(tag) => Query::Tag(tag.clone()).plan(),
                None => Vec::new(),
            },
        }
    }

    /// `payloads` arrive in [`Section::plan`] order.
    pub fn build(self, params: &SectionParams, payloads: &[Value]) -> View {
        let payload = |index: usize| payloads.get(index).unwrap_or(&NULL);

        match self {
            Section::Dashboard => {
                let recent = normalize::recent_tracks(&normalize::list_at(
                    payload(1),
                    "/recenttracks/track",
                ));
                View::Dashboard {
                    profile: UserProfile::from_payload(payload(0)),
                    now_playing: normalize::now_playing(&recent),
                    recent,
                    top_artists: normalize::artists(&normalize::list_at(
                        payload(2),
                        "/topartists/artist",
                    )),
                    top_tracks: normalize::tracks(&normalize::list_at(
                        payload(3),
                        "/toptracks/track",
                    )),
                }
            }
            Section::UserInfo => View::Profile {
                profile: UserProfile::from_payload(payload(0)),
            },
            Section::RecentTracks => {
                let tracks = normalize::recent_tracks(&normalize::list_at(
                    payload(0),
                    "/recenttracks/track",
                ));
                View::RecentTracks {
                    now_playing: normalize::now_playing(&tracks),
                    tracks,
                }
            }
            Section::TopArtists => View::TopArtists {
                period: params.period,
                artists: normalize::artists(&normalize::list_at(payload(0), "/topartists/artist")),
            },
            Section::TopAlbums => View::TopAlbums {
                period: params.period,
                albums: normalize::albums(&normalize::list_at(payload(0), "/topalbums/album")),
            },
            Section::TopTracks => View::TopTracks {
                period: params.period,
                tracks: normalize::tracks(&normalize::list_at(payload(0), "/toptracks/track")),
            },
            Section::LovedTracks => View::LovedTracks {
                tracks: normalize::tracks(&normalize::list_at(payload(0), "/lovedtracks/track")),
            },
            Section::ArtistSearch => View::SearchForm {
                kind: SearchKind::Artist,
            },
            Section::TrackSearch => View::SearchForm {
                kind: SearchKind::Track,
            },
            Section::AlbumSearch => View::SearchForm {
                kind: SearchKind::Album,
            },
            Section::ChartArtists => View::ChartArtists {
                artists: normalize::artists(&normalize::list_at(payload(0), "/artists/artist")),
            },
            Section::ChartTracks => View::ChartTracks {
                tracks: normalize::tracks(&normalize::list_at(payload(0), "/tracks/track")),
            },
            Section::GeoCharts => {
                let country = params.country().to_string();
                View::GeoCharts {
                    results: Query::Geo(country.clone()).build(payloads),
                    country,
                }
            }
            Section::TopTags => {
                let mut items = normalize::list_at(payload(0), "/toptags/tag");
                items.truncate(TOP_TAGS_SHOWN);
                View::TopTags {
                    tags: normalize::tags(&items),
                }
            }
            Section::TagExplore => View::TagExplore {
                tag: params.tag.clone(),
                results: params
                    .tag
                    .as_ref()
                    .map(|tag| Query::Tag(tag.clone()).build(payloads)),
            },
        }
    }
}

fn user_top(endpoint: Endpoint, user: &str, period: &str) -> RelayCall {
    RelayCall::new(endpoint)
        .with("user", user)
        .with("period", period)
        .with("limit", SECTION_LIMIT)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Period {
    #[default]
    #[serde(rename = "overall")]
    Overall,
    #[serde(rename = "7day")]
    SevenDay,
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3month")]
    ThreeMonths,
    #[serde(rename = "6month")]
    SixMonths,
    #[serde(rename = "12month")]
    TwelveMonths,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Overall,
        Period::SevenDay,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::TwelveMonths,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Period::Overall => "overall",
            Period::SevenDay => "7day",
            Period::OneMonth => "1month",
            Period::ThreeMonths => "3month",
            Period::SixMonths => "6month",
            Period::TwelveMonths => "12month",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Period::Overall => "All Time",
            Period::SevenDay => "Last 7 Days",
            Period::OneMonth => "Last Month",
            Period::ThreeMonths => "Last 3 Months",
            Period::SixMonths => "Last 6 Months",
            Period::TwelveMonths => "Last Year",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == value)
            .ok_or_else(|| format!("unknown period '{value}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Artist,
    Track,
    Album,
}

impl SearchKind {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "artist" => Some(SearchKind::Artist),
            "track" => Some(SearchKind::Track),
            "album" => Some(SearchKind::Album),
            _ => None,
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            SearchKind::Artist => "artist",
            SearchKind::Track => "track",
            SearchKind::Album => "album",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionParams {
    pub period: Period,
    pub country: Option<String>,
    pub tag: Option<String>,
}

impl SectionParams {
    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or(DEFAULT_COUNTRY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayCall {
    pub endpoint: Endpoint,
    pub params: Vec<(&'static str, String)>,
}

impl RelayCall {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn query(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }
}

/// Lookups that fill a results region without changing the section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Search(SearchKind, String),
    Geo(String),
    Tag(String),
}

impl Query {
    pub fn plan(&self) -> Vec<RelayCall> {
        match self {
            Query::Search(kind, term) => {
                let endpoint = match kind {
                    SearchKind::Artist => Endpoint::ArtistSearch,
                    SearchKind::Track => Endpoint::TrackSearch,
                    SearchKind::Album => Endpoint::AlbumSearch,
                };
                vec![
                    RelayCall::new(endpoint)
                        .with(kind.id(), term)
                        .with("limit", SEARCH_LIMIT),
                ]
            }
            Query::Geo(country) => vec![
                RelayCall::new(Endpoint::GeoTopArtists)
                    .with("country", country)
                    .with("limit", EXPLORE_LIMIT),
                RelayCall::new(Endpoint::GeoTopTracks)
                    .with("country", country)
                    .with("limit", EXPLORE_LIMIT),
            ],
            Query::Tag(tag) => vec![
                RelayCall::new(Endpoint::TagTopArtists)
                    .with("tag", tag)
                    .with("limit", EXPLORE_LIMIT),
                RelayCall::new(Endpoint::TagTopTracks)
                    .with("tag", tag)
                    .with("limit", EXPLORE_LIMIT),
            ],
        }
    }

    pub fn build(&self, payloads: &[Value]) -> Results {
        let payload = |index: usize| payloads.get(index).unwrap_or(&NULL);

        match self {
            Query::Search(kind, term) => {
                let records = match kind {
                    SearchKind::Artist => normalize::artists(&normalize::list_at(
                        payload(0),
                        "/results/artistmatches/artist",
                    )),
                    SearchKind::Track => normalize::tracks(&normalize::list_at(
                        payload(0),
                        "/results/trackmatches/track",
                    )),
                    SearchKind::Album => normalize::albums(&normalize::list_at(
                        payload(0),
                        "/results/albummatches/album",
                    )),
                };
                Results::Search {
                    kind: *kind,
                    query: term.clone(),
                    records,
                }
            }
            Query::Geo(country) => Results::Geo {
                country: country.clone(),
                artists: normalize::artists(&normalize::list_at(payload(0), "/topartists/artist")),
                tracks: normalize::tracks(&normalize::list_at(payload(1), "/tracks/track")),
            },
            Query::Tag(tag) => Results::Tag {
                tag: tag.clone(),
                artists: normalize::artists(&normalize::list_at(payload(0), "/topartists/artist")),
                tracks: normalize::tracks(&normalize::list_at(payload(1), "/tracks/track")),
            },
        }
    }
}

use crate::lastfm::{LastFmClient, UpstreamError};
use axum::http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    MissingParam(&'static str),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingParam(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Required {
    pub fields: &'static [&'static str],
    pub message: &'static str,
}

const ARTIST: Required = Required {
    fields: &["artist"],
    message: "Artist name is required",
};
const TRACK_AND_ARTIST: Required = Required {
    fields: &["track", "artist"],
    message: "Track and artist names are required",
};
const ALBUM_AND_ARTIST: Required = Required {
    fields: &["album", "artist"],
    message: "Album and artist names are required",
};
const TAG: Required = Required {
    fields: &["tag"],
    message: "Tag name is required",
};
const ARTIST_TERM: Required = Required {
    fields: &["artist"],
    message: "Search term is required",
};
const TRACK_TERM: Required = Required {
    fields: &["track"],
    message: "Search term is required",
};
const ALBUM_TERM: Required = Required {
    fields: &["album"],
    message: "Search term is required",
};

const MISSING_USER: &str = "User is required";

const LIMIT: (&str, &str) = ("limit", "10");
const PERIOD: (&str, &str) = ("period", "overall");
const COUNTRY: (&str, &str) = ("country", "united states");

/// How a route treats `user`. Both variants that take one fall back to the
/// configured default user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserParam {
    None,
    Required,
    /// Forwarded when known, omitted otherwise.
    Optional,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteSpec {
    pub path: &'static str,
    pub method: &'static str,
    pub required: Option<Required>,
    pub user: UserParam,
    pub optional: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    UserInfo,
    UserRecentTracks,
    UserTopArtists,
    UserTopAlbums,
    UserTopTracks,
    UserLovedTracks,
    UserFriends,
    UserWeeklyArtists,
    UserWeeklyTracks,
    ArtistInfo,
    ArtistSimilar,
    ArtistTopTracks,
    ArtistTopAlbums,
    ArtistSearch,
    TrackInfo,
    TrackSimilar,
    TrackSearch,
    AlbumInfo,
    AlbumSearch,
    TagTop,
    TagInfo,
    TagTopArtists,
    TagTopTracks,
    ChartTopArtists,
    ChartTopTracks,
    ChartTopTags,
    GeoTopArtists,
    GeoTopTracks,
}

impl Endpoint {
    pub const ALL: [Endpoint; 28] = [
        Endpoint::UserInfo,
        Endpoint::UserRecentTracks,
        Endpoint::UserTopArtists,
        Endpoint::UserTopAlbums,
        Endpoint::UserTopTracks,
        Endpoint::UserLovedTracks,
        Endpoint::UserFriends,
        Endpoint::UserWeeklyArtists,
        Endpoint::UserWeeklyTracks,
        Endpoint::ArtistInfo,
        Endpoint::ArtistSimilar,
        Endpoint::ArtistTopTracks,
        Endpoint::ArtistTopAlbums,
        Endpoint::ArtistSearch,
        Endpoint::TrackInfo,
        Endpoint::TrackSimilar,
        Endpoint::TrackSearch,
        Endpoint::AlbumInfo,
        Endpoint::AlbumSearch,
        Endpoint::TagTop,
        Endpoint::TagInfo,
        Endpoint::TagTopArtists,
        Endpoint::TagTopTracks,
        Endpoint::ChartTopArtists,
        Endpoint::ChartTopTracks,
        Endpoint::ChartTopTags,
        Endpoint::GeoTopArtists,
        Endpoint::GeoTopTracks,
    ];

    pub const fn spec(self) -> RouteSpec {
        const fn route(
            path: &'static str,
            method: &'static str,
            required: Option<Required>,
            user: UserParam,
            optional: &'static [(&'static str, &'static str)],
        ) -> RouteSpec {
            RouteSpec {
                path,
                method,
                required,
                user,
                optional,
            }
        }

        match self {
            Endpoint::UserInfo => route(
                "/api/user/info",
                "user.getInfo",
                None,
                UserParam::Required,
                &[],
            ),
            Endpoint::UserRecentTracks => route(
                "/api/user/recent-tracks",
                "user.getRecentTracks",
                None,
                UserParam::Required,
                &[LIMIT, ("page", "1")],
            ),
            Endpoint::UserTopArtists => route(
                "/api/user/top-artists",
                "user.getTopArtists",
                None,
                UserParam::Required,
                &[PERIOD, LIMIT],
            ),
            Endpoint::UserTopAlbums => route(
                "/api/user/top-albums",
                "user.getTopAlbums",
                None,
                UserParam::Required,
                &[PERIOD, LIMIT],
            ),
            Endpoint::UserTopTracks => route(
                "/api/user/top-tracks",
                "user.getTopTracks",
                None,
                UserParam::Required,
                &[PERIOD, LIMIT],
            ),
            Endpoint::UserLovedTracks => route(
                "/api/user/loved-tracks",
                "user.getLovedTracks",
                None,
                UserParam::Required,
                &[LIMIT],
            ),
            Endpoint::UserFriends => route(
                "/api/user/friends",
                "user.getFriends",
                None,
                UserParam::Required,
                &[LIMIT],
            ),
            Endpoint::UserWeeklyArtists => route(
                "/api/user/weekly-artists",
                "user.getWeeklyArtistChart",
                None,
                UserParam::Required,
                &[],
            ),
            Endpoint::UserWeeklyTracks => route(
                "/api/user/weekly-tracks",
                "user.getWeeklyTrackChart",
                None,
                UserParam::Required,
                &[],
            ),
            Endpoint::ArtistInfo => route(
                "/api/artist/info",
                "artist.getInfo",
                Some(ARTIST),
                UserParam::Optional,
                &[],
            ),
            Endpoint::ArtistSimilar => route(
                "/api/artist/similar",
                "artist.getSimilar",
                Some(ARTIST),
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::ArtistTopTracks => route(
                "/api/artist/top-tracks",
                "artist.getTopTracks",
                Some(ARTIST),
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::ArtistTopAlbums => route(
                "/api/artist/top-albums",
                "artist.getTopAlbums",
                Some(ARTIST),
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::ArtistSearch => route(
                "/api/artist/search",
                "artist.search",
                Some(ARTIST_TERM),
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::TrackInfo => route(
                "/api/track/info",
                "track.getInfo",
                Some(TRACK_AND_ARTIST),
                UserParam::Optional,
                &[],
            ),
            Endpoint::TrackSimilar => route(
                "/api/track/similar",
                "track.getSimilar",
                Some(TRACK_AND_ARTIST),
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::TrackSearch => route(
                "/api/track/search",
                "track.search",
                Some(TRACK_TERM),
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::AlbumInfo => route(
                "/api/album/info",
                "album.getInfo",
                Some(ALBUM_AND_ARTIST),
                UserParam::None,
                &[],
            ),
            Endpoint::AlbumSearch => route(
                "/api/album/search",
                "album.search",
                Some(ALBUM_TERM),
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::TagTop => {
                route("/api/tag/top", "tag.getTopTags", None, UserParam::None, &[])
            }
            Endpoint::TagInfo => {
                route("/api/tag/info", "tag.getInfo", Some(TAG), UserParam::None, &[])
            }
            Endpoint::TagTopArtists => route(
                "/api/tag/top-artists",
                "tag.getTopArtists",
                Some(TAG),
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::TagTopTracks => route(
                "/api/tag/top-tracks",
                "tag.getTopTracks",
                Some(TAG),
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::ChartTopArtists => route(
                "/api/chart/top-artists",
                "chart.getTopArtists",
                None,
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::ChartTopTracks => route(
                "/api/chart/top-tracks",
                "chart.getTopTracks",
                None,
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::ChartTopTags => route(
                "/api/chart/top-tags",
                "chart.getTopTags",
                None,
                UserParam::None,
                &[LIMIT],
            ),
            Endpoint::GeoTopArtists => route(
                "/api/geo/top-artists",
                "geo.getTopArtists",
                None,
                UserParam::None,
                &[COUNTRY, LIMIT],
            ),
            Endpoint::GeoTopTracks => route(
                "/api/geo/top-tracks",
                "geo.getTopTracks",
                None,
                UserParam::None,
                &[COUNTRY, LIMIT],
            ),
        }
    }

    pub fn path(self) -> &'static str {
        self.spec().path
    }

    pub fn method(self) -> &'static str {
        self.spec().method
    }

    /// Empty strings count as absent.
    pub fn resolve(
        self,
        query: &HashMap<String, String>,
        default_user: Option<&str>,
    ) -> Result<Vec<(&'static str, String)>, RelayError> {
        let spec = self.spec();
        let lookup = |name: &str| {
            query
                .get(name)
                .map(String::as_str)
                .filter(|value| !value.is_empty())
        };

        let mut params = Vec::new();

        if let Some(required) = spec.required {
            for field in required.fields {
                match lookup(*field) {
                    Some(value) => params.push((*field, value.to_string())),
                    None => return Err(RelayError::MissingParam(required.message)),
                }
            }
        }

        let user = lookup("user").or(default_user.filter(|user| !user.is_empty()));
        match (spec.user, user) {
            (UserParam::None, _) | (UserParam::Optional, None) => {}
            (UserParam::Required, None) => return Err(RelayError::MissingParam(MISSING_USER)),
            (UserParam::Required | UserParam::Optional, Some(user)) => {
                params.push(("user", user.to_string()));
            }
        }

        for (name, default) in spec.optional {
            let value = lookup(*name).unwrap_or(*default);
            params.push((*name, value.to_string()));
        }

        Ok(params)
    }
}

#[derive(Debug, Clone)]
pub struct RelayService {
    client: LastFmClient,
    default_user: Option<String>,
}

impl RelayService {
    pub fn new(client: LastFmClient, default_user: Option<String>) -> Self {
        Self {
            client,
            default_user,
        }
    }

    pub fn default_user(&self) -> Option<&str> {
        self.default_user.as_deref()
    }

    pub async fn dispatch(
        &self,
        endpoint: Endpoint,
        query: &HashMap<String, String>,
    ) -> Result<Value, RelayError> {
        let params = endpoint.resolve(query, self.default_user())?;
        let payload = self.client.call(endpoint.method(), &params).await?;
        info!(path = endpoint.path(), method = endpoint.method(), "relayed");
        Ok(payload)
    }
}

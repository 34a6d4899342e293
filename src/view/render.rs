//! HTML fragments for the browser shell. Every piece of upstream text goes
//! through [`esc`] or [`attr`] before it is placed in markup.

use super::format;
use super::model::{Results, View};
use super::normalize::{DisplayRecord, ImageSize, NowPlaying, UserProfile};
use super::section::{Period, SearchKind, Section};
use super::session::{LoadState, Session};

const DOCS_ORIGIN: &str = "http://localhost:3000";
const AVATAR_PLACEHOLDER: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Crect fill='%231a1a26' width='100' height='100'/%3E%3Ctext x='50' y='50' dominant-baseline='central' text-anchor='middle' fill='%23666' font-size='40'%3E%3F%3C/text%3E%3C/svg%3E";

fn esc(text: &str) -> String {
    htmlescape::encode_minimal(text)
}

fn attr(text: &str) -> String {
    htmlescape::encode_attribute(text)
}

/// The main content region for a session after a section load.
pub fn session(session: &Session) -> String {
    let body = match &session.load {
        LoadState::Idle => username_prompt(),
        LoadState::Loading => loading_state(),
        LoadState::Errored(message) => error_state(message),
        LoadState::Rendered(view) => self::view(view, session.user.as_deref().unwrap_or_default()),
    };
    format!("{}{body}", heading(session.section))
}

fn heading(section: Section) -> String {
    format!(
        r#"<div class="page-heading" data-section="{id}"><h1 class="page-title">{title}</h1><p class="page-subtitle">{subtitle}</p></div>"#,
        id = section.id(),
        title = esc(section.title()),
        subtitle = esc(section.subtitle()),
    )
}

pub fn loading_state() -> String {
    r#"<div class="loading-state"><div class="loading-spinner"><i class="fas fa-spinner fa-spin"></i></div><p>Loading...</p></div>"#.to_string()
}

pub fn error_state(message: &str) -> String {
    format!(
        r#"<div class="error-state">
    <i class="fas fa-exclamation-triangle"></i>
    <h3>Something went wrong</h3>
    <p>{}</p>
    <button onclick="location.reload()" class="retry-btn"><i class="fas fa-redo"></i> Retry</button>
</div>"#,
        esc(message)
    )
}

fn username_prompt() -> String {
    r#"<div class="username-prompt">
    <h2>Welcome to Last.fm Explorer</h2>
    <p>Enter your Last.fm username to get started</p>
</div>"#
        .to_string()
}

fn empty_state(icon: &str, text: &str) -> String {
    format!(r#"<div class="empty-state"><i class="fas {icon}"></i><p>{text}</p></div>"#)
}

fn card(icon: &str, title: &str, list_class: &str, body: &str) -> String {
    format!(
        r#"<div class="card">
    <div class="card-header"><h3 class="card-title"><i class="fas {icon}"></i> {title}</h3></div>
    <div class="{list_class}">{body}</div>
</div>"#
    )
}

pub fn view(view: &View, user: &str) -> String {
    match view {
        View::Dashboard {
            profile,
            recent,
            top_artists,
            top_tracks,
            now_playing,
        } => {
            let stats = [
                ("fa-play", format::count(profile.play_count), "Total Scrobbles"),
                ("fa-users", format::count(profile.artist_count), "Artists"),
                ("fa-music", format::count(profile.track_count), "Tracks"),
                ("fa-calendar-alt", format::date(profile.registered), "Member Since"),
            ]
            .iter()
            .map(|(icon, value, label)| {
                format!(
                    r#"<div class="stat-card"><div class="stat-icon"><i class="fas {icon}"></i></div><div class="stat-value">{}</div><div class="stat-label">{label}</div></div>"#,
                    esc(value)
                )
            })
            .collect::<String>();

            format!(
                r#"{indicator}<div class="stats-grid">{stats}</div>
<div class="data-grid">{recent}{artists}{tracks}</div>"#,
                indicator = now_playing.as_ref().map(self::now_playing).unwrap_or_default(),
                recent = card("fa-clock", "Recent Tracks", "item-list", &track_list(recent, true)),
                artists = card(
                    "fa-star",
                    "Top Artists (7 Days)",
                    "item-list",
                    &artist_list(top_artists)
                ),
                tracks = card(
                    "fa-music",
                    "Top Tracks (7 Days)",
                    "item-list",
                    &track_list(top_tracks, false)
                ),
            )
        }
        View::Profile { profile } => format!("{}{}", profile_panel(profile), api_docs(&user_info_docs(user))),
        View::RecentTracks {
            tracks,
            now_playing,
        } => format!(
            "{}{}{}",
            now_playing.as_ref().map(self::now_playing).unwrap_or_default(),
            card(
                "fa-clock",
                "Recent Tracks",
                "item-list scrollable",
                &track_list(tracks, true)
            ),
            api_docs(&recent_tracks_docs(user)),
        ),
        View::TopArtists { period, artists } => format!(
            "{}{}{}",
            period_filter(Section::TopArtists, *period),
            card("fa-star", "Top Artists", "data-grid", &artist_cards(artists)),
            api_docs(&top_artists_docs(user)),
        ),
        View::TopAlbums { period, albums } => format!(
            "{}{}",
            period_filter(Section::TopAlbums, *period),
            card("fa-compact-disc", "Top Albums", "data-grid", &album_cards(albums)),
        ),
        View::TopTracks { period, tracks } => format!(
            "{}{}",
            period_filter(Section::TopTracks, *period),
            card(
                "fa-music",
                "Top Tracks",
                "item-list scrollable",
                &track_list(tracks, false)
            ),
        ),
        View::LovedTracks { tracks } => card(
            "fa-heart",
            "Loved Tracks",
            "item-list scrollable",
            &loved_list(tracks),
        ),
        View::SearchForm { kind } => search_form(*kind),
        View::ChartArtists { artists } => card(
            "fa-chart-bar",
            "Global Top Artists",
            "data-grid",
            &artist_cards(artists),
        ),
        View::ChartTracks { tracks } => card(
            "fa-chart-line",
            "Global Top Tracks",
            "item-list scrollable",
            &track_list(tracks, false),
        ),
        View::GeoCharts { country, results } => format!(
            r#"{form}<div id="geoResults" class="geo-results">{results}</div>"#,
            form = input_form(
                "fa-globe",
                "countryInput",
                "Enter country name (e.g., United States, Japan)...",
                country,
                "geoSearchBtn",
                "Get Charts"
            ),
            results = self::results(results),
        ),
        View::TopTags { tags } => card("fa-tags", "Popular Tags", "tags-cloud", &tag_cloud(tags)),
        View::TagExplore { tag, results } => format!(
            r#"{form}<div id="tagResults" class="tag-results">{results}</div>"#,
            form = input_form(
                "fa-tag",
                "tagInput",
                "Enter a tag/genre (e.g., rock, electronic, jazz)...",
                tag.as_deref().unwrap_or_default(),
                "tagSearchBtn",
                "Explore"
            ),
            results = results.as_ref().map(self::results).unwrap_or_default(),
        ),
    }
}

/// Content for a results region (search, geo charts, tag explore).
pub fn results(results: &Results) -> String {
    match results {
        Results::Search {
            kind,
            query,
            records,
        } => {
            let title = format!(r#"Results for "{}""#, query);
            let (list_class, body) = match kind {
                SearchKind::Artist => ("data-grid", artist_cards(records)),
                SearchKind::Track => ("item-list scrollable", track_list(records, false)),
                SearchKind::Album => ("data-grid", album_cards(records)),
            };
            card("fa-search", &esc(&title), list_class, &body)
        }
        Results::Geo {
            country,
            artists,
            tracks,
        } => paired_lists(
            &format!("Top Artists in {}", esc(country)),
            artists,
            &format!("Top Tracks in {}", esc(country)),
            tracks,
        ),
        Results::Tag {
            tag,
            artists,
            tracks,
        } => paired_lists(
            &format!("Top {} Artists", esc(tag)),
            artists,
            &format!("Top {} Tracks", esc(tag)),
            tracks,
        ),
    }
}

fn paired_lists(
    artists_title: &str,
    artists: &[DisplayRecord],
    tracks_title: &str,
    tracks: &[DisplayRecord],
) -> String {
    format!(
        r#"<div class="data-grid">{}{}</div>"#,
        card("fa-star", artists_title, "item-list", &artist_list(artists)),
        card("fa-music", tracks_title, "item-list", &track_list(tracks, false)),
    )
}

/// Hidden carrier for the sidebar now-playing indicator; the shell moves its
/// content into place.
pub fn now_playing(now_playing: &NowPlaying) -> String {
    let (active, content) = match now_playing {
        NowPlaying::Playing { track, artist } => (
            true,
            format!(r#"<i class="fas fa-music"></i> {} - {}"#, esc(track), esc(artist)),
        ),
        NowPlaying::Last { track } => (
            false,
            format!(r#"<i class="fas fa-clock"></i> Last: {}"#, esc(track)),
        ),
    };
    format!(r#"<template class="now-playing-update" data-active="{active}">{content}</template>"#)
}

fn image_or_placeholder(src: Option<&str>, alt: &str, icon: &str) -> String {
    match src {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            attr(src),
            attr(alt)
        ),
        None => format!(r#"<div class="item-placeholder"><i class="fas {icon}"></i></div>"#),
    }
}

fn stat(icon: &str, value: Option<u64>) -> String {
    value
        .map(|value| {
            format!(
                r#"<span class="item-stat"><i class="fas {icon}"></i> <span class="value">{}</span></span>"#,
                format::count(value)
            )
        })
        .unwrap_or_default()
}

fn stats_row(stats: &str) -> String {
    if stats.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="item-stats">{stats}</div>"#)
    }
}

fn rank(record: &DisplayRecord) -> String {
    format!(r##"<div class="item-rank">#{}</div>"##, record.rank)
}

pub fn track_list(tracks: &[DisplayRecord], show_now_playing: bool) -> String {
    if tracks.is_empty() {
        return empty_state("fa-music", "No tracks found");
    }
    tracks
        .iter()
        .map(|track| {
            let playing = show_now_playing && track.now_playing;
            let marker = if playing {
                r#"<span class="now-playing-badge"><i class="fas fa-broadcast-tower"></i> Now Playing</span>"#
                    .to_string()
            } else {
                rank(track)
            };
            format!(
                r#"<div class="item-card{class}"><div class="item-image">{image}</div><div class="item-info">{marker}<div class="item-name">{name}</div><div class="item-artist">{artist}</div>{stats}</div></div>"#,
                class = if playing { " now-playing" } else { "" },
                image = image_or_placeholder(track.image(ImageSize::Medium), &track.name, "fa-music"),
                name = esc(&track.name),
                artist = esc(track.artist.as_deref().unwrap_or_default()),
                stats = stats_row(&stat("fa-play", track.play_count)),
            )
        })
        .collect()
}

fn loved_list(tracks: &[DisplayRecord]) -> String {
    if tracks.is_empty() {
        return empty_state("fa-heart-broken", "No loved tracks found");
    }
    tracks
        .iter()
        .map(|track| {
            format!(
                r#"<div class="item-card"><div class="item-image">{image}</div><div class="item-info">{rank}<div class="item-name">{name}</div><div class="item-artist">{artist}</div></div></div>"#,
                image = image_or_placeholder(track.image(ImageSize::Medium), &track.name, "fa-music"),
                rank = rank(track),
                name = esc(&track.name),
                artist = esc(track.artist.as_deref().unwrap_or_default()),
            )
        })
        .collect()
}

/// Compact artist rows (dashboard, geo and tag panels).
pub fn artist_list(artists: &[DisplayRecord]) -> String {
    if artists.is_empty() {
        return empty_state("fa-user", "No artists found");
    }
    artists
        .iter()
        .map(|artist| {
            format!(
                r#"<div class="item-card"><div class="item-image">{image}</div><div class="item-info">{rank}<div class="item-name">{name}</div>{stats}</div></div>"#,
                image = image_or_placeholder(artist.image(ImageSize::Medium), &artist.name, "fa-user"),
                rank = rank(artist),
                name = esc(&artist.name),
                stats = stats_row(&stat("fa-play", artist.play_count)),
            )
        })
        .collect()
}

pub fn artist_cards(artists: &[DisplayRecord]) -> String {
    if artists.is_empty() {
        return empty_state("fa-user", "No artists found");
    }
    artists
        .iter()
        .map(|artist| {
            format!(
                r#"<div class="item-card"><div class="item-image">{image}</div><div class="item-info">{rank}<div class="item-name">{name}</div><div class="item-stats">{plays}{listeners}</div></div></div>"#,
                image = image_or_placeholder(artist.image(ImageSize::Large), &artist.name, "fa-user"),
                rank = rank(artist),
                name = esc(&artist.name),
                plays = stat("fa-play", artist.play_count),
                listeners = stat("fa-headphones", artist.listeners),
            )
        })
        .collect()
}

pub fn album_cards(albums: &[DisplayRecord]) -> String {
    if albums.is_empty() {
        return empty_state("fa-compact-disc", "No albums found");
    }
    albums
        .iter()
        .map(|album| {
            format!(
                r#"<div class="item-card"><div class="item-image">{image}</div><div class="item-info">{rank}<div class="item-name">{name}</div><div class="item-artist">{artist}</div>{stats}</div></div>"#,
                image = image_or_placeholder(album.image(ImageSize::Large), &album.name, "fa-compact-disc"),
                rank = rank(album),
                name = esc(&album.name),
                artist = esc(album.artist.as_deref().unwrap_or_default()),
                stats = stats_row(&stat("fa-play", album.play_count)),
            )
        })
        .collect()
}

fn tag_cloud(tags: &[DisplayRecord]) -> String {
    if tags.is_empty() {
        return empty_state("fa-tags", "No tags found");
    }
    tags.iter()
        .map(|tag| {
            format!(
                r#"<span class="tag-item" data-tag="{}"><i class="fas fa-tag"></i> {}</span>"#,
                attr(&tag.name),
                esc(&tag.name)
            )
        })
        .collect()
}

fn profile_panel(profile: &UserProfile) -> String {
    let meta = [
        (profile.play_count, "Scrobbles"),
        (profile.artist_count, "Artists"),
        (profile.album_count, "Albums"),
        (profile.track_count, "Tracks"),
    ]
    .iter()
    .map(|(value, label)| {
        format!(
            r#"<div class="user-meta-item"><div class="user-meta-value">{}</div><div class="user-meta-label">{label}</div></div>"#,
            format::count(*value)
        )
    })
    .collect::<String>();

    let real_name = profile
        .real_name
        .as_deref()
        .map(|name| format!(r#"<p class="user-real-name">{}</p>"#, esc(name)))
        .unwrap_or_default();
    let link = profile
        .url
        .as_deref()
        .map(|url| {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener" class="detail-link"><i class="fas fa-external-link-alt"></i> View on Last.fm</a>"#,
                attr(url)
            )
        })
        .unwrap_or_else(|| "Not available".to_string());

    format!(
        r#"<div class="user-profile">
    <div class="user-avatar"><img src="{avatar}" alt="{alt}"></div>
    <div class="user-details"><h2>{name}</h2>{real_name}<div class="user-meta">{meta}</div></div>
</div>
<div class="card">
    <div class="card-header"><h3 class="card-title"><i class="fas fa-info-circle"></i> Profile Details</h3></div>
    <div class="details-grid">
        <div class="detail-item"><span class="detail-label">Country</span><span class="detail-value">{country}</span></div>
        <div class="detail-item"><span class="detail-label">Member Since</span><span class="detail-value">{since}</span></div>
        <div class="detail-item"><span class="detail-label">Profile URL</span>{link}</div>
    </div>
</div>"#,
        avatar = attr(profile.avatar().unwrap_or(AVATAR_PLACEHOLDER)),
        alt = attr(&profile.name),
        name = esc(&profile.name),
        country = esc(profile.country.as_deref().unwrap_or("Not specified")),
        since = format::date(profile.registered),
    )
}

fn period_filter(section: Section, selected: Period) -> String {
    let options: String = Period::ALL
        .iter()
        .map(|period| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                period.as_str(),
                if *period == selected { " selected" } else { "" },
                period.label()
            )
        })
        .collect();
    format!(
        r#"<div class="period-filter"><select id="periodFilter" class="filter-select" data-section="{}">{options}</select></div>"#,
        section.id()
    )
}

fn input_form(icon: &str, input_id: &str, placeholder: &str, value: &str, button_id: &str, label: &str) -> String {
    format!(
        r#"<div class="search-box">
    <div class="search-input-wrapper"><i class="fas {icon} search-icon"></i><input type="text" id="{input_id}" class="search-input" placeholder="{placeholder}" value="{value}"></div>
    <button id="{button_id}" class="search-btn"><i class="fas fa-search"></i> {label}</button>
</div>"#,
        placeholder = attr(placeholder),
        value = attr(value),
    )
}

fn search_form(kind: SearchKind) -> String {
    let id = kind.id();
    format!(
        r#"{}<div id="searchResults" class="search-results" data-kind="{id}"></div>"#,
        input_form(
            "fa-search",
            &format!("{id}SearchInput"),
            &format!("Search for a{} {id}...", if kind == SearchKind::Album { "n" } else { "" }),
            "",
            &format!("{id}SearchBtn"),
            "Search",
        )
    )
}

struct ApiParam {
    name: &'static str,
    kind: &'static str,
    required: bool,
    description: &'static str,
}

/// Collapsible reference panel showing how to call a relay route directly.
struct ApiDoc {
    endpoint: &'static str,
    params: Vec<ApiParam>,
    code: String,
    curl: String,
}

fn user_param(required: bool, description: &'static str) -> ApiParam {
    ApiParam {
        name: "user",
        kind: "string",
        required,
        description,
    }
}

fn user_info_docs(user: &str) -> ApiDoc {
    let user = urlencoding::encode(user);
    ApiDoc {
        endpoint: "/api/user/info?user=USERNAME",
        params: vec![user_param(true, "The Last.fm username to fetch info for")],
        code: format!(
            "// Fetch user information\nconst response = await fetch('/api/user/info?user={user}');\nconst data = await response.json();\n\nconsole.log(data.user.name);      // Username\nconsole.log(data.user.playcount); // Total scrobbles\nconsole.log(data.user.country);   // User country"
        ),
        curl: format!("curl \"{DOCS_ORIGIN}/api/user/info?user={user}\""),
    }
}

fn recent_tracks_docs(user: &str) -> ApiDoc {
    let user = urlencoding::encode(user);
    ApiDoc {
        endpoint: "/api/user/recent-tracks",
        params: vec![
            user_param(true, "The Last.fm username"),
            ApiParam {
                name: "limit",
                kind: "number",
                required: false,
                description: "Number of tracks to return (default: 10)",
            },
            ApiParam {
                name: "page",
                kind: "number",
                required: false,
                description: "Page number for pagination",
            },
        ],
        code: format!(
            "// Fetch recent tracks\nconst response = await fetch('/api/user/recent-tracks?user={user}&limit=10');\nconst data = await response.json();\n\n// Check for now playing\nconst nowPlaying = data.recenttracks.track[0]?.['@attr']?.nowplaying === 'true';"
        ),
        curl: format!("curl \"{DOCS_ORIGIN}/api/user/recent-tracks?user={user}&limit=10\""),
    }
}

fn top_artists_docs(user: &str) -> ApiDoc {
    let user = urlencoding::encode(user);
    ApiDoc {
        endpoint: "/api/user/top-artists",
        params: vec![
            user_param(true, "The Last.fm username"),
            ApiParam {
                name: "period",
                kind: "string",
                required: false,
                description: "Time period: overall, 7day, 1month, 3month, 6month, 12month",
            },
            ApiParam {
                name: "limit",
                kind: "number",
                required: false,
                description: "Number of artists to return (default: 10)",
            },
        ],
        code: format!(
            "// Fetch top artists for the last 7 days\nconst response = await fetch('/api/user/top-artists?user={user}&period=7day&limit=10');\nconst data = await response.json();\n\ndata.topartists.artist.forEach(artist => {{\n    console.log(artist.name, artist.playcount);\n}});"
        ),
        curl: format!(
            "curl \"{DOCS_ORIGIN}/api/user/top-artists?user={user}&period=overall&limit=10\""
        ),
    }
}

fn api_docs(doc: &ApiDoc) -> String {
    let rows: String = doc
        .params
        .iter()
        .map(|param| {
            let (class, label) = if param.required {
                ("param-required", "Required")
            } else {
                ("param-optional", "Optional")
            };
            format!(
                r#"<tr><td class="param-name">{}</td><td class="param-type">{}</td><td><span class="{class}">{label}</span></td><td>{}</td></tr>"#,
                param.name,
                param.kind,
                esc(param.description)
            )
        })
        .collect();

    format!(
        r#"<div class="api-docs">
    <button class="api-docs-toggle"><span class="toggle-text"><i class="fas fa-code"></i> View API Documentation &amp; Sample Code</span><i class="fas fa-chevron-down"></i></button>
    <div class="api-docs-content">
        <h4><i class="fas fa-link"></i> API Endpoint</h4>
        <div class="endpoint"><span class="method">GET</span><span class="url">{endpoint}</span></div>
        <h4><i class="fas fa-cog"></i> Parameters</h4>
        <table class="params-table"><thead><tr><th>Name</th><th>Type</th><th>Required</th><th>Description</th></tr></thead><tbody>{rows}</tbody></table>
        <h4><i class="fas fa-terminal"></i> JavaScript Example</h4>
        <div class="code-block"><pre>{code}</pre></div>
        <h4><i class="fas fa-file-code"></i> cURL Example</h4>
        <div class="code-block"><pre>{curl}</pre></div>
    </div>
</div>"#,
        endpoint = esc(doc.endpoint),
        code = esc(&doc.code),
        curl = esc(&doc.curl),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::normalize;
    use serde_json::json;

    fn track(name: &str, artist: &str) -> serde_json::Value {
        json!({ "name": name, "artist": { "#text": artist } })
    }

    #[test]
    fn text_is_escaped() {
        let raw = track("<script>alert(1)</script>", "AC/DC & Co");
        let html = track_list(&normalize::tracks(&[&raw]), false);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("AC/DC &amp; Co"));
    }

    #[test]
    fn now_playing_badge_replaces_rank() {
        let playing = json!({ "name": "Glory Box", "artist": { "#text": "Portishead" }, "@attr": { "nowplaying": "true" } });
        let other = track("Roads", "Portishead");
        let records = normalize::recent_tracks(&[&playing, &other]);

        let html = track_list(&records, true);
        assert!(html.contains("Now Playing"));
        assert!(!html.contains("#1<"));
        assert!(html.contains("#2<"));

        let html = track_list(&records, false);
        assert!(!html.contains("Now Playing"));
        assert!(html.contains("#1<"));
    }

    #[test]
    fn missing_counts_are_omitted_but_zero_is_shown() {
        let with_zero = json!({ "name": "A", "playcount": "0" });
        let without = json!({ "name": "B" });
        let html = artist_list(&normalize::artists(&[&with_zero]));
        assert!(html.contains(r#"<span class="value">0</span>"#));
        let html = artist_list(&normalize::artists(&[&without]));
        assert!(!html.contains("item-stats"));
    }

    #[test]
    fn empty_lists_show_empty_state() {
        assert!(track_list(&[], false).contains("No tracks found"));
        assert!(artist_cards(&[]).contains("No artists found"));
        assert!(album_cards(&[]).contains("No albums found"));
        assert!(loved_list(&[]).contains("No loved tracks found"));
    }

    #[test]
    fn errored_session_renders_only_error_panel() {
        let mut session = Session::with_user("rj");
        session.load = LoadState::Errored("Invalid API key".to_string());
        let html = self::session(&session);
        assert!(html.contains("Something went wrong"));
        assert!(html.contains("Invalid API key"));
        assert!(html.contains("Retry"));
        assert!(!html.contains("stats-grid"));
    }

    #[test]
    fn profile_uses_unknown_for_missing_registration() {
        let profile = UserProfile::from_payload(&json!({ "user": { "name": "rj" } }));
        let html = profile_panel(&profile);
        assert!(html.contains("Unknown"));
        assert!(html.contains("Not specified"));
    }

    #[test]
    fn tag_chips_carry_tag_name() {
        let tag = json!({ "name": "hip-hop" });
        let html = tag_cloud(&normalize::tags(&[&tag]));
        assert!(html.contains(r#"data-tag="hip&#x2d;hop""#) || html.contains(r#"data-tag="hip-hop""#));
    }

    #[test]
    fn period_filter_marks_selection() {
        let html = period_filter(Section::TopArtists, Period::OneMonth);
        assert!(html.contains(r#"<option value="1month" selected>"#));
        assert!(html.contains(r#"<option value="overall">"#));
    }
}

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::ApiError;

/// Which chart an item came from. Selects both the Last.fm method and the
/// per-kind image selection rule during layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Albums,
    Artists,
    Tracks,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Albums => write!(f, "albums"),
            ItemKind::Artists => write!(f, "artists"),
            ItemKind::Tracks => write!(f, "tracks"),
        }
    }
}

/// Last.fm chart period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    SevenDay,
    OneMonth,
    ThreeMonth,
    SixMonth,
    TwelveMonth,
    #[default]
    Overall,
}

impl Period {
    /// The wire value Last.fm expects in the `period` query parameter.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Period::SevenDay => "7day",
            Period::OneMonth => "1month",
            Period::ThreeMonth => "3month",
            Period::SixMonth => "6month",
            Period::TwelveMonth => "12month",
            Period::Overall => "overall",
        }
    }

    /// Human-readable label for tables and card headers.
    pub fn label(&self) -> &'static str {
        match self {
            Period::SevenDay => "Last 7 Days",
            Period::OneMonth => "Last Month",
            Period::ThreeMonth => "Last 3 Months",
            Period::SixMonth => "Last 6 Months",
            Period::TwelveMonth => "Last Year",
            Period::Overall => "All Time",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_api_str())
    }
}

/// Visual style of the rendered collage. Each variant maps to a fixed
/// bundle of gap, background, cell shape, and text overlay rules in the
/// template registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    #[default]
    Classic,
    Polaroid,
    Minimal,
    Mosaic,
    Vinyl,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::Classic,
        Template::Polaroid,
        Template::Minimal,
        Template::Mosaic,
        Template::Vinyl,
    ];
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Template::Classic => write!(f, "classic"),
            Template::Polaroid => write!(f, "polaroid"),
            Template::Minimal => write!(f, "minimal"),
            Template::Mosaic => write!(f, "mosaic"),
            Template::Vinyl => write!(f, "vinyl"),
        }
    }
}

/// Last.fm image size tags, ordered small to large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeTag {
    Unknown,
    Small,
    Medium,
    Large,
    ExtraLarge,
    Mega,
}

impl SizeTag {
    pub fn from_api_str(s: &str) -> Self {
        match s {
            "small" => SizeTag::Small,
            "medium" => SizeTag::Medium,
            "large" => SizeTag::Large,
            "extralarge" => SizeTag::ExtraLarge,
            "mega" => SizeTag::Mega,
            _ => SizeTag::Unknown,
        }
    }
}

/// One entry of an item's image list. The URL may still carry an insecure
/// scheme here; it is normalized before being attached to any cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub size: SizeTag,
    pub url: String,
}

/// An album, artist, or track record translated from the Last.fm wire
/// format. Identity is `(kind, name, primary_artist)`. Mutated exactly once
/// by the enrichment pipeline (image URL replacement only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub primary_artist: String,
    pub playcount: u64,
    pub rank: Option<u32>,
    /// Ordered ascending by size, as delivered by the API.
    pub images: Vec<ImageRef>,
    /// Parent-album images; populated only for tracks whose payload carried
    /// an album image list. Used by the track fallback selection rule.
    #[serde(default)]
    pub album_images: Vec<ImageRef>,
}

/// Grid shape of the collage. Square in the current CLI defaults, but the
/// engine accepts rectangular shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    width: u32,
    height: u32,
}

impl GridSpec {
    pub const MIN_SIDE: u32 = 2;
    pub const MAX_SIDE: u32 = 8;

    /// Builds a grid, rejecting sides outside `[2, 8]`.
    pub fn new(width: u32, height: u32) -> Result<Self, ApiError> {
        for side in [width, height] {
            if !(Self::MIN_SIDE..=Self::MAX_SIDE).contains(&side) {
                return Err(ApiError::Validation(format!(
                    "grid size must be between {} and {}, got {}",
                    Self::MIN_SIDE,
                    Self::MAX_SIDE,
                    side
                )));
            }
        }
        Ok(Self { width, height })
    }

    /// Square grid shorthand.
    pub fn square(side: u32) -> Result<Self, ApiError> {
        Self::new(side, side)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Requested item count; equals `width * height`, in `[4, 64]`.
    pub fn limit(&self) -> u32 {
        self.width * self.height
    }

    /// Presentation density class, a pure function of the cell count.
    pub fn density(&self) -> Density {
        match self.limit() {
            n if n > 36 => Density::VerySmall,
            n if n > 9 => Density::Small,
            _ => Density::Normal,
        }
    }
}

/// Presentation sizing class derived from the total cell count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Normal,
    Small,
    VerySmall,
}

/// One grid position bound to one item and one resolved secure image URL.
/// Derived by the layout engine, consumed read-only by the rasterizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Index into [`CollageResult::items`].
    pub item: usize,
    /// Secure-scheme image URL.
    pub image_url: String,
    pub row: u32,
    pub col: u32,
}

/// The sole artifact handed from layout to the rasterizer. Rebuilt fresh
/// per generation and discarded on the next one.
#[derive(Debug, Clone)]
pub struct CollageResult {
    pub items: Vec<Item>,
    pub cells: Vec<Cell>,
    pub grid: GridSpec,
    pub template: Template,
    pub kind: ItemKind,
    /// Set when no item had a selectable image; an empty collage is a valid
    /// outcome, not an error.
    pub empty: bool,
}

// ---------------------------------------------------------------------------
// Spotify auth types
// ---------------------------------------------------------------------------

/// A user-authorized Spotify token obtained through the PKCE flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// PKCE flow state shared between the auth command and the callback server.
#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// A short-lived application token from the client-credentials grant,
/// used to authorize cover-art search requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppToken {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

// ---------------------------------------------------------------------------
// Last.fm wire types
// ---------------------------------------------------------------------------
//
// Numeric fields (playcounts, ranks, timestamps) arrive as JSON strings and
// are parsed during translation to domain types, not here.

#[derive(Debug, Clone, Deserialize)]
pub struct WireImage {
    #[serde(rename = "#text", default)]
    pub url: String,
    #[serde(default)]
    pub size: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireRankAttr {
    #[serde(default)]
    pub rank: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireAlbum {
    pub name: String,
    #[serde(default)]
    pub playcount: String,
    pub artist: WireArtistRef,
    #[serde(default)]
    pub image: Vec<WireImage>,
    #[serde(rename = "@attr")]
    pub attr: Option<WireRankAttr>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopAlbumsResponse {
    pub topalbums: TopAlbumsContainer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopAlbumsContainer {
    #[serde(default)]
    pub album: Vec<WireAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTopArtist {
    pub name: String,
    #[serde(default)]
    pub playcount: String,
    #[serde(default)]
    pub image: Vec<WireImage>,
    #[serde(rename = "@attr")]
    pub attr: Option<WireRankAttr>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopArtistsResponse {
    pub topartists: TopArtistsContainer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopArtistsContainer {
    #[serde(default)]
    pub artist: Vec<WireTopArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireAlbumRef {
    #[serde(default)]
    pub image: Vec<WireImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTopTrack {
    pub name: String,
    #[serde(default)]
    pub playcount: String,
    pub artist: WireArtistRef,
    #[serde(default)]
    pub image: Vec<WireImage>,
    pub album: Option<WireAlbumRef>,
    #[serde(rename = "@attr")]
    pub attr: Option<WireRankAttr>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub toptracks: TopTracksContainer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksContainer {
    #[serde(default)]
    pub track: Vec<WireTopTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    pub user: WireUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    pub name: String,
    #[serde(default)]
    pub playcount: String,
    #[serde(default)]
    pub artist_count: Option<String>,
    #[serde(default)]
    pub album_count: Option<String>,
    #[serde(default)]
    pub track_count: Option<String>,
    pub registered: WireRegistered,
    #[serde(default)]
    pub image: Vec<WireImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireRegistered {
    #[serde(default)]
    pub unixtime: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracksResponse {
    pub recenttracks: RecentTracksContainer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracksContainer {
    #[serde(default)]
    pub track: Vec<WireRecentTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireRecentTrack {
    pub name: String,
    /// Recent-tracks payloads put the artist name under `#text`.
    pub artist: WireTextRef,
    pub album: Option<WireTextRef>,
    pub date: Option<WireDate>,
    #[serde(rename = "@attr")]
    pub attr: Option<WireNowPlayingAttr>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTextRef {
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireDate {
    #[serde(default)]
    pub uts: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireNowPlayingAttr {
    #[serde(default)]
    pub nowplaying: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumInfoResponse {
    pub album: WireAlbumRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackInfoResponse {
    pub track: WireTrackInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTrackInfo {
    pub album: Option<WireAlbumRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompareResponse {
    pub comparison: WireComparison,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireComparison {
    pub result: WireComparisonResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireComparisonResult {
    #[serde(default)]
    pub score: String,
    pub artists: Option<WireComparisonArtists>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireComparisonArtists {
    #[serde(default)]
    pub artist: Vec<WireArtistRef>,
}

// ---------------------------------------------------------------------------
// Spotify wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtistSearchResponse {
    pub artists: SpotifyArtistItems,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtistItems {
    #[serde(default)]
    pub items: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrackSearchResponse {
    pub tracks: SpotifyTrackItems,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrackItems {
    #[serde(default)]
    pub items: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub uri: String,
    pub album: SpotifyAlbumRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbumRef {
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub external_urls: Option<SpotifyExternalUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPlaylistsResponse {
    #[serde(default)]
    pub items: Vec<SpotifyPlaylist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyMeResponse {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

#[derive(Tabled)]
pub struct ChartTableRow {
    pub rank: String,
    pub name: String,
    pub artist: String,
    pub plays: String,
}

#[derive(Tabled)]
pub struct RecentTrackRow {
    pub played: String,
    pub name: String,
    pub artist: String,
}

//! Artwork records and the paginated response envelope.

use serde::Deserialize;

/// One artwork row as returned by the artworks endpoint.
///
/// Text fields and years are optional because the API returns `null` for a
/// large share of its catalogue. Only value equality identifies a record;
/// there is no key tracked across pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    /// Carried along but never displayed.
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
}

impl Artwork {
    /// Creates an artwork with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Sets the place of origin.
    pub fn with_place_of_origin(mut self, place: impl Into<String>) -> Self {
        self.place_of_origin = Some(place.into());
        self
    }

    /// Sets the artist display string.
    pub fn with_artist_display(mut self, artist: impl Into<String>) -> Self {
        self.artist_display = Some(artist.into());
        self
    }

    /// Sets the start and end years.
    pub fn with_dates(mut self, start: i32, end: i32) -> Self {
        self.date_start = Some(start);
        self.date_end = Some(end);
        self
    }

    /// Returns the display text for a column, empty when the field is absent.
    pub fn cell(&self, column: ArtworkColumn) -> String {
        match column {
            ArtworkColumn::Title => self.title.clone().unwrap_or_default(),
            ArtworkColumn::PlaceOfOrigin => self.place_of_origin.clone().unwrap_or_default(),
            // Multi-line in the API ("Name\nNationality, years")
            ArtworkColumn::ArtistDisplay => self
                .artist_display
                .as_deref()
                .map(|s| s.replace('\n', " "))
                .unwrap_or_default(),
            ArtworkColumn::DateStart => self.date_start.map(|y| y.to_string()).unwrap_or_default(),
            ArtworkColumn::DateEnd => self.date_end.map(|y| y.to_string()).unwrap_or_default(),
        }
    }
}

/// Displayed columns, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkColumn {
    Title,
    PlaceOfOrigin,
    ArtistDisplay,
    DateStart,
    DateEnd,
}

impl ArtworkColumn {
    /// All displayed columns in order.
    pub const ALL: [ArtworkColumn; 5] = [
        ArtworkColumn::Title,
        ArtworkColumn::PlaceOfOrigin,
        ArtworkColumn::ArtistDisplay,
        ArtworkColumn::DateStart,
        ArtworkColumn::DateEnd,
    ];

    /// Column header text.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::PlaceOfOrigin => "Place of Origin",
            Self::ArtistDisplay => "Artist Display",
            Self::DateStart => "Start Date",
            Self::DateEnd => "End Date",
        }
    }
}

/// Body of `GET /artworks?page=N`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtworksResponse {
    pub data: Vec<Artwork>,
    /// Missing or `null` leaves the total unknown.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl ArtworksResponse {
    /// Total record count across all pages, if the API reported one.
    pub fn total(&self) -> Option<u64> {
        self.pagination.as_ref().and_then(|p| p.total)
    }
}

/// The `pagination` object of a list response.
///
/// Only `total` is used; the rest is kept for logging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

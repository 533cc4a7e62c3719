//! Tag kinds and the Tag Handler Protocol

mod collector;
mod handler;

pub use collector::{DurationProbe, FanOut, SourceDescriptor, TagCollector};
pub use handler::{Fact, TagHandler};

use serde::{Deserialize, Serialize};

/// Dedicated descriptive field kinds
///
/// Fields without a dedicated kind travel as free-form pairs instead
/// (see [`TagHandler::on_pair`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagType {
    Artist,
    ArtistSort,
    Album,
    AlbumArtist,
    Title,
    Track,
    Name,
    Genre,
    Date,
    Composer,
    Performer,
    Comment,
    Disc,
}

impl TagType {
    /// Every tag kind, in declaration order
    pub const ALL: [TagType; 13] = [
        Self::Artist,
        Self::ArtistSort,
        Self::Album,
        Self::AlbumArtist,
        Self::Title,
        Self::Track,
        Self::Name,
        Self::Genre,
        Self::Date,
        Self::Composer,
        Self::Performer,
        Self::Comment,
        Self::Disc,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::ArtistSort => "artistsort",
            Self::Album => "album",
            Self::AlbumArtist => "albumartist",
            Self::Title => "title",
            Self::Track => "track",
            Self::Name => "name",
            Self::Genre => "genre",
            Self::Date => "date",
            Self::Composer => "composer",
            Self::Performer => "performer",
            Self::Comment => "comment",
            Self::Disc => "disc",
        }
    }

    /// Parse a tag name, ignoring ASCII case
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for TagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

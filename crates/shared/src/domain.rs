use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! index_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub $inner);
    };
}

index_newtype!(VenueIndex, usize);
index_newtype!(SearchToken, u64);

impl SearchToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

pub const CURRENT_POSITION_TITLE: &str = "Sua Localização";

/// Span of the initial map region around the device position, in degrees.
pub const MAP_LATITUDE_DELTA: f64 = 0.0922;
pub const MAP_LONGITUDE_DELTA: f64 = 0.0421;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Venue {
    pub coordinate: Coordinate,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub coordinate: Coordinate,
    pub acquired_at: DateTime<Utc>,
}

impl PositionFix {
    pub fn now(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            acquired_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkerKind {
    Venue { index: VenueIndex },
    CurrentPosition,
}

/// A single point handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: MarkerKind,
}

impl Marker {
    pub fn from_venue(index: VenueIndex, venue: &Venue) -> Self {
        Self {
            coordinate: venue.coordinate,
            title: venue.title.to_string(),
            description: Some(venue.description.to_string()),
            kind: MarkerKind::Venue { index },
        }
    }

    pub fn current_position(fix: &PositionFix) -> Self {
        Self {
            coordinate: fix.coordinate,
            title: CURRENT_POSITION_TITLE.to_string(),
            description: None,
            kind: MarkerKind::CurrentPosition,
        }
    }

    pub fn is_current_position(&self) -> bool {
        self.kind == MarkerKind::CurrentPosition
    }
}

/// Initial visible region of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn centered_on(center: Coordinate) -> Self {
        Self {
            center,
            latitude_delta: MAP_LATITUDE_DELTA,
            longitude_delta: MAP_LONGITUDE_DELTA,
        }
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (coordinate.latitude - self.center.latitude).abs() <= self.latitude_delta / 2.0
            && (coordinate.longitude - self.center.longitude).abs() <= self.longitude_delta / 2.0
    }
}

//! Fixed set of known fitness venues.

use shared::domain::{Coordinate, Marker, PositionFix, Venue, VenueIndex};

static VENUES: [Venue; 7] = [
    Venue {
        coordinate: Coordinate::new(-8.049136542613661, -34.87848838043232),
        title: "Academia Havana",
        description: "Av. Cruz Cabugá, 555",
    },
    Venue {
        coordinate: Coordinate::new(-8.053874434953736, -34.892779190758894),
        title: "UB Fit",
        description: "R. Padre Inglês, 356",
    },
    Venue {
        coordinate: Coordinate::new(-8.058548534508782, -34.88754351850712),
        title: "Academia Smart Fit",
        description: "Av. Conde da Boa Vista, 770",
    },
    Venue {
        coordinate: Coordinate::new(-8.050487256953833, -34.89491800003354),
        title: "Activa Fitner",
        description: "Av. Conselheiro Rosa e Silva, 172",
    },
    Venue {
        coordinate: Coordinate::new(-8.058398736184058, -34.89256838497249),
        title: "Academia CAF",
        description: "R. do Progresso, 429",
    },
    Venue {
        coordinate: Coordinate::new(-8.046989584992067, -34.879543577362526),
        title: "Felipe Cena Physical",
        description: "R. Frei Cassimiro, 232",
    },
    Venue {
        coordinate: Coordinate::new(-8.05701775739899, -34.89007929464444),
        title: "Corpo em Movimento Studio",
        description: "R. da Soledade, 357",
    },
];

#[derive(Debug, Clone, Copy)]
pub struct VenueRegistry {
    venues: &'static [Venue],
}

impl Default for VenueRegistry {
    fn default() -> Self {
        Self { venues: &VENUES }
    }
}

impl VenueRegistry {
    pub fn list(&self) -> &'static [Venue] {
        self.venues
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// The device marker first when a fix is present, then the registry
    /// markers in registry order. Always rebuilt from scratch.
    pub fn compose_markers(&self, fix: Option<&PositionFix>) -> Vec<Marker> {
        let mut markers = Vec::with_capacity(self.venues.len() + 1);
        if let Some(fix) = fix {
            markers.push(Marker::current_position(fix));
        }
        markers.extend(
            self.venues
                .iter()
                .enumerate()
                .map(|(index, venue)| Marker::from_venue(VenueIndex(index), venue)),
        );
        markers
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::MarkerKind;

    use super::*;

    #[test]
    fn list_is_deterministic_and_ordered() {
        let registry = VenueRegistry::default();
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.list()[0].title, "Academia Havana");
        assert_eq!(registry.list()[6].title, "Corpo em Movimento Studio");
        assert_eq!(registry.list(), VenueRegistry::default().list());
    }

    #[test]
    fn markers_without_fix_mirror_registry() {
        let registry = VenueRegistry::default();
        let markers = registry.compose_markers(None);
        assert_eq!(markers.len(), registry.len());
        for (index, (marker, venue)) in markers.iter().zip(registry.list()).enumerate() {
            assert_eq!(marker.coordinate, venue.coordinate);
            assert_eq!(marker.title, venue.title);
            assert_eq!(marker.description.as_deref(), Some(venue.description));
            assert_eq!(
                marker.kind,
                MarkerKind::Venue {
                    index: VenueIndex(index)
                }
            );
        }
    }

    #[test]
    fn markers_with_fix_add_exactly_one_device_marker() {
        let registry = VenueRegistry::default();
        let fix = PositionFix::now(Coordinate::new(-8.05, -34.88));
        let markers = registry.compose_markers(Some(&fix));
        assert_eq!(markers.len(), registry.len() + 1);
        assert!(markers[0].is_current_position());
        assert!(markers[1..].iter().all(|m| !m.is_current_position()));
        let device: Vec<_> = markers.iter().filter(|m| m.is_current_position()).collect();
        assert_eq!(device.len(), 1);
        assert_eq!(device[0].coordinate, Coordinate::new(-8.05, -34.88));
        assert_eq!(device[0].title, shared::domain::CURRENT_POSITION_TITLE);
    }
}

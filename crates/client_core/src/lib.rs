//! Venue finder core: the venue registry, position acquisition, remote venue
//! lookup, and the orchestrator that composes them into a renderable view.

pub mod lookup;
pub mod notify;
pub mod orchestrator;
pub mod position;
pub mod registry;

pub use lookup::{HttpLookupClient, LookupClient, LookupConfig};
pub use notify::{Notification, Notifier};
pub use orchestrator::{
    reduce, Effect, MapView, Orchestrator, PositionPhase, RenderModel, ViewEvent, ViewState,
};
pub use position::{PermissionStatus, PositionProvider, PositionService, StaticPositionProvider};
pub use registry::VenueRegistry;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

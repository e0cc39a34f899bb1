//! Spatial view state, its transitions, and the runtime that drives them.
//!
//! [`reduce`] is pure: it maps the current [`ViewState`] and one [`ViewEvent`]
//! to the next state plus the [`Effect`]s the runtime must perform. The
//! [`Orchestrator`] executes those effects on the async runtime and feeds
//! their results back as events, one event per loop turn.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    domain::{MapRegion, Marker, PositionFix, SearchToken},
    error::{LookupError, PositionError},
    protocol::{LookupPayload, LookupResult},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    lookup::LookupClient,
    notify::{Notification, Notifier},
    position::PositionService,
    registry::VenueRegistry,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionPhase {
    #[default]
    Idle,
    Acquiring,
    Ready(PositionFix),
    Denied,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    query: String,
    position: PositionPhase,
    lookup: LookupResult,
    latest_search: SearchToken,
    pending_search: Option<SearchToken>,
    torn_down: bool,
}

impl ViewState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn position_phase(&self) -> PositionPhase {
        self.position
    }

    pub fn position_fix(&self) -> Option<&PositionFix> {
        match &self.position {
            PositionPhase::Ready(fix) => Some(fix),
            _ => None,
        }
    }

    pub fn lookup(&self) -> &LookupResult {
        &self.lookup
    }

    pub fn latest_search(&self) -> SearchToken {
        self.latest_search
    }

    pub fn is_searching(&self) -> bool {
        self.pending_search.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn render_model(&self, registry: &VenueRegistry) -> RenderModel {
        let fix = self.position_fix();
        RenderModel {
            query: self.query.clone(),
            markers: registry.compose_markers(fix),
            map: fix.map(|fix| MapView {
                region: MapRegion::centered_on(fix.coordinate),
                fix: *fix,
            }),
            lookup: self.lookup.clone(),
            searching: self.is_searching(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Activated,
    PositionResolved(Result<PositionFix, PositionError>),
    QueryChanged(String),
    SearchActivated,
    LookupResolved {
        token: SearchToken,
        outcome: Result<LookupPayload, LookupError>,
    },
    TornDown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AcquirePosition,
    Lookup { token: SearchToken, query: String },
    Notify(Notification),
}

pub fn reduce(mut state: ViewState, event: ViewEvent) -> (ViewState, Vec<Effect>) {
    if state.torn_down {
        return (state, Vec::new());
    }

    let mut effects = Vec::new();
    match event {
        ViewEvent::Activated => {
            if state.position == PositionPhase::Idle {
                state.position = PositionPhase::Acquiring;
                effects.push(Effect::AcquirePosition);
            }
        }
        ViewEvent::PositionResolved(outcome) => {
            if state.position == PositionPhase::Acquiring {
                if let Err(err) = &outcome {
                    effects.push(Effect::Notify(Notification::for_code(err.code())));
                }
                state.position = match outcome {
                    Ok(fix) => PositionPhase::Ready(fix),
                    Err(PositionError::PermissionDenied) => PositionPhase::Denied,
                    Err(PositionError::Unavailable { .. }) => PositionPhase::Unavailable,
                };
            }
        }
        ViewEvent::QueryChanged(text) => state.query = text,
        ViewEvent::SearchActivated => {
            let token = state.latest_search.next();
            state.latest_search = token;
            state.pending_search = Some(token);
            state.lookup = LookupResult::Empty;
            effects.push(Effect::Lookup {
                token,
                query: state.query.clone(),
            });
        }
        ViewEvent::LookupResolved { token, outcome } => {
            if token == state.latest_search && state.pending_search == Some(token) {
                state.pending_search = None;
                if let Err(err) = &outcome {
                    effects.push(Effect::Notify(Notification::for_code(err.code())));
                }
                state.lookup = LookupResult::from_outcome(outcome);
            }
        }
        ViewEvent::TornDown => {
            state.torn_down = true;
            state.pending_search = None;
        }
    }

    (state, effects)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub region: MapRegion,
    pub fix: PositionFix,
}

/// Everything the rendering surface needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub query: String,
    pub markers: Vec<Marker>,
    pub map: Option<MapView>,
    pub lookup: LookupResult,
    pub searching: bool,
}

pub struct Orchestrator {
    state: ViewState,
    registry: VenueRegistry,
    position: Arc<PositionService>,
    lookup: Arc<dyn LookupClient>,
    notifier: Arc<dyn Notifier>,
    events_tx: mpsc::UnboundedSender<ViewEvent>,
    events_rx: mpsc::UnboundedReceiver<ViewEvent>,
    in_flight: usize,
}

impl Orchestrator {
    pub fn new(
        registry: VenueRegistry,
        position: PositionService,
        lookup: Arc<dyn LookupClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: ViewState::default(),
            registry,
            position: Arc::new(position),
            lookup,
            notifier,
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn render_model(&self) -> RenderModel {
        self.state.render_model(&self.registry)
    }

    pub fn has_pending_work(&self) -> bool {
        self.in_flight > 0
    }

    /// Starts position acquisition. Only the first call has any effect.
    pub fn activate(&mut self) {
        self.dispatch(ViewEvent::Activated);
    }

    pub fn query_changed(&mut self, text: impl Into<String>) {
        self.dispatch(ViewEvent::QueryChanged(text.into()));
    }

    pub fn search(&mut self) {
        self.dispatch(ViewEvent::SearchActivated);
    }

    /// Stops applying results. Work still in flight completes but is dropped.
    pub fn tear_down(&mut self) {
        self.dispatch(ViewEvent::TornDown);
        self.events_rx.close();
        self.in_flight = 0;
    }

    /// Waits for one background operation to resolve and applies it.
    /// Returns `false` when nothing is in flight or the view is torn down.
    pub async fn next_resolution(&mut self) -> bool {
        if self.in_flight == 0 || self.state.is_torn_down() {
            return false;
        }
        match self.events_rx.recv().await {
            Some(event) => {
                self.in_flight -= 1;
                self.dispatch(event);
                true
            }
            None => {
                self.in_flight = 0;
                false
            }
        }
    }

    /// Applies results until no background operation remains.
    pub async fn settle(&mut self) {
        while self.next_resolution().await {}
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        let (next, effects) = reduce(std::mem::take(&mut self.state), event);
        self.state = next;
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::AcquirePosition => {
                info!("starting position acquisition");
                let position = Arc::clone(&self.position);
                self.spawn(
                    async move { ViewEvent::PositionResolved(position.acquire().await) },
                    |cause| ViewEvent::PositionResolved(Err(PositionError::Unavailable { cause })),
                );
            }
            Effect::Lookup { token, query } => {
                debug!(token = token.0, %query, "dispatching venue lookup");
                let lookup = Arc::clone(&self.lookup);
                self.spawn(
                    async move {
                        let outcome = lookup.lookup(&query).await;
                        ViewEvent::LookupResolved { token, outcome }
                    },
                    move |cause| ViewEvent::LookupResolved {
                        token,
                        outcome: Err(LookupError::network(cause)),
                    },
                );
            }
            Effect::Notify(notification) => self.notifier.notify(notification),
        }
    }

    /// Every spawned operation reports exactly one event. A task that panics or
    /// is cancelled reports `on_failure` instead.
    fn spawn<F, P>(&mut self, work: F, on_failure: P)
    where
        F: std::future::Future<Output = ViewEvent> + Send + 'static,
        P: FnOnce(String) -> ViewEvent + Send + 'static,
    {
        self.in_flight += 1;
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match tokio::spawn(work).await {
                Ok(event) => event,
                Err(err) => {
                    warn!(error = %err, "background operation failed");
                    on_failure(format!("background task failed: {err}"))
                }
            };
            if events_tx.send(event).is_err() {
                debug!("discarding result for a torn-down view");
            }
        });
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;

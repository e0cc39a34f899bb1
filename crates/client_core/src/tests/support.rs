use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::Coordinate,
    error::LookupError,
    protocol::LookupPayload,
};

use crate::{
    lookup::LookupClient,
    notify::{Notification, Notifier},
    position::{PermissionStatus, PositionProvider, ProviderError},
};

#[derive(Default, Clone)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().expect("notifier lock").push(notification);
    }
}

pub struct CountingPositionProvider {
    permission: PermissionStatus,
    position: Option<Coordinate>,
    permission_delay: Duration,
    pub permission_requests: AtomicUsize,
    pub position_reads: AtomicUsize,
}

impl CountingPositionProvider {
    pub fn new(permission: PermissionStatus, position: Option<Coordinate>) -> Arc<Self> {
        Self::answering_after(Duration::ZERO, permission, position)
    }

    /// Holds the permission answer back for `delay`.
    pub fn answering_after(
        delay: Duration,
        permission: PermissionStatus,
        position: Option<Coordinate>,
    ) -> Arc<Self> {
        Arc::new(Self {
            permission,
            position,
            permission_delay: delay,
            permission_requests: AtomicUsize::new(0),
            position_reads: AtomicUsize::new(0),
        })
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    pub fn position_reads(&self) -> usize {
        self.position_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PositionProvider for CountingPositionProvider {
    async fn request_foreground_permission(&self) -> PermissionStatus {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        if !self.permission_delay.is_zero() {
            tokio::time::sleep(self.permission_delay).await;
        }
        self.permission
    }

    async fn current_position(&self) -> Result<Coordinate, ProviderError> {
        self.position_reads.fetch_add(1, Ordering::SeqCst);
        self.position.ok_or(ProviderError::NoFix)
    }
}

/// Host location service that crashes while reading the position.
pub struct PanickingPositionProvider;

#[async_trait]
impl PositionProvider for PanickingPositionProvider {
    async fn request_foreground_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self) -> Result<Coordinate, ProviderError> {
        panic!("location service crashed");
    }
}

pub struct PanickingLookupClient;

#[async_trait]
impl LookupClient for PanickingLookupClient {
    async fn lookup(&self, _query: &str) -> Result<LookupPayload, LookupError> {
        panic!("lookup backend crashed");
    }
}

/// Answers queries from a fixed table, optionally after a delay.
#[derive(Default)]
pub struct ScriptedLookupClient {
    answers: HashMap<String, (Duration, Result<LookupPayload, LookupError>)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLookupClient {
    pub fn answer(mut self, query: &str, outcome: Result<LookupPayload, LookupError>) -> Self {
        self.answers
            .insert(query.to_string(), (Duration::ZERO, outcome));
        self
    }

    pub fn answer_after(
        mut self,
        query: &str,
        delay: Duration,
        outcome: Result<LookupPayload, LookupError>,
    ) -> Self {
        self.answers.insert(query.to_string(), (delay, outcome));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl LookupClient for ScriptedLookupClient {
    async fn lookup(&self, query: &str) -> Result<LookupPayload, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::Invalid);
        }
        self.calls.lock().expect("calls lock").push(query.to_string());
        let (delay, outcome) = self
            .answers
            .get(query)
            .cloned()
            .unwrap_or((Duration::ZERO, Err(LookupError::NotFound)));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        outcome
    }
}

pub fn payload(title: &str) -> LookupPayload {
    LookupPayload {
        title: title.to_string(),
        year: "2020".to_string(),
        genre: "Fitness".to_string(),
        director: "Ana Souza".to_string(),
        awards: "N/A".to_string(),
    }
}

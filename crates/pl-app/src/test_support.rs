//! Fakes and mocks shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use pl_core::ids::{PrincipalIdentifier, UserId};
use pl_core::ports::{
    ErrorSurfacePort, FavoriteError, FavoriteUsersPort, FieldEventsPort, LookupError,
    LookupRequest, LookupResponse, PrincipalLookupPort,
};
use pl_core::principal::PrincipalRecord;
use tokio::sync::oneshot;

pub type ReplySender = oneshot::Sender<Result<LookupResponse, LookupError>>;

pub fn response(records: Vec<PrincipalRecord>) -> LookupResponse {
    records
        .into_iter()
        .map(|record| (record.identifier.clone(), record))
        .collect()
}

mock! {
    pub ErrorSurface {}

    impl ErrorSurfacePort for ErrorSurface {
        fn report_lookup_failure(&self, error: &LookupError);
    }
}

mock! {
    pub Favorites {}

    #[async_trait]
    impl FavoriteUsersPort for Favorites {
        fn contains(&self, user_id: &UserId) -> bool;
        async fn add(&self, user_id: &UserId) -> Result<(), FavoriteError>;
        async fn remove(&self, user_id: &UserId) -> Result<(), FavoriteError>;
    }
}

/// Lookup whose answers are released by the test, one reply per call.
pub struct ScriptedLookup {
    requests: Mutex<Vec<Vec<PrincipalIdentifier>>>,
    replies: Mutex<VecDeque<oneshot::Receiver<Result<LookupResponse, LookupError>>>>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue the reply for the next call; the call blocks until it is sent.
    pub fn push_reply(&self) -> ReplySender {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(rx);
        tx
    }

    pub fn requests(&self) -> Vec<Vec<PrincipalIdentifier>> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.requests.lock().unwrap().len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("lookup was not called in time");
    }
}

#[async_trait]
impl PrincipalLookupPort for ScriptedLookup {
    async fn lookup(&self, request: LookupRequest) -> Result<LookupResponse, LookupError> {
        self.requests.lock().unwrap().push(request.identifiers);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(LookupError::Transport("reply dropped".to_string()))),
            None => Err(LookupError::Transport("no scripted reply".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Change(Vec<PrincipalIdentifier>),
    Focus,
    Blur,
}

#[derive(Default)]
pub struct RecordingEvents {
    events: Mutex<Vec<FieldEvent>>,
}

impl RecordingEvents {
    pub fn events(&self) -> Vec<FieldEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl FieldEventsPort for RecordingEvents {
    fn on_change(&self, value: &[PrincipalIdentifier]) {
        self.events.lock().unwrap().push(FieldEvent::Change(value.to_vec()));
    }

    fn on_focus(&self) {
        self.events.lock().unwrap().push(FieldEvent::Focus);
    }

    fn on_blur(&self) {
        self.events.lock().unwrap().push(FieldEvent::Blur);
    }
}

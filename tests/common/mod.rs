//! Shared helpers for the integration suites
#![allow(dead_code)]

use atelier::{
    Atelier, AtelierConfig, AuthApi, DocumentEvent, Error, Observer, Result, SessionId,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Initialize test logging once per binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Open a fresh service rooted in a temp dir
///
/// The `TempDir` must outlive the service or the storage root vanishes.
pub fn open_service() -> (TempDir, Atelier) {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let service = Atelier::open(AtelierConfig::new(dir.path())).unwrap();
    (dir, service)
}

/// Register a user and log them in, returning the session token
pub fn register_and_login(service: &Atelier, username: &str) -> SessionId {
    service.register(username, "pass1234").unwrap();
    login(service, username)
}

/// Log a registered user in with the fixture password
pub fn login(service: &Atelier, username: &str) -> SessionId {
    service
        .login(username, "pass1234")
        .unwrap()
        .expect("fixture credentials must authenticate")
}

/// An in-process observer standing in for a remote client endpoint
pub struct RecordingObserver {
    identity: String,
    received: Mutex<Vec<DocumentEvent>>,
    unreachable: AtomicBool,
}

impl RecordingObserver {
    pub fn new(identity: &str) -> Arc<Self> {
        Arc::new(RecordingObserver {
            identity: identity.to_string(),
            received: Mutex::new(Vec::new()),
            unreachable: AtomicBool::new(false),
        })
    }

    /// Make every subsequent remote call fail
    pub fn go_dark(&self) {
        self.unreachable.store(true, Ordering::SeqCst);
    }

    pub fn received(&self) -> Vec<DocumentEvent> {
        self.received.lock().clone()
    }

    pub fn received_contents(&self) -> Vec<String> {
        self.received.lock().iter().map(|e| e.content.clone()).collect()
    }
}

impl Observer for RecordingObserver {
    fn identity(&self) -> Result<String> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(Error::RemoteUnreachable("connection dropped".to_string()));
        }
        Ok(self.identity.clone())
    }

    fn notify(&self, event: &DocumentEvent) -> Result<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(Error::RemoteUnreachable("connection dropped".to_string()));
        }
        self.received.lock().push(event.clone());
        Ok(())
    }
}

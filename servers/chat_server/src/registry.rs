//! The connection registry owned by the relay: register, unregister,
//! broadcast. All mutation happens behind the registry's own lock, and the
//! lock is never held across a send.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::protocol::ServerMessage;

/// Transport side of a registered connection. The relay only needs to push
/// text frames and probe liveness; a failed call means the connection is
/// gone.
#[async_trait(?Send)]
pub trait MessageSink {
    async fn send_text(&mut self, text: String) -> Result<(), ()>;
    async fn ping(&mut self) -> Result<(), ()>;
}

pub struct ConnectionRegistry<S> {
    inner: Arc<Mutex<Inner<S>>>,
}

struct Inner<S> {
    next_id: usize,
    sessions: HashMap<usize, S>,
}

impl<S> Clone for ConnectionRegistry<S> {
    fn clone(&self) -> Self {
        ConnectionRegistry {
            inner: self.inner.clone(),
        }
    }
}

impl<S> Default for ConnectionRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ConnectionRegistry<S> {
    pub fn new() -> Self {
        ConnectionRegistry {
            inner: Arc::new(Mutex::new(Inner {
                next_id: 0,
                sessions: HashMap::new(),
            })),
        }
    }

    pub fn register(&self, session: S) -> usize {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.sessions.insert(id, session);
        id
    }

    pub fn unregister(&self, id: usize) {
        self.inner.lock().sessions.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().sessions.len()
    }
}

impl<S> ConnectionRegistry<S>
where
    S: MessageSink + Clone,
{
    /// Fans the frame out to every registered connection, the sender
    /// included. Best effort: a failed send drops that connection.
    pub async fn broadcast(&self, message: &ServerMessage) {
        let frame = message.to_json();
        let sessions = self.snapshot();

        let mut stale = Vec::new();
        for (id, mut session) in sessions {
            if session.send_text(frame.clone()).await.is_err() {
                stale.push(id);
            }
        }

        self.drop_stale(stale);
    }

    /// Pings every connection and drops the ones that no longer answer.
    pub async fn sweep(&self) {
        let sessions = self.snapshot();

        let mut stale = Vec::new();
        for (id, mut session) in sessions {
            if session.ping().await.is_err() {
                stale.push(id);
            }
        }

        self.drop_stale(stale);
    }

    fn snapshot(&self) -> Vec<(usize, S)> {
        self.inner
            .lock()
            .sessions
            .iter()
            .map(|(id, session)| (*id, session.clone()))
            .collect()
    }

    fn drop_stale(&self, ids: Vec<usize>) {
        if ids.is_empty() {
            return;
        }

        let mut inner = self.inner.lock();
        for id in &ids {
            inner.sessions.remove(id);
        }
        log::info!("dropped {} stale connection(s)", ids.len());
    }
}

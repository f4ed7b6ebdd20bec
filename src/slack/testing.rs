//! Shared fixtures for tests which talk to a mock Slack API.

use super::{api::SlackClient, auth::SlackAccessToken};
use std::{
    io,
    sync::{Arc, Mutex},
};
use tracing::Dispatch;

pub async fn server() -> mockito::ServerGuard {
    mockito::Server::new_async().await
}

/// A client pointed at `srv`, authenticated as `xoxb-test`.
pub fn client(srv: &mockito::ServerGuard) -> SlackClient {
    SlackClient::new(srv.url(), SlackAccessToken::new("xoxb-test"))
}

/// Collects everything logged through [CapturedLogs::dispatch].
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn dispatch(&self) -> Dispatch {
        let logs = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || logs.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        Dispatch::new(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

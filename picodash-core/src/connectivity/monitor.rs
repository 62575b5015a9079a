//! Connectivity monitor

use super::{Backoff, ConnectivityError, ConnectivityState};
use crate::config::{ConnectivityConfig, WifiCredentials};
use crate::traits::{ConnectivityBackend, LinkStatus};

/// Drives a [`ConnectivityBackend`] through the connection state machine
///
/// `poll` never blocks: it reads the backend's status and at most kicks
/// off one connection attempt. It runs on its own cadence, separate from
/// the render tick.
pub struct ConnectivityMonitor<B> {
    backend: B,
    credentials: Option<WifiCredentials>,
    config: ConnectivityConfig,
    backoff: Backoff,
    state: ConnectivityState,
    /// When the current state was entered
    since_ms: u64,
    last_error: Option<ConnectivityError>,
}

impl<B: ConnectivityBackend> ConnectivityMonitor<B> {
    /// Create a new monitor in the `Disconnected` state
    pub fn new(
        backend: B,
        credentials: Option<WifiCredentials>,
        config: ConnectivityConfig,
    ) -> Self {
        Self {
            backend,
            credentials,
            backoff: Backoff::new(config.backoff_base_ms, config.backoff_ceiling_ms),
            config,
            state: ConnectivityState::Disconnected,
            since_ms: 0,
            last_error: None,
        }
    }

    /// Current state
    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    /// Most recent failure, if any
    pub fn last_error(&self) -> Option<ConnectivityError> {
        self.last_error
    }

    /// True if the stored credentials can be used
    pub fn has_credentials(&self) -> bool {
        self.credentials.as_ref().is_some_and(WifiCredentials::is_valid)
    }

    /// Replace the credentials and start over from `Disconnected`
    pub fn set_credentials(&mut self, credentials: Option<WifiCredentials>) {
        if self.state != ConnectivityState::Disconnected {
            self.backend.disconnect();
        }
        self.credentials = credentials;
        self.backoff.reset();
        self.state = ConnectivityState::Disconnected;
        self.last_error = None;
    }

    /// Advance the state machine
    pub fn poll(&mut self, now_ms: u64) -> ConnectivityState {
        match self.state {
            ConnectivityState::Disconnected => self.start_attempt(now_ms),

            ConnectivityState::Connecting => match self.backend.status() {
                LinkStatus::Up => {
                    self.backoff.reset();
                    self.last_error = None;
                    self.enter(ConnectivityState::Connected, now_ms);
                }
                LinkStatus::Failed(e) => self.retry(e, now_ms),
                LinkStatus::Idle | LinkStatus::Joining => {
                    let waited = now_ms.saturating_sub(self.since_ms);
                    if waited >= self.config.connect_timeout_ms as u64 {
                        self.backend.disconnect();
                        self.retry(ConnectivityError::Timeout, now_ms);
                    }
                }
            },

            ConnectivityState::Connected => match self.backend.status() {
                LinkStatus::Up => {}
                LinkStatus::Failed(e) => self.retry(e, now_ms),
                LinkStatus::Idle | LinkStatus::Joining => {
                    self.retry(ConnectivityError::LinkDropped, now_ms)
                }
            },

            ConnectivityState::Retrying {
                attempt,
                backoff_ms,
                ..
            } => {
                let waited = now_ms.saturating_sub(self.since_ms);
                if waited >= backoff_ms as u64 {
                    self.start_attempt(now_ms);
                } else {
                    self.state = ConnectivityState::Retrying {
                        attempt,
                        backoff_ms,
                        elapsed_ms: waited as u32,
                    };
                }
            }
        }

        self.state
    }

    fn start_attempt(&mut self, now_ms: u64) {
        let result = match &self.credentials {
            Some(credentials) if credentials.is_valid() => self.backend.begin_connect(credentials),
            _ => {
                self.state = ConnectivityState::Disconnected;
                return;
            }
        };

        match result {
            Ok(()) => self.enter(ConnectivityState::Connecting, now_ms),
            Err(e) => self.retry(e, now_ms),
        }
    }

    fn retry(&mut self, error: ConnectivityError, now_ms: u64) {
        self.last_error = Some(error);
        let backoff_ms = self.backoff.next_delay();
        self.enter(
            ConnectivityState::Retrying {
                attempt: self.backoff.attempt(),
                backoff_ms,
                elapsed_ms: 0,
            },
            now_ms,
        );
    }

    fn enter(&mut self, state: ConnectivityState, now_ms: u64) {
        self.state = state;
        self.since_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend whose status is scripted by the test
    struct MockBackend {
        status: LinkStatus,
        connect_result: Result<(), ConnectivityError>,
        connects: u32,
        disconnects: u32,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                status: LinkStatus::Idle,
                connect_result: Ok(()),
                connects: 0,
                disconnects: 0,
            }
        }
    }

    impl ConnectivityBackend for MockBackend {
        fn begin_connect(&mut self, _: &WifiCredentials) -> Result<(), ConnectivityError> {
            self.connects += 1;
            if self.connect_result.is_ok() {
                self.status = LinkStatus::Joining;
            }
            self.connect_result
        }

        fn status(&mut self) -> LinkStatus {
            self.status
        }

        fn disconnect(&mut self) {
            self.disconnects += 1;
            self.status = LinkStatus::Idle;
        }
    }

    fn config() -> ConnectivityConfig {
        ConnectivityConfig {
            backoff_base_ms: 1_000,
            backoff_ceiling_ms: 4_000,
            connect_timeout_ms: 3_000,
            poll_interval_ms: 100,
        }
    }

    fn monitor() -> ConnectivityMonitor<MockBackend> {
        let creds = WifiCredentials::new("home", "password123");
        ConnectivityMonitor::new(MockBackend::new(), creds, config())
    }

    #[test]
    fn test_connects() {
        let mut m = monitor();
        assert_eq!(m.poll(0), ConnectivityState::Connecting);
        m.backend.status = LinkStatus::Up;
        assert_eq!(m.poll(100), ConnectivityState::Connected);
        assert!(m.state().is_connected());
        assert_eq!(m.last_error(), None);
    }

    #[test]
    fn test_missing_credentials_stay_disconnected() {
        let mut m = ConnectivityMonitor::new(MockBackend::new(), None, config());
        for t in 0..10 {
            assert_eq!(m.poll(t * 1_000), ConnectivityState::Disconnected);
        }
        assert_eq!(m.backend.connects, 0);
    }

    #[test]
    fn test_invalid_credentials_stay_disconnected() {
        let creds = WifiCredentials::new("home", "short");
        let mut m = ConnectivityMonitor::new(MockBackend::new(), creds, config());
        assert_eq!(m.poll(0), ConnectivityState::Disconnected);
        assert!(!m.has_credentials());
        assert_eq!(m.backend.connects, 0);
    }

    #[test]
    fn test_failure_backs_off() {
        let mut m = monitor();
        m.poll(0);
        m.backend.status = LinkStatus::Failed(ConnectivityError::AuthFailed);

        assert_eq!(
            m.poll(100),
            ConnectivityState::Retrying {
                attempt: 1,
                backoff_ms: 1_000,
                elapsed_ms: 0
            }
        );
        assert_eq!(m.last_error(), Some(ConnectivityError::AuthFailed));

        // Still waiting
        assert_eq!(
            m.poll(600),
            ConnectivityState::Retrying {
                attempt: 1,
                backoff_ms: 1_000,
                elapsed_ms: 500
            }
        );

        // Backoff over, try again
        m.backend.status = LinkStatus::Idle;
        assert_eq!(m.poll(1_100), ConnectivityState::Connecting);
        assert_eq!(m.backend.connects, 2);
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let mut m = monitor();
        m.backend.connect_result = Err(ConnectivityError::RadioUnavailable);

        let mut t = 0;
        let mut delays = [0u32; 5];
        for delay in delays.iter_mut() {
            match m.poll(t) {
                ConnectivityState::Retrying { backoff_ms, .. } => *delay = backoff_ms,
                other => panic!("unexpected {:?}", other),
            }
            t += *delay as u64;
        }
        assert_eq!(delays, [1_000, 2_000, 4_000, 4_000, 4_000]);
    }

    #[test]
    fn test_connect_timeout() {
        let mut m = monitor();
        m.poll(0);
        assert_eq!(m.poll(2_900), ConnectivityState::Connecting);

        let state = m.poll(3_000);
        assert!(matches!(state, ConnectivityState::Retrying { attempt: 1, .. }));
        assert_eq!(m.last_error(), Some(ConnectivityError::Timeout));
        assert_eq!(m.backend.disconnects, 1);
    }

    #[test]
    fn test_link_drop_retries() {
        let mut m = monitor();
        m.poll(0);
        m.backend.status = LinkStatus::Up;
        m.poll(100);

        m.backend.status = LinkStatus::Idle;
        let state = m.poll(5_000);
        assert!(matches!(state, ConnectivityState::Retrying { .. }));
        assert_eq!(m.last_error(), Some(ConnectivityError::LinkDropped));
    }

    #[test]
    fn test_success_resets_backoff() {
        let mut m = monitor();
        m.backend.connect_result = Err(ConnectivityError::NoNetwork);
        m.poll(0);
        m.poll(1_000);

        m.backend.connect_result = Ok(());
        m.poll(3_000);
        m.backend.status = LinkStatus::Up;
        assert_eq!(m.poll(3_100), ConnectivityState::Connected);

        m.backend.status = LinkStatus::Failed(ConnectivityError::LinkDropped);
        assert_eq!(
            m.poll(9_000),
            ConnectivityState::Retrying {
                attempt: 1,
                backoff_ms: 1_000,
                elapsed_ms: 0
            }
        );
    }

    #[test]
    fn test_set_credentials_restarts() {
        let mut m = ConnectivityMonitor::new(MockBackend::new(), None, config());
        m.poll(0);
        m.set_credentials(WifiCredentials::new("cafe", ""));
        assert_eq!(m.poll(10), ConnectivityState::Connecting);

        m.set_credentials(None);
        assert_eq!(m.backend.disconnects, 1);
        assert_eq!(m.state(), ConnectivityState::Disconnected);
    }

    #[test]
    fn test_phase_changes_once_per_attempt() {
        let creds = WifiCredentials::new("home", "password123");
        let mut backend = MockBackend::new();
        backend.connect_result = Err(ConnectivityError::RadioUnavailable);
        let mut m = ConnectivityMonitor::new(backend, creds, ConnectivityConfig::default());

        let mut last = m.state();
        let mut changes = 0;
        for t in (0..=60_000).step_by(500) {
            let state = m.poll(t);
            if !state.same_phase(&last) {
                changes += 1;
            }
            last = state;
        }

        // 5 s, 10 s, 20 s and 40 s waits: attempts start at 0, 5, 15, 35 s
        assert_eq!(m.backend.connects, 4);
        assert_eq!(changes, 4);
    }

    #[test]
    fn test_same_phase() {
        let waiting = |attempt, elapsed_ms| ConnectivityState::Retrying {
            attempt,
            backoff_ms: 5_000,
            elapsed_ms,
        };
        assert!(waiting(1, 0).same_phase(&waiting(1, 4_500)));
        assert!(!waiting(1, 0).same_phase(&waiting(2, 0)));
        assert!(!waiting(1, 0).same_phase(&ConnectivityState::Connecting));
        assert!(ConnectivityState::Connected.same_phase(&ConnectivityState::Connected));
    }
}

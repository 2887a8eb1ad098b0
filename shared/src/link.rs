//! Connection lifecycle for the snapshot stream.
//!
//! ```text
//! Disconnected --Opened--> Connected --Closed--> Reconnecting --(delay)--> attempt
//!                              ^                      |
//!                              +-------Opened---------+
//! ```
//!
//! A failed attempt keeps the link in `Reconnecting`. There is no terminal state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LinkState {
    #[default]
    Disconnected = 0,
    Connected = 1,
    Reconnecting = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// The WebSocket handshake completed.
    Opened,
    /// An open connection ended (peer close or I/O error).
    Closed,
    /// A connection attempt did not get as far as opening.
    AttemptFailed,
}

impl LinkState {
    pub fn on(self, event: LinkEvent) -> Self {
        match (self, event) {
            (_, LinkEvent::Opened) => Self::Connected,
            (_, LinkEvent::Closed | LinkEvent::AttemptFailed) => Self::Reconnecting,
        }
    }

    pub fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Connected,
            2 => Self::Reconnecting,
            _ => Self::Disconnected,
        }
    }

    pub fn is_connected(&self) -> bool {
        *self == Self::Connected
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::Reconnecting => "reconnecting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected() {
        assert_eq!(LinkState::default(), LinkState::Disconnected);
        assert!(!LinkState::default().is_connected());
    }

    #[test]
    fn open_close_reopen() {
        let state = LinkState::default().on(LinkEvent::Opened);
        assert_eq!(state, LinkState::Connected);

        let state = state.on(LinkEvent::Closed);
        assert_eq!(state, LinkState::Reconnecting);

        let state = state.on(LinkEvent::Opened);
        assert_eq!(state, LinkState::Connected);
    }

    #[test]
    fn failed_attempts_keep_reconnecting_forever() {
        let mut state = LinkState::default().on(LinkEvent::AttemptFailed);
        for _ in 0..100 {
            assert_eq!(state, LinkState::Reconnecting);
            state = state.on(LinkEvent::AttemptFailed);
        }
        assert_eq!(state.on(LinkEvent::Opened), LinkState::Connected);
    }

    #[test]
    fn u8_round_trip_covers_every_state() {
        for state in [
            LinkState::Disconnected,
            LinkState::Connected,
            LinkState::Reconnecting,
        ] {
            assert_eq!(LinkState::from_u8(state as u8), state);
        }
        assert_eq!(LinkState::from_u8(200), LinkState::Disconnected);
    }
}

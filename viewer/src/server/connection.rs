//! Blocking WebSocket client feeding the snapshot buffer.
//!
//! Runs on its own thread. Every decoded frame overwrites the buffer slot; frames that fail to
//! decode are logged and dropped without touching the connection. When the connection ends
//! for any reason the link waits a fixed delay and tries again, forever.

use crate::config::ViewerConfig;
use bevy::log::prelude::*;
use shared::{
    DecodeError, LatestSlot, LinkEvent, LinkState, Snapshot, decode_snapshot,
    decode_snapshot_bytes,
};
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tungstenite::{Message, WebSocket, stream::MaybeTlsStream};

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
    #[error("no frame within the idle timeout")]
    Stalled,
}

/// Link state plus counters, shared between the link thread and the frame loop.
#[derive(Debug, Default)]
pub struct LinkStatus {
    state: AtomicU8,
    sessions: AtomicU64,
    rejected: AtomicU64,
}

impl LinkStatus {
    pub fn state(&self) -> LinkState {
        LinkState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Advance the state machine. Only the link thread calls this.
    pub fn apply(&self, event: LinkEvent) -> LinkState {
        let next = self.state().on(event);
        self.state.store(next as u8, Ordering::Release);
        if event == LinkEvent::Opened {
            self.sessions.fetch_add(1, Ordering::Relaxed);
        }
        next
    }

    /// Connections opened so far.
    pub fn sessions(&self) -> u64 {
        self.sessions.load(Ordering::Relaxed)
    }

    /// Frames discarded because they failed to decode.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

/// Connect, stream, and reconnect forever.
pub fn run_link(config: &ViewerConfig, buffer: &LatestSlot<Snapshot>, status: &LinkStatus) {
    loop {
        match tungstenite::connect(config.endpoint.as_str()) {
            Ok((mut socket, _response)) => {
                status.apply(LinkEvent::Opened);
                info!("Connected to simulator at {}", config.endpoint);
                if let Err(err) = set_idle_timeout(&socket, config.idle_timeout) {
                    warn!("Could not set a read timeout, a silent peer will hang the link: {err}");
                }

                match read_frames(&mut socket, buffer, status) {
                    Ok(()) => warn!(
                        "Simulator at {} closed the connection, reconnecting in {:?}",
                        config.endpoint, config.reconnect_delay
                    ),
                    Err(err) => warn!(
                        "Lost connection to {}: {err}; reconnecting in {:?}",
                        config.endpoint, config.reconnect_delay
                    ),
                }
                status.apply(LinkEvent::Closed);
            }
            Err(err) => {
                status.apply(LinkEvent::AttemptFailed);
                warn!(
                    "Waiting for simulator at {}: {err}; retrying in {:?}",
                    config.endpoint, config.reconnect_delay
                );
            }
        }

        thread::sleep(config.reconnect_delay);
    }
}

/// Bound blocking reads so a peer that disappears without closing is noticed.
pub fn set_idle_timeout(
    socket: &WebSocket<MaybeTlsStream<TcpStream>>,
    timeout: Duration,
) -> io::Result<()> {
    match socket.get_ref() {
        MaybeTlsStream::Plain(stream) => stream.set_read_timeout(Some(timeout)),
        _ => Ok(()),
    }
}

/// Pump one open connection until it closes.
///
/// Returns `Ok(())` on an orderly close, [`LinkError::Stalled`] when a read times out and the
/// transport error otherwise.
pub fn read_frames<S: Read + Write>(
    socket: &mut WebSocket<S>,
    buffer: &LatestSlot<Snapshot>,
    status: &LinkStatus,
) -> Result<(), LinkError> {
    loop {
        match socket.read() {
            Ok(Message::Text(text)) => {
                accept_frame(decode_snapshot(text.as_str()), buffer, status);
            }
            Ok(Message::Binary(bytes)) => {
                accept_frame(decode_snapshot_bytes(&bytes), buffer, status);
            }
            // Close replies and pongs are queued by tungstenite and flushed on the next read.
            Ok(Message::Close(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {}
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                return Ok(());
            }
            Err(tungstenite::Error::Io(err))
                if matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) =>
            {
                return Err(LinkError::Stalled);
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Publish a decoded frame, or log and drop a bad one. Returns whether it was published.
pub fn accept_frame(
    decoded: Result<Snapshot, DecodeError>,
    buffer: &LatestSlot<Snapshot>,
    status: &LinkStatus,
) -> bool {
    match decoded {
        Ok(snapshot) => {
            if buffer.publish(snapshot) {
                trace!("Replaced a snapshot that was never rendered");
            }
            true
        }
        Err(err) => {
            status.rejected.fetch_add(1, Ordering::Relaxed);
            warn!("Discarding frame: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::sync::{Arc, mpsc};
    use std::time::Instant;

    fn frame(thrust_z: f32) -> String {
        format!(
            r#"{{"body": {{"position": [0, 0, 1], "quaternion": [1, 0, 0, 0]}},
                "rotors": [{{"id": 0, "position_world": [0.3, 0, 1],
                             "quaternion_world": [1, 0, 0, 0], "thrust_world": [0, 0, {thrust_z}]}}]}}"#
        )
    }

    fn thrust_z(snapshot: &Snapshot) -> f32 {
        snapshot.rotors[0].thrust_world[2]
    }

    #[test]
    fn malformed_frame_leaves_pending_snapshot_alone() {
        let buffer = LatestSlot::new();
        let status = LinkStatus::default();

        assert!(accept_frame(decode_snapshot(&frame(1.0)), &buffer, &status));
        assert!(!accept_frame(decode_snapshot("{\"body\": 3"), &buffer, &status));

        assert_eq!(status.rejected(), 1);
        assert_eq!(thrust_z(&buffer.take().unwrap()), 1.0);
    }

    #[test]
    fn status_follows_link_events() {
        let status = LinkStatus::default();
        assert_eq!(status.state(), LinkState::Disconnected);

        assert_eq!(status.apply(LinkEvent::Opened), LinkState::Connected);
        assert_eq!(status.apply(LinkEvent::Closed), LinkState::Reconnecting);
        assert_eq!(status.apply(LinkEvent::AttemptFailed), LinkState::Reconnecting);
        assert_eq!(status.apply(LinkEvent::Opened), LinkState::Connected);
        assert_eq!(status.sessions(), 2);
    }

    #[test]
    fn bad_frame_does_not_close_the_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut ws = tungstenite::accept(stream).unwrap();
            ws.send(Message::text(frame(1.0))).unwrap();
            ws.send(Message::text("{ definitely not a snapshot")).unwrap();
            ws.send(Message::binary(frame(2.0).into_bytes())).unwrap();
            ws.send(Message::text(frame(3.0))).unwrap();
            ws.close(None).unwrap();
            // Drive the close handshake to completion.
            while ws.read().is_ok() {}
        });

        let (mut socket, _) = tungstenite::connect(format!("ws://{addr}")).unwrap();
        let buffer = LatestSlot::new();
        let status = LinkStatus::default();

        read_frames(&mut socket, &buffer, &status).unwrap();
        server.join().unwrap();

        // The frame after the bad one still arrived on the same connection.
        assert_eq!(status.rejected(), 1);
        assert_eq!(buffer.published(), 3);
        assert_eq!(buffer.overwritten(), 2);
        assert_eq!(thrust_z(&buffer.take().unwrap()), 3.0);
    }

    #[test]
    fn reconnects_after_the_simulator_goes_away() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            for thrust in [1.0, 2.0] {
                let (stream, _) = listener.accept().unwrap();
                let mut ws = tungstenite::accept(stream).unwrap();
                ws.send(Message::text(frame(thrust))).unwrap();
                ws.close(None).unwrap();
                while ws.read().is_ok() {}
            }
        });

        let config = ViewerConfig {
            endpoint: format!("ws://{addr}"),
            reconnect_delay: Duration::from_millis(20),
            ..ViewerConfig::default()
        };
        let buffer = Arc::new(LatestSlot::new());
        let status = Arc::new(LinkStatus::default());
        {
            let buffer = Arc::clone(&buffer);
            let status = Arc::clone(&status);
            // Never returns; the test process reaps it.
            thread::spawn(move || run_link(&config, &buffer, &status));
        }

        server.join().unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while status.sessions() < 2 || buffer.published() < 2 {
            assert!(Instant::now() < deadline, "link never reconnected");
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(thrust_z(&buffer.take().unwrap()), 2.0);
    }

    #[test]
    fn silent_peer_is_dropped_after_the_idle_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (release, hold) = mpsc::channel::<()>();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut ws = tungstenite::accept(stream).unwrap();
            ws.send(Message::text(frame(1.0))).unwrap();
            // Keep the socket open but quiet.
            let _ = hold.recv();
        });

        let (mut socket, _) = tungstenite::connect(format!("ws://{addr}")).unwrap();
        set_idle_timeout(&socket, Duration::from_millis(100)).unwrap();
        let buffer = LatestSlot::new();
        let status = LinkStatus::default();

        let started = Instant::now();
        let result = read_frames(&mut socket, &buffer, &status);
        release.send(()).unwrap();
        server.join().unwrap();

        assert!(matches!(result, Err(LinkError::Stalled)));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(buffer.published(), 1);
    }
}

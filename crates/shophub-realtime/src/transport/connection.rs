//! WebSocket transport connection.
//!
//! Maintains exactly one active connection to the realtime endpoint for
//! the lifetime of the engine. The lifecycle is an explicit state
//! machine driven by a single task: every close, however caused,
//! schedules exactly one reconnection attempt after a fixed delay —
//! unbounded retries, constant backoff.

use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use shophub_core::config::realtime::RealtimeConfig;
use shophub_core::{AppError, AppResult};

use crate::event::parser::{encode_command, parse_event};
use crate::event::{ClientCommand, ServerEvent};

use super::metrics::TransportMetrics;
use super::state::ConnectionState;

/// Why a session ended, deciding whether the loop reconnects.
enum SessionEnd {
    /// The connection closed; schedule a reconnect.
    ConnectionLost,
    /// Shutdown was requested; stop for good.
    Shutdown,
}

/// Handle to the transport connection task.
///
/// One instance should be opened per engine; the notification bridge and
/// every chat session controller share it, each reacting only to the
/// event classes relevant to it.
pub struct Transport {
    /// Inbound event fan-out.
    events_tx: broadcast::Sender<ServerEvent>,
    /// Outbound command queue.
    commands_tx: mpsc::Sender<ClientCommand>,
    /// Connection state observability.
    state_rx: watch::Receiver<ConnectionState>,
    /// Shutdown signal.
    shutdown_tx: watch::Sender<bool>,
    /// Counters.
    metrics: Arc<TransportMetrics>,
}

impl Transport {
    /// Spawn the connection task and connect immediately.
    pub fn connect(config: RealtimeConfig) -> Self {
        let (events_tx, _) = broadcast::channel(config.event_buffer_size);
        let (commands_tx, commands_rx) = mpsc::channel(config.command_buffer_size);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let metrics = Arc::new(TransportMetrics::new());

        tokio::spawn(run_loop(
            config,
            events_tx.clone(),
            commands_rx,
            state_tx,
            shutdown_rx,
            Arc::clone(&metrics),
        ));

        Self {
            events_tx,
            commands_tx,
            state_rx,
            shutdown_tx,
            metrics,
        }
    }

    /// Subscribe to the inbound event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.events_tx.subscribe()
    }

    /// A sender for outbound commands, handed to chat controllers.
    pub fn command_sender(&self) -> mpsc::Sender<ClientCommand> {
        self.commands_tx.clone()
    }

    /// Queue an outbound command.
    ///
    /// A failed send is not retried by this layer; callers needing
    /// at-least-once delivery must re-send themselves.
    pub fn send(&self, command: ClientCommand) -> AppResult<()> {
        self.commands_tx
            .try_send(command)
            .map_err(|e| AppError::transport(format!("Failed to queue command: {e}")))
    }

    /// A watch over the connection state.
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// The connection state right now.
    pub fn current_state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Transport counters.
    pub fn metrics(&self) -> &TransportMetrics {
        &self.metrics
    }

    /// Stop the connection task. The in-flight connection is closed and
    /// no reconnect is scheduled.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// The connect/reconnect loop.
async fn run_loop(
    config: RealtimeConfig,
    events_tx: broadcast::Sender<ServerEvent>,
    mut commands_rx: mpsc::Receiver<ClientCommand>,
    state_tx: watch::Sender<ConnectionState>,
    mut shutdown_rx: watch::Receiver<bool>,
    metrics: Arc<TransportMetrics>,
) {
    let reconnect_delay = Duration::from_secs(config.reconnect_delay_seconds);

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        let _ = state_tx.send(ConnectionState::Connecting);

        match connect_async(config.endpoint.as_str()).await {
            Ok((stream, _)) => {
                let _ = state_tx.send(ConnectionState::Connected);
                metrics.connection_opened();
                info!(endpoint = %config.endpoint, "Transport connected");

                let end = run_session(
                    stream,
                    &config,
                    &events_tx,
                    &mut commands_rx,
                    &mut shutdown_rx,
                    &metrics,
                )
                .await;
                metrics.connection_lost();
                let _ = state_tx.send(ConnectionState::Disconnected);

                if matches!(end, SessionEnd::Shutdown) {
                    break;
                }
            }
            Err(e) => {
                let _ = state_tx.send(ConnectionState::Disconnected);
                warn!(endpoint = %config.endpoint, error = %e, "Connection attempt failed");
            }
        }

        // Exactly one reconnection attempt per close, after a fixed delay.
        tokio::select! {
            _ = tokio::time::sleep(reconnect_delay) => {}
            changed = shutdown_rx.changed() => {
                // A dropped handle counts as shutdown.
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    let _ = state_tx.send(ConnectionState::Disconnected);
    debug!("Transport loop ended");
}

/// Drive one open connection until it closes or shutdown is requested.
async fn run_session(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    config: &RealtimeConfig,
    events_tx: &broadcast::Sender<ServerEvent>,
    commands_rx: &mut mpsc::Receiver<ClientCommand>,
    shutdown_rx: &mut watch::Receiver<bool>,
    metrics: &TransportMetrics,
) -> SessionEnd {
    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            inbound = source.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match parse_event(text.as_str(), config.max_frame_bytes) {
                            Ok(event) => {
                                metrics.event_received();
                                // No receivers is fine; subscribers come and go.
                                let _ = events_tx.send(event);
                            }
                            Err(e) => {
                                metrics.frame_dropped();
                                warn!(error = %e, "Dropping malformed frame");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Server closed the connection");
                        return SessionEnd::ConnectionLost;
                    }
                    // Ping/pong are answered by the library; binary frames
                    // are not part of the protocol.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        // An error alone does not trigger a reconnect; the
                        // close that follows it does.
                        warn!(error = %e, "Transport error");
                    }
                    None => {
                        info!("Connection closed");
                        return SessionEnd::ConnectionLost;
                    }
                }
            }
            outbound = commands_rx.recv() => {
                match outbound {
                    Some(command) => {
                        let frame = match encode_command(&command) {
                            Ok(f) => f,
                            Err(e) => {
                                error!(error = %e, "Failed to encode command");
                                continue;
                            }
                        };
                        if let Err(e) = sink.send(Message::text(frame)).await {
                            warn!(error = %e, "Failed to send command");
                            return SessionEnd::ConnectionLost;
                        }
                        metrics.command_sent();
                    }
                    None => return SessionEnd::Shutdown,
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    let _ = sink.send(Message::Close(None)).await;
                    return SessionEnd::Shutdown;
                }
            }
        }
    }
}

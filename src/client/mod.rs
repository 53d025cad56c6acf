use std::sync::Arc;

use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::capture::FrameCapturer;
use crate::config::ClientConfiguration;
use crate::encode::JpegDataUrlEncoder;
use crate::error::{CaptureError, DropReason};
use crate::presenter::Presenter;
use crate::types::{ClassificationMessage, TransportStatus};

use self::reconnect::{FixedDelay, ReconnectPolicy};

pub mod reconnect;


type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;

/// Lifecycle of the single connection a client owns.
///
/// `Idle → Connecting → Open → Reconnecting → Connecting → …` cycles
/// indefinitely; `Stopped` is terminal and only reached through `stop()` (or
/// a capture failure before the first attempt, which leaves the client in
/// `Idle`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Open,
    Reconnecting,
    Stopped,
}

/// How a connection session ended.
enum SessionEnd {
    Disconnected(TransportStatus),
    Shutdown,
}

/// Requests teardown of a running client: release the camera, drop the
/// connection and all timers, no further reconnects.
#[derive(Clone)]
pub struct ShutdownHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn stop(&self) {
        let _ = self.sender.send(true);
    }
}

/// Best-effort persistent connection to one inference endpoint, with a
/// fixed-rate capture-encode-send loop while open.
///
/// All transitions happen on one driver task: the send ticker, the inbound
/// stream and the reconnect timer are arms of a single `select!` loop, so at
/// most one ticker and one pending reconnect can exist at any time, and a
/// close plus an error for the same disconnect collapse into one transition.
pub struct StreamClient {
    config: ClientConfiguration,
    capturer: Box<dyn FrameCapturer>,
    presenter: Box<dyn Presenter>,
    reconnect_policy: Box<dyn ReconnectPolicy>,
    encoder: JpegDataUrlEncoder,

    state_sender: watch::Sender<ConnectionState>,
    shutdown_sender: Arc<watch::Sender<bool>>,
    shutdown_receiver: watch::Receiver<bool>,
}

impl StreamClient {
    pub fn new(
        config: ClientConfiguration,
        capturer: Box<dyn FrameCapturer>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let encoder = JpegDataUrlEncoder::new(config.jpeg_quality);
        let reconnect_policy = Box::new(FixedDelay::new(config.reconnect_delay));

        let (state_sender, _) = watch::channel(ConnectionState::Idle);
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);

        Self {
            config,
            capturer,
            presenter,
            reconnect_policy,
            encoder,
            state_sender,
            shutdown_sender: Arc::new(shutdown_sender),
            shutdown_receiver,
        }
    }

    pub fn with_reconnect_policy(mut self, policy: Box<dyn ReconnectPolicy>) -> Self {
        self.reconnect_policy = policy;
        self
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            sender: self.shutdown_sender.clone(),
        }
    }

    /// Observe connection state transitions, e.g. from tests or a status UI.
    pub fn state_watch(&self) -> watch::Receiver<ConnectionState> {
        self.state_sender.subscribe()
    }

    fn set_state(&self, state: ConnectionState) {
        debug!("connection state: {:?}", state);
        self.state_sender.send_replace(state);
    }

    /// Drive the whole lifecycle until `stop()` is requested.
    ///
    /// Starts the capture source first; a capture failure is terminal and is
    /// returned before any connection attempt is made. Afterwards the client
    /// cycles connect/send/receive/reconnect indefinitely.
    pub async fn run(mut self) -> Result<(), CaptureError> {
        self.capturer.start()?;
        info!("capture source ready, granted {}", self.capturer.resolution());

        let mut shutdown = self.shutdown_receiver.clone();
        let mut attempt: u32 = 0;

        while !*shutdown.borrow() {
            self.set_state(ConnectionState::Connecting);
            debug!("connecting to {}", self.config.endpoint);

            match connect_async(self.config.endpoint.as_str()).await {
                Ok((socket, _response)) => {
                    attempt = 0;
                    self.set_state(ConnectionState::Open);
                    info!("connection open");
                    self.presenter.transport(TransportStatus::Connected).await;

                    match self.drive_connection(socket, &mut shutdown).await {
                        SessionEnd::Disconnected(status) => {
                            self.presenter.transport(status).await;
                        }
                        SessionEnd::Shutdown => break,
                    }
                }
                Err(error) => {
                    warn!("connection attempt failed: {}", error);
                    self.presenter
                        .transport(TransportStatus::ConnectionError)
                        .await;
                }
            }

            if *shutdown.borrow() {
                break;
            }

            attempt += 1;
            let delay = self.reconnect_policy.next_delay(attempt);
            self.set_state(ConnectionState::Reconnecting);
            debug!("scheduling reconnect attempt {} in {:?}", attempt, delay);

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => break,
            }
        }

        self.set_state(ConnectionState::Stopped);
        info!("stream client stopped");
        Ok(())
    }

    /// Serve one open connection until it drops or teardown is requested.
    ///
    /// The ticker lives inside this call, so no send tick can fire while the
    /// connection is not open, and ticks never overlap: sample, encode and
    /// send complete within the tick arm before the loop selects again.
    async fn drive_connection(
        &mut self,
        socket: WsStream,
        shutdown: &mut watch::Receiver<bool>,
    ) -> SessionEnd {
        let (mut sink, mut stream) = socket.split();

        let mut ticker = interval(self.config.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(error) = self.send_frame(&mut sink).await {
                        warn!("send failed: {}", error);
                        return SessionEnd::Disconnected(TransportStatus::ConnectionError);
                    }
                }
                inbound = stream.next() => match inbound {
                    Some(Ok(Message::Text(payload))) => self.handle_message(&payload).await,
                    Some(Ok(Message::Close(_))) | None => {
                        info!("connection closed by server");
                        return SessionEnd::Disconnected(TransportStatus::Disconnected);
                    }
                    // Binary, ping and pong frames carry nothing to relay
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        warn!("transport error: {}", error);
                        return SessionEnd::Disconnected(TransportStatus::ConnectionError);
                    }
                },
                _ = shutdown.changed() => {
                    let _ = sink.send(Message::Close(None)).await;
                    return SessionEnd::Shutdown;
                }
            }
        }
    }

    /// One send tick: sample, encode, transmit. Grab and encode failures
    /// drop the frame and keep the loop alive; only transport failures
    /// terminate the session.
    async fn send_frame(&mut self, sink: &mut WsSink) -> Result<(), WsError> {
        let frame = match self.capturer.current_frame() {
            Ok(frame) => frame,
            Err(error) => {
                warn!("{}: {}", DropReason::FrameGrab, error);
                return Ok(());
            }
        };

        let payload = match self.encoder.encode(&frame) {
            Ok(payload) => payload,
            Err(error) => {
                warn!("{}: {}", DropReason::FrameEncode, error);
                return Ok(());
            }
        };

        debug!(
            "sending {} frame, {} payload bytes",
            frame.resolution(),
            payload.len()
        );
        sink.send(Message::Text(payload)).await
    }

    async fn handle_message(&mut self, payload: &str) {
        match serde_json::from_str::<ClassificationMessage>(payload) {
            Ok(message) => {
                debug!("classification received: {:?}", message);
                self.presenter.classification(&message).await;
            }
            Err(error) => {
                warn!("{}: {}", DropReason::MalformedMessage, error);
            }
        }
    }
}

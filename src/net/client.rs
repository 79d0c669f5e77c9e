//! WebSocket client for the room server
//!
//! [`NetClient::connect`] returns at once. A background thread owns a small
//! tokio runtime that dials the server, runs the Socket.IO handshake and then
//! pumps packets both ways. Incoming events land on a channel the UI drains
//! once per frame with [`NetClient::try_recv`]; [`NetClient::send`] only
//! queues, so neither side ever blocks the egui thread.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};
use websocket::{ClientBuilder, Message};

use crate::error::NetError;

use super::protocol::{ClientMessage, ServerMessage};
use super::socketio::{self, Handshake, Packet};

/// Dial plus handshake must finish within this window
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that happened on the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetEvent {
    /// Handshake finished; frames now flow both ways
    Connected,
    Message(ServerMessage),
    /// A packet that did not decode; the connection stays open
    Malformed(String),
    /// Connecting failed, the server closed the session or the socket broke
    Disconnected(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Connecting,
    Connected,
    Closed,
}

/// Handle on a room server session.
pub struct NetClient {
    addr: String,
    outgoing: Option<UnboundedSender<ClientMessage>>,
    receiver: Receiver<NetEvent>,
    state: LinkState,
}

impl NetClient {
    /// Start connecting to `addr` in the background.
    ///
    /// Only a malformed address fails here; everything after that is
    /// reported as a [`NetEvent`].
    pub fn connect(addr: &str) -> Result<Self, NetError> {
        let bad_address = |reason: String| NetError::Address {
            addr: addr.to_string(),
            reason,
        };
        let url = socketio::socket_url(addr).map_err(bad_address)?;
        ClientBuilder::new()
            .uri(&url)
            .map_err(|err| bad_address(err.to_string()))?;

        let (out_tx, out_rx) = unbounded_channel();
        let (event_tx, event_rx) = unbounded();

        let target = addr.to_string();
        let link_url = url.clone();
        thread::Builder::new()
            .name("room-server".into())
            .spawn(move || run_link(link_url, target, out_rx, event_tx))?;

        info!(addr, url = %url, "connecting to room server");
        Ok(Self {
            addr: addr.to_string(),
            outgoing: Some(out_tx),
            receiver: event_rx,
            state: LinkState::Connecting,
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    /// Still dialing or in the handshake
    pub fn is_connecting(&self) -> bool {
        self.state == LinkState::Connecting
    }

    /// Queue one frame. Frames queued while connecting go out after the handshake.
    pub fn send(&mut self, msg: &ClientMessage) -> Result<(), NetError> {
        if self.state == LinkState::Closed {
            return Err(NetError::NotConnected);
        }
        let sender = self.outgoing.as_ref().ok_or(NetError::NotConnected)?;
        if sender.send(msg.clone()).is_err() {
            self.state = LinkState::Closed;
            return Err(NetError::NotConnected);
        }
        Ok(())
    }

    /// Next pending event, if any. Never blocks.
    pub fn try_recv(&mut self) -> Option<NetEvent> {
        match self.receiver.try_recv() {
            Ok(event) => {
                match event {
                    NetEvent::Connected => self.state = LinkState::Connected,
                    NetEvent::Disconnected(_) => self.state = LinkState::Closed,
                    _ => {}
                }
                Some(event)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if self.state == LinkState::Closed {
                    None
                } else {
                    self.state = LinkState::Closed;
                    Some(NetEvent::Disconnected(None))
                }
            }
        }
    }

    /// Close the session. The background thread says goodbye and exits.
    pub fn disconnect(&mut self) {
        if self.outgoing.take().is_some() {
            self.state = LinkState::Closed;
            info!(addr = %self.addr, "disconnected from room server");
        }
    }
}

impl Drop for NetClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Body of the background thread.
fn run_link(
    url: String,
    addr: String,
    outgoing: UnboundedReceiver<ClientMessage>,
    events: Sender<NetEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = events.send(NetEvent::Disconnected(Some(err.to_string())));
            return;
        }
    };

    let reason = match runtime.block_on(session(&url, &addr, outgoing, &events)) {
        Ok(()) => None,
        Err(err) => {
            warn!(%err, addr = %addr, "room server session ended");
            Some(err.to_string())
        }
    };
    let _ = events.send(NetEvent::Disconnected(reason));
}

async fn session(
    url: &str,
    addr: &str,
    mut outgoing: UnboundedReceiver<ClientMessage>,
    events: &Sender<NetEvent>,
) -> Result<(), NetError> {
    let builder = ClientBuilder::new().uri(url).map_err(|err| NetError::Address {
        addr: addr.to_string(),
        reason: err.to_string(),
    })?;
    let dial = async {
        let (mut ws, _) = builder.connect().await.map_err(|source| NetError::Connect {
            addr: addr.to_string(),
            source,
        })?;
        let handshake = open_session(&mut ws).await?;
        Ok::<_, NetError>((ws, handshake))
    };
    let (mut ws, handshake) = timeout(CONNECT_TIMEOUT, dial)
        .await
        .map_err(|_| NetError::Timeout(addr.to_string()))??;

    info!(addr, sid = %handshake.sid, "connected to room server");
    if events.send(NetEvent::Connected).is_err() {
        return Ok(());
    }

    let window = handshake.liveness_window();
    loop {
        tokio::select! {
            frame = ws.next() => {
                let Some(frame) = frame else {
                    return Ok(());
                };
                let frame = frame?;
                if frame.is_close() {
                    return Ok(());
                }
                let Some(text) = frame.as_text() else {
                    continue;
                };
                match socketio::decode(text) {
                    Ok(Packet::Ping) => ws.send(Message::text(socketio::PONG.to_string())).await?,
                    Ok(Packet::Event { name, data }) => {
                        let event = match socketio::event_message::<ServerMessage>(&name, data) {
                            Ok(msg) => {
                                debug!(event = msg.event(), "recv");
                                NetEvent::Message(msg)
                            }
                            Err(err) => {
                                warn!(%err, name = %name, "malformed event");
                                NetEvent::Malformed(format!("{name}: {err}"))
                            }
                        };
                        if events.send(event).is_err() {
                            return Ok(());
                        }
                    }
                    Ok(Packet::Disconnect | Packet::Close) => return Ok(()),
                    Ok(other) => debug!(?other, "ignoring packet"),
                    Err(err) => {
                        warn!(%err, "malformed packet");
                        if events.send(NetEvent::Malformed(err.to_string())).is_err() {
                            return Ok(());
                        }
                    }
                }
            }
            msg = outgoing.recv() => {
                let Some(msg) = msg else {
                    // Handle dropped: leave the namespace and close politely
                    let _ = ws.send(Message::text(socketio::DISCONNECT.to_string())).await;
                    let _ = ws.close().await;
                    return Ok(());
                };
                let packet = socketio::encode_event(&msg)?;
                debug!(packet = %packet, "send");
                ws.send(Message::text(packet)).await?;
            }
            () = sleep(window) => {
                return Err(NetError::Timeout(addr.to_string()));
            }
        }
    }
}

/// Read the Engine.IO open packet, join the default namespace, wait for the ack.
async fn open_session<S>(ws: &mut S) -> Result<Handshake, NetError>
where
    S: Stream<Item = Result<Message, websocket::Error>> + Sink<Message, Error = websocket::Error> + Unpin,
{
    let mut handshake = None;
    while let Some(frame) = ws.next().await {
        let frame = frame?;
        if frame.is_close() {
            break;
        }
        let Some(text) = frame.as_text() else {
            continue;
        };
        match socketio::decode(text)? {
            Packet::Open(open) => {
                handshake = Some(open);
                ws.send(Message::text(socketio::CONNECT.to_string())).await?;
            }
            Packet::Ping => ws.send(Message::text(socketio::PONG.to_string())).await?,
            Packet::Connected => {
                return handshake.ok_or_else(|| NetError::Handshake("namespace ack before open packet".into()));
            }
            Packet::ConnectError(reason) => return Err(NetError::Handshake(reason)),
            Packet::Close | Packet::Disconnect => break,
            other => debug!(?other, "ignoring packet during handshake"),
        }
    }
    Err(NetError::Handshake("connection closed during handshake".into()))
}

//! Host channel over a byte stream
//!
//! Works over any `AsyncRead`/`AsyncWrite` pair: Unix sockets and TCP in
//! production, `tokio::io::duplex` in tests.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{oneshot, Mutex as AsyncMutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::address::HostAddress;
use super::frame::{encode_request, EventFrame, InboundFrame, ResponseFrame};
use crate::application::ports::{DispatchError, EventSink, HostChannel};

type PendingMap = HashMap<u64, oneshot::Sender<ResponseFrame>>;
type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// State shared between callers and the reader task
struct Shared {
    pending: Mutex<PendingMap>,
    sinks: RwLock<Vec<Weak<dyn EventSink>>>,
    closed: AtomicBool,
}

/// Removes a call's pending entry when the call completes or is dropped
struct PendingCall<'a> {
    pending: &'a Mutex<PendingMap>,
    id: u64,
}

impl Drop for PendingCall<'_> {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.id);
    }
}

/// [`HostChannel`] speaking newline-delimited JSON frames.
///
/// Several proxies may share one channel; each host event is delivered to
/// every registered sink. Sinks are held weakly, so a dropped proxy stops
/// receiving events without unregistering.
pub struct StreamChannel {
    writer: AsyncMutex<BoxedWriter>,
    shared: Arc<Shared>,
    next_id: AtomicU64,
    reader_task: JoinHandle<()>,
}

impl StreamChannel {
    /// Wrap a connected stream and start the reader task.
    /// Must be called within a tokio runtime.
    pub fn new<R, W>(reader: R, writer: W) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let shared = Arc::new(Shared {
            pending: Mutex::new(HashMap::new()),
            sinks: RwLock::new(Vec::new()),
            closed: AtomicBool::new(false),
        });
        let reader_task = tokio::spawn(read_loop(reader, Arc::clone(&shared)));

        Self {
            writer: AsyncMutex::new(Box::new(writer)),
            shared,
            next_id: AtomicU64::new(1),
            reader_task,
        }
    }

    /// Connect to a host address
    pub async fn connect(address: &HostAddress) -> io::Result<Self> {
        debug!(%address, "connecting to recording host");
        match address {
            #[cfg(unix)]
            HostAddress::Unix(path) => {
                let stream = tokio::net::UnixStream::connect(path).await?;
                let (reader, writer) = stream.into_split();
                Ok(Self::new(reader, writer))
            }
            #[cfg(not(unix))]
            HostAddress::Unix(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Unix sockets are not available on this platform",
            )),
            HostAddress::Tcp(addr) => {
                let stream = tokio::net::TcpStream::connect(addr.as_str()).await?;
                stream.set_nodelay(true)?;
                let (reader, writer) = stream.into_split();
                Ok(Self::new(reader, writer))
            }
        }
    }

    /// Check if the host side has closed the connection
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Number of calls still waiting for a response
    pub fn pending_calls(&self) -> usize {
        self.shared.pending.lock().len()
    }

    async fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await
    }
}

impl Drop for StreamChannel {
    fn drop(&mut self) {
        self.reader_task.abort();
    }
}

#[async_trait]
impl HostChannel for StreamChannel {
    async fn send(
        &self,
        method: &str,
        args: Value,
        timeout: Duration,
    ) -> Result<Value, DispatchError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let line = encode_request(id, method, &args)
            .map_err(|e| DispatchError::Transport(format!("failed to encode request: {}", e)))?;

        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.shared.pending.lock();
            // The reader marks the channel closed before it clears the map
            if self.is_closed() {
                return Err(DispatchError::Transport("host connection closed".to_string()));
            }
            pending.insert(id, tx);
        }
        let _pending = PendingCall {
            pending: &self.shared.pending,
            id,
        };

        if let Err(e) = self.write_line(&line).await {
            return Err(DispatchError::Transport(format!("failed to write request: {}", e)));
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(response)) => match response.error {
                Some(message) => Err(DispatchError::Host {
                    method: method.to_string(),
                    message,
                }),
                None => Ok(response.result),
            },
            Ok(Err(_)) => Err(DispatchError::Transport("host connection closed".to_string())),
            Err(_) => Err(DispatchError::TimedOut {
                method: method.to_string(),
                timeout,
            }),
        }
    }

    fn add_event_sink(&self, sink: Arc<dyn EventSink>) {
        let mut sinks = self.shared.sinks.write();
        sinks.retain(|s| s.strong_count() > 0);
        sinks.push(Arc::downgrade(&sink));
    }
}

/// Route inbound frames until the host closes the stream
async fn read_loop<R>(reader: R, shared: Arc<Shared>)
where
    R: AsyncRead + Send + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match InboundFrame::parse(line) {
                    Ok(InboundFrame::Response(response)) => route_response(&shared, response),
                    Ok(InboundFrame::Event(event)) => route_event(&shared, event),
                    Err(e) => warn!(error = %e, "ignoring malformed host frame"),
                }
            }
            Ok(None) => {
                debug!("host closed the connection");
                break;
            }
            Err(e) => {
                error!(error = %e, "failed to read from host");
                break;
            }
        }
    }

    shared.closed.store(true, Ordering::SeqCst);
    // Dropping the senders fails every waiting call
    shared.pending.lock().clear();
}

fn route_response(shared: &Shared, response: ResponseFrame) {
    let id = response.id;
    let waiter = shared.pending.lock().remove(&id);
    let delivered = match waiter {
        Some(tx) => tx.send(response).is_ok(),
        None => false,
    };
    if !delivered {
        debug!(id, "discarding late response with no waiting call");
    }
}

fn route_event(shared: &Shared, event: EventFrame) {
    // Upgrade outside the lock so a sink may register another one
    let sinks: Vec<Arc<dyn EventSink>> = shared
        .sinks
        .read()
        .iter()
        .filter_map(Weak::upgrade)
        .collect();
    if sinks.is_empty() {
        debug!(event = %event.event, "no event sink registered, event discarded");
        return;
    }
    for sink in sinks {
        if let Err(e) = sink.on_event(&event.event, &event.data) {
            error!(event = %event.event, error = %e, "failed to handle host event");
        }
    }
}

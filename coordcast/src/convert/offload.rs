//! Optional worker offload for conversions.
//!
//! Producers talk to the worker through message passing only: a request
//! `{raw, format}` with a oneshot reply channel, never shared memory. The
//! worker drives the same engine as the inline path, so results are
//! identical whether or not the offload is in use.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::coord::Format;

use super::{ConversionEngine, ConversionResult, ConvertError};

/// Bound on queued requests before senders feel backpressure.
const REQUEST_CHANNEL_CAPACITY: usize = 64;

/// One conversion request in flight to the worker.
#[derive(Debug)]
pub struct OffloadRequest {
    /// Raw input text.
    pub raw: String,
    /// Format to interpret it as.
    pub format: Format,
    /// Reply channel for the result.
    reply: oneshot::Sender<ConversionResult>,
}

/// Client half of the offload channel.
///
/// Cheap to clone; all clones feed the same worker.
#[derive(Clone)]
pub struct OffloadClient {
    requests: mpsc::Sender<OffloadRequest>,
}

impl OffloadClient {
    /// Converts via the worker, awaiting its reply.
    ///
    /// Worker shutdown surfaces as an internal error rather than a hang.
    pub async fn convert(&self, raw: impl Into<String>, format: Format) -> ConversionResult {
        let (reply, response) = oneshot::channel();
        let request = OffloadRequest {
            raw: raw.into(),
            format,
            reply,
        };

        self.requests
            .send(request)
            .await
            .map_err(|_| ConvertError::Internal("conversion worker has shut down".to_string()))?;

        response
            .await
            .map_err(|_| ConvertError::Internal("conversion worker dropped the request".to_string()))?
    }
}

/// Spawns the conversion worker.
///
/// Returns the client plus the worker's join handle; cancel `shutdown` to
/// stop the worker after it finishes the request in hand.
pub fn spawn_worker(
    engine: Arc<ConversionEngine>,
    shutdown: CancellationToken,
) -> (OffloadClient, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<OffloadRequest>(REQUEST_CHANNEL_CAPACITY);

    let handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("conversion worker shutting down");
                    break;
                }
                request = rx.recv() => match request {
                    Some(request) => {
                        trace!(raw = %request.raw, format = %request.format, "worker converting");
                        let result = engine.convert(&request.raw, request.format).await;
                        // A dropped receiver means the caller gave up; fine.
                        let _ = request.reply.send(result);
                    }
                    None => break,
                },
            }
        }
    });

    (OffloadClient { requests: tx }, handle)
}

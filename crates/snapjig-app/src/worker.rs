//! Background worker for catalog I/O.
//!
//! Catalog calls are blocking, so they run on a dedicated thread and
//! the UI polls for completion once per frame. Each request carries
//! its own response channel; the worker thread lives for the life of
//! the app and requests are processed in order.

use std::sync::mpsc;

use log::error;
use snapjig_catalog::{CatalogClient, CatalogError, PuzzleRecord};

/// A request offloaded to the catalog worker.
#[derive(Debug)]
pub(crate) enum WorkRequest {
    /// List all puzzle records.
    ListPuzzles,
    /// Fetch one record plus its image bytes.
    FetchPuzzle(u32),
    /// Upload a new puzzle image.
    UploadPuzzle {
        name: String,
        file_name: String,
        bytes: Vec<u8>,
    },
    /// Submit a solve time (milliseconds) as a best-time candidate.
    SubmitBestTime { id: u32, millis: i64 },
}

/// A response produced by the catalog worker.
///
/// Errors are carried as display strings; the UI shows them inline
/// next to the action that caused them.
#[derive(Debug)]
pub(crate) enum WorkResponse {
    PuzzleList(Result<Vec<PuzzleRecord>, String>),
    PuzzleFetched(Result<(PuzzleRecord, Vec<u8>), String>),
    UploadDone(Result<PuzzleRecord, String>),
    BestTimeDone(Result<(), String>),
}

/// Errors that can occur while scheduling or receiving worker results.
#[derive(Debug, Clone, Copy, derive_more::Display, derive_more::Error)]
pub(crate) enum WorkError {
    /// The worker thread has stopped.
    #[display("catalog worker disconnected")]
    WorkerDisconnected,
}

struct WorkRequestEnvelope {
    request: WorkRequest,
    response_tx: mpsc::Sender<WorkResponse>,
}

/// A handle for polling one request's completion.
#[derive(Debug)]
pub(crate) struct WorkHandle {
    receiver: mpsc::Receiver<WorkResponse>,
}

impl WorkHandle {
    /// Attempts to poll for the completed response.
    ///
    /// Returns `Ok(None)` while the work is still in flight.
    pub(crate) fn poll(&mut self) -> Result<Option<WorkResponse>, WorkError> {
        use mpsc::TryRecvError;

        match self.receiver.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkError::WorkerDisconnected),
        }
    }
}

/// The catalog worker: a long-lived thread owning the HTTP client.
#[derive(Debug, Clone)]
pub(crate) struct CatalogWorker {
    sender: mpsc::Sender<WorkRequestEnvelope>,
}

impl std::fmt::Debug for WorkRequestEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkRequestEnvelope").finish()
    }
}

impl CatalogWorker {
    /// Spawns the worker thread for the given catalog.
    pub(crate) fn spawn(catalog: CatalogClient) -> Self {
        let (tx, rx) = mpsc::channel::<WorkRequestEnvelope>();
        std::thread::spawn(move || {
            while let Ok(envelope) = rx.recv() {
                let response = handle(&catalog, envelope.request);
                let _ = envelope.response_tx.send(response);
            }
        });
        Self { sender: tx }
    }

    /// Enqueues a request and returns a handle for polling completion.
    pub(crate) fn enqueue(&self, request: WorkRequest) -> WorkHandle {
        let (response_tx, response_rx) = mpsc::channel();
        if let Err(err) = self.sender.send(WorkRequestEnvelope {
            request,
            response_tx,
        }) {
            error!("catalog worker is gone: {err}");
        }
        WorkHandle {
            receiver: response_rx,
        }
    }
}

fn handle(catalog: &CatalogClient, request: WorkRequest) -> WorkResponse {
    match request {
        WorkRequest::ListPuzzles => {
            WorkResponse::PuzzleList(catalog.list().map_err(display_error))
        }
        WorkRequest::FetchPuzzle(id) => {
            WorkResponse::PuzzleFetched(fetch_puzzle(catalog, id).map_err(display_error))
        }
        WorkRequest::UploadPuzzle {
            name,
            file_name,
            bytes,
        } => WorkResponse::UploadDone(
            catalog
                .create(&name, &file_name, bytes)
                .map_err(display_error),
        ),
        WorkRequest::SubmitBestTime { id, millis } => WorkResponse::BestTimeDone(
            catalog.update_best_time(id, millis).map_err(display_error),
        ),
    }
}

fn fetch_puzzle(
    catalog: &CatalogClient,
    id: u32,
) -> Result<(PuzzleRecord, Vec<u8>), CatalogError> {
    let record = catalog.get(id)?;
    let bytes = catalog.fetch_image(&record.img)?;
    Ok((record, bytes))
}

fn display_error(err: CatalogError) -> String {
    err.to_string()
}

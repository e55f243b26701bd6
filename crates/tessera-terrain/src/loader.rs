//! Background decoding of height-map images.
//!
//! Decoding runs on a named worker thread and the result arrives over a bounded
//! channel that the frame loop polls, so the render thread never blocks on I/O.

use std::path::PathBuf;

use crossbeam_channel::{Receiver, TryRecvError, bounded};
use tracing::{debug, warn};

use crate::error::HeightmapError;
use crate::heightmap::HeightmapImage;

/// A single in-flight height-map load.
pub struct AsyncHeightmapLoader {
    path: PathBuf,
    receiver: Option<Receiver<Result<HeightmapImage, HeightmapError>>>,
}

impl AsyncHeightmapLoader {
    /// Start decoding `path` on a worker thread.
    pub fn spawn(path: PathBuf) -> Self {
        let (sender, receiver) = bounded(1);
        let worker_path = path.clone();

        let spawned = std::thread::Builder::new()
            .name("heightmap-loader".into())
            .spawn(move || {
                let result = HeightmapImage::load(&worker_path);
                // The receiver may already be gone if the load was abandoned.
                let _ = sender.send(result);
            });

        let receiver = match spawned {
            Ok(_) => Some(receiver),
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to spawn heightmap loader");
                None
            }
        };

        debug!(path = %path.display(), "heightmap load started");
        Self { path, receiver }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Non-blocking check for a finished load.
    ///
    /// Returns `Some` exactly once: the decoded image, the load error, or
    /// [`HeightmapError::LoaderDisconnected`] if the worker died.
    pub fn poll(&mut self) -> Option<Result<HeightmapImage, HeightmapError>> {
        let receiver = self.receiver.as_ref()?;
        let outcome = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(HeightmapError::LoaderDisconnected),
        };
        self.receiver = None;
        Some(outcome)
    }

    /// Block until the load finishes.
    pub fn wait(mut self) -> Result<HeightmapImage, HeightmapError> {
        match self.receiver.take() {
            Some(receiver) => receiver
                .recv()
                .unwrap_or(Err(HeightmapError::LoaderDisconnected)),
            None => Err(HeightmapError::LoaderDisconnected),
        }
    }

    /// True once [`poll`](Self::poll) has handed out the result.
    pub fn is_finished(&self) -> bool {
        self.receiver.is_none()
    }
}

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use upload_logging::{upload_debug, upload_warn};

use crate::upload::{ReqwestUploader, UploadSettings, Uploader};
use crate::EngineEvent;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    Upload { file_name: String, bytes: Vec<u8> },
}

/// Runs uploads on a background thread that owns a tokio runtime.
///
/// Commands go in through `upload`, results come back as `EngineEvent`s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings) -> Result<Self, EngineError> {
        Self::with_uploader(Arc::new(ReqwestUploader::new(settings)))
    }

    pub fn with_uploader(uploader: Arc<dyn Uploader>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let uploader = uploader.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(uploader.as_ref(), command, event_tx).await;
                });
            }
            upload_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn upload(&self, file_name: impl Into<String>, bytes: Vec<u8>) {
        let file_name = file_name.into();
        if self
            .cmd_tx
            .send(EngineCommand::Upload { file_name, bytes })
            .is_err()
        {
            upload_warn!("Engine thread is gone; upload dropped");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event. `None` once the engine thread has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    uploader: &dyn Uploader,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Upload { file_name, bytes } => {
            let result = uploader.upload(&file_name, bytes).await;
            let _ = event_tx.send(EngineEvent::UploadCompleted { file_name, result });
        }
    }
}

use std::sync::Arc;

use upload_core::{Effect, ImageBlob, Msg, UploadFailure, UploadResponse};
use upload_engine::{
    EngineError, EngineEvent, EngineHandle, FailureKind, ReqwestUploader, UploadError,
    UploadOutput, UploadSettings, Uploader,
};
use upload_logging::{upload_info, upload_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: UploadSettings) -> Result<Self, EngineError> {
        Self::with_uploader(Arc::new(ReqwestUploader::new(settings)))
    }

    pub fn with_uploader(uploader: Arc<dyn Uploader>) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::with_uploader(uploader)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartUpload { file } => {
                    upload_info!(
                        "StartUpload file={} bytes={}",
                        file.name,
                        file.bytes.len()
                    );
                    self.engine.upload(file.name, file.bytes);
                }
            }
        }
    }

    /// Blocks until the engine reports back. `None` if the engine stopped.
    pub fn next_msg(&self) -> Option<Msg> {
        self.engine.recv().map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { file_name, result } => {
            if let Err(err) = &result {
                upload_warn!("Upload of {} failed: {}", file_name, err);
            }
            Msg::UploadCompleted(map_result(result))
        }
    }
}

fn map_result(result: Result<UploadOutput, UploadError>) -> UploadResponse {
    match result {
        Ok(output) => Ok(ImageBlob {
            bytes: output.bytes,
            content_type: output.content_type,
        }),
        Err(UploadError {
            kind: FailureKind::HttpStatus { code, reason },
            ..
        }) => Err(UploadFailure::HttpStatus { code, reason }),
        // Transport details go to the log; the page only gets the category.
        Err(UploadError { kind, .. }) => Err(UploadFailure::Network {
            message: kind.to_string(),
        }),
    }
}

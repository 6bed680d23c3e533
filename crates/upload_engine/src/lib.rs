//! Upload engine: multipart HTTP upload, background execution and blob storage.
mod blob;
mod engine;
mod persist;
mod types;
mod upload;

pub use blob::{blob_filename, BlobRef, BlobStore};
pub use engine::{EngineError, EngineHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, FailureKind, UploadError, UploadOutput};
pub use upload::{
    reason_phrase, ReqwestUploader, UploadSettings, Uploader, DEFAULT_ENDPOINT,
    DEFAULT_FIELD_NAME,
};

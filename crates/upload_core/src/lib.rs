//! Upload core: pure widget state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AttemptStatus, FileSelection, ImageBlob, SelectedFile, UploadFailure, UploadResponse,
    WidgetState,
};
pub use update::{failure_message, success_message, update, SUCCESS_MESSAGE};
pub use view_model::{ImageView, SubmitLabel, WidgetViewModel, SUBMIT_LABEL};

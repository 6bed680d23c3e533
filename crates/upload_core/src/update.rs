use crate::{AttemptStatus, Effect, Msg, WidgetState};

/// Message shown after the server returned the processed image.
pub const SUCCESS_MESSAGE: &str = "Here you go!";

pub fn success_message() -> String {
    SUCCESS_MESSAGE.to_string()
}

/// Formats the status line for a failed upload, e.g. `Upload failed. Error: Not Found.`
pub fn failure_message(reason: &str) -> String {
    format!("Upload failed. Error: {reason}.")
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WidgetState, msg: Msg) -> (WidgetState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelectionChanged(selection) => {
            // The input is only live until the first click; after that the
            // attempt owns the widget.
            if state.status() == AttemptStatus::Idle {
                state.set_selection(selection);
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.status() != AttemptStatus::Idle || !state.can_submit() {
                return (state, Vec::new());
            }
            match state.begin_attempt() {
                Some(file) => vec![Effect::StartUpload { file }],
                None => Vec::new(),
            }
        }
        Msg::UploadCompleted(response) => {
            if state.status() != AttemptStatus::InFlight {
                return (state, Vec::new());
            }
            match response {
                Ok(blob) => state.complete_success(blob, success_message()),
                Err(failure) => {
                    let message = failure_message(failure.reason());
                    state.complete_failure(failure, message);
                }
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

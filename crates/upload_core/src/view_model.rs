use crate::{AttemptStatus, ImageBlob};

/// Label shown on the submit control before any click.
pub const SUBMIT_LABEL: &str = "Submit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitLabel {
    Text(String),
    /// Spinner shown once the upload has started; never reverted.
    Busy,
}

impl Default for SubmitLabel {
    fn default() -> Self {
        SubmitLabel::Text(SUBMIT_LABEL.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub blob: Option<ImageBlob>,
    pub hidden: bool,
}

impl Default for ImageView {
    fn default() -> Self {
        Self {
            blob: None,
            hidden: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetViewModel {
    pub status: AttemptStatus,
    pub submit_enabled: bool,
    pub submit_label: SubmitLabel,
    pub form_present: bool,
    pub image: ImageView,
    pub message: Option<String>,
    pub dirty: bool,
}

impl Default for WidgetViewModel {
    fn default() -> Self {
        Self {
            status: AttemptStatus::Idle,
            submit_enabled: false,
            submit_label: SubmitLabel::default(),
            form_present: true,
            image: ImageView::default(),
            message: None,
            dirty: false,
        }
    }
}

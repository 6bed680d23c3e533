use std::fmt;

use crate::view_model::{ImageView, SubmitLabel, WidgetViewModel};

/// A single file picked by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

// File contents can be large; keep debug output to the name and size.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Ordered file selection as reported by the file input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSelection(Vec<SelectedFile>);

impl FileSelection {
    pub fn new(files: Vec<SelectedFile>) -> Self {
        Self(files)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The file that gets uploaded; any further files are ignored.
    pub fn first(&self) -> Option<&SelectedFile> {
        self.0.first()
    }
}

impl From<SelectedFile> for FileSelection {
    fn from(file: SelectedFile) -> Self {
        Self(vec![file])
    }
}

/// Response body of a successful upload, displayable as an image.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlob")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    /// Server answered with a status outside 2xx.
    HttpStatus { code: u16, reason: String },
    /// The request never produced a response.
    Network { message: String },
    /// The response arrived but could not be kept for display.
    Storage { message: String },
}

impl UploadFailure {
    /// Failure for a response outside the 2xx range.
    pub fn http(code: u16, reason: impl Into<String>) -> Self {
        UploadFailure::HttpStatus {
            code,
            reason: reason.into(),
        }
    }

    /// Human-readable text embedded in the failure message.
    pub fn reason(&self) -> &str {
        match self {
            UploadFailure::HttpStatus { reason, .. } => reason,
            UploadFailure::Network { message } | UploadFailure::Storage { message } => message,
        }
    }
}

pub type UploadResponse = Result<ImageBlob, UploadFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttemptStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl AttemptStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, AttemptStatus::Succeeded | AttemptStatus::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    selection: FileSelection,
    can_submit: bool,
    status: AttemptStatus,
    busy: bool,
    result_blob: Option<ImageBlob>,
    image_hidden: bool,
    form_present: bool,
    message: Option<String>,
    failure: Option<UploadFailure>,
    dirty: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            selection: FileSelection::empty(),
            can_submit: false,
            status: AttemptStatus::Idle,
            busy: false,
            result_blob: None,
            image_hidden: true,
            form_present: true,
            message: None,
            failure: None,
            dirty: false,
        }
    }
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    pub fn can_submit(&self) -> bool {
        self.can_submit
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    pub fn failure(&self) -> Option<&UploadFailure> {
        self.failure.as_ref()
    }

    pub fn view(&self) -> WidgetViewModel {
        WidgetViewModel {
            status: self.status,
            submit_enabled: self.can_submit,
            submit_label: if self.busy {
                SubmitLabel::Busy
            } else {
                SubmitLabel::default()
            },
            form_present: self.form_present,
            image: ImageView {
                blob: self.result_blob.clone(),
                hidden: self.image_hidden,
            },
            message: self.message.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_selection(&mut self, selection: FileSelection) {
        let can_submit = !selection.is_empty();
        if self.can_submit != can_submit {
            self.can_submit = can_submit;
            self.dirty = true;
        }
        self.selection = selection;
    }

    /// Disables the control, shows the busy label and hands out the file to upload.
    pub(crate) fn begin_attempt(&mut self) -> Option<SelectedFile> {
        let file = self.selection.first()?.clone();
        self.can_submit = false;
        self.busy = true;
        self.status = AttemptStatus::InFlight;
        self.dirty = true;
        Some(file)
    }

    pub(crate) fn complete_success(&mut self, blob: ImageBlob, message: String) {
        self.status = AttemptStatus::Succeeded;
        self.result_blob = Some(blob);
        self.image_hidden = false;
        self.finish(message);
    }

    pub(crate) fn complete_failure(&mut self, failure: UploadFailure, message: String) {
        self.status = AttemptStatus::Failed;
        self.failure = Some(failure);
        self.finish(message);
    }

    fn finish(&mut self, message: String) {
        self.form_present = false;
        self.message = Some(message);
        self.dirty = true;
    }
}

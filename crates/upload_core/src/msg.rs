#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The file input reported a new selection (possibly empty).
    FileSelectionChanged(crate::FileSelection),
    /// User clicked the submit control.
    SubmitClicked,
    /// The upload request resolved, successfully or not.
    UploadCompleted(crate::UploadResponse),
    /// Fallback for placeholder wiring.
    NoOp,
}

use crate::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the file to the upload endpoint. Emitted at most once per widget.
    StartUpload { file: SelectedFile },
}

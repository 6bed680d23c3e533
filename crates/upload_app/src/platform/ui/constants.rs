use super::page::ElementId;

pub const FORM: ElementId = ElementId::new("form");
pub const FILE_INPUT: ElementId = ElementId::new("file_input");
pub const SUBMIT_BUTTON: ElementId = ElementId::new("submit_button");
pub const IMAGE: ElementId = ElementId::new("image");
pub const MSG: ElementId = ElementId::new("msg");

/// Label content swapped into the submit button while uploading.
pub const BUSY_INDICATOR: &str = "[uploading...]";

use upload_core::{SubmitLabel, WidgetViewModel};

use super::constants::*;
use super::page::PageCommand;

/// Emits the page commands that take the page from `previous` to `current`.
///
/// Only changed parts are touched, so one-shot transitions (disabling the
/// button, removing the form) reach the page exactly once.
pub fn render(
    previous: &WidgetViewModel,
    current: &WidgetViewModel,
    image_url: Option<&str>,
) -> Vec<PageCommand> {
    let mut cmds = Vec::new();

    if previous.submit_enabled != current.submit_enabled {
        cmds.push(PageCommand::SetEnabled {
            element: SUBMIT_BUTTON,
            enabled: current.submit_enabled,
        });
    }
    if previous.submit_label != current.submit_label {
        cmds.push(PageCommand::SetLabel {
            element: SUBMIT_BUTTON,
            label: label_text(&current.submit_label),
        });
    }

    if let (None, Some(_), Some(url)) = (&previous.image.blob, &current.image.blob, image_url) {
        cmds.push(PageCommand::SetImageSource {
            element: IMAGE,
            url: url.to_string(),
        });
    }
    if previous.image.hidden != current.image.hidden {
        cmds.push(PageCommand::SetHidden {
            element: IMAGE,
            hidden: current.image.hidden,
        });
    }

    if previous.form_present && !current.form_present {
        cmds.push(PageCommand::Remove { element: FORM });
    }

    if previous.message != current.message {
        cmds.push(PageCommand::SetText {
            element: MSG,
            text: current.message.clone().unwrap_or_default(),
        });
    }

    cmds
}

fn label_text(label: &SubmitLabel) -> String {
    match label {
        SubmitLabel::Text(text) => text.clone(),
        SubmitLabel::Busy => BUSY_INDICATOR.to_string(),
    }
}

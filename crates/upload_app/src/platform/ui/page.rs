//! Page surface the widget drives.
//!
//! The widget never looks elements up by itself; it is handed a `Page` and
//! talks to it only through `PageCommand`s.

use std::collections::BTreeMap;
use std::fmt;

use upload_logging::upload_warn;

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(&'static str);

impl ElementId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    SetEnabled { element: ElementId, enabled: bool },
    SetLabel { element: ElementId, label: String },
    SetImageSource { element: ElementId, url: String },
    SetHidden { element: ElementId, hidden: bool },
    /// Detaches the element and everything inside it.
    Remove { element: ElementId },
    SetText { element: ElementId, text: String },
}

pub trait Page {
    fn apply(&mut self, command: PageCommand);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub parent: Option<ElementId>,
    pub enabled: bool,
    pub hidden: bool,
    pub label: Option<String>,
    pub text: String,
    pub source: Option<String>,
}

/// In-memory page holding the upload markup: a form with the file input,
/// plus the submit button, image and message outside of it. The button
/// outlives the form so the busy indicator stays on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessPage {
    elements: BTreeMap<ElementId, Element>,
    history: Vec<PageCommand>,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPage {
    pub fn new() -> Self {
        let mut elements = BTreeMap::new();
        elements.insert(
            FORM,
            Element {
                enabled: true,
                ..Element::default()
            },
        );
        elements.insert(
            FILE_INPUT,
            Element {
                parent: Some(FORM),
                enabled: true,
                ..Element::default()
            },
        );
        elements.insert(
            SUBMIT_BUTTON,
            Element {
                enabled: false,
                label: Some(upload_core::SUBMIT_LABEL.to_string()),
                ..Element::default()
            },
        );
        elements.insert(
            IMAGE,
            Element {
                hidden: true,
                ..Element::default()
            },
        );
        elements.insert(MSG, Element::default());
        Self {
            elements,
            history: Vec::new(),
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Every command applied so far, in order.
    pub fn history(&self) -> &[PageCommand] {
        &self.history
    }

    pub fn message(&self) -> &str {
        self.element(MSG).map(|el| el.text.as_str()).unwrap_or("")
    }

    pub fn image_source(&self) -> Option<&str> {
        self.element(IMAGE).and_then(|el| el.source.as_deref())
    }

    pub fn image_hidden(&self) -> bool {
        self.element(IMAGE).is_none_or(|el| el.hidden)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let element = self.elements.get_mut(&id);
        if element.is_none() {
            upload_warn!("Page command for missing element '{}'", id);
        }
        element
    }

    fn remove(&mut self, id: ElementId) {
        if self.elements.remove(&id).is_none() {
            upload_warn!("Remove for missing element '{}'", id);
            return;
        }
        let children: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, el)| el.parent == Some(id))
            .map(|(child, _)| *child)
            .collect();
        for child in children {
            self.remove(child);
        }
    }
}

impl Page for HeadlessPage {
    fn apply(&mut self, command: PageCommand) {
        self.history.push(command.clone());
        match command {
            PageCommand::SetEnabled { element, enabled } => {
                if let Some(el) = self.element_mut(element) {
                    el.enabled = enabled;
                }
            }
            PageCommand::SetLabel { element, label } => {
                if let Some(el) = self.element_mut(element) {
                    el.label = Some(label);
                }
            }
            PageCommand::SetImageSource { element, url } => {
                if let Some(el) = self.element_mut(element) {
                    el.source = Some(url);
                }
            }
            PageCommand::SetHidden { element, hidden } => {
                if let Some(el) = self.element_mut(element) {
                    el.hidden = hidden;
                }
            }
            PageCommand::Remove { element } => self.remove(element),
            PageCommand::SetText { element, text } => {
                if let Some(el) = self.element_mut(element) {
                    el.text = text;
                }
            }
        }
    }
}

impl fmt::Display for HeadlessPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.contains(FORM) {
            writeln!(f, "form: removed")?;
        }
        if let Some(button) = self.element(SUBMIT_BUTTON) {
            writeln!(
                f,
                "submit: {} [{}]",
                button.label.as_deref().unwrap_or(""),
                if button.enabled { "enabled" } else { "disabled" }
            )?;
        }
        match (self.image_hidden(), self.image_source()) {
            (false, Some(source)) => writeln!(f, "image: {source}")?,
            (false, None) => writeln!(f, "image: (no source)")?,
            (true, _) => writeln!(f, "image: hidden")?,
        }
        write!(f, "message: {}", self.message())
    }
}

//! Actionable page element as reported by the page collaborator.

use serde::Deserialize;

/// One actionable element found on a rendered page.
///
/// Pages report raw element state; deciding whether an element is the
/// purchase control happens in [`crate::application::services::AvailabilityProbe`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControlSnapshot {
    /// Lowercase tag name (`button`, `a`, `input`, ...).
    pub tag: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Accumulated rendered text (the `value` for inputs).
    #[serde(default)]
    pub text: String,
    /// `disabled` property set or `aria-disabled="true"`.
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub visible: bool,
}

impl ControlSnapshot {
    pub fn new(tag: &str, text: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            role: None,
            text: text.to_string(),
            disabled: false,
            visible: true,
        }
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Whether the element type can trigger a purchase.
    ///
    /// Headings, spans and other decorative elements never qualify even if
    /// their text matches the label.
    pub fn is_actionable(&self) -> bool {
        matches!(self.tag.as_str(), "button" | "a" | "input")
            || self
                .role
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case("button"))
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

//! Alert message model.

use crate::domain::entities::PageSnapshot;
use crate::utils::path_matcher::extract_path;

/// Embed accent colour (green) used for availability alerts.
pub const AVAILABLE_COLOR: u32 = 3_066_993;

/// A named value shown in the alert body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertField {
    pub name: String,
    pub value: String,
}

impl AlertField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Transport-neutral alert message.
///
/// Adapters in [`crate::infrastructure::notify`] translate this into their
/// own wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredAlert {
    /// Plain text line sent alongside the embed, typically a mention.
    pub mention: Option<String>,
    pub title: String,
    /// Clickable link. Always the verified current URL, never the configured target.
    pub url: String,
    pub color: u32,
    pub fields: Vec<AlertField>,
    /// Target-vs-current path diagnostic.
    pub footer: String,
}

impl StructuredAlert {
    /// Builds the alert sent when the purchase control is available.
    pub fn product_available(snapshot: &PageSnapshot, label: &str, mention: Option<&str>) -> Self {
        let mention = mention
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(|m| format!("{m} Product is available to buy!"));

        Self {
            mention,
            title: "Click to buy!".to_string(),
            url: snapshot.url.clone(),
            color: AVAILABLE_COLOR,
            fields: vec![
                AlertField::new("Status", format!("'{label}' button detected and enabled.")),
                AlertField::new("Page title", snapshot.title.clone()),
                AlertField::new("Heading", snapshot.heading.clone()),
                AlertField::new("Checked at", snapshot.checked_at()),
            ],
            footer: path_diagnostic(snapshot),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Raw target and current paths, for operators debugging a false positive.
pub fn path_diagnostic(snapshot: &PageSnapshot) -> String {
    format!(
        "target path: {} | current path: {}",
        extract_path(&snapshot.target_url),
        extract_path(&snapshot.url)
    )
}

//! Collaborator traits for the domain layer.
//!
//! The run logic only sees these traits. Concrete implementations live in
//! `crate::infrastructure`, and mocks are generated via `mockall` for tests.
//!
//! # Available Ports
//!
//! - [`PageLoader`] / [`RenderedPage`] - Browser navigation and page reads
//! - [`AlertDispatcher`] - Alert delivery

pub mod alert_dispatcher;
pub mod page_loader;

pub use alert_dispatcher::AlertDispatcher;
pub use page_loader::{PageLoader, RenderedPage};

#[cfg(test)]
pub use alert_dispatcher::MockAlertDispatcher;
#[cfg(test)]
pub use page_loader::{MockPageLoader, MockRenderedPage};

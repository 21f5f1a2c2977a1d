//! Filedock Widget Library
//!
//! The facade a hosting UI drives: a refreshable snapshot of the attached
//! files, configuration setters, the "download all" trigger, the
//! upload-completion handler, per-row actions, and the display helpers the
//! row template needs.

pub mod display;
pub mod hooks;
pub mod row_action;
pub mod widget;

// Re-export commonly used types
pub use hooks::{AlwaysConfirm, ConfirmPrompt, Navigator, NoOpNavigator, WidgetHooks};
pub use row_action::RowAction;
pub use widget::FileWidget;

//! Per-row actions
//!
//! A closed set dispatched through an exhaustive match, so an unhandled
//! action is a compile error rather than a silent fall-through.

use std::str::FromStr;

use filedock_core::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Download,
    Share,
    PublicLink,
    Details,
    Edit,
    Delete,
    Remove,
}

impl RowAction {
    pub const ALL: [RowAction; 7] = [
        RowAction::Download,
        RowAction::Share,
        RowAction::PublicLink,
        RowAction::Details,
        RowAction::Edit,
        RowAction::Delete,
        RowAction::Remove,
    ];

    /// The menu code the host template emits for this action.
    pub fn code(self) -> &'static str {
        match self {
            RowAction::Download => "download",
            RowAction::Share => "share",
            RowAction::PublicLink => "publiclink",
            RowAction::Details => "details",
            RowAction::Edit => "edit",
            RowAction::Delete => "delete",
            RowAction::Remove => "remove",
        }
    }
}

impl FromStr for RowAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RowAction::ALL
            .into_iter()
            .find(|action| action.code() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown row action: {}", s)))
    }
}

//! Per-row action buttons.

use std::fmt;

/// What a row action does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Edit,
    Delete,
    Custom(String),
}

impl ActionKind {
    /// Name of the kind as used in control classes.
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Edit => "edit",
            ActionKind::Delete => "delete",
            ActionKind::Custom(name) => name,
        }
    }

    /// Class carried by the rendered button, e.g. `btn-edit`.
    pub fn class(&self) -> String {
        format!("btn-{}", self.as_str())
    }

    /// Recovers the kind from a button class.
    pub fn from_class(class: &str) -> Option<Self> {
        let name = class.strip_prefix("btn-")?;
        Some(match name {
            "" => return None,
            "edit" => ActionKind::Edit,
            "delete" => ActionKind::Delete,
            other => ActionKind::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A button rendered in every row's actions cell.
///
/// The callback is not stored here: it lives in the grid's
/// [`HandlerRegistry`](crate::bind::HandlerRegistry) under
/// [`Control::Action`](crate::bind::Control::Action), so redraws never
/// attach or leak per-row handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub kind: ActionKind,
    /// Icon identifier, e.g. `fas fa-edit`.
    pub icon: String,
    /// Tooltip.
    pub title: String,
}

impl RowAction {
    /// Creates an action.
    pub fn new(kind: ActionKind, icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            icon: icon.into(),
            title: title.into(),
        }
    }

    /// Standard edit action.
    pub fn edit(title: impl Into<String>) -> Self {
        Self::new(ActionKind::Edit, "fas fa-edit", title)
    }

    /// Standard delete action.
    pub fn delete(title: impl Into<String>) -> Self {
        Self::new(ActionKind::Delete, "fas fa-trash", title)
    }
}

//! Interaction events and the callback registry.
//!
//! Surfaces report user interaction as [`GridEvent`]s and the grid turns
//! them into state changes. Caller callbacks (add button, row actions) live
//! in a [`HandlerRegistry`] keyed by [`Control`]; binding and unbinding is
//! explicit and independent of how often the grid redraws.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::column::ActionKind;
use crate::model::RowId;

/// A user interaction reported by a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// A column header was clicked.
    HeaderClicked(String),
    PreviousPage,
    NextPage,
    /// A page number was chosen directly.
    GotoPage(usize),
    /// The rows-per-page selector changed.
    RowsPerPageChanged(usize),
    /// The search button was pressed with this input text.
    Search(String),
    AddClicked,
    /// A row (outside its action buttons) was clicked.
    RowClicked(RowId),
    /// A row action button was clicked; identified by class and row id.
    ActionClicked { class: String, id: RowId },
}

/// A control that can carry a caller callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    AddButton,
    Action(ActionKind),
}

/// A caller callback. Row actions receive the row id, the add button `None`.
pub type Handler = Arc<dyn Fn(Option<&RowId>) + Send + Sync>;

/// Registry of caller callbacks.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<Control, Handler>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to a control, replacing any previous one.
    pub fn bind(&mut self, control: Control, handler: Handler) {
        self.handlers.insert(control, handler);
    }

    /// Bind a row action callback.
    pub fn bind_action<F>(&mut self, kind: ActionKind, callback: F)
    where
        F: Fn(&RowId) + Send + Sync + 'static,
    {
        self.bind(
            Control::Action(kind),
            Arc::new(move |id: Option<&RowId>| {
                if let Some(id) = id {
                    callback(id);
                }
            }),
        );
    }

    /// Bind the add button callback.
    pub fn bind_add<F>(&mut self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.bind(Control::AddButton, Arc::new(move |_: Option<&RowId>| callback()));
    }

    /// Remove the handler of a control. Returns whether one was bound.
    pub fn unbind(&mut self, control: &Control) -> bool {
        self.handlers.remove(control).is_some()
    }

    /// Get the handler of a control.
    pub fn get(&self, control: &Control) -> Option<Handler> {
        self.handlers.get(control).cloned()
    }

    /// Whether a control has a handler.
    pub fn is_bound(&self, control: &Control) -> bool {
        self.handlers.contains_key(control)
    }

    /// Invoke the handler of a control. Returns `false` if none is bound.
    pub fn invoke(&self, control: &Control, id: Option<&RowId>) -> bool {
        match self.handlers.get(control) {
            Some(handler) => {
                handler(id);
                true
            }
            None => false,
        }
    }

    /// Clear all handlers.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Get the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &self.len())
            .finish()
    }
}

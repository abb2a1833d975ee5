//! Presentation targets.
//!
//! A [`Host`] hands out the [`Surface`] registered under a container id; the
//! grid draws every frame into it. Drawing is decoupled from state so the
//! whole engine runs headless.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::view::GridView;

/// Something that can display a [`GridView`].
pub trait Surface {
    /// Draw a frame. Must be idempotent for equal views.
    fn draw(&mut self, view: &GridView);
}

/// Provides surfaces by container id.
pub trait Host {
    /// Mount the container with the given id, `None` if it does not exist.
    fn mount(&mut self, container_id: &str) -> Option<Box<dyn Surface>>;
}

/// A surface that keeps every frame it is asked to draw.
///
/// Clones share the same frame log, so a caller can keep one clone and hand
/// the other to the grid.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    frames: Rc<RefCell<Vec<GridView>>>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent frame.
    pub fn last(&self) -> Option<GridView> {
        self.frames.borrow().last().cloned()
    }

    /// Number of frames drawn so far.
    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }

    /// All frames drawn so far.
    pub fn frames(&self) -> Vec<GridView> {
        self.frames.borrow().clone()
    }
}

impl Surface for Recorder {
    fn draw(&mut self, view: &GridView) {
        self.frames.borrow_mut().push(view.clone());
    }
}

/// A host backed by a fixed set of recorders, for headless use.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    containers: HashMap<String, Recorder>,
}

impl MemoryHost {
    /// Create a host without containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container and return its recorder.
    pub fn add_container(&mut self, container_id: impl Into<String>) -> Recorder {
        let recorder = Recorder::new();
        self.containers.insert(container_id.into(), recorder.clone());
        recorder
    }
}

impl Host for MemoryHost {
    fn mount(&mut self, container_id: &str) -> Option<Box<dyn Surface>> {
        self.containers
            .get(container_id)
            .map(|recorder| Box::new(recorder.clone()) as Box<dyn Surface>)
    }
}

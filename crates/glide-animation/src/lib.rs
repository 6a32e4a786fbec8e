//! Spline path animation for Glide
//!
//! Moves a point along a smooth Catmull-Rom path either at constant speed
//! ("train" mode, via an arc-length table) or over a fixed duration (time
//! mode), with optional looping and look-ahead orientation.
//!
//! - `PathAnimator`: one traversal (play / pause / resume / reset / update)
//! - `ArcLengthTable`: distance ↔ parameter lookup
//! - `PathSystem`: many animators ticked together, sharing tables

pub mod animator;
pub mod arc_length;
pub mod attachment;
pub mod cache;
pub mod config;
pub mod debug;
pub mod events;
pub mod loader;
pub mod orientation;
pub mod traversal;

pub use animator::{PathAnimator, PathFrame};
pub use arc_length::{ArcLengthSample, ArcLengthTable};
pub use attachment::{Movable, SharedMovable};
pub use config::{AnimatorConfig, TraversalMode};
pub use events::{ListenerId, PathEvent};
pub use loader::{load_path_from_file, load_path_from_str, PathDefinition};
pub use orientation::Facing;
pub use traversal::{PlaybackState, TraversalState};

use cache::TableCache;
use glide_core::{GlideError, PathId, Result};
use glide_runtime::{EventBus, RuntimeSystem};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::info;

/// An event raised by one of the system's animators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSystemEvent {
    pub path: PathId,
    pub event: PathEvent,
}

struct Entry {
    name: String,
    animator: PathAnimator,
    forwarder: ListenerId,
}

/// Owns a set of named animators and ticks them in registration order.
///
/// Paths with identical control points and table resolution share one
/// arc-length table. Events from every animator are collected on a bus that
/// consumers drain after each frame.
pub struct PathSystem {
    paths: BTreeMap<PathId, Entry>,
    tables: TableCache,
    events: Rc<RefCell<EventBus<PathSystemEvent>>>,
}

impl PathSystem {
    pub fn new() -> Self {
        Self {
            paths: BTreeMap::new(),
            tables: TableCache::new(),
            events: Rc::new(RefCell::new(EventBus::new())),
        }
    }

    /// Register a path from its definition. The animator starts idle.
    pub fn add(&mut self, def: &PathDefinition) -> Result<PathId> {
        def.animator.validate()?;
        let path = def.to_path()?;
        let table = self
            .tables
            .get_or_build(&path, def.animator.arc_length_segments)?;
        let animator = PathAnimator::with_table(path, table, def.animator.clone())?;
        Ok(self.insert(def.name.clone(), animator))
    }

    /// Register an already-built animator.
    pub fn add_animator(&mut self, name: impl Into<String>, animator: PathAnimator) -> PathId {
        self.insert(name.into(), animator)
    }

    fn insert(&mut self, name: String, mut animator: PathAnimator) -> PathId {
        let id = PathId::new();
        let bus = Rc::clone(&self.events);
        let forwarder = animator.subscribe(move |event| {
            bus.borrow_mut().push(PathSystemEvent {
                path: id,
                event: *event,
            })
        });
        self.paths.insert(
            id,
            Entry {
                name,
                animator,
                forwarder,
            },
        );
        id
    }

    /// Unregister a path and hand its animator back. Its events no longer
    /// reach this system's bus.
    pub fn remove(&mut self, id: PathId) -> Option<PathAnimator> {
        let mut entry = self.paths.remove(&id)?;
        entry.animator.unsubscribe(entry.forwarder);
        Some(entry.animator)
    }

    /// Forget cached tables that no registered (or returned) animator uses.
    pub fn prune_tables(&mut self) {
        self.tables.prune();
    }

    pub fn get(&self, id: PathId) -> Option<&PathAnimator> {
        self.paths.get(&id).map(|e| &e.animator)
    }

    pub fn get_mut(&mut self, id: PathId) -> Option<&mut PathAnimator> {
        self.paths.get_mut(&id).map(|e| &mut e.animator)
    }

    /// First registered path with this name.
    pub fn find(&self, name: &str) -> Option<PathId> {
        self.paths
            .iter()
            .find(|(_, e)| e.name == name)
            .map(|(id, _)| *id)
    }

    pub fn name_of(&self, id: PathId) -> Option<&str> {
        self.paths.get(&id).map(|e| e.name.as_str())
    }

    pub fn play(&mut self, id: PathId) -> Result<()> {
        self.get_mut(id)
            .ok_or_else(|| GlideError::UnknownPath(id.to_string()))?
            .play();
        Ok(())
    }

    pub fn play_all(&mut self) {
        for entry in self.paths.values_mut() {
            entry.animator.play();
        }
    }

    /// Take every event raised since the last drain, in the order raised.
    pub fn drain_events(&mut self) -> Vec<PathSystemEvent> {
        self.events.borrow_mut().drain()
    }

    /// Registered paths in registration order.
    pub fn ids(&self) -> impl Iterator<Item = PathId> + '_ {
        self.paths.keys().copied()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of distinct arc-length tables backing the registered paths.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Number of animators currently playing.
    pub fn active_count(&self) -> usize {
        self.paths
            .values()
            .filter(|e| e.animator.is_playing())
            .count()
    }
}

impl Default for PathSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem for PathSystem {
    fn initialize(&mut self) -> Result<()> {
        info!(
            paths = self.path_count(),
            tables = self.table_count(),
            "path system initialized"
        );
        Ok(())
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        for entry in self.paths.values_mut() {
            entry.animator.update(dt);
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        info!(paths = self.path_count(), "path system shut down");
        Ok(())
    }

    fn name(&self) -> &str {
        "paths"
    }
}

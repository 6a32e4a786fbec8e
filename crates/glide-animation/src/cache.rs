//! Shared arc-length tables for paths with identical geometry

use crate::arc_length::ArcLengthTable;
use glide_core::{CatmullRomPath, ContentHash, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Builds each distinct (control points, resolution) table once.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<ContentHash, Arc<ArcLengthTable>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for this geometry, building it on first use.
    pub fn get_or_build(
        &mut self,
        path: &CatmullRomPath,
        segments: usize,
    ) -> Result<Arc<ArcLengthTable>> {
        let key = ContentHash::from_control_points(path.points(), segments);
        if let Some(table) = self.tables.get(&key) {
            debug!(%key, "reusing arc-length table");
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(ArcLengthTable::build(path, segments)?);
        self.tables.insert(table.source(), Arc::clone(&table));
        Ok(table)
    }

    /// Drop tables no animator holds any more.
    pub fn prune(&mut self) {
        self.tables.retain(|_, table| Arc::strong_count(table) > 1);
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

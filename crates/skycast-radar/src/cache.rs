//! Tile layer handles keyed by frame timestamp.
//!
//! Entries are created on first display and live until the controller is torn
//! down. The frame list is fetched once and bounded, so nothing is evicted.

use std::collections::HashMap;

#[derive(Debug)]
pub struct TileLayerCache<L> {
    layers: HashMap<i64, L>,
}

impl<L> TileLayerCache<L> {
    pub fn new() -> Self {
        Self {
            layers: HashMap::new(),
        }
    }

    /// Returns the layer for `time`, creating it with `create` on a miss.
    pub fn get_or_insert_with<F>(&mut self, time: i64, create: F) -> &L
    where
        F: FnOnce() -> L,
    {
        self.layers.entry(time).or_insert_with(|| {
            tracing::trace!("Creating radar layer for frame {}", time);
            create()
        })
    }

    pub fn get(&self, time: i64) -> Option<&L> {
        self.layers.get(&time)
    }

    pub fn layers(&self) -> impl Iterator<Item = &L> {
        self.layers.values()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Empties the cache, handing back every layer so the caller can detach it.
    pub fn drain(&mut self) -> Vec<L> {
        self.layers.drain().map(|(_, layer)| layer).collect()
    }
}

impl<L> Default for TileLayerCache<L> {
    fn default() -> Self {
        Self::new()
    }
}

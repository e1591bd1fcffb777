//! Authoritative obstacle state management utilities.

use std::collections::BTreeMap;

use corridor_defence_core::{CellId, ObstacleId, ObstacleKind};

/// Obstacle stored inside the world.
///
/// The obstacle remembers the permanent identity of the cell it occupies,
/// never a raw coordinate, so its effective position is resolved through
/// the registry and stays correct after the grid grows.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ObstacleState {
    /// Identifier allocated by the world for the obstacle.
    pub(crate) id: ObstacleId,
    /// Kind selected by the player; opaque to validation.
    pub(crate) kind: ObstacleKind,
    /// Permanent identity of the occupied cell.
    pub(crate) cell: CellId,
}

/// Registry that stores obstacles and manages identifier allocation.
///
/// Identifiers are handed out monotonically, so ascending iteration over
/// the map doubles as insertion order.
#[derive(Clone, Debug, Default)]
pub(crate) struct ObstacleField {
    entries: BTreeMap<ObstacleId, ObstacleState>,
    next_id: u32,
}

impl ObstacleField {
    /// Creates an empty field with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores a new obstacle and returns its allocated identifier.
    pub(crate) fn insert(&mut self, kind: ObstacleKind, cell: CellId) -> ObstacleId {
        let id = ObstacleId::new(self.next_id);
        self.next_id += 1;
        let _ = self.entries.insert(id, ObstacleState { id, kind, cell });
        id
    }

    /// Removes an obstacle, returning its stored state.
    pub(crate) fn remove(&mut self, id: ObstacleId) -> Option<ObstacleState> {
        self.entries.remove(&id)
    }

    /// Restores a previously removed obstacle under its original identifier.
    pub(crate) fn restore(&mut self, state: ObstacleState) {
        let _ = self.entries.insert(state.id, state);
    }

    /// Retrieves an obstacle by identifier.
    #[must_use]
    pub(crate) fn get(&self, id: ObstacleId) -> Option<&ObstacleState> {
        self.entries.get(&id)
    }

    /// Iterates obstacles in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &ObstacleState> {
        self.entries.values()
    }

    /// Identifiers in reverse insertion order, newest first.
    #[must_use]
    pub(crate) fn ids_newest_first(&self) -> Vec<ObstacleId> {
        self.entries.keys().rev().copied().collect()
    }

    /// Number of stored obstacles.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the field holds no obstacles.
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every obstacle and resets the identifier counter.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_id = 0;
    }
}

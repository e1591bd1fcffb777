#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure builder system responsible for emitting obstacle placement,
//! removal and relocation commands.

use corridor_defence_core::{CellCoord, Command, ObstacleId, ObstacleKind, PlacementError};

/// Declarative placement preview describing a potential obstacle.
///
/// Mirrors the world's `query::placement_preview` output so adapters can
/// paint a ghost cell before the player confirms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementPreview {
    /// Kind of obstacle proposed for placement.
    pub kind: ObstacleKind,
    /// Cell anchoring the proposed obstacle.
    pub cell: CellCoord,
    /// Indicates whether the preview represents a valid placement.
    pub placeable: bool,
    /// Rejection reason reported by the validator, if any.
    pub rejection: Option<PlacementError>,
}

impl PlacementPreview {
    /// Creates a new placement preview descriptor.
    ///
    /// A preview carrying a rejection is never placeable regardless of the
    /// provided flag.
    #[must_use]
    pub const fn new(
        kind: ObstacleKind,
        cell: CellCoord,
        placeable: bool,
        rejection: Option<PlacementError>,
    ) -> Self {
        let placeable = if rejection.is_some() { false } else { placeable };
        Self {
            kind,
            cell,
            placeable,
            rejection,
        }
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BuilderInput {
    /// Indicates whether the player confirmed a placement on this frame.
    pub confirm_action: bool,
    /// Indicates whether the player requested obstacle removal on this frame.
    pub remove_action: bool,
    /// Indicates whether the player dropped a dragged obstacle on this frame.
    pub drop_action: bool,
    /// Cell currently hovered by the cursor.
    pub cursor_cell: Option<CellCoord>,
    /// Obstacle being dragged, if a drag is in progress.
    pub dragged_obstacle: Option<ObstacleId>,
}

/// Builder system that translates preview + input into obstacle commands.
#[derive(Debug, Clone, Default)]
pub struct Builder;

impl Builder {
    /// Creates a new builder system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes adapter-derived input to emit obstacle commands.
    ///
    /// The `obstacle_at` closure should mirror the semantics of the
    /// world's `query::obstacle_at` helper so the system can identify the
    /// hovered obstacle.
    pub fn handle<F>(
        &mut self,
        preview: Option<PlacementPreview>,
        input: BuilderInput,
        mut obstacle_at: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(CellCoord) -> Option<ObstacleId>,
    {
        if input.confirm_action {
            if let Some(preview) = preview {
                if preview.placeable {
                    out.push(Command::PlaceObstacle {
                        kind: preview.kind,
                        at: preview.cell,
                    });
                }
            }
        }

        if input.remove_action {
            if let Some(cell) = input.cursor_cell {
                if let Some(obstacle) = obstacle_at(cell) {
                    out.push(Command::RemoveObstacle { obstacle });
                }
            }
        }

        if input.drop_action {
            if let (Some(obstacle), Some(cell)) = (input.dragged_obstacle, input.cursor_cell) {
                out.push(Command::MoveObstacle { obstacle, to: cell });
            }
        }
    }
}

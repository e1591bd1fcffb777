#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Corridor Defence pathing engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Corridor Defence.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Configures the playing field with fresh dimensions and growth maxima.
    ConfigureGrid {
        /// Number of cell columns laid out in the grid.
        columns: u32,
        /// Number of cell rows laid out in the grid.
        rows: u32,
        /// Largest column count the grid may ever grow to.
        max_columns: u32,
        /// Largest row count the grid may ever grow to.
        max_rows: u32,
    },
    /// Updates the pixel dimensions of the rendering surface.
    ConfigureSurface {
        /// Width of the surface in pixels.
        width_px: f32,
        /// Height of the surface in pixels.
        height_px: f32,
    },
    /// Requests placement of an obstacle occupying a single cell.
    PlaceObstacle {
        /// Type of obstacle to construct at the cell.
        kind: ObstacleKind,
        /// Cell the obstacle should occupy.
        at: CellCoord,
    },
    /// Requests removal of an existing obstacle from the world.
    RemoveObstacle {
        /// Identifier of the obstacle targeted for removal.
        obstacle: ObstacleId,
    },
    /// Requests relocation of an existing obstacle to a different cell.
    MoveObstacle {
        /// Identifier of the obstacle being relocated.
        obstacle: ObstacleId,
        /// Destination cell for the obstacle.
        to: CellCoord,
    },
    /// Requests a bulk grid growth step appending columns and rows.
    ExpandGrid,
    /// Requests one symmetric row pair: a row on top and a row on the bottom.
    PurchaseRowPair,
    /// Requests a single column appended to the right edge.
    PurchaseColumn,
    /// Requests that an agent enter the field at the provided pixel position.
    SpawnAgent {
        /// Pixel position the agent should start from.
        position: PixelPosition,
    },
    /// Requests that an agent leave the field.
    DespawnAgent {
        /// Identifier of the agent to remove.
        agent: AgentId,
    },
    /// Marks the start of an attack wave.
    BeginWave,
    /// Marks the current attack wave as finished.
    CompleteWave,
    /// Pauses or resumes the session.
    SetPaused {
        /// Whether the session should be paused.
        paused: bool,
    },
    /// Rebuilds the world from a persisted logical layout.
    RestoreLayout {
        /// Number of cell columns recorded in the layout.
        columns: u32,
        /// Number of cell rows recorded in the layout.
        rows: u32,
        /// Obstacles recorded in the layout as logical cell positions.
        obstacles: Vec<ObstacleSeed>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that an obstacle was placed and the route stayed open.
    ObstaclePlaced {
        /// Identifier assigned to the obstacle by the world.
        obstacle: ObstacleId,
        /// Type of obstacle that was placed.
        kind: ObstacleKind,
        /// Cell the obstacle occupies.
        cell: CellCoord,
    },
    /// Confirms that an obstacle was removed at the player's request.
    ObstacleRemoved {
        /// Identifier of the obstacle that was removed.
        obstacle: ObstacleId,
        /// Cell the obstacle previously occupied.
        cell: CellCoord,
    },
    /// Confirms that an obstacle was relocated to a new cell.
    ObstacleMoved {
        /// Identifier of the obstacle that moved.
        obstacle: ObstacleId,
        /// Cell the obstacle previously occupied.
        from: CellCoord,
        /// Cell the obstacle occupies now.
        to: CellCoord,
    },
    /// Reports that the engine sacrificed an obstacle to reopen the route.
    ObstacleSacrificed {
        /// Identifier of the obstacle that was removed.
        obstacle: ObstacleId,
        /// Cell the obstacle previously occupied.
        cell: CellCoord,
    },
    /// Reports that an obstacle placement request was rejected.
    PlacementRejected {
        /// Type of obstacle requested for placement.
        kind: ObstacleKind,
        /// Cell provided in the placement request.
        at: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that an obstacle removal request was rejected.
    RemovalRejected {
        /// Identifier of the obstacle targeted for removal.
        obstacle: ObstacleId,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
    /// Reports that an obstacle relocation request was rejected.
    MoveRejected {
        /// Identifier of the obstacle that should have moved.
        obstacle: ObstacleId,
        /// Destination cell provided in the request.
        to: CellCoord,
        /// Specific reason the relocation failed.
        reason: MoveError,
    },
    /// Confirms that the grid grew to new dimensions.
    GridExpanded {
        /// Growth mode that was applied.
        mode: ExpansionMode,
        /// Column count after the growth step.
        columns: u32,
        /// Row count after the growth step.
        rows: u32,
    },
    /// Reports that a grid growth request was refused.
    ExpansionRejected {
        /// Growth mode that was requested.
        mode: ExpansionMode,
        /// Specific reason the growth was refused.
        reason: ExpansionError,
    },
    /// Announces that the route between start and goal was replaced.
    RouteRecomputed {
        /// Number of nodes composing the new route.
        length: usize,
    },
    /// Announces that no route between start and goal currently exists.
    ///
    /// This is the terminal condition of the engine: it persists until a
    /// later obstacle removal reopens the corridor.
    RouteLost,
    /// Confirms that an agent entered the field.
    AgentSpawned {
        /// Identifier assigned to the agent by the world.
        agent: AgentId,
        /// Pixel position the agent starts from.
        position: PixelPosition,
    },
    /// Confirms that an agent left the field.
    AgentDespawned {
        /// Identifier of the agent that left.
        agent: AgentId,
    },
    /// Confirms that an agent was re-synchronised to the current route.
    AgentRetargeted {
        /// Identifier of the agent that was retargeted.
        agent: AgentId,
        /// Route index the agent will advance from.
        path_index: usize,
    },
    /// Announces that an attack wave started.
    WaveStarted {
        /// One-based index of the wave that started.
        wave: u32,
    },
    /// Announces that the active attack wave completed.
    WaveCompleted {
        /// One-based index of the wave that completed.
        wave: u32,
    },
    /// Announces that the session pause state changed.
    PausedChanged {
        /// Whether the session is now paused.
        paused: bool,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

/// Permanent identity assigned to a cell when it first enters the grid.
///
/// Identifiers are allocated monotonically and survive every grid growth:
/// a cell keeps its identifier even when its row or column index shifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(u64);

impl CellId {
    /// Creates a new cell identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Unique identifier assigned to an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(u32);

impl ObstacleId {
    /// Creates a new obstacle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(u32);

impl AgentId {
    /// Creates a new agent identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Point expressed in surface pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelPosition {
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate.
    pub y: f32,
}

impl PixelPosition {
    /// Creates a new pixel position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another pixel position.
    ///
    /// Nearest-node selection only compares distances, so the square root
    /// is never taken.
    #[must_use]
    pub fn distance_squared(self, other: PixelPosition) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Single node of the traversable route, in both logical and pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathNode {
    /// Cell the node occupies.
    pub cell: CellCoord,
    /// Pixel centre of the cell under the current surface layout.
    pub position: PixelPosition,
}

/// Types of obstacles that can be constructed on the field.
///
/// The variant is opaque to validation: every kind occupies exactly one
/// cell, and combat attributes live outside this engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Standard single-cell obstacle.
    Basic,
}

/// Logical obstacle description used by persisted layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObstacleSeed {
    /// Type of obstacle recorded in the layout.
    pub kind: ObstacleKind,
    /// Cell the obstacle occupied when the layout was captured.
    pub cell: CellCoord,
}

/// Growth modes supported by the grid expander.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpansionMode {
    /// Bulk growth appending four columns and two rows toward the maxima.
    Bulk,
    /// One row prepended at the top and one appended at the bottom.
    RowPair,
    /// A single column appended at the right edge.
    Column,
}

/// Reasons an obstacle placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies beyond the configured grid bounds.
    OutOfBounds,
    /// The requested cell is already occupied by another obstacle.
    CellOccupied,
    /// The requested cell is the start or the goal cell.
    ReservedCell,
    /// Blocking the requested cell would disconnect start from goal.
    WouldDisconnectPath,
}

/// Reasons an obstacle removal request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalError {
    /// No obstacle with the provided identifier exists.
    MissingObstacle,
}

/// Reasons an obstacle relocation request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveError {
    /// No obstacle with the provided identifier exists.
    MissingObstacle,
    /// The destination cell failed placement validation.
    Destination(PlacementError),
}

/// Reasons a grid growth request may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpansionError {
    /// The grid already reached its configured maximum dimensions.
    LimitReached,
    /// Growth is forbidden while a round is active.
    DeniedDuringRound,
}

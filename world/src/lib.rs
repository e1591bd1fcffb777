#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Corridor Defence.
//!
//! The world owns the grid geometry, the stable cell identity registry,
//! the obstacle field, the current route and the live agents. All
//! mutation flows through [`apply`]; every accepted mutation and its
//! resulting route recompute are applied as one atomic unit, so readers
//! never observe a half-updated board.

mod agents;
mod coords;
mod obstacles;
mod pathfinding;
mod recovery;
mod registry;

use std::collections::HashSet;

use corridor_defence_core::{
    CellCoord, Command, Event, ExpansionError, ExpansionMode, MoveError, ObstacleId, ObstacleKind,
    ObstacleSeed, PixelPosition, PlacementError, RemovalError, WELCOME_BANNER,
};

use agents::AgentRoster;
use coords::{clamp_cell, CoordinateSpace};
use obstacles::{ObstacleField, ObstacleState};
use recovery::recover_route;
use registry::CellIdentityRegistry;

const DEFAULT_GRID_COLUMNS: u32 = 15;
const DEFAULT_GRID_ROWS: u32 = 9;
const DEFAULT_MAX_COLUMNS: u32 = 48;
const DEFAULT_MAX_ROWS: u32 = 27;

const BULK_COLUMN_STEP: u32 = 4;
const BULK_ROW_STEP: u32 = 2;
const BASE_BULK_EXPANSION_COST: u32 = 100;
const ROW_PAIR_COST: u32 = 5;
const COLUMN_COST: u32 = 3;

/// Represents the authoritative Corridor Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    columns: u32,
    rows: u32,
    max_columns: u32,
    max_rows: u32,
    coordinate_space: CoordinateSpace,
    registry: CellIdentityRegistry,
    obstacles: ObstacleField,
    start: CellCoord,
    goal: CellCoord,
    route: Vec<CellCoord>,
    agents: AgentRoster,
    wave_in_progress: bool,
    waves_completed: u32,
    paused: bool,
    next_bulk_cost: u32,
}

impl World {
    /// Creates a new Corridor Defence world ready for play.
    #[must_use]
    pub fn new() -> Self {
        let columns = DEFAULT_GRID_COLUMNS;
        let rows = DEFAULT_GRID_ROWS;
        let midline = rows / 2;
        let mut world = Self {
            banner: WELCOME_BANNER,
            columns,
            rows,
            max_columns: DEFAULT_MAX_COLUMNS,
            max_rows: DEFAULT_MAX_ROWS,
            coordinate_space: CoordinateSpace::new(columns, rows),
            registry: CellIdentityRegistry::new(columns, rows),
            obstacles: ObstacleField::new(),
            start: CellCoord::new(0, midline),
            goal: CellCoord::new(columns - 1, midline),
            route: Vec::new(),
            agents: AgentRoster::default(),
            wave_in_progress: false,
            waves_completed: 0,
            paused: false,
            next_bulk_cost: BASE_BULK_EXPANSION_COST,
        };
        world.route = world.search_route();
        world
    }

    fn reset_grid(&mut self, columns: u32, rows: u32, max_columns: u32, max_rows: u32) {
        let columns = columns.max(1);
        let rows = rows.max(1);
        self.columns = columns;
        self.rows = rows;
        self.max_columns = max_columns.max(columns);
        self.max_rows = max_rows.max(rows);
        self.registry = CellIdentityRegistry::new(columns, rows);
        self.obstacles.clear();
        self.agents.clear();
        let midline = rows / 2;
        self.start = CellCoord::new(0, midline);
        self.goal = CellCoord::new(columns - 1, midline);
        self.coordinate_space.refit(columns, rows);
    }

    fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    fn obstacle_at(&self, cell: CellCoord) -> Option<ObstacleId> {
        self.obstacles
            .iter()
            .find(|state| self.registry.resolve(state.cell) == Some(cell))
            .map(|state| state.id)
    }

    /// Computes the route over the current obstacle set.
    ///
    /// Start and goal are always subtracted from the blocked set before
    /// the search, mirroring the reserved-cell invariant.
    fn search_route(&self) -> Vec<CellCoord> {
        let mut blocked = blocked_cells(&self.obstacles, &self.registry);
        let _ = blocked.remove(&self.start);
        let _ = blocked.remove(&self.goal);
        pathfinding::find_route(self.columns, self.rows, self.start, self.goal, &blocked)
    }

    /// Installs a replacement route and re-synchronises every agent to it.
    fn install_route(&mut self, route: Vec<CellCoord>, out_events: &mut Vec<Event>) {
        self.route = route;
        if self.route.is_empty() {
            out_events.push(Event::RouteLost);
            return;
        }

        out_events.push(Event::RouteRecomputed {
            length: self.route.len(),
        });

        let nodes: Vec<PixelPosition> = self
            .route
            .iter()
            .map(|cell| self.coordinate_space.cell_center(*cell))
            .collect();
        for (agent, path_index) in self.agents.retarget(&nodes) {
            out_events.push(Event::AgentRetargeted { agent, path_index });
        }
    }

    fn recompute_route(&mut self, out_events: &mut Vec<Event>) {
        let route = self.search_route();
        self.install_route(route, out_events);
    }

    /// Route recompute for non-validated mutations: a failed search falls
    /// back to the greedy recovery probe before the loss is surfaced.
    fn recompute_route_with_recovery(&mut self, out_events: &mut Vec<Event>) {
        let route = self.search_route();
        if route.is_empty() && !self.obstacles.is_empty() {
            if let Some(outcome) = recover_route(
                &mut self.obstacles,
                &self.registry,
                self.columns,
                self.rows,
                self.start,
                self.goal,
            ) {
                out_events.push(Event::ObstacleSacrificed {
                    obstacle: outcome.obstacle,
                    cell: outcome.cell,
                });
                self.install_route(outcome.route, out_events);
                return;
            }
        }
        self.install_route(route, out_events);
    }

    /// Validates a candidate placement without mutating any state.
    ///
    /// On success the freshly computed route is returned so acceptance can
    /// commit the obstacle and the route atomically.
    fn validate_placement(&self, at: CellCoord) -> Result<Vec<CellCoord>, PlacementError> {
        if !self.in_bounds(at) {
            return Err(PlacementError::OutOfBounds);
        }
        if self.obstacle_at(at).is_some() {
            return Err(PlacementError::CellOccupied);
        }
        if at == self.start || at == self.goal {
            return Err(PlacementError::ReservedCell);
        }

        let mut blocked = blocked_cells(&self.obstacles, &self.registry);
        let _ = blocked.insert(at);
        let _ = blocked.remove(&self.start);
        let _ = blocked.remove(&self.goal);
        let route = pathfinding::find_route(self.columns, self.rows, self.start, self.goal, &blocked);
        if route.is_empty() {
            return Err(PlacementError::WouldDisconnectPath);
        }
        Ok(route)
    }

    /// Validates a relocation with the obstacle's own cell vacated.
    fn validate_move(
        &self,
        state: &ObstacleState,
        to: CellCoord,
    ) -> Result<Vec<CellCoord>, PlacementError> {
        if !self.in_bounds(to) {
            return Err(PlacementError::OutOfBounds);
        }
        match self.obstacle_at(to) {
            Some(occupant) if occupant != state.id => return Err(PlacementError::CellOccupied),
            _ => {}
        }
        if to == self.start || to == self.goal {
            return Err(PlacementError::ReservedCell);
        }

        let mut blocked = blocked_cells(&self.obstacles, &self.registry);
        if let Some(origin) = self.registry.resolve(state.cell) {
            let _ = blocked.remove(&origin);
        }
        let _ = blocked.insert(to);
        let _ = blocked.remove(&self.start);
        let _ = blocked.remove(&self.goal);
        let route = pathfinding::find_route(self.columns, self.rows, self.start, self.goal, &blocked);
        if route.is_empty() {
            return Err(PlacementError::WouldDisconnectPath);
        }
        Ok(route)
    }

    fn place_obstacle(&mut self, kind: ObstacleKind, at: CellCoord, out_events: &mut Vec<Event>) {
        match self.validate_placement(at) {
            Ok(route) => {
                let Some(cell_id) = self.registry.id_at(at) else {
                    out_events.push(Event::PlacementRejected {
                        kind,
                        at,
                        reason: PlacementError::OutOfBounds,
                    });
                    return;
                };
                let obstacle = self.obstacles.insert(kind, cell_id);
                out_events.push(Event::ObstaclePlaced {
                    obstacle,
                    kind,
                    cell: at,
                });
                self.install_route(route, out_events);
            }
            Err(reason) => {
                out_events.push(Event::PlacementRejected { kind, at, reason });
            }
        }
    }

    fn remove_obstacle(&mut self, obstacle: ObstacleId, out_events: &mut Vec<Event>) {
        let cell = self
            .obstacles
            .get(obstacle)
            .and_then(|state| self.registry.resolve(state.cell));
        match self.obstacles.remove(obstacle) {
            Some(_) => {
                out_events.push(Event::ObstacleRemoved {
                    obstacle,
                    cell: cell.unwrap_or(self.start),
                });
                // Removal cannot disconnect the corridor; it may reopen one.
                self.recompute_route(out_events);
            }
            None => out_events.push(Event::RemovalRejected {
                obstacle,
                reason: RemovalError::MissingObstacle,
            }),
        }
    }

    fn move_obstacle(&mut self, obstacle: ObstacleId, to: CellCoord, out_events: &mut Vec<Event>) {
        let Some(state) = self.obstacles.get(obstacle).copied() else {
            out_events.push(Event::MoveRejected {
                obstacle,
                to,
                reason: MoveError::MissingObstacle,
            });
            return;
        };

        match self.validate_move(&state, to) {
            Ok(route) => {
                let from = self.registry.resolve(state.cell).unwrap_or(to);
                let Some(destination) = self.registry.id_at(to) else {
                    out_events.push(Event::MoveRejected {
                        obstacle,
                        to,
                        reason: MoveError::Destination(PlacementError::OutOfBounds),
                    });
                    return;
                };
                let _ = self.obstacles.remove(obstacle);
                self.obstacles.restore(ObstacleState {
                    id: obstacle,
                    kind: state.kind,
                    cell: destination,
                });
                out_events.push(Event::ObstacleMoved { obstacle, from, to });
                self.install_route(route, out_events);
            }
            Err(reason) => out_events.push(Event::MoveRejected {
                obstacle,
                to,
                reason: MoveError::Destination(reason),
            }),
        }
    }

    fn round_active(&self) -> bool {
        self.wave_in_progress || !self.agents.is_empty() || self.waves_completed > 0
    }

    fn expansion_gate(&self, mode: ExpansionMode) -> Result<(), ExpansionError> {
        let exempt_while_paused = matches!(mode, ExpansionMode::RowPair | ExpansionMode::Column);
        let gated = if exempt_while_paused {
            !self.paused && self.round_active()
        } else {
            self.round_active()
        };
        if gated {
            return Err(ExpansionError::DeniedDuringRound);
        }

        let at_limit = match mode {
            ExpansionMode::Bulk => {
                self.columns >= self.max_columns && self.rows >= self.max_rows
            }
            ExpansionMode::RowPair => self.rows + 2 > self.max_rows,
            ExpansionMode::Column => self.columns + 1 > self.max_columns,
        };
        if at_limit {
            return Err(ExpansionError::LimitReached);
        }
        Ok(())
    }

    fn expand_grid(&mut self, mode: ExpansionMode, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.expansion_gate(mode) {
            out_events.push(Event::ExpansionRejected { mode, reason });
            return;
        }

        match mode {
            ExpansionMode::Bulk => {
                let grown_columns = (self.columns + BULK_COLUMN_STEP).min(self.max_columns);
                let grown_rows = (self.rows + BULK_ROW_STEP).min(self.max_rows);
                self.registry.append_columns(grown_columns - self.columns);
                self.registry.append_rows(grown_rows - self.rows);
                self.columns = grown_columns;
                self.rows = grown_rows;
                // Geometric backoff on the next bulk step.
                self.next_bulk_cost = self.next_bulk_cost.saturating_mul(3) / 2;
                // Start and goal rows stay anchored to the original midline.
                self.start = CellCoord::new(0, self.start.row());
                self.goal = CellCoord::new(self.columns - 1, self.goal.row());
            }
            ExpansionMode::RowPair => {
                self.registry.grow_row_pair();
                self.rows += 2;
                // One row up, one row down: the physical midline is unchanged
                // but its index moved by one.
                let midline = self.rows / 2;
                self.start = CellCoord::new(0, midline);
                self.goal = CellCoord::new(self.columns - 1, midline);
            }
            ExpansionMode::Column => {
                self.registry.append_columns(1);
                self.columns += 1;
                self.start = CellCoord::new(0, self.start.row());
                self.goal = CellCoord::new(self.columns - 1, self.goal.row());
            }
        }

        debug_assert_eq!(
            self.registry.dimensions(),
            (self.columns, self.rows),
            "registry must cover the grown grid"
        );
        self.coordinate_space.refit(self.columns, self.rows);
        self.start = clamp_cell(self.start, self.columns, self.rows);
        self.goal = clamp_cell(self.goal, self.columns, self.rows);

        out_events.push(Event::GridExpanded {
            mode,
            columns: self.columns,
            rows: self.rows,
        });

        // Growth is not validator-gated: obstacles can now sit mid-board
        // with no detour, so the recompute carries the recovery fallback.
        self.recompute_route_with_recovery(out_events);
    }

    fn restore_layout(
        &mut self,
        columns: u32,
        rows: u32,
        seeds: Vec<ObstacleSeed>,
        out_events: &mut Vec<Event>,
    ) {
        self.reset_grid(columns, rows, self.max_columns, self.max_rows);

        for seed in seeds {
            let reason = if !self.in_bounds(seed.cell) {
                Some(PlacementError::OutOfBounds)
            } else if seed.cell == self.start || seed.cell == self.goal {
                Some(PlacementError::ReservedCell)
            } else if self.obstacle_at(seed.cell).is_some() {
                Some(PlacementError::CellOccupied)
            } else {
                None
            };

            match reason {
                Some(reason) => out_events.push(Event::PlacementRejected {
                    kind: seed.kind,
                    at: seed.cell,
                    reason,
                }),
                None => {
                    if let Some(cell_id) = self.registry.id_at(seed.cell) {
                        let obstacle = self.obstacles.insert(seed.kind, cell_id);
                        out_events.push(Event::ObstaclePlaced {
                            obstacle,
                            kind: seed.kind,
                            cell: seed.cell,
                        });
                    }
                }
            }
        }

        // A layout is restored verbatim: a stored path-less board surfaces
        // RouteLost instead of being silently repaired.
        self.recompute_route(out_events);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid {
            columns,
            rows,
            max_columns,
            max_rows,
        } => {
            world.reset_grid(columns, rows, max_columns, max_rows);
            world.next_bulk_cost = BASE_BULK_EXPANSION_COST;
            world.wave_in_progress = false;
            world.waves_completed = 0;
            world.recompute_route(out_events);
        }
        Command::ConfigureSurface {
            width_px,
            height_px,
        } => {
            let columns = world.columns;
            let rows = world.rows;
            world
                .coordinate_space
                .resize_surface(width_px, height_px, columns, rows);
            world.start = clamp_cell(world.start, columns, rows);
            world.goal = clamp_cell(world.goal, columns, rows);
        }
        Command::PlaceObstacle { kind, at } => world.place_obstacle(kind, at, out_events),
        Command::RemoveObstacle { obstacle } => world.remove_obstacle(obstacle, out_events),
        Command::MoveObstacle { obstacle, to } => world.move_obstacle(obstacle, to, out_events),
        Command::ExpandGrid => world.expand_grid(ExpansionMode::Bulk, out_events),
        Command::PurchaseRowPair => world.expand_grid(ExpansionMode::RowPair, out_events),
        Command::PurchaseColumn => world.expand_grid(ExpansionMode::Column, out_events),
        Command::SpawnAgent { position } => {
            let agent = world.agents.spawn(position);
            out_events.push(Event::AgentSpawned { agent, position });
        }
        Command::DespawnAgent { agent } => {
            if world.agents.despawn(agent).is_some() {
                out_events.push(Event::AgentDespawned { agent });
            }
        }
        Command::BeginWave => {
            if !world.wave_in_progress {
                world.wave_in_progress = true;
                out_events.push(Event::WaveStarted {
                    wave: world.waves_completed + 1,
                });
            }
        }
        Command::CompleteWave => {
            if world.wave_in_progress {
                world.wave_in_progress = false;
                world.waves_completed += 1;
                out_events.push(Event::WaveCompleted {
                    wave: world.waves_completed,
                });
            }
        }
        Command::SetPaused { paused } => {
            if world.paused != paused {
                world.paused = paused;
                out_events.push(Event::PausedChanged { paused });
            }
        }
        Command::RestoreLayout {
            columns,
            rows,
            obstacles,
        } => world.restore_layout(columns, rows, obstacles, out_events),
    }
}

fn blocked_cells(field: &ObstacleField, registry: &CellIdentityRegistry) -> HashSet<CellCoord> {
    field
        .iter()
        .filter_map(|state| registry.resolve(state.cell))
        .collect()
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{blocked_cells, World};
    use corridor_defence_core::{
        AgentId, CellCoord, ObstacleId, ObstacleKind, ObstacleSeed, PathNode, PixelPosition,
        PlacementError,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current grid dimensions as `(columns, rows)`.
    #[must_use]
    pub fn grid_dimensions(world: &World) -> (u32, u32) {
        (world.columns, world.rows)
    }

    /// Configured growth maxima as `(max_columns, max_rows)`.
    #[must_use]
    pub fn grid_limits(world: &World) -> (u32, u32) {
        (world.max_columns, world.max_rows)
    }

    /// Side length of a single cell in pixels under the current surface.
    #[must_use]
    pub fn cell_size(world: &World) -> f32 {
        world.coordinate_space.cell_size()
    }

    /// Pixel offsets of the board's left and top edges.
    #[must_use]
    pub fn board_offsets(world: &World) -> (f32, f32) {
        world.coordinate_space.offsets()
    }

    /// Fixed start cell of the corridor.
    #[must_use]
    pub fn start_cell(world: &World) -> CellCoord {
        world.start
    }

    /// Fixed goal cell of the corridor.
    #[must_use]
    pub fn goal_cell(world: &World) -> CellCoord {
        world.goal
    }

    /// Ordered cells of the current route; empty when the route is lost.
    #[must_use]
    pub fn route_cells(world: &World) -> &[CellCoord] {
        &world.route
    }

    /// Reports whether a route from start to goal currently exists.
    #[must_use]
    pub fn route_available(world: &World) -> bool {
        !world.route.is_empty()
    }

    /// Current route with pixel centres derived from the live surface
    /// layout, ready for drawing.
    #[must_use]
    pub fn route_presentation(world: &World) -> Vec<PathNode> {
        world
            .route
            .iter()
            .map(|cell| PathNode {
                cell: *cell,
                position: world.coordinate_space.cell_center(*cell),
            })
            .collect()
    }

    /// Pixel centre of the provided cell under the current layout.
    #[must_use]
    pub fn cell_center(world: &World, cell: CellCoord) -> PixelPosition {
        world.coordinate_space.cell_center(cell)
    }

    /// Cell under the provided pixel position, if it hits the board.
    #[must_use]
    pub fn cell_at_pixel(world: &World, position: PixelPosition) -> Option<CellCoord> {
        world
            .coordinate_space
            .cell_at(position, world.columns, world.rows)
    }

    /// Identifier of the obstacle occupying the provided cell, if any.
    #[must_use]
    pub fn obstacle_at(world: &World, cell: CellCoord) -> Option<ObstacleId> {
        world.obstacle_at(cell)
    }

    /// Captures a read-only view of the obstacles on the field.
    #[must_use]
    pub fn obstacle_view(world: &World) -> ObstacleView {
        let snapshots = world
            .obstacles
            .iter()
            .map(|state| {
                let cell = world.registry.resolve(state.cell).unwrap_or(world.start);
                ObstacleSnapshot {
                    id: state.id,
                    kind: state.kind,
                    cell,
                    position: world.coordinate_space.cell_center(cell),
                }
            })
            .collect();
        ObstacleView { snapshots }
    }

    /// Captures a read-only view of the live agents.
    #[must_use]
    pub fn agent_view(world: &World) -> AgentView {
        let snapshots = world
            .agents
            .iter()
            .map(|agent| AgentSnapshot {
                id: agent.id,
                position: agent.position,
                path_index: agent.path_index,
            })
            .collect();
        AgentView { snapshots }
    }

    /// Dry-runs the placement validator for a candidate cell.
    ///
    /// Runs the full gate including the connectivity probe, without any
    /// observable state change, so adapters can paint a ghost preview.
    #[must_use]
    pub fn placement_preview(world: &World, kind: ObstacleKind, cell: CellCoord) -> PlacementPreview {
        match world.validate_placement(cell) {
            Ok(_) => PlacementPreview {
                kind,
                cell,
                placeable: true,
                rejection: None,
            },
            Err(reason) => PlacementPreview {
                kind,
                cell,
                placeable: false,
                rejection: Some(reason),
            },
        }
    }

    /// Current expansion pricing tracked by the engine.
    ///
    /// Balances are owned by the caller; the engine only reports what the
    /// next growth of each mode costs.
    #[must_use]
    pub fn expansion_pricing(world: &World) -> ExpansionPricing {
        ExpansionPricing {
            next_bulk_cost: world.next_bulk_cost,
            row_pair_cost: super::ROW_PAIR_COST,
            column_cost: super::COLUMN_COST,
        }
    }

    /// Current round status used by the expansion gate.
    #[must_use]
    pub fn round_status(world: &World) -> RoundStatus {
        RoundStatus {
            wave_in_progress: world.wave_in_progress,
            waves_completed: world.waves_completed,
            paused: world.paused,
            round_active: world.round_active(),
        }
    }

    /// Exports the logical layout for persistence.
    ///
    /// Obstacles are recorded as logical cells, never pixels, so the
    /// layout stays valid when reloaded at a different viewport size.
    #[must_use]
    pub fn layout_seeds(world: &World) -> (u32, u32, Vec<ObstacleSeed>) {
        let mut seeds = Vec::with_capacity(world.obstacles.len());
        for state in world.obstacles.iter() {
            if let Some(cell) = world.registry.resolve(state.cell) {
                seeds.push(ObstacleSeed {
                    kind: state.kind,
                    cell,
                });
            }
        }
        (world.columns, world.rows, seeds)
    }

    /// Cells currently blocked by obstacles.
    #[must_use]
    pub fn blocked_view(world: &World) -> Vec<CellCoord> {
        let mut cells: Vec<CellCoord> =
            blocked_cells(&world.obstacles, &world.registry).into_iter().collect();
        cells.sort();
        cells
    }

    /// Read-only snapshot describing all obstacles on the field.
    #[derive(Clone, Debug)]
    pub struct ObstacleView {
        snapshots: Vec<ObstacleSnapshot>,
    }

    impl ObstacleView {
        /// Iterator over the captured snapshots in insertion order.
        pub fn iter(&self) -> impl Iterator<Item = &ObstacleSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<ObstacleSnapshot> {
            self.snapshots
        }

        /// Number of obstacles captured by the view.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the view holds no obstacles.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Immutable representation of a single obstacle used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ObstacleSnapshot {
        /// Identifier allocated by the world.
        pub id: ObstacleId,
        /// Kind selected when the obstacle was placed.
        pub kind: ObstacleKind,
        /// Cell the obstacle currently occupies.
        pub cell: CellCoord,
        /// Pixel centre of the occupied cell.
        pub position: PixelPosition,
    }

    /// Read-only snapshot describing all live agents.
    #[derive(Clone, Debug)]
    pub struct AgentView {
        snapshots: Vec<AgentSnapshot>,
    }

    impl AgentView {
        /// Iterator over the captured snapshots in spawn order.
        pub fn iter(&self) -> impl Iterator<Item = &AgentSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<AgentSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single agent used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct AgentSnapshot {
        /// Identifier allocated by the world.
        pub id: AgentId,
        /// Pixel position the agent reported at spawn time.
        pub position: PixelPosition,
        /// Route index the agent advances from.
        pub path_index: usize,
    }

    /// Declarative placement preview describing a candidate obstacle.
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

    /// Costs the engine will charge for the next growth of each mode.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ExpansionPricing {
        /// Cost of the next bulk growth step; grows geometrically.
        pub next_bulk_cost: u32,
        /// Flat cost of one symmetric row pair.
        pub row_pair_cost: u32,
        /// Flat cost of one appended column.
        pub column_cost: u32,
    }

    /// Round bookkeeping consulted by the expansion gate.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RoundStatus {
        /// Whether an attack wave is currently running.
        pub wave_in_progress: bool,
        /// Number of waves that already finished.
        pub waves_completed: u32,
        /// Whether the session is paused.
        pub paused: bool,
        /// Whether the expansion gate currently considers the round active.
        pub round_active: bool,
    }
}

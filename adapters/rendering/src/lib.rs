#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Corridor Defence adapters.
//!
//! The scene built here is a pure pixel-space description of the board:
//! backends draw it, they never query the world directly.

use anyhow::Result as AnyResult;
use corridor_defence_core::{AgentId, CellCoord, ObstacleId, ObstacleKind};
use corridor_defence_world::{query, World};
use glam::Vec2;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Pixel-space description of the board geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardViewport {
    /// Number of cell columns on the board.
    pub columns: u32,
    /// Number of cell rows on the board.
    pub rows: u32,
    /// Side length of a single cell in pixels.
    pub cell_size: f32,
    /// Pixel position of the board's top-left corner.
    pub origin: Vec2,
}

impl BoardViewport {
    /// Total pixel width of the board.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Total pixel height of the board.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }
}

/// Route polyline ready for drawing.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RoutePolyline {
    /// Pixel centres of the route cells from start to goal.
    pub points: Vec<Vec2>,
}

impl RoutePolyline {
    /// Reports whether the polyline carries no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.len() < 2
    }
}

/// Obstacle sprite with its resolved pixel centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleSprite {
    /// Identifier of the obstacle in the world.
    pub id: ObstacleId,
    /// Kind selected when the obstacle was placed.
    pub kind: ObstacleKind,
    /// Cell the obstacle currently occupies.
    pub cell: CellCoord,
    /// Pixel centre of the occupied cell.
    pub center: Vec2,
}

/// Agent sprite with its current pixel position and route index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSprite {
    /// Identifier of the agent in the world.
    pub id: AgentId,
    /// Pixel position of the agent.
    pub position: Vec2,
    /// Route index the agent advances from.
    pub path_index: usize,
}

/// Endpoint marker drawn over the start or goal cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndpointMarker {
    /// Cell the marker occupies.
    pub cell: CellCoord,
    /// Pixel centre of the cell.
    pub center: Vec2,
}

/// Scene description combining the board, route, obstacles and agents.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board geometry in pixel space.
    pub viewport: BoardViewport,
    /// Current route polyline; empty when the route is lost.
    pub route: RoutePolyline,
    /// Obstacles with resolved pixel centres, in insertion order.
    pub obstacles: Vec<ObstacleSprite>,
    /// Live agents, in spawn order.
    pub agents: Vec<AgentSprite>,
    /// Marker for the corridor's start cell.
    pub start: EndpointMarker,
    /// Marker for the corridor's goal cell.
    pub goal: EndpointMarker,
    /// Set when no route exists; the UI renders a "no route" warning.
    pub route_missing: bool,
}

/// Builds a scene snapshot from the world's current state.
#[must_use]
pub fn build_scene(world: &World) -> Scene {
    let (columns, rows) = query::grid_dimensions(world);
    let (offset_x, offset_y) = query::board_offsets(world);
    let viewport = BoardViewport {
        columns,
        rows,
        cell_size: query::cell_size(world),
        origin: Vec2::new(offset_x, offset_y),
    };

    let route = RoutePolyline {
        points: query::route_presentation(world)
            .iter()
            .map(|node| Vec2::new(node.position.x, node.position.y))
            .collect(),
    };

    let obstacles = query::obstacle_view(world)
        .iter()
        .map(|snapshot| ObstacleSprite {
            id: snapshot.id,
            kind: snapshot.kind,
            cell: snapshot.cell,
            center: Vec2::new(snapshot.position.x, snapshot.position.y),
        })
        .collect();

    let agents = query::agent_view(world)
        .iter()
        .map(|snapshot| AgentSprite {
            id: snapshot.id,
            position: Vec2::new(snapshot.position.x, snapshot.position.y),
            path_index: snapshot.path_index,
        })
        .collect();

    let start_cell = query::start_cell(world);
    let goal_cell = query::goal_cell(world);
    let start_center = query::cell_center(world, start_cell);
    let goal_center = query::cell_center(world, goal_cell);

    Scene {
        viewport,
        route,
        obstacles,
        agents,
        start: EndpointMarker {
            cell: start_cell,
            center: Vec2::new(start_center.x, start_center.y),
        },
        goal: EndpointMarker {
            cell: goal_cell,
            center: Vec2::new(goal_center.x, goal_center.y),
        },
        route_missing: !query::route_available(world),
    }
}

/// Rendering backend capable of presenting Corridor Defence scenes.
pub trait RenderingBackend {
    /// Presents one scene snapshot.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Corridor Defence experience.

use corridor_defence_core::{CellCoord, PathNode};
use corridor_defence_world::{query, World};

/// Produces the data an adapter needs to greet the player and draw the
/// first frame.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self, world: &World) -> &'static str {
        query::welcome_banner(world)
    }

    /// Exposes the grid dimensions required for rendering.
    #[must_use]
    pub fn grid_dimensions(&self, world: &World) -> (u32, u32) {
        query::grid_dimensions(world)
    }

    /// Exposes the corridor endpoints for rendering.
    #[must_use]
    pub fn endpoints(&self, world: &World) -> (CellCoord, CellCoord) {
        (query::start_cell(world), query::goal_cell(world))
    }

    /// Exposes the initial route in pixel space for the first frame.
    #[must_use]
    pub fn initial_route(&self, world: &World) -> Vec<PathNode> {
        query::route_presentation(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_world_greets_and_routes() {
        let world = World::new();
        let bootstrap = Bootstrap;

        assert!(!bootstrap.welcome_banner(&world).is_empty());
        let (start, goal) = bootstrap.endpoints(&world);
        let route = bootstrap.initial_route(&world);
        assert_eq!(route.first().map(|node| node.cell), Some(start));
        assert_eq!(route.last().map(|node| node.cell), Some(goal));
    }
}

//! Last-resort obstacle removal when connectivity is lost outside the
//! validator's control.

use corridor_defence_core::{CellCoord, ObstacleId};

use crate::obstacles::ObstacleField;
use crate::pathfinding::find_route;
use crate::registry::CellIdentityRegistry;

/// Result of a successful recovery: the sacrificed obstacle and the route
/// its removal reopened.
#[derive(Clone, Debug)]
pub(crate) struct RecoveryOutcome {
    pub(crate) obstacle: ObstacleId,
    pub(crate) cell: CellCoord,
    pub(crate) route: Vec<CellCoord>,
}

/// Greedy single-removal probe over obstacles in reverse insertion order.
///
/// Each obstacle is tentatively removed and the route recomputed; the
/// first removal that reconnects start and goal is kept permanently.
/// Obstacles whose removal does not help are restored before the next
/// probe. When no single removal reconnects the corridor, the field is
/// left exactly as it was and `None` is returned so the caller can
/// surface the path-less state. The probe makes no attempt to minimise
/// the number of removed obstacles.
pub(crate) fn recover_route(
    field: &mut ObstacleField,
    registry: &CellIdentityRegistry,
    columns: u32,
    rows: u32,
    start: CellCoord,
    goal: CellCoord,
) -> Option<RecoveryOutcome> {
    for id in field.ids_newest_first() {
        let Some(state) = field.remove(id) else {
            continue;
        };

        let mut blocked = crate::blocked_cells(field, registry);
        let _ = blocked.remove(&start);
        let _ = blocked.remove(&goal);
        let route = find_route(columns, rows, start, goal, &blocked);

        if route.is_empty() {
            field.restore(state);
            continue;
        }

        let cell = registry.resolve(state.cell).unwrap_or(start);
        return Some(RecoveryOutcome {
            obstacle: id,
            cell,
            route,
        });
    }

    None
}

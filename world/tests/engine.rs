use corridor_defence_core::{
    CellCoord, Command, Event, ExpansionError, ExpansionMode, MoveError, ObstacleId, ObstacleKind,
    ObstacleSeed, PixelPosition, PlacementError,
};
use corridor_defence_world::{apply, query, World};

fn small_world() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureGrid {
            columns: 5,
            rows: 3,
            max_columns: 10,
            max_rows: 9,
        },
        &mut events,
    );
    world
}

fn place(world: &mut World, column: u32, row: u32) -> Vec<Event> {
    let mut events = Vec::new();
    apply(
        world,
        Command::PlaceObstacle {
            kind: ObstacleKind::Basic,
            at: CellCoord::new(column, row),
        },
        &mut events,
    );
    events
}

fn placed_id(events: &[Event]) -> ObstacleId {
    events
        .iter()
        .find_map(|event| match event {
            Event::ObstaclePlaced { obstacle, .. } => Some(*obstacle),
            _ => None,
        })
        .expect("placement should have been accepted")
}

#[test]
fn detour_placement_is_accepted() {
    // Scenario: 5x3 grid, start (0,1), goal (4,1); blocking (2,1) leaves
    // detours through rows 0 and 2.
    let mut world = small_world();
    assert_eq!(query::start_cell(&world), CellCoord::new(0, 1));
    assert_eq!(query::goal_cell(&world), CellCoord::new(4, 1));

    let events = place(&mut world, 2, 1);

    assert!(matches!(events[0], Event::ObstaclePlaced { .. }));
    assert!(query::route_available(&world));
    assert!(!query::route_cells(&world).contains(&CellCoord::new(2, 1)));
}

#[test]
fn sealing_placement_is_rejected() {
    // Scenario: with (2,0) and (2,2) already blocked, blocking (2,1) would
    // seal the middle column.
    let mut world = small_world();
    let _ = place(&mut world, 2, 0);
    let _ = place(&mut world, 2, 2);

    let events = place(&mut world, 2, 1);

    assert_eq!(
        events,
        vec![Event::PlacementRejected {
            kind: ObstacleKind::Basic,
            at: CellCoord::new(2, 1),
            reason: PlacementError::WouldDisconnectPath,
        }]
    );
    assert_eq!(query::obstacle_view(&world).len(), 2);
    assert!(query::route_available(&world));
}

#[test]
fn start_and_goal_are_rejected_regardless_of_connectivity() {
    let mut world = small_world();

    for cell in [query::start_cell(&world), query::goal_cell(&world)] {
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceObstacle {
                kind: ObstacleKind::Basic,
                at: cell,
            },
            &mut events,
        );
        assert!(
            matches!(
                events[0],
                Event::PlacementRejected {
                    reason: PlacementError::ReservedCell,
                    ..
                }
            ),
            "endpoint {cell:?} must always be rejected",
        );
    }
}

#[test]
fn route_exists_after_every_accepted_mutation() {
    // Validator invariant over a whole placement/removal sequence.
    let mut world = small_world();
    let mut placed = Vec::new();

    for (column, row) in [(1, 0), (1, 1), (2, 2), (3, 1), (3, 0)] {
        let events = place(&mut world, column, row);
        if events
            .iter()
            .any(|event| matches!(event, Event::ObstaclePlaced { .. }))
        {
            placed.push(placed_id(&events));
        }
        assert!(
            query::route_available(&world),
            "route must survive mutation at ({column}, {row})",
        );
    }

    for obstacle in placed {
        let mut events = Vec::new();
        apply(&mut world, Command::RemoveObstacle { obstacle }, &mut events);
        assert!(query::route_available(&world));
    }
}

#[test]
fn recomputing_twice_yields_identical_routes() {
    // Idempotence: two recomputes with no intervening mutation agree.
    let mut world = small_world();
    let _ = place(&mut world, 2, 1);
    let first = query::route_cells(&world).to_vec();

    // A rejected placement must not perturb the route either.
    let _ = place(&mut world, 2, 1);
    let second = query::route_cells(&world).to_vec();

    assert_eq!(first, second);
}

#[test]
fn layout_round_trip_reproduces_the_route() {
    let mut world = small_world();
    let _ = place(&mut world, 2, 1);
    let _ = place(&mut world, 3, 0);
    let route_before = query::route_cells(&world).to_vec();
    let (columns, rows, seeds) = query::layout_seeds(&world);

    let mut restored = World::new();
    let mut events = Vec::new();
    apply(
        &mut restored,
        Command::ConfigureGrid {
            columns,
            rows,
            max_columns: 10,
            max_rows: 9,
        },
        &mut events,
    );
    apply(
        &mut restored,
        Command::RestoreLayout {
            columns,
            rows,
            obstacles: seeds,
        },
        &mut events,
    );

    assert_eq!(query::route_cells(&restored), route_before.as_slice());
    assert_eq!(query::obstacle_view(&restored).len(), 2);
}

#[test]
fn bulk_growth_moves_the_goal_and_keeps_the_route() {
    // Scenario: 15x9 grows to 19x9 (+4 columns) with an obstacle in the
    // old rightmost column; the goal column follows the new edge.
    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureGrid {
            columns: 15,
            rows: 9,
            max_columns: 48,
            max_rows: 9,
        },
        &mut events,
    );
    let _ = place(&mut world, 14, 0);

    events.clear();
    apply(&mut world, Command::ExpandGrid, &mut events);

    assert!(events.contains(&Event::GridExpanded {
        mode: ExpansionMode::Bulk,
        columns: 19,
        rows: 9,
    }));
    assert_eq!(query::grid_dimensions(&world), (19, 9));
    assert_eq!(query::goal_cell(&world), CellCoord::new(18, 4));
    assert_eq!(query::start_cell(&world), CellCoord::new(0, 4));
    assert!(query::route_available(&world));

    // The obstacle kept its logical cell through the growth.
    let snapshots = query::obstacle_view(&world).into_vec();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].cell, CellCoord::new(14, 0));
}

#[test]
fn removing_the_sole_blocker_never_lengthens_the_route() {
    // Scenario: the obstacle forcing the detour disappears; the fresh
    // route can only get shorter or stay equal.
    let mut world = small_world();
    let events = place(&mut world, 2, 1);
    let obstacle = placed_id(&events);
    let detour_length = query::route_cells(&world).len();

    let mut removal_events = Vec::new();
    apply(
        &mut world,
        Command::RemoveObstacle { obstacle },
        &mut removal_events,
    );

    let straight_length = query::route_cells(&world).len();
    assert!(straight_length <= detour_length);
}

#[test]
fn agents_retarget_to_the_nearest_node_of_the_new_route() {
    // Scenario: an agent sitting near an old route node is re-indexed
    // into the replacement route within bounds.
    let mut world = small_world();
    let route = query::route_presentation(&world);
    let anchor = route[3].position;

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::SpawnAgent { position: anchor },
        &mut events,
    );

    events.clear();
    let _ = place(&mut world, 2, 1);
    let events: Vec<Event> = {
        let mut out = Vec::new();
        apply(
            &mut world,
            Command::PlaceObstacle {
                kind: ObstacleKind::Basic,
                at: CellCoord::new(1, 1),
            },
            &mut out,
        );
        out
    };

    let new_length = query::route_cells(&world).len();
    let retargeted = events.iter().find_map(|event| match event {
        Event::AgentRetargeted { path_index, .. } => Some(*path_index),
        _ => None,
    });
    let path_index = retargeted.expect("route change must retarget the agent");
    assert!(path_index <= new_length - 2);

    let snapshot = query::agent_view(&world).into_vec();
    assert_eq!(snapshot[0].path_index, path_index);
}

#[test]
fn growth_is_refused_during_an_active_round() {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(&mut world, Command::BeginWave, &mut events);

    events.clear();
    apply(&mut world, Command::ExpandGrid, &mut events);

    assert_eq!(
        events,
        vec![Event::ExpansionRejected {
            mode: ExpansionMode::Bulk,
            reason: ExpansionError::DeniedDuringRound,
        }]
    );
}

#[test]
fn growth_is_refused_after_the_first_wave_completes() {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(&mut world, Command::BeginWave, &mut events);
    apply(&mut world, Command::CompleteWave, &mut events);

    events.clear();
    apply(&mut world, Command::ExpandGrid, &mut events);

    assert!(matches!(
        events[0],
        Event::ExpansionRejected {
            reason: ExpansionError::DeniedDuringRound,
            ..
        }
    ));
}

#[test]
fn growth_is_refused_while_agents_are_alive() {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::SpawnAgent {
            position: PixelPosition::new(0.0, 0.0),
        },
        &mut events,
    );

    events.clear();
    apply(&mut world, Command::PurchaseColumn, &mut events);
    assert!(matches!(
        events[0],
        Event::ExpansionRejected {
            reason: ExpansionError::DeniedDuringRound,
            ..
        }
    ));
}

#[test]
fn paused_session_allows_discrete_purchases_but_not_bulk_growth() {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(&mut world, Command::BeginWave, &mut events);
    apply(&mut world, Command::CompleteWave, &mut events);
    apply(&mut world, Command::SetPaused { paused: true }, &mut events);

    events.clear();
    apply(&mut world, Command::PurchaseRowPair, &mut events);
    assert!(
        events.contains(&Event::GridExpanded {
            mode: ExpansionMode::RowPair,
            columns: 15,
            rows: 11,
        }),
        "row purchases are allowed while paused",
    );

    events.clear();
    apply(&mut world, Command::ExpandGrid, &mut events);
    assert!(
        matches!(
            events[0],
            Event::ExpansionRejected {
                mode: ExpansionMode::Bulk,
                reason: ExpansionError::DeniedDuringRound,
            }
        ),
        "bulk growth has no pause exemption",
    );
}

#[test]
fn growth_is_refused_at_the_configured_maxima() {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureGrid {
            columns: 6,
            rows: 5,
            max_columns: 6,
            max_rows: 5,
        },
        &mut events,
    );

    for command in [
        Command::ExpandGrid,
        Command::PurchaseRowPair,
        Command::PurchaseColumn,
    ] {
        events.clear();
        apply(&mut world, command, &mut events);
        assert!(
            matches!(
                events[0],
                Event::ExpansionRejected {
                    reason: ExpansionError::LimitReached,
                    ..
                }
            ),
            "growth past the maxima must be refused",
        );
    }
}

#[test]
fn bulk_growth_cost_backs_off_geometrically() {
    let mut world = World::new();
    let initial = query::expansion_pricing(&world).next_bulk_cost;

    let mut events = Vec::new();
    apply(&mut world, Command::ExpandGrid, &mut events);
    let after_one = query::expansion_pricing(&world).next_bulk_cost;
    apply(&mut world, Command::ExpandGrid, &mut events);
    let after_two = query::expansion_pricing(&world).next_bulk_cost;

    assert_eq!(after_one, initial * 3 / 2);
    assert_eq!(after_two, after_one * 3 / 2);
}

#[test]
fn row_pair_growth_keeps_obstacles_on_the_physical_midline_row() {
    let mut world = World::new();
    let _ = place(&mut world, 5, 4);

    let mut events = Vec::new();
    apply(&mut world, Command::PurchaseRowPair, &mut events);

    assert_eq!(query::grid_dimensions(&world), (15, 11));
    // The obstacle's row index shifted with the prepended top row.
    let snapshots = query::obstacle_view(&world).into_vec();
    assert_eq!(snapshots[0].cell, CellCoord::new(5, 5));
    // Start and goal follow the midline, which is the same physical row.
    assert_eq!(query::start_cell(&world), CellCoord::new(0, 5));
    assert_eq!(query::goal_cell(&world), CellCoord::new(14, 5));
    assert!(query::route_available(&world));
}

#[test]
fn post_growth_disconnection_triggers_the_recovery_probe() {
    // A restored layout may legitimately be path-less. Growing the grid
    // afterwards is a non-validated mutation, so the recompute carries the
    // recovery fallback: one obstacle is sacrificed to reopen the route.
    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::RestoreLayout {
            columns: 5,
            rows: 3,
            obstacles: vec![
                ObstacleSeed {
                    kind: ObstacleKind::Basic,
                    cell: CellCoord::new(2, 0),
                },
                ObstacleSeed {
                    kind: ObstacleKind::Basic,
                    cell: CellCoord::new(2, 1),
                },
                ObstacleSeed {
                    kind: ObstacleKind::Basic,
                    cell: CellCoord::new(2, 2),
                },
            ],
        },
        &mut events,
    );
    assert!(!query::route_available(&world), "the wall seals the corridor");

    // Column growth does not add rows, so the wall still spans the full
    // height and the recovery probe has to act.
    events.clear();
    apply(&mut world, Command::PurchaseColumn, &mut events);

    assert!(
        events
            .iter()
            .any(|event| matches!(event, Event::ObstacleSacrificed { .. })),
        "recovery must sacrifice one wall obstacle",
    );
    assert!(query::route_available(&world));
    assert_eq!(query::obstacle_view(&world).len(), 2);
    assert!(events.iter().all(|event| *event != Event::RouteLost));
}

#[test]
fn move_relocates_an_obstacle_atomically() {
    let mut world = small_world();
    let events = place(&mut world, 2, 1);
    let obstacle = placed_id(&events);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::MoveObstacle {
            obstacle,
            to: CellCoord::new(3, 2),
        },
        &mut events,
    );

    assert!(events.contains(&Event::ObstacleMoved {
        obstacle,
        from: CellCoord::new(2, 1),
        to: CellCoord::new(3, 2),
    }));
    let snapshots = query::obstacle_view(&world).into_vec();
    assert_eq!(snapshots[0].cell, CellCoord::new(3, 2));
    assert!(query::route_available(&world));
}

#[test]
fn move_that_would_seal_the_corridor_is_rejected() {
    let mut world = small_world();
    let _ = place(&mut world, 2, 0);
    let _ = place(&mut world, 2, 2);
    let events = place(&mut world, 1, 0);
    let obstacle = placed_id(&events);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::MoveObstacle {
            obstacle,
            to: CellCoord::new(2, 1),
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![Event::MoveRejected {
            obstacle,
            to: CellCoord::new(2, 1),
            reason: MoveError::Destination(PlacementError::WouldDisconnectPath),
        }]
    );
    // The obstacle stayed where it was.
    let snapshots = query::obstacle_view(&world).into_vec();
    assert!(snapshots
        .iter()
        .any(|snapshot| snapshot.cell == CellCoord::new(1, 0)));
}

#[test]
fn restored_path_less_layout_surfaces_route_lost() {
    // A layout saved in a broken state is restored verbatim, not repaired.
    let mut world = World::new();
    let mut events = Vec::new();
    let seeds = vec![
        ObstacleSeed {
            kind: ObstacleKind::Basic,
            cell: CellCoord::new(2, 0),
        },
        ObstacleSeed {
            kind: ObstacleKind::Basic,
            cell: CellCoord::new(2, 1),
        },
        ObstacleSeed {
            kind: ObstacleKind::Basic,
            cell: CellCoord::new(2, 2),
        },
    ];

    apply(
        &mut world,
        Command::RestoreLayout {
            columns: 5,
            rows: 3,
            obstacles: seeds,
        },
        &mut events,
    );

    assert!(events.contains(&Event::RouteLost));
    assert!(!query::route_available(&world));

    // Removing one wall cell resolves the terminal condition.
    let blocker = query::obstacle_at(&world, CellCoord::new(2, 1)).expect("restored");
    events.clear();
    apply(
        &mut world,
        Command::RemoveObstacle { obstacle: blocker },
        &mut events,
    );
    assert!(query::route_available(&world));
}

#[test]
fn restore_skips_seeds_on_reserved_cells() {
    let mut world = World::new();
    let mut events = Vec::new();
    let seeds = vec![
        ObstacleSeed {
            kind: ObstacleKind::Basic,
            cell: CellCoord::new(0, 1),
        },
        ObstacleSeed {
            kind: ObstacleKind::Basic,
            cell: CellCoord::new(2, 2),
        },
    ];

    apply(
        &mut world,
        Command::RestoreLayout {
            columns: 5,
            rows: 3,
            obstacles: seeds,
        },
        &mut events,
    );

    assert!(events.contains(&Event::PlacementRejected {
        kind: ObstacleKind::Basic,
        at: CellCoord::new(0, 1),
        reason: PlacementError::ReservedCell,
    }));
    assert_eq!(query::obstacle_view(&world).len(), 1);
}

#[test]
fn heuristic_prefers_straight_routes_over_staircases() {
    // With an open board the route is a straight line along the midline.
    let world = small_world();
    let route = query::route_cells(&world);

    assert_eq!(route.len(), 5);
    assert!(route.iter().all(|cell| cell.row() == 1));
}

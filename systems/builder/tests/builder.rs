use corridor_defence_core::{CellCoord, Command, ObstacleId, ObstacleKind, PlacementError};
use corridor_defence_system_builder::{Builder, BuilderInput, PlacementPreview};

fn preview_at(cell: CellCoord, placeable: bool) -> PlacementPreview {
    PlacementPreview::new(ObstacleKind::Basic, cell, placeable, None)
}

#[test]
fn confirm_emits_place_command_for_valid_preview() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        Some(preview_at(CellCoord::new(2, 2), true)),
        BuilderInput {
            confirm_action: true,
            ..BuilderInput::default()
        },
        |_| None,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PlaceObstacle {
            kind: ObstacleKind::Basic,
            at: CellCoord::new(2, 2),
        }],
        "builder should emit a placement command when confirming a valid preview",
    );
}

#[test]
fn confirm_ignored_when_preview_not_placeable() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        Some(preview_at(CellCoord::new(2, 2), false)),
        BuilderInput {
            confirm_action: true,
            ..BuilderInput::default()
        },
        |_| None,
        &mut commands,
    );

    assert!(commands.is_empty(), "invalid preview must not emit commands");
}

#[test]
fn preview_with_rejection_is_never_placeable() {
    let preview = PlacementPreview::new(
        ObstacleKind::Basic,
        CellCoord::new(1, 1),
        true,
        Some(PlacementError::WouldDisconnectPath),
    );

    assert!(!preview.placeable);
}

#[test]
fn remove_emits_command_when_obstacle_present() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();
    let hovered_cell = CellCoord::new(2, 2);
    let returned_obstacle = ObstacleId::new(7);
    let mut looked_up = None;

    builder.handle(
        None,
        BuilderInput {
            remove_action: true,
            cursor_cell: Some(hovered_cell),
            ..BuilderInput::default()
        },
        |cell| {
            looked_up = Some(cell);
            Some(returned_obstacle)
        },
        &mut commands,
    );

    assert_eq!(looked_up, Some(hovered_cell));
    assert_eq!(
        commands,
        vec![Command::RemoveObstacle {
            obstacle: returned_obstacle,
        }],
        "remove action should target the obstacle under the cursor",
    );
}

#[test]
fn remove_ignored_when_no_obstacle_present() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        None,
        BuilderInput {
            remove_action: true,
            cursor_cell: Some(CellCoord::new(1, 1)),
            ..BuilderInput::default()
        },
        |_| None,
        &mut commands,
    );

    assert!(commands.is_empty(), "no obstacle under cursor, nothing to remove");
}

#[test]
fn drop_emits_move_command_for_dragged_obstacle() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();
    let dragged = ObstacleId::new(3);

    builder.handle(
        None,
        BuilderInput {
            drop_action: true,
            cursor_cell: Some(CellCoord::new(4, 1)),
            dragged_obstacle: Some(dragged),
            ..BuilderInput::default()
        },
        |_| None,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::MoveObstacle {
            obstacle: dragged,
            to: CellCoord::new(4, 1),
        }],
    );
}

#[test]
fn drop_ignored_without_cursor_cell() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        None,
        BuilderInput {
            drop_action: true,
            dragged_obstacle: Some(ObstacleId::new(3)),
            ..BuilderInput::default()
        },
        |_| None,
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn world_preview_round_trips_through_builder() {
    use corridor_defence_world::{apply, query, World};

    let mut world = World::new();
    let mut builder = Builder::new();
    let candidate = CellCoord::new(7, 2);

    let world_preview = query::placement_preview(&world, ObstacleKind::Basic, candidate);
    let preview = PlacementPreview::new(
        world_preview.kind,
        world_preview.cell,
        world_preview.placeable,
        world_preview.rejection,
    );

    let mut commands = Vec::new();
    builder.handle(
        Some(preview),
        BuilderInput {
            confirm_action: true,
            cursor_cell: Some(candidate),
            ..BuilderInput::default()
        },
        |cell| query::obstacle_at(&world, cell),
        &mut commands,
    );

    let mut events = Vec::new();
    for command in commands {
        apply(&mut world, command, &mut events);
    }

    assert_eq!(query::obstacle_view(&world).len(), 1);
    assert!(query::route_available(&world));
}

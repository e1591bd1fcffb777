#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a Corridor Defence session.
//!
//! Reads one command per line from stdin, applies it to the world, and
//! prints the resulting events plus an ASCII rendering of the board.

mod layout_transfer;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;

use corridor_defence_core::{
    AgentId, CellCoord, Command as WorldCommand, Event, ObstacleId, ObstacleKind, PixelPosition,
};
use corridor_defence_rendering::build_scene;
use corridor_defence_system_bootstrap::Bootstrap;
use corridor_defence_system_builder::{Builder, BuilderInput, PlacementPreview};
use corridor_defence_world::{apply, query, World};
use layout_transfer::{LayoutSnapshot, SNAPSHOT_HEADER};

/// Command-line arguments accepted by the Corridor Defence CLI.
#[derive(Debug, Parser)]
#[command(name = "corridor-defence", about = "Corridor Defence pathing engine session")]
struct Args {
    /// Number of cell columns for a fresh board.
    #[arg(long)]
    columns: Option<u32>,
    /// Number of cell rows for a fresh board.
    #[arg(long)]
    rows: Option<u32>,
    /// Largest column count the board may grow to.
    #[arg(long, default_value_t = 48)]
    max_columns: u32,
    /// Largest row count the board may grow to.
    #[arg(long, default_value_t = 27)]
    max_rows: u32,
    /// Layout transfer string to restore before the session starts.
    #[arg(long)]
    layout: Option<String>,
}

/// One parsed line of player input.
#[derive(Clone, Debug, PartialEq)]
enum Action {
    /// Place an obstacle at the cell.
    Place(CellCoord),
    /// Place an obstacle at the cell under a pixel position.
    PlaceAtPixel(PixelPosition),
    /// Remove the obstacle under the cell.
    Remove(CellCoord),
    /// Move an obstacle to the cell.
    Move(ObstacleId, CellCoord),
    /// Bulk grid growth step.
    Expand,
    /// Purchase one symmetric row pair.
    BuyRows,
    /// Purchase one appended column.
    BuyCol,
    /// Spawn an agent at a pixel position.
    Spawn(PixelPosition),
    /// Despawn an agent.
    Despawn(AgentId),
    /// Begin an attack wave.
    WaveStart,
    /// Complete the active attack wave.
    WaveDone,
    /// Pause or resume the session.
    Pause(bool),
    /// Print the layout transfer string.
    Save,
    /// Restore a layout transfer string.
    Load(String),
    /// Print the board.
    Show,
    /// Print the command reference.
    Help,
    /// End the session.
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut world = World::new();
    let mut events = Vec::new();

    if let (Some(columns), Some(rows)) = (args.columns, args.rows) {
        apply(
            &mut world,
            WorldCommand::ConfigureGrid {
                columns,
                rows,
                max_columns: args.max_columns,
                max_rows: args.max_rows,
            },
            &mut events,
        );
    }

    if let Some(layout) = &args.layout {
        restore_layout(&mut world, layout, &mut events)?;
    }

    let bootstrap = Bootstrap;
    println!("{}", bootstrap.welcome_banner(&world));
    report_events(&events);
    events.clear();
    print_board(&world);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let action = match parse_action(trimmed) {
            Ok(action) => action,
            Err(message) => {
                println!("error: {message}");
                continue;
            }
        };

        match action {
            Action::Quit => break,
            Action::Help => print_help(),
            Action::Show => print_board(&world),
            Action::Save => {
                let (columns, rows, obstacles) = query::layout_seeds(&world);
                let snapshot = LayoutSnapshot {
                    columns,
                    rows,
                    obstacles,
                };
                println!("{}", snapshot.encode());
            }
            Action::Load(encoded) => {
                if let Err(error) = restore_layout(&mut world, &encoded, &mut events) {
                    println!("error: {error:#}");
                }
                report_events(&events);
                events.clear();
                print_board(&world);
            }
            other => {
                run_action(&mut world, other, &mut events);
                report_events(&events);
                events.clear();
                print_board(&world);
            }
        }
    }

    Ok(())
}

/// Applies a gameplay action, routing placement input through the builder
/// system the way a graphical adapter would.
fn run_action(world: &mut World, action: Action, out_events: &mut Vec<Event>) {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    match action {
        Action::PlaceAtPixel(position) => {
            match query::cell_at_pixel(world, position) {
                Some(cell) => run_action(world, Action::Place(cell), out_events),
                None => println!("pixel ({}, {}) misses the board", position.x, position.y),
            }
            return;
        }
        Action::Place(cell) => {
            let preview = query::placement_preview(world, ObstacleKind::Basic, cell);
            if let Some(reason) = preview.rejection {
                println!("placement preview rejected: {}", placement_reason(reason));
            }
            builder.handle(
                Some(PlacementPreview::new(
                    preview.kind,
                    preview.cell,
                    preview.placeable,
                    preview.rejection,
                )),
                BuilderInput {
                    confirm_action: true,
                    cursor_cell: Some(cell),
                    ..BuilderInput::default()
                },
                |hovered| query::obstacle_at(world, hovered),
                &mut commands,
            );
        }
        Action::Remove(cell) => builder.handle(
            None,
            BuilderInput {
                remove_action: true,
                cursor_cell: Some(cell),
                ..BuilderInput::default()
            },
            |hovered| query::obstacle_at(world, hovered),
            &mut commands,
        ),
        Action::Move(obstacle, cell) => builder.handle(
            None,
            BuilderInput {
                drop_action: true,
                cursor_cell: Some(cell),
                dragged_obstacle: Some(obstacle),
                ..BuilderInput::default()
            },
            |hovered| query::obstacle_at(world, hovered),
            &mut commands,
        ),
        Action::Expand => commands.push(WorldCommand::ExpandGrid),
        Action::BuyRows => commands.push(WorldCommand::PurchaseRowPair),
        Action::BuyCol => commands.push(WorldCommand::PurchaseColumn),
        Action::Spawn(position) => commands.push(WorldCommand::SpawnAgent { position }),
        Action::Despawn(agent) => commands.push(WorldCommand::DespawnAgent { agent }),
        Action::WaveStart => commands.push(WorldCommand::BeginWave),
        Action::WaveDone => commands.push(WorldCommand::CompleteWave),
        Action::Pause(paused) => commands.push(WorldCommand::SetPaused { paused }),
        Action::Save | Action::Load(_) | Action::Show | Action::Help | Action::Quit => {}
    }

    for command in commands {
        apply(world, command, out_events);
    }
}

fn restore_layout(world: &mut World, encoded: &str, out_events: &mut Vec<Event>) -> Result<()> {
    let snapshot = LayoutSnapshot::decode(encoded).context("could not decode layout string")?;
    apply(
        world,
        WorldCommand::RestoreLayout {
            columns: snapshot.columns,
            rows: snapshot.rows,
            obstacles: snapshot.obstacles,
        },
        out_events,
    );
    Ok(())
}

fn parse_action(line: &str) -> Result<Action, String> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().ok_or("empty command")?;
    let mut next_number = |name: &str| -> Result<u32, String> {
        parts
            .next()
            .ok_or(format!("missing {name}"))?
            .parse::<u32>()
            .map_err(|_| format!("{name} must be a non-negative integer"))
    };

    match verb {
        "place" => {
            let column = next_number("column")?;
            let row = next_number("row")?;
            Ok(Action::Place(CellCoord::new(column, row)))
        }
        "place-px" => {
            let x = next_number("x")?;
            let y = next_number("y")?;
            Ok(Action::PlaceAtPixel(PixelPosition::new(x as f32, y as f32)))
        }
        "remove" => {
            let column = next_number("column")?;
            let row = next_number("row")?;
            Ok(Action::Remove(CellCoord::new(column, row)))
        }
        "move" => {
            let obstacle = next_number("obstacle id")?;
            let column = next_number("column")?;
            let row = next_number("row")?;
            Ok(Action::Move(
                ObstacleId::new(obstacle),
                CellCoord::new(column, row),
            ))
        }
        "expand" => Ok(Action::Expand),
        "buy-rows" => Ok(Action::BuyRows),
        "buy-col" => Ok(Action::BuyCol),
        "spawn" => {
            let x = next_number("x")?;
            let y = next_number("y")?;
            Ok(Action::Spawn(PixelPosition::new(x as f32, y as f32)))
        }
        "despawn" => Ok(Action::Despawn(AgentId::new(next_number("agent id")?))),
        "wave-start" => Ok(Action::WaveStart),
        "wave-done" => Ok(Action::WaveDone),
        "pause" => match parts.next() {
            Some("on") => Ok(Action::Pause(true)),
            Some("off") => Ok(Action::Pause(false)),
            _ => Err("pause expects 'on' or 'off'".to_owned()),
        },
        "save" => Ok(Action::Save),
        "load" => {
            let encoded = parts.next().ok_or("missing layout string")?;
            Ok(Action::Load(encoded.to_owned()))
        }
        "show" => Ok(Action::Show),
        "help" => Ok(Action::Help),
        "quit" | "exit" => Ok(Action::Quit),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

fn report_events(events: &[Event]) {
    for event in events {
        println!("{}", describe_event(event));
    }
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::ObstaclePlaced { obstacle, cell, .. } => format!(
            "obstacle {} placed at ({}, {})",
            obstacle.get(),
            cell.column(),
            cell.row()
        ),
        Event::ObstacleRemoved { obstacle, cell } => format!(
            "obstacle {} removed from ({}, {})",
            obstacle.get(),
            cell.column(),
            cell.row()
        ),
        Event::ObstacleMoved { obstacle, from, to } => format!(
            "obstacle {} moved ({}, {}) -> ({}, {})",
            obstacle.get(),
            from.column(),
            from.row(),
            to.column(),
            to.row()
        ),
        Event::ObstacleSacrificed { obstacle, cell } => format!(
            "obstacle {} sacrificed at ({}, {}) to reopen the route",
            obstacle.get(),
            cell.column(),
            cell.row()
        ),
        Event::PlacementRejected { at, reason, .. } => format!(
            "placement at ({}, {}) rejected: {}",
            at.column(),
            at.row(),
            placement_reason(*reason)
        ),
        Event::RemovalRejected { obstacle, .. } => {
            format!("removal rejected: no obstacle {}", obstacle.get())
        }
        Event::MoveRejected { obstacle, to, reason } => format!(
            "move of obstacle {} to ({}, {}) rejected: {}",
            obstacle.get(),
            to.column(),
            to.row(),
            move_reason(*reason)
        ),
        Event::GridExpanded { columns, rows, .. } => {
            format!("grid expanded to {columns}x{rows}")
        }
        Event::ExpansionRejected { reason, .. } => format!(
            "expansion rejected: {}",
            match reason {
                corridor_defence_core::ExpansionError::LimitReached => "grid is at maximum size",
                corridor_defence_core::ExpansionError::DeniedDuringRound => {
                    "not allowed while a round is active"
                }
            }
        ),
        Event::RouteRecomputed { length } => format!("route recomputed ({length} nodes)"),
        Event::RouteLost => "WARNING: no route from start to goal".to_owned(),
        Event::AgentSpawned { agent, .. } => format!("agent {} spawned", agent.get()),
        Event::AgentDespawned { agent } => format!("agent {} despawned", agent.get()),
        Event::AgentRetargeted { agent, path_index } => {
            format!("agent {} retargeted to route index {path_index}", agent.get())
        }
        Event::WaveStarted { wave } => format!("wave {wave} started"),
        Event::WaveCompleted { wave } => format!("wave {wave} completed"),
        Event::PausedChanged { paused } => {
            if *paused {
                "session paused".to_owned()
            } else {
                "session resumed".to_owned()
            }
        }
    }
}

fn placement_reason(reason: corridor_defence_core::PlacementError) -> &'static str {
    use corridor_defence_core::PlacementError;
    match reason {
        PlacementError::OutOfBounds => "cell is outside the grid",
        PlacementError::CellOccupied => "cell is already occupied",
        PlacementError::ReservedCell => "start and goal cells are reserved",
        PlacementError::WouldDisconnectPath => "placement would close the corridor",
    }
}

fn move_reason(reason: corridor_defence_core::MoveError) -> String {
    use corridor_defence_core::MoveError;
    match reason {
        MoveError::MissingObstacle => "no such obstacle".to_owned(),
        MoveError::Destination(inner) => placement_reason(inner).to_owned(),
    }
}

/// Renders the board as ASCII art from the rendering adapter's scene.
fn print_board(world: &World) {
    let scene = build_scene(world);
    let columns = scene.viewport.columns as usize;
    let rows = scene.viewport.rows as usize;

    let mut glyphs = vec![vec!['.'; columns]; rows];
    for node in query::route_cells(world) {
        glyphs[node.row() as usize][node.column() as usize] = '*';
    }
    for sprite in &scene.obstacles {
        glyphs[sprite.cell.row() as usize][sprite.cell.column() as usize] = '#';
    }
    let start = scene.start.cell;
    let goal = scene.goal.cell;
    glyphs[start.row() as usize][start.column() as usize] = 'S';
    glyphs[goal.row() as usize][goal.column() as usize] = 'G';

    for row in glyphs {
        let line: String = row.into_iter().collect();
        println!("{line}");
    }

    if scene.route_missing {
        println!("WARNING: no route from start to goal");
    }
    let pricing = query::expansion_pricing(world);
    println!(
        "{}x{} | next expand: {} | rows: {} | col: {}",
        scene.viewport.columns,
        scene.viewport.rows,
        pricing.next_bulk_cost,
        pricing.row_pair_cost,
        pricing.column_cost
    );
}

fn print_help() {
    println!(
        "commands:\n  \
         place <col> <row>       place an obstacle\n  \
         place-px <x> <y>        place at the cell under a pixel\n  \
         remove <col> <row>      remove the obstacle at a cell\n  \
         move <id> <col> <row>   relocate an obstacle\n  \
         expand                  bulk growth (+4 columns, +2 rows)\n  \
         buy-rows                one row on top and one on the bottom\n  \
         buy-col                 one column on the right\n  \
         spawn <x> <y>           spawn an agent at a pixel position\n  \
         despawn <id>            remove an agent\n  \
         wave-start / wave-done  round bookkeeping\n  \
         pause on|off            pause gating for purchases\n  \
         save / load <string>    layout transfer ({SNAPSHOT_HEADER}:...)\n  \
         show / help / quit"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_place_with_coordinates() {
        assert_eq!(
            parse_action("place 3 4"),
            Ok(Action::Place(CellCoord::new(3, 4)))
        );
    }

    #[test]
    fn parse_move_with_id_and_cell() {
        assert_eq!(
            parse_action("move 2 5 1"),
            Ok(Action::Move(ObstacleId::new(2), CellCoord::new(5, 1)))
        );
    }

    #[test]
    fn parse_rejects_missing_arguments() {
        assert!(parse_action("place 3").is_err());
        assert!(parse_action("pause maybe").is_err());
        assert!(parse_action("warp 1 2").is_err());
    }

    #[test]
    fn parse_pause_toggles() {
        assert_eq!(parse_action("pause on"), Ok(Action::Pause(true)));
        assert_eq!(parse_action("pause off"), Ok(Action::Pause(false)));
    }

    #[test]
    fn place_at_pixel_resolves_the_hovered_cell() {
        let mut world = World::new();
        let mut events = Vec::new();
        let target = CellCoord::new(4, 2);
        let center = query::cell_center(&world, target);

        run_action(&mut world, Action::PlaceAtPixel(center), &mut events);

        let snapshots = query::obstacle_view(&world).into_vec();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].cell, target);
    }

    #[test]
    fn place_routes_through_builder_into_the_world() {
        let mut world = World::new();
        let mut events = Vec::new();

        run_action(&mut world, Action::Place(CellCoord::new(6, 2)), &mut events);

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::ObstaclePlaced { .. })));
        assert_eq!(query::obstacle_view(&world).len(), 1);
    }

    #[test]
    fn remove_routes_through_builder_into_the_world() {
        let mut world = World::new();
        let mut events = Vec::new();
        run_action(&mut world, Action::Place(CellCoord::new(6, 2)), &mut events);
        events.clear();

        run_action(&mut world, Action::Remove(CellCoord::new(6, 2)), &mut events);

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::ObstacleRemoved { .. })));
        assert!(query::obstacle_view(&world).is_empty());
    }
}

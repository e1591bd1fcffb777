//! Deterministic A* search over the blocked/free cell set.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use corridor_defence_core::CellCoord;

/// All scores are doubled so the half-step straightness penalty stays
/// integral: a cardinal step costs 2, the penalty costs 1.
const STEP_COST: u32 = 2;
const BEND_PENALTY: u32 = 1;

/// Searches for a route from `start` to `goal` avoiding `blocked` cells.
///
/// Movement is strictly 4-directional with uniform step cost; the
/// heuristic is the Manhattan distance plus a small additive penalty when
/// both axis deltas are nonzero, which biases the search toward straight
/// segments over staircases. Ties between equal f-scores break by
/// insertion order, so the produced route is reproducible for identical
/// inputs. The search gives up after `2 * columns * rows` expansions.
///
/// Returns the ordered cell sequence from start to goal, or an empty
/// vector when no route exists. The search has no side effects.
pub(crate) fn find_route(
    columns: u32,
    rows: u32,
    start: CellCoord,
    goal: CellCoord,
    blocked: &HashSet<CellCoord>,
) -> Vec<CellCoord> {
    if columns == 0 || rows == 0 {
        return Vec::new();
    }
    if start.column() >= columns || start.row() >= rows {
        return Vec::new();
    }
    if goal.column() >= columns || goal.row() >= rows {
        return Vec::new();
    }
    if blocked.contains(&start) || blocked.contains(&goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let width = columns as usize;
    let cell_count = width * rows as usize;
    let max_iterations = cell_count.saturating_mul(2);

    let index_of = |cell: CellCoord| cell.row() as usize * width + cell.column() as usize;

    let mut g_scores = vec![u32::MAX; cell_count];
    let mut predecessors: Vec<Option<usize>> = vec![None; cell_count];
    let mut closed = vec![false; cell_count];
    let mut open = BinaryHeap::new();
    let mut sequence: u32 = 0;

    let start_index = index_of(start);
    g_scores[start_index] = 0;
    open.push(OpenEntry {
        f_score: heuristic(start, goal),
        sequence,
        index: start_index,
    });

    let mut iterations = 0usize;
    while let Some(entry) = open.pop() {
        // Stale heap entries for already-closed cells are not expansions
        // and do not count against the cap.
        if closed[entry.index] {
            continue;
        }
        closed[entry.index] = true;

        iterations += 1;
        if iterations > max_iterations {
            return Vec::new();
        }

        let current = CellCoord::new((entry.index % width) as u32, (entry.index / width) as u32);
        if current == goal {
            return reconstruct(&predecessors, entry.index, width);
        }

        let current_g = g_scores[entry.index];
        for neighbor in cardinal_neighbors(current, columns, rows) {
            if blocked.contains(&neighbor) {
                continue;
            }
            let neighbor_index = index_of(neighbor);
            if closed[neighbor_index] {
                continue;
            }

            let tentative_g = current_g + STEP_COST;
            if tentative_g < g_scores[neighbor_index] {
                g_scores[neighbor_index] = tentative_g;
                predecessors[neighbor_index] = Some(entry.index);
                sequence += 1;
                open.push(OpenEntry {
                    f_score: tentative_g + heuristic(neighbor, goal),
                    sequence,
                    index: neighbor_index,
                });
            }
        }
    }

    Vec::new()
}

fn heuristic(cell: CellCoord, goal: CellCoord) -> u32 {
    let dx = cell.column().abs_diff(goal.column());
    let dy = cell.row().abs_diff(goal.row());
    let mut estimate = (dx + dy) * STEP_COST;
    if dx > 0 && dy > 0 {
        estimate += BEND_PENALTY;
    }
    estimate
}

fn reconstruct(predecessors: &[Option<usize>], goal_index: usize, width: usize) -> Vec<CellCoord> {
    let mut route = Vec::new();
    let mut cursor = Some(goal_index);
    while let Some(index) = cursor {
        route.push(CellCoord::new((index % width) as u32, (index / width) as u32));
        cursor = predecessors[index];
    }
    route.reverse();
    route
}

fn cardinal_neighbors(cell: CellCoord, columns: u32, rows: u32) -> NeighborIter {
    let mut neighbors = NeighborIter::default();

    if cell.column() + 1 < columns {
        neighbors.push(CellCoord::new(cell.column() + 1, cell.row()));
    }
    if cell.column() > 0 {
        neighbors.push(CellCoord::new(cell.column() - 1, cell.row()));
    }
    if cell.row() + 1 < rows {
        neighbors.push(CellCoord::new(cell.column(), cell.row() + 1));
    }
    if cell.row() > 0 {
        neighbors.push(CellCoord::new(cell.column(), cell.row() - 1));
    }

    neighbors
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenEntry {
    f_score: u32,
    sequence: u32,
    index: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys so the lowest
        // f-score wins and earlier insertions win ties.
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug, Default)]
struct NeighborIter {
    buffer: [Option<CellCoord>; 4],
    len: usize,
    cursor: usize,
}

impl NeighborIter {
    fn push(&mut self, cell: CellCoord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}

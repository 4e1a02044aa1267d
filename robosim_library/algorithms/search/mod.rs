//! Best-first grid search shared by A* and Dijkstra
//!
//! The open set is a binary min-heap keyed on `f = g + h`. Equal `f` values
//! pop in insertion order, so results are deterministic for identical inputs.
//! Entering a cell costs `1 + penalty(cell)` from the [`ProximityMap`].

use super::proximity::ProximityMap;
use robosim_core::{Grid, GridPos};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f64,
    g: f64,
    counter: u64,
    pos: GridPos,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    // Reversed so BinaryHeap pops the smallest f, then the oldest entry
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}

/// Search `grid` from `start` to `target`
///
/// Returns the start-to-target path inclusive, or an empty path when the
/// target cannot be reached. A start cell that is an obstacle yields an empty
/// path.
pub fn grid_search(
    grid: &Grid,
    proximity: &ProximityMap,
    start: GridPos,
    target: GridPos,
    heuristic: impl Fn(GridPos) -> f64,
) -> Vec<GridPos> {
    let (Some(start_index), Some(_)) = (grid.index(start), grid.index(target)) else {
        return Vec::new();
    };
    if grid.is_occupied(start) {
        return Vec::new();
    }

    let cell_count = grid.width() * grid.height();
    let mut g_score = vec![f64::INFINITY; cell_count];
    let mut came_from: Vec<Option<GridPos>> = vec![None; cell_count];
    let mut open = BinaryHeap::new();
    let mut counter = 0u64;
    let mut expanded = 0usize;

    g_score[start_index] = 0.0;
    open.push(OpenNode {
        f: heuristic(start),
        g: 0.0,
        counter,
        pos: start,
    });

    while let Some(current) = open.pop() {
        if current.pos == target {
            debug!(expanded, cost = current.g, "grid search reached target");
            return reconstruct_path(grid, &came_from, target);
        }

        let Some(current_index) = grid.index(current.pos) else {
            continue;
        };
        // Stale heap entry, a cheaper route was already recorded
        if current.g > g_score[current_index] {
            continue;
        }
        expanded += 1;

        for neighbor in current.pos.neighbors() {
            if !grid.is_free_cell(neighbor) {
                continue;
            }
            let Some(neighbor_index) = grid.index(neighbor) else {
                continue;
            };

            let tentative = current.g + 1.0 + proximity.penalty(neighbor);
            if tentative < g_score[neighbor_index] {
                g_score[neighbor_index] = tentative;
                came_from[neighbor_index] = Some(current.pos);
                counter += 1;
                open.push(OpenNode {
                    f: tentative + heuristic(neighbor),
                    g: tentative,
                    counter,
                    pos: neighbor,
                });
            }
        }
    }

    debug!(expanded, "grid search exhausted open set");
    Vec::new()
}

fn reconstruct_path(grid: &Grid, came_from: &[Option<GridPos>], target: GridPos) -> Vec<GridPos> {
    let mut path = vec![target];
    let mut current = target;

    while let Some(prev) = grid.index(current).and_then(|i| came_from[i]) {
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}

/// Total cost of walking `path`: one per move plus the proximity penalty of
/// every entered cell
pub fn path_cost(proximity: &ProximityMap, path: &[GridPos]) -> f64 {
    path.iter()
        .skip(1)
        .map(|&cell| 1.0 + proximity.penalty(cell))
        .sum()
}

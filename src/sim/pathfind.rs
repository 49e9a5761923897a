//! Grid-overlay A* pathfinding
//!
//! A uniform square grid is laid over the arena's inner bounds each call;
//! the routine is stateless and safe to re-invoke every repath interval.
//! Expansion is 8-connected with exact costs (1 cardinal, sqrt(2) diagonal).
//!
//! The heuristic is Manhattan distance, which overestimates when diagonals
//! are in play, so returned paths are not guaranteed optimal. That
//! inadmissibility is an accepted speed/simplicity tradeoff; switching to
//! octile distance would restore optimality if ever needed.

use glam::Vec2;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::arena::Arena;
use super::obstacle::ObstacleField;
use super::rect::Rect;
use crate::consts::{PATH_CELL_CLEARANCE, PATH_CELL_SIZE};

/// Integer grid cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub col: i32,
    pub row: i32,
}

/// Grid overlay derived from the arena's inner bounds
struct PathGrid {
    origin: Vec2,
    cell: f32,
    cols: i32,
    rows: i32,
}

impl PathGrid {
    fn new(arena: &Arena) -> Self {
        let inner = arena.inner_bounds();
        Self {
            origin: Vec2::new(inner.left(), inner.top()),
            cell: PATH_CELL_SIZE,
            cols: (inner.w / PATH_CELL_SIZE).floor().max(1.0) as i32,
            rows: (inner.h / PATH_CELL_SIZE).floor().max(1.0) as i32,
        }
    }

    /// Snap a continuous point to its containing cell, clamped to the grid
    fn to_cell(&self, pos: Vec2) -> GridCoord {
        let col = ((pos.x - self.origin.x) / self.cell).floor() as i32;
        let row = ((pos.y - self.origin.y) / self.cell).floor() as i32;
        GridCoord {
            col: col.clamp(0, self.cols - 1),
            row: row.clamp(0, self.rows - 1),
        }
    }

    /// Center point of a cell
    fn cell_center(&self, c: GridCoord) -> Vec2 {
        Vec2::new(
            self.origin.x + (c.col as f32 + 0.5) * self.cell,
            self.origin.y + (c.row as f32 + 0.5) * self.cell,
        )
    }

    fn in_bounds(&self, c: GridCoord) -> bool {
        c.col >= 0 && c.col < self.cols && c.row >= 0 && c.row < self.rows
    }

    /// A cell is traversable iff its footprint (plus clearance) is free of
    /// active obstacles
    fn traversable(&self, c: GridCoord, field: &ObstacleField) -> bool {
        if !self.in_bounds(c) {
            return false;
        }
        let footprint = Rect::new(
            self.origin.x + c.col as f32 * self.cell,
            self.origin.y + c.row as f32 * self.cell,
            self.cell,
            self.cell,
        )
        .inflate(PATH_CELL_CLEARANCE, PATH_CELL_CLEARANCE);
        !field.collides(&footprint)
    }
}

/// Open-set entry; ordered so the lowest f pops first, ties broken by
/// insertion order (consistent, not required to be unique)
struct OpenNode {
    f: f32,
    seq: u32,
    coord: GridCoord,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}
impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert so the smallest f wins
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Manhattan heuristic over grid coordinates
#[inline]
fn heuristic(a: GridCoord, b: GridCoord) -> f32 {
    ((a.col - b.col).abs() + (a.row - b.row).abs()) as f32
}

const NEIGHBORS: [(i32, i32, f32); 8] = [
    (1, 0, 1.0),
    (-1, 0, 1.0),
    (0, 1, 1.0),
    (0, -1, 1.0),
    (1, 1, std::f32::consts::SQRT_2),
    (1, -1, std::f32::consts::SQRT_2),
    (-1, 1, std::f32::consts::SQRT_2),
    (-1, -1, std::f32::consts::SQRT_2),
];

/// Find a waypoint path from `start` to `goal` around active obstacles.
///
/// Returns cell-center waypoints from the start cell to the goal cell, or an
/// empty vector when no route exists - callers treat that as "path
/// unavailable", never as an error.
pub fn find_path(start: Vec2, goal: Vec2, field: &ObstacleField, arena: &Arena) -> Vec<Vec2> {
    let grid = PathGrid::new(arena);
    let start_cell = grid.to_cell(start);
    let goal_cell = grid.to_cell(goal);

    if start_cell == goal_cell {
        return vec![grid.cell_center(goal_cell)];
    }

    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<GridCoord, f32> = HashMap::new();
    let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();
    let mut closed: HashSet<GridCoord> = HashSet::new();
    let mut seq = 0u32;

    g_score.insert(start_cell, 0.0);
    open.push(OpenNode {
        f: heuristic(start_cell, goal_cell),
        seq,
        coord: start_cell,
    });

    while let Some(node) = open.pop() {
        let current = node.coord;
        if !closed.insert(current) {
            continue; // stale heap entry
        }

        if current == goal_cell {
            return reconstruct(&grid, &came_from, current);
        }

        let current_g = g_score[&current];
        for (dc, dr, cost) in NEIGHBORS {
            let next = GridCoord {
                col: current.col + dc,
                row: current.row + dr,
            };
            if closed.contains(&next) || !grid.traversable(next, field) {
                continue;
            }
            let tentative = current_g + cost;
            if tentative < *g_score.get(&next).unwrap_or(&f32::INFINITY) {
                g_score.insert(next, tentative);
                came_from.insert(next, current);
                seq += 1;
                open.push(OpenNode {
                    f: tentative + heuristic(next, goal_cell),
                    seq,
                    coord: next,
                });
            }
        }
    }

    // Open set exhausted: no route
    Vec::new()
}

/// Walk the predecessor chain goal-to-start, reverse, emit cell centers
fn reconstruct(grid: &PathGrid, came_from: &HashMap<GridCoord, GridCoord>, goal: GridCoord) -> Vec<Vec2> {
    let mut cells = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        cells.push(prev);
        current = prev;
    }
    cells.reverse();
    cells.into_iter().map(|c| grid.cell_center(c)).collect()
}

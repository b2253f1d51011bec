use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::grid::OccupancyGrid;
use crate::order::sort_by_area_desc;
use crate::types::{Board, Detail, Outcome, Placement, Solution};

pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(5000);

/// Backtracking placement search over a unit-cell occupancy grid.
///
/// Details are tried largest first. For each detail every position is
/// scanned column by column (x outer, y inner), unrotated before rotated, and
/// the first free position is committed before recursing. The first complete
/// arrangement found is returned; it is not optimized for waste.
pub struct Cutter {
    board: Board,
    details: Vec<Detail>,
    time_limit: Duration,
}

impl Cutter {
    pub fn new(board: Board, details: Vec<Detail>) -> Self {
        Self {
            board,
            details,
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn solve(mut self) -> Outcome {
        sort_by_area_desc(&mut self.details);
        debug!(
            board = %self.board,
            details = self.details.len(),
            time_limit_ms = self.time_limit.as_millis() as u64,
            "starting placement search"
        );

        let mut search = Search {
            board: self.board,
            details: &self.details,
            grid: OccupancyGrid::new(self.board.width, self.board.height),
            placements: Vec::with_capacity(self.details.len()),
            started: Instant::now(),
            time_limit: self.time_limit,
            timed_out: false,
            nodes: 0,
        };
        let found = search.place(0);
        debug_assert_eq!(
            search.grid.used_cells() as u64,
            search.placements.iter().map(|p| p.area()).sum::<u64>()
        );

        let elapsed_ms = search.started.elapsed().as_millis() as u64;
        let outcome = if found {
            Outcome::Solved(Solution {
                board: self.board,
                placements: search.placements,
            })
        } else if search.timed_out {
            Outcome::TimedOut
        } else {
            Outcome::Exhausted
        };
        info!(
            status = outcome.status(),
            nodes = search.nodes,
            elapsed_ms,
            "placement search finished"
        );
        outcome
    }
}

struct Search<'a> {
    board: Board,
    details: &'a [Detail],
    grid: OccupancyGrid,
    placements: Vec<Placement>,
    started: Instant,
    time_limit: Duration,
    timed_out: bool,
    nodes: u64,
}

impl Search<'_> {
    fn place(&mut self, index: usize) -> bool {
        debug_assert_eq!(self.placements.len(), index);
        self.nodes += 1;

        if self.started.elapsed() > self.time_limit {
            self.timed_out = true;
            return false;
        }
        if index == self.details.len() {
            return true;
        }

        if self.try_orientation(index, false) {
            return true;
        }
        // A square looks the same rotated.
        if !self.timed_out && !self.details[index].is_square() {
            return self.try_orientation(index, true);
        }
        false
    }

    fn try_orientation(&mut self, index: usize, rotated: bool) -> bool {
        let details = self.details;
        let detail = &details[index];
        let w = detail.width_for(rotated);
        let h = detail.height_for(rotated);
        let (Some(max_x), Some(max_y)) = (
            self.board.width.checked_sub(w),
            self.board.height.checked_sub(h),
        ) else {
            return false;
        };

        for x in 0..=max_x {
            for y in 0..=max_y {
                if !self.grid.is_free(x, y, w, h) {
                    continue;
                }

                self.grid.fill(x, y, w, h);
                self.placements.push(Placement {
                    detail: detail.clone(),
                    x,
                    y,
                    rotated,
                });

                if self.place(index + 1) {
                    return true;
                }

                self.grid.clear(x, y, w, h);
                self.placements.pop();

                if self.timed_out {
                    return false;
                }
            }
        }
        false
    }
}

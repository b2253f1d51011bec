/// Per-cell occupancy of a board, one flag per square millimeter.
#[derive(Debug)]
pub(crate) struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[cfg(test)]
    pub fn is_used(&self, x: u32, y: u32) -> bool {
        let (x, y) = (x as usize, y as usize);
        x < self.width && y < self.height && self.cells[self.idx(x, y)]
    }

    /// True when the rectangle lies inside the board and none of its cells
    /// is used.
    pub fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let (x, y, w, h) = (x as usize, y as usize, w as usize, h as usize);
        if x + w > self.width || y + h > self.height {
            return false;
        }
        for j in y..y + h {
            let row = self.idx(x, j);
            if self.cells[row..row + w].iter().any(|&c| c) {
                return false;
            }
        }
        true
    }

    pub fn fill(&mut self, x: u32, y: u32, w: u32, h: u32) {
        self.set(x, y, w, h, true);
    }

    pub fn clear(&mut self, x: u32, y: u32, w: u32, h: u32) {
        self.set(x, y, w, h, false);
    }

    pub fn used_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn set(&mut self, x: u32, y: u32, w: u32, h: u32, state: bool) {
        let (x, y, w, h) = (x as usize, y as usize, w as usize, h as usize);
        for j in y..y + h {
            let row = self.idx(x, j);
            self.cells[row..row + w].fill(state);
        }
    }
}

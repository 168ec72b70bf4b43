use crate::env::Terrain;
use crate::state::Position;

use super::Room;

/// Boolean walkability matrix. A cell is walkable iff it belongs to a room
/// or a corridor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// Largest number of cells a grid may hold.
    pub const MAX_CELLS: usize = 1 << 24;

    /// `width * height` when it is non-zero and at most [`Self::MAX_CELLS`].
    pub fn cell_count(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .filter(|cells| (1..=Self::MAX_CELLS).contains(cells))
    }

    /// Creates a grid with every cell blocked.
    ///
    /// Callers check the dimensions with [`Self::cell_count`] first.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// Out-of-bounds cells are never walkable.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.cells[i])
    }

    pub(crate) fn open(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.cells[i] = true;
        }
    }

    pub(crate) fn carve_room(&mut self, room: &Room) {
        for cell in room.cells() {
            self.open(cell);
        }
    }

    /// Carves an L-shaped corridor: horizontal from `start` to `end.x`, then
    /// vertical to `end.y`. Both endpoints are included.
    pub(crate) fn carve_corridor(&mut self, start: Position, end: Position) {
        let mut cursor = start;
        let step_x = (end.x - start.x).signum();
        while cursor.x != end.x {
            self.open(cursor);
            cursor.x += step_x;
        }
        let step_y = (end.y - start.y).signum();
        while cursor.y != end.y {
            self.open(cursor);
            cursor.y += step_y;
        }
        self.open(cursor);
    }

    /// A non-walkable cell with at least one walkable 8-neighbour.
    ///
    /// Walls are a presentation concern; movement consults only walkability.
    pub fn is_wall(&self, position: Position) -> bool {
        if !self.contains(position) || self.is_walkable(position) {
            return false;
        }
        (-1..=1).any(|dy| {
            (-1..=1).any(|dx| (dx, dy) != (0, 0) && self.is_walkable(position.offset(dx, dy)))
        })
    }

    pub fn walls(&self) -> Vec<Position> {
        self.positions().filter(|p| self.is_wall(*p)).collect()
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Every cell position, row by row from `y = 0`.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    pub(crate) fn raw_cells(&self) -> &[bool] {
        &self.cells
    }
}

impl Terrain for Grid {
    fn is_walkable(&self, position: Position) -> bool {
        Grid::is_walkable(self, position)
    }
}

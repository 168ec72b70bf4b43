use crate::state::Position;

/// Functional label of a room. The boss room is always [`RoomKind::Special`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomKind {
    ControlRoom,
    Storage,
    Laboratory,
    Special,
}

impl RoomKind {
    /// Kinds drawn for ordinary rooms.
    pub const ORDINARY: [RoomKind; 3] = [
        RoomKind::ControlRoom,
        RoomKind::Storage,
        RoomKind::Laboratory,
    ];
}

/// Axis-aligned rectangular room. Covers `origin.x .. origin.x + width` and
/// `origin.y .. origin.y + height` (half-open).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub origin: Position,
    pub width: u32,
    pub height: u32,
    pub kind: RoomKind,
}

impl Room {
    pub const fn new(origin: Position, width: u32, height: u32, kind: RoomKind) -> Self {
        Self {
            origin,
            width,
            height,
            kind,
        }
    }

    fn right(&self) -> i32 {
        self.origin.x + self.width as i32
    }

    fn top(&self) -> i32 {
        self.origin.y + self.height as i32
    }

    pub fn center(&self) -> Position {
        Position::new(
            self.origin.x + (self.width / 2) as i32,
            self.origin.y + (self.height / 2) as i32,
        )
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.origin.x
            && position.x < self.right()
            && position.y >= self.origin.y
            && position.y < self.top()
    }

    pub fn overlaps(&self, other: &Room) -> bool {
        self.origin.x < other.right()
            && self.right() > other.origin.x
            && self.origin.y < other.top()
            && self.top() > other.origin.y
    }

    /// Half-open x and y ranges of cells not on the room's border.
    ///
    /// Either range is empty for rooms narrower than three cells.
    pub fn interior(&self) -> (std::ops::Range<i32>, std::ops::Range<i32>) {
        (
            self.origin.x + 1..self.right() - 1,
            self.origin.y + 1..self.top() - 1,
        )
    }

    /// Every cell covered by the room, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.origin.y..self.top())
            .flat_map(move |y| (self.origin.x..self.right()).map(move |x| Position::new(x, y)))
    }
}

//! Tile-grid geometry shared between the engine and its hosts.
//!
//! Positions are whole tiles. The vision test measures deltas as
//! `target - watcher` in this frame; hosts whose maps grow right and down
//! (screen space) go through [`TilePos::from_screen`].

use serde::{Deserialize, Serialize};

/// A tile coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    /// X component
    pub x: i32,
    /// Y component
    pub y: i32,
}

impl TilePos {
    /// Creates a new tile position
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Origin tile
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Converts a screen-space tile (x grows right, y grows down) into the
    /// frame the vision test expects.
    ///
    /// Both axes are reflected, so a watcher facing `Down` on screen covers
    /// the tiles below it and one facing `Left` covers the tiles to its left.
    #[must_use]
    pub const fn from_screen(x: i32, y: i32) -> Self {
        Self::new(x.saturating_neg(), y.saturating_neg())
    }

    /// Offset from `self` to `other`, widened so it can never overflow.
    #[inline]
    #[must_use]
    pub fn delta_to(self, other: Self) -> (i64, i64) {
        (
            i64::from(other.x) - i64::from(self.x),
            i64::from(other.y) - i64::from(self.y),
        )
    }

    /// Returns this position moved by a tile offset.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [i32; 2] {
        [self.x, self.y]
    }
}

impl From<(i32, i32)> for TilePos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Direction an entity faces.
///
/// The diagonals exist because eight-way hosts can report them; the vision
/// test never sees anything while an entity faces a diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Towards negative y in the vision frame (screen: down).
    Down,
    /// Towards positive x in the vision frame (screen: left).
    Left,
    /// Towards negative x in the vision frame (screen: right).
    Right,
    /// Towards positive y in the vision frame (screen: up).
    Up,
    /// Diagonal, down and left.
    DownLeft,
    /// Diagonal, down and right.
    DownRight,
    /// Diagonal, up and left.
    UpLeft,
    /// Diagonal, up and right.
    UpRight,
}

impl Facing {
    /// Converts the engine's numpad direction code.
    ///
    /// `2`/`4`/`6`/`8` are the cardinals, `1`/`3`/`7`/`9` the diagonals.
    /// Anything else (including `0`, "no direction") is `None`.
    #[must_use]
    pub const fn from_numpad(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::DownLeft),
            2 => Some(Self::Down),
            3 => Some(Self::DownRight),
            4 => Some(Self::Left),
            6 => Some(Self::Right),
            7 => Some(Self::UpLeft),
            8 => Some(Self::Up),
            9 => Some(Self::UpRight),
            _ => None,
        }
    }

    /// Returns the numpad direction code.
    #[must_use]
    pub const fn to_numpad(self) -> u8 {
        match self {
            Self::DownLeft => 1,
            Self::Down => 2,
            Self::DownRight => 3,
            Self::Left => 4,
            Self::Right => 6,
            Self::UpLeft => 7,
            Self::Up => 8,
            Self::UpRight => 9,
        }
    }

    /// True for `Up`, `Down`, `Left` and `Right`.
    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }

    /// Quarter turn clockwise as seen on screen.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::UpRight => Self::DownRight,
            Self::DownRight => Self::DownLeft,
            Self::DownLeft => Self::UpLeft,
            Self::UpLeft => Self::UpRight,
        }
    }

    /// One-tile step in screen space (x grows right, y grows down).
    #[must_use]
    pub const fn screen_step(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (1, -1),
            Self::DownLeft => (-1, 1),
            Self::DownRight => (1, 1),
        }
    }
}

/// Where a watcher stands and which way it looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    /// Current tile.
    pub position: TilePos,
    /// Current facing.
    pub facing: Facing,
}

impl Pose {
    /// Creates a pose
    #[must_use]
    pub const fn new(position: TilePos, facing: Facing) -> Self {
        Self { position, facing }
    }
}

/// The entity watchers look for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Current tile.
    pub position: TilePos,
}

impl Target {
    /// Creates a target standing on `position`
    #[must_use]
    pub const fn at(position: TilePos) -> Self {
        Self { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_target_minus_watcher() {
        let watcher = TilePos::new(5, 5);
        assert_eq!(watcher.delta_to(TilePos::new(6, 0)), (1, -5));
    }

    #[test]
    fn test_delta_does_not_overflow() {
        let a = TilePos::new(i32::MIN, i32::MAX);
        let b = TilePos::new(i32::MAX, i32::MIN);
        let (dx, dy) = a.delta_to(b);
        assert_eq!(dx, i64::from(i32::MAX) - i64::from(i32::MIN));
        assert_eq!(dy, i64::from(i32::MIN) - i64::from(i32::MAX));
    }

    #[test]
    fn test_numpad_roundtrip_and_rejects() {
        for code in [1u8, 2, 3, 4, 6, 7, 8, 9] {
            let facing = Facing::from_numpad(code).unwrap();
            assert_eq!(facing.to_numpad(), code);
        }
        assert_eq!(Facing::from_numpad(0), None);
        assert_eq!(Facing::from_numpad(5), None);
    }

    #[test]
    fn test_clockwise_cycles() {
        let mut facing = Facing::Up;
        for _ in 0..4 {
            facing = facing.clockwise();
        }
        assert_eq!(facing, Facing::Up);
        assert_eq!(Facing::Up.clockwise(), Facing::Right);
        assert!(!Facing::UpLeft.clockwise().is_cardinal());
    }

    #[test]
    fn test_from_screen_reflects_both_axes() {
        assert_eq!(TilePos::from_screen(3, -4), TilePos::new(-3, 4));
        assert_eq!(TilePos::from_screen(i32::MIN, 0), TilePos::new(i32::MAX, 0));
    }
}

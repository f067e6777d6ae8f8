//! Compass headings as a modular ring of eight 45° steps.

use serde::{Deserialize, Serialize};

/// One of the eight discretized headings, spaced 45° apart.
///
/// The ring is ordered clockwise starting at north, so every direction
/// has an index in `0..8` and arithmetic on headings is arithmetic mod 8.
///
/// ```
/// use broadside_proto::CompassDirection;
///
/// assert_eq!(CompassDirection::North.rotated(-1), CompassDirection::NorthWest);
/// assert_eq!(CompassDirection::East.clockwise_distance(CompassDirection::North), 6);
/// assert_eq!(serde_json::to_string(&CompassDirection::SouthEast).unwrap(), "\"se\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    /// 0°.
    #[serde(rename = "n")]
    North,
    /// 45°.
    #[serde(rename = "ne")]
    NorthEast,
    /// 90°.
    #[serde(rename = "e")]
    East,
    /// 135°.
    #[serde(rename = "se")]
    SouthEast,
    /// 180°.
    #[serde(rename = "s")]
    South,
    /// 225°.
    #[serde(rename = "sw")]
    SouthWest,
    /// 270°.
    #[serde(rename = "w")]
    West,
    /// 315°.
    #[serde(rename = "nw")]
    NorthWest,
}

impl CompassDirection {
    /// Number of headings on the ring.
    pub const COUNT: u8 = 8;

    /// Every heading in clockwise order, indexed by [`index`](Self::index).
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::North,
        CompassDirection::NorthEast,
        CompassDirection::East,
        CompassDirection::SouthEast,
        CompassDirection::South,
        CompassDirection::SouthWest,
        CompassDirection::West,
        CompassDirection::NorthWest,
    ];

    /// Position on the ring, clockwise from north.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Heading at ring position `index`, taken mod 8.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(i32::from(Self::COUNT)) as usize]
    }

    /// Rotate by `steps` eighth-turns; positive is clockwise.
    #[must_use]
    pub fn rotated(self, steps: i32) -> Self {
        Self::from_index(i32::from(self.index()) + steps)
    }

    /// Eighth-turns needed to reach `target` turning clockwise only.
    pub fn clockwise_distance(self, target: Self) -> u8 {
        (target.index() + Self::COUNT - self.index()) % Self::COUNT
    }

    /// Eighth-turns needed to reach `target` turning counter-clockwise only.
    pub fn counter_clockwise_distance(self, target: Self) -> u8 {
        target.clockwise_distance(self)
    }

    /// The heading 180° away.
    #[must_use]
    pub fn opposite(self) -> Self {
        self.rotated(4)
    }

    /// Short wire name (`"n"`, `"ne"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            CompassDirection::North => "n",
            CompassDirection::NorthEast => "ne",
            CompassDirection::East => "e",
            CompassDirection::SouthEast => "se",
            CompassDirection::South => "s",
            CompassDirection::SouthWest => "sw",
            CompassDirection::West => "w",
            CompassDirection::NorthWest => "nw",
        }
    }
}

impl std::fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use crate::{Direction, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Direction::{Backward, Down, Forward, Left, Right, Up};

/// Chirality of an axis assignment relative to the canonical convention
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    /// Same chirality as the canonical convention
    Canonical,
    /// Mirror image of the canonical convention, rotations reverse their sense
    Mirrored,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Canonical => f.write_str("canonical"),
            Handedness::Mirrored => f.write_str("mirrored"),
        }
    }
}

/// For every first axis (indexed in `Direction::ALL` order), the four
/// (second, third) pairs that keep canonical chirality.
const CANONICAL_PAIRS: [[(Direction, Direction); 4]; 6] = [
    // Right
    [(Up, Forward), (Backward, Up), (Down, Backward), (Forward, Down)],
    // Left
    [(Forward, Up), (Up, Backward), (Backward, Down), (Down, Forward)],
    // Up
    [(Forward, Right), (Right, Backward), (Backward, Left), (Left, Forward)],
    // Down
    [(Forward, Left), (Right, Forward), (Backward, Right), (Left, Backward)],
    // Forward
    [(Right, Up), (Up, Left), (Left, Down), (Down, Right)],
    // Backward
    [(Up, Right), (Left, Up), (Down, Left), (Right, Down)],
];

/// A caller's coordinate convention: component `i` of a caller value lies
/// along canonical direction `directions()[i]`.
///
/// Construction rejects triples that do not use each of the three axis pairs
/// exactly once, so every value of this type describes an orthogonal basis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Direction>", into = "[Direction; 3]")]
pub struct AxisAssignment([Direction; 3]);

impl AxisAssignment {
    /// The canonical convention itself, conversion through it is a no-op
    pub const CANONICAL: Self = Self([Right, Up, Forward]);

    /// X forward, Y right, Z up
    pub const UNREAL: Self = Self([Forward, Right, Up]);

    /// X right, Y forward, Z up
    pub const BLENDER: Self = Self([Right, Forward, Up]);

    /// Canonical with the X axis flipped
    pub const MIRRORED_X: Self = Self([Left, Up, Forward]);

    pub fn new(first: Direction, second: Direction, third: Direction) -> Result<Self> {
        let directions = [first, second, third];
        let axes_used = directions
            .iter()
            .fold(0u8, |mask, direction| mask | (1 << direction.axis()));

        if axes_used == 0b111 {
            Ok(Self(directions))
        } else {
            Err(Error::InvalidBasis(directions))
        }
    }

    pub fn directions(&self) -> [Direction; 3] {
        self.0
    }

    pub fn handedness(&self) -> Handedness {
        let [first, second, third] = self.0;
        let canonical_pairs = &CANONICAL_PAIRS[first as usize];
        if canonical_pairs.contains(&(second, third)) {
            Handedness::Canonical
        } else {
            Handedness::Mirrored
        }
    }

    pub fn is_mirrored(&self) -> bool {
        self.handedness() == Handedness::Mirrored
    }

    /// Every valid assignment, 6 * 4 * 2 = 48 in total
    pub fn all() -> impl Iterator<Item = AxisAssignment> {
        Direction::ALL.into_iter().flat_map(|first| {
            Direction::ALL.into_iter().flat_map(move |second| {
                Direction::ALL
                    .into_iter()
                    .filter_map(move |third| AxisAssignment::new(first, second, third).ok())
            })
        })
    }
}

impl Default for AxisAssignment {
    fn default() -> Self {
        Self::CANONICAL
    }
}

impl TryFrom<&[Direction]> for AxisAssignment {
    type Error = Error;

    fn try_from(directions: &[Direction]) -> Result<Self> {
        match directions {
            [first, second, third] => Self::new(*first, *second, *third),
            _ => Err(Error::InvalidAxisCount(directions.len())),
        }
    }
}

impl TryFrom<Vec<Direction>> for AxisAssignment {
    type Error = Error;

    fn try_from(directions: Vec<Direction>) -> Result<Self> {
        Self::try_from(directions.as_slice())
    }
}

impl From<AxisAssignment> for [Direction; 3] {
    fn from(axes: AxisAssignment) -> Self {
        axes.0
    }
}

impl fmt::Display for AxisAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second, third] = self.0;
        write!(f, "{},{},{}", first, second, third)
    }
}

/// Accepts a preset name or a comma separated list such as `forward,right,up`
impl FromStr for AxisAssignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" | "unity" => Ok(Self::CANONICAL),
            "unreal" => Ok(Self::UNREAL),
            "blender" => Ok(Self::BLENDER),
            "mirrored-x" => Ok(Self::MIRRORED_X),
            list => {
                let directions = list
                    .split(',')
                    .map(Direction::from_str)
                    .collect::<Result<Vec<_>>>()?;
                Self::try_from(directions)
            }
        }
    }
}

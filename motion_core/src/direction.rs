use crate::Error;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six principal directions of the canonical coordinate system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Positive X
    Right,
    /// Negative X
    Left,
    /// Positive Y
    Up,
    /// Negative Y
    Down,
    /// Positive Z
    Forward,
    /// Negative Z
    Backward,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
        Direction::Forward,
        Direction::Backward,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Canonical axis index: 0 = X, 1 = Y, 2 = Z
    pub fn axis(self) -> usize {
        match self {
            Direction::Right | Direction::Left => 0,
            Direction::Up | Direction::Down => 1,
            Direction::Forward | Direction::Backward => 2,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Direction::Left | Direction::Down | Direction::Backward)
    }

    pub fn sign(self) -> f64 {
        if self.is_negative() {
            -1.0
        } else {
            1.0
        }
    }

    pub fn unit_vector(self) -> DVec3 {
        DVec3::AXES[self.axis()] * self.sign()
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" => Ok(Direction::Right),
            "left" => Ok(Direction::Left),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "forward" | "front" => Ok(Direction::Forward),
            "backward" | "back" => Ok(Direction::Backward),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}

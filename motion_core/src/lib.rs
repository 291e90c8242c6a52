mod aim;
mod axis;
pub mod convert;
mod direction;
mod transform;

pub use aim::*;
pub use axis::*;
pub use direction::*;
pub use transform::*;

pub use log;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid axis assignment {0:?}: every axis pair must be used exactly once")]
    InvalidBasis([Direction; 3]),

    #[error("Axis assignment needs exactly 3 directions, got {0}")]
    InvalidAxisCount(usize),

    #[error("Unknown direction: {0}")]
    UnknownDirection(String),

    #[error("Degenerate {0} direction: zero length or not finite")]
    DegenerateDirection(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Installs the pretty_env_logger backend, `RUST_LOG` overrides `default_level`
pub fn setup_logger(
    default_level: log::LevelFilter,
) -> std::result::Result<(), log::SetLoggerError> {
    pretty_env_logger::formatted_builder()
        .filter_level(default_level)
        .parse_env("RUST_LOG")
        .try_init()
}

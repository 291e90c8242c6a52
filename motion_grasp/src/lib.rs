mod default_pose;
mod grasp;
mod joint;
mod skeleton;

pub use default_pose::*;
pub use grasp::*;
pub use joint::*;
pub use skeleton::*;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No default offset for joint {0}")]
    MissingOffset(String),

    #[error("Joint {0} not present in posture of avatar {1}")]
    JointNotFound(String, String),

    #[error("Unknown joint name: {0}")]
    UnknownJoint(String),

    #[error("Unknown avatar: {0}")]
    UnknownAvatar(String),

    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] motion_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

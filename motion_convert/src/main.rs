use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use glam::{DQuat, DVec3};
use motion_core::log::{debug, info};
use motion_core::convert;
use motion_core::{AxisAssignment, Transform};
use motion_grasp::{DefaultHandPose, GraspPoseService, Hand, HandPose, Posture, PostureSkeleton};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Coordinate system mapping and grasp pose computation")]
struct Cli {
    /// Log debug output, RUST_LOG takes precedence
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a value given in the caller convention into the canonical one
    ToCanonical(ConvertArgs),

    /// Convert a canonical value into the caller convention
    FromCanonical(ConvertArgs),

    /// Print whether a convention has canonical or mirrored chirality
    Handedness {
        #[arg(long)]
        axes: AxisAssignment,
    },

    /// List every valid axis assignment
    List,

    /// Compute the hand pose grasping an object
    Grasp(GraspArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Preset (canonical, unreal, blender, mirrored-x) or list such as forward,right,up
    #[arg(long)]
    axes: AxisAssignment,

    #[command(flatten)]
    value: Value,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Value {
    /// x,y,z
    #[arg(long, allow_hyphen_values = true, value_parser = parse_vector)]
    vector: Option<DVec3>,

    /// x,y,z,w
    #[arg(long, allow_hyphen_values = true, value_parser = parse_quaternion)]
    quaternion: Option<DQuat>,

    /// Transform as json: {"id": "...", "position": [x, y, z], "rotation": [x, y, z, w]}
    #[arg(long, value_parser = parse_transform)]
    transform: Option<Transform>,
}

#[derive(Args, Debug)]
struct GraspArgs {
    /// Posture json file: {"avatar_id": "...", "joints": [{"joint_type": "RightWrist", "position": [...], "rotation": [...]}]}
    #[arg(long)]
    posture: PathBuf,

    #[arg(long)]
    hand: Hand,

    /// Object position, x,y,z
    #[arg(long, allow_hyphen_values = true, value_parser = parse_vector)]
    object: DVec3,

    /// Convention of the posture, object and output, defaults to canonical
    #[arg(long, default_value_t = AxisAssignment::CANONICAL)]
    axes: AxisAssignment,

    /// Replaces the bundled fingertip offsets
    #[arg(long)]
    default_pose: Option<PathBuf>,

    /// Emit the six joint transforms instead of the hand pose
    #[arg(long)]
    constraints: bool,
}

fn parse_components<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let components = s
        .split(',')
        .map(|component| component.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| err.to_string())?;
    <[f64; N]>::try_from(components)
        .map_err(|components| format!("expected {} components, got {}", N, components.len()))
}

fn parse_vector(s: &str) -> Result<DVec3, String> {
    parse_components::<3>(s).map(DVec3::from_array)
}

fn parse_quaternion(s: &str) -> Result<DQuat, String> {
    parse_components::<4>(s).map(DQuat::from_array)
}

fn parse_transform(s: &str) -> Result<Transform, String> {
    serde_json::from_str(s).map_err(|err| err.to_string())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
enum Converted {
    Vector(DVec3),
    Quaternion(DQuat),
    Transform(Transform),
}

fn convert_value(
    value: &Value,
    axes: &AxisAssignment,
    to_canonical: bool,
) -> anyhow::Result<Converted> {
    debug!("Converting with {} ({})", axes, axes.handedness());

    if let Some(vector) = value.vector {
        Ok(Converted::Vector(if to_canonical {
            convert::vector_to_canonical(vector, axes)
        } else {
            convert::vector_from_canonical(vector, axes)
        }))
    } else if let Some(quaternion) = value.quaternion {
        Ok(Converted::Quaternion(if to_canonical {
            convert::quaternion_to_canonical(quaternion, axes)
        } else {
            convert::quaternion_from_canonical(quaternion, axes)
        }))
    } else if let Some(transform) = &value.transform {
        Ok(Converted::Transform(if to_canonical {
            convert::transform_to_canonical(transform, axes)
        } else {
            convert::transform_from_canonical(transform, axes)
        }))
    } else {
        Err(anyhow!("Nothing to convert"))
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
enum GraspOutput {
    Pose(HandPose),
    Constraints(Vec<Transform>),
}

/// Runs a grasp with `posture` and `object` given in the `axes` convention,
/// the output is returned in that convention too
fn compute_grasp(
    service: &GraspPoseService,
    posture: &Posture,
    hand: Hand,
    object: DVec3,
    axes: &AxisAssignment,
    constraints: bool,
) -> anyhow::Result<GraspOutput> {
    let posture = posture.to_canonical(axes);
    let object = Transform::new(
        "object",
        convert::vector_to_canonical(object, axes),
        DQuat::IDENTITY,
    );

    if constraints {
        let mut skeleton = PostureSkeleton::new();
        let constraints = service
            .grasp_constraints(&mut skeleton, &posture, hand, &object)?
            .iter()
            .map(|transform| convert::transform_from_canonical(transform, axes))
            .collect();
        Ok(GraspOutput::Constraints(constraints))
    } else {
        let hand_pose = service.compute_grasp_pose(&posture, hand, &object)?;
        Ok(GraspOutput::Pose(hand_pose.to_convention(axes)))
    }
}

fn grasp(args: &GraspArgs) -> anyhow::Result<()> {
    let default_pose = match &args.default_pose {
        Some(path) => DefaultHandPose::from_path(path)
            .with_context(|| format!("Failed to load default pose {}", path.display()))?,
        None => DefaultHandPose::bundled().context("Failed to load bundled default pose")?,
    };
    let service = GraspPoseService::new(default_pose);

    let posture_json = std::fs::read_to_string(&args.posture)
        .with_context(|| format!("Failed to read posture {}", args.posture.display()))?;
    let posture: Posture = serde_json::from_str(&posture_json)
        .with_context(|| format!("Failed to parse posture {}", args.posture.display()))?;
    info!(
        "Grasping with {:?} hand of avatar {} ({} joints)",
        args.hand,
        posture.avatar_id,
        posture.joints.len()
    );

    print_json(&compute_grasp(
        &service,
        &posture,
        args.hand,
        args.object,
        &args.axes,
        args.constraints,
    )?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        motion_core::log::LevelFilter::Debug
    } else {
        motion_core::log::LevelFilter::Info
    };
    motion_core::setup_logger(level).context("Failed to init logger")?;

    match &cli.command {
        Command::ToCanonical(args) => {
            print_json(&convert_value(&args.value, &args.axes, true)?)
        }
        Command::FromCanonical(args) => {
            print_json(&convert_value(&args.value, &args.axes, false)?)
        }
        Command::Handedness { axes } => {
            println!("{}", axes.handedness());
            Ok(())
        }
        Command::List => {
            for axes in AxisAssignment::all() {
                println!("{:<24} {}", axes.to_string(), axes.handedness());
            }
            Ok(())
        }
        Command::Grasp(args) => grasp(args),
    }
}

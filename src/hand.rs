//! Hand model and tracking-source interface.
//!
//! Models 26 joints per hand per the XR hand-tracking convention and
//! defines the pull-based `JointSource` trait the detection pipeline
//! queries once per tick. Position extraction (the sampling step) lives
//! here too, including the malformed-joint policy.

use tracing::debug;

// ── Joint definitions ──────────────────────────────────────

/// The 26 tracked hand joints, in canonical index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandJoint {
    Palm,
    Wrist,
    ThumbMetacarpal,
    ThumbProximal,
    ThumbDistal,
    ThumbTip,
    IndexMetacarpal,
    IndexProximal,
    IndexIntermediate,
    IndexDistal,
    IndexTip,
    MiddleMetacarpal,
    MiddleProximal,
    MiddleIntermediate,
    MiddleDistal,
    MiddleTip,
    RingMetacarpal,
    RingProximal,
    RingIntermediate,
    RingDistal,
    RingTip,
    LittleMetacarpal,
    LittleProximal,
    LittleIntermediate,
    LittleDistal,
    LittleTip,
}

/// Total number of joints per hand.
pub const JOINT_COUNT: usize = 26;

impl HandJoint {
    /// Convert joint enum to array index (0-25).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// String representation for logs and tooling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Palm => "palm",
            Self::Wrist => "wrist",
            Self::ThumbMetacarpal => "thumb-metacarpal",
            Self::ThumbProximal => "thumb-proximal",
            Self::ThumbDistal => "thumb-distal",
            Self::ThumbTip => "thumb-tip",
            Self::IndexMetacarpal => "index-metacarpal",
            Self::IndexProximal => "index-proximal",
            Self::IndexIntermediate => "index-intermediate",
            Self::IndexDistal => "index-distal",
            Self::IndexTip => "index-tip",
            Self::MiddleMetacarpal => "middle-metacarpal",
            Self::MiddleProximal => "middle-proximal",
            Self::MiddleIntermediate => "middle-intermediate",
            Self::MiddleDistal => "middle-distal",
            Self::MiddleTip => "middle-tip",
            Self::RingMetacarpal => "ring-metacarpal",
            Self::RingProximal => "ring-proximal",
            Self::RingIntermediate => "ring-intermediate",
            Self::RingDistal => "ring-distal",
            Self::RingTip => "ring-tip",
            Self::LittleMetacarpal => "little-metacarpal",
            Self::LittleProximal => "little-proximal",
            Self::LittleIntermediate => "little-intermediate",
            Self::LittleDistal => "little-distal",
            Self::LittleTip => "little-tip",
        }
    }
}

// ── Hand enum ──────────────────────────────────────────────

/// Which hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parse a hand name ("left" or "right").
    pub fn parse(s: &str) -> Option<Hand> {
        match s {
            "left" => Some(Hand::Left),
            "right" => Some(Hand::Right),
            _ => None,
        }
    }
}

// ── Joint pose ─────────────────────────────────────────────

/// Pose data for a single joint as reported by the tracking source.
///
/// The feature pipeline reads only `position`; orientation and radius are
/// carried for validity checks and downstream consumers.
#[derive(Debug, Clone)]
pub struct JointPose {
    /// Position in meters (x, y, z).
    pub position: [f32; 3],
    /// Orientation quaternion (x, y, z, w).
    pub orientation: [f32; 4],
    /// Joint radius in meters.
    pub radius: f32,
    /// Whether this joint has valid tracking data.
    pub valid: bool,
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            orientation: [0.0, 0.0, 0.0, 1.0],
            radius: 0.01,
            valid: true,
        }
    }
}

impl JointPose {
    /// An all-zero quaternion marks a joint the tracking runtime never
    /// initialized this tick.
    pub fn is_degenerate(&self) -> bool {
        self.orientation == [0.0, 0.0, 0.0, 0.0]
    }
}

// ── Tracking source ────────────────────────────────────────

/// Pull-based hand tracking collaborator.
///
/// Queried once per tick. `entire_hand` returns all [`JOINT_COUNT`] joint
/// poses for the requested hand, or `None` when the hand is not tracked
/// this tick.
pub trait JointSource {
    /// Whether the tracking subsystem exists and is running at all.
    /// Polled while a session is still uninitialized.
    fn available(&self) -> bool;

    /// All joint poses for one hand, or `None` if untracked this tick.
    fn entire_hand(&mut self, hand: Hand) -> Option<Vec<JointPose>>;
}

// ── Position sampling ──────────────────────────────────────

/// Extract per-joint positions in canonical order, discarding orientation.
///
/// Returns `None` when the set cannot seed a displacement baseline: wrong
/// joint count, a joint flagged invalid, or a degenerate orientation. The
/// caller treats that as tracking-unavailable for the whole tick rather
/// than substituting zero vectors.
pub fn sample_positions(poses: &[JointPose], joint_count: usize) -> Option<Vec<[f32; 3]>> {
    if poses.len() != joint_count {
        debug!(
            "joint sample rejected: expected {} joints, got {}",
            joint_count,
            poses.len(),
        );
        return None;
    }
    if poses.iter().any(|p| !p.valid || p.is_degenerate()) {
        debug!("joint sample rejected: malformed joint pose in set");
        return None;
    }
    Some(poses.iter().map(|p| p.position).collect())
}

// ── Tests ──────────────────────────────────────────────────

/// Create a test pose at a given position.
#[cfg(test)]
pub(crate) fn test_pose(x: f32, y: f32, z: f32) -> JointPose {
    JointPose {
        position: [x, y, z],
        ..JointPose::default()
    }
}

/// Create a full set of joint poses with per-joint distinct positions.
#[cfg(test)]
pub(crate) fn test_pose_set(offset: f32) -> Vec<JointPose> {
    (0..JOINT_COUNT)
        .map(|i| test_pose(offset + i as f32 * 0.01, offset, -offset))
        .collect()
}

//! gesture-sentinel — real-time detection of a disallowed ("not-ok") hand
//! gesture from a tracked 26-joint hand skeleton.
//!
//! The pipeline samples joint positions at a fixed cadence, differences
//! consecutive samples into per-joint displacement frames, keeps the most
//! recent frames in a sliding window, and hands the flattened window to a
//! classifier. A threshold on the not-ok class probability drives a
//! transient alert with a display countdown.
//!
//! Collaborators (hand tracking, classifier execution, alert display) sit
//! behind traits so the core runs deterministically in tests and against
//! recorded sessions.

pub mod classifier;
pub mod detector;
pub mod hand;
pub mod rate_gate;
pub mod replay;
pub mod session;
pub mod window;

pub use classifier::{GestureClassifier, GestureProbabilities, CLASS_COUNT};
pub use detector::{DetectorConfig, DetectorEvent, GestureDetector};
pub use hand::{Hand, HandJoint, JointPose, JointSource, JOINT_COUNT};
pub use rate_gate::SampleRateGate;
pub use session::{AlertSink, DetectionSession, SourceState};
pub use window::{displacement, DisplacementFrame, SlidingWindow};

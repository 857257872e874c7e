//! Per-hand detection session: collaborator wiring and source polling.
//!
//! A session owns one tracking source, one classifier, one alert display,
//! and one detector. Waiting for the tracking subsystem is an explicit
//! init state checked once per tick: while the source reports unavailable
//! the session re-polls and does nothing else; once available it advances
//! to `Ready` and runs the pipeline synchronously every tick thereafter.
//! No blocking wait anywhere.

use anyhow::Result;
use tracing::{debug, info};

use crate::classifier::GestureClassifier;
use crate::detector::{DetectorConfig, DetectorEvent, GestureDetector};
use crate::hand::{Hand, JointSource};

// ── Alert display ──────────────────────────────────────────

/// Alert display collaborator. One-way: the engine pushes text, nothing
/// flows back into the pipeline.
pub trait AlertSink {
    /// Show the given text; an empty string clears the display.
    fn set_text(&mut self, text: &str);
}

// ── Init state ─────────────────────────────────────────────

/// Tracking-source initialization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// Source not yet seen; re-polled once per tick.
    Uninitialized,
    /// Source answered an availability poll; pipeline runs every tick.
    Ready,
}

// ── Session ────────────────────────────────────────────────

/// One tracked hand wired to its collaborators.
pub struct DetectionSession<S, C, A>
where
    S: JointSource,
    C: GestureClassifier,
    A: AlertSink,
{
    source: S,
    classifier: C,
    sink: A,
    detector: GestureDetector,
    hand: Hand,
    source_state: SourceState,
}

impl<S, C, A> DetectionSession<S, C, A>
where
    S: JointSource,
    C: GestureClassifier,
    A: AlertSink,
{
    pub fn new(source: S, classifier: C, sink: A, hand: Hand, config: DetectorConfig) -> Self {
        Self {
            source,
            classifier,
            sink,
            detector: GestureDetector::new(config),
            hand,
            source_state: SourceState::Uninitialized,
        }
    }

    pub fn source_state(&self) -> SourceState {
        self.source_state
    }

    pub fn detector(&self) -> &GestureDetector {
        &self.detector
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// Run one host tick: poll-or-sample, then route events to the display.
    pub fn tick(&mut self, dt_s: f32) -> Result<Vec<DetectorEvent>> {
        if self.source_state == SourceState::Uninitialized {
            if !self.source.available() {
                debug!("tracking source unavailable; will re-poll next tick");
                return Ok(Vec::new());
            }
            self.source_state = SourceState::Ready;
            info!(
                "tracking source available; {} hand pipeline ready",
                self.hand.as_str(),
            );
        }

        let poses = self.source.entire_hand(self.hand);
        let events = self
            .detector
            .tick(dt_s, poses.as_deref(), &mut self.classifier)?;

        for event in &events {
            match event {
                DetectorEvent::AlertRaised { .. } => {
                    self.sink.set_text(&self.detector.config.alert_text);
                }
                DetectorEvent::AlertCleared => self.sink.set_text(""),
            }
        }
        Ok(events)
    }
}

// ── Tests ──────────────────────────────────────────────────

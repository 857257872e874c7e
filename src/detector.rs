//! Gesture decision engine.
//!
//! Owns the full per-hand pipeline state: the previous-sample baseline,
//! the sliding displacement window, the sampling gate, and the alert
//! countdown. One `GestureDetector` per tracked hand; the classifier is
//! passed in per tick so the state stays unit-testable without a model.
//!
//! Window policy after each classification: a positive result clears the
//! window (the previous-sample baseline survives, so the next accepted
//! sample differences immediately); a negative result evicts only the
//! oldest frame, so one new sample re-reaches a full window. That
//! single-frame slide is what keeps detection latency low.

use anyhow::Result;
use tracing::{debug, info};

use crate::classifier::{GestureClassifier, GestureProbabilities};
use crate::hand::{sample_positions, JointPose, JOINT_COUNT};
use crate::rate_gate::SampleRateGate;
use crate::window::{displacement, SlidingWindow};

// ── Config ─────────────────────────────────────────────────

/// Detection pipeline settings.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Fixed sampling period in seconds.
    pub sample_period_s: f32,
    /// Number of displacement frames per classification window.
    pub window_size: usize,
    /// Joints per hand sample.
    pub joint_count: usize,
    /// Alert when the not-ok class probability exceeds this.
    pub alert_threshold: f32,
    /// Seconds the alert stays visible after a detection.
    pub alert_duration_s: f32,
    /// Text handed to the alert display while alerting.
    pub alert_text: String,
    /// Whether to log detections at info level.
    pub log_enabled: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sample_period_s: 0.02,
            window_size: 11,
            joint_count: JOINT_COUNT,
            alert_threshold: 0.6,
            alert_duration_s: 2.0,
            alert_text: "NOT-OK gesture detected".to_string(),
            log_enabled: true,
        }
    }
}

impl DetectorConfig {
    /// Flattened classifier input length: window x joints x 3 axes.
    pub fn feature_len(&self) -> usize {
        self.window_size * self.joint_count * 3
    }
}

// ── Events ─────────────────────────────────────────────────

/// Events emitted by the decision engine.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorEvent {
    /// The not-ok gesture was detected; the alert display should show the
    /// configured text and the countdown has been (re)started.
    AlertRaised { not_ok: f32 },
    /// The alert countdown expired; the display should be cleared.
    AlertCleared,
}

// ── Detector ───────────────────────────────────────────────

/// Per-hand detection pipeline state and decision logic.
pub struct GestureDetector {
    pub config: DetectorConfig,
    gate: SampleRateGate,
    prev_positions: Option<Vec<[f32; 3]>>,
    window: SlidingWindow,
    alert_countdown_s: f32,
}

impl GestureDetector {
    pub fn new(config: DetectorConfig) -> Self {
        let gate = SampleRateGate::new(config.sample_period_s);
        let window = SlidingWindow::new(config.window_size);
        Self {
            config,
            gate,
            prev_positions: None,
            window,
            alert_countdown_s: 0.0,
        }
    }

    /// Advance the pipeline by one host tick.
    ///
    /// `poses` is the tracking source's answer for this tick; `None` means
    /// the hand is untracked. The alert countdown runs on raw frame time;
    /// sampling, differencing, and classification run only on gated ticks.
    /// A classifier failure is surfaced unchanged — it disables the
    /// session's detection capability and must not be swallowed.
    pub fn tick(
        &mut self,
        dt_s: f32,
        poses: Option<&[JointPose]>,
        classifier: &mut dyn GestureClassifier,
    ) -> Result<Vec<DetectorEvent>> {
        let mut events = Vec::new();

        // Countdown is orthogonal to window state and ungated.
        if self.alert_countdown_s > 0.0 {
            self.alert_countdown_s -= dt_s;
            if self.alert_countdown_s <= 0.0 {
                self.alert_countdown_s = 0.0;
                events.push(DetectorEvent::AlertCleared);
            }
        }

        // Tracking loss, or a sample set the sampler rejects, resets the
        // motion state on any tick. Recovery is just the next valid tick.
        let positions = match poses.and_then(|p| sample_positions(p, self.config.joint_count)) {
            Some(p) => p,
            None => {
                self.reset_motion_state();
                return Ok(events);
            }
        };

        if !self.gate.tick(dt_s) {
            return Ok(events);
        }

        // Warm-up: the first accepted sample only seeds the baseline. The
        // first usable displacement needs two samples.
        let prev = match self.prev_positions.take() {
            None => {
                debug!("baseline seeded; window filling starts next sample");
                self.prev_positions = Some(positions);
                return Ok(events);
            }
            Some(prev) => prev,
        };

        let frame = displacement(&positions, &prev);
        self.prev_positions = Some(positions);
        self.window.push_front(frame);

        if !self.window.is_full() {
            return Ok(events);
        }

        let probs = classifier.predict(&self.window.flatten())?;
        self.decide(probs, &mut events);
        Ok(events)
    }

    /// Interpret one classification over a full window.
    fn decide(&mut self, probs: GestureProbabilities, events: &mut Vec<DetectorEvent>) {
        // The random-gesture class is observed but never drives anything.
        debug!(
            "window classified: random={:.3} not-ok={:.3}",
            probs.random, probs.not_ok,
        );

        if probs.not_ok > self.config.alert_threshold {
            if self.config.log_enabled {
                info!("not-ok gesture detected (p={:.3})", probs.not_ok);
            }
            self.alert_countdown_s = self.config.alert_duration_s;
            // Only the window resets; the previous-sample baseline
            // survives so the next accepted sample differences at once.
            self.window.clear();
            events.push(DetectorEvent::AlertRaised {
                not_ok: probs.not_ok,
            });
        } else {
            self.window.evict_oldest();
        }
    }

    /// Drop the differencing baseline and all window contents. The alert
    /// countdown is untouched; it expires on its own schedule.
    fn reset_motion_state(&mut self) {
        if self.prev_positions.is_some() || !self.window.is_empty() {
            debug!("tracking lost; motion state reset");
        }
        self.prev_positions = None;
        self.window.clear();
    }

    /// Whether the alert countdown is still running.
    pub fn is_alerting(&self) -> bool {
        self.alert_countdown_s > 0.0
    }

    /// Seconds left on the alert countdown.
    pub fn alert_remaining_s(&self) -> f32 {
        self.alert_countdown_s
    }

    /// Current window fill.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Whether a differencing baseline is currently held.
    pub fn has_baseline(&self) -> bool {
        self.prev_positions.is_some()
    }
}

// ── Tests ──────────────────────────────────────────────────

//! gesture-sentinel CLI — run the not-ok gesture detector over a recorded
//! joint stream with an ONNX model.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use gesture_sentinel::classifier::OnnxClassifier;
use gesture_sentinel::detector::{DetectorConfig, DetectorEvent};
use gesture_sentinel::hand::Hand;
use gesture_sentinel::replay::{self, ReplaySource};
use gesture_sentinel::session::{AlertSink, DetectionSession};

#[derive(Parser, Debug)]
#[command(name = "gesture-sentinel", about = "Not-ok hand gesture detector")]
struct Cli {
    /// Path to the ONNX gesture model
    #[arg(long)]
    model: Option<PathBuf>,

    /// Recorded joint stream (JSONL) to replay through the detector
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Hand to monitor: left or right
    #[arg(long, default_value = "right")]
    hand: String,

    /// Sampling period in seconds
    #[arg(long, default_value_t = 0.02)]
    period: f32,

    /// Displacement frames per classification window
    #[arg(long, default_value_t = 11)]
    window_size: usize,

    /// Tracked joints per hand sample
    #[arg(long, default_value_t = 26)]
    joint_count: usize,

    /// Alert threshold on the not-ok class probability
    #[arg(long, default_value_t = 0.6)]
    threshold: f32,

    /// Seconds the alert text stays visible
    #[arg(long, default_value_t = 2.0)]
    alert_duration: f32,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

/// Alert display backed by the process log.
struct LogAlert;

impl AlertSink for LogAlert {
    fn set_text(&mut self, text: &str) {
        if text.is_empty() {
            info!("alert display cleared");
        } else {
            warn!("ALERT: {text}");
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("gesture-sentinel {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesture_sentinel=info".into()),
        )
        .init();

    let hand = match Hand::parse(&cli.hand) {
        Some(hand) => hand,
        None => {
            eprintln!("Unknown hand: {}. Use: left or right", cli.hand);
            std::process::exit(1);
        }
    };

    let (model_path, replay_path) = match (&cli.model, &cli.replay) {
        (Some(m), Some(r)) => (m, r),
        _ => {
            eprintln!("Both --model and --replay are required");
            std::process::exit(1);
        }
    };

    let config = DetectorConfig {
        sample_period_s: cli.period,
        window_size: cli.window_size,
        joint_count: cli.joint_count,
        alert_threshold: cli.threshold,
        alert_duration_s: cli.alert_duration,
        ..DetectorConfig::default()
    };

    info!(
        "gesture-sentinel v{} starting ({} hand, {} frame window, {:.0}ms period)",
        env!("CARGO_PKG_VERSION"),
        hand.as_str(),
        config.window_size,
        config.sample_period_s * 1000.0,
    );

    let classifier = OnnxClassifier::load(model_path, config.feature_len())?;
    let records = replay::load_records(replay_path)?;
    info!("replaying {} recorded ticks from {}", records.len(), replay_path.display());

    let dts: Vec<f32> = records.iter().map(|r| r.dt).collect();
    let source = ReplaySource::new(records);
    let mut session = DetectionSession::new(source, classifier, LogAlert, hand, config);

    let mut alerts = 0usize;
    for dt in dts {
        for event in session.tick(dt)? {
            if let DetectorEvent::AlertRaised { not_ok } = event {
                alerts += 1;
                info!("detection #{alerts} (p={not_ok:.3})");
            }
        }
    }

    info!("replay complete: {alerts} not-ok detections");
    Ok(())
}

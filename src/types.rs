// src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub car: CarConfig,
    pub transport: TransportConfig,
    pub replay: ReplayConfig,
    pub logging: LoggingConfig,
}

/// Thresholds and smoothing coefficients for the gesture pipeline.
/// One parameterized pipeline replaces the hand-tuned detector revisions
/// that drifted apart in earlier builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// EMA weight on the previous steering value (higher = smoother/slower)
    pub steering_alpha: f32,
    /// EMA weight on the previous throttle value
    pub throttle_alpha: f32,
    /// Power-law exponent flattening steering response near center
    pub steering_expo: f32,
    /// Power-law exponent on the throttle curve
    pub throttle_expo: f32,
    /// Hand orientation that maps to steering 0, degrees
    pub neutral_angle_deg: f32,
    /// Half-width of the steering arc; outside it steering saturates at ±1
    pub steering_window_deg: f32,
    /// |steering| above this labels the tick LEFT/RIGHT instead of FORWARD
    pub steering_turn_threshold: f32,
    /// Tip-to-MCP distance below this fraction of palm width = finger curled
    pub curl_ratio: f32,
    /// Wrist-to-tip must exceed this multiple of wrist-to-MCP = finger extended
    pub extend_ratio: f32,
    /// Adjacent fingertip gap must exceed this fraction of palm width
    pub spread_ratio: f32,
    /// Index-PIP to pinky-PIP must exceed this fraction of palm width
    pub palm_facing_ratio: f32,
    /// Thumb tip must sit above the wrist by this fraction of frame height
    pub thumb_raise_frac: f32,
    /// Consecutive frames before a brake/boost gesture activates
    pub gesture_threshold: u32,
    /// Consecutive identical command labels before stable_command is exposed
    pub stability_threshold: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            steering_alpha: 0.5,  // stable but responsive steering
            throttle_alpha: 0.4,  // slightly faster throttle response
            steering_expo: 1.5,
            throttle_expo: 1.5,
            neutral_angle_deg: -90.0,
            steering_window_deg: 45.0, // maps the -135°..-45° arc
            steering_turn_threshold: 0.3,
            curl_ratio: 0.45,
            extend_ratio: 1.2,
            spread_ratio: 0.2,
            palm_facing_ratio: 0.6,
            thumb_raise_frac: 0.1,
            gesture_threshold: 3,
            stability_threshold: 3,
        }
    }
}

/// Arcade car model parameters. Rates are per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// How fast the steering response tracks the commanded direction
    pub handling_rate: f32,
    /// Lateral pixels per second at full steering and unit speed
    pub lateral_scale: f32,
    pub boost_duration_s: f32,
    pub brake_duration_s: f32,
    pub road_min_x: f32,
    pub road_max_x: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            acceleration: 6.0,
            deceleration: 12.0,
            handling_rate: 30.0,
            lateral_scale: 120.0,
            boost_duration_s: 1.0,
            brake_duration_s: 1.5,
            road_min_x: 50.0,
            road_max_x: 750.0,
        }
    }
}

/// UDP command link to a physical RC car.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub enabled: bool,
    /// Log commands instead of sending them
    pub simulation: bool,
    pub car_ip: String,
    pub car_port: u16,
    /// Minimum gap between duplicate commands
    pub min_interval_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            simulation: true,
            car_ip: "192.168.4.1".to_string(),
            car_port: 100,
            min_interval_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub input_dir: String,
    pub output_dir: String,
    /// Trace frame rate; sets the simulation timestep
    pub frame_rate: u32,
    pub save_events: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            input_dir: "traces".to_string(),
            output_dir: "output".to_string(),
            frame_rate: 30,
            save_events: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Which discrete gesture the classifier saw this tick.
/// Exactly one is active per tick; priority resolves overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Driving,
    FistBrake,
    OpenPalmStop,
    ThumbUpBoost,
    NoHand,
}

impl GestureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Driving => "Driving",
            Self::FistBrake => "Brake",
            Self::OpenPalmStop => "Stop",
            Self::ThumbUpBoost => "Boost",
            Self::NoHand => "No hand",
        }
    }
}

/// Discrete command label for the downstream vehicle transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveCommand {
    Forward,
    ForwardBoost,
    Left,
    Right,
    Stop,
}

impl DriveCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "FORWARD",
            Self::ForwardBoost => "FORWARD_BOOST",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Stop => "STOP",
        }
    }

    /// Token actually put on the wire. The vehicle firmware knows no
    /// boost, so FORWARD_BOOST degrades to FORWARD.
    pub fn wire_token(&self) -> &'static str {
        match self {
            Self::ForwardBoost => "FORWARD",
            other => other.as_str(),
        }
    }
}

/// One tick's worth of control output. Produced fresh each tick and
/// immutable once emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    /// -1.0 (full left) to 1.0 (full right)
    pub steering: f32,
    /// 0.0 to 1.0
    pub throttle: f32,
    pub braking: bool,
    pub boost: bool,
    pub gesture: GestureKind,
    /// Set only once the same command label has held for the stability
    /// threshold; what makes downstream transport throttling safe.
    pub stable_command: Option<DriveCommand>,
}

impl ControlState {
    pub fn neutral() -> Self {
        Self {
            steering: 0.0,
            throttle: 0.0,
            braking: false,
            boost: false,
            gesture: GestureKind::NoHand,
            stable_command: None,
        }
    }

    pub fn gesture_name(&self) -> &'static str {
        self.gesture.as_str()
    }
}

// src/main.rs

mod car;
mod command;
mod config;
mod landmarks;
mod pipeline;
mod trace;
mod types;

use anyhow::Result;
use car::Car;
use command::CommandLink;
use pipeline::GestureControlPipeline;
use std::io::Write;
use std::path::Path;
use tracing::{error, info, warn};
use types::{Config, DriveCommand, GestureKind};

fn main() -> Result<()> {
    let config = Config::load("config.yaml")?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("gesture_drive={}", config.logging.level))
        .init();

    info!("🚗 Gesture Drive starting");
    info!(
        "Pipeline thresholds: steering_alpha={:.2}, throttle_alpha={:.2}, gesture_threshold={}, stability_threshold={}",
        config.pipeline.steering_alpha,
        config.pipeline.throttle_alpha,
        config.pipeline.gesture_threshold,
        config.pipeline.stability_threshold
    );

    let trace_files = trace::find_trace_files(&config.replay.input_dir);
    if trace_files.is_empty() {
        error!("No trace files found in {}", config.replay.input_dir);
        return Ok(());
    }

    let mut link = if config.transport.enabled {
        Some(CommandLink::open(config.transport.clone())?)
    } else {
        None
    };

    for (idx, trace_path) in trace_files.iter().enumerate() {
        info!(
            "Replaying trace {}/{}: {}",
            idx + 1,
            trace_files.len(),
            trace_path.display()
        );

        match replay_trace(trace_path, &config, link.as_mut()) {
            Ok(stats) => {
                info!("✓ Trace replayed");
                info!("  Total frames: {}", stats.total_frames);
                info!(
                    "  Frames with hand: {} ({:.1}%)",
                    stats.frames_with_hand,
                    100.0 * stats.frames_with_hand as f64 / stats.total_frames.max(1) as f64
                );
                info!("  🛑 Stop ticks: {}", stats.stop_ticks);
                info!("  ✊ Brake ticks: {}", stats.brake_ticks);
                info!("  👍 Boost ticks: {}", stats.boost_ticks);
                info!("  Stable commands: {}", stats.stable_ticks);
                info!("  Commands sent: {}", stats.commands_sent);
                info!("  Distance covered: {:.1}", stats.distance);
            }
            Err(e) => error!("Failed to replay trace: {}", e),
        }
    }

    if let Some(link) = &link {
        link.log_report();
    }

    Ok(())
}

struct ReplayStats {
    total_frames: u64,
    frames_with_hand: u64,
    stop_ticks: u64,
    brake_ticks: u64,
    boost_ticks: u64,
    stable_ticks: u64,
    commands_sent: u64,
    distance: f32,
}

fn replay_trace(
    trace_path: &Path,
    config: &Config,
    mut link: Option<&mut CommandLink>,
) -> Result<ReplayStats> {
    let frames = trace::read_trace(trace_path)?;

    let mut pipeline = GestureControlPipeline::new(config.pipeline.clone());
    let mut car = Car::new(config.car.clone(), 400.0, 300.0);
    let dt = 1.0 / config.replay.frame_rate.max(1) as f32;

    let mut events_file = if config.replay.save_events {
        std::fs::create_dir_all(&config.replay.output_dir)?;
        let trace_name = trace_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("trace");
        let events_path =
            Path::new(&config.replay.output_dir).join(format!("{}_events.jsonl", trace_name));
        info!("💾 Command events will be written to: {}", events_path.display());
        Some(std::fs::File::create(events_path)?)
    } else {
        None
    };

    let mut stats = ReplayStats {
        total_frames: 0,
        frames_with_hand: 0,
        stop_ticks: 0,
        brake_ticks: 0,
        boost_ticks: 0,
        stable_ticks: 0,
        commands_sent: 0,
        distance: 0.0,
    };
    let mut last_stable: Option<DriveCommand> = None;

    for frame in &frames {
        stats.total_frames += 1;
        let landmarks = frame.landmarks();
        let control = pipeline.process(landmarks.as_deref(), frame.frame_size());
        car.update(&control, dt);

        match control.gesture {
            GestureKind::NoHand => {}
            GestureKind::OpenPalmStop => {
                stats.frames_with_hand += 1;
                stats.stop_ticks += 1;
            }
            GestureKind::FistBrake => {
                stats.frames_with_hand += 1;
                stats.brake_ticks += 1;
            }
            GestureKind::ThumbUpBoost => {
                stats.frames_with_hand += 1;
                stats.boost_ticks += 1;
            }
            GestureKind::Driving => stats.frames_with_hand += 1,
        }

        if let Some(command) = control.stable_command {
            stats.stable_ticks += 1;

            if last_stable != Some(command) {
                info!(
                    "🎮 Stable command: {} (frame {})",
                    command.as_str(),
                    stats.total_frames
                );
                if let Some(file) = events_file.as_mut() {
                    save_command_event(file, stats.total_frames, command, &control)?;
                }
                last_stable = Some(command);
            }

            if let Some(link) = link.as_deref_mut() {
                if link.send(command) {
                    stats.commands_sent += 1;
                }
            }
        } else if last_stable.take().is_some() && control.gesture == GestureKind::NoHand {
            warn!("Hand lost at frame {}", stats.total_frames);
        }

        if stats.total_frames % 50 == 0 {
            info!(
                "Progress: {}/{} | Gesture: {} | Steering: {:+.2} | Throttle: {:.2} | Speed: {:.1}{}",
                stats.total_frames,
                frames.len(),
                control.gesture_name(),
                control.steering,
                control.throttle,
                car.speed,
                if car.is_boosting() {
                    " 🔥"
                } else if car.is_braking() {
                    " 🛑"
                } else {
                    ""
                }
            );
        }
    }

    stats.distance = car.distance;
    Ok(stats)
}

fn save_command_event(
    file: &mut std::fs::File,
    frame_id: u64,
    command: DriveCommand,
    control: &types::ControlState,
) -> Result<()> {
    let json_value = serde_json::json!({
        "type": "stable_command",
        "frame_id": frame_id,
        "command": command.as_str(),
        "gesture": control.gesture_name(),
        "steering": control.steering,
        "throttle": control.throttle,
    });
    writeln!(file, "{}", serde_json::to_string(&json_value)?)?;
    Ok(())
}

// src/command.rs
//
// Stable-command transport to a physical RC car. Fire-and-forget UDP
// datagrams; a lost token is corrected by the next stable command, so
// there is no retry queue. Duplicate commands inside the politeness
// interval are suppressed to keep the radio link quiet.

use crate::types::{DriveCommand, TransportConfig};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::net::UdpSocket;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct CommandLink {
    config: TransportConfig,
    socket: Option<UdpSocket>,
    last_command: Option<DriveCommand>,
    last_sent_at: Option<Instant>,
    sent: HashMap<DriveCommand, u32>,
    failed: HashMap<DriveCommand, u32>,
}

impl CommandLink {
    pub fn open(config: TransportConfig) -> Result<Self> {
        let socket = if config.simulation {
            info!("Command link in simulation mode, commands will be logged but not sent");
            None
        } else {
            let socket = UdpSocket::bind("0.0.0.0:0").context("binding UDP command socket")?;
            info!(
                "Command link ready, sending to {}:{}",
                config.car_ip, config.car_port
            );
            Some(socket)
        };

        Ok(Self {
            config,
            socket,
            last_command: None,
            last_sent_at: None,
            sent: HashMap::new(),
            failed: HashMap::new(),
        })
    }

    /// Send one command. Returns true if a datagram went out (or was
    /// logged in simulation mode), false if it was suppressed or lost.
    pub fn send(&mut self, command: DriveCommand) -> bool {
        if self.is_duplicate(command) {
            debug!("Suppressing duplicate command {}", command.as_str());
            return false;
        }

        let token = command.wire_token();
        let ok = match &self.socket {
            None => {
                info!("SIM command: {}", token);
                true
            }
            Some(socket) => {
                let target = (self.config.car_ip.as_str(), self.config.car_port);
                match socket.send_to(token.as_bytes(), target) {
                    Ok(_) => {
                        debug!("Command {} sent", token);
                        true
                    }
                    Err(e) => {
                        warn!("Failed to send command {}: {}", token, e);
                        false
                    }
                }
            }
        };

        if ok {
            *self.sent.entry(command).or_insert(0) += 1;
        } else {
            *self.failed.entry(command).or_insert(0) += 1;
        }
        self.last_command = Some(command);
        self.last_sent_at = Some(Instant::now());
        ok
    }

    fn is_duplicate(&self, command: DriveCommand) -> bool {
        if self.last_command != Some(command) {
            return false;
        }
        match self.last_sent_at {
            Some(at) => at.elapsed() < Duration::from_millis(self.config.min_interval_ms),
            None => false,
        }
    }

    pub fn commands_sent(&self) -> u32 {
        self.sent.values().sum()
    }

    /// Session summary for the final report.
    pub fn log_report(&self) {
        let failed: u32 = self.failed.values().sum();
        info!(
            "Command link: {} sent, {} failed",
            self.commands_sent(),
            failed
        );
        for (command, count) in &self.sent {
            info!("  {}: {}", command.as_str(), count);
        }
    }
}

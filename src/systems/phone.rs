//! PHONE stage datagrams: fixed-width ASCII `PPPRRRSSSG`.
//!
//! * `PPP` pitch in whole degrees, values above 180 are negative (`350` is -10)
//! * `RRR` roll in whole degrees, same convention
//! * `SSS` speed factor times ten
//! * `G` stage letter: `T` take-off, `X` taxi, `L` land, `F` fly, `R` free

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;
use thiserror::Error;

use crate::components::Stage;
use crate::resources::PhoneLinkConfig;
use crate::utils::{deg_to_rad, rad_to_deg, PHONE_DATAGRAM_LEN};

#[derive(Error, Debug)]
pub enum PhoneError {
    #[error("socket error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed datagram: {0}")]
    Malformed(String),
}

/// One decoded control datagram. Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhoneCommand {
    pub pitch: f64,
    pub roll: f64,
    pub speed_factor: f64,
    pub stage: Stage,
}

fn stage_from_tag(tag: u8) -> Option<Stage> {
    match tag {
        b'T' => Some(Stage::TakeOff),
        b'X' => Some(Stage::Taxi),
        b'L' => Some(Stage::Land),
        b'F' => Some(Stage::Fly),
        b'R' => Some(Stage::Free),
        _ => None,
    }
}

fn stage_tag(stage: Stage) -> Option<char> {
    match stage {
        Stage::TakeOff => Some('T'),
        Stage::Taxi => Some('X'),
        Stage::Land => Some('L'),
        Stage::Fly => Some('F'),
        Stage::Free => Some('R'),
        Stage::Phone => None,
    }
}

fn field(bytes: &[u8], name: &str) -> Result<u32, PhoneError> {
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(PhoneError::Malformed(format!(
            "{name} field {:?} is not decimal",
            String::from_utf8_lossy(bytes)
        )));
    }
    Ok(bytes
        .iter()
        .fold(0, |acc, digit| acc * 10 + u32::from(digit - b'0')))
}

fn signed_degrees(value: u32) -> f64 {
    let degrees = f64::from(value);
    if degrees > 180.0 {
        degrees - 360.0
    } else {
        degrees
    }
}

impl PhoneCommand {
    pub fn decode(datagram: &[u8]) -> Result<Self, PhoneError> {
        let payload = datagram.trim_ascii_end();
        if payload.len() != PHONE_DATAGRAM_LEN {
            return Err(PhoneError::Malformed(format!(
                "expected {PHONE_DATAGRAM_LEN} bytes, got {}",
                payload.len()
            )));
        }

        let pitch = signed_degrees(field(&payload[0..3], "pitch")?);
        let roll = signed_degrees(field(&payload[3..6], "roll")?);
        let speed = field(&payload[6..9], "speed")?;
        let stage = stage_from_tag(payload[9]).ok_or_else(|| {
            PhoneError::Malformed(format!("unknown stage tag {:?}", payload[9] as char))
        })?;

        Ok(Self {
            pitch: deg_to_rad(pitch),
            roll: deg_to_rad(roll),
            speed_factor: (f64::from(speed) / 10.0).clamp(0.0, 1.0),
            stage,
        })
    }

    /// Wire form of the command, rounded to whole degrees and tenths.
    pub fn encode(&self) -> Result<String, PhoneError> {
        let stage = stage_tag(self.stage)
            .ok_or_else(|| PhoneError::Malformed("PHONE cannot be sent as a stage".into()))?;
        let degrees = |angle: f64| (rad_to_deg(angle).round() as i64).rem_euclid(360);
        Ok(format!(
            "{:03}{:03}{:03}{}",
            degrees(self.pitch),
            degrees(self.roll),
            (self.speed_factor.clamp(0.0, 1.0) * 10.0).round() as i64,
            stage
        ))
    }
}

/// Connectionless source of raw control datagrams.
pub trait DatagramSource: Send + Sync {
    /// Waits at most the source's timeout. `Ok(None)` when nothing arrived.
    fn receive(&mut self) -> Result<Option<Vec<u8>>, PhoneError>;
}

/// UDP socket bound to the well-known PHONE port.
pub struct UdpPhoneLink {
    socket: UdpSocket,
}

impl UdpPhoneLink {
    pub fn bind(config: &PhoneLinkConfig) -> Result<Self, PhoneError> {
        let socket = UdpSocket::bind((config.bind_address.as_str(), config.port))?;
        // A zero timeout would make reads block forever
        let timeout = Duration::from_millis(config.timeout_ms.max(1));
        socket.set_read_timeout(Some(timeout))?;
        info!("PHONE link listening on {}", socket.local_addr()?);
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, PhoneError> {
        Ok(self.socket.local_addr()?)
    }
}

impl DatagramSource for UdpPhoneLink {
    fn receive(&mut self) -> Result<Option<Vec<u8>>, PhoneError> {
        let mut buffer = [0u8; 64];
        match self.socket.recv_from(&mut buffer) {
            Ok((len, _)) => Ok(Some(buffer[..len].to_vec())),
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Read at most one datagram and decode it. Any failure yields `None` so the
/// caller keeps its previous requests.
pub fn poll_command(source: &mut dyn DatagramSource) -> Option<PhoneCommand> {
    match source.receive() {
        Ok(Some(datagram)) => match PhoneCommand::decode(&datagram) {
            Ok(command) => Some(command),
            Err(e) => {
                warn!("Ignoring PHONE datagram: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("PHONE link receive failed: {e}");
            None
        }
    }
}

use bevy::prelude::*;

use crate::systems::{poll_command, DatagramSource, PhoneCommand};

/// Optional datagram source feeding the PHONE stage.
#[derive(Resource, Default)]
pub struct PhoneLink {
    source: Option<Box<dyn DatagramSource>>,
}

impl PhoneLink {
    pub fn new(source: Box<dyn DatagramSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// At most one command per call; `None` when disconnected or nothing valid arrived.
    pub fn poll(&mut self) -> Option<PhoneCommand> {
        self.source.as_deref_mut().and_then(|source| poll_command(source))
    }
}

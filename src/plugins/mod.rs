mod drone;

pub use drone::{
    drone_bundle, open_phone_link, settled_wheels, spawn_drone, DroneSimSet, DronePlugin,
};

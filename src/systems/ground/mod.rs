mod contact;
mod detection;

pub use contact::{wheel_contact, wheel_height, ContactFrame, WheelContact};
pub use detection::{airframe_points, check_ground_penetration};

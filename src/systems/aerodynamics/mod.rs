mod lift;

pub use lift::{
    angle_of_attack, checked_lift_force, lift_force, wing_attack_vector, Surface,
};

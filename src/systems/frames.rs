use nalgebra::{Matrix4, Rotation3, Vector3, Vector4};

/// Rotation from body to world: heading about world up, then pitch about the
/// body lateral axis, then roll about the body longitudinal axis.
fn rotation(heading: f64, pitch: f64, roll: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), heading)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), pitch)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), roll)
}

/// Homogeneous body-to-world transform.
pub fn body_to_world(heading: f64, pitch: f64, roll: f64) -> Matrix4<f64> {
    rotation(heading, pitch, roll).to_homogeneous()
}

/// Homogeneous world-to-body transform, the inverse of [`body_to_world`].
pub fn world_to_body(heading: f64, pitch: f64, roll: f64) -> Matrix4<f64> {
    rotation(heading, pitch, roll).inverse().to_homogeneous()
}

/// Apply the transform to a direction (no translation).
pub fn transform_vector(transform: &Matrix4<f64>, vector: &Vector3<f64>) -> Vector3<f64> {
    let h = transform * Vector4::new(vector.x, vector.y, vector.z, 0.0);
    Vector3::new(h.x, h.y, h.z)
}

/// Apply the transform to a point (with translation).
pub fn transform_point(transform: &Matrix4<f64>, point: &Vector3<f64>) -> Vector3<f64> {
    let h = transform * Vector4::new(point.x, point.y, point.z, 1.0);
    Vector3::new(h.x, h.y, h.z) / h.w
}

/// Body forward axis.
pub fn forward_axis() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, -1.0)
}

/// Body right-wing axis.
pub fn right_axis() -> Vector3<f64> {
    Vector3::new(1.0, 0.0, 0.0)
}

/// Recover heading, pitch and roll from world-frame forward and right vectors.
///
/// `fallback_heading` is used when the nose points straight up or down and the
/// heading is undefined.
pub fn orientation_from_axes(
    forward: &Vector3<f64>,
    right: &Vector3<f64>,
    fallback_heading: f64,
) -> (f64, f64, f64) {
    let up = Vector3::y();
    let horizontal = (forward.x * forward.x + forward.z * forward.z).sqrt();
    let pitch = forward.y.atan2(horizontal);

    let level_right = forward.cross(&up);
    if level_right.norm() < 1e-9 {
        return (fallback_heading, pitch, 0.0);
    }
    let heading = (-forward.x).atan2(-forward.z);
    let level_right = level_right.normalize();
    let level_up = level_right.cross(forward).normalize();
    let roll = right.dot(&level_up).atan2(right.dot(&level_right));

    (heading, pitch, roll)
}

// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Check whether `value` lies strictly inside `(min, max)`
pub fn within_open(value: f32, min: f32, max: f32) -> bool {
    value > min && value < max
}

/// Whole-unit sampling bounds for a spawn band.
///
/// The near edge is rounded up so a sample never lands closer than `near`.
/// When `near` has moved past `far`, the band collapses onto the near edge.
pub fn spawn_bounds(near: f32, far: f32) -> (i32, i32) {
    let low = near.ceil() as i32;
    let high = (far.floor() as i32).max(low);
    (low, high)
}

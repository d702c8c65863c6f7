//! Human-readable rendering of rotations

use rand::Rng;

use versor_math::{Quaternion, QuaternionError};

use crate::config::{DisplayConfig, InterpolationConfig};

/// One quaternion as `+w +xi +yj +zk`, optionally followed by its angle and axis
pub fn format_rotation(q: &Quaternion, display: &DisplayConfig) -> String {
    let p = display.precision;
    let mut line = format!("{:+.*}", p, q);
    if display.show_axis_angle {
        let axis = q.axis();
        line.push_str(&format!(
            "  angle {:.*} rad  axis [{:.*}, {:.*}, {:.*}]",
            p, q.angle(), p, axis.x, p, axis.y, p, axis.z
        ));
    }
    line
}

/// The interpolation path described by `interpolation`, one line per rotation
pub fn interpolation_lines(
    interpolation: &InterpolationConfig,
    display: &DisplayConfig,
) -> Result<Vec<String>, QuaternionError> {
    let start = interpolation.start.resolve()?;
    let end = interpolation.end.resolve()?;
    log::debug!("Interpolating from {:?} to {:?}", start, end);

    let path = Quaternion::intermediates(
        start,
        end,
        interpolation.steps,
        interpolation.include_endpoints,
    );
    Ok(path
        .enumerate()
        .map(|(i, q)| format!("{:>4}  {}", i, format_rotation(&q, display)))
        .collect())
}

/// `count` random rotations drawn from `rng`, one line each
pub fn random_lines<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    display: &DisplayConfig,
) -> Vec<String> {
    (0..count)
        .map(|i| {
            let q = Quaternion::random_with(rng);
            format!("{:>4}  {}", i, format_rotation(&q, display))
        })
        .collect()
}

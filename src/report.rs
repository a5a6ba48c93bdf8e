use std::fmt::Write;

use beamx::AttachState;

use crate::scenario::ScenarioSummary;

/// Render a textual summary of a headless animation run.
#[must_use]
pub fn render_summary(summary: &ScenarioSummary) -> String {
    let mut output = String::new();

    // Lead with the parameters so the numbers below have context.
    writeln!(
        &mut output,
        "Beam animation (nodes = {}, mode = {:.3}, omega = {:.3} rad/s)",
        summary.nodes, summary.mode, summary.omega
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Ticks: {}, simulated time t = {:.4} s",
        summary.ticks, summary.time
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Mesh: {} quads, {} points ({})",
        summary.faces,
        summary.points,
        if summary.wireframe {
            "wireframe"
        } else {
            "solid"
        }
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Deflection range: {:+.4} .. {:+.4}",
        summary.min_deflection, summary.max_deflection
    )
    .expect("writing to string cannot fail");

    let camera = &summary.camera;
    let mode = match summary.attach {
        AttachState::Attached => "attached",
        AttachState::Idle => "free",
        AttachState::SelectingPosition | AttachState::SelectingFocal => "selecting",
    };
    writeln!(
        &mut output,
        "Camera ({mode}): position ({:.3}, {:.3}, {:.3}), focal point ({:.3}, {:.3}, {:.3})",
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.focal_point.x,
        camera.focal_point.y,
        camera.focal_point.z
    )
    .expect("writing to string cannot fail");

    output
}

#[cfg(test)]
mod tests {
    use beamx::{point, CameraPose};

    use super::*;

    #[test]
    fn formats_human_readable_report() {
        let summary = ScenarioSummary {
            ticks: 40,
            time: std::f64::consts::TAU,
            mode: 2.5,
            omega: 1.0,
            nodes: 11,
            faces: 60,
            points: 240,
            wireframe: true,
            min_deflection: -1.25,
            max_deflection: 0.5,
            attach: AttachState::Attached,
            camera: CameraPose::new(point(1.0, 2.0, 3.0), point(10.0, 0.0, 0.0)),
        };
        let report = render_summary(&summary);
        assert!(report.contains("nodes = 11, mode = 2.500"));
        assert!(report.contains("t = 6.2832 s"));
        assert!(report.contains("60 quads, 240 points (wireframe)"));
        assert!(report.contains("-1.2500 .. +0.5000"));
        assert!(report.contains("Camera (attached): position (1.000, 2.000, 3.000)"));
    }
}

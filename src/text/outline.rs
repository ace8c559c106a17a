//! Flatten glyph outlines into closed polylines.

use glam::Vec2;

use crate::assets::OutlineCommand;

/// Points closer than this (in font units) are merged.
const MERGE_EPSILON: f32 = 1e-3;

/// Flatten an outline into contours, sampling each curve with `segments`
/// straight pieces.
///
/// Every contour is implicitly closed: the last point connects back to the
/// first. Contours with fewer than three distinct points are dropped.
#[must_use]
pub fn flatten(commands: &[OutlineCommand], segments: u32) -> Vec<Vec<Vec2>> {
    let segments = segments.max(1);
    let mut contours = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    for command in commands {
        match *command {
            OutlineCommand::MoveTo(p) => {
                finish(&mut contours, &mut current);
                current.push(p);
            }
            OutlineCommand::LineTo(p) => push_point(&mut current, p),
            OutlineCommand::QuadTo { ctrl, to } => {
                let from = current.last().copied().unwrap_or(ctrl);
                for step in 1..=segments {
                    let t = step as f32 / segments as f32;
                    push_point(&mut current, quadratic(from, ctrl, to, t));
                }
            }
            OutlineCommand::CubicTo { ctrl1, ctrl2, to } => {
                let from = current.last().copied().unwrap_or(ctrl1);
                for step in 1..=segments {
                    let t = step as f32 / segments as f32;
                    push_point(&mut current, cubic(from, ctrl1, ctrl2, to, t));
                }
            }
            OutlineCommand::Close => finish(&mut contours, &mut current),
        }
    }
    finish(&mut contours, &mut current);
    contours
}

fn push_point(contour: &mut Vec<Vec2>, p: Vec2) {
    if contour
        .last()
        .is_none_or(|last| last.distance_squared(p) > MERGE_EPSILON * MERGE_EPSILON)
    {
        contour.push(p);
    }
}

fn finish(contours: &mut Vec<Vec<Vec2>>, current: &mut Vec<Vec2>) {
    let mut contour = std::mem::take(current);
    while contour.len() > 1
        && contour[0].distance_squared(contour[contour.len() - 1])
            <= MERGE_EPSILON * MERGE_EPSILON
    {
        let _ = contour.pop();
    }
    if contour.len() >= 3 {
        contours.push(contour);
    }
}

fn quadratic(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u)
        + p1 * (3.0 * u * u * t)
        + p2 * (3.0 * u * t * t)
        + p3 * (t * t * t)
}

/// Even-odd point-in-polygon test over all contours.
#[must_use]
pub fn contains(contours: &[Vec<Vec2>], p: Vec2) -> bool {
    let mut inside = false;
    for contour in contours {
        let n = contour.len();
        for i in 0..n {
            let a = contour[i];
            let b = contour[(i + 1) % n];
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn square(min: f32, max: f32) -> Vec<OutlineCommand> {
        vec![
            OutlineCommand::MoveTo(Vec2::new(min, min)),
            OutlineCommand::LineTo(Vec2::new(max, min)),
            OutlineCommand::LineTo(Vec2::new(max, max)),
            OutlineCommand::LineTo(Vec2::new(min, max)),
            OutlineCommand::LineTo(Vec2::new(min, min)),
            OutlineCommand::Close,
        ]
    }

    #[test]
    fn closing_point_is_not_duplicated() {
        let contours = flatten(&square(0.0, 10.0), 20);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
    }

    #[test]
    fn curves_are_sampled_per_segment() {
        let commands = [
            OutlineCommand::MoveTo(Vec2::ZERO),
            OutlineCommand::QuadTo {
                ctrl: Vec2::new(50.0, 100.0),
                to: Vec2::new(100.0, 0.0),
            },
        ];
        let contours = flatten(&commands, 20);
        assert_eq!(contours[0].len(), 21);
        // Apex of the parabola sits halfway to the control point.
        assert_relative_eq!(contours[0][10].y, 50.0, epsilon = 1e-4);
        assert_eq!(contours[0][20], Vec2::new(100.0, 0.0));
    }

    #[test]
    fn degenerate_contours_are_dropped() {
        let commands = [
            OutlineCommand::MoveTo(Vec2::ZERO),
            OutlineCommand::LineTo(Vec2::X),
            OutlineCommand::Close,
        ];
        assert!(flatten(&commands, 4).is_empty());
    }

    #[test]
    fn even_odd_treats_nested_contour_as_hole() {
        let mut commands = square(0.0, 10.0);
        commands.extend(square(3.0, 7.0));
        let contours = flatten(&commands, 1);
        assert!(contains(&contours, Vec2::new(1.0, 1.0)));
        assert!(!contains(&contours, Vec2::new(5.0, 5.0)));
        assert!(!contains(&contours, Vec2::new(12.0, 5.0)));
    }
}

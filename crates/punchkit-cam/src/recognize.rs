//! Pattern recognition over boundary curves.
//!
//! Pure and deterministic: the same (curve, pattern) pair always yields
//! the same candidate frames. Curves the pattern cannot be matched
//! against (empty box, too few knot points, degenerate directions) are
//! skipped by returning `None`; that is never an error.

use nalgebra::{Point3, Vector3};
use punchkit_core::{Curve, Frame};

use crate::items::PunchItem;
use crate::pattern::{PatternKind, PunchPattern};

/// Recognizes the punch candidates a curve offers under `pattern`.
pub fn recognize(curve: &Curve, pattern: &PunchPattern) -> Option<PunchItem> {
    if curve.is_empty() {
        return None;
    }
    match pattern.kind {
        PatternKind::Round => recognize_round(curve),
        PatternKind::Rectangle | PatternKind::Star => recognize_sectors(curve, pattern),
        PatternKind::Custom => recognize_custom(curve, pattern),
    }
}

/// Round: one frame at the bounding-box midpoint with world axes.
fn recognize_round(curve: &Curve) -> Option<PunchItem> {
    let center = curve.bounding_box()?.center();
    Some(PunchItem::new(vec![Frame::from_origin(center)]))
}

/// Rectangle and Star: origin and base tangent from the pattern's
/// farthest knot points, candidates at the pattern's uniform angles.
fn recognize_sectors(curve: &Curve, pattern: &PunchPattern) -> Option<PunchItem> {
    let sectors = pattern.symmetry_count;
    if sectors == 0 || curve.len() < sectors {
        return None;
    }
    let provisional = curve.bounding_box()?.center();
    let farthest = farthest_points(curve.points(), &provisional, sectors);

    // Re-center on the selected corners before deriving the tangent.
    let center = centroid(farthest.iter().map(|&idx| curve.points()[idx]));
    let base = curve.points()[farthest[0]] - center;
    build_item(center, base, pattern)
}

/// Custom: origin from the centroid of all knots, base tangent from the
/// single farthest knot, one candidate per configured angle.
fn recognize_custom(curve: &Curve, pattern: &PunchPattern) -> Option<PunchItem> {
    if pattern.symmetry_angles.is_empty() {
        return None;
    }
    let center = centroid(curve.points().iter().copied());
    let farthest = farthest_points(curve.points(), &center, 1);
    let base = curve.points()[farthest[0]] - center;
    build_item(center, base, pattern)
}

fn build_item(
    center: Point3<f64>,
    base_tangent: Vector3<f64>,
    pattern: &PunchPattern,
) -> Option<PunchItem> {
    let base = Frame::try_new(center, Vector3::z(), base_tangent)?
        .rotated_about_normal(pattern.start_angle_offset);
    let candidates = pattern
        .symmetry_angles
        .iter()
        .map(|&angle| base.rotated_about_normal(angle))
        .collect();
    Some(PunchItem::new(candidates))
}

/// Indices of the `count` knots farthest from `center`, farthest first.
/// Equal distances break toward the smaller original index, keeping the
/// selection reproducible.
fn farthest_points(points: &[Point3<f64>], center: &Point3<f64>, count: usize) -> Vec<usize> {
    let mut by_distance: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, nalgebra::distance(center, p)))
        .collect();
    by_distance.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    by_distance.truncate(count);
    by_distance.into_iter().map(|(i, _)| i).collect()
}

fn centroid(points: impl Iterator<Item = Point3<f64>>) -> Point3<f64> {
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    Point3::from(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn farthest_breaks_ties_on_original_index() {
        let points = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
        ];
        let picked = farthest_points(&points, &Point3::origin(), 2);
        assert_eq!(picked, vec![0, 1]);
    }

    #[test]
    fn too_few_knots_is_a_skip() {
        let curve = Curve::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]);
        assert!(recognize(&curve, &PunchPattern::rectangle(0.0)).is_none());
        assert!(recognize(&curve, &PunchPattern::star(5, 0.0)).is_none());
    }

    #[test]
    fn empty_curve_is_a_skip() {
        let curve = Curve::new(Vec::new());
        assert!(recognize(&curve, &PunchPattern::round()).is_none());
    }

    #[test]
    fn coincident_knots_have_no_tangent() {
        let p = Point3::new(2.0, 2.0, 0.0);
        let curve = Curve::new(vec![p; 6]);
        assert!(recognize(&curve, &PunchPattern::rectangle(0.0)).is_none());
    }
}

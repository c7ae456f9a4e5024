use crate::core::models::pose::Pose;
use crate::core::utils::geometry::quaternion_angle_deg;
use tracing::debug;

/// Returns `true` if two poses are within both the angular and the translational
/// threshold of each other. Poses that share only an orientation, or only a
/// site, are not duplicates.
#[inline]
pub fn is_duplicate(a: &Pose, b: &Pose, angle_threshold_deg: f64, trans_threshold: f64) -> bool {
    quaternion_angle_deg(a.rotation(), b.rotation()) <= angle_threshold_deg
        && (a.translation() - b.translation()).norm() <= trans_threshold
}

/// Greedy redundancy removal over a score-ranked candidate list.
///
/// `sorted` must already be in descending score order. Candidates are accepted
/// in that order unless they duplicate an already accepted pose; the scan stops
/// once `limit` poses are accepted or the input is exhausted. The output is an
/// ordered subsequence of the input.
pub fn diversify(
    sorted: &[Pose],
    angle_threshold_deg: f64,
    trans_threshold: f64,
    limit: usize,
) -> Vec<Pose> {
    let mut accepted: Vec<Pose> = Vec::with_capacity(limit.min(sorted.len()));
    if limit == 0 {
        return accepted;
    }

    for candidate in sorted {
        let duplicate = accepted
            .iter()
            .any(|kept| is_duplicate(candidate, kept, angle_threshold_deg, trans_threshold));
        if duplicate {
            continue;
        }
        accepted.push(*candidate);
        if accepted.len() >= limit {
            break;
        }
    }

    debug!(
        candidates = sorted.len(),
        accepted = accepted.len(),
        "Diversity filter finished."
    );
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::pose::RigidTransform;
    use crate::core::scoring::PoseScore;
    use crate::engine::sampling::{Lcg32, sample_transform};
    use itertools::Itertools;
    use nalgebra::{Quaternion, Vector3};

    fn pose(q: Quaternion<f64>, t: Vector3<f64>, score: f64) -> Pose {
        Pose::new(
            RigidTransform::new(q, t),
            PoseScore {
                score,
                contact_count: 0,
                clash_penalty: 0.0,
            },
        )
    }

    fn about_z(degrees: f64) -> Quaternion<f64> {
        let half = degrees.to_radians() / 2.0;
        Quaternion::new(half.cos(), 0.0, 0.0, half.sin())
    }

    #[test]
    fn near_identical_poses_are_collapsed() {
        let poses = vec![
            pose(about_z(0.0), Vector3::zeros(), 10.0),
            pose(about_z(5.0), Vector3::new(1.0, 0.0, 0.0), 9.0),
            pose(about_z(90.0), Vector3::zeros(), 8.0),
        ];
        let kept = diversify(&poses, 12.0, 2.0, 10);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].score, 10.0);
        assert_eq!(kept[1].score, 8.0);
    }

    #[test]
    fn same_orientation_at_different_site_is_kept() {
        let poses = vec![
            pose(about_z(0.0), Vector3::zeros(), 10.0),
            pose(about_z(0.0), Vector3::new(5.0, 0.0, 0.0), 9.0),
        ];
        assert_eq!(diversify(&poses, 12.0, 2.0, 10).len(), 2);
    }

    #[test]
    fn negated_quaternion_is_the_same_orientation() {
        let q = about_z(40.0);
        let poses = vec![
            pose(q, Vector3::zeros(), 10.0),
            pose(-q, Vector3::new(0.5, 0.0, 0.0), 9.0),
        ];
        assert_eq!(diversify(&poses, 12.0, 2.0, 10).len(), 1);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let poses = vec![
            pose(about_z(0.0), Vector3::zeros(), 10.0),
            pose(about_z(0.0), Vector3::new(2.0, 0.0, 0.0), 9.0),
        ];
        assert_eq!(diversify(&poses, 12.0, 2.0, 10).len(), 1);
    }

    #[test]
    fn stops_at_limit() {
        let poses: Vec<Pose> = (0..10)
            .map(|i| pose(about_z(0.0), Vector3::new(i as f64 * 10.0, 0.0, 0.0), -(i as f64)))
            .collect();
        let kept = diversify(&poses, 12.0, 2.0, 3);

        assert_eq!(kept.len(), 3);
        assert_eq!(kept, poses[..3].to_vec());
    }

    #[test]
    fn zero_limit_or_empty_input_yields_nothing() {
        let poses = vec![pose(about_z(0.0), Vector3::zeros(), 1.0)];
        assert!(diversify(&poses, 12.0, 2.0, 0).is_empty());
        assert!(diversify(&[], 12.0, 2.0, 5).is_empty());
    }

    #[test]
    fn accepted_poses_are_pairwise_distinct() {
        let mut rng = Lcg32::new(21);
        let poses: Vec<Pose> = (0..300)
            .map(|i| {
                let t = sample_transform(&mut rng, 3.0);
                pose(t.rotation, t.translation, -(i as f64))
            })
            .collect();
        let kept = diversify(&poses, 60.0, 3.0, 50);

        assert!(!kept.is_empty());
        for (a, b) in kept.iter().tuple_combinations() {
            assert!(!is_duplicate(a, b, 60.0, 3.0));
        }
    }
}

use crate::core::scoring::PoseScore;
use nalgebra::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A rigid-body placement of the ligand relative to the centered receptor.
///
/// The rotation is a unit quaternion applied about the origin, followed by
/// the translation. The two are never commuted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Unit quaternion, serialized as `[x, y, z, w]`.
    pub rotation: Quaternion<f64>,
    pub translation: Vector3<f64>,
}

impl RigidTransform {
    pub fn new(rotation: Quaternion<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Quaternion::identity(), Vector3::zeros())
    }
}

/// One sampled and scored pose.
///
/// Poses are immutable once scored: they are produced, ranked and filtered,
/// but never edited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    #[serde(flatten)]
    pub transform: RigidTransform,
    /// `w_contact * contact_count - clash_penalty`.
    pub score: f64,
    #[serde(rename = "contacts")]
    pub contact_count: usize,
    #[serde(rename = "clash")]
    pub clash_penalty: f64,
}

impl Pose {
    pub fn new(transform: RigidTransform, score: PoseScore) -> Self {
        Self {
            transform,
            score: score.score,
            contact_count: score.contact_count,
            clash_penalty: score.clash_penalty,
        }
    }

    #[inline]
    pub fn rotation(&self) -> &Quaternion<f64> {
        &self.transform.rotation
    }

    #[inline]
    pub fn translation(&self) -> &Vector3<f64> {
        &self.transform.translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_copies_score_components() {
        let score = PoseScore {
            score: 3.5,
            contact_count: 5,
            clash_penalty: 1.5,
        };
        let pose = Pose::new(RigidTransform::identity(), score);

        assert_eq!(pose.score, 3.5);
        assert_eq!(pose.contact_count, 5);
        assert_eq!(pose.clash_penalty, 1.5);
        assert_eq!(pose.rotation(), &Quaternion::identity());
        assert_eq!(pose.translation(), &Vector3::zeros());
    }

    #[test]
    fn pose_serializes_with_flattened_transform() {
        let transform = RigidTransform::new(
            Quaternion::new(0.5, 0.5, 0.5, 0.5),
            Vector3::new(1.0, -2.0, 3.0),
        );
        let pose = Pose::new(
            transform,
            PoseScore {
                score: 2.0,
                contact_count: 2,
                clash_penalty: 0.0,
            },
        );
        let json = serde_json::to_value(pose).unwrap();

        assert_eq!(json["rotation"], serde_json::json!([0.5, 0.5, 0.5, 0.5]));
        assert_eq!(json["translation"], serde_json::json!([1.0, -2.0, 3.0]));
        assert_eq!(json["contacts"], 2);
        assert_eq!(json["clash"], 0.0);
    }
}

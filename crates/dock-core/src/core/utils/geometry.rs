use crate::core::models::atom::Atom;
use crate::core::models::pose::RigidTransform;
use nalgebra::{Point3, Quaternion, Vector3};

/// Arithmetic mean of all atom positions.
///
/// The divisor is floored to one, so an empty set yields the origin instead of
/// a division by zero.
pub fn centroid(atoms: &[Atom]) -> Point3<f64> {
    let sum = atoms
        .iter()
        .fold(Vector3::zeros(), |acc, atom| acc + atom.position.coords);
    let n = atoms.len().max(1) as f64;
    Point3::from(sum / n)
}

pub fn translate(atoms: &[Atom], delta: &Vector3<f64>) -> Vec<Atom> {
    atoms
        .iter()
        .map(|atom| atom.moved_to(atom.position + delta))
        .collect()
}

/// Translates a set so that its centroid sits at the origin.
pub fn center(atoms: &[Atom]) -> Vec<Atom> {
    let c = centroid(atoms);
    translate(atoms, &(-c.coords))
}

/// Rotates `p` about the origin by the unit quaternion `q`.
///
/// Closed form of the sandwich product `q * p * q^-1` with the inverse taken as
/// the conjugate. The arithmetic is spelled out term by term so results are
/// reproducible bit-for-bit.
#[inline]
pub fn rotate_point(p: &Point3<f64>, q: &Quaternion<f64>) -> Point3<f64> {
    let (qx, qy, qz, qw) = (q.i, q.j, q.k, q.w);
    let (vx, vy, vz) = (p.x, p.y, p.z);

    let ix = qw * vx + qy * vz - qz * vy;
    let iy = qw * vy + qz * vx - qx * vz;
    let iz = qw * vz + qx * vy - qy * vx;
    let iw = -qx * vx - qy * vy - qz * vz;

    Point3::new(
        ix * qw - iw * qx - iy * qz + iz * qy,
        iy * qw - iw * qy - iz * qx + ix * qz,
        iz * qw - iw * qz - ix * qy + iy * qx,
    )
}

/// Applies a rigid-body transform to a single point: rotation first, then translation.
#[inline]
pub fn transform_point(p: &Point3<f64>, transform: &RigidTransform) -> Point3<f64> {
    rotate_point(p, &transform.rotation) + transform.translation
}

/// Rotates every atom about the origin, then translates by the transform's offset.
pub fn transform(atoms: &[Atom], transform: &RigidTransform) -> Vec<Atom> {
    atoms
        .iter()
        .map(|atom| atom.moved_to(transform_point(&atom.position, transform)))
        .collect()
}

/// Angular separation of two unit quaternions in degrees.
///
/// Uses the absolute dot product, so `q` and `-q` (the same rotation) are zero
/// degrees apart.
pub fn quaternion_angle_deg(q1: &Quaternion<f64>, q2: &Quaternion<f64>) -> f64 {
    let dot = q1.coords.dot(&q2.coords).abs();
    2.0 * dot.clamp(-1.0, 1.0).acos().to_degrees()
}

use nalgebra::{Matrix3, Point3, Vector3};

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Positional RMSD without any alignment. `None` if the inputs are empty or
/// differ in length.
pub fn rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}

/// RMSD after optimal rigid-body superposition of `query` onto `reference`
/// (Kabsch). Both sets are centered on their centroids, the rotation
/// minimizing the residual is found via SVD of the covariance matrix with
/// the usual reflection correction, and the RMSD of the superposed pair is
/// returned. `None` if the inputs are empty or differ in length.
pub fn overlay_rmsd(reference: &[Point3<f64>], query: &[Point3<f64>]) -> Option<f64> {
    if reference.len() != query.len() || reference.is_empty() {
        return None;
    }
    let ref_center = centroid(reference)?;
    let query_center = centroid(query)?;

    let centered_ref: Vec<Vector3<f64>> = reference.iter().map(|p| p - ref_center).collect();
    let centered_query: Vec<Vector3<f64>> = query.iter().map(|p| p - query_center).collect();

    let mut covariance: Matrix3<f64> = Matrix3::zeros();
    for (q, r) in centered_query.iter().zip(centered_ref.iter()) {
        covariance += q * r.transpose();
    }

    let svd = covariance.svd(true, true);
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        // Decomposition failed; report the unaligned residual instead.
        _ => return rmsd(reference, query),
    };

    let mut rotation: Matrix3<f64> = v_t.transpose() * u.transpose();
    if rotation.determinant() < 0.0 {
        let mut v_t_adjusted = v_t;
        v_t_adjusted.row_mut(2).neg_mut();
        rotation = v_t_adjusted.transpose() * u.transpose();
    }

    let n = reference.len() as f64;
    let squared_dist_sum: f64 = centered_query
        .iter()
        .zip(centered_ref.iter())
        .map(|(q, r)| (rotation * q - r).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}

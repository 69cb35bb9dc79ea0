use crate::{Error, Result, Settings};
use arrsac::Arrsac;
use cv_core::{
    nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3},
    sample_consensus::{Consensus, Estimator, Model},
};
use log::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// A goal image location paired with a scene image location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMatch {
    pub goal: Point2<f64>,
    pub scene: Point2<f64>,
}

impl PointMatch {
    pub fn new(goal: Point2<f64>, scene: Point2<f64>) -> Self {
        Self { goal, scene }
    }
}

/// A projective transform of the image plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography(pub Matrix3<f64>);

impl Homography {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Apply the transform. A point mapped to infinity comes back non-finite.
    pub fn project(&self, point: Point2<f64>) -> Point2<f64> {
        let v = self.0 * Vector3::new(point.x, point.y, 1.0);
        Point2::new(v.x / v.z, v.y / v.z)
    }

    /// Scale so that the bottom-right entry is one, if it is not (nearly) zero.
    fn normalized(self) -> Self {
        let s = self.0[(2, 2)];
        if s.abs() > 1e-12 {
            Self(self.0 / s)
        } else {
            self
        }
    }
}

impl Model<PointMatch> for Homography {
    /// The reprojection error in scene pixels.
    fn residual(&self, data: &PointMatch) -> f64 {
        let v = self.0 * Vector3::new(data.goal.x, data.goal.y, 1.0);
        if v.z.abs() < 1e-12 {
            return f64::INFINITY;
        }
        (Point2::new(v.x / v.z, v.y / v.z) - data.scene).norm()
    }
}

/// Translate points to their centroid and scale them to a mean distance of sqrt(2).
fn hartley_normalization(points: &[Point2<f64>]) -> Matrix3<f64> {
    let n = points.len() as f64;
    let centroid = points
        .iter()
        .fold(Vector3::zeros(), |acc: Vector3<f64>, p| acc + Vector3::new(p.x, p.y, 0.0))
        / n;
    let mean_dist = points
        .iter()
        .map(|p| ((p.x - centroid.x).powi(2) + (p.y - centroid.y).powi(2)).sqrt())
        .sum::<f64>()
        / n;
    let s = if mean_dist > 1e-12 {
        2f64.sqrt() / mean_dist
    } else {
        1.0
    };
    Matrix3::new(s, 0.0, -s * centroid.x, 0.0, s, -s * centroid.y, 0.0, 0.0, 1.0)
}

fn transform(t: &Matrix3<f64>, p: &Point2<f64>) -> Point2<f64> {
    let v = t * Vector3::new(p.x, p.y, 1.0);
    Point2::new(v.x, v.y)
}

/// The normalized direct linear transform.
///
/// The normal equations `AᵀA` are accumulated directly and the solution is the eigenvector of
/// the smallest eigenvalue, as the eight-point algorithm does for essential matrices.
#[derive(Copy, Clone, Debug)]
pub struct HomographyEstimator {
    pub epsilon: f64,
    pub iterations: usize,
}

impl HomographyEstimator {
    pub fn new() -> Self {
        Default::default()
    }

    /// Fit a homography to four or more matches.
    pub fn fit<I>(&self, data: I) -> Option<Homography>
    where
        I: Iterator<Item = PointMatch>,
    {
        let (goal, scene): (Vec<Point2<f64>>, Vec<Point2<f64>>) =
            data.map(|m| (m.goal, m.scene)).unzip();
        if goal.len() < 4 {
            return None;
        }
        let t_goal = hartley_normalization(&goal);
        let t_scene = hartley_normalization(&scene);

        let mut ata = SMatrix::<f64, 9, 9>::zeros();
        for (a, b) in goal.iter().zip(&scene) {
            let Point2 { coords: a } = transform(&t_goal, a);
            let Point2 { coords: b } = transform(&t_scene, b);
            let (x, y, u, v) = (a.x, a.y, b.x, b.y);
            let rows = [
                SVector::<f64, 9>::from_row_slice(&[-x, -y, -1.0, 0.0, 0.0, 0.0, u * x, u * y, u]),
                SVector::<f64, 9>::from_row_slice(&[0.0, 0.0, 0.0, -x, -y, -1.0, v * x, v * y, v]),
            ];
            for row in &rows {
                ata += row * row.transpose();
            }
        }

        let eigens = ata.try_symmetric_eigen(self.epsilon, self.iterations)?;
        let (smallest, _) = eigens
            .eigenvalues
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))?;
        let hn = Matrix3::from_row_iterator(eigens.eigenvectors.column(smallest).iter().copied());

        // Undo the normalization: H = T_scene⁻¹ Hn T_goal.
        let t_scene_inv = t_scene.try_inverse()?;
        let homography = Homography(t_scene_inv * hn * t_goal).normalized();
        homography
            .0
            .iter()
            .all(|v| v.is_finite())
            .then(|| homography)
    }
}

impl Default for HomographyEstimator {
    fn default() -> Self {
        Self {
            epsilon: 1e-12,
            iterations: 1000,
        }
    }
}

impl Estimator<PointMatch> for HomographyEstimator {
    type Model = Homography;
    type ModelIter = Option<Homography>;
    const MIN_SAMPLES: usize = 4;

    fn estimate<I>(&self, data: I) -> Self::ModelIter
    where
        I: Iterator<Item = PointMatch> + Clone,
    {
        self.fit(data)
    }
}

/// Find the homography most of `matches` agree with.
///
/// ARRSAC picks the consensus from minimal samples, then the homography is refit on all of the
/// inliers. Returns the homography and the indices of the inliers.
pub fn find_homography(matches: &[PointMatch], settings: &Settings) -> Result<(Homography, Vec<usize>)> {
    if matches.len() < HomographyEstimator::MIN_SAMPLES {
        return Err(Error::TooFewMatches(matches.len()));
    }
    let estimator = HomographyEstimator::new();
    let mut consensus = Arrsac::new(
        settings.consensus_threshold,
        Xoshiro256PlusPlus::seed_from_u64(settings.seed),
    );
    let (model, inliers) = consensus
        .model_inliers(&estimator, matches.iter().copied())
        .ok_or(Error::HomographyNotFound)?;
    info!("{} of {} matches are inliers", inliers.len(), matches.len());
    let refit = estimator
        .fit(inliers.iter().map(|&ix| matches[ix]))
        .unwrap_or(model);
    debug!("Homography: {:?}", refit.0);
    Ok((refit, inliers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_homography() -> Homography {
        Homography(Matrix3::new(
            0.9, -0.2, 40.0, //
            0.15, 1.1, 25.0, //
            0.0004, -0.0002, 1.0,
        ))
    }

    fn matches_for(h: &Homography, points: &[(f64, f64)]) -> Vec<PointMatch> {
        points
            .iter()
            .map(|&(x, y)| {
                let goal = Point2::new(x, y);
                PointMatch::new(goal, h.project(goal))
            })
            .collect()
    }

    #[test]
    fn identity_projects_to_itself() {
        let p = Point2::new(12.5, -3.0);
        assert_eq!(Homography::identity().project(p), p);
    }

    #[test]
    fn four_points_recover_homography() {
        let h = sample_homography();
        let matches = matches_for(&h, &[(0.0, 0.0), (100.0, 0.0), (100.0, 80.0), (0.0, 80.0)]);
        let fit = HomographyEstimator::new().fit(matches.into_iter()).unwrap();
        assert_relative_eq!(fit.0, h.0, epsilon = 1e-6, max_relative = 1e-6);
    }

    #[test]
    fn many_points_recover_homography() {
        let h = sample_homography();
        let points: Vec<_> = (0..5)
            .flat_map(|i| (0..4).map(move |j| (i as f64 * 31.0, j as f64 * 17.0 + i as f64)))
            .collect();
        let fit = HomographyEstimator::new()
            .fit(matches_for(&h, &points).into_iter())
            .unwrap();
        assert_relative_eq!(fit.0, h.0, epsilon = 1e-6, max_relative = 1e-6);
    }

    #[test]
    fn three_points_are_not_enough() {
        let matches = matches_for(&sample_homography(), &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(HomographyEstimator::new().fit(matches.into_iter()), None);
    }

    #[test]
    fn residual_is_reprojection_distance() {
        let m = PointMatch::new(Point2::new(1.0, 2.0), Point2::new(4.0, 6.0));
        assert_relative_eq!(Homography::identity().residual(&m), 5.0);
    }

    #[test]
    fn residual_at_infinity_is_infinite() {
        let h = Homography(Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0));
        let m = PointMatch::new(Point2::new(0.0, 5.0), Point2::new(0.0, 0.0));
        assert_eq!(h.residual(&m), f64::INFINITY);
    }

    #[test]
    fn too_few_matches_is_an_error() {
        let matches = matches_for(&sample_homography(), &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert!(matches!(
            find_homography(&matches, &Settings::default()),
            Err(Error::TooFewMatches(3))
        ));
    }
}

use crate::{Error, Result, Sample};
use log::*;

/// Curvature used in place of a non-positive one, as LIBSVM does.
const TAU: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    /// `u · v`
    Linear,
    /// `exp(-gamma |u - v|²)`
    Rbf { gamma: f64 },
}

impl Kernel {
    pub fn eval(&self, u: &Sample, v: &Sample) -> f64 {
        let (ux, uy, vx, vy) = (u[0] as f64, u[1] as f64, v[0] as f64, v[1] as f64);
        match *self {
            Kernel::Linear => ux * vx + uy * vy,
            Kernel::Rbf { gamma } => (-gamma * ((ux - vx).powi(2) + (uy - vy).powi(2))).exp(),
        }
    }
}

/// C-SVC training parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvmParams {
    pub kernel: Kernel,
    /// The penalty for margin violations.
    pub c: f64,
    /// Training stops once the maximal KKT violation is below this.
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl Default for SvmParams {
    fn default() -> Self {
        Self {
            kernel: Kernel::Linear,
            c: 0.1,
            epsilon: 1e-3,
            max_iterations: 10_000_000,
        }
    }
}

/// A trained two class support vector classifier.
#[derive(Debug, Clone)]
pub struct Svm {
    kernel: Kernel,
    support_vectors: Vec<Sample>,
    /// `alpha_i * y_i` for every support vector.
    coefficients: Vec<f64>,
    rho: f64,
    /// The label of the positive class, then the negative one.
    labels: [f32; 2],
    iterations: usize,
}

impl Svm {
    /// Train a C-SVC with sequential minimal optimization.
    ///
    /// Each step picks the maximal violating pair of the dual problem and solves it analytically.
    /// The first label in `labels` becomes the positive class.
    pub fn train(data: &[Sample], labels: &[f32], params: &SvmParams) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::NoData);
        }
        if data.len() != labels.len() {
            return Err(Error::LabelCount {
                samples: data.len(),
                labels: labels.len(),
            });
        }
        if !(params.c > 0.0) {
            return Err(Error::InvalidPenalty(params.c));
        }
        if let Kernel::Rbf { gamma } = params.kernel {
            if !(gamma > 0.0) {
                return Err(Error::InvalidGamma(gamma));
            }
        }
        let classes = distinct_labels(labels);
        if classes.len() != 2 {
            return Err(Error::NotTwoClasses(classes.len()));
        }
        let class_labels = [classes[0], classes[1]];
        let y: Vec<f64> = labels
            .iter()
            .map(|&l| if l == class_labels[0] { 1.0 } else { -1.0 })
            .collect();

        let n = data.len();
        let c = params.c;
        // Q_ij = y_i y_j K(x_i, x_j)
        let q: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| y[i] * y[j] * params.kernel.eval(&data[i], &data[j]))
                    .collect()
            })
            .collect();
        let mut alpha = vec![0.0f64; n];
        let mut gradient = vec![-1.0f64; n];

        let mut iterations = 0;
        while iterations < params.max_iterations {
            let (i, j) = match select_working_set(&y, &alpha, &gradient, c) {
                Some((i, j, gap)) if gap >= params.epsilon => (i, j),
                _ => break,
            };
            iterations += 1;

            let (old_i, old_j) = (alpha[i], alpha[j]);
            if y[i] != y[j] {
                let quad = positive_curvature(q[i][i] + q[j][j] + 2.0 * q[i][j]);
                let delta = (-gradient[i] - gradient[j]) / quad;
                let diff = alpha[i] - alpha[j];
                alpha[i] += delta;
                alpha[j] += delta;
                if diff > 0.0 {
                    if alpha[j] < 0.0 {
                        alpha[j] = 0.0;
                        alpha[i] = diff;
                    }
                } else if alpha[i] < 0.0 {
                    alpha[i] = 0.0;
                    alpha[j] = -diff;
                }
                if diff > 0.0 {
                    if alpha[i] > c {
                        alpha[i] = c;
                        alpha[j] = c - diff;
                    }
                } else if alpha[j] > c {
                    alpha[j] = c;
                    alpha[i] = c + diff;
                }
            } else {
                let quad = positive_curvature(q[i][i] + q[j][j] - 2.0 * q[i][j]);
                let delta = (gradient[i] - gradient[j]) / quad;
                let sum = alpha[i] + alpha[j];
                alpha[i] -= delta;
                alpha[j] += delta;
                if sum > c {
                    if alpha[i] > c {
                        alpha[i] = c;
                        alpha[j] = sum - c;
                    }
                } else if alpha[j] < 0.0 {
                    alpha[j] = 0.0;
                    alpha[i] = sum;
                }
                if sum > c {
                    if alpha[j] > c {
                        alpha[j] = c;
                        alpha[i] = sum - c;
                    }
                } else if alpha[i] < 0.0 {
                    alpha[i] = 0.0;
                    alpha[j] = sum;
                }
            }

            let (delta_i, delta_j) = (alpha[i] - old_i, alpha[j] - old_j);
            for (k, g) in gradient.iter_mut().enumerate() {
                *g += q[i][k] * delta_i + q[j][k] * delta_j;
            }
        }
        if iterations == params.max_iterations {
            warn!("SMO stopped after {} iterations without converging", iterations);
        } else {
            debug!("SMO converged after {} iterations", iterations);
        }

        let rho = compute_rho(&y, &alpha, &gradient, c);
        let (support_vectors, coefficients): (Vec<Sample>, Vec<f64>) = alpha
            .iter()
            .zip(&y)
            .zip(data)
            .filter(|((&a, _), _)| a > 0.0)
            .map(|((&a, &y), &x)| (x, a * y))
            .unzip();
        info!(
            "{} support vectors out of {} samples",
            support_vectors.len(),
            n
        );
        Ok(Self {
            kernel: params.kernel,
            support_vectors,
            coefficients,
            rho,
            labels: class_labels,
            iterations,
        })
    }

    /// The signed distance-like score of `sample`. Positive means the first label.
    pub fn decision(&self, sample: &Sample) -> f64 {
        self.support_vectors
            .iter()
            .zip(&self.coefficients)
            .map(|(sv, coef)| coef * self.kernel.eval(sv, sample))
            .sum::<f64>()
            - self.rho
    }

    pub fn predict(&self, sample: &Sample) -> f32 {
        if self.decision(sample) > 0.0 {
            self.labels[0]
        } else {
            self.labels[1]
        }
    }

    pub fn support_vectors(&self) -> &[Sample] {
        &self.support_vectors
    }

    pub fn labels(&self) -> [f32; 2] {
        self.labels
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

fn distinct_labels(labels: &[f32]) -> Vec<f32> {
    let mut classes: Vec<f32> = vec![];
    for &label in labels {
        if !classes.contains(&label) {
            classes.push(label);
        }
    }
    classes
}

fn positive_curvature(quad: f64) -> f64 {
    if quad > 0.0 {
        quad
    } else {
        TAU
    }
}

/// The maximal violating pair `(i, j)` and the size of its violation.
fn select_working_set(y: &[f64], alpha: &[f64], gradient: &[f64], c: f64) -> Option<(usize, usize, f64)> {
    let mut up: Option<(usize, f64)> = None;
    let mut low: Option<(usize, f64)> = None;
    for t in 0..y.len() {
        let score = -y[t] * gradient[t];
        let in_up = (y[t] > 0.0 && alpha[t] < c) || (y[t] < 0.0 && alpha[t] > 0.0);
        let in_low = (y[t] > 0.0 && alpha[t] > 0.0) || (y[t] < 0.0 && alpha[t] < c);
        if in_up && up.map_or(true, |(_, best)| score > best) {
            up = Some((t, score));
        }
        if in_low && low.map_or(true, |(_, best)| score < best) {
            low = Some((t, score));
        }
    }
    let ((i, max), (j, min)) = (up?, low?);
    Some((i, j, max - min))
}

/// The bias, averaged over the free support vectors when there are any.
fn compute_rho(y: &[f64], alpha: &[f64], gradient: &[f64], c: f64) -> f64 {
    let (mut upper, mut lower) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut free, mut sum_free) = (0usize, 0.0);
    for t in 0..y.len() {
        let yg = y[t] * gradient[t];
        let at_upper = alpha[t] >= c;
        let at_lower = alpha[t] <= 0.0;
        if at_upper {
            if y[t] < 0.0 {
                upper = upper.min(yg);
            } else {
                lower = lower.max(yg);
            }
        } else if at_lower {
            if y[t] > 0.0 {
                upper = upper.min(yg);
            } else {
                lower = lower.max(yg);
            }
        } else {
            free += 1;
            sum_free += yg;
        }
    }
    if free > 0 {
        sum_free / free as f64
    } else {
        (upper + lower) / 2.0
    }
}

use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;
use strum_macros::{Display, EnumIter, EnumString};

use super::{Cell, MatrixKind, SimilarityMatrix};

///////////////////////////////
/// Pairwise distance functions between matrix rows. Boolean measures
/// (dice, jaccard) treat non-zero entries as true
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum DistanceMethod {
    Braycurtis,
    Canberra,
    Chebyshev,
    Cityblock,
    Correlation,
    Cosine,
    Dice,
    Euclidean,
    Hamming,
    Jaccard,
    Sqeuclidean,
}

impl DistanceMethod {
    pub fn distance(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        let pairs = || x.iter().zip(y.iter()).map(|(a, b)| (*a, *b));
        match self {
            DistanceMethod::Euclidean => pairs().map(|(a, b)| (a - b) * (a - b)).sum::<f64>().sqrt(),
            DistanceMethod::Sqeuclidean => pairs().map(|(a, b)| (a - b) * (a - b)).sum(),
            DistanceMethod::Cityblock => pairs().map(|(a, b)| (a - b).abs()).sum(),
            DistanceMethod::Chebyshev => pairs().map(|(a, b)| (a - b).abs()).fold(0.0, f64::max),
            DistanceMethod::Cosine => cosine(pairs()),
            DistanceMethod::Correlation => {
                let n = x.len().max(1) as f64;
                let mean_x = x.sum() / n;
                let mean_y = y.sum() / n;
                cosine(pairs().map(|(a, b)| (a - mean_x, b - mean_y)))
            }
            DistanceMethod::Braycurtis => {
                let num: f64 = pairs().map(|(a, b)| (a - b).abs()).sum();
                let den: f64 = pairs().map(|(a, b)| (a + b).abs()).sum();
                ratio(num, den)
            }
            DistanceMethod::Canberra => pairs()
                .map(|(a, b)| ratio((a - b).abs(), a.abs() + b.abs()))
                .sum(),
            DistanceMethod::Hamming => {
                let differ = pairs().filter(|(a, b)| a != b).count();
                ratio(differ as f64, x.len() as f64)
            }
            DistanceMethod::Jaccard => {
                let nonzero = pairs().filter(|(a, b)| *a != 0.0 || *b != 0.0).count();
                let differ = pairs()
                    .filter(|(a, b)| (*a != 0.0 || *b != 0.0) && a != b)
                    .count();
                ratio(differ as f64, nonzero as f64)
            }
            DistanceMethod::Dice => {
                let (mut ntt, mut ndiff) = (0usize, 0usize);
                for (a, b) in pairs() {
                    match (a != 0.0, b != 0.0) {
                        (true, true) => ntt += 1,
                        (true, false) | (false, true) => ndiff += 1,
                        (false, false) => {}
                    }
                }
                ratio(ndiff as f64, (2 * ntt + ndiff) as f64)
            }
        }
    }
}

/// 0/0 is taken as no difference
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

fn cosine(pairs: impl Iterator<Item = (f64, f64)>) -> f64 {
    let (mut dot, mut norm_x, mut norm_y) = (0.0, 0.0, 0.0);
    for (a, b) in pairs {
        dot += a * b;
        norm_x += a * a;
        norm_y += b * b;
    }
    match (norm_x == 0.0, norm_y == 0.0) {
        (true, true) => 0.0,
        (true, false) | (false, true) => 1.0,
        (false, false) => (1.0 - dot / (norm_x.sqrt() * norm_y.sqrt())).max(0.0),
    }
}

/// Distances between all rows. Only the upper triangle is computed; the
/// result is mirrored and has a zero diagonal
pub fn pairwise_distances(values: &Array2<f64>, method: DistanceMethod) -> Array2<f64> {
    let n = values.nrows();
    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| method.distance(values.row(i), values.row(j)))
                .collect()
        })
        .collect();

    let mut dist = Array2::<f64>::zeros((n, n));
    for (i, row) in upper.iter().enumerate() {
        for (offset, d) in row.iter().enumerate() {
            let j = i + 1 + offset;
            dist[[i, j]] = *d;
            dist[[j, i]] = *d;
        }
    }
    dist
}

/// Distance matrix over the rows of another matrix, on the same axis
pub fn distance_matrix(source: &SimilarityMatrix, method: DistanceMethod) -> SimilarityMatrix {
    let dist = pairwise_distances(&source.values(), method);
    SimilarityMatrix {
        kind: MatrixKind::Distance(method),
        axis: source.axis.clone(),
        cells: dist.mapv(Cell::Value),
    }
}

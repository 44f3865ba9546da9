use ndarray::Array2;

use super::distance::distance_matrix;
use super::{Cell, DistanceMethod, MatrixKind, SimilarityMatrix};
use crate::counts::{DirectedCountTable, SampleCountTable};
use crate::runtime::Error;

fn avg_count(counts: &DirectedCountTable, a: &str, b: &str) -> f64 {
    (counts.get_or_zero(a, b) + counts.get_or_zero(b, a)) as f64 / 2.0
}

fn total(totals: &SampleCountTable, name: &str) -> Result<f64, Error> {
    match totals.get(name) {
        Some(t) if t > 0 => Ok(t as f64),
        Some(_) => Err(Error::missing_denominator(name, Some("total is zero"))),
        None => Err(Error::missing_denominator(name, Some("no sequence count"))),
    }
}

fn empty(axis: &[String], kind: MatrixKind) -> SimilarityMatrix {
    let n = axis.len();
    SimilarityMatrix {
        kind,
        axis: axis.to_vec(),
        cells: Array2::from_elem((n, n), Cell::Count(0)),
    }
}

/// raw(A,B) = count(A,B), 0 when never measured
pub fn raw_matrix(counts: &DirectedCountTable, axis: &[String]) -> SimilarityMatrix {
    let mut m = empty(axis, MatrixKind::Raw);
    for (i, a) in axis.iter().enumerate() {
        for (j, b) in axis.iter().enumerate() {
            m.cells[[i, j]] = Cell::Count(counts.get_or_zero(a, b));
        }
    }
    m
}

/// avg(A,B) = (count(A,B) + count(B,A)) / 2
pub fn avg_matrix(counts: &DirectedCountTable, axis: &[String]) -> SimilarityMatrix {
    let mut m = empty(axis, MatrixKind::Avg);
    for (i, a) in axis.iter().enumerate() {
        for (j, b) in axis.iter().enumerate() {
            m.cells[[i, j]] = Cell::Value(avg_count(counts, a, b));
        }
    }
    m
}

/// ln(avg(A,B)), saturating to 0 when the average is 0
pub fn log_avg_matrix(counts: &DirectedCountTable, axis: &[String]) -> SimilarityMatrix {
    let mut m = empty(axis, MatrixKind::LogAvg);
    for (i, a) in axis.iter().enumerate() {
        for (j, b) in axis.iter().enumerate() {
            let avg = avg_count(counts, a, b);
            m.cells[[i, j]] = if avg > 0.0 {
                Cell::Value(avg.ln())
            } else {
                Cell::Saturated
            };
        }
    }
    m
}

/// norm(A,B): mean of both directions, each normalized by the size of its
/// query dataset: ((count(B,A) / total(A)) + (count(A,B) / total(B))) / 2
pub fn norm_matrix(
    counts: &DirectedCountTable,
    totals: &SampleCountTable,
    axis: &[String],
) -> Result<SimilarityMatrix, Error> {
    let mut m = empty(axis, MatrixKind::Norm);
    for (i, a) in axis.iter().enumerate() {
        let total_a = total(totals, a)?;
        for (j, b) in axis.iter().enumerate() {
            let norm_fwd = counts.get_or_zero(b, a) as f64 / total_a;
            let norm_rev = counts.get_or_zero(a, b) as f64 / total(totals, b)?;
            m.cells[[i, j]] = Cell::Value((norm_fwd + norm_rev) / 2.0);
        }
    }
    Ok(m)
}

/// norm_directed(A,B) = count(A,B) / total(B), the share of B's sequences found in A's index
pub fn norm_directed_matrix(
    counts: &DirectedCountTable,
    totals: &SampleCountTable,
    axis: &[String],
) -> Result<SimilarityMatrix, Error> {
    let mut m = empty(axis, MatrixKind::NormDirected);
    for (i, a) in axis.iter().enumerate() {
        for (j, b) in axis.iter().enumerate() {
            let value = counts.get_or_zero(a, b) as f64 / total(totals, b)?;
            m.cells[[i, j]] = Cell::Value(value);
        }
    }
    Ok(m)
}

///////////////////////////////
/// All matrices of one run, sharing the same axis
#[derive(Clone, Debug)]
pub struct MatrixSet {
    pub raw: SimilarityMatrix,
    pub avg: SimilarityMatrix,
    pub log_avg: SimilarityMatrix,
    pub norm: Option<SimilarityMatrix>,
    pub norm_directed: Option<SimilarityMatrix>,
    pub distance: Option<SimilarityMatrix>,
}

impl MatrixSet {
    pub fn iter(&self) -> impl Iterator<Item = &SimilarityMatrix> {
        [Some(&self.raw), Some(&self.avg), Some(&self.log_avg)]
            .into_iter()
            .chain([self.norm_directed.as_ref(), self.norm.as_ref(), self.distance.as_ref()])
            .flatten()
    }
}

/// Reduce the directed counts into every matrix. Normalized variants need
/// the totals; the distance matrix is taken over norm when present,
/// otherwise over avg
pub fn build_matrices(
    counts: &DirectedCountTable,
    totals: Option<&SampleCountTable>,
    distance: Option<DistanceMethod>,
) -> Result<MatrixSet, Error> {
    let axis = counts.axis();

    let (norm, norm_directed) = match totals {
        Some(totals) => (
            Some(norm_matrix(counts, totals, &axis)?),
            Some(norm_directed_matrix(counts, totals, &axis)?),
        ),
        None => (None, None),
    };

    let avg = avg_matrix(counts, &axis);
    let distance = distance.map(|method| distance_matrix(norm.as_ref().unwrap_or(&avg), method));

    Ok(MatrixSet {
        raw: raw_matrix(counts, &axis),
        log_avg: log_avg_matrix(counts, &axis),
        avg,
        norm,
        norm_directed,
        distance,
    })
}

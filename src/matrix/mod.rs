mod build;
mod distance;
mod write;

pub use build::avg_matrix;
pub use build::build_matrices;
pub use build::log_avg_matrix;
pub use build::norm_directed_matrix;
pub use build::norm_matrix;
pub use build::raw_matrix;
pub use build::MatrixSet;
pub use distance::distance_matrix;
pub use distance::pairwise_distances;
pub use distance::DistanceMethod;
pub use write::matrix_to_tsv;
pub use write::write_matrices;
pub use write::write_tsv;

use ndarray::Array2;

///////////////////////////////
/// One matrix cell. `Saturated` is the log of a zero average, which is
/// rendered as the literal 0 rather than a logarithm
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
    Count(u64),
    Value(f64),
    Saturated,
}

impl Cell {
    pub fn as_f64(&self) -> f64 {
        match self {
            Cell::Count(n) => *n as f64,
            Cell::Value(v) => *v,
            Cell::Saturated => 0.0,
        }
    }

    pub fn render(&self, precision: usize) -> String {
        match self {
            Cell::Count(n) => n.to_string(),
            Cell::Value(v) => format!("{:.*}", precision, v),
            Cell::Saturated => "0".to_string(),
        }
    }
}

/// Kind of a matrix. `Norm` is the symmetric normalized matrix and is
/// written as `matrix_norm_avg.txt`; `NormDirected` keeps one direction
/// per cell and is written as `matrix_norm.txt`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixKind {
    Raw,
    Avg,
    LogAvg,
    Norm,
    NormDirected,
    Distance(DistanceMethod),
}

impl MatrixKind {
    /// Decimals used when writing cells
    pub fn precision(&self) -> usize {
        match self {
            MatrixKind::Raw => 0,
            MatrixKind::Avg => 1,
            MatrixKind::LogAvg => 4,
            MatrixKind::Norm | MatrixKind::NormDirected | MatrixKind::Distance(_) => 6,
        }
    }

    pub fn file_name(&self) -> String {
        match self {
            MatrixKind::Raw => "matrix_raw.txt".to_string(),
            MatrixKind::Avg => "matrix_avg.txt".to_string(),
            MatrixKind::LogAvg => "matrix_log_avg.txt".to_string(),
            MatrixKind::Norm => "matrix_norm_avg.txt".to_string(),
            MatrixKind::NormDirected => "matrix_norm.txt".to_string(),
            MatrixKind::Distance(method) => format!("matrix_dist_{}.txt", method),
        }
    }
}

///////////////////////////////
/// Square matrix over a sorted axis of dataset names. Row is the first
/// name of a pair, column the second
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityMatrix {
    pub kind: MatrixKind,
    pub axis: Vec<String>,
    pub cells: Array2<Cell>,
}

impl SimilarityMatrix {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.axis.iter().position(|n| n == name)
    }

    pub fn get(&self, row: &str, col: &str) -> Option<Cell> {
        let i = self.position(row)?;
        let j = self.position(col)?;
        Some(self.cells[[i, j]])
    }

    /// Cell as it appears in the written matrix
    pub fn rendered(&self, row: &str, col: &str) -> Option<String> {
        self.get(row, col).map(|c| c.render(self.kind.precision()))
    }

    pub fn values(&self) -> Array2<f64> {
        self.cells.mapv(|c| c.as_f64())
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.axis.len();
        (0..n).all(|i| (0..i).all(|j| self.cells[[i, j]] == self.cells[[j, i]]))
    }
}

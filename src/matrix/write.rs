use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use super::{MatrixSet, SimilarityMatrix};
use crate::runtime::Error;
use crate::store::ArtifactStore;

/// Tab separated; the header row starts with an empty cell followed by the axis
pub fn write_tsv<W: Write>(matrix: &SimilarityMatrix, writer: W) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .has_headers(false)
        .from_writer(writer);

    let header = std::iter::once("").chain(matrix.axis.iter().map(|s| s.as_str()));
    wtr.write_record(header).map_err(std::io::Error::from)?;

    let precision = matrix.kind.precision();
    for (i, name) in matrix.axis.iter().enumerate() {
        let mut row = Vec::with_capacity(matrix.axis.len() + 1);
        row.push(name.clone());
        row.extend(matrix.cells.row(i).iter().map(|c| c.render(precision)));
        wtr.write_record(&row).map_err(std::io::Error::from)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn matrix_to_tsv(matrix: &SimilarityMatrix) -> Result<String, Error> {
    let mut buf: Vec<u8> = Vec::new();
    write_tsv(matrix, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::parse_error("matrix output", Some(e.to_string())))
}

/// Render every matrix first, then store them all below `dir`. Returns the
/// written locations
pub fn write_matrices(store: &dyn ArtifactStore, dir: &Path, set: &MatrixSet) -> Result<Vec<PathBuf>, Error> {
    let rendered = set
        .iter()
        .map(|m| -> Result<(PathBuf, String), Error> {
            Ok((dir.join(m.kind.file_name()), matrix_to_tsv(m)?))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let mut written = Vec::with_capacity(rendered.len());
    for (key, text) in rendered {
        store.write(&key, text.as_bytes())?;
        info!("Wrote {}", store.locate(&key).display());
        written.push(store.locate(&key));
    }
    Ok(written)
}

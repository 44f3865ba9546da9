use std::path::Path;

use log::{info, warn};

use crate::counts::{DirectedCountTable, SampleCountTable};
use crate::runtime::Error;
use crate::store::{ArtifactStore, DIR_COUNTS, DIR_MODE};

fn parse_count(store: &dyn ArtifactStore, key: &Path) -> Result<u64, Error> {
    let content = store.read_to_string(key)?;
    content.trim().parse::<u64>().map_err(|e| {
        Error::parse_error(
            format!("count file {:?}", store.locate(key)),
            Some(format!("{:?}: {}", content.trim(), e)),
        )
    })
}

/// Read every sequence total in the counts directory. A total of zero is fatal
pub fn collect_sample_counts(store: &dyn ArtifactStore) -> Result<SampleCountTable, Error> {
    collect_sample_counts_from(store, Path::new(DIR_COUNTS))
}

pub fn collect_sample_counts_from(store: &dyn ArtifactStore, dir: &Path) -> Result<SampleCountTable, Error> {
    let mut totals = SampleCountTable::new();
    for key in store.list_files(dir)? {
        let name = match key.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        let num_seqs = parse_count(store, &key)?;
        if num_seqs < 1 {
            return Err(Error::zero_count(name, store.locate(&key)));
        }
        totals.insert(name, num_seqs);
    }
    Ok(totals)
}

/// Read the pairwise counts. Each count file sits at `<index>/<query>`
/// below the mode directory; files are visited in sorted order
pub fn collect_directed_counts(store: &dyn ArtifactStore) -> Result<DirectedCountTable, Error> {
    collect_directed_counts_from(store, Path::new(DIR_MODE))
}

pub fn collect_directed_counts_from(store: &dyn ArtifactStore, dir: &Path) -> Result<DirectedCountTable, Error> {
    let mode_files = store.list_files(dir)?;
    info!("Creating matrices from {} mode files", mode_files.len());

    let mut counts = DirectedCountTable::new();
    for key in mode_files {
        let rel = key.strip_prefix(dir).unwrap_or(&key);
        let names: Vec<&str> = rel.iter().filter_map(|s| s.to_str()).collect();
        let (index_name, query_name) = match names.as_slice() {
            [index_name, query_name] => (*index_name, *query_name),
            _ => {
                warn!("Ignoring unexpected file {}", store.locate(&key).display());
                continue;
            }
        };
        counts.insert(index_name, query_name, parse_count(store, &key)?);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{count_key, mode_key, FsArtifactStore};

    #[test]
    fn directed_counts_from_mode_tree() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();
        store.write(&mode_key("X", "Y"), b"10\n").unwrap();
        store.write(&mode_key("Y", "X"), b"5\n").unwrap();
        store.write(&mode_key("Y", "Z"), b"0\n").unwrap();
        store.write(&Path::new(DIR_MODE).join("stray"), b"1\n").unwrap();

        let counts = collect_directed_counts(&store).unwrap();
        assert_eq!(counts.get("X", "Y"), Some(10));
        assert_eq!(counts.get("Y", "X"), Some(5));
        assert_eq!(counts.get("Y", "Z"), Some(0));
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.axis(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn garbage_count_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();
        store.write(&mode_key("X", "Y"), b"lots\n").unwrap();
        let err = collect_directed_counts(&store).unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn sample_totals_and_zero_rejection() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();
        store.write(&count_key("X"), b"100\n").unwrap();
        store.write(&count_key("Y"), b"50\n").unwrap();

        let totals = collect_sample_counts(&store).unwrap();
        assert_eq!(totals.get("X"), Some(100));
        assert_eq!(totals.get("Y"), Some(50));

        store.write(&count_key("Z"), b"0\n").unwrap();
        let err = collect_sample_counts(&store).unwrap_err();
        match err {
            Error::ZeroCount { name, .. } => assert_eq!(name, "Z"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}

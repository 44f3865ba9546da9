use std::fs;
use std::path::{Path, PathBuf};

use fizkin::command::{Fizkin, FizkinParams};
use fizkin::matrix::DistanceMethod;
use fizkin::plan::{IndexParams, QueryParams};
use fizkin::runtime::Error;
use fizkin::tasks::RunnerKind;

// Stands in for the kmer counter: the "index" is a copy of the source
const FAKE_INDEX: &str = "cp \"${10}\" \"$9\"\n";

// Stands in for the query engine: keeps query records whose sequence occurs in the index
const FAKE_QUERY: &str = r#"awk 'NR==FNR { if ($0 !~ /^>/) seen[$0]=1; next } /^>/ { h=$0; next } ($0 in seen) { print h; print $0 }' "$3" "$4"
"#;

struct Fixture {
    _dir: tempfile::TempDir,
    inputs: PathBuf,
    params: FizkinParams,
}

fn fixture(samples: &[(&str, &str)]) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let inputs = dir.path().join("inputs");
    fs::create_dir(&inputs).unwrap();
    for (name, content) in samples {
        fs::write(inputs.join(name), content).unwrap();
    }

    let fake_index = dir.path().join("fake_index.sh");
    fs::write(&fake_index, FAKE_INDEX).unwrap();
    let fake_query = dir.path().join("fake_query.sh");
    fs::write(&fake_query, FAKE_QUERY).unwrap();

    let params = FizkinParams {
        queries: vec![inputs.clone()],
        path_outdir: dir.path().join("out"),
        num_threads: 2,
        max_seqs: 0,
        distance: DistanceMethod::Euclidean,
        runner: RunnerKind::Native,
        index: IndexParams {
            tool: format!("sh {}", fake_index.display()),
            kmer_size: 20,
            num_threads: 2,
            hash_size: "100M".to_string(),
        },
        query: QueryParams {
            tool: format!("sh {}", fake_query.display()),
            ..QueryParams::default()
        },
        tool_parallel: "parallel".to_string(),
        tool_subset: format!("{} subset", env!("CARGO_BIN_EXE_fizkin")),
    };
    Fixture {
        _dir: dir,
        inputs,
        params,
    }
}

fn three_samples() -> Fixture {
    fixture(&[
        ("a.fa", ">a1\nAAAA\n>a2\nCCCC\n>a3\nGGGG\n"),
        ("b.fa", ">b1\nAAAA\n>b2\nTTTT\n"),
        ("c.fa", ">c1\nGGGG\n"),
    ])
}

fn read(outdir: &Path, rel: &str) -> String {
    fs::read_to_string(outdir.join(rel)).unwrap()
}

#[test]
fn full_run_writes_every_matrix() {
    let fx = three_samples();
    let outdir = fx.params.path_outdir.clone();

    let report = Fizkin::run(&fx.params).unwrap();
    // 3 indexes, 9 comparisons, 9 kept counts, 3 input counts
    assert_eq!(report.num_jobs, 24);
    assert_eq!(report.matrices.len(), 6);

    assert_eq!(
        read(&outdir, "figures/matrix_raw.txt"),
        "\ta.fa\tb.fa\tc.fa\na.fa\t3\t1\t1\nb.fa\t1\t2\t0\nc.fa\t1\t0\t1\n"
    );
    assert_eq!(read(&outdir, "counts/b.fa").trim(), "2");
    assert_eq!(read(&outdir, "mode/c.fa/b.fa").trim(), "0");

    let norm_avg = read(&outdir, "figures/matrix_norm_avg.txt");
    let row_a: Vec<&str> = norm_avg.lines().nth(1).unwrap().split('\t').collect();
    assert_eq!(row_a, vec!["a.fa", "1.000000", "0.416667", "0.666667"]);

    for name in ["matrix_avg.txt", "matrix_log_avg.txt", "matrix_norm.txt", "matrix_dist_euclidean.txt"] {
        assert!(outdir.join("figures").join(name).is_file(), "{}", name);
    }
    let leftover_jobs = fs::read_dir(&outdir)
        .unwrap()
        .filter(|e| e.as_ref().unwrap().path().extension().map_or(false, |x| x == "jobs"))
        .count();
    assert_eq!(leftover_jobs, 0);
}

#[test]
fn second_run_has_nothing_to_do() {
    let fx = three_samples();
    Fizkin::run(&fx.params).unwrap();
    let first = read(&fx.params.path_outdir, "figures/matrix_raw.txt");

    let report = Fizkin::run(&fx.params).unwrap();
    assert_eq!(report.num_jobs, 0);
    assert_eq!(read(&fx.params.path_outdir, "figures/matrix_raw.txt"), first);
}

#[test]
fn removed_pair_is_recomputed() {
    let fx = three_samples();
    Fizkin::run(&fx.params).unwrap();
    let outdir = &fx.params.path_outdir;
    fs::remove_file(outdir.join("reads_kept/a.fa/b.fa")).unwrap();
    fs::remove_file(outdir.join("mode/a.fa/b.fa")).unwrap();

    let report = Fizkin::run(&fx.params).unwrap();
    assert_eq!(report.num_jobs, 2);
    assert_eq!(read(outdir, "mode/a.fa/b.fa").trim(), "1");
}

#[test]
fn zero_sequence_input_produces_no_matrix() {
    let fx = fixture(&[("a.fa", ">a1\nAAAA\n"), ("empty.fa", "")]);

    let err = Fizkin::run(&fx.params).unwrap_err();
    assert!(matches!(err, Error::ZeroCount { ref name, .. } if name == "empty.fa"));
    assert!(!fx.params.path_outdir.join("figures").exists());
}

#[test]
fn failing_tasks_abort_and_keep_the_task_list() {
    let mut fx = three_samples();
    let working_tool = std::mem::replace(&mut fx.params.query.tool, "false".to_string());

    let err = Fizkin::run(&fx.params).unwrap_err();
    assert!(matches!(err, Error::Execution { .. }));
    let outdir = fx.params.path_outdir.clone();
    assert!(outdir.join("pairwise.jobs").is_file());
    assert!(!outdir.join("figures").exists());
    // the redirection created the kept files before the tool failed
    assert!(!outdir.join("reads_kept/a.fa/a.fa").exists());
    assert!(outdir.join("jellyfish/a.fa").is_file());

    fx.params.query.tool = working_tool;
    let report = Fizkin::run(&fx.params).unwrap();
    // 9 comparisons, 9 kept counts, 3 input counts
    assert_eq!(report.num_jobs, 21);
    assert_eq!(read(&outdir, "mode/a.fa/b.fa").trim(), "1");
}

#[test]
fn subsets_feed_the_later_phases() {
    let mut fx = three_samples();
    // no input is larger than the cap, so every subset is a full copy
    fx.params.max_seqs = 3;

    let report = Fizkin::run(&fx.params).unwrap();
    assert_eq!(report.num_jobs, 27);
    let outdir = &fx.params.path_outdir;
    for name in ["a.fa", "b.fa", "c.fa"] {
        assert_eq!(
            read(outdir, &format!("subset/{}", name)),
            fs::read_to_string(fx.inputs.join(name)).unwrap()
        );
    }
    assert_eq!(read(outdir, "counts/a.fa").trim(), "3");

    let raw = read(outdir, "figures/matrix_raw.txt");
    assert!(raw.starts_with("\ta.fa\tb.fa\tc.fa\n"));
    assert_eq!(Fizkin::run(&fx.params).unwrap().num_jobs, 0);
}

use std::collections::BTreeMap;
use std::collections::BTreeSet;

///////////////////////////////
/// count(index, query): how many sequences of `query` hit the index built
/// from `index`. Not symmetric. A pair that is absent reads as 0
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectedCountTable {
    counts: BTreeMap<String, BTreeMap<String, u64>>,
}

impl DirectedCountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I: Into<String>, Q: Into<String>>(&mut self, index_name: I, query_name: Q, count: u64) {
        self.counts
            .entry(index_name.into())
            .or_default()
            .insert(query_name.into(), count);
    }

    pub fn get(&self, index_name: &str, query_name: &str) -> Option<u64> {
        self.counts.get(index_name)?.get(query_name).copied()
    }

    pub fn get_or_zero(&self, index_name: &str, query_name: &str) -> u64 {
        self.get(index_name, query_name).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted union of every name seen as either index or query
    pub fn axis(&self) -> Vec<String> {
        let mut names: BTreeSet<&String> = BTreeSet::new();
        for (index_name, row) in &self.counts {
            names.insert(index_name);
            names.extend(row.keys());
        }
        names.into_iter().cloned().collect()
    }
}

///////////////////////////////
/// Total number of sequences per dataset
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleCountTable {
    totals: BTreeMap<String, u64>,
}

impl SampleCountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<N: Into<String>>(&mut self, name: N, total: u64) {
        self.totals.insert(name.into(), total);
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.totals.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.totals.iter()
    }
}

//! Ordered frequency tables

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};

/// Distinct value → occurrence count, iterated in first-seen order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: IndexMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every label produced by `labels`
    pub fn count<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for label in labels {
            table.increment(label);
        }
        table
    }

    /// Add one occurrence of `label`
    pub fn increment<S: Into<String>>(&mut self, label: S) {
        *self.counts.entry(label.into()).or_insert(0) += 1;
    }

    /// Count for `label`, if it was seen
    pub fn get(&self, label: &str) -> Option<usize> {
        self.counts.get(label).copied()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> Iter<'_, String, usize> {
        self.counts.iter()
    }

    /// Labels in first-seen order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Label with the highest count; ties go to the label seen first
    pub fn most_common(&self) -> Option<(&str, usize)> {
        self.counts
            .iter()
            .fold(None, |best: Option<(&str, usize)>, (label, &count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((label.as_str(), count)),
            })
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (&'a String, &'a usize);
    type IntoIter = Iter<'a, String, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::count(iter)
    }
}

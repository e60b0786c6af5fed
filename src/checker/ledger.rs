//! Per-scan storage for cross-file preliminary matches.
//!
//! The ledger is keyed by file and keeps matches in insertion order without
//! deduplication. Rules share the storage but only ever read entries carrying
//! their own [`RuleIdentity`].

use indexmap::IndexMap;

use crate::scanner::SourceFile;

use super::issue::{MatchKind, PreliminaryMatch, RuleIdentity};

#[derive(Debug, Default, Clone)]
pub struct MatchLedger {
    entries: IndexMap<SourceFile, Vec<PreliminaryMatch>>,
}

impl MatchLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, file: &SourceFile, found: PreliminaryMatch) {
        log::debug!(
            "Recorded {} match for {} at {}:{}",
            found.kind,
            found.rule,
            file.display_path(),
            found.line
        );
        self.entries.entry(file.clone()).or_default().push(found);
    }

    #[must_use]
    pub fn matches_for(&self, file: &SourceFile) -> &[PreliminaryMatch] {
        self.entries.get(file).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SourceFile, &[PreliminaryMatch])> {
        self.entries
            .iter()
            .map(|(file, matches)| (file, matches.as_slice()))
    }

    /// Matches of one kind for one rule, with the file each came from, in
    /// ledger order.
    pub fn matches_of<'a>(
        &'a self,
        rule: &'a RuleIdentity,
        kind: MatchKind,
    ) -> impl Iterator<Item = (&'a SourceFile, &'a PreliminaryMatch)> + 'a {
        self.iter().flat_map(move |(file, matches)| {
            matches
                .iter()
                .filter(move |found| found.is(rule, kind))
                .map(move |found| (file, found))
        })
    }

    #[must_use]
    pub fn has_match(&self, rule: &RuleIdentity, kind: MatchKind) -> bool {
        self.matches_of(rule, kind).next().is_some()
    }

    /// Append every entry of `other`, preserving its file and match order.
    pub fn merge(&mut self, other: Self) {
        for (file, matches) in other.entries {
            self.entries.entry(file).or_default().extend(matches);
        }
    }

    /// Number of files with at least one entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;

//! Identifier index over one build's paper records.
//!
//! The index owns the records of a build. Forest nodes refer to records by
//! slot, and the presentation layer uses the index afterwards to answer
//! detail and coauthor queries for the most recent build.

use serde::Serialize;
use std::collections::HashMap;

use super::id::PaperId;
use super::record::PaperRecord;

/// How many coauthors the hall of fame lists by default.
pub const DEFAULT_COAUTHOR_LIMIT: usize = 10;

/// A labelled external link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperLink {
    pub label: String,
    pub url: String,
}

/// Everything the detail view shows for one paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperDetails {
    pub id: PaperId,
    pub title: String,
    pub venue: Option<String>,
    pub summary: String,
    pub links: Vec<PaperLink>,
}

/// A coauthor and the number of papers they appear on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoauthorCount {
    pub name: String,
    pub papers: usize,
}

/// Record storage with id lookup.
///
/// Slots follow input order. When an id repeats, lookups resolve to the
/// latest record carrying it.
#[derive(Debug, Default, Clone)]
pub struct PaperIndex {
    records: Vec<PaperRecord>,
    by_id: HashMap<PaperId, usize>,
}

impl PaperIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            by_id: HashMap::with_capacity(capacity),
        }
    }

    /// Append a record and return its slot.
    ///
    /// Returns the slot together with whether the id was already known.
    pub fn insert(&mut self, record: PaperRecord) -> (usize, bool) {
        let slot = self.records.len();
        let replaced = self.by_id.insert(record.id.clone(), slot).is_some();
        self.records.push(record);
        (slot, replaced)
    }

    /// Slot of the record currently registered under `id`.
    pub fn slot_of(&self, id: &PaperId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Record registered under `id`.
    pub fn get(&self, id: &PaperId) -> Option<&PaperRecord> {
        self.slot_of(id).map(|slot| &self.records[slot])
    }

    /// Record stored at `slot`.
    pub fn record(&self, slot: usize) -> Option<&PaperRecord> {
        self.records.get(slot)
    }

    /// All records in input order.
    pub fn records(&self) -> &[PaperRecord] {
        &self.records
    }

    /// Number of stored records, duplicates included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Details for the detail view.
    pub fn details(&self, id: &PaperId) -> Option<PaperDetails> {
        let record = self.get(id)?;

        let mut links = Vec::with_capacity(record.additional_links.len() + 1);
        if let Some(url) = record.url.as_ref() {
            links.push(PaperLink {
                label: "arXiv".to_owned(),
                url: url.clone(),
            });
        }
        links.extend(record.additional_links.iter().map(|(label, url)| PaperLink {
            label: label.clone(),
            url: url.clone(),
        }));

        Some(PaperDetails {
            id: record.id.clone(),
            title: record
                .full_title
                .clone()
                .unwrap_or_else(|| record.title.clone()),
            venue: record.venue.clone(),
            summary: record.summary.clone().unwrap_or_default(),
            links,
        })
    }

    /// Coauthors ranked by paper count, most frequent first.
    ///
    /// Records are scanned last-to-first; equal counts keep the order in
    /// which that scan first met each name.
    pub fn coauthor_ranking(&self, limit: usize) -> Vec<CoauthorCount> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for record in self.records.iter().rev() {
            for name in &record.coauthors {
                let count = counts.entry(name.as_str()).or_insert_with(|| {
                    order.push(name.as_str());
                    0
                });
                *count += 1;
            }
        }

        let mut ranking: Vec<CoauthorCount> = order
            .into_iter()
            .map(|name| CoauthorCount {
                name: name.to_owned(),
                papers: counts.get(name).copied().unwrap_or(0),
            })
            .collect();
        // stable: ties stay in scan order
        ranking.sort_by(|a, b| b.papers.cmp(&a.papers));
        ranking.truncate(limit);
        ranking
    }

    /// Ids of every record listing `coauthor`, in input order.
    pub fn papers_with_coauthor(&self, coauthor: &str) -> Vec<PaperId> {
        self.records
            .iter()
            .filter(|record| record.coauthors.iter().any(|name| name == coauthor))
            .map(|record| record.id.clone())
            .collect()
    }
}

/// The coauthor currently highlighted, if any.
///
/// Selecting the highlighted coauthor again clears the highlight.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoauthorSelection {
    selected: Option<String>,
}

impl CoauthorSelection {
    /// Create a selection with nothing highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `name`, or clear the selection if it was already selected.
    pub fn toggle(&mut self, name: &str) -> Option<&str> {
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        } else {
            self.selected = Some(name.to_owned());
        }
        self.selected.as_deref()
    }

    /// Drop the highlight.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The highlighted coauthor.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Papers to emphasize for the current selection.
    pub fn highlighted(&self, index: &PaperIndex) -> Vec<PaperId> {
        match self.selected.as_deref() {
            Some(name) => index.papers_with_coauthor(name),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authored(id: u32, coauthors: &[&str]) -> PaperRecord {
        PaperRecord {
            id: id.into(),
            coauthors: coauthors.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut index = PaperIndex::new();
        let (slot, replaced) = index.insert(PaperRecord::root(1u32, "A", "#3366cc"));
        assert_eq!(slot, 0);
        assert!(!replaced);

        assert_eq!(index.len(), 1);
        assert!(index.get(&PaperId::from(1u32)).is_some());
        assert!(index.get(&PaperId::from(2u32)).is_none());
    }

    #[test]
    fn test_duplicate_id_resolves_to_latest() {
        let mut index = PaperIndex::new();
        index.insert(PaperRecord::child(5u32, 1u32, "first"));
        let (slot, replaced) = index.insert(PaperRecord::child(5u32, 1u32, "second"));

        assert!(replaced);
        assert_eq!(index.slot_of(&PaperId::from(5u32)), Some(slot));
        assert_eq!(index.get(&PaperId::from(5u32)).unwrap().title, "second");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_details_prefers_full_title_and_orders_links() {
        let mut record = PaperRecord::child(3u32, 1u32, "Short");
        record.full_title = Some("A Much Longer Title".into());
        record.url = Some("https://arxiv.org/abs/1".into());
        record
            .additional_links
            .insert("code".into(), "https://example.org/code".into());
        record.summary = Some("We did things.".into());

        let mut index = PaperIndex::new();
        index.insert(record);

        let details = index.details(&PaperId::from(3u32)).unwrap();
        assert_eq!(details.title, "A Much Longer Title");
        assert_eq!(details.summary, "We did things.");
        assert_eq!(details.links.len(), 2);
        assert_eq!(details.links[0].label, "arXiv");
        assert_eq!(details.links[1].label, "code");
    }

    #[test]
    fn test_details_falls_back_to_title() {
        let mut index = PaperIndex::new();
        index.insert(PaperRecord::child(3u32, 1u32, "Short"));

        let details = index.details(&PaperId::from(3u32)).unwrap();
        assert_eq!(details.title, "Short");
        assert!(details.links.is_empty());
        assert!(index.details(&PaperId::from(9u32)).is_none());
    }

    #[test]
    fn test_coauthor_ranking() {
        let mut index = PaperIndex::new();
        index.insert(authored(1, &["Ada", "Grace"]));
        index.insert(authored(2, &["Grace", "Alan"]));
        index.insert(authored(3, &["Grace", "Ada", "Edsger"]));

        let ranking = index.coauthor_ranking(DEFAULT_COAUTHOR_LIMIT);
        let names: Vec<&str> = ranking.iter().map(|c| c.name.as_str()).collect();

        // Grace 3, Ada 2, then ties in reverse-scan order: Edsger, Alan
        assert_eq!(names, vec!["Grace", "Ada", "Edsger", "Alan"]);
        assert_eq!(ranking[0].papers, 3);
        assert_eq!(ranking[1].papers, 2);
    }

    #[test]
    fn test_coauthor_ranking_limit() {
        let mut index = PaperIndex::new();
        index.insert(authored(1, &["A", "B", "C"]));
        assert_eq!(index.coauthor_ranking(2).len(), 2);
        assert!(PaperIndex::new().coauthor_ranking(10).is_empty());
    }

    #[test]
    fn test_papers_with_coauthor() {
        let mut index = PaperIndex::new();
        index.insert(authored(1, &["Ada"]));
        index.insert(authored(2, &["Alan"]));
        index.insert(authored(3, &["Ada", "Alan"]));

        assert_eq!(
            index.papers_with_coauthor("Ada"),
            vec![PaperId::from(1u32), PaperId::from(3u32)]
        );
        assert!(index.papers_with_coauthor("Nobody").is_empty());
    }

    #[test]
    fn test_selection_toggles() {
        let mut index = PaperIndex::new();
        index.insert(authored(1, &["Ada"]));
        index.insert(authored(2, &["Alan"]));

        let mut selection = CoauthorSelection::new();
        assert!(selection.highlighted(&index).is_empty());

        assert_eq!(selection.toggle("Ada"), Some("Ada"));
        assert_eq!(selection.highlighted(&index), vec![PaperId::from(1u32)]);

        assert_eq!(selection.toggle("Alan"), Some("Alan"));
        assert_eq!(selection.highlighted(&index), vec![PaperId::from(2u32)]);

        assert_eq!(selection.toggle("Alan"), None);
        assert!(selection.highlighted(&index).is_empty());
    }

    #[test]
    fn test_selection_applies_to_new_index() {
        let mut first = PaperIndex::new();
        first.insert(authored(1, &["Ada"]));
        let mut second = PaperIndex::new();
        second.insert(authored(7, &["Ada"]));
        second.insert(authored(8, &["Alan"]));

        let mut selection = CoauthorSelection::new();
        selection.toggle("Ada");

        assert_eq!(selection.highlighted(&first), vec![PaperId::from(1u32)]);
        assert_eq!(selection.highlighted(&second), vec![PaperId::from(7u32)]);
    }
}

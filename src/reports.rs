use crate::{
    catalog::Catalog,
    models::{BibliographyEntry, BookRecord, TitleCount},
    traits::{LineExport, LineWrite},
    writer::FileLineWriter,
};
use anyhow::Result;
use std::{
    collections::{BTreeSet, HashMap, hash_map::Entry},
    path::Path,
};

pub const DEFAULT_TITLE_THRESHOLD: usize = 30;
pub const DEFAULT_BIBLIOGRAPHY_SIZE: usize = 20;
pub const TOP_BOOKS_LIMIT: usize = 20;

/// Numbered references, in the order they were taken from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bibliography {
    entries: Vec<BibliographyEntry>,
}

impl Bibliography {
    pub fn entries(&self) -> &[BibliographyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LineExport for Bibliography {
    fn export(&self, writer: &mut impl LineWrite) -> Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            writer.write_line(&format!("{}. {entry}", index + 1))?;
        }
        writer.flush()
    }
}

impl Catalog {
    /// Counts books whose title is longer than `threshold` characters.
    pub fn titles_longer_than(&self, threshold: usize) -> usize {
        self.books()
            .iter()
            .filter(|book| book.title_len() > threshold)
            .count()
    }

    /// Books whose author equals `name`, ignoring case, in catalog order.
    pub fn find_books_by_author(&self, name: &str) -> Vec<&BookRecord> {
        let wanted = name.to_lowercase();
        self.books()
            .iter()
            .filter(|book| book.author().to_lowercase() == wanted)
            .collect()
    }

    /// References for the first `n` books of the catalog, unsorted.
    pub fn bibliography(&self, n: usize) -> Bibliography {
        Bibliography {
            entries: self
                .books()
                .iter()
                .take(n)
                .map(BibliographyEntry::from)
                .collect(),
        }
    }

    /// Builds the bibliography of the first `n` books and writes it to `path`.
    ///
    /// # Arguments
    /// * `n` - How many books, from the start of the catalog, to reference.
    /// * `path` - Output file. Existing content is replaced.
    ///
    /// # Returns
    /// The bibliography that was written.
    pub fn generate_bibliography(&self, n: usize, path: &Path) -> Result<Bibliography> {
        let bibliography = self.bibliography(n);
        let mut writer = FileLineWriter::create(path)?;
        bibliography.export(&mut writer)?;
        log::info!(
            "Wrote {} bibliography entries to {:?}",
            bibliography.len(),
            path
        );
        Ok(bibliography)
    }

    /// Distinct publishers in lexicographic order. Comparison is case-sensitive.
    pub fn list_publishers(&self) -> Vec<&str> {
        self.books()
            .iter()
            .map(|book| book.publisher().as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The `n` most frequent titles with their counts.
    ///
    /// Ordered by count, descending; equal counts keep the order in which the
    /// titles first appear in the catalog.
    pub fn top_books(&self, n: usize) -> Vec<TitleCount> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for book in self.books() {
            let title = book.title().as_str();
            match positions.entry(title) {
                Entry::Occupied(entry) => counts[*entry.get()].1 += 1,
                Entry::Vacant(entry) => {
                    entry.insert(counts.len());
                    counts.push((title, 1));
                }
            }
        }

        // stable sort keeps first-seen order among ties
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .take(n)
            .map(|(title, count)| TitleCount::new(title, count))
            .collect()
    }

    pub fn top_20_books(&self) -> Vec<TitleCount> {
        self.top_books(TOP_BOOKS_LIMIT)
    }
}

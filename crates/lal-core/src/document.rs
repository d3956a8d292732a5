//! Document container: an ordered list of records with file and stream I/O.

use crate::codec;
use crate::error::{LalError, Result};
use crate::models::{Entry, Record};
use std::io::{BufRead, BufReader, Read, Write};
use std::ops::Index;
use std::path::Path;

/// An ordered, mutable sequence of records making up one LAL document.
///
/// Membership queries (`contains`, `index_of`, `remove_record`) use loose
/// equality.
#[derive(Debug, Clone, Default)]
pub struct Document {
    records: Vec<Record>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from a string.
    pub fn parse(text: &str) -> Self {
        let mut document = Self::new();
        document.load_str(text);
        document
    }

    /// Open and parse a document file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut document = Self::new();
        document.load_path(path)?;
        Ok(document)
    }

    /// Replace the contents with the records decoded from `text`.
    ///
    /// The text may span multiple lines.
    pub fn load_str(&mut self, text: &str) {
        self.records = codec::decode_document(text.lines());
    }

    /// Replace the contents with the records decoded from a UTF-8 reader.
    pub fn load_reader(&mut self, reader: impl Read) -> Result<()> {
        let lines = BufReader::new(reader)
            .lines()
            .collect::<std::io::Result<Vec<_>>>()?;
        self.records = codec::decode_document(lines);
        Ok(())
    }

    /// Replace the contents with the records decoded from a file.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| LalError::file(path, e))?;
        self.load_reader(file).map_err(|e| match e {
            LalError::Io(source) => LalError::file(path, source),
            other => other,
        })?;

        tracing::info!("Loaded {} records from {}", self.len(), path.display());
        Ok(())
    }

    /// Encode the whole document. Empty documents give an empty string.
    pub fn to_lal_string(&self) -> Result<String> {
        codec::encode_document(&self.records)
    }

    /// Encode the document into `writer` and flush it.
    ///
    /// Nothing is written for an empty document. Every record is encoded
    /// before the first byte is written.
    pub fn write_to(&self, mut writer: impl Write) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        let text = self.to_lal_string()?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Save the document to a file, replacing its contents.
    ///
    /// The file is not touched if any record cannot be encoded.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_lal_string()?;
        std::fs::write(path, text).map_err(|e| LalError::file(path, e))?;

        tracing::info!("Saved {} records to {}", self.len(), path.display());
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    pub fn push(&mut self, record: impl Into<Record>) {
        self.records.push(record.into());
    }

    /// Insert a record at `index`, shifting later records.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, record: impl Into<Record>) {
        self.records.insert(index, record.into());
    }

    /// Replace the record at `index`, returning the previous one.
    ///
    /// Returns `None` and leaves the document unchanged when out of range.
    pub fn set(&mut self, index: usize, record: impl Into<Record>) -> Option<Record> {
        let slot = self.records.get_mut(index)?;
        Some(std::mem::replace(slot, record.into()))
    }

    /// Remove the record at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<Record> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    /// Remove the first record loosely equal to `record`.
    pub fn remove_record(&mut self, record: &Record) -> bool {
        match self.index_of(record) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Keep only the records for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Record) -> bool) {
        self.records.retain(keep);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.index_of(record).is_some()
    }

    pub fn index_of(&self, record: &Record) -> Option<usize> {
        self.records.iter().position(|r| r.loose_eq(record))
    }

    pub fn last_index_of(&self, record: &Record) -> Option<usize> {
        self.records.iter().rposition(|r| r.loose_eq(record))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.records.iter_mut()
    }

    /// Entries only, skipping comments.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.records.iter().filter_map(Record::as_entry)
    }

    /// Comment texts only.
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(Record::comment_text)
    }

    /// Find the first entry with the given login.
    pub fn find_login(&self, login: &str) -> Option<&Entry> {
        self.entries().find(|entry| entry.login == login)
    }
}

impl Index<usize> for Document {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl From<Vec<Record>> for Document {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for Document {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<Record> for Document {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl IntoIterator for Document {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

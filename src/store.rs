//! Flat-file record stores.
//!
//! Every store keeps its full collection in memory and rewrites its backing
//! file on each mutation. Files are line oriented: one record per line,
//! pipe-delimited fields, backslash escaping so a delimiter may appear
//! inside a field value without corrupting the line.
//!
//! There is no batching, no write-ahead log and no file locking; the files
//! are owned by a single local process.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::Result;

/// Field delimiter used by every record file.
pub const DELIMITER: char = '|';

/// A record serializable to one delimited line.
pub trait Record: Sized {
    /// Expected number of fields per line.
    const FIELDS: usize;

    /// Serialize into raw (unescaped) field values.
    fn to_fields(&self) -> Vec<String>;

    /// Parse from raw field values. `fields.len()` equals [`Self::FIELDS`].
    fn from_fields(fields: &[String]) -> Result<Self>;
}

/// In-memory ordered collection backed by a delimited flat file.
#[derive(Debug)]
pub struct FlatFile<R: Record> {
    path: PathBuf,
    records: Vec<R>,
}

impl<R: Record> FlatFile<R> {
    /// Open `path` and load every well-formed line.
    ///
    /// A missing file yields an empty collection. Lines with a wrong field
    /// count or unparseable values are skipped with a warning.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut records = Vec::new();

        match fs::read_to_string(&path) {
            Ok(contents) => {
                for (index, line) in contents.lines().enumerate() {
                    if line.is_empty() {
                        continue;
                    }

                    let fields = split_line(line);
                    if fields.len() != R::FIELDS {
                        tracing::warn!(
                            file = %path.display(),
                            line = index + 1,
                            expected = R::FIELDS,
                            got = fields.len(),
                            "skipping line with wrong field count"
                        );
                        continue;
                    }

                    match R::from_fields(&fields) {
                        Ok(record) => records.push(record),
                        Err(err) => tracing::warn!(
                            file = %path.display(),
                            line = index + 1,
                            error = %err,
                            "skipping malformed line"
                        ),
                    }
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {},
            Err(err) => return Err(err.into()),
        }

        Ok(Self { path, records })
    }

    /// Rewrite the whole backing file from the in-memory collection.
    pub fn save(&self) -> Result<()> {
        let mut contents = String::new();
        for record in &self.records {
            let fields = record.to_fields();
            let line = fields
                .iter()
                .map(|field| escape(field))
                .collect::<Vec<_>>()
                .join(&DELIMITER.to_string());
            contents.push_str(&line);
            contents.push('\n');
        }

        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Append a record and persist immediately.
    pub fn push(&mut self, record: R) -> Result<()> {
        self.records.push(record);
        self.save()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Linear scan returning the first match.
    pub fn find(&self, predicate: impl Fn(&R) -> bool) -> Option<&R> {
        self.records.iter().find(|&record| predicate(record))
    }

    /// Linear scan returning the first match, mutable.
    ///
    /// The caller must [`FlatFile::save`] after mutating.
    pub fn find_mut(
        &mut self,
        predicate: impl Fn(&R) -> bool,
    ) -> Option<&mut R> {
        self.records.iter_mut().find(|record| predicate(&**record))
    }

    /// Linear scan returning all matches.
    pub fn find_all(&self, predicate: impl Fn(&R) -> bool) -> Vec<&R> {
        self.records
            .iter()
            .filter(|&record| predicate(record))
            .collect()
    }
}

/// Escape a field value so it can sit between delimiters.
pub(crate) fn escape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '|' => out.push_str(r"\|"),
            '\n' => out.push_str(r"\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Split one line into unescaped field values.
pub(crate) fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => current.push('\n'),
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            DELIMITER => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Pair {
        left: String,
        right: String,
    }

    impl Record for Pair {
        const FIELDS: usize = 2;

        fn to_fields(&self) -> Vec<String> {
            vec![self.left.clone(), self.right.clone()]
        }

        fn from_fields(fields: &[String]) -> crate::error::Result<Self> {
            Ok(Self {
                left: fields[0].clone(),
                right: fields[1].clone(),
            })
        }
    }

    #[test]
    fn test_escape_round_trip() {
        let nasty = r"a|b\c";
        let line = format!("{}|{}", escape(nasty), escape("plain"));
        let fields = split_line(&line);
        assert_eq!(fields, vec![nasty.to_owned(), "plain".to_owned()]);
    }

    #[test]
    fn test_newline_in_field() {
        let fields = split_line(&format!("{}|x", escape("two\nlines")));
        assert_eq!(fields[0], "two\nlines");
    }

    #[test]
    fn test_missing_file_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store: FlatFile<Pair> =
            FlatFile::open(dir.path().join("absent.txt")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_load_round_trip_with_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.txt");

        let mut store: FlatFile<Pair> = FlatFile::open(&path).unwrap();
        store
            .push(Pair {
                left: "pipe | inside".into(),
                right: "ok".into(),
            })
            .unwrap();
        store
            .push(Pair {
                left: "second".into(),
                right: "entry".into(),
            })
            .unwrap();

        let reloaded: FlatFile<Pair> = FlatFile::open(&path).unwrap();
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn test_wrong_field_count_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.txt");
        std::fs::write(&path, "only-one-field\na|b\n").unwrap();

        let store: FlatFile<Pair> = FlatFile::open(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].left, "a");
    }
}

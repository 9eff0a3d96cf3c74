//! Flat delimited store files.
//!
//! Each record occupies one line with its fields joined by `", "`. There is no
//! quoting or escaping, so a field containing the separator cannot be stored.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Separator between the fields of a record.
pub const SEPARATOR: &str = ", ";

/// Separator between records.
pub const LINE_SEPARATOR: &str = "\n";

/// A value that maps to a fixed number of text fields.
pub trait Record: Sized {
    /// Number of fields a stored line must split into.
    const FIELDS: usize;

    /// Builds the record from exactly `FIELDS` fields.
    fn from_fields(fields: &[&str]) -> Self;

    /// Returns the fields in storage order.
    fn to_fields(&self) -> Vec<&str>;
}

/// Returns true if `value` can be written as a field without corrupting the line.
pub fn is_storable(value: &str) -> bool {
    !value.contains(SEPARATOR) && !value.contains('\n') && !value.contains('\r')
}

/// Parses store text into records.
///
/// Fields are taken verbatim; no trimming is applied.
pub fn parse<R: Record>(text: &str) -> Result<Vec<R>> {
    text.lines()
        .enumerate()
        .map(|(index, line)| {
            let fields: Vec<&str> = line.split(SEPARATOR).collect();
            if fields.len() != R::FIELDS {
                return Err(Error::MalformedRecord {
                    line: index + 1,
                    expected: R::FIELDS,
                    found: fields.len(),
                });
            }
            Ok(R::from_fields(&fields))
        })
        .collect()
}

/// Serializes records, one per line, without a trailing newline.
pub fn serialize<'a, R, I>(records: I) -> String
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .map(|record| record.to_fields().join(SEPARATOR))
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Reads and parses a store file. The file must exist.
pub fn load<R: Record>(path: &Path) -> Result<Vec<R>> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Overwrites a store file with the given records.
pub fn save<'a, R, I>(path: &Path, records: I) -> Result<()>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    fs::write(path, serialize(records))?;
    Ok(())
}

/// Creates an empty store file (and its parent directories) if missing.
///
/// Returns `true` when the file was created.
pub fn ensure_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::File::create(path)?;
    log::debug!("Created store file {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq)]
    struct Pair(String, String);

    impl Record for Pair {
        const FIELDS: usize = 2;

        fn from_fields(fields: &[&str]) -> Self {
            Pair(fields[0].to_string(), fields[1].to_string())
        }

        fn to_fields(&self) -> Vec<&str> {
            vec![self.0.as_str(), self.1.as_str()]
        }
    }

    #[test]
    fn test_parse_lines() {
        let pairs: Vec<Pair> = parse("alice, secret\nbob, hunter2").unwrap();
        assert_eq!(
            pairs,
            vec![
                Pair("alice".into(), "secret".into()),
                Pair("bob".into(), "hunter2".into())
            ]
        );
    }

    #[test]
    fn test_parse_empty_text() {
        let pairs: Vec<Pair> = parse("").unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_parse_keeps_whitespace() {
        let pairs: Vec<Pair> = parse(" alice,  secret ").unwrap();
        assert_eq!(pairs, vec![Pair(" alice".into(), " secret ".into())]);
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let result: Result<Vec<Pair>> = parse("alice, secret\nbob");
        match result {
            Err(Error::MalformedRecord {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("Expected malformed record, got {:?}", other),
        }

        let result: Result<Vec<Pair>> = parse("a, b, c");
        assert!(matches!(result, Err(Error::MalformedRecord { found: 3, .. })));
    }

    #[test]
    fn test_serialize_has_no_trailing_newline() {
        let pairs = vec![Pair("a".into(), "1".into()), Pair("b".into(), "2".into())];
        assert_eq!(serialize(&pairs), "a, 1\nb, 2");
        assert_eq!(serialize::<Pair, _>(&[]), "");
    }

    #[test]
    fn test_save_and_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.txt");

        assert!(ensure_exists(&path).unwrap());
        assert!(!ensure_exists(&path).unwrap());
        assert!(load::<Pair>(&path).unwrap().is_empty());

        let pairs = vec![Pair("x".into(), "y,z".into())];
        save(&path, &pairs).unwrap();
        assert_eq!(load::<Pair>(&path).unwrap(), pairs);
    }

    #[test]
    fn test_is_storable() {
        assert!(is_storable("plain"));
        assert!(is_storable("a,b"));
        assert!(!is_storable("a, b"));
        assert!(!is_storable("line\nbreak"));
    }
}

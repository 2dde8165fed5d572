//! Reading video references from a CSV list

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Header of the column holding the video URL
pub const URL_COLUMN: &str = "URL";

#[derive(Debug, Error)]
pub enum ReferenceListError {
    #[error("failed to open {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {}", .path.display(), .source)]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub fn read_reference_list(path: &Path) -> Result<Vec<String>, ReferenceListError> {
    let file = File::open(path).map_err(|source| ReferenceListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reference_list(file).map_err(|source| ReferenceListError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-empty values of the `URL` column, in row order.
///
/// Rows without the field never reach the aggregator; a file without the
/// column yields an empty list.
pub fn parse_reference_list<R: Read>(reader: R) -> Result<Vec<String>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let Some(column) = rdr.headers()?.iter().position(|h| h == URL_COLUMN) else {
        tracing::warn!(column = URL_COLUMN, "reference list has no URL column");
        return Ok(Vec::new());
    };

    let mut urls = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        match record.get(column).filter(|v| !v.is_empty()) {
            Some(url) => urls.push(url.to_string()),
            None => tracing::debug!(row = row + 1, "row has no URL, skipping"),
        }
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_url_column() {
        let csv = "URL\nhttps://youtu.be/a?si=1\nhttps://www.youtube.com/watch?v=b\n";
        let urls = parse_reference_list(csv.as_bytes()).unwrap();
        assert_eq!(
            urls,
            vec!["https://youtu.be/a?si=1", "https://www.youtube.com/watch?v=b"]
        );
    }

    #[test]
    fn test_rows_without_url_are_dropped() {
        let csv = "Title,URL\nFirst,https://youtu.be/a\nNo link,\nShort row\nLast,  https://youtu.be/c  \n";
        let urls = parse_reference_list(csv.as_bytes()).unwrap();
        assert_eq!(urls, vec!["https://youtu.be/a", "https://youtu.be/c"]);
    }

    #[test]
    fn test_missing_column_yields_nothing() {
        let csv = "Link\nhttps://youtu.be/a\n";
        assert!(parse_reference_list(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_reference_list(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, ReferenceListError::Io { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("youtube_urls.csv");
        std::fs::write(&path, "URL\r\nhttps://youtu.be/x\r\n").unwrap();
        assert_eq!(read_reference_list(&path).unwrap(), vec!["https://youtu.be/x"]);
    }
}

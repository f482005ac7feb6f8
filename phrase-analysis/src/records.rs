use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use language_utils::PhraseRecord;

/// Read JSONL phrase records, skipping blank and malformed lines.
///
/// A line that is not valid UTF-8 counts as malformed.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<PhraseRecord>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open records file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_number, line) in reader.split(b'\n').enumerate() {
        let line_number = line_number + 1;
        let bytes = line.with_context(|| format!("Failed to read {}", path.display()))?;
        let Ok(line) = std::str::from_utf8(&bytes) else {
            log::warn!("Skipping record on line {line_number}: not valid UTF-8");
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<PhraseRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping malformed record on line {line_number}: {e}"),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_skips_invalid_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"source_phrase": "carpe diem", "translation": "seize the day"}"#)
            .unwrap();
        file.write_all(b"\n\xff\xfe bad\n\n{not json}\r\n").unwrap();
        file.write_all(br#"{"latin_phrase": "alea iacta est", "translation": "the die is cast"}"#)
            .unwrap();
        file.flush().unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(
            records,
            vec![
                PhraseRecord::new("carpe diem", "seize the day"),
                PhraseRecord::new("alea iacta est", "the die is cast"),
            ]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_records(&dir.path().join("missing.jsonl")).is_err());
    }
}

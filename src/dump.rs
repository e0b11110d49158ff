use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DumpError {
    /// The input dump could not be opened or was not valid UTF-8.
    #[error("unable to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to write output: {0}")]
    Write(#[from] io::Error),
    #[error("unable to serialise records: {0}")]
    Serialise(#[from] serde_json::Error),
}

/// Why a single dump line did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("expected 2 columns, found {found}")]
    ColumnCount { found: usize },
    #[error("{field} is not a valid guid: {value:?}")]
    InvalidGuid { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome<T> {
    Accepted(T),
    Rejected(Rejection),
}

impl<T> LineOutcome<T> {
    pub fn accepted(self) -> Option<T> {
        match self {
            LineOutcome::Accepted(record) => Some(record),
            LineOutcome::Rejected(_) => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, LineOutcome::Accepted(_))
    }
}

/// Collects the accepted records, keeping their line order.
pub fn accepted<T>(outcomes: impl IntoIterator<Item = LineOutcome<T>>) -> Vec<T> {
    outcomes
        .into_iter()
        .filter_map(LineOutcome::accepted)
        .collect()
}

/// A line-oriented dump format that converts into a list of unlock records.
pub trait Conversion {
    /// File read when no input path is given.
    const DEFAULT_INPUT: &'static str;

    /// What a single valid line parses into.
    type Parsed;
    /// What ends up in the JSON document.
    type Record: Serialize;

    fn parse_line(line: &str) -> LineOutcome<Self::Parsed>;

    /// Turns the accepted lines into the records that get written.
    fn finish(accepted: Vec<Self::Parsed>) -> Vec<Self::Record>;

    fn outcomes<S: AsRef<str>>(lines: &[S]) -> Vec<LineOutcome<Self::Parsed>> {
        lines
            .iter()
            .map(|line| Self::parse_line(line.as_ref()))
            .collect()
    }

    fn convert<S: AsRef<str>>(lines: &[S]) -> Vec<Self::Record> {
        Self::finish(accepted(Self::outcomes(lines)))
    }
}

/// Counts reported after a conversion has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub lines: usize,
    pub rejected: usize,
    pub written: usize,
}

pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, DumpError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|source| DumpError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents.lines().map(str::to_owned).collect())
}

/// Writes `records` as one compact JSON array followed by a newline.
pub fn write_json<T: Serialize, W: Write>(records: &[T], mut writer: W) -> Result<(), DumpError> {
    serde_json::to_writer(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Reads `input`, converts it with `C` and writes the JSON document to `writer`.
///
/// Nothing is written if the input cannot be read. Rejected lines are only
/// reported through `tracing`, so output stays silent unless a subscriber is
/// installed.
pub fn run_conversion<C: Conversion, W: Write>(
    input: &Path,
    writer: W,
) -> Result<Summary, DumpError> {
    let lines = read_lines(input)?;
    let outcomes = C::outcomes(&lines);

    let mut summary = Summary {
        lines: lines.len(),
        ..Default::default()
    };

    for (i, outcome) in outcomes.iter().enumerate() {
        if let LineOutcome::Rejected(reason) = outcome {
            summary.rejected += 1;
            debug!(line = i + 1, "skipping line: {reason}");
        }
    }

    let records = C::finish(accepted(outcomes));
    summary.written = records.len();

    write_json(&records, writer)?;

    info!(
        "{}: {} lines, {} rejected, {} records written",
        input.display(),
        summary.lines,
        summary.rejected,
        summary.written
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Echo {
        value: String,
    }

    struct EchoDump;

    impl Conversion for EchoDump {
        const DEFAULT_INPUT: &'static str = "echo.txt";

        type Parsed = String;
        type Record = Echo;

        fn parse_line(line: &str) -> LineOutcome<String> {
            if line.is_empty() {
                LineOutcome::Rejected(Rejection::ColumnCount { found: 0 })
            } else {
                LineOutcome::Accepted(line.to_owned())
            }
        }

        fn finish(accepted: Vec<String>) -> Vec<Echo> {
            accepted.into_iter().map(|value| Echo { value }).collect()
        }
    }

    #[test]
    fn read_lines_strips_terminators() -> Result<(), DumpError> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "first\r\nsecond\nthird")?;

        assert_eq!(read_lines(file.path())?, vec!["first", "second", "third"]);

        Ok(())
    }

    #[test]
    fn missing_input_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("skins.txt");

        let mut out = vec![];
        let err = run_conversion::<EchoDump, _>(&missing, &mut out).unwrap_err();

        assert!(matches!(err, DumpError::Read { ref path, .. } if *path == missing));
        assert!(out.is_empty());
    }

    #[test]
    fn write_json_is_compact_with_trailing_newline() -> Result<(), DumpError> {
        let mut out = vec![];
        write_json(
            &[Echo {
                value: "a b".to_string(),
            }],
            &mut out,
        )?;

        assert_eq!(String::from_utf8(out).unwrap(), "[{\"value\":\"a b\"}]\n");

        Ok(())
    }

    #[test]
    fn empty_record_list_writes_empty_array() -> Result<(), DumpError> {
        let mut out = vec![];
        write_json::<Echo, _>(&[], &mut out)?;

        assert_eq!(out, b"[]\n");

        Ok(())
    }

    #[test]
    fn run_conversion_counts_rejections() -> Result<(), DumpError> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "one\n\ntwo\n")?;

        let mut out = vec![];
        let summary = run_conversion::<EchoDump, _>(file.path(), &mut out)?;

        assert_eq!(
            summary,
            Summary {
                lines: 3,
                rejected: 1,
                written: 2,
            }
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[{\"value\":\"one\"},{\"value\":\"two\"}]\n"
        );

        Ok(())
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn diagnostics_do_not_change_output() -> Result<(), DumpError> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "one\n\ntwo\n")?;

        let mut silent = vec![];
        run_conversion::<EchoDump, _>(file.path(), &mut silent)?;

        let log = CapturedLog::default();
        let make_writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || make_writer.clone())
            .finish();

        let mut verbose = vec![];
        tracing::subscriber::with_default(subscriber, || {
            run_conversion::<EchoDump, _>(file.path(), &mut verbose)
        })?;

        assert_eq!(silent, verbose);

        let log = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();

        assert!(log.contains("skipping line: expected 2 columns, found 0"));
        assert!(log.contains("line=2"));
        assert!(log.contains("3 lines, 1 rejected, 2 records written"));

        Ok(())
    }

    #[test]
    fn accepted_keeps_order() {
        let outcomes = vec![
            LineOutcome::Accepted(1),
            LineOutcome::Rejected(Rejection::ColumnCount { found: 3 }),
            LineOutcome::Accepted(2),
        ];

        assert!(outcomes[0].is_accepted());
        assert!(!outcomes[1].is_accepted());
        assert_eq!(accepted(outcomes), vec![1, 2]);
    }
}

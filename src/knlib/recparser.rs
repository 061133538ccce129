use crate::knlib::{Record, NUM_FEATURES};
use std::{
    fs::File,
    io::{self, BufRead},
    path::{Path, PathBuf},
};
use thiserror::Error;

type FileHandler = io::Result<io::Lines<io::BufReader<File>>>;

fn read_lines<P>(filename: P) -> FileHandler
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}:{line} needs {expected} numeric features")]
    MissingFeature {
        path: PathBuf,
        line: usize,
        expected: usize,
    },

    #[error("{path}:{line} feature `{token}` is not a number")]
    BadFeature {
        path: PathBuf,
        line: usize,
        token: String,
    },
}

pub struct RecordParser {
    /* Reads whitespace delimited records: four floats and an optional label.
    Blank lines are skipped and anything after the label is ignored */
    file: PathBuf,
}

impl RecordParser {
    pub fn new(path: &Path) -> Self {
        Self {
            file: path.to_path_buf(),
        }
    }

    pub fn parse(&self) -> Result<Vec<Record>, ParseError> {
        let lines = read_lines(&self.file).map_err(|source| ParseError::Io {
            path: self.file.clone(),
            source,
        })?;

        let mut records = Vec::new();
        for (lineno, line) in lines.enumerate() {
            let line = line.map_err(|source| ParseError::Io {
                path: self.file.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(self.parse_line(&line, lineno + 1)?);
        }

        info!("read {} records from {}", records.len(), self.file.display());
        Ok(records)
    }

    fn parse_line(&self, line: &str, lineno: usize) -> Result<Record, ParseError> {
        let mut tokens = line.split_whitespace();
        let mut features = [0.0; NUM_FEATURES];

        for feat in features.iter_mut() {
            let token = tokens.next().ok_or_else(|| ParseError::MissingFeature {
                path: self.file.clone(),
                line: lineno,
                expected: NUM_FEATURES,
            })?;
            *feat = match token.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    return Err(ParseError::BadFeature {
                        path: self.file.clone(),
                        line: lineno,
                        token: token.to_string(),
                    })
                }
            };
        }

        let label = tokens.next().map(String::from);
        if tokens.next().is_some() {
            debug!("ignoring trailing tokens on line {}", lineno);
        }

        Ok(Record::new(features, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("knnkm_{}_{}", std::process::id(), name));
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_records() {
        let path = write_tmp(
            "ok.txt",
            "5.1 3.5 1.4 0.2 Iris-setosa\n\n   \n6.7\t3.1 4.4 1.4\n4.9 3.0 1.4 0.2 Iris-setosa extra\n",
        );
        let recs = RecordParser::new(&path).parse().unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].features, [5.1, 3.5, 1.4, 0.2]);
        assert_eq!(recs[0].given_label.as_deref(), Some("Iris-setosa"));
        assert_eq!(recs[1].given_label, None);
        assert_eq!(recs[2].given_label.as_deref(), Some("Iris-setosa"));
        assert!(recs.iter().all(|r| r.assigned_class.is_none()));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn short_line() {
        let path = write_tmp("short.txt", "5.1 3.5 1.4 0.2 A\n\n5.1 3.5 1.4\n");
        match RecordParser::new(&path).parse() {
            Err(ParseError::MissingFeature { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected {:?}", other),
        }
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn non_numeric() {
        let path = write_tmp("nan.txt", "5.1 abc 1.4 0.2 A\n");
        match RecordParser::new(&path).parse() {
            Err(ParseError::BadFeature { line, token, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected {:?}", other),
        }
        std::fs::remove_file(path).unwrap();

        let path = write_tmp("inf.txt", "5.1 inf 1.4 0.2 A\n");
        assert!(RecordParser::new(&path).parse().is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("knnkm_does_not_exist.txt");
        assert!(matches!(
            RecordParser::new(&path).parse(),
            Err(ParseError::Io { .. })
        ));
    }
}

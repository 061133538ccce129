use crate::knlib::{metrics, Record, Summary, FEATURE_NAMES};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Text report of a run: result tables followed by the summary block
pub struct Report {
    text: String,
}

fn table_header(last_column: &str) -> String {
    let mut cols = vec!["No."];
    cols.extend(FEATURE_NAMES);
    cols.push("label");
    cols.push(last_column);
    cols.join("  ")
}

fn table_row(index: usize, rec: &Record, last_value: &str) -> String {
    let mut cols = vec![format!("{:02}", index + 1)];
    cols.extend(rec.features.iter().map(|f| format!("{:?}", f)));
    cols.push(rec.given_label_display().to_string());
    cols.push(last_value.to_string());
    cols.join("  ")
}

impl Report {
    pub fn new(training: &[Record], test: &[Record], summary: &Summary) -> Self {
        let mut text = String::new();

        if summary.k.is_some() {
            text.push_str("========== Results of classification (test set) ==========\n");
            text.push_str(&table_header("classified_class"));
            text.push('\n');
            for (idx, rec) in test.iter().enumerate() {
                text.push_str(&table_row(idx, rec, &rec.class_display()));
                if rec.is_mismatched() {
                    text.push_str("    # classification mismatched");
                }
                text.push('\n');
            }
        }

        if summary.iterations.is_some() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str("========== Results of clustering (training set) ==========\n");
            text.push_str(&table_header("clustered_class"));
            text.push('\n');
            for (idx, rec) in training.iter().enumerate() {
                text.push_str(&table_row(idx, rec, &rec.cluster_display()));
                text.push('\n');
            }
        }

        text.push_str(&Self::summary_block(summary));
        Self { text }
    }

    fn summary_block(summary: &Summary) -> String {
        // writing into a String can't fail
        let mut s = String::new();
        let _ = writeln!(s, "\n======================= Summary =======================");
        if let Some(k) = summary.k {
            let _ = writeln!(s, "K Value: {}", k);
        }
        let _ = writeln!(s, "Training data size: {}", summary.training_size);
        let _ = writeln!(s, "Test data size: {}", summary.test_size);
        if summary.k.is_some() {
            let _ = writeln!(
                s,
                "Number of mismatched classification: {}",
                summary.mismatches
            );
            match metrics::accuracy(summary.test_size, summary.mismatches) {
                Some(acc) => {
                    let _ = writeln!(s, "Classification accuracy: {}%", acc);
                }
                None => {
                    let _ = writeln!(s, "Classification accuracy: n/a");
                }
            }
        }
        if let Some(iterations) = summary.iterations {
            let _ = writeln!(s, "Iterations of k-means clustering: {}", iterations);
            for (i, size) in summary.cluster_sizes.iter().enumerate() {
                let _ = writeln!(s, "cluster_{}: {} records", i + 1, size);
            }
        }
        s
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Write the report to `path`, replacing any existing file
    pub fn write(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.text.as_bytes())?;
        writer.flush()
    }
}

//! The results script.
//!
//! The output is a small JavaScript file meant to be pasted into the browser console of the
//! grading UI. It has two regions:
//!
//! 1. `scoreMap = {};` followed by one audit comment and one assignment per graded member.
//! 2. A fixed trailer that copies every score onto the table row whose link text matches the
//!    display name, then logs the names that were not found.
//!
//! [`ResultsFile`] owns that file for the length of a run: [`ResultsFile::initialize`] truncates
//! it and writes the header, [`ResultsFile::append`] / [`ResultsFile::append_all`] reopen it in
//! append mode, and [`ResultsFile::finalize`] consumes the handle after writing the trailer.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use marker::GradeExtract;
use serde::Serialize;

/// First line of every results file.
pub const HEADER: &str = "scoreMap = {};\n";

/// Fixed patch script appended after the last record.
pub const PATCH_SCRIPT: &str = r#"as = document.getElementsByTagName("a");
for (i = 0; i < as.length; i++) {
    var score = scoreMap[as.item(i).innerText];
    if (score != undefined) {
        console.log("Setting score of " + as.item(i).innerText + " to " + score);
        as.item(i).parentElement.parentElement.childNodes[4].getElementsByTagName("input")[0].value = score
        delete scoreMap[as.item(i).innerText];
    }
}
console.log("Scores which were not set:")
console.log(scoreMap)
"#;

/// One member's result, as written to the score map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub username: String,
    pub display_name: String,
    pub tests_passed: u32,
    pub tests_total: u32,
    pub raw_score: u32,
    pub final_score: u32,
}

impl ResultRecord {
    pub fn new(username: &str, display_name: &str, extract: &GradeExtract, final_score: u32) -> Self {
        Self {
            username: username.to_string(),
            display_name: display_name.to_string(),
            tests_passed: extract.tests_passed,
            tests_total: extract.tests_total,
            raw_score: extract.raw_score,
            final_score,
        }
    }

    /// The two lines this record contributes to the file.
    fn render(&self) -> String {
        // The display name is emitted as a JSON string literal, which is also a valid JS one.
        let key = serde_json::Value::String(self.display_name.clone());
        format!(
            "// {};{};{};{};{}\nscoreMap[{key}] = {};\n",
            single_line(&self.username),
            single_line(&self.display_name),
            self.tests_passed,
            self.tests_total,
            self.raw_score,
            self.final_score,
        )
    }
}

fn single_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

/// Owned handle on the results file of one run.
#[derive(Debug)]
pub struct ResultsFile {
    path: PathBuf,
}

impl ResultsFile {
    /// Create or truncate `path` and write the empty score map.
    pub fn initialize(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let mut file = File::create(&path)?;
        file.write_all(HEADER.as_bytes())?;
        file.flush()?;
        tracing::debug!(path = %path.display(), "initialised results file");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single record.
    pub fn append(&self, record: &ResultRecord) -> io::Result<()> {
        self.append_all(std::slice::from_ref(record))
    }

    /// Append several records with one open of the file.
    pub fn append_all(&self, records: &[ResultRecord]) -> io::Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut out = BufWriter::new(file);
        for record in records {
            out.write_all(record.render().as_bytes())?;
        }
        out.flush()
    }

    /// Append the patch script. The handle is consumed; nothing may be written afterwards.
    pub fn finalize(self) -> io::Result<PathBuf> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(PATCH_SCRIPT.as_bytes())?;
        file.flush()?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(name: &str, display: &str, final_score: u32) -> ResultRecord {
        ResultRecord::new(name, display, &GradeExtract::new(9, 10, 70), final_score)
    }

    /// A run without records still yields a complete, valid script.
    #[test]
    fn test_empty_run_has_header_and_trailer() {
        let dir = tempfile::tempdir().unwrap();
        let file = ResultsFile::initialize(dir.path().join("results_a_b.js")).unwrap();
        let path = file.finalize().unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, format!("{HEADER}{PATCH_SCRIPT}"));
    }

    #[test]
    fn test_record_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = ResultsFile::initialize(dir.path().join("r.js")).unwrap();
        file.append(&record("alice", "Alice Liddell", 70)).unwrap();
        let path = file.finalize().unwrap();

        let contents = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "scoreMap = {};");
        assert_eq!(lines[1], "// alice;Alice Liddell;9;10;70");
        assert_eq!(lines[2], "scoreMap[\"Alice Liddell\"] = 70;");
        assert_eq!(lines[3], "as = document.getElementsByTagName(\"a\");");
        assert!(contents.ends_with("console.log(scoreMap)\n"));
    }

    /// Appends accumulate in call order and never rewrite what is already there.
    #[test]
    fn test_appends_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let file = ResultsFile::initialize(dir.path().join("r.js")).unwrap();
        file.append_all(&[record("a", "A", 1), record("b", "B", 2)]).unwrap();
        file.append_all(&[]).unwrap();
        file.append(&record("c", "C", 3)).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        let assignments: Vec<&str> = contents
            .lines()
            .filter(|l| l.starts_with("scoreMap["))
            .collect();
        assert_eq!(
            assignments,
            vec![
                "scoreMap[\"A\"] = 1;",
                "scoreMap[\"B\"] = 2;",
                "scoreMap[\"C\"] = 3;"
            ]
        );
    }

    #[test]
    fn test_initialize_truncates_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.js");
        fs::write(&path, "stale content\n").unwrap();
        let file = ResultsFile::initialize(&path).unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), HEADER);
    }

    #[test]
    fn test_display_names_are_escaped() {
        let rendered = record("o", "O'Brien \"Bo\"\nJr", 5).render();
        assert!(rendered.starts_with("// o;O'Brien \"Bo\" Jr;9;10;70\n"));
        assert!(rendered.ends_with("scoreMap[\"O'Brien \\\"Bo\\\"\\nJr\"] = 5;\n"));
    }

    #[test]
    fn test_initialize_fails_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResultsFile::initialize(dir.path().join("nope").join("r.js")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_append_after_file_removed_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = ResultsFile::initialize(dir.path().join("r.js")).unwrap();
        fs::remove_file(file.path()).unwrap();
        assert!(file.append(&record("a", "A", 1)).is_err());
    }
}

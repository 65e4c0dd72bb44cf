use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Course file for `course`:  {dir}/{course}.json
pub fn course_config_path(dir: &Path, course: &str) -> PathBuf {
    dir.join(format!("{course}.json"))
}

/// File name of the score script for an assignment path.
/// Example: `algdat/ss24/blatt01` → `results_algdat_ss24_blatt01.js`
pub fn results_file_name(assignment_path: &str) -> String {
    format!("results_{}.js", assignment_path.replace('/', "_"))
}

/// Full path of the score script inside `output_dir` (does not create).
pub fn results_file_path(output_dir: &Path, assignment_path: &str) -> PathBuf {
    output_dir.join(results_file_name(assignment_path))
}

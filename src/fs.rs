//! Filesystem helpers: tree scanning, touch, fixture comparison and
//! YAML document loading.

use std::fs::{self, File, FileTimes, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob_match::glob_match;
use tracing::debug;

use crate::error::Ga4ghError;
use crate::Result;

/// Default location of the scripts' authentication file.
pub const DEFAULT_AUTH_FILE: &str = "scripts/auth.yml";

/// Recursively collect files under `root` whose file name matches any of
/// the glob `patterns` (e.g. `*.bam`, `*.vcf.gz`).
///
/// Results are sorted lexicographically unless `sort` is false, in which
/// case they come back in walk order. Symlinked directories are not
/// followed.
pub fn find_files_matching<P: AsRef<str>>(
    root: impl AsRef<Path>,
    patterns: &[P],
    sort: bool,
) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root.as_ref(), patterns, &mut found)?;
    if sort {
        found.sort();
    }
    debug!(root = %root.as_ref().display(), count = found.len(), "scanned directory tree");
    Ok(found)
}

fn walk<P: AsRef<str>>(dir: &Path, patterns: &[P], found: &mut Vec<PathBuf>) -> Result<()> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            subdirs.push(path);
            continue;
        }
        // A symlink to a directory is listed but not descended into.
        if file_type.is_symlink() && path.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if patterns.iter().any(|p| glob_match(p.as_ref(), &name)) {
            found.push(path);
        }
    }
    for subdir in subdirs {
        walk(&subdir, patterns, found)?;
    }
    Ok(())
}

/// Create an empty file at `path`, or update its access and modification
/// times if it already exists.
///
/// Existing paths are opened read-only, so read-only files and (on Unix)
/// directories can be touched too.
pub fn touch(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = if path.exists() {
        File::open(path)?
    } else {
        OpenOptions::new().create(true).append(true).open(path)?
    };
    let now = SystemTime::now();
    file.set_times(FileTimes::new().set_accessed(now).set_modified(now))?;
    Ok(())
}

/// Fail with `AssertionFailure` unless both files have the same lines.
///
/// Line terminators are part of the comparison, so a missing trailing
/// newline is a difference.
pub fn assert_file_contents_identical(a: impl AsRef<Path>, b: impl AsRef<Path>) -> Result<()> {
    let (a, b) = (a.as_ref(), b.as_ref());
    let lines_a = read_lines(a)?;
    let lines_b = read_lines(b)?;

    if lines_a.len() != lines_b.len() {
        return Err(Ga4ghError::AssertionFailure(format!(
            "{} has {} lines but {} has {}",
            a.display(),
            lines_a.len(),
            b.display(),
            lines_b.len()
        )));
    }
    if let Some((n, (left, right))) = lines_a
        .iter()
        .zip(&lines_b)
        .enumerate()
        .find(|(_, (left, right))| left != right)
    {
        return Err(Ga4ghError::AssertionFailure(format!(
            "line {} differs: {left:?} != {right:?}",
            n + 1
        )));
    }
    Ok(())
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    lines_with_endings(BufReader::new(File::open(path)?))
}

fn lines_with_endings(mut reader: impl BufRead) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(lines);
        }
        lines.push(line);
    }
}

/// Parse a YAML file into a generic document.
pub fn get_yaml_document(path: impl AsRef<Path>) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path.as_ref())?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Load the authentication YAML, from [`DEFAULT_AUTH_FILE`] unless a path
/// is given.
pub fn get_auth_values(path: Option<&Path>) -> Result<serde_yaml::Value> {
    get_yaml_document(path.unwrap_or_else(|| Path::new(DEFAULT_AUTH_FILE)))
}

/// Rewind `stream` and read all of its lines, keeping line terminators.
pub fn read_log_lines<S: Read + Seek>(stream: &mut S) -> Result<Vec<String>> {
    stream.seek(SeekFrom::Start(0))?;
    lines_with_endings(BufReader::new(stream))
}

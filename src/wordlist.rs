//! Word loading - input wordlists, blacklists and common-word files

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{PassForgeError, Result};

/// One place to read words from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// Trimmed, non-empty lines of a reader
pub fn load_words<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Words of a single file
pub fn load_file(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .map_err(|e| PassForgeError::io(e.to_string(), Some(path.display().to_string())))?;
    load_words(BufReader::new(file))
}

fn glob_to_regex(pattern: &str) -> Option<Regex> {
    let mut re = String::from("^");
    let mut in_class = false;
    for ch in pattern.chars() {
        match ch {
            '*' if !in_class => re.push_str(".*"),
            '?' if !in_class => re.push('.'),
            '[' if !in_class => {
                in_class = true;
                re.push('[');
            }
            ']' if in_class => {
                in_class = false;
                re.push(']');
            }
            '!' if in_class && re.ends_with('[') => re.push('^'),
            c if in_class => re.push(c),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re).ok()
}

/// Expand one file-name pattern (`*`, `?`, `[..]` in the last component)
fn expand_pattern(pattern: &str) -> Vec<PathBuf> {
    let path = Path::new(pattern);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return Vec::new();
    };
    let Some(matcher) = glob_to_regex(name) else {
        tracing::warn!(pattern = %pattern, "Invalid file pattern");
        return Vec::new();
    };

    let Ok(entries) = std::fs::read_dir(&dir) else {
        return Vec::new();
    };
    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|n| matcher.is_match(n))
        })
        .map(|entry| dir.join(entry.file_name()))
        .collect();
    matches.sort();
    matches
}

/// Turn a comma-separated input list into sources.
///
/// An empty spec or `-` means stdin; parts containing `*?[]` are expanded
/// against the file system.
pub fn parse_inputs(spec: &str) -> Vec<InputSource> {
    let spec = spec.trim();
    if spec.is_empty() || spec == "-" {
        return vec![InputSource::Stdin];
    }

    let mut sources = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if part == "-" {
            sources.push(InputSource::Stdin);
        } else if part.contains(['*', '?', '[', ']']) {
            let matches = expand_pattern(part);
            if matches.is_empty() {
                tracing::warn!(pattern = %part, "Pattern matched no files");
            }
            sources.extend(matches.into_iter().map(InputSource::File));
        } else {
            sources.push(InputSource::File(PathBuf::from(part)));
        }
    }
    sources
}

/// Drop stdin from `sources` when it is an interactive terminal.
///
/// Piped or redirected stdin is kept; a terminal would block waiting for
/// the user to type a wordlist.
pub fn skip_interactive_stdin(sources: Vec<InputSource>, stdin_is_terminal: bool) -> Vec<InputSource> {
    if !stdin_is_terminal {
        return sources;
    }
    sources
        .into_iter()
        .filter(|source| {
            let keep = *source != InputSource::Stdin;
            if !keep {
                tracing::warn!("Stdin is a terminal, not reading words from it");
            }
            keep
        })
        .collect()
}

/// Read every source in order; unreadable files are logged and skipped
pub fn load_inputs<R: BufRead>(sources: &[InputSource], mut stdin: R) -> Vec<String> {
    let mut words = Vec::new();
    for source in sources {
        let loaded = match source {
            InputSource::Stdin => load_words(&mut stdin),
            InputSource::File(path) => load_file(path),
        };
        match loaded {
            Ok(mut batch) => {
                tracing::debug!(source = ?source, words = batch.len(), "Loaded input");
                words.append(&mut batch);
            }
            Err(e) => tracing::warn!(source = ?source, error = %e, "Skipping unreadable input"),
        }
    }
    words
}

/// Exact-match exclusion set; any read failure is fatal
pub fn load_blacklist(path: &Path) -> Result<HashSet<String>> {
    let file = File::open(path)
        .map_err(|e| PassForgeError::blacklist(path.display().to_string(), e.to_string()))?;
    let words = load_words(BufReader::new(file))
        .map_err(|e| PassForgeError::blacklist(path.display().to_string(), e.to_string()))?;
    tracing::debug!(path = %path.display(), entries = words.len(), "Loaded blacklist");
    Ok(words.into_iter().collect())
}

/// Common words from a file, or the built-in list when `path` is `None`
pub fn load_common_words(path: Option<&Path>) -> Result<Vec<String>> {
    match path {
        Some(path) => load_file(path),
        None => Ok(crate::types::BUILTIN_COMMON_WORDS
            .iter()
            .map(|w| w.to_string())
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_words_trims_and_skips_blank() {
        let words = load_words(Cursor::new("  cat \n\n\tdog\n   \nbird")).unwrap();
        assert_eq!(words, vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn test_parse_inputs() {
        assert_eq!(parse_inputs(""), vec![InputSource::Stdin]);
        assert_eq!(parse_inputs("-"), vec![InputSource::Stdin]);
        assert_eq!(
            parse_inputs("a.txt, b.txt"),
            vec![
                InputSource::File(PathBuf::from("a.txt")),
                InputSource::File(PathBuf::from("b.txt")),
            ]
        );
    }

    #[test]
    fn test_terminal_stdin_is_skipped() {
        let sources = vec![InputSource::Stdin, InputSource::File(PathBuf::from("a.txt"))];
        assert_eq!(
            skip_interactive_stdin(sources.clone(), true),
            vec![InputSource::File(PathBuf::from("a.txt"))]
        );
        assert_eq!(skip_interactive_stdin(sources.clone(), false), sources);
        assert!(skip_interactive_stdin(parse_inputs(""), true).is_empty());
    }

    #[test]
    fn test_glob_expansion() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "one.txt", "a");
        write_file(&dir, "two.txt", "b");
        write_file(&dir, "skip.log", "c");

        let pattern = format!("{}/*.txt", dir.path().display());
        let sources = parse_inputs(&pattern);
        assert_eq!(sources.len(), 2);

        let words = load_inputs(&sources, Cursor::new(""));
        assert_eq!(words, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let good = write_file(&dir, "good.txt", "pass\nword\n");
        let sources = vec![
            InputSource::File(dir.path().join("missing.txt")),
            InputSource::File(good),
            InputSource::Stdin,
        ];
        let words = load_inputs(&sources, Cursor::new("piped\n"));
        assert_eq!(words, vec!["pass", "word", "piped"]);
    }

    #[test]
    fn test_blacklist() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "common.txt", "123456\npassword\n\n");
        let blacklist = load_blacklist(&path).unwrap();
        assert_eq!(blacklist.len(), 2);
        assert!(blacklist.contains("password"));

        let err = load_blacklist(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, PassForgeError::Blacklist { .. }));
    }

    #[test]
    fn test_common_words() {
        assert_eq!(load_common_words(None).unwrap(), vec!["pw", "pwd", "admin", "sys"]);
    }
}

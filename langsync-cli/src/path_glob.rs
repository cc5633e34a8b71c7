use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;

fn has_glob_meta(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
}

/// Directory part of a pattern before its first glob meta-character.
fn walk_root(pattern: &str) -> PathBuf {
    let end = pattern
        .find(['*', '?', '[', '{'])
        .unwrap_or(pattern.len());
    let prefix = Path::new(&pattern[..end]);
    if prefix.is_dir() {
        return prefix.to_path_buf();
    }
    match prefix.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Walked paths lose their leading `./`, so patterns must too.
fn strip_dot_slash(pattern: &str) -> &str {
    let mut pattern = pattern;
    while let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest;
    }
    pattern
}

fn build_glob_set(patterns: &[&String]) -> Result<GlobSet, String> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(strip_dot_slash(pattern))
            .literal_separator(true)
            .build()
            .map_err(|e| format!("Invalid glob pattern '{}': {}", pattern, e))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| format!("Failed to build glob set: {}", e))
}

/// Expand target arguments into concrete file paths.
///
/// Plain paths are kept as given, in order; glob patterns such as
/// `res/values-*/strings.xml` are matched with a .gitignore-aware walk.
/// A pattern that matches nothing is kept verbatim so the missing file
/// surfaces as an error later.
pub fn expand_target_globs(inputs: &[String]) -> Result<Vec<PathBuf>, String> {
    let patterns: Vec<&String> = inputs.iter().filter(|s| has_glob_meta(s)).collect();

    let mut matched: Vec<PathBuf> = Vec::new();
    if !patterns.is_empty() {
        let set = build_glob_set(&patterns)?;

        let mut roots: Vec<PathBuf> = Vec::new();
        for pattern in &patterns {
            let root = walk_root(pattern);
            if !roots.contains(&root) {
                roots.push(root);
            }
        }

        matched = roots
            .par_iter()
            .flat_map_iter(|root| {
                WalkBuilder::new(root)
                    .hidden(false)
                    .git_ignore(true)
                    .parents(true)
                    .build()
                    .filter_map(Result::ok)
                    .filter(|dent| dent.file_type().is_some_and(|t| t.is_file()))
                    .map(|dent| {
                        let path = dent.into_path();
                        match path.strip_prefix(".") {
                            Ok(relative) => relative.to_path_buf(),
                            Err(_) => path,
                        }
                    })
                    .filter(|path| set.is_match(path))
                    .collect::<Vec<_>>()
            })
            .collect();
        matched.sort();
    }

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut results = Vec::with_capacity(inputs.len() + matched.len());
    let mut globs_emitted = false;
    for input in inputs {
        if !has_glob_meta(input) || matched.is_empty() {
            if seen.insert(PathBuf::from(input)) {
                results.push(PathBuf::from(input));
            }
        } else if !globs_emitted {
            // every glob match lands at the first pattern's position
            for path in &matched {
                if seen.insert(path.clone()) {
                    results.push(path.clone());
                }
            }
            globs_emitted = true;
        }
    }
    Ok(results)
}

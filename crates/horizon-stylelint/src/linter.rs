//! Running rules over files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use horizon_stylelint_core::source::{LineIndex, Syntax, split_roots};
use horizon_stylelint_core::tree::parse_stylesheet;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::Config;
use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};
use crate::logging::targets;
use crate::rule::{Rule, RuleContext};
use crate::rules::configure_rule;

/// A configured set of rules.
#[derive(Debug, Default)]
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
}

impl Linter {
    /// Build the rules a config enables.
    ///
    /// Fails on unknown rule names and on options a rule rejects.
    pub fn new(config: &Config) -> Result<Self> {
        let mut rules = Vec::with_capacity(config.rules.len());
        for (name, setting) in &config.rules {
            if let Some(rule) = configure_rule(name, setting)? {
                rules.push(rule);
            }
        }
        tracing::debug!(target: targets::LINT, rules = rules.len(), "configured linter");
        Ok(Self { rules })
    }

    /// Use an explicit list of rules.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// The configured rules.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Lint in-memory text. `path` picks the syntax and labels diagnostics.
    ///
    /// Diagnostics come back ordered by offset.
    #[tracing::instrument(skip(self, source), target = "horizon_stylelint::lint", level = "debug")]
    pub fn lint_source(&self, path: &Path, source: &str) -> Vec<Diagnostic> {
        let file = path.display().to_string();
        let lines = LineIndex::new(source);
        let mut diagnostics = vec![];

        for root in split_roots(source, Syntax::from_path(path)) {
            let sheet = parse_stylesheet(root.text);
            let ctx = RuleContext::new(&file, source, &lines, root, &sheet);
            for rule in &self.rules {
                let before = diagnostics.len();
                rule.check(&ctx, &mut diagnostics);
                tracing::trace!(
                    target: targets::RULES,
                    rule = rule.name(),
                    found = diagnostics.len() - before,
                    "checked root at {}",
                    root.offset
                );
            }
        }

        diagnostics.sort_by_key(|d| d.location.offset);
        diagnostics
    }

    /// Read and lint one file.
    pub fn lint_file(&self, path: &Path) -> Result<Vec<Diagnostic>> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(self.lint_source(path, &source))
    }

    /// Lint files and directories in parallel.
    ///
    /// Directories are searched recursively for stylesheet and markup files
    /// (see [`collect_files`]). Results are grouped by file in path order.
    pub fn lint_paths(&self, paths: &[PathBuf]) -> Result<Vec<Diagnostic>> {
        let files = collect_files(paths)?;
        tracing::debug!(target: targets::LINT, files = files.len(), "linting");

        let results: Vec<Result<Vec<Diagnostic>>> =
            files.par_iter().map(|path| self.lint_file(path)).collect();

        let mut diagnostics = vec![];
        for result in results {
            diagnostics.extend(result?);
        }
        Ok(diagnostics)
    }
}

/// Expand `paths` into the files to lint.
///
/// Files given explicitly are always kept. Directories contribute the files
/// whose extension is one of [`Syntax::lintable_extensions`], skipping
/// hidden entries and `node_modules`. The result is sorted and deduplicated.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for path in paths {
        if !path.is_dir() {
            files.insert(path.clone());
            continue;
        }

        let walker = WalkDir::new(path)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry.file_name()));
        for entry in walker {
            let entry = entry.map_err(|source| Error::Walk {
                path: path.clone(),
                source,
            })?;
            if entry.file_type().is_file() && is_lintable(entry.path()) {
                files.insert(entry.into_path());
            }
        }
    }

    Ok(files.into_iter().collect())
}

fn is_skipped_dir(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || name == "node_modules"
}

fn is_lintable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            Syntax::lintable_extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

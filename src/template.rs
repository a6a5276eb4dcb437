use std::fs;
use std::path::{Path, PathBuf};

pub const TEMPLATE_DIR: &str = ".github";
pub const TEMPLATE_NAME: &str = "pull_request_template.md";

/// Exact spellings tried before scanning the directory.
const CANONICAL_NAMES: [&str; 2] = ["pull_request_template.md", "PULL_REQUEST_TEMPLATE.md"];

/// Finds the contributor-supplied pull request template of a repository.
pub struct TemplateLocator {
    root: PathBuf,
}

impl TemplateLocator {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Content of `.github/pull_request_template.md`, matched case-insensitively.
    ///
    /// A missing `.github` directory or template is the common case and
    /// yields `None`. Candidates that cannot be read are skipped.
    pub fn find(&self) -> Option<String> {
        let dir = self.root.join(TEMPLATE_DIR);
        if !dir.is_dir() {
            log::debug!("No {} directory in {}", TEMPLATE_DIR, self.root.display());
            return None;
        }

        for name in CANONICAL_NAMES {
            let path = dir.join(name);
            if path.is_file() {
                if let Some(content) = read(&path) {
                    return Some(content);
                }
            }
        }

        // Anything else spelled differently, e.g. `Pull_Request_Template.MD`.
        let mut candidates: Vec<PathBuf> = fs::read_dir(&dir)
            .ok()?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && is_template_name(path))
            .collect();
        candidates.sort();

        candidates.iter().find_map(|path| read(path))
    }
}

fn is_template_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.eq_ignore_ascii_case(TEMPLATE_NAME))
        .unwrap_or(false)
}

fn read(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Using pull request template {}", path.display());
            Some(content)
        }
        Err(e) => {
            log::warn!("Cannot read {}: {}", path.display(), e);
            None
        }
    }
}

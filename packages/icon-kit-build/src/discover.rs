use std::{
    fmt,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    config::CategorySource,
    icon::{IconDescriptor, Layout, ParseError},
};

/// A file that was found but could not become an icon.
#[derive(Debug)]
pub enum Diagnostic {
    Unparsable { path: PathBuf, error: ParseError },
    Unreadable { path: PathBuf, message: String },
}

impl Diagnostic {
    pub fn path(&self) -> &Path {
        match self {
            Self::Unparsable { path, .. } | Self::Unreadable { path, .. } => path,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparsable { path, error } => {
                write!(f, "skipped {}: {error}", path.display())
            }
            Self::Unreadable { path, message } => {
                write!(f, "could not read {}: {message}", path.display())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Discovery {
    pub icons: Vec<IconDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Walks every category root and parses each file whose path contains
/// `extension`. Missing roots contribute nothing.
pub fn discover(categories: &[CategorySource], extension: &str, layout: &Layout) -> Discovery {
    let mut discovery = Discovery::default();
    for category in categories {
        if !category.root.exists() {
            debug!(
                "no sources for category {} at {}",
                category.name,
                category.root.display()
            );
            continue;
        }
        let before = discovery.icons.len();
        walk(&category.root, extension, layout, &mut discovery);
        debug!(
            "found {} icons in category {}",
            discovery.icons.len() - before,
            category.name
        );
    }
    discovery
}

fn walk(root: &Path, extension: &str, layout: &Layout, discovery: &mut Discovery) {
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                let path = error.path().unwrap_or(root).to_path_buf();
                warn!("could not read {}: {error}", path.display());
                discovery.diagnostics.push(Diagnostic::Unreadable {
                    path,
                    message: error.to_string(),
                });
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.into_path();
        if !path.to_string_lossy().contains(extension) {
            continue;
        }
        match IconDescriptor::parse(&path, layout) {
            Ok(icon) => discovery.icons.push(icon),
            Err(error) => {
                warn!("skipping {}: {error}", path.display());
                discovery
                    .diagnostics
                    .push(Diagnostic::Unparsable { path, error });
            }
        }
    }
}

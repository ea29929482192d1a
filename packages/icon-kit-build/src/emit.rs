use std::{
    collections::BTreeMap,
    fs::{self, OpenOptions},
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, error};

use crate::{
    icon::IconDescriptor,
    templates::{TemplateKind, TemplateSet},
};

pub struct EmitFailure {
    pub folder: PathBuf,
    pub error: anyhow::Error,
}

#[derive(Default)]
pub struct EmitSummary {
    pub emitted: usize,
    pub folders: usize,
    pub failures: Vec<EmitFailure>,
}

/// Emits every icon. Icons sharing an output folder (and so a stylesheet)
/// are written one after another; folders are written in parallel.
pub fn emit_all(icons: &[IconDescriptor], templates: &TemplateSet) -> EmitSummary {
    let mut groups: BTreeMap<&Path, Vec<&IconDescriptor>> = BTreeMap::new();
    for icon in icons {
        groups.entry(icon.category_path.as_path()).or_default().push(icon);
    }
    let folders = groups.len();

    let results: Vec<(usize, Option<EmitFailure>)> = groups
        .into_par_iter()
        .map(|(folder, group)| {
            let mut emitted = 0;
            for icon in group {
                if let Err(error) = emit(icon, templates) {
                    error!("failed to emit {}: {error:#}", icon.source_path.display());
                    let failure = EmitFailure {
                        folder: folder.to_path_buf(),
                        error,
                    };
                    return (emitted, Some(failure));
                }
                emitted += 1;
            }
            (emitted, None)
        })
        .collect();

    let mut summary = EmitSummary {
        folders,
        ..EmitSummary::default()
    };
    for (emitted, failure) in results {
        summary.emitted += emitted;
        summary.failures.extend(failure);
    }
    summary
}

pub fn emit(icon: &IconDescriptor, templates: &TemplateSet) -> Result<()> {
    debug!("emitting {} into {}", icon.component_name, icon.category_path.display());
    fs::create_dir_all(&icon.category_path)
        .with_context(|| format!("could not create {}", icon.category_path.display()))?;

    let asset = icon.category_path.join(&icon.raw_file_name);
    fs::copy(&icon.source_path, &asset).with_context(|| {
        format!(
            "could not copy {} to {}",
            icon.source_path.display(),
            asset.display()
        )
    })?;

    write_file(
        &icon.index_file_path,
        &templates.render(TemplateKind::Index, icon)?,
    )?;
    write_file(
        &icon.markup_file_path,
        &templates.render(TemplateKind::Markup, icon)?,
    )?;

    let rule = templates.render(TemplateKind::Style, icon)?;
    let css = &icon.css_file_path;
    if !css.exists() {
        write_file(css, templates.style_header())?;
    }
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(css)
        .with_context(|| format!("could not open {}", css.display()))?;
    file.write_all(rule.as_bytes())
        .with_context(|| format!("could not append to {}", css.display()))?;
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("could not write {}", path.display()))
}

/// Removes every directory directly below `output_root`, leaving plain files.
pub fn clean(output_root: &Path) -> Result<usize> {
    if !output_root.exists() {
        return Ok(0);
    }
    let entries = fs::read_dir(output_root)
        .with_context(|| format!("could not list {}", output_root.display()))?;
    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            let path = entry.path();
            fs::remove_dir_all(&path)
                .with_context(|| format!("could not remove {}", path.display()))?;
            removed += 1;
        }
    }
    Ok(removed)
}

use std::{
    collections::{BTreeMap, HashSet},
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::{
    icon::Layout,
    templates::{LICENSE_HEADER, TemplatePaths},
};

const DEFAULT_SOURCE_ROOT: &str = "node_modules/alfa-ui-primitives/icons";
const DEFAULT_EXTENSION: &str = ".svg";

pub struct Options {
    config_file: PathBuf,
    input_dir: PathBuf,
    output_dir: Option<PathBuf>,
    clean: Option<bool>,
    emit_cargo: bool,
    seen: HashSet<PathBuf>,
}

impl Options {
    /// For build scripts: reads `icons.toml` from the crate being built and
    /// tells cargo to rerun when any input changes.
    pub fn cargo_defaults() -> Result<Self> {
        Ok(Self {
            emit_cargo: true,
            ..Self::new(env::current_dir()?)
        })
    }

    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            config_file: PathBuf::from("icons.toml"),
            input_dir,
            output_dir: None,
            clean: None,
            emit_cargo: false,
            seen: HashSet::new(),
        }
    }

    pub fn with_config_file(self, config_file: PathBuf) -> Self {
        Self {
            config_file,
            ..self
        }
    }

    /// Overrides `output_root` from the config file.
    pub fn with_output_dir(self, output_dir: PathBuf) -> Self {
        Self {
            output_dir: Some(output_dir),
            ..self
        }
    }

    /// Overrides `clean` from the config file.
    pub fn with_clean(self, clean: bool) -> Self {
        Self {
            clean: Some(clean),
            ..self
        }
    }

    fn config_file_path(&mut self) -> PathBuf {
        self.input_path(&self.config_file.clone())
    }

    fn input_path(&mut self, path: &Path) -> PathBuf {
        let result = self.input_dir.join(path);
        if self.emit_cargo && self.seen.insert(result.clone()) {
            println!("cargo:rerun-if-changed={}", result.display());
        }
        result
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawConfigFile {
    #[serde(default)]
    pub imports: Vec<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
    pub extension: Option<String>,
    pub clean: Option<bool>,
    pub index_file: Option<String>,
    pub markup_extension: Option<String>,
    pub style_header: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(rename = "category", default)]
    pub category_table: BTreeMap<String, RawCategory>,
    #[serde(default)]
    pub templates: RawTemplates,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct RawCategory {
    pub source: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct RawTemplates {
    pub index: Option<PathBuf>,
    pub markup: Option<PathBuf>,
    pub style: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySource {
    pub name: String,
    pub root: PathBuf,
}

#[derive(Debug)]
pub struct Config {
    pub categories: Vec<CategorySource>,
    pub extension: String,
    pub layout: Layout,
    pub templates: TemplatePaths,
    pub style_header: String,
    pub clean: bool,
}

// A category before the final source root is known.
enum PendingRoot {
    UnderSourceRoot,
    Explicit(PathBuf),
}

pub fn parse(opts: &mut Options) -> Result<Config> {
    let mut source_root = None;
    let mut output_root = None;
    let mut extension = None;
    let mut clean = None;
    let mut index_file = None;
    let mut markup_extension = None;
    let mut style_header = None;
    let mut categories: Vec<(String, PendingRoot)> = vec![];
    let mut templates = TemplatePaths::default();

    let mut visited = HashSet::new();
    let mut files = vec![opts.config_file_path()];
    while let Some(path) = files.pop() {
        let key = path.canonicalize().unwrap_or_else(|_| path.clone());
        if !visited.insert(key) {
            continue;
        }
        let file = std::fs::read_to_string(&path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        let file: RawConfigFile = toml::from_str(&file)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        let Some(dir) = path.parent() else {
            bail!("invalid config file path {}", path.display());
        };

        // Imports are visited in the order they are listed.
        for import in file.imports.iter().rev() {
            files.push(opts.input_path(&dir.join(import)));
        }

        if source_root.is_none() {
            source_root = file.source_root.map(|root| opts.input_path(&dir.join(root)));
        }
        if output_root.is_none() {
            output_root = file.output_root.map(|root| dir.join(root));
        }
        extension = extension.or(file.extension);
        clean = clean.or(file.clean);
        index_file = index_file.or(file.index_file);
        markup_extension = markup_extension.or(file.markup_extension);
        style_header = style_header.or(file.style_header);

        if templates.index.is_none() {
            templates.index = file.templates.index.map(|t| opts.input_path(&dir.join(t)));
        }
        if templates.markup.is_none() {
            templates.markup = file.templates.markup.map(|t| opts.input_path(&dir.join(t)));
        }
        if templates.style.is_none() {
            templates.style = file.templates.style.map(|t| opts.input_path(&dir.join(t)));
        }

        let mut local: Vec<(String, PendingRoot)> = vec![];
        for name in file.categories {
            if !local.iter().any(|(n, _)| *n == name) {
                local.push((name, PendingRoot::UnderSourceRoot));
            }
        }
        for (name, category) in file.category_table {
            let root = match category.source {
                Some(source) => PendingRoot::Explicit(opts.input_path(&dir.join(source))),
                None => PendingRoot::UnderSourceRoot,
            };
            match local.iter_mut().find(|(n, _)| *n == name) {
                Some(entry) => entry.1 = root,
                None => local.push((name, root)),
            }
        }
        for (name, root) in local {
            if !categories.iter().any(|(n, _)| *n == name) {
                categories.push((name, root));
            }
        }
    }

    let source_root = match source_root {
        Some(root) => root,
        None => opts.input_path(Path::new(DEFAULT_SOURCE_ROOT)),
    };
    let categories = categories
        .into_iter()
        .map(|(name, root)| {
            let root = match root {
                PendingRoot::Explicit(root) => root,
                PendingRoot::UnderSourceRoot => {
                    let root = source_root.join(&name);
                    opts.input_path(&root)
                }
            };
            CategorySource { name, root }
        })
        .collect();

    let defaults = Layout::default();
    let output_root = match (&opts.output_dir, output_root) {
        (Some(dir), _) => opts.input_dir.join(dir),
        (None, Some(root)) => root,
        (None, None) => opts.input_dir.join(defaults.output_root),
    };

    Ok(Config {
        categories,
        extension: extension.unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        layout: Layout {
            output_root,
            index_file: index_file.unwrap_or(defaults.index_file),
            markup_extension: markup_extension.unwrap_or(defaults.markup_extension),
        },
        templates,
        style_header: style_header.unwrap_or_else(|| LICENSE_HEADER.to_string()),
        clean: opts.clean.or(clean).unwrap_or(false),
    })
}

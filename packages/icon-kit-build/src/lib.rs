//! Generates icon components from a tree of SVG assets.
//!
//! Every `<prefix>_<name>_<size>_<color>.svg` found under the configured
//! category roots becomes an [`IconDescriptor`]; each descriptor is rendered
//! through the index, markup and style templates into
//! `<output_root>/<category>/<name>/`.
//!
//! The library can run from a build script:
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     icon_kit_build::generate(icon_kit_build::Options::cargo_defaults()?)?;
//!     Ok(())
//! }
//! ```

mod config;
mod discover;
mod emit;
mod icon;
mod templates;

use anyhow::Result;
use tracing::{debug, info};

pub use config::{CategorySource, Options};
pub use discover::{Diagnostic, Discovery};
pub use emit::EmitFailure;
pub use icon::{IconDescriptor, Layout, ParseError};
pub use templates::{TemplateKind, TemplatePaths, TemplateSet};

pub struct Report {
    pub icons: Vec<IconDescriptor>,
    pub emitted: usize,
    pub folders: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<EmitFailure>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolves the configuration and lists the icons it names, writing nothing.
pub fn scan(mut opts: Options) -> Result<Discovery> {
    let config = config::parse(&mut opts)?;
    Ok(discover::discover(
        &config.categories,
        &config.extension,
        &config.layout,
    ))
}

pub fn generate(mut opts: Options) -> Result<Report> {
    let config = config::parse(&mut opts)?;
    let templates = TemplateSet::load(&config.templates, config.style_header)?;

    if config.clean {
        let removed = emit::clean(&config.layout.output_root)?;
        debug!(
            "removed {removed} folders from {}",
            config.layout.output_root.display()
        );
    }

    info!("creating icons in {}", config.layout.output_root.display());
    let discovery = discover::discover(&config.categories, &config.extension, &config.layout);
    for icon in &discovery.icons {
        debug!(
            "{}/{} size={} color={} -> {}",
            icon.category,
            icon.name,
            icon.size,
            icon.color,
            icon.component_name
        );
    }

    let summary = emit::emit_all(&discovery.icons, &templates);
    info!(
        "{} icons created in {} folders",
        summary.emitted, summary.folders
    );

    Ok(Report {
        icons: discovery.icons,
        emitted: summary.emitted,
        folders: summary.folders,
        diagnostics: discovery.diagnostics,
        failures: summary.failures,
    })
}

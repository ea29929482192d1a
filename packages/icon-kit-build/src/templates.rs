use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use handlebars::Handlebars;

use crate::icon::IconDescriptor;

/// Written once at the top of every generated stylesheet.
pub const LICENSE_HEADER: &str = "\
/* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */
";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    Index,
    Markup,
    Style,
}

impl TemplateKind {
    pub const ALL: [Self; 3] = [Self::Index, Self::Markup, Self::Style];

    pub fn name(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Markup => "markup",
            Self::Style => "style",
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            Self::Index => include_str!("../templates/index.js.hbs"),
            Self::Markup => include_str!("../templates/icon.jsx.hbs"),
            Self::Style => include_str!("../templates/icon.css.hbs"),
        }
    }
}

/// Template files overriding the built-in ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplatePaths {
    pub index: Option<PathBuf>,
    pub markup: Option<PathBuf>,
    pub style: Option<PathBuf>,
}

impl TemplatePaths {
    fn get(&self, kind: TemplateKind) -> Option<&Path> {
        match kind {
            TemplateKind::Index => self.index.as_deref(),
            TemplateKind::Markup => self.markup.as_deref(),
            TemplateKind::Style => self.style.as_deref(),
        }
    }
}

pub struct TemplateSet {
    registry: Handlebars<'static>,
    style_header: String,
}

impl TemplateSet {
    pub fn builtin() -> Result<Self> {
        Self::load(&TemplatePaths::default(), LICENSE_HEADER.to_string())
    }

    pub fn load(paths: &TemplatePaths, style_header: String) -> Result<Self> {
        let mut registry = Handlebars::new();
        // Output is JS and CSS; HTML escaping would mangle quotes.
        registry.register_escape_fn(handlebars::no_escape);

        for kind in TemplateKind::ALL {
            let source = match paths.get(kind) {
                Some(path) => fs::read_to_string(path).with_context(|| {
                    format!("could not read {} template {}", kind.name(), path.display())
                })?,
                None => kind.builtin().to_string(),
            };
            registry
                .register_template_string(kind.name(), source)
                .with_context(|| format!("invalid {} template", kind.name()))?;
        }

        Ok(Self {
            registry,
            style_header,
        })
    }

    pub fn render(&self, kind: TemplateKind, icon: &IconDescriptor) -> Result<String> {
        self.registry
            .render(kind.name(), icon)
            .with_context(|| format!("could not render {} for {}", kind.name(), icon.name))
    }

    pub fn style_header(&self) -> &str {
        &self.style_header
    }
}

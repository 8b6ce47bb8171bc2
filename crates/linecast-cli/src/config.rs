use std::path::Path;

use anyhow::Context;
use colored::Color;
use serde::{Deserialize, Serialize};

use linecast_projection::{LineStyle, ProjectionConfig};

/// Settings read from `--config`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub projection: ProjectionConfig,
    pub palette: Palette,
}

impl CliConfig {
    /// Load from a TOML file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.palette.validate()?;
        Ok(config)
    }
}

/// Terminal color names per line style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub added: String,
    pub deleted: String,
    pub modified: String,
    pub moved: String,
    pub moved_modified: String,
    /// Background for highlighted tokens.
    pub highlight: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            added: "green".into(),
            deleted: "red".into(),
            modified: "yellow".into(),
            moved: "blue".into(),
            moved_modified: "magenta".into(),
            highlight: "bright black".into(),
        }
    }
}

impl Palette {
    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("added", &self.added),
            ("deleted", &self.deleted),
            ("modified", &self.modified),
            ("moved", &self.moved),
            ("moved_modified", &self.moved_modified),
            ("highlight", &self.highlight),
        ]
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (field, name) in self.entries() {
            if name.parse::<Color>().is_err() {
                anyhow::bail!("palette.{field}: unknown color '{name}'");
            }
        }
        Ok(())
    }

    /// The foreground color for `style`; `None` for unchanged lines.
    pub fn style_color(&self, style: LineStyle) -> Option<Color> {
        let name = match style {
            LineStyle::Unchanged => return None,
            LineStyle::Added => &self.added,
            LineStyle::Deleted => &self.deleted,
            LineStyle::Modified => &self.modified,
            LineStyle::Moved => &self.moved,
            LineStyle::MovedModified => &self.moved_modified,
        };
        name.parse().ok()
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight.parse().unwrap_or(Color::BrightBlack)
    }
}

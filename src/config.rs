use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::{RenderMode, RenderOpts};
use crate::foundation::error::{ViewerError, ViewerResult};

/// Viewer settings. Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    /// Pixels per QR module.
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Quiet zone around each symbol, in modules.
    #[serde(default = "default_margin")]
    pub margin: u32,
    /// Delay between animated frames.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u16,
    /// Page URL the fragment is appended to by copy-link. `None` yields a bare `#fragment`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Where downloads are written.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

fn default_scale() -> u32 {
    8
}

fn default_margin() -> u32 {
    4
}

fn default_frame_delay_ms() -> u16 {
    250
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            margin: default_margin(),
            frame_delay_ms: default_frame_delay_ms(),
            base_url: None,
            out_dir: default_out_dir(),
        }
    }
}

impl ViewerConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ViewerResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ViewerError::validation(format!("parse viewer config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ViewerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ViewerError::validation(format!("open viewer config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> ViewerResult<()> {
        if !(1..=64).contains(&self.scale) {
            return Err(ViewerError::validation("scale must be in 1..=64"));
        }
        if self.margin > 16 {
            return Err(ViewerError::validation("margin must be <= 16"));
        }
        if let Some(url) = &self.base_url
            && url.contains('#')
        {
            return Err(ViewerError::validation("base_url must not contain a fragment"));
        }
        Ok(())
    }

    pub fn render_opts(&self, mode: RenderMode) -> RenderOpts {
        RenderOpts {
            scale: self.scale,
            margin: self.margin,
            mode,
            frame_delay_ms: self.frame_delay_ms,
        }
    }

    /// Shareable link for `fragment`.
    pub fn link(&self, fragment: Option<&str>) -> String {
        let base = self.base_url.as_deref().unwrap_or("");
        match fragment {
            Some(f) if !f.is_empty() => format!("{base}#{f}"),
            _ => base.to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

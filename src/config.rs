//! Annotation options and configuration file support.
//!
//! Options can be loaded from a `.ferro-annotate.toml` file. Every key is
//! optional and falls back to its default.
//!
//! # Example Configuration
//!
//! ```toml
//! upstream-window = 5000
//! downstream-window = 500
//! sv-size-threshold = 1000
//! splice-region-exonic = 3
//! splice-region-intronic = 8
//! splice-site = 2
//! inversion-strictness = "strict"
//! escape-ann = true
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-annotate.toml` in current directory
//! 2. `~/.config/ferro/annotate.toml`
//!
//! CLI flags take precedence over config file settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AnnotateError;
use crate::Result;

/// How inversion detection treats bases other than A/C/G/T
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InversionStrictness {
    /// Leave such bases uncomplemented and record an info message
    #[default]
    Lenient,
    /// Reject the variant with `InvalidGenomeVariant`
    Strict,
}

/// Options shared by all annotation builders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct AnnotationOptions {
    /// Bases before the transcription start classified as upstream
    pub upstream_window: u64,
    /// Bases after the transcription end classified as downstream
    pub downstream_window: u64,
    /// Small variants with a ref or alt allele at least this long are
    /// annotated as structural variants
    pub sv_size_threshold: usize,
    /// Exonic bases of the splice region next to an exon/intron boundary
    pub splice_region_exonic: u32,
    /// Intronic bases of the splice region next to an exon/intron boundary
    pub splice_region_intronic: u32,
    /// Intronic bases of the splice donor and acceptor sites
    pub splice_site: u32,
    pub inversion_strictness: InversionStrictness,
    /// Percent-escape ANN field values
    pub escape_ann: bool,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            upstream_window: 1000,
            downstream_window: 1000,
            sv_size_threshold: 1000,
            splice_region_exonic: 3,
            splice_region_intronic: 8,
            splice_site: 2,
            inversion_strictness: InversionStrictness::Lenient,
            escape_ann: true,
        }
    }
}

impl AnnotationOptions {
    /// Load options from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro-annotate.toml` in current directory
    /// 2. `~/.config/ferro/annotate.toml`
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(".ferro-annotate.toml");
        if cwd_config.exists() {
            match Self::load_from_path(&cwd_config) {
                Ok(options) => return Some(options),
                Err(e) => log::warn!("ignoring {}: {}", cwd_config.display(), e),
            }
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("ferro").join("annotate.toml");
            if home_config.exists() {
                match Self::load_from_path(&home_config) {
                    Ok(options) => return Some(options),
                    Err(e) => log::warn!("ignoring {}: {}", home_config.display(), e),
                }
            }
        }

        None
    }

    /// Load options from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| AnnotateError::Config {
            msg: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse options from TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: Self = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.sv_size_threshold == 0 {
            return Err(AnnotateError::Config {
                msg: "sv-size-threshold must be positive".to_string(),
            });
        }
        if self.splice_site > self.splice_region_intronic {
            return Err(AnnotateError::Config {
                msg: format!(
                    "splice-site ({}) must not exceed splice-region-intronic ({})",
                    self.splice_site, self.splice_region_intronic
                ),
            });
        }
        Ok(())
    }

    /// Apply command line overrides.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(mut self, no_escape: bool, sv_size_threshold: Option<usize>) -> Self {
        if no_escape {
            self.escape_ann = false;
        }
        if let Some(threshold) = sv_size_threshold {
            self.sv_size_threshold = threshold;
        }
        self
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

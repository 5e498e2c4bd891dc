use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{FEATURED_COUNT, GuideCatalogProvider};
use crate::models::GuideItem;
use crate::utils::validate_file_size;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    featured: Vec<Value>,
    #[serde(default)]
    additional: Vec<Value>,
}

/// Catalog read from a JSON file of the form
/// `{"featured": [guide, ...], "additional": [guide, ...]}`.
///
/// The file is read once by [`FileCatalog::open`].
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    featured: Vec<GuideItem>,
    additional: Vec<GuideItem>,
}

impl FileCatalog {
    /// Read and validate a catalog file
    /// Skips malformed guides with a warning
    /// Returns an error if more than 50% of guides are malformed, if the
    /// featured section does not end up with exactly five guides, or if two
    /// guides share an id
    pub fn open(path: &Path) -> Result<Self> {
        // Open file and validate size to avoid TOCTOU race condition
        let file = File::open(path)
            .with_context(|| format!("Failed to open catalog file: {}", path.display()))?;
        validate_file_size(&file, path)?;

        let document: CatalogDocument = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

        let total = document.featured.len() + document.additional.len();
        let mut skipped = 0;
        let featured = parse_guides(document.featured, "featured", &mut skipped);
        let additional = parse_guides(document.additional, "additional", &mut skipped);

        if total > 0 {
            let failure_rate = skipped as f64 / total as f64;
            if failure_rate > 0.5 {
                bail!(
                    "Too many invalid guides in catalog {}: {} of {} failed ({:.1}%)",
                    path.display(),
                    skipped,
                    total,
                    failure_rate * 100.0
                );
            }
        }

        if featured.len() != FEATURED_COUNT {
            bail!(
                "Catalog {} must feature exactly {} guides, found {}",
                path.display(),
                FEATURED_COUNT,
                featured.len()
            );
        }

        let mut seen = HashSet::new();
        if let Some(dup) = featured.iter().chain(&additional).find(|g| !seen.insert(g.id)) {
            bail!(
                "Duplicate guide id {} in catalog {} (\"{}\")",
                dup.id,
                path.display(),
                dup.title
            );
        }

        info!(
            path = %path.display(),
            featured = featured.len(),
            additional = additional.len(),
            skipped,
            "loaded guide catalog"
        );

        Ok(Self { path: path.to_path_buf(), featured, additional })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_guides(values: Vec<Value>, section: &str, skipped: &mut usize) -> Vec<GuideItem> {
    let mut guides = Vec::with_capacity(values.len());
    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<GuideItem>(value) {
            Ok(guide) if guide.title.trim().is_empty() || guide.summary.trim().is_empty() => {
                warn!("Skipping {} guide {}: empty title or summary", section, idx + 1);
                *skipped += 1;
            }
            Ok(guide) => guides.push(guide),
            Err(e) => {
                warn!("Skipping {} guide {}: {}", section, idx + 1, e);
                *skipped += 1;
            }
        }
    }
    guides
}

impl GuideCatalogProvider for FileCatalog {
    fn fetch_featured(&self) -> Result<Vec<GuideItem>> {
        Ok(self.featured.clone())
    }

    fn fetch_all(&self) -> Result<Vec<GuideItem>> {
        Ok(self.featured.iter().chain(&self.additional).cloned().collect())
    }
}

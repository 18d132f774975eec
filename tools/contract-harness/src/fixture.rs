//! Contract fixture format and loader.
//!
//! Each fixture file at `contracts/http/{group}/{id}.json` describes one HTTP
//! assertion: the request to send and what the response must contain.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

/// A single HTTP contract assertion loaded from a fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// Resource group used for filtering (`auth`, `products`, `cart`, ...).
    pub group: String,
    /// Unique identifier within the group (matches the filename stem).
    pub id: String,
    /// Human-readable description shown in output.
    pub description: String,
    pub request: Request,
    pub expect: Expect,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Expect {
    /// Expected HTTP status code.
    pub status: u16,
    /// Expected response headers (subset match; extra headers are allowed).
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Expected JSON body fragment. Objects match when every listed key
    /// matches; arrays must have the same length and match element-wise.
    pub body: Option<Value>,
}

impl Fixture {
    fn check(&self, path: &Path) -> Result<()> {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        if stem != self.id {
            bail!("{}: id {:?} does not match file name", path.display(), self.id);
        }
        if !self.request.path.starts_with('/') {
            bail!("{}: request path must start with '/'", path.display());
        }
        Ok(())
    }
}

/// Locate the `contracts/` directory by walking up from `start`.
pub fn find_contracts_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|p| p.join("contracts"))
        .find(|p| p.join("http").is_dir())
}

/// Load all fixture files from `{contracts_dir}/http/`, optionally filtered
/// to a single group subdirectory. Sorted by group, then id.
pub fn load_all(contracts_dir: &Path, group: Option<&str>) -> Result<Vec<Fixture>> {
    let http_dir = contracts_dir.join("http");

    let group_dirs: Vec<_> = match group {
        Some(g) => vec![http_dir.join(g)],
        None => fs::read_dir(&http_dir)
            .with_context(|| format!("cannot open {}", http_dir.display()))?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|e| e.path())
            .collect(),
    };

    let mut fixtures = Vec::new();
    for dir in group_dirs {
        if !dir.exists() {
            continue;
        }
        for entry in fs::read_dir(&dir)
            .with_context(|| format!("cannot read {}", dir.display()))?
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("cannot read {}", path.display()))?;
                let fixture: Fixture = serde_json::from_str(&content)
                    .with_context(|| format!("invalid fixture JSON in {}", path.display()))?;
                fixture.check(&path)?;
                fixtures.push(fixture);
            }
        }
    }

    fixtures.sort_by(|a, b| a.group.cmp(&b.group).then(a.id.cmp(&b.id)));
    Ok(fixtures)
}

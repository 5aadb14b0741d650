use std::path::{Path, PathBuf};

/// Input file layout under a registry root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryPaths {
    pub root: PathBuf,
    pub taxonomy_dir: PathBuf,
    pub config: PathBuf,
    pub capabilities: PathBuf,
    pub pricing_models: PathBuf,
    pub compliance_flags: PathBuf,
    pub categories_dir: PathBuf,
}

impl RegistryPaths {
    #[must_use]
    pub fn category_file(&self, slug: &str) -> PathBuf {
        self.categories_dir.join(format!("{slug}.json"))
    }
}

#[must_use]
pub fn registry_paths(root: &Path) -> RegistryPaths {
    let taxonomy = root.join("taxonomy");
    RegistryPaths {
        root: root.to_path_buf(),
        config: taxonomy.join("config.json"),
        capabilities: taxonomy.join("capabilities.json"),
        pricing_models: taxonomy.join("pricing-models.json"),
        compliance_flags: taxonomy.join("compliance-flags.json"),
        taxonomy_dir: taxonomy,
        categories_dir: root.join("categories"),
    }
}

/// Output artifact layout: the versioned snapshot plus its hash sidecar,
/// colocated so consumers can verify a cached snapshot without re-hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub snapshot: PathBuf,
    pub hash: PathBuf,
}

#[must_use]
pub fn snapshot_paths(out_dir: &Path, schema_version: &str) -> SnapshotPaths {
    SnapshotPaths {
        snapshot: out_dir.join(format!("tools.snapshot.v{schema_version}.json")),
        hash: out_dir.join(format!("tools.snapshot.v{schema_version}.sha256")),
    }
}

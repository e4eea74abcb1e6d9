//! `conandata.yml` loading
//!
//! A recipe's conandata is a YAML mapping. Recipes built on the shared base
//! use the root itself as a version table; others keep version tables in named
//! sections such as `sources`.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::table::{SENTINEL_KEY, TableError, VersionTable, key_to_string};

/// Section listing the source archives of each exportable version.
pub const SOURCES_SECTION: &str = "sources";

/// Parsed contents of a `conandata.yml`.
#[derive(Debug, Clone, Default)]
pub struct ConanData {
    root: Mapping,
}

impl ConanData {
    /// Parse conandata from a YAML string. An empty document is an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Yaml`] on malformed YAML and
    /// [`TableError::NotAMapping`] if the root is not a mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self, TableError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(yaml)?;
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            _ => Err(TableError::NotAMapping("conandata root".to_string())),
        }
    }

    /// Read and parse a `conandata.yml` file.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Io`] if the file cannot be read, otherwise as
    /// [`ConanData::from_yaml`].
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// The raw root mapping.
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// A top-level section by name.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }

    /// Treat the root mapping as a version table.
    ///
    /// # Errors
    ///
    /// See [`VersionTable::from_mapping`].
    pub fn version_table(&self) -> Result<VersionTable<Value>, TableError> {
        VersionTable::from_mapping(&self.root)
    }

    /// Build a version table from a named section.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingSection`] if the section is absent,
    /// otherwise as [`VersionTable::from_value`].
    pub fn section_table(&self, name: &str) -> Result<VersionTable<Value>, TableError> {
        let section = self
            .section(name)
            .ok_or_else(|| TableError::MissingSection(name.to_string()))?;
        VersionTable::from_value(section, name)
    }

    /// Versions declared under `sources`, in declaration order.
    ///
    /// These are the versions a recipe gets exported for. A missing section
    /// yields no versions. The sentinel is never exported.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NotAMapping`] if `sources` is not a mapping, or
    /// [`TableError::UnsupportedKey`] for a key that is not a string or number.
    pub fn source_versions(&self) -> Result<Vec<String>, TableError> {
        let Some(section) = self.section(SOURCES_SECTION) else {
            return Ok(Vec::new());
        };
        let Value::Mapping(sources) = section else {
            return Err(TableError::NotAMapping(SOURCES_SECTION.to_string()));
        };

        let mut versions = Vec::with_capacity(sources.len());
        for key in sources.keys() {
            let key = key_to_string(key)?;
            if key != SENTINEL_KEY {
                versions.push(key);
            }
        }
        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PYQT6_DATA: &str = r#"
sources:
  "6.4.2":
    url: "https://example.com/PyQt6-6.4.2.tar.gz"
  "6.3.1":
    url: "https://example.com/PyQt6-6.3.1.tar.gz"
requirements:
  "6.4.2":
    - "sip/6.7.5"
  "None":
    - "sip/6.5.1"
"#;

    #[test]
    fn test_source_versions_keep_order() {
        let data = ConanData::from_yaml(PYQT6_DATA).unwrap();
        assert_eq!(data.source_versions().unwrap(), vec!["6.4.2", "6.3.1"]);
    }

    #[test]
    fn test_section_table() {
        let data = ConanData::from_yaml(PYQT6_DATA).unwrap();
        let table = data.section_table("requirements").unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.contains_key("6.4.2"));

        // `sources` has no sentinel
        assert!(matches!(
            data.section_table(SOURCES_SECTION),
            Err(TableError::MissingSentinel)
        ));
        assert!(matches!(
            data.section_table("options"),
            Err(TableError::MissingSection(_))
        ));
    }

    #[test]
    fn test_root_as_version_table() {
        let data = ConanData::from_yaml("\"1.0.0\":\n  - a/1\nNone:\n  - a/0\n").unwrap();
        let table = data.version_table().unwrap();
        assert_eq!(table.default_version(), Some("1.0.0"));
    }

    #[test]
    fn test_empty_document() {
        let data = ConanData::from_yaml("").unwrap();
        assert!(data.root().is_empty());
        assert!(data.source_versions().unwrap().is_empty());
    }

    #[test]
    fn test_non_mapping_root() {
        assert!(matches!(
            ConanData::from_yaml("- 1\n- 2\n"),
            Err(TableError::NotAMapping(_))
        ));
        assert!(matches!(
            ConanData::from_yaml("key: [unclosed"),
            Err(TableError::Yaml(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PYQT6_DATA.as_bytes()).unwrap();
        let data = ConanData::from_path(file.path()).unwrap();
        assert!(data.section("requirements").is_some());

        let missing = ConanData::from_path(Path::new("/nonexistent/conandata.yml"));
        assert!(matches!(missing, Err(TableError::Io { .. })));
    }
}

//! Recipe discovery
//!
//! Recipes live under a `recipes/` directory, one directory per recipe. A
//! recipe is exportable if it carries a `conandata.yml`.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use umbase_schema::{CONANDATA_FILE, ConanData};
use walkdir::WalkDir;

/// Name of the directory that holds the recipes.
pub const RECIPES_DIR: &str = "recipes";

/// A recipe directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Recipe name (the directory name).
    pub name: String,
    /// Recipe root directory (`.../recipes/<name>`).
    pub root: PathBuf,
}

impl Recipe {
    /// Describe the recipe rooted at `root`. Returns `None` if the path has
    /// no final component to name it by.
    pub fn at(root: impl Into<PathBuf>) -> Option<Self> {
        let root = root.into();
        let name = root.file_name()?.to_string_lossy().into_owned();
        Some(Self { name, root })
    }

    /// Path of the recipe's `conandata.yml`.
    pub fn conandata_path(&self) -> PathBuf {
        self.root.join(CONANDATA_FILE)
    }

    /// Load the recipe's conandata, or `None` if the recipe has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_data(&self) -> Result<Option<ConanData>> {
        let path = self.conandata_path();
        if !path.exists() {
            debug!(recipe = %self.name, "no {CONANDATA_FILE}, skipping");
            return Ok(None);
        }
        let data = ConanData::from_path(&path)
            .with_context(|| format!("Failed to load data for recipe '{}'", self.name))?;
        Ok(Some(data))
    }
}

/// Map changed file paths to the recipes they belong to.
///
/// A file belongs to a recipe if its path contains a `recipes` component
/// followed by at least one more; the recipe root is the path up to and
/// including that next component. Files outside `recipes/` are ignored.
/// Each recipe appears once, in first-seen order.
pub fn changed_recipes<P: AsRef<Path>>(files: &[P]) -> Vec<Recipe> {
    let mut recipes: Vec<Recipe> = Vec::new();

    for file in files {
        let Some(root) = recipe_root(file.as_ref()) else {
            continue;
        };
        if recipes.iter().any(|r| r.root == root) {
            continue;
        }
        if let Some(recipe) = Recipe::at(root) {
            recipes.push(recipe);
        }
    }

    recipes
}

fn recipe_root(file: &Path) -> Option<PathBuf> {
    let components: Vec<Component<'_>> = file.components().collect();
    let idx = components
        .iter()
        .position(|c| c.as_os_str() == RECIPES_DIR)?;
    // Need the recipe directory after `recipes`
    if idx + 1 >= components.len() {
        return None;
    }
    Some(components[..=idx + 1].iter().collect())
}

/// List every recipe directly under `recipes_dir`, sorted by name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn discover(recipes_dir: &Path) -> Result<Vec<Recipe>> {
    let mut recipes = Vec::new();
    for entry in WalkDir::new(recipes_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry
            .with_context(|| format!("Failed to read recipes in {}", recipes_dir.display()))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(recipe) = Recipe::at(entry.into_path()) {
            recipes.push(recipe);
        }
    }
    Ok(recipes)
}

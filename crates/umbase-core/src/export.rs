//! Export planning
//!
//! Every version listed under a recipe's `sources` is exported as
//! `name/version@user/channel`. Planning is separate from running so the plan
//! can be printed (dry run) or handed to a [`CommandRunner`].

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use umbase_schema::Channel;

use crate::recipe::Recipe;

/// Default package-manager executable.
pub const CONAN_PROGRAM: &str = "conan";

/// One `conan export` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRef {
    /// Recipe directory passed to `conan export`.
    pub recipe_root: PathBuf,
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Package user namespace.
    pub user: String,
    /// Channel the package is exported under.
    pub channel: Channel,
}

impl ExportRef {
    /// Arguments for `conan`: `export <recipe_root> <reference>`.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            OsString::from("export"),
            self.recipe_root.clone().into_os_string(),
            OsString::from(self.to_string()),
        ]
    }
}

impl std::fmt::Display for ExportRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}@{}/{}",
            self.name, self.version, self.user, self.channel
        )
    }
}

/// Runs external commands on behalf of an [`ExportPlan`].
pub trait CommandRunner {
    /// Run `program` with `args`, failing unless it exits successfully.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exits non-zero.
    fn run(&self, program: &str, args: &[OsString]) -> Result<()>;
}

/// Runs commands as child processes, inheriting stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<()> {
        debug!(program, ?args, "spawning");
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to run {program}"))?;
        if !status.success() {
            bail!("{program} exited with {status}");
        }
        Ok(())
    }
}

/// The ordered list of exports for a set of recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportPlan {
    refs: Vec<ExportRef>,
}

impl ExportPlan {
    /// Plan exports for `recipes` under `user`/`channel`.
    ///
    /// Recipes without a `conandata.yml` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a recipe's conandata cannot be loaded or its
    /// `sources` section is malformed.
    pub fn build(recipes: &[Recipe], user: &str, channel: &Channel) -> Result<Self> {
        let mut refs = Vec::new();

        for recipe in recipes {
            let Some(data) = recipe.load_data()? else {
                continue;
            };
            let versions = data
                .source_versions()
                .with_context(|| format!("Invalid sources for recipe '{}'", recipe.name))?;
            if versions.is_empty() {
                debug!(recipe = %recipe.name, "no source versions");
            }
            for version in versions {
                refs.push(ExportRef {
                    recipe_root: recipe.root.clone(),
                    name: recipe.name.clone(),
                    version,
                    user: user.to_string(),
                    channel: channel.clone(),
                });
            }
        }

        Ok(Self { refs })
    }

    /// The planned exports, in order.
    pub fn refs(&self) -> &[ExportRef] {
        &self.refs
    }

    /// Number of planned exports.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether there is nothing to export.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Run every export through `runner`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns an error naming the reference whose export failed.
    pub fn execute(&self, program: &str, runner: &dyn CommandRunner) -> Result<()> {
        for export in &self.refs {
            info!(reference = %export, "exporting");
            runner
                .run(program, &export.args())
                .with_context(|| format!("Export of {export} failed"))?;
        }
        Ok(())
    }
}

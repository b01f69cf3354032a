//! The default [`ToolContext`]: an EDAM description bound to a work root.

use crate::edam::{Edam, VpiModule};
use crate::errors::{EdaError, EdaResult};
use crate::files::FileSet;
use crate::params::{ParamType, ParameterMap};
use crate::runner::{ProcessRunner, SystemRunner};
use crate::traits::{ConfigureReport, EdaTool, ToolContext};
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// One project prepared for one backend in one work root.
///
/// `Session` drives the configure, build and run steps. All project state is
/// read from the description on each call; nothing is cached between steps.
pub struct Session {
    edam: Edam,
    work_root: PathBuf,
    runner: Box<dyn ProcessRunner>,
}

impl Session {
    /// Create a session that runs real processes.
    pub fn new(edam: Edam, work_root: impl Into<PathBuf>) -> Self {
        Self::with_runner(edam, work_root, Box::new(SystemRunner::new()))
    }

    /// Create a session with an explicit process runner.
    pub fn with_runner(
        edam: Edam,
        work_root: impl Into<PathBuf>,
        runner: Box<dyn ProcessRunner>,
    ) -> Self {
        Self {
            edam,
            work_root: work_root.into(),
            runner,
        }
    }

    /// Create the work root if needed and let the backend write its files.
    ///
    /// # Errors
    ///
    /// Returns [`EdaError::Io`] if the work root cannot be created, or any
    /// error raised by the backend.
    pub fn configure(&self, tool: &dyn EdaTool) -> EdaResult<ConfigureReport> {
        info!(
            "Configuring {} for '{}' in {}",
            tool.name(),
            self.edam.name,
            self.work_root.display()
        );
        fs::create_dir_all(&self.work_root).map_err(|e| EdaError::io(&self.work_root, e))?;
        tool.configure_main(self)
    }

    /// Build a configured project.
    pub fn build(&self, tool: &dyn EdaTool) -> EdaResult<()> {
        info!("Building '{}' with {}", self.edam.name, tool.name());
        tool.build_main(self)
    }

    /// Run a configured project.
    ///
    /// `args` are runtime overrides (`--name=value`). Plusarg overrides replace
    /// the declared defaults; overrides of compile-time parameters have no
    /// effect at this point and are reported as warnings.
    ///
    /// # Errors
    ///
    /// Returns [`EdaError::UnknownParameter`] or [`EdaError::InvalidParameter`]
    /// for bad arguments, or any error raised by the backend.
    pub fn run(&self, tool: &dyn EdaTool, args: &[String]) -> EdaResult<()> {
        info!("Running '{}' with {}", self.edam.name, tool.name());

        let mut plusargs = if tool.arg_types().contains(&ParamType::Plusarg) {
            self.parameters(ParamType::Plusarg)?
        } else {
            ParameterMap::new()
        };

        for (name, (paramtype, value)) in self.edam.parse_overrides(args)? {
            if paramtype == ParamType::Plusarg {
                plusargs.insert(name, value);
            } else {
                warn!("Ignoring runtime override of {paramtype} '{name}'; it only applies at configure time");
            }
        }

        tool.run_main(self, &plusargs)
    }
}

impl ToolContext for Session {
    fn work_root(&self) -> &Path {
        &self.work_root
    }

    fn fileset(&self) -> FileSet {
        FileSet::resolve(&self.edam.files)
    }

    fn tool_options(&self, tool: &str) -> Option<&Value> {
        self.edam.tool_options.get(tool)
    }

    fn parameters(&self, paramtype: ParamType) -> EdaResult<ParameterMap> {
        self.edam.parameters_of(paramtype)
    }

    fn toplevel(&self) -> &str {
        &self.edam.toplevel
    }

    fn vpi_modules(&self) -> &[VpiModule] {
        &self.edam.vpi
    }

    fn run_tool(&self, command: &str, args: &[String]) -> EdaResult<()> {
        self.runner.run(command, args, &self.work_root)
    }
}

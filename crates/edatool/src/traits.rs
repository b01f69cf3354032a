use crate::edam::VpiModule;
use crate::errors::EdaResult;
use crate::files::FileSet;
use crate::params::{ParamType, ParameterMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A non-fatal problem found while generating tool files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Project file the diagnostic is about, if any
    pub file: Option<String>,

    pub message: String,
}

impl Diagnostic {
    pub fn for_file(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of a successful configure step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureReport {
    /// Files written into the work root, in write order
    pub artifacts: Vec<PathBuf>,

    /// Warnings raised while generating them
    pub warnings: Vec<Diagnostic>,
}

/// Description of one backend option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub desc: String,
}

impl OptionDoc {
    pub fn new(name: &str, type_name: &str, desc: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            desc: desc.to_string(),
        }
    }
}

/// Self-description of a backend and the options it accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDoc {
    pub description: String,
    /// Single-valued options
    pub members: Vec<OptionDoc>,
    /// List-valued options
    pub lists: Vec<OptionDoc>,
}

/// Capabilities a backend needs from the surrounding project model.
///
/// Backends receive this instead of inheriting from a base tool, which keeps
/// them free of process and file-set plumbing and lets tests substitute
/// any part of it.
pub trait ToolContext {
    /// Directory all generated files go into and tools run in
    fn work_root(&self) -> &Path;

    /// Resolved source files and include directories
    fn fileset(&self) -> FileSet;

    /// Raw options for one tool, if the project sets any
    fn tool_options(&self, tool: &str) -> Option<&Value>;

    /// Parameters of one type with their effective values
    ///
    /// # Errors
    ///
    /// Returns [`crate::EdaError::InvalidParameter`] if a value does not match its datatype.
    fn parameters(&self, paramtype: ParamType) -> EdaResult<ParameterMap>;

    /// Name of the toplevel design unit
    fn toplevel(&self) -> &str;

    fn vpi_modules(&self) -> &[VpiModule];

    /// Run an external program in the work root
    fn run_tool(&self, command: &str, args: &[String]) -> EdaResult<()>;
}

/// Core trait that all tool backends must implement
///
/// A backend turns the project seen through a [`ToolContext`] into the files
/// its tool needs, then drives the tool.
pub trait EdaTool {
    /// Tool identifier (lowercase, e.g., "modelsim"); also the key of its entry in `tool_options`
    fn name(&self) -> &str;

    /// Parameter types this backend consumes
    fn arg_types(&self) -> &[ParamType];

    fn doc(&self) -> ToolDoc;

    /// Write the tool's build files into the work root
    ///
    /// Existing files of the same names are overwritten.
    fn configure_main(&self, ctx: &dyn ToolContext) -> EdaResult<ConfigureReport>;

    /// Build the design
    ///
    /// Default implementation runs `make` with its default target.
    fn build_main(&self, ctx: &dyn ToolContext) -> EdaResult<()> {
        ctx.run_tool("make", &[])
    }

    /// Run the simulation with the effective plusargs
    fn run_main(&self, ctx: &dyn ToolContext, plusargs: &ParameterMap) -> EdaResult<()>;
}

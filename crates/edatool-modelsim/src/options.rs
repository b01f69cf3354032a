//! ModelSim tool options as read from `tool_options.modelsim`.

use edatool::{EdaError, EdaResult, OptionDoc, ToolDoc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How Verilog sources are compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompilationMode {
    /// One `vlog` call per file
    #[default]
    Separate,
    /// A single `vlog -mfcu` call over all Verilog files
    Common,
}

/// Options accepted by the ModelSim backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsimOptions {
    /// `"common"` or `"sep"`; anything else means separate compilation
    pub compilation_mode: Option<String>,

    /// Extra arguments for every `vcom` call
    pub vcom_options: Vec<String>,

    /// Extra arguments for every `vlog` call
    pub vlog_options: Vec<String>,

    /// Extra arguments for `vsim`
    pub vsim_options: Vec<String>,
}

impl ModelsimOptions {
    /// Parse the raw options entry; a missing entry gives the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EdaError::InvalidToolOptions`] if the entry has the wrong shape.
    pub fn from_value(value: Option<&Value>) -> EdaResult<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|e| EdaError::InvalidToolOptions {
                    tool: crate::TOOL_NAME.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    pub fn compilation_mode(&self) -> CompilationMode {
        match self.compilation_mode.as_deref() {
            Some("common") => CompilationMode::Common,
            _ => CompilationMode::Separate,
        }
    }

    /// Builder pattern: select the compilation mode.
    pub fn with_compilation_mode(mut self, mode: CompilationMode) -> Self {
        self.compilation_mode = Some(
            match mode {
                CompilationMode::Common => "common",
                CompilationMode::Separate => "sep",
            }
            .to_string(),
        );
        self
    }
}

pub(crate) fn tool_doc() -> ToolDoc {
    ToolDoc {
        description: "ModelSim simulator from Mentor Graphics".to_string(),
        members: vec![OptionDoc::new(
            "compilation_mode",
            "String",
            "Common or separate compilation, sep - for separate compilation, common - for common compilation",
        )],
        lists: vec![
            OptionDoc::new(
                "vcom_options",
                "String",
                "Additional options for compilation with vcom",
            ),
            OptionDoc::new(
                "vlog_options",
                "String",
                "Additional options for compilation with vlog",
            ),
            OptionDoc::new("vsim_options", "String", "Additional run options for vsim"),
        ],
    }
}

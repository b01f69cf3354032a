//! EDAM project description.
//!
//! EDAM is the tool-agnostic JSON document describing a design: its files,
//! parameters, per-tool options, toplevel and VPI modules. Backends never see
//! it directly; they read it through [`crate::ToolContext`].

use crate::errors::{EdaError, EdaResult};
use crate::files::EdamFile;
use crate::params::{DataType, ParamType, ParamValue, ParameterMap};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A declared project parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub datatype: DataType,

    pub paramtype: ParamType,

    /// Value used when nothing overrides it; parameters without one are not passed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A VPI plugin compiled from C/C++ sources and loaded by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpiModule {
    /// Module name; doubles as the Makefile target and the output binary
    pub name: String,

    #[serde(default)]
    pub src_files: Vec<String>,

    /// Libraries to link against, without the `-l` prefix
    #[serde(default)]
    pub libs: Vec<String>,

    #[serde(default)]
    pub include_dirs: Vec<String>,
}

impl VpiModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src_files: Vec::new(),
            libs: Vec::new(),
            include_dirs: Vec::new(),
        }
    }
}

/// Check that no two VPI modules share a name.
pub fn check_unique_vpi_names(modules: &[VpiModule]) -> EdaResult<()> {
    let mut seen = HashSet::new();
    for module in modules {
        if !seen.insert(module.name.as_str()) {
            return Err(EdaError::DuplicateVpiModule {
                name: module.name.clone(),
            });
        }
    }
    Ok(())
}

/// The complete project description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edam {
    pub name: String,

    #[serde(default)]
    pub files: Vec<EdamFile>,

    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,

    /// Raw options keyed by tool name; each backend parses its own entry
    #[serde(default)]
    pub tool_options: IndexMap<String, Value>,

    #[serde(default)]
    pub toplevel: String,

    #[serde(default)]
    pub vpi: Vec<VpiModule>,
}

impl Edam {
    /// Parse a description from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`EdaError::Edam`] if the text is not a valid description.
    pub fn from_json_str(text: &str) -> EdaResult<Self> {
        serde_json::from_str(text).map_err(|e| EdaError::edam("Failed to parse JSON", Some(e)))
    }

    /// Load a description from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`EdaError::Io`] if the file cannot be read and
    /// [`EdaError::Edam`] if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> EdaResult<Self> {
        let path = path.as_ref();
        debug!("Loading EDAM description from {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| EdaError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Typed default values of all parameters of one type, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`EdaError::InvalidParameter`] if a default does not match its datatype.
    pub fn parameters_of(&self, paramtype: ParamType) -> EdaResult<ParameterMap> {
        let mut params = ParameterMap::new();
        for (name, param) in &self.parameters {
            if param.paramtype != paramtype {
                continue;
            }
            if let Some(default) = &param.default {
                let value = ParamValue::from_json(name, param.datatype, default)?;
                params.insert(name.clone(), value);
            }
        }
        Ok(params)
    }

    /// Parse runtime arguments of the form `--name=value` or `--name`.
    ///
    /// A bare `--name` sets a boolean parameter. Values are typed by the
    /// parameter's datatype. Returned entries keep argument order and carry
    /// the parameter type so callers can pick the ones they apply.
    ///
    /// # Errors
    ///
    /// Returns [`EdaError::UnknownParameter`] for undeclared names and
    /// [`EdaError::InvalidParameter`] for malformed values.
    pub fn parse_overrides(
        &self,
        args: &[String],
    ) -> EdaResult<IndexMap<String, (ParamType, ParamValue)>> {
        let mut overrides = IndexMap::new();

        for arg in args {
            let body = arg.strip_prefix("--").ok_or_else(|| {
                EdaError::invalid_parameter(arg.clone(), "expected --name=value")
            })?;
            let (name, text) = match body.split_once('=') {
                Some((name, text)) => (name, Some(text)),
                None => (body, None),
            };
            let param = self
                .parameters
                .get(name)
                .ok_or_else(|| EdaError::UnknownParameter {
                    name: name.to_string(),
                })?;
            let value = match (text, param.datatype) {
                (Some(text), datatype) => ParamValue::parse(name, datatype, text)?,
                (None, DataType::Bool) => ParamValue::Bool(true),
                (None, _) => {
                    return Err(EdaError::invalid_parameter(name, "missing value"));
                }
            };
            overrides.insert(name.to_string(), (param.paramtype, value));
        }

        Ok(overrides)
    }
}

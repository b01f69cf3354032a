//! # edatool
//!
//! Shared API for EDA tool backends.
//!
//! A backend translates a tool-agnostic project description into the scripts
//! a specific simulator or synthesis tool needs, then drives that tool. This
//! crate provides everything around that translation:
//!
//! - **EDAM description**: files, typed parameters, tool options, toplevel and VPI modules
//! - **ToolContext trait**: the capabilities a backend is given (file set, options, parameters, process execution)
//! - **EdaTool trait**: the interface every backend implements
//! - **Session**: the default context, binding a description to a work root
//! - **Process runners**: real execution and a recording runner for tests
//!
//! # Example
//!
//! ```rust,ignore
//! use edatool::{Edam, Session};
//! use edatool_modelsim::Modelsim;
//!
//! let edam = Edam::load("blinky.eda.json")?;
//! let session = Session::new(edam, "build/sim-modelsim");
//! let report = session.configure(&Modelsim::new())?;
//! for warning in &report.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! session.run(&Modelsim::new(), &["--seed=42".to_string()])?;
//! ```

pub mod edam;
pub mod errors;
pub mod files;
pub mod params;
pub mod runner;
pub mod session;
pub mod traits;

// Re-export commonly used types
pub use edam::{check_unique_vpi_names, Edam, Parameter, VpiModule};
pub use errors::{EdaError, EdaResult};
pub use files::{EdamFile, FileSet, FileType, SourceFile, VhdlStandard, DEFAULT_LIBRARY};
pub use params::{render_assignments, DataType, ParamType, ParamValue, ParameterMap};
pub use runner::{Invocation, ProcessRunner, RecordingRunner, SystemRunner};
pub use session::Session;
pub use traits::{ConfigureReport, Diagnostic, EdaTool, OptionDoc, ToolContext, ToolDoc};

//! # edatool-modelsim
//!
//! ModelSim/QuestaSim backend for edatool.
//!
//! ## Features
//!
//! - Compiles Verilog, SystemVerilog and VHDL (87/93/2008) into named libraries
//! - Separate or common (`-mfcu`) Verilog compilation
//! - Sources project Tcl files after compilation
//! - Builds VPI modules from C/C++ sources
//! - Batch runs whose exit code reflects the simulation's TESTSTATUS
//!
//! ## Generated files
//!
//! | file | purpose |
//! |---|---|
//! | `edalize_build_rtl.tcl` | `vlib`/`vlog`/`vcom` directives |
//! | `edalize_main.tcl` | error trap, build script, project Tcl files |
//! | `Makefile` | `all`, `run`, `run-gui`, `work`, `clean` and per-VPI targets |
//!
//! The Makefile needs `MODEL_TECH` pointing at the simulator's `bin` directory.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edatool::{Edam, Session};
//! use edatool_modelsim::Modelsim;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let edam = Edam::load("blinky.eda.json")?;
//! let session = Session::new(edam, "build");
//! let tool = Modelsim::new();
//!
//! session.configure(&tool)?;
//! session.run(&tool, &["--seed=3".to_string()])?;
//! # Ok(())
//! # }
//! ```

mod backend;
pub mod makefile;
pub mod options;
pub mod scripts;

pub use backend::Modelsim;
pub use options::{CompilationMode, ModelsimOptions};

// Re-export edatool types for convenience
pub use edatool::{ConfigureReport, EdaError, EdaResult, EdaTool, Session, ToolContext};

/// Key of this backend's entry in `tool_options`
pub const TOOL_NAME: &str = "modelsim";

/// Compile script
pub const BUILD_RTL_TCL: &str = "edalize_build_rtl.tcl";

/// Bootstrap script run by `vsim` for the `work` target
pub const MAIN_TCL: &str = "edalize_main.tcl";

pub const MAKEFILE: &str = "Makefile";

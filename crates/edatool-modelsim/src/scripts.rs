//! Tcl compile scripts.
//!
//! `edalize_build_rtl.tcl` declares libraries and compiles every HDL file;
//! `edalize_main.tcl` traps errors, runs the build script and sources any
//! project Tcl files.

use crate::options::{CompilationMode, ModelsimOptions};
use crate::BUILD_RTL_TCL;
use edatool::{Diagnostic, FileSet, FileType, ParameterMap, VhdlStandard, DEFAULT_LIBRARY};
use log::{debug, warn};

/// Generated compile script plus what the bootstrap script needs from the same pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RtlScripts {
    /// Contents of `edalize_build_rtl.tcl`
    pub build_rtl: String,
    /// Project Tcl files to source from `edalize_main.tcl`, in file order
    pub tcl_files: Vec<String>,
    /// One entry per skipped file of unknown type
    pub warnings: Vec<Diagnostic>,
}

fn to_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Emit `vlib` the first time a library is used.
fn declare_library(lines: &mut Vec<String>, libraries: &mut Vec<String>, name: &str) {
    if !libraries.iter().any(|lib| lib == name) {
        lines.push(format!("vlib {name}"));
        libraries.push(name.to_string());
    }
}

fn vhdl_standard_flag(standard: Option<VhdlStandard>) -> Option<&'static str> {
    match standard {
        Some(VhdlStandard::Vhdl87) => Some("-87"),
        Some(VhdlStandard::Vhdl93) => Some("-93"),
        Some(VhdlStandard::Vhdl2008) => Some("-2008"),
        None => None,
    }
}

/// Render the compile script for a file set.
///
/// In separate mode every Verilog and VHDL file gets its own command. In
/// common mode Verilog files are compiled together by one trailing
/// `vlog -mfcu` into `work`, while VHDL files keep their own `vcom`.
pub fn render_rtl_scripts(
    fileset: &FileSet,
    options: &ModelsimOptions,
    vlogdefines: &ParameterMap,
) -> RtlScripts {
    let common = options.compilation_mode() == CompilationMode::Common;

    let include_flags: Vec<String> = fileset
        .include_dirs
        .iter()
        .map(|dir| format!("+incdir+{}", to_slashes(dir)))
        .collect();
    let define_flags: Vec<String> = vlogdefines
        .iter()
        .map(|(key, value)| format!("+define+{key}={}", value.render("", false)))
        .collect();

    let mut scripts = RtlScripts::default();
    let mut lines = Vec::new();
    let mut libraries = Vec::new();
    let mut verilog_files = Vec::new();
    let mut has_sv = false;

    for file in &fileset.files {
        let (command, mut args) = match &file.file_type {
            FileType::Verilog | FileType::SystemVerilog => {
                let is_sv = file.file_type == FileType::SystemVerilog;
                has_sv |= is_sv;
                verilog_files.push(to_slashes(&file.name));

                let mut args = options.vlog_options.clone();
                args.extend(define_flags.iter().cloned());
                if is_sv {
                    args.push("-sv".to_string());
                }
                args.extend(include_flags.iter().cloned());
                ("vlog", args)
            }
            FileType::Vhdl(standard) => {
                let mut args: Vec<String> = vhdl_standard_flag(*standard)
                    .map(str::to_string)
                    .into_iter()
                    .collect();
                args.extend(options.vcom_options.iter().cloned());
                ("vcom", args)
            }
            FileType::Tcl => {
                scripts.tcl_files.push(file.name.clone());
                continue;
            }
            FileType::User => continue,
            FileType::Unknown(tag) => {
                let message = format!("{} has unknown file type '{tag}'", file.name);
                warn!("{message}");
                scripts.warnings.push(Diagnostic::for_file(&file.name, message));
                continue;
            }
        };

        declare_library(&mut lines, &mut libraries, &file.logical_name);

        if command == "vlog" && common {
            continue;
        }

        args.extend([
            "-quiet".to_string(),
            "-work".to_string(),
            file.logical_name.clone(),
            to_slashes(&file.name),
        ]);
        lines.push(format!("{command} {}", args.join(" ")));
    }

    if common && !verilog_files.is_empty() {
        declare_library(&mut lines, &mut libraries, DEFAULT_LIBRARY);

        let mut args = options.vlog_options.clone();
        args.extend(define_flags);
        if has_sv {
            args.push("-sv".to_string());
        }
        args.extend(include_flags);
        args.extend([
            "-quiet".to_string(),
            "-work".to_string(),
            DEFAULT_LIBRARY.to_string(),
            "-mfcu".to_string(),
        ]);
        args.extend(verilog_files);
        lines.push(format!("vlog {}", args.join(" ")));
    }

    debug!(
        "{BUILD_RTL_TCL}: {} directives for {} libraries",
        lines.len(),
        libraries.len()
    );

    for line in lines {
        scripts.build_rtl.push_str(&line);
        scripts.build_rtl.push('\n');
    }
    scripts
}

/// Render `edalize_main.tcl`.
pub fn render_main_tcl(tcl_files: &[String]) -> String {
    let mut output = String::new();
    output.push_str("onerror { quit -code 1; }\n");
    output.push_str(&format!("do {BUILD_RTL_TCL}\n"));
    for file in tcl_files {
        output.push_str(&format!("do {file}\n"));
    }
    output
}

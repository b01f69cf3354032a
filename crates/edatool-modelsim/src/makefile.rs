//! Makefile generation.
//!
//! The Makefile compiles the design by running `edalize_main.tcl` in `vsim`
//! (target `work`), builds each VPI module as a shared object and runs the
//! simulation in batch (`run`) or GUI (`run-gui`) mode.

use crate::MAIN_TCL;
use edatool::VpiModule;
use std::path::Path;

/// Values substituted into the Makefile
#[derive(Debug, Clone, Default)]
pub struct MakefileParams<'a> {
    pub toplevel: &'a str,
    /// `key=value` pairs passed as `-g` options (Verilog parameters, then VHDL generics)
    pub parameters: Vec<String>,
    /// `key=value` pairs passed as `+` options
    pub plusargs: Vec<String>,
    pub vsim_options: &'a [String],
    pub vpi_modules: &'a [VpiModule],
}

/// Object file for a VPI source: same path, `.o` extension.
fn object_name(src: &str) -> String {
    Path::new(src).with_extension("o").to_string_lossy().into_owned()
}

/// Render the complete Makefile.
pub fn render_makefile(params: &MakefileParams<'_>) -> String {
    let modules: Vec<&str> = params.vpi_modules.iter().map(|m| m.name.as_str()).collect();
    let clean_targets: Vec<String> = modules.iter().map(|m| format!("clean_{m}")).collect();

    let mut output = String::new();

    output.push_str("#Generated by Edalize\n");
    output.push_str("ifndef MODEL_TECH\n");
    output.push_str("$(error Environment variable MODEL_TECH was not found. It should be set to <modelsim install path>/bin)\n");
    output.push_str("endif\n\n");

    output.push_str("CC ?= gcc\n");
    output.push_str("CFLAGS   := -fPIC -fno-stack-protector -g -std=c99\n");
    output.push_str("CXXFLAGS := -fPIC -fno-stack-protector -g\n\n");

    output.push_str("LD ?= ld\n");
    output.push_str("LDFLAGS := -shared -E\n\n");

    output.push_str("#Try to determine if ModelSim is 32- or 64-bit.\n");
    output.push_str("#To manually override, set the environment MTI_VCO_MODE to 32 or 64\n");
    output.push_str("ifeq ($(findstring 64, $(shell $(MODEL_TECH)/../vco)),)\n");
    output.push_str("CFLAGS   += -m32\n");
    output.push_str("CXXFLAGS += -m32\n");
    output.push_str("LDFLAGS  += -melf_i386\n");
    output.push_str("endif\n\n");

    output.push_str("RM ?= rm\n");
    output.push_str("INCS := -I$(MODEL_TECH)/../include\n\n");

    output.push_str("VSIM ?= $(MODEL_TECH)/vsim\n\n");

    output.push_str(&format!("TOPLEVEL      := {}\n", params.toplevel));
    output.push_str(&format!("VPI_MODULES   := {}\n", modules.join(" ")));
    output.push_str(&format!("PARAMETERS    ?= {}\n", params.parameters.join(" ")));
    output.push_str(&format!("PLUSARGS      ?= {}\n", params.plusargs.join(" ")));
    output.push_str(&format!("VSIM_OPTIONS  ?= {}\n", params.vsim_options.join(" ")));
    output.push_str("EXTRA_OPTIONS ?= $(VSIM_OPTIONS) $(addprefix -g,$(PARAMETERS)) $(addprefix +,$(PLUSARGS))\n\n");

    output.push_str("all: work $(VPI_MODULES)\n\n");

    // Exit code is the TESTSTATUS coverage attribute when it signals an error or fatal
    output.push_str("run: work $(VPI_MODULES)\n");
    output.push_str("\t$(VSIM) -c $(addprefix -pli ,$(VPI_MODULES)) $(EXTRA_OPTIONS) -do \"run -all; quit -code [expr [coverage attribute -name TESTSTATUS -concise] >= 2 ? [coverage attribute -name TESTSTATUS -concise] : 0]; exit\" $(TOPLEVEL)\n\n");

    output.push_str("run-gui: work $(VPI_MODULES)\n");
    output.push_str("\t$(VSIM) -gui $(addprefix -pli ,$(VPI_MODULES)) $(EXTRA_OPTIONS) $(TOPLEVEL)\n\n");

    output.push_str("work:\n");
    output.push_str(&format!("\t$(VSIM) -c -do \"do {MAIN_TCL}; exit\"\n\n"));

    output.push_str(&format!("clean: {}\n", clean_targets.join(" ")));

    for module in params.vpi_modules {
        output.push_str(&render_vpi_section(module));
    }

    output
}

/// Build and clean rules for one VPI module.
fn render_vpi_section(module: &VpiModule) -> String {
    let name = &module.name;
    let objs: Vec<String> = module.src_files.iter().map(|s| object_name(s)).collect();
    let libs: Vec<String> = module.libs.iter().map(|l| format!("-l{l}")).collect();
    let incs: Vec<String> = module.include_dirs.iter().map(|d| format!("-I{d}")).collect();

    let mut output = String::new();
    output.push('\n');
    output.push_str(&format!("{name}_OBJS := {}\n", objs.join(" ")));
    output.push_str(&format!("{name}_LIBS := {}\n", libs.join(" ")));
    output.push_str(&format!("{name}_INCS := $(INCS) {}\n\n", incs.join(" ")));

    output.push_str(&format!("$({name}_OBJS): CPPFLAGS := $({name}_INCS)\n\n"));

    output.push_str(&format!("{name}: $({name}_OBJS)\n"));
    output.push_str(&format!("\t$(LD) $(LDFLAGS) -o $@ $? $({name}_LIBS)\n\n"));

    output.push_str(&format!("clean_{name}:\n"));
    output.push_str(&format!("\t$(RM) $({name}_OBJS) {name}\n"));
    output
}

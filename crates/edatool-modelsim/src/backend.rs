//! Modelsim implementing the EdaTool trait

use crate::makefile::{render_makefile, MakefileParams};
use crate::options::{tool_doc, ModelsimOptions};
use crate::scripts::{render_main_tcl, render_rtl_scripts};
use crate::{BUILD_RTL_TCL, MAIN_TCL, MAKEFILE, TOOL_NAME};
use edatool::{
    check_unique_vpi_names, render_assignments, ConfigureReport, EdaError, EdaResult, EdaTool,
    ParamType, ParameterMap, ToolContext, ToolDoc,
};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

const ARG_TYPES: &[ParamType] = &[
    ParamType::Plusarg,
    ParamType::Vlogdefine,
    ParamType::Vlogparam,
    ParamType::Generic,
];

/// ModelSim/QuestaSim backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modelsim;

impl Modelsim {
    pub fn new() -> Self {
        Self
    }

    fn write_artifact(
        &self,
        ctx: &dyn ToolContext,
        name: &str,
        contents: &str,
    ) -> EdaResult<PathBuf> {
        let path = ctx.work_root().join(name);
        fs::write(&path, contents).map_err(|e| EdaError::io(&path, e))?;
        debug!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(path)
    }
}

impl EdaTool for Modelsim {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn arg_types(&self) -> &[ParamType] {
        ARG_TYPES
    }

    fn doc(&self) -> ToolDoc {
        tool_doc()
    }

    fn configure_main(&self, ctx: &dyn ToolContext) -> EdaResult<ConfigureReport> {
        let options = ModelsimOptions::from_value(ctx.tool_options(TOOL_NAME))?;
        let vpi_modules = ctx.vpi_modules();
        check_unique_vpi_names(vpi_modules)?;

        let fileset = ctx.fileset();
        let vlogdefines = ctx.parameters(ParamType::Vlogdefine)?;
        let scripts = render_rtl_scripts(&fileset, &options, &vlogdefines);

        let mut parameters = render_assignments(&ctx.parameters(ParamType::Vlogparam)?, false);
        parameters.extend(render_assignments(&ctx.parameters(ParamType::Generic)?, true));
        let makefile = render_makefile(&MakefileParams {
            toplevel: ctx.toplevel(),
            parameters,
            plusargs: render_assignments(&ctx.parameters(ParamType::Plusarg)?, false),
            vsim_options: &options.vsim_options,
            vpi_modules,
        });

        let artifacts = vec![
            self.write_artifact(ctx, MAIN_TCL, &render_main_tcl(&scripts.tcl_files))?,
            self.write_artifact(ctx, BUILD_RTL_TCL, &scripts.build_rtl)?,
            self.write_artifact(ctx, MAKEFILE, &makefile)?,
        ];

        info!(
            "Configured {} source files and {} VPI modules ({} warnings)",
            fileset.files.len(),
            vpi_modules.len(),
            scripts.warnings.len()
        );

        Ok(ConfigureReport {
            artifacts,
            warnings: scripts.warnings,
        })
    }

    fn run_main(&self, ctx: &dyn ToolContext, plusargs: &ParameterMap) -> EdaResult<()> {
        let mut args = vec!["run".to_string()];
        if !plusargs.is_empty() {
            args.push(format!(
                "PLUSARGS={}",
                render_assignments(plusargs, false).join(" ")
            ));
        }
        ctx.run_tool("make", &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_identity() {
        let tool = Modelsim::new();
        assert_eq!(tool.name(), "modelsim");
        assert!(tool.arg_types().contains(&ParamType::Plusarg));
        assert!(tool.arg_types().contains(&ParamType::Generic));
        assert!(!tool.arg_types().contains(&ParamType::Cmdlinearg));
        assert_eq!(tool.doc().description, "ModelSim simulator from Mentor Graphics");
    }
}

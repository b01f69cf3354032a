//! Session tests with a minimal backend
//!
//! These tests verify what a backend sees through the ToolContext and how
//! the session drives configure, build and run.

use edatool::{
    ConfigureReport, EdaError, EdaResult, EdaTool, Edam, FileType, OptionDoc, ParamType,
    ParamValue, ParameterMap, RecordingRunner, Session, ToolContext, ToolDoc,
};
use serde_json::json;
use std::fs;

/// Backend that writes one file listing what it was given.
struct EchoTool;

impl EdaTool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn arg_types(&self) -> &[ParamType] {
        &[ParamType::Plusarg, ParamType::Generic]
    }

    fn doc(&self) -> ToolDoc {
        ToolDoc {
            description: "Echo backend".to_string(),
            members: vec![OptionDoc::new("flavor", "String", "Output flavor")],
            lists: Vec::new(),
        }
    }

    fn configure_main(&self, ctx: &dyn ToolContext) -> EdaResult<ConfigureReport> {
        let fileset = ctx.fileset();
        let mut output = format!("top={}\n", ctx.toplevel());
        for file in &fileset.files {
            output.push_str(&format!("{} {} {}\n", file.name, file.file_type, file.logical_name));
        }
        for dir in &fileset.include_dirs {
            output.push_str(&format!("inc {dir}\n"));
        }
        if let Some(flavor) = ctx.tool_options("echo").and_then(|o| o["flavor"].as_str()) {
            output.push_str(&format!("flavor {flavor}\n"));
        }
        let path = ctx.work_root().join("echo.txt");
        fs::write(&path, output).map_err(|e| EdaError::io(&path, e))?;
        Ok(ConfigureReport {
            artifacts: vec![path],
            warnings: Vec::new(),
        })
    }

    fn run_main(&self, ctx: &dyn ToolContext, plusargs: &ParameterMap) -> EdaResult<()> {
        let args: Vec<String> = plusargs
            .iter()
            .map(|(k, v)| format!("+{k}={}", v.render("", false)))
            .collect();
        ctx.run_tool("echo-sim", &args)
    }
}

fn project() -> Edam {
    let doc = json!({
        "name": "demo",
        "toplevel": "demo_tb",
        "files": [
            {"name": "inc/cfg.svh", "file_type": "systemVerilogSource", "is_include_file": true},
            {"name": "rtl/demo.sv", "file_type": "systemVerilogSource"},
            {"name": "rtl/pkg.vhd", "file_type": "vhdlSource-93", "logical_name": "pkgs"}
        ],
        "parameters": {
            "verbose": {"datatype": "bool", "paramtype": "plusarg", "default": false},
            "WIDTH": {"datatype": "int", "paramtype": "generic", "default": 4}
        },
        "tool_options": {"echo": {"flavor": "plain"}}
    });
    Edam::from_json_str(&doc.to_string()).unwrap()
}

#[test]
fn test_configure_creates_work_root() {
    let dir = tempfile::tempdir().unwrap();
    let work_root = dir.path().join("nested").join("build");
    let session = Session::with_runner(project(), &work_root, Box::new(RecordingRunner::new()));

    let report = session.configure(&EchoTool).unwrap();

    assert_eq!(report.artifacts, vec![work_root.join("echo.txt")]);
    let echoed = fs::read_to_string(work_root.join("echo.txt")).unwrap();
    assert_eq!(
        echoed,
        "top=demo_tb\n\
         rtl/demo.sv systemVerilogSource work\n\
         rtl/pkg.vhd vhdlSource-93 pkgs\n\
         inc inc\n\
         flavor plain\n"
    );
}

#[test]
fn test_context_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::with_runner(project(), dir.path(), Box::new(RecordingRunner::new()));

    let generics = session.parameters(ParamType::Generic).unwrap();
    assert_eq!(generics["WIDTH"], ParamValue::Int(4));
    assert!(session.parameters(ParamType::Vlogdefine).unwrap().is_empty());

    let fileset = session.fileset();
    assert_eq!(fileset.files[0].file_type, FileType::SystemVerilog);
    assert!(session.vpi_modules().is_empty());
    assert!(session.tool_options("modelsim").is_none());
}

#[test]
fn test_run_merges_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::new();
    let session = Session::with_runner(project(), dir.path(), Box::new(runner.clone()));

    session.run(&EchoTool, &[]).unwrap();
    session.run(&EchoTool, &["--verbose".to_string()]).unwrap();

    let calls = runner.invocations();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].command_line(), "echo-sim +verbose=0");
    assert_eq!(calls[1].command_line(), "echo-sim +verbose=1");
    assert!(calls.iter().all(|c| c.cwd == dir.path()));
}

#[test]
fn test_build_default_runs_make() {
    let dir = tempfile::tempdir().unwrap();
    let runner = RecordingRunner::new();
    let session = Session::with_runner(project(), dir.path(), Box::new(runner.clone()));

    session.build(&EchoTool).unwrap();

    assert_eq!(runner.invocations()[0].command_line(), "make");
}

#[test]
fn test_invalid_default_surfaces_on_run() {
    let doc = json!({
        "name": "broken",
        "parameters": {
            "seed": {"datatype": "int", "paramtype": "plusarg", "default": "many"}
        }
    });
    let edam = Edam::from_json_str(&doc.to_string()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let session = Session::with_runner(edam, dir.path(), Box::new(RecordingRunner::new()));

    let err = session.run(&EchoTool, &[]).unwrap_err();
    assert!(matches!(err, EdaError::InvalidParameter { ref name, .. } if name == "seed"));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.eda.json");
    fs::write(&path, r#"{"name": "from_file", "toplevel": "tb"}"#).unwrap();

    let edam = Edam::load(&path).unwrap();
    assert_eq!(edam.name, "from_file");

    let err = Edam::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, EdaError::Io { .. }));
}

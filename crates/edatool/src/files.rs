//! Source files and file-set resolution.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Library used when a file does not name one.
pub const DEFAULT_LIBRARY: &str = "work";

/// VHDL language revision selected by a `vhdlSource-<rev>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VhdlStandard {
    Vhdl87,
    Vhdl93,
    Vhdl2008,
}

/// Kind of a source file, parsed from its EDAM file-type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileType {
    /// `verilogSource`, with or without a revision suffix
    Verilog,
    /// `systemVerilogSource`, with or without a revision suffix
    SystemVerilog,
    /// `vhdlSource`, optionally with a known revision suffix
    Vhdl(Option<VhdlStandard>),
    /// `tclSource`
    Tcl,
    /// `user`: files only meaningful to user scripts
    User,
    /// Anything else; keeps the original tag for diagnostics
    Unknown(String),
}

impl FileType {
    /// Parse an EDAM file-type tag.
    pub fn from_tag(tag: &str) -> Self {
        if tag.starts_with("verilogSource") {
            FileType::Verilog
        } else if tag.starts_with("systemVerilogSource") {
            FileType::SystemVerilog
        } else if tag.starts_with("vhdlSource") {
            let standard = if tag.ends_with("-87") {
                Some(VhdlStandard::Vhdl87)
            } else if tag.ends_with("-93") {
                Some(VhdlStandard::Vhdl93)
            } else if tag.ends_with("-2008") {
                Some(VhdlStandard::Vhdl2008)
            } else {
                None
            };
            FileType::Vhdl(standard)
        } else if tag == "tclSource" {
            FileType::Tcl
        } else if tag == "user" {
            FileType::User
        } else {
            FileType::Unknown(tag.to_string())
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Verilog => write!(f, "verilogSource"),
            FileType::SystemVerilog => write!(f, "systemVerilogSource"),
            FileType::Vhdl(None) => write!(f, "vhdlSource"),
            FileType::Vhdl(Some(VhdlStandard::Vhdl87)) => write!(f, "vhdlSource-87"),
            FileType::Vhdl(Some(VhdlStandard::Vhdl93)) => write!(f, "vhdlSource-93"),
            FileType::Vhdl(Some(VhdlStandard::Vhdl2008)) => write!(f, "vhdlSource-2008"),
            FileType::Tcl => write!(f, "tclSource"),
            FileType::User => write!(f, "user"),
            FileType::Unknown(tag) => write!(f, "{tag}"),
        }
    }
}

/// A file entry of the project description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdamFile {
    /// Path relative to the work root
    pub name: String,

    /// EDAM file-type tag
    #[serde(default)]
    pub file_type: String,

    /// Header-style file whose directory goes on the include path
    #[serde(default)]
    pub is_include_file: bool,

    /// Explicit include directory for an include file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_path: Option<String>,

    /// Compilation library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_name: Option<String>,
}

/// A resolved, compilable source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub file_type: FileType,
    /// Never empty; [`DEFAULT_LIBRARY`] when the project left it unset
    pub logical_name: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, file_type: FileType) -> Self {
        Self {
            name: name.into(),
            file_type,
            logical_name: DEFAULT_LIBRARY.to_string(),
        }
    }

    /// Builder pattern: place the file in a library.
    pub fn with_library(mut self, logical_name: impl Into<String>) -> Self {
        let logical_name = logical_name.into();
        if !logical_name.is_empty() {
            self.logical_name = logical_name;
        }
        self
    }
}

/// Source files plus the include directories contributed by include files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    pub files: Vec<SourceFile>,
    pub include_dirs: Vec<String>,
}

impl FileSet {
    /// Split EDAM file entries into source files and include directories.
    ///
    /// Include directories keep first-seen order and appear once.
    pub fn resolve(entries: &[EdamFile]) -> Self {
        let mut fileset = FileSet::default();

        for entry in entries {
            if entry.is_include_file {
                let dir = match entry.include_path.as_deref() {
                    Some(path) if !path.is_empty() => path.to_string(),
                    _ => parent_dir(&entry.name),
                };
                if !fileset.include_dirs.contains(&dir) {
                    fileset.include_dirs.push(dir);
                }
            } else {
                let file = SourceFile::new(&entry.name, FileType::from_tag(&entry.file_type))
                    .with_library(entry.logical_name.clone().unwrap_or_default());
                fileset.files.push(file);
            }
        }

        fileset
    }
}

fn parent_dir(name: &str) -> String {
    match Path::new(name).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, file_type: &str) -> EdamFile {
        EdamFile {
            name: name.to_string(),
            file_type: file_type.to_string(),
            is_include_file: false,
            include_path: None,
            logical_name: None,
        }
    }

    #[test]
    fn test_file_type_prefixes() {
        assert_eq!(FileType::from_tag("verilogSource"), FileType::Verilog);
        assert_eq!(FileType::from_tag("verilogSource-2005"), FileType::Verilog);
        assert_eq!(
            FileType::from_tag("systemVerilogSource-3.1a"),
            FileType::SystemVerilog
        );
        assert_eq!(FileType::from_tag("tclSource"), FileType::Tcl);
        assert_eq!(FileType::from_tag("user"), FileType::User);
    }

    #[test]
    fn test_vhdl_standards() {
        assert_eq!(FileType::from_tag("vhdlSource"), FileType::Vhdl(None));
        assert_eq!(
            FileType::from_tag("vhdlSource-87"),
            FileType::Vhdl(Some(VhdlStandard::Vhdl87))
        );
        assert_eq!(
            FileType::from_tag("vhdlSource-93"),
            FileType::Vhdl(Some(VhdlStandard::Vhdl93))
        );
        assert_eq!(
            FileType::from_tag("vhdlSource-2008"),
            FileType::Vhdl(Some(VhdlStandard::Vhdl2008))
        );
    }

    #[test]
    fn test_unknown_keeps_tag() {
        let file_type = FileType::from_tag("xdc");
        assert_eq!(file_type, FileType::Unknown("xdc".to_string()));
        assert_eq!(file_type.to_string(), "xdc");
        // Exact match only for tcl
        assert!(matches!(FileType::from_tag("tclSourceX"), FileType::Unknown(_)));
    }

    #[test]
    fn test_resolve_defaults_library() {
        let mut lib_file = entry("rtl/b.vhd", "vhdlSource");
        lib_file.logical_name = Some("mylib".to_string());
        let mut empty_lib = entry("rtl/c.v", "verilogSource");
        empty_lib.logical_name = Some(String::new());

        let fileset = FileSet::resolve(&[entry("rtl/a.v", "verilogSource"), lib_file, empty_lib]);

        assert_eq!(fileset.files.len(), 3);
        assert_eq!(fileset.files[0].logical_name, "work");
        assert_eq!(fileset.files[1].logical_name, "mylib");
        assert_eq!(fileset.files[2].logical_name, "work");
    }

    #[test]
    fn test_resolve_include_dirs() {
        let mut header = entry("rtl/inc/defs.vh", "verilogSource");
        header.is_include_file = true;
        let mut same_dir = entry("rtl/inc/more.vh", "verilogSource");
        same_dir.is_include_file = true;
        let mut bare = entry("top.vh", "verilogSource");
        bare.is_include_file = true;
        let mut explicit = entry("gen/x.svh", "systemVerilogSource");
        explicit.is_include_file = true;
        explicit.include_path = Some("gen".to_string());

        let fileset = FileSet::resolve(&[
            header,
            entry("rtl/top.v", "verilogSource"),
            same_dir,
            bare,
            explicit,
        ]);

        assert_eq!(fileset.files.len(), 1);
        assert_eq!(fileset.include_dirs, vec!["rtl/inc", ".", "gen"]);
    }
}

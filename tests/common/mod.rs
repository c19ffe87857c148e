//! Shared fixtures for integration tests

#![allow(dead_code)]

use kodegen_bundler_embed::bundler::{Arch, CommandRunner, Platform, ToolCommand, ToolOutput};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Framework bundle plus generated sources inside a temp directory.
pub struct Fixture {
    pub _tmp: tempfile::TempDir,
    pub framework: PathBuf,
    pub sources_dir: PathBuf,
}

/// Temp directory whose own path names no platform or architecture.
pub fn neutral_tempdir() -> tempfile::TempDir {
    loop {
        let tmp = tempfile::tempdir().unwrap();
        let neutral = {
            let path = tmp.path().to_string_lossy();
            Platform::find(&path).is_none() && Arch::find(&path).is_none()
        };
        if neutral {
            return tmp;
        }
    }
}

/// Creates `<root>/build/bin/<target>/releaseFramework/<name>.framework`
/// with a binary, an Info.plist and (optionally) a `Modules` directory.
pub fn framework_fixture(target: &str, name: &str, with_modules: bool) -> Fixture {
    let tmp = neutral_tempdir();
    let framework = tmp
        .path()
        .join("build/bin")
        .join(target)
        .join("releaseFramework")
        .join(format!("{name}.framework"));
    fs::create_dir_all(&framework).unwrap();
    fs::write(framework.join(name), b"original-binary").unwrap();
    if with_modules {
        fs::create_dir_all(framework.join("Modules")).unwrap();
        fs::write(
            framework.join("Modules/module.modulemap"),
            format!("framework module {name} {{ umbrella header \"{name}.h\" }}"),
        )
        .unwrap();
    }

    let sources_dir = tmp.path().join("build/generated/swift");
    fs::create_dir_all(&sources_dir).unwrap();
    fs::write(
        sources_dir.join(format!("{name}+Async.swift")),
        "public func overlayVersion() -> Int { 1 }",
    )
    .unwrap();

    Fixture {
        _tmp: tmp,
        framework,
        sources_dir,
    }
}

/// Records invocations; creates `-o` and `-emit-module-path` outputs on success.
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: Mutex<Vec<ToolCommand>>,
    pub fail_program: Option<PathBuf>,
}

impl RecordingRunner {
    pub fn failing(program: &str) -> Self {
        Self {
            fail_program: Some(PathBuf::from(program)),
            ..Default::default()
        }
    }

    pub fn programs(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.program().to_path_buf())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &ToolCommand) -> std::io::Result<ToolOutput> {
        self.calls.lock().unwrap().push(command.clone());

        if self.fail_program.as_deref() == Some(command.program()) {
            return Ok(ToolOutput {
                code: Some(1),
                output: "error: scripted failure".to_string(),
            });
        }

        if let Some(out) = command.flag_value("-o") {
            fs::write(out, b"merged-binary")?;
        }
        if let Some(module) = command.flag_value("-emit-module-path") {
            let module = Path::new(module);
            fs::create_dir_all(module.parent().unwrap())?;
            fs::write(module, b"swiftmodule")?;
            fs::write(module.with_extension("swiftinterface"), b"// swift-interface-format-version: 1.0")?;
        }

        Ok(ToolOutput {
            code: Some(0),
            output: String::new(),
        })
    }
}

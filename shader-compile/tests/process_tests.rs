// shader-compile/tests/process_tests.rs
//
// Drives the real ProcessExecutor through a small shell script standing in for glslc.
#![cfg(unix)]

use shader_compile::{
    BuildError, CompileOrchestrator, CompilerExecutor, ModuleError, ProcessExecutor,
};
use shader_core::{ModuleRegistry, RelativePath, ShaderModule, ShaderStage};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Copies the source to the `-o` target, or fails like glslc when the source says BROKEN.
const FAKE_GLSLC: &str = r#"
out=""
src=""
for arg in "$@"; do
  case "$arg" in
    -o*) out="${arg#-o}" ;;
    -I*|-f*|--*) ;;
    *) src="$arg" ;;
  esac
done
if grep -q BROKEN "$src"; then
  echo "$src:1: error: BROKEN shader" >&2
  exit 3
fi
echo "$src: warning: version directive missing" >&2
cp "$src" "$out"
"#;

fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-glslc.sh");
    fs::write(&path, body).unwrap();
    path
}

// Running the script through /bin/sh avoids exec'ing a file we just wrote.
fn fake_compiler(dir: &Path) -> ProcessExecutor {
    ProcessExecutor::new("/bin/sh").with_leading_args([write_script(dir, FAKE_GLSLC)])
}

fn module(name: &str, source: &str, output: &str) -> ShaderModule {
    ShaderModule::new(name)
        .with_source(RelativePath::source(source).unwrap())
        .with_output(RelativePath::output(output).unwrap())
}

#[test]
fn test_real_process_writes_artifacts_and_reports_failures() {
    let tmp = tempfile::tempdir().unwrap();
    let source_root = tmp.path().join("proj");
    let build_root = source_root.join("build");
    fs::create_dir_all(source_root.join("debug")).unwrap();
    fs::write(source_root.join("debug").join("apply.vert"), "void main() {}\n").unwrap();
    fs::write(source_root.join("debug").join("bad.frag"), "BROKEN\n").unwrap();

    let mut registry = ModuleRegistry::new();
    registry
        .register(module("BadFrag", "bad.frag", "bad_frag.spv").with_stage(ShaderStage::Fragment))
        .unwrap();
    registry
        .register(module("ApplyVert", "apply.vert", "apply_vert.spv"))
        .unwrap();

    let orchestrator = CompileOrchestrator::new(fake_compiler(tmp.path()))
        .with_base_dir(RelativePath::source("debug").unwrap());
    let err = orchestrator.run(&registry, &source_root, &build_root).unwrap_err();

    let artifact = build_root.join("debug").join("apply_vert.spv");
    assert_eq!(fs::read_to_string(&artifact).unwrap(), "void main() {}\n");
    assert!(!build_root.join("debug").join("bad_frag.spv").exists());

    let BuildError::Aggregate(aggregate) = err else {
        panic!("expected aggregate error");
    };
    assert_eq!(aggregate.failures.len(), 1);
    match &aggregate.failures[0] {
        ModuleError::CompilationFailed {
            module,
            exit_code,
            stderr,
        } => {
            assert_eq!(module, "BadFrag");
            assert_eq!(*exit_code, Some(3));
            assert!(stderr.contains("BROKEN shader"));
        }
        other => panic!("expected CompilationFailed, got {other:?}"),
    }
}

#[test]
fn test_stderr_is_captured_on_success() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("ok.comp");
    fs::write(&source, "void main() {}\n").unwrap();

    let executor = fake_compiler(tmp.path());
    let mut out_arg = OsString::from("-o");
    out_arg.push(tmp.path().join("ok.spv"));
    let outcome = executor
        .execute(&[out_arg, source.into_os_string()])
        .unwrap();

    assert!(outcome.success());
    assert!(outcome.stderr.contains("version directive missing"));
    assert!(tmp.path().join("ok.spv").is_file());
}

#[test]
fn test_missing_compiler_is_launch_error() {
    let tmp = tempfile::tempdir().unwrap();
    let mut registry = ModuleRegistry::new();
    registry.register(module("A", "a.vert", "a.spv")).unwrap();

    let orchestrator = CompileOrchestrator::new(ProcessExecutor::new(tmp.path().join("no-such-glslc")))
        .with_base_dir(RelativePath::source("").unwrap());
    let err = orchestrator.run(&registry, tmp.path(), tmp.path()).unwrap_err();

    let BuildError::Aggregate(aggregate) = err else {
        panic!("expected aggregate error");
    };
    assert!(matches!(
        aggregate.failures[0],
        ModuleError::CompilerLaunch { ref module, .. } if module == "A"
    ));
}

#[test]
fn test_hung_compiler_times_out() {
    let tmp = tempfile::tempdir().unwrap();
    let script = write_script(tmp.path(), "exec sleep 10\n");
    let executor = ProcessExecutor::new("/bin/sh")
        .with_leading_args([script])
        .with_timeout(Some(Duration::from_millis(200)));

    let mut registry = ModuleRegistry::new();
    registry.register(module("Slow", "slow.comp", "slow.spv")).unwrap();

    let orchestrator =
        CompileOrchestrator::new(executor).with_base_dir(RelativePath::source("").unwrap());
    let err = orchestrator.run(&registry, tmp.path(), tmp.path()).unwrap_err();

    let BuildError::Aggregate(aggregate) = err else {
        panic!("expected aggregate error");
    };
    match &aggregate.failures[0] {
        ModuleError::TimedOut { module, message } => {
            assert_eq!(module, "Slow");
            assert!(message.contains("did not exit within 200ms"));
        }
        other => panic!("expected TimedOut, got {other:?}"),
    }
}

#[test]
fn test_background_process_holding_stderr_does_not_block() {
    let tmp = tempfile::tempdir().unwrap();
    // The compiler exits at once but leaves a child with the inherited stderr pipe.
    let script = write_script(tmp.path(), "sleep 5 &\necho warning >&2\nexit 0\n");
    let executor = ProcessExecutor::new("/bin/sh")
        .with_leading_args([script])
        .with_timeout(Some(Duration::from_millis(500)));

    let started = std::time::Instant::now();
    let outcome = executor.execute(&[]).unwrap();

    assert!(outcome.success());
    assert!(started.elapsed() < Duration::from_secs(3));
}

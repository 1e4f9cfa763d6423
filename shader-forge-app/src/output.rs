use colored::Colorize;
use shader_compile::{BuildReport, CompileJob};
use std::ffi::OsString;
use std::path::Path;

/// Renders one invocation as a shell-like command line.
pub fn format_invocation(program: &Path, leading_args: &[OsString], job: &CompileJob) -> String {
    let mut line = program.display().to_string();
    for arg in leading_args.iter().chain(&job.args) {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Prints the planned invocations of a dry run, one per module.
pub fn print_plan(program: &Path, leading_args: &[OsString], jobs: &[CompileJob]) {
    for job in jobs {
        println!(
            "{} {}",
            format!("[{}]", job.module).cyan(),
            format_invocation(program, leading_args, job)
        );
    }
}

pub fn print_report(report: &BuildReport) {
    for module in &report.compiled {
        println!(
            "{} {} -> {}",
            "compiled".green().bold(),
            module.name,
            module.output.display()
        );
    }
    println!(
        "{} {} shader module(s)",
        "finished".green().bold(),
        report.compiled.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use shader_core::ShaderStage;
    use std::path::PathBuf;

    #[test]
    fn test_format_invocation() {
        let job = CompileJob {
            module: "ApplyVert".to_string(),
            stage: ShaderStage::Auto,
            source: PathBuf::from("/proj/debug/apply.vert"),
            output: PathBuf::from("/proj/build/debug/apply_vert.spv"),
            args: vec![
                OsString::from("-I/proj/debug"),
                OsString::from("-o/proj/build/debug/apply_vert.spv"),
                OsString::from("/proj/debug/apply.vert"),
            ],
        };
        let line = format_invocation(
            Path::new("glslc"),
            &[OsString::from("--target-env=vulkan1.3")],
            &job,
        );
        assert_eq!(
            line,
            "glslc --target-env=vulkan1.3 -I/proj/debug -o/proj/build/debug/apply_vert.spv /proj/debug/apply.vert"
        );
    }
}

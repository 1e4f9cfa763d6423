//! # Shader Forge Application (Binary)
//!
//! Main executable entry point.

fn main() {
    std::process::exit(match shader_forge_app::main() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    });
}

//! Synchronous execution of external commands. The child inherits stdout
//! and stderr; nothing is captured, and there is no timeout.

use std::path::Path;
use std::process::Command;

use crate::command::MesonCommands;

/// Print the fully expanded command line, then run it to completion in the
/// given working directory. True iff the process exited with status zero.
pub fn exec(cmd: &[String], working_dir: &Path) -> bool {
    println!(">>> {}", cmd.join(" "));
    let Some((program, args)) = cmd.split_first() else {
        return false;
    };
    match Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .status()
    {
        Ok(status) => status.success(),
        Err(err) => {
            eprintln!("'{}': {}", program, err);
            false
        }
    }
}

/// Configure the build directory if it does not exist yet, then compile.
/// meson owns incrementality; an existing build directory is reused as is.
pub fn meson_build(
    source_dir: &Path,
    cross_file: Option<&Path>,
    options: &[(String, String)],
    build_dir: &Path,
) -> bool {
    if !build_dir.exists()
        && !exec(&MesonCommands::setup(cross_file, options, build_dir), source_dir)
    {
        return false;
    }
    exec(&MesonCommands::compile(), build_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_exec_reports_success() {
        assert!(exec(&cmd(&["true"]), Path::new(".")));
    }

    #[test]
    fn test_exec_reports_failure() {
        assert!(!exec(&cmd(&["false"]), Path::new(".")));
    }

    #[test]
    fn test_exec_missing_binary_is_failure() {
        assert!(!exec(&cmd(&["hearth-no-such-binary"]), Path::new(".")));
    }

    #[test]
    fn test_exec_empty_command_is_failure() {
        assert!(!exec(&[], Path::new(".")));
    }

    #[test]
    fn test_exec_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();
        assert!(exec(&cmd(&["test", "-f", "marker"]), dir.path()));
        assert!(!exec(&cmd(&["test", "-f", "marker"]), Path::new("/")));
    }
}

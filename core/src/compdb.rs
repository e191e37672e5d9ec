//! Post-processing of meson's `compile_commands.json` so clang-tidy can
//! consume it. clang-tidy chokes on GCC-only flags and cannot locate the
//! cross toolchain's default include directories on its own, so the flags
//! are stripped and the directories appended as `-isystem` entries.

use anyhow::{bail, Context};
use std::fs;
use std::path::Path;
use std::process::Command;

const GCC_ONLY_OPTIONS: &[&str] = &["-mincoming-stack-boundary=3"];

const SEARCH_LIST_START: &str = "#include <...> search starts here:";
const SEARCH_LIST_END: &str = "End of search list.";

pub fn post_process(
    database: &Path,
    cpp: &Path,
    sysroot: &Path,
    need_system_headers: bool,
) -> anyhow::Result<()> {
    if !database.exists() {
        return Ok(());
    }

    let system_headers = if need_system_headers {
        detect_system_headers(cpp)?
    } else {
        Vec::new()
    };

    let content = fs::read_to_string(database)
        .with_context(|| format!("Failed to read compilation database: {}", database.display()))?;
    let mut entries: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse compilation database: {}", database.display()))?;

    // The libc include directory is already covered by --sysroot; repeating
    // it as -isystem makes clang-tidy lose other libc headers.
    let libc_include = sysroot.join("usr").join("include");

    for entry in &mut entries {
        let Some(object) = entry.as_object_mut() else {
            continue;
        };
        let Some(command) = object.get("command").and_then(|c| c.as_str()) else {
            continue;
        };

        let mut parts: Vec<String> = command
            .split(' ')
            .filter(|option| !GCC_ONLY_OPTIONS.contains(option))
            .map(str::to_string)
            .collect();

        for include in &system_headers {
            if Path::new(include) == libc_include {
                continue;
            }
            parts.insert(1, format!("-isystem{}", include));
        }

        object.insert(
            "command".to_string(),
            serde_json::Value::String(parts.join(" ")),
        );
    }

    let rewritten = serde_json::to_string_pretty(&entries)
        .context("Failed to serialize compilation database")?;
    fs::write(database, rewritten)
        .with_context(|| format!("Failed to write compilation database: {}", database.display()))?;
    Ok(())
}

/// Ask the cross g++ for its default include directories by preprocessing an
/// empty source file in verbose mode and parsing the search list it prints.
fn detect_system_headers(cpp: &Path) -> anyhow::Result<Vec<String>> {
    let output = Command::new(cpp)
        .args(["-E", "-xc++", "-v", "/dev/null"])
        .output()
        .with_context(|| format!("Failed to run '{}'", cpp.display()))?;
    if !output.status.success() {
        bail!(
            "'{}': querying system header directories failed",
            cpp.display()
        );
    }
    Ok(parse_search_list(&String::from_utf8_lossy(&output.stderr)))
}

fn parse_search_list(stderr: &str) -> Vec<String> {
    let mut includes = Vec::new();
    let mut in_search_list = false;
    for line in stderr.lines() {
        if line.contains(SEARCH_LIST_END) {
            in_search_list = false;
            continue;
        }
        if line.contains(SEARCH_LIST_START) {
            in_search_list = true;
            continue;
        }
        if in_search_list {
            includes.push(line.trim().to_string());
        }
    }
    includes
}

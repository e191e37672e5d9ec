//! Generation of the meson cross-file that points user-space app builds at
//! the emberOS toolchain sysroot.

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Arch;

pub const TEMPLATE_FILE: &str = "x86_64-ember-template.txt";

/// The single placeholder token the template must contain.
pub const SYSROOT_TOKEN: &str = "@SYSROOT@";

pub fn cross_file_name(arch: Arch) -> String {
    format!("{}-ember.txt", arch)
}

/// Read the template and substitute the sysroot token. Pure with respect to
/// the filesystem: identical template and sysroot always yield identical
/// content.
pub fn generate(template: &Path, sysroot: &Path) -> anyhow::Result<String> {
    let content = fs::read_to_string(template)
        .with_context(|| format!("Failed to read cross-file template: {}", template.display()))?;
    Ok(content.replace(SYSROOT_TOKEN, &sysroot.display().to_string()))
}

pub fn write(build_dir: &Path, arch: Arch, content: &str) -> anyhow::Result<PathBuf> {
    let path = build_dir.join(cross_file_name(arch));
    fs::write(&path, content)
        .with_context(|| format!("Failed to write cross file: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "[properties]\nsys_root = '@SYSROOT@'\n";

    fn write_template(dir: &Path) -> PathBuf {
        let path = dir.join(TEMPLATE_FILE);
        fs::write(&path, TEMPLATE).unwrap();
        path
    }

    #[test]
    fn test_generate_substitutes_sysroot() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());

        let content = generate(&template, Path::new("/opt/cross")).unwrap();
        assert_eq!(content, "[properties]\nsys_root = '/opt/cross'\n");
        assert!(!content.contains(SYSROOT_TOKEN));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());

        let first = generate(&template, Path::new("/opt/cross")).unwrap();
        let second = generate(&template, Path::new("/opt/cross")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_fails_without_template() {
        let err = generate(Path::new("/no/such/template.txt"), Path::new("/opt/cross"));
        assert!(err.is_err());
    }

    #[test]
    fn test_write_uses_arch_specific_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), Arch::X86_64, "content").unwrap();
        assert_eq!(path.file_name().unwrap(), "x86_64-ember.txt");
        assert_eq!(fs::read_to_string(path).unwrap(), "content");
    }
}

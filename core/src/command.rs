use std::path::Path;

use crate::config::BuildType;

/// Composition of meson invocations. Kept free of process spawning so the
/// exact command lines are testable.
pub struct MesonCommands;

impl MesonCommands {
    pub fn setup(
        cross_file: Option<&Path>,
        options: &[(String, String)],
        build_dir: &Path,
    ) -> Vec<String> {
        let mut cmd = vec!["meson".to_string(), "setup".to_string()];
        if let Some(cross_file) = cross_file {
            cmd.push("--cross-file".to_string());
            cmd.push(cross_file.display().to_string());
        }
        for (key, value) in options {
            cmd.push(format!("-D{}={}", key, value));
        }
        cmd.push(build_dir.display().to_string());
        cmd
    }

    pub fn compile() -> Vec<String> {
        vec!["meson".to_string(), "compile".to_string()]
    }
}

/// Composition of the collaborator script invocations.
pub struct ScriptCommands;

impl ScriptCommands {
    pub fn build_image(
        image: &Path,
        kernel_elf: &Path,
        os_elf: &Path,
        image_size: u64,
        loader_dir: &Path,
        apps: &[std::path::PathBuf],
        app_install_dir: &str,
    ) -> Vec<String> {
        let app_list = apps
            .iter()
            .map(|app| app.display().to_string())
            .collect::<Vec<_>>()
            .join(",");
        vec![
            "scripts/build-image.sh".to_string(),
            image.display().to_string(),
            kernel_elf.display().to_string(),
            os_elf.display().to_string(),
            image_size.to_string(),
            loader_dir.display().to_string(),
            app_list,
            app_install_dir.to_string(),
        ]
    }

    pub fn copy_to_image(image: &Path, destination: &str, source: &Path) -> Vec<String> {
        vec![
            "scripts/copy-file-to-image.sh".to_string(),
            image.display().to_string(),
            destination.to_string(),
            source.display().to_string(),
        ]
    }

    pub fn install(
        build: BuildType,
        build_dir: &Path,
        image: &Path,
        kernel_elf: &Path,
        os_elf: &Path,
    ) -> Vec<String> {
        vec![
            "scripts/install.sh".to_string(),
            build.to_string(),
            build_dir.display().to_string(),
            image.display().to_string(),
            kernel_elf.display().to_string(),
            os_elf.display().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_meson_setup_with_cross_file() {
        let cmd = MesonCommands::setup(
            Some(Path::new("/root/cross.txt")),
            &[],
            Path::new("Build/x86_64-debug"),
        );
        assert_eq!(
            cmd,
            vec!["meson", "setup", "--cross-file", "/root/cross.txt", "Build/x86_64-debug"]
        );
    }

    #[test]
    fn test_meson_setup_with_options() {
        let options = [
            ("qemu_host".to_string(), "true".to_string()),
            ("build".to_string(), "debug".to_string()),
        ];
        let cmd = MesonCommands::setup(None, &options, Path::new("Build"));
        assert_eq!(
            cmd,
            vec!["meson", "setup", "-Dqemu_host=true", "-Dbuild=debug", "Build"]
        );
    }

    #[test]
    fn test_meson_compile() {
        assert_eq!(MesonCommands::compile(), vec!["meson", "compile"]);
    }

    #[test]
    fn test_build_image_joins_apps_with_commas() {
        let apps = vec![PathBuf::from("/r/App/A/Build/A.app"), PathBuf::from("/r/App/B/Build/B.app")];
        let cmd = ScriptCommands::build_image(
            Path::new("/r/Hearth/Build/x86_64-debug/emberOS.image"),
            Path::new("/r/Kernel/Build/x86_64-debug/emberKernel.elf"),
            Path::new("/r/App/Crucible/Build/Crucible.app"),
            512,
            Path::new("/r/Loader/Build/x86_64-debug"),
            &apps,
            "/Apps",
        );
        assert_eq!(cmd[0], "scripts/build-image.sh");
        assert_eq!(cmd[4], "512");
        assert_eq!(cmd[6], "/r/App/A/Build/A.app,/r/App/B/Build/B.app");
        assert_eq!(cmd[7], "/Apps");
        assert_eq!(cmd.len(), 8);
    }

    #[test]
    fn test_build_image_with_no_apps() {
        let cmd = ScriptCommands::build_image(
            Path::new("image"),
            Path::new("kernel"),
            Path::new("os"),
            256,
            Path::new("loader"),
            &[],
            "/Apps",
        );
        assert_eq!(cmd[6], "");
    }

    #[test]
    fn test_copy_to_image() {
        let cmd = ScriptCommands::copy_to_image(
            Path::new("emberOS.image"),
            "/Apps",
            Path::new("/r/App/Fetch/Build/Fetch.app"),
        );
        assert_eq!(
            cmd,
            vec![
                "scripts/copy-file-to-image.sh",
                "emberOS.image",
                "/Apps",
                "/r/App/Fetch/Build/Fetch.app",
            ]
        );
    }

    #[test]
    fn test_install_leads_with_build_type() {
        let cmd = ScriptCommands::install(
            BuildType::Ci,
            Path::new("Build/x86_64-ci"),
            Path::new("image"),
            Path::new("kernel"),
            Path::new("os"),
        );
        assert_eq!(cmd[0], "scripts/install.sh");
        assert_eq!(cmd[1], "ci");
        assert_eq!(cmd.len(), 6);
    }
}

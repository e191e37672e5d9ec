use std::path::{Path, PathBuf};

use crate::command::ScriptCommands;
use crate::config::BuildConfig;
use crate::shell;

use super::{BuildStep, APP_INSTALL_DIR};

/// Assembles the bootable disk image from the kernel, OS app, and system
/// loader artifacts.
pub struct ImageBuild;

impl BuildStep for ImageBuild {
    fn name(&self) -> &'static str {
        "Image Build"
    }

    fn execute(&self, config: &BuildConfig) -> bool {
        let apps: Vec<PathBuf> = config
            .apps
            .iter()
            .map(|app| config.app_artifact(app))
            .collect();
        let loader_dir = config
            .system_loader
            .parent()
            .unwrap_or(Path::new("/"))
            .to_path_buf();

        let cmd = ScriptCommands::build_image(
            &config.image_path(),
            &config.kernel_elf(),
            &config.os_app(),
            config.image_size,
            &loader_dir,
            &apps,
            APP_INSTALL_DIR,
        );
        shell::exec(&cmd, Path::new("."))
    }
}

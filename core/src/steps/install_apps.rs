use std::path::Path;

use crate::command::ScriptCommands;
use crate::config::{BuildConfig, BUILD_DIR};
use crate::shell;

use super::{BuildStep, APP_INSTALL_DIR};

/// Builds every configured app and copies its ELF into the disk image.
pub struct InstallApps;

impl BuildStep for InstallApps {
    fn name(&self) -> &'static str {
        "Install Apps"
    }

    fn execute(&self, config: &BuildConfig) -> bool {
        if config.apps.is_empty() {
            println!("No apps to install");
            return true;
        }

        for app in &config.apps {
            let source_dir = config.app_source(app);
            let build_dir = source_dir.join(BUILD_DIR);
            if !shell::meson_build(&source_dir, Some(&config.cross_file()), &[], &build_dir) {
                return false;
            }

            let cmd = ScriptCommands::copy_to_image(
                &config.image_path(),
                APP_INSTALL_DIR,
                &config.app_artifact(app),
            );
            if !shell::exec(&cmd, Path::new(".")) {
                return false;
            }
        }
        true
    }
}

use std::path::Path;

use crate::command::ScriptCommands;
use crate::config::BuildConfig;
use crate::shell;

use super::BuildStep;

/// The terminal pipeline step: hands the finished artifacts to the install
/// script.
pub struct Install;

impl BuildStep for Install {
    fn name(&self) -> &'static str {
        "Install"
    }

    fn execute(&self, config: &BuildConfig) -> bool {
        let cmd = ScriptCommands::install(
            config.build,
            &config.build_dir(),
            &config.image_path(),
            &config.kernel_elf(),
            &config.os_app(),
        );
        shell::exec(&cmd, Path::new("."))
    }
}

use std::path::Path;

use crate::command::ScriptCommands;
use crate::config::BuildConfig;
use crate::shell;

use super::BuildStep;

/// Copies the configured extra files into the disk image.
pub struct FileCopy;

impl BuildStep for FileCopy {
    fn name(&self) -> &'static str {
        "File Copy"
    }

    fn execute(&self, config: &BuildConfig) -> bool {
        for (source, destination) in &config.files {
            let cmd = ScriptCommands::copy_to_image(
                &config.image_path(),
                destination,
                Path::new(source),
            );
            if !shell::exec(&cmd, Path::new(".")) {
                return false;
            }
        }
        true
    }
}

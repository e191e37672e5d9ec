use crate::compdb;
use crate::config::{BuildConfig, BUILD_DIR};
use crate::shell;

use super::BuildStep;

/// Builds Crucible, the primary user-space OS app, against the cross-file.
pub struct CrucibleBuild;

impl BuildStep for CrucibleBuild {
    fn name(&self) -> &'static str {
        "Crucible Build"
    }

    fn execute(&self, config: &BuildConfig) -> bool {
        let source_dir = config.app_source("Crucible");
        let build_dir = source_dir.join(BUILD_DIR);

        if !shell::meson_build(&source_dir, Some(&config.cross_file()), &[], &build_dir) {
            return false;
        }

        let database = build_dir.join("compile_commands.json");
        match compdb::post_process(&database, &config.cpp, &config.sysroot, true) {
            Ok(()) => true,
            Err(err) => {
                eprintln!("{:#}", err);
                false
            }
        }
    }
}

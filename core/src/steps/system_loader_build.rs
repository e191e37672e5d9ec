use crate::config::{BuildConfig, BUILD_DIR};
use crate::settings::BuildSetting;
use crate::shell;

use super::BuildStep;

/// Builds the system loader, the freestanding stage that boots the kernel.
pub struct SystemLoaderBuild;

impl BuildStep for SystemLoaderBuild {
    fn name(&self) -> &'static str {
        "System Loader Build"
    }

    fn execute(&self, config: &BuildConfig) -> bool {
        let source_dir = config.loader_source();
        let build_dir = source_dir.join(BUILD_DIR).join(config.build_dir_name());

        let options = [
            (
                BuildSetting::C.backend_key().to_string(),
                config.c.display().to_string(),
            ),
            (
                BuildSetting::Cpp.backend_key().to_string(),
                config.cpp.display().to_string(),
            ),
            (
                BuildSetting::Build.backend_key().to_string(),
                config.build.to_string(),
            ),
        ];

        shell::meson_build(&source_dir, None, &options, &build_dir)
    }
}

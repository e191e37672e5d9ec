use crate::compdb;
use crate::config::{BuildConfig, BUILD_DIR};
use crate::settings::BuildSetting;
use crate::shell;

use super::BuildStep;

/// Builds the emberOS kernel with the freestanding toolchain. The compiler
/// and runtime object paths are forwarded to meson as project options; the
/// cross-file is for hosted user-space builds only.
pub struct KernelBuild;

impl BuildStep for KernelBuild {
    fn name(&self) -> &'static str {
        "Kernel Build"
    }

    fn execute(&self, config: &BuildConfig) -> bool {
        let source_dir = config.kernel_source();
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
                BuildSetting::CrtBegin.backend_key().to_string(),
                config.crt_begin.display().to_string(),
            ),
            (
                BuildSetting::CrtEnd.backend_key().to_string(),
                config.crt_end.display().to_string(),
            ),
            (
                BuildSetting::QemuHost.backend_key().to_string(),
                config.qemu_host.to_string(),
            ),
            (
                BuildSetting::Build.backend_key().to_string(),
                config.build.to_string(),
            ),
        ];

        if !shell::meson_build(&source_dir, None, &options, &build_dir) {
            return false;
        }

        let database = build_dir.join("compile_commands.json");
        match compdb::post_process(&database, &config.cpp, &config.sysroot, false) {
            Ok(()) => true,
            Err(err) => {
                eprintln!("{:#}", err);
                false
            }
        }
    }
}

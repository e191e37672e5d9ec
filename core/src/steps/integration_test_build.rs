use crate::config::{BuildConfig, BUILD_DIR};
use crate::shell;

use super::BuildStep;

/// Builds the integration-test app booted in place of Crucible by test and
/// CI builds.
pub struct IntegrationTestBuild;

impl BuildStep for IntegrationTestBuild {
    fn name(&self) -> &'static str {
        "Integration Test Build"
    }

    fn execute(&self, config: &BuildConfig) -> bool {
        let source_dir = config.app_source("IntegrationTest");
        let build_dir = source_dir.join(BUILD_DIR);
        shell::meson_build(&source_dir, Some(&config.cross_file()), &[], &build_dir)
    }
}

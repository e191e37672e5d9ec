//! Build-type-dependent step selection. A static lookup: kernel and loader
//! always come first, the image cannot be assembled before them, nothing is
//! copied into the image before it exists, and install is always terminal.

use crate::config::BuildType;
use crate::steps::{
    BuildStep, CrucibleBuild, FileCopy, ImageBuild, Install, InstallApps, IntegrationTestBuild,
    KernelBuild, SystemLoaderBuild,
};

pub fn select(build: BuildType) -> Vec<Box<dyn BuildStep>> {
    match build {
        BuildType::Test | BuildType::Ci => vec![
            Box::new(KernelBuild),
            Box::new(SystemLoaderBuild),
            Box::new(IntegrationTestBuild),
            Box::new(ImageBuild),
            Box::new(InstallApps),
            Box::new(FileCopy),
            Box::new(Install),
        ],
        BuildType::Release | BuildType::Debug => vec![
            Box::new(KernelBuild),
            Box::new(SystemLoaderBuild),
            Box::new(CrucibleBuild),
            Box::new(ImageBuild),
            Box::new(InstallApps),
            Box::new(FileCopy),
            Box::new(Install),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(build: BuildType) -> Vec<&'static str> {
        select(build).iter().map(|step| step.name()).collect()
    }

    #[test]
    fn test_test_and_ci_plans_are_identical() {
        assert_eq!(names(BuildType::Test), names(BuildType::Ci));
    }

    #[test]
    fn test_release_and_debug_plans_are_identical() {
        assert_eq!(names(BuildType::Release), names(BuildType::Debug));
    }

    #[test]
    fn test_plans_diverge_only_at_the_os_build_position() {
        let default_plan = names(BuildType::Release);
        let test_plan = names(BuildType::Test);

        assert_eq!(default_plan.len(), test_plan.len());
        for (index, (a, b)) in default_plan.iter().zip(&test_plan).enumerate() {
            if index == 2 {
                assert_eq!(*a, "Crucible Build");
                assert_eq!(*b, "Integration Test Build");
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_step_ordering() {
        let plan = names(BuildType::Debug);
        assert_eq!(
            plan,
            vec![
                "Kernel Build",
                "System Loader Build",
                "Crucible Build",
                "Image Build",
                "Install Apps",
                "File Copy",
                "Install",
            ]
        );
    }
}

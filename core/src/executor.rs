//! Fail-fast sequential execution of planned build steps.

use std::time::Instant;
use thiserror::Error;

use crate::config::BuildConfig;
use crate::logger::Logger;
use crate::steps::BuildStep;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{step}': Build step failed")]
pub struct StepFailure {
    pub step: &'static str,
}

pub struct PipelineExecutor<'a> {
    logger: &'a Logger,
}

impl<'a> PipelineExecutor<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        Self { logger }
    }

    /// Run the steps in declared order. The first failing step aborts the
    /// pipeline; completed steps' side effects stay as they are.
    pub fn run(
        &self,
        steps: &[Box<dyn BuildStep>],
        config: &BuildConfig,
    ) -> Result<(), StepFailure> {
        for step in steps {
            self.logger.step_banner(step.name());
            let start = Instant::now();

            if !step.execute(config) {
                return Err(StepFailure { step: step.name() });
            }

            self.logger.message(&format!(
                "{} finished in {:.1}s",
                step.name(),
                start.elapsed().as_secs_f64()
            ));
            println!();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Arch, BuildType};
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::rc::Rc;

    struct RecordingStep {
        name: &'static str,
        succeed: bool,
        invocations: Rc<RefCell<Vec<&'static str>>>,
    }

    impl BuildStep for RecordingStep {
        fn name(&self) -> &'static str {
            self.name
        }

        fn execute(&self, _config: &BuildConfig) -> bool {
            self.invocations.borrow_mut().push(self.name);
            self.succeed
        }
    }

    fn create_test_config() -> BuildConfig {
        BuildConfig {
            project_root: PathBuf::from("/tmp/ember"),
            arch: Arch::X86_64,
            build: BuildType::Debug,
            qemu_host: false,
            c: PathBuf::from("/opt/cc/bin/x86_64-elf-gcc"),
            cpp: PathBuf::from("/opt/cc/bin/x86_64-elf-g++"),
            crt_begin: PathBuf::from("/opt/cc/lib/gcc/x86_64-elf/13.2.0/crtbegin.o"),
            crt_end: PathBuf::from("/opt/cc/lib/gcc/x86_64-elf/13.2.0/crtend.o"),
            image_size: 256,
            system_loader: PathBuf::from("/abs/loader"),
            sysroot: PathBuf::from("/opt/cc"),
            apps: Vec::new(),
            files: BTreeMap::new(),
        }
    }

    fn step(
        name: &'static str,
        succeed: bool,
        invocations: &Rc<RefCell<Vec<&'static str>>>,
    ) -> Box<dyn BuildStep> {
        Box::new(RecordingStep {
            name,
            succeed,
            invocations: Rc::clone(invocations),
        })
    }

    #[test]
    fn test_all_steps_run_in_order_on_success() {
        let invocations = Rc::new(RefCell::new(Vec::new()));
        let steps = vec![
            step("A", true, &invocations),
            step("B", true, &invocations),
            step("C", true, &invocations),
        ];

        let logger = Logger::new();
        let result = PipelineExecutor::new(&logger).run(&steps, &create_test_config());
        assert_eq!(result, Ok(()));
        assert_eq!(*invocations.borrow(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_failure_aborts_before_later_steps() {
        let invocations = Rc::new(RefCell::new(Vec::new()));
        let steps = vec![
            step("A", true, &invocations),
            step("B", false, &invocations),
            step("C", true, &invocations),
        ];

        let logger = Logger::new();
        let result = PipelineExecutor::new(&logger).run(&steps, &create_test_config());
        assert_eq!(result, Err(StepFailure { step: "B" }));
        assert_eq!(*invocations.borrow(), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_pipeline_succeeds() {
        let logger = Logger::new();
        let result = PipelineExecutor::new(&logger).run(&[], &create_test_config());
        assert_eq!(result, Ok(()));
    }
}

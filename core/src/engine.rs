//! The `configure` and `build` entry points.

use anyhow::{bail, Context};
use std::fs;
use std::path::Path;

use crate::config::{
    Arch, BuildConfig, BuildType, RawConfig, BUILD_CONFIG_TOML, BUILD_DIR,
};
use crate::cross_file;
use crate::executor::PipelineExecutor;
use crate::logger::Logger;
use crate::planner;
use crate::settings::{BuildSetting, RawSetting};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Validate and resolve a raw configuration, then materialize the build
/// directory: the meson cross-file and the persisted `build-config.toml`.
/// Nothing is written until the whole configuration has resolved.
pub fn configure(raw_config_path: &Path, logger: &Logger) -> anyhow::Result<()> {
    logger.banner(VERSION);

    let raw = RawConfig::load(raw_config_path)
        .with_context(|| format!("'{}': Invalid configuration", raw_config_path.display()))?;

    logger.message("Configure build directory with config:");
    for setting in RawSetting::ALL {
        logger.detail(&format!("{}: {}", setting.key(), raw_setting_value(&raw, setting)));
    }

    let config = BuildConfig::resolve(&raw)?;

    let build_dir = config.build_dir();
    logger.message(&format!("Create directory: {}", build_dir.display()));
    fs::create_dir_all(&build_dir)
        .with_context(|| format!("'{}': Cannot create build directory", build_dir.display()))?;

    let content = cross_file::generate(Path::new(cross_file::TEMPLATE_FILE), &config.sysroot)?;
    let cross_path = cross_file::write(&build_dir, config.arch, &content)?;
    logger.message(&format!("Create meson cross file: {}", cross_path.display()));
    for line in content.lines() {
        logger.detail(line);
    }

    logger.message(&format!("Create {}: {}", BUILD_CONFIG_TOML, build_dir.display()));
    echo_build_config(&config, logger)?;
    config.store(&build_dir)?;

    logger.message("Build directory created.");
    logger.message(&format!(
        "Run 'hearth build {} {}' to build.",
        config.arch, config.build
    ));
    Ok(())
}

/// Load the persisted configuration for `{arch}-{build}` fresh from disk,
/// plan the pipeline for its build type, and run it.
pub fn build(arch: &str, build: &str, logger: &Logger) -> anyhow::Result<()> {
    logger.banner(VERSION);

    let arch: Arch = arch.parse()?;
    let build: BuildType = build.parse()?;

    let build_dir = Path::new(BUILD_DIR).join(format!("{}-{}", arch, build));
    let config_path = build_dir.join(BUILD_CONFIG_TOML);
    logger.message(&format!("Parse: {}", config_path.display()));
    if !config_path.exists() {
        bail!(
            "'{}': Build configuration not found. Run 'hearth configure <config>' first.",
            config_path.display()
        );
    }
    let config = BuildConfig::load(&config_path)?;

    logger.message("Build with configuration:");
    echo_build_config(&config, logger)?;

    let steps = planner::select(config.build);
    PipelineExecutor::new(logger).run(&steps, &config)?;
    Ok(())
}

fn raw_setting_value(raw: &RawConfig, setting: RawSetting) -> String {
    match setting {
        RawSetting::Arch => raw.arch.to_string(),
        RawSetting::Build => raw.build.to_string(),
        RawSetting::QemuHost => raw.qemu_host.to_string(),
        RawSetting::FreestandingCompiler => raw.freestanding_compiler.display().to_string(),
        RawSetting::ImageSize => raw.image_size.to_string(),
        RawSetting::SystemLoader => raw.system_loader.display().to_string(),
        RawSetting::Files => format!("{:?}", raw.files),
        RawSetting::Apps => format!("{:?}", raw.apps),
    }
}

fn echo_build_config(config: &BuildConfig, logger: &Logger) -> anyhow::Result<()> {
    let value = toml::Value::try_from(config).context("Failed to serialize build config")?;
    let Some(table) = value.as_table() else {
        bail!("Build config did not serialize to a table");
    };
    for setting in BuildSetting::ALL {
        if let Some(value) = table.get(setting.key()) {
            logger.detail(&format!("{}: {}", setting.key(), value));
        }
    }
    Ok(())
}

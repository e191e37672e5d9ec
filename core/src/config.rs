use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::cross_file;
use crate::settings::RawSetting;

pub const MIN_IMAGE_SIZE: u64 = 256;
pub const BUILD_CONFIG_TOML: &str = "build-config.toml";
pub const BUILD_DIR: &str = "Build";

/// Name of the tool's directory inside the emberOS source tree. Build steps
/// derive absolute output paths from it; the tool itself is always invoked
/// from that directory.
pub const TOOL_DIR: &str = "Hearth";

const GCC_VERSION: &str = "13.2.0";
const IMAGE_NAME: &str = "emberOS.image";
const KERNEL_ELF: &str = "emberKernel.elf";
const OS_APP: &str = "Crucible";
const TEST_APP: &str = "IntegrationTest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arch {
    #[serde(rename = "x86_64")]
    X86_64,
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::X86_64 => write!(f, "x86_64"),
        }
    }
}

impl FromStr for Arch {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" => Ok(Arch::X86_64),
            other => Err(ValidationError::InvalidValue {
                key: RawSetting::Arch.key(),
                reason: format!("unknown architecture '{}', expected one of: x86_64", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Release,
    Debug,
    Test,
    Ci,
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildType::Release => "release",
            BuildType::Debug => "debug",
            BuildType::Test => "test",
            BuildType::Ci => "ci",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for BuildType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(BuildType::Release),
            "debug" => Ok(BuildType::Debug),
            "test" => Ok(BuildType::Test),
            "ci" => Ok(BuildType::Ci),
            other => Err(ValidationError::InvalidValue {
                key: RawSetting::Build.key(),
                reason: format!(
                    "unknown build type '{}', expected one of: release, debug, test, ci",
                    other
                ),
            }),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required key: {key}")]
    MissingKey { key: &'static str },

    #[error("Key '{key}' has wrong type: expected {expected}, got {actual}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Key '{key}' has invalid value: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("'{}': Sysroot of the freestanding compiler not found", path.display())]
    SysrootNotFound { path: PathBuf },

    #[error("'{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The user-written configuration. Ephemeral: it exists only while
/// `configure` turns it into a [`BuildConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawConfig {
    pub arch: Arch,
    pub build: BuildType,
    pub qemu_host: bool,
    pub freestanding_compiler: PathBuf,
    pub image_size: u64,
    pub system_loader: PathBuf,
    pub files: BTreeMap<String, String>,
    pub apps: Vec<String>,
}

impl RawConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let doc: toml::Table = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(Self::parse(&doc)?)
    }

    /// Validate the document against the schema and build the typed config.
    /// Checks run in a fixed key order and stop at the first violation;
    /// either every key is good or nothing is returned.
    pub fn parse(doc: &toml::Table) -> Result<Self, ValidationError> {
        let arch: Arch = require_str(doc, RawSetting::Arch)?.parse()?;
        let build: BuildType = require_str(doc, RawSetting::Build)?.parse()?;
        let qemu_host = require_bool(doc, RawSetting::QemuHost)?;
        let freestanding_compiler = expand(require_str(doc, RawSetting::FreestandingCompiler)?);

        let image_size = require_int(doc, RawSetting::ImageSize)?;
        if image_size < MIN_IMAGE_SIZE as i64 {
            return Err(ValidationError::InvalidValue {
                key: RawSetting::ImageSize.key(),
                reason: format!("must be at least {} MiB, got {}", MIN_IMAGE_SIZE, image_size),
            });
        }

        let system_loader = expand(require_str(doc, RawSetting::SystemLoader)?);
        let files = parse_files(doc)?;
        let apps = parse_apps(doc)?;

        Ok(Self {
            arch,
            build,
            qemu_host,
            freestanding_compiler,
            image_size: image_size as u64,
            system_loader,
            files,
            apps,
        })
    }
}

/// The resolved configuration persisted as `build-config.toml` and re-read
/// from disk by every build invocation. Field order matters: `files` must
/// serialize last so the TOML table follows all plain values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    pub project_root: PathBuf,
    pub arch: Arch,
    pub build: BuildType,
    pub qemu_host: bool,
    pub c: PathBuf,
    pub cpp: PathBuf,
    pub crt_begin: PathBuf,
    pub crt_end: PathBuf,
    pub image_size: u64,
    pub system_loader: PathBuf,
    pub sysroot: PathBuf,
    pub apps: Vec<String>,
    pub files: BTreeMap<String, String>,
}

impl BuildConfig {
    /// Derive the resolved configuration from a validated [`RawConfig`].
    /// Fails without touching the filesystem.
    pub fn resolve(raw: &RawConfig) -> Result<Self, ResolveError> {
        let project_root = Path::new("..")
            .canonicalize()
            .map_err(|source| ResolveError::Io {
                path: PathBuf::from(".."),
                source,
            })?;

        if !raw.freestanding_compiler.is_dir() {
            return Err(ResolveError::SysrootNotFound {
                path: raw.freestanding_compiler.clone(),
            });
        }
        let sysroot =
            raw.freestanding_compiler
                .canonicalize()
                .map_err(|source| ResolveError::Io {
                    path: raw.freestanding_compiler.clone(),
                    source,
                })?;

        let bin = sysroot.join("bin");
        let crt_dir = sysroot
            .join("lib")
            .join("gcc")
            .join(format!("{}-elf", raw.arch))
            .join(GCC_VERSION);

        Ok(Self {
            project_root,
            arch: raw.arch,
            build: raw.build,
            qemu_host: raw.qemu_host,
            c: bin.join(format!("{}-elf-gcc", raw.arch)),
            cpp: bin.join(format!("{}-elf-g++", raw.arch)),
            crt_begin: crt_dir.join("crtbegin.o"),
            crt_end: crt_dir.join("crtend.o"),
            image_size: raw.image_size,
            system_loader: raw.system_loader.clone(),
            sysroot,
            apps: raw.apps.clone(),
            files: raw.files.clone(),
        })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read build config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse build config: {}", path.display()))?;
        Ok(config)
    }

    pub fn store(&self, build_dir: &Path) -> anyhow::Result<PathBuf> {
        let path = build_dir.join(BUILD_CONFIG_TOML);
        let content =
            toml::to_string_pretty(self).context("Failed to serialize build config to TOML")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write build config: {}", path.display()))?;
        Ok(path)
    }

    pub fn build_dir_name(&self) -> String {
        format!("{}-{}", self.arch, self.build)
    }

    /// The build directory relative to the tool's working directory.
    pub fn build_dir(&self) -> PathBuf {
        Path::new(BUILD_DIR).join(self.build_dir_name())
    }

    fn tool_root(&self) -> PathBuf {
        self.project_root.join(TOOL_DIR)
    }

    fn output_dir(&self) -> PathBuf {
        self.tool_root().join(BUILD_DIR).join(self.build_dir_name())
    }

    pub fn cross_file(&self) -> PathBuf {
        self.output_dir().join(cross_file::cross_file_name(self.arch))
    }

    pub fn image_path(&self) -> PathBuf {
        self.output_dir().join(IMAGE_NAME)
    }

    pub fn kernel_source(&self) -> PathBuf {
        self.project_root.join("Kernel")
    }

    pub fn kernel_elf(&self) -> PathBuf {
        self.kernel_source()
            .join(BUILD_DIR)
            .join(self.build_dir_name())
            .join(KERNEL_ELF)
    }

    pub fn loader_source(&self) -> PathBuf {
        self.project_root.join("Loader")
    }

    pub fn app_source(&self, app: &str) -> PathBuf {
        self.project_root.join("App").join(app)
    }

    pub fn app_artifact(&self, app: &str) -> PathBuf {
        self.app_source(app)
            .join(BUILD_DIR)
            .join(format!("{}.app", app))
    }

    /// The user-space ELF booted as the operating system. Test and CI builds
    /// boot the integration-test app in its place.
    pub fn os_app(&self) -> PathBuf {
        match self.build {
            BuildType::Test | BuildType::Ci => self.app_artifact(TEST_APP),
            BuildType::Release | BuildType::Debug => self.app_artifact(OS_APP),
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn type_name(value: &toml::Value) -> &'static str {
    match value {
        toml::Value::String(_) => "string",
        toml::Value::Integer(_) => "integer",
        toml::Value::Float(_) => "float",
        toml::Value::Boolean(_) => "boolean",
        toml::Value::Datetime(_) => "datetime",
        toml::Value::Array(_) => "array",
        toml::Value::Table(_) => "table",
    }
}

fn require(doc: &toml::Table, setting: RawSetting) -> Result<&toml::Value, ValidationError> {
    doc.get(setting.key())
        .ok_or(ValidationError::MissingKey { key: setting.key() })
}

fn require_str(doc: &toml::Table, setting: RawSetting) -> Result<&str, ValidationError> {
    let value = require(doc, setting)?;
    value.as_str().ok_or_else(|| ValidationError::WrongType {
        key: setting.key(),
        expected: "string",
        actual: type_name(value),
    })
}

fn require_bool(doc: &toml::Table, setting: RawSetting) -> Result<bool, ValidationError> {
    let value = require(doc, setting)?;
    value.as_bool().ok_or_else(|| ValidationError::WrongType {
        key: setting.key(),
        expected: "boolean",
        actual: type_name(value),
    })
}

fn require_int(doc: &toml::Table, setting: RawSetting) -> Result<i64, ValidationError> {
    let value = require(doc, setting)?;
    value.as_integer().ok_or_else(|| ValidationError::WrongType {
        key: setting.key(),
        expected: "integer",
        actual: type_name(value),
    })
}

fn parse_files(doc: &toml::Table) -> Result<BTreeMap<String, String>, ValidationError> {
    let value = require(doc, RawSetting::Files)?;
    let table = value.as_table().ok_or_else(|| ValidationError::WrongType {
        key: RawSetting::Files.key(),
        expected: "table",
        actual: type_name(value),
    })?;

    let mut files = BTreeMap::new();
    for (source, destination) in table {
        let destination = destination
            .as_str()
            .ok_or_else(|| ValidationError::InvalidValue {
                key: RawSetting::Files.key(),
                reason: format!(
                    "destination for '{}' must be a string, got {}",
                    source,
                    type_name(destination)
                ),
            })?;
        files.insert(source.clone(), destination.to_string());
    }
    Ok(files)
}

fn parse_apps(doc: &toml::Table) -> Result<Vec<String>, ValidationError> {
    // Absent means no apps; the resolved config always carries a sequence.
    let Some(value) = doc.get(RawSetting::Apps.key()) else {
        return Ok(Vec::new());
    };
    let list = value.as_array().ok_or_else(|| ValidationError::WrongType {
        key: RawSetting::Apps.key(),
        expected: "array",
        actual: type_name(value),
    })?;

    let mut apps = Vec::with_capacity(list.len());
    for entry in list {
        let name = entry.as_str().ok_or_else(|| ValidationError::InvalidValue {
            key: RawSetting::Apps.key(),
            reason: format!("app names must be strings, got {}", type_name(entry)),
        })?;
        apps.push(name.to_string());
    }
    Ok(apps)
}

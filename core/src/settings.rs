//! Closed setting-identifier tables.
//!
//! A bidirectional mapping from the fixed set of setting identifiers to each
//! external representation: dash-case (TOML document keys) and snake_case
//! (meson `-D` option names for settings forwarded to the build backend).
//! Two enums — [`RawSetting`] (raw document schema) and [`BuildSetting`]
//! (persisted document schema) — each exhaustively matched, no runtime string
//! munging.

/// Keys of the raw user configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSetting {
    Arch,
    Build,
    QemuHost,
    FreestandingCompiler,
    ImageSize,
    SystemLoader,
    Files,
    Apps,
}

impl RawSetting {
    pub const ALL: [RawSetting; 8] = [
        RawSetting::Arch,
        RawSetting::Build,
        RawSetting::QemuHost,
        RawSetting::FreestandingCompiler,
        RawSetting::ImageSize,
        RawSetting::SystemLoader,
        RawSetting::Files,
        RawSetting::Apps,
    ];

    /// The dash-case key as it appears in the TOML document.
    pub fn key(self) -> &'static str {
        match self {
            RawSetting::Arch => "arch",
            RawSetting::Build => "build",
            RawSetting::QemuHost => "qemu-host",
            RawSetting::FreestandingCompiler => "freestanding-compiler",
            RawSetting::ImageSize => "image-size",
            RawSetting::SystemLoader => "system-loader",
            RawSetting::Files => "files",
            RawSetting::Apps => "apps",
        }
    }

    /// The snake_case name used as a meson `-D` option.
    pub fn backend_key(self) -> &'static str {
        match self {
            RawSetting::Arch => "arch",
            RawSetting::Build => "build",
            RawSetting::QemuHost => "qemu_host",
            RawSetting::FreestandingCompiler => "freestanding_compiler",
            RawSetting::ImageSize => "image_size",
            RawSetting::SystemLoader => "system_loader",
            RawSetting::Files => "files",
            RawSetting::Apps => "apps",
        }
    }

    /// Reverse lookup from a dash-case document key.
    pub fn from_key(key: &str) -> Option<RawSetting> {
        RawSetting::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Keys of the persisted, resolved `build-config.toml` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildSetting {
    ProjectRoot,
    Arch,
    Build,
    QemuHost,
    C,
    Cpp,
    CrtBegin,
    CrtEnd,
    ImageSize,
    SystemLoader,
    Sysroot,
    Apps,
    Files,
}

impl BuildSetting {
    pub const ALL: [BuildSetting; 13] = [
        BuildSetting::ProjectRoot,
        BuildSetting::Arch,
        BuildSetting::Build,
        BuildSetting::QemuHost,
        BuildSetting::C,
        BuildSetting::Cpp,
        BuildSetting::CrtBegin,
        BuildSetting::CrtEnd,
        BuildSetting::ImageSize,
        BuildSetting::SystemLoader,
        BuildSetting::Sysroot,
        BuildSetting::Apps,
        BuildSetting::Files,
    ];

    /// The dash-case key as it appears in the persisted document.
    pub fn key(self) -> &'static str {
        match self {
            BuildSetting::ProjectRoot => "project-root",
            BuildSetting::Arch => "arch",
            BuildSetting::Build => "build",
            BuildSetting::QemuHost => "qemu-host",
            BuildSetting::C => "c",
            BuildSetting::Cpp => "cpp",
            BuildSetting::CrtBegin => "crt-begin",
            BuildSetting::CrtEnd => "crt-end",
            BuildSetting::ImageSize => "image-size",
            BuildSetting::SystemLoader => "system-loader",
            BuildSetting::Sysroot => "sysroot",
            BuildSetting::Apps => "apps",
            BuildSetting::Files => "files",
        }
    }

    /// The snake_case name used as a meson `-D` option.
    pub fn backend_key(self) -> &'static str {
        match self {
            BuildSetting::ProjectRoot => "project_root",
            BuildSetting::Arch => "arch",
            BuildSetting::Build => "build",
            BuildSetting::QemuHost => "qemu_host",
            BuildSetting::C => "c",
            BuildSetting::Cpp => "cpp",
            BuildSetting::CrtBegin => "crt_begin",
            BuildSetting::CrtEnd => "crt_end",
            BuildSetting::ImageSize => "image_size",
            BuildSetting::SystemLoader => "system_loader",
            BuildSetting::Sysroot => "sysroot",
            BuildSetting::Apps => "apps",
            BuildSetting::Files => "files",
        }
    }

    /// Reverse lookup from a dash-case document key.
    pub fn from_key(key: &str) -> Option<BuildSetting> {
        BuildSetting::ALL.into_iter().find(|s| s.key() == key)
    }
}

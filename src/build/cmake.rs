//! CMake command lines
//!
//! Single-config generators (Makefiles, Ninja) take the build type at
//! configure time; the multi-config generators used on Windows take it at
//! build time.

use crate::platform::Platform;
use std::path::PathBuf;

/// Everything that shapes the CMake invocations for one build
#[derive(Debug, Clone)]
pub struct CmakeOptions {
    pub platform: Platform,
    /// Normalized build configuration ("Release", "Debug", ...)
    pub config: String,
    /// Install prefix, also searched for dependencies
    pub prefix: PathBuf,
    pub jobs: u32,
    pub shared_libs: bool,
}

impl CmakeOptions {
    fn multi_config(&self) -> bool {
        self.platform == Platform::Windows
    }
}

/// `cmake . -D...` run inside the source tree
pub fn configure_command(options: &CmakeOptions) -> Vec<String> {
    let prefix = options.prefix.display().to_string();
    let shared = if options.shared_libs { "ON" } else { "OFF" };

    let mut command = vec![
        "cmake".to_string(),
        ".".to_string(),
        format!("-DBUILD_SHARED_LIBS={}", shared),
    ];
    if !options.multi_config() {
        command.push(format!("-DCMAKE_BUILD_TYPE={}", options.config));
    }
    command.push(format!("-DFREETYPE_DIR={}", prefix));
    command.push(format!("-DCMAKE_INSTALL_PREFIX={}", prefix));
    command.push(format!(
        "-DCMAKE_LIBRARY_PATH={}",
        options.prefix.join("lib").display()
    ));
    command.push(format!(
        "-DCMAKE_PREFIX_PATH={}",
        options.prefix.join("include").display()
    ));
    command
}

/// `cmake --build . -j N`
pub fn build_command(options: &CmakeOptions) -> Vec<String> {
    let mut command = vec![
        "cmake".to_string(),
        "--build".to_string(),
        ".".to_string(),
        "-j".to_string(),
        options.jobs.to_string(),
    ];
    if options.multi_config() {
        command.push("--config".to_string());
        command.push(options.config.clone());
    }
    command
}

/// The build command with `--target install`
pub fn install_command(options: &CmakeOptions) -> Vec<String> {
    let mut command = build_command(options);
    command.push("--target".to_string());
    command.push("install".to_string());
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(platform: Platform) -> CmakeOptions {
        CmakeOptions {
            platform,
            config: "Release".to_string(),
            prefix: PathBuf::from("/work"),
            jobs: 4,
            shared_libs: true,
        }
    }

    #[test]
    fn configure_on_linux() {
        assert_eq!(
            configure_command(&options(Platform::Linux)),
            vec![
                "cmake",
                ".",
                "-DBUILD_SHARED_LIBS=ON",
                "-DCMAKE_BUILD_TYPE=Release",
                "-DFREETYPE_DIR=/work",
                "-DCMAKE_INSTALL_PREFIX=/work",
                "-DCMAKE_LIBRARY_PATH=/work/lib",
                "-DCMAKE_PREFIX_PATH=/work/include",
            ]
        );
    }

    #[test]
    fn configure_on_windows_omits_build_type() {
        let command = configure_command(&options(Platform::Windows));
        assert!(!command.iter().any(|arg| arg.starts_with("-DCMAKE_BUILD_TYPE")));
        assert_eq!(command[2], "-DBUILD_SHARED_LIBS=ON");
    }

    #[test]
    fn static_libs() {
        let mut opts = options(Platform::MacOS);
        opts.shared_libs = false;
        assert_eq!(configure_command(&opts)[2], "-DBUILD_SHARED_LIBS=OFF");
    }

    #[test]
    fn build_passes_config_only_on_windows() {
        assert_eq!(
            build_command(&options(Platform::Linux)),
            vec!["cmake", "--build", ".", "-j", "4"]
        );
        assert_eq!(
            build_command(&options(Platform::Windows)),
            vec!["cmake", "--build", ".", "-j", "4", "--config", "Release"]
        );
    }

    #[test]
    fn install_extends_build() {
        assert_eq!(
            install_command(&options(Platform::Windows)),
            vec!["cmake", "--build", ".", "-j", "4", "--config", "Release", "--target", "install"]
        );
        assert_eq!(
            install_command(&options(Platform::Linux)),
            vec!["cmake", "--build", ".", "-j", "4", "--target", "install"]
        );
    }
}

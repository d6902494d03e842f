//! Compile-time build description reported to the host application.
//!
//! Everything here is resolved when the library is built: the greeting
//! constant, the report header, and the instruction-set architecture of
//! the build target. Nothing is decided at runtime, so every call made
//! against a given binary observes the same strings.

use once_cell::sync::Lazy;

/// Closed set of instruction-set families the bridge can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Arm64,
    Arm,
    X8664,
    X86,
    Unknown,
}

impl Arch {
    /// Human-readable label shown in the system-info report.
    pub const fn label(self) -> &'static str {
        match self {
            Arch::Arm64 => "ARM64 (aarch64)",
            Arch::Arm => "ARM (32-bit)",
            Arch::X8664 => "x86_64",
            Arch::X86 => "x86 (32-bit)",
            Arch::Unknown => "Unknown",
        }
    }
}

/// Architecture of the build target, fixed at compile time.
#[cfg(target_arch = "aarch64")]
pub const TARGET_ARCH: Arch = Arch::Arm64;
#[cfg(target_arch = "arm")]
pub const TARGET_ARCH: Arch = Arch::Arm;
#[cfg(target_arch = "x86_64")]
pub const TARGET_ARCH: Arch = Arch::X8664;
#[cfg(target_arch = "x86")]
pub const TARGET_ARCH: Arch = Arch::X86;
#[cfg(not(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "x86_64",
    target_arch = "x86"
)))]
pub const TARGET_ARCH: Arch = Arch::Unknown;

const GREETING: &str = "Hello from Rust";
const REPORT_HEADER: &str = "NDK Demo - System Info:";
const EDITION_LABEL: &str = "- Rust Edition: 2021";

/// Assembled once per process; every caller gets the same allocation.
static SYSTEM_INFO: Lazy<String> = Lazy::new(|| {
    format!(
        "{}\n{}\n- Architecture: {}",
        REPORT_HEADER,
        EDITION_LABEL,
        TARGET_ARCH.label()
    )
});

/// Greeting returned by `NativeLib.helloFromNative()`.
pub fn greeting() -> &'static str {
    GREETING
}

/// Three-line build report returned by `NativeLib.getSystemInfo()`.
pub fn system_info() -> &'static str {
    &SYSTEM_INFO
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_greeting_literal() {
        assert_eq!(greeting(), "Hello from Rust");
    }

    #[test]
    fn test_report_has_three_fixed_lines() {
        let lines: Vec<&str> = system_info().lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "NDK Demo - System Info:");
        assert_eq!(lines[1], "- Rust Edition: 2021");
        assert!(lines[2].starts_with("- Architecture: "));
    }

    #[test]
    fn test_report_ends_with_target_label() {
        assert!(system_info().ends_with(TARGET_ARCH.label()));
    }

    #[test]
    fn test_arch_labels_are_closed_table() {
        let labels = [
            Arch::Arm64.label(),
            Arch::Arm.label(),
            Arch::X8664.label(),
            Arch::X86.label(),
            Arch::Unknown.label(),
        ];
        assert_eq!(
            labels,
            [
                "ARM64 (aarch64)",
                "ARM (32-bit)",
                "x86_64",
                "x86 (32-bit)",
                "Unknown"
            ]
        );
        assert!(labels.contains(&TARGET_ARCH.label()));
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn test_aarch64_build_reports_arm64() {
        assert!(system_info().ends_with("ARM64 (aarch64)"));
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_x86_64_build_reports_x86_64() {
        assert!(system_info().ends_with("x86_64"));
    }

    #[test]
    fn test_repeated_calls_return_identical_results() {
        assert_eq!(greeting(), greeting());
        // Same allocation, not merely equal contents.
        assert!(std::ptr::eq(system_info(), system_info()));
    }

    #[test]
    fn test_concurrent_calls_observe_one_value() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| (greeting(), system_info().to_string())))
            .collect();
        for h in handles {
            let (hello, info) = h.join().unwrap();
            assert_eq!(hello, "Hello from Rust");
            assert_eq!(info, system_info());
        }
    }
}

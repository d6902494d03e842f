//! # Native Diagnostics and Logging
//!
//! This module coordinates native-side logging. It includes the JNI bridge
//! for forwarding Rust logs to the Android platform log (logcat).

pub mod logging;

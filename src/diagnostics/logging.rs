//! # Native JNI Logging Bridge
//!
//! This module provides a `log` facade implementation that forwards Rust logs
//! to the Android platform log (`android.util.Log`) using the JNI.
//!
//! It uses a background thread and a multi-producer single-consumer (MPSC)
//! channel to decouple native execution from JNI/JVM latency.

use log::{Level, Log, Metadata, Record};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, SyncSender};
use std::sync::{Once, OnceLock};
use std::thread;

use jni::objects::{GlobalRef, JValue};
use jni::signature::{JavaType, Primitive};
use jni::JavaVM;

/// Global sender for the logging channel.
static SENDER: OnceLock<SyncSender<(Level, String)>> = OnceLock::new();

/// Counter for logs dropped due to channel congestion.
static DROPPED_LOGS: AtomicU64 = AtomicU64::new(0);

/// Logcat tag attached to every record forwarded by this bridge.
const LOG_TAG: &str = "NativeLib";

const LOGCAT_CLASS: &str = "android/util/Log";
const LOG_METHOD_SIG: &str = "(Ljava/lang/String;Ljava/lang/String;)I";

/// Static `android.util.Log` methods, indexed by [`method_index`].
const LOGCAT_METHODS: [&str; 5] = ["e", "w", "i", "d", "v"];

fn method_index(level: Level) -> usize {
    match level {
        Level::Error => 0,
        Level::Warn => 1,
        Level::Info => 2,
        Level::Debug => 3,
        Level::Trace => 4,
    }
}

/// Logger implementation that sends records to a background JNI thread.
struct JniLogger;

impl Log for JniLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        // Filtering is handled via log::set_max_level during initialization.
        true
    }

    fn log(&self, record: &Record) {
        if let Some(tx) = SENDER.get() {
            // Use try_send so a stalled JVM never blocks the calling thread.
            if tx.try_send((record.level(), record.args().to_string())).is_err() {
                DROPPED_LOGS.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn flush(&self) {}
}

/// Initializes the logging bridge.
///
/// This function is idempotent and is called from every JNI entry point so
/// logs are captured no matter which method the host invokes first. It spawns
/// a background thread that maintains a permanent JNI attachment to the JVM.
pub fn init(env: &jni::JNIEnv) {
    static START: Once = Once::new();
    START.call_once(|| {
        if let Err(e) = init_internal(env) {
            eprintln!("Rust Logging: Initialization failed: {:?}", e);
        }
    });
}

fn init_internal(env: &jni::JNIEnv) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::sync_channel::<(Level, String)>(4096);

    let (level_filter, is_debug) = match std::env::var("RUST_LOG").ok().as_deref() {
        Some("error") => (log::LevelFilter::Error, false),
        Some("warn") => (log::LevelFilter::Warn, false),
        Some("info") => (log::LevelFilter::Info, false),
        Some("debug") => (log::LevelFilter::Debug, true),
        Some("trace") => (log::LevelFilter::Trace, true),
        _ => (log::LevelFilter::Info, false),
    };

    if let Err(e) = log::set_logger(&JniLogger) {
        eprintln!("Rust Logging: Logger already set: {:?}", e);
    }
    log::set_max_level(level_filter);

    if SENDER.set(tx).is_err() {
        return Err("SENDER already initialized".into());
    }

    let vm = env.get_java_vm()?;

    // android.util.Log is a system class, but resolve it on the calling
    // thread and pin a global ref so the forwarder thread never depends on
    // its own classloader.
    let log_class = env.find_class(LOGCAT_CLASS)?;
    let log_class_global = env.new_global_ref(log_class)?;

    thread::spawn(move || forward_records(vm, log_class_global, rx, is_debug));

    Ok(())
}

/// Drains the channel and forwards each record to logcat.
///
/// Runs on a dedicated thread permanently attached to the JVM. Exits when
/// every sender is gone, which for this library means never.
fn forward_records(
    vm: JavaVM,
    log_class: GlobalRef,
    rx: Receiver<(Level, String)>,
    is_debug: bool,
) {
    let env = match vm.attach_current_thread_permanently() {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Rust Logging: Failed to attach thread: {:?}", e);
            return;
        }
    };

    // Resolve the static Log.e/w/i/d/v(String, String) methods once.
    let mut method_ids = Vec::with_capacity(LOGCAT_METHODS.len());
    for name in LOGCAT_METHODS {
        match env.get_static_method_id(&log_class, name, LOG_METHOD_SIG) {
            Ok(m) => method_ids.push(m),
            Err(e) => {
                eprintln!("Rust Logging: Failed to resolve Log.{}: {:?}", name, e);
                return;
            }
        }
    }

    let jtag = match env.new_string(LOG_TAG) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Rust Logging: Failed to create tag string: {:?}", e);
            return;
        }
    };

    let mut failure_count = 0;

    while let Ok((level, msg)) = rx.recv() {
        let jmsg = match env.new_string(&msg) {
            Ok(s) => s,
            Err(_) => continue,
        };

        let res = env.call_static_method_unchecked(
            &log_class,
            method_ids[method_index(level)],
            JavaType::Primitive(Primitive::Int),
            &[JValue::Object(jtag.into()), JValue::Object(jmsg.into())],
        );

        if res.is_err() || env.exception_check().unwrap_or(false) {
            failure_count += 1;
            if failure_count < 10 {
                eprintln!(
                    "Rust Logging: JNI call failed (count: {}). Clearing exception.",
                    failure_count
                );
                let _ = env.exception_describe();
                let _ = env.exception_clear();
            }

            if is_debug {
                eprintln!("[NATIVE-{:?}] {}", level, msg);
            }
        } else {
            failure_count = 0;
        }

        // The thread stays attached forever; delete the per-record local ref
        // so the local reference table never grows.
        let _ = env.delete_local_ref(jmsg.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_maps_to_logcat_method() {
        assert_eq!(LOGCAT_METHODS[method_index(Level::Error)], "e");
        assert_eq!(LOGCAT_METHODS[method_index(Level::Warn)], "w");
        assert_eq!(LOGCAT_METHODS[method_index(Level::Info)], "i");
        assert_eq!(LOGCAT_METHODS[method_index(Level::Debug)], "d");
        assert_eq!(LOGCAT_METHODS[method_index(Level::Trace)], "v");
    }

    #[test]
    fn test_every_level_has_a_method() {
        for level in [
            Level::Error,
            Level::Warn,
            Level::Info,
            Level::Debug,
            Level::Trace,
        ] {
            assert!(method_index(level) < LOGCAT_METHODS.len());
        }
    }
}

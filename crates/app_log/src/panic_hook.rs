//! Panic hook for crash reporting

use backtrace::Backtrace;
use chrono::Local;
use std::any::Any;
use std::panic::PanicHookInfo;
use std::path::PathBuf;

/// Initialize the panic hook for crash reporting
pub fn init_panic_hook() {
    std::panic::set_hook(Box::new(panic_handler));
    tracing::debug!("Panic hook initialized");
}

fn panic_handler(info: &PanicHookInfo) {
    let thread = std::thread::current();
    let report = crash_report(
        thread.name().unwrap_or("<unnamed>"),
        &format!("{:?}", info.location()),
        payload_message(info.payload()),
        &format!("{:?}", Backtrace::new()),
    );

    eprintln!("{}", report);
    tracing::error!("{}", report);

    let dump_path = dump_path();
    if let Err(e) = std::fs::write(&dump_path, &report) {
        eprintln!("Failed to write crash dump: {}", e);
    }

    #[cfg(windows)]
    show_error_dialog(&dump_path, payload_message(info.payload()));
}

/// Panic payloads are `&str` for literals and `String` for formatted messages
fn payload_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<unknown>")
}

fn crash_report(thread: &str, location: &str, message: &str, backtrace: &str) -> String {
    format!(
        "=== ALBUM VIEWER CRASH ===\n\
         Version: {}\n\
         Timestamp: {}\n\
         Thread: {}\n\
         Location: {}\n\
         Payload: {}\n\n\
         Stack Trace:\n{}",
        env!("CARGO_PKG_VERSION"),
        Local::now().to_rfc3339(),
        thread,
        location,
        message,
        backtrace
    )
}

/// Next to the logs when that directory exists, temp dir otherwise
fn dump_path() -> PathBuf {
    let file_name = format!(
        "album_viewer_crash_{}.txt",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let log_dir = super::log_dir();
    if log_dir.is_dir() {
        log_dir.join(file_name)
    } else {
        std::env::temp_dir().join(file_name)
    }
}

#[cfg(windows)]
fn show_error_dialog(dump_path: &std::path::Path, message: &str) {
    use windows::core::HSTRING;
    use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

    let msg = format!(
        "An unexpected error occurred.\n\n\
         Crash report: {}\n\n\
         Error: {}",
        dump_path.display(),
        message
    );

    unsafe {
        MessageBoxW(
            None,
            &HSTRING::from(msg),
            &HSTRING::from("Album Viewer - Fatal Error"),
            MB_ICONERROR | MB_OK,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_message_variants() {
        let literal: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(payload_message(literal.as_ref()), "boom");

        let formatted: Box<dyn Any + Send> = Box::new(format!("index {}", 3));
        assert_eq!(payload_message(formatted.as_ref()), "index 3");

        let other: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(payload_message(other.as_ref()), "<unknown>");
    }

    #[test]
    fn test_crash_report_contains_fields() {
        let report = crash_report("main", "src/app.rs:10:5", "boom", "<trace>");
        assert!(report.contains("Thread: main"));
        assert!(report.contains("Location: src/app.rs:10:5"));
        assert!(report.contains("Payload: boom"));
        assert!(report.ends_with("<trace>"));
    }
}

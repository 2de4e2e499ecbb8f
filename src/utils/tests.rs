use super::logging;
use serial_test::serial;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn captured_output(directive: &str) -> String {
    let captured = Captured::default();
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_filter(logging::build_filter(directive));
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("info line");
        tracing::warn!("warn line");
    });

    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
#[serial]
fn configured_level_filters_lower_levels() {
    let out = temp_env::with_var_unset("RUST_LOG", || captured_output("warn"));
    assert!(out.contains("warn line"));
    assert!(!out.contains("info line"));
}

#[test]
#[serial]
fn invalid_directive_falls_back_to_info() {
    let out = temp_env::with_var_unset("RUST_LOG", || captured_output("not a [valid directive"));
    assert!(out.contains("info line"));
}

#[test]
#[serial]
fn rust_log_takes_precedence() {
    let out = temp_env::with_var("RUST_LOG", Some("warn"), || captured_output("debug"));
    assert!(!out.contains("info line"));
    assert!(out.contains("warn line"));
}

#[test]
fn logging_init_can_be_called_twice() {
    logging::init("info");
    logging::init("debug");
}

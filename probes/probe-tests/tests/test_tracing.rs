//! The init event emitted with `--features tracing`.
#![cfg(feature = "tracing")]

use std::io;
use std::sync::{Arc, Mutex};

use gil_probe::ProbeVariant;
use probe_tests::{is_imported, prepare_interpreter};
use pyo3::prelude::*;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

#[test]
fn init_reports_module_and_gil_requirement() {
    prepare_interpreter();
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(LevelFilter::DEBUG)
        .finish();

    {
        // the import runs the init entry point on this thread
        let _guard = subscriber.set_default();
        Python::attach(|py| {
            for variant in ProbeVariant::ALL {
                assert!(!is_imported(py, variant).unwrap());
                py.import(variant.name()).unwrap();
            }
        });
    }

    let lines = captured.lines();
    for variant in ProbeVariant::ALL {
        let events: Vec<&String> = lines
            .iter()
            .filter(|line| line.contains("handing probe module definition to the interpreter"))
            .filter(|line| line.contains(&format!("module={variant}")))
            .collect();
        assert_eq!(events.len(), 1, "captured: {lines:#?}");

        let event = events[0];
        assert!(event.contains("DEBUG"), "{event}");
        assert!(
            event.contains(&format!("gil={:?}", variant.gil_requirement())),
            "{event}"
        );
        assert!(
            event.contains(&format!(
                "gil_slot={}",
                variant.gil_requirement().declares_slot()
            )),
            "{event}"
        );
    }
}

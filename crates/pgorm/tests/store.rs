mod support;

use pgorm::Document;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::{
    io,
    sync::{Arc, Barrier, Mutex},
    thread,
    time::{Duration, Instant},
};
use std_util::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[table = "widgets"]
struct Widget {
    #[key]
    id: String,
    name: String,
}

/// Collects formatted log output.
#[derive(Debug, Clone, Default)]
struct Logs(Arc<Mutex<Vec<u8>>>);

impl Logs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Logs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn slow_connect_does_not_block_readers() {
    let (store, driver) = support::store();
    driver.set_connect_delay(Duration::from_secs(1));

    thread::scope(|s| {
        let connecting = s.spawn(|| store.connect());

        thread::sleep(Duration::from_millis(100));

        let start = Instant::now();
        assert!(!store.is_connected());
        store.disconnect();
        assert!(start.elapsed() < Duration::from_millis(250), "{:?}", start.elapsed());

        assert_ok!(connecting.join().unwrap());
    });

    assert!(store.is_connected());
}

#[test]
fn racing_connects_install_one_pool() {
    let (store, driver) = support::store();
    driver.set_connect_delay(Duration::from_millis(200));
    let barrier = Barrier::new(2);

    thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| {
                barrier.wait();
                assert_ok!(store.connect());
            });
        }
    });

    assert!(store.is_connected());

    let widgets = assert_ok!(store.map_sync::<Widget>());
    let widget = Widget {
        id: "1".to_string(),
        name: "one".to_string(),
    };
    assert_ok!(widgets.save(&widget));
    assert_eq!(assert_ok!(widgets.load("1")), Some(widget));
}

#[test]
fn checkout_failure_is_logged() {
    let (store, driver) = support::connected();
    let widgets = assert_ok!(store.map_sync::<Widget>());

    driver.go_away();

    let logs = Logs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer({
            let logs = logs.clone();
            move || logs.clone()
        })
        .with_ansi(false)
        .finish();

    let err = tracing::subscriber::with_default(subscriber, || assert_err!(widgets.load("1")));
    assert!(err.is_connection_pool(), "{err}");

    let logs = logs.contents();
    assert!(logs.contains("connection checkout failed"), "{logs}");
    assert!(logs.contains("connection refused"), "{logs}");
}

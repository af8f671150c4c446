#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use fuellog::api::transport::{HttpResponse, Transport};
use fuellog::config::Config;
use fuellog::core::clock::Clock;
use fuellog::core::context::AppContext;
use fuellog::db::pool::DbPool;
use fuellog::errors::{AppError, AppResult};
use std::collections::VecDeque;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
pub fn fuellog() -> Command {
    cargo_bin_cmd!("fuellog")
}

/// Create a unique test file path inside the system temp dir and remove any existing file
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("fuellog_{}.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Shared counter; clones see the same value.
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicU32>);

impl Counter {
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn drop_one(&self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }

    fn raise_to(&self, v: u32) {
        self.0.fetch_max(v, Ordering::SeqCst);
    }
}

/// Canned reply of the fake transport.
#[derive(Clone)]
pub enum Reply {
    Status(u16, String),
    ConnectionRefused,
}

/// Transport that replays scripted replies and then repeats `fallback`.
/// The counters are shared so the test can read them after the context took
/// ownership.
pub struct MockTransport {
    script: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    delay: Duration,
    in_flight: Counter,
    pub calls: Counter,
    pub max_in_flight: Counter,
}

impl MockTransport {
    pub fn always(reply: Reply) -> Self {
        Self::scripted(Vec::new(), reply)
    }

    pub fn scripted(script: Vec<Reply>, fallback: Reply) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            delay: Duration::ZERO,
            in_flight: Counter::default(),
            calls: Counter::default(),
            max_in_flight: Counter::default(),
        }
    }

    /// Make every request block for `delay` of real time.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Transport for MockTransport {
    fn get(&self, _url: &str, query: &[(&'static str, String)]) -> AppResult<HttpResponse> {
        assert!(query.iter().any(|(k, _)| *k == "apikey"));
        self.calls.bump();

        let running = self.in_flight.bump();
        self.max_in_flight.raise_to(running);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.in_flight.drop_one();

        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            Reply::Status(status, body) => Ok(HttpResponse { status, body }),
            Reply::ConnectionRefused => Err(AppError::Other("connection refused".into())),
        }
    }
}

/// Clock that only moves when slept on or advanced by hand.
/// Clones share the same time, so a test can keep one handle while the
/// context owns another.
#[derive(Clone)]
pub struct ManualClock {
    epoch: i64,
    now: Arc<Mutex<Duration>>,
    sleeps: Counter,
}

impl ManualClock {
    pub fn starting_at(epoch: i64) -> Self {
        Self {
            epoch,
            now: Arc::new(Mutex::new(Duration::ZERO)),
            sleeps: Counter::default(),
        }
    }

    pub fn advance(&self, d: Duration) {
        *self.now.lock().unwrap() += d;
    }

    /// Time advanced since the clock was created.
    pub fn elapsed(&self) -> Duration {
        *self.now.lock().unwrap()
    }

    /// Number of `sleep` calls so far.
    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }
}

impl Clock for ManualClock {
    fn unix_now(&self) -> i64 {
        self.epoch + self.elapsed().as_secs() as i64
    }

    fn sleep(&self, d: Duration) {
        self.sleeps.bump();
        self.advance(d);
    }
}

pub fn test_config() -> Config {
    let mut cfg = Config::template();
    cfg.apikey = "test-key".into();
    cfg.url = "http://mock.invalid/json/list.php".into();
    cfg.tries = 3;
    cfg.timeout = 10;
    cfg.interval = 360;
    cfg
}

/// Fresh database file, unique per call within this test binary.
pub fn temp_db() -> DbPool {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let n = NEXT.fetch_add(1, Ordering::SeqCst);
    let path = temp_path(&format!("db_{}_{n}", std::process::id()), "sqlite");
    DbPool::new(&path).expect("open temp db")
}

/// Build a context on a fresh database. Returns the context, the shared
/// attempt counter and a handle on the clock.
pub fn context(cfg: Config, transport: MockTransport) -> (AppContext, Counter, ManualClock) {
    let calls = transport.calls.clone();
    let clock = ManualClock::starting_at(1000);

    let ctx = AppContext::with_parts(
        cfg,
        temp_db(),
        Box::new(transport),
        Box::new(clock.clone()),
    )
    .expect("init schema");

    (ctx, calls, clock)
}

pub fn station_json(id: &str, price: Option<f64>, is_open: bool) -> String {
    let price = price
        .map(|p| p.to_string())
        .unwrap_or_else(|| "null".into());
    format!(
        r#"{{"id": "{id}", "name": "Shell", "brand": "Shell", "street": "Main",
            "houseNumber": "1", "postCode": 12345, "place": "Town",
            "lat": 1.0, "lng": 2.0, "dist": 0.5, "price": {price}, "isOpen": {is_open}}}"#
    )
}

pub fn list_body(ok: bool, message: Option<&str>, stations: &[String]) -> String {
    let message = message
        .map(|m| format!("\"{m}\""))
        .unwrap_or_else(|| "null".into());
    format!(
        r#"{{"ok": {ok}, "status": "{}", "message": {message}, "stations": [{}]}}"#,
        if ok { "ok" } else { "error" },
        stations.join(",")
    )
}

pub fn ok_reply(stations: &[String]) -> Reply {
    Reply::Status(200, list_body(true, None, stations))
}

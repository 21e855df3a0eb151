//! Log output of the codec as seen by an embedding host.

use std::io;
use std::sync::{Arc, Mutex};
use tokenizer::telemetry::{self, LogConfig, LogFormat};
use tokenizer::{ClaimsBuilder, Config, Tokenizer};

const SECRET: &str = "super-secret-hmac-key";

/// Shared in-memory log sink.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn tokenizer() -> Tokenizer {
    let config = Config::new()
        .with_hash_hmac_key(SECRET)
        .with_issuer("foo")
        .with_subject("foo")
        .with_audience("foo")
        .with_zoneinfo("Europe/Amsterdam")
        .with_issued_at("03-02-2020 21:35:30");
    Tokenizer::new(config).unwrap()
}

fn run_logged(config: &LogConfig, f: impl FnOnce()) -> String {
    let sink = Captured::default();
    let writer = sink.clone();
    let dispatch = telemetry::dispatch(config, move || writer.clone());
    tracing::dispatcher::with_default(&dispatch, f);
    sink.contents()
}

#[test]
fn rejections_are_logged_without_secrets() {
    let tokenizer = tokenizer();
    let token = tokenizer
        .create_token(&ClaimsBuilder::new().claim("role", "user").build())
        .unwrap();
    let signature = token.rsplit('.').next().unwrap().to_string();
    let tampered = format!("{token}x");

    let output = run_logged(&LogConfig::default().with_format(LogFormat::Json), || {
        assert!(tokenizer.is_valid_token(&tampered).is_err());
        assert!(tokenizer.is_valid_token("a.b").is_err());
    });

    assert!(output.contains("Rejected token with signature mismatch"));
    assert!(output.contains("Rejected token with wrong number of segments"));
    assert!(output.lines().all(|line| line.trim_start().starts_with('{')));
    assert!(!output.contains(SECRET));
    assert!(!output.contains(&signature));
}

#[test]
fn debug_events_follow_configured_level() {
    let tokenizer = tokenizer();

    let info = run_logged(&LogConfig::default(), || {
        let token = tokenizer.create_token(&ClaimsBuilder::new().build()).unwrap();
        tokenizer.is_valid_token(&token).unwrap();
    });
    assert!(!info.contains("Created token"));

    let debug = run_logged(&LogConfig::default().with_level("debug"), || {
        let token = tokenizer.create_token(&ClaimsBuilder::new().build()).unwrap();
        tokenizer.is_valid_token(&token).unwrap();
    });
    assert!(debug.contains("Created token"));
    assert!(debug.contains("Token signature verified"));
    assert!(!debug.contains(SECRET));
}

//! `zoneinfo` claim derived from the process timezone.
//!
//! Kept in its own test binary because it mutates `TZ` and `TZDIR`.

use std::env;
use std::fs;
use tokenizer::{ClaimsBuilder, Config, Tokenizer};

fn issued_zone() -> String {
    let config = Config::new()
        .with_hash_hmac_key("foo")
        .with_issuer("foo")
        .with_subject("foo")
        .with_audience("foo");
    let tokenizer = Tokenizer::new(config).unwrap();
    let token = tokenizer.create_token(&ClaimsBuilder::new().build()).unwrap();
    let payload = tokenizer.get_token_payload(&token, true).unwrap();
    payload["zoneinfo"].as_str().unwrap().to_string()
}

#[test]
fn zoneinfo_claim_follows_tz() {
    let system_zone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".into());

    env::set_var("TZ", "/usr/share/zoneinfo/Europe/Amsterdam");
    assert_eq!(issued_zone(), "Europe/Amsterdam");

    env::set_var("TZ", ":/usr/share/zoneinfo/America/New_York");
    assert_eq!(issued_zone(), "America/New_York");

    for rules in ["UTC0", "CET-1CEST,M3.5.0,M10.5.0/3"] {
        env::set_var("TZ", rules);
        let zone = issued_zone();
        assert_ne!(zone, rules);
        assert!(!zone.contains(','));
        assert_eq!(zone, system_zone);
    }

    let zone_dir = env::temp_dir().join(format!("tokenizer-zoneinfo-{}", std::process::id()));
    fs::create_dir_all(zone_dir.join("Test")).unwrap();
    fs::write(zone_dir.join("Test").join("Zone"), b"TZif").unwrap();
    env::set_var("TZDIR", &zone_dir);

    env::set_var("TZ", "Test/Zone");
    assert_eq!(issued_zone(), "Test/Zone");

    env::set_var("TZ", "Test/Missing");
    assert_eq!(issued_zone(), system_zone);

    env::remove_var("TZDIR");
    env::remove_var("TZ");
    let _ = fs::remove_dir_all(&zone_dir);
}

use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn reads_all_variables() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("BIND_ADDR", "127.0.0.1"),
        ("PORT", "8080"),
        ("RELAY_CHANNEL_CAPACITY", "16"),
    ]))
    .unwrap();
    assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8080");
    assert_eq!(cfg.channel_capacity, 16);
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("BIND_ADDR", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
}

#[test]
fn ipv6_bind_addr_accepted() {
    let cfg = ServerConfig::from_lookup(lookup(&[("BIND_ADDR", "::1"), ("PORT", "9000")])).unwrap();
    assert_eq!(cfg.socket_addr().to_string(), "[::1]:9000");
}

#[test]
fn invalid_port_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", ref value, .. } if value == "70000"));
}

#[test]
fn invalid_bind_addr_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "BIND_ADDR", .. }));
}

#[test]
fn zero_capacity_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("RELAY_CHANNEL_CAPACITY", "0")])).unwrap_err();
    assert!(err.to_string().contains("must be at least 1"));
}

#[test]
fn non_numeric_capacity_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("RELAY_CHANNEL_CAPACITY", "lots")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "RELAY_CHANNEL_CAPACITY", .. }));
}

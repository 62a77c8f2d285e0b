// Endpoint descriptor tests.

use super::*;

fn spec(target: &str, port: u64, host: &str) -> EndpointSpec {
    EndpointSpec {
        target_name: target.to_string(),
        port,
        connect_host: host.to_string(),
    }
}

#[test]
fn test_parse_target_only() {
    assert_eq!(EndpointSpec::parse("a.com"), spec("a.com", 443, "a.com"));
}

#[test]
fn test_parse_target_and_port() {
    assert_eq!(
        EndpointSpec::parse("a.com:8443"),
        spec("a.com", 8443, "a.com")
    );
}

#[test]
fn test_parse_target_port_and_host() {
    assert_eq!(
        EndpointSpec::parse("a.com:8443:10.0.0.1"),
        spec("a.com", 8443, "10.0.0.1")
    );
}

#[test]
fn test_parse_unparseable_port_falls_back_to_default() {
    assert_eq!(
        EndpointSpec::parse("a.com:notanumber"),
        spec("a.com", 443, "a.com")
    );
    // Host field still honored when the port is junk
    assert_eq!(
        EndpointSpec::parse("a.com:https:lb.internal"),
        spec("a.com", 443, "lb.internal")
    );
}

#[test]
fn test_parse_non_numeric_ports_fall_back_to_default() {
    assert_eq!(EndpointSpec::parse("a.com:-1").port, 443);
    assert_eq!(EndpointSpec::parse("a.com:").port, 443);
    assert_eq!(EndpointSpec::parse("a.com:8443x").port, 443);
    assert_eq!(EndpointSpec::parse("a.com:65535").port, 65535);
    assert_eq!(EndpointSpec::parse("a.com:0").port, 0);
}

#[test]
fn test_parse_keeps_out_of_range_port() {
    let parsed = EndpointSpec::parse("a.com:70000");
    assert_eq!(parsed, spec("a.com", 70000, "a.com"));
    assert_eq!(parsed.label(), "a.com:70000:a.com");
    assert_eq!(parsed.tcp_port(), None);
    assert_eq!(EndpointSpec::parse("a.com:65536").tcp_port(), None);
    assert_eq!(EndpointSpec::parse("a.com:65535").tcp_port(), Some(65535));
}

#[test]
fn test_parse_ignores_extra_fields() {
    assert_eq!(
        EndpointSpec::parse("a.com:443:b.com:junk"),
        spec("a.com", 443, "b.com")
    );
}

#[test]
fn test_parse_empty_descriptor_degrades() {
    assert_eq!(EndpointSpec::parse(""), spec("", 443, ""));
}

#[test]
fn test_parse_empty_host_field_is_kept_verbatim() {
    // Only an absent host defaults to the target; an empty one is passed through
    assert_eq!(EndpointSpec::parse("a.com:443:"), spec("a.com", 443, ""));
}

#[test]
fn test_label_format() {
    assert_eq!(EndpointSpec::parse("a.com").label(), "a.com:443:a.com");
    assert_eq!(
        EndpointSpec::parse("a.com:8443:10.0.0.1").label(),
        "a.com:8443:10.0.0.1"
    );
}

#[test]
fn test_from_str_matches_parse() {
    let descriptor = "example.com:8443";
    assert_eq!(EndpointSpec::from(descriptor), EndpointSpec::parse(descriptor));
}

use crate::support::{entry, feed, key, posts, service, ATOM_OPEN};
use splunk_orm::transport::{Method, Response};
use splunk_orm::{ApiError, Args, Refresh};

const PATH: &str = "/services/data/indexes/main";

#[test]
fn count_is_read_after_refresh() {
    let (transport, service) = service();
    transport.route_ok(Method::Get, PATH, feed(&[entry("main", PATH, &key("count", "3"))]));
    let mut entity = service.entity("data/indexes/main");
    assert_eq!(entity.get_integer("count").unwrap(), 3);
}

#[test]
fn empty_feed_falls_back_to_default() {
    let (transport, service) = service();
    transport.route_ok(Method::Get, PATH, format!("{ATOM_OPEN}</feed>"));
    let mut entity = service.entity("data/indexes/main");
    assert_eq!(entity.get_integer_or("count", -1).unwrap(), -1);
    assert!(!entity.is_dirty());
}

#[test]
fn populated_then_empty_refresh_drops_the_old_snapshot() {
    let (transport, service) = service();
    transport.route_ok(Method::Get, PATH, feed(&[entry("main", PATH, &key("count", "3"))]));
    transport.route_ok(Method::Get, PATH, format!("{ATOM_OPEN}</feed>"));
    let mut entity = service.entity(PATH);
    assert_eq!(entity.get_integer_or("count", -1).unwrap(), 3);
    assert_eq!(entity.name().unwrap(), "main");

    entity.invalidate();
    assert_eq!(entity.get_integer_or("count", -1).unwrap(), -1);
    assert_eq!(entity.name().unwrap(), "");
    assert!(entity.links().unwrap().is_empty());
}

#[test]
fn deeply_nested_content_is_rejected_not_fatal() {
    let (transport, service) = service();
    let depth = 1000;
    let body = format!(
        r#"{ATOM_OPEN}<entry><title>deep</title><content type="text/xml">{}x{}</content></entry></feed>"#,
        r#"<s:dict><s:key name="a">"#.repeat(depth),
        "</s:key></s:dict>".repeat(depth)
    );
    transport.route_ok(Method::Get, PATH, body);
    let mut entity = service.entity(PATH);
    assert!(matches!(entity.get_string("a"), Err(ApiError::Format(_))));
    assert!(entity.is_dirty());
}

#[test]
fn every_invalidating_action_costs_exactly_one_refresh() {
    let (transport, service) = service();
    transport.route_ok(Method::Get, PATH, feed(&[entry("main", PATH, &key("count", "3"))]));
    for suffix in ["", "/enable", "/disable", "/_reload"] {
        transport.route_ok(Method::Post, &format!("{PATH}{suffix}"), "");
    }
    let mut entity = service.entity(PATH);

    entity.get_integer("count").unwrap();
    entity.get_integer("count").unwrap();
    assert_eq!(transport.count(Method::Get, PATH), 1);

    let mut expected_gets = 1;
    let actions: [fn(&mut splunk_orm::Entity) -> splunk_orm::Result<()>; 4] = [
        |e| e.update_with(&Args::new().with("count", "4")),
        |e| e.enable(),
        |e| e.disable(),
        |e| e.reload(),
    ];
    for action in actions {
        action(&mut entity).unwrap();
        assert!(entity.is_dirty());
        entity.get_integer("count").unwrap();
        entity.get_integer("count").unwrap();
        expected_gets += 1;
        assert_eq!(transport.count(Method::Get, PATH), expected_gets);
    }
}

#[test]
fn staged_write_wins_over_server_content_until_update() {
    let (transport, service) = service();
    transport.route_ok(Method::Get, PATH, feed(&[entry("main", PATH, &key("count", "3"))]));
    transport.route_ok(Method::Post, PATH, "");
    let mut entity = service.entity(PATH);

    entity.set_cache_value("count", 10);
    assert_eq!(entity.get_integer("count").unwrap(), 10);
    assert!(transport.calls().is_empty());

    entity.update().unwrap();
    let sent = posts(&transport);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].args.to_pairs().unwrap(), vec![("count".to_string(), "10".to_string())]);
    assert_eq!(entity.get_integer("count").unwrap(), 3);
}

#[test]
fn server_error_message_is_surfaced() {
    let (transport, service) = service();
    transport.route(
        Method::Get,
        PATH,
        Response::with_status(
            403,
            r#"<response><messages><msg type="ERROR">Permission denied</msg></messages></response>"#,
        ),
    );
    let mut entity = service.entity(PATH);
    match entity.get_string("count") {
        Err(ApiError::Http { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Permission denied");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(entity.is_dirty());
}

#[test]
fn malformed_value_fails_loudly_even_with_default() {
    let (transport, service) = service();
    transport.route_ok(Method::Get, PATH, feed(&[entry("main", PATH, &key("count", "three"))]));
    let mut entity = service.entity(PATH);
    assert!(matches!(entity.get_integer_or("count", 0), Err(ApiError::Format(_))));
}

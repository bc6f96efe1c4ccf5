use crate::support::{entry, feed, key, service};
use splunk_orm::transport::Method;
use splunk_orm::{ApiError, Args, InputKind, Refresh};

const ROOT: &str = "/services/data/inputs";

fn kind(title: &str, creatable: bool) -> String {
    let create = if creatable {
        format!(r#"<link href="{ROOT}/{title}/_new" rel="create"/>"#)
    } else {
        String::new()
    };
    format!(
        r#"<entry><title>{title}</title><link href="{ROOT}/{title}" rel="alternate"/>{create}</entry>"#
    )
}

fn route_taxonomy(transport: &splunk_orm::MemoryTransport, extra_kind: bool) {
    let mut top = vec![kind("all", true), kind("monitor", true), kind("tcp", false)];
    if extra_kind {
        top.push(kind("http", true));
    }
    transport.route_ok(Method::Get, ROOT, feed(&top));
    transport.route_ok(
        Method::Get,
        &format!("{ROOT}/tcp"),
        feed(&[kind("cooked", true), kind("raw", true), kind("ssl", true)]),
    );
    transport.route_ok(
        Method::Get,
        &format!("{ROOT}/monitor"),
        feed(&[entry(
            "/var/log/messages",
            "/servicesNS/nobody/search/data/inputs/monitor/%2Fvar%2Flog%2Fmessages",
            &key("index", "os"),
        )]),
    );
    transport.route_ok(
        Method::Get,
        &format!("{ROOT}/tcp/cooked"),
        feed(&[entry("9997", "/servicesNS/nobody/search/data/inputs/tcp/cooked/9997", "")]),
    );
    transport.route_ok(Method::Get, &format!("{ROOT}/tcp/raw"), feed(&[]));
    transport.route_ok(
        Method::Get,
        &format!("{ROOT}/http"),
        feed(&[entry("hec", "/servicesNS/nobody/search/data/inputs/http/hec", "")]),
    );
}

#[test]
fn members_are_typed_by_the_kind_they_came_from() {
    let (transport, service) = service();
    route_taxonomy(&transport, false);
    let mut inputs = service.inputs();

    let monitor = inputs.get("/var/log/messages").unwrap().unwrap();
    assert_eq!(monitor.kind(), &InputKind::Monitor);
    assert_eq!(monitor.get_string("index").unwrap(), "os");

    let cooked = inputs.get("9997").unwrap().unwrap();
    assert_eq!(cooked.kind(), &InputKind::TcpCooked);
    assert_eq!(cooked.kind().label(), Some("splunktcp"));

    assert_eq!(transport.count(Method::Get, &format!("{ROOT}/all")), 0);
    assert_eq!(transport.count(Method::Get, &format!("{ROOT}/tcp/ssl")), 0);
}

#[test]
fn kinds_are_rediscovered_on_every_refresh() {
    let (transport, service) = service();
    route_taxonomy(&transport, false);
    let mut inputs = service.inputs();
    assert_eq!(inputs.kinds().unwrap().len(), 3);
    assert!(!inputs.contains("hec").unwrap());

    let (transport, service) = crate::support::service();
    route_taxonomy(&transport, true);
    let mut inputs = service.inputs();
    assert_eq!(inputs.kinds().unwrap().len(), 4);

    let hec = inputs.get("hec").unwrap().unwrap();
    assert_eq!(hec.kind(), &InputKind::Other("http".to_string()));
    inputs.invalidate();
    assert!(inputs.kinds().unwrap().contains(&InputKind::Other("http".to_string())));
    assert_eq!(transport.count(Method::Get, ROOT), 2);
}

#[test]
fn creation_requires_a_kind() {
    let (transport, service) = service();
    route_taxonomy(&transport, false);
    transport.route_ok(Method::Post, &format!("{ROOT}/tcp/raw"), "");
    let mut inputs = service.inputs();

    assert!(matches!(
        inputs.create("514", &Args::new()),
        Err(ApiError::UnsupportedOperation(_))
    ));

    let created = inputs
        .create_kind("514", &InputKind::TcpRaw, &Args::new().with("sourcetype", "syslog"))
        .unwrap();
    assert!(created.is_none());
    assert_eq!(transport.count(Method::Post, &format!("{ROOT}/tcp/raw")), 1);
    assert!(!inputs.is_dirty());
}

use crate::support::{acl, entry, feed, key, service};
use splunk_orm::collection::{CollectionArgs, SortDirection};
use splunk_orm::transport::Method;
use splunk_orm::{ApiError, Namespace, Refresh, Sharing};

const APPS: &str = "/services/apps/local";

fn apps_feed() -> String {
    feed(&[
        entry(
            "search",
            "/servicesNS/nobody/system/apps/local/search",
            &format!("{}{}", key("visible", "1"), acl("nobody", "system", "system")),
        ),
        entry(
            "lookup",
            "/servicesNS/nobody/search/apps/local/lookup",
            &acl("nobody", "search", "app"),
        ),
        entry(
            "lookup",
            "/servicesNS/admin/launcher/apps/local/lookup",
            &acl("admin", "launcher", "user"),
        ),
    ])
}

#[test]
fn ambiguous_names_resolve_per_namespace() {
    let (transport, service) = service();
    transport.route_ok(Method::Get, APPS, apps_feed());
    let mut apps = service.collection("apps/local");

    match apps.get("lookup") {
        Err(ApiError::AmbiguousKey(name)) => assert_eq!(name, "lookup"),
        other => panic!("expected ambiguity, got {:?}", other.map(|e| e.is_some())),
    }

    let shared = Namespace::new().app("search").sharing(Sharing::App);
    let found = apps.get_in("lookup", &shared).unwrap().unwrap();
    assert_eq!(found.path(), "/servicesNS/nobody/search/apps/local/lookup");
    assert_eq!(found.namespace().unwrap().sharing, Some(Sharing::App));

    let private = Namespace::new().owner("admin").app("launcher").sharing(Sharing::User);
    let found = apps.get_in("lookup", &private).unwrap().unwrap();
    assert_eq!(found.path(), "/servicesNS/admin/launcher/apps/local/lookup");

    let system = Namespace::new().sharing(Sharing::System);
    let search = apps.get_in("search", &system).unwrap().unwrap();
    assert!(search.get_boolean("visible").unwrap());

    assert!(apps.get_in("lookup", &system).unwrap().is_none());
    assert_eq!(transport.count(Method::Get, APPS), 1);
}

#[test]
fn membership_is_rebuilt_after_invalidation() {
    let (transport, service) = service();
    transport.route_ok(Method::Get, APPS, apps_feed());
    transport.route_ok(
        Method::Get,
        APPS,
        feed(&[entry("only", "/servicesNS/nobody/search/apps/local/only", "")]),
    );
    let mut apps = service.collection("apps/local");

    assert_eq!(apps.len().unwrap(), 2);
    apps.invalidate();
    assert_eq!(apps.names().unwrap(), vec!["only"]);
    assert!(apps.get("lookup").unwrap().is_none());
}

#[test]
fn paged_refresh_sends_collection_args() {
    let (transport, service) = service();
    transport.route_ok(Method::Get, APPS, apps_feed());
    let mut apps = service.collection("apps/local");

    let args = CollectionArgs::new()
        .count(2)
        .offset(4)
        .sort_key("name")
        .sort_dir(SortDirection::Desc);
    apps.refresh_with(&args).unwrap();
    assert!(!apps.is_dirty());
    assert_eq!(apps.page_info().total_results.as_deref(), Some("3"));

    let sent = transport.calls()[0].args.to_pairs().unwrap();
    assert!(sent.contains(&("count".to_string(), "2".to_string())));
    assert!(sent.contains(&("offset".to_string(), "4".to_string())));
    assert!(sent.contains(&("sort_dir".to_string(), "desc".to_string())));
}

#[test]
fn member_updates_target_the_member_path() {
    let (transport, service) = service();
    let member = "/servicesNS/nobody/search/apps/local/lookup";
    transport.route_ok(Method::Get, APPS, apps_feed());
    transport.route_ok(Method::Post, member, "");
    let mut apps = service.collection("apps/local");

    let ns = Namespace::new().owner("nobody").app("search");
    let lookup = apps.get_in("lookup", &ns).unwrap().unwrap();
    lookup.set_cache_value("visible", false);
    lookup.update().unwrap();
    assert_eq!(transport.count(Method::Post, member), 1);
}

use splunk_orm::{ConfigLoader, Service};

#[test]
fn service_from_config_applies_ambient_namespace() {
    let config = ConfigLoader::load_from_str(
        r#"
[connection]
scheme = "http"
host = "127.0.0.1"

[namespace]
owner = "admin"
app = "search"
"#,
    )
    .unwrap();
    let service = Service::from_config(&config).unwrap();
    assert_eq!(
        service.fullpath("saved/searches", None),
        "/servicesNS/admin/search/saved/searches"
    );
    assert_eq!(service.fullpath("/services/server/info", None), "/services/server/info");
}

#[test]
fn default_config_qualifies_under_services() {
    let service = Service::from_config(&ConfigLoader::default()).unwrap();
    assert_eq!(service.fullpath("apps/local", None), "/services/apps/local");
}

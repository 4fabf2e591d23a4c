mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use http::header::AUTHORIZATION;
use http::{Extensions, HeaderMap, HeaderValue, Method};
use youscore_core::{ApiKeys, ApiType, Transport};
use youscore_http::{
    ApiKeySelector, BearerAuth, CachingTransport, Credentials, EditingTransport, RequestEditors,
    RequestHead, UsageTracker, editor_fn,
};

use common::{FakeTransport, MapCache, TestError, get};

fn keys() -> ApiKeys {
    ApiKeys {
        data_analytics: "data-key".to_owned(),
        pdf_legal_entities: "pdf-ul-key".to_owned(),
        pdf_individuals: "pdf-fo-key".to_owned(),
        affiliates: "affiliates-key".to_owned(),
    }
}

fn authorization_for(editors: &RequestEditors, path: &str) -> Option<String> {
    let mut headers = HeaderMap::new();
    let extensions = Extensions::new();
    let mut head = RequestHead::new(&Method::GET, path, &mut headers, &extensions);
    editors.apply(&mut head).unwrap();
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap().to_owned())
}

#[test]
fn test_api_key_selector_routes_by_path() {
    let editors = RequestEditors::builder()
        .push(ApiKeySelector::new(keys()))
        .build();

    let cases = [
        ("/v1/contractors/pdf-file/12345678", "bearer pdf-ul-key"),
        ("/v1/individuals/pdf-reports/1234567890", "bearer pdf-fo-key"),
        ("/v1/affiliates/query", "bearer affiliates-key"),
        ("/v1/individuals/full-name-info", "bearer data-key"),
        ("/v1/usr/12345678", "bearer data-key"),
        ("/v1/rateLimits", "bearer data-key"),
        ("/", "bearer data-key"),
    ];
    for (path, expected) in cases {
        assert_eq!(
            authorization_for(&editors, path).as_deref(),
            Some(expected),
            "path {path}"
        );
    }
}

#[test]
fn test_bearer_auth_replaces_existing_header() {
    let editors = RequestEditors::builder()
        .push(BearerAuth::new("single-key"))
        .build();

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
    let extensions = Extensions::new();
    let mut head = RequestHead::new(&Method::GET, "/v1/usr/1", &mut headers, &extensions);
    editors.apply(&mut head).unwrap();

    let values: Vec<_> = headers.get_all(AUTHORIZATION).iter().collect();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0], "bearer single-key");
    assert!(values[0].is_sensitive());
}

#[test]
fn test_invalid_key_fails_the_editor() {
    let editors = RequestEditors::builder()
        .push(BearerAuth::new("bad\nkey"))
        .build();

    let mut headers = HeaderMap::new();
    let extensions = Extensions::new();
    let mut head = RequestHead::new(&Method::GET, "/v1/usr/1", &mut headers, &extensions);
    let error = editors.apply(&mut head).unwrap_err();

    assert_eq!(error.editor, "bearer-auth");
    assert!(error.to_string().contains("bearer-auth"));
}

#[test]
fn test_credentials_editor_matches_mode() {
    let bearer = RequestEditors::builder()
        .push_shared(Credentials::Bearer("k".to_owned()).into_editor())
        .build();
    assert_eq!(
        authorization_for(&bearer, "/v1/contractors/pdf-file/1").as_deref(),
        Some("bearer k")
    );

    let selector = RequestEditors::builder()
        .push_shared(Credentials::ApiKeys(keys()).into_editor())
        .build();
    assert_eq!(
        authorization_for(&selector, "/v1/contractors/pdf-file/1").as_deref(),
        Some("bearer pdf-ul-key")
    );
}

#[test]
fn test_credentials_debug_hides_keys() {
    let bearer = format!("{:?}", Credentials::Bearer("secret-bearer".to_owned()));
    let keys = format!("{:?}", Credentials::ApiKeys(keys()));

    assert!(!bearer.contains("secret-bearer"));
    assert!(!keys.contains("data-key"));
}

#[test]
fn test_editors_run_in_registration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let first = order.clone();
    let second = order.clone();
    let editors = RequestEditors::builder()
        .push(editor_fn("first", move |head| {
            first.lock().unwrap().push("first");
            head.headers_mut()
                .insert("x-step", HeaderValue::from_static("first"));
            Ok(())
        }))
        .push(editor_fn("second", move |head| {
            second.lock().unwrap().push("second");
            head.headers_mut()
                .insert("x-step", HeaderValue::from_static("second"));
            Ok(())
        }))
        .build();

    let mut headers = HeaderMap::new();
    let extensions = Extensions::new();
    let mut head = RequestHead::new(&Method::GET, "/v1/usr/1", &mut headers, &extensions);
    editors.apply(&mut head).unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    assert_eq!(headers.get("x-step").unwrap(), "second");
    assert_eq!(format!("{editors:?}"), r#"["first", "second"]"#);
}

#[test]
fn test_failing_editor_stops_the_chain() {
    let reached = Arc::new(AtomicUsize::new(0));
    let counter = reached.clone();
    let editors = RequestEditors::builder()
        .push(editor_fn("reject", |_head| Err("quota exhausted".into())))
        .push(editor_fn("after", move |_head| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }))
        .build();

    let mut headers = HeaderMap::new();
    let extensions = Extensions::new();
    let mut head = RequestHead::new(&Method::GET, "/v1/usr/1", &mut headers, &extensions);
    let error = editors.apply(&mut head).unwrap_err();

    assert_eq!(error.editor, "reject");
    assert_eq!(reached.load(Ordering::SeqCst), 0);
}

#[test]
fn test_empty_chain_is_a_no_op() {
    let editors = RequestEditors::default();
    assert!(editors.is_empty());
    assert_eq!(authorization_for(&editors, "/v1/usr/1"), None);
}

#[test]
fn test_usage_tracker_classifies_paths() {
    let records = Arc::new(Mutex::new(Vec::new()));
    let sink = records.clone();
    let editors = RequestEditors::builder()
        .push(UsageTracker::new(
            move |_: &Extensions, api_type: ApiType, path: &str| {
                sink.lock().unwrap().push((api_type, path.to_owned()));
            },
        ))
        .build();

    for path in [
        "/v1/contractorsPdf/1?lang=uk",
        "/v1/usr/1",
        "/v1/courtCaseGroup/1",
        "/v1/rateLimits",
    ] {
        authorization_for(&editors, path);
    }

    assert_eq!(
        *records.lock().unwrap(),
        vec![
            (ApiType::Custom, "/v1/contractorsPdf/1".to_owned()),
            (ApiType::Data, "/v1/usr/1".to_owned()),
            (ApiType::Analysis, "/v1/courtCaseGroup/1".to_owned()),
            (ApiType::Data, "/v1/rateLimits".to_owned()),
        ]
    );
}

#[derive(Clone, Debug, PartialEq)]
struct Tenant(&'static str);

#[tokio::test]
async fn test_usage_tracker_reads_request_context() {
    let tenants = Arc::new(Mutex::new(Vec::new()));
    let sink = tenants.clone();
    let editors = RequestEditors::builder()
        .push(UsageTracker::new(
            move |extensions: &Extensions, _: ApiType, _: &str| {
                sink.lock().unwrap().push(extensions.get::<Tenant>().cloned());
            },
        ))
        .build();
    let mut transport = EditingTransport::new(FakeTransport::new(), editors);

    let mut request = get("https://api.youscore.com.ua/v1/usr/1");
    request.parts_mut().extensions.insert(Tenant("acme"));
    transport.send(request).await.unwrap();

    assert_eq!(*tenants.lock().unwrap(), vec![Some(Tenant("acme"))]);
}

#[tokio::test]
async fn test_editing_transport_authenticates_before_dispatch() {
    let upstream = FakeTransport::new();
    let editors = RequestEditors::builder()
        .push(ApiKeySelector::new(keys()))
        .build();
    let mut transport = EditingTransport::new(upstream.clone(), editors);

    transport
        .send(get("https://api.youscore.com.ua/v1/affiliates/query"))
        .await
        .unwrap();

    let seen = upstream.seen();
    assert_eq!(
        seen[0].headers.get(AUTHORIZATION).unwrap(),
        "bearer affiliates-key"
    );
}

#[tokio::test]
async fn test_editor_failure_prevents_dispatch() {
    let upstream = FakeTransport::new();
    let editors = RequestEditors::builder()
        .push(editor_fn("reject", |_head| Err("denied".into())))
        .build();
    let mut transport = EditingTransport::new(upstream.clone(), editors);

    let result = transport
        .send(get("https://api.youscore.com.ua/v1/usr/1"))
        .await;

    assert!(matches!(result, Err(TestError::Editor(ref error)) if error.editor == "reject"));
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_usage_is_recorded_for_cache_hits() {
    let upstream = FakeTransport::new();
    let cache = Arc::new(MapCache::default());
    let recorded = Arc::new(AtomicUsize::new(0));
    let counter = recorded.clone();
    let editors = RequestEditors::builder()
        .push(BearerAuth::new("k"))
        .push(UsageTracker::new(
            move |_: &Extensions, _: ApiType, _: &str| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        ))
        .build();
    let mut transport =
        EditingTransport::new(CachingTransport::new(upstream.clone(), cache), editors);

    for _ in 0..3 {
        transport
            .send(get("https://api.youscore.com.ua/v1/usr/00032112"))
            .await
            .unwrap();
    }

    assert_eq!(upstream.calls(), 1);
    assert_eq!(recorded.load(Ordering::SeqCst), 3);
    assert_eq!(
        upstream.seen()[0].headers.get(AUTHORIZATION).unwrap(),
        "bearer k"
    );
}

//! End-to-end tests of the demo gateway over a real socket.

use std::net::SocketAddr;

use jsonp_gateway::{GatewayConfig, HttpServer, Trigger};
use reqwest::StatusCode;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct Running {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
}

async fn start(config: GatewayConfig) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();

    let expected = config.jsonp.clone();
    let server = HttpServer::new(config);
    assert_eq!(server.config().jsonp, expected);
    tokio::spawn(async move {
        let _ = server
            .run_until(listener, async {
                let _ = stopped.await;
            })
            .await;
    });

    Running { addr, stop }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_jsonp_endpoint_over_http() {
    let running = start(GatewayConfig::default()).await;

    let res = client()
        .get(format!("http://{}/action.jsonp?callback=J50Npi.success", running.addr))
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/javascript");
    assert_eq!(res.headers()["content-length"], "32");
    assert_eq!(res.text().await.unwrap(), r#"J50Npi.success({"key":"value"});"#);

    let _ = running.stop.send(());
}

#[tokio::test]
async fn test_plain_json_and_rejection_over_http() {
    let running = start(GatewayConfig::default()).await;
    let client = client();

    let res = client
        .get(format!("http://{}/action.json", running.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"key":"value"}"#);

    let res = client
        .get(format!("http://{}/action.jsonp?callback=bad(name)", running.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().get("content-type").is_none());
    assert!(res.text().await.unwrap().is_empty());

    let _ = running.stop.send(());
}

#[tokio::test]
async fn test_html_route_passes_through_over_http() {
    let running = start(GatewayConfig::default()).await;

    let res = client()
        .get(format!("http://{}/action.html?callback=cb", running.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "<p>not json</p>");

    let _ = running.stop.send(());
}

#[tokio::test]
async fn test_triggered_html_is_not_wrapped_over_http() {
    let mut config = GatewayConfig::default();
    config.jsonp.trigger = Trigger::Callback;
    let running = start(config).await;

    let res = client()
        .get(format!("http://{}/action.html?callback=cb", running.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(res.text().await.unwrap(), "<p>not json</p>");

    let _ = running.stop.send(());
}

#[tokio::test]
async fn test_callback_trigger_with_security_prefix_over_http() {
    let mut config = GatewayConfig::default();
    config.jsonp.trigger = Trigger::Callback;
    config.jsonp.extra_security = true;
    let running = start(config).await;

    let res = client()
        .get(format!("http://{}/action.js?callback=foo", running.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/javascript");
    assert_eq!(res.text().await.unwrap(), r#"/**/foo({"key":"value"});"#);

    let _ = running.stop.send(());
}

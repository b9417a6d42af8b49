//! 使用真实的 reqwest 传输层，对本地一次性 TCP 服务检查实际发出的报文

use owlstorage::{AdminErrorStatus, ApiClient, ReqwestHttpClient};
use owlstorage_shared::NewCategory;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// =========================================================
// 辅助函数
// =========================================================

/// 读取完整的请求报文 (头部 + Content-Length 指定的请求体)
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8(buf).unwrap()
}

/// 启动只响应一次的服务，返回基础地址与收到的原始请求
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let raw = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        raw
    });

    (format!("http://{}/", addr), handle)
}

fn header_value<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    raw.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(name))
        .map(|(_, v)| v.trim())
}

// =========================================================
// 测试
// =========================================================

#[tokio::test]
async fn test_delete_puts_id_in_query_and_bearer_in_header() {
    let (base, server) = serve_once("200 OK", "{}").await;
    let api = ApiClient::new(base, ReqwestHttpClient::new());

    api.delete("/customer")
        .query("id", "42")
        .bearer("Bearer jwt-1")
        .send()
        .await
        .unwrap();

    let raw = server.await.unwrap();
    assert!(raw.starts_with("DELETE /customer?id=42 HTTP/1.1"), "{raw}");
    assert_eq!(header_value(&raw, "authorization"), Some("Bearer jwt-1"));
}

#[tokio::test]
async fn test_create_sends_json_body_and_parses_entity() {
    let (base, server) = serve_once("201 Created", r#"{"id": 5, "name": "Bebidas"}"#).await;
    let api = ApiClient::new(base, ReqwestHttpClient::new());

    let created = api
        .request(
            &NewCategory {
                name: "Bebidas".into(),
            },
            Some("Bearer jwt-2"),
        )
        .await
        .unwrap();

    assert_eq!(created.id, "5");

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /category HTTP/1.1"), "{raw}");
    assert_eq!(header_value(&raw, "content-type"), Some("application/json"));
    assert_eq!(header_value(&raw, "authorization"), Some("Bearer jwt-2"));

    let body = raw.split("\r\n\r\n").nth(1).unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(body).unwrap(),
        serde_json::json!({"name": "Bebidas"})
    );
}

#[tokio::test]
async fn test_unauthorized_status_is_reported() {
    let (base, server) = serve_once("401 Unauthorized", r#"{"error": "token"}"#).await;
    let api = ApiClient::new(base, ReqwestHttpClient::new());

    let err = api
        .get("/products")
        .bearer("Bearer expired")
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.status, AdminErrorStatus::Status);
    assert_eq!(err.http_status(), Some(401));
    server.await.unwrap();
}

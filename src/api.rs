//! REST 客户端
//!
//! `ApiClient` 绑定一个基础地址，本身不持有会话状态：
//! 鉴权头由调用方在每次请求时通过 `bearer` 传入。

use owlstorage_shared::protocol::ApiRequest;
use owlstorage_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{AdminError, AdminResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

#[derive(Clone, Debug)]
pub struct ApiClient<C> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn get(&self, path: &str) -> ApiCall<'_, C> {
        ApiCall::new(self, HttpMethod::Get, path)
    }

    pub fn post(&self, path: &str) -> ApiCall<'_, C> {
        ApiCall::new(self, HttpMethod::Post, path)
    }

    pub fn delete(&self, path: &str) -> ApiCall<'_, C> {
        ApiCall::new(self, HttpMethod::Delete, path)
    }

    /// 发送预定义的接口请求，请求体为 `req` 的 JSON
    pub async fn request<R: ApiRequest>(
        &self,
        req: &R,
        bearer: Option<&str>,
    ) -> AdminResult<R::Response> {
        self.call(req, bearer)?.fetch().await
    }

    /// 同 `request`，但只检查状态码，不解析响应体
    pub async fn dispatch<R: ApiRequest>(
        &self,
        req: &R,
        bearer: Option<&str>,
    ) -> AdminResult<HttpResponse> {
        self.call(req, bearer)?.send().await
    }

    fn call<R: ApiRequest>(&self, req: &R, bearer: Option<&str>) -> AdminResult<ApiCall<'_, C>> {
        let call = ApiCall::new(self, R::METHOD, R::PATH).json(req)?;
        if !R::AUTHENTICATED {
            return Ok(call);
        }

        let bearer = bearer.ok_or_else(|| {
            AdminError::auth_required("missing session token").in_op_with("api.request", R::PATH)
        })?;
        Ok(call.bearer(bearer))
    }
}

// =========================================================
// 单次调用构建器
// =========================================================

/// 单次请求的构建器: path + body? + headers? + query?
pub struct ApiCall<'a, C> {
    api: &'a ApiClient<C>,
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl<'a, C: HttpClient> ApiCall<'a, C> {
    fn new(api: &'a ApiClient<C>, method: HttpMethod, path: &str) -> Self {
        Self {
            api,
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// 设置 `Authorization` 头 (完整值，如 "Bearer xxx")
    pub fn bearer(self, value: &str) -> Self {
        self.header(HEADER_AUTHORIZATION, value)
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置 JSON 请求体
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> AdminResult<Self> {
        let body = serde_json::to_string(body)
            .map_err(|e| AdminError::from(e).in_op_with("api.encode", self.path.clone()))?;
        self.body = Some(body);
        Ok(self.header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON))
    }

    fn build(self) -> (HttpRequest, &'a C) {
        let api = self.api;
        let mut url = api.url(&self.path);
        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }

        let mut req = HttpRequest::new(&url, self.method);
        for (k, v) in &self.headers {
            req = req.with_header(k, v);
        }
        if let Some(body) = self.body {
            req = req.with_body(body);
        }
        (req, &api.client)
    }

    /// 发送请求；网络失败或非 2xx 状态返回错误
    pub async fn send(self) -> AdminResult<HttpResponse> {
        let op = format!("{} {}", self.method.as_str(), self.path);
        let (req, client) = self.build();

        let res = client
            .send(req)
            .await
            .map_err(|e| AdminError::from(e).in_op_with("http.send", op.clone()))?;

        if !res.ok() {
            return Err(
                AdminError::unexpected_status(res.status, format!("请求失败: {}", res.status))
                    .in_op_with("http.send", op),
            );
        }

        Ok(res)
    }

    /// 发送请求并解析 JSON 响应体
    pub async fn fetch<T: DeserializeOwned>(self) -> AdminResult<T> {
        let op = format!("{} {}", self.method.as_str(), self.path);
        let res = self.send().await?;
        res.json::<T>()
            .map_err(|e| AdminError::from(e).in_op_with("http.decode", op))
    }
}

/// 百分号编码 (RFC 3986 unreserved 字符保留原样)
fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminErrorStatus;
    use crate::request::MockHttpClient;
    use owlstorage_shared::{LoginRequest, LoginResponse, NewCategory};
    use serde_json::json;
    use std::rc::Rc;

    const BASE: &str = "http://api.test";

    fn api() -> (Rc<MockHttpClient>, ApiClient<Rc<MockHttpClient>>) {
        let mock = Rc::new(MockHttpClient::new());
        (mock.clone(), ApiClient::new(format!("{}/", BASE), mock))
    }

    #[test]
    fn test_trims_trailing_slash_and_joins_paths() {
        let (_, api) = api();
        assert_eq!(api.base_url(), BASE);
        assert_eq!(api.url("/customers"), "http://api.test/customers");
        assert_eq!(api.url("customers"), "http://api.test/customers");
    }

    #[test]
    fn test_encodes_query_components() {
        assert_eq!(encode_component("42"), "42");
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("ção"), "%C3%A7%C3%A3o");
    }

    #[tokio::test]
    async fn test_delete_sends_id_as_query_with_bearer() {
        let (mock, api) = api();
        mock.mock_response(HttpMethod::Delete, "http://api.test/customer?id=42", 200, json!({}));

        api.delete("/customer")
            .query("id", "42")
            .bearer("Bearer t0k3n")
            .send()
            .await
            .unwrap();

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://api.test/customer?id=42");
        assert_eq!(req.header("Authorization"), Some("Bearer t0k3n"));
        assert_eq!(req.body, None);
    }

    #[tokio::test]
    async fn test_non_2xx_is_a_status_error() {
        let (mock, api) = api();
        mock.mock_response(HttpMethod::Get, "http://api.test/customers", 401, json!({"error": "unauthorized"}));

        let err = api.get("/customers").send().await.unwrap_err();
        assert_eq!(err.status, AdminErrorStatus::Status);
        assert_eq!(err.http_status(), Some(401));
    }

    #[tokio::test]
    async fn test_network_failure_is_a_network_error() {
        let (mock, api) = api();
        mock.mock_network_error(HttpMethod::Get, "http://api.test/products");

        let err = api.get("/products").send().await.unwrap_err();
        assert_eq!(err.status, AdminErrorStatus::Network);
        assert_eq!(err.spans()[0].detail.as_deref(), Some("GET /products"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_a_serialization_error() {
        let (mock, api) = api();
        mock.mock_response(HttpMethod::Get, "http://api.test/products", 200, json!("not an object"));

        let err = api
            .get("/products")
            .fetch::<LoginResponse>()
            .await
            .unwrap_err();
        assert_eq!(err.status, AdminErrorStatus::Serialization);
    }

    #[tokio::test]
    async fn test_typed_request_without_auth_skips_bearer() {
        let (mock, api) = api();
        mock.mock_response(HttpMethod::Post, "http://api.test/user/login", 200, json!({"token": "jwt"}));

        let req = LoginRequest {
            email: "a@b.c".into(),
            password: "secret".into(),
        };
        let res = api.request(&req, Some("Bearer ignored")).await.unwrap();

        assert_eq!(res.token, "jwt");
        let sent = mock.last_request().unwrap();
        assert_eq!(sent.header("Authorization"), None);
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(sent.body.as_deref().unwrap()).unwrap(),
            json!({"email": "a@b.c", "password": "secret"})
        );
    }

    #[tokio::test]
    async fn test_dispatch_skips_body_decoding() {
        let (mock, api) = api();
        mock.mock_raw_response(HttpMethod::Post, "http://api.test/user/login", 201, "");

        let req = LoginRequest {
            email: "a@b.c".into(),
            password: "secret".into(),
        };
        let res = api.dispatch(&req, None).await.unwrap();
        assert_eq!(res.status, 201);

        let err = api.request(&req, None).await.unwrap_err();
        assert_eq!(err.status, AdminErrorStatus::Serialization);
    }

    #[tokio::test]
    async fn test_typed_authenticated_request_requires_token() {
        let (mock, api) = api();

        let err = api
            .request(&NewCategory { name: "Bebidas".into() }, None)
            .await
            .unwrap_err();

        assert_eq!(err.status, AdminErrorStatus::AuthRequired);
        assert_eq!(mock.request_count(), 0);
    }
}

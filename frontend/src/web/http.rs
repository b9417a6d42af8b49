//! 浏览器 HTTP 传输层
//!
//! 基于 `gloo-net` 的 fetch 封装，实现核心库的 `HttpClient` 特性。

use gloo_net::http::{Method, RequestBuilder};
use owlstorage::request::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHttpClient;

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = RequestBuilder::new(&req.url).method(method(req.method));

        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| HttpError::RequestBuild(e.to_string()))?;

        let res = request
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

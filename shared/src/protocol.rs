use crate::{
    Category, Customer, LoginRequest, LoginResponse, NewCategory, NewCustomer, NewProduct,
    Product, RegisterRequest, paths,
};
use serde::{Serialize, de::{DeserializeOwned, IgnoredAny}};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// The request value itself is sent as the JSON body.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether a bearer token must accompany the request.
    const AUTHENTICATED: bool;
}

// =========================================================
// Request Definitions
// =========================================================

/// 注册成功时服务端的返回体不固定 (对象、字符串或空)，客户端不关心内容
impl ApiRequest for RegisterRequest {
    type Response = IgnoredAny;
    const PATH: &'static str = paths::USER_REGISTER;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = paths::USER_LOGIN;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

impl ApiRequest for NewCustomer {
    type Response = Customer;
    const PATH: &'static str = paths::CUSTOMER;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = true;
}

impl ApiRequest for NewCategory {
    type Response = Category;
    const PATH: &'static str = paths::CATEGORY;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = true;
}

impl ApiRequest for NewProduct {
    type Response = Product;
    const PATH: &'static str = paths::PRODUCT;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = true;
}

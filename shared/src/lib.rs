use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod serde_helper;

pub use date::CreatedAt;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 删除接口通过 query 参数 `?id=` 传递实体 ID
pub const QUERY_ID: &str = "id";

/// 远端 REST 接口路径
pub mod paths {
    pub const USER_REGISTER: &str = "/user/register";
    pub const USER_LOGIN: &str = "/user/login";

    pub const CUSTOMERS: &str = "/customers";
    pub const CUSTOMER: &str = "/customer";

    pub const CATEGORIES: &str = "/categories";
    pub const CATEGORY: &str = "/category";

    pub const PRODUCTS: &str = "/products";
    pub const PRODUCT: &str = "/product";
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 客户，由服务端分配 `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "serde_helper::string_or_null")]
    pub email: String,
    #[serde(default, deserialize_with = "serde_helper::string_or_null")]
    pub address: String,
    #[serde(default, deserialize_with = "serde_helper::string_or_null")]
    pub contact: String,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<CreatedAt>,
}

impl Customer {
    pub fn status_label(&self) -> &'static str {
        if self.status { "Ativo" } else { "Inativo" }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub address: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

/// 商品
///
/// `price`、`quantity` 与 `category_id` 保留服务端返回的文本形式，
/// 客户端不对其做数值校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub price: String,
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub quantity: String,
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub category_id: String,
    #[serde(default)]
    pub created_at: Option<CreatedAt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub category_id: String,
}

// =========================================================
// 认证模型 (Credentials)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customer_accepts_numeric_id_and_missing_status() {
        let customer: Customer = serde_json::from_value(json!({
            "id": 42,
            "name": "Ana",
            "email": "ana@example.com",
            "address": "Rua A",
            "contact": "1199999"
        }))
        .unwrap();

        assert_eq!(customer.id, "42");
        assert!(!customer.status);
        assert_eq!(customer.status_label(), "Inativo");
        assert!(customer.created_at.is_none());
    }

    #[test]
    fn test_customer_tolerates_missing_contact_details() {
        let customer: Customer = serde_json::from_value(json!({
            "id": "c-1",
            "name": "Ana",
            "email": null
        }))
        .unwrap();

        assert_eq!(customer.email, "");
        assert_eq!(customer.address, "");
        assert_eq!(customer.contact, "");
    }

    #[test]
    fn test_product_keeps_textual_price_and_quantity() {
        let product: Product = serde_json::from_value(json!({
            "id": "p-1",
            "name": "Caneta",
            "price": 2.5,
            "quantity": "10",
            "category_id": 3,
            "created_at": "2023-08-01T12:30:00Z"
        }))
        .unwrap();

        assert_eq!(product.price, "2.5");
        assert_eq!(product.quantity, "10");
        assert_eq!(product.category_id, "3");
        assert_eq!(
            product.created_at.as_ref().map(|c| c.display()),
            Some("01/08/2023 12:30".to_string())
        );
    }
}

//! 列表资源定义
//!
//! 每个实体页面 (客户、分类、商品) 只需提供一份 `ResourceConfig`
//! 与 `Resource` 实现，加载、创建、删除流程由 `ListController` 统一处理。

use owlstorage_shared::protocol::ApiRequest;
use owlstorage_shared::{
    Category, Customer, NewCategory, NewCustomer, NewProduct, Product, paths,
};
use serde::de::DeserializeOwned;

use crate::form::{FieldKind, FieldSpec, FieldValues};

/// 删除后本地列表的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// 无论请求成功与否都从列表中移除
    #[default]
    Optimistic,
    /// 仅在请求成功后移除
    Confirmed,
}

/// 面向用户的提示文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub created: &'static str,
    pub deleted: &'static str,
    pub failed: &'static str,
}

pub const GENERIC_FAILURE: &str = "Ocorreu um erro. Tente novamente";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceConfig {
    /// 日志中的实体名
    pub entity: &'static str,
    /// 页面标题
    pub title: &'static str,
    pub list_path: &'static str,
    pub delete_path: &'static str,
    /// 列表接口返回体中包裹数组的字段名
    pub list_key: &'static str,
    pub fields: &'static [FieldSpec],
    pub messages: Messages,
    pub delete_policy: DeletePolicy,
}

pub trait Resource: Clone + DeserializeOwned + 'static {
    /// 创建请求体，响应为新建的实体
    type Draft: ApiRequest<Response = Self>;

    const CONFIG: ResourceConfig;

    fn id(&self) -> &str;

    fn draft(values: FieldValues<'_>) -> Self::Draft;

    /// 列表中展示的 (标题, 值)
    fn columns(&self) -> Vec<(&'static str, String)>;
}

// =========================================================
// 客户
// =========================================================

const CUSTOMER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "Nome:", "nome", "Digite o nome completo"),
    FieldSpec::text("email", "Email:", "email", "Digite o email").of_kind(FieldKind::Email),
    FieldSpec::text("address", "Endereço:", "endereço", "Digite o endereço"),
    FieldSpec::text("contact", "Contato:", "contato", "Digite o contato"),
];

impl Resource for Customer {
    type Draft = NewCustomer;

    const CONFIG: ResourceConfig = ResourceConfig {
        entity: "customer",
        title: "Clientes",
        list_path: paths::CUSTOMERS,
        delete_path: paths::CUSTOMER,
        list_key: "customer",
        fields: CUSTOMER_FIELDS,
        messages: Messages {
            created: "Cliente cadastrado com sucesso",
            deleted: "Cliente deletado com sucesso",
            failed: GENERIC_FAILURE,
        },
        delete_policy: DeletePolicy::Optimistic,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn draft(values: FieldValues<'_>) -> NewCustomer {
        NewCustomer {
            name: values.get("name").to_string(),
            email: values.get("email").to_string(),
            address: values.get("address").to_string(),
            contact: values.get("contact").to_string(),
        }
    }

    fn columns(&self) -> Vec<(&'static str, String)> {
        let mut cols = vec![
            ("Nome:", self.name.clone()),
            ("Email:", self.email.clone()),
            ("Endereço:", self.address.clone()),
            ("Contato:", self.contact.clone()),
            ("Status:", self.status_label().to_string()),
        ];
        if let Some(created_at) = &self.created_at {
            cols.push(("Criado em:", created_at.display()));
        }
        cols
    }
}

// =========================================================
// 分类
// =========================================================

const CATEGORY_FIELDS: &[FieldSpec] = &[FieldSpec::text(
    "name",
    "Nome:",
    "nome",
    "Digite o nome da categoria",
)];

impl Resource for Category {
    type Draft = NewCategory;

    const CONFIG: ResourceConfig = ResourceConfig {
        entity: "category",
        title: "Categorias",
        list_path: paths::CATEGORIES,
        delete_path: paths::CATEGORY,
        list_key: "category",
        fields: CATEGORY_FIELDS,
        messages: Messages {
            created: "Categoria cadastrada com sucesso",
            deleted: "Categoria excluída com sucesso",
            failed: GENERIC_FAILURE,
        },
        delete_policy: DeletePolicy::Optimistic,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn draft(values: FieldValues<'_>) -> NewCategory {
        NewCategory {
            name: values.get("name").to_string(),
        }
    }

    fn columns(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID da Categoria:", self.id.clone()),
            ("Nome da Categoria:", self.name.clone()),
        ]
    }
}

// =========================================================
// 商品
// =========================================================

const PRODUCT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "Nome:", "nome", "Digite o nome do produto"),
    FieldSpec::text("price", "Preço:", "preço", "Digite o preço"),
    FieldSpec::text("quantity", "Quantidade:", "quantidade", "Digite a quantidade"),
    FieldSpec::text(
        "category_id",
        "ID da Categoria:",
        "Id da categoria",
        "Digite o id da categoria",
    ),
];

impl Resource for Product {
    type Draft = NewProduct;

    const CONFIG: ResourceConfig = ResourceConfig {
        entity: "product",
        title: "Produtos",
        list_path: paths::PRODUCTS,
        delete_path: paths::PRODUCT,
        list_key: "product",
        fields: PRODUCT_FIELDS,
        messages: Messages {
            created: "Produto cadastrado com sucesso",
            deleted: "Produto deletado com sucesso",
            failed: GENERIC_FAILURE,
        },
        delete_policy: DeletePolicy::Optimistic,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn draft(values: FieldValues<'_>) -> NewProduct {
        NewProduct {
            name: values.get("name").to_string(),
            price: values.get("price").to_string(),
            quantity: values.get("quantity").to_string(),
            category_id: values.get("category_id").to_string(),
        }
    }

    fn columns(&self) -> Vec<(&'static str, String)> {
        let mut cols = vec![
            ("Nome:", self.name.clone()),
            ("Preço:", self.price.clone()),
            ("Quantidade:", self.quantity.clone()),
            ("ID da Categoria:", self.category_id.clone()),
        ];
        if let Some(created_at) = &self.created_at {
            cols.push(("Criado em:", created_at.display()));
        }
        cols
    }
}

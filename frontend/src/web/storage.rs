//! LocalStorage 会话适配器
//!
//! token 以原始字符串保存（不做 JSON 编码），键名由配置决定。

use gloo_storage::{LocalStorage, Storage};
use owlstorage::error::{AdminError, AdminResult};
use owlstorage::session::SessionStorage;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> AdminResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| AdminError::storage(format!("{:?}", e)).in_op_with("storage.set", key))
    }

    fn clear(&self, key: &str) -> AdminResult<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| AdminError::storage(format!("{:?}", e)).in_op_with("storage.clear", key))
    }
}

//! 会话模块
//!
//! `Session` 是显式传递的会话上下文：持有注入的持久化适配器，
//! 负责 token 的读取、写入与清除，并通过 `Store<bool>` 广播登录状态变化。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::AdminResult;
use crate::store::{Store, SubscriptionId};

/// 默认的 token 存储键
pub const DEFAULT_TOKEN_KEY: &str = "token";

// =========================================================
// 抽象接口定义
// =========================================================

/// 持久化适配器 (get/set/clear)
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> AdminResult<()>;
    fn clear(&self, key: &str) -> AdminResult<()>;
}

/// 内存实现，不跨进程持久化
#[derive(Default)]
pub struct MemoryStorage {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(key: &str, token: &str) -> Self {
        let storage = Self::new();
        storage
            .map
            .borrow_mut()
            .insert(key.to_string(), token.to_string());
        storage
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> AdminResult<()> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> AdminResult<()> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}

// =========================================================
// 会话上下文
// =========================================================

#[derive(Clone)]
pub struct Session {
    storage: Rc<dyn SessionStorage>,
    key: String,
    authenticated: Store<bool>,
}

impl Session {
    pub fn new(storage: Rc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let authenticated = Store::new(read_token(storage.as_ref(), &key).is_some());
        Self {
            storage,
            key,
            authenticated,
        }
    }

    /// 当前 token，空白 token 视为不存在
    pub fn token(&self) -> Option<String> {
        read_token(self.storage.as_ref(), &self.key)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// `Authorization` 头的值
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }

    /// 登录成功后保存 token
    pub fn begin(&self, token: &str) -> AdminResult<()> {
        self.storage
            .set(&self.key, token)
            .map_err(|e| e.in_op("session.begin"))?;
        self.sync();
        tracing::info!("session started");
        Ok(())
    }

    /// 注销，清除 token
    pub fn end(&self) -> AdminResult<()> {
        self.storage
            .clear(&self.key)
            .map_err(|e| e.in_op("session.end"))?;
        self.sync();
        tracing::info!("session ended");
        Ok(())
    }

    /// 订阅登录状态变化
    pub fn watch(&self, listener: impl Fn(bool) + 'static) -> SubscriptionId {
        self.authenticated.subscribe(move |auth| listener(*auth))
    }

    fn sync(&self) {
        let now = self.is_authenticated();
        if self.authenticated.get() != now {
            self.authenticated.set(now);
        }
    }
}

fn read_token(storage: &dyn SessionStorage, key: &str) -> Option<String> {
    storage.get(key).filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn session_with(storage: MemoryStorage) -> (Rc<MemoryStorage>, Session) {
        let storage = Rc::new(storage);
        let session = Session::new(storage.clone(), DEFAULT_TOKEN_KEY);
        (storage, session)
    }

    #[test]
    fn test_starts_from_persisted_token() {
        let (_, session) = session_with(MemoryStorage::with_token("token", "abc"));
        assert!(session.is_authenticated());
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_blank_token_is_absent() {
        let (_, session) = session_with(MemoryStorage::with_token("token", "   "));
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer(), None);
    }

    #[test]
    fn test_begin_and_end_persist_and_broadcast() {
        let (storage, session) = session_with(MemoryStorage::new());
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        session.watch(move |auth| sink.borrow_mut().push(auth));

        session.begin("jwt-1").unwrap();
        assert_eq!(storage.get("token").as_deref(), Some("jwt-1"));

        session.end().unwrap();
        assert_eq!(storage.get("token"), None);

        assert_eq!(*changes.borrow(), vec![true, false]);
    }

    #[test]
    fn test_repeated_begin_broadcasts_once() {
        let (_, session) = session_with(MemoryStorage::new());
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        session.watch(move |_| counter.set(counter.get() + 1));

        session.begin("a").unwrap();
        session.begin("b").unwrap();

        assert_eq!(hits.get(), 1);
        assert_eq!(session.token().as_deref(), Some("b"));
    }

    #[test]
    fn test_clones_share_the_same_storage() {
        let (_, session) = session_with(MemoryStorage::new());
        let other = session.clone();
        other.begin("shared").unwrap();
        assert_eq!(session.token().as_deref(), Some("shared"));
    }
}

//! 变更通知存储
//!
//! 单线程环境下的可观察状态容器：每次 `update`/`set` 之后同步通知所有订阅者。
//! 界面层订阅后把状态投影为视图模型，再交给渲染框架。
//!
//! 回调拿到的是状态快照，回调内部可以再次修改同一个 `Store`。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_id: Cell<u64>,
    version: Cell<u64>,
}

/// 可观察状态，克隆后共享同一份数据
pub struct Store<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// 订阅句柄，用于取消订阅
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

impl<T: Clone + 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                version: Cell::new(0),
            }),
        }
    }

    /// 只读访问当前状态
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// 修改状态并通知订阅者
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.inner.value.borrow_mut());
        self.inner.version.set(self.inner.version.get() + 1);
        self.notify();
        result
    }

    pub fn set(&self, value: T) {
        self.update(|v| *v = value);
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id.0);
        listeners.len() != before
    }

    fn notify(&self) {
        // 先复制订阅者列表，允许回调内部订阅/取消订阅
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();

        let version = self.inner.version.get();
        let value = self.get();
        for listener in listeners {
            listener(&value);
            // 回调中再次修改时，内层通知已把最新值发给了所有订阅者
            if self.inner.version.get() != version {
                return;
            }
        }
    }
}

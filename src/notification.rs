//! 全局通知（toast）
//!
//! 通知独立于页面存在，页面切换后仍会显示；界面层负责定时移除。

use uuid::Uuid;

use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// 每条通知唯一，相同文案的连续通知也互不覆盖
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Clone)]
pub struct Notifier {
    items: Store<Vec<Notification>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            items: Store::new(Vec::new()),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Error, message.into())
    }

    fn push(&self, kind: NotificationKind, message: String) -> Uuid {
        let id = Uuid::new_v4();
        self.items.update(|items| {
            items.push(Notification { id, kind, message });
        });
        id
    }

    pub fn dismiss(&self, id: Uuid) {
        let present = self.items.with(|items| items.iter().any(|n| n.id == id));
        if present {
            self.items.update(|items| items.retain(|n| n.id != id));
        }
    }

    pub fn current(&self) -> Vec<Notification> {
        self.items.get()
    }

    /// 通知中心与应用同生命周期，订阅不需要取消
    pub fn subscribe(&self, listener: impl Fn(&[Notification]) + 'static) {
        self.items.subscribe(move |items| listener(items));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_identical_messages_get_distinct_ids() {
        let notifier = Notifier::new();
        let a = notifier.success("Bem vindo");
        let b = notifier.success("Bem vindo");

        assert_ne!(a, b);
        assert_eq!(notifier.current().len(), 2);
    }

    #[test]
    fn test_dismiss_removes_only_the_given_toast() {
        let notifier = Notifier::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        notifier.subscribe(move |items| sink.borrow_mut().push(items.len()));

        let first = notifier.error("Ocorreu um erro. Tente novamente");
        notifier.success("Cliente cadastrado com sucesso");
        notifier.dismiss(first);
        notifier.dismiss(first);

        let left = notifier.current();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].kind, NotificationKind::Success);
        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }
}

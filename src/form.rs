//! 表单状态管理模块
//!
//! `FormState` 负责：
//! - 字段值的持有与重置
//! - 必填校验，错误按字段名索引
//! - 编辑时逐个清除已填写字段的错误

use std::fmt;

/// 输入框类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
}

impl FieldKind {
    /// HTML `<input type>` 属性
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
        }
    }
}

/// 必填字段声明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// 请求体中的字段名
    pub name: &'static str,
    /// 输入框上方的标题
    pub caption: &'static str,
    /// 错误提示中使用的名称
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(
        name: &'static str,
        caption: &'static str,
        label: &'static str,
        placeholder: &'static str,
    ) -> Self {
        Self {
            name,
            caption,
            label,
            placeholder,
            kind: FieldKind::Text,
        }
    }

    pub const fn of_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required_message(&self) -> String {
        format!("O campo '{}' é obrigatório", self.label)
    }
}

// =========================================================
// 校验错误
// =========================================================

/// 字段名 -> 错误消息，保持字段声明顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(name, msg)| (*name, msg.as_str()))
    }

    fn insert(&mut self, field: &'static str, message: String) {
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((field, message)),
        }
    }

    pub fn remove(&mut self, field: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(name, _)| *name != field);
        self.entries.len() != before
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, msg)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =========================================================
// 表单状态
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: &'static [FieldSpec],
    values: Vec<String>,
    errors: ValidationErrors,
}

impl FormState {
    /// 创建新的表单状态，所有字段为空
    pub fn new(fields: &'static [FieldSpec]) -> Self {
        Self {
            fields,
            values: vec![String::new(); fields.len()],
            errors: ValidationErrors::default(),
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.values[i].as_str())
    }

    /// 原样的字段值（不做 trim），用于构造请求体
    pub fn values(&self) -> FieldValues<'_> {
        FieldValues { form: self }
    }

    /// 更新字段值；字段变为非空时清除该字段的错误。
    /// 未声明的字段返回 `false`。
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Some(i) = self.position(name) else {
            return false;
        };
        let value = value.into();
        if !value.trim().is_empty() {
            self.errors.remove(name);
        }
        self.values[i] = value;
        true
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// 校验全部必填字段；错误集合恰好为当前的空白字段
    pub fn validate(&mut self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for (spec, value) in self.fields.iter().zip(&self.values) {
            if value.trim().is_empty() {
                errors.insert(spec.name, spec.required_message());
            }
        }
        self.errors = errors.clone();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// 重置表单到初始状态
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(String::clear);
        self.errors = ValidationErrors::default();
    }
}

/// 按字段名读取表单值
#[derive(Clone, Copy)]
pub struct FieldValues<'a> {
    form: &'a FormState,
}

impl<'a> FieldValues<'a> {
    /// 未声明的字段返回空串
    pub fn get(&self, name: &str) -> &'a str {
        self.form.value(name).unwrap_or_default()
    }
}

//! 视图模型投影
//!
//! 把控制器状态转换为纯数据的视图模型，界面层只负责渲染。
//! 视图模型只包含拥有所有权的数据，可以直接放入响应式信号。

use crate::auth::{AuthMode, AuthState};
use crate::controller::{PagePhase, PageState};
use crate::form::FormState;
use crate::resource::Resource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub caption: &'static str,
    pub placeholder: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: &'static str,
    pub phase: PagePhase,
    pub submitting: bool,
    pub fields: Vec<FieldView>,
    pub rows: Vec<RowView>,
}

impl PageView {
    pub fn is_loading(&self) -> bool {
        self.phase == PagePhase::Loading
    }

    /// 加载完成且列表为空
    pub fn is_empty(&self) -> bool {
        self.phase == PagePhase::Ready && self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthView {
    pub title: &'static str,
    pub submitting: bool,
    pub fields: Vec<FieldView>,
}

pub fn project_form(form: &FormState) -> Vec<FieldView> {
    form.fields()
        .iter()
        .map(|spec| FieldView {
            name: spec.name,
            caption: spec.caption,
            placeholder: spec.placeholder,
            input_type: spec.kind.input_type(),
            value: form.value(spec.name).unwrap_or_default().to_string(),
            error: form.error(spec.name).map(str::to_string),
        })
        .collect()
}

pub fn project<R: Resource>(state: &PageState<R>) -> PageView {
    PageView {
        title: R::CONFIG.title,
        phase: state.phase,
        submitting: state.submitting,
        fields: project_form(&state.form),
        rows: state
            .items
            .iter()
            .map(|item| RowView {
                id: item.id().to_string(),
                cells: item.columns(),
            })
            .collect(),
    }
}

pub fn project_auth(mode: AuthMode, state: &AuthState) -> AuthView {
    AuthView {
        title: mode.title(),
        submitting: state.submitting,
        fields: project_form(&state.form),
    }
}

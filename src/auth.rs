//! 认证模块
//!
//! 登录 / 注册表单：校验 -> 提交 -> 成功后跳转。
//! 登录成功的 token 写入 `Session`，注册成功跳转到登录页。

use std::rc::Rc;

use owlstorage_shared::{LoginRequest, RegisterRequest};

use crate::api::ApiClient;
use crate::controller::Lifecycle;
use crate::error::{AdminError, AdminResult};
use crate::form::{FieldKind, FieldSpec, FormState, ValidationErrors};
use crate::notification::Notifier;
use crate::request::HttpClient;
use crate::route::AppRoute;
use crate::session::Session;
use crate::store::Store;

const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("email", "Email:", "email", "Digite seu email").of_kind(FieldKind::Email),
    FieldSpec::text("password", "Senha:", "senha", "Digite sua senha").of_kind(FieldKind::Password),
];

const REGISTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "Nome:", "nome", "Digite seu nome"),
    FieldSpec::text("email", "Email:", "email", "Digite seu email").of_kind(FieldKind::Email),
    FieldSpec::text("password", "Senha:", "senha", "Digite sua senha").of_kind(FieldKind::Password),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            AuthMode::Login => LOGIN_FIELDS,
            AuthMode::Register => REGISTER_FIELDS,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Cadastro",
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            AuthMode::Login => "Bem vindo",
            AuthMode::Register => "Usuário cadastrado com sucesso",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            AuthMode::Login => "Email ou senha incorretos",
            AuthMode::Register => "Erro ao cadastrar. Tente mais tarde",
        }
    }

    /// 成功后的跳转目标
    fn next_route(&self) -> AppRoute {
        match self {
            AuthMode::Login => AppRoute::auth_success_redirect(),
            AuthMode::Register => AppRoute::Login,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthState {
    pub form: FormState,
    pub submitting: bool,
}

#[derive(Debug)]
pub enum AuthOutcome {
    Invalid(ValidationErrors),
    Busy,
    Navigate(AppRoute),
    Failed(AdminError),
}

pub struct AuthController<C> {
    mode: AuthMode,
    api: Rc<ApiClient<C>>,
    session: Session,
    notifier: Notifier,
    state: Store<AuthState>,
    lifecycle: Lifecycle,
}

impl<C> Clone for AuthController<C> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            api: Rc::clone(&self.api),
            session: self.session.clone(),
            notifier: self.notifier.clone(),
            state: self.state.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<C: HttpClient> AuthController<C> {
    pub fn new(mode: AuthMode, api: Rc<ApiClient<C>>, session: Session, notifier: Notifier) -> Self {
        Self {
            mode,
            api,
            session,
            notifier,
            state: Store::new(AuthState {
                form: FormState::new(mode.fields()),
                submitting: false,
            }),
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn state(&self) -> &Store<AuthState> {
        &self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    pub fn edit(&self, field: &str, value: impl Into<String>) {
        let value = value.into();
        self.state.update(|s| {
            s.form.set(field, value);
        });
    }

    fn apply(&self, f: impl FnOnce(&mut AuthState)) {
        if !self.lifecycle.is_disposed() {
            self.state.update(f);
        }
    }

    pub async fn submit(&self) -> AuthOutcome {
        if self.state.with(|s| s.submitting) {
            return AuthOutcome::Busy;
        }

        if let Err(errors) = self.state.update(|s| s.form.validate()) {
            tracing::warn!(mode = ?self.mode, fields = errors.len(), "validation rejected");
            return AuthOutcome::Invalid(errors);
        }

        self.state.update(|s| s.submitting = true);

        let result = match self.mode {
            AuthMode::Login => self.login().await,
            AuthMode::Register => self.register().await,
        };

        match result {
            Ok(()) => {
                tracing::info!(mode = ?self.mode, "auth form accepted");
                self.notifier.success(self.mode.success_message());
                self.apply(|s| {
                    s.form.reset();
                    s.submitting = false;
                });
                AuthOutcome::Navigate(self.mode.next_route())
            }
            Err(e) => {
                tracing::error!(mode = ?self.mode, error = %e, "auth form rejected");
                self.notifier.error(self.mode.failure_message());
                self.apply(|s| s.submitting = false);
                AuthOutcome::Failed(e)
            }
        }
    }

    async fn login(&self) -> AdminResult<()> {
        let req = self.state.with(|s| {
            let values = s.form.values();
            LoginRequest {
                email: values.get("email").to_string(),
                password: values.get("password").to_string(),
            }
        });

        let res = self
            .api
            .request(&req, None)
            .await
            .map_err(|e| e.in_op("auth.login"))?;

        if res.token.trim().is_empty() {
            return Err(AdminError::serialization("empty token in login response").in_op("auth.login"));
        }

        self.session.begin(&res.token)
    }

    async fn register(&self) -> AdminResult<()> {
        let req = self.state.with(|s| {
            let values = s.form.values();
            RegisterRequest {
                name: values.get("name").to_string(),
                email: values.get("email").to_string(),
                password: values.get("password").to_string(),
            }
        });

        // 任何 2xx 都算成功，响应体不解析
        self.api
            .dispatch(&req, None)
            .await
            .map(|_| ())
            .map_err(|e| e.in_op("auth.register"))
    }
}

/// 注销：清除 token 并返回登录页
pub fn logout(session: &Session) -> AdminResult<AppRoute> {
    session.end()?;
    Ok(AppRoute::auth_failure_redirect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminErrorStatus;
    use crate::notification::NotificationKind;
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::session::{DEFAULT_TOKEN_KEY, MemoryStorage};
    use serde_json::json;

    const LOGIN_URL: &str = "http://api.test/user/login";
    const REGISTER_URL: &str = "http://api.test/user/register";

    fn setup(mode: AuthMode) -> (Rc<MockHttpClient>, Session, Notifier, AuthController<Rc<MockHttpClient>>) {
        let mock = Rc::new(MockHttpClient::new());
        let api = Rc::new(ApiClient::new("http://api.test", Rc::clone(&mock)));
        let session = Session::new(Rc::new(MemoryStorage::new()), DEFAULT_TOKEN_KEY);
        let notifier = Notifier::new();
        let ctrl = AuthController::new(mode, api, session.clone(), notifier.clone());
        (mock, session, notifier, ctrl)
    }

    #[tokio::test]
    async fn test_login_stores_token_and_goes_home() {
        let (mock, session, notifier, ctrl) = setup(AuthMode::Login);
        mock.mock_response(HttpMethod::Post, LOGIN_URL, 200, json!({"token": "jwt-123"}));

        ctrl.edit("email", "ana@example.com");
        ctrl.edit("password", "secret");
        let outcome = ctrl.submit().await;

        assert!(matches!(outcome, AuthOutcome::Navigate(AppRoute::Clients)));
        assert_eq!(session.token().as_deref(), Some("jwt-123"));
        assert_eq!(notifier.current()[0].message, "Bem vindo");
        ctrl.state().with(|s| assert_eq!(s.form.value("email"), Some("")));

        let req = mock.last_request().unwrap();
        assert_eq!(req.header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_login_failure_keeps_session_empty() {
        let (mock, session, notifier, ctrl) = setup(AuthMode::Login);
        mock.mock_response(HttpMethod::Post, LOGIN_URL, 401, json!({"error": "invalid"}));

        ctrl.edit("email", "ana@example.com");
        ctrl.edit("password", "wrong");
        let outcome = ctrl.submit().await;

        assert!(matches!(outcome, AuthOutcome::Failed(_)));
        assert!(!session.is_authenticated());
        let toast = &notifier.current()[0];
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "Email ou senha incorretos");
        ctrl.state().with(|s| assert_eq!(s.form.value("password"), Some("wrong")));
    }

    #[tokio::test]
    async fn test_login_with_blank_token_fails() {
        let (mock, session, _, ctrl) = setup(AuthMode::Login);
        mock.mock_response(HttpMethod::Post, LOGIN_URL, 200, json!({"token": ""}));

        ctrl.edit("email", "a@b.c");
        ctrl.edit("password", "x");

        match ctrl.submit().await {
            AuthOutcome::Failed(e) => assert_eq!(e.status, AdminErrorStatus::Serialization),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let (mock, _, _, ctrl) = setup(AuthMode::Login);
        ctrl.edit("email", "a@b.c");

        match ctrl.submit().await {
            AuthOutcome::Invalid(errors) => {
                assert_eq!(errors.get("password"), Some("O campo 'senha' é obrigatório"));
                assert_eq!(errors.get("email"), None);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_register_goes_to_login() {
        let (mock, session, notifier, ctrl) = setup(AuthMode::Register);
        mock.mock_response(HttpMethod::Post, REGISTER_URL, 201, json!({"name": "Ana", "email": "a@b.c"}));

        ctrl.edit("name", "Ana");
        ctrl.edit("email", "a@b.c");
        ctrl.edit("password", "secret");
        let outcome = ctrl.submit().await;

        assert!(matches!(outcome, AuthOutcome::Navigate(AppRoute::Login)));
        assert!(!session.is_authenticated());
        assert_eq!(notifier.current()[0].message, "Usuário cadastrado com sucesso");

        let body: serde_json::Value =
            serde_json::from_str(mock.last_request().unwrap().body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "Ana", "email": "a@b.c", "password": "secret"}));
    }

    #[tokio::test]
    async fn test_register_accepts_any_success_body() {
        for body in ["\"Usuário criado\"", ""] {
            let (mock, _, notifier, ctrl) = setup(AuthMode::Register);
            mock.mock_raw_response(HttpMethod::Post, REGISTER_URL, 201, body);

            ctrl.edit("name", "Ana");
            ctrl.edit("email", "a@b.c");
            ctrl.edit("password", "secret");
            let outcome = ctrl.submit().await;

            assert!(matches!(outcome, AuthOutcome::Navigate(AppRoute::Login)), "body {:?}", body);
            let toast = &notifier.current()[0];
            assert_eq!(toast.kind, NotificationKind::Success);
            assert_eq!(toast.message, "Usuário cadastrado com sucesso");
        }
    }

    #[tokio::test]
    async fn test_register_failure_message() {
        let (mock, _, notifier, ctrl) = setup(AuthMode::Register);
        mock.mock_network_error(HttpMethod::Post, REGISTER_URL);

        ctrl.edit("name", "Ana");
        ctrl.edit("email", "a@b.c");
        ctrl.edit("password", "secret");
        ctrl.submit().await;

        assert_eq!(notifier.current()[0].message, "Erro ao cadastrar. Tente mais tarde");
    }

    #[test]
    fn test_logout_clears_token() {
        let session = Session::new(
            Rc::new(MemoryStorage::with_token(DEFAULT_TOKEN_KEY, "jwt")),
            DEFAULT_TOKEN_KEY,
        );

        assert_eq!(logout(&session).unwrap(), AppRoute::Login);
        assert!(!session.is_authenticated());
    }
}

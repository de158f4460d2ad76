use std::time::{Duration, Instant};

use egui_kittest::Harness;
use serde_json::{Value, json};
use snaily_ui::SnailyApp;
use snaily_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a, T = State> {
    mock_server: MockServer,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }
}

impl<'a> TestCtx<'a, State> {
    #[allow(unused)]
    pub async fn new(app: impl FnMut(&mut egui::Ui, &mut State) + 'a) -> Self {
        let mock_server = MockServer::start().await;
        let state = State::test(mock_server.uri());
        let harness = Harness::new_ui_state(app, state);

        Self {
            mock_server,
            harness,
        }
    }
}

impl<'a> TestCtx<'a, SnailyApp> {
    #[allow(unused)]
    pub async fn new_app() -> Self {
        Self::new_app_with(|_| {}).await
    }

    /// App whose state is adjusted by `setup` before the first frame.
    pub async fn new_app_with(setup: impl FnOnce(&mut State)) -> Self {
        let mock_server = MockServer::start().await;
        let mut state = State::test(mock_server.uri());
        setup(&mut state);

        let app = SnailyApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn state_mut(&mut self) -> &mut State {
        self.harness.state_mut().state_mut()
    }

    #[allow(unused)]
    pub fn state(&self) -> &State {
        self.harness.state().state()
    }

    /// Waits for every command spawned so far, then renders twice so the results are
    /// computed and laid out.
    pub async fn settle(&mut self) {
        let timeout = Duration::from_secs(5);
        let start = Instant::now();

        while self.state_mut().ctx.task_count() > 0 {
            assert!(
                start.elapsed() <= timeout,
                "Timed out waiting for {} pending tasks",
                self.state_mut().ctx.task_count()
            );
            if self.state_mut().ctx.task_set_mut().join_next().await.is_some() {
                self.state_mut().ctx.sync_computes();
            }
        }

        self.harness.step();
        self.harness.step();
    }
}

#[allow(unused)]
pub fn user_json(id: &str, username: &str, whitelist_status: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "rank": "USER",
        "isLeo": false,
        "isSupervisor": false,
        "isEmsFd": false,
        "isDispatch": false,
        "whitelistStatus": whitelist_status,
        "banned": false
    })
}

#[allow(unused)]
pub async fn mock_list_users(server: &MockServer, users: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/v1/admin/manage/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(users)))
        .mount(server)
        .await;
}

#[allow(unused)]
pub async fn mock_pending(server: &MockServer, user_id: &str, action: &str) {
    mock_pending_delayed(server, user_id, action, Duration::ZERO).await;
}

#[allow(unused)]
pub async fn mock_pending_delayed(server: &MockServer, user_id: &str, action: &str, delay: Duration) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/admin/manage/users/pending/{user_id}/{action}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(true))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

#[allow(unused)]
pub async fn mock_login(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .respond_with(response)
        .mount(server)
        .await;
}

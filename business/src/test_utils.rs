//! Mock-server harness for command tests.
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.mock_list_users(vec![sample_user("1", "john", WhitelistStatus::Accepted)]).await;
//! test_ctx.ctx.enqueue_command::<RefreshUsersCommand>();
//! test_ctx.flush_and_wait().await;
//! ```

use std::time::{Duration, Instant};

use serde_json::json;
use snaily_states::StateCtx;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

use crate::manage_users::{Rank, User, WhitelistStatus};
use crate::{BusinessConfig, Route, build_state_ctx};

pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri());
        let ctx = build_state_ctx(config, Route::default());

        Self { mock_server, ctx }
    }

    /// Starts queued commands and waits until every spawned task finished, applying
    /// updates as tasks complete.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = Instant::now();

        while self.ctx.task_count() > 0 {
            assert!(
                start.elapsed() <= timeout,
                "Timed out waiting for pending tasks ({} still in JoinSet)",
                self.ctx.task_count()
            );

            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }

        self.ctx.sync_computes();
        self.ctx.run_computed();
    }

    pub async fn mock_login(&self, username: &str, password: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/v1/auth/login"))
            .and(body_json(json!({ "username": username, "password": password })))
            .respond_with(response)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_list_users(&self, users: Vec<User>) {
        Mock::given(method("GET"))
            .and(path("/v1/admin/manage/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_list_users_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/v1/admin/manage/users"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_pending(&self, user_id: &str, action: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(format!("/v1/admin/manage/users/pending/{user_id}/{action}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!(true)))
            .expect(1)
            .mount(&self.mock_server)
            .await;
    }

    /// Like `mock_pending`, answering only after `delay`.
    pub async fn mock_pending_delayed(&self, user_id: &str, action: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(format!("/v1/admin/manage/users/pending/{user_id}/{action}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!(true))
                    .set_delay(delay),
            )
            .expect(1)
            .mount(&self.mock_server)
            .await;
    }
}

pub fn sample_user(id: &str, username: &str, whitelist_status: WhitelistStatus) -> User {
    User {
        id: id.to_owned(),
        username: username.to_owned(),
        rank: Rank::User,
        is_leo: false,
        is_supervisor: false,
        is_ems_fd: false,
        is_dispatch: false,
        whitelist_status,
        banned: false,
        created_at: None,
    }
}

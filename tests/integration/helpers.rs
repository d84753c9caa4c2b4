// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use pdcheck::application::use_cases::audit_use_case::AuditUseCase;
use pdcheck::config::settings::Settings;
use pdcheck::domain::repositories::storage_repository::StorageRepository;
use pdcheck::domain::services::checklist_service::ChecklistEvaluator;
use pdcheck::engines::reqwest_engine::ReqwestEngine;
use pdcheck::infrastructure::storage::LocalStorage;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 满足全部十项检查的页面
pub const COMPLIANT_PAGE: &str = r#"
<html>
    <head><script src="https://www.googletagmanager.com/gtag/js"></script></head>
    <body>
        <a href="/privacy">Политика конфиденциальности</a>
        <form>
            <label><input type="checkbox" name="pd"> Согласие на обработку персональных данных</label>
        </form>
        <div class="cookie-popup">
            Мы используем cookie: обязательные, аналитические, маркетинговые.
        </div>
        <p>Данные хранятся на серверах в РФ. Оператор персональных данных
           зарегистрирован в Роскомнадзоре. Согласие фиксируется с датой и IP.</p>
        <p>Контакт для субъектов данных: dpo@example.ru. Проводится аудит сторонних сервисов.</p>
    </body>
</html>
"#;

/// 只满足两项默认成立检查的页面
pub const PLAIN_PAGE: &str = "<html><body><p>Hello</p></body></html>";

pub struct TestEnv {
    pub dir: TempDir,
    pub storage: LocalStorage,
    pub settings: Settings,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let mut settings = Settings::defaults().unwrap();
        settings.audit.delay_ms = 0;
        settings.fetcher.timeout_secs = 5;
        Self {
            dir,
            storage,
            settings,
        }
    }

    pub async fn write_sites(&self, content: &str) {
        self.storage
            .save(&self.settings.input.sites_file, content.as_bytes())
            .await
            .unwrap();
    }

    pub async fn read_output(&self, key: &str) -> String {
        self.storage.read_to_string(key).await.unwrap()
    }

    pub fn use_case(&self) -> AuditUseCase {
        AuditUseCase::new(
            Arc::new(ReqwestEngine::new(&self.settings.fetcher).unwrap()),
            Arc::new(ChecklistEvaluator::new().unwrap()),
            self.settings.fetcher.clone(),
            self.settings.audit.clone(),
        )
    }
}

pub async fn mount_page(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status).set_body_raw(body.as_bytes().to_vec(), "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{mount_page, TestEnv, COMPLIANT_PAGE, PLAIN_PAGE};
use pdcheck::domain::models::criterion::CriterionKey;
use pdcheck::domain::models::site_check::AuditRun;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_batch_fetches_each_listed_site_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/good", 200, COMPLIANT_PAGE).await;
    mount_page(&server, "/plain", 200, PLAIN_PAGE).await;

    let env = TestEnv::new();
    let good = format!("{}/good", server.uri());
    let plain = format!("{}/plain", server.uri());
    env.write_sites(&format!("{}\n\n   \n{}\n", good, plain)).await;

    let run = env
        .use_case()
        .run(&env.storage, &env.settings.input, &env.settings.output)
        .await
        .unwrap();

    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert_eq!(run.len(), 2);
    let sites: Vec<&str> = run.iter().map(|record| record.site.as_str()).collect();
    assert_eq!(sites, vec![good.as_str(), plain.as_str()]);

    let good_result = run.get(&good).unwrap();
    assert!(good_result.accessible);
    assert_eq!(good_result.checks.passed(), CriterionKey::COUNT);

    let plain_result = run.get(&plain).unwrap();
    assert!(plain_result.accessible);
    assert_eq!(plain_result.checks.len(), CriterionKey::COUNT);
    assert_eq!(plain_result.checks.get(CriterionKey::CheckboxNotChecked), Some(true));
    assert_eq!(plain_result.checks.get(CriterionKey::ThirdPartyAudit), Some(true));
    assert_eq!(plain_result.checks.passed(), 2);
}

#[tokio::test]
async fn test_dash_prefixed_lines_are_never_fetched() {
    let server = MockServer::start().await;
    mount_page(&server, "/good", 200, PLAIN_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/skip-me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    let good = format!("{}/good", server.uri());
    let skipped = format!("{}/skip-me", server.uri());
    env.write_sites(&format!("- {}\n{}\n", skipped, good)).await;

    let run = env
        .use_case()
        .run(&env.storage, &env.settings.input, &env.settings.output)
        .await
        .unwrap();

    assert_eq!(run.len(), 1);
    assert!(run.get(&good).is_some());
    assert!(run.iter().all(|record| !record.site.contains("skip-me")));
}

#[tokio::test]
async fn test_non_200_site_is_reported_inaccessible() {
    let server = MockServer::start().await;
    mount_page(&server, "/down", 503, "maintenance").await;

    let env = TestEnv::new();
    let down = format!("{}/down", server.uri());
    env.write_sites(&format!("{}\n", down)).await;

    let run = env
        .use_case()
        .run(&env.storage, &env.settings.input, &env.settings.output)
        .await
        .unwrap();

    let result = run.get(&down).unwrap();
    assert!(!result.accessible);
    assert!(result.checks.is_empty());
    assert_eq!(result.errors, vec!["Сайт недоступен (код: 503)".to_string()]);

    let report = env.read_output(&env.settings.output.report_file).await;
    assert!(report.contains(&format!(
        "### {}\n\n❌ **Сайт недоступен**\n\n**Ошибки:**\n- Сайт недоступен (код: 503)\n\n---\n\n",
        down
    )));
}

#[tokio::test]
async fn test_unreachable_site_records_fetch_error() {
    let env = TestEnv::new();
    let result = env.use_case().check_site("http://127.0.0.1:9").await;

    assert!(!result.accessible);
    assert!(result.checks.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Ошибка при проверке: "));
}

#[tokio::test]
async fn test_run_writes_all_outputs() {
    let server = MockServer::start().await;
    mount_page(&server, "/good", 200, COMPLIANT_PAGE).await;
    mount_page(&server, "/down", 404, "").await;

    let env = TestEnv::new();
    env.write_sites(&format!(
        "{}/good\n{}/down\n",
        server.uri(),
        server.uri()
    ))
    .await;

    env.use_case()
        .run(&env.storage, &env.settings.input, &env.settings.output)
        .await
        .unwrap();

    let report = env.read_output(&env.settings.output.report_file).await;
    assert!(report.contains("- Всего сайтов: 2\n"));
    assert!(report.contains("- Доступных сайтов: 1\n"));
    assert!(report.contains("**Соответствие: 10/10 (100.0%)**"));

    let results = env.read_output(&env.settings.output.results_file).await;
    let stored: AuditRun = serde_json::from_str(&results).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored.accessible_count(), 1);

    let summary = env.read_output(&env.settings.output.summary_file).await;
    assert!(summary.contains("- **Доступных сайтов:** 1 (50.0%)\n"));
    assert!(summary.contains("1. **"));
    assert!(env.dir.path().join(&env.settings.output.summary_file).exists());
}

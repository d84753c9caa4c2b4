// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{mount_page, TestEnv, COMPLIANT_PAGE, PLAIN_PAGE};
use pdcheck::application::use_cases::summary_use_case::rebuild_summary;
use pdcheck::domain::repositories::storage_repository::StorageRepository;
use pdcheck::domain::services::statistics_service::AuditStatistics;
use regex::Regex;
use wiremock::MockServer;

/// 三个站点：全部通过、两项通过、不可访问
async fn audited_env() -> (MockServer, TestEnv, AuditStatistics) {
    let server = MockServer::start().await;
    mount_page(&server, "/good", 200, COMPLIANT_PAGE).await;
    mount_page(&server, "/plain", 200, PLAIN_PAGE).await;
    mount_page(&server, "/gone", 410, "").await;

    let env = TestEnv::new();
    env.write_sites(&format!(
        "{uri}/good\n{uri}/plain\n{uri}/gone\n",
        uri = server.uri()
    ))
    .await;

    let run = env
        .use_case()
        .run(&env.storage, &env.settings.input, &env.settings.output)
        .await
        .unwrap();
    let stats = AuditStatistics::from_run(&run);
    (server, env, stats)
}

fn capture_usize(pattern: &str, text: &str) -> usize {
    Regex::new(pattern).unwrap().captures(text).unwrap()[1]
        .parse()
        .unwrap()
}

#[tokio::test]
async fn test_report_numbers_match_statistics() {
    let (_server, env, stats) = audited_env().await;
    let report = env.read_output(&env.settings.output.report_file).await;

    assert_eq!(capture_usize(r"- Всего сайтов: (\d+)", &report), stats.total_sites);
    assert_eq!(
        capture_usize(r"- Доступных сайтов: (\d+)", &report),
        stats.accessible_sites
    );
    assert_eq!(
        capture_usize(r"- Недоступных сайтов: (\d+)", &report),
        stats.inaccessible_sites()
    );

    let compliance = Regex::new(r"\*\*Соответствие: (\d+)/(\d+) \(([\d.]+)%\)\*\*").unwrap();
    let parsed: Vec<(usize, usize, String)> = compliance
        .captures_iter(&report)
        .map(|c| (c[1].parse().unwrap(), c[2].parse().unwrap(), c[3].to_string()))
        .collect();
    let expected: Vec<(usize, usize, String)> = stats
        .scores
        .iter()
        .map(|s| (s.passed, s.total, format!("{:.1}", s.percentage)))
        .collect();
    assert_eq!(parsed, expected);
    assert_eq!(
        expected,
        vec![(10, 10, "100.0".to_string()), (2, 10, "20.0".to_string())]
    );
}

#[tokio::test]
async fn test_summary_criteria_table_matches_statistics() {
    let (_server, env, stats) = audited_env().await;
    let summary = env.read_output(&env.settings.output.summary_file).await;

    let row = Regex::new(r"(?m)^\| (\d+\. [^|]+) \| (\d+) \| (\d+) \| ([\d.]+)% \|$").unwrap();
    let parsed: Vec<(String, usize, usize)> = row
        .captures_iter(&summary)
        .map(|c| (c[1].to_string(), c[2].parse().unwrap(), c[3].parse().unwrap()))
        .collect();
    let expected: Vec<(String, usize, usize)> = stats
        .criteria
        .iter()
        .map(|c| (c.key.title().to_string(), c.passed, c.failed))
        .collect();

    assert_eq!(parsed.len(), 10);
    assert_eq!(parsed, expected);
    assert!(summary.contains("- **Среднее соответствие:** 60.0%\n"));
    assert!(summary.contains("- **Недоступных сайтов:** 1 (33.3%)\n"));
}

#[tokio::test]
async fn test_rebuilt_summary_is_identical() {
    let (_server, env, stats) = audited_env().await;
    let written = env.read_output(&env.settings.output.summary_file).await;

    env.storage
        .save(&env.settings.output.summary_file, b"")
        .await
        .unwrap();
    let rebuilt_stats = rebuild_summary(&env.storage, &env.settings.output)
        .await
        .unwrap();
    let rebuilt = env.read_output(&env.settings.output.summary_file).await;

    assert_eq!(rebuilt_stats, stats);
    assert_eq!(rebuilt, written);
}

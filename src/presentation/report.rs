// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDateTime;

use crate::domain::models::criterion::CriterionKey;
use crate::domain::models::site_check::{AuditRun, SiteCheckResult};
use crate::domain::services::statistics_service::AuditStatistics;

pub const REPORT_TITLE: &str =
    "# Отчет по проверке сайтов на соответствие требованиям к обработке ПДн";

const PASSED: &str = "✅";
const FAILED: &str = "❌";

/// 生成 Markdown 格式的检查报告
///
/// # 参数
///
/// * `run` - 批量检查结果
/// * `stats` - 由同一结果计算出的统计
/// * `generated_at` - 报告生成时间
pub fn render_report(run: &AuditRun, stats: &AuditStatistics, generated_at: NaiveDateTime) -> String {
    let mut output = String::new();

    output.push_str(REPORT_TITLE);
    output.push_str("\n\n");
    output.push_str(&format!(
        "Дата проверки: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    output.push_str("## Статистика\n\n");
    output.push_str(&format!("- Всего сайтов: {}\n", stats.total_sites));
    output.push_str(&format!("- Доступных сайтов: {}\n", stats.accessible_sites));
    output.push_str(&format!(
        "- Недоступных сайтов: {}\n\n",
        stats.inaccessible_sites()
    ));

    output.push_str("## Детальные результаты\n\n");
    for record in run.iter() {
        output.push_str(&render_site_section(&record.site, &record.result));
    }

    output
}

/// 生成单个站点的报告小节
pub fn render_site_section(site: &str, result: &SiteCheckResult) -> String {
    let mut output = format!("### {}\n\n", site);

    let percentage = match result.compliance_percentage() {
        Some(percentage) => percentage,
        None => {
            output.push_str(&format!("{} **Сайт недоступен**\n\n", FAILED));
            push_errors(&mut output, &result.errors);
            output.push_str("\n---\n\n");
            return output;
        }
    };

    output.push_str("| Критерий | Статус |\n");
    output.push_str("|----------|--------|\n");
    for key in CriterionKey::ALL {
        let status = if result.checks.get(key).unwrap_or(false) {
            PASSED
        } else {
            FAILED
        };
        output.push_str(&format!("| {} | {} |\n", key.title(), status));
    }
    output.push('\n');

    output.push_str(&format!(
        "**Соответствие: {}/{} ({:.1}%)**\n\n",
        result.passed_checks(),
        result.total_checks(),
        percentage
    ));

    if !result.errors.is_empty() {
        push_errors(&mut output, &result.errors);
        output.push('\n');
    }

    output.push_str("---\n\n");
    output
}

fn push_errors(output: &mut String, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    output.push_str("**Ошибки:**\n");
    for error in errors {
        output.push_str(&format!("- {}\n", error));
    }
}

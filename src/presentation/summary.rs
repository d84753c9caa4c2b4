// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::statistics_service::{share, AuditStatistics};

pub const SUMMARY_TITLE: &str =
    "# Краткое резюме проверки сайтов на соответствие требованиям к обработке ПДн";

/// 排行榜中的站点数
pub const TOP_SITES: usize = 5;
/// 列出的最弱检查项数
pub const WEAKEST_CRITERIA: usize = 3;
/// 给出改进建议的检查项数
pub const PRIORITY_RECOMMENDATIONS: usize = 5;

const GENERAL_RECOMMENDATIONS: [&str; 5] = [
    "**Провести комплексный аудит** соответствия требованиям 152-ФЗ",
    "**Разработать план мероприятий** по приведению в соответствие",
    "**Назначить ответственного** за обработку персональных данных",
    "**Провести обучение персонала** по вопросам защиты персональных данных",
    "**Регулярно проводить мониторинг** соответствия требованиям",
];

/// 生成 Markdown 格式的摘要
///
/// 所有数字都来自结构化统计，不解析已生成的报告
pub fn render_summary(stats: &AuditStatistics) -> String {
    let mut output = String::new();

    output.push_str(SUMMARY_TITLE);
    output.push_str("\n\n");

    render_overview(&mut output, stats);
    render_compliance(&mut output, stats);
    render_criteria_table(&mut output, stats);
    render_top_sites(&mut output, stats);
    render_weakest(&mut output, stats);
    render_recommendations(&mut output, stats);

    output
}

fn render_overview(output: &mut String, stats: &AuditStatistics) {
    output.push_str("## Общая статистика\n\n");
    output.push_str(&format!(
        "- **Всего проверено сайтов:** {}\n",
        stats.total_sites
    ));
    output.push_str(&format!(
        "- **Доступных сайтов:** {} ({:.1}%)\n",
        stats.accessible_sites,
        share(stats.accessible_sites, stats.total_sites)
    ));
    output.push_str(&format!(
        "- **Недоступных сайтов:** {} ({:.1}%)\n\n",
        stats.inaccessible_sites(),
        share(stats.inaccessible_sites(), stats.total_sites)
    ));
}

fn render_compliance(output: &mut String, stats: &AuditStatistics) {
    let (Some(average), Some(max), Some(min)) = (
        stats.average_compliance(),
        stats.max_compliance(),
        stats.min_compliance(),
    ) else {
        return;
    };

    output.push_str("## Статистика соответствия\n\n");
    output.push_str(&format!("- **Среднее соответствие:** {:.1}%\n", average));
    output.push_str(&format!("- **Максимальное соответствие:** {:.1}%\n", max));
    output.push_str(&format!("- **Минимальное соответствие:** {:.1}%\n\n", min));

    let buckets = stats.buckets();
    let scored = buckets.total();
    output.push_str("### Распределение по уровням соответствия\n\n");
    for (label, count) in [
        ("Отлично (80-100%)", buckets.excellent),
        ("Хорошо (60-79%)", buckets.good),
        ("Удовлетворительно (40-59%)", buckets.fair),
        ("Плохо (0-39%)", buckets.poor),
    ] {
        output.push_str(&format!(
            "- **{}:** {} сайтов ({:.1}%)\n",
            label,
            count,
            share(count, scored)
        ));
    }
    output.push('\n');
}

fn render_criteria_table(output: &mut String, stats: &AuditStatistics) {
    output.push_str("## Анализ по критериям\n\n");
    output.push_str("| Критерий | Выполнено | Не выполнено | Процент выполнения |\n");
    output.push_str("|----------|-----------|--------------|-------------------|\n");
    for criterion in &stats.criteria {
        if let Some(rate) = criterion.pass_rate() {
            output.push_str(&format!(
                "| {} | {} | {} | {:.1}% |\n",
                criterion.key.title(),
                criterion.passed,
                criterion.failed,
                rate
            ));
        }
    }
    output.push('\n');
}

fn render_top_sites(output: &mut String, stats: &AuditStatistics) {
    output.push_str("## Топ-5 сайтов с наилучшим соответствием\n\n");
    for (index, score) in stats.top_sites(TOP_SITES).iter().enumerate() {
        output.push_str(&format!(
            "{}. **{}** - {:.1}%\n",
            index + 1,
            score.url,
            score.percentage
        ));
    }
    output.push('\n');
}

fn render_weakest(output: &mut String, stats: &AuditStatistics) {
    output.push_str("## Основные проблемы\n\n");
    output.push_str("### Критерии с наименьшим процентом выполнения:\n\n");
    for (criterion, rate) in stats.weakest_criteria(WEAKEST_CRITERIA) {
        output.push_str(&format!("- **{}** - {:.1}%\n", criterion.key.title(), rate));
    }
    output.push('\n');
}

fn render_recommendations(output: &mut String, stats: &AuditStatistics) {
    output.push_str("## Рекомендации\n\n");
    output.push_str("### Приоритетные направления для улучшения:\n\n");
    for (criterion, rate) in stats.weakest_criteria(PRIORITY_RECOMMENDATIONS) {
        output.push_str(&format!(
            "- **{}** ({:.1}%): {}\n",
            criterion.key.title(),
            rate,
            criterion.key.recommendation()
        ));
    }
    output.push('\n');

    output.push_str("### Общие рекомендации:\n\n");
    for (index, recommendation) in GENERAL_RECOMMENDATIONS.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", index + 1, recommendation));
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::info;

use crate::config::settings::OutputSettings;
use crate::domain::models::site_check::AuditRun;
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::domain::services::statistics_service::AuditStatistics;
use crate::presentation::summary::render_summary;
use crate::utils::errors::AuditError;

/// 从结构化结果文件重新生成摘要，不重新抓取站点
pub async fn rebuild_summary(
    storage: &dyn StorageRepository,
    output: &OutputSettings,
) -> Result<AuditStatistics, AuditError> {
    let json = storage.read_to_string(&output.results_file).await?;
    let run: AuditRun = serde_json::from_str(&json)?;
    let stats = AuditStatistics::from_run(&run);

    storage
        .save(&output.summary_file, render_summary(&stats).as_bytes())
        .await?;
    info!(
        "Summary for {} sites saved to {}",
        stats.total_sites, output.summary_file
    );
    Ok(stats)
}

// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::Local;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

use crate::config::settings::{AuditSettings, FetcherSettings, InputSettings, OutputSettings};
use crate::domain::models::site_check::{AuditRun, SiteCheckResult};
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::domain::services::checklist_service::ChecklistEvaluator;
use crate::domain::services::statistics_service::AuditStatistics;
use crate::engines::traits::{FetchEngine, FetchRequest};
use crate::presentation::{report, summary};
use crate::utils::errors::AuditError;
use crate::utils::text_encoding::decode_body;
use crate::utils::url_utils::{normalize_url, top_level_domain};

/// 解析站点列表
///
/// 跳过空行和以 `-` 开头的行，其余行去掉首尾空白后按原顺序返回
pub fn parse_site_list(content: &str) -> Vec<String> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('-'))
        .map(|line| line.trim().to_string())
        .collect()
}

/// 批量检查用例
///
/// 对每个站点依次执行抓取和检查清单评估，站点之间插入固定延迟
pub struct AuditUseCase {
    engine: Arc<dyn FetchEngine>,
    evaluator: Arc<ChecklistEvaluator>,
    fetcher: FetcherSettings,
    audit: AuditSettings,
}

impl AuditUseCase {
    pub fn new(
        engine: Arc<dyn FetchEngine>,
        evaluator: Arc<ChecklistEvaluator>,
        fetcher: FetcherSettings,
        audit: AuditSettings,
    ) -> Self {
        Self {
            engine,
            evaluator,
            fetcher,
            audit,
        }
    }

    /// 检查单个站点
    ///
    /// 只有 HTTP 200 视为可访问。抓取或评估失败时记录错误，
    /// 该站点不保留任何检查结果。
    #[instrument(skip(self), fields(engine = self.engine.name()))]
    pub async fn check_site(&self, site: &str) -> SiteCheckResult {
        let url = normalize_url(site);
        info!("Checking site: {}", url);

        let request = FetchRequest {
            url: url.clone(),
            timeout: self.fetcher.timeout(),
        };
        let response = match self.engine.fetch(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                return SiteCheckResult::inaccessible(url, format!("Ошибка при проверке: {}", e));
            }
        };

        if response.status_code != 200 {
            warn!("Site {} returned status {}", url, response.status_code);
            return SiteCheckResult::inaccessible(
                url,
                format!("Сайт недоступен (код: {})", response.status_code),
            );
        }

        // HTML parsing is CPU-bound and the parsed tree is not Send
        let evaluator = self.evaluator.clone();
        let page_url = url.clone();
        let tld = top_level_domain(&response.final_url);
        let evaluation = tokio::task::spawn_blocking(move || {
            let decoded = decode_body(
                &response.body,
                response.content_type.as_deref(),
                tld.as_deref(),
            );
            evaluator.evaluate_html(&page_url, &decoded.text)
        })
        .await;

        match evaluation {
            Ok(checks) => {
                info!(
                    passed = checks.passed(),
                    total = checks.len(),
                    "Checklist evaluated for {}",
                    url
                );
                SiteCheckResult::evaluated(url, checks)
            }
            Err(e) => {
                error!("Checklist evaluation failed for {}: {}", url, e);
                SiteCheckResult::inaccessible(url, format!("Ошибка при проверке: {}", e))
            }
        }
    }

    /// 检查全部站点，结果按输入顺序排列
    ///
    /// `concurrency` 为 1 时严格顺序执行；相邻两个站点之间等待 `delay`，
    /// 最后一个站点之后不等待
    pub async fn check_all(&self, sites: &[String]) -> AuditRun {
        let total = sites.len();
        let concurrency = self.audit.concurrency.max(1);
        let delay = self.audit.delay();
        info!("Found {} sites to check", total);

        let results: Vec<SiteCheckResult> = stream::iter(sites.iter().enumerate())
            .map(|(index, site)| async move {
                if index >= concurrency && !delay.is_zero() {
                    sleep(delay).await;
                }
                info!("Checking site {}/{}: {}", index + 1, total, site);
                self.check_site(site).await
            })
            .buffered(concurrency)
            .collect()
            .await;

        let mut run = AuditRun::new();
        for (site, result) in sites.iter().zip(results) {
            run.insert(site.clone(), result);
        }
        run
    }

    /// 完整流程：读取站点列表，检查，写出报告、结构化结果和摘要
    pub async fn run(
        &self,
        storage: &dyn StorageRepository,
        input: &InputSettings,
        output: &OutputSettings,
    ) -> Result<AuditRun, AuditError> {
        let content = storage.read_to_string(&input.sites_file).await?;
        let sites = parse_site_list(&content);

        let run = self.check_all(&sites).await;
        let stats = AuditStatistics::from_run(&run);

        let report = report::render_report(&run, &stats, Local::now().naive_local());
        storage.save(&output.report_file, report.as_bytes()).await?;
        info!("Report saved to {}", output.report_file);

        let results = serde_json::to_vec_pretty(&run)?;
        storage.save(&output.results_file, &results).await?;
        info!("Structured results saved to {}", output.results_file);

        let summary = summary::render_summary(&stats);
        storage.save(&output.summary_file, summary.as_bytes()).await?;
        info!("Summary saved to {}", output.summary_file);

        Ok(run)
    }
}

#[cfg(test)]
#[path = "audit_use_case_test.rs"]
mod tests;

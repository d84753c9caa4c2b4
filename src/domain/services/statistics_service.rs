// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::cmp::Ordering;

use crate::domain::models::criterion::CriterionKey;
use crate::domain::models::site_check::AuditRun;

/// 合规等级下限（百分比）
pub const EXCELLENT_THRESHOLD: f64 = 80.0;
pub const GOOD_THRESHOLD: f64 = 60.0;
pub const FAIR_THRESHOLD: f64 = 40.0;

/// 单个可访问站点的合规得分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteScore {
    /// 输入文件中的原始地址
    pub site: String,
    /// 规范化后的地址
    pub url: String,
    pub passed: usize,
    pub total: usize,
    pub percentage: f64,
}

/// 单个检查项在所有可访问站点上的通过情况
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionStats {
    pub key: CriterionKey,
    pub passed: usize,
    pub failed: usize,
}

impl CriterionStats {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// 通过率，没有可访问站点时为 None
    pub fn pass_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.passed as f64 * 100.0 / total as f64),
        }
    }
}

/// 按合规百分比划分的站点数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceBuckets {
    /// 80-100%
    pub excellent: usize,
    /// 60-79%
    pub good: usize,
    /// 40-59%
    pub fair: usize,
    /// 0-39%
    pub poor: usize,
}

impl ComplianceBuckets {
    pub fn total(&self) -> usize {
        self.excellent + self.good + self.fair + self.poor
    }
}

/// 批量检查的汇总统计
///
/// 直接由结构化结果计算，报告和摘要共用同一份统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditStatistics {
    pub total_sites: usize,
    pub accessible_sites: usize,
    /// 可访问站点的得分，按输入顺序排列
    pub scores: Vec<SiteScore>,
    /// 按检查项顺序排列
    pub criteria: Vec<CriterionStats>,
}

impl AuditStatistics {
    /// 从一次批量检查的结果计算统计
    pub fn from_run(run: &AuditRun) -> Self {
        let scores = run
            .iter()
            .filter_map(|record| {
                let percentage = record.result.compliance_percentage()?;
                Some(SiteScore {
                    site: record.site.clone(),
                    url: record.result.url.clone(),
                    passed: record.result.passed_checks(),
                    total: record.result.total_checks(),
                    percentage,
                })
            })
            .collect();

        let criteria = CriterionKey::ALL
            .into_iter()
            .map(|key| {
                let mut stats = CriterionStats {
                    key,
                    passed: 0,
                    failed: 0,
                };
                for record in run.iter().filter(|record| record.result.accessible) {
                    match record.result.checks.get(key) {
                        Some(true) => stats.passed += 1,
                        Some(false) => stats.failed += 1,
                        None => {}
                    }
                }
                stats
            })
            .collect();

        Self {
            total_sites: run.len(),
            accessible_sites: run.accessible_count(),
            scores,
            criteria,
        }
    }

    pub fn inaccessible_sites(&self) -> usize {
        self.total_sites - self.accessible_sites
    }

    pub fn average_compliance(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        let sum: f64 = self.scores.iter().map(|score| score.percentage).sum();
        Some(sum / self.scores.len() as f64)
    }

    pub fn max_compliance(&self) -> Option<f64> {
        self.scores.iter().map(|score| score.percentage).reduce(f64::max)
    }

    pub fn min_compliance(&self) -> Option<f64> {
        self.scores.iter().map(|score| score.percentage).reduce(f64::min)
    }

    pub fn buckets(&self) -> ComplianceBuckets {
        let mut buckets = ComplianceBuckets::default();
        for score in &self.scores {
            match score.percentage {
                p if p >= EXCELLENT_THRESHOLD => buckets.excellent += 1,
                p if p >= GOOD_THRESHOLD => buckets.good += 1,
                p if p >= FAIR_THRESHOLD => buckets.fair += 1,
                _ => buckets.poor += 1,
            }
        }
        buckets
    }

    /// 合规百分比最高的 `limit` 个站点，得分相同时保持输入顺序
    pub fn top_sites(&self, limit: usize) -> Vec<&SiteScore> {
        let mut ranked: Vec<&SiteScore> = self.scores.iter().collect();
        ranked.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(limit);
        ranked
    }

    /// 通过率最低的 `limit` 个检查项，通过率相同时保持检查项顺序
    pub fn weakest_criteria(&self, limit: usize) -> Vec<(&CriterionStats, f64)> {
        let mut ranked: Vec<(&CriterionStats, f64)> = self
            .criteria
            .iter()
            .filter_map(|stats| stats.pass_rate().map(|rate| (stats, rate)))
            .collect();
        ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        ranked.truncate(limit);
        ranked
    }
}

/// 计算 `part / whole` 的百分比，`whole` 为 0 时返回 0
pub fn share(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::criterion::CriterionKey;

/// 单个站点的检查结果集合
///
/// 要么为空（站点不可访问），要么恰好包含全部十个检查项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<CriterionKey, bool>",
    into = "BTreeMap<CriterionKey, bool>"
)]
pub struct Checks(BTreeMap<CriterionKey, bool>);

impl Checks {
    /// 空结果集
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// 对每个检查项调用 `f`，得到完整的结果集
    pub fn evaluate<F>(mut f: F) -> Self
    where
        F: FnMut(CriterionKey) -> bool,
    {
        Self(CriterionKey::ALL.into_iter().map(|key| (key, f(key))).collect())
    }

    pub fn get(&self, key: CriterionKey) -> Option<bool> {
        self.0.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 通过的检查项数量
    pub fn passed(&self) -> usize {
        self.0.values().filter(|passed| **passed).count()
    }

    /// 按展示顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (CriterionKey, bool)> + '_ {
        self.0.iter().map(|(key, passed)| (*key, *passed))
    }
}

impl TryFrom<BTreeMap<CriterionKey, bool>> for Checks {
    type Error = String;

    fn try_from(map: BTreeMap<CriterionKey, bool>) -> Result<Self, Self::Error> {
        if map.is_empty() || map.len() == CriterionKey::COUNT {
            Ok(Self(map))
        } else {
            Err(format!(
                "checks must contain 0 or {} entries, got {}",
                CriterionKey::COUNT,
                map.len()
            ))
        }
    }
}

impl From<Checks> for BTreeMap<CriterionKey, bool> {
    fn from(checks: Checks) -> Self {
        checks.0
    }
}

/// 站点检查结果实体
///
/// 每个站点创建一次，创建后不再修改。`accessible` 为 true 时
/// `checks` 包含全部检查项，否则为空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteCheckResult {
    /// 规范化后的地址
    pub url: String,
    /// 站点是否可访问（HTTP 200）
    pub accessible: bool,
    /// 各检查项结果
    pub checks: Checks,
    /// 检查过程中记录的错误
    pub errors: Vec<String>,
}

impl SiteCheckResult {
    /// 完成全部检查的可访问站点
    pub fn evaluated(url: String, checks: Checks) -> Self {
        Self {
            url,
            accessible: !checks.is_empty(),
            checks,
            errors: Vec::new(),
        }
    }

    /// 不可访问（或检查失败）的站点
    pub fn inaccessible(url: String, error: String) -> Self {
        Self {
            url,
            accessible: false,
            checks: Checks::empty(),
            errors: vec![error],
        }
    }

    pub fn passed_checks(&self) -> usize {
        self.checks.passed()
    }

    pub fn total_checks(&self) -> usize {
        self.checks.len()
    }

    /// 合规百分比 = 通过数 / 检查项总数 × 100
    ///
    /// 不可访问的站点没有百分比
    pub fn compliance_percentage(&self) -> Option<f64> {
        if !self.accessible || self.checks.is_empty() {
            return None;
        }
        Some(self.passed_checks() as f64 * 100.0 / self.total_checks() as f64)
    }
}

/// 一次批量检查中的单个站点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// 输入文件中的原始地址
    pub site: String,
    #[serde(flatten)]
    pub result: SiteCheckResult,
}

/// 一次批量检查的全部结果，按输入顺序排列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditRun {
    pub sites: Vec<SiteRecord>,
}

impl AuditRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个站点的结果
    ///
    /// 同一原始地址再次出现时替换旧结果，但保留其原有位置
    pub fn insert(&mut self, site: String, result: SiteCheckResult) {
        match self.sites.iter_mut().find(|record| record.site == site) {
            Some(record) => record.result = result,
            None => self.sites.push(SiteRecord { site, result }),
        }
    }

    pub fn get(&self, site: &str) -> Option<&SiteCheckResult> {
        self.sites
            .iter()
            .find(|record| record.site == site)
            .map(|record| &record.result)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn accessible_count(&self) -> usize {
        self.sites.iter().filter(|record| record.result.accessible).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteRecord> {
        self.sites.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checks_with(passed: usize) -> Checks {
        let mut index = 0;
        Checks::evaluate(|_| {
            index += 1;
            index <= passed
        })
    }

    #[test]
    fn test_evaluated_checks_are_complete() {
        let result = SiteCheckResult::evaluated("https://a.ru".into(), checks_with(7));
        assert!(result.accessible);
        assert_eq!(result.total_checks(), CriterionKey::COUNT);
        assert_eq!(result.passed_checks(), 7);
        assert_eq!(result.compliance_percentage(), Some(70.0));
    }

    #[test]
    fn test_inaccessible_has_no_checks() {
        let result = SiteCheckResult::inaccessible(
            "https://a.ru".into(),
            "Сайт недоступен (код: 404)".into(),
        );
        assert!(!result.accessible);
        assert!(result.checks.is_empty());
        assert_eq!(result.compliance_percentage(), None);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(
            SiteCheckResult::evaluated("u".into(), checks_with(0)).compliance_percentage(),
            Some(0.0)
        );
        assert_eq!(
            SiteCheckResult::evaluated("u".into(), checks_with(10)).compliance_percentage(),
            Some(100.0)
        );
        assert_eq!(
            SiteCheckResult::evaluated("u".into(), checks_with(3)).compliance_percentage(),
            Some(30.0)
        );
    }

    #[test]
    fn test_partial_checks_are_rejected_on_deserialize() {
        let json = r#"{"privacy_policy": true, "cookie_popup": false}"#;
        assert!(serde_json::from_str::<Checks>(json).is_err());
        assert!(serde_json::from_str::<Checks>("{}").unwrap().is_empty());
    }

    #[test]
    fn test_repeated_site_replaces_in_place() {
        let mut run = AuditRun::new();
        run.insert("a.ru".into(), SiteCheckResult::inaccessible("https://a.ru".into(), "x".into()));
        run.insert("b.ru".into(), SiteCheckResult::evaluated("https://b.ru".into(), checks_with(5)));
        run.insert("a.ru".into(), SiteCheckResult::evaluated("https://a.ru".into(), checks_with(9)));

        let sites: Vec<_> = run.iter().map(|record| record.site.as_str()).collect();
        assert_eq!(sites, vec!["a.ru", "b.ru"]);
        assert_eq!(run.get("a.ru").unwrap().passed_checks(), 9);
        assert_eq!(run.accessible_count(), 2);
    }
}

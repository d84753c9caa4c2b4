// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;
use tracing::info;

use crate::config::settings::InputSettings;
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::utils::errors::AuditError;

/// 从 JSON 导出中提取站点地址
///
/// 顶层必须是数组；对象元素中 `field` 字段为非空字符串时取其值，其余元素跳过
pub fn extract_sites(json: &str, field: &str) -> Result<Vec<String>, AuditError> {
    let value: Value = serde_json::from_str(json)?;
    let items = value
        .as_array()
        .ok_or_else(|| AuditError::InvalidInput("expected a top-level JSON array".to_string()))?;

    Ok(items
        .iter()
        .filter_map(|item| item.as_object()?.get(field)?.as_str())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect())
}

/// 读取 JSON 导出并写出站点列表文件，返回写入的地址数
pub async fn extract_site_list(
    storage: &dyn StorageRepository,
    input: &InputSettings,
) -> Result<usize, AuditError> {
    let json = storage.read_to_string(&input.sites_json).await?;
    let sites = extract_sites(&json, &input.json_field)?;

    let mut content = String::new();
    for site in &sites {
        content.push_str(site);
        content.push('\n');
    }
    storage.save(&input.sites_file, content.as_bytes()).await?;

    info!("Wrote {} sites to {}", sites.len(), input.sites_file);
    Ok(sites.len())
}

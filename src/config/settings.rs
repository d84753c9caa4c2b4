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

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 默认的浏览器标识
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 应用程序配置设置
///
/// 包含输入、输出、抓取和批量检查等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 输入文件配置
    pub input: InputSettings,
    /// 输出文件配置
    pub output: OutputSettings,
    /// 抓取配置
    pub fetcher: FetcherSettings,
    /// 批量检查配置
    pub audit: AuditSettings,
}

/// 输入文件配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    /// 站点列表文件（每行一个地址）
    pub sites_file: String,
    /// JSON 导出文件
    pub sites_json: String,
    /// JSON 导出中保存站点地址的字段名
    pub json_field: String,
}

/// 输出文件配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// Markdown 报告文件
    pub report_file: String,
    /// Markdown 摘要文件
    pub summary_file: String,
    /// 结构化结果文件 (JSON)
    pub results_file: String,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherSettings {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// User-Agent 请求头
    pub user_agent: String,
    /// 最大重定向次数
    pub max_redirects: usize,
}

impl FetcherSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
        }
    }
}

/// 批量检查配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuditSettings {
    /// 相邻两个站点之间的等待时间（毫秒）
    pub delay_ms: u64,
    /// 同时检查的站点数，1 表示严格顺序执行
    pub concurrency: usize,
}

impl AuditSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            concurrency: 1,
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `PDCHECK__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PDCHECK").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 只包含内置默认值的配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let fetcher = FetcherSettings::default();
        let audit = AuditSettings::default();
        Config::builder()
            // Input files
            .set_default("input.sites_file", "battle_sites.txt")?
            .set_default("input.sites_json", "sites.json")?
            .set_default("input.json_field", "Боевой сайт")?
            // Output files
            .set_default("output.report_file", "result.md")?
            .set_default("output.summary_file", "summary.md")?
            .set_default("output.results_file", "results.json")?
            // Fetcher
            .set_default("fetcher.timeout_secs", fetcher.timeout_secs)?
            .set_default("fetcher.user_agent", fetcher.user_agent)?
            .set_default("fetcher.max_redirects", fetcher.max_redirects as u64)?
            // Batch runner
            .set_default("audit.delay_ms", audit.delay_ms)?
            .set_default("audit.concurrency", audit.concurrency as u64)
    }
}

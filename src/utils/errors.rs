// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::repositories::storage_repository::StorageError;
use crate::engines::traits::EngineError;

/// 审计流程错误类型
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("引擎错误: {0}")]
    Engine(#[from] EngineError),

    #[error("无效选择器: {0}")]
    Selector(String),

    #[error("无效正则表达式: {0}")]
    Pattern(#[from] regex::Error),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),
}

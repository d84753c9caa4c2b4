// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 未找到
    #[error("Not found: {0}")]
    NotFound(String),
    /// 内容不是合法的 UTF-8
    #[error("Invalid UTF-8 in {0}")]
    InvalidUtf8(String),
}

/// 存储仓库特质
///
/// 定义输入输出文件的访问接口
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 使用指定键保存数据到存储中
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// 根据键从存储中检索数据
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// 读取 UTF-8 文本，键不存在时返回 `NotFound`
    async fn read_to_string(&self, key: &str) -> Result<String, StorageError> {
        let data = self
            .get(key)
            .await?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        String::from_utf8(data).map_err(|_| StorageError::InvalidUtf8(key.to_string()))
    }
}

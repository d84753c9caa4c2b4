// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 检查项（criterion）：固定的十个合规检查项
/// - 站点检查结果（site_check）：单个站点的结果和一次批量检查的结果
pub mod criterion;
pub mod site_check;

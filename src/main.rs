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

use anyhow::Result;
use clap::{Parser, Subcommand};
use pdcheck::application::use_cases::audit_use_case::AuditUseCase;
use pdcheck::application::use_cases::extract_sites_use_case::extract_site_list;
use pdcheck::application::use_cases::summary_use_case::rebuild_summary;
use pdcheck::config::settings::Settings;
use pdcheck::domain::services::checklist_service::ChecklistEvaluator;
use pdcheck::engines::reqwest_engine::ReqwestEngine;
use pdcheck::infrastructure::storage::LocalStorage;
use pdcheck::presentation::report::render_site_section;
use pdcheck::utils::telemetry;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pdcheck",
    about = "Проверка сайтов на соответствие требованиям к обработке ПДн"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every site from the site list and write the report
    Run {
        /// Site list file (overrides configuration)
        #[arg(short, long)]
        sites: Option<String>,
    },

    /// Build the site list from a JSON export
    Extract,

    /// Rebuild the summary from stored results without fetching
    Summary,

    /// Check a single site and print its report section
    Check {
        /// Site address, with or without scheme
        url: String,
    },
}

/// 主函数
///
/// 初始化日志和配置，然后执行所选命令，未指定命令时执行完整检查
#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry();

    let cli = Cli::parse();
    let mut settings = Settings::new()?;
    let storage = LocalStorage::new(".");

    match cli.command.unwrap_or(Commands::Run { sites: None }) {
        Commands::Run { sites } => {
            if let Some(sites) = sites {
                settings.input.sites_file = sites;
            }
            let use_case = build_audit(&settings)?;
            let run = use_case
                .run(&storage, &settings.input, &settings.output)
                .await?;

            let accessible = run.accessible_count();
            println!("\nПроверка завершена!");
            println!("Всего сайтов: {}", run.len());
            println!("Доступных: {}", accessible);
            println!("Недоступных: {}", run.len() - accessible);
            println!("Отчет сохранен в {}", settings.output.report_file);
        }
        Commands::Extract => {
            let count = extract_site_list(&storage, &settings.input).await?;
            println!(
                "Извлечено {} сайтов в {}",
                count, settings.input.sites_file
            );
        }
        Commands::Summary => {
            let stats = rebuild_summary(&storage, &settings.output).await?;
            println!(
                "Резюме для {} сайтов сохранено в {}",
                stats.total_sites, settings.output.summary_file
            );
        }
        Commands::Check { url } => {
            let use_case = build_audit(&settings)?;
            let result = use_case.check_site(&url).await;
            print!("{}", render_site_section(&url, &result));
        }
    }

    info!("Done");
    Ok(())
}

fn build_audit(settings: &Settings) -> Result<AuditUseCase> {
    let engine = Arc::new(ReqwestEngine::new(&settings.fetcher)?);
    let evaluator = Arc::new(ChecklistEvaluator::new()?);
    Ok(AuditUseCase::new(
        engine,
        evaluator,
        settings.fetcher.clone(),
        settings.audit.clone(),
    ))
}

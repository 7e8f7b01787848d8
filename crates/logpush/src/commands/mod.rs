pub mod job;
pub mod show;

use logpush_resource::{JobConfig, JobState, StateManager};
use std::path::Path;

/// ジョブ定義ファイル (JSON) を読み込み、必須項目を検証する
pub fn load_job_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        anyhow::anyhow!("ジョブ定義ファイルを読み込めません {}: {}", path.display(), e)
    })?;
    let config: JobConfig = serde_json::from_str(&content).map_err(|e| {
        anyhow::anyhow!("ジョブ定義ファイルの形式が不正です {}: {}", path.display(), e)
    })?;
    config.validate()?;
    Ok(config)
}

/// 保存済みの状態を読み込む（存在しない場合はエラー）
pub async fn load_state(manager: &StateManager) -> anyhow::Result<JobState> {
    manager.load().await?.ok_or_else(|| {
        anyhow::anyhow!(
            "状態ファイルが見つかりません: {} (先に create を実行してください)",
            manager.state_dir().display()
        )
    })
}

use super::{load_job_config, load_state};
use colored::Colorize;
use logpush_cloudflare::{ApiConfig, CloudflareClient};
use logpush_resource::{JobResourceAdapter, JobState, ReadOutcome, StateManager};
use std::path::Path;

/// 環境変数からAPIクライアントを構築
fn init_adapter() -> anyhow::Result<JobResourceAdapter<CloudflareClient>> {
    let config = ApiConfig::from_env()?;
    tracing::debug!("Using Cloudflare API at {}", config.base_url);
    Ok(JobResourceAdapter::new(CloudflareClient::new(config)))
}

pub async fn handle_create(state_dir: &Path, config_path: &Path) -> anyhow::Result<()> {
    let config = load_job_config(config_path)?;
    let adapter = init_adapter()?;
    let manager = StateManager::new(state_dir);
    let lock = manager.acquire_lock().await?;

    if let Some(existing) = manager.load().await? {
        if !existing.handle.is_empty() {
            anyhow::bail!(
                "ジョブ {} は既に作成済みです (update を使用してください)",
                existing.handle.id()
            );
        }
    }

    println!("{}", "Logpush ジョブを作成中...".yellow());
    println!("ゾーン: {}", config.zone.cyan());

    let mut state = JobState::new(config);
    adapter.create(&mut state).await?;
    manager.save(&state).await?;
    lock.release().await?;

    println!(
        "{}",
        format!("✓ ジョブ {} を作成しました", state.handle.id()).green()
    );
    Ok(())
}

pub async fn handle_read(state_dir: &Path) -> anyhow::Result<()> {
    let manager = StateManager::new(state_dir);
    let lock = manager.acquire_lock().await?;
    let mut state = load_state(&manager).await?;
    let job_id = state.handle.id().to_string();
    let adapter = init_adapter()?;

    let outcome = adapter.read(&mut state).await?;
    manager.save(&state).await?;
    lock.release().await?;

    match outcome {
        ReadOutcome::Present => {
            println!(
                "{}",
                format!("✓ ジョブ {} の状態を取得しました", job_id).green()
            );
        }
        ReadOutcome::Absent => {
            println!(
                "{}",
                format!(
                    "⚠ ジョブ {} はリモートに存在しません。状態から削除しました",
                    job_id
                )
                .yellow()
            );
        }
    }
    Ok(())
}

pub async fn handle_update(state_dir: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
    let manager = StateManager::new(state_dir);
    let lock = manager.acquire_lock().await?;
    let mut state = load_state(&manager).await?;

    // 新しい定義が指定された場合はハンドルを保持したまま設定を置き換える
    if let Some(path) = config_path {
        state.config = load_job_config(path)?;
    }

    let adapter = init_adapter()?;

    println!(
        "{}",
        format!("ジョブ {} を更新中...", state.handle.id()).yellow()
    );
    adapter.update(&mut state).await?;
    manager.save(&state).await?;
    lock.release().await?;

    println!("{}", "✓ 更新完了".green());
    Ok(())
}

pub async fn handle_delete(state_dir: &Path) -> anyhow::Result<()> {
    let manager = StateManager::new(state_dir);
    let lock = manager.acquire_lock().await?;
    let mut state = load_state(&manager).await?;
    let job_id = state.handle.id().to_string();
    let adapter = init_adapter()?;

    println!("{}", format!("ジョブ {} を削除中...", job_id).yellow());
    adapter.delete(&mut state).await?;
    manager.save(&state).await?;
    lock.release().await?;

    println!("{}", "✓ 削除完了".green());
    Ok(())
}

use colored::Colorize;
use logpush_resource::StateManager;
use std::path::Path;

pub async fn handle(state_dir: &Path) -> anyhow::Result<()> {
    let manager = StateManager::new(state_dir);

    let Some(state) = manager.load().await? else {
        println!("{}", "状態ファイルがありません".yellow());
        return Ok(());
    };

    let status = if state.handle.is_empty() {
        "absent".yellow()
    } else {
        "present".green()
    };
    println!("{}", "Logpush ジョブ:".bold());
    println!("  ID:     {}", state.handle.id().cyan());
    if let Some(zone_id) = state.handle.zone_id() {
        println!("  ゾーン: {} ({})", state.config.zone.cyan(), zone_id);
    } else {
        println!("  ゾーン: {}", state.config.zone.cyan());
    }
    println!("  状態:   {}", status);
    println!();
    println!("{}", serde_json::to_string_pretty(&state.config)?);
    Ok(())
}

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logpush")]
#[command(about = "Cloudflare Logpush ジョブを宣言的に管理する", long_about = None)]
struct Cli {
    /// 状態ファイルを置くディレクトリ
    #[arg(
        long = "state-dir",
        env = "LOGPUSH_STATE_DIR",
        default_value = ".logpush",
        global = true
    )]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ジョブを作成
    Create {
        /// ジョブ定義ファイル (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// リモートの状態をローカルに反映
    Read,
    /// ジョブ設定をリモートに反映
    Update {
        /// 新しいジョブ定義ファイル (省略時は保存済みの設定を使用)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// ジョブを削除
    Delete,
    /// ローカルの状態を表示
    Show,
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログはstderrに出力（RUST_LOG で調整）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Commands::Create { config } => commands::job::handle_create(&cli.state_dir, &config).await,
        Commands::Read => commands::job::handle_read(&cli.state_dir).await,
        Commands::Update { config } => {
            commands::job::handle_update(&cli.state_dir, config.as_deref()).await
        }
        Commands::Delete => commands::job::handle_delete(&cli.state_dir).await,
        Commands::Show => commands::show::handle(&cli.state_dir).await,
        Commands::Version => {
            println!("logpush {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

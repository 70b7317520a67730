use clap::{Parser, Subcommand};
use plate_detect_common::OcrMethod;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plate-detect")]
#[command(about = "ナンバープレート検出APIクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIベースURL（環境変数 PLATE_API_URL・設定ファイルより優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を1枚送信してナンバープレートを検出
    Detect {
        /// 画像ファイルまたはフォルダ（複数可）
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// OCR方式 (trained/tesseract)。省略時は前回の選択
        #[arg(short, long)]
        method: Option<OcrMethod>,

        /// 送信する画像の番号（1始まり）
        #[arg(short, long, conflicts_with = "interactive")]
        index: Option<usize>,

        /// 送信する画像を対話的に選択
        #[arg(short = 'I', long)]
        interactive: bool,
    },

    /// 複数画像をまとめて検出
    Bulk {
        /// 画像ファイルまたはフォルダ（複数可）
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// OCR方式 (trained/tesseract)。省略時は前回の選択
        #[arg(short, long)]
        method: Option<OcrMethod>,
    },

    /// 検出履歴を表示
    History,

    /// 検出結果の詳細を表示
    Show {
        /// 検出ID
        #[arg(required = true)]
        id: String,
    },

    /// 保存済みのセッション（OCR方式・直近の結果・エラー）を表示/編集
    Session {
        /// セッションを削除
        #[arg(long)]
        clear: bool,

        /// OCR方式を変更して保存
        #[arg(short, long)]
        method: Option<OcrMethod>,
    },

    /// 設定を表示/編集
    Config {
        /// APIベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// このツールについて
    About,
}

//! ainode-cli
//!
//! 1 件の入力でパイプラインを 1 回実行し、出力を表示するドライバ。

use std::fs;
use std::path::{Path, PathBuf};

use ainode_core::app::AdapterBuilder;
use ainode_core::config::AdapterConfig;
use ainode_core::{BaseInput, InputObject, OutputObject, Pipeline};
use anyhow::{Context, Result};
use clap::Parser;
use my_ai_lib::MyAiPipeline;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run one AI-node pipeline against a single input and print the output.
#[derive(Debug, Parser)]
#[command(name = "ainode-cli", version)]
struct Cli {
    /// Registered pipeline to run
    #[arg(long, default_value = MyAiPipeline::NAME)]
    task: String,

    #[arg(long, default_value = "wiki/aioz.png")]
    input_image: String,

    #[arg(long, default_value = "example")]
    example_param: String,

    /// Input field as key=<json>; plain strings are taken verbatim.
    /// `device` and `model_storage_directory` override the environment.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, serde_json::Value)>,

    /// Write every output file into this directory
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn parse_param(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn build_input(base: BaseInput, cli: &Cli) -> Result<InputObject> {
    let mut input = InputObject::new(base)
        .with_field("input_image", cli.input_image.clone())
        .with_field("example_param", cli.example_param.clone());
    for (key, value) in &cli.params {
        input = input
            .try_with_field(key.clone(), value.clone())
            .with_context(|| format!("--param {key}"))?;
    }
    Ok(input)
}

fn render_output(output: &dyn OutputObject) -> Result<String> {
    let record = serde_json::to_string_pretty(&output.model_dump()?)?;
    Ok(format!("Output: {output:?}\n{record}"))
}

/// Drains every output file into `dir`. Returns the written paths.
fn save_files(output: &mut dyn OutputObject, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut written = Vec::new();
    for file in output.files_mut() {
        let path = dir.join(file.name());
        let bytes = file
            .read_all()
            .with_context(|| format!("reading {}", path.display()))?;
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "saved output file");
        written.push(path);
    }
    Ok(written)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ainode_core=info,my_ai_lib=info,ainode_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = AdapterConfig::load()?;
    info!(
        model_storage_directory = %config.model_storage_directory.display(),
        device = %config.device,
        "configuration loaded"
    );

    // (A) Adapter を用意（起動時に登録漏れを検出）
    let adapter = AdapterBuilder::new()
        .register(MyAiPipeline)?
        .expect_pipelines(&[MyAiPipeline::NAME])
        .build()?;

    // (B) 入力を組み立てる
    let input = build_input(config.base_input(), &cli)?;

    // (C) 実行
    let mut output = adapter.run(&cli.task, &input)?;
    println!("{}", render_output(output.as_ref())?);

    // (D) 出力ファイルを保存（所有権はここで受け取り、書き終えたら drop で解放）
    if let Some(dir) = &cli.save_dir {
        save_files(output.as_mut(), dir)?;
    }

    Ok(())
}

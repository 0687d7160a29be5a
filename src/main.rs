mod artifact;
mod cli;
mod client;
mod config;
mod error;
mod export;
mod logging;
mod models;
mod sentences;
mod ui;
mod worker;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;

use crate::cli::{Cli, Command};
use crate::client::HttpClient;
use crate::config::AppConfig;
use crate::ui::{App, handle_key_event, handle_paste, render};
use crate::worker::Worker;

/// 等待按键的间隔，期间检查后台请求是否完成
const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置，命令行参数优先
    let mut config = AppConfig::resolve(cli.config.as_deref()).context("加载配置失败")?;
    config.apply_overrides(cli.overrides());

    let client = HttpClient::new(&config.server_url, config.timeout());

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Some(Command::Analyze(args)) => {
            logging::init_stderr(&config.log_level)?;
            cli::run_analyze(&client, args, &config.export_dir, &mut stdout)
        }
        Some(Command::Tree(args)) => {
            logging::init_stderr(&config.log_level)?;
            cli::run_tree(&client, args, &mut stdout)
        }
        Some(Command::Split(args)) => cli::run_split(args, &mut stdout),
        None => {
            drop(stdout);
            let log_path = config.log_path()?;
            logging::init_file(&log_path, &config.log_level)?;
            info!(server = %client.base_url(), "启动交互界面");

            let app = App::new(Worker::new(Arc::new(client)), config.export_dir.clone());
            run_tui(app)?;
            println!("日志位于 {}", log_path.display());
            Ok(())
        }
    }
}

fn run_tui(mut app: App) -> Result<()> {
    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    info!("退出交互界面");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(TICK)? {
            let quit = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
                Event::Paste(text) => handle_paste(app, text),
                _ => false,
            };
            if quit {
                break;
            }
        }

        app.poll_worker();
    }
    Ok(())
}

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use fider_core::{update, Msg, Page, Phase, Router, SearchSettings, SearchState, ShellContext};
use fider_engine::EngineHandle;
use fider_logging::{shell_debug, shell_info, shell_warn};
use log::LevelFilter;

use super::config::ShellConfig;
use super::effects::EffectRunner;
use super::history::{split_location, History};
use super::logging::{self, LogDestination};
use super::ui;

const TICK: Duration = Duration::from_millis(25);

pub struct ShellOptions {
    pub location: String,
    pub config_path: Option<PathBuf>,
    pub server_data: Option<PathBuf>,
    pub log: Option<LogDestination>,
    pub write_config: Option<PathBuf>,
}

pub fn run_app(options: ShellOptions) -> Result<()> {
    let config = ShellConfig::load(options.config_path.as_deref())?;
    if let Some(path) = options.write_config.as_deref() {
        return config.save(path);
    }
    let ctx = load_context(options.server_data.as_deref())?;

    let level = if ctx.is_production() {
        LevelFilter::Info
    } else {
        LevelFilter::Debug
    };
    logging::initialize(options.log.unwrap_or(config.log_destination), level);

    let router = Router::with_default_routes().context("route table is invalid")?;
    let engine =
        EngineHandle::new(config.client_settings()).context("failed to start search engine")?;
    let mut shell = Shell::new(
        router,
        ctx,
        config.search_settings(),
        EffectRunner::new(engine),
        &options.location,
    );

    // Stdin stands in for DOM events; read it off the main loop.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    shell.navigate(&options.location);
    let mut input_closed = false;
    loop {
        loop {
            match line_rx.try_recv() {
                Ok(line) => {
                    if shell.handle_line(&line) == Flow::Quit {
                        shell.unmount();
                        return Ok(());
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    input_closed = true;
                    break;
                }
            }
        }

        if let Some(msg) = shell.effects.poll(TICK) {
            shell.dispatch(msg);
        }

        if input_closed && shell.is_settled() {
            shell.unmount();
            return Ok(());
        }
    }
}

fn load_context(path: Option<&Path>) -> Result<ShellContext> {
    let Some(path) = path else {
        return Ok(ShellContext::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read server data {path:?}"))?;
    ShellContext::from_json(&raw).with_context(|| format!("invalid server data in {path:?}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Shell {
    router: Router,
    ctx: ShellContext,
    settings: SearchSettings,
    effects: EffectRunner,
    history: History,
    page: Option<SearchState>,
    navigations: u64,
}

impl Shell {
    fn new(
        router: Router,
        ctx: ShellContext,
        settings: SearchSettings,
        effects: EffectRunner,
        initial_location: &str,
    ) -> Self {
        Self {
            router,
            ctx,
            settings,
            effects,
            history: History::new(initial_location),
            page: None,
            navigations: 0,
        }
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match ui::input::parse_line(line) {
            Some(ui::input::InputCommand::Page(msg)) => self.dispatch(msg),
            Some(ui::input::InputCommand::Navigate(location)) => {
                self.history.push(location.clone());
                self.navigate(&location);
            }
            Some(ui::input::InputCommand::Where) => println!("{}", self.history.current()),
            Some(ui::input::InputCommand::Help) => println!("{}", ui::input::HELP),
            Some(ui::input::InputCommand::Quit) => return Flow::Quit,
            None if line.trim().is_empty() => {}
            None => println!("unknown command; type `help`"),
        }
        Flow::Continue
    }

    /// Resolves `location` and mounts its page. The caller has already put the
    /// location into the history.
    fn navigate(&mut self, location: &str) {
        self.unmount();
        self.navigations += 1;
        fider_logging::set_navigation(self.navigations);

        let (path, query) = split_location(location);
        let descriptor = match self.router.resolve(path) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                shell_warn!("{}", err);
                print_lines(ui::render::render_not_found(location));
                return;
            }
        };
        shell_info!(
            "navigated to {} -> page {} (chrome: {}, history depth {})",
            location,
            descriptor.id,
            descriptor.show_chrome,
            self.history.len()
        );
        print_lines(ui::render::render_page(&descriptor, &self.ctx));

        if descriptor.page == Page::Home {
            let path = if path.is_empty() { "/" } else { path };
            let state = SearchState::mount(path, query, self.ctx.initial_posts(), self.settings);
            print_lines(ui::render::render_search(&state.view()));
            self.page = Some(state);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let Some(state) = self.page.take() else {
            shell_debug!("no search on this page; dropping {:?}", msg);
            return;
        };
        let (mut state, effects) = update(state, msg);
        self.effects.run(effects, &mut self.history);
        if state.consume_dirty() {
            print_lines(ui::render::render_search(&state.view()));
        }
        self.page = Some(state);
    }

    fn unmount(&mut self) {
        if let Some(state) = self.page.take() {
            let (_, effects) = update(state, Msg::Unmounted);
            self.effects.run(effects, &mut self.history);
        }
    }

    /// Nothing pending: no page, or a page with no timer or request in flight.
    fn is_settled(&self) -> bool {
        self.page
            .as_ref()
            .map_or(true, |state| state.phase() == Phase::Idle)
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

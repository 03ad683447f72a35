use clap::Args;
use fanmory_core as game;
use yew::prelude::*;

use crate::game::GameView;
use crate::menu::{DifficultyView, HomeView, ModeView};
use crate::upload::UploadView;
use crate::utils::js_random_seed;

#[derive(Args, Properties, Debug, Clone, Default, PartialEq)]
pub(crate) struct LaunchProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Skip the menus and start a round on this difficulty preset
    #[arg(short, long)]
    pub difficulty: Option<String>,

    /// Skip the menus and start a round in this mode
    #[arg(short, long)]
    pub mode: Option<String>,
}

impl LaunchProps {
    /// Round to jump straight into, when either a difficulty or a mode was given.
    fn launch_config(&self) -> Option<game::RoundConfig> {
        if self.difficulty.is_none() && self.mode.is_none() {
            return None;
        }
        let preset = self.difficulty.as_deref().map_or_else(Default::default, |name| {
            name.parse::<game::DifficultyPreset>().unwrap_or_else(|_| {
                log::debug!("unknown difficulty {:?}, using default", name);
                Default::default()
            })
        });
        let mode = self.mode.as_deref().map_or_else(Default::default, |name| {
            name.parse::<game::GameMode>().unwrap_or_else(|_| {
                log::debug!("unknown mode {:?}, using default", name);
                Default::default()
            })
        });
        Some(game::RoundConfig::new(Vec::new(), preset.difficulty(), mode))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Screen {
    Home,
    Difficulty,
    Upload {
        preset: game::DifficultyPreset,
    },
    Mode {
        preset: game::DifficultyPreset,
        images: Vec<game::ImageRef>,
    },
    Game {
        config: game::RoundConfig,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AppState {
    screen: Screen,
    /// Bumped for every round so timers of an earlier round can never reach a later one.
    generation: u64,
    seed: u64,
}

impl AppState {
    fn new(screen: Screen) -> Self {
        Self {
            screen,
            generation: 0,
            seed: 0,
        }
    }

    /// Moves to `next`, entering a game starts a new round generation with `seed`.
    fn navigate(&mut self, next: Screen, seed: u64) -> bool {
        if self.screen == next && !matches!(next, Screen::Game { .. }) {
            return false;
        }
        if matches!(next, Screen::Game { .. }) {
            self.generation = self.generation.wrapping_add(1);
            self.seed = seed;
        }
        self.screen = next;
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Navigate(Screen),
}

pub(crate) struct App {
    state: AppState,
    fixed_seed: Option<u64>,
}

impl App {
    fn next_seed(&self) -> u64 {
        self.fixed_seed.unwrap_or_else(js_random_seed)
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = LaunchProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut app = Self {
            state: AppState::new(Screen::Home),
            fixed_seed: props.seed,
        };
        if let Some(config) = props.launch_config() {
            log::info!("starting {} round from launch options", config.mode.name());
            let seed = app.next_seed();
            app.state.navigate(Screen::Game { config }, seed);
        }
        app
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(next) => {
                let seed = self.next_seed();
                self.state.navigate(next, seed)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let to = |screen: Screen| link.callback(move |_: ()| Msg::Navigate(screen.clone()));

        let content = match &self.state.screen {
            Screen::Home => html! {
                <HomeView on_start={to(Screen::Difficulty)}/>
            },
            Screen::Difficulty => html! {
                <DifficultyView
                    on_select={link.callback(|preset| Msg::Navigate(Screen::Upload { preset }))}
                    on_back={to(Screen::Home)}
                />
            },
            &Screen::Upload { preset } => html! {
                <UploadView
                    {preset}
                    on_done={link.callback(move |images| Msg::Navigate(Screen::Mode { preset, images }))}
                    on_back={to(Screen::Difficulty)}
                />
            },
            Screen::Mode { preset, images } => html! {
                <ModeView
                    preset={*preset}
                    images={images.clone()}
                    on_start={link.callback(|config| Msg::Navigate(Screen::Game { config }))}
                    on_back={to(Screen::Upload { preset: *preset })}
                />
            },
            Screen::Game { config } => html! {
                <GameView
                    key={self.state.generation}
                    config={config.clone()}
                    generation={self.state.generation}
                    seed={self.state.seed}
                    on_exit={to(Screen::Difficulty)}
                />
            },
        };

        html! {
            <div class="fanmory">
                {content}
            </div>
        }
    }
}

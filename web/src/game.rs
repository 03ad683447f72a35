use crate::art;
use crate::utils::*;
use fanmory_core as game;
use gloo::timers::callback::{Interval, Timeout};
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Tick,
    CardClick(game::CardIndex),
    Resolve(game::ResolveToken),
    Exit,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CardIndex,
    card: game::Card,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        card,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        card.is_face_up().then_some("flipped"),
        card.is_matched.then_some("matched"),
        locked.then_some("locked"),
    );
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <div {class} {onclick}>
            <div class="face back"/>
            <div class="face front">
                <img src={card.image.as_str().to_string()} alt={format!("card {}", card.id + 1)} draggable="false"/>
            </div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub config: game::RoundConfig,
    pub generation: u64,
    pub seed: u64,
    pub on_exit: Callback<()>,
}

/// Owns one round and the timers driving it.
pub(crate) struct GameView {
    round: game::Result<game::Round>,
    tick_interval: Option<Interval>,
    resolve_timeout: Option<Timeout>,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(game::TICK_MS, move || link.send_message(Msg::Tick))
    }

    fn schedule_resolve(ctx: &Context<Self>, token: game::ResolveToken) -> Timeout {
        let link = ctx.link().clone();
        Timeout::new(game::RESOLVE_DELAY_MS, move || {
            link.send_message(Msg::Resolve(token))
        })
    }

    /// Dropping the gloo handles cancels their callbacks.
    fn stop_timers(&mut self) {
        self.tick_interval.take();
        self.resolve_timeout.take();
    }

    fn view_header(&self, ctx: &Context<Self>, round: &game::Round) -> Html {
        let on_exit = ctx.link().callback(|_: MouseEvent| Msg::Exit);
        let clock = round.clock();
        let time_class = classes!(
            "time",
            (clock.is_countdown() && clock.seconds() <= 10).then_some("urgent"),
        );

        let status = match round.active_player() {
            Some(active) => {
                let scores = round.scores();
                html! {
                    <>
                        {
                            for [game::Player::One, game::Player::Two].into_iter().map(|player| html! {
                                <aside class={classes!("player", (player == active).then_some("active"))}>
                                    {format!("{}: {}", player, scores.of(player))}
                                </aside>
                            })
                        }
                    </>
                }
            }
            None => html! {
                <>
                    <aside class={time_class}>{clock_label(clock)}</aside>
                    <aside class="moves">{format!("Moves: {}", round.move_count())}</aside>
                </>
            },
        };

        html! {
            <nav>
                {status}
                <aside class="pairs">{format!("{}/{}", round.matched_pairs(), round.pair_count())}</aside>
                <button class="exit" onclick={on_exit}>{"Exit"}</button>
            </nav>
        }
    }

    fn view_board(&self, ctx: &Context<Self>, round: &game::Round) -> Html {
        let cols = round.difficulty().cols.max(1);
        let style = format!("grid-template-columns: repeat({}, 1fr)", cols);
        let locked = !matches!(round.phase(), game::RoundPhase::Playing);

        html! {
            <div class={classes!("board", locked.then_some("locked"))} {style}>
                {
                    for round.cards().iter().enumerate().map(|(index, card)| {
                        let callback = ctx.link().callback(Msg::CardClick);
                        html! {
                            <CardView {index} card={card.clone()} {locked} {callback}/>
                        }
                    })
                }
            </div>
        }
    }

    fn view_result(&self, ctx: &Context<Self>, round: &game::Round, outcome: game::RoundOutcome) -> Html {
        let on_exit = ctx.link().callback(|_: MouseEvent| Msg::Exit);

        let body = if round.mode().is_two_player() {
            let scores = round.scores();
            let verdict = match outcome.winner {
                game::Winner::Player(player) => format!("{} wins!", player),
                game::Winner::Tie | game::Winner::None => "Draw!".to_string(),
            };
            html! {
                <>
                    <h2>{verdict}</h2>
                    <p>{format!("Player 1: {} pairs", scores.one)}</p>
                    <p>{format!("Player 2: {} pairs", scores.two)}</p>
                </>
            }
        } else {
            let title = if outcome.cleared {
                "Cleared!"
            } else {
                "Time's up!"
            };
            html! {
                <>
                    <h2>{title}</h2>
                    <p>{format!("Pairs: {}/{}", round.matched_pairs(), round.pair_count())}</p>
                    <p>{format!("Moves: {}", round.move_count())}</p>
                    <p>{result_time_label(round.clock())}</p>
                </>
            }
        };

        html! {
            <Modal>
                <div class="modal-backdrop">
                    <div class="modal result">
                        {body}
                        <button class="primary" onclick={on_exit}>{"Choose difficulty"}</button>
                    </div>
                </div>
            </Modal>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut config = props.config.clone();
        if config.default_images.is_empty() {
            config.default_images = art::default_card_images();
        }

        let round = game::Round::new(&config, props.generation, props.seed);
        let tick_interval = match &round {
            Ok(_) => Some(GameView::create_timer(ctx)),
            Err(err) => {
                log::error!("Could not start round: {}", err);
                None
            }
        };

        Self {
            round,
            tick_interval,
            resolve_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        if let Exit = msg {
            if let Ok(round) = &mut self.round {
                if round.cancel_pending() {
                    log::debug!("cancelled pending resolution on exit");
                }
            }
            self.stop_timers();
            ctx.props().on_exit.emit(());
            return false;
        }

        let Ok(round) = &mut self.round else {
            return false;
        };

        match msg {
            Tick => {
                let outcome = round.tick();
                if let game::TickOutcome::Completed(_) = outcome {
                    self.stop_timers();
                }
                outcome.has_update()
            }
            CardClick(index) => {
                let result = round.flip(index);
                match result {
                    Ok(game::FlipOutcome::ResolutionScheduled(token)) => {
                        self.resolve_timeout = Some(GameView::schedule_resolve(ctx, token));
                    }
                    Err(err) => log::debug!("click on card {} ignored: {}", index, err),
                    Ok(_) => {}
                }
                result.has_update()
            }
            Resolve(token) => {
                self.resolve_timeout = None;
                let outcome = round.resolve(token);
                if let game::ResolveOutcome::Completed(_) = outcome {
                    self.stop_timers();
                }
                outcome.has_update()
            }
            Exit => false,
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let round = match &self.round {
            Ok(round) => round,
            Err(err) => {
                let on_exit = ctx.link().callback(|_: MouseEvent| Msg::Exit);
                return html! {
                    <section class="game error">
                        <p>{format!("Could not start round: {}", err)}</p>
                        <button class="exit" onclick={on_exit}>{"Back"}</button>
                    </section>
                };
            }
        };

        let mode_class = round.mode().name();

        html! {
            <section class={classes!("game", mode_class)}>
                {self.view_header(ctx, round)}
                if let Some(secs) = round.countdown() {
                    <div class="countdown">
                        {if secs > 0 { secs.to_string() } else { "START!".to_string() }}
                    </div>
                } else {
                    {self.view_board(ctx, round)}
                }
                if let Some(outcome) = round.outcome() {
                    {self.view_result(ctx, round, outcome)}
                }
            </section>
        }
    }
}

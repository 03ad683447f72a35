use fanmory_core as game;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct HomeProps {
    pub on_start: Callback<()>,
}

#[function_component]
pub(crate) fn HomeView(props: &HomeProps) -> Html {
    let onclick = props.on_start.reform(|_: MouseEvent| ());

    html! {
        <section class="home">
            <h1>{"Fanmory"}</h1>
            <p>{"Flip the cards, find the pairs. Bring photos of your favourite people to play with your own deck."}</p>
            <button class="primary" {onclick}>{"Start"}</button>
        </section>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct DifficultyProps {
    pub on_select: Callback<game::DifficultyPreset>,
    pub on_back: Callback<()>,
}

#[function_component]
pub(crate) fn DifficultyView(props: &DifficultyProps) -> Html {
    let on_back = props.on_back.reform(|_: MouseEvent| ());

    html! {
        <section class="difficulty">
            <h2>{"Choose a difficulty"}</h2>
            <div class="choices">
                {
                    for game::DifficultyPreset::ALL.into_iter().map(|preset| {
                        let difficulty = preset.difficulty();
                        let onclick = props.on_select.reform(move |_: MouseEvent| preset);
                        html! {
                            <button class={classes!("choice", preset.name())} {onclick}>
                                <strong>{preset.label()}</strong>
                                <span>{format!("{}×{} board, {} pairs", difficulty.rows, difficulty.cols, difficulty.pair_count)}</span>
                                <small>{format!("Up to {} of your own images", preset.max_user_images())}</small>
                            </button>
                        }
                    })
                }
            </div>
            <button class="back" onclick={on_back}>{"Back"}</button>
        </section>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ModeProps {
    pub preset: game::DifficultyPreset,
    pub images: Vec<game::ImageRef>,
    pub on_start: Callback<game::RoundConfig>,
    pub on_back: Callback<()>,
}

const fn describe(mode: game::GameMode) -> &'static str {
    use game::GameMode::*;
    match mode {
        TimeAttack => "Clear the board before the clock runs out.",
        Relaxed => "No time limit, take it easy.",
        TwoPlayer => "Take turns, a miss passes the turn. Most pairs wins.",
    }
}

#[function_component]
pub(crate) fn ModeView(props: &ModeProps) -> Html {
    let on_back = props.on_back.reform(|_: MouseEvent| ());
    let difficulty = props.preset.difficulty();

    html! {
        <section class="mode">
            <h2>{"Choose a game mode"}</h2>
            <div class="choices">
                {
                    for game::GameMode::ALL.into_iter().map(|mode| {
                        let images = props.images.clone();
                        let onclick = props.on_start.reform(move |_: MouseEvent| {
                            game::RoundConfig::new(images.clone(), difficulty, mode)
                        });
                        html! {
                            <button class={classes!("choice", mode.name())} {onclick}>
                                <strong>{mode.label()}</strong>
                                <span>{describe(mode)}</span>
                                if mode.is_time_attack() {
                                    <small>{format!("{} seconds", difficulty.round_time_secs)}</small>
                                }
                            </button>
                        }
                    })
                }
            </div>
            <button class="back" onclick={on_back}>{"Back"}</button>
        </section>
    }
}

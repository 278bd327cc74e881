use std::rc::Rc;

use crate::jservice::{DEFAULT_API_BASE, JService};
use crate::utils::js_random_seed;
use clap::Args;
use jeopardy_core as game;
use yew::html::Scope;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    Busy(bool),
    Loaded(game::BoardModel),
    Failed(game::GameError),
    Reveal(game::Coord2),
}

/// Forwards the controller's busy signal to the component.
struct LinkStatus(Scope<BoardView>);

impl game::StatusSink for LinkStatus {
    fn begin(&self) {
        self.0.send_message(Msg::Busy(true));
    }

    fn end(&self) {
        self.0.send_message(Msg::Busy(false));
    }
}

fn cell_class(state: game::RevealState) -> Classes {
    use game::RevealState::*;
    classes!(
        "cell",
        match state {
            Hidden => classes!(),
            Question => classes!("question"),
            Answer => classes!("answer"),
        }
    )
}

/// Applies one click. The displayed board is frozen while a new one loads.
fn apply_reveal(board: &mut game::BoardModel, busy: bool, coords: game::Coord2) -> bool {
    if busy {
        log::debug!("{:?} ignored while loading", coords);
        return false;
    }

    let before = board.reveal_state(coords);
    match board.reveal(coords) {
        Ok(after) => {
            log::debug!("reveal {:?}: {:?}", coords, after);
            before != Ok(after)
        }
        Err(err) => {
            log::error!("reveal failed: {}", err);
            false
        }
    }
}

const fn start_label(loaded: bool) -> &'static str {
    if loaded { "Restart" } else { "Start" }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    coords: game::Coord2,
    label: String,
    state: game::RevealState,
    callback: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        coords,
        label,
        state,
        callback,
    } = props.clone();

    let class = cell_class(state);
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("{:?} clicked", coords);
        callback.emit(coords);
    });

    html! {
        <td {class} {onclick}>{label}</td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct BoardProps {
    /// Base URL of the trivia API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub(crate) api: String,

    /// How many categories to choose from
    #[arg(long, default_value_t = game::CATEGORY_POOL_SIZE)]
    pub(crate) pool_size: usize,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct BoardView {
    controller: Rc<game::GameController<JService>>,
    board: game::BoardModel,
    busy: bool,
    error: Option<game::GameError>,
}

impl BoardView {
    fn start(&mut self, ctx: &Context<Self>) {
        self.busy = true;
        let controller = Rc::clone(&self.controller);
        let link = ctx.link().clone();

        wasm_bindgen_futures::spawn_local(async move {
            let status = LinkStatus(link.clone());
            let mut staged = game::BoardModel::new();
            let result = controller
                .start_session(&mut staged, &status)
                .await
                .map(|_| ());

            link.send_message(match result {
                Ok(()) => Msg::Loaded(staged),
                Err(err) => Msg::Failed(err),
            });
        });
    }

    fn cell_view(&self, ctx: &Context<Self>, coords: game::Coord2) -> Html {
        let label = self
            .board
            .cell_label(coords)
            .unwrap_or(game::RevealState::HIDDEN_LABEL)
            .to_owned();
        let state = self.board.reveal_state(coords).unwrap_or_default();
        let callback = ctx.link().callback(Msg::Reveal);

        html! {
            <CellView {coords} {label} {state} {callback}/>
        }
    }
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = BoardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        let source = JService::new(&props.api, seed);
        let controller =
            game::GameController::with_pool_size(source, seed.rotate_left(32), props.pool_size);

        Self {
            controller: Rc::new(controller),
            board: game::BoardModel::new(),
            busy: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Start if self.busy => {
                log::debug!("already loading, start ignored");
                false
            }
            Start => {
                self.start(ctx);
                true
            }
            Busy(busy) => {
                let changed = self.busy != busy;
                self.busy = busy;
                changed
            }
            Loaded(board) => {
                log::debug!("new board ready");
                self.board = board;
                self.error = None;
                true
            }
            Failed(game::GameError::SessionInProgress) => {
                log::warn!("session start rejected while loading");
                false
            }
            Failed(err) => {
                log::error!("could not load a board: {}", err);
                self.error = Some(err);
                true
            }
            Reveal(coords) => apply_reveal(&mut self.board, self.busy, coords),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (cols, rows) = self.board.size();
        let loaded = self.board.is_loaded();

        let onclick = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Start
        });

        html! {
            <div class="jeopardy">
                <nav>
                    <button id="start" {onclick} disabled={self.busy}>{start_label(loaded)}</button>
                </nav>
                if self.busy {
                    <div id="spin-container"><span class="spinner"/></div>
                }
                if loaded {
                    <table id="jeopardy">
                        <thead>
                            <tr>
                                { for self.board.titles().map(|title| html! { <th>{title.to_owned()}</th> }) }
                            </tr>
                        </thead>
                        <tbody>
                            {
                                for (0..rows).map(|row| html! {
                                    <tr>
                                        { for (0..cols).map(|col| self.cell_view(ctx, (col, row))) }
                                    </tr>
                                })
                            }
                        </tbody>
                    </table>
                }
                if let Some(err) = &self.error {
                    <p class="error">{err.to_string()}</p>
                }
            </div>
        }
    }
}

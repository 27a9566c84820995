use std::rc::Rc;

use serde::Deserialize;
use taskboard_shared::{BoardAction, BoardState, ModalSubject, StatusFilter, TaskDto};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::{
    Callback, Html, Reducible, function_component, html, use_effect_with, use_reducer, use_state,
};

use crate::api;
use crate::components::{ErrorBanner, TaskList, TaskModal, Toolbar};

const APP_CONFIG_TOML: &str = include_str!("../assets/app.toml");
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

// One fixed banner string per operation; transport detail goes to the log.
const LOAD_FAILED: &str = "Failed to load tasks";
const ADD_FAILED: &str = "Failed to add task";
const SAVE_FAILED: &str = "Failed to save task";
const DELETE_FAILED: &str = "Failed to delete task";
const UPDATE_FAILED: &str = "Failed to update task";

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct AppConfig {
    api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

fn load_app_config() -> AppConfig {
    match toml::from_str::<AppConfig>(APP_CONFIG_TOML) {
        Ok(config) if !config.api_base_url.trim().is_empty() => {
            tracing::info!(api_base_url = %config.api_base_url, "loaded app config");
            config
        }
        Ok(_) => {
            tracing::warn!("app config had an empty api_base_url; using the default endpoint");
            AppConfig::default()
        }
        Err(error) => {
            tracing::error!(%error, "failed to parse app config; using the default endpoint");
            AppConfig::default()
        }
    }
}

#[derive(Clone, PartialEq, Default)]
struct Board(BoardState);

impl Reducible for Board {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: BoardAction) -> Rc<Self> {
        let mut next = self.0.clone();
        next.apply(action);
        Rc::new(Self(next))
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(load_app_config);
    let board = use_reducer(Board::default);
    let refresh_tick = use_state(|| 0_u64);

    {
        let board = board.clone();
        let config = config.clone();
        use_effect_with(*refresh_tick, move |tick| {
            let board = board.clone();
            let base = config.api_base_url.clone();
            let tick = *tick;

            spawn_local(async move {
                tracing::info!(tick, "refreshing task list");

                match api::fetch_tasks(&base).await {
                    Ok(list) => {
                        tracing::debug!(total = list.len(), "task list refreshed");
                        board.dispatch(BoardAction::ListFinished(Ok(list)));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "task list fetch failed");
                        board.dispatch(BoardAction::ListFinished(Err(LOAD_FAILED.to_string())));
                    }
                }
            });

            || ()
        });
    }

    let bump_refresh = {
        let refresh_tick = refresh_tick.clone();
        Callback::from(move |_: ()| {
            refresh_tick.set((*refresh_tick).saturating_add(1));
        })
    };

    let on_search = {
        let board = board.clone();
        Callback::from(move |value: String| {
            board.dispatch(BoardAction::SearchChanged(value));
        })
    };

    let on_filter = {
        let board = board.clone();
        Callback::from(move |filter: StatusFilter| {
            tracing::debug!(filter = %filter.as_key(), "status filter changed");
            board.dispatch(BoardAction::FilterChanged(filter));
        })
    };

    let on_add = {
        let board = board.clone();
        Callback::from(move |_: MouseEvent| {
            board.dispatch(BoardAction::OpenCreate);
        })
    };

    let on_edit = {
        let board = board.clone();
        Callback::from(move |task: TaskDto| {
            board.dispatch(BoardAction::OpenEdit(task));
        })
    };

    let on_delete = {
        let board = board.clone();
        let config = config.clone();
        let bump_refresh = bump_refresh.clone();
        Callback::from(move |id: String| {
            let board = board.clone();
            let base = config.api_base_url.clone();
            let bump_refresh = bump_refresh.clone();

            spawn_local(async move {
                match api::delete_task(&base, &id).await {
                    Ok(()) => bump_refresh.emit(()),
                    Err(err) => {
                        tracing::error!(error = %err, %id, "task delete failed");
                        board.dispatch(BoardAction::Failed(DELETE_FAILED.to_string()));
                    }
                }
            });
        })
    };

    let on_toggle = {
        let board = board.clone();
        let config = config.clone();
        let bump_refresh = bump_refresh.clone();
        Callback::from(move |id: String| {
            // Toggle is an update built from the local snapshot; a task
            // that is no longer in it fails visibly instead of no-opping.
            let Some(replacement) = board.0.toggled_replacement(&id) else {
                tracing::warn!(%id, "toggle requested for a task missing from the local snapshot");
                board.dispatch(BoardAction::Failed(UPDATE_FAILED.to_string()));
                return;
            };

            let board = board.clone();
            let base = config.api_base_url.clone();
            let bump_refresh = bump_refresh.clone();

            spawn_local(async move {
                match api::update_task(&base, &replacement).await {
                    Ok(()) => bump_refresh.emit(()),
                    Err(err) => {
                        tracing::error!(error = %err, %id, "task toggle failed");
                        board.dispatch(BoardAction::Failed(UPDATE_FAILED.to_string()));
                    }
                }
            });
        })
    };

    let on_modal_submit = {
        let board = board.clone();
        let config = config.clone();
        let bump_refresh = bump_refresh.clone();
        Callback::from(move |_: ()| match board.0.modal.clone() {
            ModalSubject::Closed => {
                tracing::warn!("submit fired with no modal subject");
            }
            ModalSubject::Creating(draft) => {
                if draft.name.trim().is_empty() {
                    tracing::warn!("ignored submit with an empty task name");
                    return;
                }

                let board = board.clone();
                let base = config.api_base_url.clone();
                let bump_refresh = bump_refresh.clone();

                spawn_local(async move {
                    match api::create_task(&base, &draft).await {
                        Ok(()) => {
                            board.dispatch(BoardAction::SubmitSucceeded);
                            bump_refresh.emit(());
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "task create failed");
                            board.dispatch(BoardAction::Failed(ADD_FAILED.to_string()));
                        }
                    }
                });
            }
            ModalSubject::Editing(task) => {
                if task.name.trim().is_empty() {
                    tracing::warn!(id = %task.id, "ignored submit with an empty task name");
                    return;
                }

                let board = board.clone();
                let base = config.api_base_url.clone();
                let bump_refresh = bump_refresh.clone();

                spawn_local(async move {
                    match api::update_task(&base, &task).await {
                        Ok(()) => {
                            board.dispatch(BoardAction::SubmitSucceeded);
                            bump_refresh.emit(());
                        }
                        Err(err) => {
                            tracing::error!(error = %err, id = %task.id, "task save failed");
                            board.dispatch(BoardAction::Failed(SAVE_FAILED.to_string()));
                        }
                    }
                });
            }
        })
    };

    let on_modal_close = {
        let board = board.clone();
        Callback::from(move |_: ()| {
            board.dispatch(BoardAction::CloseModal);
        })
    };

    let on_name_input = {
        let board = board.clone();
        Callback::from(move |value: String| {
            board.dispatch(BoardAction::NameChanged(value));
        })
    };

    let on_assignee_input = {
        let board = board.clone();
        Callback::from(move |value: String| {
            board.dispatch(BoardAction::AssigneeChanged(value));
        })
    };

    let state = &board.0;
    let visible_tasks = state.visible_tasks();

    html! {
        <div class="taskboard">
            <h1 class="app-title">{ "TaskBoard" }</h1>
            <Toolbar
                search_term={state.search_term.clone()}
                filter={state.filter}
                on_search={on_search}
                on_filter={on_filter}
                on_add={on_add}
            />
            <ErrorBanner message={state.error.clone()} />
            {
                if state.is_loading {
                    html! { <div class="loading">{ "Loading tasks..." }</div> }
                } else {
                    html! {
                        <TaskList
                            tasks={visible_tasks}
                            on_toggle={on_toggle}
                            on_edit={on_edit}
                            on_delete={on_delete}
                        />
                    }
                }
            }
            <TaskModal
                subject={state.modal.clone()}
                on_name_input={on_name_input}
                on_assignee_input={on_assignee_input}
                on_submit={on_modal_submit}
                on_close={on_modal_close}
            />
        </div>
    }
}

use taskboard_shared::{ModalSubject, StatusFilter, TaskDto};
use web_sys::{HtmlInputElement, InputEvent, MouseEvent};
use yew::{Callback, Html, Properties, TargetCast, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
    pub search_term: String,
    pub filter: StatusFilter,
    pub on_search: Callback<String>,
    pub on_filter: Callback<StatusFilter>,
    pub on_add: Callback<MouseEvent>,
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let on_search_input = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_search.emit(input.value());
        })
    };

    let filter_button = |choice: StatusFilter| {
        let active = props.filter == choice;
        let on_filter = props.on_filter.clone();
        html! {
            <button
                class={classes!("btn", "filter-btn", active.then_some("active"))}
                onclick={move |_| on_filter.emit(choice)}
            >
                { choice.label() }
            </button>
        }
    };

    html! {
        <div class="toolbar">
            <input
                class="search"
                placeholder="Search tasks..."
                value={props.search_term.clone()}
                oninput={on_search_input}
            />
            <div class="filters">
                { for StatusFilter::all().into_iter().map(filter_button) }
            </div>
            <button class="btn add" onclick={props.on_add.clone()}>{ "Add Task" }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: Option<String>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };

    html! {
        <div class="error-banner">
            <span class="error-icon">{ "\u{26a0}" }</span>
            <span>{ message }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
    pub tasks: Vec<TaskDto>,
    pub on_toggle: Callback<String>,
    pub on_edit: Callback<TaskDto>,
    pub on_delete: Callback<String>,
}

#[function_component(TaskList)]
pub fn task_list(props: &TaskListProps) -> Html {
    html! {
        <ul class="task-list">
            {
                for props.tasks.iter().cloned().map(|task| {
                    let key = task.id.clone();
                    html! {
                        <TaskListRow
                            key={key}
                            task={task}
                            on_toggle={props.on_toggle.clone()}
                            on_edit={props.on_edit.clone()}
                            on_delete={props.on_delete.clone()}
                        />
                    }
                })
            }
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
    pub task: TaskDto,
    pub on_toggle: Callback<String>,
    pub on_edit: Callback<TaskDto>,
    pub on_delete: Callback<String>,
}

#[function_component(TaskListRow)]
pub fn task_list_row(props: &TaskListRowProps) -> Html {
    let row_class = if props.task.completed { "row done" } else { "row" };

    let on_toggle_click = {
        let on_toggle = props.on_toggle.clone();
        let id = props.task.id.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(id.clone()))
    };
    let on_edit_click = {
        let on_edit = props.on_edit.clone();
        let task = props.task.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(task.clone()))
    };
    let on_delete_click = {
        let on_delete = props.on_delete.clone();
        let id = props.task.id.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
    };

    let toggle_class = if props.task.completed {
        "btn toggle on"
    } else {
        "btn toggle"
    };

    html! {
        <li class={row_class}>
            <div class="row-body">
                <div class="task-name">{ &props.task.name }</div>
                <div class="task-assignee">{ format!("Assigned to: {}", props.task.assignee) }</div>
            </div>
            <div class="row-actions">
                <button class={toggle_class} onclick={on_toggle_click} title="Toggle complete">
                    { "\u{2713}" }
                </button>
                <button class="btn" onclick={on_edit_click}>{ "Edit" }</button>
                <button class="btn danger" onclick={on_delete_click}>{ "Delete" }</button>
            </div>
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
    pub subject: ModalSubject,
    pub on_name_input: Callback<String>,
    pub on_assignee_input: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(TaskModal)]
pub fn task_modal(props: &TaskModalProps) -> Html {
    if !props.subject.is_open() {
        return html! {};
    }

    let header = match &props.subject {
        ModalSubject::Editing(_) => "Edit Task",
        _ => "Add Task",
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    // Clicks inside the dialog must not reach the dismissing backdrop.
    let stop_bubble = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_cancel_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_save_click = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: MouseEvent| on_submit.emit(()))
    };
    let on_name = {
        let on_name_input = props.on_name_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_name_input.emit(input.value());
        })
    };
    let on_assignee = {
        let on_assignee_input = props.on_assignee_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_assignee_input.emit(input.value());
        })
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={stop_bubble}>
                <button class="modal-close" onclick={on_close_click} title="Close">
                    { "\u{00d7}" }
                </button>
                <div class="header">{ header }</div>
                <div class="content">
                    <div class="field">
                        <label>{ "Name" }</label>
                        <input
                            value={props.subject.draft_name().to_string()}
                            placeholder="e.g. Review the report"
                            oninput={on_name}
                        />
                    </div>
                    <div class="field">
                        <label>{ "Assignee" }</label>
                        <input
                            value={props.subject.draft_assignee().to_string()}
                            placeholder="e.g. Ana"
                            oninput={on_assignee}
                        />
                    </div>
                    <div class="footer">
                        <button class="btn" onclick={on_cancel_click}>{ "Cancel" }</button>
                        <button class="btn primary" onclick={on_save_click}>{ "Save" }</button>
                    </div>
                </div>
            </div>
        </div>
    }
}

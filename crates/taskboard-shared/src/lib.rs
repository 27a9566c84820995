use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub completed: bool,
}

// Creation draft and POST body. The type has no id field, so a create
// request structurally cannot carry one; the backend assigns ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskCreate {
    pub name: String,
    pub assignee: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn all() -> [Self; 3] {
        [Self::All, Self::Completed, Self::Pending]
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "all" => Some(Self::All),
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn matches(self, task: &TaskDto) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
        }
    }
}

// The modal holds at most one subject: a creation draft or a full copy of
// the task being edited. Closing discards it either way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModalSubject {
    Closed,
    Creating(TaskCreate),
    Editing(TaskDto),
}

impl ModalSubject {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn draft_name(&self) -> &str {
        match self {
            Self::Closed => "",
            Self::Creating(draft) => &draft.name,
            Self::Editing(task) => &task.name,
        }
    }

    pub fn draft_assignee(&self) -> &str {
        match self {
            Self::Closed => "",
            Self::Creating(draft) => &draft.assignee,
            Self::Editing(task) => &task.assignee,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    OpenCreate,
    OpenEdit(TaskDto),
    CloseModal,
    NameChanged(String),
    AssigneeChanged(String),
    SearchChanged(String),
    FilterChanged(StatusFilter),
    ListFinished(Result<Vec<TaskDto>, String>),
    SubmitSucceeded,
    Failed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardState {
    pub tasks: Vec<TaskDto>,
    pub modal: ModalSubject,
    pub is_loading: bool,
    pub error: Option<String>,
    pub search_term: String,
    pub filter: StatusFilter,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            modal: ModalSubject::Closed,
            // Cleared by the first ListFinished; later refreshes never
            // set it again.
            is_loading: true,
            error: None,
            search_term: String::new(),
            filter: StatusFilter::All,
        }
    }
}

impl BoardState {
    pub fn apply(&mut self, action: BoardAction) {
        match action {
            BoardAction::OpenCreate => {
                if self.modal.is_open() {
                    tracing::warn!("ignored add request while the modal is open");
                    return;
                }
                self.modal = ModalSubject::Creating(TaskCreate::default());
            }
            BoardAction::OpenEdit(task) => {
                if self.modal.is_open() {
                    tracing::warn!(id = %task.id, "ignored edit request while the modal is open");
                    return;
                }
                self.modal = ModalSubject::Editing(task);
            }
            BoardAction::CloseModal => {
                self.modal = ModalSubject::Closed;
            }
            BoardAction::NameChanged(value) => match &mut self.modal {
                ModalSubject::Creating(draft) => draft.name = value,
                ModalSubject::Editing(task) => task.name = value,
                ModalSubject::Closed => {
                    tracing::warn!("ignored name input with no modal subject");
                }
            },
            BoardAction::AssigneeChanged(value) => match &mut self.modal {
                ModalSubject::Creating(draft) => draft.assignee = value,
                ModalSubject::Editing(task) => task.assignee = value,
                ModalSubject::Closed => {
                    tracing::warn!("ignored assignee input with no modal subject");
                }
            },
            BoardAction::SearchChanged(value) => {
                self.search_term = value;
            }
            BoardAction::FilterChanged(filter) => {
                self.filter = filter;
            }
            BoardAction::ListFinished(Ok(tasks)) => {
                self.tasks = tasks;
                self.error = None;
                self.is_loading = false;
            }
            BoardAction::ListFinished(Err(message)) => {
                // Keep the previous snapshot; the list is only ever
                // replaced by a successful fetch.
                self.error = Some(message);
                self.is_loading = false;
            }
            BoardAction::SubmitSucceeded => {
                self.modal = ModalSubject::Closed;
            }
            BoardAction::Failed(message) => {
                self.error = Some(message);
            }
        }
    }

    // Full replacement for toggle-complete, built from the local
    // snapshot. None when the id is not in it.
    pub fn toggled_replacement(&self, id: &str) -> Option<TaskDto> {
        self.tasks.iter().find(|task| task.id == id).map(|task| {
            let mut next = task.clone();
            next.completed = !next.completed;
            next
        })
    }

    pub fn visible_tasks(&self) -> Vec<TaskDto> {
        filter_visible_tasks(&self.tasks, &self.search_term, self.filter)
    }
}

pub fn filter_visible_tasks(
    tasks: &[TaskDto],
    query: &str,
    filter: StatusFilter,
) -> Vec<TaskDto> {
    let q = query.to_lowercase();

    tasks
        .iter()
        .filter(|task| {
            if !q.is_empty() {
                let name_match = task.name.to_lowercase().contains(&q);
                let assignee_match = task.assignee.to_lowercase().contains(&q);
                if !name_match && !assignee_match {
                    return false;
                }
            }

            filter.matches(task)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod board_tests {
    use super::*;

    fn task(id: &str, name: &str, assignee: &str, completed: bool) -> TaskDto {
        TaskDto {
            id: id.to_string(),
            name: name.to_string(),
            assignee: assignee.to_string(),
            completed,
        }
    }

    fn sample_tasks() -> Vec<TaskDto> {
        vec![
            task("1", "Write report", "Ana", false),
            task("2", "Call client", "Bob", true),
            task("3", "Review budget", "Ana", false),
            task("4", "Ship release", "Carla", true),
        ]
    }

    #[test]
    fn projection_is_pure_and_idempotent() {
        let tasks = sample_tasks();
        let first = filter_visible_tasks(&tasks, "an", StatusFilter::Pending);
        let second = filter_visible_tasks(&tasks, "an", StatusFilter::Pending);
        assert_eq!(first, second);
        assert_eq!(tasks, sample_tasks());
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let tasks = vec![task("1", "Report", "Ana", false)];
        for term in ["report", "REPORT", "Report"] {
            let visible = filter_visible_tasks(&tasks, term, StatusFilter::All);
            assert_eq!(visible.len(), 1, "term {term:?} should match");
        }
    }

    #[test]
    fn search_matches_assignee_case_insensitively() {
        let tasks = vec![task("1", "Write report", "Ana", false)];
        let visible = filter_visible_tasks(&tasks, "ana", StatusFilter::All);
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn search_miss_yields_empty_projection() {
        let visible = filter_visible_tasks(&sample_tasks(), "zzz", StatusFilter::All);
        assert!(visible.is_empty());
    }

    #[test]
    fn completed_and_pending_partition_the_all_set() {
        let tasks = sample_tasks();
        let all = filter_visible_tasks(&tasks, "", StatusFilter::All);
        let completed = filter_visible_tasks(&tasks, "", StatusFilter::Completed);
        let pending = filter_visible_tasks(&tasks, "", StatusFilter::Pending);

        assert_eq!(completed.len() + pending.len(), all.len());
        for entry in &completed {
            assert!(!pending.iter().any(|other| other.id == entry.id));
        }
    }

    #[test]
    fn empty_search_term_preserves_the_filtered_set_and_order() {
        let tasks = sample_tasks();
        let all = filter_visible_tasks(&tasks, "", StatusFilter::All);
        assert_eq!(all, tasks);
    }

    #[test]
    fn single_pending_task_is_visible_under_all() {
        let tasks = vec![task("1", "Write report", "Ana", false)];
        let visible = filter_visible_tasks(&tasks, "", StatusFilter::All);
        assert_eq!(visible, tasks);
    }

    #[test]
    fn single_pending_task_is_hidden_under_completed() {
        let tasks = vec![task("1", "Write report", "Ana", false)];
        let visible = filter_visible_tasks(&tasks, "", StatusFilter::Completed);
        assert!(visible.is_empty());
    }

    #[test]
    fn toggled_replacement_is_an_involution() {
        let mut state = BoardState::default();
        state.apply(BoardAction::ListFinished(Ok(sample_tasks())));

        let once = state.toggled_replacement("1").expect("task 1 is present");
        assert!(once.completed);

        let mut toggled_state = state.clone();
        toggled_state.apply(BoardAction::ListFinished(Ok(vec![once.clone()])));
        let twice = toggled_state
            .toggled_replacement("1")
            .expect("task 1 is still present");
        assert_eq!(twice, task("1", "Write report", "Ana", false));
    }

    #[test]
    fn toggled_replacement_misses_unknown_ids() {
        let mut state = BoardState::default();
        state.apply(BoardAction::ListFinished(Ok(sample_tasks())));
        assert!(state.toggled_replacement("missing").is_none());
    }

    #[test]
    fn list_failure_keeps_the_previous_snapshot() {
        let mut state = BoardState::default();
        state.apply(BoardAction::ListFinished(Ok(sample_tasks())));
        state.apply(BoardAction::ListFinished(Err("Failed to load tasks".to_string())));

        assert_eq!(state.tasks, sample_tasks());
        assert_eq!(state.error.as_deref(), Some("Failed to load tasks"));
        assert!(!state.is_loading);
    }

    #[test]
    fn operation_failure_never_mutates_the_collection() {
        let mut state = BoardState::default();
        state.apply(BoardAction::ListFinished(Ok(sample_tasks())));
        state.apply(BoardAction::Failed("Failed to delete task".to_string()));

        assert_eq!(state.tasks, sample_tasks());
        assert_eq!(state.error.as_deref(), Some("Failed to delete task"));
    }

    #[test]
    fn list_success_clears_a_stale_error() {
        let mut state = BoardState::default();
        state.apply(BoardAction::Failed("Failed to add task".to_string()));
        state.apply(BoardAction::ListFinished(Ok(sample_tasks())));
        assert!(state.error.is_none());
    }

    #[test]
    fn initial_list_clears_loading_on_either_outcome() {
        let mut ok_state = BoardState::default();
        assert!(ok_state.is_loading);
        ok_state.apply(BoardAction::ListFinished(Ok(Vec::new())));
        assert!(!ok_state.is_loading);

        let mut err_state = BoardState::default();
        err_state.apply(BoardAction::ListFinished(Err("Failed to load tasks".to_string())));
        assert!(!err_state.is_loading);
    }

    #[test]
    fn add_opens_an_empty_creation_draft() {
        let mut state = BoardState::default();
        state.apply(BoardAction::OpenCreate);
        assert_eq!(state.modal, ModalSubject::Creating(TaskCreate::default()));
    }

    #[test]
    fn edit_captures_a_copy_of_the_target() {
        let target = task("2", "Call client", "Bob", true);
        let mut state = BoardState::default();
        state.apply(BoardAction::ListFinished(Ok(sample_tasks())));
        state.apply(BoardAction::OpenEdit(target.clone()));

        assert_eq!(state.modal, ModalSubject::Editing(target));
    }

    #[test]
    fn opening_over_an_open_modal_is_ignored() {
        let mut state = BoardState::default();
        state.apply(BoardAction::OpenCreate);
        state.apply(BoardAction::OpenEdit(task("1", "Write report", "Ana", false)));

        assert_eq!(state.modal, ModalSubject::Creating(TaskCreate::default()));

        state.apply(BoardAction::CloseModal);
        state.apply(BoardAction::OpenEdit(task("1", "Write report", "Ana", false)));
        state.apply(BoardAction::OpenCreate);
        assert!(matches!(state.modal, ModalSubject::Editing(_)));
    }

    #[test]
    fn closing_the_modal_leaves_the_rest_of_the_page_state() {
        let mut state = BoardState::default();
        state.apply(BoardAction::ListFinished(Ok(sample_tasks())));
        state.apply(BoardAction::SearchChanged("ana".to_string()));
        state.apply(BoardAction::FilterChanged(StatusFilter::Pending));
        state.apply(BoardAction::OpenCreate);
        state.apply(BoardAction::NameChanged("Half-typed".to_string()));
        state.apply(BoardAction::CloseModal);

        assert_eq!(state.modal, ModalSubject::Closed);
        assert_eq!(state.tasks, sample_tasks());
        assert_eq!(state.search_term, "ana");
        assert_eq!(state.filter, StatusFilter::Pending);
    }

    #[test]
    fn successful_submit_closes_and_the_next_draft_starts_empty() {
        let mut state = BoardState::default();
        state.apply(BoardAction::OpenCreate);
        state.apply(BoardAction::NameChanged("Call client".to_string()));
        state.apply(BoardAction::AssigneeChanged("Bob".to_string()));
        state.apply(BoardAction::SubmitSucceeded);
        assert_eq!(state.modal, ModalSubject::Closed);

        state.apply(BoardAction::OpenCreate);
        assert_eq!(state.modal, ModalSubject::Creating(TaskCreate::default()));
    }

    #[test]
    fn failed_submit_preserves_the_draft_for_retry() {
        let mut state = BoardState::default();
        state.apply(BoardAction::OpenCreate);
        state.apply(BoardAction::NameChanged("Call client".to_string()));
        state.apply(BoardAction::Failed("Failed to add task".to_string()));

        assert_eq!(state.modal.draft_name(), "Call client");
        assert_eq!(state.error.as_deref(), Some("Failed to add task"));
    }

    #[test]
    fn draft_edits_route_to_the_active_subject() {
        let mut state = BoardState::default();
        state.apply(BoardAction::ListFinished(Ok(sample_tasks())));
        state.apply(BoardAction::OpenEdit(task("3", "Review budget", "Ana", false)));
        state.apply(BoardAction::NameChanged("Review annual budget".to_string()));

        assert_eq!(state.modal.draft_name(), "Review annual budget");
        // The collection itself only changes through a refetch.
        assert_eq!(state.tasks, sample_tasks());
    }

    #[test]
    fn filter_keys_round_trip() {
        for filter in StatusFilter::all() {
            assert_eq!(StatusFilter::from_key(filter.as_key()), Some(filter));
        }
        assert_eq!(StatusFilter::from_key("archived"), None);
    }

    #[test]
    fn task_dto_decodes_a_backend_document() {
        let decoded: TaskDto = serde_json::from_str(
            r#"{"id":"65f2a0c4e13b4a2f9c1d0e77","name":"Write report","assignee":"Ana","completed":false}"#,
        )
        .expect("backend document should decode");

        assert_eq!(decoded.id, "65f2a0c4e13b4a2f9c1d0e77");
        assert_eq!(decoded.name, "Write report");
        assert_eq!(decoded.assignee, "Ana");
        assert!(!decoded.completed);
    }

    #[test]
    fn create_body_carries_no_id() {
        let body = serde_json::to_value(TaskCreate {
            name: "Call client".to_string(),
            assignee: "Bob".to_string(),
            completed: false,
        })
        .expect("draft should serialize");

        let object = body.as_object().expect("body is a JSON object");
        assert!(!object.contains_key("id"));
        assert_eq!(object.len(), 3);
    }

    #[test]
    fn board_state_round_trips_through_json() {
        let mut state = BoardState::default();
        state.apply(BoardAction::ListFinished(Ok(sample_tasks())));
        state.apply(BoardAction::SearchChanged("report".to_string()));
        state.apply(BoardAction::OpenEdit(task("1", "Write report", "Ana", false)));

        let raw = serde_json::to_string(&state).expect("state should serialize");
        let restored: BoardState = serde_json::from_str(&raw).expect("state should deserialize");
        assert_eq!(restored, state);
    }
}

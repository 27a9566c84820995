use gloo::net::http::{Request, Response};
use taskboard_shared::{TaskCreate, TaskDto};

fn tasks_url(base: &str) -> String {
    format!("{}/tasks", base.trim_end_matches('/'))
}

fn task_url(base: &str, id: &str) -> String {
    format!("{}/{id}", tasks_url(base))
}

// Any non-2xx status is one uniform failure; failure bodies are never
// parsed.
fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        Ok(response)
    } else {
        Err(format!("unexpected status {}", response.status()))
    }
}

pub async fn fetch_tasks(base: &str) -> Result<Vec<TaskDto>, String> {
    let response = Request::get(&tasks_url(base))
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    check(response)?
        .json::<Vec<TaskDto>>()
        .await
        .map_err(|e| format!("decode failed: {e}"))
}

pub async fn create_task(base: &str, draft: &TaskCreate) -> Result<(), String> {
    let response = Request::post(&tasks_url(base))
        .json(draft)
        .map_err(|e| format!("encode failed: {e}"))?
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    // The success body is ignored; the follow-up refetch is authoritative.
    check(response).map(|_| ())
}

pub async fn update_task(base: &str, task: &TaskDto) -> Result<(), String> {
    let response = Request::put(&task_url(base, &task.id))
        .json(task)
        .map_err(|e| format!("encode failed: {e}"))?
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    check(response).map(|_| ())
}

pub async fn delete_task(base: &str, id: &str) -> Result<(), String> {
    let response = Request::delete(&task_url(base, id))
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    check(response).map(|_| ())
}

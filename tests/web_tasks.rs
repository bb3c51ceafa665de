mod common;

#[cfg(test)]
mod tests {
    use crate::common::AppContext;
    use axum::http::StatusCode;
    use chrono::Utc;
    use taskdir::db::directories::Directories;
    use taskdir::db::tasks::Tasks;
    use taskdir::libs::directory::Directory;
    use taskdir::libs::task::{Task, TaskFilter};
    use test_context::test_context;

    async fn all_tasks(ctx: &AppContext) -> Vec<Task> {
        ctx.store.transaction(|tx| Tasks::new(tx).fetch(&TaskFilter::default())).await.unwrap()
    }

    async fn task(ctx: &AppContext, id: i64) -> Option<Task> {
        ctx.store.transaction(move |tx| Tasks::new(tx).get_by_id(id)).await.unwrap()
    }

    async fn create_directory(ctx: &AppContext, name: &str) -> i64 {
        let directory = Directory::new(name);
        ctx.store.transaction(move |tx| Directories::new(tx).insert(&directory)).await.unwrap()
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_create_task_then_list(ctx: &mut AppContext) {
        let session = ctx.session();
        let response = ctx
            .post(
                &session,
                "/todo",
                &[("title", "Buy milk"), ("due_date", "2025-01-02 08:00"), ("tag", "home"), ("directory_id", "0")],
            )
            .await;
        response.assert_redirect("/");

        let tasks = all_tasks(ctx).await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].tag.as_deref(), Some("home"));
        assert_eq!(tasks[0].directory_id, None);
        assert!(!tasks[0].completed);
        assert!(!tasks[0].deleted);

        let page = ctx.get(&session, "/?status=active").await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("Buy milk"));
        assert!(page.body.contains("2025-01-02 08:00"));
        assert!(page.body.contains("flash-success"));
        assert!(page.body.contains("Task saved."));
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_flash_is_shown_once(ctx: &mut AppContext) {
        let session = ctx.session();
        ctx.post(&session, "/todo", &[("title", "Once")]).await.assert_redirect("/");

        assert!(ctx.get(&session, "/").await.body.contains("Task saved."));
        assert!(!ctx.get(&session, "/").await.body.contains("Task saved."));
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_missing_due_date_defaults_to_request_time(ctx: &mut AppContext) {
        let session = ctx.session();
        let before = Utc::now().naive_utc();
        ctx.post(&session, "/todo", &[("title", "No date")]).await.assert_redirect("/");

        let tasks = all_tasks(ctx).await;
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].due_date >= before);
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_empty_title_rerenders_form(ctx: &mut AppContext) {
        let session = ctx.session();
        let response = ctx.post(&session, "/todo", &[("title", "   "), ("tag", "keep-me")]).await;

        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains(r#"data-field="title""#));
        assert!(response.body.contains("This field is required."));
        assert!(response.body.contains("keep-me"));
        assert!(all_tasks(ctx).await.is_empty());
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_invalid_due_date_rerenders_form(ctx: &mut AppContext) {
        let session = ctx.session();
        let response = ctx.post(&session, "/todo", &[("title", "Dated"), ("due_date", "tomorrow")]).await;

        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains(r#"data-field="due_date""#));
        assert!(all_tasks(ctx).await.is_empty());
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_unknown_directory_is_rejected(ctx: &mut AppContext) {
        let session = ctx.session();
        let response = ctx.post(&session, "/todo", &[("title", "Filed"), ("directory_id", "42")]).await;

        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Not a valid choice."));
        assert!(all_tasks(ctx).await.is_empty());
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_filter_by_directory(ctx: &mut AppContext) {
        let session = ctx.session();
        let work = create_directory(ctx, "Work").await;
        let work_id = work.to_string();

        ctx.post(&session, "/todo", &[("title", "Write report"), ("directory_id", work_id.as_str())]).await.assert_redirect("/");
        ctx.post(&session, "/todo", &[("title", "Loose end")]).await.assert_redirect("/");

        let page = ctx.get(&session, &format!("/?directory={}", work)).await;
        assert!(page.body.contains("Write report"));
        assert!(!page.body.contains("Loose end"));

        let tasks = all_tasks(ctx).await;
        let filed: Vec<_> = tasks.iter().filter(|t| t.directory_id == Some(work)).collect();
        assert_eq!(filed.len(), 1);
        assert_eq!(filed[0].title, "Write report");
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_update_existing_task(ctx: &mut AppContext) {
        let session = ctx.session();
        let work = create_directory(ctx, "Work").await;
        let work_id = work.to_string();
        ctx.post(&session, "/todo", &[("title", "Draft"), ("directory_id", work_id.as_str())]).await;
        let id = all_tasks(ctx).await[0].id.unwrap();
        let task_id = id.to_string();

        let edit = ctx.get(&session, &format!("/todo/{}/edit", id)).await;
        assert_eq!(edit.status, StatusCode::OK);
        assert!(edit.body.contains("Draft"));
        assert!(edit.body.contains(&format!(r#"<option value="{}" selected>Work</option>"#, work)));

        let response = ctx
            .post(
                &session,
                "/todo",
                &[("id", task_id.as_str()), ("title", "Final"), ("due_date", "2025-03-15 14:30"), ("directory_id", "0")],
            )
            .await;
        response.assert_redirect("/");

        let tasks = all_tasks(ctx).await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Final");
        assert_eq!(tasks[0].directory_id, None);
        assert_eq!(tasks[0].due_date.format("%Y-%m-%dT%H:%M").to_string(), "2025-03-15T14:30");

        let page = ctx.get(&session, "/?status=all").await;
        assert!(page.body.contains("2025-03-15 14:30"));
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_update_of_missing_task_creates_nothing(ctx: &mut AppContext) {
        let session = ctx.session();
        let response = ctx.post(&session, "/todo", &[("id", "999"), ("title", "Ghost")]).await;
        response.assert_redirect("/");
        assert!(all_tasks(ctx).await.is_empty());

        let page = ctx.get(&session, "/").await;
        assert!(page.body.contains("flash-danger"));
        assert!(page.body.contains("The requested task does not exist."));
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_toggle_twice_restores_state(ctx: &mut AppContext) {
        let session = ctx.session();
        ctx.post(&session, "/todo", &[("title", "Flip")]).await;
        let id = all_tasks(ctx).await[0].id.unwrap();
        let uri = format!("/todo/{}/toggle", id);

        ctx.post(&session, &uri, &[]).await.assert_redirect("/");
        assert!(task(ctx, id).await.unwrap().completed);
        assert!(ctx.get(&session, "/").await.body.contains("Task status updated."));

        ctx.post(&session, &uri, &[]).await.assert_redirect("/");
        assert!(!task(ctx, id).await.unwrap().completed);
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_soft_delete_is_idempotent(ctx: &mut AppContext) {
        let session = ctx.session();
        ctx.post(&session, "/todo", &[("title", "Trash")]).await;
        let id = all_tasks(ctx).await[0].id.unwrap();
        let uri = format!("/todo/{}/delete", id);

        ctx.post(&session, &uri, &[]).await.assert_redirect("/");
        ctx.post(&session, &uri, &[]).await.assert_redirect("/");

        let stored = task(ctx, id).await.unwrap();
        assert!(stored.deleted);
        assert_eq!(stored.title, "Trash");

        let page = ctx.get(&session, "/?status=deleted").await;
        assert!(page.body.contains("flash-warning"));
        assert!(page.body.contains("Trash"));
        assert!(!ctx.get(&session, "/?status=active").await.body.contains("Trash"));
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_unknown_ids_are_not_found(ctx: &mut AppContext) {
        let session = ctx.session();
        assert_eq!(ctx.get(&session, "/todo/77/edit").await.status, StatusCode::NOT_FOUND);
        assert_eq!(ctx.post(&session, "/todo/77/toggle", &[]).await.status, StatusCode::NOT_FOUND);
        assert_eq!(ctx.post(&session, "/todo/77/delete", &[]).await.status, StatusCode::NOT_FOUND);
        assert_eq!(ctx.get(&session, "/todo/abc/edit").await.status, StatusCode::BAD_REQUEST);
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_post_without_token_is_forbidden(ctx: &mut AppContext) {
        let session = ctx.session();
        let response = ctx.post_raw(&session, "/todo", &[("title", "Forged")]).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);

        let response = ctx.post_raw(&session, "/todo", &[("title", "Forged"), ("csrf_token", "x".repeat(64).as_str())]).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert!(all_tasks(ctx).await.is_empty());
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_token_from_other_session_is_forbidden(ctx: &mut AppContext) {
        let session = ctx.session();
        let other = ctx.session();
        let token = other.csrf_token();

        let response = ctx.post_raw(&session, "/todo", &[("title", "Forged"), ("csrf_token", token.as_str())]).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert!(all_tasks(ctx).await.is_empty());
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_new_form_has_defaults(ctx: &mut AppContext) {
        let session = ctx.session();
        let page = ctx.get(&session, "/todo").await;

        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains(r#"name="csrf_token""#));
        assert!(page.body.contains(r#"<option value="0" selected>Unfiled</option>"#));
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_unknown_status_lists_everything(ctx: &mut AppContext) {
        let session = ctx.session();
        ctx.post(&session, "/todo", &[("title", "Visible")]).await;

        let page = ctx.get(&session, "/?status=bogus").await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("Visible"));
        assert!(page.body.contains(r#"<option value="all" selected>"#));
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_concurrent_toggles_of_different_tasks(ctx: &mut AppContext) {
        let session = ctx.session();
        ctx.post(&session, "/todo", &[("title", "First"), ("due_date", "2025-01-01 09:00")]).await;
        ctx.post(&session, "/todo", &[("title", "Second"), ("due_date", "2025-01-02 09:00")]).await;
        let ids: Vec<i64> = all_tasks(ctx).await.iter().filter_map(|t| t.id).collect();
        let first = format!("/todo/{}/toggle", ids[0]);
        let second = format!("/todo/{}/toggle", ids[1]);

        let ctx = &*ctx;
        let (a, b) = tokio::join!(ctx.post(&session, &first, &[]), ctx.post(&session, &second, &[]));
        a.assert_redirect("/");
        b.assert_redirect("/");
        assert!(all_tasks(ctx).await.iter().all(|t| t.completed));
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_tag_filter_matches_raw_value(ctx: &mut AppContext) {
        let session = ctx.session();
        ctx.post(&session, "/todo", &[("title", "Groceries"), ("tag", "home")]).await.assert_redirect("/");

        assert!(ctx.get(&session, "/?tag=om").await.body.contains("Groceries"));
        assert!(!ctx.get(&session, "/?tag=%20home").await.body.contains("Groceries"));
        assert!(ctx.get(&session, "/?tag=").await.body.contains("Groceries"));
    }

    #[test_context(AppContext)]
    #[tokio::test]
    async fn test_long_description_is_accepted(ctx: &mut AppContext) {
        let session = ctx.session();
        let description = "x".repeat(200 * 1024);
        ctx.post(&session, "/todo", &[("title", "Notes"), ("description", description.as_str())])
            .await
            .assert_redirect("/");

        let tasks = all_tasks(ctx).await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description.as_deref().map(str::len), Some(200 * 1024));
    }
}

#[cfg(test)]
mod tests {
    use crate::helpers::{TestApp, make_test_app};
    use db::models::feedback::NewFeedback;
    use db::repositories::feedback_repository::FeedbackRepository;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    async fn submit(app: &TestApp, body: Value) -> i64 {
        let (status, json) = app.post_json("/feedback", &body).await;
        assert_eq!(status, StatusCode::CREATED.as_u16(), "{json}");
        json["id"].as_i64().unwrap()
    }

    async fn seed(app: &TestApp) -> Vec<i64> {
        vec![
            submit(app, json!({ "presentationId": "deck-a", "slideId": "s1", "feedbackText": "one" })).await,
            submit(
                app,
                json!({
                    "presentationId": "deck-a",
                    "slideId": "s2",
                    "feedbackText": "two",
                    "feedbackType": "design",
                    "formId": "exit",
                    "sessionId": "sess-1"
                }),
            )
            .await,
            submit(app, json!({ "presentationId": "deck-b", "slideId": "s1", "feedbackText": "three" })).await,
        ]
    }

    fn texts(json: &Value) -> Vec<&str> {
        json.as_array()
            .unwrap()
            .iter()
            .map(|r| r["feedbackText"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn list_feedback_newest_first() {
        let app = make_test_app().await;
        seed(&app).await;

        let (status, json) = app.get_json("/feedback").await;
        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(texts(&json), vec!["three", "two", "one"]);
    }

    #[tokio::test]
    async fn list_feedback_filters_conjunctively() {
        let app = make_test_app().await;
        seed(&app).await;

        let (_, json) = app.get_json("/feedback?slideId=s1").await;
        assert_eq!(texts(&json), vec!["three", "one"]);

        let (_, json) = app
            .get_json("/feedback?presentationId=deck-a&feedbackType=design")
            .await;
        assert_eq!(texts(&json), vec!["two"]);

        let (_, json) = app.get_json("/feedback?formId=default").await;
        assert_eq!(texts(&json), vec!["three", "one"]);

        let (_, json) = app
            .get_json("/feedback?sessionId=sess-1&presentationId=deck-b")
            .await;
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn list_feedback_paginates() {
        let app = make_test_app().await;
        seed(&app).await;

        let (_, json) = app.get_json("/feedback?limit=1&offset=1").await;
        assert_eq!(texts(&json), vec!["two"]);
    }

    #[tokio::test]
    async fn oversized_limit_is_capped_at_one_thousand() {
        let app = make_test_app().await;
        let repo = FeedbackRepository::new(app.state.db_clone());
        for n in 0..1005 {
            repo.insert(NewFeedback {
                presentation_id: "deck-big".into(),
                slide_id: "s1".into(),
                feedback_text: format!("note {n}"),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let (status, json) = app.get_json("/feedback?limit=5000").await;
        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(json.as_array().unwrap().len(), 1000);
        assert_eq!(json[0]["feedbackText"], "note 1004");
    }

    #[tokio::test]
    async fn round_trip_uses_camel_case_fields() {
        let app = make_test_app().await;
        let id = submit(
            &app,
            json!({
                "presentationId": "deck-z",
                "slideId": "closing",
                "slideIndex": 12,
                "feedbackText": "Ends abruptly",
                "reviewerName": "Sam",
                "reviewerEmail": "sam@example.com",
                "feedbackType": "accuracy",
                "metadata": { "device": "tablet" },
                "formId": "exit-survey",
                "sessionId": "abc",
                "questionHash": "0123abcd",
                "formContext": { "step": 3 }
            }),
        )
        .await;

        let (_, json) = app
            .get_json("/feedback?presentationId=deck-z&slideId=closing")
            .await;
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row["id"], id);
        assert_eq!(row["presentationId"], "deck-z");
        assert_eq!(row["slideId"], "closing");
        assert_eq!(row["slideIndex"], 12);
        assert_eq!(row["feedbackText"], "Ends abruptly");
        assert_eq!(row["reviewerName"], "Sam");
        assert_eq!(row["reviewerEmail"], "sam@example.com");
        assert_eq!(row["feedbackType"], "accuracy");
        assert_eq!(row["metadata"], json!({ "device": "tablet" }));
        assert_eq!(row["formId"], "exit-survey");
        assert_eq!(row["sessionId"], "abc");
        assert_eq!(row["questionHash"], "0123abcd");
        assert_eq!(row["formContext"], json!({ "step": 3 }));
        assert!(row["createdAt"].is_string());
    }

    #[tokio::test]
    async fn unknown_feedback_type_filter_is_bad_request() {
        let app = make_test_app().await;
        let (status, json) = app.get_json("/feedback?feedbackType=colour").await;
        assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn non_numeric_limit_is_bad_request() {
        let app = make_test_app().await;
        let (status, _) = app.get_json("/feedback?limit=lots").await;
        assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
    }
}

#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;

    #[tokio::test]
    async fn submit_feedback_success() {
        let app = make_test_app().await;

        let (status, json) = app
            .post_json(
                "/feedback",
                &json!({
                    "presentationId": "deck-1",
                    "slideId": "pricing",
                    "feedbackText": "Too many tiers",
                    "feedbackType": "content"
                }),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED.as_u16());
        assert_eq!(json["success"], true);
        assert!(json["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn submit_feedback_lists_every_violation() {
        let app = make_test_app().await;

        let (status, json) = app
            .post_json(
                "/feedback",
                &json!({
                    "presentationId": "",
                    "feedbackText": "x".repeat(10_001),
                    "feedbackType": "layout"
                }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
        assert_eq!(json["success"], false);
        assert_eq!(
            json["errors"],
            json!([
                "presentationId is required",
                "slideId is required",
                "feedbackText must be at most 10000 characters",
                "feedbackType must be one of: general, content, design, accuracy"
            ])
        );

        let (_, listed) = app.get_json("/feedback").await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn submit_feedback_malformed_json_is_bad_request() {
        let app = make_test_app().await;

        let req = Request::builder()
            .method("POST")
            .uri("/feedback")
            .header("Content-Type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let (status, json) = crate::helpers::app::read_json(app.send(req).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn submit_feedback_storage_failure_is_generic_500() {
        let app = make_test_app().await;
        app.state.db().clone().close().await.unwrap();

        let (status, json) = app
            .post_json(
                "/feedback",
                &json!({
                    "presentationId": "deck-1",
                    "slideId": "s1",
                    "feedbackText": "fine"
                }),
            )
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR.as_u16());
        assert_eq!(json, json!({ "success": false, "error": "Failed to save feedback" }));
    }
}

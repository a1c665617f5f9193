#[cfg(test)]
mod tests {
    use crate::helpers::app::test_app;
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    fn batch(session: &str, poll_option: Value) -> Value {
        json!({
            "presentationId": "deck-1",
            "moduleId": "onboarding",
            "formId": "end-of-deck",
            "sessionId": session,
            "reviewer": { "name": "Ana", "email": "ana@example.com" },
            "responses": [
                { "slideId": "poll", "response": { "optionId": poll_option } },
                {
                    "slideId": "open",
                    "slideContent": { "title": "Roadmap" },
                    "feedbackType": "content",
                    "response": {
                        "text": "Maybe",
                        "followUps": [
                            { "role": "engine", "content": "Can you give a specific example?" },
                            { "role": "reviewer", "content": "The hiring slide" }
                        ],
                        "completionReason": "user_done"
                    }
                }
            ]
        })
    }

    #[tokio::test]
    async fn batch_submission_creates_one_document_per_question() {
        let app = make_test_app().await;

        let (status, json) = app
            .post_json("/feedback/conversations", &batch("sess-1", json!("yes")))
            .await;
        assert_eq!(status, StatusCode::CREATED.as_u16());
        assert_eq!(json["success"], true);
        let ids = json["ids"].as_array().unwrap();
        assert_eq!(ids.len(), 2);

        let (status, docs) = app
            .get_json("/feedback/conversations?sessionId=sess-1")
            .await;
        assert_eq!(status, StatusCode::OK.as_u16());
        let docs = docs.as_array().unwrap();
        assert_eq!(docs.len(), 2);

        for (index, doc) in docs.iter().enumerate() {
            assert_eq!(doc["id"], ids[index]);
            assert_eq!(doc["presentationId"], "deck-1");
            assert_eq!(doc["moduleId"], "onboarding");
            assert_eq!(doc["formId"], "end-of-deck");
            assert_eq!(doc["reviewer"]["email"], "ana@example.com");
            assert_eq!(doc["createdAt"], docs[0]["createdAt"]);
        }
        assert_eq!(docs[0]["slideId"], "poll");
        assert_eq!(docs[1]["slideContent"], json!({ "title": "Roadmap" }));
        assert_eq!(docs[1]["response"]["completionReason"], "user_done");
        assert_eq!(docs[1]["response"]["followUps"][0]["role"], "engine");
    }

    #[tokio::test]
    async fn option_counts_group_by_option_and_skip_null() {
        let app = make_test_app().await;
        for (session, option) in [
            ("a", json!("yes")),
            ("b", json!("yes")),
            ("c", json!("no")),
            ("d", Value::Null),
        ] {
            let (status, _) = app
                .post_json("/feedback/conversations", &batch(session, option))
                .await;
            assert_eq!(status, StatusCode::CREATED.as_u16());
        }

        let (status, json) = app
            .get_json("/feedback/conversations/options?slideId=poll")
            .await;
        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(json, json!({ "no": 1, "yes": 2 }));

        let (_, json) = app
            .get_json("/feedback/conversations/options?slideId=open")
            .await;
        assert_eq!(json, json!({}));
    }

    #[tokio::test]
    async fn single_response_submission() {
        let app = make_test_app().await;

        let (status, json) = app
            .post_json(
                "/feedback/conversations",
                &json!({
                    "presentationId": "deck-2",
                    "response": { "slideId": "rating", "response": { "optionId": "5" } }
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED.as_u16());
        assert_eq!(json["ids"].as_array().unwrap().len(), 1);

        let (_, docs) = app
            .get_json("/feedback/conversations?presentationId=deck-2&slideId=rating")
            .await;
        assert_eq!(docs.as_array().unwrap().len(), 1);
        assert_eq!(docs[0]["response"]["optionId"], "5");
    }

    #[tokio::test]
    async fn invalid_submission_is_bad_request() {
        let app = make_test_app().await;

        let (status, json) = app
            .post_json(
                "/feedback/conversations",
                &json!({ "presentationId": "deck-1", "responses": [] }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
        assert_eq!(json["errors"], json!(["responses must not be empty"]));
    }

    #[tokio::test]
    async fn unconfigured_store_is_bad_request() {
        let app = test_app().without_document_store().build().await;

        let (status, json) = app
            .post_json("/feedback/conversations", &batch("sess-1", json!("yes")))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
        assert_eq!(
            json,
            json!({ "success": false, "error": "Document store not configured" })
        );

        let (status, _) = app
            .get_json("/feedback/conversations/options?slideId=poll")
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
    }

    #[tokio::test]
    async fn option_counts_require_slide_id() {
        let app = make_test_app().await;
        let (status, json) = app.get_json("/feedback/conversations/options").await;
        assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
        assert_eq!(json["errors"], json!(["slideId is required"]));
    }
}

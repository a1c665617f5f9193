#[cfg(test)]
mod tests {
    use crate::helpers::app::test_app;
    use crate::helpers::generator::Reply;
    use crate::helpers::{ScriptedGenerator, make_test_app};
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;

    fn turn(user_response: &str, remaining: i64) -> Value {
        json!({
            "questionConfig": {
                "id": "q-roadmap",
                "question": "How clear was the roadmap slide?",
                "contextSections": [
                    { "id": "c1", "title": "Roadmap", "body": "Q3: hiring. Q4: launch." }
                ]
            },
            "userResponse": user_response,
            "conversationHistory": [],
            "remainingFollowUps": remaining
        })
    }

    #[tokio::test]
    async fn vague_answer_gets_follow_up_question() {
        let generator = Arc::new(ScriptedGenerator::replying("Can you give a specific example?"));
        let app = test_app().with_generator(generator.clone()).build().await;

        let (status, json) = app.post_json("/feedback/followup", &turn("Maybe", 2)).await;

        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(
            json,
            json!({ "shouldContinue": true, "followUpQuestion": "Can you give a specific example?" })
        );
        assert_eq!(generator.calls(), 1);
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains("How clear was the roadmap slide?"));
        assert!(prompt.contains("Q3: hiring. Q4: launch."));
        assert!(prompt.contains("Follow-up questions remaining: 2"));
    }

    #[tokio::test]
    async fn terminal_phrase_ends_without_model_call() {
        let generator = Arc::new(ScriptedGenerator::replying("Why?"));
        let app = test_app().with_generator(generator.clone()).build().await;

        let (status, json) = app
            .post_json("/feedback/followup", &turn("That's all, thanks", 1))
            .await;

        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(json, json!({ "shouldContinue": false, "completionReason": "user_done" }));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn exhausted_budget_ends_without_model_call() {
        let generator = Arc::new(ScriptedGenerator::replying("Why?"));
        let app = test_app().with_generator(generator.clone()).build().await;

        let (_, json) = app
            .post_json("/feedback/followup", &turn("It needs charts", 0))
            .await;

        assert_eq!(json, json!({ "shouldContinue": false, "completionReason": "max_reached" }));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn completion_token_is_comprehensive() {
        let generator = Arc::new(ScriptedGenerator::replying("Thanks! feedback_complete"));
        let app = test_app().with_generator(generator).build().await;

        let (_, json) = app
            .post_json(
                "/feedback/followup",
                &turn("The hiring dependency is hidden behind the launch date.", 2),
            )
            .await;

        assert_eq!(json, json!({ "shouldContinue": false, "completionReason": "comprehensive" }));
    }

    #[tokio::test]
    async fn missing_credential_degrades_to_error_reason() {
        let app = make_test_app().await;

        let (status, json) = app.post_json("/feedback/followup", &turn("Maybe", 2)).await;

        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(
            json,
            json!({
                "shouldContinue": false,
                "completionReason": "error",
                "error": "AI service not configured"
            })
        );
    }

    #[tokio::test]
    async fn model_failure_still_returns_200() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Reply::Fail]));
        let app = test_app().with_generator(generator.clone()).build().await;

        let (status, json) = app.post_json("/feedback/followup", &turn("Maybe", 2)).await;

        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(json["shouldContinue"], false);
        assert_eq!(json["completionReason"], "error");
        assert_eq!(json["error"], "Failed to generate follow-up question");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn model_timeout_still_returns_200() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Reply::Hang]));
        let app = test_app()
            .with_generator(generator.clone())
            .with_timeout(Duration::from_millis(50))
            .build()
            .await;

        let (status, json) = app.post_json("/feedback/followup", &turn("Maybe", 2)).await;

        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(json["completionReason"], "error");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn history_is_replayed_into_the_prompt() {
        let generator = Arc::new(ScriptedGenerator::replying("Which arrows?"));
        let app = test_app().with_generator(generator.clone()).build().await;

        let mut body = turn("The arrows", 1);
        body["conversationHistory"] = json!([
            { "role": "reviewer", "content": "Confusing" },
            { "role": "engine", "content": "Which part was confusing?" }
        ]);
        let (_, json) = app.post_json("/feedback/followup", &body).await;

        assert_eq!(json["shouldContinue"], true);
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains("Reviewer: Confusing\nInterviewer: Which part was confusing?"));
        assert!(prompt.contains("Follow-up questions remaining: 1"));
    }

    #[tokio::test]
    async fn string_budget_is_read_as_integer() {
        let generator = Arc::new(ScriptedGenerator::replying("Which chart?"));
        let app = test_app().with_generator(generator.clone()).build().await;

        let mut body = turn("The charts", 0);
        body["remainingFollowUps"] = json!("3");
        let (status, json) = app.post_json("/feedback/followup", &body).await;

        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(json, json!({ "shouldContinue": true, "followUpQuestion": "Which chart?" }));
        assert!(generator.last_prompt().unwrap().contains("Follow-up questions remaining: 3"));
    }

    #[tokio::test]
    async fn fractional_budget_falls_back_to_default() {
        let generator = Arc::new(ScriptedGenerator::replying("Which chart?"));
        let app = test_app().with_generator(generator.clone()).build().await;

        let mut body = turn("The charts", 0);
        body["remainingFollowUps"] = json!(1.5);
        let (status, json) = app.post_json("/feedback/followup", &body).await;

        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(json["shouldContinue"], true);
        let expected = format!(
            "Follow-up questions remaining: {}",
            app.state.followups().default_budget()
        );
        assert!(generator.last_prompt().unwrap().contains(&expected));
    }

    #[tokio::test]
    async fn unknown_history_role_is_skipped() {
        let generator = Arc::new(ScriptedGenerator::replying("Which arrows?"));
        let app = test_app().with_generator(generator.clone()).build().await;

        let mut body = turn("The arrows", 1);
        body["conversationHistory"] = json!([
            { "role": "system", "content": "Be terse" },
            { "role": "reviewer", "content": "Confusing" }
        ]);
        let (status, json) = app.post_json("/feedback/followup", &body).await;

        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(json["shouldContinue"], true);
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains("Reviewer: Confusing"));
        assert!(!prompt.contains("Be terse"));
    }

    #[tokio::test]
    async fn unreadable_question_config_degrades_to_error_reason() {
        let generator = Arc::new(ScriptedGenerator::replying("Why?"));
        let app = test_app().with_generator(generator.clone()).build().await;

        let mut body = turn("Maybe", 2);
        body["questionConfig"] = json!(["not", "a", "config"]);
        let (status, json) = app.post_json("/feedback/followup", &body).await;

        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(json["shouldContinue"], false);
        assert_eq!(json["completionReason"], "error");
        assert_eq!(json["error"], "Could not read follow-up request");
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn missing_required_fields_is_bad_request() {
        let app = make_test_app().await;

        let (status, json) = app
            .post_json("/feedback/followup", &json!({ "conversationHistory": [] }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
        assert_eq!(
            json["errors"],
            json!(["questionConfig is required", "userResponse is required"])
        );

        let mut body = turn("Maybe", 2);
        body.as_object_mut().unwrap().remove("userResponse");
        let (status, _) = app.post_json("/feedback/followup", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST.as_u16());
    }
}

#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };

    #[tokio::test]
    async fn health_check_returns_ok_json() {
        let app = make_test_app().await;

        let (status, json) = app.get_json("/health").await;
        assert_eq!(status, StatusCode::OK.as_u16());
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
        assert_eq!(json["message"], "Health check passed");
    }

    #[tokio::test]
    async fn cors_preflight_allows_any_origin() {
        let app = make_test_app().await;

        let req = Request::builder()
            .method("OPTIONS")
            .uri("/feedback")
            .header("Origin", "https://slides.example.com")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app.send(req).await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        let methods = headers["access-control-allow-methods"].to_str().unwrap();
        for method in ["GET", "POST", "OPTIONS"] {
            assert!(methods.contains(method), "{methods}");
        }
    }
}

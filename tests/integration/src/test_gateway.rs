//! Gateway routing, health and function-invocation integration tests.

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{invoke, send, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_health() {
        let reply = send(reqwest::Method::GET, "/_health", String::new())
            .await
            .expect("health check");

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["status"], "running");
        assert!(reply.body["storage"].is_string());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_envelope_from_function_invocation() {
        let bucket = test_bucket_name("invoke");
        let event = json!({
            "body": json!({ "bucket": bucket }).to_string(),
            "httpMethod": "POST",
        });

        let reply = invoke("create-bucket", &event).await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["statusCode"], 200);
        let body: Value = serde_json::from_str(reply.body["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["message"], format!("container '{bucket}' created successfully"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_malformed_body() {
        let reply = send(reqwest::Method::POST, "/s3/create-bucket", "{not json".to_owned())
            .await
            .expect("request");

        let error = reply.body["error"].as_str().unwrap_or_default();
        assert_eq!(reply.status, 400);
        assert!(error.starts_with("invalid JSON in body: "), "{error}");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_unknown_route_and_method() {
        let unknown = send(reqwest::Method::POST, "/s3/delete-bucket", "{}".to_owned())
            .await
            .expect("request");
        assert_eq!(unknown.status, 404);

        let wrong_method = send(reqwest::Method::GET, "/s3/create-bucket", String::new())
            .await
            .expect("request");
        assert_eq!(wrong_method.status, 405);
    }
}

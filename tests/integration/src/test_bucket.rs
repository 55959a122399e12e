//! Create-bucket integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{call, create_test_bucket, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_create_bucket() {
        let bucket = test_bucket_name("create");

        let reply = call("create-bucket", &json!({ "bucket": bucket })).await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.message(), format!("container '{bucket}' created successfully"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_conflict_on_existing_bucket() {
        let bucket = create_test_bucket("dup").await;

        let reply = call("create-bucket", &json!({ "bucket": bucket })).await;

        assert_eq!(reply.status, 409);
        assert_eq!(reply.error(), format!("container '{bucket}' already exists"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_accept_legacy_route() {
        let bucket = test_bucket_name("legacy");
        let reply = call("crear-bucket", &json!({ "bucket": bucket })).await;
        assert_eq!(reply.status, 200);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_missing_bucket_field() {
        let reply = call("create-bucket", &json!({})).await;

        assert_eq!(reply.status, 400);
        assert_eq!(reply.error(), "missing required parameter(s) in body: 'bucket'");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_invalid_bucket_name() {
        let reply = call("create-bucket", &json!({ "bucket": "Not_A_Bucket" })).await;

        assert_eq!(reply.status, 400);
        assert!(reply.error().contains("InvalidBucketName"), "{}", reply.error());
    }
}

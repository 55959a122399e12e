//! Create-directory integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{call, create_test_bucket, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_create_directory() {
        let bucket = create_test_bucket("dir").await;

        let reply = call(
            "create-directory",
            &json!({ "bucket": bucket, "directorio": "photos/2024/" }),
        )
        .await;

        assert_eq!(reply.status, 200);
        assert_eq!(
            reply.message(),
            format!("directory 'photos/2024/' created successfully in bucket '{bucket}'")
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_repeat_directory_creation() {
        let bucket = create_test_bucket("dir-twice").await;
        let body = json!({ "bucket": bucket, "directorio": "docs" });

        assert_eq!(call("create-directory", &body).await.status, 200);
        assert_eq!(call("crear-directorio", &body).await.status, 200);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_found_for_unknown_bucket() {
        let bucket = test_bucket_name("ghost");

        let reply = call(
            "create-directory",
            &json!({ "bucket": bucket, "directorio": "docs" }),
        )
        .await;

        assert_eq!(reply.status, 404);
        assert_eq!(reply.error(), format!("container '{bucket}' does not exist"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_missing_fields() {
        let reply = call("create-directory", &json!({ "directorio": "" })).await;

        assert_eq!(reply.status, 400);
        assert_eq!(
            reply.error(),
            "missing required parameter(s) in body: 'bucket', 'directorio'"
        );
    }
}

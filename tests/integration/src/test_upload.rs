//! Upload-file integration tests.

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;

    use crate::{call, create_test_bucket, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_upload_file_into_directory() {
        let bucket = create_test_bucket("upload").await;

        let reply = call(
            "upload-file",
            &json!({
                "bucket": bucket,
                "directorio": "img",
                "nombreArchivo": "hello.txt",
                "archivoBase64": STANDARD.encode(b"hello world"),
            }),
        )
        .await;

        assert_eq!(reply.status, 200);
        assert_eq!(
            reply.message(),
            format!("file 'hello.txt' uploaded to '{bucket}/img/'")
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_upload_file_to_bucket_root() {
        let bucket = create_test_bucket("upload-root").await;

        let reply = call(
            "subir-archivo",
            &json!({
                "bucket": bucket,
                "nombreArchivo": "root.bin",
                "archivoBase64": STANDARD.encode([0_u8, 1, 2, 3]),
            }),
        )
        .await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.message(), format!("file 'root.bin' uploaded to '{bucket}/'"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_invalid_base64() {
        let bucket = create_test_bucket("upload-bad").await;

        let reply = call(
            "upload-file",
            &json!({
                "bucket": bucket,
                "nombreArchivo": "x.bin",
                "archivoBase64": "***",
            }),
        )
        .await;

        assert_eq!(reply.status, 400);
        assert!(reply.error().starts_with("error decoding Base64: "));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_found_for_unknown_bucket() {
        let bucket = test_bucket_name("ghost");

        let reply = call(
            "upload-file",
            &json!({
                "bucket": bucket,
                "nombreArchivo": "x.bin",
                "archivoBase64": STANDARD.encode(b"x"),
            }),
        )
        .await;

        assert_eq!(reply.status, 404);
        assert_eq!(reply.error(), format!("container '{bucket}' does not exist"));
    }
}

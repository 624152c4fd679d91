//! Existence check and pre-signed URL integration tests.

#[cfg(test)]
mod tests {
    use vellum_core::BackendKind;

    use crate::{cleanup_bucket, facade, s3_client, seed_bucket};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_check_existence_with_both_backends() {
        let client = s3_client();
        let bucket = seed_bucket(&client, "exists", &[("present.txt", b"here")]).await;

        for backend in [BackendKind::Signer, BackendKind::Managed] {
            let facade = facade(&bucket, backend);
            assert!(
                facade.object_exists(None, "present.txt").await.expect("exists"),
                "{backend}"
            );
            assert!(
                !facade.object_exists(None, "bogus").await.expect("exists"),
                "{backend}"
            );
        }

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_presigned_url_to_plain_client() {
        let client = s3_client();
        let bucket = seed_bucket(&client, "presign", &[("shared.txt", b"shared")]).await;

        let url = facade(&bucket, BackendKind::Signer)
            .presigned_url(None, "shared.txt")
            .await
            .expect("presigned_url");
        assert!(url.starts_with(&format!("http://{bucket}.")));

        let fetched = vellum_store::ReqwestTransport::new();
        let response = vellum_store::HttpTransport::get(&fetched, &url, None)
            .await
            .expect("GET pre-signed URL");
        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(response.into_bytes().await.expect("body").as_ref(), b"shared");

        cleanup_bucket(&client, &bucket).await;
    }
}

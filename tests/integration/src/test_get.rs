//! Object retrieval integration tests.

#[cfg(test)]
mod tests {
    use vellum_core::BackendKind;

    use crate::{cleanup_bucket, facade, s3_client, seed_bucket};

    const BODY: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_get_whole_object_with_both_backends() {
        let client = s3_client();
        let bucket = seed_bucket(&client, "get", &[("docs/alpha.txt", BODY)]).await;

        for backend in [BackendKind::Signer, BackendKind::Managed] {
            let object = facade(&bucket, backend)
                .get_object(None, "docs/alpha.txt", None)
                .await
                .expect("get_object")
                .expect("object should exist");
            assert_eq!(object.body.as_ref(), BODY, "{backend}");
            assert_eq!(object.content_length, BODY.len() as u64, "{backend}");
            assert!(!object.partial, "{backend}");
        }

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_get_first_ten_bytes() {
        let client = s3_client();
        let bucket = seed_bucket(&client, "range", &[("alpha.txt", BODY)]).await;

        let object = facade(&bucket, BackendKind::Signer)
            .get_object(None, "alpha.txt", Some("bytes=0-9"))
            .await
            .expect("get_object")
            .expect("object should exist");
        assert_eq!(object.body.as_ref(), b"0123456789");
        assert_eq!(object.content_length, 10);
        assert!(object.partial);

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_none_for_missing_object() {
        let client = s3_client();
        let bucket = seed_bucket(&client, "missing", &[]).await;

        for backend in [BackendKind::Signer, BackendKind::Managed] {
            let object = facade(&bucket, backend)
                .get_object(None, "bogus", None)
                .await
                .expect("absent object is not an error");
            assert!(object.is_none(), "{backend}");
        }

        cleanup_bucket(&client, &bucket).await;
    }
}

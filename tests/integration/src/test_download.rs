//! Streaming download integration tests.

#[cfg(test)]
mod tests {
    use vellum_core::BackendKind;
    use vellum_store::DownloadOutcome;

    use crate::{cleanup_bucket, facade, s3_client, seed_bucket};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_download_into_buffer() {
        let client = s3_client();
        let body: &'static [u8] = b"streamed body contents";
        let bucket = seed_bucket(&client, "download", &[("data/blob.bin", body)]).await;

        for backend in [BackendKind::Signer, BackendKind::Managed] {
            let mut sink = Vec::new();
            let outcome = facade(&bucket, backend)
                .download_object(None, "data/blob.bin", None, &mut sink)
                .await
                .expect("download_object");
            assert_eq!(sink, body, "{backend}");
            assert_eq!(
                outcome,
                DownloadOutcome::Downloaded {
                    bytes_written: body.len() as u64,
                    content_length: body.len() as u64,
                },
                "{backend}"
            );
        }

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_missing_download() {
        let client = s3_client();
        let bucket = seed_bucket(&client, "dlmissing", &[]).await;

        let mut sink = Vec::new();
        let outcome = facade(&bucket, BackendKind::Signer)
            .download_object(None, "bogus", None, &mut sink)
            .await
            .expect("download_object");
        assert_eq!(outcome, DownloadOutcome::NotFound);
        assert!(sink.is_empty());

        cleanup_bucket(&client, &bucket).await;
    }
}

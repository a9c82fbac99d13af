use ::common::storage::{ObjectKey, ObjectStore};

use crate::common::{PETSTORE, TestApp, routes};

mod page {
    use super::*;

    #[tokio::test]
    async fn root_redirects_to_page() {
        let app = TestApp::spawn().await;

        let res = app.get("/").await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some(routes::PAGE));
    }

    #[tokio::test]
    async fn empty_listing() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::PAGE).await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("<title>Integrations</title>"));
        assert!(res.text.contains("No integrations uploaded yet."));
    }

    #[tokio::test]
    async fn listing_follows_insertion_order() {
        let app = TestApp::spawn().await;
        app.create_integration("Zeta API", "zeta.yaml").await;
        app.create_integration("Alpha API", "alpha.yml").await;

        let res = app.get(routes::PAGE).await;

        assert_eq!(res.status, 200);
        let zeta = res.text.find("Zeta API").unwrap();
        let alpha = res.text.find("Alpha API").unwrap();
        assert!(zeta < alpha);
        assert!(!res.text.contains("No integrations uploaded yet."));
    }

    #[tokio::test]
    async fn uploaded_notice_only_for_known_id() {
        let app = TestApp::spawn().await;
        let id = app.create_integration("Pets", "pets.yaml").await;

        let res = app.get(&routes::uploaded(id)).await;
        assert!(res.text.contains("Integration uploaded and saved successfully!"));
        assert!(res.text.contains("View File"));

        let res = app.get(&routes::uploaded(id + 100)).await;
        assert_eq!(res.status, 200);
        assert!(!res.text.contains("Integration uploaded and saved successfully!"));
    }

    #[tokio::test]
    async fn malformed_query_renders_error_page() {
        let app = TestApp::spawn().await;

        let res = app.get("/integrations?uploaded=abc").await;

        assert_eq!(res.status, 400);
        assert!(res.text.contains("<!doctype html>"));
        assert!(res.text.contains("Back to Integrations"));
    }
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn stores_blob_and_record() {
        let app = TestApp::spawn().await;

        let res = app
            .upload("Petstore", "Pet operations", Some(("petstore.yaml", PETSTORE)))
            .await;

        assert_eq!(res.status, 303);
        let id = res.uploaded_id();

        let record = app.record(id).await.expect("record should exist");
        assert_eq!(record.name, "Petstore");
        assert_eq!(record.description, "Pet operations");
        assert_eq!(record.filename, "petstore.yaml");
        assert!(!record.is_vectorized);
        assert!(!record.is_ragged);
        assert!(record.s3_url.starts_with("https://test-specs.s3.amazonaws.com/openapi-specs/"));
        assert!(record.s3_url.ends_with("_petstore.yaml"));

        let key = ObjectKey::from_public_url(&record.s3_url).expect("URL should name an object");
        let stored = app.objects.object(&key).await.expect("blob should exist");
        assert_eq!(stored.body, PETSTORE);
        assert_eq!(stored.content_type, "text/yaml");
    }

    #[tokio::test]
    async fn same_filename_twice_keeps_both() {
        let app = TestApp::spawn().await;

        let first = app.create_integration("First", "spec.yaml").await;
        let second = app.create_integration("Second", "spec.yaml").await;

        assert_ne!(first, second);
        let records = app.records().await;
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].s3_url, records[1].s3_url);
        assert_eq!(app.objects.len().await, 2);
    }

    #[tokio::test]
    async fn missing_name_is_rejected_without_side_effects() {
        let app = TestApp::spawn().await;

        let res = app
            .upload("   ", "desc", Some(("spec.yaml", PETSTORE)))
            .await;

        assert_eq!(res.status, 400);
        assert!(res.text.contains("Please provide a name and upload a file."));
        assert!(app.records().await.is_empty());
        assert!(app.objects.is_empty().await);
    }

    #[tokio::test]
    async fn missing_file_is_rejected_and_form_kept() {
        let app = TestApp::spawn().await;

        let res = app.upload("Keep Me", "Still here", None).await;

        assert_eq!(res.status, 400);
        assert!(res.text.contains("Please provide a name and upload a file."));
        assert!(res.text.contains(r#"value="Keep Me""#));
        assert!(res.text.contains("Still here"));
        assert!(app.records().await.is_empty());
        assert!(app.objects.is_empty().await);
    }

    #[tokio::test]
    async fn non_yaml_file_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .upload("Binary", "", Some(("payload.exe", &b"MZ"[..])))
            .await;

        assert_eq!(res.status, 400);
        assert!(app.records().await.is_empty());
        assert!(app.objects.is_empty().await);
    }

    #[tokio::test]
    async fn url_reserved_characters_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .upload("Beta", "", Some(("v1#beta.yaml", PETSTORE)))
            .await;

        assert_eq!(res.status, 400);
        assert!(app.records().await.is_empty());
        assert!(app.objects.is_empty().await);
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let app = TestApp::spawn().await;
        let big = vec![b'a'; crate::common::MAX_UPLOAD_SIZE as usize + 1];

        let res = app.upload("Huge", "", Some(("huge.yaml", big.as_slice()))).await;

        assert_eq!(res.status, 400);
        assert!(app.records().await.is_empty());
        assert!(app.objects.is_empty().await);
    }
}

mod rag {
    use super::*;

    #[tokio::test]
    async fn rendered_toggle_button_flips_flag() {
        let app = TestApp::spawn().await;
        let id = app.create_integration("Pets", "pets.yaml").await;

        let value = app.rendered_toggle_value(id).await;
        assert_eq!(value, "true");
        let res = app.submit_rag(id, &value).await;
        assert_eq!(res.status, 303);
        assert!(app.record(id).await.unwrap().is_ragged);

        let value = app.rendered_toggle_value(id).await;
        assert_eq!(value, "false");
        let res = app.submit_rag(id, &value).await;
        assert_eq!(res.status, 303);
        assert!(!app.record(id).await.unwrap().is_ragged);
    }

    #[tokio::test]
    async fn toggle_on_and_off() {
        let app = TestApp::spawn().await;
        let id = app.create_integration("Pets", "pets.yaml").await;

        let res = app.set_rag(id, true).await;
        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some(routes::PAGE));
        assert!(app.record(id).await.unwrap().is_ragged);

        let page = app.get(routes::PAGE).await;
        assert!(page.text.contains("Remove from RAG"));

        app.set_rag(id, false).await;
        assert!(!app.record(id).await.unwrap().is_ragged);
    }

    #[tokio::test]
    async fn repeated_submission_is_idempotent() {
        let app = TestApp::spawn().await;
        let id = app.create_integration("Pets", "pets.yaml").await;

        app.set_rag(id, true).await;
        let res = app.set_rag(id, true).await;

        assert_eq!(res.status, 303);
        let record = app.record(id).await.unwrap();
        assert!(record.is_ragged);
        assert!(!record.is_vectorized);
    }

    #[tokio::test]
    async fn unknown_id_redirects_without_changes() {
        let app = TestApp::spawn().await;
        let id = app.create_integration("Pets", "pets.yaml").await;

        let res = app.set_rag(id + 100, true).await;

        assert_eq!(res.status, 303);
        assert!(!app.record(id).await.unwrap().is_ragged);
    }

    #[tokio::test]
    async fn malformed_form_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_integration("Pets", "pets.yaml").await;

        let res = app.submit_rag(id, "maybe").await;

        assert_eq!(res.status, 400);
        assert!(res.text.contains("Back to Integrations"));
        assert!(!app.record(id).await.unwrap().is_ragged);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_record_and_blob() {
        let app = TestApp::spawn().await;
        let keep = app.create_integration("Keep", "keep.yaml").await;
        let gone = app.create_integration("Gone", "gone.yaml").await;

        let res = app.delete(gone).await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some(routes::PAGE));
        assert!(app.record(gone).await.is_none());
        assert!(app.record(keep).await.is_some());
        assert_eq!(app.objects.len().await, 1);

        let page = app.get(routes::PAGE).await;
        assert!(page.text.contains("Keep"));
        assert!(!page.text.contains("Gone"));
    }

    #[tokio::test]
    async fn record_removed_even_if_blob_missing() {
        let app = TestApp::spawn().await;
        let id = app.create_integration("Pets", "pets.yaml").await;
        let record = app.record(id).await.unwrap();
        let key = ObjectKey::from_public_url(&record.s3_url).unwrap();

        assert!(app.objects.delete(&key).await.unwrap());

        let res = app.delete(id).await;

        assert_eq!(res.status, 303);
        assert!(app.record(id).await.is_none());
    }

    #[tokio::test]
    async fn unknown_id_redirects() {
        let app = TestApp::spawn().await;

        let res = app.delete(4242).await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some(routes::PAGE));
    }
}

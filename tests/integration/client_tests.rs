//! HTTP client integration tests
//!
//! Runs the batch workflows through `PixelHubClient` against a local mock
//! server speaking the PixelHub response envelope.

#[cfg(test)]
mod tests {
    use pixelhub_batch::config::{BatchSettings, ClientConfig};
    use pixelhub_batch::{BatchCoordinator, GenerateParams, PixelHubClient, UploadedItem};
    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn coordinator_for(server: &MockServer, page_size: u32) -> BatchCoordinator<PixelHubClient> {
        let client = PixelHubClient::new(ClientConfig {
            base_url: server.uri(),
            timeout: 5,
            ..Default::default()
        })
        .unwrap()
        .with_page_size(page_size);
        BatchCoordinator::new(client, BatchSettings::default())
    }

    fn envelope(data: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "Success",
            "data": data
        }))
    }

    async fn mount_listing(server: &MockServer, total: usize, page_size: usize) {
        let pages = total.div_ceil(page_size);
        for page in 1..=pages {
            let images: Vec<Value> = (((page - 1) * page_size)..(page * page_size).min(total))
                .map(|i| json!({ "id": format!("img_{:02}", i), "tags": null }))
                .collect();
            Mock::given(method("GET"))
                .and(path("/api/v1/images"))
                .and(query_param("page", page.to_string()))
                .and(query_param("limit", page_size.to_string()))
                .respond_with(envelope(json!({
                    "total": total,
                    "current_page": page,
                    "images": images
                })))
                .expect(1)
                .mount(server)
                .await;
        }
    }

    // ==================== Bulk Generate ====================

    /// One failing image does not stop the others from being tagged
    #[tokio::test]
    async fn test_generate_over_http_with_partial_failure() {
        let server = MockServer::start().await;
        for id in ["img_a", "img_c"] {
            Mock::given(method("POST"))
                .and(path(format!("/api/v1/images/{}/generate-tags", id)))
                .and(body_json(json!({ "delimiter": ",", "mode": "append" })))
                .respond_with(envelope(json!({ "generated_tags": [" sky ", "blue", "sky"] })))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("POST"))
            .and(path("/api/v1/images/img_b/generate-tags"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "code": 500,
                "message": "AI service unavailable"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let coordinator = coordinator_for(&server, 20);
        let mut items = vec![
            UploadedItem::new("img_a"),
            UploadedItem::new("img_b"),
            UploadedItem::new("img_c").with_tags(["blue"]),
        ];

        let report = coordinator
            .run_bulk_generate(&mut items, &GenerateParams::default().with_concurrency(2))
            .await
            .unwrap();

        assert_eq!(report.succeeded(), 2);
        let error = report.outcomes()[1].error().unwrap();
        assert!(error.message.contains("AI service unavailable"));
        assert_eq!(error.code.as_deref(), Some("500"));
        assert_eq!(items[0].tags, vec!["sky", "blue"]);
        assert!(items[1].tags.is_empty());
        assert_eq!(items[2].tags, vec!["blue", "sky"]);
    }

    // ==================== Select All and Delete ====================

    /// Select all over three pages, delete, and read back the server breakdown
    #[tokio::test]
    async fn test_select_all_and_delete_over_http() {
        let server = MockServer::start().await;
        mount_listing(&server, 45, 20).await;

        let expected: Vec<String> = (0..45).map(|i| format!("img_{:02}", i)).collect();
        let results: Vec<Value> = expected
            .iter()
            .map(|id| {
                if id == "img_07" {
                    json!({ "image_id": id, "status": "failed", "error": "Image not found" })
                } else {
                    json!({ "image_id": id, "status": "success" })
                }
            })
            .collect();
        Mock::given(method("POST"))
            .and(path("/api/v1/images/batch-delete"))
            .and(body_json(json!({ "image_ids": expected })))
            .respond_with(envelope(json!({
                "total": 45,
                "success": 44,
                "failed": 1,
                "results": results
            })))
            .expect(1)
            .mount(&server)
            .await;

        let coordinator = coordinator_for(&server, 20);
        coordinator.enter_delete_mode().await;
        coordinator.select_all().await.unwrap();
        assert_eq!(coordinator.selection_count().await, 45);

        let report = coordinator.delete_selected().await.unwrap();

        assert_eq!(report.total(), 45);
        assert_eq!(report.succeeded(), 44);
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.item_id.as_deref(), Some("img_07"));
        assert_eq!(failure.error().unwrap().message, "Image not found");
        assert!(!coordinator.is_delete_mode_active().await);
    }

    /// A failing listing page surfaces as a fetch error and nothing is deleted
    #[tokio::test]
    async fn test_listing_failure_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/images"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/images/batch-delete"))
            .respond_with(envelope(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let coordinator = coordinator_for(&server, 20);
        coordinator.enter_delete_mode().await;

        let err = crate::assert_err!(coordinator.select_all().await);
        assert!(err.is_remote_call());
        assert!(err.to_string().contains("Service Unavailable"));
        assert_eq!(coordinator.selection_count().await, 0);

        let err = crate::assert_err!(coordinator.delete_selected().await);
        assert!(err.is_validation());
    }

    // ==================== Bulk Save ====================

    /// Save sends the trimmed description then the cleaned tags
    #[tokio::test]
    async fn test_save_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/images/img_a"))
            .and(body_json(json!({ "description": "harbour at dusk" })))
            .respond_with(envelope(json!(null)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/images/img_a/tags"))
            .and(body_json(json!({ "tags": ["harbour", "dusk"], "mode": "set" })))
            .respond_with(envelope(json!(null)))
            .expect(1)
            .mount(&server)
            .await;

        let coordinator = coordinator_for(&server, 20);
        let mut items = vec![UploadedItem::new("img_a")];
        let inputs = vec![pixelhub_batch::ItemInput::new(
            " harbour at dusk ",
            vec!["harbour".to_string(), " ".to_string(), "dusk".to_string()],
        )];

        let report = coordinator.run_bulk_save(&mut items, &inputs).await.unwrap();

        assert!(report.all_succeeded());
        let steps = report.outcomes()[0].value().unwrap();
        assert!(steps.description_updated && steps.tags_updated);
        assert_eq!(items[0].description, "harbour at dusk");
    }
}

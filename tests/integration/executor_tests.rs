//! Bounded executor integration tests
//!
//! Drives the executor with real service calls and checks the concurrency
//! ceiling, ordering and failure isolation from the outside.

#[cfg(test)]
mod tests {
    use crate::common::{FakeImageService, ItemFactory};
    use pixelhub_batch::{
        BatchCoordinator, BoundedExecutor, GenerateParams, GenerateTagsRequest, ImageService,
        Task, TagMode, run_bounded,
    };
    use std::time::Duration;

    fn request() -> GenerateTagsRequest {
        GenerateTagsRequest {
            prompt: None,
            delimiter: ",".to_string(),
            mode: TagMode::Append,
        }
    }

    // ==================== Concurrency Ceiling ====================

    /// Peak in-flight requests equal min(concurrency, items) for every allowed ceiling
    #[tokio::test(start_paused = true)]
    async fn test_peak_in_flight_never_exceeds_ceiling() {
        for concurrency in 1..=10 {
            for n in [1usize, 4, 13] {
                let mut service = FakeImageService::with_images(n)
                    .with_latency(Duration::from_millis(20));
                // uneven latencies so settlements interleave
                for (i, id) in ItemFactory::ids(n).into_iter().enumerate() {
                    service = service.with_latency_for(id, Duration::from_millis(5 + (i as u64 * 7) % 30));
                }
                let coordinator = BatchCoordinator::with_defaults(service);
                let mut items = ItemFactory::uploaded(&ItemFactory::ids(n));

                let report = coordinator
                    .run_bulk_generate(
                        &mut items,
                        &GenerateParams::default().with_concurrency(concurrency),
                    )
                    .await
                    .unwrap();

                assert_eq!(report.total(), n);
                assert_eq!(
                    coordinator.service().peak_in_flight(),
                    concurrency.min(n),
                    "concurrency {} with {} items",
                    concurrency,
                    n
                );
                assert_eq!(coordinator.service().calls("generate_tags"), n);
            }
        }
    }

    /// A ceiling of one runs the batch strictly sequentially
    #[tokio::test(start_paused = true)]
    async fn test_ceiling_of_one_is_sequential() {
        let service = FakeImageService::with_images(6).with_latency(Duration::from_millis(10));
        let req = request();
        let ids = ItemFactory::ids(6);
        let (service, req) = (&service, &req);

        let started = tokio::time::Instant::now();
        let tasks = ids.iter().map(|id| {
            Task::for_item(id.clone(), move || async move {
                service.generate_tags(id, req).await
            })
        });
        let report = run_bounded(tasks, 1).await.unwrap();

        assert!(report.all_succeeded());
        assert_eq!(service.peak_in_flight(), 1);
        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    // ==================== Ordering ====================

    /// Outcomes follow submission order even when later items settle first
    #[tokio::test(start_paused = true)]
    async fn test_outcomes_ordered_by_submission() {
        let ids = ItemFactory::ids(5);
        let mut service = FakeImageService::with_images(5);
        for (i, id) in ids.iter().enumerate() {
            service = service.with_latency_for(id.clone(), Duration::from_millis(50 - i as u64 * 10));
        }
        let req = request();
        let (service, req) = (&service, &req);

        let tasks = ids.iter().map(|id| {
            Task::for_item(id.clone(), move || async move {
                service.generate_tags(id, req).await
            })
        });
        let report = BoundedExecutor::new(5).unwrap().run(tasks).await;

        let order: Vec<_> = report
            .outcomes()
            .iter()
            .map(|o| o.item_id.clone().unwrap())
            .collect();
        assert_eq!(order, ids);
        for (index, outcome) in report.outcomes().iter().enumerate() {
            assert_eq!(outcome.index, index);
            assert_eq!(
                outcome.value().unwrap().generated_tags[0],
                format!("tag-{}", ids[index])
            );
        }
    }

    // ==================== Failure Isolation ====================

    /// Failing tasks neither stop the batch nor lose their slot
    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_abort_batch() {
        let ids = ItemFactory::ids(8);
        let service = FakeImageService::with_images(8)
            .with_latency(Duration::from_millis(5))
            .failing("generate_tags", "img_000", "model unavailable")
            .failing("generate_tags", "img_007", "timeout");
        let req = request();
        let (service, req) = (&service, &req);

        let tasks: Vec<_> = ids
            .iter()
            .map(|id| {
                Task::for_item(id.clone(), move || async move {
                    service.generate_tags(id, req).await
                })
            })
            .collect();
        let report = run_bounded(tasks, 3).await.unwrap();

        assert_eq!(report.total(), 8);
        assert_eq!(report.succeeded(), 6);
        assert_eq!(report.failed(), 2);
        let failed: Vec<_> = report.failures().map(|o| o.index).collect();
        assert_eq!(failed, vec![0, 7]);
        assert!(report.outcomes()[0].error().unwrap().message.contains("model unavailable"));
        assert!(report.outcomes()[7].error().unwrap().message.contains("timeout"));
        assert_eq!(service.calls("generate_tags"), 8);
    }

    /// Zero concurrency is refused before any task runs
    #[tokio::test]
    async fn test_zero_concurrency_starts_nothing() {
        let service = FakeImageService::with_images(3);
        let req = request();
        let ids = ItemFactory::ids(3);
        let (service, req) = (&service, &req);

        let tasks = ids.iter().map(|id| {
            Task::for_item(id.clone(), move || async move {
                service.generate_tags(id, req).await
            })
        });
        let err = crate::assert_err!(run_bounded(tasks, 0).await);

        assert!(err.is_configuration());
        assert_eq!(service.total_calls(), 0);
    }
}

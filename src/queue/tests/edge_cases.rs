//! Edge case and error condition tests for the item queue

#[cfg(test)]
mod tests {
    use crate::notifications::api::{DrainEventType, DrainMode};
    use crate::queue::api::{DrainJob, DrainScheduler, ItemQueueService, QueueError, QueueResult};
    use crate::queue::tests::helpers::{drain_events, manual_service, service_with, ItemRecorder};
    use std::sync::Arc;

    /// Scheduler that refuses every job
    struct ClosedScheduler;

    impl DrainScheduler for ClosedScheduler {
        fn submit(&self, _job: DrainJob) -> QueueResult<()> {
            Err(QueueError::SchedulerUnavailable {
                message: "closed for testing".to_string(),
            })
        }
    }

    #[test]
    fn test_rejected_async_drain_leaves_queue_untouched() {
        let service = ItemQueueService::new(Arc::new(ClosedScheduler));
        let mut events = service.subscribe("rejected");
        let recorder = ItemRecorder::new();
        service.add("A");
        service.add("B");

        service.drain_async(recorder.clone());

        assert_eq!(service.pending_items(), vec!["A", "B"]);
        assert_eq!(service.total_processed(), 0);
        assert_eq!(recorder.calls(), 0);

        let kinds: Vec<DrainEventType> = drain_events(&mut events)
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(
            kinds,
            vec![DrainEventType::Scheduled, DrainEventType::Rejected]
        );
    }

    #[test]
    fn test_unicode_and_whitespace_items() {
        let items = ["  ", "naïve", "日本語", "tab\there", "line\nbreak"];
        let (service, _scheduler) = service_with(&items);

        service.remove("日本語").unwrap();
        let recorder = ItemRecorder::new();
        service.drain_sync(&mut recorder.clone());

        assert_eq!(
            recorder.items(),
            vec!["  ", "naïve", "tab\there", "line\nbreak"]
        );
    }

    #[test]
    fn test_remove_error_message_for_empty_item() {
        let (service, _scheduler) = service_with(&["A"]);

        let err = service.remove("").unwrap_err();

        assert_eq!(err.missing_item(), Some(""));
        assert_eq!(err.to_string(), "Item not found in pending queue: ");
    }

    #[test]
    fn test_large_queue_drains_completely() {
        let (service, _scheduler) = manual_service();
        for i in 0..10_000 {
            service.add(i.to_string());
        }

        let mut last = None;
        let mut count = 0u64;
        service.drain_sync(&mut |item: &str| {
            let value: u32 = item.parse().unwrap();
            if let Some(prev) = last {
                assert!(value > prev, "items out of order: {} after {}", value, prev);
            }
            last = Some(value);
            count += 1;
        });

        assert_eq!(count, 10_000);
        assert_eq!(service.total_processed(), 10_000);
    }

    #[test]
    fn test_sync_drain_after_pending_async_drain_double_processes() {
        // The async snapshot does not remove items, so a sync drain in between
        // sees the same items again
        let (service, scheduler) = service_with(&["A", "B"]);
        let recorder = ItemRecorder::new();

        service.drain_async(recorder.clone());
        service.drain_sync(&mut recorder.clone());
        scheduler.run_pending();

        assert_eq!(recorder.items(), vec!["A", "B", "A", "B"]);
        assert_eq!(service.total_processed(), 4);
        assert_eq!(service.pending_count(), 0);
    }

    #[test]
    fn test_sync_drain_keeps_pending_when_callback_panics() {
        let (service, _scheduler) = service_with(&["first", "second", "third"]);
        let mut events = service.subscribe("sync-panic");
        let panicking = service.clone();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            panicking.drain_sync(&mut |item: &str| {
                if item == "second" {
                    panic!("callback failure");
                }
            });
        }));
        assert!(result.is_err());

        // Only the item whose callback returned was counted; nothing was lost
        assert_eq!(service.total_processed(), 1);
        assert_eq!(service.pending_items(), vec!["first", "second", "third"]);

        let kinds: Vec<(DrainEventType, usize)> = drain_events(&mut events)
            .into_iter()
            .map(|e| (e.event_type, e.items))
            .collect();
        assert_eq!(
            kinds,
            vec![(DrainEventType::Started, 3), (DrainEventType::Failed, 1)]
        );

        // Poisoned drain guard is recovered; the service keeps working
        let recorder = ItemRecorder::new();
        service.drain_sync(&mut recorder.clone());
        assert_eq!(recorder.items(), vec!["first", "second", "third"]);
        assert_eq!(service.total_processed(), 4);
        assert_eq!(service.pending_count(), 0);
    }

    #[test]
    fn test_async_drain_keeps_pending_when_callback_panics() {
        let (service, scheduler) = service_with(&["first", "second"]);
        let mut events = service.subscribe("async-panic");

        service.drain_async(|item: &str| {
            if item == "second" {
                panic!("callback failure");
            }
        });
        let result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| scheduler.run_pending()));
        assert!(result.is_err());

        assert_eq!(service.total_processed(), 1);
        assert_eq!(service.pending_items(), vec!["first", "second"]);

        let last = drain_events(&mut events).pop().unwrap();
        assert_eq!(last.event_type, DrainEventType::Failed);
        assert_eq!(last.mode, DrainMode::Async);
        assert_eq!(last.items, 1);
        assert!(last.is_end_of(1));
    }
}

mod mocks;

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    sync::Arc,
    thread,
};

use mocks::summarizer::MockSummarizer;
use note_summarizer::{
    export_document, get_statistics, DeviceKind, EngineError, ModelName, ModelRegistry,
    Summarizer, SummaryService, ValidationError,
};

const CHEST_PAIN_NOTE: &str = "Patient presents with chest pain and shortness of breath. \
History of hypertension. ECG shows ST elevation. Diagnosis: acute myocardial infarction. \
Plan: immediate catheterization.";

// ─── End-to-end service flow ─────────────────────────────────────────────────

#[test]
fn summarize_note_returns_summary_with_positive_reduction() {
    let summarizer = MockSummarizer::new("MI with ST elevation, sent for catheterization.");
    let calls = summarizer.calls.clone();

    let service = SummaryService::new(summarizer);
    let outcome = service
        .summarize_note(CHEST_PAIN_NOTE, 100, 50)
        .expect("summarization should succeed");

    assert_eq!(
        outcome.summary,
        "MI with ST elevation, sent for catheterization."
    );
    assert!(outcome.stats.summary_length < outcome.stats.original_length);
    assert!(outcome.stats.reduction_percentage > 0.0);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1, "Engine should be invoked exactly once");
    assert_eq!(calls[0], CHEST_PAIN_NOTE);
}

#[test]
fn empty_note_is_rejected_before_any_generation() {
    let summarizer = MockSummarizer::new("should never be produced");
    let calls = summarizer.calls.clone();

    let service = SummaryService::new(summarizer);
    let err = service.summarize_note("   \n ", 100, 50).unwrap_err();

    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::EmptyText)
    ));
    assert!(
        calls.lock().unwrap().is_empty(),
        "No generation attempt should occur for empty input"
    );
}

#[test]
fn inverted_bounds_are_rejected_before_any_generation() {
    let summarizer = MockSummarizer::new("should never be produced");
    let calls = summarizer.calls.clone();

    let service = SummaryService::new(summarizer);
    let err = service.summarize_note(CHEST_PAIN_NOTE, 100, 150).unwrap_err();

    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::MinExceedsMax { min: 150, max: 100 })
    ));
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn generation_failure_propagates_as_a_distinct_error() {
    let summarizer = MockSummarizer::failing("CUDA out of memory");
    let calls = summarizer.calls.clone();

    let service = SummaryService::new(summarizer);
    let err = service.summarize_note(CHEST_PAIN_NOTE, 100, 50).unwrap_err();

    match err {
        EngineError::Generation { message } => assert!(message.contains("CUDA out of memory")),
        other => panic!("Expected a generation error, got: {other:?}"),
    }
    assert_eq!(
        calls.lock().unwrap().len(),
        1,
        "The engine was invoked and failed"
    );
}

#[test]
fn model_info_is_surfaced_through_the_service() {
    let service = SummaryService::new(MockSummarizer::new("summary"));
    let info = service.model_info();
    assert_eq!(info.model_name, ModelName::Small);
    assert_eq!(info.device, DeviceKind::Cpu);
}

// ─── Registry caching ────────────────────────────────────────────────────────

#[test]
fn registry_loads_each_model_at_most_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();

    let registry = ModelRegistry::with_loader(move |_name| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(MockSummarizer::new("cached"))
    });

    let first = registry.get_or_load(ModelName::Base).unwrap();
    let second = registry.get_or_load(ModelName::Base).unwrap();

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.loaded(), vec![ModelName::Base]);
}

#[test]
fn concurrent_first_use_collapses_to_a_single_load() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();

    let registry = Arc::new(ModelRegistry::with_loader(move |_name| {
        counter.fetch_add(1, Ordering::SeqCst);
        // Widen the race window so both threads hit a cold cache.
        thread::sleep(std::time::Duration::from_millis(50));
        Ok(MockSummarizer::new("cached"))
    }));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || registry.get_or_load(ModelName::Base).unwrap())
        })
        .collect();

    let resolved: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(
        loads.load(Ordering::SeqCst),
        1,
        "Exactly one underlying load must occur"
    );
    for handle in &resolved[1..] {
        assert!(Arc::ptr_eq(&resolved[0], handle));
    }
}

#[test]
fn distinct_model_names_load_independently() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();

    let registry = ModelRegistry::with_loader(move |name: ModelName| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(MockSummarizer::new(name.as_str()))
    });

    let base = registry.get_or_load(ModelName::Base).unwrap();
    let small = registry.get_or_load(ModelName::Small).unwrap();

    assert_eq!(loads.load(Ordering::SeqCst), 2);
    assert!(!Arc::ptr_eq(&base, &small));
}

#[test]
fn failed_load_is_not_cached_and_can_be_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();

    let registry = ModelRegistry::with_loader(move |_name| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(EngineError::ModelLoad {
                message: "network unreachable".into(),
            });
        }
        Ok(MockSummarizer::new("loaded on retry"))
    });

    let err = registry.get_or_load(ModelName::Base).unwrap_err();
    assert!(matches!(err, EngineError::ModelLoad { .. }));
    assert!(registry.loaded().is_empty());

    let handle = registry.get_or_load(ModelName::Base).unwrap();
    let request = note_summarizer::GenerationRequest::new("note", 100, 50).unwrap();
    assert_eq!(handle.summarize(&request).unwrap(), "loaded on retry");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

// ─── Export document ─────────────────────────────────────────────────────────

#[test]
fn export_document_pairs_note_and_summary() {
    let summarizer = MockSummarizer::new("Short summary.");
    let service = SummaryService::new(summarizer);
    let outcome = service.summarize_note(CHEST_PAIN_NOTE, 100, 50).unwrap();

    let doc = export_document(CHEST_PAIN_NOTE, &outcome.summary);
    assert!(doc.starts_with("ORIGINAL NOTE:\n"));
    assert!(doc.contains("\n\nSUMMARY:\nShort summary."));
    assert!(doc.contains(CHEST_PAIN_NOTE));
}

// ─── Statistics over realistic pairs ─────────────────────────────────────────

#[test]
fn statistics_report_reduction_for_the_chest_pain_scenario() {
    let summary = "MI with ST elevation, sent for catheterization.";
    let stats = get_statistics(CHEST_PAIN_NOTE, summary);

    assert_eq!(stats.original_length, CHEST_PAIN_NOTE.chars().count());
    assert_eq!(stats.summary_length, summary.chars().count());
    assert!(stats.reduction_percentage > 0.0);
    assert_eq!(stats, get_statistics(CHEST_PAIN_NOTE, summary));
}

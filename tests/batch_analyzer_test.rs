mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{analysis_response, FailingJudge, MockJudge};
use vulnhound::enums::ai_provider_error::AiProviderError;
use vulnhound::enums::language::Language;
use vulnhound::enums::severity::Severity;
use vulnhound::services::batch_analyzer::BatchAnalyzer;
use vulnhound::structs::code_context::CodeContext;
use vulnhound::structs::extraction::Extraction;
use vulnhound::structs::finding::Finding;

fn extraction(line: usize) -> Extraction {
    Extraction {
        finding: Finding {
            file_path: "src/login.php".to_string(),
            language: Language::Php,
            line_number: line,
            vulnerability_type: "SQL_INJECTION".to_string(),
            description: "SQL injection vulnerabilities".to_string(),
            matched_pattern: "mysql_query\\s*\\(".to_string(),
            raw_line: "mysql_query($sql);".to_string(),
        },
        context: CodeContext {
            start_line: line,
            end_line: line,
            code: "mysql_query($sql);".to_string(),
        },
    }
}

fn fast_analyzer(judge: Arc<dyn vulnhound::traits::llm_judge::LlmJudge>, batch_size: usize) -> BatchAnalyzer {
    BatchAnalyzer::new(judge, None, batch_size, 4000)
        .with_retry_policy(3, Duration::from_millis(1))
}

#[tokio::test]
async fn one_verdict_per_finding_in_order() {
    let judge = Arc::new(MockJudge::new(vec![&analysis_response(&[
        ("Vulnerable", "High"),
        ("False Positive", "Low"),
    ])]));
    let analyzer = fast_analyzer(judge.clone(), 5);

    let extractions = vec![extraction(10), extraction(20)];
    let verdicts = analyzer.analyze(&extractions).await.unwrap();

    assert_eq!(verdicts.len(), extractions.len());
    assert_eq!(verdicts[0].severity, Severity::High);
    assert!(!verdicts[0].is_false_positive);
    assert!(verdicts[1].is_false_positive);
    assert_eq!(judge.call_count(), 1);
}

#[tokio::test]
async fn findings_are_split_into_batches() {
    let full_batch = analysis_response(&[("Vulnerable", "High"); 5]);
    let tail_batch = analysis_response(&[("Vulnerable", "Medium"); 2]);
    let judge = Arc::new(MockJudge::new(vec![&full_batch, &tail_batch]));
    let analyzer = fast_analyzer(judge.clone(), 5);

    let extractions: Vec<_> = (1..=7).map(extraction).collect();
    let verdicts = analyzer.analyze(&extractions).await.unwrap();

    assert_eq!(judge.call_count(), 2);
    assert_eq!(verdicts.len(), 7);
    assert_eq!(verdicts[4].severity, Severity::High);
    assert_eq!(verdicts[5].severity, Severity::Medium);

    let prompts = judge.prompts.lock().unwrap();
    assert!(prompts[0].contains("VULNERABILITY 5:"));
    assert!(!prompts[1].contains("VULNERABILITY 3:"));
}

#[tokio::test]
async fn exhausted_retries_fall_back_instead_of_failing() {
    let judge = Arc::new(FailingJudge::new(|| {
        AiProviderError::RateLimited("slow down".to_string())
    }));
    let analyzer = fast_analyzer(judge.clone(), 5);

    let extractions = vec![extraction(1), extraction(2)];
    let verdicts = analyzer.analyze(&extractions).await.unwrap();

    assert_eq!(judge.call_count(), 3);
    assert_eq!(verdicts.len(), 2);
    for verdict in &verdicts {
        assert_eq!(verdict.severity, Severity::Low);
        assert!(!verdict.is_false_positive);
        assert!(verdict.analysis.contains("Automated analysis failed"));
    }
}

#[tokio::test]
async fn authentication_failure_aborts_the_run() {
    let judge = Arc::new(FailingJudge::new(|| {
        AiProviderError::AuthenticationError("bad key".to_string())
    }));
    let analyzer = fast_analyzer(judge.clone(), 5);

    let result = analyzer.analyze(&[extraction(1)]).await;

    assert!(result.is_err());
    assert_eq!(judge.call_count(), 1);
}

#[tokio::test]
async fn non_retryable_error_fails_fast_per_batch() {
    let judge = Arc::new(FailingJudge::new(|| {
        AiProviderError::ApiError("400 bad request".to_string())
    }));
    let analyzer = fast_analyzer(judge.clone(), 1);

    let extractions = vec![extraction(1), extraction(2)];
    let verdicts = analyzer.analyze(&extractions).await.unwrap();

    // One attempt per batch, no retries for a non-retryable error.
    assert_eq!(judge.call_count(), 2);
    assert_eq!(verdicts.len(), 2);
}

#[tokio::test]
async fn garbled_response_still_yields_fallback_verdicts() {
    let judge = Arc::new(MockJudge::new(vec!["Sorry, I can't format that."]));
    let analyzer = fast_analyzer(judge, 5);

    let extractions = vec![extraction(1), extraction(2), extraction(3)];
    let verdicts = analyzer.analyze(&extractions).await.unwrap();

    assert_eq!(verdicts.len(), 3);
    for verdict in &verdicts {
        assert_eq!(verdict.severity, Severity::Low);
        assert!(!verdict.is_false_positive);
    }
}

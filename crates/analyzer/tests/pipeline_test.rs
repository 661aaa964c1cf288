use archmap_analyzer::{AnalyzeConfig, Analyzer, Strategy};
use archmap_extractor::ComponentKind;
use archmap_inference::StubModel;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::tempdir;

const CORE_LOGIC_RESPONSE: &str = r#"{
  "domains": [
    {
      "name": "CoreLogic",
      "description": "Primary processing classes",
      "confidence": 0.9,
      "members": ["Alpha", "Beta", "Gamma"],
      "relationships": []
    }
  ]
}"#;

fn write_three_class_project(root: &Path) {
    let files = [
        ("alpha.py", "Alpha"),
        ("beta.py", "Beta"),
        ("gamma.py", "Gamma"),
    ];
    for (name, class) in files {
        let content = format!(
            "class {class}:\n    \"\"\"The {class} processor.\"\"\"\n\n    \
             def start(self, payload):\n        return payload\n\n    \
             def stop(self):\n        return None\n"
        );
        fs::write(root.join(name), content).unwrap();
    }
}

fn config(strategy: Strategy) -> AnalyzeConfig {
    let _ = env_logger::builder().is_test(true).try_init();
    AnalyzeConfig {
        strategy,
        ..Default::default()
    }
}

#[tokio::test]
async fn end_to_end_stub_domain() -> anyhow::Result<()> {
    let temp = tempdir()?;
    write_three_class_project(temp.path());

    let stub = Arc::new(StubModel::with_response(CORE_LOGIC_RESPONSE));
    let analyzer = Analyzer::with_model(config(Strategy::Deep), stub.clone())?;
    let result = analyzer.analyze(temp.path()).await?;

    // Extraction: one class plus two methods per file.
    assert_eq!(result.file_count, 3);
    assert_eq!(result.component_count, 9);
    let kind_count = |kind: ComponentKind| {
        result
            .files
            .iter()
            .flat_map(|f| f.components.iter())
            .filter(|c| c.kind == kind)
            .count()
    };
    assert_eq!(kind_count(ComponentKind::Class), 3);
    assert_eq!(kind_count(ComponentKind::Function), 6);

    // Compression reported a real size reduction.
    assert_eq!(result.compression.files, 3);
    assert!(result.compression.ratio() > 0.0);

    // Reconciliation: exactly one semantically confirmed domain.
    assert_eq!(result.domains.len(), 1);
    let domain = &result.domains[0];
    assert_eq!(domain.name, "CoreLogic");
    assert_eq!(domain.members.len(), 3);
    assert!((domain.confidence - 0.9).abs() < 1e-6);
    assert!(!domain.structural_only);
    assert_eq!(domain.stats.file_count, 3);

    assert_eq!(result.degraded_batches, 0);
    assert!(!result.degraded);
    assert!(stub.calls() >= 1);
    Ok(())
}

#[tokio::test]
async fn fast_strategy_never_touches_the_model() -> anyhow::Result<()> {
    let temp = tempdir()?;
    write_three_class_project(temp.path());

    let stub = Arc::new(StubModel::with_response(CORE_LOGIC_RESPONSE));
    let analyzer = Analyzer::with_model(config(Strategy::Fast), stub.clone())?;
    let result = analyzer.analyze(temp.path()).await?;

    assert_eq!(stub.calls(), 0, "fast strategy must skip inference entirely");
    assert!(!result.domains.is_empty());
    assert!(result.domains.iter().all(|d| d.structural_only));
    assert!(!result.degraded);
    Ok(())
}

#[tokio::test]
async fn compress_only_stops_after_compression() -> anyhow::Result<()> {
    let temp = tempdir()?;
    write_three_class_project(temp.path());

    let analyzer = Analyzer::new(config(Strategy::CompressOnly))?;
    let result = analyzer.analyze(temp.path()).await?;

    assert!(result.domains.is_empty());
    assert_eq!(result.compression.files, 3);
    assert!(result.compression.skeleton_bytes > 0);
    Ok(())
}

#[tokio::test]
async fn repeated_runs_are_identical() -> anyhow::Result<()> {
    let temp = tempdir()?;
    write_three_class_project(temp.path());

    let analyzer = Analyzer::new(config(Strategy::CompressOnly))?;
    let first = analyzer.analyze(temp.path()).await?;
    let second = analyzer.analyze(temp.path()).await?;

    assert_eq!(first.file_count, second.file_count);
    assert_eq!(first.component_count, second.component_count);
    assert_eq!(first.compression, second.compression);
    Ok(())
}

#[tokio::test]
async fn inference_timeout_degrades_batch_but_run_completes() -> anyhow::Result<()> {
    let temp = tempdir()?;
    write_three_class_project(temp.path());

    let stub = Arc::new(
        StubModel::with_response(CORE_LOGIC_RESPONSE).with_delay(Duration::from_millis(400)),
    );
    let analyzer = Analyzer::with_model(
        AnalyzeConfig {
            strategy: Strategy::Deep,
            inference_timeout_ms: 40,
            ..Default::default()
        },
        stub,
    )?;

    let started = Instant::now();
    let result = analyzer.analyze(temp.path()).await?;
    let elapsed = started.elapsed();

    assert_eq!(result.degraded_batches, 1);
    assert!(result.degraded);
    // The batch contributed zero semantic domains; structural fallback fills in.
    assert!(result.domains.iter().all(|d| d.structural_only));
    assert!(
        elapsed < Duration::from_millis(400),
        "pipeline must return within timeout plus bounded overhead, took {elapsed:?}"
    );
    Ok(())
}

#[tokio::test]
async fn missing_model_downgrades_hybrid_to_structural() -> anyhow::Result<()> {
    let temp = tempdir()?;
    write_three_class_project(temp.path());

    let analyzer = Analyzer::new(config(Strategy::Hybrid))?;
    let result = analyzer.analyze(temp.path()).await?;

    assert!(result.degraded);
    assert!(!result.domains.is_empty());
    assert!(result.domains.iter().all(|d| d.structural_only));
    assert!(result
        .errors
        .iter()
        .any(|e| e.stage == "inference" && e.message.contains("downgraded")));
    Ok(())
}

#[tokio::test]
async fn unreadable_file_is_recoverable() -> anyhow::Result<()> {
    let temp = tempdir()?;
    write_three_class_project(temp.path());
    // Invalid UTF-8 makes the file unreadable as text; extraction skips it.
    fs::write(temp.path().join("binary.py"), [0xff, 0xfe, 0x00, 0x9f])?;

    let analyzer = Analyzer::new(config(Strategy::Fast))?;
    let result = analyzer.analyze(temp.path()).await?;

    assert_eq!(result.file_count, 3);
    assert!(result.degraded);
    assert!(result
        .errors
        .iter()
        .any(|e| e.stage == "extract" && e.path.as_deref() == Some("binary.py")));
    Ok(())
}

#[tokio::test]
async fn unreadable_root_is_fatal() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("does-not-exist");

    let analyzer = Analyzer::new(config(Strategy::Fast)).unwrap();
    let err = analyzer.analyze(&missing).await.unwrap_err();
    assert!(err.to_string().contains("unreadable"));
}

#[tokio::test]
async fn hybrid_covers_unclaimed_components_structurally() -> anyhow::Result<()> {
    let temp = tempdir()?;
    write_three_class_project(temp.path());

    // The stub only claims the three classes; the six methods are left to
    // structural coverage.
    let stub = Arc::new(StubModel::with_response(CORE_LOGIC_RESPONSE));
    let analyzer = Analyzer::with_model(config(Strategy::Hybrid), stub)?;
    let result = analyzer.analyze(temp.path()).await?;

    let semantic: Vec<_> = result.domains.iter().filter(|d| !d.structural_only).collect();
    let structural: Vec<_> = result.domains.iter().filter(|d| d.structural_only).collect();

    assert_eq!(semantic.len(), 1);
    assert_eq!(semantic[0].name, "CoreLogic");
    assert!(!structural.is_empty());

    // Every component is covered exactly once.
    let covered: usize = result.domains.iter().map(|d| d.members.len()).sum();
    assert_eq!(covered, result.component_count);
    Ok(())
}

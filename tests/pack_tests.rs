use promptcat::errors::PromptError;
use promptcat::output::FileSink;
use promptcat::{pack_project, PackRequest, ScanConfig};
use std::path::Path;
use tempfile::tempdir;
use tokio::fs;

async fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.unwrap();
    }
    fs::write(path, content).await.unwrap();
}

fn request(root: &Path, stats_model: Option<&str>) -> PackRequest {
    PackRequest {
        scan_dir: root.join("src"),
        project_root: root.to_path_buf(),
        config: ScanConfig::default().sorted(true),
        stats_model: stats_model.map(str::to_owned),
    }
}

#[tokio::test]
async fn test_pack_writes_prompt_to_file() -> Result<(), PromptError> {
    let project = tempdir().unwrap();
    let root = project.path();
    write_file(&root.join("src/app/app.component.ts"), "export class AppComponent {}").await;
    write_file(&root.join("src/index.html"), "<app-root></app-root>").await;
    write_file(&root.join("src/node_modules/lib/index.js"), "ignored").await;

    let out_dir = tempdir().unwrap();
    let out_path = out_dir.path().join("nested/prompt.txt");
    let summary = pack_project(request(root, None), &FileSink::new(&out_path)).await?;

    assert!(summary.delivered);
    assert_eq!(summary.files, 2);
    assert_eq!(summary.tokens, None);

    let written = fs::read_to_string(&out_path).await?;
    assert_eq!(
        written,
        "--- START FILE: src/index.html ---\n\
         <app-root></app-root>\n\
         --- END FILE: src/index.html ---\n\
         \n\
         --- START FILE: src/app/app.component.ts ---\n\
         export class AppComponent {}\n\
         --- END FILE: src/app/app.component.ts ---\n"
    );
    assert_eq!(summary.characters, written.chars().count());
    Ok(())
}

#[tokio::test]
async fn test_pack_counts_tokens_when_enabled() -> Result<(), PromptError> {
    let project = tempdir().unwrap();
    let root = project.path();
    write_file(&root.join("src/main.ts"), "console.log('hello world');").await;

    let out_dir = tempdir().unwrap();
    let out_path = out_dir.path().join("prompt.txt");
    let summary = pack_project(request(root, Some("gpt-4")), &FileSink::new(&out_path)).await?;

    assert!(summary.tokens.unwrap_or(0) > 0);
    Ok(())
}

#[tokio::test]
async fn test_pack_unknown_tokenizer_model_fails() {
    let project = tempdir().unwrap();
    let root = project.path();
    write_file(&root.join("src/main.ts"), "x").await;

    let out_dir = tempdir().unwrap();
    let out_path = out_dir.path().join("prompt.txt");
    let result = pack_project(
        request(root, Some("definitely-not-a-model")),
        &FileSink::new(&out_path),
    )
    .await;

    assert!(matches!(result, Err(PromptError::TokenizerError(_))));
    assert!(!out_path.exists());
}

#[tokio::test]
async fn test_pack_empty_tree_delivers_nothing() -> Result<(), PromptError> {
    let project = tempdir().unwrap();
    let root = project.path();
    write_file(&root.join("src/readme.txt"), "not collected").await;

    let out_dir = tempdir().unwrap();
    let out_path = out_dir.path().join("prompt.txt");
    let summary = pack_project(request(root, None), &FileSink::new(&out_path)).await?;

    assert!(!summary.delivered);
    assert_eq!(summary.files, 0);
    assert!(!out_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_pack_missing_scan_dir_is_invalid_root() {
    let project = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let out_path = out_dir.path().join("prompt.txt");

    let result = pack_project(request(project.path(), None), &FileSink::new(&out_path)).await;

    match result {
        Err(PromptError::InvalidRoot(path)) => assert!(path.ends_with("src")),
        other => panic!("Expected InvalidRoot, got {:?}", other),
    }
    assert!(!out_path.exists());
}
